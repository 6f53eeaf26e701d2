use super::*;

#[test]
fn solid_paint_is_uniform() {
    let c = Color::rgb(10, 20, 30);
    let p = Paint::Solid(c);
    assert_eq!(p.color_at(Point::new(0.0, 0.0)), c);
    assert_eq!(p.color_at(Point::new(500.0, -3.0)), c);
}

#[test]
fn gradient_samples_along_axis_and_clamps() {
    let p = Paint::LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(100.0, 0.0),
        from: Color::rgb(0, 0, 0),
        to: Color::rgb(200, 100, 0),
    };
    assert_eq!(p.color_at(Point::new(-50.0, 7.0)), Color::rgb(0, 0, 0));
    assert_eq!(p.color_at(Point::new(50.0, 30.0)), Color::rgb(100, 50, 0));
    assert_eq!(p.color_at(Point::new(150.0, 0.0)), Color::rgb(200, 100, 0));
}

#[test]
fn degenerate_gradient_uses_start_color() {
    let p = Paint::LinearGradient {
        start: Point::new(5.0, 5.0),
        end: Point::new(5.0, 5.0),
        from: Color::rgb(1, 2, 3),
        to: Color::rgb(9, 9, 9),
    };
    assert_eq!(p.color_at(Point::new(0.0, 0.0)), Color::rgb(1, 2, 3));
}
