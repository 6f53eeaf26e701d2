use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(Color::parse("#0F0").unwrap(), Color::rgb(0, 255, 0));

    let c = Color::parse("#0000ff80").unwrap();
    assert_eq!((c.r, c.g, c.b), (0, 0, 255));
    assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
}

#[test]
fn parses_rgb_functions() {
    assert_eq!(
        Color::parse("rgb(255, 235, 59)").unwrap(),
        Color::rgb(255, 235, 59)
    );
    let c = Color::parse("rgba(10, 20, 30, 0.5)").unwrap();
    assert_eq!((c.r, c.g, c.b), (10, 20, 30));
    assert_eq!(c.a, 0.5);
}

#[test]
fn rejects_unknown_formats() {
    assert!(Color::parse("yellow").is_err());
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("rgb(1, 2)").is_err());
    assert!(Color::parse("#zzzzzz").is_err());
}

#[test]
fn lighten_and_darken_move_lightness_in_opposite_directions() {
    let base = Color::rgb(200, 120, 40);
    let light = base.lighten(30.0);
    let dark = base.darken(30.0);
    let sum = |c: Color| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
    assert!(sum(light) > sum(base));
    assert!(sum(dark) < sum(base));
    assert_eq!(base.lighten(0.0), base);
}

#[test]
fn extremes_saturate_to_white_and_black() {
    let base = Color::rgb(30, 144, 255);
    assert_eq!(base.lighten(100.0), Color::rgb(255, 255, 255));
    assert_eq!(base.darken(100.0), Color::rgb(0, 0, 0));
}

#[test]
fn achromatic_colors_stay_grey() {
    let grey = Color::rgb(128, 128, 128).darken(20.0);
    assert_eq!(grey.r, grey.g);
    assert_eq!(grey.g, grey.b);
}

#[test]
fn lerp_and_formatting() {
    let a = Color::rgb(0, 0, 0);
    let b = Color::rgb(255, 255, 255);
    assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
    assert_eq!(a.lerp(b, 2.0), b);
    assert_eq!(Color::rgb(255, 235, 59).to_hex(), "#FFEB3B");
    assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    assert_eq!(Color::rgb(1, 2, 3).to_rgba8(), [1, 2, 3, 255]);
}
