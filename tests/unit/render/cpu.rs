use super::*;
use crate::foundation::color::Color;

#[test]
fn zero_and_oversized_allocations_fail() {
    assert!(CpuSurface::new(0, 10).is_err());
    assert!(CpuSurface::new(10, 0).is_err());
    assert!(CpuSurface::new(70_000, 10).is_err());
    let err = CpuSurfaceFactory.allocate(10, 100_000).err().unwrap();
    assert!(err.is_construction());
}

#[test]
fn stroke_reaches_pixels_after_present() {
    let mut s = CpuSurface::new(32, 32).unwrap();
    let paint = Paint::Solid(Color::rgb(255, 0, 0));
    s.stroke_line(Point::new(2.0, 16.0), Point::new(30.0, 16.0), 4.0, &paint);
    assert_eq!(s.op_count(), 1);
    assert!(s.premul_rgba8().iter().all(|b| *b == 0));

    s.present();
    let px = s.read_rgba8().unwrap();
    let center = (16 * 32 + 16) * 4;
    assert_eq!(&px[center..center + 4], &[255, 0, 0, 255]);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
}

#[test]
fn clear_erases_pixels_and_ops() {
    let mut s = CpuSurface::new(16, 16).unwrap();
    s.fill_circle(Point::new(8.0, 8.0), 6.0, &Paint::Solid(Color::rgb(0, 0, 255)));
    s.present();
    assert!(s.premul_rgba8().iter().any(|b| *b != 0));
    s.clear();
    assert_eq!(s.op_count(), 0);
    assert!(s.premul_rgba8().iter().all(|b| *b == 0));
}

#[test]
fn later_presents_keep_earlier_strokes() {
    let mut s = CpuSurface::new(32, 8).unwrap();
    let paint = Paint::Solid(Color::rgb(0, 255, 0));
    s.stroke_line(Point::new(1.0, 4.0), Point::new(10.0, 4.0), 4.0, &paint);
    s.present();
    s.stroke_line(Point::new(20.0, 4.0), Point::new(30.0, 4.0), 4.0, &paint);
    s.present();
    let px = s.read_rgba8().unwrap();
    let at = |x: usize| px[(4 * 32 + x) * 4 + 3];
    assert_eq!(at(5), 255);
    assert_eq!(at(25), 255);
    assert_eq!(at(15), 0);
}

fn translucent_fan(s: &mut CpuSurface, range: std::ops::Range<usize>, present_each: bool) {
    for i in range {
        let paint = Paint::Solid(Color {
            a: 0.45,
            ..Color::rgb(40 * (i as u8 % 6), 200, 90)
        });
        let y = 4.0 + i as f64 * 2.5;
        s.stroke_quad(
            Point::new(2.0, y),
            Point::new(20.0, 30.0 - y),
            Point::new(38.0, y + 3.0),
            3.0,
            &paint,
        );
        s.fill_circle(Point::new(6.0 + i as f64 * 3.0, 16.0), 2.5, &paint);
        if present_each {
            s.present();
        }
    }
}

#[test]
fn incremental_presents_match_one_present() {
    let mut once = CpuSurface::new(40, 32).unwrap();
    translucent_fan(&mut once, 0..10, false);
    once.present();

    let mut stepwise = CpuSurface::new(40, 32).unwrap();
    translucent_fan(&mut stepwise, 0..10, true);

    assert_eq!(stepwise.op_count(), once.op_count());
    assert_eq!(stepwise.premul_rgba8(), once.premul_rgba8());
}

#[test]
fn present_consumes_only_pending_ops() {
    let mut s = CpuSurface::new(16, 16).unwrap();
    let paint = Paint::Solid(Color::rgb(255, 0, 0));
    s.stroke_line(Point::new(1.0, 8.0), Point::new(15.0, 8.0), 2.0, &paint);
    s.stroke_line(Point::new(8.0, 1.0), Point::new(8.0, 15.0), 2.0, &paint);
    assert_eq!(s.pending_count(), 2);

    s.present();
    assert_eq!(s.pending_count(), 0);
    assert_eq!(s.op_count(), 2);
    let first = s.premul_rgba8().to_vec();

    s.present();
    assert_eq!(s.premul_rgba8(), first.as_slice());

    s.clear();
    assert_eq!(s.op_count(), 0);
    assert_eq!(s.pending_count(), 0);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    assert_eq!(unpremultiply(&[64, 32, 0, 128]), vec![128, 64, 0, 128]);
    assert_eq!(unpremultiply(&[9, 9, 9, 0]), vec![0, 0, 0, 0]);
}
