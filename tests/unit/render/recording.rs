use super::*;
use crate::foundation::color::Color;

fn paint() -> Paint {
    Paint::Solid(Color::rgb(1, 2, 3))
}

#[test]
fn records_calls_in_order() {
    let mut s = RecordingSurface::new(10, 10);
    s.stroke_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 2.0, &paint());
    s.fill_circle(Point::new(5.0, 5.0), 1.0, &paint());
    let cmds = s.commands();
    assert_eq!(cmds.len(), 2);
    assert!(matches!(cmds[0], DrawCmd::Line { width, .. } if width == 2.0));
    assert!(matches!(cmds[1], DrawCmd::Circle { .. }));
}

#[test]
fn factory_shares_display_lists() {
    let factory = RecordingSurfaceFactory::new();
    let mut handle = factory.clone();
    let mut surface = handle.allocate(40, 20).unwrap();
    surface.stroke_quad(
        Point::new(0.0, 0.0),
        Point::new(1.0, 2.0),
        Point::new(3.0, 0.0),
        1.0,
        &paint(),
    );
    surface.present();

    let records = factory.allocations();
    assert_eq!(records.len(), 1);
    assert_eq!((records[0].width, records[0].height), (40, 20));
    assert_eq!(records[0].commands().len(), 1);
    assert_eq!(records[0].presents(), 1);
}

#[test]
fn visible_starts_after_last_clear() {
    let mut factory = RecordingSurfaceFactory::new();
    let mut surface = factory.allocate(4, 4).unwrap();
    surface.fill_circle(Point::new(1.0, 1.0), 1.0, &paint());
    surface.clear();
    surface.fill_circle(Point::new(2.0, 2.0), 1.0, &paint());
    let record = &factory.allocations()[0];
    assert_eq!(record.commands().len(), 3);
    let visible = record.visible();
    assert_eq!(visible.len(), 1);
    assert!(matches!(visible[0], DrawCmd::Circle { center, .. } if center == Point::new(2.0, 2.0)));
}

#[test]
fn size_limit_simulates_allocation_failure() {
    let mut factory = RecordingSurfaceFactory::with_max_size(100);
    assert!(factory.allocate(100, 100).is_ok());
    let err = factory.allocate(101, 5).err().unwrap();
    assert!(matches!(err, InkError::Surface(_)));
    assert!(factory.allocate(0, 5).is_err());
    assert_eq!(factory.allocations().len(), 1);
}
