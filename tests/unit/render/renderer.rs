use super::*;
use crate::config::DrawingMode;
use crate::render::recording::{DrawCmd, RecordingSurfaceFactory};

const MODES: [DrawingMode; 5] = [
    DrawingMode::Highlight,
    DrawingMode::Circle,
    DrawingMode::Burst,
    DrawingMode::Scribble,
    DrawingMode::Sketchout,
];

fn renderer(mode: DrawingMode) -> Renderer {
    let mut config = EffectiveConfig::default();
    config.drawing_mode = mode;
    config.animation_speed = 1000.0;
    config.easing = crate::animation::ease::Easing::Linear;
    Renderer::new(
        config,
        Color::rgb(250, 210, 30),
        Segment::from_ltwh(0.0, 0.0, 90.0, 12.0),
        99,
    )
    .unwrap()
}

fn bound(mode: DrawingMode) -> (Renderer, RecordingSurfaceFactory) {
    let factory = RecordingSurfaceFactory::new();
    let mut r = renderer(mode);
    r.set_bounds(&mut factory.clone()).unwrap();
    (r, factory)
}

fn drawn(factory: &RecordingSurfaceFactory) -> Vec<DrawCmd> {
    factory.allocations()[0].visible()
}

#[test]
fn any_partition_paints_the_same_as_one_step() {
    let partitions: [&[f64]; 4] = [
        &[0.0, 1.0],
        &[0.0, 0.5, 1.0],
        &[0.0, 0.013, 0.2, 0.2, 0.77, 0.999, 1.0],
        &[0.0, 0.1, 0.9, 1.0],
    ];
    for mode in MODES {
        let (mut whole, whole_f) = bound(mode);
        whole.step(0.0, 1.0).unwrap();
        let expected = drawn(&whole_f);
        assert!(!expected.is_empty());

        for cuts in partitions {
            let (mut r, f) = bound(mode);
            for pair in cuts.windows(2) {
                r.step(pair[0], pair[1]).unwrap();
            }
            assert_eq!(drawn(&f), expected, "{mode:?} {cuts:?}");
            assert_eq!(r.painted_count(), r.primitive_count());
        }
    }
}

#[test]
fn overlapping_and_backward_steps_never_duplicate() {
    let (mut r, f) = bound(DrawingMode::Burst);
    r.step(0.0, 0.6).unwrap();
    r.step(0.3, 0.8).unwrap();
    r.step(0.0, 0.8).unwrap();
    r.step(0.5, 1.0).unwrap();
    assert_eq!(drawn(&f).len(), r.primitive_count());
}

#[test]
fn skip_completes_regardless_of_geometry() {
    for mode in MODES {
        let (mut r, _f) = bound(mode);
        r.start_animation(true).unwrap();
        assert!(r.is_completed());
        assert_eq!(r.progress(), 1.0);
        assert_eq!(r.painted_count(), r.primitive_count());
    }
}

#[test]
fn set_bounds_twice_is_a_lifecycle_error() {
    let (mut r, f) = bound(DrawingMode::Highlight);
    let err = r.set_bounds(&mut f.clone()).unwrap_err();
    assert!(matches!(err, InkError::Lifecycle(_)));
    assert_eq!(f.allocations().len(), 1);
}

#[test]
fn step_before_bounds_is_a_lifecycle_error() {
    let mut r = renderer(DrawingMode::Highlight);
    assert!(matches!(r.step(0.0, 1.0), Err(InkError::Lifecycle(_))));
    assert!(r.bounds().is_none());
}

#[test]
fn degenerate_segment_is_rejected() {
    let err = Renderer::new(
        EffectiveConfig::default(),
        Color::rgb(0, 0, 0),
        Segment::from_ltwh(0.0, 0.0, f64::NAN, 10.0),
        0,
    )
    .unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn surface_failure_propagates() {
    let mut r = renderer(DrawingMode::Circle);
    let err = r
        .set_bounds(&mut RecordingSurfaceFactory::with_max_size(8))
        .unwrap_err();
    assert!(matches!(err, InkError::Surface(_)));
}

#[test]
fn advance_follows_elapsed_time() {
    let (mut r, _f) = bound(DrawingMode::Highlight);
    assert!(!r.advance(0.0).unwrap(), "idle renderers do not tick");

    r.start_animation(false).unwrap();
    assert_eq!(r.state(), RevealState::Animating);
    assert!(r.advance(5_000.0).unwrap());
    assert_eq!(r.progress(), 0.0);

    assert!(r.advance(5_500.0).unwrap());
    assert!((r.progress() - 0.5).abs() < 1e-9);
    let half = r.painted_count();
    assert!(half > 0 && half < r.primitive_count());

    assert!(!r.advance(6_200.0).unwrap());
    assert!(r.is_completed());
    assert_eq!(r.painted_count(), r.primitive_count());
    assert!(!r.advance(7_000.0).unwrap());
}

#[test]
fn progress_never_decreases() {
    let (mut r, _f) = bound(DrawingMode::Scribble);
    r.step(0.0, 0.7).unwrap();
    r.step(0.1, 0.2).unwrap();
    assert_eq!(r.progress(), 0.7);
}

#[test]
fn completed_renderer_needs_rearm_to_animate_again() {
    let (mut r, f) = bound(DrawingMode::Sketchout);
    r.start_animation(true).unwrap();
    r.start_animation(false).unwrap();
    assert!(r.is_completed());

    r.rearm();
    assert_eq!(r.state(), RevealState::Idle);
    assert_eq!(r.painted_count(), 0);
    assert!(drawn(&f).is_empty());

    r.start_animation(false).unwrap();
    assert!(r.is_animating());
    assert!(r.advance(0.0).unwrap());
    assert!(!r.advance(1_000.0).unwrap());
    assert_eq!(drawn(&f).len(), r.primitive_count());
}

#[test]
fn redraw_full_repaints_from_scratch() {
    let (mut r, f) = bound(DrawingMode::Burst);
    r.step(0.0, 0.4).unwrap();
    r.redraw_full().unwrap();
    assert!(r.is_completed());
    assert_eq!(drawn(&f).len(), r.primitive_count());
    assert!(f.allocations()[0].commands().contains(&DrawCmd::Clear));
}

#[test]
fn bounds_report_surface_and_offsets() {
    let (r, f) = bound(DrawingMode::Circle);
    let b = r.bounds().unwrap();
    let rec = &f.allocations()[0];
    assert_eq!(b.width, rec.width);
    assert_eq!(b.horizontal_padding, 22.5);
    assert_eq!(b.vertical_offset, 22.5);
    assert_eq!(b.total_height, 57.0);
}

fn tall_highlight() -> Renderer {
    let mut config = EffectiveConfig::default();
    config.height = 100_000.0;
    Renderer::new(
        config,
        Color::rgb(250, 210, 30),
        Segment::from_ltwh(0.0, 0.0, 90.0, 12.0),
        1,
    )
    .unwrap()
}

#[test]
fn oversized_surface_fails_before_geometry() {
    let mut config = EffectiveConfig::default();
    config.height = 50.0;
    let mut r = Renderer::new(
        config,
        Color::rgb(250, 210, 30),
        Segment::from_ltwh(0.0, 0.0, 90.0, 12.0),
        1,
    )
    .unwrap();
    let factory = RecordingSurfaceFactory::with_max_size(400);
    let err = r.set_bounds(&mut factory.clone()).unwrap_err();
    assert!(matches!(err, InkError::Surface(_)));
    assert_eq!(r.primitive_count(), 0);
    assert!(r.bounds().is_none());
    assert!(factory.allocations().is_empty());
}

#[test]
fn geometry_budget_is_checked_before_allocation() {
    let mut r = tall_highlight();
    let factory = RecordingSurfaceFactory::new();
    let err = r.set_bounds(&mut factory.clone()).unwrap_err();
    assert!(err.is_construction());
    assert!(matches!(err, InkError::Construction(_)));
    assert_eq!(r.primitive_count(), 0);
    assert!(factory.allocations().is_empty());
}
