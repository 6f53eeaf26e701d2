use super::*;

fn parents(pairs: &[(&str, Option<&str>)]) -> HashMap<RegionKey, Option<RegionKey>> {
    pairs
        .iter()
        .map(|(k, p)| (RegionKey::new(*k), p.map(RegionKey::new)))
        .collect()
}

#[test]
fn wrapped_edges_always_continue() {
    let boxes = [
        Rect::new(10.0, 0.0, 200.0, 20.0),
        Rect::new(0.0, 24.0, 200.0, 44.0),
        Rect::new(0.0, 48.0, 80.0, 68.0),
    ];
    let segs = segments_for(&boxes, false, false);
    assert_eq!(segs.len(), 3);
    assert!(!segs[0].continues_before);
    assert!(segs[0].continues_after);
    assert!(segs[1].continues_before && segs[1].continues_after);
    assert!(segs[2].continues_before);
    assert!(!segs[2].continues_after);
    assert_eq!(segs[1].bounds, boxes[1]);
}

#[test]
fn single_box_takes_provider_flags() {
    let segs = segments_for(&[Rect::new(0.0, 0.0, 50.0, 10.0)], true, false);
    assert_eq!(segs.len(), 1);
    assert!(segs[0].continues_before);
    assert!(!segs[0].continues_after);
    assert!(segments_for(&[], true, true).is_empty());
}

#[test]
fn depth_counts_annotated_ancestors() {
    let map = parents(&[("a", None), ("b", Some("a")), ("c", Some("b"))]);
    assert_eq!(nesting_depth(&RegionKey::new("a"), &map), 1);
    assert_eq!(nesting_depth(&RegionKey::new("b"), &map), 2);
    assert_eq!(nesting_depth(&RegionKey::new("c"), &map), 3);
}

#[test]
fn depth_stops_at_unknown_parent_and_cycles() {
    let map = parents(&[("a", Some("outside")), ("x", Some("y")), ("y", Some("x"))]);
    assert_eq!(nesting_depth(&RegionKey::new("a"), &map), 1);
    assert_eq!(nesting_depth(&RegionKey::new("x"), &map), 2);
}

#[test]
fn z_index_by_depth() {
    assert_eq!(z_index_for_depth(0), 1);
    assert_eq!(z_index_for_depth(1), 1);
    assert_eq!(z_index_for_depth(2), 1002);
    assert!(z_index_for_depth(2) >= 1001);
    assert!(z_index_for_depth(5) > z_index_for_depth(4));
}

#[test]
fn placement_offsets_by_renderer_bounds() {
    let segment = Segment::from_ltwh(100.0, 50.0, 200.0, 20.0);
    let bounds = Bounds {
        width: 240,
        total_height: 30.0,
        vertical_offset: 5.0,
        horizontal_padding: 20.0,
    };
    let config = EffectiveConfig::default();
    let (origin, size) = placement(&segment, &bounds, &config);
    assert!((origin.x - 80.0).abs() < 1e-9);
    assert!((origin.y - (50.0 - 5.0 - 2.0)).abs() < 1e-9);
    assert_eq!(size.width, 240.0);
    assert_eq!(size.height, 30.0);
}

#[test]
fn placement_applies_offset_and_keeps_line_height() {
    let segment = Segment::from_ltwh(0.0, 0.0, 100.0, 40.0);
    let bounds = Bounds {
        width: 110,
        total_height: 10.0,
        vertical_offset: 0.0,
        horizontal_padding: 5.0,
    };
    let config = EffectiveConfig {
        offset: 1.0,
        ..EffectiveConfig::default()
    };
    let (origin, size) = placement(&segment, &bounds, &config);
    assert!((origin.y - (-4.0 + 20.0)).abs() < 1e-9);
    assert_eq!(size.height, 40.0);
}

#[test]
fn skew_scales_with_line_height() {
    let segment = Segment::from_ltwh(0.0, 0.0, 100.0, 20.0);
    let config = EffectiveConfig {
        skew_x: 0.5,
        skew_y: -0.25,
        ..EffectiveConfig::default()
    };
    let skew = skew_for(&segment, &config);
    assert_eq!(skew, Vec2::new(10.0, -5.0));
}
