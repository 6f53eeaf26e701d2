use super::*;
use crate::config::EffectiveConfig;
use crate::foundation::color::Color;
use crate::foundation::core::Segment;

#[test]
fn closed_outline_of_edge_pieces() {
    let segment = Segment::from_ltwh(5.0, 5.0, 60.0, 16.0);
    let config = EffectiveConfig::default();
    let input = StrokeInput {
        segment: &segment,
        config: &config,
        color: Color::rgb(0, 0, 0),
    };
    let layout = layout(&input);
    let plan = primitives(&input, &layout, &mut Rng64::new(8));
    assert_eq!(plan.len(), layout.primitive_count);
    assert_eq!(plan.len(), 4 * PIECES_PER_EDGE);

    let (Some(Primitive::Line { from: first, .. }), Some(Primitive::Line { to: last, .. })) =
        (plan.first(), plan.last())
    else {
        panic!("sketch emits lines");
    };
    assert_eq!(first, last);
}
