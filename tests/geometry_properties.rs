//! Link shape property tests
//!
//! Tests for shape heights under each compaction level and loop outlines.

use links_track::core::{IndexedInterval, KeyMode, LinkPayload};
use links_track::render::{
    compact_height, HeightAccumulator, LinkShape, CONSTANT_HEIGHT, HEIGHT_MARGIN,
};
use links_track::{CompactLevel, LinksType};
use proptest::prelude::*;

fn arb_interval() -> impl Strategy<Value = IndexedInterval> {
    (
        0u64..1_000_000,
        0u64..10_000,
        0u64..1_000_000,
        0u64..10_000,
        any::<bool>(),
    )
        .prop_map(|(s1, l1, s2, l2, use_middle)| {
            IndexedInterval::new(
                LinkPayload::new(s1, s1 + l1, s2, s2 + l2, None),
                KeyMode::from_use_middle(use_middle),
            )
        })
}

fn arb_level() -> impl Strategy<Value = CompactLevel> {
    prop_oneof![
        Just(CompactLevel::Proportional),
        Just(CompactLevel::SquareRoot),
        Just(CompactLevel::Constant),
    ]
}

proptest! {
    /// Property: arcs and triangles reach the compacted key width
    #[test]
    fn test_arc_and_triangle_heights(iv in arb_interval(), level in arb_level()) {
        let expected = compact_height(iv.key_width(), level);
        let arc = LinksType::Arcs.shape_fn()(&iv, level);
        let triangle = LinksType::Triangles.shape_fn()(&iv, level);
        prop_assert_eq!(arc.height(), expected);
        prop_assert_eq!(triangle.height(), expected);
    }

    /// Property: level 2 flattens every arc to the same height
    #[test]
    fn test_constant_level(iv in arb_interval()) {
        let arc = LinksType::Arcs.shape_fn()(&iv, CompactLevel::Constant);
        prop_assert_eq!(arc.height(), CONSTANT_HEIGHT);
    }

    /// Property: arcs are centered on the key
    #[test]
    fn test_arc_centered(iv in arb_interval(), level in arb_level()) {
        match LinksType::Arcs.shape_fn()(&iv, level) {
            LinkShape::Arc { center, width, .. } => {
                prop_assert_eq!(width, iv.key_width());
                prop_assert!((center - (iv.key_begin() + iv.key_end()) / 2.0).abs() < 1e-6);
            }
            other => prop_assert!(false, "expected arc, got {:?}", other),
        }
    }

    /// Property: loops ignore the compaction level and peak at end2 - start1
    #[test]
    fn test_loop_height(iv in arb_interval(), level in arb_level()) {
        let shape = LinksType::Loops.shape_fn()(&iv, level);
        let p = iv.payload;
        prop_assert_eq!(shape.height(), (p.end2 - p.start1) as f64);
        prop_assert_eq!(&shape, &LinksType::Loops.shape_fn()(&iv, CompactLevel::Proportional));

        if let LinkShape::Loop { vertices } = shape {
            for v in &vertices {
                prop_assert!(v.y <= vertices[2].y);
            }
        }
    }

    /// Property: the accumulated height is the tallest shape plus the margin
    #[test]
    fn test_accumulator(
        ivs in prop::collection::vec(arb_interval(), 1..30),
        level in arb_level()
    ) {
        let mut acc = HeightAccumulator::new();
        let mut tallest: f64 = 0.0;
        for iv in &ivs {
            let shape = LinksType::Arcs.shape_fn()(iv, level);
            tallest = tallest.max(shape.height());
            acc.observe(&shape);
        }
        prop_assert_eq!(acc.max_height(), tallest);
        prop_assert_eq!(acc.finish(), tallest * HEIGHT_MARGIN);
    }
}

#[test]
fn test_nested_loci_use_middle_shapes() {
    // Locus 2 lies inside locus 1: midpoints 550 and 250
    let iv = IndexedInterval::new(LinkPayload::new(100, 1000, 200, 300, None), KeyMode::Middle);

    let arc = LinksType::Arcs.shape_fn()(&iv, CompactLevel::Proportional);
    assert_eq!(
        arc,
        LinkShape::Arc {
            center: 400.0,
            width: 300.0,
            height: 300.0
        }
    );

    match LinksType::Triangles.shape_fn()(&iv, CompactLevel::Proportional) {
        LinkShape::Triangle { vertices } => {
            assert_eq!((vertices[0].x, vertices[0].y), (250.0, 0.0));
            assert_eq!((vertices[1].x, vertices[1].y), (400.0, 300.0));
            assert_eq!((vertices[2].x, vertices[2].y), (550.0, 0.0));
        }
        other => panic!("expected triangle, got {:?}", other),
    }
}
