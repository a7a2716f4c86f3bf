//! Property tests for the pairwise interaction predicate
//!
//! Covers symmetry, self-interaction, the reference offsets for producers and
//! range amplifiers, near misses around the producer apron, and monotonic
//! fall-off with distance.

use layout_planner::spatial::interaction::interacts;
use layout_planner::structure::{Structure, StructureKind};
use proptest::prelude::*;

fn producer(row: i32, col: i32) -> Structure {
    Structure::at(StructureKind::Producer, row, col)
}

fn amplifier(row: i32, col: i32) -> Structure {
    Structure::at(StructureKind::RangeAmplifier, row, col)
}

fn any_structure() -> impl Strategy<Value = Structure> {
    (
        prop::sample::select(StructureKind::ALL.to_vec()),
        -30i32..30,
        -30i32..30,
    )
        .prop_map(|(kind, row, col)| Structure::at(kind, row, col))
}

// ============================================================================
// Reference cases
// ============================================================================

#[test]
fn test_reference_producer_pairs() {
    assert!(interacts(&producer(1, 0), &producer(0, 1)));
    assert!(!interacts(&producer(0, 1), &producer(0, 4)));
    assert!(interacts(&producer(3, 3), &producer(6, 1)));
}

/// Every Producer/RangeAmplifier combination within two cells of (3, 3)
/// overlaps it.
#[test]
fn test_reference_offsets_all_kind_combinations() {
    for i in 1..6 {
        for k in 1..6 {
            assert!(interacts(&producer(3, 3), &producer(i, k)), "P/P ({}, {})", i, k);
            assert!(interacts(&amplifier(3, 3), &producer(i, k)), "A/P ({}, {})", i, k);
            assert!(interacts(&producer(3, 3), &amplifier(i, k)), "P/A ({}, {})", i, k);
            assert!(interacts(&amplifier(3, 3), &amplifier(i, k)), "A/A ({}, {})", i, k);
        }
    }
}

/// Pairs around the producer apron, including near misses that stay apart
#[test]
fn test_apron_neighbourhood_table() {
    let cases = [
        (amplifier(0, 0), amplifier(0, 3), false),
        (amplifier(0, 0), amplifier(3, 0), false),
        (amplifier(0, 0), producer(3, 0), false),
        (amplifier(0, 0), producer(3, 1), false),
        (producer(0, 0), producer(3, 2), false),
        (producer(0, 0), producer(4, 2), false),
        (producer(0, 0), amplifier(3, 2), false),
        (producer(0, 0), producer(3, -2), true),
        (producer(0, 0), producer(4, -2), true),
        (producer(0, 0), amplifier(3, 0), true),
        (producer(0, 0), producer(5, 0), false),
    ];
    for (a, b, expected) in cases {
        assert_eq!(interacts(&a, &b), expected, "{} vs {}", a, b);
        assert_eq!(interacts(&b, &a), expected, "{} vs {}", b, a);
    }
}

/// Closed-form rule for 3x3 kinds: order the pair row-major; an amplifier
/// first only touches on overlap, a producer first also reaches two rows
/// further down except along its lower-right diagonal.
fn three_by_three_rule(a: &Structure, b: &Structure) -> bool {
    let (first, second) = if a.anchor <= b.anchor { (a, b) } else { (b, a) };
    let d_row = second.anchor.row - first.anchor.row;
    let d_col = second.anchor.col - first.anchor.col;
    match first.kind {
        StructureKind::RangeAmplifier => d_row < 3 && d_col.abs() < 3,
        _ => d_row < 5 && d_col.abs() < 3 && !(d_col == 2 && d_row >= 3),
    }
}

#[test]
fn test_three_by_three_pairs_follow_closed_form() {
    let kinds = [StructureKind::Producer, StructureKind::RangeAmplifier];
    for a_kind in kinds {
        for b_kind in kinds {
            for d_row in -8..=8 {
                for d_col in -8..=8 {
                    let a = Structure::at(a_kind, 0, 0);
                    let b = Structure::at(b_kind, d_row, d_col);
                    assert_eq!(
                        interacts(&a, &b),
                        three_by_three_rule(&a, &b),
                        "{} vs {}",
                        a,
                        b
                    );
                }
            }
        }
    }
}

// ============================================================================
// Distance behaviour
// ============================================================================

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Along any ray, once two structures stop interacting they never start
/// again, and past footprint plus reach they are always apart.
#[test]
fn test_interaction_falls_off_monotonically() {
    for a_kind in StructureKind::ALL {
        for b_kind in StructureKind::ALL {
            let a = Structure::at(a_kind, 0, 0);
            for (dr, dc) in DIRECTIONS {
                let mut apart = false;
                for step in 0..12 {
                    let b = Structure::at(b_kind, dr * step, dc * step);
                    let hit = interacts(&a, &b);
                    if apart {
                        assert!(
                            !hit,
                            "{:?} and {:?} interact again at step {} along ({}, {})",
                            a_kind, b_kind, step, dr, dc
                        );
                    }
                    apart |= !hit;
                    if step >= 6 {
                        assert!(!hit, "{:?} and {:?} still interact at step {}", a_kind, b_kind, step);
                    }
                }
            }
        }
    }
}

#[test]
fn test_three_by_three_kinds_interact_when_footprints_overlap() {
    for a in [StructureKind::Producer, StructureKind::RangeAmplifier] {
        for b in [StructureKind::Producer, StructureKind::RangeAmplifier] {
            for (dr, dc) in DIRECTIONS {
                for step in 0..3 {
                    assert!(interacts(
                        &Structure::at(a, 10, 10),
                        &Structure::at(b, 10 + dr * step, 10 + dc * step)
                    ));
                }
            }
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_interaction_is_symmetric(a in any_structure(), b in any_structure()) {
        prop_assert_eq!(interacts(&a, &b), interacts(&b, &a));
    }

    #[test]
    fn prop_structure_interacts_with_itself(a in any_structure()) {
        prop_assert!(interacts(&a, &a));
    }

    #[test]
    fn prop_shared_cell_implies_interaction(a in any_structure(), b in any_structure()) {
        let shared = a
            .footprint_cells()
            .iter()
            .any(|cell| b.footprint().contains(*cell));
        if shared {
            prop_assert!(interacts(&a, &b));
        }
    }

    #[test]
    fn prop_interaction_matches_cell_definition(a in any_structure(), b in any_structure()) {
        let reaches = |x: &Structure, y: &Structure| {
            x.range_cells().iter().any(|cell| y.footprint().contains(*cell))
        };
        prop_assert_eq!(interacts(&a, &b), reaches(&a, &b) || reaches(&b, &a));
    }
}
