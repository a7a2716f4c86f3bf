//! Integration tests for persistent board state
//!
//! These tests verify the placement invariants:
//! - Footprints never overlap after any sequence of successful placements
//! - A rejected placement leaves the state exactly as it was
//! - Snapshots can be shared read-only between threads

use std::sync::Arc;

use layout_planner::core::error::PlacementConflict;
use layout_planner::core::types::Position;
use layout_planner::layout::GridState;
use layout_planner::structure::{Structure, StructureKind};

fn board() -> GridState {
    GridState::with_board_size(18)
}

/// Deterministic pseudo-random anchors so the sequence is reproducible
fn scripted_structures(count: usize) -> Vec<Structure> {
    let mut seed: u32 = 0x2545_f491;
    (0..count)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let kind = StructureKind::ALL[(seed % StructureKind::COUNT as u32) as usize];
            let row = ((seed >> 8) % 20) as i32 - 1;
            let col = ((seed >> 16) % 20) as i32 - 1;
            Structure::at(kind, row, col)
        })
        .collect()
}

// ============================================================================
// No-overlap invariant
// ============================================================================

#[test]
fn test_no_overlap_after_many_placements() {
    let mut state = board();
    let mut accepted = 0;
    for structure in scripted_structures(400) {
        if let Ok(next) = state.add_building(structure) {
            state = next;
            accepted += 1;
        }
    }
    assert!(accepted > 10, "script should place a reasonable number of structures");

    let placed = state.placed();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(
                !a.footprint().intersects(&b.footprint()),
                "{} overlaps {}",
                a,
                b
            );
        }
    }

    let footprint_total: usize = placed.iter().map(|s| s.kind.cell_count()).sum();
    assert_eq!(state.occupied_cells(), footprint_total);
    assert_eq!(state.counters().cells(), footprint_total);
    assert!(state.check_invariants().is_ok());
}

// ============================================================================
// Idempotent failure
// ============================================================================

#[test]
fn test_conflicting_placement_changes_nothing() {
    let state = board()
        .add_all([
            Structure::at(StructureKind::RangeAmplifier, 0, 4),
            Structure::at(StructureKind::Producer, 0, 7),
        ])
        .unwrap();
    let before = state.clone();

    let overlapping = Structure::at(StructureKind::Producer, 1, 8);
    let off_board = Structure::at(StructureKind::RangeAmplifier, 16, 16);

    assert!(matches!(
        state.add_building(overlapping),
        Err(PlacementConflict::Occupied { .. })
    ));
    assert!(matches!(
        state.add_building(off_board),
        Err(PlacementConflict::OutOfBounds { .. })
    ));

    assert_eq!(state, before);
    assert_eq!(state.placed(), before.placed());
    assert_eq!(state.counters(), before.counters());
    assert_eq!(state.occupied_cells(), before.occupied_cells());
}

#[test]
fn test_conflict_reports_owner() {
    let state = board()
        .add_building(Structure::at(StructureKind::SupplyNode, 5, 5))
        .unwrap();
    let err = state
        .add_building(Structure::at(StructureKind::Producer, 4, 4))
        .unwrap_err();
    assert_eq!(err.cell(), Position::new(5, 5));
    assert_eq!(
        err.to_string(),
        "Producer@(4, 4) overlaps SupplyNode@(5, 5) at (5, 5)"
    );
}

// ============================================================================
// Persistence and sharing
// ============================================================================

#[test]
fn test_branches_diverge_from_shared_ancestor() {
    let ancestor = board()
        .add_building(Structure::at(StructureKind::Producer, 6, 6))
        .unwrap();

    let left = ancestor
        .add_building(Structure::at(StructureKind::RangeAmplifier, 6, 2))
        .unwrap();
    let right = ancestor
        .add_building(Structure::at(StructureKind::RangeAmplifier, 6, 10))
        .unwrap();

    assert_eq!(ancestor.placed().len(), 1);
    assert_eq!(left.placed().len(), 2);
    assert_eq!(right.placed().len(), 2);
    assert!(ancestor.is_free(Position::new(6, 2)));
    assert!(right.is_free(Position::new(6, 2)));
    assert!(!left.is_free(Position::new(6, 2)));
}

#[test]
fn test_snapshot_shared_across_threads() {
    let ancestor = Arc::new(
        board()
            .add_building(Structure::at(StructureKind::Producer, 8, 8))
            .unwrap(),
    );

    let results: Vec<Option<GridState>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = Arc::clone(&ancestor);
                scope.spawn(move || {
                    shared
                        .add_building(Structure::at(StructureKind::RangeAmplifier, worker * 4, 0))
                        .ok()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(Option::is_some));
    assert_eq!(ancestor.placed().len(), 1);
    for (worker, state) in results.iter().enumerate() {
        let state = state.as_ref().unwrap();
        assert_eq!(
            state.placed()[1],
            Structure::at(StructureKind::RangeAmplifier, worker as i32 * 4, 0)
        );
    }
}

#[test]
fn test_successors_match_sequential_enumeration() {
    let state = GridState::with_board_size(8)
        .add_building(Structure::at(StructureKind::Producer, 2, 2))
        .unwrap();

    let parallel = state.successors(StructureKind::RangeAmplifier);

    let mut sequential = Vec::new();
    for row in 0..8 {
        for col in 0..8 {
            if let Ok(next) =
                state.add_building(Structure::at(StructureKind::RangeAmplifier, row, col))
            {
                sequential.push(next);
            }
        }
    }
    assert_eq!(parallel, sequential);
    assert!(!parallel.is_empty());
}
