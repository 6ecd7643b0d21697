//! Consumer-side copy of the colony kept current from snapshots.

use colony_core::{ColonySnapshot, ColonyState, TileKind};

/// Result of merging a snapshot into a [`StateMirror`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The snapshot was merged with the retained food quantities.
    Merged,
    /// The snapshot cannot be merged; a full [`ColonyState`] read is required.
    NeedsFullRead,
}

/// Rebuilds full colony states from cheap snapshots.
///
/// Snapshots omit the per-tile food quantities, so the mirror keeps the array
/// from the last full read and zeroes entries whose tile is no longer food.
/// A snapshot at tick zero means the world was replaced and the retained array
/// is meaningless until the next full read.
#[derive(Clone, Debug)]
pub struct StateMirror {
    current: Option<ColonyState>,
    needs_full_read: bool,
}

impl Default for StateMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMirror {
    /// Creates a mirror that waits for its first full read.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: None,
            needs_full_read: true,
        }
    }

    /// Reports whether the next read must be a full state.
    #[must_use]
    pub fn needs_full_read(&self) -> bool {
        self.needs_full_read || self.current.is_none()
    }

    /// Latest merged colony state.
    #[must_use]
    pub fn current(&self) -> Option<&ColonyState> {
        self.current.as_ref()
    }

    /// Replaces the mirror with a full state read.
    pub fn apply_state(&mut self, state: ColonyState) {
        self.current = Some(state);
        self.needs_full_read = false;
    }

    /// Merges a snapshot into the retained state.
    pub fn apply_snapshot(&mut self, snapshot: ColonySnapshot) -> MergeOutcome {
        let Some(previous) = self.current.as_ref() else {
            self.needs_full_read = true;
            return MergeOutcome::NeedsFullRead;
        };
        if snapshot.tick == 0 || snapshot.dims != previous.dims {
            self.needs_full_read = true;
            return MergeOutcome::NeedsFullRead;
        }

        let nest = previous.nest;
        let mut food_quantity = previous.food_quantity.clone();
        for (quantity, kind) in food_quantity.iter_mut().zip(&snapshot.tiles) {
            if *kind != TileKind::Food {
                *quantity = 0;
            }
        }

        self.current = Some(ColonyState {
            tick: snapshot.tick,
            dims: snapshot.dims,
            ants: snapshot.ants,
            brood: snapshot.brood,
            home_trail: snapshot.home_trail,
            food_trail: snapshot.food_trail,
            tiles: snapshot.tiles,
            food_quantity,
            food_tile_count: snapshot.food_tile_count,
            colony_food: snapshot.colony_food,
            nest,
            upgrades: snapshot.upgrades,
            production_caste: snapshot.production_caste,
        });
        MergeOutcome::Merged
    }
}
