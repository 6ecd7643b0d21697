//! Read-only views and transfer types describing colony state.

use serde::{Deserialize, Serialize};

use crate::{
    AntId, AntState, BroodId, BroodStage, Caste, GridDims, TileIndex, TileKind, Upgrades,
};

/// Immutable representation of a single ant used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AntSnapshot {
    /// Unique identifier assigned to the ant.
    pub id: AntId,
    /// Immutable role of the ant.
    pub caste: Caste,
    /// Horizontal position in world units.
    pub x: f32,
    /// Vertical position in world units.
    pub y: f32,
    /// Heading in radians.
    pub heading: f32,
    /// Behavioural state.
    pub state: AntState,
    /// Whether the ant carries a unit of food.
    pub has_food: bool,
    /// Ticks left before the ant re-reads the trails.
    pub wander_timer: u32,
    /// Wall tile being excavated while digging.
    pub dig_target: Option<TileIndex>,
}

/// Immutable representation of a single brood item used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BroodSnapshot {
    /// Unique identifier assigned to the brood item.
    pub id: BroodId,
    /// Current lifecycle stage.
    pub stage: BroodStage,
    /// Caste the item will hatch into.
    pub caste: Caste,
    /// Progress through the current stage in `[0, 1)`.
    pub progress: f32,
    /// Horizontal position in world units.
    pub x: f32,
    /// Vertical position in world units.
    pub y: f32,
}

/// Complete copy of the colony aggregate handed across the host boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColonyState {
    /// Number of completed ticks.
    pub tick: u64,
    /// Dimensions shared by the tile grid and both trail fields.
    pub dims: GridDims,
    /// Every living ant ordered by identifier.
    pub ants: Vec<AntSnapshot>,
    /// Every unhatched brood item ordered by identifier.
    pub brood: Vec<BroodSnapshot>,
    /// Home-trail intensities, row-major.
    pub home_trail: Vec<f32>,
    /// Food-trail intensities, row-major.
    pub food_trail: Vec<f32>,
    /// Tile tags, row-major.
    pub tiles: Vec<TileKind>,
    /// Remaining food units per tile, row-major.
    pub food_quantity: Vec<u8>,
    /// Number of food tiles that still hold food.
    pub food_tile_count: u32,
    /// Colony food stockpile.
    pub colony_food: f32,
    /// Column and row of the nest centre.
    pub nest: (u32, u32),
    /// Current upgrade levels.
    pub upgrades: Upgrades,
    /// Caste assigned to newly laid brood.
    pub production_caste: Caste,
}

impl ColonyState {
    /// Drops the bulk food-quantity array, producing the polling view.
    #[must_use]
    pub fn into_snapshot(self) -> ColonySnapshot {
        ColonySnapshot {
            tick: self.tick,
            dims: self.dims,
            ants: self.ants,
            brood: self.brood,
            home_trail: self.home_trail,
            food_trail: self.food_trail,
            tiles: self.tiles,
            food_tile_count: self.food_tile_count,
            colony_food: self.colony_food,
            upgrades: self.upgrades,
            production_caste: self.production_caste,
        }
    }
}

/// Reduced colony view intended for high-frequency polling.
///
/// The snapshot omits the per-tile food quantities. Consumers that need them
/// keep the array from an earlier [`ColonyState`] read; a snapshot reporting
/// tick zero means the world was rebuilt and a fresh full read is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColonySnapshot {
    /// Number of completed ticks.
    pub tick: u64,
    /// Dimensions shared by the tile grid and both trail fields.
    pub dims: GridDims,
    /// Every living ant ordered by identifier.
    pub ants: Vec<AntSnapshot>,
    /// Every unhatched brood item ordered by identifier.
    pub brood: Vec<BroodSnapshot>,
    /// Home-trail intensities, row-major.
    pub home_trail: Vec<f32>,
    /// Food-trail intensities, row-major.
    pub food_trail: Vec<f32>,
    /// Tile tags, row-major.
    pub tiles: Vec<TileKind>,
    /// Number of food tiles that still hold food.
    pub food_tile_count: u32,
    /// Colony food stockpile.
    pub colony_food: f32,
    /// Current upgrade levels.
    pub upgrades: Upgrades,
    /// Caste assigned to newly laid brood.
    pub production_caste: Caste,
}

/// Borrowed read-only view of one trail field.
#[derive(Clone, Copy, Debug)]
pub struct TrailFieldView<'a> {
    values: &'a [f32],
    dims: GridDims,
}

impl<'a> TrailFieldView<'a> {
    /// Captures a view backed by the provided row-major slice.
    #[must_use]
    pub fn new(values: &'a [f32], dims: GridDims) -> Self {
        debug_assert_eq!(values.len(), dims.len());
        Self { values, dims }
    }

    /// Intensity at the tile containing `(x, y)`, or zero outside the grid.
    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.dims
            .checked_index(x, y)
            .map_or(0.0, |index| self.values[index.get()])
    }

    /// Sum of every intensity in the field.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Raw row-major intensities.
    #[must_use]
    pub fn values(&self) -> &'a [f32] {
        self.values
    }

    /// Dimensions of the field.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }
}
