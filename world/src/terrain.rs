//! Authoritative tile grid, food piles and wall damage.

use colony_core::{config, GridDims, TileIndex, TileKind};

/// Result of taking one unit of food from a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FoodPickup {
    /// Units left on the tile.
    pub(crate) remaining: u8,
    /// Whether the tile reverted to empty ground.
    pub(crate) depleted: bool,
}

/// Dense tile grid plus the per-tile counters attached to it.
///
/// `food_tile_count` always equals the number of tiles tagged
/// [`TileKind::Food`] whose quantity is non-zero; every mutation goes through
/// methods that keep the two in step.
#[derive(Clone, Debug)]
pub(crate) struct Terrain {
    dims: GridDims,
    kinds: Vec<TileKind>,
    food: Vec<u8>,
    damage: Vec<f32>,
    food_tile_count: u32,
    nest: (u32, u32),
}

impl Terrain {
    /// Creates an all-empty grid with the nest patch stamped at its centre.
    pub(crate) fn blank(dims: GridDims) -> Self {
        let mut terrain = Self {
            dims,
            kinds: vec![TileKind::Empty; dims.len()],
            food: vec![0; dims.len()],
            damage: vec![0.0; dims.len()],
            food_tile_count: 0,
            nest: (dims.width() / 2, dims.height() / 2),
        };
        terrain.stamp_nest();
        terrain
    }

    /// Overwrites the square nest patch around the nest centre.
    pub(crate) fn stamp_nest(&mut self) {
        let half = config::NEST_SIZE / 2;
        let (column, row) = self.nest;
        for y in row.saturating_sub(half)..=row + half {
            for x in column.saturating_sub(half)..=column + half {
                if let Some(index) = self.dims.tile(x, y) {
                    self.set_kind(index, TileKind::Nest);
                }
            }
        }
    }

    pub(crate) const fn dims(&self) -> GridDims {
        self.dims
    }

    pub(crate) const fn nest(&self) -> (u32, u32) {
        self.nest
    }

    /// Continuous position of the centre of the nest patch.
    pub(crate) fn nest_center(&self) -> (f32, f32) {
        (self.nest.0 as f32 + 0.5, self.nest.1 as f32 + 0.5)
    }

    pub(crate) const fn food_tile_count(&self) -> u32 {
        self.food_tile_count
    }

    pub(crate) fn kind(&self, index: TileIndex) -> TileKind {
        self.kinds[index.get()]
    }

    pub(crate) fn food_at(&self, index: TileIndex) -> u8 {
        self.food[index.get()]
    }

    pub(crate) fn damage_at(&self, index: TileIndex) -> f32 {
        self.damage[index.get()]
    }

    pub(crate) fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    pub(crate) fn food_quantities(&self) -> &[u8] {
        &self.food
    }

    /// Retags a tile, clearing any food or damage it carried.
    pub(crate) fn set_kind(&mut self, index: TileIndex, kind: TileKind) {
        let slot = index.get();
        if self.kinds[slot] == TileKind::Food && self.food[slot] > 0 {
            self.food_tile_count -= 1;
        }
        self.kinds[slot] = kind;
        self.food[slot] = 0;
        self.damage[slot] = 0.0;
    }

    /// Turns a tile into a food pile holding `quantity` units.
    pub(crate) fn place_food(&mut self, index: TileIndex, quantity: u8) {
        if quantity == 0 {
            self.set_kind(index, TileKind::Empty);
            return;
        }
        self.set_kind(index, TileKind::Food);
        self.food[index.get()] = quantity;
        self.food_tile_count += 1;
    }

    /// Removes one unit of food, reverting the tile to empty ground when it runs out.
    pub(crate) fn take_food(&mut self, index: TileIndex) -> Option<FoodPickup> {
        let slot = index.get();
        if self.kinds[slot] != TileKind::Food || self.food[slot] == 0 {
            return None;
        }

        self.food[slot] -= 1;
        let remaining = self.food[slot];
        let depleted = remaining == 0;
        if depleted {
            self.kinds[slot] = TileKind::Empty;
            self.food_tile_count -= 1;
        }

        Some(FoodPickup {
            remaining,
            depleted,
        })
    }

    /// Adds digging damage to a wall, returning `true` when the wall breaks.
    pub(crate) fn damage_wall(&mut self, index: TileIndex, amount: f32) -> bool {
        let slot = index.get();
        if self.kinds[slot] != TileKind::Wall {
            return false;
        }

        self.damage[slot] += amount;
        if self.damage[slot] >= config::WALL_HEALTH {
            self.kinds[slot] = TileKind::Empty;
            self.damage[slot] = 0.0;
            true
        } else {
            false
        }
    }
}
