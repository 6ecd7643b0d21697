#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the ant colony engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, read immutable views, and respond
//! with new command batches.

pub mod config;
mod grid;
mod state;
mod upgrades;

pub use grid::GridDims;
pub use state::{AntSnapshot, BroodSnapshot, ColonySnapshot, ColonyState, TrailFieldView};
pub use upgrades::{UpgradeDefinition, UpgradeLever, Upgrades};

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Advances the simulation by exactly one fixed step.
    Tick,
    /// Selects the caste that newly laid eggs will hatch into.
    SetProductionCaste {
        /// Caste assigned to brood laid after the change.
        caste: Caste,
    },
    /// Attempts to buy the next level of an upgrade lever with colony food.
    PurchaseUpgrade {
        /// Lever whose level should be raised by one.
        lever: UpgradeLever,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation completed a tick.
    TimeAdvanced {
        /// Tick counter after the step completed.
        tick: u64,
    },
    /// Confirms that an ant picked up one unit of food.
    FoodCollected {
        /// Ant that picked up the food.
        ant: AntId,
        /// Tile the food was taken from.
        tile: TileIndex,
        /// Units left on the tile after the pickup.
        remaining: u8,
    },
    /// Reports that a food tile ran out and reverted to empty ground.
    FoodTileDepleted {
        /// Tile that ran out of food.
        tile: TileIndex,
    },
    /// Confirms that an ant dropped its food into the nest stockpile.
    FoodDelivered {
        /// Ant that delivered the food.
        ant: AntId,
    },
    /// Announces that an ant began excavating a wall tile.
    DiggingStarted {
        /// Ant that started digging.
        ant: AntId,
        /// Wall tile being excavated.
        tile: TileIndex,
    },
    /// Reports that accumulated damage broke through a wall tile.
    WallBreached {
        /// Ant whose blow finished the wall.
        ant: AntId,
        /// Tile that became empty ground.
        tile: TileIndex,
    },
    /// Confirms that the queen laid a new egg.
    EggLaid {
        /// Identifier assigned to the egg.
        brood: BroodId,
        /// Caste the egg will hatch into.
        caste: Caste,
    },
    /// Reports that a brood item advanced to its next stage.
    BroodMatured {
        /// Brood item that changed stage.
        brood: BroodId,
        /// Stage the item entered.
        stage: BroodStage,
    },
    /// Announces that a new ant joined the colony.
    AntHatched {
        /// Identifier assigned to the new ant.
        ant: AntId,
        /// Caste of the new ant.
        caste: Caste,
    },
    /// Confirms that the production caste changed.
    ProductionCasteChanged {
        /// Caste that eggs will now hatch into.
        caste: Caste,
    },
    /// Confirms that an upgrade purchase succeeded.
    UpgradePurchased {
        /// Lever that gained a level.
        lever: UpgradeLever,
        /// Level reached after the purchase.
        level: u32,
        /// Food deducted from the stockpile.
        cost: u32,
    },
    /// Reports that an upgrade purchase was declined without changing state.
    UpgradeRejected {
        /// Lever targeted by the purchase.
        lever: UpgradeLever,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Publishes a fresh colony statistics report.
    AnalyticsUpdated {
        /// Report computed by the analytics system.
        report: StatsReport,
    },
}

/// Reasons an upgrade purchase may be declined by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseError {
    /// The lever already sits at its maximum level.
    MaxLevel,
    /// The colony stockpile cannot cover the cost of the next level.
    InsufficientFood,
}

/// Static classification of a single world tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Open ground that ants may cross.
    #[default]
    Empty,
    /// Solid rock that blocks movement until dug out.
    Wall,
    /// Part of the colony nest where food is delivered.
    Nest,
    /// Ground holding a pile of food.
    Food,
}

/// Immutable role assigned to an ant when it is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Caste {
    /// Forager that carries food and digs through walls.
    #[default]
    Worker,
    /// Fast explorer with long sensors that never carries food.
    Scout,
    /// Slow, strong ant that digs harder.
    Soldier,
}

impl Caste {
    /// Every caste in a stable order.
    pub const ALL: [Caste; 3] = [Caste::Worker, Caste::Scout, Caste::Soldier];

    /// Reports whether the caste is able to excavate walls.
    #[must_use]
    pub const fn can_dig(self) -> bool {
        matches!(self, Self::Worker | Self::Soldier)
    }

    /// Reports whether the caste picks up food it walks over.
    #[must_use]
    pub const fn can_forage(self) -> bool {
        !matches!(self, Self::Scout)
    }
}

/// Behavioural state of an ant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntState {
    /// Wandering and following food trails.
    #[default]
    Searching,
    /// Carrying food back along home trails.
    Returning,
    /// Standing still while excavating a wall tile.
    Digging,
}

/// Lifecycle phase of a brood item that has not hatched yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BroodStage {
    /// Freshly laid; matures without food.
    #[default]
    Egg,
    /// Growing; only matures while the colony can feed it.
    Larva,
    /// Metamorphosing; hatches into an ant when complete.
    Pupa,
}

/// How the colony converts surplus food into new ants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthPolicy {
    /// The queen lays eggs that pass through the brood lifecycle.
    #[default]
    Brood,
    /// Surplus food spawns a grown ant at the nest immediately.
    DirectSpawn,
}

/// Unique identifier assigned to an ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AntId(u32);

impl AntId {
    /// Creates a new ant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a brood item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BroodId(u32);

impl BroodId {
    /// Creates a new brood identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Row-major linear index of a tile within the world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex(usize);

impl TileIndex {
    /// Wraps a raw linear index.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the raw linear index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Aggregated colony counters published by the analytics system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsReport {
    /// Tick at which the report was computed.
    pub tick: u64,
    /// Food units picked up from the map since the world was created.
    pub food_collected: u64,
    /// Food units dropped into the nest since the world was created.
    pub food_delivered: u64,
    /// Deliveries observed during the trailing analytics window.
    pub recent_deliveries: u64,
    /// Food tiles exhausted since the world was created.
    pub tiles_depleted: u64,
    /// Wall tiles broken through since the world was created.
    pub walls_breached: u64,
    /// Eggs laid by the queen.
    pub eggs_laid: u64,
    /// Ants hatched per caste, ordered as [`Caste::ALL`].
    pub hatched: [u64; 3],
    /// Upgrade levels bought.
    pub upgrades_purchased: u64,
}
