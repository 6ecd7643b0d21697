//! Build-time tuning constants shared by the engine and its hosts.

use std::{f32::consts::FRAC_PI_4, time::Duration};

use crate::GridDims;

/// Number of tile columns in the world.
pub const WORLD_WIDTH: u32 = 128;
/// Number of tile rows in the world.
pub const WORLD_HEIGHT: u32 = 128;
/// Dimensions of the world grid.
pub const WORLD_DIMS: GridDims = GridDims::new(WORLD_WIDTH, WORLD_HEIGHT);

/// Timer firings per second when the simulation runs in real time.
pub const TICKS_PER_SECOND: u32 = 30;
/// Interval between two timer firings.
pub const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);
/// Largest accepted ticks-per-firing multiplier.
pub const MAX_SPEED: u32 = 20;

/// Workers placed at the nest when a world is created.
pub const INITIAL_ANT_COUNT: usize = 200;

/// Side length of the square nest patch; always odd so it has a centre tile.
pub const NEST_SIZE: u32 = 3;
/// Radius around the nest centre that wall generation keeps clear.
pub const NEST_CLEAR_RADIUS: f32 = 12.0;
/// Food units placed on every generated food tile.
pub const INITIAL_FOOD_PER_TILE: u8 = 20;

/// Stockpile required before the queen lays an egg (or an ant spawns directly).
pub const LAY_THRESHOLD: f32 = 10.0;
/// Largest distance from the nest centre at which eggs are placed.
pub const EGG_SCATTER_RADIUS: f32 = 2.0;
/// Ticks an egg needs before it becomes a larva.
pub const EGG_DURATION: u32 = 60;
/// Ticks of feeding a larva needs before it becomes a pupa.
pub const LARVA_DURATION: u32 = 90;
/// Ticks a pupa needs before it hatches.
pub const PUPA_DURATION: u32 = 75;
/// Food a larva eats on every tick it grows.
pub const LARVA_FOOD_PER_TICK: f32 = 0.01;

/// Wall damage dealt per digging tick before upgrades.
pub const DIGGING_BASE_DAMAGE: f32 = 2.0;
/// Damage a wall tile absorbs before it breaks.
pub const WALL_HEALTH: f32 = 100.0;
/// Chance that a digging-capable ant starts digging when it walks into a wall.
pub const DIG_CHANCE: f64 = 0.2;

/// Full width of the per-tick random heading jitter, in radians.
pub const WANDER_STRENGTH: f32 = 0.2;
/// Exclusive upper bound of the random wander timer reset.
pub const WANDER_TIMER_SPAN: u32 = 5;
/// Angle between the forward sensor and each side sensor.
pub const SENSOR_SPREAD: f32 = FRAC_PI_4;
/// Share of the home trail subtracted from food-trail samples while searching.
pub const HOME_TRAIL_AVOIDANCE: f32 = 0.1;

/// Speed factor applied to scouts on top of the scout-speed upgrade.
pub const SCOUT_SPEED_FACTOR: f32 = 1.5;
/// Speed factor applied to soldiers.
pub const SOLDIER_SPEED_FACTOR: f32 = 0.7;

/// Trail values at or below this threshold evaporate to exactly zero.
pub const TRAIL_EPSILON: f32 = 0.01;
/// Blend factor used when diffusing both trail fields.
pub const DIFFUSION_RATE: f32 = 0.1;
/// Linear decay applied to the home trail on every tick.
pub const HOME_EVAPORATION_RATE: f32 = 0.002;
/// Linear decay applied to the food trail on every tick.
pub const FOOD_EVAPORATION_RATE: f32 = 0.005;
