//! Upgrade levers and the formulas that turn levels into tuning values.

use serde::{Deserialize, Serialize};

use crate::PurchaseError;

/// Named upgrade that can be levelled with colony food.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeLever {
    /// Base movement speed of every ant.
    AntSpeed,
    /// Distance at which ants sample trails ahead of them.
    SensorRange,
    /// Trail intensity deposited per tick.
    PheromoneDrop,
    /// Extra speed and sensor reach for scouts.
    ScoutSpeed,
    /// Digging power of soldiers; multiplies their wall damage on top of
    /// [`UpgradeLever::DiggingSpeed`].
    SoldierStrength,
    /// Wall damage dealt per digging tick.
    DiggingSpeed,
}

impl UpgradeLever {
    /// Every lever in display order.
    pub const ALL: [UpgradeLever; 6] = [
        UpgradeLever::AntSpeed,
        UpgradeLever::SensorRange,
        UpgradeLever::PheromoneDrop,
        UpgradeLever::ScoutSpeed,
        UpgradeLever::SoldierStrength,
        UpgradeLever::DiggingSpeed,
    ];

    /// Static pricing and scaling parameters for the lever.
    #[must_use]
    pub const fn definition(self) -> UpgradeDefinition {
        match self {
            Self::AntSpeed => UpgradeDefinition::new("Worker Speed", 10.0, 1.5, 10, 0.5, 0.1),
            Self::SensorRange => UpgradeDefinition::new("Sensor Range", 15.0, 1.6, 5, 10.0, 3.0),
            Self::PheromoneDrop => {
                UpgradeDefinition::new("Pheromone Strength", 20.0, 1.8, 5, 0.1, 0.05)
            }
            Self::ScoutSpeed => UpgradeDefinition::new("Scout Speed", 25.0, 1.7, 5, 1.0, 0.1),
            Self::SoldierStrength => {
                UpgradeDefinition::new("Soldier Strength", 30.0, 1.8, 5, 1.0, 0.2)
            }
            Self::DiggingSpeed => UpgradeDefinition::new("Digging Speed", 25.0, 1.6, 5, 1.0, 0.25),
        }
    }
}

/// Pricing and scaling parameters of a single lever.
///
/// Effective values grow linearly with level and costs grow geometrically:
/// `cost(level) = floor(base_cost * cost_multiplier^level)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeDefinition {
    name: &'static str,
    base_cost: f64,
    cost_multiplier: f64,
    max_level: u32,
    base_value: f32,
    value_per_level: f32,
}

impl UpgradeDefinition {
    const fn new(
        name: &'static str,
        base_cost: f64,
        cost_multiplier: f64,
        max_level: u32,
        base_value: f32,
        value_per_level: f32,
    ) -> Self {
        Self {
            name,
            base_cost,
            cost_multiplier,
            max_level,
            base_value,
            value_per_level,
        }
    }

    /// Human readable lever name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Highest reachable level.
    #[must_use]
    pub const fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Food required to advance from `level` to `level + 1`.
    #[must_use]
    pub fn cost(&self, level: u32) -> u32 {
        let exponent = i32::try_from(level).unwrap_or(i32::MAX);
        (self.base_cost * self.cost_multiplier.powi(exponent)).floor() as u32
    }

    /// Effective tuning value at `level`, clamped to the lever's range.
    #[must_use]
    pub fn value(&self, level: u32) -> f32 {
        self.base_value + level.min(self.max_level) as f32 * self.value_per_level
    }
}

/// Current level of every upgrade lever.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Upgrades {
    ant_speed: u32,
    sensor_range: u32,
    pheromone_drop: u32,
    scout_speed: u32,
    soldier_strength: u32,
    digging_speed: u32,
}

impl Upgrades {
    /// Level currently reached by `lever`.
    #[must_use]
    pub const fn level(&self, lever: UpgradeLever) -> u32 {
        match lever {
            UpgradeLever::AntSpeed => self.ant_speed,
            UpgradeLever::SensorRange => self.sensor_range,
            UpgradeLever::PheromoneDrop => self.pheromone_drop,
            UpgradeLever::ScoutSpeed => self.scout_speed,
            UpgradeLever::SoldierStrength => self.soldier_strength,
            UpgradeLever::DiggingSpeed => self.digging_speed,
        }
    }

    /// Effective tuning value of `lever` at its current level.
    #[must_use]
    pub fn value(&self, lever: UpgradeLever) -> f32 {
        lever.definition().value(self.level(lever))
    }

    /// Price of the next level of `lever`, or `None` once it is maxed out.
    #[must_use]
    pub fn next_cost(&self, lever: UpgradeLever) -> Option<u32> {
        let definition = lever.definition();
        let level = self.level(lever);
        (level < definition.max_level()).then(|| definition.cost(level))
    }

    /// Price of the next level of `lever` if `stockpile` can pay for it.
    pub fn purchase_cost(
        &self,
        lever: UpgradeLever,
        stockpile: f32,
    ) -> Result<u32, PurchaseError> {
        match self.next_cost(lever) {
            None => Err(PurchaseError::MaxLevel),
            Some(cost) if stockpile < cost as f32 => Err(PurchaseError::InsufficientFood),
            Some(cost) => Ok(cost),
        }
    }

    /// Raises `lever` by one level, saturating at its maximum.
    pub fn raise(&mut self, lever: UpgradeLever) -> u32 {
        let max_level = lever.definition().max_level();
        let slot = match lever {
            UpgradeLever::AntSpeed => &mut self.ant_speed,
            UpgradeLever::SensorRange => &mut self.sensor_range,
            UpgradeLever::PheromoneDrop => &mut self.pheromone_drop,
            UpgradeLever::ScoutSpeed => &mut self.scout_speed,
            UpgradeLever::SoldierStrength => &mut self.soldier_strength,
            UpgradeLever::DiggingSpeed => &mut self.digging_speed,
        };
        *slot = (*slot + 1).min(max_level);
        *slot
    }
}
