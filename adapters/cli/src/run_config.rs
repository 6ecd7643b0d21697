//! Run file parsing and merging with command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use colony_core::{Caste, GrowthPolicy, UpgradeLever};
use serde::Deserialize;

const DEFAULT_TICKS: u64 = 3_000;
const DEFAULT_REPORT_EVERY: u64 = 300;

/// Caste names accepted in run files and on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum CasteChoice {
    Worker,
    Scout,
    Soldier,
}

impl From<CasteChoice> for Caste {
    fn from(choice: CasteChoice) -> Self {
        match choice {
            CasteChoice::Worker => Caste::Worker,
            CasteChoice::Scout => Caste::Scout,
            CasteChoice::Soldier => Caste::Soldier,
        }
    }
}

/// Growth policies accepted in run files and on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum GrowthChoice {
    Brood,
    DirectSpawn,
}

impl From<GrowthChoice> for GrowthPolicy {
    fn from(choice: GrowthChoice) -> Self {
        match choice {
            GrowthChoice::Brood => GrowthPolicy::Brood,
            GrowthChoice::DirectSpawn => GrowthPolicy::DirectSpawn,
        }
    }
}

/// Upgrade lever names accepted in run files and on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum LeverChoice {
    AntSpeed,
    SensorRange,
    PheromoneDrop,
    ScoutSpeed,
    SoldierStrength,
    DiggingSpeed,
}

impl From<LeverChoice> for UpgradeLever {
    fn from(choice: LeverChoice) -> Self {
        match choice {
            LeverChoice::AntSpeed => UpgradeLever::AntSpeed,
            LeverChoice::SensorRange => UpgradeLever::SensorRange,
            LeverChoice::PheromoneDrop => UpgradeLever::PheromoneDrop,
            LeverChoice::ScoutSpeed => UpgradeLever::ScoutSpeed,
            LeverChoice::SoldierStrength => UpgradeLever::SoldierStrength,
            LeverChoice::DiggingSpeed => UpgradeLever::DiggingSpeed,
        }
    }
}

/// Optional run parameters as written in a TOML run file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) ticks: Option<u64>,
    pub(crate) speed: Option<u32>,
    pub(crate) production_caste: Option<CasteChoice>,
    pub(crate) growth: Option<GrowthChoice>,
    pub(crate) report_every: Option<u64>,
    pub(crate) auto_upgrade: Vec<LeverChoice>,
}

impl RunConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid run file at {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse run file toml contents")
    }

    /// Layers `overrides` on top of `self`; every value set in `overrides` wins.
    #[must_use]
    pub(crate) fn overridden_by(self, overrides: RunConfig) -> Self {
        Self {
            seed: overrides.seed.or(self.seed),
            ticks: overrides.ticks.or(self.ticks),
            speed: overrides.speed.or(self.speed),
            production_caste: overrides.production_caste.or(self.production_caste),
            growth: overrides.growth.or(self.growth),
            report_every: overrides.report_every.or(self.report_every),
            auto_upgrade: if overrides.auto_upgrade.is_empty() {
                self.auto_upgrade
            } else {
                overrides.auto_upgrade
            },
        }
    }

    /// Fills every missing value with its default.
    #[must_use]
    pub(crate) fn resolve(self) -> RunPlan {
        RunPlan {
            seed: self.seed,
            ticks: self.ticks.unwrap_or(DEFAULT_TICKS),
            speed: self.speed.unwrap_or(1),
            production_caste: self.production_caste.map_or(Caste::Worker, Caste::from),
            growth: self.growth.map_or(GrowthPolicy::Brood, GrowthPolicy::from),
            report_every: self.report_every.unwrap_or(DEFAULT_REPORT_EVERY),
            auto_upgrade: self
                .auto_upgrade
                .into_iter()
                .map(UpgradeLever::from)
                .collect(),
        }
    }
}

/// Fully resolved parameters of a headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunPlan {
    pub(crate) seed: Option<u64>,
    pub(crate) ticks: u64,
    pub(crate) speed: u32,
    pub(crate) production_caste: Caste,
    pub(crate) growth: GrowthPolicy,
    pub(crate) report_every: u64,
    pub(crate) auto_upgrade: Vec<UpgradeLever>,
}
