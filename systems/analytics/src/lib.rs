#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that folds world events into colony statistics.

use std::collections::VecDeque;

use colony_core::{config, Caste, Event, StatsReport};

/// Configuration parameters required to construct the analytics system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    report_every: u64,
    delivery_window: u64,
}

impl Config {
    /// Publishes a report every `report_every` ticks and counts recent
    /// deliveries over the trailing `delivery_window` ticks.
    #[must_use]
    pub const fn new(report_every: u64, delivery_window: u64) -> Self {
        Self {
            report_every,
            delivery_window,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let second = config::TICKS_PER_SECOND as u64;
        Self::new(second, second * 10)
    }
}

/// Pure analytics system that accumulates counters and emits published reports.
#[derive(Debug)]
pub struct ColonyAnalytics {
    config: Config,
    totals: StatsReport,
    deliveries: VecDeque<u64>,
    last_report: Option<StatsReport>,
}

impl ColonyAnalytics {
    /// Creates a new analytics system with zeroed counters.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            totals: StatsReport::default(),
            deliveries: VecDeque::new(),
            last_report: None,
        }
    }

    /// Returns the last analytics report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&StatsReport> {
        self.last_report.as_ref()
    }

    /// Counters accumulated so far, including events since the last report.
    #[must_use]
    pub fn current(&self) -> StatsReport {
        let mut report = self.totals;
        report.recent_deliveries = self.deliveries.len() as u64;
        report
    }

    /// Forgets every counter, typically after the world was replaced.
    pub fn reset(&mut self) {
        self.totals = StatsReport::default();
        self.deliveries.clear();
        self.last_report = None;
    }

    /// Consumes world events and publishes a report on every reporting tick.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Event>) {
        for event in events {
            match event {
                Event::FoodCollected { .. } => self.totals.food_collected += 1,
                Event::FoodDelivered { .. } => {
                    self.totals.food_delivered += 1;
                    self.deliveries.push_back(self.totals.tick + 1);
                }
                Event::FoodTileDepleted { .. } => self.totals.tiles_depleted += 1,
                Event::WallBreached { .. } => self.totals.walls_breached += 1,
                Event::EggLaid { .. } => self.totals.eggs_laid += 1,
                Event::AntHatched { caste, .. } => self.totals.hatched[caste_slot(*caste)] += 1,
                Event::UpgradePurchased { .. } => self.totals.upgrades_purchased += 1,
                Event::TimeAdvanced { tick } => self.advance_to(*tick, out),
                _ => {}
            }
        }
    }

    fn advance_to(&mut self, tick: u64, out: &mut Vec<Event>) {
        self.totals.tick = tick;
        let horizon = tick.saturating_sub(self.config.delivery_window);
        while self
            .deliveries
            .front()
            .is_some_and(|delivered| *delivered <= horizon)
        {
            let _ = self.deliveries.pop_front();
        }

        if self.config.report_every == 0 || tick % self.config.report_every != 0 {
            return;
        }

        let report = self.current();
        self.last_report = Some(report);
        out.push(Event::AnalyticsUpdated { report });
    }
}

const fn caste_slot(caste: Caste) -> usize {
    match caste {
        Caste::Worker => 0,
        Caste::Scout => 1,
        Caste::Soldier => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caste_slots_follow_declaration_order() {
        for (slot, caste) in Caste::ALL.into_iter().enumerate() {
            assert_eq!(caste_slot(caste), slot);
        }
    }

    #[test]
    fn zero_interval_never_publishes() {
        let mut analytics = ColonyAnalytics::new(Config::new(0, 10));
        let mut out = Vec::new();
        analytics.handle(&[Event::TimeAdvanced { tick: 1 }], &mut out);
        assert!(out.is_empty());
        assert_eq!(analytics.current().tick, 1);
    }
}
