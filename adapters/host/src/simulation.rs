//! Single-threaded facade combining the world with its clock and analytics.

use std::time::Duration;

use colony_core::{
    config, Caste, ColonySnapshot, ColonyState, Command, Event, GrowthPolicy, PurchaseError,
    StatsReport, UpgradeLever,
};
use colony_system_analytics::{self as analytics, ColonyAnalytics};
use colony_system_clock::{self as clock, Clock};
use colony_world::{self as world, query, World};

/// Undrained analytics reports kept before the oldest are discarded.
const MAX_PENDING_REPORTS: usize = 64;

/// Parameters fixed for the lifetime of a [`Simulation`].
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// Seed reused by every world the simulation creates; `None` draws a new
    /// seed from entropy on each init or reset.
    pub seed: Option<u64>,
    /// How surplus food turns into new ants.
    pub growth: GrowthPolicy,
    /// Real time between two timer firings.
    pub tick_interval: Duration,
    /// Reporting cadence of the analytics system.
    pub analytics: analytics::Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            growth: GrowthPolicy::default(),
            tick_interval: config::TICK_INTERVAL,
            analytics: analytics::Config::default(),
        }
    }
}

/// Host-side command surface over one colony world.
///
/// Every command creates the world on first use, so callers never observe a
/// half-built simulation.
#[derive(Debug)]
pub struct Simulation {
    settings: Settings,
    world: Option<World>,
    clock: Clock,
    analytics: ColonyAnalytics,
    commands: Vec<Command>,
    events: Vec<Event>,
    published: Vec<Event>,
}

impl Simulation {
    /// Creates an uninitialised simulation.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            world: None,
            clock: Clock::new(clock::Config::new(settings.tick_interval)),
            analytics: ColonyAnalytics::new(settings.analytics),
            commands: Vec::new(),
            events: Vec::new(),
            published: Vec::new(),
        }
    }

    /// Builds the world if it does not exist yet.
    pub fn init(&mut self) {
        let _ = self.world_mut();
    }

    /// Reports whether a world has been created.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// Starts issuing ticks from elapsed host time.
    pub fn start(&mut self) {
        self.init();
        self.clock.start();
        log::info!("simulation started at speed {}", self.clock.speed());
    }

    /// Stops issuing ticks.
    pub fn pause(&mut self) {
        self.clock.pause();
        log::info!("simulation paused");
    }

    /// Reports whether elapsed host time currently produces ticks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Pauses and replaces the world with a freshly generated one.
    pub fn reset(&mut self) {
        self.clock.pause();
        self.analytics.reset();
        self.world = Some(fresh_world(self.settings));
        log::info!("simulation reset");
    }

    /// Sets the ticks issued per timer firing; returns the clamped value.
    pub fn set_speed(&mut self, speed: u32) -> u32 {
        self.init();
        let applied = self.clock.set_speed(speed);
        log::debug!("speed set to {applied}");
        applied
    }

    /// Ticks issued per timer firing.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.clock.speed()
    }

    /// Selects the caste of newly laid brood.
    pub fn set_production_caste(&mut self, caste: Caste) {
        self.submit(Command::SetProductionCaste { caste });
    }

    /// Attempts to buy the next level of `lever`, returning the level reached.
    pub fn purchase_upgrade(&mut self, lever: UpgradeLever) -> Result<u32, PurchaseError> {
        let world = self.world_mut();
        let outcome = query::upgrades(world).purchase_cost(lever, query::colony_food(world));
        self.submit(Command::PurchaseUpgrade { lever });
        let level = query::upgrades(self.world_mut()).level(lever);
        outcome.map(|_cost| level)
    }

    /// Full copy of the colony, including per-tile food quantities.
    pub fn state(&mut self) -> ColonyState {
        query::state(self.world_mut())
    }

    /// Polling view of the colony without per-tile food quantities.
    pub fn snapshot(&mut self) -> ColonySnapshot {
        query::snapshot(self.world_mut())
    }

    /// Borrows the world, if one exists.
    #[must_use]
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Most recent report published by the analytics system.
    #[must_use]
    pub fn last_report(&self) -> Option<&StatsReport> {
        self.analytics.last_report()
    }

    /// Feeds elapsed host time to the clock and runs the ticks it issues.
    ///
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        self.commands.clear();
        let _ = self.clock.advance(elapsed, &mut self.commands);
        let batch = std::mem::take(&mut self.commands);
        let ticks = batch.len() as u64;
        for command in &batch {
            self.submit(*command);
        }
        self.commands = batch;
        ticks
    }

    /// Runs `ticks` ticks immediately, regardless of the clock state.
    pub fn step(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.submit(Command::Tick);
        }
    }

    /// Removes and returns the analytics reports published since the last call.
    pub fn drain_reports(&mut self) -> Vec<StatsReport> {
        self.published
            .drain(..)
            .filter_map(|event| match event {
                Event::AnalyticsUpdated { report } => Some(report),
                _ => None,
            })
            .collect()
    }

    fn submit(&mut self, command: Command) {
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        world::apply(self.world_mut(), command, &mut events);
        self.analytics.handle(&events, &mut self.published);
        if self.published.len() > MAX_PENDING_REPORTS {
            let excess = self.published.len() - MAX_PENDING_REPORTS;
            let _ = self.published.drain(..excess);
        }
        self.events = events;
    }

    fn world_mut(&mut self) -> &mut World {
        let settings = self.settings;
        self.world.get_or_insert_with(|| {
            log::info!("simulation initialised");
            fresh_world(settings)
        })
    }
}

fn fresh_world(settings: Settings) -> World {
    let world = World::new(settings.seed).with_growth_policy(settings.growth);
    log::debug!("generated world with seed {}", query::seed(&world));
    world
}
