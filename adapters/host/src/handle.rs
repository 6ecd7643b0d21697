//! Timer thread that drives a shared [`Simulation`].

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use colony_core::{Caste, ColonySnapshot, ColonyState, PurchaseError, UpgradeLever};

use crate::{HostError, Simulation};

/// Owns the timer thread and the lock guarding the simulation.
///
/// Each timer firing holds the lock for the whole batch of ticks it runs, so
/// commands and reads issued through the handle never interleave with a tick.
#[derive(Debug)]
pub struct SimulationHandle {
    shared: Arc<Mutex<Simulation>>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    /// Moves `simulation` onto a timer thread firing every `tick_interval`.
    #[must_use]
    pub fn spawn(simulation: Simulation, tick_interval: Duration) -> Self {
        let shared = Arc::new(Mutex::new(simulation));
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = {
            let shared = Arc::clone(&shared);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || run_timer(&shared, &shutdown, tick_interval))
        };
        log::info!("simulation worker spawned");

        Self {
            shared,
            shutdown,
            worker: Some(worker),
        }
    }

    /// Builds the world if it does not exist yet.
    pub fn init(&self) -> Result<(), HostError> {
        self.with(Simulation::init)
    }

    /// Starts issuing ticks.
    pub fn start(&self) -> Result<(), HostError> {
        self.with(Simulation::start)
    }

    /// Stops issuing ticks.
    pub fn pause(&self) -> Result<(), HostError> {
        self.with(Simulation::pause)
    }

    /// Pauses and replaces the world.
    pub fn reset(&self) -> Result<(), HostError> {
        self.with(Simulation::reset)
    }

    /// Sets the speed multiplier; returns the clamped value.
    pub fn set_speed(&self, speed: u32) -> Result<u32, HostError> {
        self.with(|simulation| simulation.set_speed(speed))
    }

    /// Selects the caste of newly laid brood.
    pub fn set_production_caste(&self, caste: Caste) -> Result<(), HostError> {
        self.with(|simulation| simulation.set_production_caste(caste))
    }

    /// Attempts an upgrade purchase.
    pub fn purchase_upgrade(
        &self,
        lever: UpgradeLever,
    ) -> Result<Result<u32, PurchaseError>, HostError> {
        self.with(|simulation| simulation.purchase_upgrade(lever))
    }

    /// Full copy of the colony; builds the world on first read.
    pub fn state(&self) -> Result<ColonyState, HostError> {
        self.with(Simulation::state)
    }

    /// Polling view of the colony.
    pub fn snapshot(&self) -> Result<ColonySnapshot, HostError> {
        self.with(Simulation::snapshot)
    }

    /// Reports whether the timer thread is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Stops the timer thread and waits for it to exit.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("simulation worker panicked");
            }
            log::info!("simulation worker stopped");
        }
    }

    fn with<T>(&self, operation: impl FnOnce(&mut Simulation) -> T) -> Result<T, HostError> {
        if !self.is_alive() {
            return Err(HostError::WorkerStopped);
        }
        let mut simulation = self.shared.lock().map_err(|_| HostError::Poisoned)?;
        Ok(operation(&mut *simulation))
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_timer(shared: &Mutex<Simulation>, shutdown: &AtomicBool, tick_interval: Duration) {
    let mut last = Instant::now();
    while !shutdown.load(Ordering::Acquire) {
        thread::sleep(tick_interval);
        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        match shared.lock() {
            Ok(mut simulation) => {
                let _ = simulation.advance(elapsed);
            }
            Err(_) => {
                log::error!("simulation lock poisoned; stopping worker");
                break;
            }
        }
    }
}
