#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host boundary for the ant colony engine.
//!
//! [`Simulation`] bundles the world with the clock and analytics systems and
//! exposes the command surface a user interface drives. [`SimulationHandle`]
//! runs that facade on a timer thread, and [`StateMirror`] keeps a consumer-side
//! copy of the colony up to date from cheap snapshots.

mod handle;
mod mirror;
mod simulation;

pub use handle::SimulationHandle;
pub use mirror::{MergeOutcome, StateMirror};
pub use simulation::{Settings, Simulation};

use thiserror::Error;

/// Failures surfaced at the host boundary.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HostError {
    /// A tick panicked while holding the simulation lock.
    #[error("simulation lock poisoned by a panicked tick")]
    Poisoned,
    /// The timer thread is no longer running.
    #[error("simulation worker has stopped")]
    WorkerStopped,
}
