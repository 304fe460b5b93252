#![deny(warnings)]

//! Period jobs for the simulation: the market cycle (events then prices),
//! the weekly and monthly real-estate cycles, and the manual event trigger.
//!
//! Every job follows the same unit-of-work shape: evaluate the idempotency
//! guard before touching anything, compute the full outcome against a
//! borrowed [`sim_core::WorldState`], then apply it in one pass. Nothing is
//! partially committed: a failure surfaces before application and leaves the
//! world untouched, so the scheduler can simply retry on its next tick.

use thiserror::Error;

mod estate_jobs;
mod market_jobs;
mod report;

pub use estate_jobs::{run_monthly_cycle, run_weekly_cycle};
pub use market_jobs::{advance_stock_prices, run_market_cycle, trigger_market_event};
pub use report::JobReport;

/// Errors a period job can surface to the scheduler.
#[derive(Debug, Error, PartialEq)]
pub enum JobError {
    /// Invalid event-engine input, e.g. a probability override above 100.
    #[error(transparent)]
    Event(#[from] sim_market::EventError),
}
