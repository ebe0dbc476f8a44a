//! `bizworx-scheduler` — automatic rescheduling of jobs left unfinished.
//!
//! # Overview
//!
//! Field-service jobs sometimes never happen on their booked day (a crew ran
//! late, a customer was out). Once a day the [`engine::SchedulerEngine`]
//! sweeps every business, finds yesterday's jobs that are still `Scheduled`,
//! and relocates each one to the earliest open slot within business hours
//! over the next seven days.
//!
//! # Placement rules
//!
//! | Rule        | Behaviour                                              |
//! |-------------|--------------------------------------------------------|
//! | Horizon     | Today through today + 6 (7 calendar days)              |
//! | Candidates  | Whole hours, 08:00 up to 17:00 starts                  |
//! | Conflict    | Half-open overlap against that day's booked jobs       |
//! | Cutoff      | Slot must end by the 18:00 clock hour, same day        |
//! | Order       | Day-ascending, then hour-ascending; first fit wins     |
//!
//! A job with no conflict-free slot in the whole horizon is left untouched
//! and retried on the next sweep; the per-sweep [`types::SweepStats`] makes
//! that condition visible to operators.

pub mod engine;
pub mod error;
pub mod slot;
pub mod sweep;
pub mod types;

pub use engine::SchedulerEngine;
pub use error::{Result, SchedulerError};
pub use slot::find_next_available_slot;
pub use sweep::{run_sweep, sweep_at};
pub use types::{SweepStats, TimeSlot};
