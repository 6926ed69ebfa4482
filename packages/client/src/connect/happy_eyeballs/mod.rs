//! Staggered connection racing
//!
//! Candidates produced by resolution are started no closer together than
//! the attempt delay and raced against each other. The first established
//! connection wins; everything else still running is cancelled.

mod connecting;
mod operation;
pub mod race;
pub mod scheduler;


pub use connecting::{CancelHandle, Connecting};
pub(crate) use operation::{OperationContext, spawn};
pub use race::{AttemptId, AttemptOutcome, ExhaustionConditions, RaceCoordinator};
pub use scheduler::AttemptScheduler;
