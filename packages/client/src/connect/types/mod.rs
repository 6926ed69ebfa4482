//! Connection types
//!
//! Candidate endpoints and the connector abstraction used for every
//! individual connection attempt.

pub mod candidate;
pub mod connector;


pub use candidate::{CandidateEndpoint, map_address};
pub use connector::Connect;
