//! Telemetry for hostname connect operations

pub mod connect_stats;


pub use connect_stats::{ConnectStats, ConnectStatsSnapshot};
