//! TCP connector
//!
//! Tokio socket based [`Connect`](crate::connect::Connect) implementation
//! with bind address support, per-attempt timeouts, socket tuning and
//! pluggable protocol builders.

pub mod connection;
pub mod protocol;
pub mod socket_config;

pub use connection::TcpConnector;
pub use protocol::{BuildProtocol, RawStream};
pub use socket_config::configure_tcp_socket;
