//! Connection establishment
//!
//! Candidate endpoints and the connector abstraction, the tokio TCP
//! connector, and the racing engine that turns a stream of resolved
//! addresses into one connection.

pub mod happy_eyeballs;
pub mod tcp;
pub mod types;

pub use happy_eyeballs::{CancelHandle, Connecting};
pub use tcp::{BuildProtocol, RawStream, TcpConnector, configure_tcp_socket};
pub use types::{CandidateEndpoint, Connect, map_address};
