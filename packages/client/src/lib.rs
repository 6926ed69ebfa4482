//! # hostdial client
//!
//! Hostname connection engine: resolve a name, race staggered TCP attempts
//! across every resolved address of both families, and hand back the first
//! connection that succeeds.
//!
//! - **Staggered starts**: attempts begin no closer together than the
//!   attempt delay, in the order addresses were resolved
//! - **Streaming resolution**: attempts start while resolution is still
//!   running
//! - **Single result**: one connection, one aggregate failure, or one
//!   cancellation, delivered exactly once
//! - **Clean cancellation**: losing attempts, queued candidates and the
//!   lookup are all cancelled before the result is delivered
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use hostdial_client::{ConnectParams, HostnameEndpoint};
//!
//! # async fn demo() -> hostdial_client::Result<()> {
//! let endpoint = HostnameEndpoint::tcp()
//!     .with_params(ConnectParams::default().with_attempt_delay(Duration::from_millis(250)));
//!
//! let connecting = endpoint.connect("example.com", 80);
//! let cancel = connecting.cancel_handle();
//! # drop(cancel);
//! let stream = connecting.await?;
//! # drop(stream);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod connect;
pub mod dns;
pub mod endpoint;
pub mod error;
pub mod telemetry;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;
