pub mod classification;
pub mod constructors;
pub mod types;

pub use types::{AttemptFailure, ConnectError, Result};
