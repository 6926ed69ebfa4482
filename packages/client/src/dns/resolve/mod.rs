//! Hostname resolution interface
//!
//! Resolvers report to a [`ResolutionReceiver`]: a start notification
//! carrying a cancellation handle, every address as it becomes available, and
//! a final completion. A lookup error is simply a completion without
//! addresses.

pub mod overrides;
pub mod receiver;
pub mod traits;
pub mod types;
pub mod utilities;


pub use overrides::StaticResolver;
pub use receiver::{ResolutionEvent, ResolutionEvents, ResolutionReceiver};
pub use traits::{Finished, HostResolution, Resolve};
pub use types::{Name, ResolvedAddress};
pub use utilities::{is_ip_address, normalize_hostname, validate_hostname};
