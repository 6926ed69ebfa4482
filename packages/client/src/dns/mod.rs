//! DNS resolution

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{
    Finished, HostResolution, Name, ResolutionEvent, ResolutionEvents, ResolutionReceiver,
    Resolve, ResolvedAddress, StaticResolver,
};

pub mod gai;
pub mod hickory;
pub mod resolve;
