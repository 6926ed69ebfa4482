//! Protocol builders
//!
//! The value a connect operation hands back is whatever the protocol
//! builder makes of the winning stream.

use std::io;

use tokio::net::TcpStream;

use crate::connect::types::CandidateEndpoint;

/// Turns an established stream into the caller's protocol.
pub trait BuildProtocol: Send + Sync + 'static {
    type Protocol: Send + 'static;

    /// # Errors
    ///
    /// An error counts as a failed attempt for this candidate.
    fn build_protocol(
        &self,
        stream: TcpStream,
        endpoint: &CandidateEndpoint,
    ) -> io::Result<Self::Protocol>;
}

/// Builder returning the stream untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawStream;

impl BuildProtocol for RawStream {
    type Protocol = TcpStream;

    fn build_protocol(&self, stream: TcpStream, _endpoint: &CandidateEndpoint) -> io::Result<TcpStream> {
        Ok(stream)
    }
}

impl<F, P> BuildProtocol for F
where
    F: Fn(TcpStream) -> P + Send + Sync + 'static,
    P: Send + 'static,
{
    type Protocol = P;

    fn build_protocol(&self, stream: TcpStream, _endpoint: &CandidateEndpoint) -> io::Result<P> {
        Ok(self(stream))
    }
}
