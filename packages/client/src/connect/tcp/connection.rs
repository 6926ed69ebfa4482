//! TCP connection establishment
//!
//! One attempt: open a socket of the candidate's family, bind it when asked,
//! connect under the candidate's timeout, tune the socket, then build the
//! protocol on top of the stream.

use std::fmt;
use std::io;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::net::{TcpSocket, TcpStream};

use super::protocol::{BuildProtocol, RawStream};
use super::socket_config::configure_tcp_socket;
use crate::config::{AddressFamily, TcpConfig};
use crate::connect::types::{CandidateEndpoint, Connect};

/// Production connector over tokio TCP sockets.
pub struct TcpConnector<B = RawStream> {
    builder: Arc<B>,
    tcp: TcpConfig,
}

impl TcpConnector<RawStream> {
    /// Connector yielding the raw [`TcpStream`].
    pub fn new() -> Self {
        Self::with_protocol(RawStream)
    }
}

impl Default for TcpConnector<RawStream> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BuildProtocol> TcpConnector<B> {
    /// Connector building `builder`'s protocol on every established stream.
    pub fn with_protocol(builder: B) -> Self {
        Self {
            builder: Arc::new(builder),
            tcp: TcpConfig::default(),
        }
    }

    #[must_use]
    pub fn tcp_config(mut self, tcp: TcpConfig) -> Self {
        self.tcp = tcp;
        self
    }
}

impl<B> Clone for TcpConnector<B> {
    fn clone(&self) -> Self {
        Self {
            builder: Arc::clone(&self.builder),
            tcp: self.tcp.clone(),
        }
    }
}

impl<B> fmt::Debug for TcpConnector<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpConnector")
            .field("tcp", &self.tcp)
            .finish_non_exhaustive()
    }
}

impl<B: BuildProtocol> Connect for TcpConnector<B> {
    type Connection = B::Protocol;

    fn connect(&self, endpoint: &CandidateEndpoint) -> BoxFuture<'static, io::Result<B::Protocol>> {
        let endpoint = endpoint.clone();
        let builder = Arc::clone(&self.builder);
        let tcp = self.tcp.clone();

        async move {
            let stream = match tokio::time::timeout(endpoint.timeout, open_stream(&endpoint)).await {
                Ok(stream) => stream?,
                Err(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!(
                            "connect to {} timed out after {:?}",
                            endpoint.addr, endpoint.timeout
                        ),
                    ));
                }
            };
            configure_tcp_socket(&stream, &tcp)?;
            tracing::trace!(remote = %endpoint.addr, "tcp stream established");
            builder.build_protocol(stream, &endpoint)
        }
        .boxed()
    }
}

async fn open_stream(endpoint: &CandidateEndpoint) -> io::Result<TcpStream> {
    let socket = match endpoint.family() {
        AddressFamily::Inet => TcpSocket::new_v4()?,
        AddressFamily::Inet6 => TcpSocket::new_v6()?,
    };
    if let Some(bind_address) = endpoint.bind_address {
        socket.bind(bind_address)?;
    }
    socket.connect(endpoint.addr).await
}
