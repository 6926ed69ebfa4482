//! TCP socket configuration utilities
//!
//! Applies nodelay and keepalive settings to established streams.

use std::io;

use socket2::{SockRef, TcpKeepalive};
use tokio::net::TcpStream;

use crate::config::TcpConfig;

/// Configure an established TCP stream.
///
/// # Errors
///
/// Returns the OS error when a socket option cannot be set.
pub fn configure_tcp_socket(stream: &TcpStream, config: &TcpConfig) -> io::Result<()> {
    if config.nodelay {
        stream.set_nodelay(true)?;
    }

    if let Some(idle) = config.keepalive {
        let keepalive = TcpKeepalive::new().with_time(idle);
        SockRef::from(stream).set_tcp_keepalive(&keepalive)?;
    }

    Ok(())
}
