//! Connection factories.
//!
//! The transport under a [`Client`](crate::Client) is supplied from outside:
//! anything that can repeatedly produce byte streams to a Redis server
//! qualifies. TCP and Unix domain socket factories are bundled; custom ones
//! (TLS wrappers, in-memory transports for tests) only need to implement
//! [`Connector`](Connector).

use std::fmt::Debug;
use std::marker::Unpin;
use std::net::SocketAddr;
#[cfg(unix)]
use std::path::{Path, PathBuf};

use futures_core::future::BoxFuture;
use tokio::io::{self, AsyncRead, AsyncWrite};
#[cfg(unix)]
use tokio::net::UnixStream;
use tokio::net::{lookup_host, TcpStream};

/// Produces connections to one Redis server.
///
/// A `Connector` holds enough information to reach a certain server and can
/// produce any number of independent streams to it. The
/// [`Client`](crate::Client) calls it whenever the pool needs to grow.
pub trait Connector: Send + Sync {
    /// Connection stream this connector produces.
    type Stream: AsyncRead + AsyncWrite + Debug + Unpin + Send;

    /// Opens a fresh stream to the server.
    fn connect(&self) -> BoxFuture<'_, io::Result<Self::Stream>>;
}

/// TCP socket connector.
#[derive(Debug)]
pub struct TcpConnector {
    addr: SocketAddr,
}

/// Unix domain socket connector.
#[cfg(unix)]
#[derive(Debug)]
pub struct UnixConnector {
    path: PathBuf,
}

/// DNS lookup error.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// IO error during DNS lookup.
    #[error("IO error during DNS lookup")]
    Io(#[from] std::io::Error),
    /// DNS record is not found.
    #[error("DNS record not found")]
    NotFound,
}

impl TcpConnector {
    /// Constructs a `TcpConnector` from an IP address and port.
    pub fn new(addr: SocketAddr) -> Self {
        TcpConnector { addr }
    }

    /// Constructs a `TcpConnector` from a string representation of a socket
    /// address like `example.com:6379`, `localhost:6379`, or
    /// `192.168.0.7:16379`.
    pub async fn lookup(addr: &str) -> Result<Self, LookupError> {
        let addr = lookup_host(addr)
            .await?
            .next()
            .ok_or(LookupError::NotFound)?;
        tracing::debug!(%addr, "resolved server address");
        Ok(TcpConnector::new(addr))
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self) -> BoxFuture<'_, io::Result<Self::Stream>> {
        Box::pin(async move {
            let stream = TcpStream::connect(self.addr).await?;
            tracing::debug!(addr = %self.addr, "opened TCP connection");
            Ok(stream)
        })
    }
}

#[cfg(unix)]
impl UnixConnector {
    /// Constructs a `UnixConnector`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        UnixConnector {
            path: path.as_ref().to_owned(),
        }
    }
}

#[cfg(unix)]
impl Connector for UnixConnector {
    type Stream = UnixStream;

    fn connect(&self) -> BoxFuture<'_, io::Result<Self::Stream>> {
        Box::pin(async move {
            let stream = UnixStream::connect(&self.path).await?;
            tracing::debug!(path = %self.path.display(), "opened Unix socket connection");
            Ok(stream)
        })
    }
}
