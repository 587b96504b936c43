//! Connection server: accepts stream sockets and runs one strictly
//! sequential read/dispatch/write loop per connection.
//!
//! The engine correlates request N with response N positionally, so no
//! operation within a single connection's loop may run out of order or
//! concurrently with another on the same connection. Across connections
//! there is no ordering guarantee and none is required; each accepted
//! socket gets its own task.
//!
//! # Example
//!
//! ```ignore
//! use abci_server::{NoopApplication, Server};
//!
//! #[tokio::main]
//! async fn main() -> abci_server::Result<()> {
//!     let server = Server::bind(NoopApplication, &"tcp://127.0.0.1:26658".parse()?).await?;
//!     server.serve().await
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::net::SocketAddr;
#[cfg(unix)]
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::net::UnixListener;

use crate::application::Application;
use crate::codec::{FrameReader, DEFAULT_MAX_FRAME_LEN};
use crate::error::{AbciError, Result};
use crate::handler::{ProtocolHandler, ProtocolVersion, V0_31_5};

/// Listen address. The socket domain is a deployment detail, not a
/// protocol detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// TCP socket, e.g. `tcp://127.0.0.1:26658`.
    Tcp(SocketAddr),
    /// Unix domain socket, e.g. `unix:///var/run/app.sock`.
    #[cfg(unix)]
    Unix(PathBuf),
}

impl FromStr for Address {
    type Err = AbciError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(path) = s.strip_prefix("unix://") {
            #[cfg(unix)]
            {
                return Ok(Address::Unix(PathBuf::from(path)));
            }
            #[cfg(not(unix))]
            {
                let _ = path;
                return Err(AbciError::Protocol(
                    "unix sockets are not supported on this platform".to_string(),
                ));
            }
        }

        let rest = s.strip_prefix("tcp://").unwrap_or(s);
        rest.parse()
            .map(Address::Tcp)
            .map_err(|_| AbciError::Protocol(format!("invalid address: {}", s)))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Tcp(addr) => write!(f, "tcp://{}", addr),
            #[cfg(unix)]
            Address::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

/// Configuration for the connection server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum accepted frame length in bytes.
    pub max_frame_len: u64,
    /// Close a connection that stays idle between requests for this long.
    /// `None` (the default) imposes no liveness policy; the connecting
    /// peer owns liveness unless a deployment opts in here.
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            idle_timeout: None,
        }
    }
}

enum Listener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixListener, PathBuf),
}

#[cfg(unix)]
impl Drop for Listener {
    fn drop(&mut self) {
        if let Listener::Unix(_, path) = self {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Accepts connections and serves each one until it closes.
///
/// The schema snapshot is part of the server's type: [`Server::bind`] and
/// [`Server::bind_with_config`] speak the latest snapshot, and
/// [`Server::bind_version`] selects any other [`ProtocolVersion`] at
/// construction, e.g. `Server::<_, V0_22_8>::bind_version(..)`.
pub struct Server<A, V = V0_31_5> {
    app: Arc<A>,
    config: ServerConfig,
    listener: Listener,
    _version: PhantomData<fn() -> V>,
}

impl<A: Application> Server<A> {
    /// Bind to `address` with the default configuration.
    pub async fn bind(app: A, address: &Address) -> Result<Self> {
        Self::bind_with_config(app, address, ServerConfig::default()).await
    }

    /// Bind to `address` with a custom configuration.
    pub async fn bind_with_config(
        app: A,
        address: &Address,
        config: ServerConfig,
    ) -> Result<Self> {
        Self::bind_version(app, address, config).await
    }
}

impl<A: Application, V: ProtocolVersion> Server<A, V> {
    /// Bind to `address` speaking an explicit schema snapshot.
    pub async fn bind_version(app: A, address: &Address, config: ServerConfig) -> Result<Self> {
        let listener = match address {
            Address::Tcp(addr) => Listener::Tcp(TcpListener::bind(addr).await?),
            #[cfg(unix)]
            Address::Unix(path) => {
                // A previous run may have left its socket file behind.
                if path.exists() {
                    std::fs::remove_file(path)?;
                }
                Listener::Unix(UnixListener::bind(path)?, path.clone())
            }
        };

        Ok(Self {
            app: Arc::new(app),
            config,
            listener,
            _version: PhantomData,
        })
    }

    /// Address the server actually bound to. Useful with port 0.
    pub fn local_addr(&self) -> Result<Address> {
        match &self.listener {
            Listener::Tcp(listener) => Ok(Address::Tcp(listener.local_addr()?)),
            #[cfg(unix)]
            Listener::Unix(_, path) => Ok(Address::Unix(path.clone())),
        }
    }

    /// Run the accept loop, spawning one sequential task per connection.
    ///
    /// Runs until the listener fails; individual connection errors are
    /// logged and end only that connection.
    pub async fn serve(self) -> Result<()> {
        tracing::info!(address = %self.local_addr()?, "listening");

        loop {
            match &self.listener {
                Listener::Tcp(listener) => {
                    let (stream, peer) = listener.accept().await?;
                    stream.set_nodelay(true)?;
                    self.spawn_connection(stream, peer.to_string());
                }
                #[cfg(unix)]
                Listener::Unix(listener, path) => {
                    let (stream, _) = listener.accept().await?;
                    self.spawn_connection(stream, path.display().to_string());
                }
            }
        }
    }

    fn spawn_connection<S>(&self, stream: S, peer: String)
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let handler = ProtocolHandler::<A, V>::new(Arc::clone(&self.app));
        let config = self.config.clone();

        tokio::spawn(async move {
            tracing::debug!(%peer, "connection accepted");
            match serve_connection(handler, stream, &config).await {
                Ok(()) => tracing::debug!(%peer, "connection closed"),
                Err(error) => tracing::warn!(%peer, %error, "connection terminated"),
            }
        });
    }
}

/// Serve a single connection until the peer closes it or a framing or
/// transport error makes it unrecoverable.
///
/// Exposed so deployments with their own transport (in-process pipes,
/// custom accept loops) can reuse the loop. Requests are read, dispatched
/// and answered one at a time, strictly in arrival order.
pub async fn serve_connection<A, V, S>(
    handler: ProtocolHandler<A, V>,
    stream: S,
    config: &ServerConfig,
) -> Result<()>
where
    A: Application,
    V: ProtocolVersion,
    S: AsyncRead + AsyncWrite + Send + Unpin,
{
    let (read_half, write_half) = tokio::io::split(stream);
    let mut reader = FrameReader::<_, V::Request>::with_max_frame_len(
        BufReader::new(read_half),
        config.max_frame_len,
    );
    let mut writer = BufWriter::new(write_half);

    loop {
        let next = match config.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, reader.next()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::debug!(timeout = ?limit, "closing idle connection");
                    return Ok(());
                }
            },
            None => reader.next().await,
        };

        let request = match next {
            // Clean end-of-input at a frame boundary: not an error.
            None => return Ok(()),
            // Framing corruption is not resumable; the caller closes.
            Some(Err(e)) => return Err(e),
            Some(Ok(request)) => request,
        };

        let frame = handler.dispatch(request)?;
        writer.write_all(&frame).await?;
        writer.flush().await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parses_tcp_scheme() {
        let address: Address = "tcp://127.0.0.1:26658".parse().unwrap();
        assert_eq!(
            address,
            Address::Tcp("127.0.0.1:26658".parse::<SocketAddr>().unwrap())
        );
    }

    #[test]
    fn test_address_parses_bare_socket_addr() {
        let address: Address = "0.0.0.0:26658".parse().unwrap();
        assert!(matches!(address, Address::Tcp(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_address_parses_unix_scheme() {
        let address: Address = "unix:///tmp/app.sock".parse().unwrap();
        assert_eq!(address, Address::Unix(PathBuf::from("/tmp/app.sock")));
    }

    #[test]
    fn test_address_rejects_garbage() {
        assert!("not-an-address".parse::<Address>().is_err());
    }

    #[test]
    fn test_address_display_roundtrip() {
        let address: Address = "tcp://127.0.0.1:26658".parse().unwrap();
        let reparsed: Address = address.to_string().parse().unwrap();
        assert_eq!(address, reparsed);
    }

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.max_frame_len, DEFAULT_MAX_FRAME_LEN);
        assert!(config.idle_timeout.is_none());
    }
}
