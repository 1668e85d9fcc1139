//! Pooled Redis client.
//!
//! For more information, see the [`Client`](self::Client) type.

use std::num::NonZeroUsize;
use std::ops;
use std::sync::atomic::{self, AtomicU64};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_channel::{Receiver, Sender};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{OwnedSemaphorePermit as Permit, Semaphore};

use crate::connection::{self, Connection as RawConnection};
use crate::connector::{Connector, LookupError, TcpConnector};
use crate::resp::{Command, ServerError, TypeError, Value};
use crate::serializer;

/// A handle to a bounded pool of connections to one Redis server.
///
/// Cloning is cheap and every clone drives the same pool. Each command checks
/// a connection out of the pool and returns it when done; idle connections
/// are verified with a counted `PING` before reuse and replaced when broken.
#[derive(Debug)]
pub struct Client<T: Connector = TcpConnector> {
    shared: Arc<ClientShared<T>>,
}

/// The pool itself, without the reference-counting handle.
#[derive(Debug)]
pub struct ClientShared<T: Connector> {
    connector: T,
    init: Init,
    acquire_timeout: Option<Duration>,
    ping_counter: AtomicU64,
    server_hello: RwLock<Arc<Value>>,
    sender: Sender<Entry<RawConnection<T::Stream>>>,
    receiver: Receiver<Entry<RawConnection<T::Stream>>>,
    semaphore: Arc<Semaphore>,
}

#[derive(Debug)]
struct Init {
    auth: Option<(String, String)>,
    setname: Option<String>,
    select: Option<u32>,
}

/// A connection checked out of the pool.
///
/// Dropping it returns the underlying connection to the pool.
#[derive(Debug)]
pub struct Connection<T> {
    entry: Option<Entry<RawConnection<T>>>,
    sender: Sender<Entry<RawConnection<T>>>,
}

#[derive(Debug)]
struct Entry<T> {
    conn: T,
    _permit: Permit,
}

/// Configuration for a [`Client`](Client).
#[derive(Debug)]
pub struct Builder {
    connection_limit: usize,
    acquire_timeout: Option<Duration>,
    init: Init,
}

/// Any error this crate reports.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] pub Box<ErrorKind>);

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Connection or protocol error.
    #[error("connection error")]
    Connection(#[from] connection::Error),
    /// A serializer rejected a key or value.
    #[error("serializer error")]
    Serializer(#[from] serializer::Error),
    /// The server replied with an error.
    #[error(transparent)]
    Server(#[from] ServerError),
    /// The reply did not have the expected shape.
    #[error("unexpected reply")]
    Reply(#[from] TypeError),
    /// Liveness check on a pooled connection failed.
    #[error("ping-pong failed")]
    PingPongFailed,
    /// DNS lookup failed.
    #[error("DNS lookup failed")]
    Lookup(#[from] LookupError),
    /// No pooled connection became available within the configured timeout.
    #[error("timed out acquiring a connection")]
    AcquireTimeout,
    /// An argument was rejected before any command was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl Client<TcpConnector> {
    /// Connects to a TCP address with the default configuration.
    ///
    /// Use [`Client::builder()`](Self::builder) when authentication, a
    /// client name, a database index, or an acquire timeout is needed.
    ///
    /// # Panic
    ///
    /// It panics if `connection_limit` is zero.
    pub async fn new(connection_limit: usize, addr: &str) -> Result<Self, Error> {
        Self::builder(NonZeroUsize::new(connection_limit).unwrap())
            .bind(addr)
            .await
    }

    /// Starts configuring a client.
    ///
    /// The builder is not limited to the `TcpConnector`; see
    /// [`Builder::build`](Builder::build).
    pub fn builder(connection_limit: NonZeroUsize) -> Builder {
        Builder::new(connection_limit)
    }
}

impl<T: Connector> Client<T> {
    /// The server's reply to the most recent `HELLO` handshake.
    pub fn server_hello(&self) -> Arc<Value> {
        self.shared.server_hello()
    }

    /// Sends a single command on a pooled connection.
    ///
    /// Server-reported errors become [`ErrorKind::Server`](ErrorKind::Server).
    pub async fn raw_command(&self, command: &Command) -> Result<Value, Error> {
        self.shared.raw_command(command).await
    }

    /// Checks a connection out of the pool.
    pub async fn connection(&self) -> Result<Connection<T::Stream>, Error> {
        self.shared.connection().await
    }
}

impl<T: Connector> Clone for Client<T> {
    fn clone(&self) -> Self {
        Client {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Builder {
    pub fn new(connection_limit: NonZeroUsize) -> Builder {
        Builder {
            connection_limit: connection_limit.get(),
            acquire_timeout: None,
            init: Init {
                auth: None,
                setname: None,
                select: None,
            },
        }
    }

    /// Builds the client against a TCP address, resolving it first.
    pub async fn bind(self, addr: &str) -> Result<Client<TcpConnector>, Error> {
        self.build(
            TcpConnector::lookup(addr)
                .await
                .map_err(ErrorKind::Lookup)?,
        )
        .await
    }

    /// Builds the client over any connector.
    pub async fn build<T: Connector>(self, connector: T) -> Result<Client<T>, Error> {
        Ok(self.build_shared(connector).await?.into())
    }

    pub async fn build_shared<T: Connector>(self, connector: T) -> Result<ClientShared<T>, Error> {
        let (conn, hello) = make_connection(&connector, &self.init).await?;
        let semaphore = Arc::new(Semaphore::new(self.connection_limit));
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("freshly created semaphore has permits");
        let (sender, receiver) = async_channel::bounded(self.connection_limit);

        sender
            .try_send(Entry {
                conn,
                _permit: permit,
            })
            .expect("freshly created channel has capacity");

        Ok(ClientShared {
            connector,
            init: self.init,
            acquire_timeout: self.acquire_timeout,
            ping_counter: AtomicU64::new(0),
            server_hello: RwLock::new(hello),
            sender,
            receiver,
            semaphore,
        })
    }

    /// Authenticates the handshake with the given credentials.
    pub fn auth(mut self, username: &str, password: &str) -> Self {
        self.init.auth = Some((username.into(), password.into()));
        self
    }

    /// Sets the connection name reported to the server.
    pub fn setname(mut self, clientname: &str) -> Self {
        self.init.setname = Some(clientname.into());
        self
    }

    /// Selects a logical database on every connection.
    pub fn select(mut self, db: u32) -> Self {
        self.init.select = Some(db);
        self
    }

    /// Bounds how long a caller may wait for a pooled connection.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }
}

async fn make_connection<T: Connector>(
    connector: &T,
    init: &Init,
) -> Result<(RawConnection<T::Stream>, Arc<Value>), Error> {
    let conn = connector.connect().await.map_err(connection::Error::Io)?;
    let (conn, hello) = RawConnection::with_args(
        conn,
        init.auth
            .as_ref()
            .map(|(username, password)| (&username[..], &password[..])),
        init.setname.as_deref(),
        init.select,
    )
    .await?;
    let hello = Arc::new(hello);

    Ok((conn, hello))
}

impl<T: Connector> ClientShared<T> {
    /// The server's reply to the most recent `HELLO` handshake.
    pub fn server_hello(&self) -> Arc<Value> {
        Arc::clone(&self.server_hello.read().unwrap())
    }

    /// Sends a single command on a pooled connection.
    pub async fn raw_command(&self, command: &Command) -> Result<Value, Error> {
        let mut conn = self.connection().await?;
        conn.raw_command(command).await
    }

    /// Checks a connection out of the pool, reusing an idle one when
    /// possible and dialing a new one otherwise.
    pub async fn connection(&self) -> Result<Connection<T::Stream>, Error> {
        match self.acquire_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.acquire()).await {
                Ok(res) => res,
                Err(_) => Err(ErrorKind::AcquireTimeout.into()),
            },
            None => self.acquire().await,
        }
    }

    async fn acquire(&self) -> Result<Connection<T::Stream>, Error> {
        async fn wrap<T: Connector>(
            client: &ClientShared<T>,
            mut entry: Entry<RawConnection<T::Stream>>,
        ) -> Result<Connection<T::Stream>, Error> {
            let count = client.ping_counter.fetch_add(1, atomic::Ordering::Relaxed);
            let mut ping = Command::new("PING");
            ping.arg_uint(count);
            let pong = entry.conn.command(&ping).await?.into_integer();

            if pong != Ok(count as i64) {
                tracing::debug!("pooled connection failed its liveness check");
                return Err(ErrorKind::PingPongFailed.into());
            }

            Ok(Connection {
                entry: Some(entry),
                sender: client.sender.clone(),
            })
        }
        async fn connect<T: Connector>(
            client: &ClientShared<T>,
            permit: Permit,
        ) -> Result<Connection<T::Stream>, Error> {
            let (conn, hello) = make_connection(&client.connector, &client.init).await?;
            *client.server_hello.write().unwrap() = hello;
            tracing::debug!("added a connection to the pool");

            Ok(Connection {
                sender: client.sender.clone(),
                entry: Some(Entry {
                    conn,
                    _permit: permit,
                }),
            })
        }

        loop {
            let sem = self.semaphore.clone();

            tokio::select! {
                biased;
                entry = self.receiver.recv() => match wrap(self, entry.unwrap()).await {
                    Ok(conn) => return Ok(conn),
                    // the idle connection went bad; dropping it frees its
                    // permit, so the next round can dial a replacement
                    Err(_) => continue,
                },
                permit = sem.acquire_owned() => return connect(self, permit.unwrap()).await,
            }
        }
    }
}

impl<T: AsyncRead + AsyncWrite + Unpin> Connection<T> {
    /// Sends a single command on this connection.
    ///
    /// Server-reported errors become [`ErrorKind::Server`](ErrorKind::Server).
    pub async fn raw_command(&mut self, command: &Command) -> Result<Value, Error> {
        match self.inner_mut().command(command).await? {
            Value::Error(err) => Err(ErrorKind::Server(err).into()),
            reply => Ok(reply),
        }
    }

    pub fn inner(&self) -> &RawConnection<T> {
        &self.entry.as_ref().unwrap().conn
    }

    pub fn inner_mut(&mut self) -> &mut RawConnection<T> {
        &mut self.entry.as_mut().unwrap().conn
    }

    pub fn into_inner(mut self) -> RawConnection<T> {
        self.entry.take().unwrap().conn
    }
}

impl<T> ops::Drop for Connection<T> {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            // fails only when the pool itself is being torn down
            let _ = self.sender.try_send(entry);
        }
    }
}

impl<T: Connector> From<ClientShared<T>> for Client<T> {
    fn from(shared: ClientShared<T>) -> Self {
        Client {
            shared: Arc::new(shared),
        }
    }
}

impl From<connection::Error> for Error {
    fn from(err: connection::Error) -> Self {
        ErrorKind::from(err).into()
    }
}

impl From<serializer::Error> for Error {
    fn from(err: serializer::Error) -> Self {
        ErrorKind::from(err).into()
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        ErrorKind::from(err).into()
    }
}

impl From<ServerError> for Error {
    fn from(err: ServerError) -> Self {
        ErrorKind::from(err).into()
    }
}

impl From<ErrorKind> for Error {
    fn from(err: ErrorKind) -> Self {
        Box::new(err).into()
    }
}

#[cfg(test)]
mod tests {
    use futures_core::future::BoxFuture;
    use tokio::io::{self, AsyncReadExt, AsyncWriteExt, DuplexStream};

    use super::*;

    /// Connector backed by an in-process scripted server, one per stream.
    #[derive(Debug)]
    struct Loopback;

    impl Connector for Loopback {
        type Stream = DuplexStream;

        fn connect(&self) -> BoxFuture<'_, io::Result<Self::Stream>> {
            Box::pin(async {
                let (local, remote) = io::duplex(1024);
                tokio::spawn(serve(remote));
                Ok(local)
            })
        }
    }

    async fn serve(mut stream: DuplexStream) {
        let mut buf = vec![0u8; 1024];
        loop {
            let read = match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(read) => read,
            };
            let request = &buf[..read];
            let reply: Vec<u8> = if contains(request, b"HELLO") {
                b"%1\r\n$5\r\nproto\r\n:3\r\n".to_vec()
            } else if contains(request, b"PING") {
                // counted ping, echo the argument back as an integer
                let mut reply = b":".to_vec();
                reply.extend_from_slice(last_token(request));
                reply.extend_from_slice(b"\r\n");
                reply
            } else if contains(request, b"FAIL") {
                b"-ERR scripted failure\r\n".to_vec()
            } else if contains(request, b"GET") {
                b"$5\r\nhello\r\n".to_vec()
            } else {
                b"+OK\r\n".to_vec()
            };
            if stream.write_all(&reply).await.is_err() {
                return;
            }
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn last_token(request: &[u8]) -> &[u8] {
        request
            .split(|&byte| byte == b'\r' || byte == b'\n')
            .filter(|token| !token.is_empty())
            .last()
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn reuses_the_idle_connection() {
        let client = Builder::new(NonZeroUsize::new(1).unwrap())
            .build(Loopback)
            .await
            .unwrap();

        // both commands go through the same pooled connection, each checkout
        // passing its counted liveness ping first
        for _ in 0..2 {
            let reply = client.raw_command(&Command::new("GET")).await.unwrap();
            assert_eq!(Value::Blob(bytes::Bytes::from_static(b"hello")), reply);
        }
    }

    #[tokio::test]
    async fn server_errors_are_reported_as_such() {
        let client = Builder::new(NonZeroUsize::new(1).unwrap())
            .build(Loopback)
            .await
            .unwrap();

        let err = client.raw_command(&Command::new("FAIL")).await.unwrap_err();
        match *err.0 {
            ErrorKind::Server(ref err) => assert_eq!("ERR", err.code()),
            ref other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn acquire_times_out_when_the_pool_is_exhausted() {
        let client = Builder::new(NonZeroUsize::new(1).unwrap())
            .acquire_timeout(Duration::from_millis(10))
            .build(Loopback)
            .await
            .unwrap();

        let held = client.connection().await.unwrap();
        let err = client.raw_command(&Command::new("GET")).await.unwrap_err();
        assert!(matches!(*err.0, ErrorKind::AcquireTimeout));

        drop(held);
        client.raw_command(&Command::new("GET")).await.unwrap();
    }
}
