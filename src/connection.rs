//! A single protocol-speaking connection over any byte stream.
//!
//! [`Connection`](Connection) pairs a transport with the codec and performs
//! the RESP3 handshake. It has no pooling and no typed command knowledge;
//! both live above it.

use std::marker::Unpin;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::resp::{decode, Command, Decoder, ServerError, Value};

#[derive(Debug)]
pub struct Connection<T> {
    transport: T,
    decoder: Decoder,
    write_buf: BytesMut,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("protocol error")]
    Protocol(#[from] decode::Error),
    #[error("server rejected the handshake")]
    Handshake(#[source] ServerError),
    #[error("server closed the connection")]
    Closed,
}

impl<T: AsyncRead + AsyncWrite + Unpin> Connection<T> {
    /// Performs the `HELLO 3` handshake over the transport and returns the
    /// connection together with the server's hello reply.
    pub async fn new(transport: T) -> Result<(Self, Value), Error> {
        Self::with_args(transport, None, None, None).await
    }

    /// Handshake with optional authentication, client name, and database
    /// selection.
    pub async fn with_args(
        transport: T,
        auth: Option<(&str, &str)>,
        setname: Option<&str>,
        select: Option<u32>,
    ) -> Result<(Self, Value), Error> {
        let mut conn = Connection {
            transport,
            decoder: Decoder::new(),
            write_buf: BytesMut::new(),
        };

        let mut hello = Command::new("HELLO");
        hello.arg_static("3");
        if let Some((username, password)) = auth {
            hello.arg_static("AUTH").arg_str(username).arg_str(password);
        }
        if let Some(clientname) = setname {
            hello.arg_static("SETNAME").arg_str(clientname);
        }
        let hello = accept(conn.command(&hello).await?)?;

        if let Some(db) = select {
            let mut select = Command::new("SELECT");
            select.arg_uint(db.into());
            accept(conn.command(&select).await?)?;
        }

        tracing::debug!("connection established");
        Ok((conn, hello))
    }

    /// Encodes and writes one command without waiting for its reply.
    pub async fn send(&mut self, command: &Command) -> Result<(), Error> {
        self.write_buf.clear();
        command.encode(&mut self.write_buf);
        self.transport.write_all(&self.write_buf).await?;
        Ok(())
    }

    /// Reads the next reply value.
    ///
    /// Out-of-band push frames are discarded; nothing in this crate
    /// subscribes to them.
    pub async fn receive(&mut self) -> Result<Value, Error> {
        loop {
            match self.decoder.decode()? {
                Some(Value::Push(_)) => continue,
                Some(value) => return Ok(value),
                None => {}
            }
            let read = self.transport.read_buf(self.decoder.buffer()).await?;
            if read == 0 {
                return Err(Error::Closed);
            }
        }
    }

    /// Sends one command and reads its reply.
    ///
    /// Server-reported errors come back as [`Value::Error`](Value::Error),
    /// not as `Err`; the typed layers above decide what they mean.
    pub async fn command(&mut self, command: &Command) -> Result<Value, Error> {
        self.send(command).await?;
        self.receive().await
    }
}

fn accept(reply: Value) -> Result<Value, Error> {
    match reply {
        Value::Error(err) => Err(Error::Handshake(err)),
        reply => Ok(reply),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handshake_then_command() {
        let (local, mut remote) = tokio::io::duplex(1024);

        let server = tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let read = remote.read(&mut buf).await.unwrap();
            assert_eq!(b"*2\r\n$5\r\nHELLO\r\n$1\r\n3\r\n".as_ref(), &buf[..read]);
            remote
                .write_all(b"%1\r\n$5\r\nproto\r\n:3\r\n")
                .await
                .unwrap();

            let read = remote.read(&mut buf).await.unwrap();
            assert_eq!(b"*1\r\n$4\r\nPING\r\n".as_ref(), &buf[..read]);
            remote.write_all(b"+PONG\r\n").await.unwrap();
        });

        let (mut conn, hello) = Connection::new(local).await.unwrap();
        match hello {
            Value::Map(map) => {
                assert_eq!(Some(&Value::Integer(3)), map.get(&bstr::BString::from("proto")))
            }
            other => panic!("unexpected hello: {:?}", other),
        }

        let pong = conn.command(&Command::new("PING")).await.unwrap();
        assert_eq!(Value::Simple("PONG".into()), pong);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn rejected_handshake() {
        let (local, mut remote) = tokio::io::duplex(1024);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let _ = remote.read(&mut buf).await.unwrap();
            remote
                .write_all(b"-NOAUTH Authentication required.\r\n")
                .await
                .unwrap();
        });

        match Connection::new(local).await {
            Err(Error::Handshake(err)) => assert_eq!("NOAUTH", err.code()),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn closed_mid_reply() {
        let (local, mut remote) = tokio::io::duplex(1024);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let _ = remote.read(&mut buf).await.unwrap();
            remote.write_all(b"%1\r\n$5\r\npro").await.unwrap();
        });

        match Connection::new(local).await {
            Err(Error::Closed) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
