//! Incremental RESP3 frame decoder.
//!
//! <https://github.com/antirez/RESP3/blob/74adea588783e463c7e84793b325b088fe6edd1c/spec.md>

use bytes::{Buf, Bytes, BytesMut};
use indexmap::IndexMap;
use memchr::memmem::Finder;
use once_cell::sync::Lazy;

use super::value::{ServerError, Value};

/// Decoder accepts bytes from the transport and yields a complete [`Value`]
/// when one is available.
///
/// ```
/// # use typered::resp::decode::{Decoder, Error};
/// # use typered::resp::Value;
/// # use bytes::BufMut;
/// let mut decoder = Decoder::new();
/// decoder.buffer().put_slice(b"$12\r\nHello w");
/// assert_eq!(None, decoder.decode()?);
/// decoder.buffer().put_slice(b"orld!\r\n:42\r");
/// assert_eq!(
///     Some(Value::Blob(bytes::Bytes::from_static(b"Hello world!"))),
///     decoder.decode()?,
/// );
/// decoder.buffer().put_slice(b"\n");
/// assert_eq!(Some(Value::Integer(42)), decoder.decode()?);
/// assert_eq!(None, decoder.decode()?);
/// # Ok::<_, Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Decoder {
    buf: BytesMut,
}

/// Errors that occur when parsing the RESP3 protocol.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid type prefix byte.
    #[error("invalid type prefix byte {0:#04x}")]
    InvalidPrefix(u8),
    /// Expected `\r\n` bytes, but found something else.
    #[error("expected \\r\\n bytes, but found something else")]
    ExpectedCrlf,
    /// Failed to parse an integer literal.
    #[error("failed to parse integer")]
    ParseIntFailed,
    /// Failed to parse a double literal.
    #[error("failed to parse decimal number")]
    ParseFloatFailed,
    /// Failed to parse a boolean literal.
    #[error("failed to parse boolean")]
    ParseBoolFailed,
    /// Streamed strings and aggregates are not produced by request-reply
    /// commands, and this decoder does not accept them.
    #[error("streamed types are not supported")]
    StreamedType,
    /// A map key was not a string.
    #[error("map key is not a string")]
    InvalidMapKey,
}

enum Status {
    /// More bytes are needed before a value can be produced.
    Incomplete,
    /// The buffer cannot be a valid RESP3 frame.
    Bad(Error),
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        Status::Bad(err)
    }
}

const CRLF: &[u8] = b"\r\n";

const ARRAY: u8 = b'*';
const BLOB: u8 = b'$';
const BLOB_STREAM: u8 = b';';
const SIMPLE: u8 = b'+';
const ERROR: u8 = b'-';
const NUMBER: u8 = b':';
const NULL: u8 = b'_';
const DOUBLE: u8 = b',';
const BOOLEAN: u8 = b'#';
const BLOB_ERROR: u8 = b'!';
const VERBATIM: u8 = b'=';
const MAP: u8 = b'%';
const SET: u8 = b'~';
const ATTRIBUTE: u8 = b'|';
const PUSH: u8 = b'>';
const BIG_NUMBER: u8 = b'(';
const STREAM_MARK: u8 = b'?';
const STREAM_END: u8 = b'.';

impl Decoder {
    /// Constructs a new `Decoder`.
    pub fn new() -> Self {
        Decoder {
            buf: BytesMut::new(),
        }
    }

    /// Get the buffer to feed incoming bytes.
    pub fn buffer(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Takes a complete value off the front of the buffer.
    ///
    /// Returns `Ok(None)` if more bytes are needed; the buffer is left
    /// untouched in that case.
    pub fn decode(&mut self) -> Result<Option<Value>, Error> {
        let mut rest = &self.buf[..];
        match parse_value(&mut rest) {
            Ok(value) => {
                let used = self.buf.len() - rest.len();
                self.buf.advance(used);
                Ok(Some(value))
            }
            Err(Status::Incomplete) => Ok(None),
            Err(Status::Bad(err)) => Err(err),
        }
    }

    /// Drop all buffered bytes and any partially received frame.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

fn parse_value(buf: &mut &[u8]) -> Result<Value, Status> {
    if buf.is_empty() {
        return Err(Status::Incomplete);
    }
    let prefix = buf.get_u8();

    Ok(match prefix {
        SIMPLE => Value::Simple(line(buf)?.into()),
        ERROR => Value::Error(ServerError::parse(line(buf)?)),
        NUMBER => Value::Integer(parse_int(line(buf)?)?),
        DOUBLE => {
            let msg = line(buf)?;
            let num: f64 = std::str::from_utf8(msg)
                .ok()
                .and_then(|msg| msg.parse().ok())
                .ok_or(Error::ParseFloatFailed)?;
            Value::Double(num)
        }
        BOOLEAN => Value::Boolean(match line(buf)? {
            b"t" => true,
            b"f" => false,
            _ => return Err(Error::ParseBoolFailed.into()),
        }),
        NULL => {
            if !line(buf)?.is_empty() {
                return Err(Error::ExpectedCrlf.into());
            }
            Value::Null
        }
        BLOB => match blob(buf)? {
            Some(msg) => Value::Blob(msg),
            None => Value::Null,
        },
        VERBATIM => {
            let msg = blob(buf)?.ok_or(Error::ParseIntFailed)?;
            // strip the `txt:`/`mkd:` format prefix
            let body = if msg.len() >= 4 { msg.slice(4..) } else { msg };
            Value::Verbatim(body)
        }
        BLOB_ERROR => {
            let msg = blob(buf)?.ok_or(Error::ParseIntFailed)?;
            Value::Error(ServerError::parse(&msg))
        }
        BIG_NUMBER => {
            let msg = line(buf)?;
            let digits = msg.strip_prefix(b"-").unwrap_or(msg);
            if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
                return Err(Error::ParseIntFailed.into());
            }
            Value::BigNumber(msg.into())
        }
        ARRAY => match length(buf)? {
            Some(len) => Value::Array(items(buf, len)?),
            None => Value::Null,
        },
        SET => match length(buf)? {
            Some(len) => Value::Set(items(buf, len)?),
            None => Value::Null,
        },
        PUSH => {
            let len = length(buf)?.ok_or(Error::ParseIntFailed)?;
            Value::Push(items(buf, len)?)
        }
        MAP => {
            let len = length(buf)?.ok_or(Error::ParseIntFailed)?;
            Value::Map(entries(buf, len)?)
        }
        ATTRIBUTE => {
            // attributes decorate the value that follows; parse and discard
            let len = length(buf)?.ok_or(Error::ParseIntFailed)?;
            let _ = entries(buf, len)?;
            parse_value(buf)?
        }
        BLOB_STREAM | STREAM_END => return Err(Error::StreamedType.into()),
        other => return Err(Error::InvalidPrefix(other).into()),
    })
}

fn items(buf: &mut &[u8], len: usize) -> Result<Vec<Value>, Status> {
    let mut items = Vec::with_capacity(len.min(64));
    for _ in 0..len {
        items.push(parse_value(buf)?);
    }
    Ok(items)
}

fn entries(buf: &mut &[u8], len: usize) -> Result<IndexMap<bstr::BString, Value>, Status> {
    let mut map = IndexMap::with_capacity(len.min(64));
    for _ in 0..len {
        let key = match parse_value(buf)? {
            Value::Blob(msg) => bstr::BString::from(&msg[..]),
            Value::Simple(msg) => msg,
            _ => return Err(Error::InvalidMapKey.into()),
        };
        map.insert(key, parse_value(buf)?);
    }
    Ok(map)
}

fn line<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], Status> {
    static CRLF_SEARCH: Lazy<Finder> = Lazy::new(|| Finder::new(CRLF));

    let idx = CRLF_SEARCH.find(buf).ok_or(Status::Incomplete)?;
    let msg = &buf[..idx];
    buf.advance(idx + CRLF.len());
    Ok(msg)
}

fn length(buf: &mut &[u8]) -> Result<Option<usize>, Status> {
    let msg = line(buf)?;
    if msg.len() == 1 && msg[0] == STREAM_MARK {
        return Err(Error::StreamedType.into());
    }
    let len: i64 = parse_int(msg)?;
    if len < 0 {
        Ok(None)
    } else {
        Ok(Some(len as usize))
    }
}

fn blob(buf: &mut &[u8]) -> Result<Option<Bytes>, Status> {
    let len = match length(buf)? {
        Some(len) => len,
        None => return Ok(None),
    };
    if buf.len() < len + CRLF.len() {
        return Err(Status::Incomplete);
    }
    if &buf[len..len + CRLF.len()] != CRLF {
        return Err(Error::ExpectedCrlf.into());
    }
    let msg = Bytes::copy_from_slice(&buf[..len]);
    buf.advance(len + CRLF.len());
    Ok(Some(msg))
}

fn parse_int<T: std::str::FromStr>(msg: &[u8]) -> Result<T, Status> {
    std::str::from_utf8(msg)
        .ok()
        .and_then(|msg| msg.parse().ok())
        .ok_or_else(|| Error::ParseIntFailed.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(chunks: &[&[u8]]) -> Vec<Value> {
        let mut decoder = Decoder::new();
        let mut out = vec![];
        for chunk in chunks {
            decoder.buffer().extend_from_slice(chunk);
            while let Some(value) = decoder.decode().unwrap() {
                out.push(value);
            }
        }
        out
    }

    #[test]
    fn scalars() {
        let values = decode_all(&[b"+OK\r\n:42\r\n,3.25\r\n#t\r\n_\r\n$-1\r\n"]);
        assert_eq!(
            vec![
                Value::Simple("OK".into()),
                Value::Integer(42),
                Value::Double(3.25),
                Value::Boolean(true),
                Value::Null,
                Value::Null,
            ],
            values,
        );
    }

    #[test]
    fn split_across_reads() {
        let values = decode_all(&[b"*2\r\n$5\r\nhel", b"lo\r\n:", b"7\r\n"]);
        assert_eq!(
            vec![Value::Array(vec![
                Value::Blob(Bytes::from_static(b"hello")),
                Value::Integer(7),
            ])],
            values,
        );
    }

    #[test]
    fn map_preserves_order() {
        let values = decode_all(&[b"%2\r\n$4\r\nmode\r\n+standalone\r\n$5\r\nproto\r\n:3\r\n"]);
        let map = match &values[0] {
            Value::Map(map) => map,
            other => panic!("unexpected value: {:?}", other),
        };
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(vec![bstr::BString::from("mode"), "proto".into()], keys);
    }

    #[test]
    fn server_error_frame() {
        let values = decode_all(&[b"-ERR unknown command 'FOO'\r\n"]);
        match &values[0] {
            Value::Error(err) => assert_eq!("ERR", err.code()),
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn attribute_is_discarded() {
        let values = decode_all(&[b"|1\r\n$3\r\nttl\r\n:10\r\n:99\r\n"]);
        assert_eq!(vec![Value::Integer(99)], values);
    }

    #[test]
    fn incomplete_then_error() {
        let mut decoder = Decoder::new();
        decoder.buffer().extend_from_slice(b":12");
        assert!(matches!(decoder.decode(), Ok(None)));
        decoder.buffer().extend_from_slice(b"\r\n@\r\n");
        assert_eq!(Some(Value::Integer(12)), decoder.decode().unwrap());
        assert!(matches!(decoder.decode(), Err(Error::InvalidPrefix(b'@'))));
    }

    #[test]
    fn streamed_types_rejected() {
        let mut decoder = Decoder::new();
        decoder.buffer().extend_from_slice(b"$?\r\n");
        assert!(matches!(decoder.decode(), Err(Error::StreamedType)));
    }
}
