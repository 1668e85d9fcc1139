//! The loosely typed Value enum to represent a RESP3 reply.
//!
//! For more information, see the [`Value`](self::Value) type.

use std::fmt;
use std::str;

use bstr::BString;
use bytes::Bytes;
use indexmap::IndexMap;

/// Represents any complete RESP3 reply value.
///
/// This is what [`raw_command`](crate::Template::raw_command) returns and what
/// the typed operation methods decode their replies from. It is also useful to
/// _see_ the structure of a reply, like the `HELLO` response.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value. Also produced by RESP2-style null bulk strings (`$-1`).
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Integer(i64),
    /// Double precision floating point number.
    Double(f64),
    /// Integer outside the `i64` range, kept as its decimal digits.
    BigNumber(BString),
    /// Simple string. Guaranteed free of `\r` and `\n`.
    Simple(BString),
    /// Binary string. Conventionally but not necessarily UTF-8.
    Blob(Bytes),
    /// Verbatim string with its format prefix stripped.
    Verbatim(Bytes),
    /// Error reported by the server, from either the simple or the blob
    /// error frame.
    Error(ServerError),
    /// Array of values.
    Array(Vec<Value>),
    /// Set of values. Order should not be considered stable.
    Set(Vec<Value>),
    /// Map of values, keyed by binary strings.
    /// Order is preserved to print the hello message nicely.
    Map(IndexMap<BString, Value>),
    /// Out-of-band message pushed by the server.
    Push(Vec<Value>),
}

/// An error the server reported in a reply.
///
/// Redis prefixes error messages with an upcased code like `ERR` or
/// `WRONGTYPE`; the code and the remaining message are kept separate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} {message}")]
pub struct ServerError {
    code: String,
    message: String,
}

/// A reply did not have the shape an operation expected.
///
/// Commands have fixed reply shapes, so hitting this outside of a server
/// version mismatch indicates a bug in the command encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected reply: expected {expected}, found {found}")]
pub struct TypeError {
    expected: &'static str,
    found: String,
}

impl ServerError {
    pub(crate) fn parse(raw: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(raw);
        let mut parts = raw.splitn(2, ' ');
        let code = parts.next().unwrap_or_default().to_owned();
        let message = parts.next().unwrap_or_default().to_owned();
        ServerError { code, message }
    }

    /// The upcased error code, like `ERR` or `WRONGTYPE`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The error message following the code.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TypeError {
    pub(crate) fn expected(expected: &'static str, found: &Value) -> Self {
        TypeError {
            expected,
            found: found.kind().to_owned(),
        }
    }

    pub(crate) fn other(expected: &'static str, found: impl fmt::Display) -> Self {
        TypeError {
            expected,
            found: found.to_string(),
        }
    }
}

impl Value {
    /// Name of the value's protocol type, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::BigNumber(_) => "big number",
            Value::Simple(_) => "simple string",
            Value::Blob(_) => "blob string",
            Value::Verbatim(_) => "verbatim string",
            Value::Error(_) => "error",
            Value::Array(_) => "array",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Push(_) => "push",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Expects the constant `+OK` reply.
    pub fn into_ok(self) -> Result<(), TypeError> {
        match self {
            Value::Simple(ref msg) if msg == "OK" => Ok(()),
            other => Err(TypeError::expected("OK", &other)),
        }
    }

    /// Expects `+OK` or null, as returned by conditional writes.
    /// Returns whether the write was applied.
    pub fn into_ok_or_null(self) -> Result<bool, TypeError> {
        match self {
            Value::Null => Ok(false),
            other => other.into_ok().map(|()| true),
        }
    }

    /// Expects an integer, possibly encoded as numeric text.
    pub fn into_integer(self) -> Result<i64, TypeError> {
        match self {
            Value::Integer(num) => Ok(num),
            Value::Blob(ref msg) => {
                parse_num(msg.as_ref()).ok_or_else(|| TypeError::expected("integer", &self))
            }
            Value::Simple(ref msg) => {
                parse_num(msg.as_ref()).ok_or_else(|| TypeError::expected("integer", &self))
            }
            other => Err(TypeError::expected("integer", &other)),
        }
    }

    /// Expects a boolean, or an integer `0`/`1` flag.
    pub fn into_bool(self) -> Result<bool, TypeError> {
        match self {
            Value::Boolean(flag) => Ok(flag),
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            other => Err(TypeError::expected("boolean", &other)),
        }
    }

    /// Expects a double. Integers and numeric text are accepted since
    /// score replies vary between protocol versions.
    pub fn into_double(self) -> Result<f64, TypeError> {
        match self {
            Value::Double(num) => Ok(num),
            Value::Integer(num) => Ok(num as f64),
            Value::Blob(ref msg) => {
                parse_num(msg.as_ref()).ok_or_else(|| TypeError::expected("double", &self))
            }
            Value::Simple(ref msg) => {
                parse_num(msg.as_ref()).ok_or_else(|| TypeError::expected("double", &self))
            }
            other => Err(TypeError::expected("double", &other)),
        }
    }

    /// Like [`into_double`](Self::into_double) but maps null to `None`.
    pub fn into_opt_double(self) -> Result<Option<f64>, TypeError> {
        match self {
            Value::Null => Ok(None),
            other => other.into_double().map(Some),
        }
    }

    /// Expects a binary string. Simple and verbatim strings qualify.
    pub fn into_blob(self) -> Result<Bytes, TypeError> {
        match self {
            Value::Blob(msg) | Value::Verbatim(msg) => Ok(msg),
            Value::Simple(msg) => Ok(Bytes::copy_from_slice(msg.as_ref())),
            other => Err(TypeError::expected("blob string", &other)),
        }
    }

    /// Like [`into_blob`](Self::into_blob) but maps null to `None`.
    pub fn into_opt_blob(self) -> Result<Option<Bytes>, TypeError> {
        match self {
            Value::Null => Ok(None),
            other => other.into_blob().map(Some),
        }
    }

    /// Expects a simple string.
    pub fn into_simple(self) -> Result<BString, TypeError> {
        match self {
            Value::Simple(msg) => Ok(msg),
            Value::Blob(msg) => Ok(BString::from(&msg[..])),
            other => Err(TypeError::expected("simple string", &other)),
        }
    }

    /// Expects any sequence shaped value.
    pub fn into_array(self) -> Result<Vec<Value>, TypeError> {
        match self {
            Value::Array(items) | Value::Set(items) | Value::Push(items) => Ok(items),
            other => Err(TypeError::expected("array", &other)),
        }
    }

    /// Like [`into_array`](Self::into_array) but maps null to `None`.
    pub fn into_opt_array(self) -> Result<Option<Vec<Value>>, TypeError> {
        match self {
            Value::Null => Ok(None),
            other => other.into_array().map(Some),
        }
    }

    /// Expects a map, or a flat even-length array of alternating keys and
    /// values as older reply shapes use.
    pub fn into_pairs(self) -> Result<Vec<(BString, Value)>, TypeError> {
        match self {
            Value::Map(entries) => Ok(entries.into_iter().collect()),
            Value::Array(items) => {
                if items.len() % 2 != 0 {
                    return Err(TypeError::other("field-value pairs", "odd-length array"));
                }
                let mut pairs = Vec::with_capacity(items.len() / 2);
                let mut items = items.into_iter();
                while let (Some(field), Some(value)) = (items.next(), items.next()) {
                    pairs.push((field.into_simple()?, value));
                }
                Ok(pairs)
            }
            other => Err(TypeError::expected("map", &other)),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

fn parse_num<T: str::FromStr>(msg: &[u8]) -> Option<T> {
    str::from_utf8(msg).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_splits_code() {
        let err = ServerError::parse(b"WRONGTYPE Operation against a key holding the wrong kind of value");
        assert_eq!("WRONGTYPE", err.code());
        assert!(err.message().starts_with("Operation against"));
    }

    #[test]
    fn integer_accepts_numeric_text() {
        assert_eq!(42, Value::Integer(42).into_integer().unwrap());
        assert_eq!(42, Value::Blob(Bytes::from_static(b"42")).into_integer().unwrap());
        assert!(Value::Blob(Bytes::from_static(b"nope")).into_integer().is_err());
    }

    #[test]
    fn pairs_from_flat_array() {
        let value = Value::Array(vec![
            Value::Blob(Bytes::from_static(b"name")),
            Value::Blob(Bytes::from_static(b"Jack")),
            Value::Blob(Bytes::from_static(b"age")),
            Value::Blob(Bytes::from_static(b"33")),
        ]);
        let pairs = value.into_pairs().unwrap();
        assert_eq!(2, pairs.len());
        assert_eq!("name", pairs[0].0);
        assert_eq!("age", pairs[1].0);
    }

    #[test]
    fn ok_or_null() {
        assert!(Value::Simple("OK".into()).into_ok_or_null().unwrap());
        assert!(!Value::Null.into_ok_or_null().unwrap());
        assert!(Value::Integer(1).into_ok_or_null().is_err());
    }
}
