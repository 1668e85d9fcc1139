//! Pluggable conversion between typed values and raw bytes.
//!
//! Every key, value, and hash field crossing the wire goes through one of
//! these strategies. A [`Template`](crate::Template) carries one serializer
//! for keys and one for values; swapping them changes the storage format
//! without touching the operation methods.
//!
//! The two traits mirror the read and write halves of the conversion, like
//! [`serde::Serialize`] and [`serde::Deserialize`] do: a strategy type
//! implements both for every payload type it supports.

use bytes::Bytes;

/// Converts a typed value into its byte representation.
pub trait Serializer<T: ?Sized> {
    fn serialize(&self, value: &T) -> Result<Bytes, Error>;
}

/// Reconstructs a typed value from its byte representation.
pub trait Deserializer<T> {
    fn deserialize(&self, raw: &[u8]) -> Result<T, Error>;
}

/// Errors produced by the bundled serializers.
///
/// User-defined serializers can use [`Error::Custom`](Error::Custom) to
/// surface their own failures; nothing in this layer retries or remaps them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Payload is not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    /// Payload is not a decimal integer.
    #[error("failed to parse integer payload")]
    ParseInt(#[from] std::num::ParseIntError),
    /// Payload is not a decimal number.
    #[error("failed to parse decimal payload")]
    ParseFloat(#[from] std::num::ParseFloatError),
    /// JSON conversion failed.
    #[error("JSON conversion failed")]
    Json(#[from] serde_json::Error),
    /// Failure reported by a user-defined serializer.
    #[error("{0}")]
    Custom(String),
}

/// UTF-8 text serializer. The default for both keys and values.
///
/// Numbers are written in their decimal form so that counter commands like
/// `INCR` keep working on values stored through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSerializer;

/// JSON serializer over any [`serde`] round-trippable type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

/// Identity pass-through for raw byte payloads.
///
/// This is the "no serializer" configuration: bytes go over the wire
/// unchanged in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSerializer;

impl<'a, T: ?Sized> Serializer<&'a T> for StringSerializer
where
    StringSerializer: Serializer<T>,
{
    fn serialize(&self, value: &&'a T) -> Result<Bytes, Error> {
        self.serialize(*value)
    }
}

impl<'a, T: ?Sized> Serializer<&'a T> for RawSerializer
where
    RawSerializer: Serializer<T>,
{
    fn serialize(&self, value: &&'a T) -> Result<Bytes, Error> {
        self.serialize(*value)
    }
}

impl Serializer<str> for StringSerializer {
    fn serialize(&self, value: &str) -> Result<Bytes, Error> {
        Ok(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl Serializer<String> for StringSerializer {
    fn serialize(&self, value: &String) -> Result<Bytes, Error> {
        self.serialize(value.as_str())
    }
}

impl Serializer<i64> for StringSerializer {
    fn serialize(&self, value: &i64) -> Result<Bytes, Error> {
        let mut buf = itoa::Buffer::new();
        Ok(Bytes::copy_from_slice(buf.format(*value).as_bytes()))
    }
}

impl Serializer<u64> for StringSerializer {
    fn serialize(&self, value: &u64) -> Result<Bytes, Error> {
        let mut buf = itoa::Buffer::new();
        Ok(Bytes::copy_from_slice(buf.format(*value).as_bytes()))
    }
}

impl Serializer<f64> for StringSerializer {
    fn serialize(&self, value: &f64) -> Result<Bytes, Error> {
        let mut buf = ryu::Buffer::new();
        Ok(Bytes::copy_from_slice(buf.format(*value).as_bytes()))
    }
}

impl Deserializer<String> for StringSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<String, Error> {
        Ok(std::str::from_utf8(raw)?.to_owned())
    }
}

impl Deserializer<i64> for StringSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<i64, Error> {
        Ok(std::str::from_utf8(raw)?.parse()?)
    }
}

impl Deserializer<u64> for StringSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<u64, Error> {
        Ok(std::str::from_utf8(raw)?.parse()?)
    }
}

impl Deserializer<f64> for StringSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<f64, Error> {
        Ok(std::str::from_utf8(raw)?.parse()?)
    }
}

impl<T: ?Sized + serde::Serialize> Serializer<T> for JsonSerializer {
    fn serialize(&self, value: &T) -> Result<Bytes, Error> {
        Ok(serde_json::to_vec(value)?.into())
    }
}

impl<T: serde::de::DeserializeOwned> Deserializer<T> for JsonSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<T, Error> {
        Ok(serde_json::from_slice(raw)?)
    }
}

impl Serializer<[u8]> for RawSerializer {
    fn serialize(&self, value: &[u8]) -> Result<Bytes, Error> {
        Ok(Bytes::copy_from_slice(value))
    }
}

impl Serializer<Vec<u8>> for RawSerializer {
    fn serialize(&self, value: &Vec<u8>) -> Result<Bytes, Error> {
        self.serialize(&value[..])
    }
}

impl Serializer<Bytes> for RawSerializer {
    fn serialize(&self, value: &Bytes) -> Result<Bytes, Error> {
        Ok(value.clone())
    }
}

impl Deserializer<Vec<u8>> for RawSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(raw.to_vec())
    }
}

impl Deserializer<Bytes> for RawSerializer {
    fn deserialize(&self, raw: &[u8]) -> Result<Bytes, Error> {
        Ok(Bytes::copy_from_slice(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_round_trip() {
        let ser = StringSerializer;
        let raw = ser.serialize("stockholm").unwrap();
        let back: String = ser.deserialize(&raw).unwrap();
        assert_eq!("stockholm", back);
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let ser = StringSerializer;
        let res: Result<String, _> = ser.deserialize(b"\xff\xfe");
        assert!(matches!(res, Err(Error::Utf8(_))));
    }

    #[test]
    fn numbers_as_decimal_text() {
        let ser = StringSerializer;
        assert_eq!(&b"-42"[..], &ser.serialize(&-42i64).unwrap()[..]);
        let back: i64 = ser.deserialize(b"-42").unwrap();
        assert_eq!(-42, back);
    }

    #[test]
    fn json_round_trip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Table {
            foo: String,
            bar: i32,
            baz: bool,
        }

        let ser = JsonSerializer;
        let value = Table {
            foo: "foo".into(),
            bar: 42,
            baz: true,
        };
        let raw = ser.serialize(&value).unwrap();
        let back: Table = ser.deserialize(&raw).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn raw_passes_bytes_through() {
        let ser = RawSerializer;
        let raw = ser.serialize(&b"\x00\x01binary"[..]).unwrap();
        assert_eq!(&b"\x00\x01binary"[..], &raw[..]);
        let back: Vec<u8> = ser.deserialize(&raw).unwrap();
        assert_eq!(b"\x00\x01binary".to_vec(), back);
    }
}
