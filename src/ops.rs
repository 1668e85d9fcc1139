//! Typed operation views, one per Redis data type.
//!
//! Each view borrows a [`Template`](crate::Template) and exposes the
//! commands of one data type; the `Bound*` variants additionally fix the key
//! at construction so every call forwards to the corresponding unbound
//! operation with that key supplied first. Views are created through the
//! accessor methods on the template, never directly.

mod geo;
mod hash;
mod hyperloglog;
mod list;
mod set;
mod stream;
mod value;
mod zset;

pub use geo::{
    BoundGeoOps, GeoFrom, GeoOps, GeoResult, GeoSearchArgs, GeoShape, GeoUnit, Point, SortOrder,
};
pub use hash::{BoundHashOps, HashOps};
pub use hyperloglog::{BoundHyperLogLogOps, HyperLogLogOps};
pub use list::{BoundListOps, ListOps, ListSide};
pub use set::{BoundSetOps, SetOps};
pub use stream::{
    BoundStreamOps, PendingEntry, PendingSummary, RangeBound, ReadOffset, StreamEntry, StreamId,
    StreamOps, StreamTrim,
};
pub use value::{BoundValueOps, SetOptions, ValueOps};
pub use zset::{BoundZSetOps, ZSetOps};

use crate::client::Error;
use crate::resp::{TypeError, Value};

/// Splits a `SCAN`-family reply into the next cursor and the items page.
pub(crate) fn scan_reply(reply: Value) -> Result<(u64, Vec<Value>), Error> {
    let mut parts = reply.into_array()?;
    if parts.len() != 2 {
        return Err(TypeError::other(
            "cursor and items",
            format!("array of {} items", parts.len()),
        )
        .into());
    }
    let items = parts.pop();
    let cursor = parts.pop();
    match (cursor, items) {
        (Some(cursor), Some(items)) => {
            Ok((cursor.into_integer()? as u64, items.into_array()?))
        }
        _ => Err(TypeError::other("cursor and items", "empty array").into()),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn scan_reply_splits_cursor_and_page() {
        let reply = Value::Array(vec![
            Value::Blob(Bytes::from_static(b"17")),
            Value::Array(vec![Value::Blob(Bytes::from_static(b"key:1"))]),
        ]);
        let (cursor, items) = scan_reply(reply).unwrap();
        assert_eq!(17, cursor);
        assert_eq!(1, items.len());
    }

    #[test]
    fn scan_reply_rejects_other_shapes() {
        assert!(scan_reply(Value::Array(vec![])).is_err());
        assert!(scan_reply(Value::Null).is_err());
    }
}
