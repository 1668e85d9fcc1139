//! RESP3 wire codec.
//!
//! This module only knows about protocol framing. Command semantics live in
//! the [`ops`](crate::ops) layer, transport in [`connection`](crate::connection).

pub mod decode;
pub mod encode;
pub mod value;

pub use decode::Decoder;
pub use encode::Command;
pub use value::{ServerError, TypeError, Value};
