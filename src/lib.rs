//! typered
//! =======
//!
//! Typed, serializer-driven data access over the Redis wire protocol.
//!
//! A [`Template`](crate::Template) pairs a pooled connection with two
//! pluggable serializers, one for keys and one for values. Typed operation
//! views per data type (strings, lists, sets, sorted sets, hashes, geo,
//! streams, HyperLogLog) turn method calls into commands; nothing else in
//! application code touches bytes or connections.
//!
//! ## Making a query
//!
//! ```no_run
//! # #[tokio::main(flavor = "current_thread")] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use typered::Template;
//!
//! let template = Template::new(20, "localhost:6379").await?;
//!
//! let ops = template.value_ops();
//! ops.set("greeting", "Hello").await?;
//! let fetched: Option<String> = ops.get("greeting").await?;
//! assert_eq!(Some("Hello".to_owned()), fetched);
//!
//! // Binding fixes the key once; every call on the bound view
//! // forwards to the unbound operation with that key supplied.
//! let counter = template.bound_value_ops("page:hits");
//! counter.incr().await?;
//! # Ok(()) }
//! ```
//!
//! ## Storing structured values
//!
//! Swapping the value serializer changes the storage format without touching
//! any operation code:
//!
//! ```no_run
//! # #[tokio::main(flavor = "current_thread")] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use typered::serializer::{JsonSerializer, StringSerializer};
//! use typered::Template;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Session {
//!     user: String,
//!     logins: u32,
//! }
//!
//! let template = Template::new(20, "localhost:6379")
//!     .await?
//!     .with_serializers(StringSerializer, JsonSerializer);
//!
//! let session = Session { user: "aki".into(), logins: 3 };
//! template.value_ops().set("session:aki", &session).await?;
//! let fetched: Option<Session> = template.value_ops().get("session:aki").await?;
//! assert_eq!(Some(session), fetched);
//! # Ok(()) }
//! ```
//!
//! ## Making a custom query
//!
//! Commands without a typed helper can still be sent through
//! [`raw_command`](crate::Template::raw_command) with pre-serialized
//! arguments; the reply comes back as a loosely typed
//! [`Value`](crate::resp::Value).

#![deny(missing_debug_implementations)]

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod connection;
pub mod connector;
pub mod expiry;
pub mod ops;
pub mod resp;
pub mod serializer;
pub mod template;

pub use client::{Client, Error, ErrorKind};
pub use template::Template;
