//! Context-scoped structured log fields.
//!
//! Attach key/value fields to an immutable propagation handle once, and
//! every record logged under that handle (or any handle derived from it)
//! carries them automatically. A request id attached at the edge of a
//! service shows up on every log line the request produces, without being
//! threaded through each layer by hand.
//!
//! ```
//! use std::sync::Arc;
//! use scopelog::{attach_fields, Field, Logger, MemorySink};
//! use scopelog_context::Context;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::new(sink.clone());
//!
//! let ctx = attach_fields(
//!     &Context::root(),
//!     vec![Field::new("request_id", "abc123"), Field::new("user_id", "user456")],
//! );
//!
//! logger.info(&ctx, "processing request", vec![Field::new("action", "update")]);
//!
//! let record = &sink.records()[0];
//! assert_eq!(record.field("request_id").unwrap(), &Field::new("request_id", "abc123"));
//! assert_eq!(record.field("action").unwrap(), &Field::new("action", "update"));
//! ```
//!
//! # Pieces
//!
//! - [`attach_fields`] / [`fields_of`] — the context field store: one
//!   collision-free slot per handle holding the cumulative collection
//! - [`Logger`] — single parameterized emission path plus per-level wrappers
//! - [`Sink`] — where records go ([`MemorySink`], [`WriteSink`],
//!   [`TracingSink`])
//! - [`merge`] — the underlying last-writer-wins, order-preserving merge
//!   (re-exported from `scopelog-fields`)
//!
//! Everything is immutable after construction; all operations are safe for
//! unsynchronized concurrent use.

pub mod logger;
pub mod sink;
pub mod store;

pub use logger::{FieldMap, Level, Logger, Record};
pub use sink::{MemorySink, Sink, TracingSink, WriteSink};
pub use store::{attach_fields, fields_of};

// The field types and merge engine live in their own crate; re-export the
// pieces call sites need.
pub use scopelog_fields::{merge, Field, FieldKind, FieldValue};
