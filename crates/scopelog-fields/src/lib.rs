//! Structured log field types and the merge engine for scopelog.
//!
//! A [`Field`] is a single key/value log annotation; an ordered slice of
//! fields (with unique keys after a merge) is the unit that flows through
//! the rest of the system. [`merge`] combines two field collections with
//! last-writer-wins override semantics while preserving relative order.
//!
//! # Key Types
//!
//! - [`Field`] — one key/value annotation with a value-kind tag
//! - [`FieldValue`] — the loggable value: scalars, strings, or JSON
//! - [`FieldKind`] — the value-kind tag, useful for encoders
//! - [`merge`] — the order-preserving, override-aware merge operation

pub mod field;
pub mod merge;

pub use field::{Field, FieldKind, FieldValue};
pub use merge::merge;
