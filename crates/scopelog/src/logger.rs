//! Context-aware logger: every record carries the fields visible from the
//! handle it was emitted under.
//!
//! There is exactly one emission path, [`Logger::log`], parameterized by
//! [`Level`]; the per-level methods are one-line delegations. The emission
//! rule: context fields are the base, call-site fields are merged on top
//! (call-site wins on collision), and when the context carries nothing the
//! call-site fields pass through untouched.

use std::fmt;
use std::sync::Arc;

use scopelog_context::Context;
use scopelog_fields::{merge, Field};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::sink::Sink;
use crate::store::fields_of;

/// Log severity, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Lowercase name, as encoded on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One finished log record: severity, message, and the fully merged fields.
///
/// Serializes as a flat JSON object: `level` and `message` first, then each
/// field in collection order. Keys are unique (the merge invariant), so the
/// flat encoding is unambiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            level,
            message: message.into(),
            fields,
        }
    }

    /// The value of the field named `key`, if present.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key() == key)
    }

    /// The fields alone, as an order-preserving serializable map.
    pub fn fields_as_map(&self) -> FieldMap<'_> {
        FieldMap(&self.fields)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.fields.len()))?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("message", &self.message)?;
        for field in &self.fields {
            map.serialize_entry(field.key(), field.value())?;
        }
        map.end()
    }
}

/// Order-preserving map view over a field slice, for encoders that want
/// the fields without the record envelope.
pub struct FieldMap<'a>(&'a [Field]);

impl Serialize for FieldMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in self.0 {
            map.serialize_entry(field.key(), field.value())?;
        }
        map.end()
    }
}

/// Context-aware logger over a shared [`Sink`].
///
/// Cloning shares the sink. [`Logger::with`] pre-binds fields that sit
/// under context fields, which in turn sit under call-site fields — the
/// later a field is supplied, the stronger it is on key collision.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    bound: Vec<Field>,
    min_level: Level,
}

impl Logger {
    /// Wrap a sink. All levels pass by default.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            bound: Vec::new(),
            min_level: Level::Debug,
        }
    }

    /// A child logger with `fields` pre-bound to every record it emits.
    /// The receiver is unchanged.
    pub fn with(&self, fields: Vec<Field>) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            bound: merge(self.bound.clone(), fields),
            min_level: self.min_level,
        }
    }

    /// A child logger dropping records below `level` before any merge work.
    pub fn with_min_level(&self, level: Level) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            bound: self.bound.clone(),
            min_level: level,
        }
    }

    /// The single emission path: fetch the handle's fields, merge per the
    /// emission rule, hand the record to the sink.
    pub fn log(&self, ctx: &Context, level: Level, message: &str, fields: Vec<Field>) {
        if level < self.min_level {
            return;
        }

        let context_fields = fields_of(ctx);
        let base = if self.bound.is_empty() {
            context_fields
        } else {
            merge(self.bound.clone(), context_fields)
        };
        // Empty context (and no bound fields): call-site fields pass
        // through unmerged.
        let all = if base.is_empty() { fields } else { merge(base, fields) };

        self.sink.emit(Record::new(level, message, all));
    }

    /// Log at [`Level::Debug`].
    pub fn debug(&self, ctx: &Context, message: &str, fields: Vec<Field>) {
        self.log(ctx, Level::Debug, message, fields);
    }

    /// Log at [`Level::Info`].
    pub fn info(&self, ctx: &Context, message: &str, fields: Vec<Field>) {
        self.log(ctx, Level::Info, message, fields);
    }

    /// Log at [`Level::Warn`].
    pub fn warn(&self, ctx: &Context, message: &str, fields: Vec<Field>) {
        self.log(ctx, Level::Warn, message, fields);
    }

    /// Log at [`Level::Error`].
    pub fn error(&self, ctx: &Context, message: &str, fields: Vec<Field>) {
        self.log(ctx, Level::Error, message, fields);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("bound", &self.bound.len())
            .field("min_level", &self.min_level)
            .finish()
    }
}
