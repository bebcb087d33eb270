use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// The value carried by a [`Field`].
///
/// Covers the loggable scalars plus a structured [`serde_json::Value`]
/// variant for anything richer. Serializes untagged, so a field encodes
/// as its plain JSON value rather than an enum wrapper.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null (key present, no value).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    Uint(u64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Arbitrary structured value.
    Json(serde_json::Value),
}

impl FieldValue {
    /// The kind tag for this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Null => FieldKind::Null,
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Uint(_) => FieldKind::Uint,
            Self::Float(_) => FieldKind::Float,
            Self::Str(_) => FieldKind::Str,
            Self::Json(_) => FieldKind::Json,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        Self::Uint(v.into())
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Value-kind tag carried by every field.
///
/// Encoders dispatch on this rather than inspecting the value itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Json,
}

/// A single structured log annotation: a string key plus a loggable value.
///
/// Keys are `Cow<'static, str>` since most call sites use string literals;
/// dynamically built keys allocate once. Two fields are "the same field"
/// for merge purposes when their keys are equal, regardless of value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    key: Cow<'static, str>,
    value: FieldValue,
}

impl Field {
    /// Create a field from a key and anything convertible to a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use scopelog_fields::Field;
    ///
    /// let f = Field::new("request_id", "abc123");
    /// assert_eq!(f.key(), "request_id");
    /// ```
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A field with an explicit null value.
    pub fn null(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Null,
        }
    }

    /// The field's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The field's value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The value-kind tag.
    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
