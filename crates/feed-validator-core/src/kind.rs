//! Runtime kinds of decoded values and the primitive kinds a schema can expect.

use serde_json::Value;
use std::fmt;

/// Runtime kind of a decoded candidate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a decoded value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar kind a schema slot expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Text,
    Integer,
    Boolean,
    Any,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Text => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Any => "any",
        }
    }

    /// Whether a value of `kind` satisfies this primitive without coercion
    pub fn accepts(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (PrimitiveKind::Any, _)
                | (PrimitiveKind::Text, ValueKind::String)
                | (PrimitiveKind::Integer, ValueKind::Integer)
                | (PrimitiveKind::Boolean, ValueKind::Boolean)
        )
    }

    /// Whether `value` satisfies this primitive, allowing integers written as
    /// text (`"42"` where an integer is expected).
    pub fn accepts_coerced(&self, value: &Value) -> bool {
        if self.accepts(ValueKind::of(value)) {
            return true;
        }
        match (self, value) {
            (PrimitiveKind::Integer, Value::String(s)) => parses_as_integer(s),
            _ => false,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer text of any width: an optional sign followed by ASCII digits
fn parses_as_integer(text: &str) -> bool {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Render a value the way it appears in messages: raw text for strings,
/// compact JSON for everything else.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text entries must contain something other than whitespace; every other
/// kind of value counts as a usable entry.
pub fn is_valid_entry(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
