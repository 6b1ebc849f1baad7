//! Typed access to a single resolved configuration value.

use std::sync::Arc;

use super::source::{nonexistent_source, Source};
use super::ConfigError;

/// A resolved configuration value, present or absent.
///
/// A `Value` is always a real object, even for keys that were never found;
/// whether anything exists behind it is deferred to the accessors. Variants
/// without a default ([`as_str`](Value::as_str), [`as_i64`](Value::as_i64),
/// ...) fail loudly on absence; the `_or` variants substitute the default
/// instead. Immutable and safe to share across threads.
#[derive(Debug, Clone)]
pub enum Value {
    /// A value found in some source, with its provenance.
    Present {
        raw: String,
        origin: Arc<dyn Source>,
    },
    /// No source defined the key.
    Absent,
}

impl Value {
    pub(crate) fn present(raw: impl Into<String>, origin: Arc<dyn Source>) -> Self {
        Value::Present {
            raw: raw.into(),
            origin,
        }
    }

    pub(crate) fn absent() -> Self {
        Value::Absent
    }

    /// Returns whether a value was found.
    pub fn exists(&self) -> bool {
        matches!(self, Value::Present { .. })
    }

    /// Returns the raw value, or [`ConfigError::Missing`] if absent.
    pub fn as_str(&self) -> Result<&str, ConfigError> {
        match self {
            Value::Present { raw, .. } => Ok(raw),
            Value::Absent => Err(ConfigError::Missing),
        }
    }

    /// Returns the raw value if present, else `default`. Never fails.
    pub fn as_str_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            Value::Present { raw, .. } => raw,
            Value::Absent => default,
        }
    }

    /// Parses the value as a decimal integer.
    ///
    /// Fails with [`ConfigError::Missing`] if absent and
    /// [`ConfigError::Malformed`] if present but not parseable.
    pub fn as_i64(&self) -> Result<i64, ConfigError> {
        let raw = self.as_str()?;
        raw.parse().map_err(|_| ConfigError::Malformed {
            raw: raw.to_string(),
            target: "i64",
        })
    }

    /// Like [`as_i64`](Value::as_i64), but an absent value yields `default`
    /// without any parsing. A present but malformed value still fails: the
    /// default suppresses absence only.
    pub fn as_i64_or(&self, default: i64) -> Result<i64, ConfigError> {
        match self {
            Value::Present { .. } => self.as_i64(),
            Value::Absent => Ok(default),
        }
    }

    /// Parses the value as a floating-point number.
    ///
    /// Fails with [`ConfigError::Missing`] if absent and
    /// [`ConfigError::Malformed`] if present but not parseable.
    pub fn as_f64(&self) -> Result<f64, ConfigError> {
        let raw = self.as_str()?;
        raw.parse().map_err(|_| ConfigError::Malformed {
            raw: raw.to_string(),
            target: "f64",
        })
    }

    /// Like [`as_f64`](Value::as_f64), but an absent value yields `default`
    /// without any parsing.
    pub fn as_f64_or(&self, default: f64) -> Result<f64, ConfigError> {
        match self {
            Value::Present { .. } => self.as_f64(),
            Value::Absent => Ok(default),
        }
    }

    /// Returns true iff the value case-insensitively equals `"true"` or
    /// `"yes"`. Any other string is false, not an error. Fails with
    /// [`ConfigError::Missing`] if absent.
    pub fn is_true(&self) -> Result<bool, ConfigError> {
        let raw = self.as_str()?;
        Ok(raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes"))
    }

    /// Like [`is_true`](Value::is_true), but an absent value yields `default`.
    pub fn is_true_or(&self, default: bool) -> bool {
        match self {
            Value::Present { .. } => self.is_true().unwrap_or(default),
            Value::Absent => default,
        }
    }

    /// Returns the source this value was loaded from, or the nonexistent
    /// sentinel for absent values. Never an `Option`.
    pub fn loaded_from(&self) -> Arc<dyn Source> {
        match self {
            Value::Present { origin, .. } => Arc::clone(origin),
            Value::Absent => nonexistent_source(),
        }
    }
}
