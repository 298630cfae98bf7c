//! Input Record: the JSON form payload of one generation request.
//!
//! Fields are never validated. Every read names its own default so that a
//! record missing every field still produces a legible document.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while turning a request body into an [`InputRecord`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Dados não fornecidos")]
    Empty,
    #[error("JSON inválido: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Os dados devem ser um objeto JSON")]
    NotAnObject,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct InputRecord(Map<String, Value>);

impl InputRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a raw request body.
    ///
    /// An empty body, `null` and `{}` all mean no data was sent. Bodies that
    /// are not JSON, or are JSON but not an object, are malformed.
    pub fn from_body(body: &[u8]) -> Result<Self, RecordError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(RecordError::Empty);
        }

        match serde_json::from_slice::<Value>(body).map_err(RecordError::Malformed)? {
            Value::Null => Err(RecordError::Empty),
            Value::Object(fields) if fields.is_empty() => Err(RecordError::Empty),
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(RecordError::NotAnObject),
        }
    }

    /// Raw value at `key`; `null` counts as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Display form of the value at `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.field(key)
            .map(display_value)
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`get_or`](Self::get_or), but blank strings also fall back to
    /// `placeholder`.
    pub fn text_or(&self, key: &str, placeholder: &str) -> String {
        match self.field(key).map(display_value) {
            Some(text) if !text.trim().is_empty() => text,
            _ => placeholder.to_string(),
        }
    }

    /// True when `key` holds something other than null or blank text.
    pub fn is_filled(&self, key: &str) -> bool {
        self.field(key)
            .map(|value| !display_value(value).trim().is_empty())
            .unwrap_or(false)
    }

    /// `numeroPrestacoes` as an integer, from either a number or a numeric string.
    pub fn installment_count(&self) -> Option<i64> {
        match self.field("numeroPrestacoes")? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n.trunc() as i64)),
            Value::String(raw) => {
                let raw = raw.trim();
                raw.parse::<i64>().ok().or_else(|| {
                    raw.replace(',', ".")
                        .parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .map(|n| n.trunc() as i64)
                })
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for InputRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
