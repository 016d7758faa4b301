use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern for strings that are entirely a signed decimal numeric literal.
static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("valid regex"));

/// A single scanned field value. Log files may only contribute scalars;
/// anything structured is coerced to `Null` by the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// One scanned file's flat field set, keyed by field name.
///
/// Insertion order is meaningful: column discovery preserves the order in
/// which fields were first seen.
pub type Record = IndexMap<String, Scalar>;

/// A normalized table row. Same shape as a record, but guaranteed to carry
/// every column of the table it belongs to.
pub type Row = Record;

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric magnitude of this value, if it has one.
    ///
    /// Numbers qualify directly (NaN excluded); strings qualify when, after
    /// trimming, they are entirely a decimal literal. Booleans never qualify.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Scalar::Int(n) => Some(*n as f64),
            Scalar::Float(f) if !f.is_nan() => Some(*f),
            Scalar::Str(s) => {
                let trimmed = s.trim();
                if NUMERIC_LITERAL.is_match(trimmed) {
                    trimmed.parse::<f64>().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Re-read a numeric string as a number: `Int` when it has no decimal
    /// point, `Float` otherwise. Non-string and non-numeric values come back
    /// unchanged. Used by display formatting before a template is applied.
    pub fn coerce_numeric_string(&self) -> Scalar {
        if let Scalar::Str(s) = self {
            let trimmed = s.trim();
            if NUMERIC_LITERAL.is_match(trimmed) {
                if !trimmed.contains('.') {
                    if let Ok(n) = trimmed.parse::<i64>() {
                        return Scalar::Int(n);
                    }
                }
                if let Ok(f) = trimmed.parse::<f64>() {
                    return Scalar::Float(f);
                }
            }
        }
        self.clone()
    }

    /// Convert a parsed JSON value into a scalar. Arrays and objects have no
    /// scalar form and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Scalar> {
        match value {
            serde_json::Value::Null => Some(Scalar::Null),
            serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Scalar::Int(i))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            serde_json::Value::String(s) => Some(Scalar::Str(s.clone())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion_rules() {
        assert_eq!(Scalar::Int(7).as_numeric(), Some(7.0));
        assert_eq!(Scalar::Float(2.5).as_numeric(), Some(2.5));
        assert_eq!(Scalar::from("100").as_numeric(), Some(100.0));
        assert_eq!(Scalar::from(" -3.5 ").as_numeric(), Some(-3.5));
        assert_eq!(Scalar::from(".5").as_numeric(), Some(0.5));
        assert_eq!(Scalar::from("1e3").as_numeric(), None);
        assert_eq!(Scalar::from("10 items").as_numeric(), None);
        assert_eq!(Scalar::Bool(true).as_numeric(), None);
        assert_eq!(Scalar::Null.as_numeric(), None);
        assert_eq!(Scalar::Float(f64::NAN).as_numeric(), None);
    }

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(Scalar::from("42").coerce_numeric_string(), Scalar::Int(42));
        assert_eq!(
            Scalar::from("4.25").coerce_numeric_string(),
            Scalar::Float(4.25)
        );
        assert_eq!(
            Scalar::from("hello").coerce_numeric_string(),
            Scalar::from("hello")
        );
        // Non-strings pass through untouched
        assert_eq!(Scalar::Int(1).coerce_numeric_string(), Scalar::Int(1));
    }

    #[test]
    fn test_json_round_trip() {
        let values = vec![
            Scalar::Null,
            Scalar::Bool(true),
            Scalar::Int(-12),
            Scalar::Float(0.25),
            Scalar::from("text"),
        ];
        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: Scalar = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_from_json_rejects_structured_values() {
        assert_eq!(Scalar::from_json(&serde_json::json!([1, 2])), None);
        assert_eq!(Scalar::from_json(&serde_json::json!({"a": 1})), None);
        assert_eq!(
            Scalar::from_json(&serde_json::json!(3)),
            Some(Scalar::Int(3))
        );
    }
}
