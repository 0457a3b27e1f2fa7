//! Typed conversion of raw device responses.
//!
//! Lightware devices answer every path with a plain text body; the
//! declared field type in the configuration decides how that text is
//! interpreted. The boolean conversion is deliberately permissive: it is
//! a truthy test against the literal values the devices are known to
//! return, and it never fails (unlike the strict integer/float parses).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::sink::FieldValue;

/// Literal values (case-insensitive) a device returns for "true".
/// `occupied` is what the signal-presence endpoints report.
static TRUTHY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:true|1|ok|occupied)$").unwrap());

/// Declared type of a configured path's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    String,
}

/// Error type for value conversion failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The body was not a valid base-10 signed 64-bit integer.
    Integer(String),
    /// The body was not a valid 64-bit float.
    Float(String),
    /// The configured type tag is not one of integer/float/boolean/string.
    UnknownType(String),
}

impl std::fmt::Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::Integer(s) => write!(f, "invalid integer {:?}", s),
            ValueError::Float(s) => write!(f, "invalid float {:?}", s),
            ValueError::UnknownType(t) => write!(f, "unknown type: {}", t),
        }
    }
}

impl std::error::Error for ValueError {}

impl FromStr for FieldType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(FieldType::Integer),
            "float" => Ok(FieldType::Float),
            "boolean" => Ok(FieldType::Boolean),
            "string" => Ok(FieldType::String),
            other => Err(ValueError::UnknownType(other.to_string())),
        }
    }
}

/// Converts a raw response body into a typed field value.
///
/// The body is interpreted as UTF-8 text with no trimming; devices do
/// not pad their responses and we must not mask it if one ever does.
pub fn parse_value(text: &str, field_type: FieldType) -> Result<FieldValue, ValueError> {
    match field_type {
        FieldType::Integer => text
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| ValueError::Integer(text.to_string())),
        FieldType::Float => text
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| ValueError::Float(text.to_string())),
        FieldType::Boolean => Ok(FieldValue::Boolean(TRUTHY.is_match(text))),
        FieldType::String => Ok(FieldValue::Text(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trip() {
        assert_eq!(
            parse_value("42", FieldType::Integer),
            Ok(FieldValue::Integer(42))
        );
        assert_eq!(
            parse_value("-7", FieldType::Integer),
            Ok(FieldValue::Integer(-7))
        );
    }

    #[test]
    fn test_integer_rejects_malformed() {
        assert!(parse_value("", FieldType::Integer).is_err());
        assert!(parse_value("4.2", FieldType::Integer).is_err());
        assert!(parse_value("forty", FieldType::Integer).is_err());
        // Out of i64 range
        assert!(parse_value("9223372036854775808", FieldType::Integer).is_err());
    }

    #[test]
    fn test_float_round_trip() {
        assert_eq!(
            parse_value("3.25", FieldType::Float),
            Ok(FieldValue::Float(3.25))
        );
        assert_eq!(
            parse_value("-0.5", FieldType::Float),
            Ok(FieldValue::Float(-0.5))
        );
    }

    #[test]
    fn test_float_rejects_malformed() {
        assert!(parse_value("", FieldType::Float).is_err());
        assert!(parse_value("1,5", FieldType::Float).is_err());
        assert!(parse_value("abc", FieldType::Float).is_err());
    }

    #[test]
    fn test_boolean_truthy_set_any_case() {
        for s in ["true", "True", "TRUE", "1", "ok", "OK", "occupied", "Occupied"] {
            assert_eq!(
                parse_value(s, FieldType::Boolean),
                Ok(FieldValue::Boolean(true)),
                "{:?} should be true",
                s
            );
        }
    }

    #[test]
    fn test_boolean_never_fails() {
        // Everything outside the truthy set is false, not an error.
        // This asymmetry with the strict numeric parses is intentional.
        for s in ["false", "0", "no", "", "garbage", " true"] {
            assert_eq!(
                parse_value(s, FieldType::Boolean),
                Ok(FieldValue::Boolean(false)),
                "{:?} should be false",
                s
            );
        }
    }

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            parse_value("  raw body\n", FieldType::String),
            Ok(FieldValue::Text("  raw body\n".to_string()))
        );
    }

    #[test]
    fn test_unknown_type_tag() {
        let err = "decimal".parse::<FieldType>().unwrap_err();
        assert_eq!(err, ValueError::UnknownType("decimal".to_string()));
    }
}
