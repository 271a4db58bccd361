//! Loosely-typed submitted values.
//!
//! API clients send numbers either as JSON numbers or as numeric strings
//! (`"frequency": "20"`, `"startingdate": "1301392136.0"`). Fields that accept
//! both are captured as [`FlexValue`] and converted during validation, so a
//! malformed value becomes a field error instead of a body decode failure.

use serde::{Deserialize, Serialize};

/// A scalar JSON value as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl FlexValue {
    /// Interpret the value as an integer.
    ///
    /// Floats are accepted only when they carry no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            Self::Text(s) => {
                let trimmed = s.trim();
                trimmed.parse::<i64>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(|f| Self::Float(f).as_i64())
                })
            }
            _ => None,
        }
    }

    /// Interpret the value as a non-negative integer that fits in `u32`.
    pub fn as_u32(&self) -> Option<u32> {
        self.as_i64().and_then(|v| u32::try_from(v).ok())
    }

    /// Interpret the value as a float.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) if v.is_finite() => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Interpret the value as a boolean flag (`true`, `1`, `"1"`, `"true"`).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Interpret the value as a reference to another resource.
    ///
    /// Accepts a bare ID (`1`, `"1"`) or a resource URI whose last path
    /// segment is the ID (`"/api/v1/gateway/1/"`).
    pub fn as_reference_id(&self) -> Option<i64> {
        if let Some(id) = self.as_i64() {
            return Some(id);
        }
        match self {
            Self::Text(s) => s
                .trim()
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .and_then(|segment| segment.parse::<i64>().ok()),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strings_are_accepted() {
        assert_eq!(FlexValue::Text("20".into()).as_i64(), Some(20));
        assert_eq!(FlexValue::Text(" 45 ".into()).as_u32(), Some(45));
        assert_eq!(FlexValue::Text("3.0".into()).as_i64(), Some(3));
        assert_eq!(FlexValue::Text("3.5".into()).as_i64(), None);
        assert_eq!(FlexValue::Text("abc".into()).as_i64(), None);
    }

    #[test]
    fn test_negative_values_do_not_fit_u32() {
        assert_eq!(FlexValue::Int(-1).as_u32(), None);
    }

    #[test]
    fn test_epoch_strings_parse_as_float() {
        let value = FlexValue::Text("1301392136.0".into());
        assert_eq!(value.as_f64(), Some(1_301_392_136.0));
        assert_eq!(FlexValue::Text("NaN".into()).as_f64(), None);
    }

    #[test]
    fn test_reference_ids_from_uri() {
        assert_eq!(FlexValue::Int(7).as_reference_id(), Some(7));
        assert_eq!(
            FlexValue::Text("/api/v1/gateway/12/".into()).as_reference_id(),
            Some(12)
        );
        assert_eq!(FlexValue::Text("/api/v1/gateway/".into()).as_reference_id(), None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(FlexValue::Int(1).as_bool(), Some(true));
        assert_eq!(FlexValue::Text("0".into()).as_bool(), Some(false));
        assert_eq!(FlexValue::Int(2).as_bool(), None);
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<FlexValue> = serde_json::from_str(r#"[20, 1.5, "x", true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FlexValue::Int(20),
                FlexValue::Float(1.5),
                FlexValue::Text("x".into()),
                FlexValue::Bool(true)
            ]
        );
    }
}
