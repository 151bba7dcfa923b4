use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Identifier of a cached review record as it appears in traces.
///
/// Strings and numbers compare by value and never equal each other, so
/// `"7"` and `7` are distinct records. Any JSON number is accepted; integers
/// and floats stay distinct (`1` is not `1.0`). JSON `null` maps to `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewKey {
    Number(Number),
    Text(String),
}

impl ReviewKey {
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    #[must_use]
    pub fn number(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<&str> for ReviewKey {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for ReviewKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ReviewKey {
    fn from(value: i64) -> Self {
        Self::number(value)
    }
}

impl From<Number> for ReviewKey {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

/// Render an optional key for logs and reports, `null` when absent.
#[must_use]
pub fn describe(key: Option<&ReviewKey>) -> String {
    key.map_or_else(|| "null".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strings_numbers_and_null() {
        let keys: Vec<Option<ReviewKey>> = serde_json::from_str(r#"["A", 42, null]"#).unwrap();
        assert_eq!(
            keys,
            vec![Some(ReviewKey::text("A")), Some(ReviewKey::number(42)), None]
        );
    }

    #[test]
    fn text_and_number_never_match() {
        assert_ne!(ReviewKey::text("7"), ReviewKey::number(7));
        assert_eq!(ReviewKey::from("7"), ReviewKey::Text("7".into()));
    }

    #[test]
    fn accepts_fractional_and_large_unsigned_numbers() {
        let keys: Vec<ReviewKey> =
            serde_json::from_str("[1.5, 18446744073709551615, -3]").unwrap();
        assert_eq!(keys[0].to_string(), "1.5");
        assert_eq!(keys[1], ReviewKey::from(Number::from(u64::MAX)));
        assert_eq!(keys[2], ReviewKey::number(-3));
        assert_ne!(keys[0], ReviewKey::number(1));
    }

    #[test]
    fn describe_quotes_text_only() {
        assert_eq!(describe(Some(&ReviewKey::text("A"))), "\"A\"");
        assert_eq!(describe(Some(&ReviewKey::number(3))), "3");
        assert_eq!(describe(None), "null");
    }
}
