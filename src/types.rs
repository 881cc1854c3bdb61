//! Shared input types and coercions used by request payloads

use serde::{de, Deserialize, Deserializer};
use std::cmp::Ordering;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// Accepts `"12"` or `12` and stores the textual form.
///
/// Rolls and class identifiers arrive from form-driven frontends as either
/// JSON strings or numbers.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s.trim().to_string()),
        StringOrNumber::Int(n) => Ok(n.to_string()),
        StringOrNumber::Float(f) if f.fract() == 0.0 => Ok((f as i64).to_string()),
        StringOrNumber::Float(f) => Err(de::Error::custom(format!(
            "expected a whole number or string, got {}",
            f
        ))),
    }
}

pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(s)| s))
}

/// Accepts `2024` or `"2024"`.
pub fn optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_string_or_number(deserializer)? {
        Some(raw) => parse_year(&raw).map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

pub fn parse_year(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid year: {}", raw))
}

/// Orders roll numbers numerically when both sides are numeric, textually otherwise.
pub fn compare_rolls(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(deserialize_with = "string_or_number")]
        roll: String,
        #[serde(default, deserialize_with = "optional_year")]
        year: Option<i32>,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Payload = serde_json::from_value(json!({ "roll": 7, "year": "2024" })).unwrap();
        assert_eq!(p.roll, "7");
        assert_eq!(p.year, Some(2024));

        let p: Payload = serde_json::from_value(json!({ "roll": " 12 ", "year": 2025 })).unwrap();
        assert_eq!(p.roll, "12");
        assert_eq!(p.year, Some(2025));

        let p: Payload = serde_json::from_value(json!({ "roll": "3" })).unwrap();
        assert_eq!(p.year, None);
    }

    #[test]
    fn rejects_non_numeric_year() {
        let err = serde_json::from_value::<Payload>(json!({ "roll": "1", "year": "next" }));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_fractional_roll() {
        let err = serde_json::from_value::<Payload>(json!({ "roll": 1.5, "year": 2024 }));
        assert!(err.is_err());
    }

    #[test]
    fn roll_ordering_is_numeric_when_possible() {
        assert_eq!(compare_rolls("2", "10"), Ordering::Less);
        assert_eq!(compare_rolls("10", "10"), Ordering::Equal);
        assert_eq!(compare_rolls("A2", "A10"), Ordering::Greater);
    }
}
