//! Serde helpers that coerce wire values to numbers.
//!
//! Client payloads carry fees, amounts, and rating points either as JSON
//! numbers or as numeric strings ("4"); both are persisted as `f64`.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientF64)
}

pub(crate) fn lenient_f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(MaybeLenientF64)
}

struct LenientF64;

impl Visitor<'_> for LenientF64 {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        value
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid numeric value '{value}'")))
    }
}

struct MaybeLenientF64;

impl<'de> Visitor<'de> for MaybeLenientF64 {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number, a numeric string, or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        lenient_f64(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "super::lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "super::lenient_f64_opt")]
        rating: Option<f64>,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let priced: Priced = serde_json::from_str(r#"{"amount": 50, "rating": "4"}"#).expect("json");
        assert_eq!(priced.amount, 50.0);
        assert_eq!(priced.rating, Some(4.0));
    }

    #[test]
    fn missing_optional_stays_none() {
        let priced: Priced = serde_json::from_str(r#"{"amount": "12.5"}"#).expect("json");
        assert_eq!(priced.amount, 12.5);
        assert_eq!(priced.rating, None);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let result: Result<Priced, _> = serde_json::from_str(r#"{"amount": "fifty"}"#);
        assert!(result.is_err());
    }
}
