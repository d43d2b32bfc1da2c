use std::str::FromStr;

use cosmwasm_std::Decimal256;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::WeightError;

/// Fractional digits kept by `Decimal256`. Anything finer is truncated.
const DECIMAL_PLACES: u32 = Decimal256::DECIMAL_PLACES;

/// Parse a non-negative decimal number as written in a snapshot export.
///
/// Accepts plain decimals (`"1234.5"`) and exponent notation (`"1.5e-7"`).
/// Digits beyond 18 decimal places are truncated toward zero; a non-zero
/// value that would truncate to zero is rejected. `-0` is accepted as zero.
pub fn parse_weight(raw: &str) -> Result<Decimal256, WeightError> {
    let text = raw.trim();
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str(text)
    }
    .map_err(|err| match err {
        rust_decimal::Error::ErrorString(_) => malformed(raw),
        _ => out_of_range(raw),
    })?;

    if parsed.is_zero() {
        return Ok(Decimal256::zero());
    }
    if parsed.is_sign_negative() {
        return Err(WeightError::Negative {
            raw: raw.to_string(),
        });
    }

    let truncated = parsed.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::ToZero);
    if truncated.is_zero() {
        return Err(WeightError::Underflow {
            raw: raw.to_string(),
        });
    }
    Decimal256::from_atomics(truncated.mantissa().unsigned_abs(), truncated.scale())
        .map_err(|_| out_of_range(raw))
}

/// Parse a JSON value holding a weight. Numbers keep their source text
/// (`serde_json` is built with `arbitrary_precision`), numeric strings are
/// accepted as well.
pub fn weight_from_value(value: &Value) -> Result<Decimal256, WeightError> {
    match value {
        Value::Number(number) => parse_weight(&number.to_string()),
        Value::String(text) => parse_weight(text),
        other => Err(WeightError::NotNumeric {
            raw: other.to_string(),
        }),
    }
}

/// `deserialize_with` helper for a `choice` mapping of id -> amount.
pub fn deserialize_choices<'de, D>(deserializer: D) -> Result<IndexMap<String, Decimal256>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(choice, amount)| {
            weight_from_value(&amount)
                .map(|amount| (choice.clone(), amount))
                .map_err(|err| serde::de::Error::custom(format!("choice {choice}: {err}")))
        })
        .collect()
}

fn malformed(raw: &str) -> WeightError {
    WeightError::Malformed {
        raw: raw.to_string(),
    }
}

fn out_of_range(raw: &str) -> WeightError {
    WeightError::OutOfRange {
        raw: raw.to_string(),
    }
}
