//! Raw-bar validation and canonicalization.
//!
//! Converts one provider entry into a [`PriceRecord`]: required fields must
//! be present and numeric, prices are rounded to 4 decimals
//! (round-half-to-even; finer precision is not meaningful in this domain),
//! the volume becomes a non-negative integer, and absent corporate-action
//! fields default to no dividend and a 1.0 split.

use chrono::NaiveDate;
use market_feed::models::daily_bar::RawDailyBar;
use thiserror::Error;

use crate::models::PriceRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing price or volume: {0}")]
    MissingField(&'static str),

    #[error("non-numeric {field}: '{value}'")]
    NonNumeric {
        field: &'static str,
        value: String,
    },

    #[error("negative volume: {0}")]
    NegativeVolume(i64),
}

/// Rounds to 4 decimal places, ties to even.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

fn parse_numeric(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NonNumeric {
            field,
            value: value.to_string(),
        })
}

fn required(field: &'static str, value: Option<&str>) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    Ok(round4(parse_numeric(field, value)?))
}

fn defaulted(
    field: &'static str,
    value: Option<&str>,
    default: f64,
) -> Result<f64, ValidationError> {
    match value {
        None => Ok(default),
        Some(v) => Ok(round4(parse_numeric(field, v)?)),
    }
}

/// Builds the canonical record for one `(symbol, trade_date)` job.
pub fn normalize(
    symbol: &str,
    trade_date: NaiveDate,
    raw: &RawDailyBar,
) -> Result<PriceRecord, ValidationError> {
    let volume_raw = raw
        .volume
        .as_deref()
        .ok_or(ValidationError::MissingField("volume"))?;
    let volume = parse_numeric("volume", volume_raw)?.trunc() as i64;
    if volume < 0 {
        return Err(ValidationError::NegativeVolume(volume));
    }

    Ok(PriceRecord {
        symbol: symbol.to_string(),
        trade_date,
        open: required("open", raw.open.as_deref())?,
        high: required("high", raw.high.as_deref())?,
        low: required("low", raw.low.as_deref())?,
        close: required("close", raw.close.as_deref())?,
        adjusted_close: required("adjusted_close", raw.adjusted_close.as_deref())?,
        volume,
        dividend_amount: defaulted("dividend_amount", raw.dividend_amount.as_deref(), 0.0)?,
        split_coefficient: defaulted("split_coefficient", raw.split_coefficient.as_deref(), 1.0)?,
    })
}
