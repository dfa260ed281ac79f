//! Parameters for a daily-series fetch.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A span covering a single trade date.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Widens the span by `days` on each side.
    ///
    /// Historical endpoints commonly treat one bound as exclusive; padding
    /// both sides avoids boundary exclusion bugs.
    pub fn padded(self, days: i64) -> Self {
        Self {
            start: self.start - Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }
}

/// How much history a time-series endpoint should return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSize {
    /// Roughly the last 100 trading days.
    #[default]
    Compact,
    /// The full available history.
    Full,
}

impl OutputSize {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// A single-symbol fetch request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesRequest {
    /// Uppercase ticker.
    pub symbol: String,
    /// The dates the caller actually needs covered.
    pub span: DateSpan,
    pub output_size: OutputSize,
}
