//! Raw per-date fields as reported by a provider.
//!
//! Every field is optional and string-encoded: providers differ in which
//! fields they supply, and numeric coercion is a validation concern that
//! belongs downstream, not in the transport layer. This struct is the only
//! shape that crosses the provider boundary.

/// One unvalidated daily bar for a single trade date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDailyBar {
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    /// Close adjusted for dividends and splits.
    pub adjusted_close: Option<String>,
    pub volume: Option<String>,
    /// Cash dividend paid on this date, if the provider reports one.
    pub dividend_amount: Option<String>,
    /// Split ratio effective on this date, if the provider reports one.
    pub split_coefficient: Option<String>,
}
