//! Wire format of the daily time-series endpoint.
//!
//! The vendor keys every field with a numbered prefix (`"1. open"`) and
//! reports errors and throttling notices inside a 200 payload. None of
//! these shapes may leak past the adapter.

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct AlphaDailyEntry {
    #[serde(rename = "1. open")]
    pub open: Option<String>,
    #[serde(rename = "2. high")]
    pub high: Option<String>,
    #[serde(rename = "3. low")]
    pub low: Option<String>,
    #[serde(rename = "4. close")]
    pub close: Option<String>,
    #[serde(rename = "5. adjusted close")]
    pub adjusted_close: Option<String>,
    #[serde(rename = "6. volume")]
    pub volume: Option<String>,
    #[serde(rename = "7. dividend amount")]
    pub dividend_amount: Option<String>,
    #[serde(rename = "8. split coefficient")]
    pub split_coefficient: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AlphaDailyResponse {
    /// Present when the request itself was bad (unknown symbol, bad key).
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,

    /// Present when the vendor throttled the call. Still HTTP 200.
    #[serde(rename = "Note")]
    pub note: Option<String>,

    /// Date-keyed series, newest first. Keys are `YYYY-MM-DD`.
    #[serde(rename = "Time Series (Daily)")]
    pub series: Option<IndexMap<String, AlphaDailyEntry>>,
}
