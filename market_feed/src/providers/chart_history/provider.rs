use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use indexmap::IndexMap;
use reqwest::Client;

use crate::{
    models::{
        daily_bar::RawDailyBar,
        request::{DateSpan, OutputSize, SeriesRequest},
        series::DailySeries,
    },
    providers::{
        DailyPriceProvider, ProviderError, ProviderInitError,
        chart_history::response::ChartResponse,
    },
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// One calendar day of padding on each side of the requested span, so an
/// exclusive bound on the vendor side cannot drop the first or last date.
const SPAN_PAD_DAYS: i64 = 1;

pub struct ChartHistoryProvider {
    client: Client,
}

impl ChartHistoryProvider {
    /// Creates the fallback historical provider. No credentials required.
    pub fn new() -> Result<Self, ProviderInitError> {
        let client = Client::builder().timeout(TRANSPORT_TIMEOUT).build()?;
        Ok(Self { client })
    }

    fn series_from_payload(
        symbol: &str,
        payload: ChartResponse,
    ) -> Result<DailySeries, ProviderError> {
        if let Some(error) = payload.chart.error {
            return Err(ProviderError::Api(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        let result = payload
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;

        let timestamps = match result.timestamp {
            Some(ts) if !ts.is_empty() => ts,
            _ => return Err(ProviderError::NoData(symbol.to_string())),
        };

        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = result
            .indicators
            .adjclose
            .and_then(|mut blocks| {
                if blocks.is_empty() {
                    None
                } else {
                    Some(blocks.remove(0).adjclose)
                }
            })
            .unwrap_or_default();

        let field = |column: &[Option<f64>], i: usize| -> Option<String> {
            column.get(i).copied().flatten().map(|v| v.to_string())
        };

        let mut entries = IndexMap::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let Some(date) = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()) else {
                continue;
            };
            entries.insert(
                date,
                RawDailyBar {
                    open: field(&quote.open, i),
                    high: field(&quote.high, i),
                    low: field(&quote.low, i),
                    close: field(&quote.close, i),
                    adjusted_close: field(&adjclose, i),
                    volume: field(&quote.volume, i),
                    // This endpoint carries no corporate actions; the
                    // normalizer applies the 0.0 / 1.0 defaults.
                    dividend_amount: None,
                    split_coefficient: None,
                },
            );
        }

        if entries.is_empty() {
            return Err(ProviderError::NoData(symbol.to_string()));
        }

        Ok(DailySeries {
            symbol: symbol.to_string(),
            entries,
        })
    }
}

#[async_trait]
impl DailyPriceProvider for ChartHistoryProvider {
    async fn fetch_daily(&self, request: &SeriesRequest) -> Result<DailySeries, ProviderError> {
        let span = request.span.padded(SPAN_PAD_DAYS);
        let period1 = span.start.and_hms_opt(0, 0, 0).map(|t| t.and_utc().timestamp());
        let period2 = span.end.and_hms_opt(23, 59, 59).map(|t| t.and_utc().timestamp());

        let url = format!("{BASE_URL}/{}", request.symbol);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.unwrap_or_default().to_string()),
                ("period2", period2.unwrap_or_default().to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload = response.json::<ChartResponse>().await?;
        Self::series_from_payload(&request.symbol, payload)
    }

    /// Batch fetch used by the batched run mode.
    ///
    /// A symbol with no data is simply absent from the result, so the rest
    /// of the batch still lands; transport and vendor failures propagate to
    /// drive the caller's batch retry.
    async fn fetch_daily_batch(
        &self,
        symbols: &[String],
        span: DateSpan,
    ) -> Result<IndexMap<String, DailySeries>, ProviderError> {
        let mut out = IndexMap::with_capacity(symbols.len());
        for symbol in symbols {
            let request = SeriesRequest {
                symbol: symbol.clone(),
                span,
                output_size: OutputSize::Compact,
            };
            match self.fetch_daily(&request).await {
                Ok(series) => {
                    out.insert(symbol.clone(), series);
                }
                Err(ProviderError::NoData(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(body: &str) -> ChartResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn empty_result_is_no_data_not_empty_series() {
        let parsed = payload(r#"{"chart": {"result": [], "error": null}}"#);
        let err = ChartHistoryProvider::series_from_payload("XYZ", parsed).unwrap_err();
        assert!(matches!(err, ProviderError::NoData(ref s) if s == "XYZ"));
    }

    #[test]
    fn vendor_error_beats_missing_result() {
        let parsed = payload(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "delisted"}}}"#,
        );
        let err = ChartHistoryProvider::series_from_payload("XYZ", parsed).unwrap_err();
        assert!(matches!(err, ProviderError::Api(_)));
    }

    #[test]
    fn columnar_payload_becomes_date_keyed_series() {
        let parsed = payload(
            r#"{
            "chart": {
                "result": [{
                    "timestamp": [1750636800],
                    "indicators": {
                        "quote": [{
                            "open": [150.0], "high": [151.2], "low": [149.8],
                            "close": [150.1234], "volume": [1000000.0]
                        }],
                        "adjclose": [{"adjclose": [150.1234]}]
                    }
                }],
                "error": null
            }
        }"#,
        );
        let series = ChartHistoryProvider::series_from_payload("AAPL", parsed).unwrap();
        assert_eq!(series.len(), 1);
        let (date, bar) = series.entries.first().unwrap();
        assert_eq!(date.to_string(), "2025-06-23");
        assert_eq!(bar.close.as_deref(), Some("150.1234"));
        assert!(bar.dividend_amount.is_none());
    }

    #[test]
    fn null_cells_stay_absent() {
        let parsed = payload(
            r#"{
            "chart": {
                "result": [{
                    "timestamp": [1750636800],
                    "indicators": {
                        "quote": [{
                            "open": [null], "high": [null], "low": [null],
                            "close": [null], "volume": [null]
                        }]
                    }
                }],
                "error": null
            }
        }"#,
        );
        let series = ChartHistoryProvider::series_from_payload("AAPL", parsed).unwrap();
        let (_, bar) = series.entries.first().unwrap();
        assert!(bar.close.is_none());
        assert!(bar.adjusted_close.is_none());
    }
}
