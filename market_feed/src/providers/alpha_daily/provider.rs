use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use reqwest::Client;
use secrecy::SecretString;

use crate::{
    models::{daily_bar::RawDailyBar, request::SeriesRequest, series::DailySeries},
    providers::{
        DailyPriceProvider, ProviderError, ProviderInitError,
        alpha_daily::{
            params::construct_params,
            response::{AlphaDailyEntry, AlphaDailyResponse},
        },
    },
};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AlphaDailyProvider {
    client: Client,
    api_key: SecretString,
}

impl AlphaDailyProvider {
    /// Creates the primary daily-series provider.
    ///
    /// The API key is held as a [`SecretString`] so it never shows up in
    /// debug output or logs.
    pub fn new(api_key: SecretString) -> Result<Self, ProviderInitError> {
        let client = Client::builder().timeout(TRANSPORT_TIMEOUT).build()?;
        Ok(Self { client, api_key })
    }
}

fn to_raw_bar(entry: AlphaDailyEntry) -> RawDailyBar {
    RawDailyBar {
        open: entry.open,
        high: entry.high,
        low: entry.low,
        close: entry.close,
        adjusted_close: entry.adjusted_close,
        volume: entry.volume,
        dividend_amount: entry.dividend_amount,
        split_coefficient: entry.split_coefficient,
    }
}

#[async_trait]
impl DailyPriceProvider for AlphaDailyProvider {
    async fn fetch_daily(&self, request: &SeriesRequest) -> Result<DailySeries, ProviderError> {
        let query = construct_params(request, &self.api_key);
        let response = self
            .client
            .get(BASE_URL)
            .query(&query)
            .send()
            .await?
            // Non-2xx statuses are transport failures, distinct from
            // payload-level vendor errors below.
            .error_for_status()?;

        let payload = response.json::<AlphaDailyResponse>().await?;

        if let Some(message) = payload.error_message {
            return Err(ProviderError::Api(message));
        }
        if let Some(note) = payload.note {
            return Err(ProviderError::RateLimited(note));
        }
        let Some(raw_series) = payload.series else {
            return Err(ProviderError::Api(
                "missing 'Time Series (Daily)' in response".to_string(),
            ));
        };

        let mut entries = IndexMap::with_capacity(raw_series.len());
        for (date, entry) in raw_series {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| ProviderError::Api(format!("unparseable trade date '{date}': {e}")))?;
            entries.insert(date, to_raw_bar(entry));
        }

        Ok(DailySeries {
            symbol: request.symbol.clone(),
            entries,
        })
    }
}
