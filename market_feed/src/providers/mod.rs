//! Provider abstraction for daily price sources.
//!
//! [`DailyPriceProvider`] is the single seam between the ingestion engine
//! and any market-data vendor. Concrete adapters
//! ([`alpha_daily::AlphaDailyProvider`], [`chart_history::ChartHistoryProvider`])
//! translate vendor wire formats into [`DailySeries`] and classify vendor
//! failures into [`ProviderError`].
//!
//! The trait supports dynamic dispatch (`dyn DailyPriceProvider`) so the
//! engine can be handed either adapter at runtime.

pub mod alpha_daily;
pub mod chart_history;
pub mod errors;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::models::{
    request::{DateSpan, OutputSize, SeriesRequest},
    series::DailySeries,
};

pub use errors::{ProviderError, ProviderInitError};

#[async_trait]
pub trait DailyPriceProvider: Send + Sync {
    /// Fetches the daily series for one symbol.
    ///
    /// Adapters must return a typed error instead of an empty series: the
    /// caller's failure handling branches on the error kind.
    async fn fetch_daily(&self, request: &SeriesRequest) -> Result<DailySeries, ProviderError>;

    /// Fetches daily series for several symbols over one span.
    ///
    /// The default implementation issues one `fetch_daily` per symbol and
    /// fails the whole batch on the first error. Adapters with a cheaper
    /// multi-symbol path may override this.
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
            let series = self.fetch_daily(&request).await?;
            out.insert(symbol.clone(), series);
        }
        Ok(out)
    }
}
