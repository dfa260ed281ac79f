//! Fallback historical-data adapter.
//!
//! Used for dates the primary endpoint could not serve. Queries a
//! chart-style historical endpoint over an explicit date span and returns
//! an indexed series; an empty result is reported as
//! [`ProviderError::NoData`](crate::providers::ProviderError::NoData),
//! which callers treat differently from a transport failure.

mod provider;
mod response;

pub use provider::ChartHistoryProvider;
