use thiserror::Error;

/// Errors that can occur inside a [`DailyPriceProvider`](super::DailyPriceProvider).
///
/// The variants are deliberately coarse but disjoint: the ingestion engine
/// tags failed jobs with the variant, so "their API is down" stays
/// distinguishable from "we got throttled" and from "the market was closed".
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure, timeout, or a non-2xx HTTP status.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose payload carries a vendor-side error message.
    #[error("{0}")]
    Api(String),

    /// A 200 response carrying the vendor's rate-limit notice.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The fetch succeeded but returned no usable series for the symbol.
    #[error("no data returned for {0}")]
    NoData(String),
}

/// Errors while constructing a provider (credentials, HTTP client).
#[derive(Debug, Error)]
pub enum ProviderInitError {
    #[error("missing environment variable: {0}")]
    MissingCredential(String),

    #[error("invalid credential header")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
