use secrecy::{ExposeSecret, SecretString};

use crate::models::request::SeriesRequest;

/// Builds the query string for one time-series request.
///
/// The endpoint has no date-range parameters; the window is controlled
/// solely by `outputsize` (compact ≈ last 100 trading days, full = entire
/// history).
pub fn construct_params(request: &SeriesRequest, api_key: &SecretString) -> Vec<(String, String)> {
    vec![
        ("function".to_string(), "TIME_SERIES_DAILY_ADJUSTED".to_string()),
        ("symbol".to_string(), request.symbol.clone()),
        ("outputsize".to_string(), request.output_size.as_str().to_string()),
        ("apikey".to_string(), api_key.expose_secret().to_string()),
    ]
}
