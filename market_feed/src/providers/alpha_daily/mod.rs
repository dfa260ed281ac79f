//! Primary daily time-series adapter.
//!
//! Talks to an Alpha-Vantage-style `TIME_SERIES_DAILY_ADJUSTED` endpoint:
//! one request per symbol returning the whole window, with vendor errors and
//! rate-limit notices reported inside a 200 payload. Everything specific to
//! that wire format lives in [`response`] and [`params`].

mod params;
mod response;
mod provider;

pub use provider::AlphaDailyProvider;
