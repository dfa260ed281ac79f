//! Daily equity price feeds.
//!
//! This crate owns everything that talks to an external market-data vendor:
//! the [`providers::DailyPriceProvider`] trait, its concrete adapters, and
//! the raw per-date models they return. Vendor payload shapes (numbered
//! string keys, chart arrays) stay inside the adapter modules; callers only
//! ever see [`models::series::DailySeries`] keyed by trade date.

pub mod models;
pub mod providers;
