//! A fetched daily series for one symbol.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::models::daily_bar::RawDailyBar;

/// The complete daily series a provider returned for one symbol.
///
/// Entries are keyed by trade date and preserve the provider's ordering.
/// Absence of a date is meaningful: the market may simply have been closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    /// Uppercase ticker this series belongs to.
    pub symbol: String,
    /// Raw bars keyed by trade date.
    pub entries: IndexMap<NaiveDate, RawDailyBar>,
}

impl DailySeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            entries: IndexMap::new(),
        }
    }

    /// Looks up the raw bar for a trade date, if the provider reported one.
    pub fn get(&self, date: NaiveDate) -> Option<&RawDailyBar> {
        self.entries.get(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
