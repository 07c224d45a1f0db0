//! Per-distributor ledger of titles with no copied image.

use serde::Serialize;

/// Bucket for entries whose distributor cell is blank
pub const UNDEFINED_DISTRIBUTOR: &str = "UNDEFINED DISTRIBUTOR";

/// Label for entries whose title cell is blank
pub const UNDEFINED_TITLE: &str = "Undefined title";

/// Unmatched titles grouped by distributor.
///
/// Distributors keep the order in which they were first recorded, so the
/// report lists them in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnmatchedTitles {
    buckets: Vec<(String, Vec<String>)>,
}

impl UnmatchedTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, distributor: &str, title: &str) {
        match self.buckets.iter_mut().find(|(d, _)| d == distributor) {
            Some((_, titles)) => titles.push(title.to_string()),
            None => self
                .buckets
                .push((distributor.to_string(), vec![title.to_string()])),
        }
    }

    /// Number of titles across all distributors
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, titles)| titles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn titles_for(&self, distributor: &str) -> &[String] {
        self.buckets
            .iter()
            .find(|(d, _)| d == distributor)
            .map(|(_, titles)| titles.as_slice())
            .unwrap_or(&[])
    }

    /// (distributor, titles) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .map(|(d, titles)| (d.as_str(), titles.as_slice()))
    }
}
