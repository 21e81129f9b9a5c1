use crate::relevance::Relevance;
use crate::types::BillRecord;

/// Status marker that identifies enacted bills
pub const DEFAULT_PASSED_MARKER: &str = "passed";

/// Filter result indicating whether a bill enters the analysis population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Keep,
    FilterOut,
}

impl FilterResult {
    pub fn is_keep(self) -> bool {
        self == FilterResult::Keep
    }
}

/// Filter trait for selecting bills after relevance scoring
pub trait BillFilter {
    fn should_keep(&self, record: &BillRecord, relevance: &Relevance) -> FilterResult;
}

/// The analysis population: relevant bills whose status marks them as passed
#[derive(Debug, Clone)]
pub struct PopulationFilter {
    passed_marker: String,
}

impl PopulationFilter {
    pub fn new(passed_marker: impl Into<String>) -> Self {
        Self {
            passed_marker: passed_marker.into(),
        }
    }

    pub fn passed_marker(&self) -> &str {
        &self.passed_marker
    }

    pub fn is_passed(&self, record: &BillRecord) -> bool {
        record.status_matches(&self.passed_marker)
    }
}

impl Default for PopulationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PASSED_MARKER)
    }
}

impl BillFilter for PopulationFilter {
    fn should_keep(&self, record: &BillRecord, relevance: &Relevance) -> FilterResult {
        if relevance.is_relevant && self.is_passed(record) {
            FilterResult::Keep
        } else {
            FilterResult::FilterOut
        }
    }
}

/// Bills whose status contains any of several markers.
///
/// Federal trackers report enactment as "Enacted" or "Became Law" rather than
/// "Passed".
#[derive(Debug, Clone)]
pub struct AnyStatusFilter {
    markers: Vec<String>,
}

impl AnyStatusFilter {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(|m| m.into().to_lowercase()).collect(),
        }
    }

    /// Enacted, passed, or became law
    pub fn federal() -> Self {
        Self::new(["enacted", "passed", "became law"])
    }
}

impl BillFilter for AnyStatusFilter {
    fn should_keep(&self, record: &BillRecord, relevance: &Relevance) -> FilterResult {
        if relevance.is_relevant && self.markers.iter().any(|m| record.status_matches(m)) {
            FilterResult::Keep
        } else {
            FilterResult::FilterOut
        }
    }
}
