use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::relevance::Relevance;
use crate::taxonomy::ProvisionSet;

/// Jurisdiction code used for rows with an empty `State` field
pub const UNKNOWN_JURISDICTION: &str = "Unknown";

/// One raw row from a legislative tracker export.
///
/// Every field is optional; absent columns and empty cells both end up as
/// `None` and are treated as empty text downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillRow {
    #[serde(rename = "State", default)]
    pub state: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Themes", default)]
    pub themes: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Intro Date", default)]
    pub intro_date: Option<String>,
    #[serde(rename = "status_date", default)]
    pub status_date: Option<String>,
}

/// A normalized bill. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillRecord {
    pub state: String,
    pub name: String,
    pub description: String,
    pub themes: String,
    pub status: String,
    pub intro_date: Option<NaiveDate>,
    pub status_date: Option<NaiveDate>,
}

/// Parse a day/month/year bill date, falling back to ISO dates.
///
/// Anything else (including empty input) is a missing date.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

impl From<BillRow> for BillRecord {
    fn from(row: BillRow) -> Self {
        let state = row.state.as_deref().unwrap_or("").trim().to_string();
        let state = if state.is_empty() {
            UNKNOWN_JURISDICTION.to_string()
        } else {
            state
        };

        Self {
            state,
            intro_date: row.intro_date.as_deref().and_then(parse_bill_date),
            status_date: row.status_date.as_deref().and_then(parse_bill_date),
            name: text(row.name),
            description: text(row.description),
            themes: text(row.themes),
            status: text(row.status),
        }
    }
}

impl BillRecord {
    /// Build a record from its text fields, without dates
    pub fn new(
        state: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        themes: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        BillRow {
            state: Some(state.into()),
            name: Some(name.into()),
            description: Some(description.into()),
            themes: Some(themes.into()),
            status: Some(status.into()),
            intro_date: None,
            status_date: None,
        }
        .into()
    }

    /// Attach dates given in tracker (day/month/year) form
    pub fn with_dates(mut self, intro_date: &str, status_date: &str) -> Self {
        self.intro_date = parse_bill_date(intro_date);
        self.status_date = parse_bill_date(status_date);
        self
    }

    /// Whether the status contains `marker`, case-insensitively
    pub fn status_matches(&self, marker: &str) -> bool {
        self.status.to_lowercase().contains(&marker.to_lowercase())
    }
}

/// A bill together with the fields derived by the classification pass.
///
/// `provisions` is `Some` exactly when the bill is in the analysis population
/// (relevant and passed); it is never computed for other bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedBill {
    #[serde(flatten)]
    pub record: BillRecord,
    #[serde(flatten)]
    pub relevance: Relevance,
    pub in_population: bool,
    #[serde(rename = "provisions_present", skip_serializing_if = "Option::is_none")]
    pub provisions: Option<ProvisionSet>,
}

impl ClassifiedBill {
    pub fn provisions_present(&self) -> Option<&ProvisionSet> {
        self.provisions.as_ref()
    }
}
