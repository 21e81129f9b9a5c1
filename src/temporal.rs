//! Dataset-level descriptive statistics: row counts, date coverage, yearly
//! momentum and per-jurisdiction activity.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::filter::PopulationFilter;
use crate::stats::{mean, percentage};
use crate::types::ClassifiedBill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateRange {
    fn extend(range: Option<Self>, date: NaiveDate) -> Option<Self> {
        Some(match range {
            None => DateRange {
                earliest: date,
                latest: date,
            },
            Some(r) => DateRange {
                earliest: r.earliest.min(date),
                latest: r.latest.max(date),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_rows: usize,
    pub skipped_rows: usize,
    /// Passed bills regardless of relevance
    pub passed_rows: usize,
    pub relevant_rows: usize,
    pub population_size: usize,
    /// Mean score of relevant bills
    pub mean_relevance_score: f64,
    /// Intro and status dates of the analysis population
    pub date_range: Option<DateRange>,
}

impl DatasetOverview {
    pub fn compute(bills: &[ClassifiedBill], skipped_rows: usize, filter: &PopulationFilter) -> Self {
        let relevant_scores: Vec<f64> = bills
            .iter()
            .filter(|b| b.relevance.is_relevant)
            .map(|b| f64::from(b.relevance.relevance_score))
            .collect();

        let date_range = bills
            .iter()
            .filter(|b| b.in_population)
            .flat_map(|b| [b.record.intro_date, b.record.status_date])
            .flatten()
            .fold(None, DateRange::extend);

        Self {
            total_rows: bills.len(),
            skipped_rows,
            passed_rows: bills.iter().filter(|b| filter.is_passed(&b.record)).count(),
            relevant_rows: relevant_scores.len(),
            population_size: bills.iter().filter(|b| b.in_population).count(),
            mean_relevance_score: mean(&relevant_scores),
            date_range,
        }
    }
}

/// Bill counts keyed by calendar year, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearlyMomentum {
    /// Analysis-population bills by status-date year
    pub enacted: BTreeMap<i32, usize>,
    /// Relevant bills by intro-date year
    pub introduced: BTreeMap<i32, usize>,
}

impl YearlyMomentum {
    pub fn compute(bills: &[ClassifiedBill]) -> Self {
        let mut momentum = YearlyMomentum::default();
        for bill in bills {
            if bill.in_population {
                if let Some(date) = bill.record.status_date {
                    *momentum.enacted.entry(date.year()).or_insert(0) += 1;
                }
            }
            if bill.relevance.is_relevant {
                if let Some(date) = bill.record.intro_date {
                    *momentum.introduced.entry(date.year()).or_insert(0) += 1;
                }
            }
        }
        momentum
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionActivity {
    pub code: String,
    pub relevant_bills: usize,
    pub passed_bills: usize,
    pub pass_rate: f64,
}

/// Relevant and passed bill counts per jurisdiction, most passed first
pub fn jurisdiction_activity(bills: &[ClassifiedBill]) -> Vec<JurisdictionActivity> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for bill in bills.iter().filter(|b| b.relevance.is_relevant) {
        let entry = counts.entry(bill.record.state.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if bill.in_population {
            entry.1 += 1;
        }
    }

    let mut activity: Vec<JurisdictionActivity> = counts
        .into_iter()
        .map(|(code, (relevant, passed))| JurisdictionActivity {
            code: code.to_string(),
            relevant_bills: relevant,
            passed_bills: passed,
            pass_rate: percentage(passed, relevant),
        })
        .collect();
    // BTreeMap order already has codes ascending; the sort is stable
    activity.sort_by(|a, b| b.passed_bills.cmp(&a.passed_bills));
    activity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relevance::{Relevance, ScoreBreakdown};
    use crate::types::BillRecord;

    fn classified(state: &str, score: u32, status: &str, intro: &str, status_date: &str) -> ClassifiedBill {
        let record = BillRecord::new(state, "Bill", "", "", status).with_dates(intro, status_date);
        let relevance = Relevance::from_breakdown(
            ScoreBreakdown {
                name: score,
                ..Default::default()
            },
            3,
        );
        let in_population = relevance.is_relevant && record.status_matches("passed");
        ClassifiedBill {
            record,
            relevance,
            in_population,
            provisions: in_population.then(Default::default),
        }
    }

    fn sample() -> Vec<ClassifiedBill> {
        vec![
            classified("UT", 5, "Passed", "10/01/2023", "21/03/2023"),
            classified("UT", 3, "Introduced", "02/02/2024", ""),
            classified("GA", 7, "Passed", "15/01/2024", "05/04/2024"),
            classified("GA", 1, "Passed", "15/01/2022", "05/04/2022"),
            classified("AZ", 4, "Failed", "", ""),
        ]
    }

    #[test]
    fn test_overview_counts() {
        let overview = DatasetOverview::compute(&sample(), 2, &PopulationFilter::default());
        assert_eq!(overview.total_rows, 5);
        assert_eq!(overview.skipped_rows, 2);
        assert_eq!(overview.passed_rows, 3);
        assert_eq!(overview.relevant_rows, 4);
        assert_eq!(overview.population_size, 2);
        assert_eq!(overview.mean_relevance_score, 4.75);
        assert_eq!(
            overview.date_range,
            Some(DateRange {
                earliest: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
                latest: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
            })
        );
    }

    #[test]
    fn test_empty_overview() {
        let overview = DatasetOverview::compute(&[], 0, &PopulationFilter::default());
        assert_eq!(overview.mean_relevance_score, 0.0);
        assert_eq!(overview.date_range, None);
    }

    #[test]
    fn test_yearly_momentum_skips_missing_dates() {
        let momentum = YearlyMomentum::compute(&sample());
        assert_eq!(momentum.enacted, BTreeMap::from([(2023, 1), (2024, 1)]));
        assert_eq!(momentum.introduced, BTreeMap::from([(2023, 1), (2024, 2)]));
    }

    #[test]
    fn test_jurisdiction_activity_ordering() {
        let activity = jurisdiction_activity(&sample());
        let codes: Vec<&str> = activity.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["GA", "UT", "AZ"]);
        assert_eq!(activity[1].relevant_bills, 2);
        assert_eq!(activity[1].pass_rate, 50.0);
        assert_eq!(activity[2].pass_rate, 0.0);
    }
}
