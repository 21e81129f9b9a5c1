//! How often enacted bills back up a topic with measurable detail.

use serde::Serialize;

use crate::types::BillRecord;

/// Topic with the phrases that mention it and the phrases that quantify it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceArea {
    pub name: &'static str,
    pub mentioned: &'static [&'static str],
    pub quantified: &'static [&'static str],
}

pub const EVIDENCE_AREAS: [EvidenceArea; 5] = [
    EvidenceArea {
        name: "Compliance Costs",
        mentioned: &["compliance cost", "implementation cost", "fiscal impact"],
        quantified: &["dollar", "$", "million", "thousand", "budget"],
    },
    EvidenceArea {
        name: "Effectiveness Metrics",
        mentioned: &["effectiveness", "impact", "outcome", "result"],
        quantified: &["percentage", "%", "reduction", "increase", "measure"],
    },
    EvidenceArea {
        name: "Platform Impact",
        mentioned: &["platform impact", "social media", "effect on"],
        quantified: &["user data", "engagement", "usage", "metric"],
    },
    EvidenceArea {
        name: "Mental Health Evidence",
        mentioned: &["mental health", "wellbeing", "addiction", "harm"],
        quantified: &["study", "research", "data", "evidence"],
    },
    EvidenceArea {
        name: "Privacy Protections",
        mentioned: &["privacy", "data protection", "personal data"],
        quantified: &["encryption", "anonymization", "deletion", "minimization"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GapPriority {
    Critical,
    Moderate,
    Adequate,
}

impl GapPriority {
    pub fn from_gap(gap_percentage: f64) -> Self {
        if gap_percentage > 70.0 {
            GapPriority::Critical
        } else if gap_percentage > 40.0 {
            GapPriority::Moderate
        } else {
            GapPriority::Adequate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceGap {
    pub area: &'static str,
    pub mentioned: usize,
    pub quantified: usize,
    pub gap_percentage: f64,
    pub priority: GapPriority,
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}

/// Evidence gaps over the given bills' descriptions, largest gap first.
///
/// A bill only counts as quantified for an area it also mentions. An area no
/// bill mentions has a 100% gap.
pub fn evidence_gaps<'a, I>(bills: I) -> Vec<EvidenceGap>
where
    I: IntoIterator<Item = &'a BillRecord>,
{
    let descriptions: Vec<String> = bills
        .into_iter()
        .map(|bill| bill.description.to_lowercase())
        .collect();

    let mut gaps: Vec<EvidenceGap> = EVIDENCE_AREAS
        .iter()
        .map(|area| {
            let mentioning: Vec<&String> = descriptions
                .iter()
                .filter(|d| contains_any(d, area.mentioned))
                .collect();
            let mentioned = mentioning.len();
            let quantified = mentioning
                .iter()
                .filter(|d| contains_any(d, area.quantified))
                .count();

            let gap_percentage = if mentioned == 0 {
                100.0
            } else {
                (mentioned - quantified) as f64 / mentioned as f64 * 100.0
            };

            EvidenceGap {
                area: area.name,
                mentioned,
                quantified,
                gap_percentage,
                priority: GapPriority::from_gap(gap_percentage),
            }
        })
        .collect();

    gaps.sort_by(|a, b| {
        b.gap_percentage
            .total_cmp(&a.gap_percentage)
            .then_with(|| a.area.cmp(b.area))
    });
    gaps
}
