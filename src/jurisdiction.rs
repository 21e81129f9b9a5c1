//! Per-jurisdiction provision coverage and the spread of coverage across
//! jurisdictions.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::stats::{mean, percentage, population_std_dev};
use crate::taxonomy::{Provision, ProvisionSet};
use crate::types::{BillRecord, ClassifiedBill};

/// Bill names kept per provision as examples
pub const EXAMPLES_PER_PROVISION: usize = 3;

/// Protection tier derived from a jurisdiction score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    /// Low 0-3, Medium 4-5, High 6-8
    pub fn from_score(score: usize) -> Self {
        match score {
            0..=3 => Tier::Low,
            4..=5 => Tier::Medium,
            _ => Tier::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "Low (0-3)",
            Tier::Medium => "Medium (4-5)",
            Tier::High => "High (6-8)",
        }
    }
}

/// One state or federal entity with its in-population bills.
#[derive(Debug, Clone, PartialEq)]
pub struct Jurisdiction {
    code: String,
    bills: Vec<BillRecord>,
    provision_set: ProvisionSet,
    examples: BTreeMap<Provision, Vec<String>>,
}

impl Jurisdiction {
    fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            bills: Vec::new(),
            provision_set: ProvisionSet::new(),
            examples: BTreeMap::new(),
        }
    }

    fn add_bill(&mut self, record: &BillRecord, provisions: &ProvisionSet) {
        for &provision in provisions {
            self.provision_set.insert(provision);
            let names = self.examples.entry(provision).or_default();
            if names.len() < EXAMPLES_PER_PROVISION {
                names.push(record.name.clone());
            }
        }
        self.bills.push(record.clone());
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn bills(&self) -> &[BillRecord] {
        &self.bills
    }

    pub fn provision_set(&self) -> &ProvisionSet {
        &self.provision_set
    }

    /// Number of distinct provisions, always derived from the set
    pub fn score(&self) -> usize {
        self.provision_set.len()
    }

    pub fn tier(&self) -> Tier {
        Tier::from_score(self.score())
    }

    pub fn has(&self, provision: Provision) -> bool {
        self.provision_set.contains(&provision)
    }

    /// Up to three bill names that triggered each provision, in input order
    pub fn examples(&self) -> &BTreeMap<Provision, Vec<String>> {
        &self.examples
    }
}

impl Serialize for Jurisdiction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Jurisdiction", 6)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("score", &self.score())?;
        state.serialize_field("tier", &self.tier())?;
        state.serialize_field("bill_count", &self.bills.len())?;
        state.serialize_field("provision_set", &self.provision_set)?;
        state.serialize_field("examples", &self.examples)?;
        state.end()
    }
}

/// Groups in-population bills by jurisdiction
#[derive(Debug, Clone, Copy, Default)]
pub struct JurisdictionScorer;

impl JurisdictionScorer {
    /// Build jurisdictions from classified bills, sorted by code.
    ///
    /// Bills without provisions (outside the analysis population) are ignored,
    /// so a jurisdiction exists only if it has at least one in-population bill.
    pub fn score<'a, I>(&self, bills: I) -> Vec<Jurisdiction>
    where
        I: IntoIterator<Item = &'a ClassifiedBill>,
    {
        let mut grouped: BTreeMap<String, Jurisdiction> = BTreeMap::new();

        for bill in bills {
            let Some(provisions) = bill.provisions_present() else {
                continue;
            };
            grouped
                .entry(bill.record.state.clone())
                .or_insert_with(|| Jurisdiction::new(bill.record.state.clone()))
                .add_bill(&bill.record, provisions);
        }

        grouped.into_values().collect()
    }
}

/// Jurisdictions falling into one tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierShare {
    pub tier: Tier,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Position of a jurisdiction in the score ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedJurisdiction {
    pub rank: usize,
    pub code: String,
    pub score: usize,
    pub tier: Tier,
}

/// Cross-jurisdiction spread of provision coverage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InequityStats {
    pub jurisdictions_analyzed: usize,
    pub mean_score: f64,
    /// Population standard deviation of scores
    pub inequity_index: f64,
    /// `inequity_index / mean_score`, 0 when the mean is 0
    pub coefficient_of_variation: f64,
    pub min_score: usize,
    pub max_score: usize,
    pub tiers: Vec<TierShare>,
    pub ranking: Vec<RankedJurisdiction>,
}

impl InequityStats {
    pub fn compute(jurisdictions: &[Jurisdiction]) -> Self {
        let total = jurisdictions.len();
        let scores: Vec<f64> = jurisdictions.iter().map(|j| j.score() as f64).collect();
        let mean_score = mean(&scores);
        let inequity_index = population_std_dev(&scores);
        let coefficient_of_variation = if mean_score > 0.0 {
            inequity_index / mean_score
        } else {
            0.0
        };

        let tiers = Tier::ALL
            .iter()
            .map(|&tier| {
                let count = jurisdictions.iter().filter(|j| j.tier() == tier).count();
                TierShare {
                    tier,
                    label: tier.label(),
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();

        let mut ordered: Vec<&Jurisdiction> = jurisdictions.iter().collect();
        ordered.sort_by(|a, b| b.score().cmp(&a.score()).then_with(|| a.code().cmp(b.code())));
        let ranking = ordered
            .into_iter()
            .enumerate()
            .map(|(idx, j)| RankedJurisdiction {
                rank: idx + 1,
                code: j.code().to_string(),
                score: j.score(),
                tier: j.tier(),
            })
            .collect();

        Self {
            jurisdictions_analyzed: total,
            mean_score,
            inequity_index,
            coefficient_of_variation,
            min_score: jurisdictions.iter().map(Jurisdiction::score).min().unwrap_or(0),
            max_score: jurisdictions.iter().map(Jurisdiction::score).max().unwrap_or(0),
            tiers,
            ranking,
        }
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tiers
            .iter()
            .find(|share| share.tier == tier)
            .map(|share| share.count)
            .unwrap_or(0)
    }
}
