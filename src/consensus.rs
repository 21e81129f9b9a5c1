//! Cross-jurisdiction adoption of each provision.
//!
//! Two consensus tierings are in use and callers pick one explicitly through
//! [`ConsensusScheme`]; a report records which one produced its tiers.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::jurisdiction::Jurisdiction;
use crate::stats::percentage;
use crate::taxonomy::Provision;

/// Consensus tier of one provision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsensusTier {
    #[serde(rename = "Divergent")]
    Divergent,
    #[serde(rename = "Low Consensus")]
    LowConsensus,
    #[serde(rename = "Moderate Adoption")]
    ModerateAdoption,
    #[serde(rename = "Moderate Consensus")]
    ModerateConsensus,
    #[serde(rename = "High Consensus")]
    HighConsensus,
    #[serde(rename = "Universal")]
    Universal,
}

impl ConsensusTier {
    pub fn label(self) -> &'static str {
        match self {
            ConsensusTier::Divergent => "Divergent",
            ConsensusTier::LowConsensus => "Low Consensus",
            ConsensusTier::ModerateAdoption => "Moderate Adoption",
            ConsensusTier::ModerateConsensus => "Moderate Consensus",
            ConsensusTier::HighConsensus => "High Consensus",
            ConsensusTier::Universal => "Universal",
        }
    }
}

impl fmt::Display for ConsensusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named tiering strategy for adoption percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsensusScheme {
    /// Inequity framing: Low <25%, Moderate 25-50%, High >=50%
    #[default]
    ThreeTier,
    /// Consensus spectrum: Divergent <25%, Moderate Adoption 25-50%,
    /// High Consensus 50-75%, Universal >=75%
    FourTier,
}

impl ConsensusScheme {
    pub fn name(self) -> &'static str {
        match self {
            ConsensusScheme::ThreeTier => "three-tier",
            ConsensusScheme::FourTier => "four-tier",
        }
    }

    pub fn classify(self, percentage: f64) -> ConsensusTier {
        match self {
            ConsensusScheme::ThreeTier => {
                if percentage >= 50.0 {
                    ConsensusTier::HighConsensus
                } else if percentage >= 25.0 {
                    ConsensusTier::ModerateConsensus
                } else {
                    ConsensusTier::LowConsensus
                }
            }
            ConsensusScheme::FourTier => {
                if percentage >= 75.0 {
                    ConsensusTier::Universal
                } else if percentage >= 50.0 {
                    ConsensusTier::HighConsensus
                } else if percentage >= 25.0 {
                    ConsensusTier::ModerateAdoption
                } else {
                    ConsensusTier::Divergent
                }
            }
        }
    }
}

impl FromStr for ConsensusScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "three-tier" | "3" => Ok(ConsensusScheme::ThreeTier),
            "four-tier" | "4" => Ok(ConsensusScheme::FourTier),
            other => Err(Error::Config(format!(
                "Invalid consensus scheme '{}'. Allowed values are: three-tier, four-tier",
                other
            ))),
        }
    }
}

/// Adoption of one provision across jurisdictions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionStat {
    pub provision_key: Provision,
    pub label: &'static str,
    pub jurisdiction_count: usize,
    pub percentage: f64,
    pub consensus_tier: ConsensusTier,
    /// Adopting jurisdiction codes, ascending
    pub jurisdictions: Vec<String>,
}

/// Adoption table for all eight provisions under one scheme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusTable {
    pub scheme: ConsensusScheme,
    pub total_jurisdictions: usize,
    /// Percentage descending, ties by provision key
    pub stats: Vec<ProvisionStat>,
}

fn ranked(a: &ProvisionStat, b: &ProvisionStat) -> Ordering {
    b.percentage
        .total_cmp(&a.percentage)
        .then_with(|| a.provision_key.key().cmp(b.provision_key.key()))
}

impl ConsensusTable {
    pub fn compute(jurisdictions: &[Jurisdiction], scheme: ConsensusScheme) -> Self {
        let total = jurisdictions.len();

        let mut stats: Vec<ProvisionStat> = Provision::ALL
            .iter()
            .map(|&provision| {
                let mut adopters: Vec<String> = jurisdictions
                    .iter()
                    .filter(|j| j.has(provision))
                    .map(|j| j.code().to_string())
                    .collect();
                adopters.sort();

                let pct = percentage(adopters.len(), total);
                ProvisionStat {
                    provision_key: provision,
                    label: provision.label(),
                    jurisdiction_count: adopters.len(),
                    percentage: pct,
                    consensus_tier: scheme.classify(pct),
                    jurisdictions: adopters,
                }
            })
            .collect();
        stats.sort_by(ranked);

        Self {
            scheme,
            total_jurisdictions: total,
            stats,
        }
    }

    /// Row for one provision. Computed tables have a row for every provision.
    pub fn get(&self, provision: Provision) -> Option<&ProvisionStat> {
        self.stats.iter().find(|s| s.provision_key == provision)
    }

    /// Look up a row by provision key; unknown keys are an error
    pub fn stat_by_key(&self, key: &str) -> Result<&ProvisionStat> {
        let provision = Provision::from_key(key)?;
        self.get(provision)
            .ok_or_else(|| Error::UnknownProvision(key.to_string()))
    }

    /// Federalism recommendation for each provision, in table order
    pub fn federalism(&self) -> Vec<FederalismEntry> {
        self.stats
            .iter()
            .map(|stat| FederalismEntry {
                provision: stat.provision_key,
                adoption_rate: stat.percentage,
                jurisdictions: stat.jurisdiction_count,
                recommendation: FederalismRecommendation::from_adoption(
                    stat.provision_key,
                    stat.percentage,
                ),
            })
            .collect()
    }
}

/// Which level of government a provision suits best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FederalismRecommendation {
    #[serde(rename = "Strong Federal Candidate")]
    StrongFederalCandidate,
    #[serde(rename = "Federal Framework with State Flexibility")]
    FederalFramework,
    #[serde(rename = "Best Left to States")]
    BestLeftToStates,
}

impl FederalismRecommendation {
    /// Provisions that are technical or rights-based enough to standardize
    const FEDERAL_CORE: [Provision; 3] = [
        Provision::AgeVerification,
        Provision::DataPrivacy,
        Provision::PlatformLiability,
    ];

    pub fn from_adoption(provision: Provision, adoption_rate: f64) -> Self {
        if adoption_rate >= 75.0 {
            if Self::FEDERAL_CORE.contains(&provision) {
                FederalismRecommendation::StrongFederalCandidate
            } else {
                FederalismRecommendation::FederalFramework
            }
        } else if adoption_rate >= 25.0 {
            FederalismRecommendation::FederalFramework
        } else {
            FederalismRecommendation::BestLeftToStates
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FederalismRecommendation::StrongFederalCandidate => "Strong Federal Candidate",
            FederalismRecommendation::FederalFramework => {
                "Federal Framework with State Flexibility"
            }
            FederalismRecommendation::BestLeftToStates => "Best Left to States",
        }
    }
}

impl fmt::Display for FederalismRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FederalismEntry {
    pub provision: Provision,
    pub adoption_rate: f64,
    pub jurisdictions: usize,
    pub recommendation: FederalismRecommendation,
}

/// Jurisdictions having both provisions of a pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionPair {
    pub first: Provision,
    pub second: Provision,
    pub jurisdictions: usize,
}

/// Symmetric provision-by-provision co-adoption counts.
///
/// The diagonal is not meaningful and is kept at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoOccurrence {
    pub provisions: Vec<Provision>,
    pub matrix: Vec<Vec<usize>>,
    /// Non-zero pairs, count descending then keys ascending
    pub pairs: Vec<ProvisionPair>,
}

impl CoOccurrence {
    pub fn compute(jurisdictions: &[Jurisdiction]) -> Self {
        let mut matrix = vec![vec![0usize; Provision::COUNT]; Provision::COUNT];

        for jurisdiction in jurisdictions {
            for &a in jurisdiction.provision_set() {
                for &b in jurisdiction.provision_set() {
                    if a != b {
                        matrix[a.index()][b.index()] += 1;
                    }
                }
            }
        }

        let mut pairs = Vec::new();
        for (i, &first) in Provision::ALL.iter().enumerate() {
            for &second in &Provision::ALL[i + 1..] {
                let count = matrix[first.index()][second.index()];
                if count > 0 {
                    pairs.push(ProvisionPair {
                        first,
                        second,
                        jurisdictions: count,
                    });
                }
            }
        }
        pairs.sort_by(|a, b| {
            b.jurisdictions
                .cmp(&a.jurisdictions)
                .then_with(|| a.first.key().cmp(b.first.key()))
                .then_with(|| a.second.key().cmp(b.second.key()))
        });

        Self {
            provisions: Provision::ALL.to_vec(),
            matrix,
            pairs,
        }
    }

    /// Jurisdictions having both provisions; 0 on the diagonal
    pub fn count(&self, a: Provision, b: Provision) -> usize {
        if a == b {
            return 0;
        }
        self.matrix[a.index()][b.index()]
    }
}
