use crate::config::Config;
use crate::consensus::{CoOccurrence, ConsensusScheme, ConsensusTable, FederalismEntry};
use crate::error::{Error, Result};
use crate::evidence::{evidence_gaps, EvidenceGap};
use crate::filter::{AnyStatusFilter, BillFilter, PopulationFilter};
use crate::jurisdiction::{InequityStats, Jurisdiction, JurisdictionScorer};
use crate::provisions::ProvisionMatcher;
use crate::relevance::RelevanceClassifier;
use crate::source::LoadedBills;
use crate::taxonomy::Taxonomy;
use crate::temporal::{jurisdiction_activity, DatasetOverview, JurisdictionActivity, YearlyMomentum};
use crate::types::{BillRecord, ClassifiedBill};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info};

/// Settings that shaped an analysis, recorded in its report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSettings {
    pub relevance_threshold: u32,
    pub consensus_scheme: ConsensusScheme,
    pub passed_marker: String,
}

/// Enacted state bills against enacted federal bills
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FederalComparison {
    pub state_passed: usize,
    pub federal_total: usize,
    pub federal_relevant: usize,
    pub federal_passed: usize,
    /// `state_passed / federal_passed`, or `state_passed` when nothing passed federally
    pub ratio: f64,
}

impl FederalComparison {
    pub fn new(state_passed: usize, federal_total: usize, federal_relevant: usize, federal_passed: usize) -> Self {
        let ratio = if federal_passed == 0 {
            state_passed as f64
        } else {
            state_passed as f64 / federal_passed as f64
        };
        Self {
            state_passed,
            federal_total,
            federal_relevant,
            federal_passed,
            ratio,
        }
    }
}

/// Full result of one analysis run.
///
/// Everything except the per-bill outcomes goes into the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub settings: AnalysisSettings,
    pub overview: DatasetOverview,
    pub jurisdictions: Vec<Jurisdiction>,
    pub inequity: InequityStats,
    pub consensus: ConsensusTable,
    pub co_occurrence: CoOccurrence,
    pub federalism: Vec<FederalismEntry>,
    pub evidence_gaps: Vec<EvidenceGap>,
    pub momentum: YearlyMomentum,
    pub activity: Vec<JurisdictionActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal: Option<FederalComparison>,
    #[serde(skip)]
    pub bills: Vec<ClassifiedBill>,
}

impl Analysis {
    /// Canonical JSON of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// SHA-256 hex digest of the canonical JSON
    pub fn fingerprint(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(self.to_json()?.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Look up a scored jurisdiction by code
    pub fn jurisdiction(&self, code: &str) -> Option<&Jurisdiction> {
        self.jurisdictions.iter().find(|j| j.code() == code)
    }
}

/// Runs classification, provision matching and aggregation over bill records
#[derive(Debug, Clone)]
pub struct AnalysisProcessor {
    config: Config,
    classifier: RelevanceClassifier,
    matcher: ProvisionMatcher,
    filter: PopulationFilter,
}

impl AnalysisProcessor {
    /// Create a new processor with the given configuration and taxonomy
    pub fn new(config: Config, taxonomy: &Taxonomy) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: RelevanceClassifier::new(taxonomy, config.relevance_threshold)?,
            matcher: ProvisionMatcher::new(taxonomy),
            filter: PopulationFilter::new(config.passed_marker.clone()),
            config,
        })
    }

    /// Create a processor, loading the taxonomy the configuration points at
    pub fn from_config(config: Config) -> Result<Self> {
        let taxonomy = config.load_taxonomy()?;
        Self::new(config, &taxonomy)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Score one bill; provisions are only matched for the analysis population
    pub fn classify(&self, record: BillRecord) -> ClassifiedBill {
        let relevance = self.classifier.classify(&record);
        let in_population = self.filter.should_keep(&record, &relevance).is_keep();
        let provisions = in_population.then(|| self.matcher.match_bill(&record));

        ClassifiedBill {
            record,
            relevance,
            in_population,
            provisions,
        }
    }

    pub fn classify_all(&self, records: Vec<BillRecord>) -> Vec<ClassifiedBill> {
        records.into_iter().map(|r| self.classify(r)).collect()
    }

    /// Everything after classification; single-threaded and order-stable
    pub fn aggregate(&self, bills: Vec<ClassifiedBill>, skipped_rows: usize) -> Analysis {
        let overview = DatasetOverview::compute(&bills, skipped_rows, &self.filter);
        debug!(
            total = overview.total_rows,
            relevant = overview.relevant_rows,
            population = overview.population_size,
            "classified bills"
        );

        let jurisdictions = JurisdictionScorer.score(&bills);
        debug!(jurisdictions = jurisdictions.len(), "scored jurisdictions");

        let inequity = InequityStats::compute(&jurisdictions);
        let consensus = ConsensusTable::compute(&jurisdictions, self.config.consensus_scheme);
        let co_occurrence = CoOccurrence::compute(&jurisdictions);
        let federalism = consensus.federalism();
        let evidence_gaps = evidence_gaps(bills.iter().filter(|b| b.in_population).map(|b| &b.record));
        let momentum = YearlyMomentum::compute(&bills);
        let activity = jurisdiction_activity(&bills);

        info!(
            population = overview.population_size,
            jurisdictions = jurisdictions.len(),
            inequity_index = inequity.inequity_index,
            scheme = self.config.consensus_scheme.name(),
            "analysis complete"
        );

        Analysis {
            settings: AnalysisSettings {
                relevance_threshold: self.config.relevance_threshold,
                consensus_scheme: self.config.consensus_scheme,
                passed_marker: self.filter.passed_marker().to_string(),
            },
            overview,
            jurisdictions,
            inequity,
            consensus,
            co_occurrence,
            federalism,
            evidence_gaps,
            momentum,
            activity,
            federal: None,
            bills,
        }
    }

    /// Analyze on the current thread
    pub fn run(&self, input: LoadedBills) -> Analysis {
        let bills = self.classify_all(input.records);
        self.aggregate(bills, input.skipped_rows)
    }

    /// Classify chunks of records on blocking worker threads, then aggregate.
    ///
    /// Chunks are reassembled in input order, so the result is identical to
    /// [`AnalysisProcessor::run`].
    pub async fn run_parallel(self: Arc<Self>, input: LoadedBills) -> Result<Analysis> {
        let jobs = self.config.jobs.max(1);
        let chunk_size = input.records.len().div_ceil(jobs).max(1);

        let mut chunks: Vec<Vec<BillRecord>> =
            Vec::with_capacity(input.records.len().div_ceil(chunk_size));
        let mut records = input.records.into_iter().peekable();
        while records.peek().is_some() {
            chunks.push(records.by_ref().take(chunk_size).collect());
        }
        debug!(jobs, chunks = chunks.len(), chunk_size, "classifying in parallel");

        let results: Vec<Result<Vec<ClassifiedBill>>> = stream::iter(chunks)
            .map(|chunk| {
                let processor = Arc::clone(&self);
                async move {
                    tokio::task::spawn_blocking(move || processor.classify_all(chunk))
                        .await
                        .map_err(|e| {
                            Error::Io(std::io::Error::new(
                                std::io::ErrorKind::Other,
                                format!("Task join error: {}", e),
                            ))
                        })
                }
            })
            .buffered(jobs)
            .collect()
            .await;

        let mut bills = Vec::new();
        for chunk in results {
            bills.extend(chunk?);
        }

        Ok(self.aggregate(bills, input.skipped_rows))
    }

    /// Classify federal records with the same classifier and compare enactment
    /// counts against a state analysis
    pub fn federal_comparison(&self, state: &Analysis, federal: &[BillRecord]) -> FederalComparison {
        let federal_filter = AnyStatusFilter::federal();
        let mut relevant = 0;
        let mut passed = 0;
        for record in federal {
            let relevance = self.classifier.classify(record);
            if relevance.is_relevant {
                relevant += 1;
            }
            if federal_filter.should_keep(record, &relevance).is_keep() {
                passed += 1;
            }
        }
        debug!(total = federal.len(), relevant, passed, "classified federal bills");

        FederalComparison::new(state.overview.population_size, federal.len(), relevant, passed)
    }
}
