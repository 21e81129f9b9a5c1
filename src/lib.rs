//! A keyword-driven policy analysis library for children's online safety
//! legislation.
//!
//! Bills are scored for relevance, the enacted relevant ones are tagged with
//! the eight canonical policy provisions, and jurisdictions are compared by
//! how many provisions their enacted bills cover.

pub mod config;
pub mod consensus;
pub mod error;
pub mod evidence;
pub mod filter;
pub mod jurisdiction;
pub mod processor;
pub mod provisions;
pub mod publish;
pub mod relevance;
pub mod selectors;
pub mod source;
pub mod stats;
pub mod taxonomy;
pub mod temporal;
pub mod types;

pub use config::{Config, ConfigBuilder};
pub use consensus::{
    CoOccurrence, ConsensusScheme, ConsensusTable, ConsensusTier, FederalismRecommendation,
    ProvisionStat,
};
pub use error::{Error, Result};
pub use filter::{AnyStatusFilter, BillFilter, FilterResult, PopulationFilter};
pub use jurisdiction::{InequityStats, Jurisdiction, JurisdictionScorer, Tier};
pub use processor::{Analysis, AnalysisProcessor, FederalComparison};
pub use provisions::ProvisionMatcher;
pub use relevance::{Relevance, RelevanceClassifier, ScoreBreakdown};
pub use source::{load_bills, InputFormat, LoadedBills};
pub use taxonomy::{Provision, ProvisionSet, Taxonomy};
pub use types::{BillRecord, BillRow, ClassifiedBill};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::consensus::{ConsensusScheme, ConsensusTier};
    pub use crate::error::{Error, Result};
    pub use crate::processor::{Analysis, AnalysisProcessor};
    pub use crate::source::{load_bills, InputFormat, LoadedBills};
    pub use crate::taxonomy::{Provision, Taxonomy};
    pub use crate::types::{BillRecord, ClassifiedBill};
}
