use crate::consensus::ConsensusScheme;
use crate::error::{Error, Result};
use crate::filter::DEFAULT_PASSED_MARKER;
use crate::relevance::DEFAULT_RELEVANCE_THRESHOLD;
use crate::taxonomy::Taxonomy;
use std::path::PathBuf;

/// Configuration for the analysis processor
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub relevance_threshold: u32,
    pub consensus_scheme: ConsensusScheme,
    pub passed_marker: String,
    pub taxonomy_path: Option<PathBuf>,
    pub jobs: usize,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            consensus_scheme: ConsensusScheme::default(),
            passed_marker: DEFAULT_PASSED_MARKER.to_string(),
            taxonomy_path: None,
            jobs: 1,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }

        if self.passed_marker.trim().is_empty() {
            return Err(Error::Config("passed marker must not be empty".to_string()));
        }

        if let Some(path) = &self.taxonomy_path {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "Taxonomy file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// The taxonomy override if one is configured, otherwise the built-in one
    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        match &self.taxonomy_path {
            Some(path) => Taxonomy::load(path),
            None => Ok(Taxonomy::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum relevance score
    pub fn relevance_threshold(mut self, threshold: u32) -> Self {
        self.config.relevance_threshold = threshold;
        self
    }

    pub fn consensus_scheme(mut self, scheme: ConsensusScheme) -> Self {
        self.config.consensus_scheme = scheme;
        self
    }

    /// Set the consensus scheme from its name ("three-tier" or "four-tier")
    pub fn consensus_scheme_str(mut self, scheme: &str) -> Result<Self> {
        self.config.consensus_scheme = scheme.parse()?;
        Ok(self)
    }

    /// Set the status substring that marks a bill as passed
    pub fn passed_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.passed_marker = marker.into();
        self
    }

    /// Load the taxonomy from a YAML file instead of the built-in one
    pub fn taxonomy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.taxonomy_path = Some(path.into());
        self
    }

    /// Set the number of parallel classification workers
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.relevance_threshold, 3);
        assert_eq!(config.consensus_scheme, ConsensusScheme::ThreeTier);
        assert_eq!(config.passed_marker, "passed");
        assert_eq!(config.jobs, 1);
        assert!(config.taxonomy_path.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(ConfigBuilder::new().jobs(0).build(), Err(Error::Config(_))));
        assert!(matches!(
            ConfigBuilder::new().passed_marker("  ").build(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ConfigBuilder::new()
                .taxonomy_path("does/not/exist.yaml")
                .build(),
            Err(Error::Config(_))
        ));
        assert!(ConfigBuilder::new().consensus_scheme_str("two-tier").is_err());
    }

    #[test]
    fn test_scheme_from_string() {
        let config = ConfigBuilder::new()
            .consensus_scheme_str("four-tier")
            .unwrap()
            .relevance_threshold(5)
            .jobs(4)
            .build()
            .unwrap();
        assert_eq!(config.consensus_scheme, ConsensusScheme::FourTier);
        assert_eq!(config.relevance_threshold, 5);
        assert_eq!(config.jobs, 4);
    }
}
