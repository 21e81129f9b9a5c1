//! Weighted keyword scoring that decides whether a bill belongs to the
//! children's online safety population.
//!
//! Scoring annotates bills; it never drops them. Selecting the analysis
//! population is done separately by [`crate::filter`].

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::Result;
use crate::selectors::{combined_text, select, Field};
use crate::taxonomy::{RelevanceWeights, Taxonomy, ThemeBonus};
use crate::types::BillRecord;

/// Minimum score for a bill to count as relevant
pub const DEFAULT_RELEVANCE_THRESHOLD: u32 = 3;

/// Points contributed by each scoring term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub name: u32,
    pub description: u32,
    pub themes: u32,
    pub safety: u32,
    pub technology: u32,
    pub theme_bonus: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.name + self.description + self.themes + self.safety + self.technology + self.theme_bonus
    }
}

/// Relevance verdict for one bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relevance {
    pub relevance_score: u32,
    pub is_relevant: bool,
    pub score_breakdown: ScoreBreakdown,
}

impl Relevance {
    /// `is_relevant` is always `score >= threshold`
    pub fn from_breakdown(breakdown: ScoreBreakdown, threshold: u32) -> Self {
        let relevance_score = breakdown.total();
        Self {
            relevance_score,
            is_relevant: relevance_score >= threshold,
            score_breakdown: breakdown,
        }
    }
}

/// Build one case-insensitive alternation out of literal keywords.
///
/// Keywords match as plain substrings, so "app" also hits "happy". An empty
/// list yields no pattern, which never matches.
fn alternation(keywords: &[String]) -> Result<Option<Regex>> {
    let parts: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();

    if parts.is_empty() {
        return Ok(None);
    }

    let re = RegexBuilder::new(&parts.join("|"))
        .case_insensitive(true)
        .build()?;
    Ok(Some(re))
}

fn hits(pattern: &Option<Regex>, text: &str) -> bool {
    match pattern {
        Some(re) => !text.is_empty() && re.is_match(text),
        None => false,
    }
}

/// Scores bills against the population signals of a taxonomy
#[derive(Debug, Clone)]
pub struct RelevanceClassifier {
    population: Option<Regex>,
    safety: Option<Regex>,
    technology: Option<Regex>,
    theme_bonuses: Vec<ThemeBonus>,
    weights: RelevanceWeights,
    threshold: u32,
}

impl RelevanceClassifier {
    pub fn new(taxonomy: &Taxonomy, threshold: u32) -> Result<Self> {
        Ok(Self {
            population: alternation(&taxonomy.population)?,
            safety: alternation(&taxonomy.safety)?,
            technology: alternation(&taxonomy.technology)?,
            theme_bonuses: taxonomy.theme_bonuses.clone(),
            weights: taxonomy.weights,
            threshold,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Per-term points for a bill
    pub fn breakdown(&self, record: &BillRecord) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();

        if hits(&self.population, select(record, Field::Name)) {
            breakdown.name = self.weights.name;
        }
        if hits(&self.population, select(record, Field::Description)) {
            breakdown.description = self.weights.description;
        }
        if hits(&self.population, select(record, Field::Themes)) {
            breakdown.themes = self.weights.themes;
        }

        let combined = combined_text(record);
        if hits(&self.safety, &combined) {
            breakdown.safety = self.weights.safety;
        }
        if hits(&self.technology, &combined) {
            breakdown.technology = self.weights.technology;
        }

        // Theme tags are matched verbatim, case included
        breakdown.theme_bonus = self
            .theme_bonuses
            .iter()
            .filter(|bonus| record.themes.contains(bonus.tag.as_str()))
            .map(|bonus| bonus.weight)
            .sum();

        breakdown
    }

    /// Score a bill and apply the relevance threshold
    pub fn classify(&self, record: &BillRecord) -> Relevance {
        Relevance::from_breakdown(self.breakdown(record), self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RelevanceClassifier {
        RelevanceClassifier::new(&Taxonomy::default(), DEFAULT_RELEVANCE_THRESHOLD).unwrap()
    }

    #[test]
    fn test_child_online_safety_act_scores_fourteen() {
        let record = BillRecord::new(
            "CA",
            "Child Online Safety Act",
            "requires parental consent and age verification",
            "Children, Online Safety",
            "Passed",
        );
        let relevance = classifier().classify(&record);
        assert_eq!(
            relevance.score_breakdown,
            ScoreBreakdown {
                name: 3,
                description: 2,
                themes: 2,
                safety: 1,
                technology: 1,
                theme_bonus: 5,
            }
        );
        assert_eq!(relevance.relevance_score, 14);
        assert!(relevance.is_relevant);
    }

    #[test]
    fn test_empty_bill_scores_zero() {
        let relevance = classifier().classify(&BillRecord::new("", "", "", "", ""));
        assert_eq!(relevance.relevance_score, 0);
        assert!(!relevance.is_relevant);
        assert_eq!(relevance.score_breakdown, ScoreBreakdown::default());
    }

    #[test]
    fn test_threshold_boundary() {
        let classifier = classifier();

        // name hit only: exactly the threshold
        let record = BillRecord::new("OH", "Parental Rights Act", "", "", "Passed");
        let relevance = classifier.classify(&record);
        assert_eq!(relevance.relevance_score, 3);
        assert!(relevance.is_relevant);

        // description hit only: below the threshold
        let record = BillRecord::new("OH", "HB 1", "funds school buses", "", "Passed");
        let relevance = classifier.classify(&record);
        assert_eq!(relevance.relevance_score, 2);
        assert!(!relevance.is_relevant);
    }

    #[test]
    fn test_theme_bonus_is_case_sensitive() {
        let classifier = classifier();
        let record = BillRecord::new("NY", "", "", "children", "");
        let relevance = classifier.classify(&record);
        assert_eq!(relevance.score_breakdown.themes, 2);
        assert_eq!(relevance.score_breakdown.theme_bonus, 0);
        assert_eq!(relevance.relevance_score, 2);
    }

    #[test]
    fn test_keywords_match_as_substrings() {
        let classifier = classifier();
        // "app" inside "appropriations" counts as technology context
        let record = BillRecord::new("NV", "General appropriations", "", "", "");
        assert_eq!(classifier.classify(&record).score_breakdown.technology, 1);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = classifier();
        let record = BillRecord::new(
            "FL",
            "Social Media Use by Minors",
            "restricts accounts for users under 14",
            "Online Safety",
            "Passed",
        );
        let first = classifier.classify(&record);
        let second = classifier.classify(&record);
        assert_eq!(first, second);
        assert_eq!(first.is_relevant, first.relevance_score >= classifier.threshold());
    }

    #[test]
    fn test_custom_threshold() {
        let strict = RelevanceClassifier::new(&Taxonomy::default(), 10).unwrap();
        let record = BillRecord::new("OH", "Parental Rights Act", "", "", "Passed");
        assert!(!strict.classify(&record).is_relevant);
    }

    #[test]
    fn test_empty_keyword_lists_never_match() {
        let mut taxonomy = Taxonomy::default();
        taxonomy.technology.clear();
        let classifier = RelevanceClassifier::new(&taxonomy, DEFAULT_RELEVANCE_THRESHOLD).unwrap();
        let record = BillRecord::new("WA", "Online platforms", "", "", "");
        assert_eq!(classifier.classify(&record).score_breakdown.technology, 0);
    }
}
