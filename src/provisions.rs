use crate::taxonomy::{Provision, ProvisionSet, Taxonomy};
use crate::types::BillRecord;

/// Tags bills with the provisions their description mentions.
///
/// Only the description is searched: provisions are operational details that
/// show up in descriptive text, unlike the relevance signals which also look
/// at names and themes.
#[derive(Debug, Clone)]
pub struct ProvisionMatcher {
    keywords: Vec<(Provision, Vec<String>)>,
}

impl ProvisionMatcher {
    pub fn new(taxonomy: &Taxonomy) -> Self {
        let keywords = taxonomy
            .provisions()
            .map(|(provision, list)| (provision, list.to_vec()))
            .collect();
        Self { keywords }
    }

    /// Provisions whose keyword phrases appear in `text` (case-insensitive)
    pub fn match_text(&self, text: &str) -> ProvisionSet {
        if text.trim().is_empty() {
            return ProvisionSet::new();
        }

        let lower = text.to_lowercase();
        self.keywords
            .iter()
            // presence is binary: stop at the first phrase that hits
            .filter(|(_, phrases)| phrases.iter().any(|phrase| lower.contains(phrase.as_str())))
            .map(|(provision, _)| *provision)
            .collect()
    }

    /// Provisions present in a bill's description
    pub fn match_bill(&self, record: &BillRecord) -> ProvisionSet {
        self.match_text(&record.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ProvisionMatcher {
        ProvisionMatcher::new(&Taxonomy::default())
    }

    #[test]
    fn test_parental_consent_and_age_verification() {
        let record = BillRecord::new(
            "CA",
            "Child Online Safety Act",
            "requires parental consent and age verification",
            "Children, Online Safety",
            "Passed",
        );
        let found = matcher().match_bill(&record);
        let expected: ProvisionSet = [Provision::ParentalControl, Provision::AgeVerification]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_empty_description_has_no_provisions() {
        let record = BillRecord::new("", "", "", "", "");
        assert!(matcher().match_bill(&record).is_empty());
    }

    #[test]
    fn test_only_description_is_searched() {
        let record = BillRecord::new(
            "LA",
            "Age Verification for Adult Websites",
            "",
            "Data Privacy",
            "Passed",
        );
        assert!(matcher().match_bill(&record).is_empty());
    }

    #[test]
    fn test_matching_ignores_case_and_counts_once() {
        let found = matcher().match_text(
            "MENTAL HEALTH warnings; addictive feeds; SUICIDE prevention resources",
        );
        assert_eq!(found.len(), 1);
        assert!(found.contains(&Provision::MentalHealth));
    }

    #[test]
    fn test_results_stay_within_taxonomy() {
        let found = matcher().match_text(
            "age verification, content moderation, data privacy, curriculum, wellness, \
             parental control, duty of care, transparency report",
        );
        assert_eq!(found.len(), Provision::COUNT);
        assert!(found.iter().all(|p| Provision::ALL.contains(p)));
    }
}
