//! Property-based tests over generated bills and jurisdiction sets

use std::collections::BTreeSet;

use billscope::prelude::*;
use billscope::{
    ConsensusTable, JurisdictionScorer, ProvisionMatcher, Relevance, RelevanceClassifier,
    ScoreBreakdown, Tier,
};
use proptest::prelude::*;

/// Keyword-bearing fragments, so generated bills actually reach the thresholds
const FRAGMENTS: &[&str] = &[
    "children",
    "Children",
    "minors",
    "youth",
    "online",
    "Online Safety",
    "social media",
    "app",
    "harmful content",
    "age verification",
    "parental consent",
    "data privacy",
    "mental health",
    "platform liability",
    "transparency report",
    "digital literacy",
    "protect",
];

const STATES: &[&str] = &["CA", "TX", "NY", "UT", "FL", ""];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z ,]{0,12}",
            prop::sample::select(FRAGMENTS).prop_map(str::to_string),
        ],
        0..6,
    )
    .prop_map(|parts| parts.join(" "))
}

fn status() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Passed".to_string()),
        Just("passed - signed".to_string()),
        Just("Introduced".to_string()),
        Just("Vetoed".to_string()),
        "[a-zA-Z ]{0,10}",
    ]
}

fn bill() -> impl Strategy<Value = BillRecord> {
    (prop::sample::select(STATES), text(), text(), text(), status()).prop_map(
        |(state, name, description, themes, status)| {
            BillRecord::new(state, name, description, themes, status)
        },
    )
}

fn processor() -> AnalysisProcessor {
    AnalysisProcessor::new(Config::default(), &Taxonomy::default()).unwrap()
}

fn in_population(state: &str, provisions: Vec<Provision>) -> ClassifiedBill {
    ClassifiedBill {
        record: BillRecord::new(state, "Bill", "", "", "Passed"),
        relevance: Relevance::from_breakdown(ScoreBreakdown::default(), 3),
        in_population: true,
        provisions: Some(provisions.into_iter().collect()),
    }
}

fn jurisdiction_sets() -> impl Strategy<Value = Vec<(String, Vec<Provision>)>> {
    prop::collection::vec(
        (
            "[A-Z]{2}",
            prop::sample::subsequence(Provision::ALL.to_vec(), 0..=Provision::COUNT),
        ),
        0..12,
    )
}

proptest! {
    #[test]
    fn relevant_exactly_at_threshold(record in bill()) {
        let classifier = RelevanceClassifier::new(&Taxonomy::default(), 3).unwrap();
        let relevance = classifier.classify(&record);

        prop_assert_eq!(relevance.is_relevant, relevance.relevance_score >= 3);
        prop_assert_eq!(relevance.relevance_score, relevance.score_breakdown.total());
    }

    #[test]
    fn classification_is_idempotent(record in bill()) {
        let processor = processor();
        let first = processor.classify(record.clone());
        let second = processor.classify(record);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.provisions.is_some(), first.in_population);
    }

    #[test]
    fn provisions_come_from_the_taxonomy(description in text()) {
        let matcher = ProvisionMatcher::new(&Taxonomy::default());
        let found = matcher.match_text(&description);

        prop_assert!(found.len() <= Provision::COUNT);
        for provision in found {
            prop_assert!(Provision::ALL.contains(&provision));
            prop_assert_eq!(Provision::from_key(provision.key()).unwrap(), provision);
        }
    }

    #[test]
    fn jurisdiction_score_is_set_size(bills in prop::collection::vec(bill(), 0..24)) {
        let analysis = processor().run(bills.into());

        for jurisdiction in &analysis.jurisdictions {
            prop_assert_eq!(jurisdiction.score(), jurisdiction.provision_set().len());
            prop_assert!(jurisdiction.score() <= Provision::COUNT);
            prop_assert_eq!(jurisdiction.tier(), Tier::from_score(jurisdiction.score()));
        }
        for stat in &analysis.consensus.stats {
            prop_assert!((0.0..=100.0).contains(&stat.percentage));
        }
    }

    #[test]
    fn only_population_bills_create_jurisdictions(bills in prop::collection::vec(bill(), 0..24)) {
        let processor = processor();
        let analysis = processor.run(bills.into());

        let expected: BTreeSet<&str> = analysis
            .bills
            .iter()
            .filter(|b| b.in_population)
            .map(|b| b.record.state.as_str())
            .collect();
        let scored: BTreeSet<&str> = analysis.jurisdictions.iter().map(|j| j.code()).collect();
        prop_assert_eq!(scored, expected);

        let population: Vec<BillRecord> = analysis
            .bills
            .iter()
            .filter(|b| b.in_population)
            .map(|b| b.record.clone())
            .collect();
        let population_only = processor.run(population.into());
        prop_assert_eq!(&population_only.jurisdictions, &analysis.jurisdictions);
    }

    #[test]
    fn adoption_is_a_percentage(sets in jurisdiction_sets()) {
        let bills: Vec<ClassifiedBill> = sets
            .into_iter()
            .map(|(state, provisions)| in_population(&state, provisions))
            .collect();
        let jurisdictions = JurisdictionScorer.score(&bills);

        for scheme in [ConsensusScheme::ThreeTier, ConsensusScheme::FourTier] {
            let table = ConsensusTable::compute(&jurisdictions, scheme);
            prop_assert_eq!(table.stats.len(), Provision::COUNT);
            for stat in &table.stats {
                prop_assert!((0.0..=100.0).contains(&stat.percentage));
                prop_assert!(stat.jurisdiction_count <= jurisdictions.len());
                prop_assert_eq!(stat.consensus_tier, scheme.classify(stat.percentage));
                if jurisdictions.is_empty() {
                    prop_assert_eq!(stat.percentage, 0.0);
                }
            }
        }
    }

    #[test]
    fn out_of_population_bills_are_ignored(
        sets in jurisdiction_sets(),
        outside in prop::collection::vec("[A-Z]{2}", 0..6),
    ) {
        let mut bills: Vec<ClassifiedBill> = sets
            .iter()
            .map(|(state, provisions)| in_population(state, provisions.clone()))
            .collect();
        let scored = JurisdictionScorer.score(&bills);

        for state in &outside {
            let mut bill = in_population(state, Vec::new());
            bill.in_population = false;
            bill.provisions = None;
            bills.push(bill);
        }
        prop_assert_eq!(JurisdictionScorer.score(&bills), scored);
    }
}
