//! Keyword taxonomy shared by the relevance classifier and the provision matcher.
//!
//! Two concerns live here: the population signals that decide whether a bill is
//! about children's online safety at all, and the fixed eight-provision policy
//! taxonomy. Both ship with built-in lists and can be overridden from YAML.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Terms that mark a bill as being about children, youth or families
const POPULATION_KEYWORDS: &[&str] = &[
    "children",
    "child",
    "minor",
    "minors",
    "student",
    "students",
    "kids",
    "youth",
    "juvenile",
    "adolescent",
    "teen",
    "teenager",
    "parental",
    "parent",
    "guardian",
    "family",
    "school",
    "k-12",
    "age verification",
    "age-verification",
    "underage",
    "young people",
];

/// Safety and protection context
const SAFETY_KEYWORDS: &[&str] = &[
    "safety",
    "protect",
    "protection",
    "secure",
    "security",
    "privacy",
    "harmful",
    "abuse",
    "exploitation",
    "predator",
];

/// Technology and online context
const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "online",
    "internet",
    "social media",
    "platform",
    "digital",
    "website",
    "app",
    "device",
    "screen",
    "cyber",
];

/// Theme tags that earn a fixed bonus when present verbatim (case-sensitive)
const THEME_BONUSES: &[(&str, u32)] = &[("Children", 3), ("Online Safety", 2)];

const AGE_VERIFICATION_KEYWORDS: &[&str] = &[
    "age verification",
    "age assurance",
    "age check",
    "verify age",
    "age gate",
    "age authentication",
    "verify identity",
];

const CONTENT_SAFETY_KEYWORDS: &[&str] = &[
    "content moderation",
    "content safety",
    "harmful content",
    "filter",
    "content standard",
    "inappropriate content",
    "content removal",
];

const DATA_PRIVACY_KEYWORDS: &[&str] = &[
    "data privacy",
    "data protection",
    "personal data",
    "privacy by design",
    "data minimization",
    "privacy standard",
    "data collection",
    "privacy policy",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "digital literacy",
    "digital citizenship",
    "education",
    "training",
    "awareness program",
    "curriculum",
    "digital wellness",
];

const MENTAL_HEALTH_KEYWORDS: &[&str] = &[
    "mental health",
    "addiction",
    "addictive",
    "wellness",
    "psychological",
    "self-harm",
    "suicide",
    "depression",
    "well-being",
    "wellbeing",
];

const PARENTAL_CONTROL_KEYWORDS: &[&str] = &[
    "parental control",
    "parental consent",
    "parent approval",
    "guardian consent",
    "parental dashboard",
    "parent access",
    "parental notification",
    "parental rights",
];

const PLATFORM_LIABILITY_KEYWORDS: &[&str] = &[
    "liability",
    "duty of care",
    "negligent",
    "civil action",
    "damages",
    "responsible",
    "accountable",
    "liable",
];

const TRANSPARENCY_KEYWORDS: &[&str] = &[
    "transparency report",
    "disclosure",
    "annual report",
    "transparency",
    "reporting requirement",
    "public report",
];

/// One of the eight canonical policy provisions.
///
/// Variants are declared in alphabetical order of their keys, so the derived
/// `Ord` agrees with key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provision {
    AgeVerification,
    ContentSafety,
    DataPrivacy,
    Education,
    MentalHealth,
    ParentalControl,
    PlatformLiability,
    Transparency,
}

/// Set of provisions present for a bill or a jurisdiction
pub type ProvisionSet = BTreeSet<Provision>;

impl Provision {
    pub const COUNT: usize = 8;

    pub const ALL: [Provision; Provision::COUNT] = [
        Provision::AgeVerification,
        Provision::ContentSafety,
        Provision::DataPrivacy,
        Provision::Education,
        Provision::MentalHealth,
        Provision::ParentalControl,
        Provision::PlatformLiability,
        Provision::Transparency,
    ];

    /// Stable snake_case key used in reports and taxonomy files
    pub fn key(self) -> &'static str {
        match self {
            Provision::AgeVerification => "age_verification",
            Provision::ContentSafety => "content_safety",
            Provision::DataPrivacy => "data_privacy",
            Provision::Education => "education",
            Provision::MentalHealth => "mental_health",
            Provision::ParentalControl => "parental_control",
            Provision::PlatformLiability => "platform_liability",
            Provision::Transparency => "transparency",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Provision::AgeVerification => "Age Verification",
            Provision::ContentSafety => "Content Safety Standards",
            Provision::DataPrivacy => "Data Privacy Standards",
            Provision::Education => "Digital Literacy Education",
            Provision::MentalHealth => "Mental Health Protections",
            Provision::ParentalControl => "Parental Control Tools",
            Provision::PlatformLiability => "Platform Liability",
            Provision::Transparency => "Transparency & Reporting",
        }
    }

    /// Position in `Provision::ALL`, used to index co-occurrence matrices
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a provision by key. Unknown keys are a caller error.
    pub fn from_key(key: &str) -> Result<Self> {
        let wanted = key.trim();
        Provision::ALL
            .iter()
            .copied()
            .find(|p| p.key() == wanted)
            .ok_or_else(|| Error::UnknownProvision(key.to_string()))
    }
}

impl FromStr for Provision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Provision::from_key(s)
    }
}

impl fmt::Display for Provision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Points awarded by each relevance term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    pub name: u32,
    pub description: u32,
    pub themes: u32,
    pub safety: u32,
    pub technology: u32,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            name: 3,
            description: 2,
            themes: 2,
            safety: 1,
            technology: 1,
        }
    }
}

/// Bonus awarded when the themes field contains `tag` verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeBonus {
    pub tag: String,
    pub weight: u32,
}

/// The canonical keyword taxonomy.
#[derive(Debug, Clone, Serialize)]
pub struct Taxonomy {
    pub population: Vec<String>,
    pub safety: Vec<String>,
    pub technology: Vec<String>,
    pub theme_bonuses: Vec<ThemeBonus>,
    pub weights: RelevanceWeights,
    /// Provision keyword phrases, stored lowercase
    provisions: BTreeMap<Provision, Vec<String>>,
}

/// On-disk shape of a taxonomy override file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
struct RawTaxonomy {
    #[serde(default)]
    population: Option<Vec<String>>,
    #[serde(default)]
    safety: Option<Vec<String>>,
    #[serde(default)]
    technology: Option<Vec<String>>,
    #[serde(default)]
    theme_bonuses: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    weights: Option<RelevanceWeights>,
    #[serde(default)]
    provisions: Option<BTreeMap<String, Vec<String>>>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn lowered(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Default for Taxonomy {
    fn default() -> Self {
        let provisions = Provision::ALL
            .iter()
            .map(|&p| {
                let list = match p {
                    Provision::AgeVerification => AGE_VERIFICATION_KEYWORDS,
                    Provision::ContentSafety => CONTENT_SAFETY_KEYWORDS,
                    Provision::DataPrivacy => DATA_PRIVACY_KEYWORDS,
                    Provision::Education => EDUCATION_KEYWORDS,
                    Provision::MentalHealth => MENTAL_HEALTH_KEYWORDS,
                    Provision::ParentalControl => PARENTAL_CONTROL_KEYWORDS,
                    Provision::PlatformLiability => PLATFORM_LIABILITY_KEYWORDS,
                    Provision::Transparency => TRANSPARENCY_KEYWORDS,
                };
                (p, owned(list))
            })
            .collect();

        Self {
            population: owned(POPULATION_KEYWORDS),
            safety: owned(SAFETY_KEYWORDS),
            technology: owned(TECHNOLOGY_KEYWORDS),
            theme_bonuses: THEME_BONUSES
                .iter()
                .map(|(tag, weight)| ThemeBonus {
                    tag: tag.to_string(),
                    weight: *weight,
                })
                .collect(),
            weights: RelevanceWeights::default(),
            provisions,
        }
    }
}

impl Taxonomy {
    /// Parse a YAML override on top of the built-in taxonomy
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: RawTaxonomy = serde_yaml::from_str(contents)?;
        let mut taxonomy = Taxonomy::default();

        if let Some(list) = raw.population {
            taxonomy.population = list;
        }
        if let Some(list) = raw.safety {
            taxonomy.safety = list;
        }
        if let Some(list) = raw.technology {
            taxonomy.technology = list;
        }
        if let Some(bonuses) = raw.theme_bonuses {
            taxonomy.theme_bonuses = bonuses
                .into_iter()
                .filter(|(tag, _)| !tag.trim().is_empty())
                .map(|(tag, weight)| ThemeBonus { tag, weight })
                .collect();
        }
        if let Some(weights) = raw.weights {
            taxonomy.weights = weights;
        }
        if let Some(provisions) = raw.provisions {
            for (key, keywords) in provisions {
                let provision = Provision::from_key(&key)?;
                taxonomy.provisions.insert(provision, lowered(keywords));
            }
        }

        Ok(taxonomy)
    }

    /// Load a YAML override file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Lowercase keyword phrases for one provision
    pub fn keywords(&self, provision: Provision) -> &[String] {
        self.provisions
            .get(&provision)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All provisions with their keyword phrases, in key order
    pub fn provisions(&self) -> impl Iterator<Item = (Provision, &[String])> {
        Provision::ALL.iter().map(move |&p| (p, self.keywords(p)))
    }
}
