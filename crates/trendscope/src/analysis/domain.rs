//! Business domain detection from column and file names.
//!
//! Each domain is scored by a [`DomainScorer`]. The classifier asks every
//! registered scorer for points and picks the highest; equal scores go to
//! the scorer registered first.

use tracing::debug;

use crate::insight::Domain;

/// Points for each keyword found in the file name.
pub const FILE_NAME_WEIGHT: u32 = 5;
/// Points for each (column, keyword) match.
pub const COLUMN_NAME_WEIGHT: u32 = 3;

/// Scores how strongly a dataset's names point at one domain.
pub trait DomainScorer: Send + Sync + std::fmt::Debug {
    /// The domain this scorer votes for.
    fn domain(&self) -> Domain;

    /// Points for this dataset. Names are compared case-insensitively.
    fn score(&self, column_names: &[&str], file_name: Option<&str>) -> u32;
}

/// Substring keyword scorer.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    domain: Domain,
    keywords: Vec<String>,
}

impl KeywordScorer {
    /// Create a scorer from lowercase keywords.
    pub fn new(domain: Domain, keywords: &[&str]) -> Self {
        Self {
            domain,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Built-in keyword list for a domain.
    pub fn builtin(domain: Domain) -> Self {
        let keywords: &[&str] = match domain {
            Domain::Sales => &[
                "sales", "revenue", "order", "product", "quantity", "price", "deal", "region",
                "units", "discount", "invoice",
            ],
            Domain::Financial => &[
                "profit", "cost", "expense", "budget", "income", "balance", "asset", "liability",
                "cash", "tax", "margin", "equity", "debt", "interest", "account",
            ],
            Domain::Marketing => &[
                "campaign", "click", "impression", "conversion", "ctr", "lead", "channel",
                "traffic", "engagement", "bounce", "seo", "email", "social",
            ],
            Domain::Operations => &[
                "inventory", "supply", "shipment", "production", "throughput", "downtime",
                "efficiency", "warehouse", "logistics", "delivery", "capacity", "defect",
                "utilization",
            ],
            Domain::Customer => &[
                "customer", "user", "churn", "satisfaction", "nps", "retention", "feedback",
                "support", "rating", "ticket", "loyalty", "signup",
            ],
            Domain::Scientific => &[
                "experiment", "sample", "measurement", "temperature", "concentration", "trial",
                "observation", "specimen", "sensor", "wavelength", "dose", "control",
            ],
        };
        Self::new(domain, keywords)
    }
}

impl DomainScorer for KeywordScorer {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn score(&self, column_names: &[&str], file_name: Option<&str>) -> u32 {
        let mut points = 0;

        if let Some(file) = file_name {
            let file = file.to_lowercase();
            points += self
                .keywords
                .iter()
                .filter(|k| file.contains(k.as_str()))
                .count() as u32
                * FILE_NAME_WEIGHT;
        }

        for column in column_names {
            let column = column.to_lowercase();
            points += self
                .keywords
                .iter()
                .filter(|k| column.contains(k.as_str()))
                .count() as u32
                * COLUMN_NAME_WEIGHT;
        }

        points
    }
}

/// Picks a business domain by running every registered scorer.
#[derive(Debug)]
pub struct DomainClassifier {
    scorers: Vec<Box<dyn DomainScorer>>,
    fallback: Domain,
}

impl DomainClassifier {
    /// Classifier with the built-in keyword scorers in priority order:
    /// sales, financial, marketing, operations, customer, scientific.
    pub fn new() -> Self {
        Self {
            scorers: Domain::ALL
                .iter()
                .map(|&d| Box::new(KeywordScorer::builtin(d)) as Box<dyn DomainScorer>)
                .collect(),
            fallback: Domain::Customer,
        }
    }

    /// Classifier with no scorers; every dataset gets the fallback until
    /// scorers are added.
    pub fn empty(fallback: Domain) -> Self {
        Self {
            scorers: Vec::new(),
            fallback,
        }
    }

    /// Register another scorer. Later scorers lose ties.
    pub fn with_scorer(mut self, scorer: impl DomainScorer + 'static) -> Self {
        self.scorers.push(Box::new(scorer));
        self
    }

    /// Points per scorer, in registration order.
    pub fn scores(&self, column_names: &[&str], file_name: Option<&str>) -> Vec<(Domain, u32)> {
        self.scorers
            .iter()
            .map(|s| (s.domain(), s.score(column_names, file_name)))
            .collect()
    }

    /// Detect the domain; the fallback wins when nothing scores.
    pub fn detect(&self, column_names: &[&str], file_name: Option<&str>) -> Domain {
        let scores = self.scores(column_names, file_name);

        let mut best: Option<(Domain, u32)> = None;
        for (domain, points) in scores {
            if points > best.map_or(0, |(_, p)| p) {
                best = Some((domain, points));
            }
        }

        let domain = best.map_or(self.fallback, |(d, _)| d);
        debug!(%domain, points = best.map_or(0, |(_, p)| p), "detected domain");
        domain
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the domain with the built-in scorers.
pub fn detect_domain(column_names: &[&str], file_name: Option<&str>) -> Domain {
    DomainClassifier::new().detect(column_names, file_name)
}
