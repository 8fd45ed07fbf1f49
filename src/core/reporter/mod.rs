//! # Reporter Module
//!
//! Turns a comparison into a plain-text report the operator can keep.
//!
//! A report names both files with their content digests so it can later
//! be tied back to the exact bytes that were compared. Apart from the
//! generation timestamp, the text depends only on its inputs.
//!
//! ## Headline
//! 1. **Match**: "Match found with 99.87% similarity (high confidence)."
//! 2. **No match**: "No matching face found."

mod export;
mod text;

pub use export::{report_file_name, REPORT_MIME_TYPE};

use crate::core::comparison::ComparisonResult;
use crate::core::digest::{ContentDigest, DigestAlgorithm};
use crate::core::intake::ImageAsset;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Confidence label attached to the headline similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    pub fn from_similarity(similarity: f32) -> Self {
        if similarity >= 90.0 {
            ConfidenceLevel::High
        } else if similarity >= 80.0 {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high confidence"),
            ConfidenceLevel::Moderate => write!(f, "moderate confidence"),
            ConfidenceLevel::Low => write!(f, "low confidence"),
        }
    }
}

/// One-line outcome of the comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Headline {
    Match {
        similarity: f32,
        confidence: ConfidenceLevel,
    },
    NoMatch,
}

impl Headline {
    pub fn from_result(result: &ComparisonResult) -> Self {
        match result.best_match() {
            Some(best) => Headline::Match {
                similarity: best.similarity,
                confidence: ConfidenceLevel::from_similarity(best.similarity),
            },
            None => Headline::NoMatch,
        }
    }
}

impl std::fmt::Display for Headline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Headline::Match {
                similarity,
                confidence,
            } => write!(
                f,
                "Match found with {:.2}% similarity ({}).",
                similarity, confidence
            ),
            Headline::NoMatch => write!(f, "No matching face found."),
        }
    }
}

/// A compared file as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedImage {
    pub filename: String,
    pub digest: ContentDigest,
}

/// The report for one successful comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub region: String,
    pub source: ReportedImage,
    pub target: ReportedImage,
    pub headline: Headline,
    pub match_count: usize,
}

impl Report {
    /// Plain-text body
    pub fn render(&self) -> String {
        text::render(self)
    }

    /// Download name, unique per second: `face_comparison_report_<unix>.txt`
    pub fn file_name(&self) -> String {
        report_file_name(self.generated_at.timestamp())
    }
}

/// Builds reports from a finished comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    algorithm: DigestAlgorithm,
}

impl ReportBuilder {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Build a report stamped with the local clock
    pub fn build(
        &self,
        region: &str,
        source: &ImageAsset,
        target: &ImageAsset,
        result: &ComparisonResult,
    ) -> Report {
        self.build_at(region, source, target, result, Local::now())
    }

    /// Build a report stamped with `generated_at`
    pub fn build_at(
        &self,
        region: &str,
        source: &ImageAsset,
        target: &ImageAsset,
        result: &ComparisonResult,
        generated_at: DateTime<Local>,
    ) -> Report {
        let reported = |asset: &ImageAsset| ReportedImage {
            filename: asset.filename().to_string(),
            digest: self.algorithm.digest(asset.bytes()),
        };

        Report {
            generated_at,
            region: region.to_string(),
            source: reported(source),
            target: reported(target),
            headline: Headline::from_result(result),
            match_count: result.match_count(),
        }
    }
}
