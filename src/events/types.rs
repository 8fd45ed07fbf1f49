//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All events emitted while a comparison runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Remote comparison events
    Compare(CompareEvent),
    /// Session-level events
    Pipeline(PipelineEvent),
}

/// Events from the comparison client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// A fresh service client was built for this call
    ClientCreated { region: String },
    /// Both images were handed to the service
    Submitted {
        source_bytes: usize,
        target_bytes: usize,
    },
    /// The service answered
    Completed { match_count: usize },
    /// The service call failed
    Failed { message: String },
}

/// Session-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// A submission was accepted
    Started { run_id: Uuid },
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Submission refused before any remote call
    Rejected { missing: Vec<String> },
    /// Comparison and report finished
    Completed { summary: PipelineSummary },
    /// The attempt failed
    Error { message: String },
}

/// Coarse milestones of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    ConnectingClient,
    ReadingImages,
    Comparing,
    Reporting,
}

impl PipelinePhase {
    /// Progress percentage reached when this phase starts
    pub fn progress_percent(&self) -> u64 {
        match self {
            PipelinePhase::ConnectingClient => 10,
            PipelinePhase::ReadingImages => 40,
            PipelinePhase::Comparing => 70,
            PipelinePhase::Reporting => 90,
        }
    }
}

/// Summary of a finished comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub run_id: Uuid,
    /// Number of face matches returned
    pub match_count: usize,
    /// Similarity of the headline match, if any
    pub best_similarity: Option<f32>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::ConnectingClient => write!(f, "Creating client"),
            PipelinePhase::ReadingImages => write!(f, "Reading images"),
            PipelinePhase::Comparing => write!(f, "Comparing faces"),
            PipelinePhase::Reporting => write!(f, "Building report"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Compare(CompareEvent::Submitted {
            source_bytes: 2048,
            target_bytes: 4096,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Compare(CompareEvent::Submitted { target_bytes, .. }) => {
                assert_eq!(target_bytes, 4096);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn phases_advance_progress() {
        let phases = [
            PipelinePhase::ConnectingClient,
            PipelinePhase::ReadingImages,
            PipelinePhase::Comparing,
            PipelinePhase::Reporting,
        ];
        for pair in phases.windows(2) {
            assert!(pair[0].progress_percent() < pair[1].progress_percent());
        }
    }
}
