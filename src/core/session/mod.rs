//! # Session Module
//!
//! Holds the operator's current inputs and runs one submission at a time.
//!
//! ## Stages
//! 1. **Check** - credentials complete and both images present
//! 2. **Compare** - one call to the comparison service, awaited
//! 3. **Report** - built only from a successful result
//!
//! Inputs survive a failed attempt, so the operator can fix one thing
//! and resubmit.

use crate::core::comparison::{CompareOptions, ComparisonResult, FaceComparator};
use crate::core::credentials::Credentials;
use crate::core::digest::DigestAlgorithm;
use crate::core::intake::{ImageAsset, ImageSlot};
use crate::core::reporter::{Report, ReportBuilder};
use crate::error::{FaceCompareError, InputIncomplete, MissingInput, Result};
use crate::events::{
    Event, EventSender, PipelineEvent, PipelinePhase, PipelineSummary, null_sender,
};
use std::time::Instant;
use uuid::Uuid;

/// Options applied to every submission of a session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub compare: CompareOptions,
    pub digest: DigestAlgorithm,
}

/// Everything produced by one successful submission
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub run_id: Uuid,
    pub result: ComparisonResult,
    pub report: Report,
    pub duration_ms: u64,
}

/// The operator's inputs between submissions
#[derive(Debug, Default)]
pub struct ComparisonSession {
    credentials: Option<Credentials>,
    source: Option<ImageAsset>,
    target: Option<ImageAsset>,
    options: SessionOptions,
}

impl ComparisonSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Fill a slot, replacing any earlier upload
    pub fn set_image(&mut self, slot: ImageSlot, asset: ImageAsset) {
        match slot {
            ImageSlot::Source => self.source = Some(asset),
            ImageSlot::Target => self.target = Some(asset),
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&ImageAsset> {
        match slot {
            ImageSlot::Source => self.source.as_ref(),
            ImageSlot::Target => self.target.as_ref(),
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Inputs still needed before a submission is accepted
    pub fn missing_inputs(&self) -> Vec<MissingInput> {
        let mut missing = match &self.credentials {
            Some(credentials) => credentials.missing_fields(),
            None => vec![
                MissingInput::AccessKey,
                MissingInput::SecretKey,
                MissingInput::Region,
            ],
        };
        if self.source.is_none() {
            missing.push(MissingInput::SourceImage);
        }
        if self.target.is_none() {
            missing.push(MissingInput::TargetImage);
        }
        missing
    }

    /// Submit without progress reporting
    pub async fn submit<C: FaceComparator>(&self, comparator: &C) -> Result<ComparisonOutcome> {
        self.submit_with_events(comparator, &null_sender()).await
    }

    /// Check inputs, compare once, then build the report.
    ///
    /// The comparator is never called when an input is missing.
    pub async fn submit_with_events<C: FaceComparator>(
        &self,
        comparator: &C,
        events: &EventSender,
    ) -> Result<ComparisonOutcome> {
        let (credentials, source, target) = match (&self.credentials, &self.source, &self.target) {
            (Some(credentials), Some(source), Some(target)) if credentials.is_complete() => {
                (credentials, source, target)
            }
            _ => {
                let missing = self.missing_inputs();
                tracing::warn!(?missing, "Submission refused");
                events.send(Event::Pipeline(PipelineEvent::Rejected {
                    missing: missing.iter().map(|m| m.to_string()).collect(),
                }));
                return Err(InputIncomplete { missing }.into());
            }
        };

        let run_id = Uuid::new_v4();
        let start_time = Instant::now();
        events.send(Event::Pipeline(PipelineEvent::Started { run_id }));
        tracing::info!(
            %run_id,
            backend = comparator.name(),
            region = credentials.region(),
            source = source.filename(),
            target = target.filename(),
            "Starting comparison"
        );

        phase(events, PipelinePhase::ConnectingClient);
        phase(events, PipelinePhase::ReadingImages);
        let (source_bytes, target_bytes) = (source.bytes(), target.bytes());
        tracing::debug!(
            source_bytes = source_bytes.len(),
            target_bytes = target_bytes.len(),
            "Image bytes ready"
        );

        phase(events, PipelinePhase::Comparing);
        let result = match comparator
            .compare(
                credentials,
                source_bytes,
                target_bytes,
                &self.options.compare,
                events,
            )
            .await
        {
            Ok(result) => result,
            Err(err) => {
                events.send(Event::Pipeline(PipelineEvent::Error {
                    message: err.message.clone(),
                }));
                return Err(FaceCompareError::Service(err));
            }
        };

        phase(events, PipelinePhase::Reporting);
        let report = ReportBuilder::new(self.options.digest).build(
            credentials.region(),
            source,
            target,
            &result,
        );

        let duration_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            %run_id,
            matches = result.match_count(),
            duration_ms,
            "Comparison complete"
        );
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                run_id,
                match_count: result.match_count(),
                best_similarity: result.best_match().map(|m| m.similarity),
                duration_ms,
            },
        }));

        Ok(ComparisonOutcome {
            run_id,
            result,
            report,
            duration_ms,
        })
    }
}

fn phase(events: &EventSender, phase: PipelinePhase) {
    events.send(Event::Pipeline(PipelineEvent::PhaseChanged { phase }));
}
