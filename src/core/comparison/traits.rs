//! Trait definition for comparison backends.

use super::ComparisonResult;
use crate::core::credentials::Credentials;
use crate::error::ServiceError;
use crate::events::EventSender;
use std::future::Future;

/// Request options passed through to the service
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompareOptions {
    /// Minimum similarity (0-100) for a face to count as a match.
    /// `None` keeps the service default.
    pub similarity_threshold: Option<f32>,
}

/// A service that compares the face in `source` with faces in `target`
pub trait FaceComparator: Send + Sync {
    /// Submit both images as opaque bytes.
    ///
    /// Implementations must not cache clients across calls or retry.
    fn compare(
        &self,
        credentials: &Credentials,
        source: &[u8],
        target: &[u8],
        options: &CompareOptions,
        events: &EventSender,
    ) -> impl Future<Output = Result<ComparisonResult, ServiceError>> + Send;

    /// Human-readable backend name
    fn name(&self) -> &'static str;
}
