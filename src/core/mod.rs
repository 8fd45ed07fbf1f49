//! # Core Module
//!
//! The presentation-agnostic comparison engine.
//!
//! ## Modules
//! - `credentials` - Collects access key, secret key and region
//! - `intake` - Accepts and validates the two uploaded images
//! - `comparison` - Delegates face comparison to the remote service
//! - `digest` - Content digests for report traceability
//! - `reporter` - Builds and saves the plain-text report
//! - `session` - Runs one submission end to end

pub mod comparison;
pub mod credentials;
pub mod digest;
pub mod intake;
pub mod reporter;
pub mod session;

// Re-export commonly used types
pub use comparison::{CompareOptions, ComparisonResult, FaceComparator, FaceMatch, RekognitionComparator};
pub use credentials::{CredentialCollector, CredentialInput, Credentials};
pub use digest::{digest, ContentDigest, DigestAlgorithm};
pub use intake::{ImageAsset, ImageSlot};
pub use reporter::{Headline, Report, ReportBuilder};
pub use session::{ComparisonOutcome, ComparisonSession, SessionOptions};
