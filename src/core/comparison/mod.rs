//! # Comparison Module
//!
//! Delegates face comparison to a remote service.
//!
//! Nothing here detects or scores faces. The service answers with an
//! ordered list of matches and the crate keeps all of it; the report
//! only surfaces the best one.
//!
//! ## Failure model
//! Every remote fault (bad credentials, network, throttling, rejected
//! image) becomes a single [`ServiceError`](crate::error::ServiceError)
//! carrying the service's message. There is no retry.

mod rekognition;
mod traits;
mod types;

pub use rekognition::RekognitionComparator;
pub use traits::{CompareOptions, FaceComparator};
pub use types::{
    BoundingBox, ComparedFace, ComparisonResult, FaceMatch, ImageQuality, Landmark, Pose,
    SourceFace,
};
