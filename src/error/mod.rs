//! # Error Module
//!
//! Error types for the face comparison pipeline.
//!
//! ## Design Principles
//! - **Never panic** on operator input - return errors instead
//! - **Include context** - file names, missing fields, the service's own message
//! - **One category per failure class** - every remote fault is a `ServiceError`
//! - **Never leak secrets** - no error message carries the secret key

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum FaceCompareError {
    #[error("{0}")]
    Incomplete(#[from] InputIncomplete),

    #[error("Invalid image: {0}")]
    Image(#[from] InvalidImageError),

    #[error("Comparison failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// An input required for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    AccessKey,
    SecretKey,
    Region,
    SourceImage,
    TargetImage,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::AccessKey => write!(f, "access key"),
            MissingInput::SecretKey => write!(f, "secret key"),
            MissingInput::Region => write!(f, "region"),
            MissingInput::SourceImage => write!(f, "image 1"),
            MissingInput::TargetImage => write!(f, "image 2"),
        }
    }
}

/// Submission refused before contacting the service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Credentials and both images are required (missing: {})", join_missing(.missing))]
pub struct InputIncomplete {
    pub missing: Vec<MissingInput>,
}

fn join_missing(missing: &[MissingInput]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while accepting an uploaded image
#[derive(Error, Debug)]
pub enum InvalidImageError {
    #[error("{filename} is empty")]
    Empty { filename: String },

    #[error("{filename} is not a PNG or JPEG image (detected: {detected})")]
    UnsupportedFormat { filename: String, detected: String },

    #[error("Failed to decode {filename}: {reason}")]
    Decode { filename: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Preview rendering failed. Never blocks the comparison.
#[derive(Error, Debug)]
#[error("Preview of {filename} unavailable: {reason}")]
pub struct PreviewError {
    pub filename: String,
    pub reason: String,
}

/// Coarse classification of a remote failure, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFaultKind {
    Authentication,
    Network,
    Throttling,
    RejectedImage,
    Other,
}

impl ServiceFaultKind {
    /// Classify an AWS error code
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some(
                "AccessDeniedException"
                | "UnrecognizedClientException"
                | "InvalidSignatureException"
                | "InvalidClientTokenId"
                | "ExpiredTokenException"
                | "SignatureDoesNotMatch",
            ) => ServiceFaultKind::Authentication,
            Some(
                "ThrottlingException"
                | "ProvisionedThroughputExceededException"
                | "LimitExceededException",
            ) => ServiceFaultKind::Throttling,
            Some(
                "InvalidImageFormatException"
                | "ImageTooLargeException"
                | "InvalidParameterException"
                | "InvalidS3ObjectException",
            ) => ServiceFaultKind::RejectedImage,
            _ => ServiceFaultKind::Other,
        }
    }
}

impl fmt::Display for ServiceFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFaultKind::Authentication => write!(f, "authentication"),
            ServiceFaultKind::Network => write!(f, "network"),
            ServiceFaultKind::Throttling => write!(f, "throttling"),
            ServiceFaultKind::RejectedImage => write!(f, "rejected image"),
            ServiceFaultKind::Other => write!(f, "service"),
        }
    }
}

/// Any failure of the remote comparison call.
///
/// The message is the service's own text, shown to the operator as-is.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceFaultKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceFaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors that occur while saving a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FaceCompareError>;
