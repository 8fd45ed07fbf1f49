//! # Face Compare
//!
//! Compare the faces in two photos with a managed face-comparison service
//! and keep a traceable plain-text report of the outcome.
//!
//! ## Pipeline
//! credentials -> image intake -> remote comparison -> digest & report
//!
//! The service does all face detection and scoring. This crate validates
//! the inputs, submits the raw bytes, keeps the full structured answer and
//! writes a report naming each file by its content digest.
//!
//! ## Architecture
//! The library is split into a core engine (presentation-agnostic) and
//! presentation layers:
//! - `core` - The comparison pipeline
//! - `config` - Explicit startup configuration
//! - `events` - Progress reporting for any UI
//! - `error` - Error taxonomy

pub mod config;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{FaceCompareError, Result};

/// Initialize tracing for the library
///
/// Filtering follows `RUST_LOG`. Output goes to stderr so it never mixes
/// with machine-readable results on stdout. Calling this twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
