//! # Events Module
//!
//! Progress reporting for the comparison pipeline.
//!
//! The core emits events through a channel so any presentation layer
//! (terminal, web, desktop) can show coarse milestones while the remote
//! call is in flight.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Pipeline(PipelineEvent::PhaseChanged { phase }) = event {
//!             println!("{}% {}", phase.progress_percent(), phase);
//!         }
//!     }
//! });
//!
//! session.submit_with_events(&comparator, &sender).await?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
