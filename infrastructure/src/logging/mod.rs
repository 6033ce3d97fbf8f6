//! Run transcript persistence

pub mod transcript;

pub use transcript::JsonlTranscriptLogger;
