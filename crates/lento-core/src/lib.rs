//! Shared types for the lento pipeline: the sample buffer representation
//! and the processing options consumed by the DSP stages.
//!
//! Every pipeline stage takes a [`SampleBuffer`] by reference and returns a
//! freshly allocated one; buffers are never mutated in place once handed to
//! a stage.

mod buffer;
mod options;

pub use buffer::{BufferError, SampleBuffer};
pub use options::{AmbientSounds, EchoOptions, LofiOptions, ProcessingOptions};

/// Result type for buffer construction.
pub type Result<T> = std::result::Result<T, BufferError>;
