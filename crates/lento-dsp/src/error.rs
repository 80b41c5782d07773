//! Error types for lento-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// `slow_factor` must lie in `[0, 1)`.
    #[error("slow factor {0} out of range: must be >= 0 and < 1")]
    InvalidSlowFactor(f32),

    /// Reverb parameters must be positive.
    #[error("invalid reverb parameter {name}: {value} (must be positive)")]
    InvalidReverbParameter { name: &'static str, value: f32 },

    /// Echo delay must be non-negative.
    #[error("echo delay {0} out of range: must be >= 0")]
    InvalidEchoDelay(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
