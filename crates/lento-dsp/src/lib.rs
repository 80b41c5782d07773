//! Offline DSP stages for the lento pipeline.
//!
//! Each stage is a pure function from an input [`SampleBuffer`] (plus
//! parameters) to a freshly allocated output buffer:
//!
//! - [`stretch`] - nearest-neighbor time-stretch (slow-down without pitch
//!   correction)
//! - [`reverb_tail`] - synthetic decaying-noise stand-in for a room
//!   impulse response
//! - [`mix`] - wet/dry blend with the wet buffer looped over the dry length
//! - [`echo`] - additive delayed, decayed repetitions
//!
//! None of the stages clamp their output; intermediate values may exceed
//! `[-1.0, 1.0]` and are clamped once at the encoder boundary.
//!
//! [`SampleBuffer`]: lento_core::SampleBuffer

mod echo;
mod error;
mod mix;
mod reverb;
mod stretch;

pub use echo::echo;
pub use error::{Error, Result};
pub use mix::mix;
pub use reverb::reverb_tail;
pub use stretch::stretch;
