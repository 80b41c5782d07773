//! # Lento - Lo-fi Audio Post-Processing Pipeline
//!
//! Offline pipeline that gives uploaded audio a lo-fi character: a
//! nearest-neighbor slow-down, a synthetic reverb tail, a wet/dry mix and
//! an additive echo trail, with 16-bit WAV and ffmpeg-backed MP3 export.
//!
//! ## Architecture
//!
//! Lento is an umbrella crate that coordinates:
//! - **lento-core** - Sample buffer and processing options
//! - **lento-dsp** - The DSP stages (stretch, reverb, mix, echo)
//! - **lento-export** - WAV encoding and the external transcoder adapter
//!
//! The umbrella crate itself owns the decode boundary (symphonia), the
//! pipeline orchestrator, and the background processing handle.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lento::prelude::*;
//!
//! # fn main() -> lento::Result<()> {
//! let data = std::fs::read("upload.mp3")?;
//!
//! // Preview path: failures collapse into None.
//! if let Some(source) = process_audio(&SymphoniaContext, &data, &ProcessingOptions::default()) {
//!     println!("{:.1}s ready to play", source.duration_seconds());
//! }
//!
//! // Export path: failures propagate.
//! let decoded = lento::decode::decode_bytes(&data)?;
//! let processed = process_buffer(&decoded, &ProcessingOptions::default())?;
//! export_to_file("lofi.mp3", &processed)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - WAV plus MP3 export
//! - `mp3` - MP3 export via the external ffmpeg transcoder

pub mod context;
pub mod decode;
mod error;
pub mod pipeline;

/// Re-export of lento-core for direct access
pub use lento_core as core;

/// Re-export of lento-dsp for direct access
pub use lento_dsp as dsp;

/// Re-export of lento-export for direct access
pub use lento_export as export;

pub use context::{AudioContext, PlaybackSource, SymphoniaContext};
pub use decode::{decode_bytes, decode_file, DecodeError};
pub use error::{Error, Result};
pub use lento_core::{
    AmbientSounds, EchoOptions, LofiOptions, ProcessingOptions, SampleBuffer,
};
pub use pipeline::{
    process_audio, process_audio_with_progress, process_buffer, ProcessHandle, ProcessStatus,
};

/// Everything a typical caller needs.
pub mod prelude {
    pub use crate::context::{AudioContext, PlaybackSource, SymphoniaContext};
    pub use crate::pipeline::{
        process_audio, process_buffer, ProcessHandle, ProcessStatus,
    };
    pub use lento_core::{EchoOptions, LofiOptions, ProcessingOptions, SampleBuffer};
    pub use lento_export::{encode_wav_memory, export_to_file};
}
