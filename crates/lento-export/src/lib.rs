//! # Lento Export
//!
//! Serialization of processed audio:
//! - **WAV encoding**: canonical 16-bit PCM via hound, in memory or to file
//! - **Transcoder adapter**: MP3 export through an external ffmpeg engine
//!
//! Unlike the playback-preview path in the `lento` umbrella crate, every
//! failure on the export path is hard: errors propagate to the caller as
//! [`ExportError`] instead of being swallowed.
//!
//! ## Feature Flags
//!
//! - `mp3` (default): MP3 export via the external transcoder

pub mod error;
pub mod wav;

#[cfg(feature = "mp3")]
pub mod transcode;

pub use error::{ExportError, Result};
pub use wav::{encode_wav_file, encode_wav_memory};

#[cfg(feature = "mp3")]
pub use transcode::{export_mp3, FfmpegEngine};

use lento_core::SampleBuffer;
use std::path::Path;

/// Export a buffer to a file with format detection by extension:
/// - `.wav` -> 16-bit PCM WAV
/// - `.mp3` -> MP3 via the external transcoder (requires the `mp3` feature)
pub fn export_to_file(path: impl AsRef<Path>, buffer: &SampleBuffer) -> Result<()> {
    let path = path.as_ref();
    let path_lower = path.to_string_lossy().to_lowercase();

    if path_lower.ends_with(".wav") {
        return wav::encode_wav_file(buffer, path);
    }

    if path_lower.ends_with(".mp3") {
        #[cfg(feature = "mp3")]
        {
            let bytes = transcode::export_mp3(buffer)?;
            std::fs::write(path, bytes)?;
            return Ok(());
        }
        #[cfg(not(feature = "mp3"))]
        return Err(ExportError::UnsupportedFormat(
            "MP3 support not enabled".into(),
        ));
    }

    Err(ExportError::UnsupportedFormat(format!(
        "Unknown or unsupported file extension: {}. Supported: .wav, .mp3",
        path.display()
    )))
}
