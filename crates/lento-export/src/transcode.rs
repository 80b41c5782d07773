//! External transcoder adapter.
//!
//! Wraps an `ffmpeg` binary behind the narrow interface the export path
//! needs: load the engine once per process, write named input bytes, run
//! one command, read named output bytes back. The "virtual filesystem" of
//! the engine is a private scratch directory per invocation.
//!
//! The engine handle is a process-wide singleton: the first caller locates
//! and verifies the binary, concurrent callers block on that same
//! initialization, and the outcome (including failure) is cached for the
//! life of the process. There is no teardown and no automatic retry.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use lento_core::SampleBuffer;

use crate::error::{ExportError, Result};
use crate::wav;

/// Environment variable naming the ffmpeg binary, checked before `PATH`.
pub const FFMPEG_ENV: &str = "LENTO_FFMPEG";

/// VBR quality passed as `-q:a` (0 best, 9 worst).
const MP3_QUALITY: &str = "2";

/// Playback-rate factor applied by the fixed export filter. Lowering the
/// asetrate before resampling back slows and deepens the audio, the final
/// touch of the lo-fi export.
const EXPORT_RATE_FACTOR: &str = "0.9";

static ENGINE: OnceLock<std::result::Result<FfmpegEngine, String>> = OnceLock::new();

/// Handle to the external transcoding engine.
pub struct FfmpegEngine {
    binary: PathBuf,
}

impl FfmpegEngine {
    /// Load the engine, locating and verifying the binary on first use.
    ///
    /// Subsequent calls return the cached handle; a failed load is cached
    /// too and re-reported without retrying.
    pub fn load() -> Result<&'static FfmpegEngine> {
        let slot = ENGINE.get_or_init(|| {
            log::debug!("locating ffmpeg binary");
            Self::locate()
        });
        match slot {
            Ok(engine) => Ok(engine),
            Err(message) => Err(ExportError::EngineLoad(message.clone())),
        }
    }

    fn locate() -> std::result::Result<FfmpegEngine, String> {
        let name = format!("ffmpeg{}", env::consts::EXE_SUFFIX);

        if let Some(path) = env::var_os(FFMPEG_ENV) {
            let path = PathBuf::from(path);
            if Self::verify(&path) {
                return Ok(FfmpegEngine { binary: path });
            }
            return Err(format!(
                "{} (from {FFMPEG_ENV}) is not a runnable ffmpeg",
                path.display()
            ));
        }

        let path_var = env::var_os("PATH").ok_or_else(|| "PATH is not set".to_string())?;
        for dir in env::split_paths(&path_var) {
            let candidate = dir.join(&name);
            if candidate.is_file() && Self::verify(&candidate) {
                log::debug!("using ffmpeg at {}", candidate.display());
                return Ok(FfmpegEngine { binary: candidate });
            }
        }

        Err(format!("no runnable {name} found on PATH"))
    }

    fn verify(path: &Path) -> bool {
        Command::new(path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Path of the verified binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Write `input` under `input_name`, run one command with the given
    /// extra arguments, and read back the bytes of `output_name`.
    ///
    /// The output format is inferred by the engine from the output file
    /// name, as with the in-browser engine this adapter stands in for.
    pub fn run(
        &self,
        input_name: &str,
        input: &[u8],
        args: &[&str],
        output_name: &str,
    ) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join(input_name);
        let output_path = dir.path().join(output_name);
        fs::write(&input_path, input)?;

        log::debug!("transcoding {input_name} -> {output_name}");
        let output = Command::new(&self.binary)
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(&input_path)
            .args(args)
            .arg(&output_path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!("transcoding {input_name} failed: {}", stderr.trim());
            return Err(ExportError::Transcode(stderr.trim().to_string()));
        }

        Ok(fs::read(&output_path)?)
    }
}

/// The fixed audio filter applied on MP3 export.
fn export_filter(sample_rate: u32) -> String {
    format!("asetrate={sample_rate}*{EXPORT_RATE_FACTOR},aresample={sample_rate}")
}

/// Export a buffer as MP3 bytes via the external engine.
///
/// The buffer is WAV-encoded, slowed by the fixed
/// `asetrate`/`aresample` filter, and re-encoded at `-q:a 2`.
pub fn export_mp3(buffer: &SampleBuffer) -> Result<Vec<u8>> {
    let wav_bytes = wav::encode_wav_memory(buffer)?;
    let engine = FfmpegEngine::load()?;

    let filter = export_filter(buffer.sample_rate());
    engine.run(
        "input.wav",
        &wav_bytes,
        &["-af", &filter, "-q:a", MP3_QUALITY],
        "output.mp3",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filter() {
        assert_eq!(
            export_filter(44100),
            "asetrate=44100*0.9,aresample=44100"
        );
        assert_eq!(
            export_filter(48000),
            "asetrate=48000*0.9,aresample=48000"
        );
    }

    #[test]
    fn test_load_is_cached() {
        // Whatever the first outcome was, the second call must reuse it:
        // the same engine instance, or the same cached failure.
        match (FfmpegEngine::load(), FfmpegEngine::load()) {
            (Ok(a), Ok(b)) => assert!(std::ptr::eq(a, b)),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            _ => panic!("engine load outcome changed between calls"),
        }
    }

    #[test]
    fn test_mp3_export() {
        // Skipped silently when no ffmpeg is installed; the engine is an
        // external collaborator.
        let Ok(_) = FfmpegEngine::load() else { return };

        let samples: Vec<f32> = (0..8820)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin() * 0.5)
            .collect();
        let buffer =
            SampleBuffer::from_channels(vec![samples.clone(), samples], 44100).unwrap();

        let bytes = export_mp3(&buffer).unwrap();
        assert!(!bytes.is_empty());
        assert_ne!(&bytes[..4], b"RIFF", "output must no longer be WAV");
    }

    #[test]
    fn test_run_reports_engine_failure() {
        let Ok(engine) = FfmpegEngine::load() else { return };

        // Garbage input bytes cannot be probed; the failure must surface
        // as a Transcode error, not a panic or silent empty output.
        let result = engine.run("input.wav", b"not audio", &[], "output.mp3");
        assert!(matches!(result, Err(ExportError::Transcode(_))));
    }
}
