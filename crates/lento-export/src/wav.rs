//! WAV format encoder using hound
//!
//! Serializes a [`SampleBuffer`] into canonical 16-bit PCM RIFF/WAVE, in
//! memory or straight to a file. The byte stream is exactly
//! `44 + len * channels * 2` bytes: the 44-byte header followed by
//! little-endian 16-bit samples in standard time-interleaved frame order.
//!
//! Samples are clamped to `[-1.0, 1.0]` before conversion, so out-of-range
//! values produced by mixing or echo accumulation saturate instead of
//! wrapping.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use lento_core::SampleBuffer;

use crate::error::{ExportError, Result};

/// Encode a buffer to WAV bytes in memory.
pub fn encode_wav_memory(buffer: &SampleBuffer) -> Result<Vec<u8>> {
    let spec = wav_spec(buffer)?;

    let mut bytes = Vec::new();
    {
        let cursor = Cursor::new(&mut bytes);
        let mut writer = WavWriter::new(cursor, spec)?;
        write_frames(&mut writer, buffer)?;
        // Finalize writes the header and flushes
        writer.finalize()?;
    }

    Ok(bytes)
}

/// Encode a buffer to a WAV file.
pub fn encode_wav_file(buffer: &SampleBuffer, path: impl AsRef<Path>) -> Result<()> {
    let spec = wav_spec(buffer)?;

    let mut writer = WavWriter::create(path, spec)?;
    write_frames(&mut writer, buffer)?;
    writer.finalize()?;

    Ok(())
}

fn wav_spec(buffer: &SampleBuffer) -> Result<WavSpec> {
    let channels = u16::try_from(buffer.num_channels())
        .map_err(|_| ExportError::InvalidData(format!(
            "{} channels exceed the WAV header's channel field",
            buffer.num_channels()
        )))?;

    Ok(WavSpec {
        channels,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    })
}

/// Write samples frame-interleaved: frame 0 of every channel, then frame 1,
/// and so on.
fn write_frames<W: Write + Seek>(writer: &mut WavWriter<W>, buffer: &SampleBuffer) -> Result<()> {
    for i in 0..buffer.len() {
        for channel in buffer.channels() {
            writer.write_sample(float_to_i16(channel[i]))?;
        }
    }
    Ok(())
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}
