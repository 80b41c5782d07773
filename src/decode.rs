//! Decode boundary: compressed audio bytes to a [`SampleBuffer`].
//!
//! Decoding is delegated to symphonia; this module only selects a track,
//! runs the packet loop, and converts the decoded audio to the planar
//! representation the pipeline works in. Container/codec support is
//! whatever symphonia was built with ("all" here), mirroring the broad
//! format surface of a platform decoder.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use lento_core::SampleBuffer;
use symphonia::core::audio::SampleBuffer as SymphoniaSampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Decode failure.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The container held no track with a codec we can decode.
    #[error("no supported audio track found")]
    NoSupportedTrack,

    /// The selected track does not declare a sample rate.
    #[error("decoder did not report a sample rate")]
    UnknownSampleRate,

    /// Probing succeeded but no audio frames came out.
    #[error("decoded stream contained no audio frames")]
    EmptyStream,

    /// Error from the decoder itself (corrupt or unsupported input).
    #[error("decode failed: {0}")]
    Symphonia(#[from] SymphoniaError),

    #[error(transparent)]
    Buffer(#[from] lento_core::BufferError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decode in-memory audio bytes (wav, mp3, ... as supported by symphonia).
pub fn decode_bytes(data: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(data.to_vec())),
        MediaSourceStreamOptions::default(),
    );
    decode_stream(mss, Hint::new())
}

/// Decode an audio file, using the extension as a format hint.
pub fn decode_file(path: impl AsRef<Path>) -> Result<SampleBuffer, DecodeError> {
    let path = path.as_ref();
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());
    decode_stream(mss, hint)
}

fn decode_stream(mss: MediaSourceStream, hint: Hint) -> Result<SampleBuffer, DecodeError> {
    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoSupportedTrack)?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut channels: Vec<Vec<f32>> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an UnexpectedEof I/O error.
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let num_channels = spec.channels.count();
                if channels.is_empty() {
                    channels = vec![Vec::new(); num_channels];
                }

                let mut interleaved =
                    SymphoniaSampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                interleaved.copy_interleaved_ref(decoded);
                let samples = interleaved.samples();
                for (ch, channel) in channels.iter_mut().enumerate() {
                    channel.extend(samples.iter().skip(ch).step_by(num_channels));
                }
            }
            // A corrupt packet is recoverable; skip it and keep going.
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("skipping undecodable packet: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if channels.is_empty() || channels[0].is_empty() {
        return Err(DecodeError::EmptyStream);
    }

    log::debug!(
        "decoded {} channel(s), {} frames at {} Hz",
        channels.len(),
        channels[0].len(),
        sample_rate
    );
    Ok(SampleBuffer::from_channels(channels, sample_rate)?)
}
