//! Wet/dry mixing.

use lento_core::SampleBuffer;

/// Blend a dry signal with a wet (reverb) buffer.
///
/// The dry buffer is authoritative: the output copies its channel count,
/// length and sample rate. The wet buffer is looped cyclically (`i % len`)
/// to cover the full dry length, so it may be shorter or longer than the
/// dry signal. When the dry signal has more channels than the wet buffer,
/// the last wet channel is reused.
///
/// No clipping is applied; with hot gain settings the output can exceed
/// `[-1.0, 1.0]`. Downstream consumers clamp at their boundary.
pub fn mix(
    dry: &SampleBuffer,
    wet: &SampleBuffer,
    dry_level: f32,
    wet_level: f32,
) -> SampleBuffer {
    let wet_len = wet.len();

    let channels = dry
        .channels()
        .enumerate()
        .map(|(ch, dry_samples)| {
            if wet_len == 0 {
                return dry_samples.iter().map(|s| s * dry_level).collect();
            }
            let wet_samples = wet.channel(ch.min(wet.num_channels() - 1));
            dry_samples
                .iter()
                .enumerate()
                .map(|(i, s)| s * dry_level + wet_samples[i % wet_len] * wet_level)
                .collect()
        })
        .collect();

    SampleBuffer::from_channels(channels, dry.sample_rate())
        .expect("mixed channels share the dry buffer's length")
}
