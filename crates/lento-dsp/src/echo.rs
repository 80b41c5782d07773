//! Echo synthesis.

use lento_core::{EchoOptions, SampleBuffer};

use crate::error::{Error, Result};

/// Append decayed, delayed repetitions of `input`.
///
/// The output holds `len + floor(delay * sample_rate) * max_echoes`
/// frames. The original signal is copied verbatim to the front; each
/// repetition `e` in `1..=max_echoes` then accumulates
/// `input[i] * decay^e * feedback^e` at offset `e * delay_samples + i`.
/// Repetitions overlap additively when the delay is shorter than the
/// signal, and later echoes fade under the two compounding multipliers.
///
/// With `max_echoes = 0` the output is a plain copy of the input.
/// Nothing is clamped.
pub fn echo(input: &SampleBuffer, options: &EchoOptions) -> Result<SampleBuffer> {
    if !options.delay.is_finite() || options.delay < 0.0 {
        return Err(Error::InvalidEchoDelay(options.delay));
    }

    let input_len = input.len();
    let delay_samples = (options.delay as f64 * input.sample_rate() as f64).floor() as usize;
    let output_len = input_len + delay_samples * options.max_echoes as usize;

    let channels = input
        .channels()
        .map(|samples| {
            let mut out = vec![0.0f32; output_len];
            out[..input_len].copy_from_slice(samples);

            for e in 1..=options.max_echoes {
                let gain = options.decay.powi(e as i32) * options.feedback.powi(e as i32);
                let offset = e as usize * delay_samples;
                for (i, &sample) in samples.iter().enumerate() {
                    let idx = offset + i;
                    if idx < output_len {
                        out[idx] += sample * gain;
                    }
                }
            }

            out
        })
        .collect();

    Ok(SampleBuffer::from_channels(channels, input.sample_rate())
        .expect("echo channels share one length"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn impulse(len: usize, rate: u32) -> SampleBuffer {
        let mut samples = vec![0.0f32; len];
        samples[0] = 1.0;
        SampleBuffer::from_channels(vec![samples], rate).unwrap()
    }

    #[test]
    fn test_output_length_formula() {
        let input = SampleBuffer::new(1, 44100, 44100).unwrap();
        let options = EchoOptions::default(); // delay 0.25s, 5 echoes
        let out = echo(&input, &options).unwrap();
        assert_eq!(out.len(), 44100 + 11025 * 5);
    }

    #[test]
    fn test_zero_echoes_is_a_copy() {
        let input =
            SampleBuffer::from_channels(vec![vec![0.1, -0.2, 0.3], vec![0.4, 0.5, -0.6]], 44100)
                .unwrap();
        let options = EchoOptions {
            max_echoes: 0,
            ..Default::default()
        };
        let out = echo(&input, &options).unwrap();
        assert_eq!(out.len(), input.len());
        assert_eq!(out.channel(0), input.channel(0));
        assert_eq!(out.channel(1), input.channel(1));
    }

    #[test]
    fn test_impulse_echo_train() {
        // 1s of delay at a 10 Hz "sample rate" keeps indices tiny.
        let input = impulse(5, 10);
        let options = EchoOptions {
            delay: 1.0,
            decay: 0.5,
            feedback: 0.5,
            max_echoes: 2,
        };
        let out = echo(&input, &options).unwrap();
        assert_eq!(out.len(), 5 + 10 * 2);
        assert_relative_eq!(out.channel(0)[0], 1.0);
        // First echo: decay^1 * feedback^1 = 0.25
        assert_relative_eq!(out.channel(0)[10], 0.25);
        // Second echo: decay^2 * feedback^2 = 0.0625
        assert_relative_eq!(out.channel(0)[20], 0.0625);
        // Silence elsewhere
        assert_eq!(out.channel(0)[1], 0.0);
        assert_eq!(out.channel(0)[11], 0.0);
    }

    #[test]
    fn test_overlapping_echoes_accumulate() {
        // Delay of one frame against a two-frame signal: repetitions
        // overlap and must add, not overwrite.
        let input =
            SampleBuffer::from_channels(vec![vec![1.0, 1.0]], 1).unwrap();
        let options = EchoOptions {
            delay: 1.0,
            decay: 1.0,
            feedback: 1.0,
            max_echoes: 2,
        };
        let out = echo(&input, &options).unwrap();
        // frame 0: original; frame 1: original + echo 1; frame 2: echo 1 +
        // echo 2; frame 3: echo 2.
        assert_eq!(out.channel(0), &[1.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_echo_of_silence_is_silence() {
        let input = SampleBuffer::new(2, 1000, 44100).unwrap();
        let out = echo(&input, &EchoOptions::default()).unwrap();
        assert!(out.channel(0).iter().all(|&s| s == 0.0));
        assert!(out.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let input = impulse(4, 44100);
        let options = EchoOptions {
            delay: -0.1,
            ..Default::default()
        };
        assert!(echo(&input, &options).is_err());
    }

    #[test]
    fn test_zero_delay_piles_echoes_on_the_original() {
        let input = impulse(3, 44100);
        let options = EchoOptions {
            delay: 0.0,
            decay: 0.5,
            feedback: 1.0,
            max_echoes: 2,
        };
        let out = echo(&input, &options).unwrap();
        assert_eq!(out.len(), 3);
        // 1 + 0.5 + 0.25 superposed at the impulse position.
        assert_relative_eq!(out.channel(0)[0], 1.75);
    }
}
