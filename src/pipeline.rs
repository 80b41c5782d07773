//! Pipeline orchestration: decode, stretch, reverb, mix, echo.
//!
//! Two entry points with deliberately different failure semantics:
//!
//! - [`process_audio`] (playback preview): any stage failure is caught
//!   here, logged, and collapsed into `None`. Callers get a single
//!   failure signal and no error taxonomy.
//! - [`process_buffer`] and everything in `lento-export` (export path):
//!   errors propagate as `Result`.
//!
//! [`ProcessHandle`] runs the preview path on a dedicated thread with
//! progress polling, so a slow decode never blocks the caller.

use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use lento_core::{ProcessingOptions, SampleBuffer};

use crate::context::{AudioContext, PlaybackSource, SymphoniaContext};
use crate::error::Result;

// Progress fractions reported at stage boundaries.
const PROGRESS_DECODED: f32 = 0.2;
const PROGRESS_STRETCHED: f32 = 0.4;
const PROGRESS_REVERB: f32 = 0.6;
const PROGRESS_MIXED: f32 = 0.75;
const PROGRESS_ECHOED: f32 = 0.95;

/// Run the full DSP chain over an already-decoded buffer.
///
/// Stage order is fixed: time-stretch, reverb synthesis, wet/dry mix,
/// echo. Absent option sub-configs fall back to their defaults.
pub fn process_buffer(input: &SampleBuffer, options: &ProcessingOptions) -> Result<SampleBuffer> {
    let lofi = options.lofi();
    let echo = options.echo();

    let stretched = lento_dsp::stretch(input, lofi.slow_factor)?;
    let tail = lento_dsp::reverb_tail(input.sample_rate(), lofi.room_size, lofi.damping)?;
    let mixed = lento_dsp::mix(&stretched, &tail, lofi.dry_level, lofi.wet_level);
    let echoed = lento_dsp::echo(&mixed, &echo)?;

    Ok(echoed)
}

/// Decode and process uploaded audio, returning a connected playback
/// source.
///
/// Every failure (corrupt file, invalid options) is logged and surfaced
/// as `None`; this path never panics or propagates errors.
pub fn process_audio<C: AudioContext>(
    ctx: &C,
    data: &[u8],
    options: &ProcessingOptions,
) -> Option<PlaybackSource> {
    process_audio_with_progress(ctx, data, options, |_| {})
}

/// [`process_audio`] with a progress callback receiving fractions in
/// `0.0..=1.0` at stage boundaries.
pub fn process_audio_with_progress<C: AudioContext>(
    ctx: &C,
    data: &[u8],
    options: &ProcessingOptions,
    on_progress: impl Fn(f32),
) -> Option<PlaybackSource> {
    match try_process(ctx, data, options, &on_progress) {
        Ok(source) => {
            on_progress(1.0);
            Some(source)
        }
        Err(e) => {
            log::error!("audio processing failed: {e}");
            None
        }
    }
}

fn try_process<C: AudioContext>(
    ctx: &C,
    data: &[u8],
    options: &ProcessingOptions,
    on_progress: &impl Fn(f32),
) -> Result<PlaybackSource> {
    let lofi = options.lofi();
    let echo = options.echo();

    let decoded = ctx.decode(data)?;
    on_progress(PROGRESS_DECODED);
    log::debug!(
        "processing {:.2}s of audio ({} channels at {} Hz)",
        decoded.duration_seconds(),
        decoded.num_channels(),
        decoded.sample_rate()
    );

    let stretched = lento_dsp::stretch(&decoded, lofi.slow_factor)?;
    on_progress(PROGRESS_STRETCHED);

    let tail = lento_dsp::reverb_tail(decoded.sample_rate(), lofi.room_size, lofi.damping)?;
    on_progress(PROGRESS_REVERB);

    let mixed = lento_dsp::mix(&stretched, &tail, lofi.dry_level, lofi.wet_level);
    on_progress(PROGRESS_MIXED);

    let echoed = lento_dsp::echo(&mixed, &echo)?;
    on_progress(PROGRESS_ECHOED);

    Ok(ctx.connect(echoed))
}

/// Status of a background processing run.
pub enum ProcessStatus {
    /// Progress 0.0..1.0.
    Running(f32),
    Complete(PlaybackSource),
    /// Processing failed; the single failure signal of the preview path.
    Failed,
    Pending,
}

/// Handle to a pipeline invocation running on a dedicated thread.
/// Poll with [`progress()`](ProcessHandle::progress) each frame.
///
/// Independent handles share no state; any number of uploads may be
/// processed concurrently.
pub struct ProcessHandle {
    progress_rx: Receiver<f32>,
    thread: Option<JoinHandle<Option<PlaybackSource>>>,
    last_progress: Option<f32>,
}

impl ProcessHandle {
    /// Start processing `data` on a background thread using the default
    /// context.
    pub fn start(data: Vec<u8>, options: ProcessingOptions) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(64);

        let thread = std::thread::Builder::new()
            .name("lento-process".into())
            .spawn(move || {
                process_audio_with_progress(&SymphoniaContext, &data, &options, |p| {
                    let _ = tx.try_send(p); // drop if full — the poller will catch up
                })
            })
            .expect("failed to spawn processing thread");

        Self {
            progress_rx: rx,
            thread: Some(thread),
            last_progress: None,
        }
    }

    /// Poll for the latest status (non-blocking).
    pub fn progress(&mut self) -> ProcessStatus {
        while let Ok(p) = self.progress_rx.try_recv() {
            self.last_progress = Some(p);
        }

        if self.thread.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(thread) = self.thread.take() {
                return match thread.join() {
                    Ok(Some(source)) => ProcessStatus::Complete(source),
                    Ok(None) => ProcessStatus::Failed,
                    Err(_) => {
                        log::error!("processing thread panicked");
                        ProcessStatus::Failed
                    }
                };
            }
        }
        if self.thread.is_none() {
            // Result already consumed by an earlier poll.
            return ProcessStatus::Failed;
        }

        match self.last_progress {
            Some(p) => ProcessStatus::Running(p),
            None => ProcessStatus::Pending,
        }
    }

    /// Block until processing finishes.
    pub fn wait(mut self) -> Option<PlaybackSource> {
        match self.thread.take() {
            Some(thread) => thread.join().unwrap_or_else(|_| {
                log::error!("processing thread panicked");
                None
            }),
            None => None,
        }
    }

    /// Whether the background thread has finished.
    pub fn is_done(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }
}
