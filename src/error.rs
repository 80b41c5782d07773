//! Centralized error type for the lento umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate
//! boundaries. Note that the playback-preview path never exposes this
//! type: `process_audio` collapses every failure into `None`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Decode: {0}")]
    Decode(#[from] crate::decode::DecodeError),

    #[error("Buffer: {0}")]
    Buffer(#[from] lento_core::BufferError),

    #[error("DSP: {0}")]
    Dsp(#[from] lento_dsp::Error),

    #[error("Export: {0}")]
    Export(#[from] lento_export::ExportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
