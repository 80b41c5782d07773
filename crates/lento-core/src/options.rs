//! Processing options.
//!
//! A [`ProcessingOptions`] value is consumed once per pipeline invocation.
//! Absent sub-configs resolve to their `Default` values; individual fields
//! are overridden with struct update syntax:
//!
//! ```
//! use lento_core::{LofiOptions, ProcessingOptions};
//!
//! let options = ProcessingOptions {
//!     lofi: Some(LofiOptions {
//!         slow_factor: 0.12,
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//! # let _ = options;
//! ```

use serde::{Deserialize, Serialize};

/// Ambient background layers.
///
/// Reserved: declared on the configuration surface but not consumed by any
/// current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientSounds {
    pub rain: bool,
    pub coffee_shop: bool,
    pub forest: bool,
}

/// Lo-fi effect parameters (time-stretch + reverb + wet/dry mix).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LofiOptions {
    /// Reverb tail duration in seconds.
    pub room_size: f32,
    /// Decay shape: the tail envelope is `exp(-i / (sample_rate * damping))`.
    pub damping: f32,
    /// Reverb gain in the wet/dry mix.
    pub wet_level: f32,
    /// Processed-signal gain in the wet/dry mix.
    pub dry_level: f32,
    /// Reserved: not consumed by the mixing math.
    pub delay: f32,
    /// Fraction of the original speed removed; `0.08` plays back at 92%.
    pub slow_factor: f32,
}

impl Default for LofiOptions {
    fn default() -> Self {
        Self {
            room_size: 0.75,
            damping: 0.5,
            wet_level: 0.08,
            dry_level: 0.2,
            delay: 0.0,
            slow_factor: 0.08,
        }
    }
}

/// Echo effect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoOptions {
    /// Seconds between echo repetitions.
    pub delay: f32,
    /// Per-repetition volume multiplier.
    pub decay: f32,
    /// Per-repetition feedback multiplier; compounds with `decay`.
    pub feedback: f32,
    /// Number of repetitions appended after the original signal.
    pub max_echoes: u32,
}

impl Default for EchoOptions {
    fn default() -> Self {
        Self {
            delay: 0.25,
            decay: 0.5,
            feedback: 0.3,
            max_echoes: 5,
        }
    }
}

/// Full per-invocation configuration.
///
/// `tempo`, `pitch`, `vinyl_crackle`, `tape_warble` and `ambient` are
/// reserved knobs: part of the documented contract, consumed by nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Reserved.
    pub tempo: f32,
    /// Reserved.
    pub pitch: f32,
    /// Reserved.
    pub vinyl_crackle: f32,
    /// Reserved.
    pub tape_warble: f32,
    /// Reserved.
    pub ambient: AmbientSounds,
    /// Lo-fi effect; `None` means defaults.
    pub lofi: Option<LofiOptions>,
    /// Echo effect; `None` means defaults.
    pub echo: Option<EchoOptions>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            tempo: 1.0,
            pitch: 0.0,
            vinyl_crackle: 0.0,
            tape_warble: 0.0,
            ambient: AmbientSounds::default(),
            lofi: None,
            echo: None,
        }
    }
}

impl ProcessingOptions {
    /// Effective lo-fi parameters (defaults when absent).
    pub fn lofi(&self) -> LofiOptions {
        self.lofi.unwrap_or_default()
    }

    /// Effective echo parameters (defaults when absent).
    pub fn echo(&self) -> EchoOptions {
        self.echo.unwrap_or_default()
    }
}
