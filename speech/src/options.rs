//! Adapter configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use ttsbridge_audio::resampler::Quality;
use ttsbridge_audio::tone::ToneSpec;

/// Options for configuring an [`AudioAdapter`](crate::AudioAdapter).
///
/// Tone sample rates are ignored; tones are always generated at the target
/// rate of each adaptation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Resampling strategy for the full pipeline (default: High).
    pub quality: Quality,
    /// Prepend the pilot tone to adapted speech (default: true).
    pub prepend_pilot: bool,
    /// Start marker placed ahead of speech.
    pub pilot: ToneSpec,
    /// Tone emitted when no speech could be produced.
    pub diagnostic_tone: ToneSpec,
    /// Length of the last-resort silence, in milliseconds (default: 100).
    pub silence_ms: u64,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            quality: Quality::High,
            prepend_pilot: true,
            pilot: ToneSpec::PILOT,
            diagnostic_tone: ToneSpec::BEEP,
            silence_ms: 100,
        }
    }
}

impl AdapterOptions {
    /// Sets the resampling quality.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Enables or disables the pilot tone.
    pub fn with_pilot(mut self, enabled: bool) -> Self {
        self.prepend_pilot = enabled;
        self
    }

    /// Sets the pilot tone.
    pub fn with_pilot_tone(mut self, tone: ToneSpec) -> Self {
        self.pilot = tone;
        self
    }

    /// Sets the diagnostic tone.
    pub fn with_diagnostic_tone(mut self, tone: ToneSpec) -> Self {
        self.diagnostic_tone = tone;
        self
    }

    /// Sets the silence duration.
    pub fn with_silence(mut self, duration: Duration) -> Self {
        self.silence_ms = duration.as_millis() as u64;
        self
    }

    pub fn silence(&self) -> Duration {
        Duration::from_millis(self.silence_ms)
    }
}
