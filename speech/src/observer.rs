//! Typed diagnostics hooks for [`AudioAdapter`](crate::AudioAdapter).
//!
//! Every hook has a default body that emits a `tracing` event with
//! structured fields, so an observer only overrides what it wants to capture.

use std::fmt;
use std::sync::Arc;

use ttsbridge_audio::Format;
use ttsbridge_audio::pcm::PcmStats;
use ttsbridge_audio::resampler::Degraded;

use crate::error::AdaptError;
use crate::level::Level;

/// Recoverable oddities noticed while adapting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The input does not start with a RIFF/WAVE header.
    MissingRiffMarker { len: usize },
    /// Decoded speech is too short to plausibly hold an utterance.
    ShortAudio { bytes: usize },
    /// Raw PCM from the source ended mid-frame.
    TrailingBytes { dropped: usize },
    /// The pilot tone was left out.
    PilotSkipped { reason: String },
    /// Silence could not be encoded and a header-only WAV was emitted.
    HeaderOnlySilence { reason: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MissingRiffMarker { len } => {
                write!(f, "input of {} bytes has no RIFF/WAVE marker", len)
            }
            Anomaly::ShortAudio { bytes } => write!(f, "decoded audio is only {} bytes", bytes),
            Anomaly::TrailingBytes { dropped } => {
                write!(f, "dropped {} trailing byte(s) of raw pcm", dropped)
            }
            Anomaly::PilotSkipped { reason } => write!(f, "pilot tone skipped: {}", reason),
            Anomaly::HeaderOnlySilence { reason } => {
                write!(f, "silence emitted as a bare header: {}", reason)
            }
        }
    }
}

/// Receives adapter events.
pub trait Observer: Send + Sync {
    fn on_decoded(&self, format: Format, stats: &PcmStats) {
        tracing::debug!(
            format = %format,
            samples = stats.samples,
            duration_ms = stats.duration.as_millis() as u64,
            peak = stats.peak,
            "ttsbridge: decoded"
        );
    }

    /// The resampler used a simpler strategy than configured.
    fn on_degraded(&self, degraded: &Degraded) {
        tracing::warn!(
            requested = %degraded.requested,
            used = %degraded.used,
            reason = %degraded.reason,
            "ttsbridge: resampling degraded"
        );
    }

    /// `from` failed with `err` and the adapter moves on to `to`.
    fn on_fallback(&self, from: Level, to: Level, err: &AdaptError) {
        tracing::warn!(from = %from, to = %to, error = %err, "ttsbridge: falling back");
    }

    fn on_anomaly(&self, anomaly: &Anomaly) {
        tracing::warn!(anomaly = %anomaly, "ttsbridge: anomaly");
    }

    /// Output was produced at `level`.
    fn on_adapted(&self, level: Level, bytes: usize) {
        if level == Level::FullPipeline {
            tracing::debug!(level = %level, bytes, "ttsbridge: adapted");
        } else {
            tracing::info!(level = %level, bytes, "ttsbridge: adapted");
        }
    }

    /// `adapt` could not serve the request and answered with silence.
    fn on_rejected(&self, err: &AdaptError) {
        tracing::error!(error = %err, "ttsbridge: rejected");
    }
}

/// Returns the observer that reports through `tracing`.
pub fn default_observer() -> Arc<dyn Observer> {
    Arc::new(TracingObserver)
}

/// Observer using only the default `tracing` hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopObserver;

impl Observer for NopObserver {
    fn on_decoded(&self, _format: Format, _stats: &PcmStats) {}
    fn on_degraded(&self, _degraded: &Degraded) {}
    fn on_fallback(&self, _from: Level, _to: Level, _err: &AdaptError) {}
    fn on_anomaly(&self, _anomaly: &Anomaly) {}
    fn on_adapted(&self, _level: Level, _bytes: usize) {}
    fn on_rejected(&self, _err: &AdaptError) {}
}
