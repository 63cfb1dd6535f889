//! Speech adaptation with graceful degradation.
//!
//! [`AudioAdapter`] turns whatever container a synthesis service returned
//! into a mono 16-bit WAV at the sample rate a telephony bridge expects.
//! When a step fails the adapter degrades through [`Level`]s instead of
//! failing the call: raw PCM from a [`PcmSource`], then a diagnostic tone,
//! then silence.

use std::sync::Arc;

use ttsbridge_audio::codec::wav::{self, Header};
use ttsbridge_audio::pcm::{PcmStats, to_mono};
use ttsbridge_audio::resampler::{self, Degraded, ResampleRequest};
use ttsbridge_audio::tone;
use ttsbridge_audio::{Format, PcmBuffer};

use crate::error::AdaptError;
use crate::level::Level;
use crate::observer::{Anomaly, Observer, default_observer};
use crate::options::AdapterOptions;
use crate::source::{NoSource, PcmSource, SourceError};

/// Format of the silence `adapt` emits when the requested target has no
/// usable sample rate.
pub const FALLBACK_FORMAT: Format = Format::MONO_16K;

/// Output of a successful adaptation.
#[derive(Debug, Clone)]
pub struct Adapted {
    /// Complete WAV file at the target format.
    pub blob: Vec<u8>,
    /// Level that produced `blob`.
    pub level: Level,
    /// Set when the resampler fell back to a simpler strategy.
    pub degraded: Option<Degraded>,
}

/// Converts synthesized speech into the bridge's playback format.
///
/// An adapter holds no per-call state and can be shared across threads.
pub struct AudioAdapter {
    options: AdapterOptions,
    observer: Arc<dyn Observer>,
    source: Arc<dyn PcmSource>,
}

impl Default for AudioAdapter {
    fn default() -> Self {
        Self::new(AdapterOptions::default())
    }
}

impl AudioAdapter {
    /// Creates an adapter logging through `tracing` with no raw PCM source.
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            options,
            observer: default_observer(),
            source: Arc::new(NoSource),
        }
    }

    /// Sets the observer that receives fallback and degradation events.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Sets the collaborator used by [`Level::RawPcmFallback`].
    pub fn with_source(mut self, source: Arc<dyn PcmSource>) -> Self {
        self.source = source;
        self
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Adapts `blob` to `target`, reporting the level that produced it.
    ///
    /// Fails only with [`AdaptError::UnsupportedFormat`]: when `target` is not
    /// mono, or when the input declares a channel count other than one or
    /// two. Every other failure degrades to the next level.
    pub fn try_adapt(&self, blob: &[u8], target: Format) -> Result<Adapted, AdaptError> {
        if !target.is_mono() {
            return Err(AdaptError::UnsupportedFormat(format!(
                "target must be mono, got {}",
                target
            )));
        }
        if target.sample_rate() == 0 {
            return Err(AdaptError::UnsupportedFormat(
                "target sample rate must be positive".to_string(),
            ));
        }

        let mut level = Level::FullPipeline;
        loop {
            let result = match level {
                Level::FullPipeline => self.full_pipeline(blob, target),
                Level::RawPcmFallback => self.raw_pcm(target).map(|blob| (blob, None)),
                Level::ToneOnly => self.diagnostic_tone(target).map(|blob| (blob, None)),
                Level::Silence => Ok((self.silence(target), None)),
            };

            match result {
                Ok((blob, degraded)) => {
                    self.observer.on_adapted(level, blob.len());
                    return Ok(Adapted {
                        blob,
                        level,
                        degraded,
                    });
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    let Some(next) = level.next() else {
                        // Silence cannot fail.
                        return Err(err);
                    };
                    self.observer.on_fallback(level, next, &err);
                    level = next;
                }
            }
        }
    }

    /// Adapts `blob` to `target` and always returns a playable WAV.
    ///
    /// An unsupported format is reported to the observer and answered with
    /// silence in `target`, or in [`FALLBACK_FORMAT`] when `target` has a
    /// zero sample rate.
    pub fn adapt(&self, blob: &[u8], target: Format) -> Vec<u8> {
        match self.try_adapt(blob, target) {
            Ok(adapted) => adapted.blob,
            Err(err) => {
                self.observer.on_rejected(&err);
                let format = if target.sample_rate() == 0 {
                    FALLBACK_FORMAT
                } else {
                    target
                };
                self.silence(format)
            }
        }
    }

    fn full_pipeline(
        &self,
        blob: &[u8],
        target: Format,
    ) -> Result<(Vec<u8>, Option<Degraded>), AdaptError> {
        if !wav::looks_like_wav(blob) {
            self.observer
                .on_anomaly(&Anomaly::MissingRiffMarker { len: blob.len() });
        }

        let (pcm, format) = wav::decode(blob)?;
        let stats = PcmStats::analyze(&pcm);
        self.observer.on_decoded(format, &stats);
        if stats.is_suspiciously_short() {
            self.observer.on_anomaly(&Anomaly::ShortAudio {
                bytes: pcm.len_bytes(),
            });
        }

        let mono = to_mono(pcm)?;
        let resampled = resampler::resample(ResampleRequest::new(
            mono,
            target.sample_rate(),
            self.options.quality,
        ))?;
        if let Some(degraded) = &resampled.degraded {
            self.observer.on_degraded(degraded);
        }

        let speech = self.prepend_pilot(resampled.buffer, target);
        let out = wav::encode(&speech, target)?;
        Ok((out, resampled.degraded))
    }

    /// Returns `speech` with the pilot tone in front of it, or `speech` alone
    /// if the pilot is disabled or cannot be produced.
    fn prepend_pilot(&self, speech: PcmBuffer, target: Format) -> PcmBuffer {
        if !self.options.prepend_pilot {
            return speech;
        }
        let skip = |reason: String| self.observer.on_anomaly(&Anomaly::PilotSkipped { reason });
        let pilot = match tone::generate(&self.options.pilot.at(target.sample_rate())) {
            Ok(pilot) => pilot,
            Err(err) => {
                skip(err.to_string());
                return speech;
            }
        };
        if pilot.format() != speech.format() {
            skip(format!("pilot is {}, speech is {}", pilot.format(), speech.format()));
            return speech;
        }
        match pilot.concat(&speech) {
            Ok(joined) => joined,
            Err(err) => {
                skip(err.to_string());
                speech
            }
        }
    }

    fn raw_pcm(&self, target: Format) -> Result<Vec<u8>, AdaptError> {
        let mut data = self.source.raw_pcm(target)?;
        let frame = target.frame_bytes();
        let partial = data.len() % frame;
        if partial != 0 {
            self.observer
                .on_anomaly(&Anomaly::TrailingBytes { dropped: partial });
            data.truncate(data.len() - partial);
        }
        if data.is_empty() {
            return Err(SourceError::Empty.into());
        }
        let pcm = PcmBuffer::new(target, data)?;
        Ok(wav::encode(&pcm, target)?)
    }

    fn diagnostic_tone(&self, target: Format) -> Result<Vec<u8>, AdaptError> {
        let beep = tone::generate(&self.options.diagnostic_tone.at(target.sample_rate()))?;
        Ok(wav::encode(&beep, target)?)
    }

    fn silence(&self, target: Format) -> Vec<u8> {
        let pcm = PcmBuffer::silence(target, self.options.silence());
        match wav::encode(&pcm, target) {
            Ok(blob) => blob,
            Err(err) => {
                self.observer.on_anomaly(&Anomaly::HeaderOnlySilence {
                    reason: err.to_string(),
                });
                let mut out = Vec::with_capacity(wav::HEADER_LEN);
                Header::for_format(target, 0).write_to(&mut out);
                out
            }
        }
    }
}
