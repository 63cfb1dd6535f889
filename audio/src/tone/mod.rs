//! Calibration tone synthesis.
//!
//! Generates short sine bursts used as a pilot marker ahead of speech, or on
//! their own as an audible diagnostic when no speech could be produced.
//!
//! # Example
//!
//! ```rust
//! use ttsbridge_audio::tone::{generate, ToneSpec};
//!
//! let pilot = generate(&ToneSpec::PILOT.at(44100)).unwrap();
//! assert_eq!(pilot.frames(), 220);
//! ```

use crate::error::{AudioError, Result};
use crate::pcm::{Format, PcmBuffer};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Fraction of the tone spent fading in, and again fading out.
const FADE_FRACTION: f64 = 0.05;

const FULL_SCALE: f64 = 32767.0;

/// Parameters of a sine tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: f64,
    pub duration_secs: f64,
    /// Peak level as a fraction of full scale, in `(0, 1]`.
    pub amplitude: f64,
    pub sample_rate: u32,
}

impl ToneSpec {
    /// 5 ms of A4 at 10% level, prepended to speech as a start marker.
    pub const PILOT: ToneSpec = ToneSpec {
        frequency_hz: 440.0,
        duration_secs: 0.005,
        amplitude: 0.1,
        sample_rate: 44100,
    };

    /// 100 ms of A5 at half level, played when no speech is available.
    pub const BEEP: ToneSpec = ToneSpec {
        frequency_hz: 880.0,
        duration_secs: 0.1,
        amplitude: 0.5,
        sample_rate: 44100,
    };

    /// Returns the same tone at another sample rate.
    pub fn at(self, sample_rate: u32) -> Self {
        Self { sample_rate, ..self }
    }

    /// Returns the number of samples the tone occupies.
    pub fn samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).round_ties_even() as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(AudioError::Tone(format!("invalid frequency {}", self.frequency_hz)));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(AudioError::Tone(format!("invalid duration {}", self.duration_secs)));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(AudioError::Tone(format!(
                "amplitude {} outside (0, 1]",
                self.amplitude
            )));
        }
        if self.sample_rate == 0 {
            return Err(AudioError::Tone("sample rate must be positive".to_string()));
        }
        Ok(())
    }
}

/// Synthesizes the tone described by `spec` as mono PCM.
///
/// The first and last 5% of the samples ramp linearly from and to zero so the
/// tone can be spliced against other audio without a click.
pub fn generate(spec: &ToneSpec) -> Result<PcmBuffer> {
    spec.validate()?;

    let n = spec.samples();
    let fade = (n as f64 * FADE_FRACTION).round() as usize;
    let step = 2.0 * PI * spec.frequency_hz / spec.sample_rate as f64;
    let level = spec.amplitude * FULL_SCALE;

    let samples: Vec<i16> = (0..n)
        .map(|i| {
            let value = (step * i as f64).sin() * level * envelope(i, n, fade);
            value.round() as i16
        })
        .collect();
    PcmBuffer::from_samples(Format::mono(spec.sample_rate), &samples)
}

/// Linear fade-in/fade-out gain for sample `i` of `n`.
fn envelope(i: usize, n: usize, fade: usize) -> f64 {
    if fade == 0 {
        return 1.0;
    }
    let fade_in = i as f64 / fade as f64;
    let fade_out = (n - 1 - i) as f64 / fade as f64;
    fade_in.min(fade_out).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(buf: &PcmBuffer) -> u16 {
        buf.samples().iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
    }

    #[test]
    fn test_pilot_scenario() {
        let spec = ToneSpec {
            frequency_hz: 440.0,
            duration_secs: 0.005,
            amplitude: 0.1,
            sample_rate: 44100,
        };
        let tone = generate(&spec).unwrap();
        assert_eq!(tone.frames(), 220);
        assert_eq!(tone.format(), Format::MONO_44K);

        let samples = tone.samples();
        let mid_peak = samples[88..132].iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(samples[0].unsigned_abs() < mid_peak);
        assert!(samples[219].unsigned_abs() < mid_peak);
        assert!(peak(&tone) <= 3277);
    }

    #[test]
    fn test_sample_count_rounding() {
        assert_eq!(ToneSpec::PILOT.at(48000).samples(), 240);
        assert_eq!(ToneSpec::BEEP.samples(), 4410);
        assert_eq!(ToneSpec::BEEP.at(22050).samples(), 2205);
    }

    #[test]
    fn test_amplitude_scaling() {
        let spec = ToneSpec {
            frequency_hz: 1000.0,
            duration_secs: 0.5,
            amplitude: 0.5,
            sample_rate: 48000,
        };
        let tone = generate(&spec).unwrap();
        let p = peak(&tone);
        assert!(p > 16000 && p <= 16384, "peak {}", p);
    }

    #[test]
    fn test_full_amplitude_in_range() {
        let spec = ToneSpec {
            frequency_hz: 250.0,
            duration_secs: 0.1,
            amplitude: 1.0,
            sample_rate: 8000,
        };
        let tone = generate(&spec).unwrap();
        assert!(peak(&tone) <= 32767);
    }

    #[test]
    fn test_fade_envelope() {
        assert_eq!(envelope(0, 100, 5), 0.0);
        assert_eq!(envelope(5, 100, 5), 1.0);
        assert_eq!(envelope(50, 100, 5), 1.0);
        assert_eq!(envelope(99, 100, 5), 0.0);
        assert_eq!(envelope(97, 100, 5), 0.4);
        assert_eq!(envelope(3, 10, 0), 1.0);
    }

    #[test]
    fn test_deterministic() {
        let a = generate(&ToneSpec::BEEP).unwrap();
        let b = generate(&ToneSpec::BEEP).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_specs() {
        let base = ToneSpec::PILOT;
        for spec in [
            ToneSpec { frequency_hz: 0.0, ..base },
            ToneSpec { frequency_hz: f64::NAN, ..base },
            ToneSpec { duration_secs: -1.0, ..base },
            ToneSpec { amplitude: 0.0, ..base },
            ToneSpec { amplitude: 1.5, ..base },
            ToneSpec { sample_rate: 0, ..base },
        ] {
            assert!(matches!(generate(&spec), Err(AudioError::Tone(_))), "{:?}", spec);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&ToneSpec::PILOT).unwrap();
        let back: ToneSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ToneSpec::PILOT);
    }
}
