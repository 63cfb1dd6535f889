//! Audio processing utilities for synthesized speech.
//!
//! This crate provides:
//!
//! - `pcm`: 16-bit PCM format handling, buffers, downmixing and statistics
//! - `codec`: WAV container framing
//! - `resampler`: whole-buffer sample-rate conversion
//! - `tone`: calibration tone synthesis
//!
//! # Example
//!
//! ```rust
//! use ttsbridge_audio::codec::wav;
//! use ttsbridge_audio::pcm::{to_mono, Format, PcmBuffer};
//! use ttsbridge_audio::resampler::{resample, Quality, ResampleRequest};
//!
//! let stereo = PcmBuffer::from_samples(Format::stereo(22050), &[100, 200, 300, 400]).unwrap();
//! let blob = wav::encode(&stereo, stereo.format()).unwrap();
//!
//! let (decoded, _) = wav::decode(&blob).unwrap();
//! let mono = to_mono(decoded).unwrap();
//! let out = resample(ResampleRequest::new(mono, 48000, Quality::Fast)).unwrap();
//! assert_eq!(out.buffer.format(), Format::MONO_48K);
//! ```

pub mod codec;
pub mod error;
pub mod pcm;
pub mod resampler;
pub mod tone;

pub use error::AudioError;
pub use pcm::{Format, PcmBuffer};
