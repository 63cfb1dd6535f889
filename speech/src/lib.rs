//! Adapts synthesized speech for playback over a telephony bridge.
//!
//! This crate provides:
//! - [`AudioAdapter`]: decode, downmix, resample and re-frame speech as WAV
//! - [`Level`]: the degradation ladder the adapter walks on failure
//! - [`PcmSource`]: a collaborator that can re-supply speech as raw PCM
//! - [`Observer`]: typed diagnostics hooks, backed by `tracing` by default
//!
//! # Example
//!
//! ```rust
//! use ttsbridge_audio::codec::wav;
//! use ttsbridge_audio::{Format, PcmBuffer};
//! use ttsbridge_speech::{AdapterOptions, AudioAdapter, Level};
//!
//! let speech = PcmBuffer::from_samples(Format::stereo(22050), &[100, 200, 300, 400]).unwrap();
//! let blob = wav::encode(&speech, speech.format()).unwrap();
//!
//! let adapter = AudioAdapter::new(AdapterOptions::default());
//! let adapted = adapter.try_adapt(&blob, Format::MONO_48K).unwrap();
//! assert_eq!(adapted.level, Level::FullPipeline);
//! ```

mod adapter;
mod error;
mod level;
mod observer;
mod options;
mod source;

pub use adapter::*;
pub use error::*;
pub use level::*;
pub use observer::*;
pub use options::*;
pub use source::*;
