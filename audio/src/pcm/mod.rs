//! PCM (Pulse Code Modulation) audio handling.
//!
//! This module provides types and utilities for working with 16-bit PCM
//! audio data.
//!
//! # Key Types
//!
//! - [`Format`]: Audio format (sample rate, channels; depth is always 16)
//! - [`PcmBuffer`]: Owned, frame-aligned sample data tagged with its format
//! - [`PcmStats`]: Diagnostic summary of a buffer
//! - [`to_mono`]: Stereo to mono downmix
//!
//! # Example
//!
//! ```rust
//! use ttsbridge_audio::pcm::{Format, PcmBuffer, to_mono};
//!
//! let stereo = PcmBuffer::from_samples(Format::stereo(22050), &[100, 200, 300, 400]).unwrap();
//! let mono = to_mono(stereo).unwrap();
//! assert_eq!(mono.samples(), vec![150, 350]);
//! ```

mod buffer;
mod downmix;
mod format;
mod stats;

pub use buffer::PcmBuffer;
pub use downmix::to_mono;
pub use format::{BITS_PER_SAMPLE, Format, SAMPLE_BYTES};
pub use stats::PcmStats;
