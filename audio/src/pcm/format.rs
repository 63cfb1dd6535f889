//! PCM audio format definitions.

use crate::error::{AudioError, Result};
use std::time::Duration;

/// Bit depth of every sample handled by this crate.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per single-channel sample.
pub const SAMPLE_BYTES: usize = 2;

/// Describes 16-bit signed little-endian PCM audio.
///
/// Only mono and stereo layouts exist; other channel counts are rejected by
/// [`Format::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    channels: u16,
    sample_rate: u32,
}

impl Format {
    /// Creates a mono format with the given sample rate.
    pub const fn mono(sample_rate: u32) -> Self {
        Self { channels: 1, sample_rate }
    }

    /// Creates a stereo format with the given sample rate.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self { channels: 2, sample_rate }
    }

    /// Creates a format from a raw channel count, as found in a container header.
    pub fn new(channels: u16, sample_rate: u32) -> Result<Self> {
        if channels != 1 && channels != 2 {
            return Err(AudioError::UnsupportedFormat(format!(
                "{} channels (expected 1 or 2)",
                channels
            )));
        }
        if sample_rate == 0 {
            return Err(AudioError::Format("sample rate must be positive".to_string()));
        }
        Ok(Self { channels, sample_rate })
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the bit depth, always 16.
    pub fn depth(&self) -> u16 {
        BITS_PER_SAMPLE
    }

    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }

    /// Returns the same layout at a different sample rate.
    pub fn with_sample_rate(&self, sample_rate: u32) -> Self {
        Self { channels: self.channels, sample_rate }
    }

    /// Returns the number of bytes per sample frame.
    /// 2 bytes for mono, 4 bytes for stereo.
    pub fn frame_bytes(&self) -> usize {
        self.channels as usize * SAMPLE_BYTES
    }

    /// Returns the byte rate (bytes per second).
    pub fn bytes_rate(&self) -> u64 {
        self.sample_rate as u64 * self.frame_bytes() as u64
    }

    /// Returns the bit rate (bits per second).
    pub fn bits_rate(&self) -> u64 {
        self.bytes_rate() * 8
    }

    /// Returns the number of bytes in the given duration, aligned to whole frames.
    pub fn bytes_in_duration(&self, duration: Duration) -> u64 {
        let frames = (self.sample_rate as u128 * duration.as_nanos()) / 1_000_000_000;
        frames as u64 * self.frame_bytes() as u64
    }

    /// Returns the playback duration of the given number of bytes.
    pub fn duration(&self, bytes: u64) -> Duration {
        let rate = self.bytes_rate();
        if rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(((bytes as u128 * 1_000_000_000) / rate as u128) as u64)
    }

    /// Returns the number of whole frames in the given number of bytes.
    pub fn frames(&self, bytes: u64) -> u64 {
        bytes / self.frame_bytes() as u64
    }
}

// Common format presets
impl Format {
    /// 16kHz mono
    pub const MONO_16K: Format = Format::mono(16000);
    /// 22.05kHz mono (common for cloud TTS)
    pub const MONO_22K: Format = Format::mono(22050);
    /// 24kHz mono
    pub const MONO_24K: Format = Format::mono(24000);
    /// 44.1kHz mono
    pub const MONO_44K: Format = Format::mono(44100);
    /// 48kHz mono
    pub const MONO_48K: Format = Format::mono(48000);
    /// 44.1kHz stereo (CD quality)
    pub const STEREO_44K: Format = Format::stereo(44100);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let layout = if self.is_mono() { "mono" } else { "stereo" };
        write!(f, "s16le/{}/{}Hz", layout, self.sample_rate)
    }
}
