//! Owned PCM sample buffers.

use super::format::{Format, SAMPLE_BYTES};
use crate::error::{AudioError, Result};
use std::time::Duration;

/// A buffer of interleaved 16-bit little-endian PCM samples tagged with its format.
///
/// The byte length is always a whole number of frames
/// (`frames * channels * 2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    data: Vec<u8>,
    format: Format,
}

impl PcmBuffer {
    /// Creates a buffer from raw bytes.
    ///
    /// Fails if the byte length does not fill whole frames of `format`.
    pub fn new(format: Format, data: Vec<u8>) -> Result<Self> {
        if data.len() % format.frame_bytes() != 0 {
            return Err(AudioError::Format(format!(
                "{} bytes is not a multiple of the {}-byte frame size for {}",
                data.len(),
                format.frame_bytes(),
                format
            )));
        }
        Ok(Self { data, format })
    }

    /// Creates a buffer from interleaved samples.
    pub fn from_samples(format: Format, samples: &[i16]) -> Result<Self> {
        let mut data = Vec::with_capacity(samples.len() * SAMPLE_BYTES);
        for sample in samples {
            data.extend_from_slice(&sample.to_le_bytes());
        }
        Self::new(format, data)
    }

    /// Creates a buffer of silence lasting `duration`.
    pub fn silence(format: Format, duration: Duration) -> Self {
        let len = format.bytes_in_duration(duration) as usize;
        Self {
            data: vec![0u8; len],
            format,
        }
    }

    /// Returns the audio format of this buffer.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.data.len() / self.format.frame_bytes()
    }

    /// Returns the length of the audio data in bytes.
    pub fn len_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the sample of channel `ch` in frame `frame`, if in range.
    pub fn sample(&self, frame: usize, ch: usize) -> Option<i16> {
        if ch >= self.format.channels() as usize || frame >= self.frames() {
            return None;
        }
        let offset = (frame * self.format.channels() as usize + ch) * SAMPLE_BYTES;
        Some(i16::from_le_bytes([self.data[offset], self.data[offset + 1]]))
    }

    /// Iterates over the samples of a single channel.
    ///
    /// Yields nothing for an out-of-range channel.
    pub fn channel(&self, ch: usize) -> impl Iterator<Item = i16> + '_ {
        let channels = self.format.channels() as usize;
        let frame_bytes = self.format.frame_bytes();
        let chunks = if ch < channels {
            self.data.chunks_exact(frame_bytes)
        } else {
            self.data[..0].chunks_exact(frame_bytes)
        };
        chunks.map(move |frame| {
            let offset = ch * SAMPLE_BYTES;
            i16::from_le_bytes([frame[offset], frame[offset + 1]])
        })
    }

    /// Returns all interleaved samples.
    pub fn samples(&self) -> Vec<i16> {
        self.data
            .chunks_exact(SAMPLE_BYTES)
            .map(|bytes| i16::from_le_bytes([bytes[0], bytes[1]]))
            .collect()
    }

    /// Returns the raw little-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the playback duration.
    pub fn duration(&self) -> Duration {
        self.format.duration(self.data.len() as u64)
    }

    /// Returns a new buffer holding `self` followed by `other`.
    ///
    /// Both buffers must share the same format.
    pub fn concat(&self, other: &PcmBuffer) -> Result<PcmBuffer> {
        if self.format != other.format {
            return Err(AudioError::Format(format!(
                "cannot join {} with {}",
                self.format, other.format
            )));
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(PcmBuffer {
            data,
            format: self.format,
        })
    }
}
