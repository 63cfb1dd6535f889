//! Summary statistics for PCM buffers, used for diagnostics.

use super::PcmBuffer;
use std::time::Duration;

/// Payloads shorter than this are unlikely to be real speech.
const MIN_PLAUSIBLE_BYTES: usize = 100;

/// Summary of a PCM buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmStats {
    /// Total samples across all channels.
    pub samples: usize,
    pub duration: Duration,
    pub min: i16,
    pub max: i16,
    /// Number of samples exactly equal to zero.
    pub zeros: usize,
    /// Largest absolute sample value.
    pub peak: u16,
    len_bytes: usize,
}

impl PcmStats {
    /// Computes statistics over every sample of `buffer`.
    pub fn analyze(buffer: &PcmBuffer) -> Self {
        let mut min = 0i16;
        let mut max = 0i16;
        let mut zeros = 0usize;
        let mut samples = 0usize;
        for s in buffer.samples() {
            if samples == 0 {
                min = s;
                max = s;
            } else {
                min = min.min(s);
                max = max.max(s);
            }
            if s == 0 {
                zeros += 1;
            }
            samples += 1;
        }
        Self {
            samples,
            duration: buffer.duration(),
            min,
            max,
            zeros,
            peak: min.unsigned_abs().max(max.unsigned_abs()),
            len_bytes: buffer.len_bytes(),
        }
    }

    /// Returns true if the payload is too short to plausibly hold speech.
    pub fn is_suspiciously_short(&self) -> bool {
        self.len_bytes < MIN_PLAUSIBLE_BYTES
    }

    /// Returns true if every sample is zero.
    pub fn is_silent(&self) -> bool {
        self.zeros == self.samples
    }
}
