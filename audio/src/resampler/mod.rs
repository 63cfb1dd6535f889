//! Sample-rate conversion for whole PCM buffers.
//!
//! Three strategies are available, selected by [`Quality`]:
//!
//! - [`Quality::Fast`]: linear interpolation, cannot fail
//! - [`Quality::High`]: not-a-knot cubic spline with light smoothing and
//!   peak normalization
//! - [`Quality::Fft`]: band-limited FFT resampling via rubato
//!
//! When the requested strategy cannot run on the input (for example a cubic
//! fit on fewer than four samples) the next simpler strategy is used and the
//! result carries a [`Degraded`] note. Identical requests always produce
//! byte-identical output.
//!
//! # Example
//!
//! ```rust
//! use ttsbridge_audio::pcm::{Format, PcmBuffer};
//! use ttsbridge_audio::resampler::{resample, Quality, ResampleRequest};
//!
//! let source = PcmBuffer::from_samples(Format::MONO_22K, &[1000; 100]).unwrap();
//! let out = resample(ResampleRequest::new(source, 48000, Quality::Fast)).unwrap();
//! assert_eq!(out.buffer.frames(), 218);
//! assert!(out.buffer.samples().iter().all(|&s| s == 1000));
//! ```

mod cubic;
mod linear;
mod rubato_impl;

use crate::error::{AudioError, Result};
use crate::pcm::PcmBuffer;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Interpolation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Linear interpolation.
    Fast,
    /// Cubic spline plus 3-tap smoothing.
    #[default]
    High,
    /// Band-limited FFT resampling.
    Fft,
}

impl Quality {
    /// Returns the strategy to fall back to when this one fails.
    pub fn fallback(self) -> Option<Quality> {
        match self {
            Quality::Fft => Some(Quality::High),
            Quality::High => Some(Quality::Fast),
            Quality::Fast => None,
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Fast => write!(f, "fast"),
            Quality::High => write!(f, "high"),
            Quality::Fft => write!(f, "fft"),
        }
    }
}

/// A buffer to convert and the rate to convert it to.
#[derive(Debug, Clone)]
pub struct ResampleRequest {
    pub source: PcmBuffer,
    pub target_rate: u32,
    pub quality: Quality,
}

impl ResampleRequest {
    pub fn new(source: PcmBuffer, target_rate: u32, quality: Quality) -> Self {
        Self {
            source,
            target_rate,
            quality,
        }
    }
}

/// Records that a simpler strategy than requested produced the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degraded {
    pub requested: Quality,
    pub used: Quality,
    /// Why each stronger strategy was abandoned.
    pub reason: String,
}

/// Result of [`resample`].
#[derive(Debug, Clone)]
pub struct Resampled {
    pub buffer: PcmBuffer,
    /// Set when the requested quality fell back to a simpler one.
    pub degraded: Option<Degraded>,
}

/// Returns `round(len * dst_rate / src_rate)`, the number of frames a buffer of
/// `len` frames has after conversion.
pub fn target_len(len: usize, src_rate: u32, dst_rate: u32) -> usize {
    if src_rate == 0 {
        return 0;
    }
    let num = len as u128 * dst_rate as u128 * 2 + src_rate as u128;
    (num / (2 * src_rate as u128)) as usize
}

/// Converts `request.source` to `request.target_rate`.
///
/// Returns the source unchanged when the rates already match. Fails only for
/// a zero target rate; strategy failures degrade instead.
pub fn resample(request: ResampleRequest) -> Result<Resampled> {
    let ResampleRequest {
        source,
        target_rate,
        quality,
    } = request;
    let format = source.format();
    let src_rate = format.sample_rate();

    if target_rate == 0 {
        return Err(AudioError::Format("target sample rate must be positive".to_string()));
    }
    if src_rate == target_rate {
        return Ok(Resampled {
            buffer: source,
            degraded: None,
        });
    }

    let out_len = target_len(source.frames(), src_rate, target_rate);
    let channels: Vec<Vec<i16>> = (0..format.channels() as usize)
        .map(|ch| source.channel(ch).collect())
        .collect();

    let mut used = quality;
    let mut reasons: Vec<String> = Vec::new();
    let converted = loop {
        match run(used, &channels, src_rate, target_rate, out_len) {
            Ok(out) => break out,
            Err(e) => {
                let Some(next) = used.fallback() else {
                    return Err(e);
                };
                warn!(from = %used, to = %next, error = %e, "resampler: degrading quality");
                reasons.push(format!("{}: {}", used, e));
                used = next;
            }
        }
    };

    debug!(
        src_rate,
        dst_rate = target_rate,
        frames_in = source.frames(),
        frames_out = out_len,
        quality = %used,
        "resampler: converted"
    );

    let mut samples = Vec::with_capacity(out_len * channels.len());
    for i in 0..out_len {
        for ch in &converted {
            samples.push(ch[i]);
        }
    }
    let buffer = PcmBuffer::from_samples(format.with_sample_rate(target_rate), &samples)?;
    let degraded = (used != quality).then(|| Degraded {
        requested: quality,
        used,
        reason: reasons.join("; "),
    });
    Ok(Resampled { buffer, degraded })
}

fn run(
    quality: Quality,
    channels: &[Vec<i16>],
    src_rate: u32,
    dst_rate: u32,
    out_len: usize,
) -> Result<Vec<Vec<i16>>> {
    match quality {
        Quality::Fast => Ok(channels
            .iter()
            .map(|ch| linear::resample(ch, src_rate, dst_rate, out_len))
            .collect()),
        Quality::High => channels
            .iter()
            .map(|ch| cubic::resample(ch, src_rate, dst_rate, out_len))
            .collect(),
        Quality::Fft => rubato_impl::resample(channels, src_rate, dst_rate, out_len),
    }
}
