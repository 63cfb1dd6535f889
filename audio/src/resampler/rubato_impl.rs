//! Rubato-based band-limited resampling.
//!
//! Uses rubato's FFT resampler, a pure Rust implementation without any FFI
//! dependencies. The whole buffer is pushed through in fixed-size blocks,
//! zero-padded at the end, and the resampler's output delay is trimmed so the
//! result lines up with the source.

use rubato::{FftFixedInOut, Resampler as RubatoResampler};

use crate::error::{AudioError, Result};

/// Number of frames per processing block.
const CHUNK_SIZE: usize = 1024;

/// Resamples deinterleaved channels to `out_len` frames each.
pub(crate) fn resample(
    channels: &[Vec<i16>],
    src_rate: u32,
    dst_rate: u32,
    out_len: usize,
) -> Result<Vec<Vec<i16>>> {
    let num_channels = channels.len();
    if num_channels == 0 {
        return Ok(Vec::new());
    }

    let mut resampler =
        FftFixedInOut::<f32>::new(src_rate as usize, dst_rate as usize, CHUNK_SIZE, num_channels)
            .map_err(|e| AudioError::Resample(format!("rubato: {}", e)))?;

    let delay = resampler.output_delay();
    let needed = delay + out_len;
    let mut collected: Vec<Vec<f32>> = vec![Vec::with_capacity(needed); num_channels];
    let mut input_buf: Vec<Vec<f32>> = vec![Vec::new(); num_channels];
    let mut output_buf: Vec<Vec<f32>> = vec![Vec::new(); num_channels];
    let mut pos = 0usize;

    while collected[0].len() < needed {
        let frames_needed = resampler.input_frames_next();
        for (ch, samples) in channels.iter().enumerate() {
            input_buf[ch].clear();
            // Pad past the end of the source with silence
            input_buf[ch].extend(
                (pos..pos + frames_needed)
                    .map(|i| samples.get(i).map_or(0.0, |&s| s as f32 / 32768.0)),
            );
        }
        pos += frames_needed;

        let output_frames = resampler.output_frames_next();
        for buf in output_buf.iter_mut() {
            buf.clear();
            buf.resize(output_frames, 0.0);
        }

        let (_, written) = resampler
            .process_into_buffer(&input_buf, &mut output_buf, None)
            .map_err(|e| AudioError::Resample(format!("rubato: {}", e)))?;
        if written == 0 {
            return Err(AudioError::Resample("rubato produced no output".to_string()));
        }
        for (dst, src) in collected.iter_mut().zip(output_buf.iter()) {
            dst.extend_from_slice(&src[..written]);
        }
    }

    let trimmed: Vec<&[f32]> = collected.iter().map(|c| &c[delay..delay + out_len]).collect();
    let mut peak = 0.0f32;
    for &v in trimmed.iter().flat_map(|c| c.iter()) {
        if !v.is_finite() {
            return Err(AudioError::Resample("rubato produced a non-finite sample".to_string()));
        }
        peak = peak.max(v.abs());
    }
    // Ringing past full scale is scaled down across all channels, never clipped.
    let gain = if peak > 1.0 {
        tracing::debug!(peak, "resampler: scaling down to avoid clipping");
        1.0 / peak
    } else {
        1.0
    };

    let out = trimmed
        .into_iter()
        .map(|c| {
            c.iter()
                .map(|&v| ((v * gain).clamp(-1.0, 1.0) * 32767.0).round() as i16)
                .collect()
        })
        .collect();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length() {
        let src = vec![vec![0i16; 1600]];
        let out = resample(&src, 16000, 48000, 4800).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), 4800);
    }

    #[test]
    fn test_silence_stays_silent() {
        let src = vec![vec![0i16; 4800], vec![0i16; 4800]];
        let out = resample(&src, 48000, 16000, 1600).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|ch| ch.len() == 1600 && ch.iter().all(|&s| s == 0)));
    }

    #[test]
    fn test_tone_keeps_energy() {
        let src: Vec<i16> = (0..22050)
            .map(|i| ((i as f64 * 2.0 * std::f64::consts::PI * 440.0 / 22050.0).sin() * 10000.0) as i16)
            .collect();
        let out = resample(&[src], 22050, 44100, 44100).unwrap();
        let peak = out[0][1000..43000].iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak > 9000 && peak < 11000, "peak {}", peak);
    }

    #[test]
    fn test_square_wave_is_not_flat_topped() {
        // Full-scale square wave rings past full scale after band limiting.
        let src: Vec<i16> = (0..4000)
            .map(|i| if (i / 8) % 2 == 0 { i16::MAX } else { -i16::MAX })
            .collect();
        let out = resample(&[src], 16000, 44100, 11025).unwrap();
        let at_rail = out[0].iter().filter(|s| s.unsigned_abs() == 32767).count();
        let peak = out[0].iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert_eq!(peak, 32767);
        assert!(at_rail < out[0].len() / 20, "{} samples at full scale", at_rail);
    }

    #[test]
    fn test_no_channels() {
        assert!(resample(&[], 16000, 48000, 10).unwrap().is_empty());
    }
}
