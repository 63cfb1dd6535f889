//! Linear interpolation resampling.

/// Resamples one channel to `out_len` samples by linear interpolation.
///
/// Output sample `i` reads source position `p = i * src_rate / dst_rate`,
/// computed in integers so the fraction is exact. Positions at or past the
/// last source sample hold the last sample.
pub(crate) fn resample(samples: &[i16], src_rate: u32, dst_rate: u32, out_len: usize) -> Vec<i16> {
    let mut out = Vec::with_capacity(out_len);
    let Some(&last) = samples.last() else {
        out.resize(out_len, 0);
        return out;
    };

    let src = src_rate as u64;
    let dst = dst_rate as u64;
    for i in 0..out_len as u64 {
        let num = i * src;
        let i0 = (num / dst) as usize;
        if i0 >= samples.len() - 1 {
            out.push(last);
            continue;
        }
        let frac = (num % dst) as f64 / dst as f64;
        let value = (1.0 - frac) * samples[i0] as f64 + frac * samples[i0 + 1] as f64;
        out.push(value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_signal() {
        let out = resample(&[1000; 100], 22050, 48000, 218);
        assert_eq!(out.len(), 218);
        assert!(out.iter().all(|&s| s == 1000));
    }

    #[test]
    fn test_upsample_by_two() {
        let out = resample(&[0, 100, 200], 8000, 16000, 6);
        assert_eq!(out, vec![0, 50, 100, 150, 200, 200]);
    }

    #[test]
    fn test_downsample_by_two() {
        let out = resample(&[0, 10, 20, 30, 40, 50], 16000, 8000, 3);
        assert_eq!(out, vec![0, 20, 40]);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // midpoint between 1 and 2 is 1.5 -> 2
        let out = resample(&[1, 2], 1, 2, 2);
        assert_eq!(out, vec![1, 2]);
        let out = resample(&[-1, -2, -2], 1, 2, 2);
        assert_eq!(out, vec![-1, -2]);
    }

    #[test]
    fn test_single_sample() {
        assert_eq!(resample(&[42], 8000, 48000, 6), vec![42; 6]);
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], 8000, 48000, 0).is_empty());
    }

    #[test]
    fn test_extremes_stay_in_range() {
        let src = [i16::MIN, i16::MAX, i16::MIN, i16::MAX];
        let out = resample(&src, 11025, 48000, 17);
        assert_eq!(out.len(), 17);
        assert_eq!(out[0], i16::MIN);
    }
}
