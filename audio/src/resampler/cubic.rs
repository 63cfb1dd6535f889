//! Cubic-spline resampling with light smoothing.
//!
//! Samples are normalized to `[-1, 1]` and fitted with a not-a-knot cubic
//! spline on the source grid. The spline is evaluated on the target grid, a
//! 3-tap moving average is applied away from the edges, and the result is
//! scaled back to 16 bits. If the peak exceeds full scale the whole buffer is
//! scaled down so the peak lands exactly on it.

use crate::error::{AudioError, Result};

/// Smallest input a cubic spline can be fitted to.
pub(crate) const MIN_SAMPLES: usize = 4;

/// Width of the moving-average smoothing kernel. The first and last
/// `KERNEL_SIZE` output samples are left unsmoothed.
const KERNEL_SIZE: usize = 3;

/// Outputs this short are not smoothed.
const SMOOTHING_MIN_LEN: usize = 10;

const NORMALIZE: f64 = 32768.0;
const FULL_SCALE: f64 = 32767.0;

/// Resamples one channel to `out_len` samples.
pub(crate) fn resample(samples: &[i16], src_rate: u32, dst_rate: u32, out_len: usize) -> Result<Vec<i16>> {
    if samples.len() < MIN_SAMPLES {
        return Err(AudioError::Resample(format!(
            "cubic interpolation needs at least {} samples, got {}",
            MIN_SAMPLES,
            samples.len()
        )));
    }

    let y: Vec<f64> = samples.iter().map(|&s| s as f64 / NORMALIZE).collect();
    let spline = Spline::not_a_knot(&y);

    let step = src_rate as f64 / dst_rate as f64;
    let mut out: Vec<f64> = (0..out_len).map(|i| spline.eval(i as f64 * step)).collect();

    if out.len() > SMOOTHING_MIN_LEN {
        smooth(&mut out);
    }

    if let Some(bad) = out.iter().position(|v| !v.is_finite()) {
        return Err(AudioError::Resample(format!(
            "non-finite value at output sample {}",
            bad
        )));
    }

    let peak = out.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if peak > 1.0 {
        tracing::debug!(peak, "resampler: scaling down to avoid clipping");
        let gain = 1.0 / peak;
        for v in out.iter_mut() {
            *v *= gain;
        }
    }

    Ok(out
        .into_iter()
        .map(|v| (v.clamp(-1.0, 1.0) * FULL_SCALE).round() as i16)
        .collect())
}

/// Applies a 3-tap box filter to the interior of `x`.
///
/// Taps beyond either end read as zero, but those positions are excluded
/// from the update anyway.
fn smooth(x: &mut [f64]) {
    let n = x.len();
    if n <= 2 * KERNEL_SIZE {
        return;
    }
    let src = x.to_vec();
    for j in KERNEL_SIZE..n - KERNEL_SIZE {
        x[j] = (src[j - 1] + src[j] + src[j + 1]) / KERNEL_SIZE as f64;
    }
}

/// Cubic spline over samples at integer positions `0..n`.
struct Spline<'a> {
    y: &'a [f64],
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl<'a> Spline<'a> {
    /// Fits a spline with the not-a-knot end condition: the third derivative
    /// is continuous across the second and second-to-last knots.
    ///
    /// With unit spacing the end conditions reduce the first and last interior
    /// equations to `6 * m[1] = d[1]` and `6 * m[n-2] = d[n-2]`, leaving a
    /// diagonally dominant tridiagonal system for `m[2..n-2]`.
    fn not_a_knot(y: &'a [f64]) -> Self {
        let n = y.len();
        debug_assert!(n >= MIN_SAMPLES);
        let d = |i: usize| 6.0 * (y[i - 1] - 2.0 * y[i] + y[i + 1]);

        let mut m = vec![0.0; n];
        m[1] = d(1) / 6.0;
        m[n - 2] = d(n - 2) / 6.0;

        // Thomas algorithm over m[2..=n-3] with diagonal 4 and off-diagonals 1.
        let lo = 2;
        let hi = n - 3;
        if lo <= hi {
            let len = hi - lo + 1;
            let mut c = vec![0.0; len];
            let mut r = vec![0.0; len];
            for k in 0..len {
                let i = lo + k;
                let mut rhs = d(i);
                if i == lo {
                    rhs -= m[lo - 1];
                }
                if i == hi {
                    rhs -= m[hi + 1];
                }
                let (prev_c, prev_r) = if k == 0 { (0.0, 0.0) } else { (c[k - 1], r[k - 1]) };
                let denom = 4.0 - prev_c;
                c[k] = 1.0 / denom;
                r[k] = (rhs - prev_r) / denom;
            }
            for k in (0..len).rev() {
                let next = if k + 1 < len { m[lo + k + 1] } else { 0.0 };
                m[lo + k] = r[k] - c[k] * next;
            }
        }

        m[0] = 2.0 * m[1] - m[2];
        m[n - 1] = 2.0 * m[n - 2] - m[n - 3];
        Self { y, m }
    }

    /// Evaluates the spline at `x`. Positions past the last knot hold the last
    /// sample.
    fn eval(&self, x: f64) -> f64 {
        let n = self.y.len();
        let last = (n - 1) as f64;
        if x >= last {
            return self.y[n - 1];
        }
        if x <= 0.0 {
            return self.y[0];
        }
        let k = (x.floor() as usize).min(n - 2);
        let t = x - k as f64;
        let u = 1.0 - t;
        let (m0, m1) = (self.m[k], self.m[k + 1]);
        m0 * u * u * u / 6.0
            + m1 * t * t * t / 6.0
            + (self.y[k] - m0 / 6.0) * u
            + (self.y[k + 1] - m1 / 6.0) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_samples() {
        assert!(matches!(
            resample(&[1, 2, 3], 8000, 16000, 6),
            Err(AudioError::Resample(_))
        ));
    }

    #[test]
    fn test_spline_reproduces_cubic() {
        // not-a-knot reproduces any cubic polynomial exactly
        let f = |x: f64| 0.001 * x * x * x - 0.02 * x * x + 0.1 * x - 0.3;
        let y: Vec<f64> = (0..8).map(|i| f(i as f64)).collect();
        let spline = Spline::not_a_knot(&y);
        for i in 0..70 {
            let x = i as f64 * 0.1;
            assert!((spline.eval(x) - f(x)).abs() < 1e-9, "x={}", x);
        }
    }

    #[test]
    fn test_spline_four_points() {
        let f = |x: f64| 0.05 * x * x * x - 0.1 * x;
        let y: Vec<f64> = (0..4).map(|i| f(i as f64)).collect();
        let spline = Spline::not_a_knot(&y);
        assert!((spline.eval(1.5) - f(1.5)).abs() < 1e-12);
        assert!((spline.eval(2.25) - f(2.25)).abs() < 1e-12);
    }

    #[test]
    fn test_spline_passes_through_knots() {
        let y = [0.1, -0.4, 0.3, 0.9, -0.2, 0.0, 0.5];
        let spline = Spline::not_a_knot(&y);
        for (i, &v) in y.iter().enumerate() {
            assert!((spline.eval(i as f64) - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_signal() {
        let out = resample(&[8000; 50], 22050, 48000, 109).unwrap();
        assert_eq!(out.len(), 109);
        // 8000 / 32768 * 32767 = 7999.76
        assert!(out.iter().all(|&s| s == 8000), "{:?}", out);
    }

    #[test]
    fn test_smoothing_skips_edges() {
        let mut x = vec![0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0];
        smooth(&mut x);
        // only indices 3 and 4 lie in the interior
        assert_eq!(x, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_smoothing_short_buffer_untouched() {
        let mut x = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        smooth(&mut x);
        assert_eq!(x, vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_overshoot_is_normalized() {
        // Full-scale square wave makes the spline ring past full scale.
        let src: Vec<i16> = (0..64).map(|i| if (i / 4) % 2 == 0 { i16::MAX } else { i16::MIN }).collect();
        let out = resample(&src, 8000, 44100, 353).unwrap();
        let peak = out.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert_eq!(peak, 32767);
        // Scaled rather than clamped: only the peak itself reaches full scale.
        assert!(out.iter().filter(|s| s.unsigned_abs() == 32767).count() <= 2);
        assert!(out.iter().all(|&s| s != i16::MIN));
    }

    #[test]
    fn test_deterministic() {
        let src: Vec<i16> = (0..500).map(|i| ((i as f64 * 0.37).sin() * 20000.0) as i16).collect();
        let a = resample(&src, 22050, 48000, 1088).unwrap();
        let b = resample(&src, 22050, 48000, 1088).unwrap();
        assert_eq!(a, b);
    }
}
