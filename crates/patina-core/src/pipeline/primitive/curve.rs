use crate::error::FilterError;
use crate::image_buf::CHANNELS;
use crate::image_buf::ImageBuf;

use super::ensure_nonempty;

/// Canonical control-point x positions for five-point tone curves.
pub const CURVE_X: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

const LUT_SIZE: usize = 4096;

/// Five-point tone curve, sampled into a lookup table.
///
/// Interpolation is monotone cubic Hermite (Fritsch-Carlson), so the
/// curve never overshoots between monotone control points and an
/// identity point set maps to an exact identity curve.
pub struct CurveLut {
    lut: Vec<f32>,
    x_min: f32,
    x_max: f32,
}

impl CurveLut {
    /// Build from (x, y) control points. The x values must be finite and
    /// strictly increasing; y values must be finite.
    pub fn from_points(points: &[[f32; 2]; 5]) -> Result<Self, FilterError> {
        for p in points {
            if !p[0].is_finite() || !p[1].is_finite() {
                return Err(FilterError::Malformed {
                    key: "points".to_string(),
                    expected: "finite control points",
                    got: format!("({}, {})", p[0], p[1]),
                });
            }
        }
        for w in points.windows(2) {
            if w[1][0] <= w[0][0] {
                return Err(FilterError::Malformed {
                    key: "points".to_string(),
                    expected: "strictly increasing x positions",
                    got: format!("{} after {}", w[1][0], w[0][0]),
                });
            }
        }

        let xs: Vec<f32> = points.iter().map(|p| p[0]).collect();
        let ys: Vec<f32> = points.iter().map(|p| p[1]).collect();
        let tangents = monotone_tangents(&xs, &ys);

        let x_min = xs[0];
        let x_max = xs[4];
        let mut lut = Vec::with_capacity(LUT_SIZE);
        for i in 0..LUT_SIZE {
            let x = x_min + (x_max - x_min) * i as f32 / (LUT_SIZE - 1) as f32;
            lut.push(hermite_eval(&xs, &ys, &tangents, x));
        }

        Ok(Self { lut, x_min, x_max })
    }

    /// Identity curve over [0, 1].
    pub fn identity() -> Self {
        let points = CURVE_X.map(|x| [x, x]);
        Self::from_points(&points).expect("identity points are valid")
    }

    /// Evaluate with the domain clamped to the control-point range.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        let t = ((x - self.x_min) / (self.x_max - self.x_min)).clamp(0.0, 1.0);
        let idx_f = t * (LUT_SIZE - 1) as f32;
        let i0 = (idx_f as usize).min(LUT_SIZE - 2);
        let frac = idx_f - i0 as f32;
        self.lut[i0] * (1.0 - frac) + self.lut[i0 + 1] * frac
    }

    /// Map R, G and B through the curve. Alpha is untouched.
    pub fn apply_rgb(&self, mut input: ImageBuf) -> Result<ImageBuf, FilterError> {
        ensure_nonempty(&input)?;
        for px in input.data.chunks_exact_mut(CHANNELS) {
            px[0] = self.eval(px[0]);
            px[1] = self.eval(px[1]);
            px[2] = self.eval(px[2]);
        }
        Ok(input)
    }
}

/// Fritsch-Carlson tangents: start from secant averages, then limit so
/// the interpolant stays monotone on monotone data.
fn monotone_tangents(xs: &[f32], ys: &[f32]) -> Vec<f32> {
    let n = xs.len();
    let mut secants = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        secants.push((ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]));
    }

    let mut m = vec![0.0_f32; n];
    m[0] = secants[0];
    m[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        if secants[i - 1] * secants[i] <= 0.0 {
            m[i] = 0.0;
        } else {
            m[i] = (secants[i - 1] + secants[i]) / 2.0;
        }
    }

    for i in 0..n - 1 {
        if secants[i] == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let alpha = m[i] / secants[i];
        let beta = m[i + 1] / secants[i];
        let s = alpha * alpha + beta * beta;
        if s > 9.0 {
            let tau = 3.0 / s.sqrt();
            m[i] = tau * alpha * secants[i];
            m[i + 1] = tau * beta * secants[i];
        }
    }

    m
}

fn hermite_eval(xs: &[f32], ys: &[f32], m: &[f32], x: f32) -> f32 {
    // Find the segment containing x (domain is clamped by the caller).
    let mut i = 0;
    while i < xs.len() - 2 && x > xs[i + 1] {
        i += 1;
    }
    let h = xs[i + 1] - xs[i];
    let t = ((x - xs[i]) / h).clamp(0.0, 1.0);
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * ys[i] + h10 * h * m[i] + h01 * ys[i + 1] + h11 * h * m[i + 1]
}
