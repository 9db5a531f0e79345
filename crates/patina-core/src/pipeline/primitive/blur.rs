use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};

use super::{ensure_finite, ensure_nonempty};

/// How samples beyond the image extent behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeMode {
    /// Edge pixels extend outward. Keeps edges from darkening.
    Clamp,
    /// Outside is transparent black. Energy leaks off the edge.
    Transparent,
}

/// Separable Gaussian blur. `radius` is the standard deviation in pixels;
/// the kernel extends to three sigma. Radius 0 is identity.
pub fn gaussian_blur(
    input: &ImageBuf,
    radius: f32,
    edge: EdgeMode,
) -> Result<ImageBuf, FilterError> {
    ensure_finite("radius", radius)?;
    if radius < 0.0 {
        return Err(FilterError::Malformed {
            key: "radius".to_string(),
            expected: "a non-negative radius",
            got: radius.to_string(),
        });
    }
    ensure_nonempty(input)?;

    if radius < 1e-3 {
        return Ok(input.clone());
    }

    let kernel = build_kernel(radius);
    let horizontal = blur_pass(input, &kernel, true, edge);
    Ok(blur_pass(&horizontal, &kernel, false, edge))
}

fn build_kernel(sigma: f32) -> Vec<f32> {
    let half = (3.0 * sigma).ceil().max(1.0) as usize;
    let mut kernel = Vec::with_capacity(2 * half + 1);
    let denom = 2.0 * sigma * sigma;
    for i in 0..=2 * half {
        let d = i as f32 - half as f32;
        kernel.push((-d * d / denom).exp());
    }
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

fn blur_pass(input: &ImageBuf, kernel: &[f32], horizontal: bool, edge: EdgeMode) -> ImageBuf {
    let half = (kernel.len() / 2) as i64;
    let mut out = ImageBuf::new(input.width, input.height);

    for y in 0..input.height {
        for x in 0..input.width {
            let mut acc = [0.0_f32; 4];
            for (k, &w) in kernel.iter().enumerate() {
                let offset = k as i64 - half;
                let (sx, sy) = if horizontal {
                    (x as i64 + offset, y as i64)
                } else {
                    (x as i64, y as i64 + offset)
                };
                let px = match edge {
                    EdgeMode::Clamp => input.pixel_clamped(sx, sy),
                    EdgeMode::Transparent => {
                        if sx < 0
                            || sy < 0
                            || sx >= input.width as i64
                            || sy >= input.height as i64
                        {
                            [0.0; 4]
                        } else {
                            input.pixel(sx as u32, sy as u32)
                        }
                    }
                };
                for c in 0..CHANNELS {
                    acc[c] += px[c] * w;
                }
            }
            out.set_pixel(x, y, acc);
        }
    }

    out
}
