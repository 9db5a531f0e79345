use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};

use super::{ensure_finite, ensure_nonempty};

/// Per-channel linear recombination: each output channel is the dot
/// product of the input RGBA with its row vector, plus a bias vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    pub r: [f32; 4],
    pub g: [f32; 4],
    pub b: [f32; 4],
    pub a: [f32; 4],
    pub bias: [f32; 4],
}

impl ColorMatrix {
    pub const IDENTITY: Self = Self {
        r: [1.0, 0.0, 0.0, 0.0],
        g: [0.0, 1.0, 0.0, 0.0],
        b: [0.0, 0.0, 1.0, 0.0],
        a: [0.0, 0.0, 0.0, 1.0],
        bias: [0.0; 4],
    };
}

pub fn color_matrix(mut input: ImageBuf, m: &ColorMatrix) -> Result<ImageBuf, FilterError> {
    ensure_nonempty(&input)?;
    for px in input.data.chunks_exact_mut(CHANNELS) {
        let src = [px[0], px[1], px[2], px[3]];
        px[0] = dot(&m.r, &src) + m.bias[0];
        px[1] = dot(&m.g, &src) + m.bias[1];
        px[2] = dot(&m.b, &src) + m.bias[2];
        px[3] = dot(&m.a, &src) + m.bias[3];
    }
    Ok(input)
}

/// Collapse RGB to the per-pixel minimum component. Alpha is preserved.
pub fn min_component(mut input: ImageBuf) -> Result<ImageBuf, FilterError> {
    ensure_nonempty(&input)?;
    for px in input.data.chunks_exact_mut(CHANNELS) {
        let gray = px[0].min(px[1]).min(px[2]);
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
    Ok(input)
}

/// Scale alpha by `scale`.
pub fn opacity(mut input: ImageBuf, scale: f32) -> Result<ImageBuf, FilterError> {
    ensure_finite("opacity", scale)?;
    ensure_nonempty(&input)?;
    for px in input.data.chunks_exact_mut(CHANNELS) {
        px[3] *= scale;
    }
    Ok(input)
}

/// Add a constant delta to RGB.
pub fn brightness(mut input: ImageBuf, delta: f32) -> Result<ImageBuf, FilterError> {
    ensure_finite("brightness", delta)?;
    ensure_nonempty(&input)?;
    for px in input.data.chunks_exact_mut(CHANNELS) {
        px[0] += delta;
        px[1] += delta;
        px[2] += delta;
    }
    Ok(input)
}

/// Brightness offset plus contrast scale pivoted at mid-gray 0.5.
pub fn color_controls(
    mut input: ImageBuf,
    brightness: f32,
    contrast: f32,
) -> Result<ImageBuf, FilterError> {
    ensure_finite("brightness", brightness)?;
    ensure_finite("contrast", contrast)?;
    ensure_nonempty(&input)?;
    for px in input.data.chunks_exact_mut(CHANNELS) {
        for c in 0..3 {
            px[c] = (px[c] - 0.5) * contrast + 0.5 + brightness;
        }
    }
    Ok(input)
}

#[inline]
fn dot(row: &[f32; 4], src: &[f32; 4]) -> f32 {
    row[0] * src[0] + row[1] * src[1] + row[2] * src[2] + row[3] * src[3]
}
