use crate::color::luma;
use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::primitive::{gaussian_blur, EdgeMode};

/// Unsharp radius in pixels. Fixed; only strength is configurable.
const SHARPEN_RADIUS: f32 = 1.7;

/// Unsharp mask applied to luminance only, so edges crisp up without
/// shifting hue. Channels are rescaled by the luma ratio.
#[derive(Debug)]
pub struct SharpenLuminance {
    pub sharpness: f32,
}

impl ImageFilter for SharpenLuminance {
    fn name(&self) -> &'static str {
        "sharpen_luminance"
    }

    fn apply(&self, mut input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.sharpness == 0.0 {
            return Ok(input);
        }
        if !self.sharpness.is_finite() {
            return Err(FilterError::NonFinite {
                key: "sharpness",
                value: self.sharpness,
            });
        }

        // Blur a luma plane (carried in a gray buffer) to get the mask.
        let mut luma_plane = ImageBuf::new(input.width, input.height);
        for (src, dst) in input
            .data
            .chunks_exact(CHANNELS)
            .zip(luma_plane.data.chunks_exact_mut(CHANNELS))
        {
            let y = luma(src[0], src[1], src[2]);
            dst[0] = y;
            dst[1] = y;
            dst[2] = y;
            dst[3] = 1.0;
        }
        let blurred = gaussian_blur(&luma_plane, SHARPEN_RADIUS, EdgeMode::Clamp)?;

        for ((px, base), soft) in input
            .data
            .chunks_exact_mut(CHANNELS)
            .zip(luma_plane.data.chunks_exact(CHANNELS))
            .zip(blurred.data.chunks_exact(CHANNELS))
        {
            let y = base[0];
            if y < 1e-6 {
                continue;
            }
            let sharpened = (y + self.sharpness * (y - soft[0])).max(0.0);
            let scale = sharpened / y;
            px[0] *= scale;
            px[1] *= scale;
            px[2] *= scale;
        }
        Ok(input)
    }
}
