use crate::color::luma;
use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};
use crate::pipeline::filter::{FilterCtx, ImageFilter};

/// Saturation as a blend factor around per-pixel luma: 1 is identity,
/// 0 collapses to grayscale, above 1 boosts.
#[derive(Debug)]
pub struct Saturation {
    pub factor: f32,
}

impl ImageFilter for Saturation {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn apply(&self, mut input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.factor == 1.0 {
            return Ok(input);
        }

        for px in input.data.chunks_exact_mut(CHANNELS) {
            let y = luma(px[0], px[1], px[2]);
            px[0] = (y + self.factor * (px[0] - y)).max(0.0);
            px[1] = (y + self.factor * (px[1] - y)).max(0.0);
            px[2] = (y + self.factor * (px[2] - y)).max(0.0);
        }
        Ok(input)
    }
}
