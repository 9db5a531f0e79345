use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};
use crate::pipeline::filter::{FilterCtx, ImageFilter};

/// Exposure compensation in EV stops: RGB scales by `2^ev`.
#[derive(Debug)]
pub struct Exposure {
    pub ev: f32,
}

impl ImageFilter for Exposure {
    fn name(&self) -> &'static str {
        "exposure"
    }

    fn apply(&self, mut input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.ev == 0.0 {
            return Ok(input);
        }

        let multiplier = 2.0_f32.powf(self.ev);
        for px in input.data.chunks_exact_mut(CHANNELS) {
            px[0] *= multiplier;
            px[1] *= multiplier;
            px[2] *= multiplier;
        }
        Ok(input)
    }
}
