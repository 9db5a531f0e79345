use crate::error::FilterError;
use crate::image_buf::ImageBuf;
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::primitive::CurveLut;

/// Identity control points at the canonical x positions.
pub const IDENTITY_POINTS: [[f32; 2]; 5] = [
    [0.0, 0.0],
    [0.25, 0.25],
    [0.5, 0.5],
    [0.75, 0.75],
    [1.0, 1.0],
];

/// Five-point tone curve applied equally to R, G and B.
#[derive(Debug)]
pub struct ToneCurve {
    pub points: [[f32; 2]; 5],
}

impl ImageFilter for ToneCurve {
    fn name(&self) -> &'static str {
        "tone_curve"
    }

    fn apply(&self, input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.points == IDENTITY_POINTS {
            return Ok(input);
        }
        let lut = CurveLut::from_points(&self.points)?;
        lut.apply_rgb(input)
    }
}
