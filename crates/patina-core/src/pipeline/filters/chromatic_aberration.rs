use std::f32::consts::TAU;

use crate::error::FilterError;
use crate::image_buf::ImageBuf;
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::primitive::translate;

use super::RgbCompositor;

/// Offsets the three color channels around an equilateral triangle:
/// translation vectors at `angle`, `angle + tau/3` and `angle + 2*tau/3`,
/// each `radius` pixels long, feed the channel recombiner.
#[derive(Debug)]
pub struct ChromaticAberration {
    pub angle: f32,
    pub radius: f32,
}

impl Default for ChromaticAberration {
    fn default() -> Self {
        Self {
            angle: 0.0,
            radius: 2.0,
        }
    }
}

impl ImageFilter for ChromaticAberration {
    fn name(&self) -> &'static str {
        "chromatic_aberration"
    }

    fn apply(&self, input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        let shifted = |phase: f32| -> Result<ImageBuf, FilterError> {
            let a = self.angle + phase;
            translate(&input, a.sin() * self.radius, a.cos() * self.radius)
        };

        let red = shifted(0.0)?;
        let green = shifted(TAU / 3.0)?;
        let blue = shifted(2.0 * TAU / 3.0)?;

        RgbCompositor {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
        }
        .composite()
    }
}
