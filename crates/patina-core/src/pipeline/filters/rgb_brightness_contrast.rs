use crate::error::FilterError;
use crate::image_buf::ImageBuf;
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::primitive::color_controls;

use super::RgbCompositor;

/// Independent brightness offset and contrast factor per channel, with
/// contrast pivoted at mid-gray. Each channel's settings run over the
/// whole image and the results recombine channel-wise.
#[derive(Debug)]
pub struct RgbBrightnessContrast {
    pub red_brightness: f32,
    pub red_contrast: f32,
    pub green_brightness: f32,
    pub green_contrast: f32,
    pub blue_brightness: f32,
    pub blue_contrast: f32,
}

impl Default for RgbBrightnessContrast {
    fn default() -> Self {
        Self {
            red_brightness: 0.0,
            red_contrast: 1.0,
            green_brightness: 0.0,
            green_contrast: 1.0,
            blue_brightness: 0.0,
            blue_contrast: 1.0,
        }
    }
}

impl ImageFilter for RgbBrightnessContrast {
    fn name(&self) -> &'static str {
        "rgb_brightness_contrast"
    }

    fn apply(&self, input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        let red = color_controls(input.clone(), self.red_brightness, self.red_contrast)?;
        let green = color_controls(input.clone(), self.green_brightness, self.green_contrast)?;
        let blue = color_controls(input, self.blue_brightness, self.blue_contrast)?;

        RgbCompositor {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
        }
        .composite()
    }
}
