use tracing::warn;

use crate::error::FilterError;
use crate::image_buf::ImageBuf;
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::primitive::{
    brightness, color_matrix, luminosity_blend, min_component, multiply_blend, noise_field,
    opacity, scale_sample, scatter, source_over, ColorMatrix,
};

/// Below this, grain is imperceptible and not worth the passes.
const BYPASS_THRESHOLD: f32 = 0.01;

/// Synthesized film grain: white speckles blended by luminosity plus
/// dark vertical scratches multiplied on top, both derived from one
/// noise field and faded by `amount`.
///
/// Grain is cosmetic, so any intermediate failure degrades to the
/// untouched input rather than failing the pipeline run.
#[derive(Debug)]
pub struct FilmGrain {
    pub amount: f32,
    pub size: f32,
}

impl Default for FilmGrain {
    fn default() -> Self {
        Self {
            amount: 0.5,
            size: 0.5,
        }
    }
}

impl ImageFilter for FilmGrain {
    fn name(&self) -> &'static str {
        "film_grain"
    }

    fn apply(&self, input: ImageBuf, ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.amount <= BYPASS_THRESHOLD || self.size <= BYPASS_THRESHOLD {
            return Ok(input);
        }

        match self.render(&input, ctx) {
            Ok(out) => Ok(out),
            Err(err) => {
                warn!(error = %err, "film grain degraded, returning input unchanged");
                Ok(input)
            }
        }
    }
}

impl FilmGrain {
    fn render(&self, input: &ImageBuf, ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        let amount = self.amount;
        let size = self.size;

        let noise = noise_field(input.width, input.height, &mut ctx.rng)?;

        // White speckles: pull the noise's green channel into every color
        // channel, give it a sparse alpha scaled by size, then roughen,
        // darken and fade it.
        let channel_g = [0.0, 1.0, 0.0, 0.0];
        let speckle_matrix = ColorMatrix {
            r: channel_g,
            g: channel_g,
            b: channel_g,
            a: [0.0, 0.001 * size, 0.0, 0.0],
            bias: [0.0; 4],
        };
        let specks = color_matrix(noise.clone(), &speckle_matrix)?;
        let specks = scatter(&specks, 10.0 * size, &mut ctx.rng)?;
        let specks = brightness(specks, (-0.4_f32).min(amount - 1.0))?;
        let specks = opacity(specks, 0.2 * amount)?;
        let specks = opacity(specks, 0.6_f32.min(amount))?;
        let speckled = luminosity_blend(&specks, input)?;

        // Dark scratches: stretch the same noise into vertical streaks,
        // push its red channel into a darkening bias, then collapse to
        // the per-pixel minimum so the streaks read as gray.
        let stretched = scale_sample(&noise, 1.0 + size, 1.5 + 5.0 * (1.0 + size))?;
        let scratch_matrix = ColorMatrix {
            r: [4.0, 0.0, 0.0, 0.0],
            g: [0.0; 4],
            b: [0.0; 4],
            a: [0.0; 4],
            bias: [0.0, 1.0, 1.0, 1.0],
        };
        let darkened = color_matrix(stretched, &scratch_matrix)?;
        let scratches = min_component(darkened)?;

        let scratched = multiply_blend(&scratches, &speckled)?;
        let faded = opacity(scratched, amount)?;
        source_over(&faded, input)
    }
}
