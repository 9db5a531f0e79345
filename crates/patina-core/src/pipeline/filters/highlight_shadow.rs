use crate::color::luma;
use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};
use crate::pipeline::filter::{FilterCtx, ImageFilter};

/// Independent shadow lift and highlight compression, driven by
/// per-pixel luma and applied as a channel-preserving luma rescale.
///
/// `highlight_amount` in [0, 1]: 1 leaves highlights alone, lower values
/// compress them. `shadow_amount` in [-1, 1]: positive lifts shadows,
/// negative crushes them. Defaults are identity.
#[derive(Debug)]
pub struct HighlightShadow {
    pub highlight_amount: f32,
    pub shadow_amount: f32,
}

impl Default for HighlightShadow {
    fn default() -> Self {
        Self {
            highlight_amount: 1.0,
            shadow_amount: 0.0,
        }
    }
}

impl ImageFilter for HighlightShadow {
    fn name(&self) -> &'static str {
        "highlight_shadow"
    }

    fn apply(&self, mut input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.highlight_amount == 1.0 && self.shadow_amount == 0.0 {
            return Ok(input);
        }
        if !self.highlight_amount.is_finite() {
            return Err(FilterError::NonFinite {
                key: "highlight_amount",
                value: self.highlight_amount,
            });
        }
        if !self.shadow_amount.is_finite() {
            return Err(FilterError::NonFinite {
                key: "shadow_amount",
                value: self.shadow_amount,
            });
        }

        for px in input.data.chunks_exact_mut(CHANNELS) {
            let y = luma(px[0], px[1], px[2]);
            if y < 1e-6 {
                continue;
            }

            // Shadow weight peaks at black and fades out by mid-gray.
            let shadow_mask = (1.0 - y.min(1.0)).powi(2);
            let lifted = y * (1.0 + self.shadow_amount * 2.0 * shadow_mask);

            // Highlight weight ramps in above mid-gray.
            let highlight_mask = smoothstep(0.5, 1.0, lifted);
            let compressed =
                lifted * (1.0 - (1.0 - self.highlight_amount) * highlight_mask);

            let scale = (compressed / y).max(0.0);
            px[0] *= scale;
            px[1] *= scale;
            px[2] *= scale;
        }
        Ok(input)
    }
}

fn smoothstep(lo: f32, hi: f32, x: f32) -> f32 {
    let t = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
