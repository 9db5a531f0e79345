//! Atomic raster operations the composite filters are built from.
//!
//! Every primitive validates its inputs and returns a `Result`; callers
//! decide whether a failure is fatal (configuration contract violation)
//! or degrades (cosmetic composites fall back to their input).

mod blend;
mod blur;
mod curve;
mod matrix;
mod noise;
mod transform;

pub use blend::{luminosity_blend, multiply_blend, source_over};
pub use blur::{gaussian_blur, EdgeMode};
pub use curve::{CurveLut, CURVE_X};
pub use matrix::{
    brightness, color_controls, color_matrix, min_component, opacity, ColorMatrix,
};
pub use noise::noise_field;
pub use transform::{scale_sample, scatter, translate};

use crate::error::FilterError;
use crate::image_buf::ImageBuf;

pub(crate) fn ensure_nonempty(img: &ImageBuf) -> Result<(), FilterError> {
    if img.is_empty() {
        Err(FilterError::EmptyExtent)
    } else {
        Ok(())
    }
}

pub(crate) fn ensure_finite(key: &'static str, value: f32) -> Result<(), FilterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::NonFinite { key, value })
    }
}
