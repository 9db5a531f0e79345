mod chromatic_aberration;
mod exposure;
mod film_grain;
mod highlight_shadow;
mod multiband_hsv;
mod rgb_brightness_contrast;
mod rgb_composite;
mod rgb_gaussian_blur;
mod rgb_tone_curve;
mod saturation;
mod sharpen;
mod tone_curve;

pub use chromatic_aberration::ChromaticAberration;
pub use exposure::Exposure;
pub use film_grain::FilmGrain;
pub use highlight_shadow::HighlightShadow;
pub use multiband_hsv::{MultiBandHsv, BAND_NAMES};
pub use rgb_brightness_contrast::RgbBrightnessContrast;
pub use rgb_composite::RgbCompositor;
pub use rgb_gaussian_blur::RgbGaussianBlur;
pub use rgb_tone_curve::RgbToneCurve;
pub use saturation::Saturation;
pub use sharpen::SharpenLuminance;
pub use tone_curve::{ToneCurve, IDENTITY_POINTS};
