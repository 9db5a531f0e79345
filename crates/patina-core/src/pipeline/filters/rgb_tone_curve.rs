use crate::error::FilterError;
use crate::image_buf::ImageBuf;
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::primitive::{CurveLut, CURVE_X};

use super::RgbCompositor;

/// Independent five-point tone curves per channel. The x positions are
/// locked to `[0.0, 0.25, 0.5, 0.75, 1.0]`; each field supplies the y
/// values for its channel. The three curved images are recombined
/// channel-wise.
#[derive(Debug)]
pub struct RgbToneCurve {
    pub red: [f32; 5],
    pub green: [f32; 5],
    pub blue: [f32; 5],
}

impl Default for RgbToneCurve {
    fn default() -> Self {
        Self {
            red: CURVE_X,
            green: CURVE_X,
            blue: CURVE_X,
        }
    }
}

impl ImageFilter for RgbToneCurve {
    fn name(&self) -> &'static str {
        "rgb_tone_curve"
    }

    fn apply(&self, input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        let red = curve_for(&self.red)?.apply_rgb(input.clone())?;
        let green = curve_for(&self.green)?.apply_rgb(input.clone())?;
        let blue = curve_for(&self.blue)?.apply_rgb(input)?;

        RgbCompositor {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
        }
        .composite()
    }
}

fn curve_for(y_values: &[f32; 5]) -> Result<CurveLut, FilterError> {
    let mut points = [[0.0_f32; 2]; 5];
    for i in 0..5 {
        points[i] = [CURVE_X[i], y_values[i]];
    }
    CurveLut::from_points(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(r: f32, g: f32, b: f32) -> ImageBuf {
        ImageBuf::from_data(2, 2, vec![r, g, b, 1.0].repeat(4)).unwrap()
    }

    #[test]
    fn identity_curves_reproduce_input() {
        let buf = uniform(0.2, 0.5, 0.8);
        let result = RgbToneCurve::default()
            .apply(buf.clone(), &mut FilterCtx::with_seed(0))
            .unwrap();
        for (a, b) in result.data.iter().zip(buf.data.iter()).take(3) {
            assert!((a - b).abs() < 1e-4, "identity drifted: {a} vs {b}");
        }
    }

    #[test]
    fn channels_are_curved_independently() {
        let filter = RgbToneCurve {
            red: [0.0, 0.5, 0.75, 0.9, 1.0], // lifts red
            green: CURVE_X,                  // identity
            blue: [0.0, 0.1, 0.25, 0.5, 1.0], // crushes blue
        };
        let result = filter
            .apply(uniform(0.25, 0.25, 0.25), &mut FilterCtx::with_seed(0))
            .unwrap();
        let px = result.pixel(0, 0);
        assert!(px[0] > 0.4, "red lifted, got {}", px[0]);
        assert!((px[1] - 0.25).abs() < 1e-3, "green identity, got {}", px[1]);
        assert!(px[2] < 0.15, "blue crushed, got {}", px[2]);
    }

    #[test]
    fn output_is_opaque() {
        let buf = ImageBuf::from_data(1, 1, vec![0.5, 0.5, 0.5, 0.3]).unwrap();
        let result = RgbToneCurve::default()
            .apply(buf, &mut FilterCtx::with_seed(0))
            .unwrap();
        assert_eq!(result.data[3], 1.0);
    }

    #[test]
    fn non_finite_y_values_rejected() {
        let filter = RgbToneCurve {
            red: [0.0, f32::NAN, 0.5, 0.75, 1.0],
            ..Default::default()
        };
        assert!(filter
            .apply(uniform(0.5, 0.5, 0.5), &mut FilterCtx::with_seed(0))
            .is_err());
    }
}
