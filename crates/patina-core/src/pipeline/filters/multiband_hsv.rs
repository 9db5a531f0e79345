use crate::color::{hsv_to_rgb, rgb_to_hsv};
use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};
use crate::pipeline::filter::{FilterCtx, ImageFilter};

/// Hue band names, in order around the wheel. Band centers sit every 45
/// degrees starting at red = 0.
pub const BAND_NAMES: [&str; 8] = [
    "red", "orange", "yellow", "green", "aqua", "blue", "purple", "magenta",
];

const BAND_SPAN: f32 = 45.0;

/// Per-hue-band HSV adjustment. Each band carries a
/// `(hue shift in degrees, saturation delta, value delta)` vector;
/// adjustments blend linearly between adjacent band centers so band
/// edges do not posterize. The s/v deltas are multiplicative: a delta
/// of 0.2 scales by 1.2.
#[derive(Debug)]
pub struct MultiBandHsv {
    pub bands: [[f32; 3]; 8],
}

impl Default for MultiBandHsv {
    fn default() -> Self {
        Self {
            bands: [[0.0; 3]; 8],
        }
    }
}

impl ImageFilter for MultiBandHsv {
    fn name(&self) -> &'static str {
        "multiband_hsv"
    }

    fn apply(&self, mut input: ImageBuf, _ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        if self.bands == [[0.0; 3]; 8] {
            return Ok(input);
        }
        for band in &self.bands {
            for &v in band {
                if !v.is_finite() {
                    return Err(FilterError::NonFinite {
                        key: "band",
                        value: v,
                    });
                }
            }
        }

        for px in input.data.chunks_exact_mut(CHANNELS) {
            let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
            let [dh, ds, dv] = self.adjustment_at(h);

            let h2 = (h + dh).rem_euclid(360.0);
            let s2 = (s * (1.0 + ds)).clamp(0.0, 1.0);
            let v2 = (v * (1.0 + dv)).max(0.0);

            let (r, g, b) = hsv_to_rgb(h2, s2, v2);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
        Ok(input)
    }
}

impl MultiBandHsv {
    /// Linear interpolation between the two nearest band centers.
    fn adjustment_at(&self, hue: f32) -> [f32; 3] {
        let pos = hue.rem_euclid(360.0) / BAND_SPAN;
        let i0 = (pos as usize) % 8;
        let i1 = (i0 + 1) % 8;
        let t = pos - pos.floor();

        let a = self.bands[i0];
        let b = self.bands[i1];
        [
            a[0] * (1.0 - t) + b[0] * t,
            a[1] * (1.0 - t) + b[1] * t,
            a[2] * (1.0 - t) + b[2] * t,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel(r: f32, g: f32, b: f32) -> ImageBuf {
        ImageBuf::from_data(1, 1, vec![r, g, b, 1.0]).unwrap()
    }

    fn bands_with(name: &str, adj: [f32; 3]) -> [[f32; 3]; 8] {
        let mut bands = [[0.0; 3]; 8];
        let idx = BAND_NAMES.iter().position(|&n| n == name).unwrap();
        bands[idx] = adj;
        bands
    }

    #[test]
    fn all_zero_bands_are_identity() {
        let buf = one_pixel(0.8, 0.3, 0.1);
        let expected = buf.data.clone();
        let result = MultiBandHsv::default()
            .apply(buf, &mut FilterCtx::with_seed(0))
            .unwrap();
        assert_eq!(result.data, expected);
    }

    #[test]
    fn red_band_desaturation_leaves_blue_alone() {
        let filter = MultiBandHsv {
            bands: bands_with("red", [0.0, -1.0, 0.0]),
        };
        let red = filter
            .apply(one_pixel(1.0, 0.0, 0.0), &mut FilterCtx::with_seed(0))
            .unwrap();
        let blue = filter
            .apply(one_pixel(0.0, 0.0, 1.0), &mut FilterCtx::with_seed(0))
            .unwrap();

        // Pure red sits on the red band center: fully desaturated to gray.
        assert!(
            (red.data[0] - red.data[1]).abs() < 1e-4,
            "red should desaturate: {:?}",
            &red.data[0..3]
        );
        // Pure blue sits on the blue band center, two bands away.
        assert!(
            (blue.data[2] - 1.0).abs() < 1e-4,
            "blue should be untouched: {:?}",
            &blue.data[0..3]
        );
    }

    #[test]
    fn hue_shift_rotates_band_members() {
        let filter = MultiBandHsv {
            bands: bands_with("red", [120.0, 0.0, 0.0]),
        };
        let result = filter
            .apply(one_pixel(1.0, 0.0, 0.0), &mut FilterCtx::with_seed(0))
            .unwrap();
        // Red shifted by +120 degrees lands on green.
        assert!(result.data[1] > 0.9, "expected green, got {:?}", &result.data[0..3]);
        assert!(result.data[0] < 0.1);
    }

    #[test]
    fn value_delta_scales_brightness() {
        let filter = MultiBandHsv {
            bands: bands_with("green", [0.0, 0.0, -0.5]),
        };
        // Hue 135 sits exactly on the green band center.
        let result = filter
            .apply(one_pixel(0.0, 0.8, 0.2), &mut FilterCtx::with_seed(0))
            .unwrap();
        assert!((result.data[1] - 0.4).abs() < 1e-3, "got {}", result.data[1]);
    }

    #[test]
    fn adjustment_interpolates_between_bands() {
        let filter = MultiBandHsv {
            bands: bands_with("red", [0.0, 0.0, 1.0]),
        };
        // 22.5 degrees is halfway between red (0) and orange (45).
        let half = filter.adjustment_at(22.5);
        assert!((half[2] - 0.5).abs() < 1e-5, "got {}", half[2]);
    }

    #[test]
    fn wraps_between_magenta_and_red() {
        let filter = MultiBandHsv {
            bands: bands_with("red", [0.0, 0.0, 1.0]),
        };
        // 337.5 degrees is halfway between magenta (315) and red (360 = 0).
        let half = filter.adjustment_at(337.5);
        assert!((half[2] - 0.5).abs() < 1e-5, "got {}", half[2]);
    }

    #[test]
    fn gray_pixels_are_stable_under_hue_shift() {
        let filter = MultiBandHsv {
            bands: [[30.0, 0.0, 0.0]; 8],
        };
        let result = filter
            .apply(one_pixel(0.5, 0.5, 0.5), &mut FilterCtx::with_seed(0))
            .unwrap();
        for &v in &result.data[0..3] {
            assert!((v - 0.5).abs() < 1e-5, "gray moved: {v}");
        }
    }

    #[test]
    fn non_finite_band_rejected() {
        let filter = MultiBandHsv {
            bands: bands_with("red", [f32::NAN, 0.0, 0.0]),
        };
        assert!(filter
            .apply(one_pixel(1.0, 0.0, 0.0), &mut FilterCtx::with_seed(0))
            .is_err());
    }
}
