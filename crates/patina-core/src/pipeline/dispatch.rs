use tracing::warn;

use crate::descriptor::{FilterDescriptor, ParameterEntry};
use crate::error::FilterError;
use crate::image_buf::ImageBuf;
use crate::pipeline::filter::{FilterCtx, ImageFilter};
use crate::pipeline::filters::{
    ChromaticAberration, Exposure, FilmGrain, HighlightShadow, MultiBandHsv,
    RgbBrightnessContrast, RgbGaussianBlur, RgbToneCurve, Saturation, SharpenLuminance,
    ToneCurve, BAND_NAMES, IDENTITY_POINTS,
};

/// A resolved, fully-bound pipeline stage.
///
/// The variant set is closed: every supported configuration key maps to
/// exactly one variant, and `resolve` is the only way keys become
/// filters. Unknown keys are not an error here; the executor skips them.
#[derive(Debug)]
pub enum Filter {
    Exposure(Exposure),
    Saturation(Saturation),
    SharpenLuminance(SharpenLuminance),
    HighlightShadow(HighlightShadow),
    ToneCurve(ToneCurve),
    MultiBandHsv(MultiBandHsv),
    FilmGrain(FilmGrain),
    ChromaticAberration(ChromaticAberration),
    RgbToneCurve(RgbToneCurve),
    RgbBrightnessContrast(RgbBrightnessContrast),
    RgbGaussianBlur(RgbGaussianBlur),
}

/// Every key `resolve` recognizes, for exhaustive enumeration in tests.
pub const KEYS: [&str; 11] = [
    "exposure",
    "saturation",
    "sharpen_luminance",
    "highlight_shadow",
    "tone_curve",
    "multiband_hsv",
    "film_grain",
    "chromatic_aberration",
    "rgb_tone_curve",
    "rgb_brightness_contrast",
    "rgb_gaussian_blur",
];

impl Filter {
    /// Map a descriptor to a bound filter. `Ok(None)` means the key is
    /// unrecognized (tolerated); `Err` means the key is known but its
    /// parameters violate the filter's contract (fatal).
    ///
    /// Binding conventions are preserved exactly as observed: the three
    /// single-scalar filters read only the first entry, everything else
    /// consumes all entries by name.
    pub fn resolve(desc: &FilterDescriptor) -> Result<Option<Self>, FilterError> {
        let filter = match desc.key.as_str() {
            "exposure" => Self::Exposure(Exposure {
                ev: first_scalar(desc)?,
            }),
            "saturation" => Self::Saturation(Saturation {
                factor: first_scalar(desc)?,
            }),
            "sharpen_luminance" => Self::SharpenLuminance(SharpenLuminance {
                sharpness: first_scalar(desc)?,
            }),
            "highlight_shadow" => {
                let mut f = HighlightShadow::default();
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "highlight_amount" => f.highlight_amount = scalar(entry)?,
                        "shadow_amount" => f.shadow_amount = scalar(entry)?,
                        other => warn_unknown_param("highlight_shadow", other),
                    }
                }
                Self::HighlightShadow(f)
            }
            "tone_curve" => {
                let mut points = IDENTITY_POINTS;
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "point0" => points[0] = vec2(entry)?,
                        "point1" => points[1] = vec2(entry)?,
                        "point2" => points[2] = vec2(entry)?,
                        "point3" => points[3] = vec2(entry)?,
                        "point4" => points[4] = vec2(entry)?,
                        other => warn_unknown_param("tone_curve", other),
                    }
                }
                Self::ToneCurve(ToneCurve { points })
            }
            "multiband_hsv" => {
                let mut f = MultiBandHsv::default();
                for entry in &desc.parameters {
                    match BAND_NAMES.iter().position(|&n| n == entry.key) {
                        Some(idx) => f.bands[idx] = vec3(entry)?,
                        None => warn_unknown_param("multiband_hsv", &entry.key),
                    }
                }
                Self::MultiBandHsv(f)
            }
            "film_grain" => {
                let mut f = FilmGrain::default();
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "amount" => f.amount = scalar(entry)?,
                        "size" => f.size = scalar(entry)?,
                        other => warn_unknown_param("film_grain", other),
                    }
                }
                Self::FilmGrain(f)
            }
            "chromatic_aberration" => {
                let mut f = ChromaticAberration::default();
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "angle" => f.angle = scalar(entry)?,
                        "radius" => f.radius = scalar(entry)?,
                        other => warn_unknown_param("chromatic_aberration", other),
                    }
                }
                Self::ChromaticAberration(f)
            }
            "rgb_tone_curve" => {
                let mut f = RgbToneCurve::default();
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "red_values" => f.red = vec5(entry)?,
                        "green_values" => f.green = vec5(entry)?,
                        "blue_values" => f.blue = vec5(entry)?,
                        other => warn_unknown_param("rgb_tone_curve", other),
                    }
                }
                Self::RgbToneCurve(f)
            }
            "rgb_brightness_contrast" => {
                let mut f = RgbBrightnessContrast::default();
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "red_brightness" => f.red_brightness = scalar(entry)?,
                        "red_contrast" => f.red_contrast = scalar(entry)?,
                        "green_brightness" => f.green_brightness = scalar(entry)?,
                        "green_contrast" => f.green_contrast = scalar(entry)?,
                        "blue_brightness" => f.blue_brightness = scalar(entry)?,
                        "blue_contrast" => f.blue_contrast = scalar(entry)?,
                        other => warn_unknown_param("rgb_brightness_contrast", other),
                    }
                }
                Self::RgbBrightnessContrast(f)
            }
            "rgb_gaussian_blur" => {
                let mut f = RgbGaussianBlur::default();
                for entry in &desc.parameters {
                    match entry.key.as_str() {
                        "red_radius" => f.red_radius = scalar(entry)?,
                        "green_radius" => f.green_radius = scalar(entry)?,
                        "blue_radius" => f.blue_radius = scalar(entry)?,
                        other => warn_unknown_param("rgb_gaussian_blur", other),
                    }
                }
                Self::RgbGaussianBlur(f)
            }
            _ => return Ok(None),
        };
        Ok(Some(filter))
    }

    pub fn name(&self) -> &'static str {
        self.as_dyn().name()
    }

    pub fn apply(&self, input: ImageBuf, ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError> {
        self.as_dyn().apply(input, ctx)
    }

    fn as_dyn(&self) -> &dyn ImageFilter {
        match self {
            Self::Exposure(f) => f,
            Self::Saturation(f) => f,
            Self::SharpenLuminance(f) => f,
            Self::HighlightShadow(f) => f,
            Self::ToneCurve(f) => f,
            Self::MultiBandHsv(f) => f,
            Self::FilmGrain(f) => f,
            Self::ChromaticAberration(f) => f,
            Self::RgbToneCurve(f) => f,
            Self::RgbBrightnessContrast(f) => f,
            Self::RgbGaussianBlur(f) => f,
        }
    }
}

/// First-entry-only convention for the single-scalar filters. Extra
/// entries are deliberately ignored.
fn first_scalar(desc: &FilterDescriptor) -> Result<f32, FilterError> {
    let entry = desc
        .parameters
        .first()
        .ok_or(FilterError::MissingInput("val"))?;
    scalar(entry)
}

fn scalar(entry: &ParameterEntry) -> Result<f32, FilterError> {
    entry.val.as_scalar().ok_or_else(|| FilterError::Malformed {
        key: entry.key.clone(),
        expected: "a scalar",
        got: entry.val.kind(),
    })
}

fn vec2(entry: &ParameterEntry) -> Result<[f32; 2], FilterError> {
    entry.val.as_vec2().ok_or_else(|| FilterError::Malformed {
        key: entry.key.clone(),
        expected: "a 2-element list",
        got: entry.val.kind(),
    })
}

fn vec3(entry: &ParameterEntry) -> Result<[f32; 3], FilterError> {
    entry.val.as_vec3().ok_or_else(|| FilterError::Malformed {
        key: entry.key.clone(),
        expected: "a 3-element list",
        got: entry.val.kind(),
    })
}

fn vec5(entry: &ParameterEntry) -> Result<[f32; 5], FilterError> {
    entry.val.as_vec5().ok_or_else(|| FilterError::Malformed {
        key: entry.key.clone(),
        expected: "a 5-element list",
        got: entry.val.kind(),
    })
}

fn warn_unknown_param(filter: &str, param: &str) {
    warn!(filter, param, "ignoring unrecognized parameter");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParamValue;
    use crate::pipeline::primitive::CURVE_X;

    fn desc(key: &str, params: Vec<(&str, ParamValue)>) -> FilterDescriptor {
        FilterDescriptor::new(
            key,
            params
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn every_supported_key_resolves() {
        for key in KEYS {
            let d = match key {
                // Single-scalar filters need a first entry to bind.
                "exposure" | "saturation" | "sharpen_luminance" => {
                    desc(key, vec![("val", ParamValue::Scalar(0.5))])
                }
                _ => desc(key, vec![]),
            };
            let resolved = Filter::resolve(&d).unwrap();
            assert!(resolved.is_some(), "key `{key}` should resolve");
            assert_eq!(resolved.unwrap().name(), key);
        }
    }

    #[test]
    fn unknown_keys_resolve_to_none() {
        for key in ["CIVortexDistortion", "exposure2", "", "Exposure"] {
            let resolved = Filter::resolve(&desc(key, vec![])).unwrap();
            assert!(resolved.is_none(), "key `{key}` should be unknown");
        }
    }

    #[test]
    fn single_scalar_filters_use_first_entry_only() {
        let d = desc(
            "exposure",
            vec![
                ("val", ParamValue::Scalar(0.7)),
                ("val", ParamValue::Scalar(99.0)),
                ("junk", ParamValue::List(vec![1.0, 2.0])),
            ],
        );
        match Filter::resolve(&d).unwrap().unwrap() {
            Filter::Exposure(f) => assert_eq!(f.ev, 0.7),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn single_scalar_filter_without_entries_is_missing_input() {
        let err = Filter::resolve(&desc("saturation", vec![])).unwrap_err();
        assert_eq!(err, FilterError::MissingInput("val"));
    }

    #[test]
    fn scalar_position_takes_a_list_as_malformed() {
        let d = desc("exposure", vec![("val", ParamValue::List(vec![1.0, 2.0]))]);
        match Filter::resolve(&d).unwrap_err() {
            FilterError::Malformed { key, expected, got } => {
                assert_eq!(key, "val");
                assert_eq!(expected, "a scalar");
                assert_eq!(got, "a 2-element list");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn highlight_shadow_binds_all_named_entries() {
        let d = desc(
            "highlight_shadow",
            vec![
                ("highlight_amount", ParamValue::Scalar(0.4)),
                ("shadow_amount", ParamValue::Scalar(0.3)),
            ],
        );
        match Filter::resolve(&d).unwrap().unwrap() {
            Filter::HighlightShadow(f) => {
                assert_eq!(f.highlight_amount, 0.4);
                assert_eq!(f.shadow_amount, 0.3);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn unknown_parameter_names_are_tolerated() {
        let d = desc(
            "highlight_shadow",
            vec![
                ("shadow_amount", ParamValue::Scalar(0.3)),
                ("no_such_setting", ParamValue::Scalar(1.0)),
            ],
        );
        match Filter::resolve(&d).unwrap().unwrap() {
            Filter::HighlightShadow(f) => assert_eq!(f.shadow_amount, 0.3),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn tone_curve_binds_named_control_points() {
        let d = desc(
            "tone_curve",
            vec![
                ("point1", ParamValue::List(vec![0.25, 0.4])),
                ("point3", ParamValue::List(vec![0.75, 0.6])),
            ],
        );
        match Filter::resolve(&d).unwrap().unwrap() {
            Filter::ToneCurve(f) => {
                assert_eq!(f.points[0], [0.0, 0.0], "unset point stays identity");
                assert_eq!(f.points[1], [0.25, 0.4]);
                assert_eq!(f.points[3], [0.75, 0.6]);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn tone_curve_rejects_scalar_points() {
        let d = desc("tone_curve", vec![("point0", ParamValue::Scalar(0.5))]);
        assert!(matches!(
            Filter::resolve(&d).unwrap_err(),
            FilterError::Malformed { .. }
        ));
    }

    #[test]
    fn multiband_binds_vectors_by_band_name() {
        let d = desc(
            "multiband_hsv",
            vec![
                ("red", ParamValue::List(vec![10.0, 0.1, -0.2])),
                ("aqua", ParamValue::List(vec![-5.0, 0.0, 0.3])),
            ],
        );
        match Filter::resolve(&d).unwrap().unwrap() {
            Filter::MultiBandHsv(f) => {
                assert_eq!(f.bands[0], [10.0, 0.1, -0.2]);
                assert_eq!(f.bands[4], [-5.0, 0.0, 0.3]);
                assert_eq!(f.bands[1], [0.0; 3]);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn multiband_rejects_wrong_arity() {
        let d = desc("multiband_hsv", vec![("red", ParamValue::List(vec![1.0]))]);
        assert!(Filter::resolve(&d).is_err());
    }

    #[test]
    fn rgb_tone_curve_binds_five_element_lists() {
        let d = desc(
            "rgb_tone_curve",
            vec![(
                "red_values",
                ParamValue::List(vec![0.0, 0.3, 0.5, 0.7, 1.0]),
            )],
        );
        match Filter::resolve(&d).unwrap().unwrap() {
            Filter::RgbToneCurve(f) => {
                assert_eq!(f.red, [0.0, 0.3, 0.5, 0.7, 1.0]);
                assert_eq!(f.green, CURVE_X, "unset channel stays identity");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn film_grain_defaults_apply_when_unconfigured() {
        match Filter::resolve(&desc("film_grain", vec![])).unwrap().unwrap() {
            Filter::FilmGrain(f) => {
                assert_eq!(f.amount, 0.5);
                assert_eq!(f.size, 0.5);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn rgb_gaussian_blur_defaults_match_contract() {
        match Filter::resolve(&desc("rgb_gaussian_blur", vec![]))
            .unwrap()
            .unwrap()
        {
            Filter::RgbGaussianBlur(f) => {
                assert_eq!(f.red_radius, 2.0);
                assert_eq!(f.green_radius, 4.0);
                assert_eq!(f.blue_radius, 8.0);
            }
            _ => panic!("wrong variant"),
        }
    }
}
