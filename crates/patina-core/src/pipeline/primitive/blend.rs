//! Two-layer compositing with straight (non-premultiplied) alpha.
//!
//! Blend modes follow the standard compositing model: the blend function
//! mixes source and backdrop color where both are covered, and plain
//! source-over alpha compositing handles the rest.

use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};

use super::ensure_nonempty;

/// Plain source-over: the foreground covers the backdrop by its alpha.
pub fn source_over(fg: &ImageBuf, bg: &ImageBuf) -> Result<ImageBuf, FilterError> {
    blend_with(fg, bg, |_cb, cs| cs)
}

/// Multiply blend: per-channel product where both layers are covered.
pub fn multiply_blend(fg: &ImageBuf, bg: &ImageBuf) -> Result<ImageBuf, FilterError> {
    blend_with(fg, bg, |cb, cs| {
        [cb[0] * cs[0], cb[1] * cs[1], cb[2] * cs[2]]
    })
}

/// Luminosity blend: the backdrop's color with the source's luminosity.
pub fn luminosity_blend(fg: &ImageBuf, bg: &ImageBuf) -> Result<ImageBuf, FilterError> {
    blend_with(fg, bg, |cb, cs| set_lum(cb, lum(cs)))
}

fn blend_with(
    fg: &ImageBuf,
    bg: &ImageBuf,
    blend: impl Fn([f32; 3], [f32; 3]) -> [f32; 3],
) -> Result<ImageBuf, FilterError> {
    ensure_nonempty(fg)?;
    ensure_nonempty(bg)?;
    if fg.width != bg.width || fg.height != bg.height {
        return Err(FilterError::ExtentMismatch);
    }

    let mut out = ImageBuf::new(bg.width, bg.height);
    for ((s, b), o) in fg
        .data
        .chunks_exact(CHANNELS)
        .zip(bg.data.chunks_exact(CHANNELS))
        .zip(out.data.chunks_exact_mut(CHANNELS))
    {
        let sa = s[3];
        let ba = b[3];
        let cs = [s[0], s[1], s[2]];
        let cb = [b[0], b[1], b[2]];

        // Mix the raw source toward the blended color by backdrop coverage,
        // then composite source-over.
        let mixed = blend(cb, cs);
        let cs = [
            cs[0] * (1.0 - ba) + mixed[0] * ba,
            cs[1] * (1.0 - ba) + mixed[1] * ba,
            cs[2] * (1.0 - ba) + mixed[2] * ba,
        ];

        let oa = sa + ba * (1.0 - sa);
        if oa <= 1e-9 {
            o.copy_from_slice(&[0.0; 4]);
            continue;
        }
        for c in 0..3 {
            o[c] = (cs[c] * sa + cb[c] * ba * (1.0 - sa)) / oa;
        }
        o[3] = oa;
    }
    Ok(out)
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        let l = lum(out);
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, px: [f32; 4]) -> ImageBuf {
        let mut buf = ImageBuf::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set_pixel(x, y, px);
            }
        }
        buf
    }

    #[test]
    fn opaque_source_over_replaces_backdrop() {
        let fg = solid(2, 2, [0.9, 0.1, 0.1, 1.0]);
        let bg = solid(2, 2, [0.1, 0.9, 0.1, 1.0]);
        let out = source_over(&fg, &bg).unwrap();
        assert_eq!(out.pixel(0, 0), [0.9, 0.1, 0.1, 1.0]);
    }

    #[test]
    fn transparent_source_over_keeps_backdrop() {
        let fg = solid(2, 2, [0.9, 0.1, 0.1, 0.0]);
        let bg = solid(2, 2, [0.1, 0.9, 0.1, 1.0]);
        let out = source_over(&fg, &bg).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] - 0.1).abs() < 1e-5);
        assert!((px[1] - 0.9).abs() < 1e-5);
        assert!((px[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn half_alpha_source_over_mixes() {
        let fg = solid(1, 1, [1.0, 0.0, 0.0, 0.5]);
        let bg = solid(1, 1, [0.0, 0.0, 0.0, 1.0]);
        let out = source_over(&fg, &bg).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] - 0.5).abs() < 1e-5, "got {}", px[0]);
        assert!((px[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn multiply_darkens() {
        let fg = solid(1, 1, [0.5, 0.5, 0.5, 1.0]);
        let bg = solid(1, 1, [0.5, 0.5, 0.5, 1.0]);
        let out = multiply_blend(&fg, &bg).unwrap();
        assert!((out.pixel(0, 0)[0] - 0.25).abs() < 1e-5);
    }

    #[test]
    fn multiply_by_white_is_identity() {
        let fg = solid(1, 1, [1.0, 1.0, 1.0, 1.0]);
        let bg = solid(1, 1, [0.3, 0.6, 0.9, 1.0]);
        let out = multiply_blend(&fg, &bg).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] - 0.3).abs() < 1e-5);
        assert!((px[1] - 0.6).abs() < 1e-5);
        assert!((px[2] - 0.9).abs() < 1e-5);
    }

    #[test]
    fn luminosity_takes_source_lightness() {
        let fg = solid(1, 1, [1.0, 1.0, 1.0, 1.0]); // bright source
        let bg = solid(1, 1, [0.2, 0.1, 0.1, 1.0]); // dark red backdrop
        let out = luminosity_blend(&fg, &bg).unwrap();
        let px = out.pixel(0, 0);
        let result_lum = 0.3 * px[0] + 0.59 * px[1] + 0.11 * px[2];
        assert!(
            (result_lum - 1.0).abs() < 1e-3,
            "luminosity should come from source, got {result_lum}"
        );
    }

    #[test]
    fn luminosity_preserves_backdrop_with_transparent_source() {
        let fg = solid(1, 1, [1.0, 1.0, 1.0, 0.0]);
        let bg = solid(1, 1, [0.2, 0.4, 0.6, 1.0]);
        let out = luminosity_blend(&fg, &bg).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] - 0.2).abs() < 1e-5);
        assert!((px[2] - 0.6).abs() < 1e-5);
    }

    #[test]
    fn mismatched_extents_rejected() {
        let fg = solid(2, 2, [0.5; 4]);
        let bg = solid(3, 2, [0.5; 4]);
        assert_eq!(
            source_over(&fg, &bg).unwrap_err(),
            FilterError::ExtentMismatch
        );
    }

    #[test]
    fn clip_color_bounds_output() {
        let out = clip_color([1.4, 0.9, 0.8]);
        assert!(out.iter().all(|&v| (0.0..=1.0 + 1e-5).contains(&v)));
    }
}
