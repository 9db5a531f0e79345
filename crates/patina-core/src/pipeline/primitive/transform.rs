use rand::Rng;

use crate::error::FilterError;
use crate::image_buf::ImageBuf;

use super::{ensure_finite, ensure_nonempty};

/// Translate by a (possibly fractional) offset with bilinear resampling.
/// Samples falling outside the input extent read as transparent black,
/// matching a translated layer cropped back to the original extent.
pub fn translate(input: &ImageBuf, dx: f32, dy: f32) -> Result<ImageBuf, FilterError> {
    ensure_finite("dx", dx)?;
    ensure_finite("dy", dy)?;
    ensure_nonempty(input)?;

    if dx == 0.0 && dy == 0.0 {
        return Ok(input.clone());
    }

    let mut out = ImageBuf::new(input.width, input.height);
    for y in 0..input.height {
        for x in 0..input.width {
            let px = bilinear_transparent(input, x as f32 - dx, y as f32 - dy);
            out.set_pixel(x, y, px);
        }
    }
    Ok(out)
}

/// Stretch the input by (sx, sy) and sample the result back over the
/// original extent: output (x, y) reads input (x/sx, y/sy) with clamped
/// bilinear sampling. Scale factors must be positive.
pub fn scale_sample(input: &ImageBuf, sx: f32, sy: f32) -> Result<ImageBuf, FilterError> {
    ensure_finite("sx", sx)?;
    ensure_finite("sy", sy)?;
    if sx <= 0.0 || sy <= 0.0 {
        return Err(FilterError::Malformed {
            key: if sx <= 0.0 { "sx" } else { "sy" }.to_string(),
            expected: "a positive scale factor",
            got: if sx <= 0.0 { sx } else { sy }.to_string(),
        });
    }
    ensure_nonempty(input)?;

    let mut out = ImageBuf::new(input.width, input.height);
    for y in 0..input.height {
        for x in 0..input.width {
            let px = bilinear_clamped(input, x as f32 / sx, y as f32 / sy);
            out.set_pixel(x, y, px);
        }
    }
    Ok(out)
}

/// Displace every pixel by an independent uniform offset within
/// `[-radius, radius]` on both axes, clamped to the extent.
pub fn scatter<R: Rng>(
    input: &ImageBuf,
    radius: f32,
    rng: &mut R,
) -> Result<ImageBuf, FilterError> {
    ensure_finite("radius", radius)?;
    if radius < 0.0 {
        return Err(FilterError::Malformed {
            key: "radius".to_string(),
            expected: "a non-negative radius",
            got: radius.to_string(),
        });
    }
    ensure_nonempty(input)?;

    if radius == 0.0 {
        return Ok(input.clone());
    }

    let mut out = ImageBuf::new(input.width, input.height);
    for y in 0..input.height {
        for x in 0..input.width {
            let ox = rng.gen_range(-radius..=radius);
            let oy = rng.gen_range(-radius..=radius);
            let sx = (x as f32 + ox).round() as i64;
            let sy = (y as f32 + oy).round() as i64;
            out.set_pixel(x, y, input.pixel_clamped(sx, sy));
        }
    }
    Ok(out)
}

fn bilinear_transparent(img: &ImageBuf, x: f32, y: f32) -> [f32; 4] {
    bilinear(img, x, y, |img, ix, iy| {
        if ix < 0 || iy < 0 || ix >= img.width as i64 || iy >= img.height as i64 {
            [0.0; 4]
        } else {
            img.pixel(ix as u32, iy as u32)
        }
    })
}

fn bilinear_clamped(img: &ImageBuf, x: f32, y: f32) -> [f32; 4] {
    bilinear(img, x, y, |img, ix, iy| img.pixel_clamped(ix, iy))
}

fn bilinear(
    img: &ImageBuf,
    x: f32,
    y: f32,
    tap: impl Fn(&ImageBuf, i64, i64) -> [f32; 4],
) -> [f32; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let x0 = x0 as i64;
    let y0 = y0 as i64;

    let p00 = tap(img, x0, y0);
    let p10 = tap(img, x0 + 1, y0);
    let p01 = tap(img, x0, y0 + 1);
    let p11 = tap(img, x0 + 1, y0 + 1);

    let mut out = [0.0_f32; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = top * (1.0 - fy) + bottom * fy;
    }
    out
}
