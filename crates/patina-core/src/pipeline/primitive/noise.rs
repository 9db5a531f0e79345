use rand::Rng;

use crate::error::FilterError;
use crate::image_buf::ImageBuf;

/// Uniform white-noise field: every channel of every pixel drawn
/// independently from [0, 1).
pub fn noise_field<R: Rng>(
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<ImageBuf, FilterError> {
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyExtent);
    }
    let len = (width * height) as usize * 4;
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        data.push(rng.gen_range(0.0..1.0));
    }
    Ok(ImageBuf {
        width,
        height,
        data,
    })
}
