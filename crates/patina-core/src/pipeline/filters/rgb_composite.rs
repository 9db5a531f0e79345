use crate::error::FilterError;
use crate::image_buf::{ImageBuf, CHANNELS};

/// Recombines three channel-source images into one: the output takes its
/// red channel from `red`, green from `green`, blue from `blue`, with
/// alpha forced fully opaque.
///
/// All three slots must be filled and share one extent; a missing slot is
/// a hard error that the invoking composite propagates.
#[derive(Default)]
pub struct RgbCompositor {
    pub red: Option<ImageBuf>,
    pub green: Option<ImageBuf>,
    pub blue: Option<ImageBuf>,
}

impl RgbCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composite(self) -> Result<ImageBuf, FilterError> {
        let red = self.red.ok_or(FilterError::MissingInput("red"))?;
        let green = self.green.ok_or(FilterError::MissingInput("green"))?;
        let blue = self.blue.ok_or(FilterError::MissingInput("blue"))?;

        if red.width != green.width
            || red.height != green.height
            || red.width != blue.width
            || red.height != blue.height
        {
            return Err(FilterError::ExtentMismatch);
        }
        if red.is_empty() {
            return Err(FilterError::EmptyExtent);
        }

        let mut out = ImageBuf::new(red.width, red.height);
        for (((o, r), g), b) in out
            .data
            .chunks_exact_mut(CHANNELS)
            .zip(red.data.chunks_exact(CHANNELS))
            .zip(green.data.chunks_exact(CHANNELS))
            .zip(blue.data.chunks_exact(CHANNELS))
        {
            o[0] = r[0];
            o[1] = g[1];
            o[2] = b[2];
            o[3] = 1.0;
        }
        Ok(out)
    }
}
