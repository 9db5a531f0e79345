/// RGBA f32 image buffer.
///
/// Pixel data is stored as interleaved RGBARGBA... with straight
/// (non-premultiplied) alpha. Values are nominally [0,1] but are not
/// clamped above 1.0, so stages may carry super-white intermediates.
///
/// Buffers are value types: every pipeline stage consumes its input and
/// produces a new (or reused) owned buffer. Nothing mutates a buffer
/// another stage still holds.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuf {
    pub width: u32,
    pub height: u32,
    /// Flat pixel data: [R, G, B, A, R, G, B, A, ...] in f32.
    pub data: Vec<f32>,
}

pub const CHANNELS: usize = 4;

impl ImageBuf {
    /// New transparent-black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize * CHANNELS],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> anyhow::Result<Self> {
        let expected = (width * height) as usize * CHANNELS;
        anyhow::ensure!(
            data.len() == expected,
            "expected {expected} floats for {width}x{height} RGBA, got {}",
            data.len()
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode 8-bit sRGB RGBA bytes into a linear-light f32 buffer.
    pub fn from_rgba_u8_srgb(width: u32, height: u32, bytes: &[u8]) -> anyhow::Result<Self> {
        let expected = (width * height) as usize * CHANNELS;
        anyhow::ensure!(
            bytes.len() == expected,
            "expected {expected} bytes for {width}x{height} RGBA, got {}",
            bytes.len()
        );
        let mut data = Vec::with_capacity(expected);
        for px in bytes.chunks_exact(CHANNELS) {
            data.push(crate::color::srgb_to_linear(px[0] as f32 / 255.0));
            data.push(crate::color::srgb_to_linear(px[1] as f32 / 255.0));
            data.push(crate::color::srgb_to_linear(px[2] as f32 / 255.0));
            data.push(px[3] as f32 / 255.0);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Encode to 8-bit RGBA with sRGB gamma for display or file output.
    pub fn to_rgba_u8_srgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(CHANNELS) {
            out.push(encode_srgb_u8(px[0]));
            out.push(encode_srgb_u8(px[1]));
            out.push(encode_srgb_u8(px[2]));
            out.push((px[3].clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
        }
        out
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = (y * self.width + x) as usize * CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [f32; 4]) {
        let idx = (y * self.width + x) as usize * CHANNELS;
        self.data[idx..idx + CHANNELS].copy_from_slice(&px);
    }

    /// Integer-coordinate sample with edge extension: out-of-bounds
    /// coordinates clamp to the nearest edge pixel.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> [f32; 4] {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixel(cx, cy)
    }
}

fn encode_srgb_u8(v: f32) -> u8 {
    let srgb = crate::color::linear_to_srgb(v.clamp(0.0, 1.0));
    (srgb * 255.0 + 0.5) as u8
}
