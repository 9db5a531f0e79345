use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::FilterError;
use crate::image_buf::ImageBuf;

/// A single pipeline stage capability.
///
/// Composite filters implement this by chaining primitive operations;
/// they own their sub-steps rather than inheriting from anything.
pub trait ImageFilter {
    fn name(&self) -> &'static str;
    fn apply(&self, input: ImageBuf, ctx: &mut FilterCtx) -> Result<ImageBuf, FilterError>;
}

/// Shared per-pipeline state handed to every filter invocation.
///
/// Owns the RNG used for noise synthesis. One context per `Pipeline`;
/// concurrent pipeline runs must each construct their own. Holds no
/// image-specific state between invocations.
pub struct FilterCtx {
    pub(crate) rng: StdRng,
}

impl FilterCtx {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic context for reproducible grain.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FilterCtx {
    fn default() -> Self {
        Self::new()
    }
}
