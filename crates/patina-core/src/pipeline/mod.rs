pub mod dispatch;
pub mod filter;
pub mod filters;
pub mod primitive;

use tracing::{debug, warn};

use crate::descriptor::FilterDescriptor;
use crate::error::PipelineError;
use crate::image_buf::ImageBuf;
use dispatch::Filter;
use filter::FilterCtx;

/// Sequential filter pipeline.
///
/// ```text
/// source -> stage 0 -> stage 1 -> ... -> final image
/// ```
///
/// Each descriptor resolves to a filter that consumes the previous
/// stage's output and produces the next. Unknown keys are skipped;
/// bad parameters abort the whole run with the offending stage named.
///
/// A `Pipeline` owns its filter context (RNG and friends), so one value
/// serves any number of sequential runs but must not be shared across
/// threads mid-run.
pub struct Pipeline {
    ctx: FilterCtx,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            ctx: FilterCtx::new(),
        }
    }

    /// Seeded pipeline: runs with the same chain, source and seed are
    /// reproducible down to the grain.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            ctx: FilterCtx::with_seed(seed),
        }
    }

    /// Run the chain over `source`. Returns `Ok(None)` when no
    /// descriptor resolved to a known filter, i.e. nothing was applied.
    pub fn execute(
        &mut self,
        source: &ImageBuf,
        chain: &[FilterDescriptor],
    ) -> Result<Option<ImageBuf>, PipelineError> {
        let mut current: Option<ImageBuf> = None;

        for (index, desc) in chain.iter().enumerate() {
            let filter = match Filter::resolve(desc) {
                Ok(Some(filter)) => filter,
                Ok(None) => {
                    warn!(key = %desc.key, index, "no matching filter, skipping stage");
                    continue;
                }
                Err(err) => {
                    return Err(PipelineError::Stage {
                        index,
                        key: desc.key.clone(),
                        source: err,
                    });
                }
            };

            // The first successful stage reads the supplied source image;
            // every later stage reads its predecessor's output.
            let input = match current.take() {
                Some(buf) => buf,
                None => source.clone(),
            };

            debug!(filter = filter.name(), index, "applying");
            let output = filter.apply(input, &mut self.ctx).map_err(|err| {
                PipelineError::Stage {
                    index,
                    key: desc.key.clone(),
                    source: err,
                }
            })?;
            current = Some(output);
        }

        Ok(current)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
