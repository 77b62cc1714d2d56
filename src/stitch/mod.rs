//! Stitch orchestration: preferences in, one composited raster out.
//!
//! [`StitchEngine`] holds the construction-time strategies; [`StitchEngine::setup`] binds an
//! image source and a reporter and yields a [`Stitcher`]. Each [`Stitcher::stitch`] call runs
//! the pipeline on a blocking worker and awaits it before returning.

mod pipeline;

pub use pipeline::{PipelineParams, StitchOutput, run_pipeline};

use std::sync::Arc;

use crate::{
    encode::OutputFormat,
    foundation::{
        core::DestRect,
        error::{StitchError, StitchResult},
    },
    prefs::PreferenceStore,
    raster::Raster,
    report::Reporter,
    source::ImageSource,
    surface::{DrawOptions, SurfaceProvider},
};

/// Per-call inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StitchRequest {
    /// User zoom multiplier, `> 0`.
    pub selected_scale: f64,
    /// Canvas width in pixels.
    pub result_width: u32,
    /// Canvas height in pixels.
    pub result_height: u32,
    /// Downstream encoding, passed through.
    pub format: OutputFormat,
    /// Downstream encoder quality, passed through.
    pub quality: u8,
}

/// How a stitch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StitchStatus {
    /// At least one image was drawn.
    Completed,
    /// The source yielded no images.
    Empty,
    /// The stitch failed and was rolled back.
    Failed,
}

/// Outcome of [`Stitcher::stitch`].
///
/// `output` is present iff `processed_count > 0`.
#[derive(Debug)]
pub struct ProcessingResult {
    /// Images drawn onto `output`.
    pub processed_count: usize,
    /// The stitched canvas.
    pub output: Option<Raster>,
    /// Echo of the requested format when `output` is present.
    pub format: Option<OutputFormat>,
    /// Echo of the requested quality when `output` is present.
    pub quality: Option<u8>,
    /// Distinguishes an empty input from a failure.
    pub status: StitchStatus,
    /// Destination rectangles in draw order.
    pub placements: Vec<DestRect>,
}

impl ProcessingResult {
    /// Rolled-back result.
    pub fn failed() -> Self {
        Self::without_output(StitchStatus::Failed)
    }

    /// Result for a source with no images.
    pub fn empty() -> Self {
        Self::without_output(StitchStatus::Empty)
    }

    fn without_output(status: StitchStatus) -> Self {
        Self {
            processed_count: 0,
            output: None,
            format: None,
            quality: None,
            status,
            placements: Vec::new(),
        }
    }

    fn completed(out: StitchOutput, request: &StitchRequest) -> Self {
        if out.processed == 0 {
            return Self::empty();
        }
        Self {
            processed_count: out.processed,
            output: Some(out.canvas),
            format: Some(request.format),
            quality: Some(request.quality),
            status: StitchStatus::Completed,
            placements: out.placements,
        }
    }

    /// `true` when an output raster is present.
    pub fn is_success(&self) -> bool {
        self.status == StitchStatus::Completed
    }
}

/// Construction-time knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StitcherOpts {
    /// Pixels per device-independent unit, used to convert spacing.
    pub density: f64,
    /// Paint options for every drawn image.
    pub draw: DrawOptions,
}

impl Default for StitcherOpts {
    fn default() -> Self {
        Self {
            density: 1.0,
            draw: DrawOptions::default(),
        }
    }
}

/// Strategies shared by every stitch, before a source is bound.
pub struct StitchEngine {
    provider: Arc<dyn SurfaceProvider>,
    preferences: Arc<dyn PreferenceStore>,
    opts: StitcherOpts,
}

impl StitchEngine {
    /// Create an engine.
    pub fn new(
        provider: Arc<dyn SurfaceProvider>,
        preferences: Arc<dyn PreferenceStore>,
        opts: StitcherOpts,
    ) -> Self {
        Self {
            provider,
            preferences,
            opts,
        }
    }

    /// Bind the image source and the reporter.
    pub fn setup(self, source: Box<dyn ImageSource>, reporter: Box<dyn Reporter>) -> Stitcher {
        Stitcher {
            engine: self,
            source: Some(source),
            reporter,
        }
    }
}

/// A bound engine ready to stitch.
pub struct Stitcher {
    engine: StitchEngine,
    source: Option<Box<dyn ImageSource>>,
    reporter: Box<dyn Reporter>,
}

impl Stitcher {
    /// Composite every image of the bound source onto a `result_width x result_height` canvas.
    ///
    /// Failures are reported once through the [`Reporter`], the source is rewound and a
    /// [`ProcessingResult::failed`] is returned. Requires a Tokio runtime.
    pub async fn stitch(&mut self, request: StitchRequest) -> ProcessingResult {
        self.reporter.show_content_loading(true);
        let outcome = self.run(&request).await;
        self.reporter.show_content_loading(false);

        match outcome {
            Ok(out) => {
                let result = ProcessingResult::completed(out, &request);
                tracing::info!(
                    processed = result.processed_count,
                    status = ?result.status,
                    "stitch finished"
                );
                result
            }
            Err(err) => {
                if let Some(source) = self.source.as_mut() {
                    source.reset();
                }
                self.reporter.show_error(&err);
                ProcessingResult::failed()
            }
        }
    }

    /// Take the source back, e.g. to rebind it elsewhere. Later stitches fail.
    pub fn into_source(self) -> Option<Box<dyn ImageSource>> {
        self.source
    }

    async fn run(&mut self, request: &StitchRequest) -> StitchResult<StitchOutput> {
        let prefs = self.engine.preferences.load()?;
        let params = PipelineParams::resolve(
            &prefs,
            request,
            self.engine.opts.density,
            self.engine.opts.draw,
        )?;

        let mut source = self.source.take().ok_or_else(|| {
            StitchError::source_unavailable("lost when a previous stitch task panicked")
        })?;
        let provider = Arc::clone(&self.engine.provider);

        let task = tokio::task::spawn_blocking(move || {
            let out = run_pipeline(source.as_mut(), provider.as_ref(), &params);
            (source, out)
        });

        match task.await {
            Ok((source, out)) => {
                self.source = Some(source);
                out
            }
            Err(join) => Err(StitchError::Other(
                anyhow::Error::new(join).context("stitch worker task"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stitch/orchestrator.rs"]
mod tests;
