//! Photostitch composites a sequence of images into one raster along a single axis.
//!
//! Each image is scaled proportionally against the fixed perpendicular extent of a
//! caller-supplied canvas, placed after the previous one (plus spacing) and drawn. Only one
//! decoded image is alive at a time, and a failure anywhere rolls the whole stitch back.
//!
//! - Build a [`StitchEngine`] from a [`SurfaceProvider`] and a [`PreferenceStore`]
//! - Bind an [`ImageSource`] and a [`Reporter`] with [`StitchEngine::setup`]
//! - Await [`Stitcher::stitch`] for a [`ProcessingResult`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Encoding of the final raster.
pub mod encode;
/// Placement arithmetic.
pub mod layout;
/// Preferences and their storage.
pub mod prefs;
/// Decoded pixel buffers.
pub mod raster;
/// Progress and error reporting.
pub mod report;
/// Image sources.
pub mod source;
/// Orchestration.
pub mod stitch;
/// Canvases and drawing.
pub mod surface;

pub use crate::foundation::core::{ArgbColor, Axis, CanvasSize, DestRect};
pub use crate::foundation::error::{StitchError, StitchResult};

pub use crate::encode::{OutputFormat, encode_to_writer, write_to_path};
pub use crate::layout::{LayoutEngine, Placement, ScalePriority, ScaledExtent, measure};
pub use crate::prefs::{JsonPreferenceFile, PreferenceStore, StitchPreferences};
pub use crate::raster::{Density, Raster};
pub use crate::report::{Reporter, TracingReporter};
pub use crate::source::{
    DecodeMode, DecodeRequest, FileSource, FileSourceOpts, ImageSource, MemorySource,
    RasterLease, SourceDescriptor,
};
pub use crate::stitch::{
    PipelineParams, ProcessingResult, StitchEngine, StitchOutput, StitchRequest, StitchStatus,
    Stitcher, StitcherOpts, run_pipeline,
};
pub use crate::surface::{
    CpuSurface, CpuSurfaceProvider, DrawOptions, ResampleFilter, Surface, SurfaceProvider,
};
