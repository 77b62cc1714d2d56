use crate::{
    foundation::{
        core::{ArgbColor, Axis, CanvasSize, DestRect},
        error::StitchResult,
    },
    layout::{LayoutEngine, ScalePriority},
    prefs::StitchPreferences,
    raster::Raster,
    source::{DecodeRequest, ImageSource, RasterLease},
    stitch::StitchRequest,
    surface::{DrawOptions, SurfaceProvider},
};

/// Fully resolved inputs of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineParams {
    /// Stitching axis.
    pub axis: Axis,
    /// User zoom multiplier, `> 0`.
    pub selected_scale: f64,
    /// Caller-supplied canvas.
    pub canvas: CanvasSize,
    /// Gap between images in pixels.
    pub spacing_px: u32,
    /// Scale policy.
    pub priority: ScalePriority,
    /// Background color; transparent means no fill.
    pub background: ArgbColor,
    /// Paint options for every image.
    pub draw: DrawOptions,
}

impl PipelineParams {
    /// Combine a preferences snapshot with a request. `density` converts dp to px.
    pub fn resolve(
        prefs: &StitchPreferences,
        request: &StitchRequest,
        density: f64,
        draw: DrawOptions,
    ) -> StitchResult<Self> {
        let canvas = CanvasSize::new(request.result_width, request.result_height)?;
        Ok(Self {
            axis: prefs.axis(),
            selected_scale: request.selected_scale,
            canvas,
            spacing_px: prefs.spacing_px(density, request.selected_scale)?,
            priority: prefs.priority(),
            background: prefs.bg_fill_color,
            draw,
        })
    }
}

/// Successful pipeline outcome.
#[derive(Debug)]
pub struct StitchOutput {
    /// The composited canvas.
    pub canvas: Raster,
    /// Images drawn.
    pub processed: usize,
    /// Destination rectangle of each image, in order.
    pub placements: Vec<DestRect>,
}

/// Run the decode/place/draw loop over the whole of `source`.
///
/// The source is rewound first. At most one raster is leased at any time. On error the
/// partially drawn canvas is dropped; resetting the source is left to the caller.
#[tracing::instrument(skip_all, fields(axis = ?params.axis, width = params.canvas.width, height = params.canvas.height))]
pub fn run_pipeline(
    source: &mut dyn ImageSource,
    provider: &dyn SurfaceProvider,
    params: &PipelineParams,
) -> StitchResult<StitchOutput> {
    let mut layout = LayoutEngine::for_canvas(
        params.axis,
        params.selected_scale,
        params.canvas,
        params.spacing_px,
        params.priority,
    )?;

    let mut surface = provider.create_surface(params.canvas)?;
    if !params.background.is_transparent() {
        surface.fill(params.background);
    }

    source.reset();
    let mut placements = Vec::new();
    while let Some(desc) = source.next_descriptor()? {
        let placement = layout.place(desc.width, desc.height)?;
        source.request_decode(DecodeRequest::pixels(placement.downsample))?;

        let mut raster = RasterLease::acquire(&mut *source)?;
        raster.normalize_density();
        surface.draw_image_into(&raster, placement.rect, &params.draw)?;
        drop(raster);

        tracing::debug!(
            index = desc.index,
            src_w = desc.width,
            src_h = desc.height,
            rect = ?placement.rect,
            downsample = placement.downsample,
            "placed image"
        );
        placements.push(placement.rect);
    }

    Ok(StitchOutput {
        canvas: surface.into_raster(),
        processed: placements.len(),
        placements,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stitch/pipeline.rs"]
mod tests;
