use crate::export::ExportBundle;
use crate::model::NormalizedImage;
use crate::profile::Settings;
use crate::render::{Figure, render_figure};

use super::context::AppContext;
use super::error::Result;

/// Everything a single segmentation run produces.
#[derive(Debug)]
pub struct RunOutcome {
    pub figure: Figure,
    pub cell_count: usize,
    pub bundle: ExportBundle,
    pub summary: String,
}

/// Runs the full pipeline on an already-normalized image: validate the
/// settings, segment, render the result panels and export the artifacts.
pub fn run_segmentation(
    context: &AppContext,
    image: &NormalizedImage,
    settings: &Settings,
) -> Result<RunOutcome> {
    settings.validate()?;
    let colormap = settings.colormap()?;
    let params = settings.segment_params();

    log::info!(
        "segmentation starting: model {}, backend {}",
        params.model,
        context.segment_service().backend_name()
    );
    let masks = context.segment_service().segment(image, &params)?;
    let cell_count = masks.cell_count();

    log::info!("segmentation complete: {cell_count} cells, rendering results");
    let figure = render_figure(image, &masks, settings.display_channel, colormap)?;
    let bundle = context.export_writer().write_run(&masks, &figure)?;

    log::info!("run complete: {} artifacts written", bundle.files.len());
    Ok(RunOutcome {
        figure,
        cell_count,
        bundle,
        summary: settings.summary(),
    })
}
