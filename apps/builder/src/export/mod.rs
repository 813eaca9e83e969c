//! PDF export pipeline.
//!
//! 1. [`raster`]: rasterize the rendered SVG at [`EXPORT_SCALE`]; CPU-bound,
//!    so the async entry point runs it in `spawn_blocking`
//! 2. [`pdf`]: embed the bitmap as the only image on a single A4-wide page
//!
//! Both stages work on an owned snapshot of the rendered view; nothing here
//! can reach the live document.

mod pdf;
mod raster;

use tracing::{info, warn};

use crate::errors::ExportError;
use crate::render::RenderedView;

pub use pdf::A4_WIDTH_PT;

/// Upscaling factor applied when rasterizing for print.
pub const EXPORT_SCALE: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    /// Suggested download name, see [`export_filename`].
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
}

/// `"Jane  Doe"` → `"jane-doe-resume.pdf"`; a blank name gives `"resume.pdf"`.
pub fn export_filename(full_name: &str) -> String {
    let slug = full_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{slug}-resume.pdf")
    }
}

/// Runs both stages on the calling thread.
pub fn export_view(
    view: &RenderedView,
    full_name: &str,
    scale: f32,
) -> Result<ExportedPdf, ExportError> {
    let image = raster::rasterize(view, scale)?;
    let (page_width_pt, page_height_pt) = pdf::page_size(&image);
    let title = if full_name.trim().is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", full_name.trim())
    };
    let bytes = pdf::encode(&image, &title)?;

    Ok(ExportedPdf {
        filename: export_filename(full_name),
        bytes,
        page_width_pt,
        page_height_pt,
    })
}

/// Async wrapper over [`export_view`] that keeps rasterization off the
/// runtime's worker threads.
pub async fn export(
    view: RenderedView,
    full_name: String,
    scale: f32,
) -> Result<ExportedPdf, ExportError> {
    let template = view.template;
    let result = tokio::task::spawn_blocking(move || export_view(&view, &full_name, scale))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?;

    match &result {
        Ok(pdf) => info!(
            %template,
            filename = %pdf.filename,
            bytes = pdf.bytes.len(),
            "exported resume PDF"
        ),
        Err(e) => warn!(%template, error = %e, "resume export failed"),
    }
    result
}
