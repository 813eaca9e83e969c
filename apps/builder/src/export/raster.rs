//! Stage 1: SVG markup to an opaque RGB bitmap.

use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};
use tracing::debug;

use crate::errors::ExportError;
use crate::render::RenderedView;

/// Upper bound on either bitmap side, in pixels.
const MAX_SIDE_PX: f32 = 16_384.0;

/// 8-bit RGB pixels, row-major, no padding.
#[derive(Debug, Clone)]
pub(crate) struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// System fonts, loaded once per process.
fn fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "loaded system fonts for export");
            Arc::new(db)
        })
        .clone()
}

/// Only inline `data:image/...` references can be embedded; anything that
/// would need a fetch is rejected before rasterizing.
pub(crate) fn check_image_refs(refs: &[String]) -> Result<(), ExportError> {
    match refs
        .iter()
        .find(|href| !(href.starts_with("data:image/") && href.contains(";base64,")))
    {
        Some(href) => Err(ExportError::UnsupportedImage(truncate(href, 64))),
        None => Ok(()),
    }
}

pub(crate) fn rasterize(view: &RenderedView, scale: f32) -> Result<RgbImage, ExportError> {
    check_image_refs(&view.image_refs)?;

    let options = Options {
        fontdb: fonts(),
        ..Options::default()
    };
    let tree = Tree::from_str(&view.markup, &options)
        .map_err(|e| ExportError::Parse(e.to_string()))?;

    let size = tree.size();
    let (width, height) = (size.width() * scale, size.height() * scale);
    if width > MAX_SIDE_PX || height > MAX_SIDE_PX {
        return Err(ExportError::Rasterize(format!(
            "bitmap of {width:.0}x{height:.0} px exceeds the export limit"
        )));
    }

    let mut pixmap = Pixmap::new(width.ceil() as u32, height.ceil() as u32).ok_or_else(|| {
        ExportError::Rasterize(format!("cannot allocate {width:.0}x{height:.0} pixmap"))
    })?;
    let (r, g, b) = view.background;
    pixmap.fill(Color::from_rgba8(r, g, b, 255));
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()]
        })
        .collect();

    Ok(RgbImage {
        width: pixmap.width(),
        height: pixmap.height(),
        pixels,
    })
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TemplateId;

    fn view(markup: &str, image_refs: Vec<String>) -> RenderedView {
        RenderedView {
            template: TemplateId::Modern,
            width: 20.0,
            height: 10.0,
            markup: markup.to_string(),
            image_refs,
            background: (255, 255, 255),
        }
    }

    #[test]
    fn test_data_uri_images_are_accepted() {
        let refs = vec!["data:image/png;base64,iVBORw0KGgo=".to_string()];
        assert!(check_image_refs(&refs).is_ok());
    }

    #[test]
    fn test_remote_image_is_rejected() {
        let refs = vec!["https://cdn.example.com/avatar.jpg".to_string()];
        assert_eq!(
            check_image_refs(&refs).unwrap_err(),
            ExportError::UnsupportedImage("https://cdn.example.com/avatar.jpg".into())
        );
    }

    #[test]
    fn test_rasterize_scales_bitmap() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><rect width="20" height="10" fill="#ff0000"/></svg>"##;
        let image = rasterize(&view(markup, vec![]), 2.0).unwrap();
        assert_eq!((image.width, image.height), (40, 20));
        assert_eq!(image.pixels.len(), 40 * 20 * 3);
        assert_eq!(&image.pixels[..3], &[255, 0, 0]);
    }

    #[test]
    fn test_rasterize_flattens_onto_theme_background() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;
        let mut view = view(markup, vec![]);
        view.background = (0x1f, 0x29, 0x37);
        let image = rasterize(&view, 1.0).unwrap();
        assert_eq!(&image.pixels[..3], &[255, 0, 0]);
        let last = image.pixels.len() - 3;
        assert_eq!(&image.pixels[last..], &[0x1f, 0x29, 0x37]);
    }

    #[test]
    fn test_rasterize_rejects_malformed_markup() {
        let err = rasterize(&view("<svg", vec![]), 2.0).unwrap_err();
        assert!(matches!(err, ExportError::Parse(_)));
    }
}
