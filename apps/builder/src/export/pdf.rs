//! Stage 2: wrap the bitmap in a single-page PDF.

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use crate::errors::ExportError;
use crate::export::raster::RgbImage;

/// A4 width in PostScript points.
pub const A4_WIDTH_PT: f32 = 595.28;

const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// Page size in points for an image: A4 width, height following the
/// image's aspect ratio.
pub(crate) fn page_size(image: &RgbImage) -> (f32, f32) {
    let height = A4_WIDTH_PT * image.height as f32 / image.width as f32;
    (A4_WIDTH_PT, height)
}

pub(crate) fn encode(image: &RgbImage, title: &str) -> Result<Vec<u8>, ExportError> {
    if image.width == 0 || image.height == 0 {
        return Err(ExportError::Encode("empty bitmap".into()));
    }
    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(ExportError::Encode(format!(
            "bitmap holds {} bytes, expected {expected}",
            image.pixels.len()
        )));
    }

    let (page_width, page_height) = page_size(image);

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let page_id = alloc.bump();
    let image_id = alloc.bump();
    let content_id = alloc.bump();
    let info_id = alloc.bump();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(IMAGE_NAME, image_id);
    page.finish();

    let compressed = compress_to_vec_zlib(&image.pixels, 6);
    let mut xobject = pdf.image_xobject(image_id, &compressed);
    xobject.filter(Filter::FlateDecode);
    xobject.width(image.width as i32);
    xobject.height(image.height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    xobject.finish();

    // Scale the unit image square up to the full page.
    let mut content = Content::new();
    content.save_state();
    content.transform([page_width, 0.0, 0.0, page_height, 0.0, 0.0]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr("Jobfolio resume builder"));

    Ok(pdf.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> RgbImage {
        RgbImage {
            width,
            height,
            pixels: vec![200; (width * height * 3) as usize],
        }
    }

    #[test]
    fn test_page_height_follows_aspect_ratio() {
        let (w, h) = page_size(&solid(1588, 2246));
        assert_eq!(w, A4_WIDTH_PT);
        assert!((h - 595.28 * 2246.0 / 1588.0).abs() < 0.01);
    }

    #[test]
    fn test_encode_produces_pdf() {
        let bytes = encode(&solid(4, 6), "Resume").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/FlateDecode"));
        assert!(text.contains("/Im1"));
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let mut image = solid(4, 4);
        image.pixels.truncate(10);
        assert!(matches!(encode(&image, "x"), Err(ExportError::Encode(_))));
    }
}
