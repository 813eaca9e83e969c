//! Template renderer: `render(document, template) -> RenderedView`.
//!
//! Each template is a stateless implementation of [`Template`]. The shared
//! driver walks `layout.sectionOrder`, skips hidden or empty sections, and
//! asks the template how to draw headings and where each section goes.
//! Output is plain SVG so the export pipeline can rasterize it directly.

pub mod canvas;
mod classic;
mod creative;
pub mod metrics;
mod minimal;
mod modern;
mod sections;

use tracing::debug;

use crate::document::{parse_hex_color, ResumeDocument, SectionKey, TemplateId};
use canvas::Canvas;
pub(crate) use sections::BodyStyle;

/// A4 width at 96 dpi.
pub const PAGE_WIDTH: f32 = 794.0;
/// A4 height at 96 dpi; pages never render shorter than this.
pub const MIN_PAGE_HEIGHT: f32 = 1123.0;
/// Outer page margin used by most templates.
pub(crate) const MARGIN: f32 = 48.0;
/// Gap between the main and side column in two-column layouts.
pub(crate) const GUTTER: f32 = 28.0;

/// The output of one render: SVG markup plus what export needs to know
/// about it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub template: TemplateId,
    pub width: f32,
    pub height: f32,
    pub markup: String,
    /// Every `href` of an `<image>` element in `markup`, in document order.
    pub image_refs: Vec<String>,
    /// Theme background as RGB; export flattens the bitmap onto it.
    pub background: (u8, u8, u8),
}

/// A vertical slot that body content flows into.
#[derive(Debug, Clone)]
pub(crate) struct Column {
    pub x: f32,
    pub width: f32,
    /// Top edge of the next block.
    pub y: f32,
    /// Side columns hold skills, certifications and languages.
    pub side: bool,
}

impl Column {
    pub fn main(x: f32, width: f32, y: f32) -> Self {
        Self {
            x,
            width,
            y,
            side: false,
        }
    }

    pub fn side(x: f32, width: f32, y: f32) -> Self {
        Self {
            x,
            width,
            y,
            side: true,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Where body content goes once the header is drawn.
pub(crate) struct Body {
    pub main: Column,
    pub side: Option<Column>,
}

impl Body {
    /// Full-width single column, or a 2:1 split when the layout asks for two.
    pub fn standard(doc: &ResumeDocument, top: f32) -> Self {
        let inner = PAGE_WIDTH - MARGIN * 2.0;
        if doc.layout.columns < 2 {
            return Self {
                main: Column::main(MARGIN, inner, top),
                side: None,
            };
        }
        let main_width = ((inner - GUTTER) * 2.0 / 3.0).round();
        let side_width = inner - GUTTER - main_width;
        Self {
            main: Column::main(MARGIN, main_width, top),
            side: Some(Column::side(MARGIN + main_width + GUTTER, side_width, top)),
        }
    }

    fn column_for(&mut self, key: SectionKey) -> &mut Column {
        match self.side.as_mut() {
            Some(side) if is_side_section(key) => side,
            _ => &mut self.main,
        }
    }

    fn bottom(&self) -> f32 {
        self.side
            .as_ref()
            .map_or(self.main.y, |side| side.y.max(self.main.y))
    }
}

fn is_side_section(key: SectionKey) -> bool {
    matches!(
        key,
        SectionKey::Skills | SectionKey::Certifications | SectionKey::Languages
    )
}

/// One visual layout. Implementations hold no state; everything comes from
/// the document.
pub(crate) trait Template {
    fn id(&self) -> TemplateId;

    /// Draws the page header and returns the columns body content flows into.
    fn header(&self, doc: &ResumeDocument, canvas: &mut Canvas) -> Body;

    /// Draws the heading for `key` at the top of `column` and advances it.
    fn section_heading(
        &self,
        doc: &ResumeDocument,
        canvas: &mut Canvas,
        column: &mut Column,
        key: SectionKey,
    );

    /// Colours and sizes for section bodies in `column`.
    fn body_style<'d>(&self, doc: &'d ResumeDocument, column: &Column) -> BodyStyle<'d>;

    /// Paints anything that depends on the final page height.
    fn finish_page(&self, _doc: &ResumeDocument, _canvas: &mut Canvas, _height: f32) {}

    fn render(&self, doc: &ResumeDocument) -> RenderedView {
        let mut canvas = Canvas::new(PAGE_WIDTH, &doc.theme);
        let mut body = self.header(doc, &mut canvas);
        let gap = doc.theme.spacing.section_gap();

        for key in doc.layout.visible_sections() {
            if !sections::has_content(doc, key) {
                continue;
            }
            let column = body.column_for(key);
            self.section_heading(doc, &mut canvas, column, key);
            let style = self.body_style(doc, column);
            sections::draw(key, doc, &mut canvas, column, &style);
            column.y += gap;
        }

        let height = (body.bottom() + MARGIN).ceil().max(MIN_PAGE_HEIGHT);
        self.finish_page(doc, &mut canvas, height);

        let (markup, image_refs) = canvas.finish(height);
        RenderedView {
            template: self.id(),
            width: PAGE_WIDTH,
            height,
            markup,
            image_refs,
            background: parse_hex_color(&doc.theme.background_color).unwrap_or((255, 255, 255)),
        }
    }
}

fn template(id: TemplateId) -> &'static dyn Template {
    match id {
        TemplateId::Modern => &modern::Modern,
        TemplateId::Classic => &classic::Classic,
        TemplateId::Creative => &creative::Creative,
        TemplateId::Minimal => &minimal::Minimal,
    }
}

/// Renders `doc` with the given template. Pure: identical inputs give
/// identical markup.
pub fn render(doc: &ResumeDocument, id: TemplateId) -> RenderedView {
    let view = template(id).render(doc);
    debug!(
        template = %id,
        height = view.height,
        bytes = view.markup.len(),
        "rendered resume"
    );
    view
}

/// Profile image to draw, if the document has a non-blank one.
pub(crate) fn profile_image(doc: &ResumeDocument) -> Option<&str> {
    doc.personal_info
        .profile_image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::seed_document;
    use crate::editing::{move_section, remove_list_item, set, Edit, LayoutEdit, ListPath};

    #[test]
    fn test_render_is_deterministic_for_every_template() {
        let doc = seed_document();
        for id in TemplateId::ALL {
            let first = render(&doc, id);
            let second = render(&doc, id);
            assert_eq!(first, second, "{id} is not deterministic");
            assert_eq!(first.template, id);
        }
    }

    #[test]
    fn test_templates_differ() {
        let doc = seed_document();
        let outputs: Vec<String> = TemplateId::ALL
            .iter()
            .map(|id| render(&doc, *id).markup)
            .collect();
        for i in 0..outputs.len() {
            for j in i + 1..outputs.len() {
                assert_ne!(outputs[i], outputs[j]);
            }
        }
    }

    #[test]
    fn test_page_has_a4_minimum_height() {
        let view = render(&seed_document(), TemplateId::Minimal);
        assert_eq!(view.width, PAGE_WIDTH);
        assert!(view.height >= MIN_PAGE_HEIGHT);
    }

    #[test]
    fn test_hidden_section_is_not_rendered() {
        let doc = seed_document();
        // languages are hidden in the seed
        for id in TemplateId::ALL {
            let view = render(&doc, id);
            assert!(!view.markup.contains("Spanish"), "{id} drew a hidden section");
            assert!(view.markup.contains("Tech Corp"));
        }
    }

    #[test]
    fn test_section_order_is_respected() {
        let doc = seed_document();
        let view = render(&doc, TemplateId::Classic);
        let exp = view.markup.find("Tech Corp").unwrap();
        let edu = view.markup.find("University of California").unwrap();
        assert!(exp < edu);

        // experience (1) moved below education (2)
        let moved = move_section(&doc, 1, 2).unwrap();
        let view = render(&moved, TemplateId::Classic);
        let exp = view.markup.find("Tech Corp").unwrap();
        let edu = view.markup.find("University of California").unwrap();
        assert!(edu < exp);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let doc = set(
            &seed_document(),
            &Edit::Summary("Built <script> & \"things\"".into()),
        )
        .unwrap();
        for id in TemplateId::ALL {
            let markup = render(&doc, id).markup;
            assert!(!markup.contains("<script>"));
            assert!(markup.contains("&lt;script&gt;"));
        }
    }

    #[test]
    fn test_two_columns_render_side_sections() {
        let doc = set(&seed_document(), &Edit::Layout(LayoutEdit::Columns(2))).unwrap();
        let view = render(&doc, TemplateId::Modern);
        assert!(view.markup.contains("AWS Certified Developer"));
        assert!(view.markup.contains("JavaScript"));
    }

    #[test]
    fn test_empty_section_is_skipped() {
        let mut doc = seed_document();
        doc.summary.clear();
        let view = render(&doc, TemplateId::Minimal);
        assert!(!view.markup.contains(">SUMMARY<"));
        assert!(!view.markup.contains(">Summary<"));

        // removing an item never empties a section
        assert!(remove_list_item(&doc, ListPath::Projects, 0).is_err());
    }

    #[test]
    fn test_profile_image_is_reported() {
        let mut doc = seed_document();
        doc.personal_info.profile_image = Some("https://example.com/me.png".into());
        let view = render(&doc, TemplateId::Creative);
        assert_eq!(view.image_refs, vec!["https://example.com/me.png"]);
        let view = render(&doc, TemplateId::Classic);
        assert!(view.image_refs.is_empty());
    }
}
