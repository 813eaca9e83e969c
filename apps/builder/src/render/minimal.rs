use crate::document::{ResumeDocument, SectionKey, TemplateId};
use crate::render::canvas::{baseline, line_height, Canvas, TextStyle};
use crate::render::sections::BodyStyle;
use crate::render::{Body, Column, Template, MARGIN, PAGE_WIDTH};

/// Wide margins, small letter-spaced headings, colour only on the name.
pub(crate) struct Minimal;

const SIDE_MARGIN: f32 = MARGIN + 16.0;

impl Template for Minimal {
    fn id(&self) -> TemplateId {
        TemplateId::Minimal
    }

    fn header(&self, doc: &ResumeDocument, canvas: &mut Canvas) -> Body {
        let theme = &doc.theme;
        let info = &doc.personal_info;
        let base = theme.font_size.px();
        let width = PAGE_WIDTH - SIDE_MARGIN * 2.0;

        let name_style = TextStyle::new(base * 2.0, &theme.primary_color);
        let mut y = canvas.paragraph(SIDE_MARGIN, MARGIN + 8.0, width, doc.full_name(), &name_style);
        if let Some(title) = info.job_title.as_deref() {
            let style = TextStyle::new(base, "#6b7280");
            y = canvas.paragraph(SIDE_MARGIN, y, width, title, &style);
        }
        let contacts = info.contacts();
        if !contacts.is_empty() {
            let style = TextStyle::new(base - 2.0, &theme.text_color);
            y = canvas.paragraph(SIDE_MARGIN, y + 6.0, width, &contacts.join("   "), &style);
        }

        let mut body = Body::standard(doc, y + 36.0);
        // Pull every column in to the wider margin.
        let shift = SIDE_MARGIN - MARGIN;
        body.main.x += shift;
        body.main.width -= shift;
        if let Some(side) = body.side.as_mut() {
            side.width -= shift;
        }
        body
    }

    fn section_heading(
        &self,
        doc: &ResumeDocument,
        canvas: &mut Canvas,
        column: &mut Column,
        key: SectionKey,
    ) {
        let size = (doc.theme.font_size.px() - 3.0).max(9.0);
        let style = TextStyle::new(size, "#9ca3af").spaced(2.5);
        canvas.text(column.x, baseline(column.y, size), &key.title().to_uppercase(), &style);
        column.y += line_height(size) + 8.0;
    }

    fn body_style<'d>(&self, doc: &'d ResumeDocument, _column: &Column) -> BodyStyle<'d> {
        let theme = &doc.theme;
        BodyStyle {
            text: &theme.text_color,
            accent: "#6b7280",
            muted: "#9ca3af",
            size: theme.font_size.px() - 1.0,
            chip_fill: None,
            radius: 0.0,
            bullet: "–",
            separator: " · ",
        }
    }
}
