use crate::document::{ResumeDocument, SectionKey, TemplateId};
use crate::render::canvas::{baseline, line_height, Canvas, TextStyle};
use crate::render::sections::BodyStyle;
use crate::render::{profile_image, Body, Column, Template, MARGIN, PAGE_WIDTH};

/// Full-width primary-colour header band, accent-underlined headings,
/// skills as chips.
pub(crate) struct Modern;

const HEADER_PAD: f32 = 36.0;
const AVATAR_RADIUS: f32 = 44.0;

impl Template for Modern {
    fn id(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn header(&self, doc: &ResumeDocument, canvas: &mut Canvas) -> Body {
        let theme = &doc.theme;
        let info = &doc.personal_info;
        let base = theme.font_size.px();
        let image = profile_image(doc);
        let text_width = match image {
            Some(_) => PAGE_WIDTH - MARGIN * 2.0 - AVATAR_RADIUS * 2.0 - 24.0,
            None => PAGE_WIDTH - MARGIN * 2.0,
        };

        // Lay the text out first so the band can be sized to it.
        let name_style = TextStyle::new(base * 2.2, "#ffffff").bold();
        let title_style = TextStyle::new(base * 1.15, "#ffffff");
        let contact_style = TextStyle::new(base - 1.0, "#ffffff");
        let contacts = info.contacts().join("  |  ");

        let name_lines = canvas
            .metrics()
            .wrap_lines(doc.full_name(), text_width, name_style.size);
        let mut band = HEADER_PAD + line_height(name_style.size) * name_lines.len() as f32;
        if info.job_title.is_some() {
            band += line_height(title_style.size);
        }
        if !contacts.is_empty() {
            band += 8.0 + line_height(contact_style.size);
        }
        band += HEADER_PAD;
        if image.is_some() {
            band = band.max(AVATAR_RADIUS * 2.0 + HEADER_PAD);
        }

        canvas.rect(0.0, 0.0, PAGE_WIDTH, band, &theme.primary_color, 0.0);

        let mut y = canvas.paragraph(MARGIN, HEADER_PAD, text_width, doc.full_name(), &name_style);
        if let Some(title) = info.job_title.as_deref() {
            y = canvas.paragraph(MARGIN, y, text_width, title, &title_style);
        }
        if !contacts.is_empty() {
            canvas.paragraph(MARGIN, y + 8.0, text_width, &contacts, &contact_style);
        }
        if let Some(href) = image {
            canvas.round_image(
                PAGE_WIDTH - MARGIN - AVATAR_RADIUS,
                band / 2.0,
                AVATAR_RADIUS,
                href,
            );
        }

        Body::standard(doc, band + 32.0)
    }

    fn section_heading(
        &self,
        doc: &ResumeDocument,
        canvas: &mut Canvas,
        column: &mut Column,
        key: SectionKey,
    ) {
        let theme = &doc.theme;
        let size = theme.font_size.px() * 1.3;
        let style = TextStyle::new(size, &theme.primary_color).bold();
        canvas.text(column.x, baseline(column.y, size), key.title(), &style);
        let rule_y = column.y + line_height(size) + 2.0;
        let rule_width = canvas.text_width(key.title(), size).max(40.0);
        canvas.line(column.x, rule_y, column.x + rule_width, rule_y, &theme.accent_color, 2.0);
        column.y = rule_y + 10.0;
    }

    fn body_style<'d>(&self, doc: &'d ResumeDocument, _column: &Column) -> BodyStyle<'d> {
        let theme = &doc.theme;
        BodyStyle {
            text: &theme.text_color,
            accent: &theme.primary_color,
            muted: "#6b7280",
            size: theme.font_size.px(),
            chip_fill: Some(theme.secondary_color.as_str()),
            radius: f32::from(theme.border_radius),
            bullet: "•",
            separator: " • ",
        }
    }
}
