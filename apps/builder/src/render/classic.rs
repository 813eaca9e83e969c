use crate::document::{ResumeDocument, SectionKey, TemplateId};
use crate::render::canvas::{baseline, line_height, Anchor, Canvas, TextStyle};
use crate::render::sections::BodyStyle;
use crate::render::{Body, Column, Template, MARGIN, PAGE_WIDTH};

/// Centred masthead, uppercase headings over a full-width rule.
pub(crate) struct Classic;

impl Template for Classic {
    fn id(&self) -> TemplateId {
        TemplateId::Classic
    }

    fn header(&self, doc: &ResumeDocument, canvas: &mut Canvas) -> Body {
        let theme = &doc.theme;
        let info = &doc.personal_info;
        let base = theme.font_size.px();
        let center = PAGE_WIDTH / 2.0;
        let mut y = MARGIN;

        let name_style = TextStyle::new(base * 2.0, &theme.text_color)
            .bold()
            .anchor(Anchor::Middle)
            .spaced(1.0);
        canvas.text(center, baseline(y, name_style.size), doc.full_name(), &name_style);
        y += line_height(name_style.size);

        if let Some(title) = info.job_title.as_deref() {
            let style = TextStyle::new(base * 1.1, &theme.primary_color)
                .italic()
                .anchor(Anchor::Middle);
            canvas.text(center, baseline(y, style.size), title, &style);
            y += line_height(style.size);
        }

        let contacts = info.contacts();
        if !contacts.is_empty() {
            let style = TextStyle::new(base - 1.0, "#4b5563").anchor(Anchor::Middle);
            canvas.text(center, baseline(y + 4.0, style.size), &contacts.join("  ·  "), &style);
            y += 4.0 + line_height(style.size);
        }

        y += 10.0;
        canvas.line(MARGIN, y, PAGE_WIDTH - MARGIN, y, &theme.text_color, 1.5);
        Body::standard(doc, y + 20.0)
    }

    fn section_heading(
        &self,
        doc: &ResumeDocument,
        canvas: &mut Canvas,
        column: &mut Column,
        key: SectionKey,
    ) {
        let theme = &doc.theme;
        let size = theme.font_size.px() * 1.1;
        let style = TextStyle::new(size, &theme.text_color).bold().spaced(1.5);
        let title = key.title().to_uppercase();
        canvas.text(column.x, baseline(column.y, size), &title, &style);
        let rule_y = column.y + line_height(size) + 1.0;
        canvas.line(column.x, rule_y, column.right(), rule_y, "#9ca3af", 0.75);
        column.y = rule_y + 8.0;
    }

    fn body_style<'d>(&self, doc: &'d ResumeDocument, _column: &Column) -> BodyStyle<'d> {
        let theme = &doc.theme;
        BodyStyle {
            text: &theme.text_color,
            accent: &theme.text_color,
            muted: "#4b5563",
            size: theme.font_size.px(),
            chip_fill: None,
            radius: 0.0,
            bullet: "•",
            separator: ", ",
        }
    }
}
