use crate::document::{ResumeDocument, SectionKey, TemplateId};
use crate::render::canvas::{baseline, line_height, Anchor, Canvas, TextStyle};
use crate::render::sections::BodyStyle;
use crate::render::{profile_image, Body, Column, Template, MARGIN};

/// Primary-colour sidebar carrying the avatar, contacts and side sections;
/// the sidebar is used whatever `layout.columns` says.
pub(crate) struct Creative;

const SIDEBAR_WIDTH: f32 = 250.0;
const SIDEBAR_PAD: f32 = 24.0;
const AVATAR_RADIUS: f32 = 56.0;
const ON_PRIMARY: &str = "#ffffff";

impl Template for Creative {
    fn id(&self) -> TemplateId {
        TemplateId::Creative
    }

    fn header(&self, doc: &ResumeDocument, canvas: &mut Canvas) -> Body {
        let theme = &doc.theme;
        let info = &doc.personal_info;
        let base = theme.font_size.px();
        let side_x = SIDEBAR_PAD;
        let side_width = SIDEBAR_WIDTH - SIDEBAR_PAD * 2.0;

        // Sidebar: avatar then contacts.
        let cx = SIDEBAR_WIDTH / 2.0;
        let cy = MARGIN + AVATAR_RADIUS;
        match profile_image(doc) {
            Some(href) => canvas.round_image(cx, cy, AVATAR_RADIUS, href),
            None => {
                canvas.circle(cx, cy, AVATAR_RADIUS, &theme.accent_color);
                let size = AVATAR_RADIUS * 0.8;
                let style = TextStyle::new(size, ON_PRIMARY).bold().anchor(Anchor::Middle);
                canvas.text(cx, cy + size * 0.35, &info.initials(), &style);
            }
        }

        let mut side_y = cy + AVATAR_RADIUS + 24.0;
        let contact_style = TextStyle::new(base - 2.0, ON_PRIMARY);
        for contact in info.contacts() {
            side_y = canvas.paragraph(side_x, side_y, side_width, contact, &contact_style);
            side_y += 4.0;
        }

        // Main column: name and title.
        let main_x = SIDEBAR_WIDTH + 32.0;
        let main_width = crate::render::PAGE_WIDTH - main_x - MARGIN;
        let name_style = TextStyle::new(base * 2.3, &theme.primary_color).bold();
        let mut y = canvas.paragraph(main_x, MARGIN, main_width, doc.full_name(), &name_style);
        if let Some(title) = info.job_title.as_deref() {
            let style = TextStyle::new(base * 1.2, &theme.accent_color).spaced(0.5);
            y = canvas.paragraph(main_x, y, main_width, title, &style);
        }
        y += 8.0;
        canvas.rect(main_x, y, 64.0, 4.0, &theme.accent_color, 2.0);

        Body {
            main: Column::main(main_x, main_width, y + 28.0),
            side: Some(Column::side(side_x, side_width, side_y + 16.0)),
        }
    }

    fn section_heading(
        &self,
        doc: &ResumeDocument,
        canvas: &mut Canvas,
        column: &mut Column,
        key: SectionKey,
    ) {
        let theme = &doc.theme;
        let size = theme.font_size.px() * 1.25;
        if column.side {
            let style = TextStyle::new(size, ON_PRIMARY).bold().spaced(1.0);
            canvas.text(column.x, baseline(column.y, size), &key.title().to_uppercase(), &style);
            column.y += line_height(size) + 6.0;
            return;
        }

        // Accent bar to the left of the title.
        let bar_height = line_height(size);
        canvas.rect(
            column.x,
            column.y,
            5.0,
            bar_height,
            &theme.accent_color,
            f32::from(theme.border_radius).min(2.5),
        );
        let style = TextStyle::new(size, &theme.primary_color).bold();
        canvas.text(column.x + 14.0, baseline(column.y, size), key.title(), &style);
        column.y += bar_height + 10.0;
    }

    fn body_style<'d>(&self, doc: &'d ResumeDocument, column: &Column) -> BodyStyle<'d> {
        let theme = &doc.theme;
        if column.side {
            return BodyStyle {
                text: ON_PRIMARY,
                accent: &theme.secondary_color,
                muted: &theme.secondary_color,
                size: theme.font_size.px() - 1.0,
                chip_fill: Some(theme.accent_color.as_str()),
                radius: f32::from(theme.border_radius),
                bullet: "▸",
                separator: " / ",
            };
        }
        BodyStyle {
            text: &theme.text_color,
            accent: &theme.accent_color,
            muted: "#6b7280",
            size: theme.font_size.px(),
            chip_fill: Some(theme.secondary_color.as_str()),
            radius: f32::from(theme.border_radius),
            bullet: "▸",
            separator: " / ",
        }
    }

    fn finish_page(&self, doc: &ResumeDocument, canvas: &mut Canvas, height: f32) {
        canvas.underlay_rect(0.0, 0.0, SIDEBAR_WIDTH, height, &doc.theme.primary_color);
    }
}
