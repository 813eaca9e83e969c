//! Section bodies shared by every template. Templates differ in headers,
//! headings and colours; the entries themselves are laid out the same way.

use crate::document::{ResumeDocument, SectionKey};
use crate::render::canvas::{baseline, line_height, Anchor, Canvas, TextStyle};
use crate::render::Column;

const ENTRY_GAP: f32 = 10.0;
const CHIP_PAD_X: f32 = 8.0;
const CHIP_PAD_Y: f32 = 4.0;
const CHIP_GAP: f32 = 6.0;

/// How a template wants section bodies drawn in one column.
#[derive(Debug, Clone)]
pub(crate) struct BodyStyle<'d> {
    pub text: &'d str,
    /// Company, institution and issuer lines.
    pub accent: &'d str,
    /// Dates and secondary details.
    pub muted: &'d str,
    pub size: f32,
    /// Skills are drawn as rounded chips with this fill; `None` joins them
    /// into a single line.
    pub chip_fill: Option<&'d str>,
    pub radius: f32,
    pub bullet: &'static str,
    pub separator: &'static str,
}

/// True when drawing `key` would produce at least one line.
pub(crate) fn has_content(doc: &ResumeDocument, key: SectionKey) -> bool {
    match key {
        SectionKey::Summary => !doc.summary.trim().is_empty(),
        SectionKey::Experience => !doc.experience.is_empty(),
        SectionKey::Education => !doc.education.is_empty(),
        SectionKey::Skills => !doc.skills.technical.is_empty() || !doc.skills.soft.is_empty(),
        SectionKey::Projects => !doc.projects.is_empty(),
        SectionKey::Certifications => !doc.certifications.is_empty(),
        SectionKey::Languages => !doc.languages.is_empty(),
    }
}

pub(crate) fn draw(
    key: SectionKey,
    doc: &ResumeDocument,
    canvas: &mut Canvas,
    column: &mut Column,
    style: &BodyStyle<'_>,
) {
    match key {
        SectionKey::Summary => {
            let text = TextStyle::new(style.size, style.text);
            column.y = canvas.paragraph(column.x, column.y, column.width, &doc.summary, &text);
        }
        SectionKey::Experience => {
            for (i, exp) in doc.experience.iter().enumerate() {
                entry_gap(column, i);
                title_row(canvas, column, &exp.position, &exp.date_range(), style);
                subtitle(canvas, column, &[&exp.company, &exp.location], style);
                bullets(canvas, column, &exp.achievements, style);
            }
        }
        SectionKey::Education => {
            for (i, edu) in doc.education.iter().enumerate() {
                entry_gap(column, i);
                title_row(canvas, column, &edu.degree, &edu.date_range(), style);
                subtitle(canvas, column, &[&edu.institution, &edu.location], style);
                if let Some(gpa) = edu.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
                    detail(canvas, column, &format!("GPA: {gpa}"), style);
                }
            }
        }
        SectionKey::Skills => {
            for (label, items) in [
                ("Technical", &doc.skills.technical),
                ("Soft Skills", &doc.skills.soft),
            ] {
                if items.is_empty() {
                    continue;
                }
                label_line(canvas, column, label, style);
                match style.chip_fill {
                    Some(fill) => chips(canvas, column, items, fill, style),
                    None => {
                        let joined = items.join(style.separator);
                        let text = TextStyle::new(style.size, style.text);
                        column.y =
                            canvas.paragraph(column.x, column.y, column.width, &joined, &text);
                    }
                }
                column.y += 4.0;
            }
        }
        SectionKey::Projects => {
            for (i, project) in doc.projects.iter().enumerate() {
                entry_gap(column, i);
                let link = project.link.as_deref().unwrap_or("");
                title_row(canvas, column, &project.name, link, style);
                if !project.description.trim().is_empty() {
                    let text = TextStyle::new(style.size, style.text);
                    column.y = canvas.paragraph(
                        column.x,
                        column.y,
                        column.width,
                        &project.description,
                        &text,
                    );
                }
                if !project.technologies.is_empty() {
                    detail(canvas, column, &project.technologies.join(style.separator), style);
                }
                bullets(canvas, column, &project.highlights, style);
            }
        }
        SectionKey::Certifications => {
            for (i, cert) in doc.certifications.iter().enumerate() {
                entry_gap(column, i);
                title_row(canvas, column, &cert.name, &cert.date, style);
                subtitle(canvas, column, &[&cert.issuer], style);
                if let Some(id) = cert.credential_id.as_deref().filter(|c| !c.trim().is_empty()) {
                    detail(canvas, column, &format!("Credential ID: {id}"), style);
                }
            }
        }
        SectionKey::Languages => {
            for lang in &doc.languages {
                title_row(canvas, column, &lang.name, &lang.proficiency, style);
            }
        }
    }
}

fn entry_gap(column: &mut Column, index: usize) {
    if index > 0 {
        column.y += ENTRY_GAP;
    }
}

/// Bold title on the left, muted detail right-aligned on the same line.
/// Narrow columns put the detail on its own line instead.
fn title_row(
    canvas: &mut Canvas,
    column: &mut Column,
    title: &str,
    right: &str,
    style: &BodyStyle<'_>,
) {
    let title_style = TextStyle::new(style.size + 1.0, style.text).bold();
    let right_style = TextStyle::new(style.size - 1.0, style.muted);
    let fits = canvas.text_width(title, title_style.size)
        + canvas.text_width(right, right_style.size)
        + 12.0
        <= column.width;

    if fits {
        let y = baseline(column.y, title_style.size);
        canvas.text(column.x, y, title, &title_style);
        canvas.text(column.right(), y, right, &right_style.anchor(Anchor::End));
        column.y += line_height(title_style.size);
    } else {
        column.y = canvas.paragraph(column.x, column.y, column.width, title, &title_style);
        if !right.is_empty() {
            column.y = canvas.paragraph(column.x, column.y, column.width, right, &right_style);
        }
    }
}

fn subtitle(canvas: &mut Canvas, column: &mut Column, parts: &[&str], style: &BodyStyle<'_>) {
    let joined = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(style.separator);
    let text = TextStyle::new(style.size, style.accent);
    column.y = canvas.paragraph(column.x, column.y, column.width, &joined, &text);
}

fn detail(canvas: &mut Canvas, column: &mut Column, content: &str, style: &BodyStyle<'_>) {
    let text = TextStyle::new(style.size - 1.0, style.muted).italic();
    column.y = canvas.paragraph(column.x, column.y, column.width, content, &text);
}

fn label_line(canvas: &mut Canvas, column: &mut Column, label: &str, style: &BodyStyle<'_>) {
    let text = TextStyle::new(style.size - 1.0, style.muted).bold();
    column.y = canvas.paragraph(column.x, column.y, column.width, label, &text);
    column.y += 2.0;
}

fn bullets(canvas: &mut Canvas, column: &mut Column, items: &[String], style: &BodyStyle<'_>) {
    let indent = 14.0;
    let text = TextStyle::new(style.size, style.text);
    for item in items.iter().filter(|i| !i.trim().is_empty()) {
        column.y += 2.0;
        canvas.text(column.x + 2.0, baseline(column.y, style.size), style.bullet, &text);
        column.y = canvas.paragraph(
            column.x + indent,
            column.y,
            column.width - indent,
            item,
            &text,
        );
    }
}

/// Flows `items` as rounded chips, wrapping to a new row when the column
/// runs out.
fn chips(
    canvas: &mut Canvas,
    column: &mut Column,
    items: &[String],
    fill: &str,
    style: &BodyStyle<'_>,
) {
    let size = style.size - 1.0;
    let chip_height = size + CHIP_PAD_Y * 2.0;
    let text = TextStyle::new(size, style.text);
    let mut x = column.x;
    let mut row_top = column.y;

    for item in items.iter().filter(|i| !i.trim().is_empty()) {
        let chip_width = canvas.text_width(item, size) + CHIP_PAD_X * 2.0;
        if x > column.x && x + chip_width > column.right() {
            x = column.x;
            row_top += chip_height + CHIP_GAP;
        }
        canvas.rect(x, row_top, chip_width, chip_height, fill, style.radius);
        canvas.text(
            x + CHIP_PAD_X,
            row_top + CHIP_PAD_Y + size * 0.85,
            item,
            &text,
        );
        x += chip_width + CHIP_GAP;
    }
    column.y = row_top + chip_height + CHIP_GAP;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{seed_document, Theme};

    fn style(theme: &Theme, chips: bool) -> BodyStyle<'_> {
        BodyStyle {
            text: &theme.text_color,
            accent: &theme.primary_color,
            muted: "#6b7280",
            size: 14.0,
            chip_fill: chips.then_some(theme.secondary_color.as_str()),
            radius: 4.0,
            bullet: "•",
            separator: ", ",
        }
    }

    #[test]
    fn test_has_content_tracks_emptiness() {
        let mut doc = seed_document();
        assert!(has_content(&doc, SectionKey::Skills));
        doc.skills.technical.clear();
        doc.skills.soft.clear();
        assert!(!has_content(&doc, SectionKey::Skills));
        doc.summary = "  ".into();
        assert!(!has_content(&doc, SectionKey::Summary));
    }

    #[test]
    fn test_draw_advances_column() {
        let doc = seed_document();
        for key in SectionKey::ALL {
            let mut canvas = Canvas::new(794.0, &doc.theme);
            let mut column = Column::main(48.0, 698.0, 100.0);
            draw(key, &doc, &mut canvas, &mut column, &style(&doc.theme, true));
            assert!(column.y > 100.0, "{key} did not advance");
        }
    }

    #[test]
    fn test_chips_wrap_in_narrow_column() {
        let doc = seed_document();
        let mut wide_canvas = Canvas::new(794.0, &doc.theme);
        let mut wide = Column::main(0.0, 698.0, 0.0);
        draw(SectionKey::Skills, &doc, &mut wide_canvas, &mut wide, &style(&doc.theme, true));

        let mut narrow_canvas = Canvas::new(794.0, &doc.theme);
        let mut narrow = Column::side(0.0, 120.0, 0.0);
        draw(SectionKey::Skills, &doc, &mut narrow_canvas, &mut narrow, &style(&doc.theme, true));

        assert!(narrow.y > wide.y);
    }

    #[test]
    fn test_joined_skills_use_separator() {
        let doc = seed_document();
        let mut canvas = Canvas::new(794.0, &doc.theme);
        let mut column = Column::main(0.0, 698.0, 0.0);
        draw(SectionKey::Skills, &doc, &mut canvas, &mut column, &style(&doc.theme, false));
        let (svg, _) = canvas.finish(200.0);
        assert!(svg.contains("JavaScript, React, Node.js, Python, SQL"));
    }
}
