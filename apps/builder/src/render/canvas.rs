//! Minimal SVG writer used by the templates.
//!
//! Coordinates are px on a 794 px wide page. Every user-supplied string goes
//! through [`escape`] before it lands in the markup.

use std::fmt::Write as _;

use crate::document::{FontFamily, Theme};
use crate::render::metrics::{metrics, FontMetricTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text attributes for a single `<text>` run.
#[derive(Debug, Clone)]
pub struct TextStyle<'a> {
    pub size: f32,
    pub fill: &'a str,
    pub bold: bool,
    pub italic: bool,
    pub anchor: Anchor,
    pub letter_spacing: f32,
}

impl<'a> TextStyle<'a> {
    pub fn new(size: f32, fill: &'a str) -> Self {
        Self {
            size,
            fill,
            bold: false,
            italic: false,
            anchor: Anchor::Start,
            letter_spacing: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn spaced(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }
}

pub struct Canvas {
    width: f32,
    font: FontFamily,
    background: String,
    underlay: String,
    body: String,
    image_refs: Vec<String>,
}

impl Canvas {
    pub fn new(width: f32, theme: &Theme) -> Self {
        Self {
            width,
            font: theme.font_family,
            background: theme.background_color.clone(),
            underlay: String::new(),
            body: String::new(),
            image_refs: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn metrics(&self) -> &'static FontMetricTable {
        metrics(self.font)
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &str, radius: f32) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            num(radius),
            escape(fill)
        );
    }

    /// Like [`Canvas::rect`] but painted beneath everything drawn so far,
    /// for backgrounds whose extent is only known once content is laid out.
    pub fn underlay_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &str) {
        let _ = writeln!(
            self.underlay,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            escape(fill)
        );
    }

    pub fn outlined_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: &str, radius: f32) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            num(radius),
            escape(stroke)
        );
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, width: f32) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            escape(stroke),
            num(width)
        );
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(cx),
            num(cy),
            num(r),
            escape(fill)
        );
    }

    /// Draws a circular image, recording `href` so export can validate it.
    pub fn round_image(&mut self, cx: f32, cy: f32, r: f32, href: &str) {
        let clip = format!("clip{}", self.image_refs.len());
        let _ = writeln!(
            self.body,
            r#"<clipPath id="{clip}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
            num(cx),
            num(cy),
            num(r)
        );
        let _ = writeln!(
            self.body,
            r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" clip-path="url(#{clip})" preserveAspectRatio="xMidYMid slice"/>"#,
            num(cx - r),
            num(cy - r),
            num(r * 2.0),
            num(r * 2.0),
            escape(href)
        );
        self.image_refs.push(href.to_string());
    }

    /// Draws one line of text with its baseline at `y`.
    pub fn text(&mut self, x: f32, y: f32, content: &str, style: &TextStyle<'_>) {
        if content.is_empty() {
            return;
        }
        let mut attrs = format!(
            r#"x="{}" y="{}" font-size="{}" fill="{}""#,
            num(x),
            num(y),
            num(style.size),
            escape(style.fill)
        );
        if style.bold {
            attrs.push_str(r#" font-weight="bold""#);
        }
        if style.italic {
            attrs.push_str(r#" font-style="italic""#);
        }
        if style.anchor != Anchor::Start {
            let _ = write!(attrs, r#" text-anchor="{}""#, style.anchor.as_str());
        }
        if style.letter_spacing != 0.0 {
            let _ = write!(attrs, r#" letter-spacing="{}""#, num(style.letter_spacing));
        }
        let _ = writeln!(self.body, "<text {attrs}>{}</text>", escape(content));
    }

    /// Word-wraps `content` into a block of `max_width` whose top edge is at
    /// `top`. Returns the bottom edge of the block.
    pub fn paragraph(
        &mut self,
        x: f32,
        top: f32,
        max_width: f32,
        content: &str,
        style: &TextStyle<'_>,
    ) -> f32 {
        let line_height = line_height(style.size);
        let lines = self.metrics().wrap_lines(content, max_width, style.size);
        for (i, line) in lines.iter().enumerate() {
            self.text(x, baseline(top, style.size) + line_height * i as f32, line, style);
        }
        top + line_height * lines.len() as f32
    }

    pub fn text_width(&self, content: &str, size: f32) -> f32 {
        self.metrics().measure_px(content, size)
    }

    /// Closes the document at `height` px and returns the markup and the
    /// image references it contains.
    pub fn finish(self, height: f32) -> (String, Vec<String>) {
        let mut svg = String::with_capacity(self.underlay.len() + self.body.len() + 512);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
            w = num(self.width),
            h = num(height),
            font = escape(self.font.css_stack())
        );
        let _ = writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape(&self.background)
        );
        svg.push_str(&self.underlay);
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        (svg, self.image_refs)
    }
}

/// Baseline of a single line whose top edge is at `top`.
pub fn baseline(top: f32, size: f32) -> f32 {
    top + size
}

/// Baseline-to-baseline distance for a font size.
pub fn line_height(size: f32) -> f32 {
    (size * 1.45).round()
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
fn num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut s = format!("{rounded:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Escapes text for use in SVG character data and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() && c != '\t' && c != '\n' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(
            escape(r#"<b>"R&D" 'team'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &apos;team&apos;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_drops_control_characters() {
        assert_eq!(escape("a\u{0007}b"), "ab");
    }

    #[test]
    fn test_num_trims_trailing_zeros() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.234), "1.23");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_finish_wraps_body_in_svg_root() {
        let mut canvas = Canvas::new(794.0, &Theme::default());
        canvas.text(10.0, 20.0, "Hi & bye", &TextStyle::new(14.0, "#000000").bold());
        let (svg, images) = canvas.finish(1123.0);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 794 1123""#));
        assert!(svg.contains(r#"font-weight="bold">Hi &amp; bye</text>"#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(images.is_empty());
    }

    #[test]
    fn test_underlay_is_painted_first() {
        let mut canvas = Canvas::new(794.0, &Theme::default());
        canvas.text(10.0, 20.0, "front", &TextStyle::new(12.0, "#000000"));
        canvas.underlay_rect(0.0, 0.0, 200.0, 1123.0, "#2563eb");
        let (svg, _) = canvas.finish(1123.0);
        let back = svg.find("#2563eb").unwrap();
        let front = svg.find("front").unwrap();
        assert!(back < front);
    }

    #[test]
    fn test_round_image_records_reference() {
        let mut canvas = Canvas::new(794.0, &Theme::default());
        canvas.round_image(50.0, 50.0, 40.0, "data:image/png;base64,AAAA");
        let (svg, images) = canvas.finish(100.0);
        assert!(svg.contains("clip-path=\"url(#clip0)\""));
        assert_eq!(images, vec!["data:image/png;base64,AAAA"]);
    }

    #[test]
    fn test_paragraph_returns_position_below_text() {
        let mut canvas = Canvas::new(794.0, &Theme::default());
        let style = TextStyle::new(14.0, "#000000");
        let end = canvas.paragraph(0.0, 100.0, 600.0, "one line", &style);
        assert!(end > 100.0);
        assert_eq!(end, 100.0 + line_height(14.0));
        let blank_end = canvas.paragraph(0.0, 100.0, 600.0, "   ", &style);
        assert_eq!(blank_end, 100.0);
    }
}
