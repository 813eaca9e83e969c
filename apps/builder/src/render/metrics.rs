//! Static glyph-width tables for the four theme font families.
//!
//! Widths are in em units, so a string's rendered width in px is
//! `measure(s) * font_size_px`. The tables are approximations, good enough to
//! decide where a line wraps and how tall a block is; the rasterizer does the
//! real shaping later. Tables cover ASCII 0x20..=0x7E, index = `c as usize - 32`.

use crate::document::FontFamily;

/// Character-width table for one font family.
pub struct FontMetricTable {
    widths: &'static [f32; 95],
    /// Multiplier applied to `widths`, so related faces can share a table.
    scale: f32,
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of `s` in em units.
    pub fn measure(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32] * self.scale
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of `s` in px at `size_px`.
    pub fn measure_px(&self, s: &str, size_px: f32) -> f32 {
        self.measure(s) * size_px
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_px`.
    ///
    /// A single word wider than the line is kept whole on its own line.
    /// Blank input yields no lines.
    pub fn wrap_lines(&self, text: &str, max_width_px: f32, size_px: f32) -> Vec<String> {
        let max_width = max_width_px / size_px;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measure(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Width tables
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static HUMANIST_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

#[rustfmt::skip]
static GEOMETRIC_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.26, 0.32, 0.40, 0.59, 0.59, 0.94, 0.70, 0.23, 0.35, 0.35, 0.41, 0.62, 0.29, 0.35, 0.29, 0.33,
    // 0     1     2     3     4     5     6     7     8     9
    0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59,
    // :     ;     <     =     >     ?     @
    0.29, 0.29, 0.62, 0.62, 0.62, 0.53, 1.07,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.70, 0.64, 0.64, 0.70, 0.59, 0.53, 0.70, 0.70, 0.26, 0.41, 0.64, 0.56, 0.82,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.70, 0.76, 0.59, 0.76, 0.64, 0.53, 0.59, 0.70, 0.70, 0.94, 0.64, 0.64, 0.59,
    // [     \     ]     ^     _     `
    0.29, 0.33, 0.29, 0.49, 0.59, 0.36,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.59, 0.59, 0.53, 0.59, 0.59, 0.33, 0.59, 0.59, 0.23, 0.23, 0.56, 0.23, 0.87,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.59, 0.59, 0.59, 0.59, 0.35, 0.46, 0.41, 0.59, 0.53, 0.76, 0.53, 0.53, 0.46,
    // {     |     }     ~
    0.35, 0.27, 0.35, 0.62,
];

static INTER: FontMetricTable = FontMetricTable {
    widths: &HUMANIST_WIDTHS,
    scale: 1.0,
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Roboto runs slightly narrower than Inter.
static ROBOTO: FontMetricTable = FontMetricTable {
    widths: &HUMANIST_WIDTHS,
    scale: 0.96,
    average_char_width: 0.50,
    space_width: 0.24,
};

/// Open Sans runs slightly wider than Inter.
static OPEN_SANS: FontMetricTable = FontMetricTable {
    widths: &HUMANIST_WIDTHS,
    scale: 1.04,
    average_char_width: 0.54,
    space_width: 0.26,
};

static LATO: FontMetricTable = FontMetricTable {
    widths: &GEOMETRIC_WIDTHS,
    scale: 1.0,
    average_char_width: 0.55,
    space_width: 0.26,
};

pub fn metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Inter => &INTER,
        FontFamily::Roboto => &ROBOTO,
        FontFamily::OpenSans => &OPEN_SANS,
        FontFamily::Lato => &LATO,
    }
}
