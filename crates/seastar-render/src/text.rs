use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 13.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

impl TextMetrics {
    /// A measurement is usable when both extents are finite and the width is
    /// positive for non-empty text. Hosts with a half-initialized canvas can
    /// report 0/NaN widths; those measurements must not reach sizing.
    pub fn is_usable(&self, text: &str) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && (text.is_empty() || self.width > 0.0)
    }
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Estimates per-glyph advances without any font machinery.
///
/// Wide (CJK) glyphs count a full em, narrow punctuation roughly a third, the
/// rest lands between — close enough that shells never clip their labels, and
/// exactly reproducible across runs and platforms. Also serves as the fallback
/// when a caller-supplied measurer cannot measure.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    /// Multiplier applied on top of the per-glyph estimate; 0 means 1.0.
    pub char_width_factor: f64,
    /// Line height as a multiple of font size; 0 means 1.2.
    pub line_height_factor: f64,
}

fn estimate_char_width_em(ch: char) -> f64 {
    match ch.width().unwrap_or(0) {
        0 => 0.0,
        2 => 1.0,
        _ => {
            if matches!(ch, 'i' | 'j' | 'l' | 'f' | 't' | 'r' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | '!')
            {
                0.32
            } else if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                0.68
            } else if matches!(ch, 'm' | 'w' | 'M' | 'W' | '…' | '—') {
                0.85
            } else {
                0.55
            }
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            1.0
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let em: f64 = text.chars().map(estimate_char_width_em).sum();
        TextMetrics {
            width: em * font_size * char_width_factor,
            height: font_size * line_height_factor,
        }
    }
}

/// Measures with the caller's measurer, falling back to the deterministic
/// estimate when the result is unusable. Never fails.
pub fn measure_or_estimate(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
) -> TextMetrics {
    let metrics = measurer.measure(text, style);
    if metrics.is_usable(text) {
        return metrics;
    }
    DeterministicTextMeasurer::default().measure(text, style)
}
