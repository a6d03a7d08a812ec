//! Width-aware greedy line breaking.
//!
//! Greedy first-fit over measured word widths. Deterministic: no hyphenation, no locale rules.

use crate::layout::font_metrics::MM_PER_PT;
use crate::layout::geometry::TierStyle;

/// Wraps `text` so that no line is wider than `max_width` millimetres in `style`.
///
/// Explicit newlines start a new paragraph; a blank paragraph yields an empty line.
/// Runs of whitespace collapse to a single space. A word that is wider than the line on its
/// own is split at character boundaries. Blank input yields no lines.
pub fn wrap_text(text: &str, style: &TierStyle, max_width: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let metrics = style.metrics();
    let scale = style.size_pt * MM_PER_PT;
    let space_w = metrics.space_width * scale;
    let measure = |s: &str| metrics.measure_str(s) * scale;

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = measure(word);

            if word_w > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunks = split_long_word(word, max_width, &measure);
                // The tail of an oversized word may share its line with what follows.
                let tail = chunks.pop().unwrap_or_default();
                lines.extend(chunks);
                current_width = measure(&tail);
                current = tail;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Splits a single word into pieces no wider than `max_width`. Each piece holds at least
/// one character, so a page narrower than one glyph still terminates.
fn split_long_word(word: &str, max_width: f32, measure: &dyn Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        if !piece.is_empty() && measure(&candidate) > max_width {
            pieces.push(std::mem::replace(&mut piece, c.to_string()));
        } else {
            piece = candidate;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::default_typography;

    fn body() -> TierStyle {
        default_typography().body
    }

    fn non_space(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_text("", &body(), 180.0).is_empty());
        assert!(wrap_text("  \n ", &body(), 180.0).is_empty());
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("Quantum computing is here.", &body(), 180.0);
        assert_eq!(lines, vec!["Quantum computing is here.".to_string()]);
    }

    #[test]
    fn test_no_line_exceeds_width() {
        let style = body();
        let text = "Superconducting qubits and trapped ions compete for scalability ".repeat(12);
        let lines = wrap_text(&text, &style, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            let w = style.metrics().measure_mm(line, style.size_pt);
            assert!(w <= 60.0 + 1e-3, "line {line:?} is {w}mm wide");
        }
    }

    #[test]
    fn test_wrapping_preserves_content() {
        let text = "First paragraph with several words in it.\n\nSecond paragraph after a blank line.";
        let lines = wrap_text(text, &body(), 40.0);
        assert_eq!(non_space(&lines.join("\n")), non_space(text));
        assert!(lines.iter().any(|l| l.is_empty()), "blank paragraph should be kept");
    }

    #[test]
    fn test_wrapping_is_deterministic() {
        let text = "Deterministic output matters for reproducible exports. ".repeat(20);
        assert_eq!(
            wrap_text(&text, &body(), 75.0),
            wrap_text(&text, &body(), 75.0)
        );
    }

    #[test]
    fn test_oversized_word_is_split() {
        let style = body();
        let word = "a".repeat(200);
        let lines = wrap_text(&word, &style, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(style.metrics().measure_mm(line, style.size_pt) <= 20.0 + 1e-3);
        }
    }

    #[test]
    fn test_windows_newlines_do_not_leak_carriage_returns() {
        let lines = wrap_text("one\r\ntwo", &body(), 180.0);
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }
}
