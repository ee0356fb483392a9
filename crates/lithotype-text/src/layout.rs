//! Paragraph flowing.
//!
//! Text is broken into paragraphs at `\n` and greedily word wrapped by
//! character count. The wrap width grows with the square root of the text
//! length.

use lithotype_core::config::LayoutConfig;
use lithotype_geometry::Transform;

/// Flowed lines and where the block starts.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Lines in order. Every paragraph is followed by an empty line.
    pub lines: Vec<String>,
    /// Wrap width in characters.
    pub max_chars: usize,
    /// X of every line's origin, in world units.
    pub left: f64,
    /// Y of the first line, in lines.
    pub top: f64,
}

/// A non-empty line with its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine<'a> {
    pub text: &'a str,
    pub transform: Transform,
}

/// Wrap width for a text of `len` characters.
pub fn wrap_width(len: usize, config: &LayoutConfig) -> usize {
    let grown = 2 * (len as f64).sqrt().floor() as usize;
    grown.max(config.min_chars).min(config.max_chars)
}

/// Flow `text` into lines.
pub fn flow_text(text: &str, config: &LayoutConfig) -> TextLayout {
    let max_chars = wrap_width(text.chars().count(), config);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut words = paragraph.split(' ').filter(|w| !w.is_empty());
        let mut line = words.next().unwrap_or_default().to_string();
        let mut line_chars = line.chars().count();

        for word in words {
            let word_chars = word.chars().count();
            if line_chars + word_chars + 1 <= max_chars {
                line.push(' ');
                line.push_str(word);
                line_chars += word_chars + 1;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
                line_chars = word_chars;
            }
        }
        lines.push(line);
        lines.push(String::new());
    }

    TextLayout {
        left: max_chars as f64 * -2.0,
        top: (lines.len() as f64 - 1.0) / 2.0,
        lines,
        max_chars,
    }
}

impl TextLayout {
    /// Non-empty lines with their transforms: line origin at
    /// `(left, line_scale * y)`, scaled by `line_scale`. `y` starts at `top`,
    /// drops by one per line and by `blank_line_advance` per empty line.
    pub fn placed_lines(&self, config: &LayoutConfig) -> Vec<PlacedLine<'_>> {
        let mut y = self.top;
        let mut placed = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.is_empty() {
                y -= config.blank_line_advance;
                continue;
            }
            placed.push(PlacedLine {
                text: line,
                transform: Transform::new(self.left, config.line_scale * y, 0.0, config.line_scale),
            });
            y -= 1.0;
        }
        placed
    }

    /// Number of non-empty lines.
    pub fn text_lines(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_width_clamped() {
        let config = LayoutConfig::default();
        assert_eq!(wrap_width(0, &config), 20);
        assert_eq!(wrap_width(400, &config), 40);
        assert_eq!(wrap_width(10_000, &config), 80);
    }

    #[test]
    fn test_short_phrase_single_line() {
        let layout = flow_text("Hello world", &LayoutConfig::default());
        assert_eq!(layout.lines, vec!["Hello world".to_string(), String::new()]);
        assert_eq!(layout.max_chars, 20);
        assert_eq!(layout.left, -40.0);
        assert_eq!(layout.top, 0.5);
    }

    #[test]
    fn test_greedy_wrap() {
        let text = "aaaa bbbb cccc dddd eeee ffff";
        let layout = flow_text(text, &LayoutConfig::default());
        // 20 chars per line: "aaaa bbbb cccc dddd" is 19
        assert_eq!(layout.lines[0], "aaaa bbbb cccc dddd");
        assert_eq!(layout.lines[1], "eeee ffff");
        assert_eq!(layout.lines[2], "");
    }

    #[test]
    fn test_paragraphs_and_extra_spaces() {
        let layout = flow_text("one  two\n\nthree", &LayoutConfig::default());
        assert_eq!(layout.lines, vec!["one two", "", "", "", "three", ""]);
        assert_eq!(layout.text_lines(), 2);
    }

    #[test]
    fn test_placed_lines() {
        let config = LayoutConfig::default();
        let layout = flow_text("first\nsecond", &config);
        // lines: first, "", second, "" -> top = 1.5
        let placed = layout.placed_lines(&config);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].text, "first");
        assert_eq!(placed[0].transform, Transform::new(-40.0, 15.0, 0.0, 10.0));
        // one line down, then half a line for the blank
        assert_eq!(placed[1].transform.ty, 10.0 * (1.5 - 1.0 - 0.5));
    }
}
