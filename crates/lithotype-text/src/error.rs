use crate::GlyphId;

/// Errors that can occur while turning text into glyph shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The font has no glyph for a character.
    GlyphNotFound { ch: char },

    /// A glyph outline could not be read.
    Outline { glyph: GlyphId, message: String },

    /// Font data could not be parsed.
    FontParse { message: String },
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::GlyphNotFound { ch } => write!(f, "No glyph for character {:?}", ch),
            TextError::Outline { glyph, message } => {
                write!(f, "Failed to read outline of glyph {}: {}", glyph, message)
            }
            TextError::FontParse { message } => write!(f, "Invalid font data: {}", message),
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
