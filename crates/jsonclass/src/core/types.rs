//! Core type definitions shared by the renderer and the CLI

use std::fmt;

/// Character set for rendering output
///
/// Controls which characters are used for drawing class boxes and connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII characters only: + - | < > ^ v
    /// Maximum compatibility but limited visual quality
    Ascii,
    /// Unicode box-drawing characters with rounded connector corners
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// Direction an arrow marker points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}
