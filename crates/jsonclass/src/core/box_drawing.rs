//! Glyphs for class boxes

use super::CharacterSet;

/// Horizontal rules that make up a class box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Border above the class name
    Top,
    /// Line between the class name and its properties
    Separator,
    /// Border below the last row
    Bottom,
}

/// Characters for drawing a class box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// Left end of the separator
    pub t_right: char,
    /// Right end of the separator
    pub t_left: char,
    /// Where a connector leaves a bottom border
    pub t_down: char,
}

impl BoxChars {
    pub fn rectangle(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
                t_right: '+',
                t_left: '+',
                t_down: '+',
            },
            CharacterSet::Unicode => Self {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
                t_right: '├',
                t_left: '┤',
                t_down: '┬',
            },
        }
    }

    /// Left and right end characters of `rule`
    pub fn ends(&self, rule: Rule) -> (char, char) {
        match rule {
            Rule::Top => (self.top_left, self.top_right),
            Rule::Separator => (self.t_right, self.t_left),
            Rule::Bottom => (self.bottom_left, self.bottom_right),
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::rectangle(CharacterSet::default())
    }
}
