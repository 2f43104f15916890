//! Character grid the diagram renderer draws on

use unicode_width::UnicodeWidthChar;

/// Placeholder for the second cell of a double-width character
const WIDE_FILLER: char = '\u{0}';

/// Grid of display cells that grows on demand
///
/// Every cell holds one character. A double-width character takes its own
/// cell plus a [`WIDE_FILLER`] cell to the right, so column arithmetic in
/// the layout stays in terminal columns.
#[derive(Debug, Clone)]
pub struct TextCanvas {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<char>>,
}

impl TextCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
        }
    }

    fn grow_to(&mut self, width: usize, height: usize) {
        if width > self.width {
            self.cells.iter_mut().for_each(|row| row.resize(width, ' '));
            self.width = width;
        }
        if height > self.height {
            self.cells.resize_with(height, || vec![' '; width.max(self.width)]);
            self.height = height;
        }
    }

    pub fn set_char(&mut self, x: usize, y: usize, c: char) {
        self.grow_to(x + 1, y + 1);
        self.cells[y][x] = c;
    }

    /// Character at `(x, y)`, or a space outside the grid
    pub fn get_char(&self, x: usize, y: usize) -> char {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(' ')
    }

    /// Write `text` left-aligned starting at `(x, y)`
    ///
    /// Zero-width characters are dropped.
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        let mut column = x;
        for c in text.chars() {
            match c.width().unwrap_or(0) {
                0 => {}
                1 => {
                    self.set_char(column, y, c);
                    column += 1;
                }
                w => {
                    self.set_char(column, y, c);
                    self.set_char(column + 1, y, WIDE_FILLER);
                    column += w;
                }
            }
        }
    }

    /// Draw a horizontal rule of `width` cells: `left`, then `fill`, then `right`
    pub fn draw_rule(&mut self, x: usize, y: usize, width: usize, ends: (char, char), fill: char) {
        if width < 2 {
            return;
        }
        self.set_char(x, y, ends.0);
        for i in 1..width - 1 {
            self.set_char(x + i, y, fill);
        }
        self.set_char(x + width - 1, y, ends.1);
    }

    /// Put `border` at both edges of a `width`-cell row and `text` at `x + indent`
    pub fn draw_framed(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        border: char,
        indent: usize,
        text: &str,
    ) {
        self.set_char(x, y, border);
        self.draw_text(x + indent, y, text);
        self.set_char(x + width.max(1) - 1, y, border);
    }

    /// Rows with fillers dropped and trailing spaces trimmed
    fn visible_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|c| **c != WIDE_FILLER).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

/// Prints the drawn region only: blank rows at either end and the common
/// left margin are removed.
impl std::fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.visible_rows();
        let Some(first) = rows.iter().position(|row| !row.is_empty()) else {
            return Ok(());
        };
        let last = rows.iter().rposition(|row| !row.is_empty()).unwrap_or(first);
        let drawn = &rows[first..=last];

        let margin = drawn
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.len() - row.trim_start_matches(' ').len())
            .min()
            .unwrap_or(0);

        for (i, row) in drawn.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row.get(margin..).unwrap_or(""))?;
        }
        Ok(())
    }
}
