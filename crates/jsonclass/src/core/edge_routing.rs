//! Orthogonal connector drawing
//!
//! Connectors are collected as paths of waypoints and merged cell by cell:
//! each cell remembers which of its four sides a connector passes through,
//! so overlapping buses, corners and crossings resolve to the right glyph
//! regardless of drawing order. Arrow markers are drawn last.

use std::collections::BTreeMap;

use super::{CharacterSet, Heading, TextCanvas};

const UP: u8 = 0b0001;
const DOWN: u8 = 0b0010;
const LEFT: u8 = 0b0100;
const RIGHT: u8 = 0b1000;

/// Character set for connector drawing
#[derive(Debug, Clone, Copy)]
pub struct EdgeChars {
    pub horizontal: char,
    pub vertical: char,
    pub corner_down_right: char, // ╭ (connects DOWN and RIGHT)
    pub corner_down_left: char,  // ╮ (connects DOWN and LEFT)
    pub corner_up_right: char,   // ╰ (connects UP and RIGHT)
    pub corner_up_left: char,    // ╯ (connects UP and LEFT)
    pub junction_down: char,     // ┬
    pub junction_up: char,       // ┴
    pub junction_right: char,    // ├
    pub junction_left: char,     // ┤
    pub cross: char,             // ┼
    pub arrow_up: char,
    pub arrow_down: char,
    pub arrow_left: char,
    pub arrow_right: char,
}

impl EdgeChars {
    /// Get edge characters for the given style
    pub fn for_style(style: CharacterSet) -> Self {
        if style.is_ascii() {
            Self::ascii()
        } else {
            Self::unicode()
        }
    }

    /// ASCII edge characters
    pub fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            corner_down_right: '+',
            corner_down_left: '+',
            corner_up_right: '+',
            corner_up_left: '+',
            junction_down: '+',
            junction_up: '+',
            junction_right: '+',
            junction_left: '+',
            cross: '+',
            arrow_up: '^',
            arrow_down: 'v',
            arrow_left: '<',
            arrow_right: '>',
        }
    }

    /// Unicode edge characters with rounded corners
    pub fn unicode() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            corner_down_right: '╭',
            corner_down_left: '╮',
            corner_up_right: '╰',
            corner_up_left: '╯',
            junction_down: '┬',
            junction_up: '┴',
            junction_right: '├',
            junction_left: '┤',
            cross: '┼',
            arrow_up: '▲',
            arrow_down: '▼',
            arrow_left: '◀',
            arrow_right: '▶',
        }
    }

    /// Glyph for a cell connected on the given sides
    fn glyph(&self, sides: u8) -> char {
        match sides {
            s if s == UP | DOWN || s == UP || s == DOWN => self.vertical,
            s if s == LEFT | RIGHT || s == LEFT || s == RIGHT => self.horizontal,
            s if s == DOWN | RIGHT => self.corner_down_right,
            s if s == DOWN | LEFT => self.corner_down_left,
            s if s == UP | RIGHT => self.corner_up_right,
            s if s == UP | LEFT => self.corner_up_left,
            s if s == LEFT | RIGHT | DOWN => self.junction_down,
            s if s == LEFT | RIGHT | UP => self.junction_up,
            s if s == UP | DOWN | RIGHT => self.junction_right,
            s if s == UP | DOWN | LEFT => self.junction_left,
            _ => self.cross,
        }
    }

    fn arrow(&self, heading: Heading) -> char {
        match heading {
            Heading::Up => self.arrow_up,
            Heading::Down => self.arrow_down,
            Heading::Left => self.arrow_left,
            Heading::Right => self.arrow_right,
        }
    }
}

/// Accumulates connector paths and draws them onto a canvas
pub struct ConnectorRouter {
    pub chars: EdgeChars,
    cells: BTreeMap<(usize, usize), u8>,
    arrows: Vec<(usize, usize, Heading)>,
}

impl ConnectorRouter {
    /// Create a new router with the given character set
    pub fn new(style: CharacterSet) -> Self {
        Self::with_chars(EdgeChars::for_style(style))
    }

    /// Create a router with custom characters
    pub fn with_chars(chars: EdgeChars) -> Self {
        Self {
            chars,
            cells: BTreeMap::new(),
            arrows: Vec::new(),
        }
    }

    /// Add an orthogonal path through `waypoints`, ending in an arrow marker
    ///
    /// Consecutive waypoints must share a row or a column. The first cell is
    /// treated as attached to whatever lies above it (the source box border).
    pub fn add_path(&mut self, waypoints: &[(usize, usize)]) {
        let points = simplify(waypoints);
        let Some(&first) = points.first() else {
            return;
        };

        *self.cells.entry(first).or_insert(0) |= UP;

        let mut heading = Heading::Down;
        for pair in points.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            heading = heading_between(from, to);
            let mut cur = from;
            while cur != to {
                let next = step(cur, heading);
                *self.cells.entry(cur).or_insert(0) |= side_bit(heading);
                *self.cells.entry(next).or_insert(0) |= side_bit(opposite(heading));
                cur = next;
            }
        }

        if let Some(&last) = points.last() {
            self.arrows.push((last.0, last.1, heading));
        }
    }

    /// Number of arrow markers collected so far
    pub fn path_count(&self) -> usize {
        self.arrows.len()
    }

    /// Draw all collected connectors, then their arrow markers
    pub fn draw(&self, canvas: &mut TextCanvas) {
        for (&(x, y), &sides) in &self.cells {
            canvas.set_char(x, y, self.chars.glyph(sides));
        }
        for &(x, y, heading) in &self.arrows {
            canvas.set_char(x, y, self.chars.arrow(heading));
        }
    }
}

/// Drop repeated and collinear interior waypoints
fn simplify(waypoints: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut points: Vec<(usize, usize)> = Vec::with_capacity(waypoints.len());
    for &p in waypoints {
        if points.last() == Some(&p) {
            continue;
        }
        if points.len() >= 2 {
            let a = points[points.len() - 2];
            let b = points[points.len() - 1];
            let collinear = (a.0 == b.0 && b.0 == p.0) || (a.1 == b.1 && b.1 == p.1);
            if collinear {
                points.pop();
            }
        }
        points.push(p);
    }
    points
}

fn heading_between(from: (usize, usize), to: (usize, usize)) -> Heading {
    if to.1 > from.1 {
        Heading::Down
    } else if to.1 < from.1 {
        Heading::Up
    } else if to.0 > from.0 {
        Heading::Right
    } else {
        Heading::Left
    }
}

fn step((x, y): (usize, usize), heading: Heading) -> (usize, usize) {
    match heading {
        Heading::Up => (x, y.saturating_sub(1)),
        Heading::Down => (x, y + 1),
        Heading::Left => (x.saturating_sub(1), y),
        Heading::Right => (x + 1, y),
    }
}

fn side_bit(heading: Heading) -> u8 {
    match heading {
        Heading::Up => UP,
        Heading::Down => DOWN,
        Heading::Left => LEFT,
        Heading::Right => RIGHT,
    }
}

fn opposite(heading: Heading) -> Heading {
    match heading {
        Heading::Up => Heading::Down,
        Heading::Down => Heading::Up,
        Heading::Left => Heading::Right,
        Heading::Right => Heading::Left,
    }
}
