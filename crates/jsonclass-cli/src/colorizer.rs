//! Terminal colorization for class diagram output
//!
//! Applies ANSI escape codes to diagram elements using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize a rendered class diagram using ANSI escape codes
///
/// - Box borders and connectors: Cyan
/// - Arrow heads: Yellow
/// - Type annotations after `: `: Green
/// - The "showing V of T" footer: Dark grey
/// - Class names and keys: Default (terminal color)
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        if line.starts_with("... showing") {
            result.push_str(&format!("{}", line.with(Color::DarkGrey)));
            result.push('\n');
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut in_annotation = false;
        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();

            if prev == Some(':') && c == ' ' {
                in_annotation = true;
                result.push(c);
                continue;
            }

            let colored = match c {
                '┌' | '┐' | '└' | '┘' | '├' | '┤' | '┬' | '┴' | '┼' | '─' | '│' | '╭' | '╮'
                | '╯' | '╰' => {
                    in_annotation = false;
                    format!("{}", c.to_string().with(Color::Cyan))
                }
                '+' | '-' | '|' if is_box_char_context(prev, next) => {
                    in_annotation = false;
                    format!("{}", c.to_string().with(Color::Cyan))
                }
                '▼' | '▲' | '◀' | '▶' => format!("{}", c.to_string().with(Color::Yellow)),
                'v' if is_standalone(prev, next) => {
                    format!("{}", c.to_string().with(Color::Yellow))
                }
                ' ' => {
                    in_annotation = false;
                    c.to_string()
                }
                _ if in_annotation => format!("{}", c.to_string().with(Color::Green)),
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    // Remove trailing newline to match input format
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// ASCII border glyphs sit next to other glyphs or spaces, never inside words
fn is_box_char_context(prev: Option<char>, next: Option<char>) -> bool {
    let border = |c: Option<char>| matches!(c, None | Some(' ' | '+' | '-' | '|'));
    border(prev) && border(next)
}

fn is_standalone(prev: Option<char>, next: Option<char>) -> bool {
    let blank = |c: Option<char>| matches!(c, None | Some(' '));
    blank(prev) && blank(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match c {
                '\x1b' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if in_escape => {}
                _ => out.push(c),
            }
        }
        out
    }

    #[test]
    fn test_colorize_preserves_content() {
        let input = "┌──────────┐\n│   Root   │\n├──────────┤\n│ id: number │\n└──────────┘";
        let output = colorize_output(input);

        assert!(output.contains("\x1b["));
        assert_eq!(strip_ansi(&output), input);
    }

    #[test]
    fn test_colorize_arrows() {
        let output = colorize_output("──▼");
        assert!(output.contains("▼"));
        assert_eq!(strip_ansi(&output), "──▼");
    }

    #[test]
    fn test_hyphen_inside_words_not_colored() {
        let output = colorize_output("| e-mail |");
        assert!(strip_ansi(&output).contains("e-mail"));
        assert!(output.contains("e-mail"));
    }

    #[test]
    fn test_footer_preserved() {
        let input = "+--+\n... showing 1 of 2 classes";
        assert_eq!(strip_ansi(&colorize_output(input)), input);
    }

    #[test]
    fn test_no_trailing_newline() {
        let output = colorize_output("test");
        assert!(!output.ends_with('\n'));
    }
}
