//! Terminal output sanitization for provider-supplied text
//!
//! # Security: Terminal Injection Prevention
//!
//! Titles and snippets come straight from third-party providers. Anything that
//! reaches stdout goes through [`sanitize_line`] first so an escape sequence in
//! a search result cannot clear the screen, move the cursor or recolor the
//! terminal.

/// Strips ANSI CSI sequences and control characters and folds all whitespace
/// (including newlines) into single spaces, giving one printable line.
///
/// # Examples
///
/// ```
/// use deep_search::utils::terminal::sanitize_line;
///
/// assert_eq!(sanitize_line("\x1b[31mRed\x1b[0m\n  text"), "Red text");
/// ```
pub fn sanitize_line(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut pending_space = false;

    while let Some(ch) = chars.next() {
        // CSI sequence: ESC [ params final-letter
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(next_ch) = chars.next() {
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        if ch.is_whitespace() {
            pending_space = !result.is_empty();
            continue;
        }

        if ch.is_control() {
            continue;
        }

        if pending_space {
            result.push(' ');
            pending_space = false;
        }
        result.push(ch);
    }

    result
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push_str("...");
    shortened
}
