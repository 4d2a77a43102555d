//! Word wrapping for `rdfs:comment` long strings.

/// Column budget of a wrapped description line.
pub const DEFAULT_WIDTH: usize = 60;

/// Indentation of description lines inside a triple-quoted literal.
pub const DEFAULT_INDENT: usize = 8;

/// Collapses whitespace runs in `text` and packs the words greedily into
/// lines of at most `width` characters.
///
/// A word longer than `width` gets a line of its own. Empty or
/// whitespace-only input yields no lines.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_chars = word_chars;
        } else if line_chars + 1 + word_chars <= width {
            line.push(' ');
            line.push_str(word);
            line_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_chars = word_chars;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wraps `text` and joins the lines with a newline followed by `indent`
/// spaces, ready to follow an already indented first line.
#[must_use]
pub fn reflow(text: &str, width: usize, indent: usize) -> String {
    let separator = format!("\n{}", " ".repeat(indent));
    wrap(text, width).join(&separator)
}
