//! Canonical renderer for parenthesized parse trees
//!
//! Turns the flat `(rule (child ...) ...)` text printed by a parser into an
//! indented form where every opening parenthesis below the root starts a new
//! line. The output is the golden-file format, so it must stay byte-stable.

use thiserror::Error;

/// Spaces per nesting level. Changing this invalidates every golden file.
pub const INDENT_WIDTH: usize = 2;

/// Structural problems in raw tree text, reported by [`check_balance`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A `)` with no matching `(`
    #[error("unexpected `)` at byte {offset}")]
    UnexpectedClose { offset: usize },
    /// Input ended while groups were still open
    #[error("{depth} unclosed `(` at end of input")]
    Unclosed { depth: usize },
}

/// Single-pass renderer state
struct TreeRenderer {
    output: String,
    depth: isize,
}

impl TreeRenderer {
    fn new(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            depth: 0,
        }
    }

    fn render(mut self, raw: &str) -> String {
        for ch in raw.chars() {
            match ch {
                '(' => {
                    if self.depth > 0 {
                        self.newline();
                        self.write_indent();
                    }
                    self.depth += 1;
                }
                ')' => self.depth -= 1,
                _ => {}
            }
            self.output.push(ch);
        }
        self.output
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        // Only called with depth > 0
        let width = self.depth.unsigned_abs() * INDENT_WIDTH;
        self.output.extend(std::iter::repeat(' ').take(width));
    }
}

/// Render raw tree text into canonical indented text.
///
/// Never fails. On unbalanced input the depth can go negative; an opening
/// parenthesis at depth zero or below starts no new line.
pub fn render_tree(raw: &str) -> String {
    TreeRenderer::new(raw.len() + raw.len() / 2).render(raw)
}

/// Render raw tree text, rejecting unbalanced parentheses first.
pub fn render_tree_strict(raw: &str) -> Result<String, RenderError> {
    check_balance(raw)?;
    Ok(render_tree(raw))
}

/// Check that every `)` closes an open `(` and nothing is left open.
pub fn check_balance(raw: &str) -> Result<(), RenderError> {
    let mut depth = 0usize;
    for (offset, ch) in raw.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(RenderError::UnexpectedClose { offset })?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(RenderError::Unclosed { depth });
    }
    Ok(())
}

/// Remove the layout [`render_tree`] inserts, recovering the raw text.
///
/// Tracks depth the same way the renderer does, so a newline is only dropped
/// when it is followed by exactly the indentation for the current depth and
/// then a `(`. Newlines that were already in the raw text survive.
pub fn strip_layout(canonical: &str) -> String {
    let bytes = canonical.as_bytes();
    let mut output = String::with_capacity(canonical.len());
    let mut depth: isize = 0;
    let mut rest = canonical;

    while let Some(ch) = rest.chars().next() {
        let offset = canonical.len() - rest.len();
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            '\n' if depth > 0 => {
                let width = depth.unsigned_abs() * INDENT_WIDTH;
                let indent_end = offset + 1 + width;
                let is_inserted = bytes.get(indent_end) == Some(&b'(')
                    && bytes[offset + 1..indent_end].iter().all(|b| *b == b' ');
                if is_inserted {
                    rest = &canonical[indent_end..];
                    continue;
                }
            }
            _ => {}
        }
        output.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    output
}

/// Check that a stored golden text is exactly what the renderer would
/// produce for its own raw content.
pub fn is_canonical(text: &str) -> bool {
    render_tree(&strip_layout(text)) == text
}
