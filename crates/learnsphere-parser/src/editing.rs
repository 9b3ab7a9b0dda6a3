//! Editor toolbar helpers: wrap a selection in markdown syntax.
//!
//! Selections and cursors are character offsets, not byte offsets.

/// Toolbar actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Bold,
    Italic,
    Code,
    /// `[text](URL)` with the cursor placed on the URL
    Link,
    /// `[[text]]`
    CrossReference,
}

impl Markup {
    /// Text inserted when the selection is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Markup::Bold => "bold text",
            Markup::Italic => "italic text",
            Markup::Code => "code",
            Markup::Link => "link text",
            Markup::CrossReference => "linked note",
        }
    }

    fn delimiter(self) -> &'static str {
        match self {
            Markup::Bold => "**",
            Markup::Italic => "*",
            Markup::Code => "`",
            Markup::Link | Markup::CrossReference => "",
        }
    }
}

/// Selected range `[start, end)` in characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty selection at `position`
    pub fn caret(position: usize) -> Self {
        Self::new(position, position)
    }
}

/// Result of applying a toolbar action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub content: String,
    /// New cursor position, in characters
    pub cursor: usize,
}

/// Apply `markup` to the selected text (or a placeholder when nothing is
/// selected). Out-of-range offsets are clamped and a reversed selection is
/// normalized.
pub fn insert_markup(content: &str, selection: Selection, markup: Markup) -> Edit {
    let total = content.chars().count();
    let mut start = selection.start.min(total);
    let mut end = selection.end.min(total);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let start_byte = byte_offset(content, start);
    let end_byte = byte_offset(content, end);
    let selected = &content[start_byte..end_byte];
    let text = if selected.is_empty() {
        markup.placeholder()
    } else {
        selected
    };

    let (inserted, cursor_in_insert) = match markup {
        Markup::Link => {
            let inserted = format!("[{text}](URL)");
            // Points at "URL)"
            let cursor = inserted.chars().count() - 4;
            (inserted, cursor)
        }
        Markup::CrossReference => {
            let inserted = format!("[[{text}]]");
            let cursor = inserted.chars().count();
            (inserted, cursor)
        }
        _ => {
            let delimiter = markup.delimiter();
            let inserted = format!("{delimiter}{text}{delimiter}");
            let cursor = inserted.chars().count();
            (inserted, cursor)
        }
    };

    let mut updated = String::with_capacity(content.len() + inserted.len());
    updated.push_str(&content[..start_byte]);
    updated.push_str(&inserted);
    updated.push_str(&content[end_byte..]);

    Edit {
        content: updated,
        cursor: start + cursor_in_insert,
    }
}

fn byte_offset(content: &str, chars: usize) -> usize {
    content
        .char_indices()
        .nth(chars)
        .map_or(content.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let edit = insert_markup("make this bold", Selection::new(5, 9), Markup::Bold);
        assert_eq!(edit.content, "make **this** bold");
        assert_eq!(edit.cursor, 13);
    }

    #[test]
    fn test_placeholder_when_empty() {
        let edit = insert_markup("", Selection::caret(0), Markup::Italic);
        assert_eq!(edit.content, "*italic text*");
        assert_eq!(edit.cursor, 13);
    }

    #[test]
    fn test_link_cursor_on_url() {
        let edit = insert_markup("see docs", Selection::new(4, 8), Markup::Link);
        assert_eq!(edit.content, "see [docs](URL)");
        let rest: String = edit.content.chars().skip(edit.cursor).collect();
        assert_eq!(rest, "URL)");
    }

    #[test]
    fn test_cross_reference() {
        let edit = insert_markup("read Rust now", Selection::new(5, 9), Markup::CrossReference);
        assert_eq!(edit.content, "read [[Rust]] now");
        assert_eq!(edit.cursor, 13);
    }

    #[test]
    fn test_multibyte_offsets() {
        let edit = insert_markup("学习机器学习", Selection::new(2, 6), Markup::CrossReference);
        assert_eq!(edit.content, "学习[[机器学习]]");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn test_clamps_and_normalizes() {
        let edit = insert_markup("abc", Selection::new(10, 1), Markup::Code);
        assert_eq!(edit.content, "a`bc`");
        assert_eq!(edit.cursor, 5);
    }
}
