//! Editor cursor and edit application
//!
//! Code is handled as `\n` separated lines so that splitting and joining
//! round-trips exactly, trailing newline included. Columns count chars.

use crate::actions::TextInputAction;

/// Cursor position in the model code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorCursor {
    pub line: usize,
    pub column: usize,
}

impl EditorCursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Nearest position that exists in `code`
    pub fn clamped(self, code: &str) -> Self {
        let lines = code_lines(code);
        let line = self.line.min(lines.len().saturating_sub(1));
        let column = self.column.min(char_len(lines.get(line).copied().unwrap_or("")));
        Self { line, column }
    }
}

/// Lines of `code`; an empty string is one empty line
pub fn code_lines(code: &str) -> Vec<&str> {
    code.split('\n').collect()
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte offset of char `column`, or the line length past the end
fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Apply one keystroke to `code` at `cursor`.
///
/// Returns the new code if the text changed, and the new cursor position.
pub fn apply_edit(
    code: &str,
    cursor: EditorCursor,
    input: TextInputAction,
) -> (Option<String>, EditorCursor) {
    let EditorCursor { line, column } = cursor.clamped(code);
    let mut lines: Vec<String> = code_lines(code).into_iter().map(String::from).collect();
    let current_len = char_len(&lines[line]);
    let last_line = lines.len() - 1;

    let moved = |line: usize, column: usize| -> (Option<String>, EditorCursor) {
        (None, EditorCursor::new(line, column))
    };

    match input {
        TextInputAction::Char(c) if c.is_control() => moved(line, column),
        TextInputAction::Char(c) => {
            let at = byte_index(&lines[line], column);
            lines[line].insert(at, c);
            (Some(lines.join("\n")), EditorCursor::new(line, column + 1))
        }
        TextInputAction::Newline => {
            let at = byte_index(&lines[line], column);
            let rest = lines[line].split_off(at);
            lines.insert(line + 1, rest);
            (Some(lines.join("\n")), EditorCursor::new(line + 1, 0))
        }
        TextInputAction::Backspace => {
            if column > 0 {
                let at = byte_index(&lines[line], column - 1);
                lines[line].remove(at);
                (Some(lines.join("\n")), EditorCursor::new(line, column - 1))
            } else if line > 0 {
                let tail = lines.remove(line);
                let previous_len = char_len(&lines[line - 1]);
                lines[line - 1].push_str(&tail);
                (Some(lines.join("\n")), EditorCursor::new(line - 1, previous_len))
            } else {
                moved(line, column)
            }
        }
        TextInputAction::Delete => {
            if column < current_len {
                let at = byte_index(&lines[line], column);
                lines[line].remove(at);
                (Some(lines.join("\n")), EditorCursor::new(line, column))
            } else if line < last_line {
                let next = lines.remove(line + 1);
                lines[line].push_str(&next);
                (Some(lines.join("\n")), EditorCursor::new(line, column))
            } else {
                moved(line, column)
            }
        }
        TextInputAction::Left => {
            if column > 0 {
                moved(line, column - 1)
            } else if line > 0 {
                moved(line - 1, char_len(&lines[line - 1]))
            } else {
                moved(line, column)
            }
        }
        TextInputAction::Right => {
            if column < current_len {
                moved(line, column + 1)
            } else if line < last_line {
                moved(line + 1, 0)
            } else {
                moved(line, column)
            }
        }
        TextInputAction::Up => {
            if line == 0 {
                return moved(line, column);
            }
            moved(line - 1, column.min(char_len(&lines[line - 1])))
        }
        TextInputAction::Down => {
            if line == last_line {
                return moved(line, column);
            }
            moved(line + 1, column.min(char_len(&lines[line + 1])))
        }
        TextInputAction::Home => moved(line, 0),
        TextInputAction::End => moved(line, current_len),
    }
}

/// First visible line so that `cursor_line` stays inside a viewport of
/// `height` lines scrolled to `scroll`
pub fn visible_scroll(scroll: usize, cursor_line: usize, height: usize) -> usize {
    if height == 0 || cursor_line < scroll {
        return cursor_line.min(scroll);
    }
    if cursor_line >= scroll + height {
        return cursor_line + 1 - height;
    }
    scroll
}

#[cfg(test)]
mod tests {
    use super::*;
    use TextInputAction::*;

    fn edit(
        code: &str,
        line: usize,
        column: usize,
        input: TextInputAction,
    ) -> (Option<String>, EditorCursor) {
        apply_edit(code, EditorCursor::new(line, column), input)
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let (code, cursor) = edit("in = [a]", 0, 7, Char(','));
        assert_eq!(code.as_deref(), Some("in = [a,]"));
        assert_eq!(cursor, EditorCursor::new(0, 8));
    }

    #[test]
    fn test_typing_into_empty_code() {
        let (code, cursor) = edit("", 0, 0, Char('u'));
        assert_eq!(code.as_deref(), Some("u"));
        assert_eq!(cursor, EditorCursor::new(0, 1));
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let (code, cursor) = edit("\u{3b8} = 1", 0, 1, Char('x'));
        assert_eq!(code.as_deref(), Some("\u{3b8}x = 1"));
        assert_eq!(cursor, EditorCursor::new(0, 2));

        let (code, _) = edit("a\u{3b8}b", 0, 2, Backspace);
        assert_eq!(code.as_deref(), Some("ab"));
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let (code, cursor) = edit("abc", 0, 1, Char('\t'));
        assert_eq!(code, None);
        assert_eq!(cursor, EditorCursor::new(0, 1));
    }

    #[test]
    fn test_newline_splits_line() {
        let (code, cursor) = edit("u { 1 }\nF { u }", 0, 3, Newline);
        assert_eq!(code.as_deref(), Some("u {\n 1 }\nF { u }"));
        assert_eq!(cursor, EditorCursor::new(1, 0));
    }

    #[test]
    fn test_backspace_at_line_start_joins_lines() {
        let (code, cursor) = edit("ab\ncd", 1, 0, Backspace);
        assert_eq!(code.as_deref(), Some("abcd"));
        assert_eq!(cursor, EditorCursor::new(0, 2));

        let (code, cursor) = edit("ab", 0, 0, Backspace);
        assert_eq!(code, None);
        assert_eq!(cursor, EditorCursor::new(0, 0));
    }

    #[test]
    fn test_delete_at_line_end_joins_lines() {
        let (code, cursor) = edit("ab\ncd\n", 0, 2, Delete);
        assert_eq!(code.as_deref(), Some("abcd\n"));
        assert_eq!(cursor, EditorCursor::new(0, 2));

        let (code, _) = edit("ab", 0, 2, Delete);
        assert_eq!(code, None);
    }

    #[test]
    fn test_trailing_newline_round_trips() {
        let (code, _) = edit("a\n", 1, 0, Char('b'));
        assert_eq!(code.as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_horizontal_moves_wrap_between_lines() {
        let (code, cursor) = edit("ab\ncd", 1, 0, Left);
        assert_eq!(code, None);
        assert_eq!(cursor, EditorCursor::new(0, 2));

        let (_, cursor) = edit("ab\ncd", 0, 2, Right);
        assert_eq!(cursor, EditorCursor::new(1, 0));

        let (_, cursor) = edit("ab\ncd", 1, 2, Right);
        assert_eq!(cursor, EditorCursor::new(1, 2));
    }

    #[test]
    fn test_vertical_moves_keep_column_inside_line() {
        let (_, cursor) = edit("abcdef\nab\nabcdef", 0, 5, Down);
        assert_eq!(cursor, EditorCursor::new(1, 2));
        let (_, cursor) = edit("abcdef\nab", 0, 3, Up);
        assert_eq!(cursor, EditorCursor::new(0, 3));
        let (_, cursor) = edit("abcdef\nab", 1, 1, Down);
        assert_eq!(cursor, EditorCursor::new(1, 1));
    }

    #[test]
    fn test_home_and_end() {
        assert_eq!(edit("abc", 0, 1, Home).1, EditorCursor::new(0, 0));
        assert_eq!(edit("abc", 0, 1, End).1, EditorCursor::new(0, 3));
    }

    #[test]
    fn test_out_of_range_cursor_is_clamped_before_editing() {
        let (code, cursor) = edit("ab\ncd", 9, 9, Char('!'));
        assert_eq!(code.as_deref(), Some("ab\ncd!"));
        assert_eq!(cursor, EditorCursor::new(1, 3));
    }

    #[test]
    fn test_visible_scroll_follows_cursor() {
        assert_eq!(visible_scroll(0, 3, 10), 0);
        assert_eq!(visible_scroll(0, 12, 10), 3);
        assert_eq!(visible_scroll(5, 2, 10), 2);
        assert_eq!(visible_scroll(5, 7, 0), 5);
    }
}
