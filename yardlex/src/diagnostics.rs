//! Caret diagnostics for tokenizer errors
//!
//! ```text
//! error[E020]: Syntax error at 00002 : 003
//!   --> 2:3
//!    |
//!  2 | c @ d
//!    |   ^
//! ```

use crate::tokenizer::SyntaxError;
use crate::utils::Span;

/// Render `error` against the lines it was raised on.
///
/// Errors without a position, or whose line is not in `lines`, render as
/// the header alone.
pub fn render<S: AsRef<str>>(lines: &[S], error: &SyntaxError) -> String {
    let header = format!("error[{}]: {}", error.error_code(), error.message());

    let Some(line_index) = error.line() else {
        return header + "\n";
    };
    let Some(line) = lines.get(line_index).map(AsRef::as_ref) else {
        return header + "\n";
    };

    let span = match (error, error.column()) {
        (SyntaxError::DanglingToken { .. }, Some(column)) => {
            Span::on_line(line_index, boundary(line, column), line.len())
        }
        (_, Some(column)) => {
            let column = boundary(line, column);
            let width = line[column..].chars().next().map_or(1, char::len_utf8);
            Span::on_line(line_index, column, column + width)
        }
        (_, None) => Span::on_line(line_index, 0, 0),
    };

    render_span(&header, line, span, error.column().is_some())
}

/// Render `header` with the line of `span` and carets underneath
pub fn render_span(header: &str, line: &str, span: Span, underline: bool) -> String {
    let mut result = String::new();
    let number = span.start.display_line().to_string();
    let padding = " ".repeat(number.len());

    result.push_str(header);
    result.push('\n');
    if underline {
        result.push_str(&format!("{}--> {}\n", padding, span.start));
    } else {
        result.push_str(&format!("{}--> line {}\n", padding, number));
    }
    result.push_str(&format!("{} |\n", padding));
    result.push_str(&format!("{} | {}\n", number, line));

    if underline {
        let start = char_offset(line, span.start.column);
        let end = if span.is_multiline() {
            line.chars().count()
        } else {
            char_offset(line, span.end.column)
        };

        result.push_str(&format!("{} | ", padding));
        result.push_str(&" ".repeat(start));
        result.push_str(&"^".repeat(end.saturating_sub(start).max(1)));
        result.push('\n');
    }

    result
}

/// Byte `column` clamped to the line and moved back onto a char boundary
fn boundary(line: &str, column: usize) -> usize {
    let mut column = column.min(line.len());
    while !line.is_char_boundary(column) {
        column -= 1;
    }
    column
}

/// Characters before byte `column`, clamped to the line
fn char_offset(line: &str, column: usize) -> usize {
    line[..boundary(line, column)].chars().count()
}
