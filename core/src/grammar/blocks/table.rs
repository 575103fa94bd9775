// GFM pipe table grammar (header only)
//
// Recognizes a header row followed by a delimiter row. Body rows are
// deferred: they are left in the input for later blocks. Detection is
// intentionally conservative:
// - both rows must contain at least one unescaped `|`;
// - the delimiter row cells must be `:?-+:?`;
// - the header and delimiter cell counts must match.

use crate::grammar::shared::Span;
use nom::character::complete::{char, line_ending, not_line_ending};
use nom::combinator::opt;
use nom::IResult;
use nom::Slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    None,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn<'a> {
    pub text: Span<'a>,
    pub align: ColumnAlign,
}

/// Parse a table header: the header row plus its delimiter row.
pub fn table_header(input: Span) -> IResult<Span, Vec<TableColumn>> {
    let fail = |at| nom::Err::Error(nom::error::Error::new(at, nom::error::ErrorKind::Tag));

    // Header line
    let (after_header, header_line) = not_line_ending(input)?;
    if header_line.fragment().trim().is_empty()
        || count_unescaped_pipes(header_line.fragment()) == 0
    {
        return Err(fail(input));
    }

    // A delimiter row must follow on the next line
    let (after_newline, _) = line_ending(after_header)?;
    let (after_delimiter, delimiter_line) = not_line_ending(after_newline)?;
    if count_unescaped_pipes(delimiter_line.fragment()) == 0
        || !delimiter_line.fragment().contains('-')
    {
        return Err(fail(input));
    }

    let header_cells = split_pipe_row_cells(header_line);
    let delimiter_cells = split_pipe_row_cells(delimiter_line);
    if header_cells.is_empty() || header_cells.len() != delimiter_cells.len() {
        return Err(fail(input));
    }

    let mut columns = Vec::with_capacity(header_cells.len());
    for (text, delimiter) in header_cells.into_iter().zip(&delimiter_cells) {
        let align = match delimiter_alignment(delimiter.fragment()) {
            Some(align) => align,
            None => return Err(fail(input)),
        };
        columns.push(TableColumn { text, align });
    }

    // Consume the newline after the delimiter row; body rows stay behind.
    let (remaining, _) = opt(char('\n'))(after_delimiter)?;

    log::debug!("Table header with {} columns", columns.len());
    Ok((remaining, columns))
}

/// Split a table row into trimmed cell spans.
///
/// Leading/trailing `|` are optional and do not create extra columns, and
/// `\|` does not act as a delimiter.
fn split_pipe_row_cells(line: Span) -> Vec<Span> {
    let trimmed_line = trim_ws_span(line);

    let fragment = trimmed_line.fragment();
    let has_leading_pipe = fragment.starts_with('|');
    let has_trailing_pipe = fragment.ends_with('|');

    let bytes = fragment.as_bytes();
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    let mut start = 0;
    let mut backslash_run = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'|' {
            if backslash_run % 2 == 0 {
                ranges.push((start, i));
                start = i + 1;
            }
            backslash_run = 0;
            continue;
        }
        if b == b'\\' {
            backslash_run += 1;
        } else {
            backslash_run = 0;
        }
    }
    ranges.push((start, bytes.len()));

    let mut cells: Vec<Span> = ranges
        .into_iter()
        .map(|(s, e)| trimmed_line.slice(s..e.max(s)))
        .collect();

    // Drop the empty cells created by optional outer pipes
    if has_leading_pipe && cells.first().is_some_and(|c| c.fragment().is_empty()) {
        cells.remove(0);
    }
    if has_trailing_pipe && cells.last().is_some_and(|c| c.fragment().is_empty()) {
        cells.pop();
    }

    cells.into_iter().map(trim_ws_span).collect()
}

/// Count `|` characters not preceded by an odd number of backslashes.
fn count_unescaped_pipes(fragment: &str) -> usize {
    let mut count = 0usize;
    let mut backslash_run = 0usize;
    for b in fragment.bytes() {
        if b == b'|' {
            if backslash_run % 2 == 0 {
                count += 1;
            }
            backslash_run = 0;
            continue;
        }
        if b == b'\\' {
            backslash_run += 1;
        } else {
            backslash_run = 0;
        }
    }
    count
}

fn trim_ws_span(span: Span) -> Span {
    let s = span.fragment();
    let leading = s.bytes().take_while(|b| *b == b' ' || *b == b'\t').count();
    let trailing = s
        .bytes()
        .rev()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();

    let start = leading.min(s.len());
    let end = s.len().saturating_sub(trailing).max(start);
    span.slice(start..end)
}

/// `---` / `:---` / `---:` / `:---:`, at least one hyphen.
fn delimiter_alignment(cell: &str) -> Option<ColumnAlign> {
    let cell = cell.trim_matches([' ', '\t']);
    if cell.is_empty() {
        return None;
    }

    let left_colon = cell.starts_with(':');
    let right_colon = cell.len() > left_colon as usize && cell.ends_with(':');

    let core = &cell[left_colon as usize..cell.len() - right_colon as usize];
    if core.is_empty() || !core.chars().all(|c| c == '-') {
        return None;
    }

    Some(match (left_colon, right_colon) {
        (true, true) => ColumnAlign::Center,
        (true, false) => ColumnAlign::Left,
        (false, true) => ColumnAlign::Right,
        (false, false) => ColumnAlign::None,
    })
}
