// Emphasis delimiter runs and the left/right-flanking rule
//
// A run of `*` or `_` may open and/or close emphasis depending on what
// surrounds it (CommonMark 6.2). `_` additionally refuses intraword
// emphasis. Start and end of the string count as whitespace.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterRun {
    pub ch: char,
    pub length: usize,
    pub can_open: bool,
    pub can_close: bool,
}

/// Classify a delimiter run from the characters adjacent to it in the
/// source. `before`/`after` are `None` at the string boundaries.
pub fn classify_delimiter_run(
    before: Option<char>,
    ch: char,
    length: usize,
    after: Option<char>,
) -> DelimiterRun {
    let before_ws = before.map_or(true, |c| c.is_whitespace());
    let after_ws = after.map_or(true, |c| c.is_whitespace());
    let before_punct = before.is_some_and(|c| c.is_ascii_punctuation());
    let after_punct = after.is_some_and(|c| c.is_ascii_punctuation());

    let left_flanking = !after_ws && (!after_punct || before_ws || before_punct);
    let right_flanking = !before_ws && (!before_punct || after_ws || after_punct);

    let (can_open, can_close) = if ch == '_' {
        (
            left_flanking && (!right_flanking || before_punct),
            right_flanking && (!left_flanking || after_punct),
        )
    } else {
        (left_flanking, right_flanking)
    };

    DelimiterRun { ch, length, can_open, can_close }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_run_at_word_start_opens() {
        let run = classify_delimiter_run(Some(' '), '*', 1, Some('w'));
        assert!(run.can_open);
        assert!(!run.can_close);
    }

    #[test]
    fn smoke_test_run_at_word_end_closes() {
        let run = classify_delimiter_run(Some('d'), '*', 1, None);
        assert!(!run.can_open);
        assert!(run.can_close);
    }

    #[test]
    fn smoke_test_star_intraword_opens_and_closes() {
        let run = classify_delimiter_run(Some('o'), '*', 1, Some('b'));
        assert!(run.can_open);
        assert!(run.can_close);
    }

    #[test]
    fn smoke_test_underscore_intraword_is_inert() {
        let run = classify_delimiter_run(Some('o'), '_', 1, Some('b'));
        assert!(!run.can_open);
        assert!(!run.can_close);
    }

    #[test]
    fn smoke_test_underscore_at_word_boundaries() {
        let open = classify_delimiter_run(None, '_', 1, Some('w'));
        assert!(open.can_open);
        let close = classify_delimiter_run(Some('d'), '_', 1, Some(' '));
        assert!(close.can_close);
    }

    #[test]
    fn smoke_test_run_surrounded_by_whitespace_is_inert() {
        let run = classify_delimiter_run(Some(' '), '*', 2, Some(' '));
        assert!(!run.can_open);
        assert!(!run.can_close);
    }

    #[test]
    fn smoke_test_punctuation_flanking() {
        // "*(x)*" - opener before punctuation, preceded by start of line
        let run = classify_delimiter_run(None, '*', 1, Some('('));
        assert!(run.can_open);
    }
}
