// Code span resolution
//
// The leftmost backtick run seeks the next run of identical length; the
// raw source between them becomes a `CodeSpan` and every fragment it
// covered disappears. Runs without a matching closer fall back to literal
// text. Escapes never apply inside code spans because the interior is
// sliced from the source, not from decoded fragments.

use crate::parser::ast::Inline;
use crate::parser::inlines::{Token, TokenKind};

pub(crate) fn resolve(tokens: &mut Vec<Token>, src: &str) {
    let mut i = 0;
    while i < tokens.len() {
        let n = match tokens[i].kind {
            TokenKind::Backticks(n) => n,
            _ => {
                i += 1;
                continue;
            }
        };

        let closer = tokens[i + 1..]
            .iter()
            .position(|t| matches!(t.kind, TokenKind::Backticks(m) if m == n))
            .map(|p| p + i + 1);

        match closer {
            Some(j) => {
                let interior = &src[tokens[i].end..tokens[j].start];
                // Line endings count as spaces inside a code span
                let mut content = interior.replace('\n', " ");
                // One space is stripped from each side when both are
                // present and the interior is not all spaces
                if content.len() >= 2
                    && content.starts_with(' ')
                    && content.ends_with(' ')
                    && !content.chars().all(|c| c == ' ')
                {
                    content = content[1..content.len() - 1].to_string();
                }

                let (start, end) = (tokens[i].start, tokens[j].end);
                tokens.splice(i..=j, [Token::resolved(start, end, Inline::CodeSpan(content))]);
                i += 1;
            }
            None => {
                tokens[i].kind = TokenKind::Text("`".repeat(n));
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::inline_parser::{coalesce, scan};

    fn resolved(src: &str) -> Vec<Inline> {
        let mut tokens = scan(src);
        resolve(&mut tokens, src);
        coalesce(tokens)
    }

    #[test]
    fn smoke_test_code_span_basic() {
        assert_eq!(
            resolved("`code`"),
            vec![Inline::CodeSpan("code".into())]
        );
    }

    #[test]
    fn smoke_test_code_span_double_backticks_hold_single() {
        assert_eq!(
            resolved("``a ` b``"),
            vec![Inline::CodeSpan("a ` b".into())]
        );
    }

    #[test]
    fn smoke_test_code_span_space_stripping() {
        assert_eq!(resolved("` code `"), vec![Inline::CodeSpan("code".into())]);
        // Only one space per side comes off
        assert_eq!(
            resolved("`  code  `"),
            vec![Inline::CodeSpan(" code ".into())]
        );
        // All-space interiors keep their spaces
        assert_eq!(resolved("` `"), vec![Inline::CodeSpan(" ".into())]);
    }

    #[test]
    fn smoke_test_code_span_one_sided_space_kept() {
        assert_eq!(resolved("` code`"), vec![Inline::CodeSpan(" code".into())]);
    }

    #[test]
    fn smoke_test_code_span_newline_becomes_space() {
        assert_eq!(resolved("`a\nb`"), vec![Inline::CodeSpan("a b".into())]);
    }

    #[test]
    fn smoke_test_code_span_escapes_not_applied() {
        assert_eq!(resolved("`\\*`"), vec![Inline::CodeSpan("\\*".into())]);
    }

    #[test]
    fn smoke_test_unmatched_backticks_are_literal() {
        assert_eq!(resolved("`open"), vec![Inline::Text("`open".into())]);
        assert_eq!(resolved("a `` b ` c"), vec![Inline::Text("a `` b ` c".into())]);
    }
}
