// Emphasis resolution: the delimiter-run pairing pass
//
// Delimiters are walked left to right. Each closer looks back for the
// nearest compatible opener (same character, able to open). A pair with
// two or more characters remaining on each side consumes two and becomes
// `Strong`; otherwise it consumes one and becomes `Emphasis`.
//
// When both runs still have characters left after a match, the leftovers
// sit against the interior and pair inside the wrapper, which is what
// makes `***foo***` nest as Strong(Emphasis(..)) and `****foo****` as
// Strong(Strong(..)). A one-sided leftover stays outside and may pair
// again. Whatever never pairs is emitted as literal text.

use crate::grammar::inlines::DelimiterRun;
use crate::parser::ast::Inline;
use crate::parser::error::ParseError;
use crate::parser::inline_parser::coalesce;
use crate::parser::inlines::{Token, TokenKind};
use crate::parser::options::ParseOptions;

pub(crate) fn resolve(
    mut tokens: Vec<Token>,
    options: &ParseOptions,
    depth: usize,
) -> Result<Vec<Token>, ParseError> {
    if depth >= options.max_depth {
        return Err(ParseError::NestingLimit {
            limit: options.max_depth,
        });
    }

    let mut j = 0;
    while j < tokens.len() {
        let closer = match tokens[j].kind {
            TokenKind::Delimiter(run) if run.can_close && run.length > 0 => run,
            _ => {
                j += 1;
                continue;
            }
        };

        let opener_index = tokens[..j].iter().rposition(|t| {
            matches!(
                t.kind,
                TokenKind::Delimiter(o) if o.can_open && o.length > 0 && o.ch == closer.ch
            )
        });
        let Some(k) = opener_index else {
            if !closer.can_open {
                // Never going to participate; spell it out
                tokens[j].kind = TokenKind::Text(literal_run(&closer));
            }
            j += 1;
            continue;
        };

        let opener = match tokens[k].kind {
            TokenKind::Delimiter(o) => o,
            _ => unreachable!("rposition matched a delimiter"),
        };

        let take = if opener.length >= 2 && closer.length >= 2 { 2 } else { 1 };
        let opener_rest = opener.length - take;
        let closer_rest = closer.length - take;

        let mut interior: Vec<Token> = tokens.drain(k + 1..j).collect();
        // After the drain the opener sits at k and the closer at k + 1

        let both_leftover = opener_rest > 0 && closer_rest > 0;
        if both_leftover {
            // Symmetric leftovers are adjacent to the interior on both
            // sides; they resolve inside the wrapper
            let opener_leftover = Token {
                start: tokens[k].start,
                end: tokens[k].start + opener_rest,
                kind: TokenKind::Delimiter(DelimiterRun {
                    length: opener_rest,
                    ..opener
                }),
            };
            let closer_leftover = Token {
                start: tokens[k + 1].start,
                end: tokens[k + 1].start + closer_rest,
                kind: TokenKind::Delimiter(DelimiterRun {
                    length: closer_rest,
                    ..closer
                }),
            };
            let mut inner = Vec::with_capacity(interior.len() + 2);
            inner.push(opener_leftover);
            inner.append(&mut interior);
            inner.push(closer_leftover);
            interior = inner;
        }

        let children = coalesce(resolve(interior, options, depth + 1)?);
        let node = if take == 2 {
            Inline::Strong(children)
        } else {
            Inline::Emphasis(children)
        };
        let wrapper = Token::resolved(tokens[k].start, tokens[k + 1].end, node);

        if both_leftover || (opener_rest == 0 && closer_rest == 0) {
            tokens.splice(k..=k + 1, [wrapper]);
            j = k + 1;
        } else if opener_rest > 0 {
            tokens[k].kind = TokenKind::Delimiter(DelimiterRun {
                length: opener_rest,
                ..opener
            });
            tokens[k + 1] = wrapper;
            j = k + 2;
        } else {
            // The closer keeps its remainder and may close an earlier
            // opener on the next round
            tokens[k] = wrapper;
            tokens[k + 1].kind = TokenKind::Delimiter(DelimiterRun {
                length: closer_rest,
                ..closer
            });
            j = k + 1;
        }
    }

    // Unpaired delimiters are literal text
    for token in &mut tokens {
        if let TokenKind::Delimiter(run) = token.kind {
            token.kind = TokenKind::Text(literal_run(&run));
        }
    }

    Ok(tokens)
}

fn literal_run(run: &DelimiterRun) -> String {
    run.ch.to_string().repeat(run.length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::inline_parser::scan;

    fn resolved(src: &str) -> Vec<Inline> {
        let tokens = scan(src);
        coalesce(resolve(tokens, &ParseOptions::default(), 0).unwrap())
    }

    #[test]
    fn smoke_test_simple_emphasis() {
        assert_eq!(
            resolved("*foo*"),
            vec![Inline::Emphasis(vec![Inline::Text("foo".into())])]
        );
    }

    #[test]
    fn smoke_test_simple_strong() {
        assert_eq!(
            resolved("**foo**"),
            vec![Inline::Strong(vec![Inline::Text("foo".into())])]
        );
    }

    #[test]
    fn smoke_test_underscore_forms() {
        assert_eq!(
            resolved("_foo_"),
            vec![Inline::Emphasis(vec![Inline::Text("foo".into())])]
        );
        assert_eq!(
            resolved("__foo__"),
            vec![Inline::Strong(vec![Inline::Text("foo".into())])]
        );
    }

    #[test]
    fn smoke_test_nested_emphasis_in_strong() {
        assert_eq!(
            resolved("**a *b* c**"),
            vec![Inline::Strong(vec![
                Inline::Text("a ".into()),
                Inline::Emphasis(vec![Inline::Text("b".into())]),
                Inline::Text(" c".into()),
            ])]
        );
    }

    #[test]
    fn smoke_test_triple_run_nests_strong_emphasis() {
        assert_eq!(
            resolved("***foo***"),
            vec![Inline::Strong(vec![Inline::Emphasis(vec![Inline::Text(
                "foo".into()
            )])])]
        );
    }

    #[test]
    fn smoke_test_triple_opener_double_closer() {
        // ***foo** keeps the extra opener character as text
        assert_eq!(
            resolved("***foo**"),
            vec![
                Inline::Text("*".into()),
                Inline::Strong(vec![Inline::Text("foo".into())]),
            ]
        );
    }

    #[test]
    fn smoke_test_adjacent_pairs() {
        assert_eq!(
            resolved("*a* and *b*"),
            vec![
                Inline::Emphasis(vec![Inline::Text("a".into())]),
                Inline::Text(" and ".into()),
                Inline::Emphasis(vec![Inline::Text("b".into())]),
            ]
        );
    }

    #[test]
    fn smoke_test_whitespace_bound_run_is_literal() {
        assert_eq!(resolved("a * b * c"), vec![Inline::Text("a * b * c".into())]);
    }
}
