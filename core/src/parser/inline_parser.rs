// Inline-level parser: second stage of two-stage parsing
//
// Tokenizes a paragraph/heading body against the frozen link reference
// table. Conceptually five passes: scan into fragments, resolve code
// spans, resolve links and images, resolve emphasis, coalesce text.

use crate::grammar::inlines::{autolink, backslash_escape, classify_delimiter_run, inline_html};
use crate::parser::ast::Inline;
use crate::parser::block_parser::html_node;
use crate::parser::error::ParseError;
use crate::parser::inlines::{code_span, emphasis, link, Token, TokenKind};
use crate::parser::options::ParseOptions;
use crate::parser::raw_block::LinkTable;

/// Tokenize one inline body into its inline sequence.
pub(crate) fn tokenize(
    src: &str,
    table: &LinkTable,
    options: &ParseOptions,
    depth: usize,
) -> Result<Vec<Inline>, ParseError> {
    if depth >= options.max_depth {
        return Err(ParseError::NestingLimit {
            limit: options.max_depth,
        });
    }

    log::debug!(
        "Inline tokenizer input: {:?}",
        crate::logging::safe_preview(src, 40)
    );

    let mut tokens = scan(src);
    code_span::resolve(&mut tokens, src);
    link::resolve(&mut tokens, src, table, options, depth)?;
    finish_tokens(tokens, options, depth)
}

/// Run the emphasis pass over an already link-resolved token list and
/// coalesce the result. Link interiors re-enter here.
pub(crate) fn finish_tokens(
    tokens: Vec<Token>,
    options: &ParseOptions,
    depth: usize,
) -> Result<Vec<Inline>, ParseError> {
    let tokens = emphasis::resolve(tokens, options, depth)?;
    Ok(coalesce(tokens))
}

/// Scanning pass: split the body into tagged fragments.
pub(crate) fn scan(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut literal_start = 0usize;
    let mut i = 0usize;

    while i < src.len() {
        let rest = &src[i..];
        let c = rest.chars().next().expect("offset is char-aligned");
        match c {
            '\\' => {
                if rest[1..].starts_with('\n') {
                    // Backslash at end of line is a hard break
                    flush(&mut tokens, &mut literal, literal_start, i);
                    tokens.push(Token {
                        start: i,
                        end: i + 2,
                        kind: TokenKind::HardBreak,
                    });
                    i += 2;
                    literal_start = i;
                } else if let Ok((rem, escaped)) = backslash_escape(rest) {
                    // Escaped ASCII punctuation is the literal character
                    if literal.is_empty() {
                        literal_start = i;
                    }
                    literal.push(escaped);
                    i += rest.len() - rem.len();
                } else {
                    if literal.is_empty() {
                        literal_start = i;
                    }
                    literal.push('\\');
                    i += 1;
                }
            }
            '`' => {
                flush(&mut tokens, &mut literal, literal_start, i);
                let n = rest.chars().take_while(|&x| x == '`').count();
                tokens.push(Token {
                    start: i,
                    end: i + n,
                    kind: TokenKind::Backticks(n),
                });
                i += n;
                literal_start = i;
            }
            '*' | '_' => {
                flush(&mut tokens, &mut literal, literal_start, i);
                let n = rest.chars().take_while(|&x| x == c).count();
                let before = src[..i].chars().next_back();
                let after = src[i + n..].chars().next();
                let run = classify_delimiter_run(before, c, n, after);
                tokens.push(Token {
                    start: i,
                    end: i + n,
                    kind: TokenKind::Delimiter(run),
                });
                i += n;
                literal_start = i;
            }
            '[' => {
                flush(&mut tokens, &mut literal, literal_start, i);
                tokens.push(Token {
                    start: i,
                    end: i + 1,
                    kind: TokenKind::OpenBracket {
                        image: false,
                        active: true,
                    },
                });
                i += 1;
                literal_start = i;
            }
            ']' => {
                flush(&mut tokens, &mut literal, literal_start, i);
                tokens.push(Token {
                    start: i,
                    end: i + 1,
                    kind: TokenKind::CloseBracket,
                });
                i += 1;
                literal_start = i;
            }
            '!' => {
                if rest.as_bytes().get(1) == Some(&b'[') {
                    flush(&mut tokens, &mut literal, literal_start, i);
                    tokens.push(Token {
                        start: i,
                        end: i + 2,
                        kind: TokenKind::OpenBracket {
                            image: true,
                            active: true,
                        },
                    });
                    i += 2;
                    literal_start = i;
                } else {
                    if literal.is_empty() {
                        literal_start = i;
                    }
                    literal.push('!');
                    i += 1;
                }
            }
            // Parentheses are kept as their own fragments so link
            // destination suffixes stay token-aligned
            '(' | ')' => {
                flush(&mut tokens, &mut literal, literal_start, i);
                tokens.push(Token {
                    start: i,
                    end: i + 1,
                    kind: TokenKind::Text(c.to_string()),
                });
                i += 1;
                literal_start = i;
            }
            '<' => {
                if let Ok((rem, auto)) = autolink(rest) {
                    let consumed = rest.len() - rem.len();
                    flush(&mut tokens, &mut literal, literal_start, i);
                    let destination = if auto.email {
                        format!("mailto:{}", auto.uri)
                    } else {
                        auto.uri.to_string()
                    };
                    tokens.push(Token::resolved(
                        i,
                        i + consumed,
                        Inline::Link {
                            destination,
                            title: None,
                            inlines: vec![Inline::Text(auto.uri.to_string())],
                        },
                    ));
                    i += consumed;
                    literal_start = i;
                } else if let Ok((rem, (kind, raw))) = inline_html(rest) {
                    let consumed = rest.len() - rem.len();
                    flush(&mut tokens, &mut literal, literal_start, i);
                    tokens.push(Token::resolved(
                        i,
                        i + consumed,
                        Inline::Html(html_node(kind, raw)),
                    ));
                    i += consumed;
                    literal_start = i;
                } else {
                    if literal.is_empty() {
                        literal_start = i;
                    }
                    literal.push('<');
                    i += 1;
                }
            }
            '\n' => {
                // Trailing whitespace never survives a line end; two or
                // more trailing spaces make the break hard
                let trailing_spaces = literal.chars().rev().take_while(|&x| x == ' ').count();
                let trailing_ws = literal
                    .chars()
                    .rev()
                    .take_while(|&x| x == ' ' || x == '\t')
                    .count();
                literal.truncate(literal.len() - trailing_ws);

                if trailing_spaces >= 2 {
                    flush(&mut tokens, &mut literal, literal_start, i);
                    tokens.push(Token {
                        start: i,
                        end: i + 1,
                        kind: TokenKind::HardBreak,
                    });
                } else {
                    if literal.is_empty() {
                        literal_start = i;
                    }
                    literal.push('\n');
                }
                i += 1;
            }
            _ => {
                if literal.is_empty() {
                    literal_start = i;
                }
                let next_special = rest
                    .find(['\\', '`', '*', '_', '[', ']', '!', '(', ')', '<', '\n'])
                    .unwrap_or(rest.len());
                literal.push_str(&rest[..next_special]);
                i += next_special;
            }
        }
    }

    flush(&mut tokens, &mut literal, literal_start, src.len());
    tokens
}

fn flush(tokens: &mut Vec<Token>, literal: &mut String, start: usize, end: usize) {
    if !literal.is_empty() {
        tokens.push(Token {
            start,
            end,
            kind: TokenKind::Text(std::mem::take(literal)),
        });
    }
}

/// Coalescence pass: adjacent text fragments merge; leftover delimiters
/// and brackets fall back to their literal spelling.
pub(crate) fn coalesce(tokens: Vec<Token>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut text = String::new();

    for token in tokens {
        match token.kind {
            TokenKind::Text(s) => text.push_str(&s),
            TokenKind::Backticks(n) => text.push_str(&"`".repeat(n)),
            TokenKind::Delimiter(run) => {
                for _ in 0..run.length {
                    text.push(run.ch);
                }
            }
            TokenKind::OpenBracket { image, .. } => text.push_str(if image { "![" } else { "[" }),
            TokenKind::CloseBracket => text.push(']'),
            TokenKind::HardBreak => {
                flush_text(&mut inlines, &mut text);
                inlines.push(Inline::HardLineBreak);
            }
            TokenKind::Resolved(inline) => {
                flush_text(&mut inlines, &mut text);
                inlines.push(inline);
            }
        }
    }

    flush_text(&mut inlines, &mut text);
    inlines
}

fn flush_text(inlines: &mut Vec<Inline>, text: &mut String) {
    if !text.is_empty() {
        inlines.push(Inline::Text(std::mem::take(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::HtmlNode;

    fn inlines(src: &str) -> Vec<Inline> {
        tokenize(src, &LinkTable::default(), &ParseOptions::default(), 0)
            .expect("inline pass failed")
    }

    #[test]
    fn smoke_test_plain_text() {
        assert_eq!(inlines("just text"), vec![Inline::Text("just text".into())]);
    }

    #[test]
    fn smoke_test_soft_break_preserved_as_newline() {
        assert_eq!(inlines("a\nb"), vec![Inline::Text("a\nb".into())]);
    }

    #[test]
    fn smoke_test_emphasis_and_strong() {
        assert_eq!(
            inlines("an *em* and **strong** word"),
            vec![
                Inline::Text("an ".into()),
                Inline::Emphasis(vec![Inline::Text("em".into())]),
                Inline::Text(" and ".into()),
                Inline::Strong(vec![Inline::Text("strong".into())]),
                Inline::Text(" word".into()),
            ]
        );
    }

    #[test]
    fn smoke_test_emphasis_rule_of_three() {
        assert_eq!(
            inlines("***foo***"),
            vec![Inline::Strong(vec![Inline::Emphasis(vec![Inline::Text(
                "foo".into()
            )])])]
        );
    }

    #[test]
    fn smoke_test_four_star_run_nests_strong() {
        assert_eq!(
            inlines("****foo****"),
            vec![Inline::Strong(vec![Inline::Strong(vec![Inline::Text(
                "foo".into()
            )])])]
        );
    }

    #[test]
    fn smoke_test_unpaired_delimiters_stay_literal() {
        assert_eq!(inlines("a * b"), vec![Inline::Text("a * b".into())]);
        assert_eq!(
            inlines("**foo*"),
            vec![
                Inline::Text("*".into()),
                Inline::Emphasis(vec![Inline::Text("foo".into())]),
            ]
        );
    }

    #[test]
    fn smoke_test_underscore_intraword_stays_literal() {
        assert_eq!(
            inlines("foo_bar_baz"),
            vec![Inline::Text("foo_bar_baz".into())]
        );
    }

    #[test]
    fn smoke_test_code_span() {
        assert_eq!(
            inlines("run `cargo test` now"),
            vec![
                Inline::Text("run ".into()),
                Inline::CodeSpan("cargo test".into()),
                Inline::Text(" now".into()),
            ]
        );
    }

    #[test]
    fn smoke_test_code_span_protects_delimiters() {
        assert_eq!(
            inlines("`*not em*`"),
            vec![Inline::CodeSpan("*not em*".into())]
        );
    }

    #[test]
    fn smoke_test_escapes() {
        assert_eq!(inlines("\\*not em\\*"), vec![Inline::Text("*not em*".into())]);
        assert_eq!(inlines("a \\\\ b"), vec![Inline::Text("a \\ b".into())]);
        assert_eq!(inlines("\\a"), vec![Inline::Text("\\a".into())]);
    }

    #[test]
    fn smoke_test_hard_break_two_spaces() {
        assert_eq!(
            inlines("line  \nnext"),
            vec![
                Inline::Text("line".into()),
                Inline::HardLineBreak,
                Inline::Text("next".into()),
            ]
        );
    }

    #[test]
    fn smoke_test_hard_break_backslash() {
        assert_eq!(
            inlines("line\\\nnext"),
            vec![
                Inline::Text("line".into()),
                Inline::HardLineBreak,
                Inline::Text("next".into()),
            ]
        );
    }

    #[test]
    fn smoke_test_single_trailing_space_stripped() {
        assert_eq!(inlines("line \nnext"), vec![Inline::Text("line\nnext".into())]);
    }

    #[test]
    fn smoke_test_autolink() {
        assert_eq!(
            inlines("<https://example.com>"),
            vec![Inline::Link {
                destination: "https://example.com".into(),
                title: None,
                inlines: vec![Inline::Text("https://example.com".into())],
            }]
        );
    }

    #[test]
    fn smoke_test_email_autolink() {
        assert_eq!(
            inlines("<user@example.com>"),
            vec![Inline::Link {
                destination: "mailto:user@example.com".into(),
                title: None,
                inlines: vec![Inline::Text("user@example.com".into())],
            }]
        );
    }

    #[test]
    fn smoke_test_inline_html() {
        assert_eq!(
            inlines("a <b>bold</b> word"),
            vec![
                Inline::Text("a ".into()),
                Inline::Html(HtmlNode::Element("<b>".into())),
                Inline::Text("bold".into()),
                Inline::Html(HtmlNode::Element("</b>".into())),
                Inline::Text(" word".into()),
            ]
        );
    }

    #[test]
    fn smoke_test_inline_link() {
        assert_eq!(
            inlines("[text](/url \"title\")"),
            vec![Inline::Link {
                destination: "/url".into(),
                title: Some("title".into()),
                inlines: vec![Inline::Text("text".into())],
            }]
        );
    }

    #[test]
    fn smoke_test_image() {
        assert_eq!(
            inlines("![alt](/img.png)"),
            vec![Inline::Image {
                source: "/img.png".into(),
                title: None,
                alt: vec![Inline::Text("alt".into())],
            }]
        );
    }

    #[test]
    fn smoke_test_emphasis_inside_link_text() {
        assert_eq!(
            inlines("[a *b*](/u)"),
            vec![Inline::Link {
                destination: "/u".into(),
                title: None,
                inlines: vec![
                    Inline::Text("a ".into()),
                    Inline::Emphasis(vec![Inline::Text("b".into())]),
                ],
            }]
        );
    }

    #[test]
    fn smoke_test_unresolved_brackets_stay_literal() {
        assert_eq!(inlines("[not a link]"), vec![Inline::Text("[not a link]".into())]);
        assert_eq!(inlines("a ] b"), vec![Inline::Text("a ] b".into())]);
    }

    #[test]
    fn smoke_test_nesting_limit_on_deep_emphasis() {
        let pathological = format!("{}x{}", "*".repeat(600), "*".repeat(600));
        let result = tokenize(
            &pathological,
            &LinkTable::default(),
            &ParseOptions::default(),
            0,
        );
        assert_eq!(result, Err(ParseError::NestingLimit { limit: 128 }));
    }
}
