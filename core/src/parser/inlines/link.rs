// Link and image resolution
//
// Walks the token list left to right. Each `]` tries to close the nearest
// `[`/`![` opener: first the inline form `](dest "title")`, then the full
// and collapsed reference forms `][label]`/`[]`, then the shortcut form
// where the bracket's own text is the label. Reference lookups normalize
// the label against the frozen definition table.
//
// A successful link deactivates every earlier `[` opener, so links never
// nest; images leave them active. Suffix text is parsed straight from the
// source and the tokens it covered are dropped by offset.

use crate::grammar::inlines::{inline_suffix, reference_suffix};
use crate::parser::ast::Inline;
use crate::parser::error::ParseError;
use crate::parser::inline_parser::finish_tokens;
use crate::parser::inlines::{Token, TokenKind};
use crate::parser::options::ParseOptions;
use crate::parser::raw_block::LinkTable;

pub(crate) fn resolve(
    tokens: &mut Vec<Token>,
    src: &str,
    table: &LinkTable,
    options: &ParseOptions,
    depth: usize,
) -> Result<(), ParseError> {
    let mut i = 0;
    while i < tokens.len() {
        if !matches!(tokens[i].kind, TokenKind::CloseBracket) {
            i += 1;
            continue;
        }

        let Some(k) = tokens[..i]
            .iter()
            .rposition(|t| matches!(t.kind, TokenKind::OpenBracket { .. }))
        else {
            tokens[i].kind = TokenKind::Text("]".into());
            i += 1;
            continue;
        };

        let (image, active) = match tokens[k].kind {
            TokenKind::OpenBracket { image, active } => (image, active),
            _ => unreachable!("rposition matched an open bracket"),
        };

        if !active {
            demote(tokens, k, i);
            i += 1;
            continue;
        }

        let interior_label = &src[tokens[k].end..tokens[i].start];
        let suffix = &src[tokens[i].end..];

        // Inline, then full/collapsed reference, then shortcut
        let mut target: Option<(String, Option<String>, usize)> = None;
        if let Ok((rest, (destination, title))) = inline_suffix(suffix) {
            target = Some((destination, title, suffix.len() - rest.len()));
        } else if let Ok((rest, label)) = reference_suffix(suffix) {
            let explicit = label.is_some();
            let label = label.unwrap_or(interior_label);
            match table.lookup(label) {
                Some((destination, title)) => {
                    target = Some((
                        destination.clone(),
                        title.clone(),
                        suffix.len() - rest.len(),
                    ));
                }
                None if explicit && options.strict_references => {
                    return Err(ParseError::Inline {
                        row: src[..tokens[i].start].matches('\n').count() + 1,
                        message: format!("undefined link reference [{}]", label),
                    });
                }
                None => {}
            }
        }
        if target.is_none() {
            if let Some((destination, title)) = table.lookup(interior_label) {
                target = Some((destination.clone(), title.clone(), 0));
            }
        }

        let Some((destination, title, consumed)) = target else {
            demote(tokens, k, i);
            i += 1;
            continue;
        };

        // Drop every token the suffix covered
        let end_offset = tokens[i].end + consumed;
        let mut suffix_end = i + 1;
        while suffix_end < tokens.len() && tokens[suffix_end].start < end_offset {
            suffix_end += 1;
        }

        // The bracket's text becomes a recursive inline parse
        let interior: Vec<Token> = tokens[k + 1..i].to_vec();
        let children = finish_tokens(interior, options, depth + 1)?;

        let inline = if image {
            Inline::Image {
                source: destination,
                title,
                alt: children,
            }
        } else {
            Inline::Link {
                destination,
                title,
                inlines: children,
            }
        };

        let start = tokens[k].start;
        tokens.splice(k..suffix_end, [Token::resolved(start, end_offset, inline)]);

        if !image {
            for token in &mut tokens[..k] {
                if let TokenKind::OpenBracket {
                    image: false,
                    active,
                } = &mut token.kind
                {
                    *active = false;
                }
            }
        }

        i = k + 1;
    }

    Ok(())
}

/// Turn a failed opener/closer pair into their literal spellings.
fn demote(tokens: &mut [Token], opener: usize, closer: usize) {
    let image = matches!(
        tokens[opener].kind,
        TokenKind::OpenBracket { image: true, .. }
    );
    let marker = if image { "![" } else { "[" };
    tokens[opener].kind = TokenKind::Text(marker.into());
    tokens[closer].kind = TokenKind::Text("]".into());
}
