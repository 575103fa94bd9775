// Autolink grammar - <scheme:uri> or <email>

use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::IResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autolink<'a> {
    pub uri: &'a str,
    pub email: bool,
}

pub fn autolink(input: &str) -> IResult<&str, Autolink> {
    let (rest, _) = char('<')(input)?;
    let (rest, inner) =
        take_while1(|c: char| c != '<' && c != '>' && !c.is_whitespace())(rest)?;
    let (rest, _) = char('>')(rest)?;

    if is_uri(inner) {
        return Ok((rest, Autolink { uri: inner, email: false }));
    }
    if is_email(inner) {
        return Ok((rest, Autolink { uri: inner, email: true }));
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Verify,
    )))
}

/// An absolute URI: a 2-32 character scheme, then `:`, then anything the
/// bracket scan already admitted.
fn is_uri(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once(':') else {
        return false;
    };
    if !(2..=32).contains(&scheme.len()) {
        return false;
    }
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// A plausible address: local part, `@`, dotted labels of alphanumerics
/// and hyphens.
fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let local_ok = local.chars().all(|c| {
        c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
    });
    let domain_ok = domain.split('.').all(|label| {
        !label.is_empty()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    });
    local_ok && domain_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_autolink_uri() {
        let (rest, link) = autolink("<https://example.com/a?b=c> tail").unwrap();
        assert_eq!(link.uri, "https://example.com/a?b=c");
        assert!(!link.email);
        assert_eq!(rest, " tail");
    }

    #[test]
    fn smoke_test_autolink_email() {
        let (_, link) = autolink("<user@example.com>").unwrap();
        assert_eq!(link.uri, "user@example.com");
        assert!(link.email);
    }

    #[test]
    fn smoke_test_autolink_mailto_scheme_is_uri() {
        let (_, link) = autolink("<mailto:user@example.com>").unwrap();
        assert!(!link.email);
    }

    #[test]
    fn smoke_test_autolink_rejects_tag() {
        assert!(autolink("<div>").is_err());
    }

    #[test]
    fn smoke_test_autolink_rejects_whitespace() {
        assert!(autolink("<not a link>").is_err());
    }

    #[test]
    fn smoke_test_autolink_rejects_one_letter_scheme() {
        assert!(autolink("<a:b>").is_err());
    }
}
