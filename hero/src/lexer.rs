//! Tokenizer for input lines
//!
//! Splits a line into words following POSIX shell quoting rules: single quotes
//! keep everything literal, double quotes group whitespace and honour a small
//! set of backslash escapes, and a bare backslash escapes the next character.
//! There are no operators; `|`, `>` and friends are ordinary word characters.

use crate::error::{HeroError, HeroResult};
use chumsky::prelude::*;

pub fn lexer() -> impl Parser<char, Vec<String>, Error = Simple<char>> {
    let ws = filter(|c: &char| c.is_whitespace()).repeated();

    let sq_seg = just('\'')
        .ignore_then(filter(|c: &char| *c != '\'').repeated())
        .then_ignore(just('\''))
        .collect::<String>();

    let dq_seg = just('"')
        .ignore_then(
            just('\\')
                .then(any())
                .map(|(_b, c): (char, char)| match c {
                    // POSIX: these escapes are interpreted inside double quotes
                    '"' => "\"".to_string(),
                    '\\' => "\\".to_string(),
                    '$' => "$".to_string(),
                    '`' => "`".to_string(),
                    '\n' => String::new(),
                    // All other \X sequences are literal (backslash preserved)
                    _ => format!("\\{c}"),
                })
                .or(filter(|c: &char| *c != '"' && *c != '\\').map(|c: char| c.to_string()))
                .repeated(),
        )
        .then_ignore(just('"'))
        .map(|parts: Vec<String>| parts.concat());

    let word_char =
        filter(|c: &char| !c.is_whitespace() && !matches!(c, '"' | '\'' | '\\'));

    // Backslash-escape outside quotes: \X → literal X, \<newline> → nothing
    let escaped_char = just('\\')
        .ignore_then(any())
        .map(|c: char| if c == '\n' { String::new() } else { c.to_string() });

    let bare_seg = escaped_char
        .or(word_char.map(|c: char| c.to_string()))
        .repeated()
        .at_least(1)
        .map(|parts: Vec<String>| parts.concat());

    // Adjacent segments with no whitespace between them form one word
    let word = choice((bare_seg, sq_seg, dq_seg))
        .repeated()
        .at_least(1)
        .map(|segments: Vec<String>| segments.concat());

    ws.clone()
        .ignore_then(word.then_ignore(ws).repeated())
        .then_ignore(end())
}

/// Tokenize a line into words.
///
/// Returns an empty vector for blank input.
pub fn tokenize(line: &str) -> HeroResult<Vec<String>> {
    lexer()
        .parse(line)
        .map_err(|errs| HeroError::Parse(describe(line, &errs)))
}

enum Dangling {
    Quote,
    Escape,
    Nothing,
}

fn describe(line: &str, errs: &[Simple<char>]) -> String {
    match dangling(line) {
        Dangling::Quote => "No closing quotation".to_string(),
        Dangling::Escape => "No escaped character".to_string(),
        Dangling::Nothing => errs
            .iter()
            .map(|e| match e.found() {
                Some(c) => format!("unexpected '{}' at position {}", c, e.span().start),
                None => "unexpected end of input".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn dangling(line: &str) -> Dangling {
    let mut quote: Option<char> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (None | Some('"'), '\\') => {
                if chars.next().is_none() {
                    return if quote.is_some() {
                        Dangling::Quote
                    } else {
                        Dangling::Escape
                    };
                }
            }
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
    }
    if quote.is_some() {
        Dangling::Quote
    } else {
        Dangling::Nothing
    }
}
