//! Tokens of the outline format.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub(crate) enum Token<'src> {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[]")]
    Brackets,

    // Dotted names: `run`, `java.lang.Object`, `a.B$C`
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*", |lex| lex.slice())]
    Name(&'src str),
}

impl Token<'_> {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Plus => "`+`".to_owned(),
            Token::Minus => "`-`".to_owned(),
            Token::Colon => "`:`".to_owned(),
            Token::Comma => "`,`".to_owned(),
            Token::LParen => "`(`".to_owned(),
            Token::RParen => "`)`".to_owned(),
            Token::Brackets => "`[]`".to_owned(),
            Token::Name(name) => format!("`{name}`"),
        }
    }
}

pub(crate) type Spanned<'src> = (Token<'src>, Range<usize>);

/// Tokenize one line. Spans are shifted by `offset` so they point into the
/// whole source. On failure, returns the span of the first bad character.
pub(crate) fn lex_line(line: &str, offset: usize) -> Result<Vec<Spanned<'_>>, Range<usize>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(line).spanned() {
        let span = span.start + offset..span.end + offset;
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(_) => return Err(span),
        }
    }
    Ok(tokens)
}
