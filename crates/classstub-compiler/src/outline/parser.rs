//! Line-by-line parser for the outline format.

use std::ops::Range;

use indexmap::IndexMap;

use super::OutlineError;
use super::lexer::{Spanned, Token, lex_line};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutlineClass<'src> {
    pub name: &'src str,
    pub super_name: Option<&'src str>,
    pub interfaces: Vec<&'src str>,
    pub methods: Vec<OutlineMethod<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutlineMethod<'src> {
    pub is_static: bool,
    pub name: &'src str,
    /// Type spellings, `[]` suffixes included.
    pub params: Vec<String>,
    pub ret: String,
}

/// Class lines in source order, keyed by name. Repeated class lines merge
/// into the first one.
pub(crate) type OutlineClasses<'src> = IndexMap<&'src str, OutlineClass<'src>>;

struct LineError {
    kind: DiagnosticKind,
    span: Span,
    message: String,
}

pub(crate) fn parse_lines<'src>(
    source: &'src str,
    diagnostics: &mut Diagnostics,
) -> Result<OutlineClasses<'src>, OutlineError> {
    let mut classes = OutlineClasses::new();
    let mut current: Option<&'src str> = None;
    let mut offset = 0;

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw.len();

        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_span = Span::from_range(line_start..line_start + line.len());
        let fatal = || OutlineError::NoClassDeclared {
            line: index + 1,
            span: line_span,
        };

        let tokens = match lex_line(line, line_start) {
            Ok(tokens) => tokens,
            Err(bad) => {
                if current.is_none() {
                    return Err(fatal());
                }
                let text = &source[bad.clone()];
                diagnostics
                    .report(DiagnosticKind::UnexpectedCharacter, Some(Span::from_range(bad)))
                    .message(text)
                    .emit();
                continue;
            }
        };

        let end = line_start + line.len();
        let mut parser = LineParser {
            tokens: &tokens,
            pos: 0,
            end,
        };

        let is_member = matches!(tokens.first(), Some((Token::Plus | Token::Minus, _)));
        if is_member {
            let Some(owner) = current else {
                return Err(fatal());
            };
            match parser.member_line() {
                Ok(method) => {
                    if let Some(class) = classes.get_mut(owner) {
                        class.methods.push(method);
                    }
                }
                Err(err) => err.report(diagnostics),
            }
            continue;
        }

        match parser.class_line() {
            Ok(class) => {
                let name = class.name;
                if classes.contains_key(name) {
                    diagnostics
                        .report(DiagnosticKind::DuplicateClass, Some(line_span))
                        .message(name)
                        .emit();
                } else {
                    classes.insert(name, class);
                }
                current = Some(name);
            }
            Err(_) if current.is_none() => return Err(fatal()),
            Err(err) => err.report(diagnostics),
        }
    }

    Ok(classes)
}

impl LineError {
    fn report(self, diagnostics: &mut Diagnostics) {
        diagnostics
            .report(self.kind, Some(self.span))
            .message(self.message)
            .emit();
    }
}

struct LineParser<'t, 'src> {
    tokens: &'t [Spanned<'src>],
    pos: usize,
    /// Byte offset of the end of the line, used for "found end of line".
    end: usize,
}

impl<'src> LineParser<'_, 'src> {
    /// `name:super:iface,iface`
    fn class_line(&mut self) -> Result<OutlineClass<'src>, LineError> {
        let kind = DiagnosticKind::MalformedClassLine;

        let name = self.expect_name(kind, "class name")?;
        self.expect(kind, Token::Colon)?;
        let super_name = self.eat_name();
        self.expect(kind, Token::Colon)?;

        let mut interfaces = Vec::new();
        if let Some(first) = self.eat_name() {
            interfaces.push(first);
            while self.eat(Token::Comma) {
                interfaces.push(self.expect_name(kind, "interface name")?);
            }
        }
        self.expect_end(kind)?;

        Ok(OutlineClass {
            name,
            super_name,
            interfaces,
            methods: Vec::new(),
        })
    }

    /// `+name(type,type)type` or `-name()type`
    fn member_line(&mut self) -> Result<OutlineMethod<'src>, LineError> {
        let kind = DiagnosticKind::MalformedMemberLine;

        let is_static = self.eat(Token::Plus);
        if !is_static {
            self.expect(kind, Token::Minus)?;
        }
        let name = self.expect_name(kind, "method name")?;
        self.expect(kind, Token::LParen)?;

        let mut params = Vec::new();
        if !self.at(Token::RParen) {
            params.push(self.type_spelling(kind, "parameter type")?);
            while self.eat(Token::Comma) {
                params.push(self.type_spelling(kind, "parameter type")?);
            }
        }
        self.expect(kind, Token::RParen)?;
        let ret = self.type_spelling(kind, "return type")?;
        self.expect_end(kind)?;

        Ok(OutlineMethod {
            is_static,
            name,
            params,
            ret,
        })
    }

    fn type_spelling(&mut self, kind: DiagnosticKind, what: &str) -> Result<String, LineError> {
        let mut spelling = self.expect_name(kind, what)?.to_owned();
        while self.eat(Token::Brackets) {
            spelling.push_str("[]");
        }
        Ok(spelling)
    }

    fn peek(&self) -> Option<&Spanned<'src>> {
        self.tokens.get(self.pos)
    }

    fn at(&self, token: Token<'src>) -> bool {
        self.peek().is_some_and(|(t, _)| *t == token)
    }

    fn eat(&mut self, token: Token<'src>) -> bool {
        let found = self.at(token);
        if found {
            self.pos += 1;
        }
        found
    }

    fn eat_name(&mut self) -> Option<&'src str> {
        match self.peek() {
            Some((Token::Name(name), _)) => {
                let name = *name;
                self.pos += 1;
                Some(name)
            }
            _ => None,
        }
    }

    fn expect(&mut self, kind: DiagnosticKind, token: Token<'src>) -> Result<(), LineError> {
        if self.eat(token) {
            return Ok(());
        }
        Err(self.error(kind, &token.describe()))
    }

    fn expect_name(&mut self, kind: DiagnosticKind, what: &str) -> Result<&'src str, LineError> {
        self.eat_name().ok_or_else(|| self.error(kind, what))
    }

    fn expect_end(&self, kind: DiagnosticKind) -> Result<(), LineError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error(kind, "end of line")),
        }
    }

    fn error(&self, kind: DiagnosticKind, expected: &str) -> LineError {
        let (found, span): (String, Range<usize>) = match self.peek() {
            Some((token, span)) => (token.describe(), span.clone()),
            None => ("end of line".to_owned(), self.end..self.end),
        };
        LineError {
            kind,
            span: Span::from_range(span),
            message: format!("expected {expected}, found {found}"),
        }
    }
}
