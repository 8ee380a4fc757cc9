//! Java literal and type spelling helpers.
//!
//! These work on source text only, so they are usable without a tree.

use classstub_core::split_array_suffix;
use indexmap::IndexMap;

use crate::decl::Literal;

/// In-scope type parameters and what they erase to.
pub(crate) type TypeParams = IndexMap<String, String>;

/// Drop generic arguments, annotations and whitespace from a type spelling.
///
/// `Map<String, List<Integer>>[]` → `Map[]`, `java.util . List<T>` →
/// `java.util.List`.
pub(crate) fn erase_generics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '@' => {
                // Skip a type annotation name, e.g. `@NonNull String`.
                while chars
                    .peek()
                    .is_some_and(|c| c.is_alphanumeric() || *c == '_' || *c == '.' || *c == '$')
                {
                    chars.next();
                }
            }
            c if c.is_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

/// Erase a type spelling, replacing type parameters by their bound.
pub(crate) fn erase_type(text: &str, params: &TypeParams) -> String {
    let erased = erase_generics(text);
    let (base, dims) = split_array_suffix(&erased);
    match params.get(base) {
        Some(bound) => format!("{bound}{}", "[]".repeat(dims)),
        None => erased,
    }
}

/// Parse an integer literal as Java would store it.
///
/// Hex, octal and binary literals without an `L` suffix are 32-bit patterns,
/// so `0xFFFFFFFF` is `-1`.
pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let (digits, is_long) = match cleaned.strip_suffix(['l', 'L']) {
        Some(digits) => (digits, true),
        None => (cleaned.as_str(), false),
    };

    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(bin) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        return digits.parse::<i64>().ok().or_else(|| {
            // `-9223372036854775808L` arrives here without its sign.
            (digits == "9223372036854775808").then_some(i64::MIN)
        });
    };

    let bits = u64::from_str_radix(body, radix).ok()?;
    if is_long {
        Some(bits as i64)
    } else {
        let bits = u32::try_from(bits).ok()?;
        Some(i64::from(bits as i32))
    }
}

pub(crate) fn parse_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let body = cleaned
        .strip_suffix(['f', 'F', 'd', 'D'])
        .unwrap_or(&cleaned);
    body.parse::<f64>().ok()
}

/// Decode the body of a string or char literal, quotes excluded.
pub(crate) fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            's' => ' ',
            first @ '0'..='7' => {
                // `\0` to `\377`: three digits only when the first is 0 to 3.
                let max_len = if first <= '3' { 3 } else { 2 };
                let rest = chars.as_str();
                let extra = rest
                    .chars()
                    .take(max_len - 1)
                    .take_while(|c| c.is_digit(8))
                    .count();
                let digits = format!("{first}{}", &rest[..extra]);
                chars = rest[extra..].chars();
                char::from(u8::from_str_radix(&digits, 8).ok()?)
            }
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            'u' => {
                let mut rest = chars.as_str().trim_start_matches('u');
                let hex = rest.get(..4)?;
                let code = u32::from_str_radix(hex, 16).ok()?;
                rest = &rest[4..];
                chars = rest.chars();
                char::from_u32(code)?
            }
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

/// Literal for a Java literal node kind and its text, if it is one.
pub(crate) fn literal(kind: &str, text: &str) -> Option<Literal> {
    let literal = match kind {
        "decimal_integer_literal"
        | "hex_integer_literal"
        | "octal_integer_literal"
        | "binary_integer_literal" => Literal::Int(parse_integer(text)?),
        "decimal_floating_point_literal" => Literal::Float(parse_float(text)?),
        "true" => Literal::Bool(true),
        "false" => Literal::Bool(false),
        "null_literal" => Literal::Null,
        "character_literal" => {
            let body = text.strip_prefix('\'')?.strip_suffix('\'')?;
            let decoded = unescape(body)?;
            let mut chars = decoded.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Literal::Char(c)
        }
        "string_literal" => {
            if text.starts_with("\"\"\"") {
                return None;
            }
            let body = text.strip_prefix('"')?.strip_suffix('"')?;
            Literal::String(unescape(body)?)
        }
        _ => return None,
    };
    Some(literal)
}

/// Negate a numeric literal for a leading unary minus.
pub(crate) fn negate(literal: Literal) -> Option<Literal> {
    match literal {
        Literal::Int(v) => Some(Literal::Int(v.wrapping_neg())),
        Literal::Float(v) => Some(Literal::Float(-v)),
        _ => None,
    }
}
