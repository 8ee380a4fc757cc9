use indexmap::IndexMap;

use super::literal::{erase_generics, erase_type, literal, negate, parse_float, parse_integer, unescape};
use crate::decl::Literal;

#[test]
fn generics_and_annotations_are_erased() {
    assert_eq!(erase_generics("Map<String, List<Integer>>[]"), "Map[]");
    assert_eq!(erase_generics("java.util . List<T>"), "java.util.List");
    assert_eq!(erase_generics("@NonNull String"), "String");
    assert_eq!(erase_generics("int @Size [] []"), "int[][]");
}

#[test]
fn type_parameters_become_their_bound() {
    let mut params = IndexMap::new();
    params.insert("T".to_owned(), "java.lang.Number".to_owned());

    assert_eq!(erase_type("T", &params), "java.lang.Number");
    assert_eq!(erase_type("T[][]", &params), "java.lang.Number[][]");
    assert_eq!(erase_type("T...", &params), "java.lang.Number[]");
    assert_eq!(erase_type("List<T>", &params), "List");
    assert_eq!(erase_type("Tx", &params), "Tx");
}

#[test]
fn integer_literals() {
    assert_eq!(parse_integer("42"), Some(42));
    assert_eq!(parse_integer("1_000_000"), Some(1_000_000));
    assert_eq!(parse_integer("10L"), Some(10));
    assert_eq!(parse_integer("0x1F"), Some(31));
    assert_eq!(parse_integer("0b101"), Some(5));
    assert_eq!(parse_integer("017"), Some(15));
    assert_eq!(parse_integer("0"), Some(0));
    assert_eq!(parse_integer("0xFFFFFFFF"), Some(-1));
    assert_eq!(parse_integer("0xFFFFFFFFL"), Some(4_294_967_295));
    assert_eq!(parse_integer("9223372036854775808L"), Some(i64::MIN));
    assert_eq!(parse_integer("0x1FFFFFFFF"), None);
}

#[test]
fn float_literals() {
    assert_eq!(parse_float("1.5"), Some(1.5));
    assert_eq!(parse_float("2.5f"), Some(2.5));
    assert_eq!(parse_float("1_0.0D"), Some(10.0));
    assert_eq!(parse_float("1e3"), Some(1000.0));
}

#[test]
fn escapes_are_decoded() {
    assert_eq!(unescape(r"a\tb\n").as_deref(), Some("a\tb\n"));
    assert_eq!(unescape(r#"\"q\" \\"#).as_deref(), Some("\"q\" \\"));
    assert_eq!(unescape(r"A\uu0042").as_deref(), Some("AB"));
    assert_eq!(unescape(r"\q"), None);
}

#[test]
fn octal_escapes_are_decoded() {
    assert_eq!(unescape(r"\012").as_deref(), Some("\n"));
    assert_eq!(unescape(r"\101").as_deref(), Some("A"));
    assert_eq!(unescape(r"\0").as_deref(), Some("\0"));
    assert_eq!(unescape(r"\377").as_deref(), Some("\u{ff}"));
    // A leading 4 to 7 takes at most two digits.
    assert_eq!(unescape(r"\477").as_deref(), Some("'7"));
    assert_eq!(unescape(r"\08").as_deref(), Some("\08"));
    assert_eq!(literal("character_literal", r"'\7'"), Some(Literal::Char('\u{7}')));
}

#[test]
fn literal_nodes() {
    assert_eq!(literal("decimal_integer_literal", "7"), Some(Literal::Int(7)));
    assert_eq!(literal("true", "true"), Some(Literal::Bool(true)));
    assert_eq!(literal("null_literal", "null"), Some(Literal::Null));
    assert_eq!(literal("character_literal", r"'\n'"), Some(Literal::Char('\n')));
    assert_eq!(literal("character_literal", "'ab'"), None);
    assert_eq!(
        literal("string_literal", r#""hi\t""#),
        Some(Literal::String("hi\t".to_owned()))
    );
    assert_eq!(literal("string_literal", "\"\"\"\n  block\"\"\""), None);
    assert_eq!(literal("method_invocation", "f()"), None);
}

#[test]
fn only_numbers_negate() {
    assert_eq!(negate(Literal::Int(3)), Some(Literal::Int(-3)));
    assert_eq!(negate(Literal::Float(0.5)), Some(Literal::Float(-0.5)));
    assert_eq!(negate(Literal::Int(i64::MIN)), Some(Literal::Int(i64::MIN)));
    assert_eq!(negate(Literal::Bool(true)), None);
}
