use indoc::indoc;

use classstub_core::AccessFlags;

use super::{OutlineError, parse_outline};
use crate::diagnostics::{DiagnosticKind, Span};

#[test]
fn class_then_static_method() {
    let cx = parse_outline("a.B:java.lang.Object:\n+run()void\n").unwrap();

    assert_eq!(cx.arena.len(), 1);
    let (_, class) = cx.find_class("a/B").unwrap();
    assert_eq!(class.super_name(), "java/lang/Object");
    assert_eq!(class.access_flags(), AccessFlags::PUBLIC);
    assert_eq!(class.simple_name(), "B");

    let run = &class.methods()[0];
    assert_eq!(run.name(), "run");
    assert_eq!(run.descriptor(), "()V");
    assert!(run.is_static());
    assert_eq!(run.access_flags(), AccessFlags::PUBLIC | AccessFlags::STATIC);
    assert!(cx.diagnostics.is_empty());
}

#[test]
fn method_before_class_is_fatal() {
    let err = parse_outline("+run()void\na.B:java.lang.Object:\n").unwrap_err();

    assert_eq!(
        err,
        OutlineError::NoClassDeclared {
            line: 1,
            span: Span::new(0, 10),
        }
    );
    assert_eq!(err.to_string(), "line 1: no class declared before this line");
}

#[test]
fn garbage_before_class_is_fatal() {
    let err = parse_outline("# header\n\njunk line\n").unwrap_err();
    assert!(matches!(err, OutlineError::NoClassDeclared { line: 3, .. }));
}

#[test]
fn names_resolve_against_declared_classes() {
    let source = indoc! {"
        # guard
        com.test.MyGuard:java.lang.Thread:org.xml.Dumper,com.Resources
        -getName()String
        -setName(String)void
        +setClassLoader(ClassLoader,com.abi.Gas,boolean)int
        -peers()MyGuard[]
        -grid(int[][])Helper
        com.test.Helper::
    "};
    let cx = parse_outline(source).unwrap();
    assert!(cx.diagnostics.is_empty());

    let (_, guard) = cx.find_class("com/test/MyGuard").unwrap();
    assert_eq!(guard.super_name(), "java/lang/Thread");
    assert_eq!(
        guard.interfaces().collect::<Vec<_>>(),
        ["org/xml/Dumper", "com/Resources"]
    );

    let descriptors: Vec<_> = guard
        .methods()
        .iter()
        .map(|m| format!("{} {}", m.name(), m.descriptor()))
        .collect();
    assert_eq!(
        descriptors,
        [
            "getName ()Ljava/lang/String;",
            "setName (Ljava/lang/String;)V",
            "setClassLoader (Ljava/lang/ClassLoader;Lcom/abi/Gas;Z)I",
            "peers ()[Lcom/test/MyGuard;",
            "grid ([[I)Lcom/test/Helper;",
        ]
    );
    assert!(guard.methods()[2].is_static());

    let (_, helper) = cx.find_class("com/test/Helper").unwrap();
    assert_eq!(helper.super_name(), "java/lang/Object");
    assert_eq!(helper.interfaces().len(), 0);
}

#[test]
fn malformed_lines_after_a_class_are_reported() {
    let source = "a.B::\n-run(\nc.D\n-ok()vo!d\n-fine()void\n";
    let cx = parse_outline(source).unwrap();

    assert_eq!(
        cx.diagnostics.kinds(),
        [
            DiagnosticKind::MalformedMemberLine,
            DiagnosticKind::MalformedClassLine,
            DiagnosticKind::UnexpectedCharacter,
        ]
    );
    let messages: Vec<_> = cx.diagnostics.iter().map(|d| d.message().to_owned()).collect();
    assert_eq!(
        messages,
        [
            "malformed member line: expected parameter type, found end of line",
            "malformed class line: expected `:`, found end of line",
            "unexpected character `!`",
        ]
    );

    let (_, class) = cx.find_class("a/B").unwrap();
    assert_eq!(class.methods().len(), 1);
    assert_eq!(class.methods()[0].name(), "fine");
}

#[test]
fn malformed_line_renders_with_source() {
    let source = "a.B::\nc.D:x:y,(\n";
    let cx = parse_outline(source).unwrap();

    insta::assert_snapshot!(cx.diagnostics.render(source), @r"
    error: malformed class line: expected interface name, found `(`
      |
    2 | c.D:x:y,(
      |         ^
      = help: expected `name:super:interfaces`
    ");
}

#[test]
fn repeated_class_lines_merge() {
    let source = "a.B::\n-x()void\na.B::\n-y()void\n";
    let cx = parse_outline(source).unwrap();

    assert_eq!(cx.arena.len(), 1);
    assert_eq!(cx.diagnostics.kinds(), [DiagnosticKind::DuplicateClass]);
    let (_, class) = cx.find_class("a/B").unwrap();
    assert_eq!(class.methods().len(), 2);
}

#[test]
fn whitespace_and_crlf_are_tolerated() {
    let source = "  a.B : : I1 , I2\r\n\r\n- run ( int , long ) void\r\n";
    let cx = parse_outline(source).unwrap();

    let (_, class) = cx.find_class("a/B").unwrap();
    assert_eq!(
        class.interfaces().collect::<Vec<_>>(),
        ["java/lang/I1", "java/lang/I2"]
    );
    assert_eq!(class.methods()[0].descriptor(), "(IJ)V");
    assert!(cx.diagnostics.is_empty());
}

#[test]
fn empty_input_is_an_empty_unit() {
    let cx = parse_outline("").unwrap();
    assert!(cx.arena.is_empty());

    let cx = parse_outline("# only comments\n\n").unwrap();
    assert!(cx.arena.is_empty());
}
