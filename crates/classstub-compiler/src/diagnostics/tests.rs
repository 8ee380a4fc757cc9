use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::SyntaxError, Some(Span::new(0, 5)))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.iter().next().unwrap().message(), "syntax error");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedTypeKind, None)
        .message("enum")
        .emit();

    let msg = diagnostics.iter().next().unwrap();
    assert_eq!(msg.message(), "enum declarations are not supported");
    assert_eq!(msg.severity(), Severity::Warning);
}

#[test]
fn model_findings_are_warnings() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedMember, None)
        .emit();
    diagnostics
        .report(DiagnosticKind::WriteFailed, None)
        .emit();

    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.kinds(),
        [DiagnosticKind::UnsupportedMember, DiagnosticKind::WriteFailed]
    );
}

#[test]
fn plain_rendering_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MalformedClassLine, Some(Span::new(3, 9)))
        .message("missing `:`")
        .emit();
    diagnostics
        .report(DiagnosticKind::WriteFailed, None)
        .message("out/A.class: permission denied")
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @r"
    error at 3..9: malformed class line: missing `:` (hint: expected `name:super:interfaces`)
    error: cannot write class file: out/A.class: permission denied
    ");
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedMember, Some(Span::new(0, 5)))
        .message("initializer block")
        .emit();

    let result = diagnostics.printer().source("hello world").path("A.java").render();
    insta::assert_snapshot!(result, @r"
    warning: unsupported member: initializer block
     --> A.java:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingNode, Some(Span::empty(0)))
        .message("`;`")
        .emit();

    let result = diagnostics.render("hello");
    insta::assert_snapshot!(result, @r"
    error: missing syntax: `;`
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_hints_follow_the_snippet() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MalformedMemberLine, Some(Span::new(0, 3)))
        .emit();

    let result = diagnostics.render("run");
    assert!(result.starts_with("error: malformed member line"));
    assert!(result.ends_with("= help: expected `+name(params)return` or `-name(params)return`"));
}

#[test]
fn printer_without_span_uses_title_only() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmitFailed, None)
        .message("p/A: constant pool overflow")
        .emit();

    let result = diagnostics.render("ignored source");
    insta::assert_snapshot!(result, @"error: cannot emit class: p/A: constant pool overflow");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::SyntaxError, Some(Span::new(0, 5)))
        .emit();

    let result = diagnostics.printer().source("hello").colored(true).render();
    assert!(result.contains("syntax error"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.render("source").is_empty());
}

#[test]
fn span_helpers() {
    assert_eq!(Span::from_range(2..7), Span::new(2, 7));
    assert_eq!(Span::new(2, 7).range(), 2..7);
    assert!(Span::empty(4).is_empty());
}
