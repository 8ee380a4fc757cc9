use indoc::indoc;

use classstub_core::{AccessFlags, ConstantValue};

use super::{FrontendError, parse};
use crate::build::build_unit;
use crate::decl::{CallableKind, DeclKind, Initializer, Literal, Member, Modifier};
use crate::diagnostics::DiagnosticKind;

fn callables(members: &[Member]) -> Vec<String> {
    members
        .iter()
        .filter_map(|m| match m {
            Member::Callable(c) => Some(format!(
                "{}({}){}",
                c.name,
                c.params.join(","),
                c.return_type.as_deref().unwrap_or("<init>")
            )),
            _ => None,
        })
        .collect()
}

#[test]
fn package_and_imports() {
    let unit = parse(indoc! {"
        package com.example;

        import java.util.List;
        import java.util.*;
        import static java.lang.Math.max;

        class A {}
    "})
    .unwrap();

    assert_eq!(unit.package.as_deref(), Some("com.example"));
    let imports: Vec<_> = unit
        .imports
        .iter()
        .map(|i| (i.path.as_str(), i.is_static, i.wildcard))
        .collect();
    assert_eq!(
        imports,
        [
            ("java.util.List", false, false),
            ("java.util", false, true),
            ("java.lang.Math.max", true, false),
        ]
    );
    assert_eq!(unit.types.len(), 1);
}

#[test]
fn class_header() {
    let unit = parse(indoc! {"
        public abstract class A extends Base<String> implements Runnable, Comparable<A> {}
        interface I extends J, K {}
    "})
    .unwrap();

    let a = &unit.types[0];
    assert_eq!(a.name, "A");
    assert_eq!(a.kind, DeclKind::Class);
    assert!(a.modifiers.has(Modifier::Public));
    assert!(a.modifiers.has(Modifier::Abstract));
    assert_eq!(a.extends, ["Base"]);
    assert_eq!(a.implements, ["Runnable", "Comparable"]);

    let i = &unit.types[1];
    assert_eq!(i.kind, DeclKind::Interface);
    assert_eq!(i.extends, ["J", "K"]);
    assert!(i.implements.is_empty());
}

#[test]
fn methods_constructors_and_generics() {
    let unit = parse(indoc! {"
        class Box<T extends Number> {
            Box(T value) throws java.io.IOException {}
            T get() { return null; }
            <U> U map(U[] items, int... rest) { return null; }
            int legacy(String s[])[] { return null; }
            native void poke();
        }
    "})
    .unwrap();

    let members = &unit.types[0].members;
    assert_eq!(
        callables(members),
        [
            "Box(Number)<init>",
            "get()Number",
            "map(java.lang.Object[],int...)java.lang.Object",
            "legacy(String[])int[]",
            "poke()void",
        ]
    );

    let Member::Callable(ctor) = &members[0] else {
        panic!("expected a constructor");
    };
    assert_eq!(ctor.kind, CallableKind::Constructor);
    assert_eq!(ctor.throws, ["java.io.IOException"]);
}

#[test]
fn fields_and_initializers() {
    let unit = parse(indoc! {r#"
        class C {
            static final int A = 1, B = -2;
            static final long L = 0xFFL;
            static final String S = "hi\n";
            static final char CH = 'x';
            static final boolean Z = true;
            static final double D = -1.5;
            static final Object N = null;
            static final int E = A + 1;
            int[] grid[];
        }
    "#})
    .unwrap();

    let fields: Vec<_> = unit.types[0]
        .members
        .iter()
        .filter_map(|m| match m {
            Member::Field(f) => Some((f.name.as_str(), f.ty.as_str(), f.initializer.clone())),
            _ => None,
        })
        .collect();

    let lit = |l| Some(Initializer::Literal(l));
    assert_eq!(
        fields,
        [
            ("A", "int", lit(Literal::Int(1))),
            ("B", "int", lit(Literal::Int(-2))),
            ("L", "long", lit(Literal::Int(255))),
            ("S", "String", lit(Literal::String("hi\n".to_owned()))),
            ("CH", "char", lit(Literal::Char('x'))),
            ("Z", "boolean", lit(Literal::Bool(true))),
            ("D", "double", lit(Literal::Float(-1.5))),
            ("N", "Object", lit(Literal::Null)),
            ("E", "int", Some(Initializer::Expression("A + 1".to_owned()))),
            ("grid", "int[][]", None),
        ]
    );
}

#[test]
fn nested_types_and_unsupported_members() {
    let unit = parse(indoc! {"
        class Outer {
            static { init(); }
            { count++; }
            // comment
            static class Inner {}
            interface Callback {}
            enum Mode { A, B }
        }
    "})
    .unwrap();

    let members = &unit.types[0].members;
    let summary: Vec<String> = members
        .iter()
        .map(|m| match m {
            Member::Type(t) => format!("{} {}", t.kind.as_str(), t.name),
            Member::Unsupported { what, .. } => format!("unsupported {what}"),
            Member::Callable(c) => format!("callable {}", c.name),
            Member::Field(f) => format!("field {}", f.name),
        })
        .collect();
    assert_eq!(
        summary,
        [
            "unsupported static initializer",
            "unsupported instance initializer",
            "class Inner",
            "interface Callback",
            "enum Mode",
        ]
    );
}

#[test]
fn syntax_errors_are_collected() {
    let source = "class A { void f( }";
    let Err(FrontendError::Syntax(diagnostics)) = parse(source) else {
        panic!("expected a syntax error");
    };

    assert!(diagnostics.has_errors());
    assert!(diagnostics.iter().all(|d| matches!(
        d.kind(),
        DiagnosticKind::SyntaxError | DiagnosticKind::MissingNode
    )));
}

#[test]
fn empty_source_is_an_empty_unit() {
    let unit = parse("// nothing here\n").unwrap();
    assert!(unit.types.is_empty());
    assert_eq!(unit.package, None);
}

#[test]
fn source_to_model() {
    let unit = parse(indoc! {"
        package p;

        import q.R;

        public class A implements Runnable {
            public static final int LIMIT = 10;
            public static final String NAME = \"a\";

            public R fetch(String key, A[] peers) throws Exception { return null; }
            public void run() {}

            protected static class B {}
        }
    "})
    .unwrap();
    let cx = build_unit(&unit);
    assert!(cx.diagnostics.is_empty());

    let (_, a) = cx.find_class("p/A").unwrap();
    assert_eq!(a.super_name(), "java/lang/Object");
    assert_eq!(a.interfaces().collect::<Vec<_>>(), ["java/lang/Runnable"]);
    assert_eq!(a.fields()[0].constant(), Some(&ConstantValue::Int(10)));
    assert_eq!(
        a.fields()[1].constant(),
        Some(&ConstantValue::String("a".to_owned()))
    );

    let fetch = a.methods().iter().find(|m| m.name() == "fetch").unwrap();
    assert_eq!(fetch.descriptor(), "(Ljava/lang/String;[Lp/A;)Lq/R;");
    assert_eq!(fetch.exceptions(), ["java/lang/Exception"]);
    assert!(a.methods().iter().any(|m| m.is_constructor()));

    let (_, b) = cx.find_class("p/A$B").unwrap();
    assert_eq!(
        b.access_flags(),
        AccessFlags::PROTECTED | AccessFlags::STATIC
    );
}
