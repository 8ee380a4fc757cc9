use classstub_core::{AccessFlags, ConstantValue, MethodModifier, TypeKind};

use crate::build::{build_unit, coerce_literal};
use crate::decl::{
    CallableDecl, CallableKind, CompilationUnit, DeclKind, FieldDecl, Import, Initializer,
    Literal, Member, Modifier, Modifiers, TypeDecl,
};
use crate::diagnostics::DiagnosticKind;

fn class(name: &str, members: Vec<Member>) -> TypeDecl {
    TypeDecl {
        name: name.to_owned(),
        modifiers: Modifiers::from([Modifier::Public]),
        members,
        ..TypeDecl::default()
    }
}

fn method(name: &str, ret: &str, params: &[&str]) -> Member {
    Member::Callable(CallableDecl {
        name: name.to_owned(),
        modifiers: Modifiers::from([Modifier::Public]),
        return_type: Some(ret.to_owned()),
        params: params.iter().map(|p| p.to_string()).collect(),
        ..CallableDecl::default()
    })
}

fn field(name: &str, ty: &str, initializer: Option<Initializer>) -> Member {
    Member::Field(FieldDecl {
        name: name.to_owned(),
        ty: ty.to_owned(),
        modifiers: Modifiers::from([Modifier::Public, Modifier::Static, Modifier::Final]),
        initializer,
        span: None,
    })
}

fn unit(types: Vec<TypeDecl>) -> CompilationUnit {
    CompilationUnit {
        package: Some("p".to_owned()),
        imports: vec![Import::single("q.R")],
        types,
    }
}

#[test]
fn resolves_signature_types_through_imports() {
    let cx = build_unit(&unit(vec![class(
        "A",
        vec![method("get", "R", &["String", "int[]", "A"])],
    )]));

    let (_, a) = cx.find_class("p/A").unwrap();
    let get = a.methods().iter().find(|m| m.name() == "get").unwrap();
    assert_eq!(get.descriptor(), "(Ljava/lang/String;[ILp/A;)Lq/R;");
    assert!(cx.diagnostics.is_empty());
}

#[test]
fn nested_class_gets_dollar_name_and_links() {
    let inner = class("Inner", vec![]);
    let outer = class("Outer", vec![Member::Type(inner), method("make", "Inner", &[])]);
    let cx = build_unit(&unit(vec![outer]));

    let (outer_id, outer) = cx.find_class("p/Outer").unwrap();
    let (inner_id, inner) = cx.find_class("p/Outer$Inner").unwrap();

    assert_eq!(inner.enclosing(), Some(outer_id));
    assert_eq!(outer.nested(), [inner_id]);
    assert_eq!(inner.nested(), [inner_id]);
    assert_eq!(inner.split_nested(), Some(("p/Outer", "Inner")));
    assert_eq!(inner.simple_name(), "Outer$Inner");

    let make = outer.methods().iter().find(|m| m.name() == "make").unwrap();
    assert_eq!(make.return_descriptor(), "Lp/Outer$Inner;");
}

#[test]
fn sibling_member_types_see_each_other() {
    let mut first = class("First", vec![]);
    first.extends = vec!["Second".to_owned()];
    let outer = class(
        "Outer",
        vec![Member::Type(first), Member::Type(class("Second", vec![]))],
    );
    let cx = build_unit(&unit(vec![outer]));

    let (_, first) = cx.find_class("p/Outer$First").unwrap();
    assert_eq!(first.super_name(), "p/Outer$Second");
}

#[test]
fn same_simple_name_under_different_outers() {
    let a = class("A", vec![Member::Type(class("Node", vec![]))]);
    let b = class("B", vec![Member::Type(class("Node", vec![]))]);
    let cx = build_unit(&unit(vec![a, b]));

    let (a_id, _) = cx.find_class("p/A").unwrap();
    let (b_id, _) = cx.find_class("p/B").unwrap();
    let [a_node] = cx.arena[a_id].nested() else {
        panic!("expected one nested class under A");
    };
    let [b_node] = cx.arena[b_id].nested() else {
        panic!("expected one nested class under B");
    };
    let (a_node, b_node) = (*a_node, *b_node);

    assert_ne!(a_node, b_node);
    assert_eq!(cx.arena[a_node].name(), "p/A$Node");
    assert_eq!(cx.arena[b_node].name(), "p/B$Node");
}

#[test]
fn interface_members_are_coerced() {
    let mut iface = class(
        "Api",
        vec![
            method("call", "void", &[]),
            field("LIMIT", "int", Some(Initializer::Literal(Literal::Int(3)))),
        ],
    );
    iface.kind = DeclKind::Interface;
    iface.modifiers = Modifiers::from([Modifier::Public, Modifier::Final]);
    iface.extends = vec!["R".to_owned()];
    let cx = build_unit(&unit(vec![iface]));

    let (_, api) = cx.find_class("p/Api").unwrap();
    let flags = api.access_flags();
    assert_eq!(api.kind(), TypeKind::Interface);
    assert!(flags.contains(AccessFlags::INTERFACE | AccessFlags::ABSTRACT));
    assert!(!flags.contains(AccessFlags::FINAL));
    assert_eq!(api.interfaces().collect::<Vec<_>>(), ["q/R"]);
    assert_eq!(api.super_name(), "java/lang/Object");

    let call = &api.methods()[0];
    assert_eq!(call.modifier(), MethodModifier::Abstract);
    assert!(!call.has_body());
    assert!(call.access_flags().contains(AccessFlags::PUBLIC));

    // No implicit constructor for interfaces.
    assert_eq!(api.methods().len(), 1);

    let limit = &api.fields()[0];
    assert_eq!(
        limit.access_flags(),
        AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL
    );
    assert_eq!(limit.constant(), Some(&ConstantValue::Int(3)));
}

#[test]
fn private_interface_methods_keep_their_body() {
    let helper = Member::Callable(CallableDecl {
        name: "helper".to_owned(),
        modifiers: Modifiers::from([Modifier::Private]),
        return_type: Some("void".to_owned()),
        ..CallableDecl::default()
    });
    let mut iface = class("Api", vec![method("call", "void", &[]), helper]);
    iface.kind = DeclKind::Interface;
    let cx = build_unit(&unit(vec![iface]));

    let (_, api) = cx.find_class("p/Api").unwrap();
    let helper = api.methods().iter().find(|m| m.name() == "helper").unwrap();
    assert_eq!(helper.modifier(), MethodModifier::None);
    assert!(helper.has_body());
    assert_eq!(helper.access_flags(), AccessFlags::PRIVATE);

    let call = api.methods().iter().find(|m| m.name() == "call").unwrap();
    assert_eq!(call.modifier(), MethodModifier::Abstract);
}

#[test]
fn implicit_constructor_only_when_none_declared() {
    let ctor = Member::Callable(CallableDecl {
        name: "B".to_owned(),
        kind: CallableKind::Constructor,
        modifiers: Modifiers::from([Modifier::Private]),
        params: vec!["int".to_owned()],
        ..CallableDecl::default()
    });
    let cx = build_unit(&unit(vec![class("A", vec![]), class("B", vec![ctor])]));

    let (_, a) = cx.find_class("p/A").unwrap();
    assert_eq!(a.methods().len(), 1);
    assert!(a.methods()[0].is_constructor());
    assert_eq!(a.methods()[0].descriptor(), "()V");

    let (_, b) = cx.find_class("p/B").unwrap();
    assert_eq!(b.methods().len(), 1);
    assert_eq!(b.methods()[0].descriptor(), "(I)V");
    assert_eq!(b.methods()[0].access_flags(), AccessFlags::PRIVATE);
}

#[test]
fn unsupported_declarations_are_reported_and_skipped() {
    let mut color = class("Color", vec![]);
    color.kind = DeclKind::Enum;
    let a = class(
        "A",
        vec![
            Member::Unsupported {
                what: "initializer block".to_owned(),
                span: None,
            },
            field("X", "int", Some(Initializer::Expression("compute()".to_owned()))),
            field("Y", "byte", Some(Initializer::Literal(Literal::Int(1000)))),
            field("Z", "String", Some(Initializer::Literal(Literal::Null))),
        ],
    );
    let cx = build_unit(&unit(vec![color, a]));

    assert_eq!(
        cx.diagnostics.kinds(),
        [
            DiagnosticKind::UnsupportedTypeKind,
            DiagnosticKind::UnsupportedMember,
            DiagnosticKind::UnsupportedInitializer,
            DiagnosticKind::UnsupportedInitializer,
        ]
    );
    assert!(!cx.diagnostics.has_errors());
    assert!(cx.find_class("p/Color").is_none());

    let (_, a) = cx.find_class("p/A").unwrap();
    assert_eq!(a.fields().len(), 1);
    assert_eq!(a.fields()[0].name(), "Z");
    assert_eq!(a.fields()[0].constant(), None);
}

#[test]
fn duplicate_types_are_reported() {
    let cx = build_unit(&unit(vec![class("A", vec![]), class("A", vec![])]));
    assert_eq!(cx.arena.len(), 1);
    assert_eq!(cx.diagnostics.kinds(), [DiagnosticKind::DuplicateClass]);
}

#[test]
fn member_classes_keep_static_and_visibility() {
    let mut nested = class("Helper", vec![]);
    nested.modifiers = Modifiers::from([Modifier::Private, Modifier::Static, Modifier::Final]);
    let cx = build_unit(&unit(vec![class("A", vec![Member::Type(nested)])]));

    let (_, helper) = cx.find_class("p/A$Helper").unwrap();
    assert_eq!(
        helper.access_flags(),
        AccessFlags::PRIVATE | AccessFlags::STATIC | AccessFlags::FINAL
    );
}

#[test]
fn wildcard_imports_do_not_register() {
    let mut unit = unit(vec![class("A", vec![method("list", "List", &[])])]);
    unit.imports.push(Import {
        path: "java.util".to_owned(),
        wildcard: true,
        ..Import::default()
    });
    let cx = build_unit(&unit);

    let (_, a) = cx.find_class("p/A").unwrap();
    assert_eq!(a.methods()[0].return_descriptor(), "Ljava/lang/List;");
}

#[test]
fn literal_coercion_follows_descriptor() {
    assert_eq!(coerce_literal(&Literal::Int(7), "J"), Some(ConstantValue::Long(7)));
    assert_eq!(coerce_literal(&Literal::Int(2), "D"), Some(ConstantValue::Double(2.0)));
    assert_eq!(coerce_literal(&Literal::Float(1.5), "F"), Some(ConstantValue::Float(1.5)));
    assert_eq!(coerce_literal(&Literal::Bool(true), "Z"), Some(ConstantValue::Int(1)));
    assert_eq!(coerce_literal(&Literal::Char('A'), "C"), Some(ConstantValue::Int(65)));
    assert_eq!(
        coerce_literal(&Literal::String("hi".to_owned()), "Ljava/lang/String;"),
        Some(ConstantValue::String("hi".to_owned()))
    );
    assert_eq!(coerce_literal(&Literal::Int(-1), "C"), None);
    assert_eq!(coerce_literal(&Literal::Float(1.5), "I"), None);
    assert_eq!(coerce_literal(&Literal::Bool(true), "I"), None);
}
