//! Model building: declaration tree → class arena.
//!
//! Two passes over the unit:
//! 1. Register the package, single-type imports and every top-level type
//! 2. Walk each type, registering member types before descending into them
//!
//! The resolver is mutated as the walk proceeds, so a nested type sees every
//! name registered before it.

use std::collections::HashSet;

use classstub_core::{
    Access, Class, ClassBuilder, ClassId, ClassModifier, ConstantValue, Field, FieldBuilder,
    Method, MethodBuilder, MethodModifier, TypeKind, Visibility, binary_name, encode_type,
};

use crate::context::UnitContext;
use crate::decl::{
    CallableDecl, CallableKind, CompilationUnit, DeclKind, FieldDecl, Initializer, Literal,
    Member, Modifier, Modifiers, TypeDecl,
};
use crate::diagnostics::DiagnosticKind;

/// Build the class model for one unit.
///
/// Unsupported declarations are reported to the context's diagnostics and
/// skipped; building itself never fails.
pub fn build_unit(unit: &CompilationUnit) -> UnitContext {
    let mut cx = UnitContext::new();
    cx.resolver.set_package(unit.package.as_deref());

    for import in &unit.imports {
        // Wildcard and static imports cannot be resolved without a classpath.
        if import.is_static || import.wildcard {
            continue;
        }
        cx.resolver.register_import(&import.path);
    }

    let qualified: Vec<String> = unit
        .types
        .iter()
        .map(|decl| cx.resolver.register_top_level(&decl.name))
        .collect();

    let mut builder = ModelBuilder {
        cx: &mut cx,
        seen: HashSet::new(),
    };
    for (decl, qualified) in unit.types.iter().zip(&qualified) {
        builder.visit_type(decl, qualified, qualified, None);
    }

    cx
}

/// Enclosing class of a member type.
#[derive(Clone, Copy)]
struct Enclosing {
    id: ClassId,
    is_interface: bool,
}

struct ModelBuilder<'a> {
    cx: &'a mut UnitContext,
    seen: HashSet<String>,
}

impl ModelBuilder<'_> {
    /// `qualified` is the dotted source name, `binary` the dotted name with
    /// `$` between nesting levels.
    fn visit_type(
        &mut self,
        decl: &TypeDecl,
        qualified: &str,
        binary: &str,
        enclosing: Option<Enclosing>,
    ) -> Option<ClassId> {
        let kind = match decl.kind {
            DeclKind::Class => TypeKind::Class,
            DeclKind::Interface => TypeKind::Interface,
            other => {
                self.cx
                    .diagnostics
                    .report(DiagnosticKind::UnsupportedTypeKind, decl.span)
                    .message(other.as_str())
                    .emit();
                return None;
            }
        };

        if !self.seen.insert(binary.to_owned()) {
            self.cx
                .diagnostics
                .report(DiagnosticKind::DuplicateClass, decl.span)
                .message(qualified)
                .emit();
            return None;
        }

        let class = self.class_header(decl, kind, binary, enclosing);
        let is_interface = class.is_interface();
        let id = match enclosing {
            Some(outer) => {
                let id = self.cx.arena.alloc_nested(outer.id, class);
                // A nested class lists itself so its own artifact carries the
                // InnerClasses record describing it.
                self.cx.arena.link_nested(id, id);
                id
            }
            None => self.cx.arena.alloc(class),
        };

        // Siblings first, so member types can refer to each other.
        for member in &decl.members {
            if let Member::Type(nested) = member {
                self.cx
                    .resolver
                    .register_nested(qualified, binary, &nested.name);
            }
        }

        let this = Enclosing { id, is_interface };
        for member in &decl.members {
            if let Member::Type(nested) = member {
                let nested_qualified = format!("{qualified}.{}", nested.name);
                let nested_binary = self.cx.resolver.binary(&nested_qualified);
                self.visit_type(nested, &nested_qualified, &nested_binary, Some(this));
            }
        }

        let mut has_constructor = false;
        for member in &decl.members {
            match member {
                Member::Type(_) => {}
                Member::Callable(callable) => {
                    has_constructor |= callable.kind == CallableKind::Constructor;
                    if let Some(method) = self.method(callable, is_interface) {
                        self.cx.arena.push_method(id, method);
                    }
                }
                Member::Field(field) => {
                    if let Some(field) = self.field(field, is_interface) {
                        self.cx.arena.push_field(id, field);
                    }
                }
                Member::Unsupported { what, span } => {
                    self.cx
                        .diagnostics
                        .report(DiagnosticKind::UnsupportedMember, *span)
                        .message(what.as_str())
                        .emit();
                }
            }
        }

        // Same implicit constructor a Java compiler would add.
        if !is_interface && !has_constructor {
            let visibility = self.cx.arena[id].access().visibility;
            let ctor = MethodBuilder::constructor().visibility(visibility).build();
            self.cx.arena.push_method(id, ctor);
        }

        Some(id)
    }

    fn class_header(
        &self,
        decl: &TypeDecl,
        kind: TypeKind,
        binary: &str,
        enclosing: Option<Enclosing>,
    ) -> Class {
        let resolver = &self.cx.resolver;
        let is_interface = kind == TypeKind::Interface;
        let in_interface = enclosing.is_some_and(|e| e.is_interface);

        let (super_name, interfaces) = if is_interface {
            (None, &decl.extends)
        } else {
            (decl.extends.first(), &decl.implements)
        };
        let super_name = super_name.map(|name| resolver.resolve_class(name));
        let interfaces: Vec<String> = interfaces
            .iter()
            .map(|name| resolver.resolve_class(name))
            .collect();

        let mut visibility = visibility_of(&decl.modifiers);
        if in_interface {
            visibility = Visibility::Public;
        }
        // Member interfaces and members of interfaces are implicitly static.
        let is_static = enclosing.is_some()
            && (decl.modifiers.has(Modifier::Static) || is_interface || in_interface);

        let modifier = if decl.modifiers.has(Modifier::Final) {
            ClassModifier::Final
        } else if decl.modifiers.has(Modifier::Abstract) {
            ClassModifier::Abstract
        } else {
            ClassModifier::None
        };

        ClassBuilder::new(binary)
            .kind(kind)
            .super_name(super_name.as_deref())
            .interfaces(interfaces.iter().map(String::as_str))
            .visibility(visibility)
            .static_(is_static)
            .modifier(modifier)
            .build()
    }

    fn method(&self, decl: &CallableDecl, in_interface: bool) -> Option<Method> {
        let resolver = &self.cx.resolver;
        let params: Vec<String> = decl
            .params
            .iter()
            .map(|p| encode_type(&resolver.resolve_type(p)))
            .collect();
        let exceptions: Vec<String> = decl
            .throws
            .iter()
            .map(|t| binary_name(&resolver.resolve_class(t)))
            .collect();
        let visibility = visibility_of(&decl.modifiers);

        if decl.kind == CallableKind::Constructor {
            if in_interface {
                return None;
            }
            let method = MethodBuilder::constructor()
                .visibility(visibility)
                .params(params)
                .exceptions(exceptions)
                .build();
            return Some(method);
        }

        let is_static = decl.modifiers.has(Modifier::Static);
        let ret = decl.return_type.as_deref().unwrap_or("void");
        let ret = encode_type(&resolver.resolve_type(ret));

        let mut modifier = if decl.modifiers.has(Modifier::Final) {
            MethodModifier::Final
        } else if decl.modifiers.has(Modifier::Abstract) {
            MethodModifier::Abstract
        } else if decl.modifiers.has(Modifier::Native) {
            MethodModifier::Native
        } else {
            MethodModifier::None
        };

        let visibility = if in_interface {
            let has_body = is_static
                || visibility == Visibility::Private
                || decl.modifiers.has(Modifier::Default);
            if !has_body {
                modifier = MethodModifier::Abstract;
            }
            match visibility {
                Visibility::Private => Visibility::Private,
                _ => Visibility::Public,
            }
        } else {
            visibility
        };

        let method = MethodBuilder::new(&decl.name, ret)
            .visibility(visibility)
            .static_(is_static)
            .modifier(modifier)
            .params(params)
            .exceptions(exceptions)
            .build();
        Some(method)
    }

    fn field(&mut self, decl: &FieldDecl, in_interface: bool) -> Option<Field> {
        let descriptor = encode_type(&self.cx.resolver.resolve_type(&decl.ty));

        let access = if in_interface {
            Access::public().with_static(true).with_final(true)
        } else {
            Access::new()
                .with_visibility(visibility_of(&decl.modifiers))
                .with_static(decl.modifiers.has(Modifier::Static))
                .with_final(decl.modifiers.has(Modifier::Final))
        };
        let builder = FieldBuilder::new(&decl.name, descriptor.as_str()).access(access);

        let literal = match &decl.initializer {
            None => return Some(builder.build()),
            Some(Initializer::Literal(literal)) => literal,
            Some(Initializer::Expression(text)) => {
                self.cx
                    .diagnostics
                    .report(DiagnosticKind::UnsupportedInitializer, decl.span)
                    .message(format!("`{}` = {text}", decl.name))
                    .emit();
                return None;
            }
        };

        if *literal == Literal::Null {
            return Some(builder.build());
        }

        match coerce_literal(literal, &descriptor) {
            Some(value) => Some(builder.constant(value).build()),
            None => {
                self.cx
                    .diagnostics
                    .report(DiagnosticKind::UnsupportedInitializer, decl.span)
                    .message(format!("literal does not fit `{}` of type `{}`", decl.name, decl.ty))
                    .emit();
                None
            }
        }
    }
}

fn visibility_of(modifiers: &Modifiers) -> Visibility {
    match modifiers.visibility() {
        Some(Modifier::Public) => Visibility::Public,
        Some(Modifier::Protected) => Visibility::Protected,
        Some(Modifier::Private) => Visibility::Private,
        _ => Visibility::Package,
    }
}

/// Convert a literal to the constant kind the field descriptor calls for.
pub(crate) fn coerce_literal(literal: &Literal, descriptor: &str) -> Option<ConstantValue> {
    let value = match (descriptor, literal) {
        ("I" | "S" | "B" | "C", Literal::Int(v)) => ConstantValue::Int(narrow(*v, descriptor)?),
        ("I" | "S" | "B" | "C", Literal::Char(c)) => {
            ConstantValue::Int(narrow(i64::from(u32::from(*c)), descriptor)?)
        }
        ("Z", Literal::Bool(b)) => ConstantValue::Int(i32::from(*b)),
        ("J", Literal::Int(v)) => ConstantValue::Long(*v),
        ("J", Literal::Char(c)) => ConstantValue::Long(i64::from(u32::from(*c))),
        ("F", Literal::Int(v)) => ConstantValue::Float(*v as f32),
        ("F", Literal::Float(v)) => ConstantValue::Float(*v as f32),
        ("D", Literal::Int(v)) => ConstantValue::Double(*v as f64),
        ("D", Literal::Float(v)) => ConstantValue::Double(*v),
        ("Ljava/lang/String;", Literal::String(s)) => ConstantValue::String(s.clone()),
        _ => return None,
    };
    Some(value)
}

fn narrow(value: i64, descriptor: &str) -> Option<i32> {
    let fits = match descriptor {
        "B" => i8::try_from(value).is_ok(),
        "S" => i16::try_from(value).is_ok(),
        "C" => u16::try_from(value).is_ok(),
        _ => i32::try_from(value).is_ok(),
    };
    if fits { i32::try_from(value).ok() } else { None }
}
