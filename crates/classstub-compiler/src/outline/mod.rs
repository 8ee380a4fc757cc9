//! The outline format: a line-oriented class description.
//!
//! ```text
//! # comment
//! com.test.MyGuard:java.lang.Thread:org.xml.Dumper,com.Resources
//! -getName()String
//! -setName(String)void
//! +setClassLoader(ClassLoader,com.abi.Gas,boolean)int
//! ```
//!
//! A class line is `name:super:interfaces` with super and interfaces
//! optional. A member line is `+` (static) or `-` (instance) followed by
//! `name(params)return`. Every class and method is public. Simple type names
//! resolve against the classes declared in the same file, then `java.lang`.

mod lexer;
mod parser;

#[cfg(test)]
mod outline_tests;

use classstub_core::{ClassBuilder, MethodBuilder, encode_type};

use crate::context::UnitContext;
use crate::diagnostics::Span;

/// Fatal outline input error. Recoverable problems go to the unit's
/// diagnostics instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    #[error("line {line}: no class declared before this line")]
    NoClassDeclared { line: usize, span: Span },
}

impl OutlineError {
    pub fn span(&self) -> Span {
        match self {
            OutlineError::NoClassDeclared { span, .. } => *span,
        }
    }
}

/// Parse outline text into the class model.
pub fn parse_outline(source: &str) -> Result<UnitContext, OutlineError> {
    let mut cx = UnitContext::new();
    let classes = parser::parse_lines(source, &mut cx.diagnostics)?;

    // Declared classes are visible from every line, including earlier ones.
    for name in classes.keys() {
        cx.resolver.register_import(name);
    }

    for class in classes.values() {
        let resolver = &cx.resolver;
        let super_name = class.super_name.map(|name| resolver.resolve_class(name));
        let interfaces: Vec<String> = class
            .interfaces
            .iter()
            .map(|name| resolver.resolve_class(name))
            .collect();

        let mut builder = ClassBuilder::new(class.name)
            .public()
            .super_name(super_name.as_deref())
            .interfaces(interfaces.iter().map(String::as_str));

        for method in &class.methods {
            let params = method
                .params
                .iter()
                .map(|p| encode_type(&resolver.resolve_type(p)));
            let ret = encode_type(&resolver.resolve_type(&method.ret));
            builder = builder.method(
                MethodBuilder::new(method.name, ret)
                    .public()
                    .static_(method.is_static)
                    .params(params)
                    .build(),
            );
        }

        cx.arena.alloc(builder.build());
    }

    Ok(cx)
}
