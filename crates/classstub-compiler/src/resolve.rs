//! Simple-name resolution for one compilation unit.
//!
//! Names are kept in dotted form here. Nested classes additionally get a
//! binary spelling with `$` so `p.Outer.Inner` can be written as
//! `p.Outer$Inner` once the model is built.

use classstub_core::{NESTED_SEPARATOR, is_primitive, split_array_suffix};
use indexmap::IndexMap;

/// Package every unresolvable simple name is assumed to live in.
pub const IMPLICIT_PACKAGE: &str = "java.lang";

#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    package: Option<String>,
    /// simple name → dotted qualified name
    table: IndexMap<String, String>,
    /// dotted qualified name of a nested class → its `$`-joined binary form
    nested: IndexMap<String, String>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn set_package(&mut self, package: Option<&str>) {
        self.package = package
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);
    }

    /// Register a single-type import under its last segment.
    pub fn register_import(&mut self, path: &str) {
        let path = path.trim();
        let simple = path.rsplit('.').next().unwrap_or(path);
        if !simple.is_empty() {
            self.table.insert(simple.to_owned(), path.to_owned());
        }
    }

    /// Register a top-level type and return its qualified name.
    pub fn register_top_level(&mut self, simple: &str) -> String {
        let qualified = match &self.package {
            Some(package) => format!("{package}.{simple}"),
            None => simple.to_owned(),
        };
        self.table.insert(simple.to_owned(), qualified.clone());
        qualified
    }

    /// Register a member type of `enclosing` and return its qualified name.
    ///
    /// `enclosing_binary` is the enclosing class's own binary spelling (dotted,
    /// with `$` for its own nesting levels).
    pub fn register_nested(
        &mut self,
        enclosing: &str,
        enclosing_binary: &str,
        simple: &str,
    ) -> String {
        let qualified = format!("{enclosing}.{simple}");
        let binary = format!("{enclosing_binary}{NESTED_SEPARATOR}{simple}");
        self.table.insert(simple.to_owned(), qualified.clone());
        self.nested.insert(qualified.clone(), binary);
        qualified
    }

    /// Qualified dotted name for `name`.
    ///
    /// Already-qualified names pass through, known simple names map through
    /// the table and everything else falls back to `java.lang`.
    pub fn resolve(&self, name: &str) -> String {
        let name = name.trim();
        if name.contains('.') {
            return name.to_owned();
        }
        match self.table.get(name) {
            Some(qualified) => qualified.clone(),
            None => format!("{IMPLICIT_PACKAGE}.{name}"),
        }
    }

    /// Binary spelling of a qualified name: nested classes use `$`.
    pub fn binary(&self, qualified: &str) -> String {
        match self.nested.get(qualified) {
            Some(binary) => binary.clone(),
            None => qualified.to_owned(),
        }
    }

    pub fn resolve_class(&self, name: &str) -> String {
        self.binary(&self.resolve(name))
    }

    /// Resolve the element of a type spelling, keeping primitives and array
    /// dimensions. Varargs become one `[]`.
    pub fn resolve_type(&self, spelling: &str) -> String {
        let (base, dims) = split_array_suffix(spelling);
        let mut out = if is_primitive(base) {
            base.to_owned()
        } else {
            self.resolve_class(base)
        };
        for _ in 0..dims {
            out.push_str("[]");
        }
        out
    }
}
