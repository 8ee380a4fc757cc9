//! Java source front end: `.java` text → declaration tree.
//!
//! Only declarations are lowered. Method bodies and initializer expressions
//! other than literals are never looked at. Generic arguments are erased;
//! type parameters become their first bound, or `java.lang.Object`.

mod literal;

#[cfg(test)]
mod java_tests;
#[cfg(test)]
mod literal_tests;

use arborium_tree_sitter::{Language, Node, Parser};

use crate::decl::{
    CallableDecl, CallableKind, CompilationUnit, DeclKind, FieldDecl, Import, Initializer, Member,
    Modifier, Modifiers, TypeDecl,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use literal::{TypeParams, erase_type, literal, negate};

const OBJECT: &str = "java.lang.Object";

/// Why a Java source produced no declaration tree.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrontendError {
    #[error("cannot load the Java grammar: {0}")]
    Grammar(String),
    #[error("the parser produced no syntax tree")]
    NoTree,
    #[error("source has {} syntax error(s)", .0.error_count())]
    Syntax(Diagnostics),
}

/// Parse Java source into a declaration tree.
///
/// A source that parses cleanly but declares no types yields an empty unit.
pub fn parse(source: &str) -> Result<CompilationUnit, FrontendError> {
    let language: Language = arborium_java::language().into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|err| FrontendError::Grammar(err.to_string()))?;
    let tree = parser.parse(source, None).ok_or(FrontendError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        let mut diagnostics = Diagnostics::new();
        collect_syntax_errors(root, &mut diagnostics);
        return Err(FrontendError::Syntax(diagnostics));
    }

    Ok(Lowering { source }.unit(root))
}

fn collect_syntax_errors(node: Node<'_>, diagnostics: &mut Diagnostics) {
    let span = Some(Span::from_range(node.byte_range()));
    if node.is_missing() {
        diagnostics
            .report(DiagnosticKind::MissingNode, span)
            .message(format!("`{}`", node.kind()))
            .emit();
    } else if node.is_error() {
        diagnostics.report(DiagnosticKind::SyntaxError, span).emit();
    } else if node.has_error() {
        for child in children(node) {
            collect_syntax_errors(child, diagnostics);
        }
    }
}

struct Lowering<'src> {
    source: &'src str,
}

impl<'src> Lowering<'src> {
    fn unit(&self, root: Node<'_>) -> CompilationUnit {
        let mut unit = CompilationUnit::default();
        let params = TypeParams::new();

        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    unit.package = named_children(child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
                        .map(|n| self.compact(n));
                }
                "import_declaration" => unit.imports.push(self.import(child)),
                _ => {
                    if let Some(decl) = self.type_decl(child, &params) {
                        unit.types.push(decl);
                    }
                }
            }
        }

        unit
    }

    fn import(&self, node: Node<'_>) -> Import {
        let all = children(node);
        let path = all
            .iter()
            .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
            .map(|n| self.compact(*n))
            .unwrap_or_default();

        Import {
            path,
            is_static: all.iter().any(|n| n.kind() == "static"),
            wildcard: all.iter().any(|n| n.kind() == "asterisk"),
            span: span(node),
        }
    }

    fn type_decl(&self, node: Node<'_>, outer: &TypeParams) -> Option<TypeDecl> {
        let kind = match node.kind() {
            "class_declaration" => DeclKind::Class,
            "interface_declaration" => DeclKind::Interface,
            "enum_declaration" => DeclKind::Enum,
            "record_declaration" => DeclKind::Record,
            "annotation_type_declaration" => DeclKind::Annotation,
            _ => return None,
        };

        let mut decl = TypeDecl {
            name: self.field_text(node, "name")?.to_owned(),
            kind,
            modifiers: self.modifiers(node),
            span: span(node),
            ..TypeDecl::default()
        };
        if !matches!(kind, DeclKind::Class | DeclKind::Interface) {
            return Some(decl);
        }

        let params = self.type_params(node, outer);

        if let Some(superclass) = child_of_kind(node, "superclass") {
            decl.extends = named_children(superclass)
                .into_iter()
                .map(|t| self.type_spelling(t, &params))
                .collect();
        }
        for list_kind in ["super_interfaces", "extends_interfaces"] {
            let Some(list) = child_of_kind(node, list_kind) else {
                continue;
            };
            let names = self.type_list(list, &params);
            if list_kind == "super_interfaces" {
                decl.implements = names;
            } else {
                decl.extends = names;
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            for member in named_children(body) {
                self.member(member, &params, &mut decl.members);
            }
        }

        Some(decl)
    }

    fn member(&self, node: Node<'_>, params: &TypeParams, out: &mut Vec<Member>) {
        match node.kind() {
            "field_declaration" | "constant_declaration" => {
                out.extend(self.fields(node, params).into_iter().map(Member::Field));
            }
            "method_declaration" => {
                out.extend(self.callable(node, CallableKind::Method, params).map(Member::Callable));
            }
            "constructor_declaration" => {
                out.extend(
                    self.callable(node, CallableKind::Constructor, params)
                        .map(Member::Callable),
                );
            }
            "line_comment" | "block_comment" => {}
            kind => match self.type_decl(node, params) {
                Some(nested) => out.push(Member::Type(nested)),
                None => out.push(Member::Unsupported {
                    what: describe_unsupported(kind),
                    span: span(node),
                }),
            },
        }
    }

    fn callable(
        &self,
        node: Node<'_>,
        kind: CallableKind,
        outer: &TypeParams,
    ) -> Option<CallableDecl> {
        let params = self.type_params(node, outer);

        let return_type = match kind {
            CallableKind::Constructor => None,
            CallableKind::Method => {
                let ty = node.child_by_field_name("type")?;
                let mut spelling = self.type_spelling(ty, &params);
                if let Some(dims) = node.child_by_field_name("dimensions") {
                    push_dimensions(&mut spelling, self.text(dims));
                }
                Some(spelling)
            }
        };

        let mut parameters = Vec::new();
        if let Some(list) = node.child_by_field_name("parameters") {
            for param in named_children(list) {
                if let Some(spelling) = self.parameter(param, &params) {
                    parameters.push(spelling);
                }
            }
        }

        let throws = child_of_kind(node, "throws")
            .map(|t| {
                named_children(t)
                    .into_iter()
                    .map(|n| self.type_spelling(n, &params))
                    .collect()
            })
            .unwrap_or_default();

        Some(CallableDecl {
            name: self.field_text(node, "name")?.to_owned(),
            kind,
            modifiers: self.modifiers(node),
            return_type,
            params: parameters,
            throws,
            span: span(node),
        })
    }

    fn parameter(&self, node: Node<'_>, params: &TypeParams) -> Option<String> {
        match node.kind() {
            "formal_parameter" => {
                let ty = node.child_by_field_name("type")?;
                let mut spelling = self.type_spelling(ty, params);
                if let Some(dims) = node.child_by_field_name("dimensions") {
                    push_dimensions(&mut spelling, self.text(dims));
                }
                Some(spelling)
            }
            "spread_parameter" => {
                let ty = named_children(node).into_iter().find(|n| {
                    !matches!(
                        n.kind(),
                        "modifiers" | "variable_declarator" | "annotation" | "marker_annotation"
                    )
                })?;
                Some(format!("{}...", self.type_spelling(ty, params)))
            }
            // `receiver_parameter` and comments
            _ => None,
        }
    }

    fn fields(&self, node: Node<'_>, params: &TypeParams) -> Vec<FieldDecl> {
        let Some(ty) = node.child_by_field_name("type") else {
            return Vec::new();
        };
        let base = self.type_spelling(ty, params);
        let modifiers = self.modifiers(node);

        named_children(node)
            .into_iter()
            .filter(|n| n.kind() == "variable_declarator")
            .filter_map(|declarator| {
                let name = self.field_text(declarator, "name")?.to_owned();
                let mut ty = base.clone();
                if let Some(dims) = declarator.child_by_field_name("dimensions") {
                    push_dimensions(&mut ty, self.text(dims));
                }
                let initializer = declarator
                    .child_by_field_name("value")
                    .map(|value| self.initializer(value));
                Some(FieldDecl {
                    name,
                    ty,
                    modifiers: modifiers.clone(),
                    initializer,
                    span: span(declarator),
                })
            })
            .collect()
    }

    fn initializer(&self, value: Node<'_>) -> Initializer {
        let text = self.text(value);
        if let Some(lit) = literal(value.kind(), text) {
            return Initializer::Literal(lit);
        }

        if value.kind() == "unary_expression" {
            let operator = value.child_by_field_name("operator").map(|o| self.text(o));
            let operand = value.child_by_field_name("operand");
            if let (Some("-"), Some(operand)) = (operator, operand) {
                let negated = literal(operand.kind(), self.text(operand)).and_then(negate);
                if let Some(lit) = negated {
                    return Initializer::Literal(lit);
                }
            }
        }

        Initializer::Expression(text.to_owned())
    }

    fn modifiers(&self, node: Node<'_>) -> Modifiers {
        let Some(list) = child_of_kind(node, "modifiers") else {
            return Modifiers::default();
        };
        let found = children(list)
            .into_iter()
            .filter_map(|m| match m.kind() {
                "public" => Some(Modifier::Public),
                "protected" => Some(Modifier::Protected),
                "private" => Some(Modifier::Private),
                "static" => Some(Modifier::Static),
                "final" => Some(Modifier::Final),
                "abstract" => Some(Modifier::Abstract),
                "native" => Some(Modifier::Native),
                "default" => Some(Modifier::Default),
                _ => None,
            })
            .collect();
        Modifiers(found)
    }

    /// `outer` extended with the type parameters declared on `node`.
    fn type_params(&self, node: Node<'_>, outer: &TypeParams) -> TypeParams {
        let mut params = outer.clone();
        let Some(list) = node.child_by_field_name("type_parameters") else {
            return params;
        };

        for param in named_children(list) {
            if param.kind() != "type_parameter" {
                continue;
            }
            let parts = named_children(param);
            let Some(name) = parts
                .iter()
                .find(|n| matches!(n.kind(), "type_identifier" | "identifier"))
            else {
                continue;
            };
            let bound = parts
                .iter()
                .find(|n| n.kind() == "type_bound")
                .and_then(|b| named_children(*b).into_iter().next())
                .map(|t| self.type_spelling(t, &params))
                .unwrap_or_else(|| OBJECT.to_owned());
            params.insert(self.text(*name).to_owned(), bound);
        }
        params
    }

    fn type_list(&self, node: Node<'_>, params: &TypeParams) -> Vec<String> {
        named_children(node)
            .into_iter()
            .flat_map(|n| {
                if n.kind() == "type_list" {
                    named_children(n)
                } else {
                    vec![n]
                }
            })
            .map(|t| self.type_spelling(t, params))
            .collect()
    }

    fn type_spelling(&self, node: Node<'_>, params: &TypeParams) -> String {
        erase_type(self.text(node), params)
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> Option<&'src str> {
        node.child_by_field_name(field).map(|n| self.text(n))
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        &self.source[node.byte_range()]
    }

    /// Node text without whitespace, for dotted names split across lines.
    fn compact(&self, node: Node<'_>) -> String {
        self.text(node).split_whitespace().collect()
    }
}

fn push_dimensions(spelling: &mut String, dims: &str) {
    for _ in dims.matches('[') {
        spelling.push_str("[]");
    }
}

fn describe_unsupported(kind: &str) -> String {
    match kind {
        "static_initializer" => "static initializer".to_owned(),
        "block" => "instance initializer".to_owned(),
        other => other.replace('_', " "),
    }
}

fn span(node: Node<'_>) -> Option<Span> {
    Some(Span::from_range(node.byte_range()))
}

fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|n| n.kind() == kind)
}
