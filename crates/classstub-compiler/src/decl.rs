//! Declaration tree handed over by a front end.
//!
//! This is the boundary between source parsing and model building. The Java
//! front end produces it directly; external providers can hand it over as
//! JSON.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Span;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Import {
    /// Dotted path, without a trailing `.*`.
    pub path: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub wildcard: bool,
    #[serde(default)]
    pub span: Option<Span>,
}

impl Import {
    pub fn single(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Interface => "interface",
            DeclKind::Enum => "enum",
            DeclKind::Record => "record",
            DeclKind::Annotation => "annotation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Default,
}

/// Modifier keywords in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(pub Vec<Modifier>);

impl Modifiers {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// The last visibility keyword, if any.
    pub fn visibility(&self) -> Option<Modifier> {
        self.0.iter().rev().copied().find(|m| {
            matches!(m, Modifier::Public | Modifier::Protected | Modifier::Private)
        })
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(value: [Modifier; N]) -> Self {
        Self(value.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub kind: DeclKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Superclass for classes; super-interfaces for interfaces.
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Type(TypeDecl),
    Callable(CallableDecl),
    Field(FieldDecl),
    /// Anything else the front end saw, e.g. an initializer block.
    Unsupported {
        what: String,
        #[serde(default)]
        span: Option<Span>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallableKind {
    #[default]
    Method,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallableDecl {
    pub name: String,
    #[serde(default)]
    pub kind: CallableKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Source type spelling; ignored for constructors.
    #[serde(default)]
    pub return_type: Option<String>,
    /// Parameter type spellings in order.
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub throws: Vec<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub initializer: Option<Initializer>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    Literal(Literal),
    /// Source text of a non-literal expression.
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
    Null,
}
