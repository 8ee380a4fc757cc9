use super::Span;

/// Diagnostic kinds, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Java source front end
    SyntaxError,
    MissingNode,

    // Outline mini-language
    NoClassDeclared,
    MalformedClassLine,
    MalformedMemberLine,
    UnexpectedCharacter,

    // Model building
    UnsupportedTypeKind,
    UnsupportedMember,
    UnsupportedInitializer,
    DuplicateClass,

    // Emission and output
    EmitFailed,
    WriteFailed,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnsupportedTypeKind
            | Self::UnsupportedMember
            | Self::UnsupportedInitializer
            | Self::DuplicateClass => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::NoClassDeclared => Some("start the outline with a `name:super:interfaces` line"),
            Self::MalformedClassLine => Some("expected `name:super:interfaces`"),
            Self::MalformedMemberLine => Some("expected `+name(params)return` or `-name(params)return`"),
            Self::UnsupportedInitializer => Some("only literal initializers become constants"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::SyntaxError => "syntax error",
            Self::MissingNode => "missing syntax",

            Self::NoClassDeclared => "no class declared before this line",
            Self::MalformedClassLine => "malformed class line",
            Self::MalformedMemberLine => "malformed member line",
            Self::UnexpectedCharacter => "unexpected character",

            Self::UnsupportedTypeKind => "unsupported type declaration",
            Self::UnsupportedMember => "unsupported member",
            Self::UnsupportedInitializer => "unsupported field initializer",
            Self::DuplicateClass => "class declared more than once",

            Self::EmitFailed => "cannot emit class",
            Self::WriteFailed => "cannot write class file",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnsupportedTypeKind => "{} declarations are not supported".to_string(),
            Self::DuplicateClass => "`{}` is declared more than once".to_string(),
            Self::UnexpectedCharacter => "unexpected character `{}`".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output; `None` for failures with no source location.
    pub(crate) span: Option<Span>,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Option<Span>, message: impl Into<String>) -> Self {
        let hints = kind.default_hint().map(str::to_owned).into_iter().collect();
        Self {
            kind,
            span,
            message: message.into(),
            hints,
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Option<Span>) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.severity())?;
        if let Some(span) = self.span {
            write!(f, " at {}..{}", span.start, span.end)?;
        }
        write!(f, ": {}", self.message)?;
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
