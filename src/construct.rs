//! Construct occurrences handed to documentation sources.

use serde::{Deserialize, Serialize};

/// Byte range of a construct in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What kind of language element a construct is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    /// A command invocation (builtin or external).
    Command,
    Keyword,
    Operator,
    Variable,
    Other,
}

impl ConstructKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructKind::Command => "command",
            ConstructKind::Keyword => "keyword",
            ConstructKind::Operator => "operator",
            ConstructKind::Variable => "variable",
            ConstructKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConstructKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "command" => Ok(ConstructKind::Command),
            "keyword" => Ok(ConstructKind::Keyword),
            "operator" => Ok(ConstructKind::Operator),
            "variable" => Ok(ConstructKind::Variable),
            "other" => Ok(ConstructKind::Other),
            _ => Err(format!("unknown construct kind: {}", s)),
        }
    }
}

/// A language element at a position in a document.
///
/// Documentation sources only read through it. The tooling that recognises
/// constructs builds these; nothing in this crate parses shell source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Construct {
    pub kind: ConstructKind,
    /// Literal text of the element, e.g. `echo`.
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

impl Construct {
    pub fn new(kind: ConstructKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// A command construct with a span covering just its text.
    pub fn command(text: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(0, text.len());
        Self {
            kind: ConstructKind::Command,
            text,
            span,
        }
    }

    pub fn is_command(&self) -> bool {
        self.kind == ConstructKind::Command
    }
}
