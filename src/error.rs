use crate::ast::NodeKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum JError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not read {path}: {message}")]
    #[diagnostic(code(io::read_failed))]
    Io { path: String, message: String },
}

impl JError {
    /// The aggregated diagnostic lines, in detection order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            JError::Parse(e) => e.messages.clone(),
            JError::Build(e) => e.messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// The construct a parser was working on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Package,
    Import,
    Annotation,
    Javadoc,
    Comment,
    Field,
    Method,
    StaticBlock,
    Class,
    Member,
    CompilationUnit,
}

impl Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::Package => "package declaration",
            Construct::Import => "import statement",
            Construct::Annotation => "annotation",
            Construct::Javadoc => "Javadoc",
            Construct::Comment => "comment",
            Construct::Field => "field",
            Construct::Method => "method",
            Construct::StaticBlock => "static block",
            Construct::Class => "class",
            Construct::Member => "class member",
            Construct::CompilationUnit => "compilation unit",
        };
        f.write_str(name)
    }
}

impl From<NodeKind> for Construct {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Package => Construct::Package,
            NodeKind::Import => Construct::Import,
            NodeKind::Annotation => Construct::Annotation,
            NodeKind::Javadoc => Construct::Javadoc,
            NodeKind::Comment => Construct::Comment,
            NodeKind::Field => Construct::Field,
            NodeKind::Method => Construct::Method,
            NodeKind::StaticBlock => Construct::StaticBlock,
            NodeKind::Class => Construct::Class,
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("Failed to parse {construct}:\n{}", .messages.join("\n"))]
#[diagnostic(
    code(parser::invalid_construct),
    help("Every line above is an independent defect; fix them all before parsing again.")
)]
pub struct ParseError {
    pub construct: Construct,
    pub messages: Vec<String>,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("while parsing this {construct}")]
    pub span: SourceSpan,
}

impl ParseError {
    /// All messages joined the way they are displayed.
    pub fn message(&self) -> String {
        self.messages.join("\n")
    }

    /// `leading` followed by this error's own messages, minus the lines
    /// `leading` already reports. Repeats within one side are kept, so a
    /// keyword written three times still yields two duplicate lines.
    pub fn merged_after(mut self, leading: &[String]) -> Self {
        let mut merged = leading.to_vec();
        merged.extend(
            self.messages
                .into_iter()
                .filter(|message| !leading.contains(message)),
        );
        self.messages = merged;
        self
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("Failed to build {kind}:\n{}", .messages.join("\n"))]
#[diagnostic(
    code(builder::invalid_node),
    help("Set every required field and remove conflicting options before calling build().")
)]
pub struct BuildError {
    pub kind: NodeKind,
    pub messages: Vec<String>,
}

impl BuildError {
    pub fn new(kind: NodeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            messages: vec![message.into()],
        }
    }

    pub(crate) fn frozen(kind: NodeKind) -> Self {
        Self::new(kind, format!("Cannot modify a frozen {kind}"))
    }

    pub fn message(&self) -> String {
        self.messages.join("\n")
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum TokenizeError {
    #[error("Unterminated comment")]
    #[diagnostic(
        code(lexer::unterminated_comment),
        help("Close the comment with `*/`.")
    )]
    UnterminatedComment {
        #[source_code]
        src: NamedSource<String>,
        #[label("comment starts here")]
        span: SourceSpan,
    },

    #[error("Unterminated string literal")]
    #[diagnostic(
        code(lexer::unterminated_string),
        help("String literals must close with `\"` on the same line; text blocks with `\"\"\"`.")
    )]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("string starts here")]
        span: SourceSpan,
    },

    #[error("Unterminated character literal")]
    #[diagnostic(
        code(lexer::unterminated_char),
        help("Character literals must close with `'` on the same line.")
    )]
    UnterminatedChar {
        #[source_code]
        src: NamedSource<String>,
        #[label("character literal starts here")]
        span: SourceSpan,
    },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Cannot resolve canonical names on frozen class `{class_name}`")]
    #[diagnostic(
        code(validator::frozen_tree),
        help("Canonical name resolution writes to annotations; run it before freezing the class.")
    )]
    FrozenTree { class_name: String },
}
