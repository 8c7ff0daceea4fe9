use crate::ast::{ClassNode, SyntaxNode};
use crate::error::JError;
use crate::lexer::TokenStream;
use crate::parser::parse;
use crate::serialization::outline;
pub use crate::serialization::{AnnotationOutline, FieldOutline, MethodOutline, Outline};
use crate::validator::{validate_class, ValidationReport};
use log::debug;
use serde::{Serialize, Serializer};
use std::path::Path;

/// How [`analyze_with`] treats a parsed compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Run the canonical name validator over the parsed class.
    pub resolve_canonical_names: bool,
    /// Freeze the resulting class tree.
    pub freeze: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            resolve_canonical_names: true,
            freeze: false,
        }
    }
}

/// The result of a successful analysis of one compilation unit.
/// `class` has been through the canonical name pass; `unresolved_class` is
/// the tree exactly as parsed.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub class: ClassNode,
    pub unresolved_class: ClassNode,
    pub report: ValidationReport,
}

impl Serialize for AnalysisResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl AnalysisResult {
    /// A serializable outline of the analyzed class tree.
    #[must_use]
    pub fn to_value(&self) -> Outline {
        outline(&self.class)
    }

    /// Serializes the outline into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the outline into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }

    /// The canonical source text of the analyzed class.
    #[must_use]
    pub fn render(&self) -> String {
        self.class.to_string()
    }
}

/// Parses a compilation unit and resolves its annotation names.
///
/// # Errors
/// Returns a `JError` if tokenizing or parsing fails.
pub fn analyze(source: &str, file_name: &str) -> Result<AnalysisResult, JError> {
    analyze_with(source, file_name, AnalyzeOptions::default())
}

/// [`analyze`] with explicit options.
///
/// # Errors
/// Returns a `JError` if tokenizing, parsing or validation fails.
pub fn analyze_with(
    source: &str,
    file_name: &str,
    options: AnalyzeOptions,
) -> Result<AnalysisResult, JError> {
    let tokens = TokenStream::new_with_name(source, file_name.to_string())?;
    let (mut class, _) = parse::<ClassNode>(&tokens, 0)?;
    let unresolved_class = class.clone();

    let report = if options.resolve_canonical_names {
        validate_class(&mut class)?
    } else {
        ValidationReport::default()
    };
    if options.freeze {
        class.freeze();
    }
    debug!(
        "analyzed {file_name}: {} {} with {} member(s)",
        class.class_kind().as_str(),
        class.name(),
        class.members().len()
    );

    Ok(AnalysisResult {
        class,
        unresolved_class,
        report,
    })
}

/// Reads `path` and analyzes its contents, using the path as the source name.
///
/// # Errors
/// Returns `JError::Io` if the file cannot be read, otherwise as [`analyze`].
pub fn analyze_file(path: impl AsRef<Path>) -> Result<AnalysisResult, JError> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|err| JError::Io {
        path: file_name.clone(),
        message: err.to_string(),
    })?;
    analyze(&source, &file_name)
}
