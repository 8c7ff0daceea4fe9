//! The syntax-tree model.
//!
//! Every node is one representation with an `editable` capability flag: nodes
//! come out of builders and parsers editable, and `freeze` turns a node and
//! everything it owns into the frozen variant. Equality is equality of the
//! canonical rendering produced by `Display`.

use crate::error::BuildError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// One level of indentation in canonical output.
pub const INDENT: &str = "    ";

/// Widest single line a Javadoc or block comment is rendered condensed with.
pub const CONDENSED_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Package,
    Import,
    Annotation,
    Javadoc,
    Comment,
    Field,
    Method,
    StaticBlock,
    Class,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Package => "package declaration",
            NodeKind::Import => "import statement",
            NodeKind::Annotation => "annotation",
            NodeKind::Javadoc => "Javadoc",
            NodeKind::Comment => "comment",
            NodeKind::Field => "field",
            NodeKind::Method => "method",
            NodeKind::StaticBlock => "static block",
            NodeKind::Class => "class",
        };
        f.write_str(name)
    }
}

/// Capabilities shared by every node of the model.
pub trait SyntaxNode: Display {
    fn kind(&self) -> NodeKind;

    /// `true` for the mutable variant, `false` once frozen.
    fn is_editable(&self) -> bool;

    /// Freezes this node and every node it owns.
    fn freeze(&mut self);

    fn into_frozen(mut self) -> Self
    where
        Self: Sized,
    {
        self.freeze();
        self
    }
}

macro_rules! text_equality {
    ($($node:ty),* $(,)?) => {$(
        impl PartialEq for $node {
            fn eq(&self, other: &Self) -> bool {
                self.to_string() == other.to_string()
            }
        }

        impl Eq for $node {}

        impl Hash for $node {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.to_string().hash(state);
            }
        }
    )*};
}

text_equality!(
    PackageNode,
    ImportNode,
    AnnotationNode,
    JavadocNode,
    CommentNode,
    FieldNode,
    MethodNode,
    StaticBlockNode,
    ClassNode,
    Member,
);

fn ensure_editable(editable: bool, kind: NodeKind) -> Result<(), BuildError> {
    if editable {
        Ok(())
    } else {
        Err(BuildError::frozen(kind))
    }
}

/// Prefixes every non-empty line with one level of indentation.
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_block(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return f.write_str(" { }");
    }
    f.write_str(" {\n")?;
    f.write_str(&indent(&lines.join("\n")))?;
    f.write_str("\n}")
}

fn write_prefix(
    f: &mut fmt::Formatter<'_>,
    section_comment: &Option<CommentNode>,
    javadoc: &Option<JavadocNode>,
    annotations: &[AnnotationNode],
) -> fmt::Result {
    if let Some(comment) = section_comment {
        writeln!(f, "{comment}")?;
    }
    if let Some(doc) = javadoc {
        writeln!(f, "{doc}")?;
    }
    for annotation in annotations {
        writeln!(f, "{annotation}")?;
    }
    Ok(())
}

// --- Modifiers ---

/// Declaration modifiers, ordered the way canonical output lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
        }
    }

    pub fn is_visibility(self) -> bool {
        matches!(self, Modifier::Public | Modifier::Protected | Modifier::Private)
    }
}

impl Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects modifiers given in source order. Every repeated occurrence
    /// and any mix of visibilities is reported; the set keeps one of each.
    pub fn collect(in_order: &[Modifier]) -> (Modifiers, Vec<String>) {
        let mut set = Modifiers::new();
        let mut messages = Vec::new();
        let mut visibilities: Vec<Modifier> = Vec::new();

        for modifier in in_order {
            if !set.0.insert(*modifier) {
                messages.push(format!("Found duplicate modifier: {modifier}"));
            }
            if modifier.is_visibility() && !visibilities.contains(modifier) {
                visibilities.push(*modifier);
            }
        }

        if visibilities.len() > 1 {
            let listed: Vec<&str> = visibilities.iter().map(|m| m.as_str()).collect();
            messages.push(format!(
                "Found multiple visibility modifiers: {}",
                listed.join(", ")
            ));
        }

        (set, messages)
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn insert(&mut self, modifier: Modifier) -> bool {
        self.0.insert(modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn visibility(&self) -> Option<Modifier> {
        self.iter().find(|m| m.is_visibility())
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        Modifiers(iter.into_iter().collect())
    }
}

impl Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.iter().map(|m| m.as_str()).collect();
        f.write_str(&words.join(" "))
    }
}

// --- Package and imports ---

#[derive(Debug, Clone)]
pub struct PackageNode {
    pub(crate) name: String,
    pub(crate) editable: bool,
}

impl PackageNode {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for PackageNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package {};", self.name)
    }
}

impl SyntaxNode for PackageNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Package
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
    }
}

#[derive(Debug, Clone)]
pub struct ImportNode {
    pub(crate) name: String,
    pub(crate) is_static: bool,
    pub(crate) is_wildcard: bool,
    pub(crate) editable: bool,
}

impl ImportNode {
    /// The imported name, without a trailing `.*`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// The trailing identifier of a single-name import.
    pub fn simple_name(&self) -> Option<&str> {
        if self.is_wildcard {
            return None;
        }
        self.name.rsplit('.').next()
    }
}

impl Display for ImportNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("import ")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        f.write_str(&self.name)?;
        if self.is_wildcard {
            f.write_str(".*")?;
        }
        f.write_str(";")
    }
}

impl SyntaxNode for ImportNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Import
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
    }
}

// --- Annotations ---

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationParam {
    /// `None` for the single-value shorthand `@A(value)`.
    pub name: Option<String>,
    pub value: String,
}

impl Display for AnnotationParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} = {}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationNode {
    pub(crate) name: String,
    pub(crate) canonical_name: String,
    pub(crate) params: Vec<AnnotationParam>,
    pub(crate) editable: bool,
}

impl AnnotationNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last segment of the written name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Blank until the canonical name validator resolves it.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn is_resolved(&self) -> bool {
        !self.canonical_name.trim().is_empty()
    }

    pub fn params(&self) -> &[AnnotationParam] {
        &self.params
    }

    pub fn set_canonical_name(&mut self, name: impl Into<String>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Annotation)?;
        self.canonical_name = name.into();
        Ok(())
    }
}

impl Display for AnnotationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
            write!(f, "({})", params.join(", "))?;
        }
        Ok(())
    }
}

impl SyntaxNode for AnnotationNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Annotation
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
    }
}

// --- Javadoc and comments ---

#[derive(Debug, Clone)]
pub struct JavadocNode {
    pub(crate) description: Vec<String>,
    pub(crate) params: Vec<(String, String)>,
    pub(crate) return_desc: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) since: Option<String>,
    pub(crate) other_tags: Vec<(String, String)>,
    pub(crate) editable: bool,
}

fn tag_line(tag: &str, text: &str) -> String {
    if text.is_empty() {
        format!("@{tag}")
    } else {
        format!("@{tag} {text}")
    }
}

impl JavadocNode {
    pub fn description(&self) -> &[String] {
        &self.description
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn return_desc(&self) -> Option<&str> {
        self.return_desc.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn since(&self) -> Option<&str> {
        self.since.as_deref()
    }

    pub fn other_tags(&self) -> &[(String, String)] {
        &self.other_tags
    }

    /// Tag lines in canonical order.
    pub fn tag_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (name, text) in &self.params {
            lines.push(tag_line("param", format!("{name} {text}").trim_end()));
        }
        if let Some(text) = &self.return_desc {
            lines.push(tag_line("return", text));
        }
        if let Some(text) = &self.author {
            lines.push(tag_line("author", text));
        }
        if let Some(text) = &self.version {
            lines.push(tag_line("version", text));
        }
        if let Some(text) = &self.since {
            lines.push(tag_line("since", text));
        }
        for (tag, text) in &self.other_tags {
            lines.push(tag_line(tag, text));
        }
        lines
    }

    /// Whether the content fits the single-line `/** ... */` form.
    pub fn is_condensed(&self) -> bool {
        let tags = self.tag_lines();
        match (self.description.len(), tags.len()) {
            (0, 0) => true,
            (1, 0) => fits_condensed(&self.description[0]),
            (0, 1) => fits_condensed(&tags[0]),
            _ => false,
        }
    }
}

impl Display for JavadocNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = self.tag_lines();
        if self.is_condensed() {
            return match self.description.first().or(tags.first()) {
                Some(line) => write!(f, "/** {line} */"),
                None => f.write_str("/** */"),
            };
        }
        f.write_str("/**\n")?;
        for line in &self.description {
            write_star_line(f, line)?;
        }
        if !self.description.is_empty() && !tags.is_empty() {
            f.write_str(" *\n")?;
        }
        for line in &tags {
            write_star_line(f, line)?;
        }
        f.write_str(" */")
    }
}

fn write_star_line(f: &mut fmt::Formatter<'_>, line: &str) -> fmt::Result {
    if line.is_empty() {
        f.write_str(" *\n")
    } else {
        writeln!(f, " * {line}")
    }
}

impl SyntaxNode for JavadocNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Javadoc
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    Line,
    Block,
    /// A `/** ... */` comment kept as a file header rather than as Javadoc.
    Doc,
}

#[derive(Debug, Clone)]
pub struct CommentNode {
    pub(crate) style: CommentStyle,
    pub(crate) lines: Vec<String>,
    pub(crate) editable: bool,
}

impl CommentNode {
    pub fn style(&self) -> CommentStyle {
        self.style
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_doc(&self) -> bool {
        self.style == CommentStyle::Doc
    }
}

/// Doc-style comments only survive a round-trip as file header comments.
pub(crate) const DOC_COMMENT_PLACEMENT: &str =
    "Doc-style comments can only be file header comments";

fn ensure_plain_section(comment: &Option<CommentNode>, kind: NodeKind) -> Result<(), BuildError> {
    match comment {
        Some(comment) if comment.is_doc() => Err(BuildError::new(kind, DOC_COMMENT_PLACEMENT)),
        _ => Ok(()),
    }
}

/// Whether `line` fits the single-line `/** ... */` or `/* ... */` form.
fn fits_condensed(line: &str) -> bool {
    line.chars().count() <= CONDENSED_WIDTH
}

impl Display for CommentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.style, self.lines.as_slice()) {
            (CommentStyle::Line, []) => f.write_str("//"),
            (CommentStyle::Line, lines) => write!(f, "// {}", lines.join(" ")),
            (style, lines) => {
                let open = if style == CommentStyle::Doc { "/**" } else { "/*" };
                match lines {
                    [] => write!(f, "{open} */"),
                    [line] if fits_condensed(line) => write!(f, "{open} {line} */"),
                    lines => {
                        writeln!(f, "{open}")?;
                        for line in lines {
                            write_star_line(f, line)?;
                        }
                        f.write_str(" */")
                    }
                }
            }
        }
    }
}

impl SyntaxNode for CommentNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Comment
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
    }
}

// --- Fields ---

#[derive(Debug, Clone)]
pub struct FieldNode {
    pub(crate) section_comment: Option<CommentNode>,
    pub(crate) javadoc: Option<JavadocNode>,
    pub(crate) annotations: Vec<AnnotationNode>,
    pub(crate) modifiers: Modifiers,
    pub(crate) field_type: String,
    pub(crate) name: String,
    pub(crate) value: Option<String>,
    pub(crate) editable: bool,
}

impl FieldNode {
    pub fn section_comment(&self) -> Option<&CommentNode> {
        self.section_comment.as_ref()
    }

    pub fn javadoc(&self) -> Option<&JavadocNode> {
        self.javadoc.as_ref()
    }

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_javadoc(&mut self, javadoc: Option<JavadocNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Field)?;
        self.javadoc = javadoc;
        Ok(())
    }

    pub fn set_annotations(&mut self, annotations: Vec<AnnotationNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Field)?;
        self.annotations = annotations;
        Ok(())
    }

    pub fn set_section_comment(&mut self, comment: Option<CommentNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Field)?;
        ensure_plain_section(&comment, NodeKind::Field)?;
        self.section_comment = comment;
        Ok(())
    }

    pub(crate) fn annotations_mut(&mut self) -> &mut [AnnotationNode] {
        &mut self.annotations
    }
}

impl Display for FieldNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.section_comment, &self.javadoc, &self.annotations)?;
        if !self.modifiers.is_empty() {
            write!(f, "{} ", self.modifiers)?;
        }
        write!(f, "{} {}", self.field_type, self.name)?;
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        f.write_str(";")
    }
}

impl SyntaxNode for FieldNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Field
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
        freeze_prefix(&mut self.section_comment, &mut self.javadoc, &mut self.annotations);
    }
}

fn freeze_prefix(
    section_comment: &mut Option<CommentNode>,
    javadoc: &mut Option<JavadocNode>,
    annotations: &mut [AnnotationNode],
) {
    if let Some(comment) = section_comment {
        comment.freeze();
    }
    if let Some(doc) = javadoc {
        doc.freeze();
    }
    annotations.iter_mut().for_each(SyntaxNode::freeze);
}

// --- Methods ---

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub annotations: Vec<AnnotationNode>,
    pub is_final: bool,
    pub param_type: String,
    pub name: String,
}

impl Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        if self.is_final {
            f.write_str("final ")?;
        }
        write!(f, "{} {}", self.param_type, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct MethodNode {
    pub(crate) section_comment: Option<CommentNode>,
    pub(crate) javadoc: Option<JavadocNode>,
    pub(crate) annotations: Vec<AnnotationNode>,
    pub(crate) modifiers: Modifiers,
    pub(crate) type_parameters: Option<String>,
    /// `None` for constructors.
    pub(crate) return_type: Option<String>,
    pub(crate) name: String,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) throws: Vec<String>,
    /// `None` when the declaration ends in `;`.
    pub(crate) body: Option<Vec<String>>,
    pub(crate) editable: bool,
}

impl MethodNode {
    pub fn section_comment(&self) -> Option<&CommentNode> {
        self.section_comment.as_ref()
    }

    pub fn javadoc(&self) -> Option<&JavadocNode> {
        self.javadoc.as_ref()
    }

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn type_parameters(&self) -> Option<&str> {
        self.type_parameters.as_deref()
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn throws(&self) -> &[String] {
        &self.throws
    }

    pub fn body(&self) -> Option<&[String]> {
        self.body.as_deref()
    }

    pub fn set_javadoc(&mut self, javadoc: Option<JavadocNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Method)?;
        self.javadoc = javadoc;
        Ok(())
    }

    pub fn set_annotations(&mut self, annotations: Vec<AnnotationNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Method)?;
        self.annotations = annotations;
        Ok(())
    }

    pub fn set_section_comment(&mut self, comment: Option<CommentNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Method)?;
        ensure_plain_section(&comment, NodeKind::Method)?;
        self.section_comment = comment;
        Ok(())
    }

    pub(crate) fn annotations_mut(&mut self) -> &mut [AnnotationNode] {
        &mut self.annotations
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut [Parameter] {
        &mut self.parameters
    }
}

impl Display for MethodNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.section_comment, &self.javadoc, &self.annotations)?;
        if !self.modifiers.is_empty() {
            write!(f, "{} ", self.modifiers)?;
        }
        if let Some(type_parameters) = &self.type_parameters {
            write!(f, "{type_parameters} ")?;
        }
        if let Some(return_type) = &self.return_type {
            write!(f, "{return_type} ")?;
        }
        let params: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.name, params.join(", "))?;
        if !self.throws.is_empty() {
            write!(f, " throws {}", self.throws.join(", "))?;
        }
        match &self.body {
            Some(lines) => write_block(f, lines),
            None => f.write_str(";"),
        }
    }
}

impl SyntaxNode for MethodNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Method
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
        freeze_prefix(&mut self.section_comment, &mut self.javadoc, &mut self.annotations);
        for parameter in &mut self.parameters {
            parameter.annotations.iter_mut().for_each(SyntaxNode::freeze);
        }
    }
}

// --- Static blocks ---

#[derive(Debug, Clone)]
pub struct StaticBlockNode {
    pub(crate) lines: Vec<String>,
    pub(crate) editable: bool,
}

impl StaticBlockNode {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Display for StaticBlockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("static")?;
        write_block(f, &self.lines)
    }
}

impl SyntaxNode for StaticBlockNode {
    fn kind(&self) -> NodeKind {
        NodeKind::StaticBlock
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
    }
}

// --- Classes ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
}

impl ClassKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
        }
    }
}

/// A class body entry. Order is preserved exactly as declared.
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldNode),
    Method(MethodNode),
    StaticBlock(StaticBlockNode),
    Class(Box<ClassNode>),
    Comment(CommentNode),
}

impl Member {
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Field(field) => Some(field.name()),
            Member::Method(method) => Some(method.name()),
            Member::Class(class) => Some(class.name()),
            Member::StaticBlock(_) | Member::Comment(_) => None,
        }
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Field(node) => write!(f, "{node}"),
            Member::Method(node) => write!(f, "{node}"),
            Member::StaticBlock(node) => write!(f, "{node}"),
            Member::Class(node) => write!(f, "{node}"),
            Member::Comment(node) => write!(f, "{node}"),
        }
    }
}

impl SyntaxNode for Member {
    fn kind(&self) -> NodeKind {
        match self {
            Member::Field(node) => node.kind(),
            Member::Method(node) => node.kind(),
            Member::StaticBlock(node) => node.kind(),
            Member::Class(node) => node.kind(),
            Member::Comment(node) => node.kind(),
        }
    }

    fn is_editable(&self) -> bool {
        match self {
            Member::Field(node) => node.is_editable(),
            Member::Method(node) => node.is_editable(),
            Member::StaticBlock(node) => node.is_editable(),
            Member::Class(node) => node.is_editable(),
            Member::Comment(node) => node.is_editable(),
        }
    }

    fn freeze(&mut self) {
        match self {
            Member::Field(node) => node.freeze(),
            Member::Method(node) => node.freeze(),
            Member::StaticBlock(node) => node.freeze(),
            Member::Class(node) => node.freeze(),
            Member::Comment(node) => node.freeze(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassNode {
    pub(crate) header_comments: Vec<CommentNode>,
    pub(crate) package: Option<PackageNode>,
    pub(crate) imports: Vec<ImportNode>,
    pub(crate) section_comment: Option<CommentNode>,
    pub(crate) javadoc: Option<JavadocNode>,
    pub(crate) annotations: Vec<AnnotationNode>,
    pub(crate) modifiers: Modifiers,
    pub(crate) class_kind: ClassKind,
    pub(crate) name: String,
    pub(crate) type_parameters: Option<String>,
    pub(crate) super_class: Option<String>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) members: Vec<Member>,
    pub(crate) trailing_comments: Vec<CommentNode>,
    pub(crate) inner: bool,
    pub(crate) editable: bool,
}

impl ClassNode {
    pub fn header_comments(&self) -> &[CommentNode] {
        &self.header_comments
    }

    pub fn package(&self) -> Option<&PackageNode> {
        self.package.as_ref()
    }

    pub fn imports(&self) -> &[ImportNode] {
        &self.imports
    }

    pub fn section_comment(&self) -> Option<&CommentNode> {
        self.section_comment.as_ref()
    }

    pub fn javadoc(&self) -> Option<&JavadocNode> {
        self.javadoc.as_ref()
    }

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn class_kind(&self) -> ClassKind {
        self.class_kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_parameters(&self) -> Option<&str> {
        self.type_parameters.as_deref()
    }

    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    /// Implemented interfaces; for an interface, the interfaces it extends.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn trailing_comments(&self) -> &[CommentNode] {
        &self.trailing_comments
    }

    pub fn is_inner(&self) -> bool {
        self.inner
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldNode> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodNode> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn inner_classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.members.iter().filter_map(|m| match m {
            Member::Class(class) => Some(class.as_ref()),
            _ => None,
        })
    }

    pub fn set_javadoc(&mut self, javadoc: Option<JavadocNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        self.javadoc = javadoc;
        Ok(())
    }

    pub fn set_annotations(&mut self, annotations: Vec<AnnotationNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        self.annotations = annotations;
        Ok(())
    }

    pub fn set_section_comment(&mut self, comment: Option<CommentNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        ensure_plain_section(&comment, NodeKind::Class)?;
        self.section_comment = comment;
        Ok(())
    }

    pub fn set_package(&mut self, package: Option<PackageNode>) -> Result<(), BuildError> {
        self.ensure_outer_edit()?;
        self.package = package;
        Ok(())
    }

    pub fn set_imports(&mut self, imports: Vec<ImportNode>) -> Result<(), BuildError> {
        self.ensure_outer_edit()?;
        self.imports = imports;
        Ok(())
    }

    pub fn set_header_comments(&mut self, comments: Vec<CommentNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        self.header_comments = comments;
        Ok(())
    }

    pub fn set_trailing_comments(&mut self, comments: Vec<CommentNode>) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        self.trailing_comments = comments;
        Ok(())
    }

    pub fn push_member(&mut self, member: Member) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        self.members.push(member);
        Ok(())
    }

    fn ensure_outer_edit(&self) -> Result<(), BuildError> {
        ensure_editable(self.editable, NodeKind::Class)?;
        if self.inner {
            return Err(BuildError::new(
                NodeKind::Class,
                "Inner classes cannot declare a package or imports",
            ));
        }
        Ok(())
    }

    pub(crate) fn annotations_mut(&mut self) -> &mut [AnnotationNode] {
        &mut self.annotations
    }

    pub(crate) fn members_mut(&mut self) -> &mut [Member] {
        &mut self.members
    }
}

impl Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.header_comments {
            writeln!(f, "{comment}")?;
        }
        if let Some(package) = &self.package {
            write!(f, "{package}\n\n")?;
        }
        if !self.imports.is_empty() {
            for import in &self.imports {
                writeln!(f, "{import}")?;
            }
            f.write_str("\n")?;
        }
        write_prefix(f, &self.section_comment, &self.javadoc, &self.annotations)?;
        if !self.modifiers.is_empty() {
            write!(f, "{} ", self.modifiers)?;
        }
        write!(f, "{} {}", self.class_kind.as_str(), self.name)?;
        if let Some(type_parameters) = &self.type_parameters {
            f.write_str(type_parameters)?;
        }
        if let Some(super_class) = &self.super_class {
            write!(f, " extends {super_class}")?;
        }
        if !self.interfaces.is_empty() {
            let keyword = match self.class_kind {
                ClassKind::Class => "implements",
                ClassKind::Interface => "extends",
            };
            write!(f, " {keyword} {}", self.interfaces.join(", "))?;
        }
        if self.members.is_empty() {
            f.write_str(" { }")?;
        } else {
            let members: Vec<String> = self.members.iter().map(|m| indent(&m.to_string())).collect();
            write!(f, " {{\n{}\n}}", members.join("\n\n"))?;
        }
        for comment in &self.trailing_comments {
            write!(f, "\n{comment}")?;
        }
        Ok(())
    }
}

impl SyntaxNode for ClassNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Class
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn freeze(&mut self) {
        self.editable = false;
        self.header_comments.iter_mut().for_each(SyntaxNode::freeze);
        if let Some(package) = &mut self.package {
            package.freeze();
        }
        self.imports.iter_mut().for_each(SyntaxNode::freeze);
        freeze_prefix(&mut self.section_comment, &mut self.javadoc, &mut self.annotations);
        self.members.iter_mut().for_each(SyntaxNode::freeze);
        self.trailing_comments.iter_mut().for_each(SyntaxNode::freeze);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CommentBuilder, JavadocBuilder};

    #[test]
    fn test_condensed_width_counts_characters() {
        let text = "é".repeat(60);
        let javadoc = JavadocBuilder::new().description(text.as_str()).build().unwrap();
        assert!(javadoc.is_condensed());
        assert_eq!(javadoc.to_string(), format!("/** {text} */"));

        let comment = CommentBuilder::block().text(text.as_str()).build().unwrap();
        assert_eq!(comment.to_string(), format!("/* {text} */"));

        let wide = "é".repeat(CONDENSED_WIDTH + 1);
        let comment = CommentBuilder::block().text(wide.as_str()).build().unwrap();
        assert_eq!(comment.to_string(), format!("/*\n * {wide}\n */"));
    }

    #[test]
    fn test_modifier_collection_reports_each_duplicate() {
        let (set, messages) = Modifiers::collect(&[
            Modifier::Static,
            Modifier::Static,
            Modifier::Final,
            Modifier::Final,
        ]);
        assert_eq!(set.to_string(), "static final");
        assert_eq!(
            messages,
            vec![
                "Found duplicate modifier: static",
                "Found duplicate modifier: final",
            ]
        );
    }

    #[test]
    fn test_modifier_collection_reports_visibility_conflict() {
        let (_, messages) = Modifiers::collect(&[Modifier::Private, Modifier::Public]);
        assert_eq!(
            messages,
            vec!["Found multiple visibility modifiers: private, public"]
        );
    }

    #[test]
    fn test_modifiers_render_in_canonical_order() {
        let modifiers: Modifiers = [Modifier::Final, Modifier::Static, Modifier::Public]
            .into_iter()
            .collect();
        assert_eq!(modifiers.to_string(), "public static final");
        assert_eq!(modifiers.visibility(), Some(Modifier::Public));
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb"), "    a\n\n    b");
    }
}
