//! Fluent, validated builders for every node kind.
//!
//! `build()` checks everything at once and reports every problem in a single
//! [`BuildError`], one line per defect. Builders normalize what they are given
//! (types, values, body lines) into the same canonical form the parser
//! produces, so built nodes round-trip through their rendering.

use crate::ast::*;
use crate::error::BuildError;
use crate::utils::{
    collapse_whitespace, is_identifier, is_qualified_name, normalize_block, normalize_type,
    normalize_value,
};

/// Collects the defects of one `build()` call.
struct Requirements {
    kind: NodeKind,
    messages: Vec<String>,
}

impl Requirements {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            messages: Vec::new(),
        }
    }

    /// Records a missing field when `value` is absent or blank.
    fn require(&mut self, field: &str, value: Option<&str>) -> bool {
        match value {
            Some(text) if !text.trim().is_empty() => true,
            _ => {
                self.messages.push(format!("Missing required field: {field}"));
                false
            }
        }
    }

    fn check(&mut self, ok: bool, message: impl FnOnce() -> String) {
        if !ok {
            self.messages.push(message());
        }
    }

    fn report(&mut self, messages: impl IntoIterator<Item = String>) {
        self.messages.extend(messages);
    }

    fn finish(self) -> Result<(), BuildError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(BuildError {
                kind: self.kind,
                messages: self.messages,
            })
        }
    }

    /// Canonical type text, or a recorded error.
    fn normalized_type(&mut self, label: &str, text: &str) -> String {
        match normalize_type(text) {
            Some(normalized) => normalized,
            None => {
                self.messages.push(format!("Invalid {label}: '{text}'"));
                text.to_string()
            }
        }
    }

    /// Validates a modifier list against what this kind of node accepts.
    fn modifiers(&mut self, given: &[Modifier], allowed: &[Modifier]) -> Modifiers {
        let (set, messages) = Modifiers::collect(given);
        self.report(messages);
        for modifier in set.iter() {
            if !allowed.contains(&modifier) {
                self.messages.push(format!(
                    "Modifier '{modifier}' is not allowed on a {}",
                    self.kind
                ));
            }
        }
        set
    }

    /// Doc-style comments anywhere but the file header read back as Javadoc.
    fn plain_comment(&mut self, comment: Option<&CommentNode>) {
        if comment.is_some_and(CommentNode::is_doc) {
            self.messages.push(DOC_COMMENT_PLACEMENT.to_string());
        }
    }

    fn conflict(&mut self, set: &Modifiers, a: Modifier, b: Modifier) {
        if set.contains(a) && set.contains(b) {
            self.messages
                .push(format!("Found conflicting modifiers: {a}, {b}"));
        }
    }
}

fn trimmed(text: impl Into<String>) -> String {
    text.into().trim().to_string()
}

/// Lines given by hand, dedented as a whole.
fn normalized_lines(lines: &[String]) -> Vec<String> {
    normalize_block(&format!("\n{}", lines.join("\n")))
}

// --- Package and imports ---

#[derive(Debug, Clone, Default)]
pub struct PackageBuilder {
    name: Option<String>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &PackageNode) -> Self {
        Self {
            name: Some(node.name.clone()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(trimmed(name));
        self
    }

    pub fn build(self) -> Result<PackageNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Package);
        if req.require("name", self.name.as_deref()) {
            let name = self.name.as_deref().unwrap_or_default();
            req.check(is_qualified_name(name), || {
                format!("Invalid package name: '{name}'")
            });
        }
        req.finish()?;
        Ok(PackageNode {
            name: self.name.unwrap_or_default(),
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<PackageNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportBuilder {
    name: Option<String>,
    is_static: bool,
    is_wildcard: bool,
}

impl ImportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &ImportNode) -> Self {
        Self {
            name: Some(node.name.clone()),
            is_static: node.is_static,
            is_wildcard: node.is_wildcard,
        }
    }

    /// The imported name. A trailing `.*` marks a wildcard import.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = trimmed(name);
        match name.strip_suffix(".*") {
            Some(prefix) => {
                self.name = Some(prefix.to_string());
                self.is_wildcard = true;
            }
            None => self.name = Some(name),
        }
        self
    }

    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn wildcard(mut self, is_wildcard: bool) -> Self {
        self.is_wildcard = is_wildcard;
        self
    }

    pub fn build(self) -> Result<ImportNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Import);
        if req.require("name", self.name.as_deref()) {
            let name = self.name.as_deref().unwrap_or_default();
            req.check(is_qualified_name(name), || {
                format!("Invalid import name: '{name}'")
            });
        }
        req.finish()?;
        Ok(ImportNode {
            name: self.name.unwrap_or_default(),
            is_static: self.is_static,
            is_wildcard: self.is_wildcard,
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<ImportNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

// --- Annotations ---

#[derive(Debug, Clone, Default)]
pub struct AnnotationBuilder {
    name: Option<String>,
    canonical_name: String,
    params: Vec<AnnotationParam>,
}

impl AnnotationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &AnnotationNode) -> Self {
        Self {
            name: Some(node.name.clone()),
            canonical_name: node.canonical_name.clone(),
            params: node.params.clone(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(trimmed(name));
        self
    }

    pub fn canonical_name(mut self, name: impl Into<String>) -> Self {
        self.canonical_name = trimmed(name);
        self
    }

    /// A `name = value` parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(AnnotationParam {
            name: Some(trimmed(name)),
            value: value.into(),
        });
        self
    }

    /// The single-value shorthand, `@Name(value)`.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.params.push(AnnotationParam {
            name: None,
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> Result<AnnotationNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Annotation);
        if req.require("name", self.name.as_deref()) {
            let name = self.name.as_deref().unwrap_or_default();
            req.check(is_qualified_name(name), || {
                format!("Invalid annotation name: '{name}'")
            });
        }

        let param_count = self.params.len();
        let mut params = Vec::with_capacity(param_count);
        for param in self.params {
            let label = param.name.clone().unwrap_or_else(|| "value".to_string());
            match &param.name {
                Some(name) => req.check(is_identifier(name), || {
                    format!("Invalid annotation parameter name: '{name}'")
                }),
                None => req.check(param_count == 1, || {
                    "Unnamed annotation value must be the only parameter".to_string()
                }),
            }
            let value = match collapse_whitespace(&param.value) {
                Some(value) if !value.is_empty() => value,
                Some(_) => {
                    req.check(false, || {
                        format!("Missing value for annotation parameter '{label}'")
                    });
                    String::new()
                }
                None => {
                    req.check(false, || {
                        format!("Invalid value for annotation parameter '{label}'")
                    });
                    String::new()
                }
            };
            params.push(AnnotationParam {
                name: param.name,
                value,
            });
        }

        req.finish()?;
        Ok(AnnotationNode {
            name: self.name.unwrap_or_default(),
            canonical_name: self.canonical_name,
            params,
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<AnnotationNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

// --- Javadoc and comments ---

const RESERVED_TAGS: [&str; 5] = ["param", "return", "author", "version", "since"];

#[derive(Debug, Clone, Default)]
pub struct JavadocBuilder {
    description: Vec<String>,
    params: Vec<(String, String)>,
    return_desc: Option<String>,
    author: Option<String>,
    version: Option<String>,
    since: Option<String>,
    other_tags: Vec<(String, String)>,
}

impl JavadocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &JavadocNode) -> Self {
        Self {
            description: node.description.clone(),
            params: node.params.clone(),
            return_desc: node.return_desc.clone(),
            author: node.author.clone(),
            version: node.version.clone(),
            since: node.since.clone(),
            other_tags: node.other_tags.clone(),
        }
    }

    /// Appends description text; embedded newlines start new lines.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.description
            .extend(text.split('\n').map(|l| l.trim_end().to_string()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.params.push((trimmed(name), trimmed(text)));
        self
    }

    pub fn return_desc(mut self, text: impl Into<String>) -> Self {
        self.return_desc = Some(trimmed(text));
        self
    }

    pub fn author(mut self, text: impl Into<String>) -> Self {
        self.author = Some(trimmed(text));
        self
    }

    pub fn version(mut self, text: impl Into<String>) -> Self {
        self.version = Some(trimmed(text));
        self
    }

    pub fn since(mut self, text: impl Into<String>) -> Self {
        self.since = Some(trimmed(text));
        self
    }

    /// Any other block tag, e.g. `tag("throws", "IOException on failure")`.
    pub fn tag(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.other_tags.push((trimmed(tag), trimmed(text)));
        self
    }

    pub fn build(self) -> Result<JavadocNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Javadoc);

        let mut description = self.description;
        while description.first().is_some_and(|l| l.trim().is_empty()) {
            description.remove(0);
        }
        while description.last().is_some_and(|l| l.trim().is_empty()) {
            description.pop();
        }
        for line in &description {
            req.check(!line.trim_start().starts_with('@'), || {
                format!("Javadoc description line cannot start with a tag: '{line}'")
            });
            req.check(!line.contains("*/"), || {
                "Javadoc text cannot contain '*/'".to_string()
            });
        }

        for (name, text) in &self.params {
            req.check(is_identifier(name), || {
                format!("Invalid @param name: '{name}'")
            });
            req.check(!text.contains('\n'), || {
                "Javadoc tag text cannot span lines: @param".to_string()
            });
        }
        for (tag, text) in [
            ("return", &self.return_desc),
            ("author", &self.author),
            ("version", &self.version),
            ("since", &self.since),
        ] {
            if let Some(text) = text {
                req.check(!text.contains('\n'), || {
                    format!("Javadoc tag text cannot span lines: @{tag}")
                });
            }
        }
        for (tag, text) in &self.other_tags {
            let well_formed =
                !tag.is_empty() && tag.chars().all(|c| c.is_alphanumeric() || c == '-');
            req.check(well_formed, || format!("Invalid Javadoc tag: '@{tag}'"));
            req.check(!RESERVED_TAGS.contains(&tag.as_str()), || {
                format!("Use the dedicated setter for @{tag}")
            });
            req.check(!text.contains('\n'), || {
                format!("Javadoc tag text cannot span lines: @{tag}")
            });
        }

        req.finish()?;
        Ok(JavadocNode {
            description,
            params: self.params,
            return_desc: self.return_desc,
            author: self.author,
            version: self.version,
            since: self.since,
            other_tags: self.other_tags,
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<JavadocNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

#[derive(Debug, Clone)]
pub struct CommentBuilder {
    style: CommentStyle,
    lines: Vec<String>,
}

impl Default for CommentBuilder {
    fn default() -> Self {
        Self::line()
    }
}

impl CommentBuilder {
    /// A `// ...` comment.
    pub fn line() -> Self {
        Self {
            style: CommentStyle::Line,
            lines: Vec::new(),
        }
    }

    /// A `/* ... */` comment.
    pub fn block() -> Self {
        Self {
            style: CommentStyle::Block,
            lines: Vec::new(),
        }
    }

    /// A `/** ... */` comment for the top of a file, ahead of the package or
    /// imports.
    pub fn doc() -> Self {
        Self {
            style: CommentStyle::Doc,
            lines: Vec::new(),
        }
    }

    pub fn copy(node: &CommentNode) -> Self {
        Self {
            style: node.style,
            lines: node.lines.clone(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.lines
            .extend(text.split('\n').map(|l| l.trim_end().to_string()));
        self
    }

    pub fn build(self) -> Result<CommentNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Comment);
        let mut lines = self.lines;
        while lines.first().is_some_and(|l| l.trim().is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        match self.style {
            CommentStyle::Line => {
                req.check(lines.len() <= 1, || {
                    "Line comments hold a single line".to_string()
                });
                lines.iter_mut().for_each(|l| *l = l.trim().to_string());
            }
            CommentStyle::Block | CommentStyle::Doc => {
                for line in &lines {
                    req.check(!line.contains("*/"), || {
                        "Comment text cannot contain '*/'".to_string()
                    });
                }
                if let [single] = lines.as_mut_slice() {
                    *single = single.trim().to_string();
                }
            }
        }
        req.finish()?;
        Ok(CommentNode {
            style: self.style,
            lines,
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<CommentNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

// --- Members ---

macro_rules! prefix_setters {
    () => {
        pub fn section_comment(mut self, comment: CommentNode) -> Self {
            self.section_comment = Some(comment);
            self
        }

        pub fn javadoc(mut self, javadoc: JavadocNode) -> Self {
            self.javadoc = Some(javadoc);
            self
        }

        pub fn annotation(mut self, annotation: AnnotationNode) -> Self {
            self.annotations.push(annotation);
            self
        }

        pub fn annotations(mut self, annotations: impl IntoIterator<Item = AnnotationNode>) -> Self {
            self.annotations.extend(annotations);
            self
        }

        pub fn modifier(mut self, modifier: Modifier) -> Self {
            self.modifiers.push(modifier);
            self
        }

        pub fn modifiers(mut self, modifiers: &Modifiers) -> Self {
            self.modifiers.extend(modifiers.iter());
            self
        }
    };
}

const FIELD_MODIFIERS: [Modifier; 7] = [
    Modifier::Public,
    Modifier::Protected,
    Modifier::Private,
    Modifier::Static,
    Modifier::Final,
    Modifier::Transient,
    Modifier::Volatile,
];

#[derive(Debug, Clone, Default)]
pub struct FieldBuilder {
    section_comment: Option<CommentNode>,
    javadoc: Option<JavadocNode>,
    annotations: Vec<AnnotationNode>,
    modifiers: Vec<Modifier>,
    field_type: Option<String>,
    name: Option<String>,
    value: Option<String>,
}

impl FieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &FieldNode) -> Self {
        Self {
            section_comment: node.section_comment.clone(),
            javadoc: node.javadoc.clone(),
            annotations: node.annotations.clone(),
            modifiers: node.modifiers.iter().collect(),
            field_type: Some(node.field_type.clone()),
            name: Some(node.name.clone()),
            value: node.value.clone(),
        }
    }

    prefix_setters!();

    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(trimmed(field_type));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(trimmed(name));
        self
    }

    /// The initializer expression, without `=` or `;`.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn build(self) -> Result<FieldNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Field);
        req.plain_comment(self.section_comment.as_ref());
        let has_type = req.require("type", self.field_type.as_deref());
        let has_name = req.require("name", self.name.as_deref());

        let modifiers = req.modifiers(&self.modifiers, &FIELD_MODIFIERS);
        req.conflict(&modifiers, Modifier::Final, Modifier::Volatile);

        let field_type = match self.field_type {
            Some(t) if has_type => req.normalized_type("type", &t),
            _ => String::new(),
        };
        let name = self.name.unwrap_or_default();
        if has_name {
            req.check(is_identifier(&name), || format!("Invalid field name: '{name}'"));
        }
        let value = self.value.map(|v| normalize_value(&v));
        if let Some(value) = &value {
            req.check(!value.is_empty(), || {
                format!("Field initializer of '{name}' cannot be blank")
            });
        }

        req.finish()?;
        Ok(FieldNode {
            section_comment: self.section_comment,
            javadoc: self.javadoc,
            annotations: self.annotations,
            modifiers,
            field_type,
            name,
            value,
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<FieldNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

const METHOD_MODIFIERS: [Modifier; 10] = [
    Modifier::Public,
    Modifier::Protected,
    Modifier::Private,
    Modifier::Abstract,
    Modifier::Default,
    Modifier::Static,
    Modifier::Final,
    Modifier::Synchronized,
    Modifier::Native,
    Modifier::Strictfp,
];

#[derive(Debug, Clone)]
pub struct MethodBuilder {
    section_comment: Option<CommentNode>,
    javadoc: Option<JavadocNode>,
    annotations: Vec<AnnotationNode>,
    modifiers: Vec<Modifier>,
    type_parameters: Option<String>,
    return_type: Option<String>,
    constructor: bool,
    name: Option<String>,
    parameters: Vec<Parameter>,
    throws: Vec<String>,
    body: Option<Vec<String>>,
}

impl Default for MethodBuilder {
    fn default() -> Self {
        Self {
            section_comment: None,
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            type_parameters: None,
            return_type: None,
            constructor: false,
            name: None,
            parameters: Vec::new(),
            throws: Vec::new(),
            body: Some(Vec::new()),
        }
    }
}

impl MethodBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &MethodNode) -> Self {
        Self {
            section_comment: node.section_comment.clone(),
            javadoc: node.javadoc.clone(),
            annotations: node.annotations.clone(),
            modifiers: node.modifiers.iter().collect(),
            type_parameters: node.type_parameters.clone(),
            return_type: node.return_type.clone(),
            constructor: node.return_type.is_none(),
            name: Some(node.name.clone()),
            parameters: node.parameters.clone(),
            throws: node.throws.clone(),
            body: node.body.clone(),
        }
    }

    prefix_setters!();

    /// Generic parameters including the angle brackets, e.g. `<T>`.
    pub fn type_parameters(mut self, type_parameters: impl Into<String>) -> Self {
        self.type_parameters = Some(trimmed(type_parameters));
        self
    }

    pub fn return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(trimmed(return_type));
        self
    }

    /// Marks the method as a constructor, which has no return type.
    pub fn constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(trimmed(name));
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn param(self, param_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.parameter(Parameter {
            annotations: Vec::new(),
            is_final: false,
            param_type: trimmed(param_type),
            name: trimmed(name),
        })
    }

    pub fn throws(mut self, exception: impl Into<String>) -> Self {
        self.throws.push(trimmed(exception));
        self
    }

    /// Appends body text; embedded newlines start new lines.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        self.body
            .get_or_insert_with(Vec::new)
            .extend(line.split('\n').map(str::to_string));
        self
    }

    pub fn body(mut self, lines: Vec<String>) -> Self {
        self.body = Some(lines);
        self
    }

    /// Ends the declaration with `;` instead of a block.
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn build(self) -> Result<MethodNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Method);
        req.plain_comment(self.section_comment.as_ref());
        let has_name = req.require("name", self.name.as_deref());
        if self.constructor {
            req.check(self.return_type.is_none(), || {
                "Constructors cannot declare a return type".to_string()
            });
        } else {
            req.require("return type", self.return_type.as_deref());
        }

        let modifiers = req.modifiers(&self.modifiers, &METHOD_MODIFIERS);
        for other in [
            Modifier::Final,
            Modifier::Static,
            Modifier::Private,
            Modifier::Synchronized,
            Modifier::Native,
        ] {
            req.conflict(&modifiers, Modifier::Abstract, other);
        }

        let name = self.name.unwrap_or_default();
        if has_name {
            req.check(is_identifier(&name), || format!("Invalid method name: '{name}'"));
        }
        if self.body.is_some() {
            for modifier in [Modifier::Abstract, Modifier::Native] {
                req.check(!modifiers.contains(modifier), || {
                    format!("{} method '{name}' cannot have a body", capitalized(modifier))
                });
            }
        }

        let type_parameters = self.type_parameters.map(|tp| {
            let normalized = req.normalized_type("type parameters", &tp);
            req.check(normalized.starts_with('<') && normalized.ends_with('>'), || {
                format!("Invalid type parameters: '{tp}'")
            });
            normalized
        });
        let return_type = match self.return_type {
            Some(rt) if !self.constructor => Some(req.normalized_type("return type", &rt)),
            _ => None,
        };

        let mut seen: Vec<String> = Vec::new();
        let mut parameters = Vec::with_capacity(self.parameters.len());
        for mut parameter in self.parameters {
            parameter.param_type = req.normalized_type("parameter type", &parameter.param_type);
            let param_name = parameter.name.clone();
            req.check(is_identifier(&param_name), || {
                format!("Invalid parameter name: '{param_name}'")
            });
            req.check(!seen.contains(&param_name), || {
                format!("Duplicate parameter name: {param_name}")
            });
            seen.push(param_name);
            parameters.push(parameter);
        }
        let throws = self
            .throws
            .iter()
            .map(|t| req.normalized_type("exception type", t))
            .collect();

        req.finish()?;
        Ok(MethodNode {
            section_comment: self.section_comment,
            javadoc: self.javadoc,
            annotations: self.annotations,
            modifiers,
            type_parameters,
            return_type,
            name,
            parameters,
            throws,
            body: self.body.as_deref().map(normalized_lines),
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<MethodNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

fn capitalized(modifier: Modifier) -> String {
    let word = modifier.as_str();
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticBlockBuilder {
    lines: Vec<String>,
}

impl StaticBlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(node: &StaticBlockNode) -> Self {
        Self {
            lines: node.lines.clone(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        self.lines.extend(line.split('\n').map(str::to_string));
        self
    }

    pub fn build(self) -> Result<StaticBlockNode, BuildError> {
        Ok(StaticBlockNode {
            lines: normalized_lines(&self.lines),
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<StaticBlockNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}

// --- Classes ---

const CLASS_MODIFIERS: [Modifier; 7] = [
    Modifier::Public,
    Modifier::Protected,
    Modifier::Private,
    Modifier::Abstract,
    Modifier::Static,
    Modifier::Final,
    Modifier::Strictfp,
];

#[derive(Debug, Clone)]
pub struct ClassBuilder {
    header_comments: Vec<CommentNode>,
    package: Option<PackageNode>,
    imports: Vec<ImportNode>,
    section_comment: Option<CommentNode>,
    javadoc: Option<JavadocNode>,
    annotations: Vec<AnnotationNode>,
    modifiers: Vec<Modifier>,
    class_kind: ClassKind,
    name: Option<String>,
    type_parameters: Option<String>,
    super_class: Option<String>,
    interfaces: Vec<String>,
    members: Vec<Member>,
    trailing_comments: Vec<CommentNode>,
    inner: bool,
}

impl Default for ClassBuilder {
    fn default() -> Self {
        Self {
            header_comments: Vec::new(),
            package: None,
            imports: Vec::new(),
            section_comment: None,
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            class_kind: ClassKind::Class,
            name: None,
            type_parameters: None,
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            trailing_comments: Vec::new(),
            inner: false,
        }
    }
}

impl ClassBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interface() -> Self {
        Self {
            class_kind: ClassKind::Interface,
            ..Self::default()
        }
    }

    pub fn copy(node: &ClassNode) -> Self {
        Self {
            header_comments: node.header_comments.clone(),
            package: node.package.clone(),
            imports: node.imports.clone(),
            section_comment: node.section_comment.clone(),
            javadoc: node.javadoc.clone(),
            annotations: node.annotations.clone(),
            modifiers: node.modifiers.iter().collect(),
            class_kind: node.class_kind,
            name: Some(node.name.clone()),
            type_parameters: node.type_parameters.clone(),
            super_class: node.super_class.clone(),
            interfaces: node.interfaces.clone(),
            members: node.members.clone(),
            trailing_comments: node.trailing_comments.clone(),
            inner: node.inner,
        }
    }

    prefix_setters!();

    pub fn kind(mut self, class_kind: ClassKind) -> Self {
        self.class_kind = class_kind;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(trimmed(name));
        self
    }

    pub fn type_parameters(mut self, type_parameters: impl Into<String>) -> Self {
        self.type_parameters = Some(trimmed(type_parameters));
        self
    }

    pub fn super_class(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(trimmed(super_class));
        self
    }

    /// An implemented interface; for an interface, an extended one.
    pub fn interface_name(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(trimmed(name));
        self
    }

    pub fn package(mut self, package: PackageNode) -> Self {
        self.package = Some(package);
        self
    }

    pub fn import(mut self, import: ImportNode) -> Self {
        self.imports.push(import);
        self
    }

    pub fn header_comment(mut self, comment: CommentNode) -> Self {
        self.header_comments.push(comment);
        self
    }

    pub fn trailing_comment(mut self, comment: CommentNode) -> Self {
        self.trailing_comments.push(comment);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn field(self, field: FieldNode) -> Self {
        self.member(Member::Field(field))
    }

    pub fn method(self, method: MethodNode) -> Self {
        self.member(Member::Method(method))
    }

    pub fn static_block(self, block: StaticBlockNode) -> Self {
        self.member(Member::StaticBlock(block))
    }

    pub fn inner_class(self, class: ClassNode) -> Self {
        self.member(Member::Class(Box::new(class)))
    }

    pub fn comment(self, comment: CommentNode) -> Self {
        self.member(Member::Comment(comment))
    }

    /// Marks this class as nested inside another class.
    pub fn inner(mut self, inner: bool) -> Self {
        self.inner = inner;
        self
    }

    pub fn build(self) -> Result<ClassNode, BuildError> {
        let mut req = Requirements::new(NodeKind::Class);
        req.plain_comment(self.section_comment.as_ref());
        for comment in &self.trailing_comments {
            req.plain_comment(Some(comment));
        }
        if self.package.is_none() && self.imports.is_empty() {
            req.check(!self.header_comments.iter().any(CommentNode::is_doc), || {
                "Doc-style header comments need a package or import after them".to_string()
            });
        }
        let has_name = req.require("name", self.name.as_deref());
        let name = self.name.unwrap_or_default();
        if has_name {
            req.check(is_identifier(&name), || format!("Invalid class name: '{name}'"));
        }

        let modifiers = req.modifiers(&self.modifiers, &CLASS_MODIFIERS);
        req.conflict(&modifiers, Modifier::Abstract, Modifier::Final);

        if self.inner {
            req.check(self.package.is_none() && self.imports.is_empty(), || {
                "Inner classes cannot declare a package or imports".to_string()
            });
            req.check(
                self.header_comments.is_empty() && self.trailing_comments.is_empty(),
                || "Inner classes cannot carry file comments".to_string(),
            );
        }
        if self.class_kind == ClassKind::Interface {
            req.check(self.super_class.is_none(), || {
                "Interfaces cannot extend a superclass; list extended interfaces instead"
                    .to_string()
            });
        }

        let type_parameters = self.type_parameters.map(|tp| {
            let normalized = req.normalized_type("type parameters", &tp);
            req.check(normalized.starts_with('<') && normalized.ends_with('>'), || {
                format!("Invalid type parameters: '{tp}'")
            });
            normalized
        });
        let super_class = self
            .super_class
            .map(|sc| req.normalized_type("superclass", &sc));
        let interfaces = self
            .interfaces
            .iter()
            .map(|i| req.normalized_type("interface", i))
            .collect();

        for member in &self.members {
            match member {
                Member::Class(class) => req.check(class.inner, || {
                    format!("Nested class '{}' must be built as an inner class", class.name)
                }),
                Member::Comment(comment) => req.plain_comment(Some(comment)),
                _ => {}
            }
        }

        req.finish()?;
        Ok(ClassNode {
            header_comments: self.header_comments,
            package: self.package,
            imports: self.imports,
            section_comment: self.section_comment,
            javadoc: self.javadoc,
            annotations: self.annotations,
            modifiers,
            class_kind: self.class_kind,
            name,
            type_parameters,
            super_class,
            interfaces,
            members: self.members,
            trailing_comments: self.trailing_comments,
            inner: self.inner,
            editable: true,
        })
    }

    pub fn build_frozen(self) -> Result<ClassNode, BuildError> {
        self.build().map(SyntaxNode::into_frozen)
    }
}
