use crate::ast::*;

/// Emits the Rust builder calls that rebuild a node.
///
/// The result is an expression ending in `.build()`. Nested nodes are built
/// inline and unwrapped with `?`, so the code belongs in a function that
/// returns `Result<_, BuildError>`.
pub trait BuilderCode {
    fn to_builder_code(&self) -> String;
}

fn lit(text: &str) -> String {
    format!("{text:?}")
}

fn nested(code: &dyn BuilderCode) -> String {
    format!("{}?", code.to_builder_code().replace('\n', "\n    "))
}

/// A builder constructor followed by one call per line.
struct Chain {
    head: String,
    calls: Vec<String>,
}

impl Chain {
    fn new(head: &str) -> Self {
        Self {
            head: head.to_string(),
            calls: Vec::new(),
        }
    }

    fn call(mut self, method: &str, args: impl AsRef<str>) -> Self {
        self.calls.push(format!(".{method}({})", args.as_ref()));
        self
    }

    fn prefix(
        mut self,
        section_comment: Option<&CommentNode>,
        javadoc: Option<&JavadocNode>,
        annotations: &[AnnotationNode],
        modifiers: &Modifiers,
    ) -> Self {
        if let Some(comment) = section_comment {
            self = self.call("section_comment", nested(comment));
        }
        if let Some(javadoc) = javadoc {
            self = self.call("javadoc", nested(javadoc));
        }
        for annotation in annotations {
            self = self.call("annotation", nested(annotation));
        }
        for modifier in modifiers.iter() {
            self = self.call("modifier", format!("Modifier::{modifier:?}"));
        }
        self
    }

    fn finish(self) -> String {
        let mut out = self.head;
        for call in self.calls {
            out.push_str("\n    ");
            out.push_str(&call);
        }
        out.push_str("\n    .build()");
        out
    }
}

impl BuilderCode for PackageNode {
    fn to_builder_code(&self) -> String {
        Chain::new("PackageBuilder::new()")
            .call("name", lit(self.name()))
            .finish()
    }
}

impl BuilderCode for ImportNode {
    fn to_builder_code(&self) -> String {
        let mut chain = Chain::new("ImportBuilder::new()").call("name", lit(self.name()));
        if self.is_static() {
            chain = chain.call("is_static", "true");
        }
        if self.is_wildcard() {
            chain = chain.call("wildcard", "true");
        }
        chain.finish()
    }
}

impl BuilderCode for AnnotationNode {
    fn to_builder_code(&self) -> String {
        let mut chain = Chain::new("AnnotationBuilder::new()").call("name", lit(self.name()));
        if self.is_resolved() {
            chain = chain.call("canonical_name", lit(self.canonical_name()));
        }
        for param in self.params() {
            chain = match &param.name {
                Some(name) => chain.call("param", format!("{}, {}", lit(name), lit(&param.value))),
                None => chain.call("value", lit(&param.value)),
            };
        }
        chain.finish()
    }
}

impl BuilderCode for JavadocNode {
    fn to_builder_code(&self) -> String {
        let mut chain = Chain::new("JavadocBuilder::new()");
        for line in self.description() {
            chain = chain.call("description", lit(line));
        }
        for (name, text) in self.params() {
            chain = chain.call("param", format!("{}, {}", lit(name), lit(text)));
        }
        let single = [
            ("return_desc", self.return_desc()),
            ("author", self.author()),
            ("version", self.version()),
            ("since", self.since()),
        ];
        for (method, text) in single {
            if let Some(text) = text {
                chain = chain.call(method, lit(text));
            }
        }
        for (tag, text) in self.other_tags() {
            chain = chain.call("tag", format!("{}, {}", lit(tag), lit(text)));
        }
        chain.finish()
    }
}

impl BuilderCode for CommentNode {
    fn to_builder_code(&self) -> String {
        let head = match self.style() {
            CommentStyle::Line => "CommentBuilder::line()",
            CommentStyle::Block => "CommentBuilder::block()",
            CommentStyle::Doc => "CommentBuilder::doc()",
        };
        Chain::new(head).call("text", lit(&self.text())).finish()
    }
}

impl BuilderCode for FieldNode {
    fn to_builder_code(&self) -> String {
        let mut chain = Chain::new("FieldBuilder::new()")
            .prefix(
                self.section_comment(),
                self.javadoc(),
                self.annotations(),
                self.modifiers(),
            )
            .call("field_type", lit(self.field_type()))
            .call("name", lit(self.name()));
        if let Some(value) = self.value() {
            chain = chain.call("value", lit(value));
        }
        chain.finish()
    }
}

fn parameter_code(parameter: &Parameter) -> String {
    let annotations: Vec<String> = parameter.annotations.iter().map(|a| nested(a)).collect();
    format!(
        "Parameter {{\n        annotations: vec![{}],\n        is_final: {},\n        param_type: {}.to_string(),\n        name: {}.to_string(),\n    }}",
        annotations.join(", ").replace('\n', "\n    "),
        parameter.is_final,
        lit(&parameter.param_type),
        lit(&parameter.name),
    )
}

impl BuilderCode for MethodNode {
    fn to_builder_code(&self) -> String {
        let mut chain = Chain::new("MethodBuilder::new()").prefix(
            self.section_comment(),
            self.javadoc(),
            self.annotations(),
            self.modifiers(),
        );
        if let Some(type_parameters) = self.type_parameters() {
            chain = chain.call("type_parameters", lit(type_parameters));
        }
        chain = match self.return_type() {
            Some(return_type) => chain.call("return_type", lit(return_type)),
            None => chain.call("constructor", ""),
        };
        chain = chain.call("name", lit(self.name()));
        for parameter in self.parameters() {
            chain = if parameter.annotations.is_empty() && !parameter.is_final {
                chain.call(
                    "param",
                    format!("{}, {}", lit(&parameter.param_type), lit(&parameter.name)),
                )
            } else {
                chain.call("parameter", parameter_code(parameter))
            };
        }
        for exception in self.throws() {
            chain = chain.call("throws", lit(exception));
        }
        match self.body() {
            Some(lines) => {
                for line in lines {
                    chain = chain.call("body_line", lit(line));
                }
            }
            None => chain = chain.call("without_body", ""),
        }
        chain.finish()
    }
}

impl BuilderCode for StaticBlockNode {
    fn to_builder_code(&self) -> String {
        self.lines()
            .iter()
            .fold(Chain::new("StaticBlockBuilder::new()"), |chain, line| {
                chain.call("line", lit(line))
            })
            .finish()
    }
}

impl BuilderCode for ClassNode {
    fn to_builder_code(&self) -> String {
        let head = match self.class_kind() {
            ClassKind::Class => "ClassBuilder::new()",
            ClassKind::Interface => "ClassBuilder::interface()",
        };
        let mut chain = Chain::new(head);
        for comment in self.header_comments() {
            chain = chain.call("header_comment", nested(comment));
        }
        if let Some(package) = self.package() {
            chain = chain.call("package", nested(package));
        }
        for import in self.imports() {
            chain = chain.call("import", nested(import));
        }
        chain = chain
            .prefix(
                self.section_comment(),
                self.javadoc(),
                self.annotations(),
                self.modifiers(),
            )
            .call("name", lit(self.name()));
        if self.is_inner() {
            chain = chain.call("inner", "true");
        }
        if let Some(type_parameters) = self.type_parameters() {
            chain = chain.call("type_parameters", lit(type_parameters));
        }
        if let Some(super_class) = self.super_class() {
            chain = chain.call("super_class", lit(super_class));
        }
        for interface in self.interfaces() {
            chain = chain.call("interface_name", lit(interface));
        }
        for member in self.members() {
            let method = match member {
                Member::Field(_) => "field",
                Member::Method(_) => "method",
                Member::StaticBlock(_) => "static_block",
                Member::Class(_) => "inner_class",
                Member::Comment(_) => "comment",
            };
            chain = chain.call(method, nested(member));
        }
        for comment in self.trailing_comments() {
            chain = chain.call("trailing_comment", nested(comment));
        }
        chain.finish()
    }
}

impl BuilderCode for Member {
    fn to_builder_code(&self) -> String {
        match self {
            Member::Field(node) => node.to_builder_code(),
            Member::Method(node) => node.to_builder_code(),
            Member::StaticBlock(node) => node.to_builder_code(),
            Member::Class(node) => node.to_builder_code(),
            Member::Comment(node) => node.to_builder_code(),
        }
    }
}
