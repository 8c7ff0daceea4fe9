use crate::ast::{AnnotationNode, ClassNode, FieldNode, Member, MethodNode, Modifier};
use serde::Serialize;

/// A serializable summary of a class tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    pub modifiers: Vec<Modifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationOutline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldOutline>,
    pub methods: Vec<MethodOutline>,
    pub static_blocks: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inner_classes: Vec<Outline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationOutline {
    pub name: String,
    /// `None` while unresolved.
    pub canonical_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOutline {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub modifiers: Vec<Modifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationOutline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodOutline {
    pub name: String,
    /// `None` for constructors.
    pub return_type: Option<String>,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,
    pub modifiers: Vec<Modifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationOutline>,
    pub has_body: bool,
}

fn annotations(nodes: &[AnnotationNode]) -> Vec<AnnotationOutline> {
    nodes
        .iter()
        .map(|a| AnnotationOutline {
            name: a.name().to_string(),
            canonical_name: a.is_resolved().then(|| a.canonical_name().to_string()),
            params: a.params().iter().map(ToString::to_string).collect(),
        })
        .collect()
}

fn field(node: &FieldNode) -> FieldOutline {
    FieldOutline {
        name: node.name().to_string(),
        field_type: node.field_type().to_string(),
        modifiers: node.modifiers().iter().collect(),
        annotations: annotations(node.annotations()),
        value: node.value().map(str::to_string),
    }
}

fn method(node: &MethodNode) -> MethodOutline {
    MethodOutline {
        name: node.name().to_string(),
        return_type: node.return_type().map(str::to_string),
        parameters: node.parameters().iter().map(ToString::to_string).collect(),
        throws: node.throws().to_vec(),
        modifiers: node.modifiers().iter().collect(),
        annotations: annotations(node.annotations()),
        has_body: node.body().is_some(),
    }
}

pub(crate) fn outline(class: &ClassNode) -> Outline {
    let javadoc = class
        .javadoc()
        .map(|doc| doc.description().join("\n"))
        .filter(|text| !text.is_empty());
    Outline {
        name: class.name().to_string(),
        kind: class.class_kind().as_str().to_string(),
        package: class.package().map(|p| p.name().to_string()),
        imports: class.imports().iter().map(ToString::to_string).collect(),
        modifiers: class.modifiers().iter().collect(),
        annotations: annotations(class.annotations()),
        javadoc,
        type_parameters: class.type_parameters().map(str::to_string),
        super_class: class.super_class().map(str::to_string),
        interfaces: class.interfaces().to_vec(),
        fields: class.fields().map(field).collect(),
        methods: class.methods().map(method).collect(),
        static_blocks: class
            .members()
            .iter()
            .filter(|m| matches!(m, Member::StaticBlock(_)))
            .count(),
        inner_classes: class.inner_classes().map(outline).collect(),
    }
}
