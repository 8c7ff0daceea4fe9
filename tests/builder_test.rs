use jsource_core::builder::*;
use jsource_core::{
    parse_str, BuildError, BuilderCode, ClassNode, CommentNode, FieldNode, JavadocNode, Modifier,
    SyntaxNode,
};

fn counter() -> ClassNode {
    let field = FieldBuilder::new()
        .modifier(Modifier::Private)
        .field_type("Map<String,Integer>")
        .name("counts")
        .value("new HashMap<>()")
        .build()
        .unwrap();
    let javadoc = JavadocBuilder::new()
        .description("Returns the count.")
        .param("key", "the key")
        .return_desc("the count")
        .build()
        .unwrap();
    let method = MethodBuilder::new()
        .javadoc(javadoc)
        .modifier(Modifier::Public)
        .return_type("int")
        .name("count")
        .param("String", "key")
        .body_line("return counts.getOrDefault(key, 0);")
        .build()
        .unwrap();
    ClassBuilder::new()
        .package(PackageBuilder::new().name("demo").build().unwrap())
        .import(ImportBuilder::new().name("java.util.HashMap").build().unwrap())
        .import(ImportBuilder::new().name("java.util.Map").build().unwrap())
        .modifier(Modifier::Public)
        .name("Counter")
        .field(field)
        .method(method)
        .build()
        .unwrap()
}

const COUNTER: &str = "package demo;

import java.util.HashMap;
import java.util.Map;

public class Counter {
    private Map<String, Integer> counts = new HashMap<>();

    /**
     * Returns the count.
     *
     * @param key the key
     * @return the count
     */
    public int count(String key) {
        return counts.getOrDefault(key, 0);
    }
}";

#[test]
fn test_built_class_renders_canonically() {
    assert_eq!(counter().to_string(), COUNTER);
}

#[test]
fn test_built_class_parses_back_equal() {
    let built = counter();
    let parsed = parse_str::<ClassNode>(&built.to_string()).unwrap();
    assert_eq!(parsed, built);
}

#[test]
fn test_section_comment_survives_round_trip() {
    let field = FieldBuilder::new()
        .section_comment(CommentBuilder::line().text("state").build().unwrap())
        .field_type("int")
        .name("count")
        .build()
        .unwrap();
    let class = ClassBuilder::new().name("A").field(field).build().unwrap();
    assert_eq!(class.to_string(), "class A {\n    // state\n    int count;\n}");
    assert_eq!(parse_str::<ClassNode>(&class.to_string()).unwrap(), class);
}

#[test]
fn test_copy_then_modify() {
    let original = parse_str::<FieldNode>("private int x = 1;").unwrap();
    let renamed = FieldBuilder::copy(&original).name("y").build().unwrap();
    assert_eq!(renamed.to_string(), "private int y = 1;");
    assert_eq!(original.name(), "x");
}

#[test]
fn test_missing_fields_reported_together() {
    let err = MethodBuilder::new().build().unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Missing required field: name", "Missing required field: return type"]
    );
    let err = ClassBuilder::new().build().unwrap_err();
    assert_eq!(err.messages, vec!["Missing required field: name"]);
}

#[test]
fn test_interface_with_superclass_rejected() {
    let err = ClassBuilder::interface()
        .name("Shape")
        .super_class("Base")
        .build()
        .unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Interfaces cannot extend a superclass; list extended interfaces instead"]
    );
}

#[test]
fn test_wildcard_import_from_name() {
    let import = ImportBuilder::new().name("java.util.*").build().unwrap();
    assert!(import.is_wildcard());
    assert_eq!(import.name(), "java.util");
    assert_eq!(import.to_string(), "import java.util.*;");
}

#[test]
fn test_build_frozen() {
    let mut annotation = AnnotationBuilder::new().name("Nullable").build_frozen().unwrap();
    assert!(!annotation.is_editable());
    let err = annotation.set_canonical_name("javax.annotation.Nullable").unwrap_err();
    assert_eq!(err.messages, vec!["Cannot modify a frozen annotation"]);
}

#[test]
fn test_builder_code_mentions_every_part() {
    let code = counter().to_builder_code();
    assert!(code.starts_with("ClassBuilder::new()"));
    assert!(code.contains(".package(PackageBuilder::new()"));
    assert!(code.contains(".field_type(\"Map<String, Integer>\")"));
    assert!(code.contains(".body_line(\"return counts.getOrDefault(key, 0);\")"));
    assert!(code.ends_with("\n    .build()"));
}

#[test]
fn test_condensed_javadoc_round_trips() {
    for text in ["*starred", "  indented start"] {
        let javadoc = JavadocBuilder::new().description(text).build().unwrap();
        let rendered = javadoc.to_string();
        let parsed = parse_str::<JavadocNode>(&rendered).unwrap();
        assert_eq!(parsed.to_string(), rendered);
        assert_eq!(parsed, javadoc);
    }
}

#[test]
fn test_condensed_block_comment_round_trips() {
    let comment = CommentBuilder::block().text("*starred").build().unwrap();
    assert_eq!(comment.to_string(), "/* *starred */");
    assert_eq!(parse_str::<CommentNode>("/* *starred */").unwrap(), comment);
}

#[test]
fn test_doc_header_comment() {
    let class = ClassBuilder::new()
        .header_comment(CommentBuilder::doc().text("Licensed under MIT.").build().unwrap())
        .package(PackageBuilder::new().name("demo").build().unwrap())
        .name("A")
        .build()
        .unwrap();
    assert_eq!(class.to_string(), "/** Licensed under MIT. */\npackage demo;\n\nclass A { }");
    assert_eq!(parse_str::<ClassNode>(&class.to_string()).unwrap(), class);

    let err = ClassBuilder::new()
        .header_comment(CommentBuilder::doc().text("orphan").build().unwrap())
        .name("A")
        .build()
        .unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Doc-style header comments need a package or import after them"]
    );

    let err = FieldBuilder::new()
        .section_comment(CommentBuilder::doc().text("state").build().unwrap())
        .field_type("int")
        .name("x")
        .build()
        .unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Doc-style comments can only be file header comments"]
    );
}

const BOX: &str = "package demo;

import java.util.List;

public class Box {
    private List<String> items;

    public int size() {
        return items.size();
    }
}";

const BOX_CODE: &str = r#"ClassBuilder::new()
    .package(PackageBuilder::new()
        .name("demo")
        .build()?)
    .import(ImportBuilder::new()
        .name("java.util.List")
        .build()?)
    .modifier(Modifier::Public)
    .name("Box")
    .field(FieldBuilder::new()
        .modifier(Modifier::Private)
        .field_type("List<String>")
        .name("items")
        .build()?)
    .method(MethodBuilder::new()
        .modifier(Modifier::Public)
        .return_type("int")
        .name("size")
        .body_line("return items.size();")
        .build()?)
    .build()"#;

/// The chain in `BOX_CODE`, written out by hand.
fn box_from_builder_code() -> Result<ClassNode, BuildError> {
    ClassBuilder::new()
        .package(PackageBuilder::new()
            .name("demo")
            .build()?)
        .import(ImportBuilder::new()
            .name("java.util.List")
            .build()?)
        .modifier(Modifier::Public)
        .name("Box")
        .field(FieldBuilder::new()
            .modifier(Modifier::Private)
            .field_type("List<String>")
            .name("items")
            .build()?)
        .method(MethodBuilder::new()
            .modifier(Modifier::Public)
            .return_type("int")
            .name("size")
            .body_line("return items.size();")
            .build()?)
        .build()
}

#[test]
fn test_builder_code_rebuilds_an_equal_node() {
    let parsed = parse_str::<ClassNode>(BOX).unwrap();
    assert_eq!(parsed.to_builder_code(), BOX_CODE);

    let rebuilt = box_from_builder_code().unwrap();
    assert_eq!(rebuilt, parsed);
    assert_eq!(rebuilt.to_string(), BOX);
}
