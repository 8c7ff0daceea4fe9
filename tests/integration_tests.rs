use jsource_core::{
    parse, parse_member, parse_str, ClassKind, ClassNode, CommentStyle, Member, MethodNode,
    SyntaxNode,
};
use jsource_core::lexer::TokenStream;

const POINT: &str = r#"// Copyright header
package com.example.shapes;

import java.util.List;
import static java.lang.Math.max;
import java.io.*;

/**
 * A point in the plane.
 *
 * @author someone
 * @since 1.2
 */
@SuppressWarnings("unchecked")
public final class Point<T extends Number> extends Base implements Comparable<Point<T>>, Serializable {
    private static final long serialVersionUID = 1L;

    // coordinates
    private final int x;

    private int[] values = {
        1,
        2
    };

    static {
        init();
    }

    /** Creates a point. */
    public Point(final int x, @Nullable String... labels) {
        this.x = x;
    }

    @Override
    public int compareTo(Point<T> other) throws IllegalStateException {
        if (other == null) {
            return 1;
        }
        return Integer.compare(x, other.x);
    }

    protected abstract void draw();

    public static class Builder {
        private int x;
    }
}
// end of file"#;

#[test]
fn test_canonical_file_round_trips() {
    let class = parse_str::<ClassNode>(POINT).unwrap();
    assert_eq!(class.to_string(), POINT);

    let again = parse_str::<ClassNode>(&class.to_string()).unwrap();
    assert_eq!(again, class);
}

#[test]
fn test_parsed_model_contents() {
    let class = parse_str::<ClassNode>(POINT).unwrap();
    assert_eq!(class.name(), "Point");
    assert_eq!(class.package().map(|p| p.name()), Some("com.example.shapes"));
    assert_eq!(class.imports().len(), 3);
    assert!(class.imports()[1].is_static());
    assert!(class.imports()[2].is_wildcard());
    assert_eq!(class.type_parameters(), Some("<T extends Number>"));
    assert_eq!(class.super_class(), Some("Base"));
    assert_eq!(class.interfaces(), ["Comparable<Point<T>>", "Serializable"]);
    assert_eq!(class.header_comments().len(), 1);
    assert_eq!(class.trailing_comments().len(), 1);

    let fields: Vec<&str> = class.fields().map(|f| f.name()).collect();
    assert_eq!(fields, vec!["serialVersionUID", "x", "values"]);
    let x = class.fields().nth(1).unwrap();
    assert_eq!(x.section_comment().map(|c| c.text()), Some("coordinates".to_string()));

    let methods: Vec<&MethodNode> = class.methods().collect();
    assert_eq!(methods.len(), 3);
    assert!(methods[0].is_constructor());
    assert_eq!(methods[0].parameters()[1].param_type, "String...");
    assert_eq!(methods[1].throws(), ["IllegalStateException"]);
    assert_eq!(methods[2].body(), None);

    let inner: Vec<&ClassNode> = class.inner_classes().collect();
    assert_eq!(inner.len(), 1);
    assert!(inner[0].is_inner());
}

#[test]
fn test_sloppy_input_becomes_canonical() {
    let class = parse_str::<ClassNode>("public class   A{int x=1;void f(){a();}}").unwrap();
    let expected = "public class A {\n    int x = 1;\n\n    void f() {\n        a();\n    }\n}";
    assert_eq!(class.to_string(), expected);
    assert_eq!(parse_str::<ClassNode>(expected).unwrap(), class);
}

#[test]
fn test_interface_round_trip() {
    let source = "public interface Shape extends Drawable, Comparable<Shape> {\n    double area();\n\n    default String label() {\n        return \"shape\";\n    }\n}";
    let class = parse_str::<ClassNode>(source).unwrap();
    assert_eq!(class.class_kind(), ClassKind::Interface);
    assert_eq!(class.interfaces().len(), 2);
    assert_eq!(class.to_string(), source);
}

#[test]
fn test_empty_bodies() {
    let class = parse_str::<ClassNode>("class Empty {\n}").unwrap();
    assert_eq!(class.to_string(), "class Empty { }");
    let method = parse_str::<MethodNode>("void f() {\n\n}").unwrap();
    assert_eq!(method.to_string(), "void f() { }");
}

#[test]
fn test_standalone_and_section_comments() {
    let source = "class A {\n    // standalone\n\n    /*\n     * one\n     * two\n     */\n    int x;\n}";
    let class = parse_str::<ClassNode>(source).unwrap();
    assert!(matches!(class.members()[0], Member::Comment(_)));
    let field = class.fields().next().unwrap();
    assert_eq!(
        field.section_comment().map(|c| c.lines().to_vec()),
        Some(vec!["one".to_string(), "two".to_string()])
    );
    assert_eq!(class.to_string(), source);
}

#[test]
fn test_parse_returns_next_index() {
    let tokens = TokenStream::new("int a; int b(); static { }").unwrap();
    let (first, next) = parse_member(&tokens, 0).unwrap();
    assert_eq!(first.name(), Some("a"));
    let (second, next) = parse_member(&tokens, next).unwrap();
    assert_eq!(second.name(), Some("b"));
    let (third, next) = parse::<Member>(&tokens, next).unwrap();
    assert!(matches!(third, Member::StaticBlock(_)));
    assert_eq!(next, tokens.len() - 1);
}

#[test]
fn test_frozen_parse_result_rejects_edits() {
    let mut class = parse_str::<ClassNode>("class A { }").unwrap().into_frozen();
    assert!(!class.is_editable());
    let err = class.set_javadoc(None).unwrap_err();
    assert_eq!(err.messages, vec!["Cannot modify a frozen class"]);
}

fn assert_stable(class: &ClassNode) {
    let rendered = class.to_string();
    let reparsed = parse_str::<ClassNode>(&rendered).unwrap();
    assert_eq!(&reparsed, class);
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn test_comment_between_modifiers_becomes_section_comment() {
    let class = parse_str::<ClassNode>("class A {\n    public // keep\n    int x;\n}").unwrap();
    let field = class.fields().next().unwrap();
    assert_eq!(field.section_comment().map(|c| c.text()), Some("keep".to_string()));
    assert_eq!(class.to_string(), "class A {\n    // keep\n    public int x;\n}");
    assert_stable(&class);
}

#[test]
fn test_second_comment_before_member_stays_standalone() {
    let class =
        parse_str::<ClassNode>("class A {\n    // one\n    public // two\n    int x;\n}").unwrap();
    assert!(matches!(&class.members()[0], Member::Comment(c) if c.text() == "one"));
    assert_eq!(class.to_string(), "class A {\n    // one\n\n    // two\n    public int x;\n}");
    assert_stable(&class);
}

#[test]
fn test_comment_after_class_javadoc_is_kept() {
    let class = parse_str::<ClassNode>("/** d */\n// note\nclass A { }").unwrap();
    assert_eq!(class.section_comment().map(|c| c.text()), Some("note".to_string()));
    assert!(class.javadoc().is_some());
    assert_eq!(class.to_string(), "// note\n/** d */\nclass A { }");
    assert_stable(&class);

    let class = parse_str::<ClassNode>("// a\n/** d */\n// b\nclass A { }").unwrap();
    assert_eq!(class.header_comments().len(), 1);
    assert_eq!(class.header_comments()[0].text(), "a");
    assert_eq!(class.section_comment().map(|c| c.text()), Some("b".to_string()));
    assert_stable(&class);
}

#[test]
fn test_doc_comment_before_package_keeps_its_style() {
    let source = "/** Licensed under MIT. */\npackage demo;\n\nclass A { }";
    let class = parse_str::<ClassNode>(source).unwrap();
    let header = &class.header_comments()[0];
    assert!(header.is_doc());
    assert_eq!(header.style(), CommentStyle::Doc);
    assert_eq!(class.to_string(), source);

    let source = "/**\n * Licensed under MIT.\n * All rights reserved.\n */\nimport a.B;\n\nclass A { }";
    let class = parse_str::<ClassNode>(source).unwrap();
    assert!(class.header_comments()[0].is_doc());
    assert_eq!(class.to_string(), source);
}
