// Parser error path tests
// Structural violations, aggregated messages and the construct they are scoped to

use jsource_core::error::{Construct, JError, ParseError};
use jsource_core::{analyze, parse_str, ClassNode, FieldNode, MethodNode};

fn parse_error(source: &str) -> ParseError {
    match parse_str::<ClassNode>(source) {
        Err(JError::Parse(err)) => err,
        Err(other) => panic!("expected a parse error, got {other:?}"),
        Ok(class) => panic!("expected a parse error, got:\n{class}"),
    }
}

#[test]
fn test_two_package_declarations() {
    let err = parse_error("package a;\npackage b;\nclass A { }");
    assert_eq!(err.construct, Construct::CompilationUnit);
    assert_eq!(err.messages, vec!["Encountered two package declarations!"]);
    assert_eq!(
        err.to_string(),
        "Failed to parse compilation unit:\nEncountered two package declarations!"
    );
}

#[test]
fn test_package_after_import() {
    let err = parse_error("import a.B;\npackage c;\nclass A { }");
    assert_eq!(
        err.messages,
        vec!["Encountered package declaration after import statement!"]
    );
}

#[test]
fn test_import_after_class() {
    let err = parse_error("class A { }\nimport a.B;");
    assert_eq!(err.messages, vec!["Encountered import statement after class!"]);
}

#[test]
fn test_package_after_class() {
    let err = parse_error("class A { }\npackage a;");
    assert_eq!(err.messages, vec!["Encountered package declaration after class!"]);
}

#[test]
fn test_two_outer_classes() {
    let err = parse_error("class A { }\nclass B { }");
    assert_eq!(err.messages, vec!["Encountered two outer level classes!"]);
}

#[test]
fn test_no_class_declaration() {
    let err = parse_error("package a;");
    assert_eq!(
        err.messages,
        vec!["Encountered end of input without a class declaration!"]
    );
    let err = parse_error("");
    assert_eq!(
        err.messages,
        vec!["Encountered end of input without a class declaration!"]
    );
}

#[test]
fn test_structural_messages_accumulate() {
    let err = parse_error("package a;\npackage b;\nint x;\n");
    assert_eq!(
        err.messages,
        vec![
            "Encountered two package declarations!",
            "Encountered field outside of a class!",
            "Encountered end of input without a class declaration!",
        ]
    );
}

#[test]
fn test_method_outside_class() {
    let err = parse_error("void run() { }\nclass A { }");
    assert_eq!(err.messages, vec!["Encountered method outside of a class!"]);
}

#[test]
fn test_missing_closing_brace() {
    let err = parse_error("class A {\n    int x;\n");
    assert_eq!(err.construct, Construct::Class);
    assert_eq!(
        err.messages,
        vec!["Reached end of input before the end of class 'A'"]
    );
}

#[test]
fn test_duplicate_modifiers_exact_output() {
    let err = parse_error("static static final final class Test{ }");
    assert_eq!(
        err.to_string(),
        "Failed to parse class:\nFound duplicate modifier: static\nFound duplicate modifier: final"
    );
}

#[test]
fn test_visibility_conflict_exact_output() {
    let err = parse_error("private public class Test{ }");
    assert_eq!(
        err.messages,
        vec!["Found multiple visibility modifiers: private, public"]
    );
}

#[test]
fn test_every_repeat_of_a_modifier_is_reported() {
    let err = parse_error("static static static class Test{ }");
    assert_eq!(err.construct, Construct::Class);
    assert_eq!(
        err.messages,
        vec![
            "Found duplicate modifier: static",
            "Found duplicate modifier: static",
        ]
    );

    let err = parse_error("class T { final final final int x; }");
    assert_eq!(err.construct, Construct::Field);
    assert_eq!(
        err.messages,
        vec![
            "Found duplicate modifier: final",
            "Found duplicate modifier: final",
        ]
    );
}

#[test]
fn test_modifier_messages_come_before_delegated_errors() {
    let err = parse_error("public public class A { int x }");
    assert_eq!(err.construct, Construct::Member);
    assert_eq!(
        err.messages,
        vec![
            "Found duplicate modifier: public",
            "Failed to determine result type",
        ]
    );
}

#[test]
fn test_attachment_errors_are_collected() {
    let err = parse_error("class A {\n    /** a */\n    /** b */\n    int x;\n    /** c */\n}");
    assert_eq!(
        err.messages,
        vec![
            "Found two Javadoc-equivalents before a single member!",
            "Found Javadoc-equivalent at end of class with nothing to attach it to!",
        ]
    );
}

#[test]
fn test_annotation_at_end_of_class() {
    let err = parse_error("class A {\n    int x;\n    @Deprecated\n}");
    assert_eq!(
        err.messages,
        vec!["Found annotation at end of class with nothing to attach it to!"]
    );
}

#[test]
fn test_javadoc_before_static_block() {
    let err = parse_error("class A {\n    /** doc */\n    static { }\n}");
    assert_eq!(
        err.messages,
        vec!["Cannot attach Javadoc-equivalent to a static block!"]
    );
}

#[test]
fn test_superclass_rules() {
    let err = parse_error("class A extends B, C { }");
    assert_eq!(err.messages, vec!["Classes can only extend a single superclass!"]);
    let err = parse_error("interface A implements B { }");
    assert_eq!(
        err.messages,
        vec!["Interfaces extend other interfaces instead of implementing them!"]
    );
}

#[test]
fn test_builder_rules_surface_as_parse_errors() {
    let err = match parse_str::<MethodNode>("abstract void run() { }") {
        Err(JError::Parse(err)) => err,
        other => panic!("expected a parse error, got {other:?}"),
    };
    assert_eq!(err.construct, Construct::Method);
    assert_eq!(err.messages, vec!["Abstract method 'run' cannot have a body"]);

    let err = match parse_str::<FieldNode>("abstract int x;") {
        Err(JError::Parse(err)) => err,
        other => panic!("expected a parse error, got {other:?}"),
    };
    assert_eq!(err.construct, Construct::Field);
    assert_eq!(
        err.messages,
        vec!["Modifier 'abstract' is not allowed on a field"]
    );
}

#[test]
fn test_unexpected_token_in_member() {
    let err = match parse_str::<FieldNode>("int = 3;") {
        Err(JError::Parse(err)) => err,
        other => panic!("expected a parse error, got {other:?}"),
    };
    assert_eq!(err.messages, vec!["Expected a field name, found '='"]);
}

#[test]
fn test_unterminated_comment_is_a_tokenize_error() {
    let result = analyze("class A { /* never closed }", "A.java");
    assert!(matches!(result, Err(JError::Tokenize(_))));
}

#[test]
fn test_error_span_points_into_source() {
    let source = "package a;\n\nclass A {\n    int x\n}";
    let err = parse_error(source);
    let start = err.span.offset();
    assert!(start >= source.find("int").unwrap_or_default());
    assert!(start + err.span.len() <= source.len());
}

#[test]
fn test_comment_with_no_place_is_reported() {
    let err = parse_error("class A {\n    int /* c */ x;\n}");
    assert_eq!(err.construct, Construct::Field);
    assert_eq!(
        err.messages,
        vec!["Found comment inside field with nowhere to keep it: /* c */"]
    );

    let err = parse_error("class A {\n    public // a\n    static // b\n    int x;\n}");
    assert_eq!(
        err.messages,
        vec!["Found a second comment before a single declaration: // b"]
    );
}
