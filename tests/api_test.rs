use jsource_core::api::{analyze, analyze_with, AnalyzeOptions};
use jsource_core::SyntaxNode;

const GREETER: &str = r#"package demo;

import javax.annotation.Nullable;

public class Greeter {
    @Nullable
    private String name;

    public String greet() {
        return "hi";
    }
}"#;

#[test]
fn test_outline_to_json() {
    let expected_json = serde_json::json!({
        "name": "Greeter",
        "kind": "class",
        "package": "demo",
        "imports": ["import javax.annotation.Nullable;"],
        "modifiers": ["public"],
        "fields": [{
            "name": "name",
            "type": "String",
            "modifiers": ["private"],
            "annotations": [{
                "name": "Nullable",
                "canonical_name": "javax.annotation.Nullable",
            }],
        }],
        "methods": [{
            "name": "greet",
            "return_type": "String",
            "parameters": [],
            "modifiers": ["public"],
            "has_body": true,
        }],
        "static_blocks": 0,
    });

    let analysis_result = analyze(GREETER, "Greeter.java").unwrap();
    let result = analysis_result.to_json().unwrap();
    let result_json: serde_json::Value = serde_json::from_str(&result).unwrap();

    assert_eq!(result_json, expected_json);
}

#[test]
fn test_outline_to_yaml() {
    let analysis_result = analyze(GREETER, "Greeter.java").unwrap();
    let result = analysis_result.to_yaml().unwrap();
    assert!(result.starts_with("name: Greeter\nkind: class\npackage: demo\n"));
    assert!(result.contains("canonical_name: javax.annotation.Nullable"));
}

#[test]
fn test_render_and_report() {
    let analysis_result = analyze(GREETER, "Greeter.java").unwrap();
    assert_eq!(analysis_result.render(), GREETER);
    assert_eq!(analysis_result.report.resolved, 1);
    assert!(analysis_result.report.is_complete());

    let unresolved = analysis_result.unresolved_class.fields().next().unwrap();
    assert!(!unresolved.annotations()[0].is_resolved());
}

#[test]
fn test_options() {
    let options = AnalyzeOptions {
        resolve_canonical_names: false,
        freeze: true,
    };
    let analysis_result = analyze_with(GREETER, "Greeter.java", options).unwrap();
    assert!(!analysis_result.class.is_editable());
    assert!(analysis_result.unresolved_class.is_editable());
    assert_eq!(analysis_result.report.resolved, 0);

    let field = analysis_result.class.fields().next().unwrap();
    assert!(!field.annotations()[0].is_resolved());
    assert!(!field.is_editable());
}

#[test]
fn test_nested_outline() {
    let source = "class Outer {\n    static {\n        load();\n    }\n\n    interface Callback {\n        void done();\n    }\n}";
    let value = analyze(source, "Outer.java").unwrap().to_value();
    assert_eq!(value.static_blocks, 1);
    assert_eq!(value.inner_classes.len(), 1);
    assert_eq!(value.inner_classes[0].kind, "interface");
    assert!(!value.inner_classes[0].methods[0].has_body);
}
