use jsource_core::builder::{AnnotationBuilder, ClassBuilder, FieldBuilder, ImportBuilder};
use jsource_core::error::ValidationError;
use jsource_core::{
    parse_str, validate_class, CanonicalNameValidator, ClassNode, Member, SyntaxNode,
};

const SERVICE: &str = "package app;

import javax.inject.Inject;
import javax.annotation.Nullable;
import org.other.Inject;

@Singleton
public class Service {
    @Inject
    private Repository repository;

    @javax.annotation.CheckReturnValue
    public String find(@Nullable String key) {
        return key;
    }

    @Deprecated
    class Helper {
        @Nullable
        Object value;
    }
}";

#[test]
fn test_every_annotation_site_is_visited() {
    let mut class = parse_str::<ClassNode>(SERVICE).unwrap();
    let report = validate_class(&mut class).unwrap();
    assert_eq!(report.resolved, 4);
    assert_eq!(report.unresolved, vec!["Singleton", "Deprecated"]);

    let field = class.fields().next().unwrap();
    assert_eq!(field.annotations()[0].canonical_name(), "javax.inject.Inject");

    let method = class.methods().next().unwrap();
    assert_eq!(
        method.annotations()[0].canonical_name(),
        "javax.annotation.CheckReturnValue"
    );
    assert_eq!(
        method.parameters()[0].annotations[0].canonical_name(),
        "javax.annotation.Nullable"
    );

    let inner = class.inner_classes().next().unwrap();
    let inner_field = inner.fields().next().unwrap();
    assert_eq!(
        inner_field.annotations()[0].canonical_name(),
        "javax.annotation.Nullable"
    );
}

#[test]
fn test_rendering_unchanged_by_validation() {
    let mut class = parse_str::<ClassNode>(SERVICE).unwrap();
    validate_class(&mut class).unwrap();
    assert_eq!(class.to_string(), SERVICE);
}

#[test]
fn test_explicit_import_list() {
    let imports = vec![ImportBuilder::new().name("com.acme.Audit").build().unwrap()];
    let mut class = ClassBuilder::new()
        .annotation(AnnotationBuilder::new().name("Audit").build().unwrap())
        .name("Ledger")
        .build()
        .unwrap();
    let report = CanonicalNameValidator::new(&imports)
        .validate(&mut class)
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(class.annotations()[0].canonical_name(), "com.acme.Audit");
}

#[test]
fn test_preset_canonical_name_is_kept() {
    let imports = vec![ImportBuilder::new().name("com.acme.Audit").build().unwrap()];
    let field = FieldBuilder::new()
        .annotation(
            AnnotationBuilder::new()
                .name("Audit")
                .canonical_name("org.custom.Audit")
                .build()
                .unwrap(),
        )
        .field_type("int")
        .name("total")
        .build()
        .unwrap();
    let mut class = ClassBuilder::new().name("Ledger").field(field).build().unwrap();
    let report = CanonicalNameValidator::new(&imports)
        .validate(&mut class)
        .unwrap();
    assert_eq!(report.resolved, 0);
    match &class.members()[0] {
        Member::Field(field) => {
            assert_eq!(field.annotations()[0].canonical_name(), "org.custom.Audit")
        }
        other => panic!("expected a field, got {other}"),
    }
}

#[test]
fn test_frozen_tree() {
    let mut class = parse_str::<ClassNode>(SERVICE).unwrap();
    class.freeze();
    let err = validate_class(&mut class).unwrap_err();
    assert_eq!(
        err,
        ValidationError::FrozenTree {
            class_name: "Service".to_string()
        }
    );
}
