use crate::ast::{AnnotationNode, ClassNode, ImportNode, Member, SyntaxNode};
use crate::error::ValidationError;
use log::{debug, trace};
use serde::Serialize;

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Annotations given a canonical name during this pass.
    pub resolved: usize,
    /// Written names of annotations left blank, in visiting order.
    pub unresolved: Vec<String>,
}

impl ValidationReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Fills in the canonical name of every annotation in a class tree from the
/// compilation unit's imports.
///
/// A qualified annotation name is its own canonical name. A simple name is
/// matched against the last segment of each single-type, non-static import,
/// and the first match wins. Anything else stays blank, including names from
/// the same package or `java.lang`. Annotations that already carry a
/// canonical name are left alone, so running the pass twice changes nothing.
#[derive(Debug, Clone)]
pub struct CanonicalNameValidator<'a> {
    imports: &'a [ImportNode],
}

impl<'a> CanonicalNameValidator<'a> {
    pub fn new(imports: &'a [ImportNode]) -> Self {
        Self { imports }
    }

    pub fn canonical_name_for(&self, written: &str) -> Option<String> {
        if written.contains('.') {
            return Some(written.to_string());
        }
        self.imports
            .iter()
            .filter(|import| !import.is_static())
            .find(|import| import.simple_name() == Some(written))
            .map(|import| import.name().to_string())
    }

    pub fn validate(&self, class: &mut ClassNode) -> Result<ValidationReport, ValidationError> {
        if !class.is_editable() {
            return Err(ValidationError::FrozenTree {
                class_name: class.name().to_string(),
            });
        }
        let mut report = ValidationReport::default();
        self.visit_class(class, &mut report)?;
        debug!(
            "canonical names for {}: {} resolved, {} unresolved",
            class.name(),
            report.resolved,
            report.unresolved.len()
        );
        Ok(report)
    }

    fn visit_class(
        &self,
        class: &mut ClassNode,
        report: &mut ValidationReport,
    ) -> Result<(), ValidationError> {
        let class_name = class.name().to_string();
        trace!("validating annotations of {class_name}");
        self.visit_annotations(class.annotations_mut(), &class_name, report)?;

        for member in class.members_mut() {
            match member {
                Member::Field(field) => {
                    self.visit_annotations(field.annotations_mut(), &class_name, report)?
                }
                Member::Method(method) => {
                    self.visit_annotations(method.annotations_mut(), &class_name, report)?;
                    for parameter in method.parameters_mut() {
                        self.visit_annotations(&mut parameter.annotations, &class_name, report)?;
                    }
                }
                Member::Class(inner) => self.visit_class(inner, report)?,
                Member::StaticBlock(_) | Member::Comment(_) => {}
            }
        }
        Ok(())
    }

    fn visit_annotations(
        &self,
        annotations: &mut [AnnotationNode],
        class_name: &str,
        report: &mut ValidationReport,
    ) -> Result<(), ValidationError> {
        for annotation in annotations.iter_mut().filter(|a| !a.is_resolved()) {
            let Some(canonical) = self.canonical_name_for(annotation.name()) else {
                debug!("no import resolves @{} in {class_name}", annotation.name());
                report.unresolved.push(annotation.name().to_string());
                continue;
            };
            annotation
                .set_canonical_name(canonical)
                .map_err(|_| ValidationError::FrozenTree {
                    class_name: class_name.to_string(),
                })?;
            report.resolved += 1;
        }
        Ok(())
    }
}

/// Validates a compilation unit against its own imports.
pub fn validate_class(class: &mut ClassNode) -> Result<ValidationReport, ValidationError> {
    let imports = class.imports().to_vec();
    CanonicalNameValidator::new(&imports).validate(class)
}
