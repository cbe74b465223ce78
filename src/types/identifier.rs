//! Business identifiers and resource references.
//!
//! The two types are mutually recursive: an [`Identifier`] may name its
//! assigner by [`Reference`], and a logical reference may carry an
//! identifier. Each side boxes the other to keep the types finite.

use crate::error::BuildError;
use crate::types::codes::IdentifierUse;
use crate::types::coding::CodeableConcept;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::types::period::Period;
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const ASSIGNER_TARGETS: &[&str] = &["Organization"];

/// A business identifier in some naming system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub(crate) element: Element,
    pub(crate) r#use: Option<IdentifierUse>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) system: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) period: Option<Period>,
    pub(crate) assigner: Option<Box<Reference>>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Identifier);
memoized_value_hash!(Identifier { element, r#use, r#type, system, value, period, assigner });

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn r#use(&self) -> Option<IdentifierUse> {
        self.r#use
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    /// Namespace of the identifier value.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            element: self.element.clone(),
            r#use: self.r#use,
            r#type: self.r#type.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.clone(),
        }
    }
}

impl Visitable for Identifier {
    fn type_name(&self) -> &'static str {
        "Identifier"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.r#use.is_some()
            || self.r#type.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
            || self.assigner.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_code(self.r#use.as_ref(), "use", visitor);
            visitor::accept_node(self.r#type.as_ref(), "type", visitor);
            visitor::accept_str(self.system(), "system", visitor);
            visitor::accept_str(self.value(), "value", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_node(self.assigner.as_deref(), "assigner", visitor);
        });
    }
}

impl Validate for Identifier {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.check_reference(self.assigner.as_deref(), "assigner", ASSIGNER_TARGETS);
        ctx.validate_child(self.r#type.as_ref(), "type");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.validate_child(self.assigner.as_deref(), "assigner");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Identifier`].
#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    element: Element,
    r#use: Option<IdentifierUse>,
    r#type: Option<CodeableConcept>,
    system: Option<String>,
    value: Option<String>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
}

element_builder_accessors!(IdentifierBuilder);

impl IdentifierBuilder {
    pub fn with_use(mut self, r#use: IdentifierUse) -> Self {
        self.r#use = Some(r#use);
        self
    }

    pub fn with_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_assigner(mut self, assigner: Reference) -> Self {
        self.assigner = Some(Box::new(assigner));
        self
    }

    fn assemble(self) -> Identifier {
        Identifier {
            element: self.element,
            r#use: self.r#use,
            r#type: self.r#type,
            system: self.system,
            value: self.value,
            period: self.period,
            assigner: self.assigner,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Identifier, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Identifier {
        self.assemble()
    }
}

/// A reference from one resource to another.
///
/// The reference string is usually `Kind/id` for a local literal reference,
/// but may be an absolute URL or an internal `#fragment`. `target_type`
/// names the referenced kind explicitly and, when present, wins over
/// anything parsed out of the reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub(crate) element: Element,
    pub(crate) reference: Option<String>,
    pub(crate) target_type: Option<String>,
    pub(crate) identifier: Option<Box<Identifier>>,
    pub(crate) display: Option<String>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Reference);
memoized_value_hash!(Reference { element, reference, target_type, identifier, display });

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    /// Literal reference: relative (`Patient/example`), absolute or
    /// internal.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Explicitly declared kind of the referenced resource.
    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    /// Logical reference by business identifier.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_deref()
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            element: self.element.clone(),
            reference: self.reference.clone(),
            target_type: self.target_type.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
        }
    }
}

impl Visitable for Reference {
    fn type_name(&self) -> &'static str {
        "Reference"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.reference.is_some()
            || self.target_type.is_some()
            || self.identifier.is_some()
            || self.display.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_str(self.reference(), "reference", visitor);
            visitor::accept_str(self.target_type(), "type", visitor);
            visitor::accept_node(self.identifier.as_deref(), "identifier", visitor);
            visitor::accept_str(self.display(), "display", visitor);
        });
    }
}

impl Validate for Reference {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.identifier.as_deref(), "identifier");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Reference`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    element: Element,
    reference: Option<String>,
    target_type: Option<String>,
    identifier: Option<Box<Identifier>>,
    display: Option<String>,
}

element_builder_accessors!(ReferenceBuilder);

impl ReferenceBuilder {
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(Box::new(identifier));
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    fn assemble(self) -> Reference {
        Reference {
            element: self.element,
            reference: self.reference,
            target_type: self.target_type,
            identifier: self.identifier,
            display: self.display,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Reference, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Reference {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    #[test]
    fn identifier_assigner_must_be_an_organization() {
        let identifier = Identifier::builder()
            .with_system("http://hospital.example.org/mrn")
            .with_value("12345")
            .with_assigner(
                Reference::builder()
                    .with_reference("Patient/self")
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = identifier.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(issues[0].path, "Identifier.assigner");
    }

    #[test]
    fn reference_round_trips_through_its_builder() {
        let reference = Reference::builder()
            .with_reference("Practitioner/f001")
            .with_display("Dr. van den Broek")
            .build()
            .unwrap();
        let rebuilt = reference.to_builder().build().unwrap();
        assert_eq!(reference, rebuilt);
        assert_eq!(reference.value_hash(), rebuilt.value_hash());
    }
}
