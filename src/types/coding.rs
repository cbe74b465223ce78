//! Coded values: [`Coding`], [`CodeableConcept`] and [`CodeableReference`].

use crate::error::BuildError;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::types::identifier::Reference;
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

/// One code from one code system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coding {
    pub(crate) element: Element,
    pub(crate) system: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) code: Option<String>,
    pub(crate) display: Option<String>,
    pub(crate) user_selected: Option<bool>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Coding);
memoized_value_hash!(Coding { element, system, version, code, display, user_selected });

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    /// Identity of the code system.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Symbol in the code system's syntax.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn user_selected(&self) -> Option<bool> {
        self.user_selected
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            element: self.element.clone(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected,
        }
    }
}

impl Visitable for Coding {
    fn type_name(&self) -> &'static str {
        "Coding"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_str(self.system(), "system", visitor);
            visitor::accept_str(self.version(), "version", visitor);
            visitor::accept_str(self.code(), "code", visitor);
            visitor::accept_str(self.display(), "display", visitor);
            visitor::accept_bool(self.user_selected, "userSelected", visitor);
        });
    }
}

impl Validate for Coding {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.warn_code_format(self.code(), "code");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Coding`].
#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    element: Element,
    system: Option<String>,
    version: Option<String>,
    code: Option<String>,
    display: Option<String>,
    user_selected: Option<bool>,
}

element_builder_accessors!(CodingBuilder);

impl CodingBuilder {
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_user_selected(mut self, user_selected: bool) -> Self {
        self.user_selected = Some(user_selected);
        self
    }

    fn assemble(self) -> Coding {
        Coding {
            element: self.element,
            system: self.system,
            version: self.version,
            code: self.code,
            display: self.display,
            user_selected: self.user_selected,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Coding, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Coding {
        self.assemble()
    }
}

/// A concept: any number of codings plus free text.
///
/// A concept with text but no codings is legitimate; binding checks treat
/// it as carrying nothing to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeableConcept {
    pub(crate) element: Element,
    pub(crate) coding: Vec<Coding>,
    pub(crate) text: Option<String>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(CodeableConcept);
memoized_value_hash!(CodeableConcept { element, coding, text });

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            element: self.element.clone(),
            coding: self.coding.clone(),
            text: self.text.clone(),
        }
    }
}

impl Visitable for CodeableConcept {
    fn type_name(&self) -> &'static str {
        "CodeableConcept"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || !self.coding.is_empty() || self.text.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_nodes(&self.coding, "coding", visitor);
            visitor::accept_str(self.text(), "text", visitor);
        });
    }
}

impl Validate for CodeableConcept {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_children(&self.coding, "coding");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`CodeableConcept`].
#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    element: Element,
    coding: Vec<Coding>,
    text: Option<String>,
}

element_builder_accessors!(CodeableConceptBuilder);

impl CodeableConceptBuilder {
    pub fn add_coding(mut self, coding: Coding) -> Self {
        self.coding.push(coding);
        self
    }

    pub fn with_coding(mut self, coding: Vec<Coding>) -> Self {
        self.coding = coding;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn assemble(self) -> CodeableConcept {
        CodeableConcept {
            element: self.element,
            coding: self.coding,
            text: self.text,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<CodeableConcept, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> CodeableConcept {
        self.assemble()
    }
}

/// Either a concept or a reference to a resource that defines one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeableReference {
    pub(crate) element: Element,
    pub(crate) concept: Option<CodeableConcept>,
    pub(crate) reference: Option<Reference>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(CodeableReference);
memoized_value_hash!(CodeableReference { element, concept, reference });

impl CodeableReference {
    pub fn builder() -> CodeableReferenceBuilder {
        CodeableReferenceBuilder::default()
    }

    pub fn concept(&self) -> Option<&CodeableConcept> {
        self.concept.as_ref()
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    pub fn to_builder(&self) -> CodeableReferenceBuilder {
        CodeableReferenceBuilder {
            element: self.element.clone(),
            concept: self.concept.clone(),
            reference: self.reference.clone(),
        }
    }
}

impl Visitable for CodeableReference {
    fn type_name(&self) -> &'static str {
        "CodeableReference"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.concept.is_some() || self.reference.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_node(self.concept.as_ref(), "concept", visitor);
            visitor::accept_node(self.reference.as_ref(), "reference", visitor);
        });
    }
}

impl Validate for CodeableReference {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.concept.as_ref(), "concept");
        ctx.validate_child(self.reference.as_ref(), "reference");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`CodeableReference`].
#[derive(Debug, Clone, Default)]
pub struct CodeableReferenceBuilder {
    element: Element,
    concept: Option<CodeableConcept>,
    reference: Option<Reference>,
}

element_builder_accessors!(CodeableReferenceBuilder);

impl CodeableReferenceBuilder {
    pub fn with_concept(mut self, concept: CodeableConcept) -> Self {
        self.concept = Some(concept);
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    fn assemble(self) -> CodeableReference {
        CodeableReference {
            element: self.element,
            concept: self.concept,
            reference: self.reference,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<CodeableReference, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> CodeableReference {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    #[test]
    fn empty_coding_is_rejected() {
        let err = Coding::builder().build().unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::EmptyElement);
    }

    #[test]
    fn code_format_problems_are_warnings_only() {
        let coding = Coding::builder().with_code(" padded ").build().unwrap();
        let issues = coding.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidFieldValue);
    }

    #[test]
    fn text_only_concept_builds() {
        let concept = CodeableConcept::builder()
            .with_text("verbal description only")
            .build()
            .unwrap();
        assert!(concept.coding().is_empty());
    }

    #[test]
    fn nested_coding_issues_carry_indexed_paths() {
        let concept = CodeableConcept::builder()
            .add_coding(Coding::builder().build_unvalidated())
            .add_coding(Coding::builder().with_code("ok").build_unvalidated())
            .build_unvalidated();
        let issues = concept.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "CodeableConcept.coding[0]");
    }
}
