//! Annotations: authored notes with a timestamp.

use chrono::{DateTime, FixedOffset};

use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const AUTHOR_CHOICE: &[FhirType] = &[FhirType::Reference, FhirType::String];
const AUTHOR_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Patient",
    "RelatedPerson",
    "Organization",
];

/// A text note attributed to an author. The text itself is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub(crate) element: Element,
    pub(crate) author: Option<ChoiceValue>,
    pub(crate) time: Option<DateTime<FixedOffset>>,
    pub(crate) text: Option<String>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Annotation);
memoized_value_hash!(Annotation { element, author, time, text });

impl Annotation {
    pub fn builder() -> AnnotationBuilder {
        AnnotationBuilder::default()
    }

    /// Author as a reference or a plain name.
    pub fn author(&self) -> Option<&ChoiceValue> {
        self.author.as_ref()
    }

    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        self.time
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn to_builder(&self) -> AnnotationBuilder {
        AnnotationBuilder {
            element: self.element.clone(),
            author: self.author.clone(),
            time: self.time,
            text: self.text.clone(),
        }
    }
}

impl Visitable for Annotation {
    fn type_name(&self) -> &'static str {
        "Annotation"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.author.is_some()
            || self.time.is_some()
            || self.text.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_choice(self.author.as_ref(), "author", visitor);
            visitor::accept_date_time(self.time, "time", visitor);
            visitor::accept_str(self.text(), "text", visitor);
        });
    }
}

impl Validate for Annotation {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.check_choice(&self.author, "author", AUTHOR_CHOICE);
        ctx.check_choice_reference(&self.author, "author", AUTHOR_TARGETS);
        ctx.require(&self.text, "text");
        ctx.validate_choice_child(&self.author, "author");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Annotation`].
#[derive(Debug, Clone, Default)]
pub struct AnnotationBuilder {
    element: Element,
    author: Option<ChoiceValue>,
    time: Option<DateTime<FixedOffset>>,
    text: Option<String>,
}

element_builder_accessors!(AnnotationBuilder);

impl AnnotationBuilder {
    pub fn with_author(mut self, author: impl Into<ChoiceValue>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn assemble(self) -> Annotation {
        Annotation {
            element: self.element,
            author: self.author,
            time: self.time,
            text: self.text,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Annotation, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Annotation {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::identifier::Reference;
    use crate::validation::IssueKind;

    #[test]
    fn text_is_required() {
        let err = Annotation::builder()
            .with_author(ChoiceValue::String("triage nurse".into()))
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::MissingRequiredField);
        assert_eq!(err.issues()[0].path, "Annotation.text");
    }

    #[test]
    fn author_may_be_a_plain_string() {
        let note = Annotation::builder()
            .with_author(ChoiceValue::String("triage nurse".into()))
            .with_text("patient arrived short of breath")
            .build()
            .unwrap();
        assert!(note.author().is_some());
    }

    #[test]
    fn author_reference_kind_is_checked() {
        let err = Annotation::builder()
            .with_author(ChoiceValue::Reference(
                Reference::builder()
                    .with_reference("Device/pump-7")
                    .build_unvalidated(),
            ))
            .with_text("flagged by the infusion pump")
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidReferenceTarget);
    }
}
