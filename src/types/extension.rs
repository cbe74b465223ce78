//! FHIR extensions.

use crate::choice::ChoiceValue;
use crate::error::BuildError;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

/// Additional content attached to an element, identified by the URL of its
/// definition. Extensions nest through the shared element content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub(crate) element: Element,
    pub(crate) url: Option<String>,
    pub(crate) value: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Extension);
memoized_value_hash!(Extension { element, url, value });

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// Canonical URL of the extension's definition.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn value(&self) -> Option<&ChoiceValue> {
        self.value.as_ref()
    }

    /// Reopen this value as a builder seeded with its content.
    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            element: self.element.clone(),
            url: self.url.clone(),
            value: self.value.clone(),
        }
    }
}

impl Visitable for Extension {
    fn type_name(&self) -> &'static str {
        "Extension"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.url.is_some() || self.value.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_str(self.url(), "url", visitor);
            visitor::accept_choice(self.value.as_ref(), "value", visitor);
        });
    }
}

impl Validate for Extension {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.require(&self.url, "url");
        ctx.validate_choice_child(&self.value, "value");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Extension`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    element: Element,
    url: Option<String>,
    value: Option<ChoiceValue>,
}

element_builder_accessors!(ExtensionBuilder);

impl ExtensionBuilder {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    fn assemble(self) -> Extension {
        Extension {
            element: self.element,
            url: self.url,
            value: self.value,
            hash_cell: HashCell::new(),
        }
    }

    /// Freeze the staged content and validate it.
    pub fn build(self) -> Result<Extension, BuildError> {
        validation::finalize(self.assemble())
    }

    /// Freeze the staged content without validating it.
    pub fn build_unvalidated(self) -> Extension {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    #[test]
    fn url_is_required() {
        let err = Extension::builder()
            .with_value(ChoiceValue::Boolean(true))
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::MissingRequiredField);
        assert_eq!(err.issues()[0].path, "Extension.url");
    }

    #[test]
    fn builds_with_url_and_value() {
        let extension = Extension::builder()
            .with_url("http://example.org/fhir/StructureDefinition/preferred")
            .with_value(ChoiceValue::Boolean(true))
            .build()
            .unwrap();
        assert_eq!(extension.value(), Some(&ChoiceValue::Boolean(true)));
    }
}
