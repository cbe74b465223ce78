//! The Substance resource: a homogeneous material, either a kind or a
//! concrete instance with an expiry and quantity.

use chrono::{DateTime, FixedOffset};

use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::SubstanceStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, CodeableReference, Identifier, Quantity, Ratio};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const INGREDIENT_SUBSTANCE_TARGETS: &[&str] = &["Substance"];
const INGREDIENT_SUBSTANCE_CHOICE: &[FhirType] =
    &[FhirType::CodeableConcept, FhirType::Reference];

/// A material with a defined composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substance {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) instance: Option<bool>,
    pub(crate) status: Option<SubstanceStatus>,
    pub(crate) category: Vec<CodeableConcept>,
    pub(crate) code: Option<CodeableReference>,
    pub(crate) description: Option<String>,
    pub(crate) expiry: Option<DateTime<FixedOffset>>,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) ingredient: Vec<SubstanceIngredient>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(Substance);
memoized_value_hash!(Substance {
    resource,
    identifier,
    instance,
    status,
    category,
    code,
    description,
    expiry,
    quantity,
    ingredient,
});

impl Substance {
    pub fn builder() -> SubstanceBuilder {
        SubstanceBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Whether this describes a concrete instance rather than a kind.
    /// Required.
    pub fn instance(&self) -> Option<bool> {
        self.instance
    }

    pub fn status(&self) -> Option<SubstanceStatus> {
        self.status
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// What the substance is. Required.
    pub fn code(&self) -> Option<&CodeableReference> {
        self.code.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn expiry(&self) -> Option<DateTime<FixedOffset>> {
        self.expiry
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn ingredient(&self) -> &[SubstanceIngredient] {
        &self.ingredient
    }

    pub fn to_builder(&self) -> SubstanceBuilder {
        SubstanceBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            instance: self.instance,
            status: self.status,
            category: self.category.clone(),
            code: self.code.clone(),
            description: self.description.clone(),
            expiry: self.expiry,
            quantity: self.quantity.clone(),
            ingredient: self.ingredient.clone(),
        }
    }
}

impl Visitable for Substance {
    fn type_name(&self) -> &'static str {
        "Substance"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.instance.is_some()
            || self.status.is_some()
            || !self.category.is_empty()
            || self.code.is_some()
            || self.description.is_some()
            || self.expiry.is_some()
            || self.quantity.is_some()
            || !self.ingredient.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_bool(self.instance, "instance", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.category, "category", visitor);
            visitor::accept_node(self.code.as_ref(), "code", visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
            visitor::accept_date_time(self.expiry, "expiry", visitor);
            visitor::accept_node(self.quantity.as_ref(), "quantity", visitor);
            visitor::accept_nodes(&self.ingredient, "ingredient", visitor);
        });
    }
}

impl Validate for Substance {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.instance, "instance");
        ctx.require(&self.code, "code");
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.category, "category");
        ctx.validate_child(self.code.as_ref(), "code");
        ctx.validate_child(self.quantity.as_ref(), "quantity");
        ctx.validate_children(&self.ingredient, "ingredient");
    }
}

/// Builder for [`Substance`].
#[derive(Debug, Clone, Default)]
pub struct SubstanceBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    instance: Option<bool>,
    status: Option<SubstanceStatus>,
    category: Vec<CodeableConcept>,
    code: Option<CodeableReference>,
    description: Option<String>,
    expiry: Option<DateTime<FixedOffset>>,
    quantity: Option<Quantity>,
    ingredient: Vec<SubstanceIngredient>,
}

resource_builder_accessors!(SubstanceBuilder);

impl SubstanceBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_instance(mut self, instance: bool) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn with_status(mut self, status: SubstanceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn add_category(mut self, category: CodeableConcept) -> Self {
        self.category.push(category);
        self
    }

    pub fn with_category(mut self, category: Vec<CodeableConcept>) -> Self {
        self.category = category;
        self
    }

    pub fn with_code(mut self, code: CodeableReference) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_expiry(mut self, expiry: DateTime<FixedOffset>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn add_ingredient(mut self, ingredient: SubstanceIngredient) -> Self {
        self.ingredient.push(ingredient);
        self
    }

    pub fn with_ingredient(mut self, ingredient: Vec<SubstanceIngredient>) -> Self {
        self.ingredient = ingredient;
        self
    }

    fn assemble(self) -> Substance {
        Substance {
            resource: self.resource,
            identifier: self.identifier,
            instance: self.instance,
            status: self.status,
            category: self.category,
            code: self.code,
            description: self.description,
            expiry: self.expiry,
            quantity: self.quantity,
            ingredient: self.ingredient,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Substance, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Substance {
        self.assemble()
    }
}

/// A component of the substance and its proportion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstanceIngredient {
    pub(crate) backbone: BackboneElement,
    pub(crate) quantity: Option<Ratio>,
    pub(crate) substance: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SubstanceIngredient);
memoized_value_hash!(SubstanceIngredient { backbone, quantity, substance });

impl SubstanceIngredient {
    pub fn builder() -> SubstanceIngredientBuilder {
        SubstanceIngredientBuilder::default()
    }

    pub fn quantity(&self) -> Option<&Ratio> {
        self.quantity.as_ref()
    }

    /// The component, as a code or a reference. Required.
    pub fn substance(&self) -> Option<&ChoiceValue> {
        self.substance.as_ref()
    }

    pub fn to_builder(&self) -> SubstanceIngredientBuilder {
        SubstanceIngredientBuilder {
            backbone: self.backbone.clone(),
            quantity: self.quantity.clone(),
            substance: self.substance.clone(),
        }
    }
}

impl Visitable for SubstanceIngredient {
    fn type_name(&self) -> &'static str {
        "Substance.Ingredient"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.quantity.is_some() || self.substance.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.quantity.as_ref(), "quantity", visitor);
            visitor::accept_choice(self.substance.as_ref(), "substance", visitor);
        });
    }
}

impl Validate for SubstanceIngredient {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require_choice(&self.substance, "substance", INGREDIENT_SUBSTANCE_CHOICE);
        ctx.check_choice_reference(
            &self.substance,
            "substance",
            INGREDIENT_SUBSTANCE_TARGETS,
        );
        ctx.validate_child(self.quantity.as_ref(), "quantity");
        ctx.validate_choice_child(&self.substance, "substance");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SubstanceIngredient`].
#[derive(Debug, Clone, Default)]
pub struct SubstanceIngredientBuilder {
    backbone: BackboneElement,
    quantity: Option<Ratio>,
    substance: Option<ChoiceValue>,
}

backbone_builder_accessors!(SubstanceIngredientBuilder);

impl SubstanceIngredientBuilder {
    pub fn with_quantity(mut self, quantity: Ratio) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_substance(mut self, substance: impl Into<ChoiceValue>) -> Self {
        self.substance = Some(substance.into());
        self
    }

    fn assemble(self) -> SubstanceIngredient {
        SubstanceIngredient {
            backbone: self.backbone,
            quantity: self.quantity,
            substance: self.substance,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SubstanceIngredient, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SubstanceIngredient {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::{Coding, Reference};
    use crate::validation::IssueKind;

    fn methanol() -> CodeableReference {
        CodeableReference::builder()
            .with_concept(
                CodeableConcept::builder()
                    .add_coding(
                        Coding::builder()
                            .with_system("http://snomed.info/sct")
                            .with_code("67884008")
                            .with_display("Methanol")
                            .build_unvalidated(),
                    )
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn kind_level_substance_builds() {
        let substance = Substance::builder()
            .with_instance(false)
            .with_code(methanol())
            .build()
            .unwrap();
        assert_eq!(substance.instance(), Some(false));
    }

    #[test]
    fn instance_and_code_are_required() {
        let err = Substance::builder().build().unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["Substance.instance", "Substance.code"]);
    }

    #[test]
    fn ingredient_reference_must_be_a_substance() {
        let substance = Substance::builder()
            .with_instance(true)
            .with_code(methanol())
            .add_ingredient(
                SubstanceIngredient::builder()
                    .with_substance(ChoiceValue::Reference(
                        Reference::builder()
                            .with_reference("Medication/m1")
                            .build_unvalidated(),
                    ))
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = substance.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(issues[0].path, "Substance.ingredient[0].substance");
    }
}
