//! The SupplyRequest resource: a request to provide a medication,
//! substance or device.

use chrono::{DateTime, FixedOffset};

use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::{RequestPriority, SupplyRequestStatus};
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, CodeableReference, Identifier, Quantity, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const DELIVER_FOR_TARGETS: &[&str] = &["Patient"];
const REQUESTER_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Organization",
    "Patient",
    "RelatedPerson",
    "Device",
    "CareTeam",
];
const SUPPLIER_TARGETS: &[&str] = &["Organization", "HealthcareService"];
const DELIVER_FROM_TARGETS: &[&str] = &["Organization", "Location"];
const DELIVER_TO_TARGETS: &[&str] = &["Organization", "Location", "Patient", "RelatedPerson"];
const OCCURRENCE_CHOICE: &[FhirType] =
    &[FhirType::DateTime, FhirType::Period, FhirType::Timing];
const PARAMETER_VALUE_CHOICE: &[FhirType] = &[
    FhirType::CodeableConcept,
    FhirType::Quantity,
    FhirType::Range,
    FhirType::Boolean,
];

/// A request for a supply item, with what, how much and where to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyRequest {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) status: Option<SupplyRequestStatus>,
    pub(crate) based_on: Vec<Reference>,
    pub(crate) category: Option<CodeableConcept>,
    pub(crate) priority: Option<RequestPriority>,
    pub(crate) deliver_for: Option<Reference>,
    pub(crate) item: Option<CodeableReference>,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) parameter: Vec<SupplyRequestParameter>,
    pub(crate) occurrence: Option<ChoiceValue>,
    pub(crate) authored_on: Option<DateTime<FixedOffset>>,
    pub(crate) requester: Option<Reference>,
    pub(crate) supplier: Vec<Reference>,
    pub(crate) reason: Vec<CodeableReference>,
    pub(crate) deliver_from: Option<Reference>,
    pub(crate) deliver_to: Option<Reference>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(SupplyRequest);
memoized_value_hash!(SupplyRequest {
    resource,
    identifier,
    status,
    based_on,
    category,
    priority,
    deliver_for,
    item,
    quantity,
    parameter,
    occurrence,
    authored_on,
    requester,
    supplier,
    reason,
    deliver_from,
    deliver_to,
});

impl SupplyRequest {
    pub fn builder() -> SupplyRequestBuilder {
        SupplyRequestBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn status(&self) -> Option<SupplyRequestStatus> {
        self.status
    }

    pub fn based_on(&self) -> &[Reference] {
        &self.based_on
    }

    pub fn category(&self) -> Option<&CodeableConcept> {
        self.category.as_ref()
    }

    pub fn priority(&self) -> Option<RequestPriority> {
        self.priority
    }

    pub fn deliver_for(&self) -> Option<&Reference> {
        self.deliver_for.as_ref()
    }

    /// What is being requested. Required.
    pub fn item(&self) -> Option<&CodeableReference> {
        self.item.as_ref()
    }

    /// How much is being requested. Required.
    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn parameter(&self) -> &[SupplyRequestParameter] {
        &self.parameter
    }

    pub fn occurrence(&self) -> Option<&ChoiceValue> {
        self.occurrence.as_ref()
    }

    pub fn authored_on(&self) -> Option<DateTime<FixedOffset>> {
        self.authored_on
    }

    pub fn requester(&self) -> Option<&Reference> {
        self.requester.as_ref()
    }

    pub fn supplier(&self) -> &[Reference] {
        &self.supplier
    }

    pub fn reason(&self) -> &[CodeableReference] {
        &self.reason
    }

    pub fn deliver_from(&self) -> Option<&Reference> {
        self.deliver_from.as_ref()
    }

    pub fn deliver_to(&self) -> Option<&Reference> {
        self.deliver_to.as_ref()
    }

    pub fn to_builder(&self) -> SupplyRequestBuilder {
        SupplyRequestBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            status: self.status,
            based_on: self.based_on.clone(),
            category: self.category.clone(),
            priority: self.priority,
            deliver_for: self.deliver_for.clone(),
            item: self.item.clone(),
            quantity: self.quantity.clone(),
            parameter: self.parameter.clone(),
            occurrence: self.occurrence.clone(),
            authored_on: self.authored_on,
            requester: self.requester.clone(),
            supplier: self.supplier.clone(),
            reason: self.reason.clone(),
            deliver_from: self.deliver_from.clone(),
            deliver_to: self.deliver_to.clone(),
        }
    }
}

impl Visitable for SupplyRequest {
    fn type_name(&self) -> &'static str {
        "SupplyRequest"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.status.is_some()
            || !self.based_on.is_empty()
            || self.category.is_some()
            || self.priority.is_some()
            || self.deliver_for.is_some()
            || self.item.is_some()
            || self.quantity.is_some()
            || !self.parameter.is_empty()
            || self.occurrence.is_some()
            || self.authored_on.is_some()
            || self.requester.is_some()
            || !self.supplier.is_empty()
            || !self.reason.is_empty()
            || self.deliver_from.is_some()
            || self.deliver_to.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.based_on, "basedOn", visitor);
            visitor::accept_node(self.category.as_ref(), "category", visitor);
            visitor::accept_code(self.priority.as_ref(), "priority", visitor);
            visitor::accept_node(self.deliver_for.as_ref(), "deliverFor", visitor);
            visitor::accept_node(self.item.as_ref(), "item", visitor);
            visitor::accept_node(self.quantity.as_ref(), "quantity", visitor);
            visitor::accept_nodes(&self.parameter, "parameter", visitor);
            visitor::accept_choice(self.occurrence.as_ref(), "occurrence", visitor);
            visitor::accept_date_time(self.authored_on, "authoredOn", visitor);
            visitor::accept_node(self.requester.as_ref(), "requester", visitor);
            visitor::accept_nodes(&self.supplier, "supplier", visitor);
            visitor::accept_nodes(&self.reason, "reason", visitor);
            visitor::accept_node(self.deliver_from.as_ref(), "deliverFrom", visitor);
            visitor::accept_node(self.deliver_to.as_ref(), "deliverTo", visitor);
        });
    }
}

impl Validate for SupplyRequest {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.item, "item");
        ctx.require(&self.quantity, "quantity");
        ctx.check_reference(self.deliver_for.as_ref(), "deliverFor", DELIVER_FOR_TARGETS);
        ctx.check_choice(&self.occurrence, "occurrence", OCCURRENCE_CHOICE);
        ctx.check_reference(self.requester.as_ref(), "requester", REQUESTER_TARGETS);
        ctx.check_references(&self.supplier, "supplier", SUPPLIER_TARGETS);
        ctx.check_reference(self.deliver_from.as_ref(), "deliverFrom", DELIVER_FROM_TARGETS);
        ctx.check_reference(self.deliver_to.as_ref(), "deliverTo", DELIVER_TO_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.based_on, "basedOn");
        ctx.validate_child(self.category.as_ref(), "category");
        ctx.validate_child(self.deliver_for.as_ref(), "deliverFor");
        ctx.validate_child(self.item.as_ref(), "item");
        ctx.validate_child(self.quantity.as_ref(), "quantity");
        ctx.validate_children(&self.parameter, "parameter");
        ctx.validate_choice_child(&self.occurrence, "occurrence");
        ctx.validate_child(self.requester.as_ref(), "requester");
        ctx.validate_children(&self.supplier, "supplier");
        ctx.validate_children(&self.reason, "reason");
        ctx.validate_child(self.deliver_from.as_ref(), "deliverFrom");
        ctx.validate_child(self.deliver_to.as_ref(), "deliverTo");
    }
}

/// Builder for [`SupplyRequest`].
#[derive(Debug, Clone, Default)]
pub struct SupplyRequestBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    status: Option<SupplyRequestStatus>,
    based_on: Vec<Reference>,
    category: Option<CodeableConcept>,
    priority: Option<RequestPriority>,
    deliver_for: Option<Reference>,
    item: Option<CodeableReference>,
    quantity: Option<Quantity>,
    parameter: Vec<SupplyRequestParameter>,
    occurrence: Option<ChoiceValue>,
    authored_on: Option<DateTime<FixedOffset>>,
    requester: Option<Reference>,
    supplier: Vec<Reference>,
    reason: Vec<CodeableReference>,
    deliver_from: Option<Reference>,
    deliver_to: Option<Reference>,
}

resource_builder_accessors!(SupplyRequestBuilder);

impl SupplyRequestBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_status(mut self, status: SupplyRequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn add_based_on(mut self, based_on: Reference) -> Self {
        self.based_on.push(based_on);
        self
    }

    pub fn with_based_on(mut self, based_on: Vec<Reference>) -> Self {
        self.based_on = based_on;
        self
    }

    pub fn with_category(mut self, category: CodeableConcept) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_priority(mut self, priority: RequestPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_deliver_for(mut self, deliver_for: Reference) -> Self {
        self.deliver_for = Some(deliver_for);
        self
    }

    pub fn with_item(mut self, item: CodeableReference) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn add_parameter(mut self, parameter: SupplyRequestParameter) -> Self {
        self.parameter.push(parameter);
        self
    }

    pub fn with_parameter(mut self, parameter: Vec<SupplyRequestParameter>) -> Self {
        self.parameter = parameter;
        self
    }

    pub fn with_occurrence(mut self, occurrence: impl Into<ChoiceValue>) -> Self {
        self.occurrence = Some(occurrence.into());
        self
    }

    pub fn with_authored_on(mut self, authored_on: DateTime<FixedOffset>) -> Self {
        self.authored_on = Some(authored_on);
        self
    }

    pub fn with_requester(mut self, requester: Reference) -> Self {
        self.requester = Some(requester);
        self
    }

    pub fn add_supplier(mut self, supplier: Reference) -> Self {
        self.supplier.push(supplier);
        self
    }

    pub fn with_supplier(mut self, supplier: Vec<Reference>) -> Self {
        self.supplier = supplier;
        self
    }

    pub fn add_reason(mut self, reason: CodeableReference) -> Self {
        self.reason.push(reason);
        self
    }

    pub fn with_reason(mut self, reason: Vec<CodeableReference>) -> Self {
        self.reason = reason;
        self
    }

    pub fn with_deliver_from(mut self, deliver_from: Reference) -> Self {
        self.deliver_from = Some(deliver_from);
        self
    }

    pub fn with_deliver_to(mut self, deliver_to: Reference) -> Self {
        self.deliver_to = Some(deliver_to);
        self
    }

    fn assemble(self) -> SupplyRequest {
        SupplyRequest {
            resource: self.resource,
            identifier: self.identifier,
            status: self.status,
            based_on: self.based_on,
            category: self.category,
            priority: self.priority,
            deliver_for: self.deliver_for,
            item: self.item,
            quantity: self.quantity,
            parameter: self.parameter,
            occurrence: self.occurrence,
            authored_on: self.authored_on,
            requester: self.requester,
            supplier: self.supplier,
            reason: self.reason,
            deliver_from: self.deliver_from,
            deliver_to: self.deliver_to,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SupplyRequest, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SupplyRequest {
        self.assemble()
    }
}

/// Ordering detail such as size or gauge, with a constrained value shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyRequestParameter {
    pub(crate) backbone: BackboneElement,
    pub(crate) code: Option<CodeableConcept>,
    pub(crate) value: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SupplyRequestParameter);
memoized_value_hash!(SupplyRequestParameter { backbone, code, value });

impl SupplyRequestParameter {
    pub fn builder() -> SupplyRequestParameterBuilder {
        SupplyRequestParameterBuilder::default()
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn value(&self) -> Option<&ChoiceValue> {
        self.value.as_ref()
    }

    pub fn to_builder(&self) -> SupplyRequestParameterBuilder {
        SupplyRequestParameterBuilder {
            backbone: self.backbone.clone(),
            code: self.code.clone(),
            value: self.value.clone(),
        }
    }
}

impl Visitable for SupplyRequestParameter {
    fn type_name(&self) -> &'static str {
        "SupplyRequest.Parameter"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.code.is_some() || self.value.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.code.as_ref(), "code", visitor);
            visitor::accept_choice(self.value.as_ref(), "value", visitor);
        });
    }
}

impl Validate for SupplyRequestParameter {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.check_choice(&self.value, "value", PARAMETER_VALUE_CHOICE);
        ctx.validate_child(self.code.as_ref(), "code");
        ctx.validate_choice_child(&self.value, "value");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SupplyRequestParameter`].
#[derive(Debug, Clone, Default)]
pub struct SupplyRequestParameterBuilder {
    backbone: BackboneElement,
    code: Option<CodeableConcept>,
    value: Option<ChoiceValue>,
}

backbone_builder_accessors!(SupplyRequestParameterBuilder);

impl SupplyRequestParameterBuilder {
    pub fn with_code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    fn assemble(self) -> SupplyRequestParameter {
        SupplyRequestParameter {
            backbone: self.backbone,
            code: self.code,
            value: self.value,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SupplyRequestParameter, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SupplyRequestParameter {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::validation::IssueKind;

    fn gauze_item() -> CodeableReference {
        CodeableReference::builder()
            .with_concept(
                CodeableConcept::builder()
                    .with_text("sterile gauze, 10cm")
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn minimal_request_builds() {
        let request = SupplyRequest::builder()
            .with_status(SupplyRequestStatus::Active)
            .with_item(gauze_item())
            .with_quantity(
                Quantity::builder().with_value(dec!(50)).build_unvalidated(),
            )
            .build()
            .unwrap();
        assert_eq!(request.status(), Some(SupplyRequestStatus::Active));
    }

    #[test]
    fn item_and_quantity_are_required() {
        let err = SupplyRequest::builder().build().unwrap_err();
        assert_eq!(err.error_count(), 2);
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["SupplyRequest.item", "SupplyRequest.quantity"]);
    }

    #[test]
    fn parameter_rejects_string_values() {
        let request = SupplyRequest::builder()
            .with_item(gauze_item())
            .with_quantity(Quantity::builder().with_value(dec!(1)).build_unvalidated())
            .add_parameter(
                SupplyRequestParameter::builder()
                    .with_value(ChoiceValue::from("extra-large"))
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = request.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidChoiceType);
        assert_eq!(issues[0].path, "SupplyRequest.parameter[0].value");
    }
}
