//! The SupplyDelivery resource: the handover of a requested supply item.

use crate::binding::CodeBinding;
use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::SupplyDeliveryStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, Identifier, Quantity, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const BASED_ON_TARGETS: &[&str] = &["SupplyRequest"];
const PART_OF_TARGETS: &[&str] = &["SupplyDelivery", "Contract"];
const PATIENT_TARGETS: &[&str] = &["Patient"];
const SUPPLIER_TARGETS: &[&str] = &["Practitioner", "PractitionerRole", "Organization"];
const DESTINATION_TARGETS: &[&str] = &["Location"];
const RECEIVER_TARGETS: &[&str] = &["Practitioner", "PractitionerRole", "Organization"];
const ITEM_TARGETS: &[&str] = &[
    "Medication",
    "Substance",
    "Device",
    "BiologicallyDerivedProduct",
    "NutritionProduct",
    "InventoryItem",
];
const OCCURRENCE_CHOICE: &[FhirType] =
    &[FhirType::DateTime, FhirType::Period, FhirType::Timing];
const ITEM_CHOICE: &[FhirType] = &[FhirType::CodeableConcept, FhirType::Reference];

/// Broad category of the thing delivered.
const TYPE_BINDING: CodeBinding = CodeBinding::required(
    "SupplyItemType",
    "http://hl7.org/fhir/ValueSet/supplydelivery-supplyitemtype|5.0.0",
    "http://hl7.org/fhir/supplydelivery-supplyitemtype",
    &["medication", "device", "biologicallyderivedproduct"],
);

/// Delivery of a supply item to a patient or destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyDelivery {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) based_on: Vec<Reference>,
    pub(crate) part_of: Vec<Reference>,
    pub(crate) status: Option<SupplyDeliveryStatus>,
    pub(crate) patient: Option<Reference>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) supplied_item: Vec<SupplyDeliverySuppliedItem>,
    pub(crate) occurrence: Option<ChoiceValue>,
    pub(crate) supplier: Option<Reference>,
    pub(crate) destination: Option<Reference>,
    pub(crate) receiver: Vec<Reference>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(SupplyDelivery);
memoized_value_hash!(SupplyDelivery {
    resource,
    identifier,
    based_on,
    part_of,
    status,
    patient,
    r#type,
    supplied_item,
    occurrence,
    supplier,
    destination,
    receiver,
});

impl SupplyDelivery {
    pub fn builder() -> SupplyDeliveryBuilder {
        SupplyDeliveryBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn based_on(&self) -> &[Reference] {
        &self.based_on
    }

    pub fn part_of(&self) -> &[Reference] {
        &self.part_of
    }

    pub fn status(&self) -> Option<SupplyDeliveryStatus> {
        self.status
    }

    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn supplied_item(&self) -> &[SupplyDeliverySuppliedItem] {
        &self.supplied_item
    }

    pub fn occurrence(&self) -> Option<&ChoiceValue> {
        self.occurrence.as_ref()
    }

    pub fn supplier(&self) -> Option<&Reference> {
        self.supplier.as_ref()
    }

    pub fn destination(&self) -> Option<&Reference> {
        self.destination.as_ref()
    }

    pub fn receiver(&self) -> &[Reference] {
        &self.receiver
    }

    pub fn to_builder(&self) -> SupplyDeliveryBuilder {
        SupplyDeliveryBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            based_on: self.based_on.clone(),
            part_of: self.part_of.clone(),
            status: self.status,
            patient: self.patient.clone(),
            r#type: self.r#type.clone(),
            supplied_item: self.supplied_item.clone(),
            occurrence: self.occurrence.clone(),
            supplier: self.supplier.clone(),
            destination: self.destination.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl Visitable for SupplyDelivery {
    fn type_name(&self) -> &'static str {
        "SupplyDelivery"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || !self.based_on.is_empty()
            || !self.part_of.is_empty()
            || self.status.is_some()
            || self.patient.is_some()
            || self.r#type.is_some()
            || !self.supplied_item.is_empty()
            || self.occurrence.is_some()
            || self.supplier.is_some()
            || self.destination.is_some()
            || !self.receiver.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_nodes(&self.based_on, "basedOn", visitor);
            visitor::accept_nodes(&self.part_of, "partOf", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_node(self.patient.as_ref(), "patient", visitor);
            visitor::accept_node(self.r#type.as_ref(), "type", visitor);
            visitor::accept_nodes(&self.supplied_item, "suppliedItem", visitor);
            visitor::accept_choice(self.occurrence.as_ref(), "occurrence", visitor);
            visitor::accept_node(self.supplier.as_ref(), "supplier", visitor);
            visitor::accept_node(self.destination.as_ref(), "destination", visitor);
            visitor::accept_nodes(&self.receiver, "receiver", visitor);
        });
    }
}

impl Validate for SupplyDelivery {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.check_references(&self.based_on, "basedOn", BASED_ON_TARGETS);
        ctx.check_references(&self.part_of, "partOf", PART_OF_TARGETS);
        ctx.check_reference(self.patient.as_ref(), "patient", PATIENT_TARGETS);
        ctx.check_binding_concept(self.r#type.as_ref(), "type", &TYPE_BINDING);
        ctx.check_choice(&self.occurrence, "occurrence", OCCURRENCE_CHOICE);
        ctx.check_reference(self.supplier.as_ref(), "supplier", SUPPLIER_TARGETS);
        ctx.check_reference(self.destination.as_ref(), "destination", DESTINATION_TARGETS);
        ctx.check_references(&self.receiver, "receiver", RECEIVER_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.based_on, "basedOn");
        ctx.validate_children(&self.part_of, "partOf");
        ctx.validate_child(self.patient.as_ref(), "patient");
        ctx.validate_child(self.r#type.as_ref(), "type");
        ctx.validate_children(&self.supplied_item, "suppliedItem");
        ctx.validate_choice_child(&self.occurrence, "occurrence");
        ctx.validate_child(self.supplier.as_ref(), "supplier");
        ctx.validate_child(self.destination.as_ref(), "destination");
        ctx.validate_children(&self.receiver, "receiver");
    }
}

/// Builder for [`SupplyDelivery`].
#[derive(Debug, Clone, Default)]
pub struct SupplyDeliveryBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    based_on: Vec<Reference>,
    part_of: Vec<Reference>,
    status: Option<SupplyDeliveryStatus>,
    patient: Option<Reference>,
    r#type: Option<CodeableConcept>,
    supplied_item: Vec<SupplyDeliverySuppliedItem>,
    occurrence: Option<ChoiceValue>,
    supplier: Option<Reference>,
    destination: Option<Reference>,
    receiver: Vec<Reference>,
}

resource_builder_accessors!(SupplyDeliveryBuilder);

impl SupplyDeliveryBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
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

    pub fn add_part_of(mut self, part_of: Reference) -> Self {
        self.part_of.push(part_of);
        self
    }

    pub fn with_part_of(mut self, part_of: Vec<Reference>) -> Self {
        self.part_of = part_of;
        self
    }

    pub fn with_status(mut self, status: SupplyDeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_patient(mut self, patient: Reference) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn with_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn add_supplied_item(mut self, supplied_item: SupplyDeliverySuppliedItem) -> Self {
        self.supplied_item.push(supplied_item);
        self
    }

    pub fn with_supplied_item(
        mut self,
        supplied_item: Vec<SupplyDeliverySuppliedItem>,
    ) -> Self {
        self.supplied_item = supplied_item;
        self
    }

    pub fn with_occurrence(mut self, occurrence: impl Into<ChoiceValue>) -> Self {
        self.occurrence = Some(occurrence.into());
        self
    }

    pub fn with_supplier(mut self, supplier: Reference) -> Self {
        self.supplier = Some(supplier);
        self
    }

    pub fn with_destination(mut self, destination: Reference) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn add_receiver(mut self, receiver: Reference) -> Self {
        self.receiver.push(receiver);
        self
    }

    pub fn with_receiver(mut self, receiver: Vec<Reference>) -> Self {
        self.receiver = receiver;
        self
    }

    fn assemble(self) -> SupplyDelivery {
        SupplyDelivery {
            resource: self.resource,
            identifier: self.identifier,
            based_on: self.based_on,
            part_of: self.part_of,
            status: self.status,
            patient: self.patient,
            r#type: self.r#type,
            supplied_item: self.supplied_item,
            occurrence: self.occurrence,
            supplier: self.supplier,
            destination: self.destination,
            receiver: self.receiver,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SupplyDelivery, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SupplyDelivery {
        self.assemble()
    }
}

/// What was delivered, as a code or a reference to the concrete item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyDeliverySuppliedItem {
    pub(crate) backbone: BackboneElement,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) item: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SupplyDeliverySuppliedItem);
memoized_value_hash!(SupplyDeliverySuppliedItem { backbone, quantity, item });

impl SupplyDeliverySuppliedItem {
    pub fn builder() -> SupplyDeliverySuppliedItemBuilder {
        SupplyDeliverySuppliedItemBuilder::default()
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn item(&self) -> Option<&ChoiceValue> {
        self.item.as_ref()
    }

    pub fn to_builder(&self) -> SupplyDeliverySuppliedItemBuilder {
        SupplyDeliverySuppliedItemBuilder {
            backbone: self.backbone.clone(),
            quantity: self.quantity.clone(),
            item: self.item.clone(),
        }
    }
}

impl Visitable for SupplyDeliverySuppliedItem {
    fn type_name(&self) -> &'static str {
        "SupplyDelivery.SuppliedItem"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.quantity.is_some() || self.item.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.quantity.as_ref(), "quantity", visitor);
            visitor::accept_choice(self.item.as_ref(), "item", visitor);
        });
    }
}

impl Validate for SupplyDeliverySuppliedItem {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.check_choice(&self.item, "item", ITEM_CHOICE);
        ctx.check_choice_reference(&self.item, "item", ITEM_TARGETS);
        ctx.validate_child(self.quantity.as_ref(), "quantity");
        ctx.validate_choice_child(&self.item, "item");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SupplyDeliverySuppliedItem`].
#[derive(Debug, Clone, Default)]
pub struct SupplyDeliverySuppliedItemBuilder {
    backbone: BackboneElement,
    quantity: Option<Quantity>,
    item: Option<ChoiceValue>,
}

backbone_builder_accessors!(SupplyDeliverySuppliedItemBuilder);

impl SupplyDeliverySuppliedItemBuilder {
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_item(mut self, item: impl Into<ChoiceValue>) -> Self {
        self.item = Some(item.into());
        self
    }

    fn assemble(self) -> SupplyDeliverySuppliedItem {
        SupplyDeliverySuppliedItem {
            backbone: self.backbone,
            quantity: self.quantity,
            item: self.item,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SupplyDeliverySuppliedItem, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SupplyDeliverySuppliedItem {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::types::Coding;
    use crate::validation::IssueKind;

    fn supply_type(code: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system("http://hl7.org/fhir/supplydelivery-supplyitemtype")
                    .with_code(code)
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn delivery_with_typed_item_builds() {
        let delivery = SupplyDelivery::builder()
            .with_status(SupplyDeliveryStatus::Completed)
            .with_type(supply_type("device"))
            .add_supplied_item(
                SupplyDeliverySuppliedItem::builder()
                    .with_quantity(Quantity::builder().with_value(dec!(2)).build_unvalidated())
                    .with_item(ChoiceValue::Reference(
                        Reference::builder()
                            .with_reference("Device/pump-7")
                            .build_unvalidated(),
                    ))
                    .build_unvalidated(),
            )
            .build()
            .unwrap();
        assert_eq!(delivery.supplied_item().len(), 1);
    }

    #[test]
    fn type_outside_the_value_set_is_rejected() {
        let err = SupplyDelivery::builder()
            .with_type(supply_type("equipment"))
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
        assert_eq!(err.issues()[0].path, "SupplyDelivery.type");
    }

    #[test]
    fn supplied_item_reference_kind_is_checked() {
        let delivery = SupplyDelivery::builder()
            .add_supplied_item(
                SupplyDeliverySuppliedItem::builder()
                    .with_item(ChoiceValue::Reference(
                        Reference::builder()
                            .with_reference("Patient/p1")
                            .build_unvalidated(),
                    ))
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = delivery.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(issues[0].path, "SupplyDelivery.suppliedItem[0].item");
    }

    #[test]
    fn occurrence_must_be_a_time_shape() {
        let err = SupplyDelivery::builder()
            .with_occurrence("yesterday")
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidChoiceType);
        assert_eq!(err.issues()[0].path, "SupplyDelivery.occurrence");
    }
}
