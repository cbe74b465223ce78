//! The DeviceAssociation resource: a record of a device being attached to,
//! implanted in or otherwise associated with a subject.

use crate::binding::CodeBinding;
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, Identifier, Period, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const DEVICE_TARGETS: &[&str] = &["Device"];
const SUBJECT_TARGETS: &[&str] =
    &["Patient", "Group", "Practitioner", "RelatedPerson", "Device"];
const BODY_STRUCTURE_TARGETS: &[&str] = &["BodyStructure"];
const OPERATOR_TARGETS: &[&str] = &["Patient", "Practitioner", "RelatedPerson"];

/// Association state; the concept must carry one of these codes.
const STATUS_BINDING: CodeBinding = CodeBinding::required(
    "DeviceAssociationStatus",
    "http://hl7.org/fhir/ValueSet/deviceassociation-status|5.0.0",
    "http://hl7.org/fhir/deviceassociation-status",
    &["implanted", "explanted", "entered-in-error", "attached", "unknown"],
);

const STATUS_REASON_BINDING: CodeBinding = CodeBinding::required(
    "DeviceAssociationStatusReason",
    "http://hl7.org/fhir/ValueSet/deviceassociation-status-reason|5.0.0",
    "http://hl7.org/fhir/deviceassociation-status-reason",
    &["attached", "disconnected", "failed", "placed", "replaced"],
);

/// Operation status is an example binding; any concept passes.
const OPERATION_STATUS_BINDING: CodeBinding = CodeBinding::example(
    "DeviceAssociationOperationStatus",
    "http://hl7.org/fhir/ValueSet/deviceassociation-operationstatus",
    "http://hl7.org/fhir/deviceassociation-operationstatus",
);

/// A device in relation to a patient or other subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAssociation {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) device: Option<Reference>,
    pub(crate) category: Vec<CodeableConcept>,
    pub(crate) status: Option<CodeableConcept>,
    pub(crate) status_reason: Vec<CodeableConcept>,
    pub(crate) subject: Option<Reference>,
    pub(crate) body_structure: Option<Reference>,
    pub(crate) period: Option<Period>,
    pub(crate) operation: Vec<DeviceAssociationOperation>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(DeviceAssociation);
memoized_value_hash!(DeviceAssociation {
    resource,
    identifier,
    device,
    category,
    status,
    status_reason,
    subject,
    body_structure,
    period,
    operation,
});

impl DeviceAssociation {
    pub fn builder() -> DeviceAssociationBuilder {
        DeviceAssociationBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// The device that is associated. Required.
    pub fn device(&self) -> Option<&Reference> {
        self.device.as_ref()
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// Association state. Required, and bound to the association status
    /// value set.
    pub fn status(&self) -> Option<&CodeableConcept> {
        self.status.as_ref()
    }

    pub fn status_reason(&self) -> &[CodeableConcept] {
        &self.status_reason
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn body_structure(&self) -> Option<&Reference> {
        self.body_structure.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn operation(&self) -> &[DeviceAssociationOperation] {
        &self.operation
    }

    pub fn to_builder(&self) -> DeviceAssociationBuilder {
        DeviceAssociationBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            device: self.device.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
            status_reason: self.status_reason.clone(),
            subject: self.subject.clone(),
            body_structure: self.body_structure.clone(),
            period: self.period.clone(),
            operation: self.operation.clone(),
        }
    }
}

impl Visitable for DeviceAssociation {
    fn type_name(&self) -> &'static str {
        "DeviceAssociation"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.device.is_some()
            || !self.category.is_empty()
            || self.status.is_some()
            || !self.status_reason.is_empty()
            || self.subject.is_some()
            || self.body_structure.is_some()
            || self.period.is_some()
            || !self.operation.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_node(self.device.as_ref(), "device", visitor);
            visitor::accept_nodes(&self.category, "category", visitor);
            visitor::accept_node(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.status_reason, "statusReason", visitor);
            visitor::accept_node(self.subject.as_ref(), "subject", visitor);
            visitor::accept_node(self.body_structure.as_ref(), "bodyStructure", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_nodes(&self.operation, "operation", visitor);
        });
    }
}

impl Validate for DeviceAssociation {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.device, "device");
        ctx.require(&self.status, "status");
        ctx.check_reference(self.device.as_ref(), "device", DEVICE_TARGETS);
        ctx.check_binding_concept(self.status.as_ref(), "status", &STATUS_BINDING);
        ctx.check_binding_concepts(&self.status_reason, "statusReason", &STATUS_REASON_BINDING);
        ctx.check_reference(self.subject.as_ref(), "subject", SUBJECT_TARGETS);
        ctx.check_reference(
            self.body_structure.as_ref(),
            "bodyStructure",
            BODY_STRUCTURE_TARGETS,
        );
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.device.as_ref(), "device");
        ctx.validate_children(&self.category, "category");
        ctx.validate_child(self.status.as_ref(), "status");
        ctx.validate_children(&self.status_reason, "statusReason");
        ctx.validate_child(self.subject.as_ref(), "subject");
        ctx.validate_child(self.body_structure.as_ref(), "bodyStructure");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.validate_children(&self.operation, "operation");
    }
}

/// Builder for [`DeviceAssociation`].
#[derive(Debug, Clone, Default)]
pub struct DeviceAssociationBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    device: Option<Reference>,
    category: Vec<CodeableConcept>,
    status: Option<CodeableConcept>,
    status_reason: Vec<CodeableConcept>,
    subject: Option<Reference>,
    body_structure: Option<Reference>,
    period: Option<Period>,
    operation: Vec<DeviceAssociationOperation>,
}

resource_builder_accessors!(DeviceAssociationBuilder);

impl DeviceAssociationBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_device(mut self, device: Reference) -> Self {
        self.device = Some(device);
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

    pub fn with_status(mut self, status: CodeableConcept) -> Self {
        self.status = Some(status);
        self
    }

    pub fn add_status_reason(mut self, status_reason: CodeableConcept) -> Self {
        self.status_reason.push(status_reason);
        self
    }

    pub fn with_status_reason(mut self, status_reason: Vec<CodeableConcept>) -> Self {
        self.status_reason = status_reason;
        self
    }

    pub fn with_subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_body_structure(mut self, body_structure: Reference) -> Self {
        self.body_structure = Some(body_structure);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn add_operation(mut self, operation: DeviceAssociationOperation) -> Self {
        self.operation.push(operation);
        self
    }

    pub fn with_operation(mut self, operation: Vec<DeviceAssociationOperation>) -> Self {
        self.operation = operation;
        self
    }

    fn assemble(self) -> DeviceAssociation {
        DeviceAssociation {
            resource: self.resource,
            identifier: self.identifier,
            device: self.device,
            category: self.category,
            status: self.status,
            status_reason: self.status_reason,
            subject: self.subject,
            body_structure: self.body_structure,
            period: self.period,
            operation: self.operation,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DeviceAssociation, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DeviceAssociation {
        self.assemble()
    }
}

/// Details about an operation performed while the device was associated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAssociationOperation {
    pub(crate) backbone: BackboneElement,
    pub(crate) status: Option<CodeableConcept>,
    pub(crate) operator: Vec<Reference>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(DeviceAssociationOperation);
memoized_value_hash!(DeviceAssociationOperation { backbone, status, operator, period });

impl DeviceAssociationOperation {
    pub fn builder() -> DeviceAssociationOperationBuilder {
        DeviceAssociationOperationBuilder::default()
    }

    /// Operation state. Required; its binding is example-strength, so any
    /// concept passes.
    pub fn status(&self) -> Option<&CodeableConcept> {
        self.status.as_ref()
    }

    pub fn operator(&self) -> &[Reference] {
        &self.operator
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> DeviceAssociationOperationBuilder {
        DeviceAssociationOperationBuilder {
            backbone: self.backbone.clone(),
            status: self.status.clone(),
            operator: self.operator.clone(),
            period: self.period.clone(),
        }
    }
}

impl Visitable for DeviceAssociationOperation {
    fn type_name(&self) -> &'static str {
        "DeviceAssociation.Operation"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.status.is_some()
            || !self.operator.is_empty()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.operator, "operator", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for DeviceAssociationOperation {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.status, "status");
        ctx.check_binding_concept(self.status.as_ref(), "status", &OPERATION_STATUS_BINDING);
        ctx.check_references(&self.operator, "operator", OPERATOR_TARGETS);
        ctx.validate_child(self.status.as_ref(), "status");
        ctx.validate_children(&self.operator, "operator");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`DeviceAssociationOperation`].
#[derive(Debug, Clone, Default)]
pub struct DeviceAssociationOperationBuilder {
    backbone: BackboneElement,
    status: Option<CodeableConcept>,
    operator: Vec<Reference>,
    period: Option<Period>,
}

backbone_builder_accessors!(DeviceAssociationOperationBuilder);

impl DeviceAssociationOperationBuilder {
    pub fn with_status(mut self, status: CodeableConcept) -> Self {
        self.status = Some(status);
        self
    }

    pub fn add_operator(mut self, operator: Reference) -> Self {
        self.operator.push(operator);
        self
    }

    pub fn with_operator(mut self, operator: Vec<Reference>) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> DeviceAssociationOperation {
        DeviceAssociationOperation {
            backbone: self.backbone,
            status: self.status,
            operator: self.operator,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DeviceAssociationOperation, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DeviceAssociationOperation {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coding;
    use crate::validation::IssueKind;

    fn status_concept(code: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system("http://hl7.org/fhir/deviceassociation-status")
                    .with_code(code)
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn minimal_association_builds() {
        let association = DeviceAssociation::builder()
            .with_device(
                Reference::builder()
                    .with_reference("Device/pacemaker")
                    .build_unvalidated(),
            )
            .with_status(status_concept("implanted"))
            .build()
            .unwrap();
        assert_eq!(association.status().unwrap().coding()[0].code(), Some("implanted"));
    }

    #[test]
    fn missing_device_and_status_are_both_reported() {
        let err = DeviceAssociation::builder().build().unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["DeviceAssociation.device", "DeviceAssociation.status"]);
    }

    #[test]
    fn status_outside_the_value_set_is_rejected() {
        let err = DeviceAssociation::builder()
            .with_device(
                Reference::builder()
                    .with_reference("Device/pacemaker")
                    .build_unvalidated(),
            )
            .with_status(status_concept("misplaced"))
            .build()
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
        assert_eq!(err.issues()[0].path, "DeviceAssociation.status");
    }

    #[test]
    fn operation_status_binding_is_example_strength() {
        let operation = DeviceAssociationOperation::builder()
            .with_status(
                CodeableConcept::builder()
                    .with_text("in recovery")
                    .build_unvalidated(),
            )
            .build()
            .unwrap();
        assert!(operation.status().is_some());
    }
}
