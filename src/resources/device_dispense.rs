//! The DeviceDispense resource: a device moving from stock to a patient
//! or caregiver.

use chrono::{DateTime, FixedOffset};

use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::DeviceDispenseStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{
    Annotation, CodeableConcept, CodeableReference, Identifier, Quantity, Reference,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const BASED_ON_TARGETS: &[&str] = &["CarePlan", "DeviceRequest"];
const PART_OF_TARGETS: &[&str] = &["Procedure"];
const SUBJECT_TARGETS: &[&str] = &["Patient", "Practitioner"];
const RECEIVER_TARGETS: &[&str] = &[
    "Patient",
    "Practitioner",
    "RelatedPerson",
    "Location",
    "PractitionerRole",
];
const ENCOUNTER_TARGETS: &[&str] = &["Encounter"];
const LOCATION_TARGETS: &[&str] = &["Location"];
const DESTINATION_TARGETS: &[&str] = &["Location"];
const EVENT_HISTORY_TARGETS: &[&str] = &["Provenance"];
const ACTOR_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Organization",
    "Patient",
    "Device",
    "RelatedPerson",
    "CareTeam",
];

/// A dispense event for a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDispense {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) based_on: Vec<Reference>,
    pub(crate) part_of: Vec<Reference>,
    pub(crate) status: Option<DeviceDispenseStatus>,
    pub(crate) status_reason: Option<CodeableReference>,
    pub(crate) category: Vec<CodeableConcept>,
    pub(crate) device: Option<CodeableReference>,
    pub(crate) subject: Option<Reference>,
    pub(crate) receiver: Option<Reference>,
    pub(crate) encounter: Option<Reference>,
    pub(crate) supporting_information: Vec<Reference>,
    pub(crate) performer: Vec<DeviceDispensePerformer>,
    pub(crate) location: Option<Reference>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) prepared_date: Option<DateTime<FixedOffset>>,
    pub(crate) when_handed_over: Option<DateTime<FixedOffset>>,
    pub(crate) destination: Option<Reference>,
    pub(crate) note: Vec<Annotation>,
    pub(crate) usage_instruction: Option<String>,
    pub(crate) event_history: Vec<Reference>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(DeviceDispense);
memoized_value_hash!(DeviceDispense {
    resource,
    identifier,
    based_on,
    part_of,
    status,
    status_reason,
    category,
    device,
    subject,
    receiver,
    encounter,
    supporting_information,
    performer,
    location,
    r#type,
    quantity,
    prepared_date,
    when_handed_over,
    destination,
    note,
    usage_instruction,
    event_history,
});

impl DeviceDispense {
    pub fn builder() -> DeviceDispenseBuilder {
        DeviceDispenseBuilder::default()
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

    /// State of the dispense. Required.
    pub fn status(&self) -> Option<DeviceDispenseStatus> {
        self.status
    }

    pub fn status_reason(&self) -> Option<&CodeableReference> {
        self.status_reason.as_ref()
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// What device is being dispensed. Required.
    pub fn device(&self) -> Option<&CodeableReference> {
        self.device.as_ref()
    }

    /// Who the dispense is for. Required.
    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn receiver(&self) -> Option<&Reference> {
        self.receiver.as_ref()
    }

    pub fn encounter(&self) -> Option<&Reference> {
        self.encounter.as_ref()
    }

    pub fn supporting_information(&self) -> &[Reference] {
        &self.supporting_information
    }

    pub fn performer(&self) -> &[DeviceDispensePerformer] {
        &self.performer
    }

    pub fn location(&self) -> Option<&Reference> {
        self.location.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn prepared_date(&self) -> Option<DateTime<FixedOffset>> {
        self.prepared_date
    }

    pub fn when_handed_over(&self) -> Option<DateTime<FixedOffset>> {
        self.when_handed_over
    }

    pub fn destination(&self) -> Option<&Reference> {
        self.destination.as_ref()
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    pub fn usage_instruction(&self) -> Option<&str> {
        self.usage_instruction.as_deref()
    }

    pub fn event_history(&self) -> &[Reference] {
        &self.event_history
    }

    pub fn to_builder(&self) -> DeviceDispenseBuilder {
        DeviceDispenseBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            based_on: self.based_on.clone(),
            part_of: self.part_of.clone(),
            status: self.status,
            status_reason: self.status_reason.clone(),
            category: self.category.clone(),
            device: self.device.clone(),
            subject: self.subject.clone(),
            receiver: self.receiver.clone(),
            encounter: self.encounter.clone(),
            supporting_information: self.supporting_information.clone(),
            performer: self.performer.clone(),
            location: self.location.clone(),
            r#type: self.r#type.clone(),
            quantity: self.quantity.clone(),
            prepared_date: self.prepared_date,
            when_handed_over: self.when_handed_over,
            destination: self.destination.clone(),
            note: self.note.clone(),
            usage_instruction: self.usage_instruction.clone(),
            event_history: self.event_history.clone(),
        }
    }
}

impl Visitable for DeviceDispense {
    fn type_name(&self) -> &'static str {
        "DeviceDispense"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || !self.based_on.is_empty()
            || !self.part_of.is_empty()
            || self.status.is_some()
            || self.status_reason.is_some()
            || !self.category.is_empty()
            || self.device.is_some()
            || self.subject.is_some()
            || self.receiver.is_some()
            || self.encounter.is_some()
            || !self.supporting_information.is_empty()
            || !self.performer.is_empty()
            || self.location.is_some()
            || self.r#type.is_some()
            || self.quantity.is_some()
            || self.prepared_date.is_some()
            || self.when_handed_over.is_some()
            || self.destination.is_some()
            || !self.note.is_empty()
            || self.usage_instruction.is_some()
            || !self.event_history.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_nodes(&self.based_on, "basedOn", visitor);
            visitor::accept_nodes(&self.part_of, "partOf", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_node(self.status_reason.as_ref(), "statusReason", visitor);
            visitor::accept_nodes(&self.category, "category", visitor);
            visitor::accept_node(self.device.as_ref(), "device", visitor);
            visitor::accept_node(self.subject.as_ref(), "subject", visitor);
            visitor::accept_node(self.receiver.as_ref(), "receiver", visitor);
            visitor::accept_node(self.encounter.as_ref(), "encounter", visitor);
            visitor::accept_nodes(
                &self.supporting_information,
                "supportingInformation",
                visitor,
            );
            visitor::accept_nodes(&self.performer, "performer", visitor);
            visitor::accept_node(self.location.as_ref(), "location", visitor);
            visitor::accept_node(self.r#type.as_ref(), "type", visitor);
            visitor::accept_node(self.quantity.as_ref(), "quantity", visitor);
            visitor::accept_date_time(self.prepared_date, "preparedDate", visitor);
            visitor::accept_date_time(self.when_handed_over, "whenHandedOver", visitor);
            visitor::accept_node(self.destination.as_ref(), "destination", visitor);
            visitor::accept_nodes(&self.note, "note", visitor);
            visitor::accept_str(self.usage_instruction.as_deref(), "usageInstruction", visitor);
            visitor::accept_nodes(&self.event_history, "eventHistory", visitor);
        });
    }
}

impl Validate for DeviceDispense {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.check_references(&self.based_on, "basedOn", BASED_ON_TARGETS);
        ctx.check_references(&self.part_of, "partOf", PART_OF_TARGETS);
        ctx.require(&self.status, "status");
        ctx.require(&self.device, "device");
        ctx.require(&self.subject, "subject");
        ctx.check_reference(self.subject.as_ref(), "subject", SUBJECT_TARGETS);
        ctx.check_reference(self.receiver.as_ref(), "receiver", RECEIVER_TARGETS);
        ctx.check_reference(self.encounter.as_ref(), "encounter", ENCOUNTER_TARGETS);
        ctx.check_reference(self.location.as_ref(), "location", LOCATION_TARGETS);
        ctx.check_reference(self.destination.as_ref(), "destination", DESTINATION_TARGETS);
        ctx.check_references(&self.event_history, "eventHistory", EVENT_HISTORY_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.based_on, "basedOn");
        ctx.validate_children(&self.part_of, "partOf");
        ctx.validate_child(self.status_reason.as_ref(), "statusReason");
        ctx.validate_children(&self.category, "category");
        ctx.validate_child(self.device.as_ref(), "device");
        ctx.validate_child(self.subject.as_ref(), "subject");
        ctx.validate_child(self.receiver.as_ref(), "receiver");
        ctx.validate_child(self.encounter.as_ref(), "encounter");
        ctx.validate_children(&self.supporting_information, "supportingInformation");
        ctx.validate_children(&self.performer, "performer");
        ctx.validate_child(self.location.as_ref(), "location");
        ctx.validate_child(self.r#type.as_ref(), "type");
        ctx.validate_child(self.quantity.as_ref(), "quantity");
        ctx.validate_child(self.destination.as_ref(), "destination");
        ctx.validate_children(&self.note, "note");
        ctx.validate_children(&self.event_history, "eventHistory");
    }
}

/// Builder for [`DeviceDispense`].
#[derive(Debug, Clone, Default)]
pub struct DeviceDispenseBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    based_on: Vec<Reference>,
    part_of: Vec<Reference>,
    status: Option<DeviceDispenseStatus>,
    status_reason: Option<CodeableReference>,
    category: Vec<CodeableConcept>,
    device: Option<CodeableReference>,
    subject: Option<Reference>,
    receiver: Option<Reference>,
    encounter: Option<Reference>,
    supporting_information: Vec<Reference>,
    performer: Vec<DeviceDispensePerformer>,
    location: Option<Reference>,
    r#type: Option<CodeableConcept>,
    quantity: Option<Quantity>,
    prepared_date: Option<DateTime<FixedOffset>>,
    when_handed_over: Option<DateTime<FixedOffset>>,
    destination: Option<Reference>,
    note: Vec<Annotation>,
    usage_instruction: Option<String>,
    event_history: Vec<Reference>,
}

resource_builder_accessors!(DeviceDispenseBuilder);

impl DeviceDispenseBuilder {
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

    pub fn with_status(mut self, status: DeviceDispenseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_status_reason(mut self, status_reason: CodeableReference) -> Self {
        self.status_reason = Some(status_reason);
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

    pub fn with_device(mut self, device: CodeableReference) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_receiver(mut self, receiver: Reference) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_encounter(mut self, encounter: Reference) -> Self {
        self.encounter = Some(encounter);
        self
    }

    pub fn add_supporting_information(mut self, supporting_information: Reference) -> Self {
        self.supporting_information.push(supporting_information);
        self
    }

    pub fn with_supporting_information(
        mut self,
        supporting_information: Vec<Reference>,
    ) -> Self {
        self.supporting_information = supporting_information;
        self
    }

    pub fn add_performer(mut self, performer: DeviceDispensePerformer) -> Self {
        self.performer.push(performer);
        self
    }

    pub fn with_performer(mut self, performer: Vec<DeviceDispensePerformer>) -> Self {
        self.performer = performer;
        self
    }

    pub fn with_location(mut self, location: Reference) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_prepared_date(mut self, prepared_date: DateTime<FixedOffset>) -> Self {
        self.prepared_date = Some(prepared_date);
        self
    }

    pub fn with_when_handed_over(mut self, when_handed_over: DateTime<FixedOffset>) -> Self {
        self.when_handed_over = Some(when_handed_over);
        self
    }

    pub fn with_destination(mut self, destination: Reference) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn add_note(mut self, note: Annotation) -> Self {
        self.note.push(note);
        self
    }

    pub fn with_note(mut self, note: Vec<Annotation>) -> Self {
        self.note = note;
        self
    }

    pub fn with_usage_instruction(mut self, usage_instruction: impl Into<String>) -> Self {
        self.usage_instruction = Some(usage_instruction.into());
        self
    }

    pub fn add_event_history(mut self, event_history: Reference) -> Self {
        self.event_history.push(event_history);
        self
    }

    pub fn with_event_history(mut self, event_history: Vec<Reference>) -> Self {
        self.event_history = event_history;
        self
    }

    fn assemble(self) -> DeviceDispense {
        DeviceDispense {
            resource: self.resource,
            identifier: self.identifier,
            based_on: self.based_on,
            part_of: self.part_of,
            status: self.status,
            status_reason: self.status_reason,
            category: self.category,
            device: self.device,
            subject: self.subject,
            receiver: self.receiver,
            encounter: self.encounter,
            supporting_information: self.supporting_information,
            performer: self.performer,
            location: self.location,
            r#type: self.r#type,
            quantity: self.quantity,
            prepared_date: self.prepared_date,
            when_handed_over: self.when_handed_over,
            destination: self.destination,
            note: self.note,
            usage_instruction: self.usage_instruction,
            event_history: self.event_history,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DeviceDispense, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DeviceDispense {
        self.assemble()
    }
}

/// Who performed an action in the dispense workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDispensePerformer {
    pub(crate) backbone: BackboneElement,
    pub(crate) function: Option<CodeableConcept>,
    pub(crate) actor: Option<Reference>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(DeviceDispensePerformer);
memoized_value_hash!(DeviceDispensePerformer { backbone, function, actor });

impl DeviceDispensePerformer {
    pub fn builder() -> DeviceDispensePerformerBuilder {
        DeviceDispensePerformerBuilder::default()
    }

    pub fn function(&self) -> Option<&CodeableConcept> {
        self.function.as_ref()
    }

    /// The performer. Required.
    pub fn actor(&self) -> Option<&Reference> {
        self.actor.as_ref()
    }

    pub fn to_builder(&self) -> DeviceDispensePerformerBuilder {
        DeviceDispensePerformerBuilder {
            backbone: self.backbone.clone(),
            function: self.function.clone(),
            actor: self.actor.clone(),
        }
    }
}

impl Visitable for DeviceDispensePerformer {
    fn type_name(&self) -> &'static str {
        "DeviceDispense.Performer"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.function.is_some() || self.actor.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.function.as_ref(), "function", visitor);
            visitor::accept_node(self.actor.as_ref(), "actor", visitor);
        });
    }
}

impl Validate for DeviceDispensePerformer {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.actor, "actor");
        ctx.check_reference(self.actor.as_ref(), "actor", ACTOR_TARGETS);
        ctx.validate_child(self.function.as_ref(), "function");
        ctx.validate_child(self.actor.as_ref(), "actor");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`DeviceDispensePerformer`].
#[derive(Debug, Clone, Default)]
pub struct DeviceDispensePerformerBuilder {
    backbone: BackboneElement,
    function: Option<CodeableConcept>,
    actor: Option<Reference>,
}

backbone_builder_accessors!(DeviceDispensePerformerBuilder);

impl DeviceDispensePerformerBuilder {
    pub fn with_function(mut self, function: CodeableConcept) -> Self {
        self.function = Some(function);
        self
    }

    pub fn with_actor(mut self, actor: Reference) -> Self {
        self.actor = Some(actor);
        self
    }

    fn assemble(self) -> DeviceDispensePerformer {
        DeviceDispensePerformer {
            backbone: self.backbone,
            function: self.function,
            actor: self.actor,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DeviceDispensePerformer, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DeviceDispensePerformer {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::validation::IssueKind;

    fn infusion_pump() -> CodeableReference {
        CodeableReference::builder()
            .with_reference(
                Reference::builder()
                    .with_reference("Device/pump-7")
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn minimal_dispense_builds() {
        let dispense = DeviceDispense::builder()
            .with_status(DeviceDispenseStatus::Completed)
            .with_device(infusion_pump())
            .with_subject(
                Reference::builder()
                    .with_reference("Patient/p1")
                    .build_unvalidated(),
            )
            .build()
            .unwrap();
        assert_eq!(dispense.status(), Some(DeviceDispenseStatus::Completed));
    }

    #[test]
    fn all_three_required_fields_are_reported_together() {
        let err = DeviceDispense::builder().build().unwrap_err();
        assert_eq!(err.error_count(), 3);
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "DeviceDispense.status",
                "DeviceDispense.device",
                "DeviceDispense.subject",
            ]
        );
    }

    #[test]
    fn performer_requires_an_actor() {
        let dispense = DeviceDispense::builder()
            .with_status(DeviceDispenseStatus::InProgress)
            .with_device(infusion_pump())
            .with_subject(
                Reference::builder()
                    .with_reference("Patient/p1")
                    .build_unvalidated(),
            )
            .add_performer(
                DeviceDispensePerformer::builder()
                    .with_function(
                        CodeableConcept::builder()
                            .with_text("checker")
                            .build_unvalidated(),
                    )
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = dispense.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
        assert_eq!(issues[0].path, "DeviceDispense.performer[0].actor");
    }
}
