//! The AppointmentResponse resource: a participant's reply to an
//! appointment request.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::ParticipationStatus;
use crate::types::element::{HashCell, memoized_value_hash};
use crate::types::{CodeableConcept, Identifier, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const APPOINTMENT_TARGETS: &[&str] = &["Appointment"];
const ACTOR_TARGETS: &[&str] = &[
    "Patient",
    "Group",
    "Practitioner",
    "PractitionerRole",
    "RelatedPerson",
    "Device",
    "HealthcareService",
    "Location",
];

/// Acceptance, rejection or a proposed new time for an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentResponse {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) appointment: Option<Reference>,
    pub(crate) proposed_new_time: Option<bool>,
    pub(crate) start: Option<DateTime<Utc>>,
    pub(crate) end: Option<DateTime<Utc>>,
    pub(crate) participant_type: Vec<CodeableConcept>,
    pub(crate) actor: Option<Reference>,
    pub(crate) participant_status: Option<ParticipationStatus>,
    pub(crate) comment: Option<String>,
    pub(crate) recurring: Option<bool>,
    pub(crate) occurrence_date: Option<NaiveDate>,
    pub(crate) recurrence_id: Option<u32>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(AppointmentResponse);
memoized_value_hash!(AppointmentResponse {
    resource,
    identifier,
    appointment,
    proposed_new_time,
    start,
    end,
    participant_type,
    actor,
    participant_status,
    comment,
    recurring,
    occurrence_date,
    recurrence_id,
});

impl AppointmentResponse {
    pub fn builder() -> AppointmentResponseBuilder {
        AppointmentResponseBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// The appointment being answered. Required.
    pub fn appointment(&self) -> Option<&Reference> {
        self.appointment.as_ref()
    }

    pub fn proposed_new_time(&self) -> Option<bool> {
        self.proposed_new_time
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn participant_type(&self) -> &[CodeableConcept] {
        &self.participant_type
    }

    pub fn actor(&self) -> Option<&Reference> {
        self.actor.as_ref()
    }

    /// The participant's answer. Required.
    pub fn participant_status(&self) -> Option<ParticipationStatus> {
        self.participant_status
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn recurring(&self) -> Option<bool> {
        self.recurring
    }

    pub fn occurrence_date(&self) -> Option<NaiveDate> {
        self.occurrence_date
    }

    pub fn recurrence_id(&self) -> Option<u32> {
        self.recurrence_id
    }

    pub fn to_builder(&self) -> AppointmentResponseBuilder {
        AppointmentResponseBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            appointment: self.appointment.clone(),
            proposed_new_time: self.proposed_new_time,
            start: self.start,
            end: self.end,
            participant_type: self.participant_type.clone(),
            actor: self.actor.clone(),
            participant_status: self.participant_status,
            comment: self.comment.clone(),
            recurring: self.recurring,
            occurrence_date: self.occurrence_date,
            recurrence_id: self.recurrence_id,
        }
    }
}

impl Visitable for AppointmentResponse {
    fn type_name(&self) -> &'static str {
        "AppointmentResponse"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.appointment.is_some()
            || self.proposed_new_time.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || !self.participant_type.is_empty()
            || self.actor.is_some()
            || self.participant_status.is_some()
            || self.comment.is_some()
            || self.recurring.is_some()
            || self.occurrence_date.is_some()
            || self.recurrence_id.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_node(self.appointment.as_ref(), "appointment", visitor);
            visitor::accept_bool(self.proposed_new_time, "proposedNewTime", visitor);
            visitor::accept_instant(self.start, "start", visitor);
            visitor::accept_instant(self.end, "end", visitor);
            visitor::accept_nodes(&self.participant_type, "participantType", visitor);
            visitor::accept_node(self.actor.as_ref(), "actor", visitor);
            visitor::accept_code(self.participant_status.as_ref(), "participantStatus", visitor);
            visitor::accept_str(self.comment.as_deref(), "comment", visitor);
            visitor::accept_bool(self.recurring, "recurring", visitor);
            visitor::accept_date(self.occurrence_date, "occurrenceDate", visitor);
            visitor::accept_int(self.recurrence_id.map(i64::from), "recurrenceId", visitor);
        });
    }
}

impl Validate for AppointmentResponse {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.appointment, "appointment");
        ctx.check_reference(self.appointment.as_ref(), "appointment", APPOINTMENT_TARGETS);
        ctx.check_reference(self.actor.as_ref(), "actor", ACTOR_TARGETS);
        ctx.require(&self.participant_status, "participantStatus");
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.appointment.as_ref(), "appointment");
        ctx.validate_children(&self.participant_type, "participantType");
        ctx.validate_child(self.actor.as_ref(), "actor");
    }
}

/// Builder for [`AppointmentResponse`].
#[derive(Debug, Clone, Default)]
pub struct AppointmentResponseBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    appointment: Option<Reference>,
    proposed_new_time: Option<bool>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    participant_type: Vec<CodeableConcept>,
    actor: Option<Reference>,
    participant_status: Option<ParticipationStatus>,
    comment: Option<String>,
    recurring: Option<bool>,
    occurrence_date: Option<NaiveDate>,
    recurrence_id: Option<u32>,
}

resource_builder_accessors!(AppointmentResponseBuilder);

impl AppointmentResponseBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_appointment(mut self, appointment: Reference) -> Self {
        self.appointment = Some(appointment);
        self
    }

    pub fn with_proposed_new_time(mut self, proposed_new_time: bool) -> Self {
        self.proposed_new_time = Some(proposed_new_time);
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn add_participant_type(mut self, participant_type: CodeableConcept) -> Self {
        self.participant_type.push(participant_type);
        self
    }

    pub fn with_participant_type(mut self, participant_type: Vec<CodeableConcept>) -> Self {
        self.participant_type = participant_type;
        self
    }

    pub fn with_actor(mut self, actor: Reference) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_participant_status(mut self, participant_status: ParticipationStatus) -> Self {
        self.participant_status = Some(participant_status);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn with_occurrence_date(mut self, occurrence_date: NaiveDate) -> Self {
        self.occurrence_date = Some(occurrence_date);
        self
    }

    pub fn with_recurrence_id(mut self, recurrence_id: u32) -> Self {
        self.recurrence_id = Some(recurrence_id);
        self
    }

    fn assemble(self) -> AppointmentResponse {
        AppointmentResponse {
            resource: self.resource,
            identifier: self.identifier,
            appointment: self.appointment,
            proposed_new_time: self.proposed_new_time,
            start: self.start,
            end: self.end,
            participant_type: self.participant_type,
            actor: self.actor,
            participant_status: self.participant_status,
            comment: self.comment,
            recurring: self.recurring,
            occurrence_date: self.occurrence_date,
            recurrence_id: self.recurrence_id,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<AppointmentResponse, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> AppointmentResponse {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::validation::IssueKind;

    #[test]
    fn acceptance_builds() {
        let response = AppointmentResponse::builder()
            .with_appointment(
                Reference::builder()
                    .with_reference("Appointment/a1")
                    .build_unvalidated(),
            )
            .with_participant_status(ParticipationStatus::Accepted)
            .build()
            .unwrap();
        assert_eq!(
            response.participant_status(),
            Some(ParticipationStatus::Accepted)
        );
    }

    #[test]
    fn appointment_and_status_are_required() {
        let err = AppointmentResponse::builder().build().unwrap_err();
        assert_eq!(err.error_count(), 2);
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "AppointmentResponse.appointment",
                "AppointmentResponse.participantStatus",
            ]
        );
    }

    #[test]
    fn actor_kind_is_checked() {
        let err = AppointmentResponse::builder()
            .with_appointment(
                Reference::builder()
                    .with_reference("Appointment/a1")
                    .build_unvalidated(),
            )
            .with_participant_status(ParticipationStatus::Declined)
            .with_actor(
                Reference::builder()
                    .with_reference("Substance/s1")
                    .build_unvalidated(),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(err.issues()[0].path, "AppointmentResponse.actor");
    }
}
