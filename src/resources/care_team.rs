//! The CareTeam resource: the people and organizations planning or
//! participating in a patient's care.

use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::CareTeamStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{
    Annotation, CodeableConcept, CodeableReference, ContactPoint, Identifier, Period, Reference,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const SUBJECT_TARGETS: &[&str] = &["Patient", "Group"];
const ORGANIZATION_TARGETS: &[&str] = &["Organization"];
const MEMBER_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "RelatedPerson",
    "Patient",
    "Organization",
    "CareTeam",
];
const COVERAGE_CHOICE: &[FhirType] = &[FhirType::Period, FhirType::Timing];

/// A group of practitioners, relatives and organizations involved in care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareTeam {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) status: Option<CareTeamStatus>,
    pub(crate) category: Vec<CodeableConcept>,
    pub(crate) name: Option<String>,
    pub(crate) subject: Option<Reference>,
    pub(crate) period: Option<Period>,
    pub(crate) participant: Vec<CareTeamParticipant>,
    pub(crate) reason: Vec<CodeableReference>,
    pub(crate) managing_organization: Vec<Reference>,
    pub(crate) telecom: Vec<ContactPoint>,
    pub(crate) note: Vec<Annotation>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(CareTeam);
memoized_value_hash!(CareTeam {
    resource,
    identifier,
    status,
    category,
    name,
    subject,
    period,
    participant,
    reason,
    managing_organization,
    telecom,
    note,
});

impl CareTeam {
    pub fn builder() -> CareTeamBuilder {
        CareTeamBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn status(&self) -> Option<CareTeamStatus> {
        self.status
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Who the team cares for.
    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn participant(&self) -> &[CareTeamParticipant] {
        &self.participant
    }

    pub fn reason(&self) -> &[CodeableReference] {
        &self.reason
    }

    pub fn managing_organization(&self) -> &[Reference] {
        &self.managing_organization
    }

    pub fn telecom(&self) -> &[ContactPoint] {
        &self.telecom
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    pub fn to_builder(&self) -> CareTeamBuilder {
        CareTeamBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            status: self.status,
            category: self.category.clone(),
            name: self.name.clone(),
            subject: self.subject.clone(),
            period: self.period.clone(),
            participant: self.participant.clone(),
            reason: self.reason.clone(),
            managing_organization: self.managing_organization.clone(),
            telecom: self.telecom.clone(),
            note: self.note.clone(),
        }
    }
}

impl Visitable for CareTeam {
    fn type_name(&self) -> &'static str {
        "CareTeam"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.status.is_some()
            || !self.category.is_empty()
            || self.name.is_some()
            || self.subject.is_some()
            || self.period.is_some()
            || !self.participant.is_empty()
            || !self.reason.is_empty()
            || !self.managing_organization.is_empty()
            || !self.telecom.is_empty()
            || !self.note.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.category, "category", visitor);
            visitor::accept_str(self.name(), "name", visitor);
            visitor::accept_node(self.subject.as_ref(), "subject", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_nodes(&self.participant, "participant", visitor);
            visitor::accept_nodes(&self.reason, "reason", visitor);
            visitor::accept_nodes(&self.managing_organization, "managingOrganization", visitor);
            visitor::accept_nodes(&self.telecom, "telecom", visitor);
            visitor::accept_nodes(&self.note, "note", visitor);
        });
    }
}

impl Validate for CareTeam {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.check_reference(self.subject.as_ref(), "subject", SUBJECT_TARGETS);
        ctx.check_references(
            &self.managing_organization,
            "managingOrganization",
            ORGANIZATION_TARGETS,
        );
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.category, "category");
        ctx.validate_child(self.subject.as_ref(), "subject");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.validate_children(&self.participant, "participant");
        ctx.validate_children(&self.reason, "reason");
        ctx.validate_children(&self.managing_organization, "managingOrganization");
        ctx.validate_children(&self.telecom, "telecom");
        ctx.validate_children(&self.note, "note");
    }
}

/// Builder for [`CareTeam`].
#[derive(Debug, Clone, Default)]
pub struct CareTeamBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    status: Option<CareTeamStatus>,
    category: Vec<CodeableConcept>,
    name: Option<String>,
    subject: Option<Reference>,
    period: Option<Period>,
    participant: Vec<CareTeamParticipant>,
    reason: Vec<CodeableReference>,
    managing_organization: Vec<Reference>,
    telecom: Vec<ContactPoint>,
    note: Vec<Annotation>,
}

resource_builder_accessors!(CareTeamBuilder);

impl CareTeamBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_status(mut self, status: CareTeamStatus) -> Self {
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

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn add_participant(mut self, participant: CareTeamParticipant) -> Self {
        self.participant.push(participant);
        self
    }

    pub fn with_participant(mut self, participant: Vec<CareTeamParticipant>) -> Self {
        self.participant = participant;
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

    pub fn add_managing_organization(mut self, managing_organization: Reference) -> Self {
        self.managing_organization.push(managing_organization);
        self
    }

    pub fn with_managing_organization(mut self, managing_organization: Vec<Reference>) -> Self {
        self.managing_organization = managing_organization;
        self
    }

    pub fn add_telecom(mut self, telecom: ContactPoint) -> Self {
        self.telecom.push(telecom);
        self
    }

    pub fn with_telecom(mut self, telecom: Vec<ContactPoint>) -> Self {
        self.telecom = telecom;
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

    fn assemble(self) -> CareTeam {
        CareTeam {
            resource: self.resource,
            identifier: self.identifier,
            status: self.status,
            category: self.category,
            name: self.name,
            subject: self.subject,
            period: self.period,
            participant: self.participant,
            reason: self.reason,
            managing_organization: self.managing_organization,
            telecom: self.telecom,
            note: self.note,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<CareTeam, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> CareTeam {
        self.assemble()
    }
}

/// One participant on the team and the window they are involved in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareTeamParticipant {
    pub(crate) backbone: BackboneElement,
    pub(crate) role: Option<CodeableConcept>,
    pub(crate) member: Option<Reference>,
    pub(crate) on_behalf_of: Option<Reference>,
    pub(crate) coverage: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(CareTeamParticipant);
memoized_value_hash!(CareTeamParticipant { backbone, role, member, on_behalf_of, coverage });

impl CareTeamParticipant {
    pub fn builder() -> CareTeamParticipantBuilder {
        CareTeamParticipantBuilder::default()
    }

    pub fn role(&self) -> Option<&CodeableConcept> {
        self.role.as_ref()
    }

    pub fn member(&self) -> Option<&Reference> {
        self.member.as_ref()
    }

    pub fn on_behalf_of(&self) -> Option<&Reference> {
        self.on_behalf_of.as_ref()
    }

    /// When the member participates, as a period or a recurring timing.
    pub fn coverage(&self) -> Option<&ChoiceValue> {
        self.coverage.as_ref()
    }

    pub fn to_builder(&self) -> CareTeamParticipantBuilder {
        CareTeamParticipantBuilder {
            backbone: self.backbone.clone(),
            role: self.role.clone(),
            member: self.member.clone(),
            on_behalf_of: self.on_behalf_of.clone(),
            coverage: self.coverage.clone(),
        }
    }
}

impl Visitable for CareTeamParticipant {
    fn type_name(&self) -> &'static str {
        "CareTeam.Participant"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.role.is_some()
            || self.member.is_some()
            || self.on_behalf_of.is_some()
            || self.coverage.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.role.as_ref(), "role", visitor);
            visitor::accept_node(self.member.as_ref(), "member", visitor);
            visitor::accept_node(self.on_behalf_of.as_ref(), "onBehalfOf", visitor);
            visitor::accept_choice(self.coverage.as_ref(), "coverage", visitor);
        });
    }
}

impl Validate for CareTeamParticipant {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.check_reference(self.member.as_ref(), "member", MEMBER_TARGETS);
        ctx.check_reference(self.on_behalf_of.as_ref(), "onBehalfOf", ORGANIZATION_TARGETS);
        ctx.check_choice(&self.coverage, "coverage", COVERAGE_CHOICE);
        ctx.validate_child(self.role.as_ref(), "role");
        ctx.validate_child(self.member.as_ref(), "member");
        ctx.validate_child(self.on_behalf_of.as_ref(), "onBehalfOf");
        ctx.validate_choice_child(&self.coverage, "coverage");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`CareTeamParticipant`].
#[derive(Debug, Clone, Default)]
pub struct CareTeamParticipantBuilder {
    backbone: BackboneElement,
    role: Option<CodeableConcept>,
    member: Option<Reference>,
    on_behalf_of: Option<Reference>,
    coverage: Option<ChoiceValue>,
}

backbone_builder_accessors!(CareTeamParticipantBuilder);

impl CareTeamParticipantBuilder {
    pub fn with_role(mut self, role: CodeableConcept) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_member(mut self, member: Reference) -> Self {
        self.member = Some(member);
        self
    }

    pub fn with_on_behalf_of(mut self, on_behalf_of: Reference) -> Self {
        self.on_behalf_of = Some(on_behalf_of);
        self
    }

    pub fn with_coverage(mut self, coverage: impl Into<ChoiceValue>) -> Self {
        self.coverage = Some(coverage.into());
        self
    }

    fn assemble(self) -> CareTeamParticipant {
        CareTeamParticipant {
            backbone: self.backbone,
            role: self.role,
            member: self.member,
            on_behalf_of: self.on_behalf_of,
            coverage: self.coverage,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<CareTeamParticipant, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> CareTeamParticipant {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    fn member(reference: &str) -> Reference {
        Reference::builder().with_reference(reference).build_unvalidated()
    }

    #[test]
    fn minimal_team_builds() {
        let team = CareTeam::builder()
            .with_status(CareTeamStatus::Active)
            .with_subject(member("Patient/example"))
            .build()
            .unwrap();
        assert_eq!(team.status(), Some(CareTeamStatus::Active));
    }

    #[test]
    fn empty_participant_is_an_empty_element() {
        let team = CareTeam::builder()
            .add_participant(CareTeamParticipant::builder().build_unvalidated())
            .build_unvalidated();
        let issues = team.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::EmptyElement);
        assert_eq!(issues[0].path, "CareTeam.participant[0]");
    }

    #[test]
    fn participant_member_kind_is_checked_with_indexed_path() {
        let team = CareTeam::builder()
            .add_participant(
                CareTeamParticipant::builder()
                    .with_member(member("Practitioner/f001"))
                    .build_unvalidated(),
            )
            .add_participant(
                CareTeamParticipant::builder()
                    .with_member(member("Medication/insulin"))
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = team.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(issues[0].path, "CareTeam.participant[1].member");
    }

    #[test]
    fn coverage_must_be_period_or_timing() {
        let err = CareTeamParticipant::builder()
            .with_coverage(ChoiceValue::Boolean(true))
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidChoiceType);
        assert_eq!(err.issues()[0].path, "CareTeam.Participant.coverage");
    }
}
