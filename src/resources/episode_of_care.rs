//! The EpisodeOfCare resource: an association between a patient and an
//! organization over a period of time, spanning many encounters.

use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::EpisodeOfCareStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, CodeableReference, Identifier, Period, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const PATIENT_TARGETS: &[&str] = &["Patient"];
const MANAGING_ORGANIZATION_TARGETS: &[&str] = &["Organization"];
const REFERRAL_REQUEST_TARGETS: &[&str] = &["ServiceRequest"];
const CARE_MANAGER_TARGETS: &[&str] = &["Practitioner", "PractitionerRole"];
const CARE_TEAM_TARGETS: &[&str] = &["CareTeam"];
const ACCOUNT_TARGETS: &[&str] = &["Account"];

/// A care association between a patient and a managing organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOfCare {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) status: Option<EpisodeOfCareStatus>,
    pub(crate) status_history: Vec<EpisodeOfCareStatusHistory>,
    pub(crate) r#type: Vec<CodeableConcept>,
    pub(crate) reason: Vec<EpisodeOfCareReason>,
    pub(crate) diagnosis: Vec<EpisodeOfCareDiagnosis>,
    pub(crate) patient: Option<Reference>,
    pub(crate) managing_organization: Option<Reference>,
    pub(crate) period: Option<Period>,
    pub(crate) referral_request: Vec<Reference>,
    pub(crate) care_manager: Option<Reference>,
    pub(crate) care_team: Vec<Reference>,
    pub(crate) account: Vec<Reference>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(EpisodeOfCare);
memoized_value_hash!(EpisodeOfCare {
    resource,
    identifier,
    status,
    status_history,
    r#type,
    reason,
    diagnosis,
    patient,
    managing_organization,
    period,
    referral_request,
    care_manager,
    care_team,
    account,
});

impl EpisodeOfCare {
    pub fn builder() -> EpisodeOfCareBuilder {
        EpisodeOfCareBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Where the episode is in its lifecycle. Required.
    pub fn status(&self) -> Option<EpisodeOfCareStatus> {
        self.status
    }

    pub fn status_history(&self) -> &[EpisodeOfCareStatusHistory] {
        &self.status_history
    }

    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    pub fn reason(&self) -> &[EpisodeOfCareReason] {
        &self.reason
    }

    pub fn diagnosis(&self) -> &[EpisodeOfCareDiagnosis] {
        &self.diagnosis
    }

    /// The patient the episode concerns. Required.
    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn referral_request(&self) -> &[Reference] {
        &self.referral_request
    }

    pub fn care_manager(&self) -> Option<&Reference> {
        self.care_manager.as_ref()
    }

    pub fn care_team(&self) -> &[Reference] {
        &self.care_team
    }

    pub fn account(&self) -> &[Reference] {
        &self.account
    }

    pub fn to_builder(&self) -> EpisodeOfCareBuilder {
        EpisodeOfCareBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            status: self.status,
            status_history: self.status_history.clone(),
            r#type: self.r#type.clone(),
            reason: self.reason.clone(),
            diagnosis: self.diagnosis.clone(),
            patient: self.patient.clone(),
            managing_organization: self.managing_organization.clone(),
            period: self.period.clone(),
            referral_request: self.referral_request.clone(),
            care_manager: self.care_manager.clone(),
            care_team: self.care_team.clone(),
            account: self.account.clone(),
        }
    }
}

impl Visitable for EpisodeOfCare {
    fn type_name(&self) -> &'static str {
        "EpisodeOfCare"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.status.is_some()
            || !self.status_history.is_empty()
            || !self.r#type.is_empty()
            || !self.reason.is_empty()
            || !self.diagnosis.is_empty()
            || self.patient.is_some()
            || self.managing_organization.is_some()
            || self.period.is_some()
            || !self.referral_request.is_empty()
            || self.care_manager.is_some()
            || !self.care_team.is_empty()
            || !self.account.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.status_history, "statusHistory", visitor);
            visitor::accept_nodes(&self.r#type, "type", visitor);
            visitor::accept_nodes(&self.reason, "reason", visitor);
            visitor::accept_nodes(&self.diagnosis, "diagnosis", visitor);
            visitor::accept_node(self.patient.as_ref(), "patient", visitor);
            visitor::accept_node(
                self.managing_organization.as_ref(),
                "managingOrganization",
                visitor,
            );
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_nodes(&self.referral_request, "referralRequest", visitor);
            visitor::accept_node(self.care_manager.as_ref(), "careManager", visitor);
            visitor::accept_nodes(&self.care_team, "careTeam", visitor);
            visitor::accept_nodes(&self.account, "account", visitor);
        });
    }
}

impl Validate for EpisodeOfCare {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.status, "status");
        ctx.require(&self.patient, "patient");
        ctx.check_reference(self.patient.as_ref(), "patient", PATIENT_TARGETS);
        ctx.check_reference(
            self.managing_organization.as_ref(),
            "managingOrganization",
            MANAGING_ORGANIZATION_TARGETS,
        );
        ctx.check_references(
            &self.referral_request,
            "referralRequest",
            REFERRAL_REQUEST_TARGETS,
        );
        ctx.check_reference(self.care_manager.as_ref(), "careManager", CARE_MANAGER_TARGETS);
        ctx.check_references(&self.care_team, "careTeam", CARE_TEAM_TARGETS);
        ctx.check_references(&self.account, "account", ACCOUNT_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.status_history, "statusHistory");
        ctx.validate_children(&self.r#type, "type");
        ctx.validate_children(&self.reason, "reason");
        ctx.validate_children(&self.diagnosis, "diagnosis");
        ctx.validate_child(self.patient.as_ref(), "patient");
        ctx.validate_child(self.managing_organization.as_ref(), "managingOrganization");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.validate_children(&self.referral_request, "referralRequest");
        ctx.validate_child(self.care_manager.as_ref(), "careManager");
        ctx.validate_children(&self.care_team, "careTeam");
        ctx.validate_children(&self.account, "account");
    }
}

/// Builder for [`EpisodeOfCare`].
#[derive(Debug, Clone, Default)]
pub struct EpisodeOfCareBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    status: Option<EpisodeOfCareStatus>,
    status_history: Vec<EpisodeOfCareStatusHistory>,
    r#type: Vec<CodeableConcept>,
    reason: Vec<EpisodeOfCareReason>,
    diagnosis: Vec<EpisodeOfCareDiagnosis>,
    patient: Option<Reference>,
    managing_organization: Option<Reference>,
    period: Option<Period>,
    referral_request: Vec<Reference>,
    care_manager: Option<Reference>,
    care_team: Vec<Reference>,
    account: Vec<Reference>,
}

resource_builder_accessors!(EpisodeOfCareBuilder);

impl EpisodeOfCareBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_status(mut self, status: EpisodeOfCareStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn add_status_history(mut self, status_history: EpisodeOfCareStatusHistory) -> Self {
        self.status_history.push(status_history);
        self
    }

    pub fn with_status_history(
        mut self,
        status_history: Vec<EpisodeOfCareStatusHistory>,
    ) -> Self {
        self.status_history = status_history;
        self
    }

    pub fn add_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type.push(r#type);
        self
    }

    pub fn with_type(mut self, r#type: Vec<CodeableConcept>) -> Self {
        self.r#type = r#type;
        self
    }

    pub fn add_reason(mut self, reason: EpisodeOfCareReason) -> Self {
        self.reason.push(reason);
        self
    }

    pub fn with_reason(mut self, reason: Vec<EpisodeOfCareReason>) -> Self {
        self.reason = reason;
        self
    }

    pub fn add_diagnosis(mut self, diagnosis: EpisodeOfCareDiagnosis) -> Self {
        self.diagnosis.push(diagnosis);
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: Vec<EpisodeOfCareDiagnosis>) -> Self {
        self.diagnosis = diagnosis;
        self
    }

    pub fn with_patient(mut self, patient: Reference) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn with_managing_organization(mut self, managing_organization: Reference) -> Self {
        self.managing_organization = Some(managing_organization);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn add_referral_request(mut self, referral_request: Reference) -> Self {
        self.referral_request.push(referral_request);
        self
    }

    pub fn with_referral_request(mut self, referral_request: Vec<Reference>) -> Self {
        self.referral_request = referral_request;
        self
    }

    pub fn with_care_manager(mut self, care_manager: Reference) -> Self {
        self.care_manager = Some(care_manager);
        self
    }

    pub fn add_care_team(mut self, care_team: Reference) -> Self {
        self.care_team.push(care_team);
        self
    }

    pub fn with_care_team(mut self, care_team: Vec<Reference>) -> Self {
        self.care_team = care_team;
        self
    }

    pub fn add_account(mut self, account: Reference) -> Self {
        self.account.push(account);
        self
    }

    pub fn with_account(mut self, account: Vec<Reference>) -> Self {
        self.account = account;
        self
    }

    fn assemble(self) -> EpisodeOfCare {
        EpisodeOfCare {
            resource: self.resource,
            identifier: self.identifier,
            status: self.status,
            status_history: self.status_history,
            r#type: self.r#type,
            reason: self.reason,
            diagnosis: self.diagnosis,
            patient: self.patient,
            managing_organization: self.managing_organization,
            period: self.period,
            referral_request: self.referral_request,
            care_manager: self.care_manager,
            care_team: self.care_team,
            account: self.account,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<EpisodeOfCare, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> EpisodeOfCare {
        self.assemble()
    }
}

/// A past status of the episode, with the span it covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOfCareStatusHistory {
    pub(crate) backbone: BackboneElement,
    pub(crate) status: Option<EpisodeOfCareStatus>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(EpisodeOfCareStatusHistory);
memoized_value_hash!(EpisodeOfCareStatusHistory { backbone, status, period });

impl EpisodeOfCareStatusHistory {
    pub fn builder() -> EpisodeOfCareStatusHistoryBuilder {
        EpisodeOfCareStatusHistoryBuilder::default()
    }

    /// The past status. Required.
    pub fn status(&self) -> Option<EpisodeOfCareStatus> {
        self.status
    }

    /// When the status applied. Required.
    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> EpisodeOfCareStatusHistoryBuilder {
        EpisodeOfCareStatusHistoryBuilder {
            backbone: self.backbone.clone(),
            status: self.status,
            period: self.period.clone(),
        }
    }
}

impl Visitable for EpisodeOfCareStatusHistory {
    fn type_name(&self) -> &'static str {
        "EpisodeOfCare.StatusHistory"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.status.is_some() || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for EpisodeOfCareStatusHistory {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.status, "status");
        ctx.require(&self.period, "period");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`EpisodeOfCareStatusHistory`].
#[derive(Debug, Clone, Default)]
pub struct EpisodeOfCareStatusHistoryBuilder {
    backbone: BackboneElement,
    status: Option<EpisodeOfCareStatus>,
    period: Option<Period>,
}

backbone_builder_accessors!(EpisodeOfCareStatusHistoryBuilder);

impl EpisodeOfCareStatusHistoryBuilder {
    pub fn with_status(mut self, status: EpisodeOfCareStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> EpisodeOfCareStatusHistory {
        EpisodeOfCareStatusHistory {
            backbone: self.backbone,
            status: self.status,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<EpisodeOfCareStatusHistory, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> EpisodeOfCareStatusHistory {
        self.assemble()
    }
}

/// Why the episode exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOfCareReason {
    pub(crate) backbone: BackboneElement,
    pub(crate) r#use: Option<CodeableConcept>,
    pub(crate) value: Vec<CodeableReference>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(EpisodeOfCareReason);
memoized_value_hash!(EpisodeOfCareReason { backbone, r#use, value });

impl EpisodeOfCareReason {
    pub fn builder() -> EpisodeOfCareReasonBuilder {
        EpisodeOfCareReasonBuilder::default()
    }

    pub fn r#use(&self) -> Option<&CodeableConcept> {
        self.r#use.as_ref()
    }

    pub fn value(&self) -> &[CodeableReference] {
        &self.value
    }

    pub fn to_builder(&self) -> EpisodeOfCareReasonBuilder {
        EpisodeOfCareReasonBuilder {
            backbone: self.backbone.clone(),
            r#use: self.r#use.clone(),
            value: self.value.clone(),
        }
    }
}

impl Visitable for EpisodeOfCareReason {
    fn type_name(&self) -> &'static str {
        "EpisodeOfCare.Reason"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.r#use.is_some() || !self.value.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.r#use.as_ref(), "use", visitor);
            visitor::accept_nodes(&self.value, "value", visitor);
        });
    }
}

impl Validate for EpisodeOfCareReason {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.validate_child(self.r#use.as_ref(), "use");
        ctx.validate_children(&self.value, "value");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`EpisodeOfCareReason`].
#[derive(Debug, Clone, Default)]
pub struct EpisodeOfCareReasonBuilder {
    backbone: BackboneElement,
    r#use: Option<CodeableConcept>,
    value: Vec<CodeableReference>,
}

backbone_builder_accessors!(EpisodeOfCareReasonBuilder);

impl EpisodeOfCareReasonBuilder {
    pub fn with_use(mut self, r#use: CodeableConcept) -> Self {
        self.r#use = Some(r#use);
        self
    }

    pub fn add_value(mut self, value: CodeableReference) -> Self {
        self.value.push(value);
        self
    }

    pub fn with_value(mut self, value: Vec<CodeableReference>) -> Self {
        self.value = value;
        self
    }

    fn assemble(self) -> EpisodeOfCareReason {
        EpisodeOfCareReason {
            backbone: self.backbone,
            r#use: self.r#use,
            value: self.value,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<EpisodeOfCareReason, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> EpisodeOfCareReason {
        self.assemble()
    }
}

/// A diagnosis relevant to the episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOfCareDiagnosis {
    pub(crate) backbone: BackboneElement,
    pub(crate) condition: Vec<CodeableReference>,
    pub(crate) r#use: Option<CodeableConcept>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(EpisodeOfCareDiagnosis);
memoized_value_hash!(EpisodeOfCareDiagnosis { backbone, condition, r#use });

impl EpisodeOfCareDiagnosis {
    pub fn builder() -> EpisodeOfCareDiagnosisBuilder {
        EpisodeOfCareDiagnosisBuilder::default()
    }

    pub fn condition(&self) -> &[CodeableReference] {
        &self.condition
    }

    pub fn r#use(&self) -> Option<&CodeableConcept> {
        self.r#use.as_ref()
    }

    pub fn to_builder(&self) -> EpisodeOfCareDiagnosisBuilder {
        EpisodeOfCareDiagnosisBuilder {
            backbone: self.backbone.clone(),
            condition: self.condition.clone(),
            r#use: self.r#use.clone(),
        }
    }
}

impl Visitable for EpisodeOfCareDiagnosis {
    fn type_name(&self) -> &'static str {
        "EpisodeOfCare.Diagnosis"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || !self.condition.is_empty() || self.r#use.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_nodes(&self.condition, "condition", visitor);
            visitor::accept_node(self.r#use.as_ref(), "use", visitor);
        });
    }
}

impl Validate for EpisodeOfCareDiagnosis {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.validate_children(&self.condition, "condition");
        ctx.validate_child(self.r#use.as_ref(), "use");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`EpisodeOfCareDiagnosis`].
#[derive(Debug, Clone, Default)]
pub struct EpisodeOfCareDiagnosisBuilder {
    backbone: BackboneElement,
    condition: Vec<CodeableReference>,
    r#use: Option<CodeableConcept>,
}

backbone_builder_accessors!(EpisodeOfCareDiagnosisBuilder);

impl EpisodeOfCareDiagnosisBuilder {
    pub fn add_condition(mut self, condition: CodeableReference) -> Self {
        self.condition.push(condition);
        self
    }

    pub fn with_condition(mut self, condition: Vec<CodeableReference>) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_use(mut self, r#use: CodeableConcept) -> Self {
        self.r#use = Some(r#use);
        self
    }

    fn assemble(self) -> EpisodeOfCareDiagnosis {
        EpisodeOfCareDiagnosis {
            backbone: self.backbone,
            condition: self.condition,
            r#use: self.r#use,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<EpisodeOfCareDiagnosis, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> EpisodeOfCareDiagnosis {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::validation::IssueKind;

    fn patient() -> Reference {
        Reference::builder().with_reference("Patient/p1").build_unvalidated()
    }

    #[test]
    fn active_episode_builds() {
        let episode = EpisodeOfCare::builder()
            .with_status(EpisodeOfCareStatus::Active)
            .with_patient(patient())
            .build()
            .unwrap();
        assert_eq!(episode.status(), Some(EpisodeOfCareStatus::Active));
    }

    #[test]
    fn status_history_entries_need_status_and_period() {
        let episode = EpisodeOfCare::builder()
            .with_status(EpisodeOfCareStatus::Active)
            .with_patient(patient())
            .add_status_history(
                EpisodeOfCareStatusHistory::builder()
                    .with_status(EpisodeOfCareStatus::Planned)
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = episode.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
        assert_eq!(issues[0].path, "EpisodeOfCare.statusHistory[0].period");
    }

    #[test]
    fn care_manager_must_be_a_practitioner() {
        let err = EpisodeOfCare::builder()
            .with_status(EpisodeOfCareStatus::Active)
            .with_patient(patient())
            .with_care_manager(
                Reference::builder()
                    .with_reference("Organization/org-1")
                    .build_unvalidated(),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].path, "EpisodeOfCare.careManager");
    }
}
