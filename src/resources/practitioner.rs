//! The Practitioner resource: a person involved in care delivery in a
//! professional capacity.

use chrono::NaiveDate;

use crate::binding::CodeBinding;
use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::AdministrativeGender;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{
    Address, Attachment, CodeableConcept, ContactPoint, HumanName, Identifier, Period, Reference,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const ISSUER_TARGETS: &[&str] = &["Organization"];
const DECEASED_CHOICE: &[FhirType] = &[FhirType::Boolean, FhirType::DateTime];

/// Languages are drawn from BCP-47; the bound system is checked, not an
/// enumerated code list.
const LANGUAGE_BINDING: CodeBinding = CodeBinding::required(
    "AllLanguages",
    "http://hl7.org/fhir/ValueSet/all-languages|5.0.0",
    "urn:ietf:bcp:47",
    &[],
);

/// A person with a formal healthcare role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Practitioner {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) active: Option<bool>,
    pub(crate) name: Vec<HumanName>,
    pub(crate) telecom: Vec<ContactPoint>,
    pub(crate) gender: Option<AdministrativeGender>,
    pub(crate) birth_date: Option<NaiveDate>,
    pub(crate) deceased: Option<ChoiceValue>,
    pub(crate) address: Vec<Address>,
    pub(crate) photo: Vec<Attachment>,
    pub(crate) qualification: Vec<PractitionerQualification>,
    pub(crate) communication: Vec<PractitionerCommunication>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(Practitioner);
memoized_value_hash!(Practitioner {
    resource,
    identifier,
    active,
    name,
    telecom,
    gender,
    birth_date,
    deceased,
    address,
    photo,
    qualification,
    communication,
});

impl Practitioner {
    pub fn builder() -> PractitionerBuilder {
        PractitionerBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn active(&self) -> Option<bool> {
        self.active
    }

    pub fn name(&self) -> &[HumanName] {
        &self.name
    }

    pub fn telecom(&self) -> &[ContactPoint] {
        &self.telecom
    }

    pub fn gender(&self) -> Option<AdministrativeGender> {
        self.gender
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Death indicator, either a flag or the date and time of death.
    pub fn deceased(&self) -> Option<&ChoiceValue> {
        self.deceased.as_ref()
    }

    pub fn address(&self) -> &[Address] {
        &self.address
    }

    pub fn photo(&self) -> &[Attachment] {
        &self.photo
    }

    pub fn qualification(&self) -> &[PractitionerQualification] {
        &self.qualification
    }

    pub fn communication(&self) -> &[PractitionerCommunication] {
        &self.communication
    }

    pub fn to_builder(&self) -> PractitionerBuilder {
        PractitionerBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            active: self.active,
            name: self.name.clone(),
            telecom: self.telecom.clone(),
            gender: self.gender,
            birth_date: self.birth_date,
            deceased: self.deceased.clone(),
            address: self.address.clone(),
            photo: self.photo.clone(),
            qualification: self.qualification.clone(),
            communication: self.communication.clone(),
        }
    }
}

impl Visitable for Practitioner {
    fn type_name(&self) -> &'static str {
        "Practitioner"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.active.is_some()
            || !self.name.is_empty()
            || !self.telecom.is_empty()
            || self.gender.is_some()
            || self.birth_date.is_some()
            || self.deceased.is_some()
            || !self.address.is_empty()
            || !self.photo.is_empty()
            || !self.qualification.is_empty()
            || !self.communication.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_bool(self.active, "active", visitor);
            visitor::accept_nodes(&self.name, "name", visitor);
            visitor::accept_nodes(&self.telecom, "telecom", visitor);
            visitor::accept_code(self.gender.as_ref(), "gender", visitor);
            visitor::accept_date(self.birth_date, "birthDate", visitor);
            visitor::accept_choice(self.deceased.as_ref(), "deceased", visitor);
            visitor::accept_nodes(&self.address, "address", visitor);
            visitor::accept_nodes(&self.photo, "photo", visitor);
            visitor::accept_nodes(&self.qualification, "qualification", visitor);
            visitor::accept_nodes(&self.communication, "communication", visitor);
        });
    }
}

impl Validate for Practitioner {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.check_choice(&self.deceased, "deceased", DECEASED_CHOICE);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.name, "name");
        ctx.validate_children(&self.telecom, "telecom");
        ctx.validate_children(&self.address, "address");
        ctx.validate_children(&self.photo, "photo");
        ctx.validate_children(&self.qualification, "qualification");
        ctx.validate_children(&self.communication, "communication");
    }
}

/// Builder for [`Practitioner`].
#[derive(Debug, Clone, Default)]
pub struct PractitionerBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    active: Option<bool>,
    name: Vec<HumanName>,
    telecom: Vec<ContactPoint>,
    gender: Option<AdministrativeGender>,
    birth_date: Option<NaiveDate>,
    deceased: Option<ChoiceValue>,
    address: Vec<Address>,
    photo: Vec<Attachment>,
    qualification: Vec<PractitionerQualification>,
    communication: Vec<PractitionerCommunication>,
}

resource_builder_accessors!(PractitionerBuilder);

impl PractitionerBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn add_name(mut self, name: HumanName) -> Self {
        self.name.push(name);
        self
    }

    pub fn with_name(mut self, name: Vec<HumanName>) -> Self {
        self.name = name;
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

    pub fn with_gender(mut self, gender: AdministrativeGender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_deceased(mut self, deceased: impl Into<ChoiceValue>) -> Self {
        self.deceased = Some(deceased.into());
        self
    }

    pub fn add_address(mut self, address: Address) -> Self {
        self.address.push(address);
        self
    }

    pub fn with_address(mut self, address: Vec<Address>) -> Self {
        self.address = address;
        self
    }

    pub fn add_photo(mut self, photo: Attachment) -> Self {
        self.photo.push(photo);
        self
    }

    pub fn with_photo(mut self, photo: Vec<Attachment>) -> Self {
        self.photo = photo;
        self
    }

    pub fn add_qualification(mut self, qualification: PractitionerQualification) -> Self {
        self.qualification.push(qualification);
        self
    }

    pub fn with_qualification(
        mut self,
        qualification: Vec<PractitionerQualification>,
    ) -> Self {
        self.qualification = qualification;
        self
    }

    pub fn add_communication(mut self, communication: PractitionerCommunication) -> Self {
        self.communication.push(communication);
        self
    }

    pub fn with_communication(
        mut self,
        communication: Vec<PractitionerCommunication>,
    ) -> Self {
        self.communication = communication;
        self
    }

    fn assemble(self) -> Practitioner {
        Practitioner {
            resource: self.resource,
            identifier: self.identifier,
            active: self.active,
            name: self.name,
            telecom: self.telecom,
            gender: self.gender,
            birth_date: self.birth_date,
            deceased: self.deceased,
            address: self.address,
            photo: self.photo,
            qualification: self.qualification,
            communication: self.communication,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Practitioner, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Practitioner {
        self.assemble()
    }
}

/// A certification or licence held by the practitioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PractitionerQualification {
    pub(crate) backbone: BackboneElement,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) code: Option<CodeableConcept>,
    pub(crate) period: Option<Period>,
    pub(crate) issuer: Option<Reference>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(PractitionerQualification);
memoized_value_hash!(PractitionerQualification { backbone, identifier, code, period, issuer });

impl PractitionerQualification {
    pub fn builder() -> PractitionerQualificationBuilder {
        PractitionerQualificationBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// The obtained qualification. Required.
    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn issuer(&self) -> Option<&Reference> {
        self.issuer.as_ref()
    }

    pub fn to_builder(&self) -> PractitionerQualificationBuilder {
        PractitionerQualificationBuilder {
            backbone: self.backbone.clone(),
            identifier: self.identifier.clone(),
            code: self.code.clone(),
            period: self.period.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

impl Visitable for PractitionerQualification {
    fn type_name(&self) -> &'static str {
        "Practitioner.Qualification"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || !self.identifier.is_empty()
            || self.code.is_some()
            || self.period.is_some()
            || self.issuer.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_node(self.code.as_ref(), "code", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_node(self.issuer.as_ref(), "issuer", visitor);
        });
    }
}

impl Validate for PractitionerQualification {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.code, "code");
        ctx.check_reference(self.issuer.as_ref(), "issuer", ISSUER_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.code.as_ref(), "code");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.validate_child(self.issuer.as_ref(), "issuer");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`PractitionerQualification`].
#[derive(Debug, Clone, Default)]
pub struct PractitionerQualificationBuilder {
    backbone: BackboneElement,
    identifier: Vec<Identifier>,
    code: Option<CodeableConcept>,
    period: Option<Period>,
    issuer: Option<Reference>,
}

backbone_builder_accessors!(PractitionerQualificationBuilder);

impl PractitionerQualificationBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_issuer(mut self, issuer: Reference) -> Self {
        self.issuer = Some(issuer);
        self
    }

    fn assemble(self) -> PractitionerQualification {
        PractitionerQualification {
            backbone: self.backbone,
            identifier: self.identifier,
            code: self.code,
            period: self.period,
            issuer: self.issuer,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<PractitionerQualification, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> PractitionerQualification {
        self.assemble()
    }
}

/// A language the practitioner can communicate in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PractitionerCommunication {
    pub(crate) backbone: BackboneElement,
    pub(crate) language: Option<CodeableConcept>,
    pub(crate) preferred: Option<bool>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(PractitionerCommunication);
memoized_value_hash!(PractitionerCommunication { backbone, language, preferred });

impl PractitionerCommunication {
    pub fn builder() -> PractitionerCommunicationBuilder {
        PractitionerCommunicationBuilder::default()
    }

    /// The language, coded in BCP-47. Required.
    pub fn language(&self) -> Option<&CodeableConcept> {
        self.language.as_ref()
    }

    pub fn preferred(&self) -> Option<bool> {
        self.preferred
    }

    pub fn to_builder(&self) -> PractitionerCommunicationBuilder {
        PractitionerCommunicationBuilder {
            backbone: self.backbone.clone(),
            language: self.language.clone(),
            preferred: self.preferred,
        }
    }
}

impl Visitable for PractitionerCommunication {
    fn type_name(&self) -> &'static str {
        "Practitioner.Communication"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.language.is_some() || self.preferred.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.language.as_ref(), "language", visitor);
            visitor::accept_bool(self.preferred, "preferred", visitor);
        });
    }
}

impl Validate for PractitionerCommunication {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.language, "language");
        ctx.check_binding_concept(self.language.as_ref(), "language", &LANGUAGE_BINDING);
        ctx.validate_child(self.language.as_ref(), "language");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`PractitionerCommunication`].
#[derive(Debug, Clone, Default)]
pub struct PractitionerCommunicationBuilder {
    backbone: BackboneElement,
    language: Option<CodeableConcept>,
    preferred: Option<bool>,
}

backbone_builder_accessors!(PractitionerCommunicationBuilder);

impl PractitionerCommunicationBuilder {
    pub fn with_language(mut self, language: CodeableConcept) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_preferred(mut self, preferred: bool) -> Self {
        self.preferred = Some(preferred);
        self
    }

    fn assemble(self) -> PractitionerCommunication {
        PractitionerCommunication {
            backbone: self.backbone,
            language: self.language,
            preferred: self.preferred,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<PractitionerCommunication, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> PractitionerCommunication {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Coding;
    use crate::validation::IssueKind;

    fn language(system: &str, code: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system(system)
                    .with_code(code)
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn practitioner_with_name_builds() {
        let practitioner = Practitioner::builder()
            .add_name(
                HumanName::builder()
                    .with_family("Osei")
                    .add_given("Akosua")
                    .build_unvalidated(),
            )
            .with_gender(AdministrativeGender::Female)
            .build()
            .unwrap();
        assert_eq!(practitioner.name()[0].family(), Some("Osei"));
    }

    #[test]
    fn deceased_accepts_a_flag_but_not_a_string() {
        let ok = Practitioner::builder().with_deceased(false).build();
        assert!(ok.is_ok());

        let err = Practitioner::builder()
            .with_deceased("last year")
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidChoiceType);
        assert_eq!(err.issues()[0].path, "Practitioner.deceased");
    }

    #[test]
    fn communication_language_must_come_from_bcp_47() {
        let ok = PractitionerCommunication::builder()
            .with_language(language("urn:ietf:bcp:47", "sw"))
            .build();
        assert!(ok.is_ok());

        let err = PractitionerCommunication::builder()
            .with_language(language("http://example.org/langs", "sw"))
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
        assert_eq!(err.issues()[0].path, "Practitioner.Communication.language");
    }

    #[test]
    fn qualification_requires_a_code() {
        let practitioner = Practitioner::builder()
            .add_qualification(
                PractitionerQualification::builder()
                    .with_issuer(
                        Reference::builder()
                            .with_reference("Organization/med-board")
                            .build_unvalidated(),
                    )
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = practitioner.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "Practitioner.qualification[0].code");
    }
}
