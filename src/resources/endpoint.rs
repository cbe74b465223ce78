//! The Endpoint resource: a technical contact point that offers
//! electronic services, such as a FHIR REST interface or DICOM endpoint.

use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::EndpointStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, ContactPoint, Identifier, Period, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const MANAGING_ORGANIZATION_TARGETS: &[&str] = &["Organization"];

/// A network-reachable service with a status, connection protocol and
/// payload description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) status: Option<EndpointStatus>,
    pub(crate) connection_type: Vec<CodeableConcept>,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) environment_type: Vec<CodeableConcept>,
    pub(crate) managing_organization: Option<Reference>,
    pub(crate) contact: Vec<ContactPoint>,
    pub(crate) period: Option<Period>,
    pub(crate) payload: Vec<EndpointPayload>,
    pub(crate) address: Option<String>,
    pub(crate) header: Vec<String>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(Endpoint);
memoized_value_hash!(Endpoint {
    resource,
    identifier,
    status,
    connection_type,
    name,
    description,
    environment_type,
    managing_organization,
    contact,
    period,
    payload,
    address,
    header,
});

impl Endpoint {
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Whether the endpoint is ready for use. Required.
    pub fn status(&self) -> Option<EndpointStatus> {
        self.status
    }

    /// Protocol or standard spoken at the address. At least one entry is
    /// required.
    pub fn connection_type(&self) -> &[CodeableConcept] {
        &self.connection_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn environment_type(&self) -> &[CodeableConcept] {
        &self.environment_type
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }

    pub fn contact(&self) -> &[ContactPoint] {
        &self.contact
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn payload(&self) -> &[EndpointPayload] {
        &self.payload
    }

    /// The URI reachable at this endpoint. Required.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn to_builder(&self) -> EndpointBuilder {
        EndpointBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            status: self.status,
            connection_type: self.connection_type.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            environment_type: self.environment_type.clone(),
            managing_organization: self.managing_organization.clone(),
            contact: self.contact.clone(),
            period: self.period.clone(),
            payload: self.payload.clone(),
            address: self.address.clone(),
            header: self.header.clone(),
        }
    }
}

impl Visitable for Endpoint {
    fn type_name(&self) -> &'static str {
        "Endpoint"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.status.is_some()
            || !self.connection_type.is_empty()
            || self.name.is_some()
            || self.description.is_some()
            || !self.environment_type.is_empty()
            || self.managing_organization.is_some()
            || !self.contact.is_empty()
            || self.period.is_some()
            || !self.payload.is_empty()
            || self.address.is_some()
            || !self.header.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_nodes(&self.connection_type, "connectionType", visitor);
            visitor::accept_str(self.name.as_deref(), "name", visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
            visitor::accept_nodes(&self.environment_type, "environmentType", visitor);
            visitor::accept_node(
                self.managing_organization.as_ref(),
                "managingOrganization",
                visitor,
            );
            visitor::accept_nodes(&self.contact, "contact", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_nodes(&self.payload, "payload", visitor);
            visitor::accept_str(self.address.as_deref(), "address", visitor);
            visitor::accept_strs(&self.header, "header", visitor);
        });
    }
}

impl Validate for Endpoint {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.status, "status");
        ctx.require_non_empty(&self.connection_type, "connectionType");
        ctx.require(&self.address, "address");
        ctx.check_reference(
            self.managing_organization.as_ref(),
            "managingOrganization",
            MANAGING_ORGANIZATION_TARGETS,
        );
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_children(&self.connection_type, "connectionType");
        ctx.validate_children(&self.environment_type, "environmentType");
        ctx.validate_child(self.managing_organization.as_ref(), "managingOrganization");
        ctx.validate_children(&self.contact, "contact");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.validate_children(&self.payload, "payload");
    }
}

/// Builder for [`Endpoint`].
#[derive(Debug, Clone, Default)]
pub struct EndpointBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    status: Option<EndpointStatus>,
    connection_type: Vec<CodeableConcept>,
    name: Option<String>,
    description: Option<String>,
    environment_type: Vec<CodeableConcept>,
    managing_organization: Option<Reference>,
    contact: Vec<ContactPoint>,
    period: Option<Period>,
    payload: Vec<EndpointPayload>,
    address: Option<String>,
    header: Vec<String>,
}

resource_builder_accessors!(EndpointBuilder);

impl EndpointBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_status(mut self, status: EndpointStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn add_connection_type(mut self, connection_type: CodeableConcept) -> Self {
        self.connection_type.push(connection_type);
        self
    }

    pub fn with_connection_type(mut self, connection_type: Vec<CodeableConcept>) -> Self {
        self.connection_type = connection_type;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_environment_type(mut self, environment_type: CodeableConcept) -> Self {
        self.environment_type.push(environment_type);
        self
    }

    pub fn with_environment_type(mut self, environment_type: Vec<CodeableConcept>) -> Self {
        self.environment_type = environment_type;
        self
    }

    pub fn with_managing_organization(mut self, managing_organization: Reference) -> Self {
        self.managing_organization = Some(managing_organization);
        self
    }

    pub fn add_contact(mut self, contact: ContactPoint) -> Self {
        self.contact.push(contact);
        self
    }

    pub fn with_contact(mut self, contact: Vec<ContactPoint>) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn add_payload(mut self, payload: EndpointPayload) -> Self {
        self.payload.push(payload);
        self
    }

    pub fn with_payload(mut self, payload: Vec<EndpointPayload>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn add_header(mut self, header: impl Into<String>) -> Self {
        self.header.push(header.into());
        self
    }

    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }

    fn assemble(self) -> Endpoint {
        Endpoint {
            resource: self.resource,
            identifier: self.identifier,
            status: self.status,
            connection_type: self.connection_type,
            name: self.name,
            description: self.description,
            environment_type: self.environment_type,
            managing_organization: self.managing_organization,
            contact: self.contact,
            period: self.period,
            payload: self.payload,
            address: self.address,
            header: self.header,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Endpoint, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Endpoint {
        self.assemble()
    }
}

/// The payload type and MIME types an endpoint can exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPayload {
    pub(crate) backbone: BackboneElement,
    pub(crate) r#type: Vec<CodeableConcept>,
    pub(crate) mime_type: Vec<String>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(EndpointPayload);
memoized_value_hash!(EndpointPayload { backbone, r#type, mime_type });

impl EndpointPayload {
    pub fn builder() -> EndpointPayloadBuilder {
        EndpointPayloadBuilder::default()
    }

    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    pub fn mime_type(&self) -> &[String] {
        &self.mime_type
    }

    pub fn to_builder(&self) -> EndpointPayloadBuilder {
        EndpointPayloadBuilder {
            backbone: self.backbone.clone(),
            r#type: self.r#type.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

impl Visitable for EndpointPayload {
    fn type_name(&self) -> &'static str {
        "Endpoint.Payload"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || !self.r#type.is_empty() || !self.mime_type.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_nodes(&self.r#type, "type", visitor);
            visitor::accept_codes(&self.mime_type, "mimeType", visitor);
        });
    }
}

impl Validate for EndpointPayload {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.warn_code_formats(&self.mime_type, "mimeType");
        ctx.validate_children(&self.r#type, "type");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`EndpointPayload`].
#[derive(Debug, Clone, Default)]
pub struct EndpointPayloadBuilder {
    backbone: BackboneElement,
    r#type: Vec<CodeableConcept>,
    mime_type: Vec<String>,
}

backbone_builder_accessors!(EndpointPayloadBuilder);

impl EndpointPayloadBuilder {
    pub fn add_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type.push(r#type);
        self
    }

    pub fn with_type(mut self, r#type: Vec<CodeableConcept>) -> Self {
        self.r#type = r#type;
        self
    }

    pub fn add_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type.push(mime_type.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: Vec<String>) -> Self {
        self.mime_type = mime_type;
        self
    }

    fn assemble(self) -> EndpointPayload {
        EndpointPayload {
            backbone: self.backbone,
            r#type: self.r#type,
            mime_type: self.mime_type,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<EndpointPayload, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> EndpointPayload {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Coding;
    use crate::validation::{IssueKind, Severity};

    fn hl7_fhir_rest() -> CodeableConcept {
        CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system("http://hl7.org/fhir/endpoint-connection-type")
                    .with_code("hl7-fhir-rest")
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn minimal_endpoint_builds() {
        let endpoint = Endpoint::builder()
            .with_status(EndpointStatus::Active)
            .add_connection_type(hl7_fhir_rest())
            .with_address("https://fhir.example.org/r5")
            .build()
            .unwrap();
        assert_eq!(endpoint.address(), Some("https://fhir.example.org/r5"));
    }

    #[test]
    fn empty_connection_type_list_is_rejected() {
        let err = Endpoint::builder()
            .with_status(EndpointStatus::Active)
            .with_address("https://fhir.example.org/r5")
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::MissingRequiredField);
        assert_eq!(err.issues()[0].path, "Endpoint.connectionType");
    }

    #[test]
    fn payload_mime_type_problems_warn_but_do_not_fail() {
        let endpoint = Endpoint::builder()
            .with_status(EndpointStatus::Active)
            .add_connection_type(hl7_fhir_rest())
            .with_address("https://fhir.example.org/r5")
            .add_payload(
                EndpointPayload::builder()
                    .add_mime_type(" application/fhir+json")
                    .build_unvalidated(),
            )
            .build()
            .unwrap();
        let issues = endpoint.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].path, "Endpoint.payload[0].mimeType[0]");
    }
}
