//! The Location resource: a physical place or a virtual one, with its
//! contact details, position and opening hours.

use rust_decimal::Decimal;

use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::{LocationMode, LocationStatus};
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{
    Address, Availability, CodeableConcept, Coding, ExtendedContactDetail, Identifier, Reference,
    VirtualServiceDetail,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const MANAGING_ORGANIZATION_TARGETS: &[&str] = &["Organization"];
const PART_OF_TARGETS: &[&str] = &["Location"];
const ENDPOINT_TARGETS: &[&str] = &["Endpoint"];

/// A place where services are provided or resources are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) status: Option<LocationStatus>,
    pub(crate) operational_status: Option<Coding>,
    pub(crate) name: Option<String>,
    pub(crate) alias: Vec<String>,
    pub(crate) description: Option<String>,
    pub(crate) mode: Option<LocationMode>,
    pub(crate) r#type: Vec<CodeableConcept>,
    pub(crate) contact: Vec<ExtendedContactDetail>,
    pub(crate) address: Option<Address>,
    pub(crate) form: Option<CodeableConcept>,
    pub(crate) position: Option<LocationPosition>,
    pub(crate) managing_organization: Option<Reference>,
    pub(crate) part_of: Option<Reference>,
    pub(crate) characteristic: Vec<CodeableConcept>,
    pub(crate) hours_of_operation: Vec<Availability>,
    pub(crate) virtual_service: Vec<VirtualServiceDetail>,
    pub(crate) endpoint: Vec<Reference>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(Location);
memoized_value_hash!(Location {
    resource,
    identifier,
    status,
    operational_status,
    name,
    alias,
    description,
    mode,
    r#type,
    contact,
    address,
    form,
    position,
    managing_organization,
    part_of,
    characteristic,
    hours_of_operation,
    virtual_service,
    endpoint,
});

impl Location {
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn status(&self) -> Option<LocationStatus> {
        self.status
    }

    pub fn operational_status(&self) -> Option<&Coding> {
        self.operational_status.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn alias(&self) -> &[String] {
        &self.alias
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn mode(&self) -> Option<LocationMode> {
        self.mode
    }

    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    pub fn contact(&self) -> &[ExtendedContactDetail] {
        &self.contact
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn form(&self) -> Option<&CodeableConcept> {
        self.form.as_ref()
    }

    pub fn position(&self) -> Option<&LocationPosition> {
        self.position.as_ref()
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }

    pub fn part_of(&self) -> Option<&Reference> {
        self.part_of.as_ref()
    }

    pub fn characteristic(&self) -> &[CodeableConcept] {
        &self.characteristic
    }

    pub fn hours_of_operation(&self) -> &[Availability] {
        &self.hours_of_operation
    }

    pub fn virtual_service(&self) -> &[VirtualServiceDetail] {
        &self.virtual_service
    }

    pub fn endpoint(&self) -> &[Reference] {
        &self.endpoint
    }

    pub fn to_builder(&self) -> LocationBuilder {
        LocationBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            status: self.status,
            operational_status: self.operational_status.clone(),
            name: self.name.clone(),
            alias: self.alias.clone(),
            description: self.description.clone(),
            mode: self.mode,
            r#type: self.r#type.clone(),
            contact: self.contact.clone(),
            address: self.address.clone(),
            form: self.form.clone(),
            position: self.position.clone(),
            managing_organization: self.managing_organization.clone(),
            part_of: self.part_of.clone(),
            characteristic: self.characteristic.clone(),
            hours_of_operation: self.hours_of_operation.clone(),
            virtual_service: self.virtual_service.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl Visitable for Location {
    fn type_name(&self) -> &'static str {
        "Location"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.status.is_some()
            || self.operational_status.is_some()
            || self.name.is_some()
            || !self.alias.is_empty()
            || self.description.is_some()
            || self.mode.is_some()
            || !self.r#type.is_empty()
            || !self.contact.is_empty()
            || self.address.is_some()
            || self.form.is_some()
            || self.position.is_some()
            || self.managing_organization.is_some()
            || self.part_of.is_some()
            || !self.characteristic.is_empty()
            || !self.hours_of_operation.is_empty()
            || !self.virtual_service.is_empty()
            || !self.endpoint.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_node(self.operational_status.as_ref(), "operationalStatus", visitor);
            visitor::accept_str(self.name.as_deref(), "name", visitor);
            visitor::accept_strs(&self.alias, "alias", visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
            visitor::accept_code(self.mode.as_ref(), "mode", visitor);
            visitor::accept_nodes(&self.r#type, "type", visitor);
            visitor::accept_nodes(&self.contact, "contact", visitor);
            visitor::accept_node(self.address.as_ref(), "address", visitor);
            visitor::accept_node(self.form.as_ref(), "form", visitor);
            visitor::accept_node(self.position.as_ref(), "position", visitor);
            visitor::accept_node(
                self.managing_organization.as_ref(),
                "managingOrganization",
                visitor,
            );
            visitor::accept_node(self.part_of.as_ref(), "partOf", visitor);
            visitor::accept_nodes(&self.characteristic, "characteristic", visitor);
            visitor::accept_nodes(&self.hours_of_operation, "hoursOfOperation", visitor);
            visitor::accept_nodes(&self.virtual_service, "virtualService", visitor);
            visitor::accept_nodes(&self.endpoint, "endpoint", visitor);
        });
    }
}

impl Validate for Location {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.check_reference(
            self.managing_organization.as_ref(),
            "managingOrganization",
            MANAGING_ORGANIZATION_TARGETS,
        );
        ctx.check_reference(self.part_of.as_ref(), "partOf", PART_OF_TARGETS);
        ctx.check_references(&self.endpoint, "endpoint", ENDPOINT_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.operational_status.as_ref(), "operationalStatus");
        ctx.validate_children(&self.r#type, "type");
        ctx.validate_children(&self.contact, "contact");
        ctx.validate_child(self.address.as_ref(), "address");
        ctx.validate_child(self.form.as_ref(), "form");
        ctx.validate_child(self.position.as_ref(), "position");
        ctx.validate_child(self.managing_organization.as_ref(), "managingOrganization");
        ctx.validate_child(self.part_of.as_ref(), "partOf");
        ctx.validate_children(&self.characteristic, "characteristic");
        ctx.validate_children(&self.hours_of_operation, "hoursOfOperation");
        ctx.validate_children(&self.virtual_service, "virtualService");
        ctx.validate_children(&self.endpoint, "endpoint");
    }
}

/// Builder for [`Location`].
#[derive(Debug, Clone, Default)]
pub struct LocationBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    status: Option<LocationStatus>,
    operational_status: Option<Coding>,
    name: Option<String>,
    alias: Vec<String>,
    description: Option<String>,
    mode: Option<LocationMode>,
    r#type: Vec<CodeableConcept>,
    contact: Vec<ExtendedContactDetail>,
    address: Option<Address>,
    form: Option<CodeableConcept>,
    position: Option<LocationPosition>,
    managing_organization: Option<Reference>,
    part_of: Option<Reference>,
    characteristic: Vec<CodeableConcept>,
    hours_of_operation: Vec<Availability>,
    virtual_service: Vec<VirtualServiceDetail>,
    endpoint: Vec<Reference>,
}

resource_builder_accessors!(LocationBuilder);

impl LocationBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_status(mut self, status: LocationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_operational_status(mut self, operational_status: Coding) -> Self {
        self.operational_status = Some(operational_status);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.push(alias.into());
        self
    }

    pub fn with_alias(mut self, alias: Vec<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mode(mut self, mode: LocationMode) -> Self {
        self.mode = Some(mode);
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

    pub fn add_contact(mut self, contact: ExtendedContactDetail) -> Self {
        self.contact.push(contact);
        self
    }

    pub fn with_contact(mut self, contact: Vec<ExtendedContactDetail>) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_form(mut self, form: CodeableConcept) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_position(mut self, position: LocationPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_managing_organization(mut self, managing_organization: Reference) -> Self {
        self.managing_organization = Some(managing_organization);
        self
    }

    pub fn with_part_of(mut self, part_of: Reference) -> Self {
        self.part_of = Some(part_of);
        self
    }

    pub fn add_characteristic(mut self, characteristic: CodeableConcept) -> Self {
        self.characteristic.push(characteristic);
        self
    }

    pub fn with_characteristic(mut self, characteristic: Vec<CodeableConcept>) -> Self {
        self.characteristic = characteristic;
        self
    }

    pub fn add_hours_of_operation(mut self, hours_of_operation: Availability) -> Self {
        self.hours_of_operation.push(hours_of_operation);
        self
    }

    pub fn with_hours_of_operation(mut self, hours_of_operation: Vec<Availability>) -> Self {
        self.hours_of_operation = hours_of_operation;
        self
    }

    pub fn add_virtual_service(mut self, virtual_service: VirtualServiceDetail) -> Self {
        self.virtual_service.push(virtual_service);
        self
    }

    pub fn with_virtual_service(
        mut self,
        virtual_service: Vec<VirtualServiceDetail>,
    ) -> Self {
        self.virtual_service = virtual_service;
        self
    }

    pub fn add_endpoint(mut self, endpoint: Reference) -> Self {
        self.endpoint.push(endpoint);
        self
    }

    pub fn with_endpoint(mut self, endpoint: Vec<Reference>) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn assemble(self) -> Location {
        Location {
            resource: self.resource,
            identifier: self.identifier,
            status: self.status,
            operational_status: self.operational_status,
            name: self.name,
            alias: self.alias,
            description: self.description,
            mode: self.mode,
            r#type: self.r#type,
            contact: self.contact,
            address: self.address,
            form: self.form,
            position: self.position,
            managing_organization: self.managing_organization,
            part_of: self.part_of,
            characteristic: self.characteristic,
            hours_of_operation: self.hours_of_operation,
            virtual_service: self.virtual_service,
            endpoint: self.endpoint,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Location, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Location {
        self.assemble()
    }
}

/// Geographic coordinates in WGS84, as in KML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPosition {
    pub(crate) backbone: BackboneElement,
    pub(crate) longitude: Option<Decimal>,
    pub(crate) latitude: Option<Decimal>,
    pub(crate) altitude: Option<Decimal>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(LocationPosition);
memoized_value_hash!(LocationPosition { backbone, longitude, latitude, altitude });

impl LocationPosition {
    pub fn builder() -> LocationPositionBuilder {
        LocationPositionBuilder::default()
    }

    /// Longitude in degrees. Required.
    pub fn longitude(&self) -> Option<Decimal> {
        self.longitude
    }

    /// Latitude in degrees. Required.
    pub fn latitude(&self) -> Option<Decimal> {
        self.latitude
    }

    pub fn altitude(&self) -> Option<Decimal> {
        self.altitude
    }

    pub fn to_builder(&self) -> LocationPositionBuilder {
        LocationPositionBuilder {
            backbone: self.backbone.clone(),
            longitude: self.longitude,
            latitude: self.latitude,
            altitude: self.altitude,
        }
    }
}

impl Visitable for LocationPosition {
    fn type_name(&self) -> &'static str {
        "Location.Position"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.longitude.is_some()
            || self.latitude.is_some()
            || self.altitude.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_decimal(self.longitude, "longitude", visitor);
            visitor::accept_decimal(self.latitude, "latitude", visitor);
            visitor::accept_decimal(self.altitude, "altitude", visitor);
        });
    }
}

impl Validate for LocationPosition {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.longitude, "longitude");
        ctx.require(&self.latitude, "latitude");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`LocationPosition`].
#[derive(Debug, Clone, Default)]
pub struct LocationPositionBuilder {
    backbone: BackboneElement,
    longitude: Option<Decimal>,
    latitude: Option<Decimal>,
    altitude: Option<Decimal>,
}

backbone_builder_accessors!(LocationPositionBuilder);

impl LocationPositionBuilder {
    pub fn with_longitude(mut self, longitude: Decimal) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn with_latitude(mut self, latitude: Decimal) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn with_altitude(mut self, altitude: Decimal) -> Self {
        self.altitude = Some(altitude);
        self
    }

    fn assemble(self) -> LocationPosition {
        LocationPosition {
            backbone: self.backbone,
            longitude: self.longitude,
            latitude: self.latitude,
            altitude: self.altitude,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<LocationPosition, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> LocationPosition {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::validation::IssueKind;

    #[test]
    fn named_ward_builds() {
        let location = Location::builder()
            .with_status(LocationStatus::Active)
            .with_name("South Wing, second floor")
            .with_mode(LocationMode::Instance)
            .build()
            .unwrap();
        assert_eq!(location.name(), Some("South Wing, second floor"));
    }

    #[test]
    fn position_requires_both_coordinates() {
        let err = Location::builder()
            .with_position(
                LocationPosition::builder()
                    .with_altitude(dec!(220.5))
                    .build_unvalidated(),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 2);
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["Location.position.longitude", "Location.position.latitude"]
        );
    }

    #[test]
    fn part_of_must_point_at_a_location() {
        let err = Location::builder()
            .with_part_of(
                Reference::builder()
                    .with_reference("Organization/org-1")
                    .build_unvalidated(),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(err.issues()[0].path, "Location.partOf");
    }
}
