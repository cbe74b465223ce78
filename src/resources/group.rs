//! The Group resource: a defined collection of people, animals, devices
//! or other resources that act collectively.

use crate::binding::CodeBinding;
use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::GroupType;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, Identifier, Period, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const MANAGING_ENTITY_TARGETS: &[&str] = &[
    "Organization",
    "RelatedPerson",
    "Practitioner",
    "PractitionerRole",
];
const MEMBER_ENTITY_TARGETS: &[&str] = &[
    "CareTeam",
    "Device",
    "Group",
    "HealthcareService",
    "Location",
    "Organization",
    "Patient",
    "Practitioner",
    "PractitionerRole",
    "RelatedPerson",
    "Specimen",
];
const CHARACTERISTIC_VALUE_CHOICE: &[FhirType] = &[
    FhirType::CodeableConcept,
    FhirType::Boolean,
    FhirType::Quantity,
    FhirType::Range,
    FhirType::Reference,
];

/// Whether membership is defined by criteria or by enumeration.
const MEMBERSHIP_BINDING: CodeBinding = CodeBinding::required(
    "GroupMembershipBasis",
    "http://hl7.org/fhir/ValueSet/group-membership-basis|5.0.0",
    "http://hl7.org/fhir/group-membership-basis",
    &["definitional", "enumerated"],
);

/// A collection of members sharing the characteristics the group declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) active: Option<bool>,
    pub(crate) r#type: Option<GroupType>,
    pub(crate) membership: Option<String>,
    pub(crate) code: Option<CodeableConcept>,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) quantity: Option<u32>,
    pub(crate) managing_entity: Option<Reference>,
    pub(crate) characteristic: Vec<GroupCharacteristic>,
    pub(crate) member: Vec<GroupMember>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(Group);
memoized_value_hash!(Group {
    resource,
    identifier,
    active,
    r#type,
    membership,
    code,
    name,
    description,
    quantity,
    managing_entity,
    characteristic,
    member,
});

impl Group {
    pub fn builder() -> GroupBuilder {
        GroupBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn active(&self) -> Option<bool> {
        self.active
    }

    /// What kind of members the group holds. Required.
    pub fn r#type(&self) -> Option<GroupType> {
        self.r#type
    }

    /// Basis for membership, `definitional` or `enumerated`. Required.
    pub fn membership(&self) -> Option<&str> {
        self.membership.as_deref()
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn managing_entity(&self) -> Option<&Reference> {
        self.managing_entity.as_ref()
    }

    pub fn characteristic(&self) -> &[GroupCharacteristic] {
        &self.characteristic
    }

    pub fn member(&self) -> &[GroupMember] {
        &self.member
    }

    pub fn to_builder(&self) -> GroupBuilder {
        GroupBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            active: self.active,
            r#type: self.r#type,
            membership: self.membership.clone(),
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            managing_entity: self.managing_entity.clone(),
            characteristic: self.characteristic.clone(),
            member: self.member.clone(),
        }
    }
}

impl Visitable for Group {
    fn type_name(&self) -> &'static str {
        "Group"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.active.is_some()
            || self.r#type.is_some()
            || self.membership.is_some()
            || self.code.is_some()
            || self.name.is_some()
            || self.description.is_some()
            || self.quantity.is_some()
            || self.managing_entity.is_some()
            || !self.characteristic.is_empty()
            || !self.member.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_bool(self.active, "active", visitor);
            visitor::accept_code(self.r#type.as_ref(), "type", visitor);
            visitor::accept_str(self.membership.as_deref(), "membership", visitor);
            visitor::accept_node(self.code.as_ref(), "code", visitor);
            visitor::accept_str(self.name.as_deref(), "name", visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
            visitor::accept_int(self.quantity.map(i64::from), "quantity", visitor);
            visitor::accept_node(self.managing_entity.as_ref(), "managingEntity", visitor);
            visitor::accept_nodes(&self.characteristic, "characteristic", visitor);
            visitor::accept_nodes(&self.member, "member", visitor);
        });
    }
}

impl Validate for Group {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.r#type, "type");
        ctx.require(&self.membership, "membership");
        ctx.check_binding_code(self.membership.as_deref(), "membership", &MEMBERSHIP_BINDING);
        ctx.check_reference(
            self.managing_entity.as_ref(),
            "managingEntity",
            MANAGING_ENTITY_TARGETS,
        );
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.code.as_ref(), "code");
        ctx.validate_child(self.managing_entity.as_ref(), "managingEntity");
        ctx.validate_children(&self.characteristic, "characteristic");
        ctx.validate_children(&self.member, "member");
    }
}

/// Builder for [`Group`].
#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    active: Option<bool>,
    r#type: Option<GroupType>,
    membership: Option<String>,
    code: Option<CodeableConcept>,
    name: Option<String>,
    description: Option<String>,
    quantity: Option<u32>,
    managing_entity: Option<Reference>,
    characteristic: Vec<GroupCharacteristic>,
    member: Vec<GroupMember>,
}

resource_builder_accessors!(GroupBuilder);

impl GroupBuilder {
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

    pub fn with_type(mut self, r#type: GroupType) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_membership(mut self, membership: impl Into<String>) -> Self {
        self.membership = Some(membership.into());
        self
    }

    pub fn with_code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
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

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_managing_entity(mut self, managing_entity: Reference) -> Self {
        self.managing_entity = Some(managing_entity);
        self
    }

    pub fn add_characteristic(mut self, characteristic: GroupCharacteristic) -> Self {
        self.characteristic.push(characteristic);
        self
    }

    pub fn with_characteristic(mut self, characteristic: Vec<GroupCharacteristic>) -> Self {
        self.characteristic = characteristic;
        self
    }

    pub fn add_member(mut self, member: GroupMember) -> Self {
        self.member.push(member);
        self
    }

    pub fn with_member(mut self, member: Vec<GroupMember>) -> Self {
        self.member = member;
        self
    }

    fn assemble(self) -> Group {
        Group {
            resource: self.resource,
            identifier: self.identifier,
            active: self.active,
            r#type: self.r#type,
            membership: self.membership,
            code: self.code,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            managing_entity: self.managing_entity,
            characteristic: self.characteristic,
            member: self.member,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Group, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Group {
        self.assemble()
    }
}

/// A trait members of the group share (or are excluded by).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCharacteristic {
    pub(crate) backbone: BackboneElement,
    pub(crate) code: Option<CodeableConcept>,
    pub(crate) value: Option<ChoiceValue>,
    pub(crate) exclude: Option<bool>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(GroupCharacteristic);
memoized_value_hash!(GroupCharacteristic { backbone, code, value, exclude, period });

impl GroupCharacteristic {
    pub fn builder() -> GroupCharacteristicBuilder {
        GroupCharacteristicBuilder::default()
    }

    /// Which trait. Required.
    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    /// The trait's value. Required, constrained to a handful of shapes.
    pub fn value(&self) -> Option<&ChoiceValue> {
        self.value.as_ref()
    }

    /// Whether the characteristic excludes rather than includes. Required.
    pub fn exclude(&self) -> Option<bool> {
        self.exclude
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> GroupCharacteristicBuilder {
        GroupCharacteristicBuilder {
            backbone: self.backbone.clone(),
            code: self.code.clone(),
            value: self.value.clone(),
            exclude: self.exclude,
            period: self.period.clone(),
        }
    }
}

impl Visitable for GroupCharacteristic {
    fn type_name(&self) -> &'static str {
        "Group.Characteristic"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.code.is_some()
            || self.value.is_some()
            || self.exclude.is_some()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.code.as_ref(), "code", visitor);
            visitor::accept_choice(self.value.as_ref(), "value", visitor);
            visitor::accept_bool(self.exclude, "exclude", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for GroupCharacteristic {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.code, "code");
        ctx.require_choice(&self.value, "value", CHARACTERISTIC_VALUE_CHOICE);
        ctx.require(&self.exclude, "exclude");
        ctx.validate_child(self.code.as_ref(), "code");
        ctx.validate_choice_child(&self.value, "value");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`GroupCharacteristic`].
#[derive(Debug, Clone, Default)]
pub struct GroupCharacteristicBuilder {
    backbone: BackboneElement,
    code: Option<CodeableConcept>,
    value: Option<ChoiceValue>,
    exclude: Option<bool>,
    period: Option<Period>,
}

backbone_builder_accessors!(GroupCharacteristicBuilder);

impl GroupCharacteristicBuilder {
    pub fn with_code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_exclude(mut self, exclude: bool) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> GroupCharacteristic {
        GroupCharacteristic {
            backbone: self.backbone,
            code: self.code,
            value: self.value,
            exclude: self.exclude,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<GroupCharacteristic, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> GroupCharacteristic {
        self.assemble()
    }
}

/// One entity enrolled in the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub(crate) backbone: BackboneElement,
    pub(crate) entity: Option<Reference>,
    pub(crate) period: Option<Period>,
    pub(crate) inactive: Option<bool>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(GroupMember);
memoized_value_hash!(GroupMember { backbone, entity, period, inactive });

impl GroupMember {
    pub fn builder() -> GroupMemberBuilder {
        GroupMemberBuilder::default()
    }

    /// Who or what is in the group. Required.
    pub fn entity(&self) -> Option<&Reference> {
        self.entity.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn inactive(&self) -> Option<bool> {
        self.inactive
    }

    pub fn to_builder(&self) -> GroupMemberBuilder {
        GroupMemberBuilder {
            backbone: self.backbone.clone(),
            entity: self.entity.clone(),
            period: self.period.clone(),
            inactive: self.inactive,
        }
    }
}

impl Visitable for GroupMember {
    fn type_name(&self) -> &'static str {
        "Group.Member"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.entity.is_some()
            || self.period.is_some()
            || self.inactive.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.entity.as_ref(), "entity", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
            visitor::accept_bool(self.inactive, "inactive", visitor);
        });
    }
}

impl Validate for GroupMember {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.entity, "entity");
        ctx.check_reference(self.entity.as_ref(), "entity", MEMBER_ENTITY_TARGETS);
        ctx.validate_child(self.entity.as_ref(), "entity");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`GroupMember`].
#[derive(Debug, Clone, Default)]
pub struct GroupMemberBuilder {
    backbone: BackboneElement,
    entity: Option<Reference>,
    period: Option<Period>,
    inactive: Option<bool>,
}

backbone_builder_accessors!(GroupMemberBuilder);

impl GroupMemberBuilder {
    pub fn with_entity(mut self, entity: Reference) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_inactive(mut self, inactive: bool) -> Self {
        self.inactive = Some(inactive);
        self
    }

    fn assemble(self) -> GroupMember {
        GroupMember {
            backbone: self.backbone,
            entity: self.entity,
            period: self.period,
            inactive: self.inactive,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<GroupMember, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> GroupMember {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::validation::IssueKind;

    #[test]
    fn minimal_group_builds() {
        let group = Group::builder()
            .with_type(GroupType::Person)
            .with_membership("enumerated")
            .build()
            .unwrap();
        assert_eq!(group.membership(), Some("enumerated"));
    }

    #[test]
    fn membership_outside_the_value_set_is_rejected() {
        let err = Group::builder()
            .with_type(GroupType::Person)
            .with_membership("conceptual")
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
        assert_eq!(err.issues()[0].path, "Group.membership");
    }

    #[test]
    fn empty_characteristic_reports_every_missing_field() {
        let err = GroupCharacteristic::builder()
            .with_period(
                Period::builder()
                    .with_start("2024-01-01T00:00:00Z".parse().unwrap())
                    .build_unvalidated(),
            )
            .build()
            .unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "Group.Characteristic.code",
                "Group.Characteristic.value",
                "Group.Characteristic.exclude",
            ]
        );
    }

    #[test]
    fn member_entity_kind_is_checked() {
        let group = Group::builder()
            .with_type(GroupType::Person)
            .with_membership("enumerated")
            .add_member(
                GroupMember::builder()
                    .with_entity(
                        Reference::builder()
                            .with_reference("Endpoint/e1")
                            .build_unvalidated(),
                    )
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = group.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(issues[0].path, "Group.member[0].entity");
    }
}
