//! Contact details: [`ContactPoint`], [`HumanName`], [`Address`] and
//! [`ExtendedContactDetail`].

use crate::error::BuildError;
use crate::types::codes::{
    AddressType, AddressUse, ContactPointSystem, ContactPointUse, NameUse,
};
use crate::types::coding::CodeableConcept;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::types::identifier::Reference;
use crate::types::period::Period;
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const ORGANIZATION_TARGETS: &[&str] = &["Organization"];

/// Technology-mediated contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPoint {
    pub(crate) element: Element,
    pub(crate) system: Option<ContactPointSystem>,
    pub(crate) value: Option<String>,
    pub(crate) r#use: Option<ContactPointUse>,
    pub(crate) rank: Option<u32>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(ContactPoint);
memoized_value_hash!(ContactPoint { element, system, value, r#use, rank, period });

impl ContactPoint {
    pub fn builder() -> ContactPointBuilder {
        ContactPointBuilder::default()
    }

    pub fn system(&self) -> Option<ContactPointSystem> {
        self.system
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn r#use(&self) -> Option<ContactPointUse> {
        self.r#use
    }

    /// Preference order, lower ranks first.
    pub fn rank(&self) -> Option<u32> {
        self.rank
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> ContactPointBuilder {
        ContactPointBuilder {
            element: self.element.clone(),
            system: self.system,
            value: self.value.clone(),
            r#use: self.r#use,
            rank: self.rank,
            period: self.period.clone(),
        }
    }
}

impl Visitable for ContactPoint {
    fn type_name(&self) -> &'static str {
        "ContactPoint"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.system.is_some()
            || self.value.is_some()
            || self.r#use.is_some()
            || self.rank.is_some()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_code(self.system.as_ref(), "system", visitor);
            visitor::accept_str(self.value(), "value", visitor);
            visitor::accept_code(self.r#use.as_ref(), "use", visitor);
            visitor::accept_int(self.rank.map(i64::from), "rank", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for ContactPoint {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`ContactPoint`].
#[derive(Debug, Clone, Default)]
pub struct ContactPointBuilder {
    element: Element,
    system: Option<ContactPointSystem>,
    value: Option<String>,
    r#use: Option<ContactPointUse>,
    rank: Option<u32>,
    period: Option<Period>,
}

element_builder_accessors!(ContactPointBuilder);

impl ContactPointBuilder {
    pub fn with_system(mut self, system: ContactPointSystem) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_use(mut self, r#use: ContactPointUse) -> Self {
        self.r#use = Some(r#use);
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> ContactPoint {
        ContactPoint {
            element: self.element,
            system: self.system,
            value: self.value,
            r#use: self.r#use,
            rank: self.rank,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<ContactPoint, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> ContactPoint {
        self.assemble()
    }
}

/// A human name, decomposed or as free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanName {
    pub(crate) element: Element,
    pub(crate) r#use: Option<NameUse>,
    pub(crate) text: Option<String>,
    pub(crate) family: Option<String>,
    pub(crate) given: Vec<String>,
    pub(crate) prefix: Vec<String>,
    pub(crate) suffix: Vec<String>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(HumanName);
memoized_value_hash!(HumanName { element, r#use, text, family, given, prefix, suffix, period });

impl HumanName {
    pub fn builder() -> HumanNameBuilder {
        HumanNameBuilder::default()
    }

    pub fn r#use(&self) -> Option<NameUse> {
        self.r#use
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Given names, in order.
    pub fn given(&self) -> &[String] {
        &self.given
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    pub fn suffix(&self) -> &[String] {
        &self.suffix
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> HumanNameBuilder {
        HumanNameBuilder {
            element: self.element.clone(),
            r#use: self.r#use,
            text: self.text.clone(),
            family: self.family.clone(),
            given: self.given.clone(),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            period: self.period.clone(),
        }
    }
}

impl Visitable for HumanName {
    fn type_name(&self) -> &'static str {
        "HumanName"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.r#use.is_some()
            || self.text.is_some()
            || self.family.is_some()
            || !self.given.is_empty()
            || !self.prefix.is_empty()
            || !self.suffix.is_empty()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_code(self.r#use.as_ref(), "use", visitor);
            visitor::accept_str(self.text(), "text", visitor);
            visitor::accept_str(self.family(), "family", visitor);
            visitor::accept_strs(&self.given, "given", visitor);
            visitor::accept_strs(&self.prefix, "prefix", visitor);
            visitor::accept_strs(&self.suffix, "suffix", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for HumanName {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`HumanName`].
#[derive(Debug, Clone, Default)]
pub struct HumanNameBuilder {
    element: Element,
    r#use: Option<NameUse>,
    text: Option<String>,
    family: Option<String>,
    given: Vec<String>,
    prefix: Vec<String>,
    suffix: Vec<String>,
    period: Option<Period>,
}

element_builder_accessors!(HumanNameBuilder);

impl HumanNameBuilder {
    pub fn with_use(mut self, r#use: NameUse) -> Self {
        self.r#use = Some(r#use);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn add_given(mut self, given: impl Into<String>) -> Self {
        self.given.push(given.into());
        self
    }

    pub fn with_given(mut self, given: Vec<String>) -> Self {
        self.given = given;
        self
    }

    pub fn add_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix.push(prefix.into());
        self
    }

    pub fn with_prefix(mut self, prefix: Vec<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn add_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix.push(suffix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: Vec<String>) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> HumanName {
        HumanName {
            element: self.element,
            r#use: self.r#use,
            text: self.text,
            family: self.family,
            given: self.given,
            prefix: self.prefix,
            suffix: self.suffix,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<HumanName, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> HumanName {
        self.assemble()
    }
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub(crate) element: Element,
    pub(crate) r#use: Option<AddressUse>,
    pub(crate) r#type: Option<AddressType>,
    pub(crate) text: Option<String>,
    pub(crate) line: Vec<String>,
    pub(crate) city: Option<String>,
    pub(crate) district: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) postal_code: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Address);
memoized_value_hash!(Address {
    element,
    r#use,
    r#type,
    text,
    line,
    city,
    district,
    state,
    postal_code,
    country,
    period,
});

impl Address {
    pub fn builder() -> AddressBuilder {
        AddressBuilder::default()
    }

    pub fn r#use(&self) -> Option<AddressUse> {
        self.r#use
    }

    pub fn r#type(&self) -> Option<AddressType> {
        self.r#type
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn line(&self) -> &[String] {
        &self.line
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> AddressBuilder {
        AddressBuilder {
            element: self.element.clone(),
            r#use: self.r#use,
            r#type: self.r#type,
            text: self.text.clone(),
            line: self.line.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            period: self.period.clone(),
        }
    }
}

impl Visitable for Address {
    fn type_name(&self) -> &'static str {
        "Address"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.r#use.is_some()
            || self.r#type.is_some()
            || self.text.is_some()
            || !self.line.is_empty()
            || self.city.is_some()
            || self.district.is_some()
            || self.state.is_some()
            || self.postal_code.is_some()
            || self.country.is_some()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_code(self.r#use.as_ref(), "use", visitor);
            visitor::accept_code(self.r#type.as_ref(), "type", visitor);
            visitor::accept_str(self.text(), "text", visitor);
            visitor::accept_strs(&self.line, "line", visitor);
            visitor::accept_str(self.city(), "city", visitor);
            visitor::accept_str(self.district(), "district", visitor);
            visitor::accept_str(self.state(), "state", visitor);
            visitor::accept_str(self.postal_code(), "postalCode", visitor);
            visitor::accept_str(self.country(), "country", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for Address {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Address`].
#[derive(Debug, Clone, Default)]
pub struct AddressBuilder {
    element: Element,
    r#use: Option<AddressUse>,
    r#type: Option<AddressType>,
    text: Option<String>,
    line: Vec<String>,
    city: Option<String>,
    district: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    period: Option<Period>,
}

element_builder_accessors!(AddressBuilder);

impl AddressBuilder {
    pub fn with_use(mut self, r#use: AddressUse) -> Self {
        self.r#use = Some(r#use);
        self
    }

    pub fn with_type(mut self, r#type: AddressType) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn add_line(mut self, line: impl Into<String>) -> Self {
        self.line.push(line.into());
        self
    }

    pub fn with_line(mut self, line: Vec<String>) -> Self {
        self.line = line;
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> Address {
        Address {
            element: self.element,
            r#use: self.r#use,
            r#type: self.r#type,
            text: self.text,
            line: self.line,
            city: self.city,
            district: self.district,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Address, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Address {
        self.assemble()
    }
}

/// Contact information with a purpose, usable where a bare telecom list is
/// not enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedContactDetail {
    pub(crate) element: Element,
    pub(crate) purpose: Option<CodeableConcept>,
    pub(crate) name: Vec<HumanName>,
    pub(crate) telecom: Vec<ContactPoint>,
    pub(crate) address: Option<Address>,
    pub(crate) organization: Option<Reference>,
    pub(crate) period: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(ExtendedContactDetail);
memoized_value_hash!(ExtendedContactDetail {
    element,
    purpose,
    name,
    telecom,
    address,
    organization,
    period,
});

impl ExtendedContactDetail {
    pub fn builder() -> ExtendedContactDetailBuilder {
        ExtendedContactDetailBuilder::default()
    }

    pub fn purpose(&self) -> Option<&CodeableConcept> {
        self.purpose.as_ref()
    }

    pub fn name(&self) -> &[HumanName] {
        &self.name
    }

    pub fn telecom(&self) -> &[ContactPoint] {
        &self.telecom
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn organization(&self) -> Option<&Reference> {
        self.organization.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> ExtendedContactDetailBuilder {
        ExtendedContactDetailBuilder {
            element: self.element.clone(),
            purpose: self.purpose.clone(),
            name: self.name.clone(),
            telecom: self.telecom.clone(),
            address: self.address.clone(),
            organization: self.organization.clone(),
            period: self.period.clone(),
        }
    }
}

impl Visitable for ExtendedContactDetail {
    fn type_name(&self) -> &'static str {
        "ExtendedContactDetail"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.purpose.is_some()
            || !self.name.is_empty()
            || !self.telecom.is_empty()
            || self.address.is_some()
            || self.organization.is_some()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_node(self.purpose.as_ref(), "purpose", visitor);
            visitor::accept_nodes(&self.name, "name", visitor);
            visitor::accept_nodes(&self.telecom, "telecom", visitor);
            visitor::accept_node(self.address.as_ref(), "address", visitor);
            visitor::accept_node(self.organization.as_ref(), "organization", visitor);
            visitor::accept_node(self.period.as_ref(), "period", visitor);
        });
    }
}

impl Validate for ExtendedContactDetail {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.check_reference(self.organization.as_ref(), "organization", ORGANIZATION_TARGETS);
        ctx.validate_child(self.purpose.as_ref(), "purpose");
        ctx.validate_children(&self.name, "name");
        ctx.validate_children(&self.telecom, "telecom");
        ctx.validate_child(self.address.as_ref(), "address");
        ctx.validate_child(self.organization.as_ref(), "organization");
        ctx.validate_child(self.period.as_ref(), "period");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`ExtendedContactDetail`].
#[derive(Debug, Clone, Default)]
pub struct ExtendedContactDetailBuilder {
    element: Element,
    purpose: Option<CodeableConcept>,
    name: Vec<HumanName>,
    telecom: Vec<ContactPoint>,
    address: Option<Address>,
    organization: Option<Reference>,
    period: Option<Period>,
}

element_builder_accessors!(ExtendedContactDetailBuilder);

impl ExtendedContactDetailBuilder {
    pub fn with_purpose(mut self, purpose: CodeableConcept) -> Self {
        self.purpose = Some(purpose);
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

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_organization(mut self, organization: Reference) -> Self {
        self.organization = Some(organization);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn assemble(self) -> ExtendedContactDetail {
        ExtendedContactDetail {
            element: self.element,
            purpose: self.purpose,
            name: self.name,
            telecom: self.telecom,
            address: self.address,
            organization: self.organization,
            period: self.period,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<ExtendedContactDetail, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> ExtendedContactDetail {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_name_keeps_given_order() {
        let name = HumanName::builder()
            .with_family("Chalmers")
            .add_given("Peter")
            .add_given("James")
            .build()
            .unwrap();
        assert_eq!(name.given(), ["Peter", "James"]);
    }

    #[test]
    fn contact_point_builds_with_system_and_value() {
        let telecom = ContactPoint::builder()
            .with_system(ContactPointSystem::Phone)
            .with_value("+31 20 123 4567")
            .with_use(ContactPointUse::Work)
            .with_rank(1)
            .build()
            .unwrap();
        assert_eq!(telecom.rank(), Some(1));
    }

    #[test]
    fn extended_contact_checks_organization_kind() {
        let detail = ExtendedContactDetail::builder()
            .with_organization(
                Reference::builder()
                    .with_reference("Location/front-desk")
                    .build_unvalidated(),
            )
            .build_unvalidated();
        let issues = detail.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "ExtendedContactDetail.organization");
    }
}
