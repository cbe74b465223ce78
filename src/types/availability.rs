//! Service availability and virtual-service contact details.

use chrono::NaiveTime;

use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::types::codes::DaysOfWeek;
use crate::types::coding::Coding;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::types::period::Period;
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const ADDRESS_CHOICE: &[FhirType] = &[
    FhirType::Url,
    FhirType::String,
    FhirType::ContactPoint,
    FhirType::ExtendedContactDetail,
];

/// Weekly availability of a service or location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub(crate) element: Element,
    pub(crate) available_time: Vec<AvailableTime>,
    pub(crate) not_available_time: Vec<NotAvailableTime>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Availability);
memoized_value_hash!(Availability { element, available_time, not_available_time });

impl Availability {
    pub fn builder() -> AvailabilityBuilder {
        AvailabilityBuilder::default()
    }

    pub fn available_time(&self) -> &[AvailableTime] {
        &self.available_time
    }

    pub fn not_available_time(&self) -> &[NotAvailableTime] {
        &self.not_available_time
    }

    pub fn to_builder(&self) -> AvailabilityBuilder {
        AvailabilityBuilder {
            element: self.element.clone(),
            available_time: self.available_time.clone(),
            not_available_time: self.not_available_time.clone(),
        }
    }
}

impl Visitable for Availability {
    fn type_name(&self) -> &'static str {
        "Availability"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || !self.available_time.is_empty()
            || !self.not_available_time.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_nodes(&self.available_time, "availableTime", visitor);
            visitor::accept_nodes(&self.not_available_time, "notAvailableTime", visitor);
        });
    }
}

impl Validate for Availability {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_children(&self.available_time, "availableTime");
        ctx.validate_children(&self.not_available_time, "notAvailableTime");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Availability`].
#[derive(Debug, Clone, Default)]
pub struct AvailabilityBuilder {
    element: Element,
    available_time: Vec<AvailableTime>,
    not_available_time: Vec<NotAvailableTime>,
}

element_builder_accessors!(AvailabilityBuilder);

impl AvailabilityBuilder {
    pub fn add_available_time(mut self, available_time: AvailableTime) -> Self {
        self.available_time.push(available_time);
        self
    }

    pub fn with_available_time(mut self, available_time: Vec<AvailableTime>) -> Self {
        self.available_time = available_time;
        self
    }

    pub fn add_not_available_time(mut self, not_available_time: NotAvailableTime) -> Self {
        self.not_available_time.push(not_available_time);
        self
    }

    pub fn with_not_available_time(mut self, not_available_time: Vec<NotAvailableTime>) -> Self {
        self.not_available_time = not_available_time;
        self
    }

    fn assemble(self) -> Availability {
        Availability {
            element: self.element,
            available_time: self.available_time,
            not_available_time: self.not_available_time,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Availability, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Availability {
        self.assemble()
    }
}

/// One recurring open window within an [`Availability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTime {
    pub(crate) element: Element,
    pub(crate) days_of_week: Vec<DaysOfWeek>,
    pub(crate) all_day: Option<bool>,
    pub(crate) available_start_time: Option<NaiveTime>,
    pub(crate) available_end_time: Option<NaiveTime>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(AvailableTime);
memoized_value_hash!(AvailableTime {
    element,
    days_of_week,
    all_day,
    available_start_time,
    available_end_time,
});

impl AvailableTime {
    pub fn builder() -> AvailableTimeBuilder {
        AvailableTimeBuilder::default()
    }

    pub fn days_of_week(&self) -> &[DaysOfWeek] {
        &self.days_of_week
    }

    pub fn all_day(&self) -> Option<bool> {
        self.all_day
    }

    pub fn available_start_time(&self) -> Option<NaiveTime> {
        self.available_start_time
    }

    pub fn available_end_time(&self) -> Option<NaiveTime> {
        self.available_end_time
    }

    pub fn to_builder(&self) -> AvailableTimeBuilder {
        AvailableTimeBuilder {
            element: self.element.clone(),
            days_of_week: self.days_of_week.clone(),
            all_day: self.all_day,
            available_start_time: self.available_start_time,
            available_end_time: self.available_end_time,
        }
    }
}

impl Visitable for AvailableTime {
    fn type_name(&self) -> &'static str {
        "Availability.AvailableTime"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || !self.days_of_week.is_empty()
            || self.all_day.is_some()
            || self.available_start_time.is_some()
            || self.available_end_time.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_codes(&self.days_of_week, "daysOfWeek", visitor);
            visitor::accept_bool(self.all_day, "allDay", visitor);
            visitor::accept_time(self.available_start_time, "availableStartTime", visitor);
            visitor::accept_time(self.available_end_time, "availableEndTime", visitor);
        });
    }
}

impl Validate for AvailableTime {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`AvailableTime`].
#[derive(Debug, Clone, Default)]
pub struct AvailableTimeBuilder {
    element: Element,
    days_of_week: Vec<DaysOfWeek>,
    all_day: Option<bool>,
    available_start_time: Option<NaiveTime>,
    available_end_time: Option<NaiveTime>,
}

element_builder_accessors!(AvailableTimeBuilder);

impl AvailableTimeBuilder {
    pub fn add_day_of_week(mut self, day: DaysOfWeek) -> Self {
        self.days_of_week.push(day);
        self
    }

    pub fn with_days_of_week(mut self, days_of_week: Vec<DaysOfWeek>) -> Self {
        self.days_of_week = days_of_week;
        self
    }

    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = Some(all_day);
        self
    }

    pub fn with_available_start_time(mut self, time: NaiveTime) -> Self {
        self.available_start_time = Some(time);
        self
    }

    pub fn with_available_end_time(mut self, time: NaiveTime) -> Self {
        self.available_end_time = Some(time);
        self
    }

    fn assemble(self) -> AvailableTime {
        AvailableTime {
            element: self.element,
            days_of_week: self.days_of_week,
            all_day: self.all_day,
            available_start_time: self.available_start_time,
            available_end_time: self.available_end_time,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<AvailableTime, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> AvailableTime {
        self.assemble()
    }
}

/// One announced closure within an [`Availability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAvailableTime {
    pub(crate) element: Element,
    pub(crate) description: Option<String>,
    pub(crate) during: Option<Period>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(NotAvailableTime);
memoized_value_hash!(NotAvailableTime { element, description, during });

impl NotAvailableTime {
    pub fn builder() -> NotAvailableTimeBuilder {
        NotAvailableTimeBuilder::default()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn during(&self) -> Option<&Period> {
        self.during.as_ref()
    }

    pub fn to_builder(&self) -> NotAvailableTimeBuilder {
        NotAvailableTimeBuilder {
            element: self.element.clone(),
            description: self.description.clone(),
            during: self.during.clone(),
        }
    }
}

impl Visitable for NotAvailableTime {
    fn type_name(&self) -> &'static str {
        "Availability.NotAvailableTime"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.description.is_some() || self.during.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_str(self.description(), "description", visitor);
            visitor::accept_node(self.during.as_ref(), "during", visitor);
        });
    }
}

impl Validate for NotAvailableTime {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.during.as_ref(), "during");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`NotAvailableTime`].
#[derive(Debug, Clone, Default)]
pub struct NotAvailableTimeBuilder {
    element: Element,
    description: Option<String>,
    during: Option<Period>,
}

element_builder_accessors!(NotAvailableTimeBuilder);

impl NotAvailableTimeBuilder {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_during(mut self, during: Period) -> Self {
        self.during = Some(during);
        self
    }

    fn assemble(self) -> NotAvailableTime {
        NotAvailableTime {
            element: self.element,
            description: self.description,
            during: self.during,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<NotAvailableTime, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> NotAvailableTime {
        self.assemble()
    }
}

/// How to reach a virtual service: a channel type plus an address that may
/// take several shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualServiceDetail {
    pub(crate) element: Element,
    pub(crate) channel_type: Option<Coding>,
    pub(crate) address: Option<ChoiceValue>,
    pub(crate) additional_info: Vec<String>,
    pub(crate) max_participants: Option<u32>,
    pub(crate) session_key: Option<String>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(VirtualServiceDetail);
memoized_value_hash!(VirtualServiceDetail {
    element,
    channel_type,
    address,
    additional_info,
    max_participants,
    session_key,
});

impl VirtualServiceDetail {
    pub fn builder() -> VirtualServiceDetailBuilder {
        VirtualServiceDetailBuilder::default()
    }

    pub fn channel_type(&self) -> Option<&Coding> {
        self.channel_type.as_ref()
    }

    pub fn address(&self) -> Option<&ChoiceValue> {
        self.address.as_ref()
    }

    pub fn additional_info(&self) -> &[String] {
        &self.additional_info
    }

    pub fn max_participants(&self) -> Option<u32> {
        self.max_participants
    }

    pub fn session_key(&self) -> Option<&str> {
        self.session_key.as_deref()
    }

    pub fn to_builder(&self) -> VirtualServiceDetailBuilder {
        VirtualServiceDetailBuilder {
            element: self.element.clone(),
            channel_type: self.channel_type.clone(),
            address: self.address.clone(),
            additional_info: self.additional_info.clone(),
            max_participants: self.max_participants,
            session_key: self.session_key.clone(),
        }
    }
}

impl Visitable for VirtualServiceDetail {
    fn type_name(&self) -> &'static str {
        "VirtualServiceDetail"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.channel_type.is_some()
            || self.address.is_some()
            || !self.additional_info.is_empty()
            || self.max_participants.is_some()
            || self.session_key.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_node(self.channel_type.as_ref(), "channelType", visitor);
            visitor::accept_choice(self.address.as_ref(), "address", visitor);
            visitor::accept_strs(&self.additional_info, "additionalInfo", visitor);
            visitor::accept_int(self.max_participants.map(i64::from), "maxParticipants", visitor);
            visitor::accept_str(self.session_key(), "sessionKey", visitor);
        });
    }
}

impl Validate for VirtualServiceDetail {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.check_choice(&self.address, "address", ADDRESS_CHOICE);
        ctx.validate_child(self.channel_type.as_ref(), "channelType");
        ctx.validate_choice_child(&self.address, "address");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`VirtualServiceDetail`].
#[derive(Debug, Clone, Default)]
pub struct VirtualServiceDetailBuilder {
    element: Element,
    channel_type: Option<Coding>,
    address: Option<ChoiceValue>,
    additional_info: Vec<String>,
    max_participants: Option<u32>,
    session_key: Option<String>,
}

element_builder_accessors!(VirtualServiceDetailBuilder);

impl VirtualServiceDetailBuilder {
    pub fn with_channel_type(mut self, channel_type: Coding) -> Self {
        self.channel_type = Some(channel_type);
        self
    }

    pub fn with_address(mut self, address: impl Into<ChoiceValue>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn add_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info.push(info.into());
        self
    }

    pub fn with_additional_info(mut self, additional_info: Vec<String>) -> Self {
        self.additional_info = additional_info;
        self
    }

    pub fn with_max_participants(mut self, max_participants: u32) -> Self {
        self.max_participants = Some(max_participants);
        self
    }

    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    fn assemble(self) -> VirtualServiceDetail {
        VirtualServiceDetail {
            element: self.element,
            channel_type: self.channel_type,
            address: self.address,
            additional_info: self.additional_info,
            max_participants: self.max_participants,
            session_key: self.session_key,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<VirtualServiceDetail, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> VirtualServiceDetail {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    #[test]
    fn weekday_window_builds() {
        let window = AvailableTime::builder()
            .add_day_of_week(DaysOfWeek::Mon)
            .add_day_of_week(DaysOfWeek::Wed)
            .with_available_start_time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
            .with_available_end_time(NaiveTime::from_hms_opt(17, 0, 0).unwrap())
            .build()
            .unwrap();
        assert_eq!(window.days_of_week().len(), 2);
    }

    #[test]
    fn virtual_service_address_shape_is_checked() {
        let err = VirtualServiceDetail::builder()
            .with_address(ChoiceValue::Boolean(true))
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidChoiceType);
    }

    #[test]
    fn virtual_service_accepts_url_address() {
        let detail = VirtualServiceDetail::builder()
            .with_address(ChoiceValue::Url("https://meet.example.org/room-1".into()))
            .with_max_participants(8)
            .build()
            .unwrap();
        assert_eq!(detail.max_participants(), Some(8));
    }
}
