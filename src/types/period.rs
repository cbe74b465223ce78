//! Time-related datatypes: [`Period`] and [`Timing`].

use chrono::{DateTime, FixedOffset, NaiveTime};
use rust_decimal::Decimal;

use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::types::codes::{DaysOfWeek, EventTiming, UnitsOfTime};
use crate::types::coding::CodeableConcept;
use crate::types::element::{
    BackboneElement, Element, HashCell, backbone_accessors, backbone_builder_accessors,
    element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

/// A start/end interval. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub(crate) element: Element,
    pub(crate) start: Option<DateTime<FixedOffset>>,
    pub(crate) end: Option<DateTime<FixedOffset>>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Period);
memoized_value_hash!(Period { element, start, end });

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        self.end
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            element: self.element.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

impl Visitable for Period {
    fn type_name(&self) -> &'static str {
        "Period"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.start.is_some() || self.end.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_date_time(self.start, "start", visitor);
            visitor::accept_date_time(self.end, "end", visitor);
        });
    }
}

impl Validate for Period {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Period`].
#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    element: Element,
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
}

element_builder_accessors!(PeriodBuilder);

impl PeriodBuilder {
    pub fn with_start(mut self, start: DateTime<FixedOffset>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<FixedOffset>) -> Self {
        self.end = Some(end);
        self
    }

    fn assemble(self) -> Period {
        Period {
            element: self.element,
            start: self.start,
            end: self.end,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Period, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Period {
        self.assemble()
    }
}

const BOUNDS_CHOICE: &[FhirType] = &[FhirType::Duration, FhirType::Range, FhirType::Period];

/// A schedule: explicit event times, a repeat pattern, or a named code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub(crate) backbone: BackboneElement,
    pub(crate) event: Vec<DateTime<FixedOffset>>,
    pub(crate) repeat: Option<Box<TimingRepeat>>,
    pub(crate) code: Option<CodeableConcept>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(Timing);
memoized_value_hash!(Timing { backbone, event, repeat, code });

impl Timing {
    pub fn builder() -> TimingBuilder {
        TimingBuilder::default()
    }

    pub fn event(&self) -> &[DateTime<FixedOffset>] {
        &self.event
    }

    pub fn repeat(&self) -> Option<&TimingRepeat> {
        self.repeat.as_deref()
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn to_builder(&self) -> TimingBuilder {
        TimingBuilder {
            backbone: self.backbone.clone(),
            event: self.event.clone(),
            repeat: self.repeat.clone(),
            code: self.code.clone(),
        }
    }
}

impl Visitable for Timing {
    fn type_name(&self) -> &'static str {
        "Timing"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || !self.event.is_empty()
            || self.repeat.is_some()
            || self.code.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_date_times(&self.event, "event", visitor);
            visitor::accept_node(self.repeat.as_deref(), "repeat", visitor);
            visitor::accept_node(self.code.as_ref(), "code", visitor);
        });
    }
}

impl Validate for Timing {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.validate_child(self.repeat.as_deref(), "repeat");
        ctx.validate_child(self.code.as_ref(), "code");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Timing`].
#[derive(Debug, Clone, Default)]
pub struct TimingBuilder {
    backbone: BackboneElement,
    event: Vec<DateTime<FixedOffset>>,
    repeat: Option<Box<TimingRepeat>>,
    code: Option<CodeableConcept>,
}

backbone_builder_accessors!(TimingBuilder);

impl TimingBuilder {
    pub fn add_event(mut self, event: DateTime<FixedOffset>) -> Self {
        self.event.push(event);
        self
    }

    pub fn with_event(mut self, event: Vec<DateTime<FixedOffset>>) -> Self {
        self.event = event;
        self
    }

    pub fn with_repeat(mut self, repeat: TimingRepeat) -> Self {
        self.repeat = Some(Box::new(repeat));
        self
    }

    pub fn with_code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    fn assemble(self) -> Timing {
        Timing {
            backbone: self.backbone,
            event: self.event,
            repeat: self.repeat,
            code: self.code,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Timing, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Timing {
        self.assemble()
    }
}

/// The repeating part of a [`Timing`].
///
/// Bounds may be a Duration, a Range or a Period; everything else is a flat
/// set of optional knobs mirroring the FHIR repeat backbone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRepeat {
    pub(crate) element: Element,
    pub(crate) bounds: Option<ChoiceValue>,
    pub(crate) count: Option<u32>,
    pub(crate) count_max: Option<u32>,
    pub(crate) duration: Option<Decimal>,
    pub(crate) duration_max: Option<Decimal>,
    pub(crate) duration_unit: Option<UnitsOfTime>,
    pub(crate) frequency: Option<u32>,
    pub(crate) frequency_max: Option<u32>,
    pub(crate) period: Option<Decimal>,
    pub(crate) period_max: Option<Decimal>,
    pub(crate) period_unit: Option<UnitsOfTime>,
    pub(crate) day_of_week: Vec<DaysOfWeek>,
    pub(crate) time_of_day: Vec<NaiveTime>,
    pub(crate) when: Vec<EventTiming>,
    pub(crate) offset: Option<u32>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(TimingRepeat);
memoized_value_hash!(TimingRepeat {
    element,
    bounds,
    count,
    count_max,
    duration,
    duration_max,
    duration_unit,
    frequency,
    frequency_max,
    period,
    period_max,
    period_unit,
    day_of_week,
    time_of_day,
    when,
    offset,
});

impl TimingRepeat {
    pub fn builder() -> TimingRepeatBuilder {
        TimingRepeatBuilder::default()
    }

    pub fn bounds(&self) -> Option<&ChoiceValue> {
        self.bounds.as_ref()
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn count_max(&self) -> Option<u32> {
        self.count_max
    }

    pub fn duration(&self) -> Option<Decimal> {
        self.duration
    }

    pub fn duration_max(&self) -> Option<Decimal> {
        self.duration_max
    }

    pub fn duration_unit(&self) -> Option<UnitsOfTime> {
        self.duration_unit
    }

    pub fn frequency(&self) -> Option<u32> {
        self.frequency
    }

    pub fn frequency_max(&self) -> Option<u32> {
        self.frequency_max
    }

    pub fn period(&self) -> Option<Decimal> {
        self.period
    }

    pub fn period_max(&self) -> Option<Decimal> {
        self.period_max
    }

    pub fn period_unit(&self) -> Option<UnitsOfTime> {
        self.period_unit
    }

    pub fn day_of_week(&self) -> &[DaysOfWeek] {
        &self.day_of_week
    }

    pub fn time_of_day(&self) -> &[NaiveTime] {
        &self.time_of_day
    }

    pub fn when(&self) -> &[EventTiming] {
        &self.when
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub fn to_builder(&self) -> TimingRepeatBuilder {
        TimingRepeatBuilder {
            element: self.element.clone(),
            bounds: self.bounds.clone(),
            count: self.count,
            count_max: self.count_max,
            duration: self.duration,
            duration_max: self.duration_max,
            duration_unit: self.duration_unit,
            frequency: self.frequency,
            frequency_max: self.frequency_max,
            period: self.period,
            period_max: self.period_max,
            period_unit: self.period_unit,
            day_of_week: self.day_of_week.clone(),
            time_of_day: self.time_of_day.clone(),
            when: self.when.clone(),
            offset: self.offset,
        }
    }
}

impl Visitable for TimingRepeat {
    fn type_name(&self) -> &'static str {
        "Timing.Repeat"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.bounds.is_some()
            || self.count.is_some()
            || self.count_max.is_some()
            || self.duration.is_some()
            || self.duration_max.is_some()
            || self.duration_unit.is_some()
            || self.frequency.is_some()
            || self.frequency_max.is_some()
            || self.period.is_some()
            || self.period_max.is_some()
            || self.period_unit.is_some()
            || !self.day_of_week.is_empty()
            || !self.time_of_day.is_empty()
            || !self.when.is_empty()
            || self.offset.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_choice(self.bounds.as_ref(), "bounds", visitor);
            visitor::accept_int(self.count.map(i64::from), "count", visitor);
            visitor::accept_int(self.count_max.map(i64::from), "countMax", visitor);
            visitor::accept_decimal(self.duration, "duration", visitor);
            visitor::accept_decimal(self.duration_max, "durationMax", visitor);
            visitor::accept_code(self.duration_unit.as_ref(), "durationUnit", visitor);
            visitor::accept_int(self.frequency.map(i64::from), "frequency", visitor);
            visitor::accept_int(self.frequency_max.map(i64::from), "frequencyMax", visitor);
            visitor::accept_decimal(self.period, "period", visitor);
            visitor::accept_decimal(self.period_max, "periodMax", visitor);
            visitor::accept_code(self.period_unit.as_ref(), "periodUnit", visitor);
            visitor::accept_codes(&self.day_of_week, "dayOfWeek", visitor);
            visitor::accept_times(&self.time_of_day, "timeOfDay", visitor);
            visitor::accept_codes(&self.when, "when", visitor);
            visitor::accept_int(self.offset.map(i64::from), "offset", visitor);
        });
    }
}

impl Validate for TimingRepeat {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.check_choice(&self.bounds, "bounds", BOUNDS_CHOICE);
        ctx.validate_choice_child(&self.bounds, "bounds");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`TimingRepeat`].
#[derive(Debug, Clone, Default)]
pub struct TimingRepeatBuilder {
    element: Element,
    bounds: Option<ChoiceValue>,
    count: Option<u32>,
    count_max: Option<u32>,
    duration: Option<Decimal>,
    duration_max: Option<Decimal>,
    duration_unit: Option<UnitsOfTime>,
    frequency: Option<u32>,
    frequency_max: Option<u32>,
    period: Option<Decimal>,
    period_max: Option<Decimal>,
    period_unit: Option<UnitsOfTime>,
    day_of_week: Vec<DaysOfWeek>,
    time_of_day: Vec<NaiveTime>,
    when: Vec<EventTiming>,
    offset: Option<u32>,
}

element_builder_accessors!(TimingRepeatBuilder);

impl TimingRepeatBuilder {
    pub fn with_bounds(mut self, bounds: impl Into<ChoiceValue>) -> Self {
        self.bounds = Some(bounds.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_count_max(mut self, count_max: u32) -> Self {
        self.count_max = Some(count_max);
        self
    }

    pub fn with_duration(mut self, duration: Decimal) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_duration_max(mut self, duration_max: Decimal) -> Self {
        self.duration_max = Some(duration_max);
        self
    }

    pub fn with_duration_unit(mut self, duration_unit: UnitsOfTime) -> Self {
        self.duration_unit = Some(duration_unit);
        self
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_frequency_max(mut self, frequency_max: u32) -> Self {
        self.frequency_max = Some(frequency_max);
        self
    }

    pub fn with_period(mut self, period: Decimal) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_period_max(mut self, period_max: Decimal) -> Self {
        self.period_max = Some(period_max);
        self
    }

    pub fn with_period_unit(mut self, period_unit: UnitsOfTime) -> Self {
        self.period_unit = Some(period_unit);
        self
    }

    pub fn add_day_of_week(mut self, day: DaysOfWeek) -> Self {
        self.day_of_week.push(day);
        self
    }

    pub fn with_day_of_week(mut self, day_of_week: Vec<DaysOfWeek>) -> Self {
        self.day_of_week = day_of_week;
        self
    }

    pub fn add_time_of_day(mut self, time: NaiveTime) -> Self {
        self.time_of_day.push(time);
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: Vec<NaiveTime>) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    pub fn add_when(mut self, when: EventTiming) -> Self {
        self.when.push(when);
        self
    }

    pub fn with_when(mut self, when: Vec<EventTiming>) -> Self {
        self.when = when;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    fn assemble(self) -> TimingRepeat {
        TimingRepeat {
            element: self.element,
            bounds: self.bounds,
            count: self.count,
            count_max: self.count_max,
            duration: self.duration,
            duration_max: self.duration_max,
            duration_unit: self.duration_unit,
            frequency: self.frequency,
            frequency_max: self.frequency_max,
            period: self.period,
            period_max: self.period_max,
            period_unit: self.period_unit,
            day_of_week: self.day_of_week,
            time_of_day: self.time_of_day,
            when: self.when,
            offset: self.offset,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<TimingRepeat, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> TimingRepeat {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::quantity::Quantity;
    use crate::validation::IssueKind;
    use rust_decimal_macros::dec;

    #[test]
    fn repeat_accepts_duration_bounds() {
        let bounds = ChoiceValue::Duration(
            Quantity::builder()
                .with_value(dec!(2))
                .with_code("wk")
                .build_unvalidated(),
        );
        let repeat = TimingRepeat::builder()
            .with_bounds(bounds)
            .with_frequency(3)
            .with_period(dec!(1))
            .with_period_unit(UnitsOfTime::Day)
            .build()
            .unwrap();
        assert_eq!(repeat.frequency(), Some(3));
    }

    #[test]
    fn repeat_rejects_string_bounds() {
        let err = TimingRepeat::builder()
            .with_bounds(ChoiceValue::from("two weeks"))
            .build()
            .unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidChoiceType);
        assert_eq!(err.issues()[0].path, "Timing.Repeat.bounds");
    }
}
