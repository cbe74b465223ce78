//! The DeviceMetric resource: a measurement or setting channel reported
//! by a device.

use chrono::{DateTime, Utc};

use crate::binding::CodeBinding;
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::{
    DeviceMetricCalibrationState, DeviceMetricCalibrationType, DeviceMetricCategory,
    DeviceMetricOperationalStatus,
};
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{CodeableConcept, Identifier, Quantity, Reference};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const DEVICE_TARGETS: &[&str] = &["Device"];

/// Display colour for the channel on a multi-parameter monitor.
const COLOR_BINDING: CodeBinding = CodeBinding::required(
    "DeviceMetricColor",
    "http://hl7.org/fhir/ValueSet/metric-color|5.0.0",
    "http://hl7.org/fhir/metric-color",
    &["black", "red", "green", "yellow", "blue", "magenta", "cyan", "white"],
);

/// One channel of a device, with its unit, category and calibrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMetric {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) unit: Option<CodeableConcept>,
    pub(crate) device: Option<Reference>,
    pub(crate) operational_status: Option<DeviceMetricOperationalStatus>,
    pub(crate) color: Option<String>,
    pub(crate) category: Option<DeviceMetricCategory>,
    pub(crate) measurement_frequency: Option<Quantity>,
    pub(crate) calibration: Vec<DeviceMetricCalibration>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(DeviceMetric);
memoized_value_hash!(DeviceMetric {
    resource,
    identifier,
    r#type,
    unit,
    device,
    operational_status,
    color,
    category,
    measurement_frequency,
    calibration,
});

impl DeviceMetric {
    pub fn builder() -> DeviceMetricBuilder {
        DeviceMetricBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// What the channel measures. Required.
    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn unit(&self) -> Option<&CodeableConcept> {
        self.unit.as_ref()
    }

    /// The device the channel belongs to. Required.
    pub fn device(&self) -> Option<&Reference> {
        self.device.as_ref()
    }

    pub fn operational_status(&self) -> Option<DeviceMetricOperationalStatus> {
        self.operational_status
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Kind of channel. Required.
    pub fn category(&self) -> Option<DeviceMetricCategory> {
        self.category
    }

    pub fn measurement_frequency(&self) -> Option<&Quantity> {
        self.measurement_frequency.as_ref()
    }

    pub fn calibration(&self) -> &[DeviceMetricCalibration] {
        &self.calibration
    }

    pub fn to_builder(&self) -> DeviceMetricBuilder {
        DeviceMetricBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            r#type: self.r#type.clone(),
            unit: self.unit.clone(),
            device: self.device.clone(),
            operational_status: self.operational_status,
            color: self.color.clone(),
            category: self.category,
            measurement_frequency: self.measurement_frequency.clone(),
            calibration: self.calibration.clone(),
        }
    }
}

impl Visitable for DeviceMetric {
    fn type_name(&self) -> &'static str {
        "DeviceMetric"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.r#type.is_some()
            || self.unit.is_some()
            || self.device.is_some()
            || self.operational_status.is_some()
            || self.color.is_some()
            || self.category.is_some()
            || self.measurement_frequency.is_some()
            || !self.calibration.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_node(self.r#type.as_ref(), "type", visitor);
            visitor::accept_node(self.unit.as_ref(), "unit", visitor);
            visitor::accept_node(self.device.as_ref(), "device", visitor);
            visitor::accept_code(
                self.operational_status.as_ref(),
                "operationalStatus",
                visitor,
            );
            visitor::accept_str(self.color.as_deref(), "color", visitor);
            visitor::accept_code(self.category.as_ref(), "category", visitor);
            visitor::accept_node(
                self.measurement_frequency.as_ref(),
                "measurementFrequency",
                visitor,
            );
            visitor::accept_nodes(&self.calibration, "calibration", visitor);
        });
    }
}

impl Validate for DeviceMetric {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require(&self.r#type, "type");
        ctx.require(&self.device, "device");
        ctx.check_reference(self.device.as_ref(), "device", DEVICE_TARGETS);
        ctx.check_binding_code(self.color.as_deref(), "color", &COLOR_BINDING);
        ctx.require(&self.category, "category");
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.r#type.as_ref(), "type");
        ctx.validate_child(self.unit.as_ref(), "unit");
        ctx.validate_child(self.device.as_ref(), "device");
        ctx.validate_child(self.measurement_frequency.as_ref(), "measurementFrequency");
        ctx.validate_children(&self.calibration, "calibration");
    }
}

/// Builder for [`DeviceMetric`].
#[derive(Debug, Clone, Default)]
pub struct DeviceMetricBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    r#type: Option<CodeableConcept>,
    unit: Option<CodeableConcept>,
    device: Option<Reference>,
    operational_status: Option<DeviceMetricOperationalStatus>,
    color: Option<String>,
    category: Option<DeviceMetricCategory>,
    measurement_frequency: Option<Quantity>,
    calibration: Vec<DeviceMetricCalibration>,
}

resource_builder_accessors!(DeviceMetricBuilder);

impl DeviceMetricBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_unit(mut self, unit: CodeableConcept) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_device(mut self, device: Reference) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_operational_status(
        mut self,
        operational_status: DeviceMetricOperationalStatus,
    ) -> Self {
        self.operational_status = Some(operational_status);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_category(mut self, category: DeviceMetricCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_measurement_frequency(mut self, measurement_frequency: Quantity) -> Self {
        self.measurement_frequency = Some(measurement_frequency);
        self
    }

    pub fn add_calibration(mut self, calibration: DeviceMetricCalibration) -> Self {
        self.calibration.push(calibration);
        self
    }

    pub fn with_calibration(mut self, calibration: Vec<DeviceMetricCalibration>) -> Self {
        self.calibration = calibration;
        self
    }

    fn assemble(self) -> DeviceMetric {
        DeviceMetric {
            resource: self.resource,
            identifier: self.identifier,
            r#type: self.r#type,
            unit: self.unit,
            device: self.device,
            operational_status: self.operational_status,
            color: self.color,
            category: self.category,
            measurement_frequency: self.measurement_frequency,
            calibration: self.calibration,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DeviceMetric, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DeviceMetric {
        self.assemble()
    }
}

/// A calibration event for the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMetricCalibration {
    pub(crate) backbone: BackboneElement,
    pub(crate) r#type: Option<DeviceMetricCalibrationType>,
    pub(crate) state: Option<DeviceMetricCalibrationState>,
    pub(crate) time: Option<DateTime<Utc>>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(DeviceMetricCalibration);
memoized_value_hash!(DeviceMetricCalibration { backbone, r#type, state, time });

impl DeviceMetricCalibration {
    pub fn builder() -> DeviceMetricCalibrationBuilder {
        DeviceMetricCalibrationBuilder::default()
    }

    pub fn r#type(&self) -> Option<DeviceMetricCalibrationType> {
        self.r#type
    }

    pub fn state(&self) -> Option<DeviceMetricCalibrationState> {
        self.state
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn to_builder(&self) -> DeviceMetricCalibrationBuilder {
        DeviceMetricCalibrationBuilder {
            backbone: self.backbone.clone(),
            r#type: self.r#type,
            state: self.state,
            time: self.time,
        }
    }
}

impl Visitable for DeviceMetricCalibration {
    fn type_name(&self) -> &'static str {
        "DeviceMetric.Calibration"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.r#type.is_some()
            || self.state.is_some()
            || self.time.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_code(self.r#type.as_ref(), "type", visitor);
            visitor::accept_code(self.state.as_ref(), "state", visitor);
            visitor::accept_instant(self.time, "time", visitor);
        });
    }
}

impl Validate for DeviceMetricCalibration {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`DeviceMetricCalibration`].
#[derive(Debug, Clone, Default)]
pub struct DeviceMetricCalibrationBuilder {
    backbone: BackboneElement,
    r#type: Option<DeviceMetricCalibrationType>,
    state: Option<DeviceMetricCalibrationState>,
    time: Option<DateTime<Utc>>,
}

backbone_builder_accessors!(DeviceMetricCalibrationBuilder);

impl DeviceMetricCalibrationBuilder {
    pub fn with_type(mut self, r#type: DeviceMetricCalibrationType) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_state(mut self, state: DeviceMetricCalibrationState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    fn assemble(self) -> DeviceMetricCalibration {
        DeviceMetricCalibration {
            backbone: self.backbone,
            r#type: self.r#type,
            state: self.state,
            time: self.time,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DeviceMetricCalibration, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DeviceMetricCalibration {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Coding;
    use crate::validation::IssueKind;

    fn spo2_type() -> CodeableConcept {
        CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system("urn:iso:std:iso:11073:10101")
                    .with_code("150456")
                    .with_display("MDC_PULS_OXIM_SAT_O2")
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn measurement_channel_builds() {
        let metric = DeviceMetric::builder()
            .with_type(spo2_type())
            .with_device(
                Reference::builder()
                    .with_reference("Device/oximeter-3")
                    .build_unvalidated(),
            )
            .with_category(DeviceMetricCategory::Measurement)
            .with_color("blue")
            .build()
            .unwrap();
        assert_eq!(metric.color(), Some("blue"));
    }

    #[test]
    fn color_must_come_from_the_metric_palette() {
        let err = DeviceMetric::builder()
            .with_type(spo2_type())
            .with_device(
                Reference::builder()
                    .with_reference("Device/oximeter-3")
                    .build_unvalidated(),
            )
            .with_category(DeviceMetricCategory::Measurement)
            .with_color("teal")
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
        assert_eq!(err.issues()[0].path, "DeviceMetric.color");
    }

    #[test]
    fn empty_calibration_is_an_empty_element() {
        let metric = DeviceMetric::builder()
            .with_type(spo2_type())
            .with_device(
                Reference::builder()
                    .with_reference("Device/oximeter-3")
                    .build_unvalidated(),
            )
            .with_category(DeviceMetricCategory::Measurement)
            .add_calibration(DeviceMetricCalibration::builder().build_unvalidated())
            .build_unvalidated();
        let issues = metric.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::EmptyElement);
        assert_eq!(issues[0].path, "DeviceMetric.calibration[0]");
    }
}
