//! The Specimen resource: a sample for analysis, from collection through
//! processing into its container.

use chrono::{DateTime, FixedOffset};

use crate::binding::CodeBinding;
use crate::choice::{ChoiceValue, FhirType};
use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::codes::SpecimenStatus;
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{
    Annotation, CodeableConcept, CodeableReference, Identifier, Quantity, Reference,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const SUBJECT_TARGETS: &[&str] = &[
    "Patient",
    "Group",
    "Device",
    "BiologicallyDerivedProduct",
    "Substance",
    "Location",
];
const PARENT_TARGETS: &[&str] = &["Specimen"];
const REQUEST_TARGETS: &[&str] = &["ServiceRequest"];
const COLLECTOR_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Patient",
    "RelatedPerson",
];
const PROCEDURE_TARGETS: &[&str] = &["Procedure"];
const ADDITIVE_TARGETS: &[&str] = &["Substance"];
const CONTAINER_DEVICE_TARGETS: &[&str] = &["Device"];
const CONTAINER_LOCATION_TARGETS: &[&str] = &["Location"];
const COLLECTED_CHOICE: &[FhirType] = &[FhirType::DateTime, FhirType::Period];
const FASTING_STATUS_CHOICE: &[FhirType] = &[FhirType::CodeableConcept, FhirType::Duration];
const PROCESSING_TIME_CHOICE: &[FhirType] = &[FhirType::DateTime, FhirType::Period];

/// Whether several specimens were merged, and how.
const COMBINED_BINDING: CodeBinding = CodeBinding::required(
    "SpecimenCombined",
    "http://hl7.org/fhir/ValueSet/specimen-combined|5.0.0",
    "http://hl7.org/fhir/specimen-combined",
    &["grouped", "pooled"],
);

/// A sample to be used for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specimen {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) accession_identifier: Option<Identifier>,
    pub(crate) status: Option<SpecimenStatus>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) subject: Option<Reference>,
    pub(crate) received_time: Option<DateTime<FixedOffset>>,
    pub(crate) parent: Vec<Reference>,
    pub(crate) request: Vec<Reference>,
    pub(crate) combined: Option<String>,
    pub(crate) role: Vec<CodeableConcept>,
    pub(crate) feature: Vec<SpecimenFeature>,
    pub(crate) collection: Option<SpecimenCollection>,
    pub(crate) processing: Vec<SpecimenProcessing>,
    pub(crate) container: Vec<SpecimenContainer>,
    pub(crate) condition: Vec<CodeableConcept>,
    pub(crate) note: Vec<Annotation>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(Specimen);
memoized_value_hash!(Specimen {
    resource,
    identifier,
    accession_identifier,
    status,
    r#type,
    subject,
    received_time,
    parent,
    request,
    combined,
    role,
    feature,
    collection,
    processing,
    container,
    condition,
    note,
});

impl Specimen {
    pub fn builder() -> SpecimenBuilder {
        SpecimenBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn accession_identifier(&self) -> Option<&Identifier> {
        self.accession_identifier.as_ref()
    }

    pub fn status(&self) -> Option<SpecimenStatus> {
        self.status
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn received_time(&self) -> Option<DateTime<FixedOffset>> {
        self.received_time
    }

    pub fn parent(&self) -> &[Reference] {
        &self.parent
    }

    pub fn request(&self) -> &[Reference] {
        &self.request
    }

    /// Whether the specimen was pooled or grouped from several sources.
    pub fn combined(&self) -> Option<&str> {
        self.combined.as_deref()
    }

    pub fn role(&self) -> &[CodeableConcept] {
        &self.role
    }

    pub fn feature(&self) -> &[SpecimenFeature] {
        &self.feature
    }

    pub fn collection(&self) -> Option<&SpecimenCollection> {
        self.collection.as_ref()
    }

    pub fn processing(&self) -> &[SpecimenProcessing] {
        &self.processing
    }

    pub fn container(&self) -> &[SpecimenContainer] {
        &self.container
    }

    pub fn condition(&self) -> &[CodeableConcept] {
        &self.condition
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    pub fn to_builder(&self) -> SpecimenBuilder {
        SpecimenBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            accession_identifier: self.accession_identifier.clone(),
            status: self.status,
            r#type: self.r#type.clone(),
            subject: self.subject.clone(),
            received_time: self.received_time,
            parent: self.parent.clone(),
            request: self.request.clone(),
            combined: self.combined.clone(),
            role: self.role.clone(),
            feature: self.feature.clone(),
            collection: self.collection.clone(),
            processing: self.processing.clone(),
            container: self.container.clone(),
            condition: self.condition.clone(),
            note: self.note.clone(),
        }
    }
}

impl Visitable for Specimen {
    fn type_name(&self) -> &'static str {
        "Specimen"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.accession_identifier.is_some()
            || self.status.is_some()
            || self.r#type.is_some()
            || self.subject.is_some()
            || self.received_time.is_some()
            || !self.parent.is_empty()
            || !self.request.is_empty()
            || self.combined.is_some()
            || !self.role.is_empty()
            || !self.feature.is_empty()
            || self.collection.is_some()
            || !self.processing.is_empty()
            || !self.container.is_empty()
            || !self.condition.is_empty()
            || !self.note.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_node(
                self.accession_identifier.as_ref(),
                "accessionIdentifier",
                visitor,
            );
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_node(self.r#type.as_ref(), "type", visitor);
            visitor::accept_node(self.subject.as_ref(), "subject", visitor);
            visitor::accept_date_time(self.received_time, "receivedTime", visitor);
            visitor::accept_nodes(&self.parent, "parent", visitor);
            visitor::accept_nodes(&self.request, "request", visitor);
            visitor::accept_str(self.combined.as_deref(), "combined", visitor);
            visitor::accept_nodes(&self.role, "role", visitor);
            visitor::accept_nodes(&self.feature, "feature", visitor);
            visitor::accept_node(self.collection.as_ref(), "collection", visitor);
            visitor::accept_nodes(&self.processing, "processing", visitor);
            visitor::accept_nodes(&self.container, "container", visitor);
            visitor::accept_nodes(&self.condition, "condition", visitor);
            visitor::accept_nodes(&self.note, "note", visitor);
        });
    }
}

impl Validate for Specimen {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.check_reference(self.subject.as_ref(), "subject", SUBJECT_TARGETS);
        ctx.check_references(&self.parent, "parent", PARENT_TARGETS);
        ctx.check_references(&self.request, "request", REQUEST_TARGETS);
        ctx.check_binding_code(self.combined.as_deref(), "combined", &COMBINED_BINDING);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.accession_identifier.as_ref(), "accessionIdentifier");
        ctx.validate_child(self.r#type.as_ref(), "type");
        ctx.validate_child(self.subject.as_ref(), "subject");
        ctx.validate_children(&self.parent, "parent");
        ctx.validate_children(&self.request, "request");
        ctx.validate_children(&self.role, "role");
        ctx.validate_children(&self.feature, "feature");
        ctx.validate_child(self.collection.as_ref(), "collection");
        ctx.validate_children(&self.processing, "processing");
        ctx.validate_children(&self.container, "container");
        ctx.validate_children(&self.condition, "condition");
        ctx.validate_children(&self.note, "note");
    }
}

/// Builder for [`Specimen`].
#[derive(Debug, Clone, Default)]
pub struct SpecimenBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    accession_identifier: Option<Identifier>,
    status: Option<SpecimenStatus>,
    r#type: Option<CodeableConcept>,
    subject: Option<Reference>,
    received_time: Option<DateTime<FixedOffset>>,
    parent: Vec<Reference>,
    request: Vec<Reference>,
    combined: Option<String>,
    role: Vec<CodeableConcept>,
    feature: Vec<SpecimenFeature>,
    collection: Option<SpecimenCollection>,
    processing: Vec<SpecimenProcessing>,
    container: Vec<SpecimenContainer>,
    condition: Vec<CodeableConcept>,
    note: Vec<Annotation>,
}

resource_builder_accessors!(SpecimenBuilder);

impl SpecimenBuilder {
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn with_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_accession_identifier(mut self, accession_identifier: Identifier) -> Self {
        self.accession_identifier = Some(accession_identifier);
        self
    }

    pub fn with_status(mut self, status: SpecimenStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_received_time(mut self, received_time: DateTime<FixedOffset>) -> Self {
        self.received_time = Some(received_time);
        self
    }

    pub fn add_parent(mut self, parent: Reference) -> Self {
        self.parent.push(parent);
        self
    }

    pub fn with_parent(mut self, parent: Vec<Reference>) -> Self {
        self.parent = parent;
        self
    }

    pub fn add_request(mut self, request: Reference) -> Self {
        self.request.push(request);
        self
    }

    pub fn with_request(mut self, request: Vec<Reference>) -> Self {
        self.request = request;
        self
    }

    pub fn with_combined(mut self, combined: impl Into<String>) -> Self {
        self.combined = Some(combined.into());
        self
    }

    pub fn add_role(mut self, role: CodeableConcept) -> Self {
        self.role.push(role);
        self
    }

    pub fn with_role(mut self, role: Vec<CodeableConcept>) -> Self {
        self.role = role;
        self
    }

    pub fn add_feature(mut self, feature: SpecimenFeature) -> Self {
        self.feature.push(feature);
        self
    }

    pub fn with_feature(mut self, feature: Vec<SpecimenFeature>) -> Self {
        self.feature = feature;
        self
    }

    pub fn with_collection(mut self, collection: SpecimenCollection) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn add_processing(mut self, processing: SpecimenProcessing) -> Self {
        self.processing.push(processing);
        self
    }

    pub fn with_processing(mut self, processing: Vec<SpecimenProcessing>) -> Self {
        self.processing = processing;
        self
    }

    pub fn add_container(mut self, container: SpecimenContainer) -> Self {
        self.container.push(container);
        self
    }

    pub fn with_container(mut self, container: Vec<SpecimenContainer>) -> Self {
        self.container = container;
        self
    }

    pub fn add_condition(mut self, condition: CodeableConcept) -> Self {
        self.condition.push(condition);
        self
    }

    pub fn with_condition(mut self, condition: Vec<CodeableConcept>) -> Self {
        self.condition = condition;
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

    fn assemble(self) -> Specimen {
        Specimen {
            resource: self.resource,
            identifier: self.identifier,
            accession_identifier: self.accession_identifier,
            status: self.status,
            r#type: self.r#type,
            subject: self.subject,
            received_time: self.received_time,
            parent: self.parent,
            request: self.request,
            combined: self.combined,
            role: self.role,
            feature: self.feature,
            collection: self.collection,
            processing: self.processing,
            container: self.container,
            condition: self.condition,
            note: self.note,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Specimen, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Specimen {
        self.assemble()
    }
}

/// A physical feature of the specimen, such as a highlighted margin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenFeature {
    pub(crate) backbone: BackboneElement,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) description: Option<String>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SpecimenFeature);
memoized_value_hash!(SpecimenFeature { backbone, r#type, description });

impl SpecimenFeature {
    pub fn builder() -> SpecimenFeatureBuilder {
        SpecimenFeatureBuilder::default()
    }

    /// The landmarked feature. Required.
    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    /// Information about the feature. Required.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn to_builder(&self) -> SpecimenFeatureBuilder {
        SpecimenFeatureBuilder {
            backbone: self.backbone.clone(),
            r#type: self.r#type.clone(),
            description: self.description.clone(),
        }
    }
}

impl Visitable for SpecimenFeature {
    fn type_name(&self) -> &'static str {
        "Specimen.Feature"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || self.r#type.is_some() || self.description.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.r#type.as_ref(), "type", visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
        });
    }
}

impl Validate for SpecimenFeature {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.r#type, "type");
        ctx.require(&self.description, "description");
        ctx.validate_child(self.r#type.as_ref(), "type");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SpecimenFeature`].
#[derive(Debug, Clone, Default)]
pub struct SpecimenFeatureBuilder {
    backbone: BackboneElement,
    r#type: Option<CodeableConcept>,
    description: Option<String>,
}

backbone_builder_accessors!(SpecimenFeatureBuilder);

impl SpecimenFeatureBuilder {
    pub fn with_type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn assemble(self) -> SpecimenFeature {
        SpecimenFeature {
            backbone: self.backbone,
            r#type: self.r#type,
            description: self.description,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SpecimenFeature, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SpecimenFeature {
        self.assemble()
    }
}

/// Details of the collection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenCollection {
    pub(crate) backbone: BackboneElement,
    pub(crate) collector: Option<Reference>,
    pub(crate) collected: Option<ChoiceValue>,
    pub(crate) duration: Option<Quantity>,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) method: Option<CodeableConcept>,
    pub(crate) device: Option<CodeableReference>,
    pub(crate) procedure: Option<Reference>,
    pub(crate) body_site: Option<CodeableReference>,
    pub(crate) fasting_status: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SpecimenCollection);
memoized_value_hash!(SpecimenCollection {
    backbone,
    collector,
    collected,
    duration,
    quantity,
    method,
    device,
    procedure,
    body_site,
    fasting_status,
});

impl SpecimenCollection {
    pub fn builder() -> SpecimenCollectionBuilder {
        SpecimenCollectionBuilder::default()
    }

    pub fn collector(&self) -> Option<&Reference> {
        self.collector.as_ref()
    }

    pub fn collected(&self) -> Option<&ChoiceValue> {
        self.collected.as_ref()
    }

    pub fn duration(&self) -> Option<&Quantity> {
        self.duration.as_ref()
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn method(&self) -> Option<&CodeableConcept> {
        self.method.as_ref()
    }

    pub fn device(&self) -> Option<&CodeableReference> {
        self.device.as_ref()
    }

    pub fn procedure(&self) -> Option<&Reference> {
        self.procedure.as_ref()
    }

    pub fn body_site(&self) -> Option<&CodeableReference> {
        self.body_site.as_ref()
    }

    pub fn fasting_status(&self) -> Option<&ChoiceValue> {
        self.fasting_status.as_ref()
    }

    pub fn to_builder(&self) -> SpecimenCollectionBuilder {
        SpecimenCollectionBuilder {
            backbone: self.backbone.clone(),
            collector: self.collector.clone(),
            collected: self.collected.clone(),
            duration: self.duration.clone(),
            quantity: self.quantity.clone(),
            method: self.method.clone(),
            device: self.device.clone(),
            procedure: self.procedure.clone(),
            body_site: self.body_site.clone(),
            fasting_status: self.fasting_status.clone(),
        }
    }
}

impl Visitable for SpecimenCollection {
    fn type_name(&self) -> &'static str {
        "Specimen.Collection"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.collector.is_some()
            || self.collected.is_some()
            || self.duration.is_some()
            || self.quantity.is_some()
            || self.method.is_some()
            || self.device.is_some()
            || self.procedure.is_some()
            || self.body_site.is_some()
            || self.fasting_status.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.collector.as_ref(), "collector", visitor);
            visitor::accept_choice(self.collected.as_ref(), "collected", visitor);
            visitor::accept_node(self.duration.as_ref(), "duration", visitor);
            visitor::accept_node(self.quantity.as_ref(), "quantity", visitor);
            visitor::accept_node(self.method.as_ref(), "method", visitor);
            visitor::accept_node(self.device.as_ref(), "device", visitor);
            visitor::accept_node(self.procedure.as_ref(), "procedure", visitor);
            visitor::accept_node(self.body_site.as_ref(), "bodySite", visitor);
            visitor::accept_choice(self.fasting_status.as_ref(), "fastingStatus", visitor);
        });
    }
}

impl Validate for SpecimenCollection {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.check_reference(self.collector.as_ref(), "collector", COLLECTOR_TARGETS);
        ctx.check_choice(&self.collected, "collected", COLLECTED_CHOICE);
        ctx.check_reference(self.procedure.as_ref(), "procedure", PROCEDURE_TARGETS);
        ctx.check_choice(&self.fasting_status, "fastingStatus", FASTING_STATUS_CHOICE);
        ctx.validate_child(self.collector.as_ref(), "collector");
        ctx.validate_choice_child(&self.collected, "collected");
        ctx.validate_child(self.duration.as_ref(), "duration");
        ctx.validate_child(self.quantity.as_ref(), "quantity");
        ctx.validate_child(self.method.as_ref(), "method");
        ctx.validate_child(self.device.as_ref(), "device");
        ctx.validate_child(self.procedure.as_ref(), "procedure");
        ctx.validate_child(self.body_site.as_ref(), "bodySite");
        ctx.validate_choice_child(&self.fasting_status, "fastingStatus");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SpecimenCollection`].
#[derive(Debug, Clone, Default)]
pub struct SpecimenCollectionBuilder {
    backbone: BackboneElement,
    collector: Option<Reference>,
    collected: Option<ChoiceValue>,
    duration: Option<Quantity>,
    quantity: Option<Quantity>,
    method: Option<CodeableConcept>,
    device: Option<CodeableReference>,
    procedure: Option<Reference>,
    body_site: Option<CodeableReference>,
    fasting_status: Option<ChoiceValue>,
}

backbone_builder_accessors!(SpecimenCollectionBuilder);

impl SpecimenCollectionBuilder {
    pub fn with_collector(mut self, collector: Reference) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn with_collected(mut self, collected: impl Into<ChoiceValue>) -> Self {
        self.collected = Some(collected.into());
        self
    }

    pub fn with_duration(mut self, duration: Quantity) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_method(mut self, method: CodeableConcept) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_device(mut self, device: CodeableReference) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_procedure(mut self, procedure: Reference) -> Self {
        self.procedure = Some(procedure);
        self
    }

    pub fn with_body_site(mut self, body_site: CodeableReference) -> Self {
        self.body_site = Some(body_site);
        self
    }

    pub fn with_fasting_status(mut self, fasting_status: impl Into<ChoiceValue>) -> Self {
        self.fasting_status = Some(fasting_status.into());
        self
    }

    fn assemble(self) -> SpecimenCollection {
        SpecimenCollection {
            backbone: self.backbone,
            collector: self.collector,
            collected: self.collected,
            duration: self.duration,
            quantity: self.quantity,
            method: self.method,
            device: self.device,
            procedure: self.procedure,
            body_site: self.body_site,
            fasting_status: self.fasting_status,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SpecimenCollection, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SpecimenCollection {
        self.assemble()
    }
}

/// A treatment step applied to the specimen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenProcessing {
    pub(crate) backbone: BackboneElement,
    pub(crate) description: Option<String>,
    pub(crate) method: Option<CodeableConcept>,
    pub(crate) additive: Vec<Reference>,
    pub(crate) time: Option<ChoiceValue>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SpecimenProcessing);
memoized_value_hash!(SpecimenProcessing { backbone, description, method, additive, time });

impl SpecimenProcessing {
    pub fn builder() -> SpecimenProcessingBuilder {
        SpecimenProcessingBuilder::default()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn method(&self) -> Option<&CodeableConcept> {
        self.method.as_ref()
    }

    pub fn additive(&self) -> &[Reference] {
        &self.additive
    }

    pub fn time(&self) -> Option<&ChoiceValue> {
        self.time.as_ref()
    }

    pub fn to_builder(&self) -> SpecimenProcessingBuilder {
        SpecimenProcessingBuilder {
            backbone: self.backbone.clone(),
            description: self.description.clone(),
            method: self.method.clone(),
            additive: self.additive.clone(),
            time: self.time.clone(),
        }
    }
}

impl Visitable for SpecimenProcessing {
    fn type_name(&self) -> &'static str {
        "Specimen.Processing"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.description.is_some()
            || self.method.is_some()
            || !self.additive.is_empty()
            || self.time.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
            visitor::accept_node(self.method.as_ref(), "method", visitor);
            visitor::accept_nodes(&self.additive, "additive", visitor);
            visitor::accept_choice(self.time.as_ref(), "time", visitor);
        });
    }
}

impl Validate for SpecimenProcessing {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.check_references(&self.additive, "additive", ADDITIVE_TARGETS);
        ctx.check_choice(&self.time, "time", PROCESSING_TIME_CHOICE);
        ctx.validate_child(self.method.as_ref(), "method");
        ctx.validate_children(&self.additive, "additive");
        ctx.validate_choice_child(&self.time, "time");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SpecimenProcessing`].
#[derive(Debug, Clone, Default)]
pub struct SpecimenProcessingBuilder {
    backbone: BackboneElement,
    description: Option<String>,
    method: Option<CodeableConcept>,
    additive: Vec<Reference>,
    time: Option<ChoiceValue>,
}

backbone_builder_accessors!(SpecimenProcessingBuilder);

impl SpecimenProcessingBuilder {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: CodeableConcept) -> Self {
        self.method = Some(method);
        self
    }

    pub fn add_additive(mut self, additive: Reference) -> Self {
        self.additive.push(additive);
        self
    }

    pub fn with_additive(mut self, additive: Vec<Reference>) -> Self {
        self.additive = additive;
        self
    }

    pub fn with_time(mut self, time: impl Into<ChoiceValue>) -> Self {
        self.time = Some(time.into());
        self
    }

    fn assemble(self) -> SpecimenProcessing {
        SpecimenProcessing {
            backbone: self.backbone,
            description: self.description,
            method: self.method,
            additive: self.additive,
            time: self.time,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SpecimenProcessing, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SpecimenProcessing {
        self.assemble()
    }
}

/// The container holding the specimen, possibly only a portion of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenContainer {
    pub(crate) backbone: BackboneElement,
    pub(crate) device: Option<Reference>,
    pub(crate) location: Option<Reference>,
    pub(crate) specimen_quantity: Option<Quantity>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(SpecimenContainer);
memoized_value_hash!(SpecimenContainer { backbone, device, location, specimen_quantity });

impl SpecimenContainer {
    pub fn builder() -> SpecimenContainerBuilder {
        SpecimenContainerBuilder::default()
    }

    /// The container device. Required.
    pub fn device(&self) -> Option<&Reference> {
        self.device.as_ref()
    }

    pub fn location(&self) -> Option<&Reference> {
        self.location.as_ref()
    }

    pub fn specimen_quantity(&self) -> Option<&Quantity> {
        self.specimen_quantity.as_ref()
    }

    pub fn to_builder(&self) -> SpecimenContainerBuilder {
        SpecimenContainerBuilder {
            backbone: self.backbone.clone(),
            device: self.device.clone(),
            location: self.location.clone(),
            specimen_quantity: self.specimen_quantity.clone(),
        }
    }
}

impl Visitable for SpecimenContainer {
    fn type_name(&self) -> &'static str {
        "Specimen.Container"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.device.is_some()
            || self.location.is_some()
            || self.specimen_quantity.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.device.as_ref(), "device", visitor);
            visitor::accept_node(self.location.as_ref(), "location", visitor);
            visitor::accept_node(self.specimen_quantity.as_ref(), "specimenQuantity", visitor);
        });
    }
}

impl Validate for SpecimenContainer {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.device, "device");
        ctx.check_reference(self.device.as_ref(), "device", CONTAINER_DEVICE_TARGETS);
        ctx.check_reference(self.location.as_ref(), "location", CONTAINER_LOCATION_TARGETS);
        ctx.validate_child(self.device.as_ref(), "device");
        ctx.validate_child(self.location.as_ref(), "location");
        ctx.validate_child(self.specimen_quantity.as_ref(), "specimenQuantity");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`SpecimenContainer`].
#[derive(Debug, Clone, Default)]
pub struct SpecimenContainerBuilder {
    backbone: BackboneElement,
    device: Option<Reference>,
    location: Option<Reference>,
    specimen_quantity: Option<Quantity>,
}

backbone_builder_accessors!(SpecimenContainerBuilder);

impl SpecimenContainerBuilder {
    pub fn with_device(mut self, device: Reference) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_location(mut self, location: Reference) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_specimen_quantity(mut self, specimen_quantity: Quantity) -> Self {
        self.specimen_quantity = Some(specimen_quantity);
        self
    }

    fn assemble(self) -> SpecimenContainer {
        SpecimenContainer {
            backbone: self.backbone,
            device: self.device,
            location: self.location,
            specimen_quantity: self.specimen_quantity,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<SpecimenContainer, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> SpecimenContainer {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::types::Period;
    use crate::validation::IssueKind;

    #[test]
    fn bare_specimen_builds() {
        let specimen = Specimen::builder()
            .with_status(SpecimenStatus::Available)
            .build()
            .unwrap();
        assert_eq!(specimen.status(), Some(SpecimenStatus::Available));
    }

    #[test]
    fn combined_code_must_be_grouped_or_pooled() {
        let err = Specimen::builder().with_combined("merged").build().unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
        assert_eq!(err.issues()[0].path, "Specimen.combined");
    }

    #[test]
    fn collection_accepts_period_and_duration_shapes() {
        let collection = SpecimenCollection::builder()
            .with_collected(
                Period::builder()
                    .with_start("2024-05-01T08:00:00Z".parse().unwrap())
                    .build_unvalidated(),
            )
            .with_fasting_status(ChoiceValue::Duration(
                Quantity::builder()
                    .with_value(dec!(12))
                    .with_unit("h")
                    .build_unvalidated(),
            ))
            .build()
            .unwrap();
        assert!(collection.fasting_status().is_some());
    }

    #[test]
    fn fasting_status_rejects_booleans() {
        let err = SpecimenCollection::builder()
            .with_fasting_status(true)
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidChoiceType);
        assert_eq!(err.issues()[0].path, "Specimen.Collection.fastingStatus");
    }

    #[test]
    fn container_requires_a_device() {
        let specimen = Specimen::builder()
            .add_container(SpecimenContainer::builder().build_unvalidated())
            .build_unvalidated();
        let issues = specimen.validate();
        let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
        assert!(paths.contains(&"Specimen.container[0].device"));
    }

    #[test]
    fn feature_requires_type_and_description() {
        let err = SpecimenFeature::builder().build().unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["Specimen.Feature.type", "Specimen.Feature.description", "Specimen.Feature"]
        );
    }
}
