//! The BodyStructure resource: a specific anatomical location on a
//! patient, described by inclusion and exclusion rather than a single
//! code.

use crate::error::BuildError;
use crate::resources::{DomainResource, resource_accessors, resource_builder_accessors};
use crate::types::element::{
    BackboneElement, HashCell, backbone_accessors, backbone_builder_accessors,
    memoized_value_hash,
};
use crate::types::{
    Attachment, CodeableConcept, CodeableReference, Identifier, Quantity, Reference,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

const PATIENT_TARGETS: &[&str] = &["Patient"];
const SPATIAL_REFERENCE_TARGETS: &[&str] = &["ImagingSelection"];

/// An anatomical location, built up from included and excluded structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyStructure {
    pub(crate) resource: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) active: Option<bool>,
    pub(crate) morphology: Option<CodeableConcept>,
    pub(crate) included_structure: Vec<IncludedStructure>,
    pub(crate) excluded_structure: Vec<IncludedStructure>,
    pub(crate) description: Option<String>,
    pub(crate) image: Vec<Attachment>,
    pub(crate) patient: Option<Reference>,
    pub(crate) hash_cell: HashCell,
}

resource_accessors!(BodyStructure);
memoized_value_hash!(BodyStructure {
    resource,
    identifier,
    active,
    morphology,
    included_structure,
    excluded_structure,
    description,
    image,
    patient,
});

impl BodyStructure {
    pub fn builder() -> BodyStructureBuilder {
        BodyStructureBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn active(&self) -> Option<bool> {
        self.active
    }

    pub fn morphology(&self) -> Option<&CodeableConcept> {
        self.morphology.as_ref()
    }

    /// What the location is. At least one entry is required.
    pub fn included_structure(&self) -> &[IncludedStructure] {
        &self.included_structure
    }

    pub fn excluded_structure(&self) -> &[IncludedStructure] {
        &self.excluded_structure
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image(&self) -> &[Attachment] {
        &self.image
    }

    /// Who the structure is on. Required.
    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn to_builder(&self) -> BodyStructureBuilder {
        BodyStructureBuilder {
            resource: self.resource.clone(),
            identifier: self.identifier.clone(),
            active: self.active,
            morphology: self.morphology.clone(),
            included_structure: self.included_structure.clone(),
            excluded_structure: self.excluded_structure.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            patient: self.patient.clone(),
        }
    }
}

impl Visitable for BodyStructure {
    fn type_name(&self) -> &'static str {
        "BodyStructure"
    }

    fn has_children(&self) -> bool {
        !self.resource.is_empty()
            || !self.identifier.is_empty()
            || self.active.is_some()
            || self.morphology.is_some()
            || !self.included_structure.is_empty()
            || !self.excluded_structure.is_empty()
            || self.description.is_some()
            || !self.image.is_empty()
            || self.patient.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.resource.accept_children(visitor);
            visitor::accept_nodes(&self.identifier, "identifier", visitor);
            visitor::accept_bool(self.active, "active", visitor);
            visitor::accept_node(self.morphology.as_ref(), "morphology", visitor);
            visitor::accept_nodes(&self.included_structure, "includedStructure", visitor);
            visitor::accept_nodes(&self.excluded_structure, "excludedStructure", visitor);
            visitor::accept_str(self.description.as_deref(), "description", visitor);
            visitor::accept_nodes(&self.image, "image", visitor);
            visitor::accept_node(self.patient.as_ref(), "patient", visitor);
        });
    }
}

impl Validate for BodyStructure {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.resource.validate_into(ctx);
        ctx.require_non_empty(&self.included_structure, "includedStructure");
        ctx.require(&self.patient, "patient");
        ctx.check_reference(self.patient.as_ref(), "patient", PATIENT_TARGETS);
        ctx.validate_children(&self.identifier, "identifier");
        ctx.validate_child(self.morphology.as_ref(), "morphology");
        ctx.validate_children(&self.included_structure, "includedStructure");
        ctx.validate_children(&self.excluded_structure, "excludedStructure");
        ctx.validate_children(&self.image, "image");
        ctx.validate_child(self.patient.as_ref(), "patient");
    }
}

/// Builder for [`BodyStructure`].
#[derive(Debug, Clone, Default)]
pub struct BodyStructureBuilder {
    resource: DomainResource,
    identifier: Vec<Identifier>,
    active: Option<bool>,
    morphology: Option<CodeableConcept>,
    included_structure: Vec<IncludedStructure>,
    excluded_structure: Vec<IncludedStructure>,
    description: Option<String>,
    image: Vec<Attachment>,
    patient: Option<Reference>,
}

resource_builder_accessors!(BodyStructureBuilder);

impl BodyStructureBuilder {
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

    pub fn with_morphology(mut self, morphology: CodeableConcept) -> Self {
        self.morphology = Some(morphology);
        self
    }

    pub fn add_included_structure(mut self, included_structure: IncludedStructure) -> Self {
        self.included_structure.push(included_structure);
        self
    }

    pub fn with_included_structure(
        mut self,
        included_structure: Vec<IncludedStructure>,
    ) -> Self {
        self.included_structure = included_structure;
        self
    }

    pub fn add_excluded_structure(mut self, excluded_structure: IncludedStructure) -> Self {
        self.excluded_structure.push(excluded_structure);
        self
    }

    pub fn with_excluded_structure(
        mut self,
        excluded_structure: Vec<IncludedStructure>,
    ) -> Self {
        self.excluded_structure = excluded_structure;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_image(mut self, image: Attachment) -> Self {
        self.image.push(image);
        self
    }

    pub fn with_image(mut self, image: Vec<Attachment>) -> Self {
        self.image = image;
        self
    }

    pub fn with_patient(mut self, patient: Reference) -> Self {
        self.patient = Some(patient);
        self
    }

    fn assemble(self) -> BodyStructure {
        BodyStructure {
            resource: self.resource,
            identifier: self.identifier,
            active: self.active,
            morphology: self.morphology,
            included_structure: self.included_structure,
            excluded_structure: self.excluded_structure,
            description: self.description,
            image: self.image,
            patient: self.patient,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<BodyStructure, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> BodyStructure {
        self.assemble()
    }
}

/// One structure that is part of (or excluded from) the location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedStructure {
    pub(crate) backbone: BackboneElement,
    pub(crate) structure: Option<CodeableConcept>,
    pub(crate) laterality: Option<CodeableConcept>,
    pub(crate) body_landmark_orientation: Vec<BodyLandmarkOrientation>,
    pub(crate) spatial_reference: Vec<Reference>,
    pub(crate) qualifier: Vec<CodeableConcept>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(IncludedStructure);
memoized_value_hash!(IncludedStructure {
    backbone,
    structure,
    laterality,
    body_landmark_orientation,
    spatial_reference,
    qualifier,
});

impl IncludedStructure {
    pub fn builder() -> IncludedStructureBuilder {
        IncludedStructureBuilder::default()
    }

    /// Code for the structure. Required.
    pub fn structure(&self) -> Option<&CodeableConcept> {
        self.structure.as_ref()
    }

    pub fn laterality(&self) -> Option<&CodeableConcept> {
        self.laterality.as_ref()
    }

    pub fn body_landmark_orientation(&self) -> &[BodyLandmarkOrientation] {
        &self.body_landmark_orientation
    }

    pub fn spatial_reference(&self) -> &[Reference] {
        &self.spatial_reference
    }

    pub fn qualifier(&self) -> &[CodeableConcept] {
        &self.qualifier
    }

    pub fn to_builder(&self) -> IncludedStructureBuilder {
        IncludedStructureBuilder {
            backbone: self.backbone.clone(),
            structure: self.structure.clone(),
            laterality: self.laterality.clone(),
            body_landmark_orientation: self.body_landmark_orientation.clone(),
            spatial_reference: self.spatial_reference.clone(),
            qualifier: self.qualifier.clone(),
        }
    }
}

impl Visitable for IncludedStructure {
    fn type_name(&self) -> &'static str {
        "BodyStructure.IncludedStructure"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || self.structure.is_some()
            || self.laterality.is_some()
            || !self.body_landmark_orientation.is_empty()
            || !self.spatial_reference.is_empty()
            || !self.qualifier.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_node(self.structure.as_ref(), "structure", visitor);
            visitor::accept_node(self.laterality.as_ref(), "laterality", visitor);
            visitor::accept_nodes(
                &self.body_landmark_orientation,
                "bodyLandmarkOrientation",
                visitor,
            );
            visitor::accept_nodes(&self.spatial_reference, "spatialReference", visitor);
            visitor::accept_nodes(&self.qualifier, "qualifier", visitor);
        });
    }
}

impl Validate for IncludedStructure {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.require(&self.structure, "structure");
        ctx.check_references(
            &self.spatial_reference,
            "spatialReference",
            SPATIAL_REFERENCE_TARGETS,
        );
        ctx.validate_child(self.structure.as_ref(), "structure");
        ctx.validate_child(self.laterality.as_ref(), "laterality");
        ctx.validate_children(&self.body_landmark_orientation, "bodyLandmarkOrientation");
        ctx.validate_children(&self.spatial_reference, "spatialReference");
        ctx.validate_children(&self.qualifier, "qualifier");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`IncludedStructure`].
#[derive(Debug, Clone, Default)]
pub struct IncludedStructureBuilder {
    backbone: BackboneElement,
    structure: Option<CodeableConcept>,
    laterality: Option<CodeableConcept>,
    body_landmark_orientation: Vec<BodyLandmarkOrientation>,
    spatial_reference: Vec<Reference>,
    qualifier: Vec<CodeableConcept>,
}

backbone_builder_accessors!(IncludedStructureBuilder);

impl IncludedStructureBuilder {
    pub fn with_structure(mut self, structure: CodeableConcept) -> Self {
        self.structure = Some(structure);
        self
    }

    pub fn with_laterality(mut self, laterality: CodeableConcept) -> Self {
        self.laterality = Some(laterality);
        self
    }

    pub fn add_body_landmark_orientation(
        mut self,
        body_landmark_orientation: BodyLandmarkOrientation,
    ) -> Self {
        self.body_landmark_orientation.push(body_landmark_orientation);
        self
    }

    pub fn with_body_landmark_orientation(
        mut self,
        body_landmark_orientation: Vec<BodyLandmarkOrientation>,
    ) -> Self {
        self.body_landmark_orientation = body_landmark_orientation;
        self
    }

    pub fn add_spatial_reference(mut self, spatial_reference: Reference) -> Self {
        self.spatial_reference.push(spatial_reference);
        self
    }

    pub fn with_spatial_reference(mut self, spatial_reference: Vec<Reference>) -> Self {
        self.spatial_reference = spatial_reference;
        self
    }

    pub fn add_qualifier(mut self, qualifier: CodeableConcept) -> Self {
        self.qualifier.push(qualifier);
        self
    }

    pub fn with_qualifier(mut self, qualifier: Vec<CodeableConcept>) -> Self {
        self.qualifier = qualifier;
        self
    }

    fn assemble(self) -> IncludedStructure {
        IncludedStructure {
            backbone: self.backbone,
            structure: self.structure,
            laterality: self.laterality,
            body_landmark_orientation: self.body_landmark_orientation,
            spatial_reference: self.spatial_reference,
            qualifier: self.qualifier,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<IncludedStructure, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> IncludedStructure {
        self.assemble()
    }
}

/// Orientation of the structure relative to a body landmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLandmarkOrientation {
    pub(crate) backbone: BackboneElement,
    pub(crate) landmark_description: Vec<CodeableConcept>,
    pub(crate) clock_face_position: Vec<CodeableConcept>,
    pub(crate) distance_from_landmark: Vec<DistanceFromLandmark>,
    pub(crate) surface_orientation: Vec<CodeableConcept>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(BodyLandmarkOrientation);
memoized_value_hash!(BodyLandmarkOrientation {
    backbone,
    landmark_description,
    clock_face_position,
    distance_from_landmark,
    surface_orientation,
});

impl BodyLandmarkOrientation {
    pub fn builder() -> BodyLandmarkOrientationBuilder {
        BodyLandmarkOrientationBuilder::default()
    }

    pub fn landmark_description(&self) -> &[CodeableConcept] {
        &self.landmark_description
    }

    pub fn clock_face_position(&self) -> &[CodeableConcept] {
        &self.clock_face_position
    }

    pub fn distance_from_landmark(&self) -> &[DistanceFromLandmark] {
        &self.distance_from_landmark
    }

    pub fn surface_orientation(&self) -> &[CodeableConcept] {
        &self.surface_orientation
    }

    pub fn to_builder(&self) -> BodyLandmarkOrientationBuilder {
        BodyLandmarkOrientationBuilder {
            backbone: self.backbone.clone(),
            landmark_description: self.landmark_description.clone(),
            clock_face_position: self.clock_face_position.clone(),
            distance_from_landmark: self.distance_from_landmark.clone(),
            surface_orientation: self.surface_orientation.clone(),
        }
    }
}

impl Visitable for BodyLandmarkOrientation {
    fn type_name(&self) -> &'static str {
        "BodyStructure.IncludedStructure.BodyLandmarkOrientation"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty()
            || !self.landmark_description.is_empty()
            || !self.clock_face_position.is_empty()
            || !self.distance_from_landmark.is_empty()
            || !self.surface_orientation.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_nodes(&self.landmark_description, "landmarkDescription", visitor);
            visitor::accept_nodes(&self.clock_face_position, "clockFacePosition", visitor);
            visitor::accept_nodes(
                &self.distance_from_landmark,
                "distanceFromLandmark",
                visitor,
            );
            visitor::accept_nodes(&self.surface_orientation, "surfaceOrientation", visitor);
        });
    }
}

impl Validate for BodyLandmarkOrientation {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.validate_children(&self.landmark_description, "landmarkDescription");
        ctx.validate_children(&self.clock_face_position, "clockFacePosition");
        ctx.validate_children(&self.distance_from_landmark, "distanceFromLandmark");
        ctx.validate_children(&self.surface_orientation, "surfaceOrientation");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`BodyLandmarkOrientation`].
#[derive(Debug, Clone, Default)]
pub struct BodyLandmarkOrientationBuilder {
    backbone: BackboneElement,
    landmark_description: Vec<CodeableConcept>,
    clock_face_position: Vec<CodeableConcept>,
    distance_from_landmark: Vec<DistanceFromLandmark>,
    surface_orientation: Vec<CodeableConcept>,
}

backbone_builder_accessors!(BodyLandmarkOrientationBuilder);

impl BodyLandmarkOrientationBuilder {
    pub fn add_landmark_description(mut self, landmark_description: CodeableConcept) -> Self {
        self.landmark_description.push(landmark_description);
        self
    }

    pub fn with_landmark_description(
        mut self,
        landmark_description: Vec<CodeableConcept>,
    ) -> Self {
        self.landmark_description = landmark_description;
        self
    }

    pub fn add_clock_face_position(mut self, clock_face_position: CodeableConcept) -> Self {
        self.clock_face_position.push(clock_face_position);
        self
    }

    pub fn with_clock_face_position(
        mut self,
        clock_face_position: Vec<CodeableConcept>,
    ) -> Self {
        self.clock_face_position = clock_face_position;
        self
    }

    pub fn add_distance_from_landmark(
        mut self,
        distance_from_landmark: DistanceFromLandmark,
    ) -> Self {
        self.distance_from_landmark.push(distance_from_landmark);
        self
    }

    pub fn with_distance_from_landmark(
        mut self,
        distance_from_landmark: Vec<DistanceFromLandmark>,
    ) -> Self {
        self.distance_from_landmark = distance_from_landmark;
        self
    }

    pub fn add_surface_orientation(mut self, surface_orientation: CodeableConcept) -> Self {
        self.surface_orientation.push(surface_orientation);
        self
    }

    pub fn with_surface_orientation(
        mut self,
        surface_orientation: Vec<CodeableConcept>,
    ) -> Self {
        self.surface_orientation = surface_orientation;
        self
    }

    fn assemble(self) -> BodyLandmarkOrientation {
        BodyLandmarkOrientation {
            backbone: self.backbone,
            landmark_description: self.landmark_description,
            clock_face_position: self.clock_face_position,
            distance_from_landmark: self.distance_from_landmark,
            surface_orientation: self.surface_orientation,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<BodyLandmarkOrientation, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> BodyLandmarkOrientation {
        self.assemble()
    }
}

/// How far the structure sits from the landmark, and measured with what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceFromLandmark {
    pub(crate) backbone: BackboneElement,
    pub(crate) device: Vec<CodeableReference>,
    pub(crate) value: Vec<Quantity>,
    pub(crate) hash_cell: HashCell,
}

backbone_accessors!(DistanceFromLandmark);
memoized_value_hash!(DistanceFromLandmark { backbone, device, value });

impl DistanceFromLandmark {
    pub fn builder() -> DistanceFromLandmarkBuilder {
        DistanceFromLandmarkBuilder::default()
    }

    pub fn device(&self) -> &[CodeableReference] {
        &self.device
    }

    pub fn value(&self) -> &[Quantity] {
        &self.value
    }

    pub fn to_builder(&self) -> DistanceFromLandmarkBuilder {
        DistanceFromLandmarkBuilder {
            backbone: self.backbone.clone(),
            device: self.device.clone(),
            value: self.value.clone(),
        }
    }
}

impl Visitable for DistanceFromLandmark {
    fn type_name(&self) -> &'static str {
        "BodyStructure.IncludedStructure.BodyLandmarkOrientation.DistanceFromLandmark"
    }

    fn has_children(&self) -> bool {
        !self.backbone.is_empty() || !self.device.is_empty() || !self.value.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.backbone.accept_children(visitor);
            visitor::accept_nodes(&self.device, "device", visitor);
            visitor::accept_nodes(&self.value, "value", visitor);
        });
    }
}

impl Validate for DistanceFromLandmark {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.backbone.validate_into(ctx);
        ctx.validate_children(&self.device, "device");
        ctx.validate_children(&self.value, "value");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`DistanceFromLandmark`].
#[derive(Debug, Clone, Default)]
pub struct DistanceFromLandmarkBuilder {
    backbone: BackboneElement,
    device: Vec<CodeableReference>,
    value: Vec<Quantity>,
}

backbone_builder_accessors!(DistanceFromLandmarkBuilder);

impl DistanceFromLandmarkBuilder {
    pub fn add_device(mut self, device: CodeableReference) -> Self {
        self.device.push(device);
        self
    }

    pub fn with_device(mut self, device: Vec<CodeableReference>) -> Self {
        self.device = device;
        self
    }

    pub fn add_value(mut self, value: Quantity) -> Self {
        self.value.push(value);
        self
    }

    pub fn with_value(mut self, value: Vec<Quantity>) -> Self {
        self.value = value;
        self
    }

    fn assemble(self) -> DistanceFromLandmark {
        DistanceFromLandmark {
            backbone: self.backbone,
            device: self.device,
            value: self.value,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<DistanceFromLandmark, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> DistanceFromLandmark {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Coding;
    use crate::validation::IssueKind;

    fn snomed(code: &str, display: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .add_coding(
                Coding::builder()
                    .with_system("http://snomed.info/sct")
                    .with_code(code)
                    .with_display(display)
                    .build_unvalidated(),
            )
            .build_unvalidated()
    }

    #[test]
    fn minimal_structure_builds() {
        let structure = BodyStructure::builder()
            .add_included_structure(
                IncludedStructure::builder()
                    .with_structure(snomed("83030008", "Left kidney"))
                    .build_unvalidated(),
            )
            .with_patient(Reference::builder().with_reference("Patient/p1").build_unvalidated())
            .build()
            .unwrap();
        assert_eq!(structure.included_structure().len(), 1);
    }

    #[test]
    fn included_structure_and_patient_are_required() {
        let err = BodyStructure::builder().build().unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["BodyStructure.includedStructure", "BodyStructure.patient"]
        );
    }

    #[test]
    fn spatial_reference_must_be_an_imaging_selection() {
        let err = BodyStructure::builder()
            .add_included_structure(
                IncludedStructure::builder()
                    .with_structure(snomed("83030008", "Left kidney"))
                    .add_spatial_reference(
                        Reference::builder()
                            .with_reference("Observation/o1")
                            .build_unvalidated(),
                    )
                    .build_unvalidated(),
            )
            .with_patient(Reference::builder().with_reference("Patient/p1").build_unvalidated())
            .build()
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidReferenceTarget);
        assert_eq!(
            err.issues()[0].path,
            "BodyStructure.includedStructure[0].spatialReference[0]"
        );
    }

    #[test]
    fn landmark_orientation_nests_three_levels_deep() {
        let orientation = BodyLandmarkOrientation::builder()
            .add_landmark_description(snomed("81754007", "Umbilicus"))
            .add_distance_from_landmark(
                DistanceFromLandmark::builder()
                    .add_value(
                        Quantity::builder()
                            .with_value(rust_decimal_macros::dec!(4.5))
                            .with_unit("cm")
                            .build_unvalidated(),
                    )
                    .build_unvalidated(),
            )
            .build()
            .unwrap();
        assert_eq!(orientation.distance_from_landmark().len(), 1);
    }
}
