//! Resource types and their shared infrastructure.
//!
//! Every resource embeds a [`DomainResource`] field group carrying the
//! cross-cutting content (id, meta, narrative, contained resources and
//! extensions) and picks up its accessors through the macros below, the
//! same way datatypes embed `Element`. [`AnyResource`] is the closed union
//! over the supported resource kinds; contained resources are stored
//! through it.

pub mod appointment_response;
pub mod body_structure;
pub mod care_team;
pub mod device_association;
pub mod device_dispense;
pub mod device_metric;
pub mod endpoint;
pub mod episode_of_care;
pub mod group;
pub mod location;
pub mod practitioner;
pub mod specimen;
pub mod substance;
pub mod supply_delivery;
pub mod supply_request;

pub use appointment_response::{AppointmentResponse, AppointmentResponseBuilder};
pub use body_structure::{
    BodyLandmarkOrientation, BodyLandmarkOrientationBuilder, BodyStructure, BodyStructureBuilder,
    DistanceFromLandmark, DistanceFromLandmarkBuilder, IncludedStructure,
    IncludedStructureBuilder,
};
pub use care_team::{CareTeam, CareTeamBuilder, CareTeamParticipant, CareTeamParticipantBuilder};
pub use device_association::{
    DeviceAssociation, DeviceAssociationBuilder, DeviceAssociationOperation,
    DeviceAssociationOperationBuilder,
};
pub use device_dispense::{
    DeviceDispense, DeviceDispenseBuilder, DeviceDispensePerformer,
    DeviceDispensePerformerBuilder,
};
pub use device_metric::{
    DeviceMetric, DeviceMetricBuilder, DeviceMetricCalibration, DeviceMetricCalibrationBuilder,
};
pub use endpoint::{Endpoint, EndpointBuilder, EndpointPayload, EndpointPayloadBuilder};
pub use episode_of_care::{
    EpisodeOfCare, EpisodeOfCareBuilder, EpisodeOfCareDiagnosis, EpisodeOfCareDiagnosisBuilder,
    EpisodeOfCareReason, EpisodeOfCareReasonBuilder, EpisodeOfCareStatusHistory,
    EpisodeOfCareStatusHistoryBuilder,
};
pub use group::{
    Group, GroupBuilder, GroupCharacteristic, GroupCharacteristicBuilder, GroupMember,
    GroupMemberBuilder,
};
pub use location::{Location, LocationBuilder, LocationPosition, LocationPositionBuilder};
pub use practitioner::{
    Practitioner, PractitionerBuilder, PractitionerCommunication,
    PractitionerCommunicationBuilder, PractitionerQualification, PractitionerQualificationBuilder,
};
pub use specimen::{
    Specimen, SpecimenBuilder, SpecimenCollection, SpecimenCollectionBuilder, SpecimenContainer,
    SpecimenContainerBuilder, SpecimenFeature, SpecimenFeatureBuilder, SpecimenProcessing,
    SpecimenProcessingBuilder,
};
pub use substance::{Substance, SubstanceBuilder, SubstanceIngredient, SubstanceIngredientBuilder};
pub use supply_delivery::{
    SupplyDelivery, SupplyDeliveryBuilder, SupplyDeliverySuppliedItem,
    SupplyDeliverySuppliedItemBuilder,
};
pub use supply_request::{
    SupplyRequest, SupplyRequestBuilder, SupplyRequestParameter, SupplyRequestParameterBuilder,
};

use crate::types::{Extension, Meta, Narrative};
use crate::validation::{Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor};

/// Cross-cutting content embedded by every resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainResource {
    pub(crate) id: Option<String>,
    pub(crate) meta: Option<Meta>,
    pub(crate) implicit_rules: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<AnyResource>,
    pub(crate) extension: Vec<Extension>,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl DomainResource {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.meta.is_none()
            && self.implicit_rules.is_none()
            && self.language.is_none()
            && self.text.is_none()
            && self.contained.is_empty()
            && self.extension.is_empty()
            && self.modifier_extension.is_empty()
    }

    /// Visit the shared children in declaration order.
    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        visitor::accept_str(self.id.as_deref(), "id", visitor);
        visitor::accept_node(self.meta.as_ref(), "meta", visitor);
        visitor::accept_str(self.implicit_rules.as_deref(), "implicitRules", visitor);
        visitor::accept_str(self.language.as_deref(), "language", visitor);
        visitor::accept_node(self.text.as_ref(), "text", visitor);
        visitor::accept_nodes(&self.contained, "contained", visitor);
        visitor::accept_nodes(&self.extension, "extension", visitor);
        visitor::accept_nodes(&self.modifier_extension, "modifierExtension", visitor);
    }

    /// Validate the shared content, descending into contained resources.
    pub(crate) fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.warn_id_format(self.id.as_deref());
        ctx.warn_code_format(self.language.as_deref(), "language");
        ctx.validate_child(self.meta.as_ref(), "meta");
        ctx.validate_child(self.text.as_ref(), "text");
        ctx.validate_children(&self.contained, "contained");
        ctx.validate_children(&self.extension, "extension");
        ctx.validate_children(&self.modifier_extension, "modifierExtension");
    }
}

/// Inherent getters plus identity/extension traits for a resource type
/// embedding a `resource` field group.
macro_rules! resource_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Logical id of the resource.
            pub fn id(&self) -> Option<&str> {
                self.resource.id.as_deref()
            }

            pub fn meta(&self) -> Option<&$crate::types::Meta> {
                self.resource.meta.as_ref()
            }

            pub fn implicit_rules(&self) -> Option<&str> {
                self.resource.implicit_rules.as_deref()
            }

            pub fn language(&self) -> Option<&str> {
                self.resource.language.as_deref()
            }

            pub fn text(&self) -> Option<&$crate::types::Narrative> {
                self.resource.text.as_ref()
            }

            pub fn contained(&self) -> &[$crate::resources::AnyResource] {
                &self.resource.contained
            }

            pub fn extension(&self) -> &[$crate::types::Extension] {
                &self.resource.extension
            }

            pub fn modifier_extension(&self) -> &[$crate::types::Extension] {
                &self.resource.modifier_extension
            }
        }

        impl $crate::types::HasIdentity for $ty {
            fn id(&self) -> Option<&str> {
                self.resource.id.as_deref()
            }
        }

        impl $crate::types::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::types::Extension] {
                &self.resource.extension
            }

            fn modifier_extension(&self) -> &[$crate::types::Extension] {
                &self.resource.modifier_extension
            }
        }
    };
}
pub(crate) use resource_accessors;

/// Fluent builder methods for the shared content of a resource builder
/// (field `resource`).
macro_rules! resource_builder_accessors {
    ($builder:ty) => {
        impl $builder {
            /// Set the logical id.
            pub fn with_id(mut self, id: impl Into<String>) -> Self {
                self.resource.id = Some(id.into());
                self
            }

            pub fn with_meta(mut self, meta: $crate::types::Meta) -> Self {
                self.resource.meta = Some(meta);
                self
            }

            pub fn with_implicit_rules(mut self, implicit_rules: impl Into<String>) -> Self {
                self.resource.implicit_rules = Some(implicit_rules.into());
                self
            }

            pub fn with_language(mut self, language: impl Into<String>) -> Self {
                self.resource.language = Some(language.into());
                self
            }

            pub fn with_text(mut self, text: $crate::types::Narrative) -> Self {
                self.resource.text = Some(text);
                self
            }

            /// Append one contained resource.
            pub fn add_contained(
                mut self,
                contained: impl Into<$crate::resources::AnyResource>,
            ) -> Self {
                self.resource.contained.push(contained.into());
                self
            }

            pub fn with_contained(
                mut self,
                contained: Vec<$crate::resources::AnyResource>,
            ) -> Self {
                self.resource.contained = contained;
                self
            }

            /// Append one extension.
            pub fn add_extension(mut self, extension: $crate::types::Extension) -> Self {
                self.resource.extension.push(extension);
                self
            }

            pub fn with_extension(mut self, extension: Vec<$crate::types::Extension>) -> Self {
                self.resource.extension = extension;
                self
            }

            /// Append one modifier extension.
            pub fn add_modifier_extension(mut self, extension: $crate::types::Extension) -> Self {
                self.resource.modifier_extension.push(extension);
                self
            }

            pub fn with_modifier_extension(
                mut self,
                extension: Vec<$crate::types::Extension>,
            ) -> Self {
                self.resource.modifier_extension = extension;
                self
            }
        }
    };
}
pub(crate) use resource_builder_accessors;

macro_rules! any_resource {
    ($($name:ident),+ $(,)?) => {
        /// Closed union over the supported resource kinds.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum AnyResource {
            $( $name($name), )+
        }

        impl AnyResource {
            /// FHIR name of the wrapped resource kind.
            pub fn resource_name(&self) -> &'static str {
                match self {
                    $( Self::$name(_) => stringify!($name), )+
                }
            }
        }

        $(
            impl From<$name> for AnyResource {
                fn from(resource: $name) -> Self {
                    Self::$name(resource)
                }
            }
        )+

        impl $crate::types::HasIdentity for AnyResource {
            fn id(&self) -> Option<&str> {
                match self {
                    $( Self::$name(resource) => resource.id(), )+
                }
            }
        }

        impl Visitable for AnyResource {
            fn type_name(&self) -> &'static str {
                match self {
                    $( Self::$name(resource) => resource.type_name(), )+
                }
            }

            fn has_children(&self) -> bool {
                match self {
                    $( Self::$name(resource) => resource.has_children(), )+
                }
            }

            fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
                match self {
                    $( Self::$name(resource) => resource.accept(name, index, visitor), )+
                }
            }
        }

        impl Validate for AnyResource {
            fn validate_node(&self, ctx: &mut ValidationContext) {
                match self {
                    $( Self::$name(resource) => resource.validate_node(ctx), )+
                }
            }
        }
    };
}

any_resource! {
    AppointmentResponse,
    BodyStructure,
    CareTeam,
    DeviceAssociation,
    DeviceDispense,
    DeviceMetric,
    Endpoint,
    EpisodeOfCare,
    Group,
    Location,
    Practitioner,
    Specimen,
    Substance,
    SupplyDelivery,
    SupplyRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_resource_reports_its_kind() {
        let team: AnyResource = CareTeam::builder()
            .with_id("team-1")
            .build_unvalidated()
            .into();
        assert_eq!(team.resource_name(), "CareTeam");
        assert_eq!(team.type_name(), "CareTeam");
    }
}
