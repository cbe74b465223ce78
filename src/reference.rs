//! Reference target checking.
//!
//! A [`Reference`] may name its target kind explicitly (the `type` element)
//! or implicitly through a `Kind/id` literal. Fields declare which kinds
//! they accept as a `&'static [&'static str]` allow-list; the check is a
//! case-sensitive name comparison. Nothing is resolved — a reference whose
//! kind cannot be derived always passes.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;

use crate::types::Reference;

/// Resource kinds the literal parser trusts as a leading path segment.
static KNOWN_RESOURCE_KINDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Account",
        "Appointment",
        "AppointmentResponse",
        "BiologicallyDerivedProduct",
        "BodyStructure",
        "CarePlan",
        "CareTeam",
        "Condition",
        "Contract",
        "Device",
        "DeviceAssociation",
        "DeviceDefinition",
        "DeviceDispense",
        "DeviceMetric",
        "DeviceRequest",
        "DiagnosticReport",
        "DocumentReference",
        "Encounter",
        "Endpoint",
        "EpisodeOfCare",
        "Group",
        "HealthcareService",
        "ImagingSelection",
        "InventoryItem",
        "Location",
        "Medication",
        "NutritionProduct",
        "Observation",
        "Organization",
        "Patient",
        "Practitioner",
        "PractitionerRole",
        "Procedure",
        "Provenance",
        "RelatedPerson",
        "ServiceRequest",
        "Specimen",
        "Substance",
        "SupplyDelivery",
        "SupplyRequest",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` spells a resource kind this model knows about.
pub fn is_resource_kind(name: &str) -> bool {
    KNOWN_RESOURCE_KINDS.contains(name)
}

/// Effective target kind of a reference: the explicit type tag when
/// present, else the leading segment of a relative `Kind/id` literal.
pub fn derive_target_kind(reference: &Reference) -> Option<&str> {
    if let Some(kind) = reference.target_type() {
        return Some(kind);
    }
    let literal = reference.reference()?;
    let (head, _) = literal.split_once('/')?;
    is_resource_kind(head).then_some(head)
}

/// A reference named a target kind outside its field's allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTargetViolation {
    pub actual: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for ReferenceTargetViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reference to {} is not permitted; expected one of [{}]",
            self.actual,
            self.allowed.join(", ")
        )
    }
}

/// Static, name-based membership test. Untyped references pass.
pub fn check_reference_target(
    reference: &Reference,
    allowed: &'static [&'static str],
) -> Result<(), ReferenceTargetViolation> {
    match derive_target_kind(reference) {
        Some(kind) if !allowed.contains(&kind) => Err(ReferenceTargetViolation {
            actual: kind.to_owned(),
            allowed,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECT: &[&str] = &["Patient", "Group"];

    #[test]
    fn explicit_tag_in_allow_list_passes() {
        let reference = Reference::builder()
            .with_target_type("Patient")
            .with_reference("Patient/example")
            .build_unvalidated();
        assert!(check_reference_target(&reference, SUBJECT).is_ok());
    }

    #[test]
    fn explicit_tag_outside_allow_list_fails() {
        let reference = Reference::builder().with_target_type("Device").build_unvalidated();
        let err = check_reference_target(&reference, SUBJECT).unwrap_err();
        assert_eq!(err.actual, "Device");
        assert!(err.to_string().contains("Patient"));
    }

    #[test]
    fn untyped_reference_passes() {
        let reference = Reference::builder()
            .with_display("somebody")
            .build_unvalidated();
        assert!(check_reference_target(&reference, SUBJECT).is_ok());
    }

    #[test]
    fn kind_is_parsed_from_relative_literal() {
        let reference = Reference::builder()
            .with_reference("Device/pump-1")
            .build_unvalidated();
        assert_eq!(derive_target_kind(&reference), Some("Device"));
        assert!(check_reference_target(&reference, SUBJECT).is_err());
    }

    #[test]
    fn unknown_leading_segment_is_not_a_kind() {
        let reference = Reference::builder()
            .with_reference("https://example.org/fhir/Patient/1")
            .build_unvalidated();
        assert_eq!(derive_target_kind(&reference), None);
        assert!(check_reference_target(&reference, SUBJECT).is_ok());
    }

    #[test]
    fn match_is_case_sensitive() {
        let reference = Reference::builder()
            .with_reference("patient/1")
            .build_unvalidated();
        assert_eq!(derive_target_kind(&reference), None);
    }

    #[test]
    fn explicit_tag_wins_over_literal() {
        let reference = Reference::builder()
            .with_target_type("Group")
            .with_reference("Device/when-tagged-this-is-ignored")
            .build_unvalidated();
        assert!(check_reference_target(&reference, SUBJECT).is_ok());
    }
}
