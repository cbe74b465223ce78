mod common;

use common::*;
use fhir_model_r5::*;

#[test]
fn test_builder_produces_frozen_entity() {
    let team = CareTeam::builder()
        .with_id("team-1")
        .with_status(CareTeamStatus::Active)
        .with_name("Home care team")
        .with_subject(reference_to("Patient/p-1"))
        .build()
        .unwrap();

    assert_eq!(team.id(), Some("team-1"));
    assert_eq!(team.status(), Some(CareTeamStatus::Active));
    assert_eq!(team.name(), Some("Home care team"));
    assert_eq!(
        team.subject().and_then(Reference::reference),
        Some("Patient/p-1")
    );
}

#[test]
fn test_to_builder_round_trip_preserves_value() {
    let team = home_care_team();
    let rebuilt = team.to_builder().build().unwrap();

    assert_eq!(rebuilt, team);
    assert_eq!(rebuilt.value_hash(), team.value_hash());
}

#[test]
fn test_to_builder_yields_a_modified_copy_not_a_mutation() {
    let original = home_care_team();
    let renamed = original
        .to_builder()
        .with_name("After-hours team")
        .build()
        .unwrap();

    assert_eq!(original.name(), Some("Home care team"));
    assert_eq!(renamed.name(), Some("After-hours team"));
    assert_ne!(renamed, original);
    assert_ne!(renamed.value_hash(), original.value_hash());
}

#[test]
fn test_cloned_builders_diverge_independently() {
    let base = Location::builder().with_name("Ward 3");
    let north = base.clone().with_description("North wing").build().unwrap();
    let south = base.with_description("South wing").build().unwrap();

    assert_eq!(north.name(), Some("Ward 3"));
    assert_eq!(south.name(), Some("Ward 3"));
    assert_ne!(north.description(), south.description());
}

#[test]
fn test_build_unvalidated_accepts_incomplete_entities() {
    let endpoint = Endpoint::builder()
        .with_name("draft endpoint")
        .build_unvalidated();

    assert_eq!(endpoint.name(), Some("draft endpoint"));
    // The same content is rejected by the validating path.
    let err = endpoint.to_builder().build().unwrap_err();
    assert_eq!(err.type_name(), "Endpoint");
    assert!(err.error_count() >= 3);
}

#[test]
fn test_value_hash_agrees_across_independent_builds() {
    let a = Substance::builder()
        .with_instance(false)
        .with_code(
            CodeableReference::builder()
                .with_concept(concept("http://snomed.info/sct", "88480006"))
                .build_unvalidated(),
        )
        .build()
        .unwrap();
    let b = a.clone();

    assert_eq!(a.value_hash(), b.value_hash());
    assert_eq!(a, b);
}

#[test]
fn test_shared_resource_content_flows_through_every_kind() {
    let practitioner = Practitioner::builder()
        .with_id("prac-9")
        .with_language("en-US")
        .with_meta(Meta::builder().with_version_id("4").build_unvalidated())
        .add_name(
            HumanName::builder()
                .with_family("Osei")
                .build_unvalidated(),
        )
        .build()
        .unwrap();

    assert_eq!(practitioner.id(), Some("prac-9"));
    assert_eq!(practitioner.language(), Some("en-US"));
    assert_eq!(
        practitioner.meta().and_then(Meta::version_id),
        Some("4")
    );
}

#[test]
fn test_contained_resources_are_carried_as_any_resource() {
    let contained_org = Location::builder()
        .with_id("loc-inner")
        .with_name("Cold storage")
        .build()
        .unwrap();
    let specimen = Specimen::builder()
        .add_contained(contained_org)
        .build()
        .unwrap();

    assert_eq!(specimen.contained().len(), 1);
    assert_eq!(specimen.contained()[0].resource_name(), "Location");
}

#[test]
fn test_any_resource_preserves_equality_and_hash() {
    let team = home_care_team();
    let a: AnyResource = team.clone().into();
    let b: AnyResource = team.into();

    assert_eq!(a, b);
    assert_eq!(a.resource_name(), "CareTeam");
}

#[test]
fn test_backbone_builders_round_trip() {
    let qualification = PractitionerQualification::builder()
        .with_code(text_concept("MD"))
        .with_issuer(reference_to("Organization/org-1"))
        .build()
        .unwrap();
    let rebuilt = qualification.to_builder().build().unwrap();

    assert_eq!(rebuilt, qualification);
    assert_eq!(rebuilt.value_hash(), qualification.value_hash());
}
