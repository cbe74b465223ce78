mod common;

use common::*;
use fhir_model_r5::*;

#[test]
fn test_well_formed_entities_report_no_findings() {
    let team = home_care_team();
    assert!(team.validate().is_empty());
}

#[test]
fn test_build_collects_every_violation_in_one_pass() {
    let err = DeviceDispense::builder().build().unwrap_err();

    assert_eq!(err.type_name(), "DeviceDispense");
    assert_eq!(
        error_paths(&err),
        vec![
            "DeviceDispense.status",
            "DeviceDispense.device",
            "DeviceDispense.subject"
        ]
    );
    assert!(
        err.issues()
            .iter()
            .all(|issue| issue.kind == IssueKind::MissingRequiredField)
    );
}

#[test]
fn test_reference_strings_resolve_their_target_kind() {
    let err = EpisodeOfCare::builder()
        .with_status(EpisodeOfCareStatus::Active)
        .with_patient(reference_to("Organization/org-1"))
        .build()
        .unwrap_err();

    assert_eq!(err.error_count(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.kind, IssueKind::InvalidReferenceTarget);
    assert_eq!(issue.path, "EpisodeOfCare.patient");
    assert_eq!(issue.actual.as_deref(), Some("Organization"));
}

#[test]
fn test_declared_target_type_wins_over_the_reference_string() {
    // A UUID literal carries no kind; the declared type supplies it.
    let episode = EpisodeOfCare::builder()
        .with_status(EpisodeOfCareStatus::Active)
        .with_patient(typed_reference(
            "Patient",
            "urn:uuid:0c2f4a5e-5b2e-4c7a-9f3d-2a6f8e1b9c70",
        ))
        .build();
    assert!(episode.is_ok());

    // And when both are present, the declared type is what gets checked.
    let err = EpisodeOfCare::builder()
        .with_status(EpisodeOfCareStatus::Active)
        .with_patient(typed_reference("Organization", "Patient/p-1"))
        .build()
        .unwrap_err();
    assert_eq!(err.issues()[0].actual.as_deref(), Some("Organization"));
}

#[test]
fn test_display_only_references_are_not_target_checked() {
    let episode = EpisodeOfCare::builder()
        .with_status(EpisodeOfCareStatus::Active)
        .with_patient(reference_to("Patient/p-1"))
        .with_care_manager(display_reference("Case manager on call"))
        .build();

    assert!(episode.is_ok());
}

#[test]
fn test_required_bindings_reject_codes_outside_the_value_set() {
    let err = Group::builder()
        .with_type(GroupType::Person)
        .with_membership("ad-hoc")
        .build()
        .unwrap_err();

    assert_eq!(err.error_count(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.kind, IssueKind::InvalidCodeBinding);
    assert_eq!(issue.path, "Group.membership");
    assert!(
        issue
            .expected
            .as_deref()
            .is_some_and(|vs| vs.contains("group-membership-basis"))
    );
}

#[test]
fn test_system_only_bindings_match_on_the_coding_system() {
    let spoken = |concept| {
        Practitioner::builder()
            .add_communication(
                PractitionerCommunication::builder()
                    .with_language(concept)
                    .build_unvalidated(),
            )
            .build()
    };

    assert!(spoken(concept("urn:ietf:bcp:47", "sw")).is_ok());

    let err = spoken(concept("http://example.org/private-langs", "sw")).unwrap_err();
    assert_eq!(err.issues()[0].path, "Practitioner.communication[0].language");
    assert_eq!(err.issues()[0].kind, IssueKind::InvalidCodeBinding);
}

#[test]
fn test_choice_slots_enforce_their_declared_shapes() {
    let err = Group::builder()
        .with_type(GroupType::Person)
        .with_membership("definitional")
        .add_characteristic(
            GroupCharacteristic::builder()
                .with_code(text_concept("ambulatory"))
                .with_value("not a shape the slot takes")
                .with_exclude(false)
                .build_unvalidated(),
        )
        .build()
        .unwrap_err();

    assert_eq!(err.error_count(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.kind, IssueKind::InvalidChoiceType);
    assert_eq!(issue.path, "Group.characteristic[0].value");
    assert_eq!(issue.actual.as_deref(), Some("string"));
    assert!(issue.expected.as_deref().is_some_and(|e| e.contains("boolean")));
}

#[test]
fn test_empty_nested_elements_are_rejected() {
    let err = CareTeam::builder()
        .add_participant(CareTeamParticipant::builder().build_unvalidated())
        .build()
        .unwrap_err();

    assert_eq!(err.error_count(), 1);
    assert_eq!(err.issues()[0].kind, IssueKind::EmptyElement);
    assert_eq!(err.issues()[0].path, "CareTeam.participant[0]");
}

#[test]
fn test_format_warnings_never_block_a_build() {
    let location = Location::builder()
        .with_id("white space")
        .with_name("Ward 3")
        .build()
        .unwrap();

    let issues = location.validate();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[0].kind, IssueKind::InvalidFieldValue);
    assert_eq!(issues[0].path, "Location.id");
    assert_eq!(issues[0].actual.as_deref(), Some("white space"));
}

#[test]
fn test_warnings_ride_along_on_a_failed_build() {
    let err = Group::builder().with_id("bad id").build().unwrap_err();

    assert_eq!(err.error_count(), 2);
    assert_eq!(err.issues().len(), 3);
    assert_eq!(err.issues()[0].severity, Severity::Warning);
}

#[test]
fn test_contained_resources_validate_through_their_parent() {
    let specimen = Specimen::builder()
        .add_contained(Endpoint::builder().build_unvalidated())
        .build_unvalidated();

    let issues = specimen.validate();
    assert_eq!(
        issue_paths(&issues),
        vec![
            "Specimen.contained[0].status",
            "Specimen.contained[0].connectionType",
            "Specimen.contained[0].address"
        ]
    );
}

#[test]
fn test_findings_render_as_an_operation_outcome() {
    let issues = Group::builder().build_unvalidated().validate();
    let outcome = to_operation_outcome(&issues);

    assert_eq!(outcome["resourceType"], "OperationOutcome");
    assert_eq!(outcome["issue"][0]["severity"], "error");
    assert_eq!(outcome["issue"][0]["code"], "required");
    assert_eq!(outcome["issue"][0]["expression"][0], "Group.type");
}

#[test]
fn test_clean_validation_renders_the_all_clear_outcome() {
    let outcome = to_operation_outcome(&home_care_team().validate());
    assert_eq!(outcome["issue"][0]["severity"], "information");
}
