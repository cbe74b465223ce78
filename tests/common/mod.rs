use fhir_model_r5::*;

#[allow(dead_code)]
pub fn reference_to(target: &str) -> Reference {
    Reference::builder()
        .with_reference(target)
        .build_unvalidated()
}

#[allow(dead_code)]
pub fn typed_reference(kind: &str, target: &str) -> Reference {
    Reference::builder()
        .with_reference(target)
        .with_target_type(kind)
        .build_unvalidated()
}

#[allow(dead_code)]
pub fn display_reference(display: &str) -> Reference {
    Reference::builder()
        .with_display(display)
        .build_unvalidated()
}

#[allow(dead_code)]
pub fn concept(system: &str, code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .add_coding(
            Coding::builder()
                .with_system(system)
                .with_code(code)
                .build_unvalidated(),
        )
        .build_unvalidated()
}

#[allow(dead_code)]
pub fn text_concept(text: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .with_text(text)
        .build_unvalidated()
}

#[allow(dead_code)]
pub fn home_care_team() -> CareTeam {
    CareTeam::builder()
        .with_id("team-1")
        .with_status(CareTeamStatus::Active)
        .with_name("Home care team")
        .add_participant(
            CareTeamParticipant::builder()
                .with_role(concept("http://snomed.info/sct", "17561000"))
                .with_member(reference_to("Practitioner/p-1"))
                .build_unvalidated(),
        )
        .build_unvalidated()
}

#[allow(dead_code)]
pub fn issue_paths(issues: &[ValidationIssue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.path.as_str()).collect()
}

#[allow(dead_code)]
pub fn error_paths(err: &BuildError) -> Vec<&str> {
    err.issues()
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .map(|issue| issue.path.as_str())
        .collect()
}
