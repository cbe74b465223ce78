//! Rendering validation findings as an OperationOutcome.
//!
//! Keeps reporting interoperable without dragging a full OperationOutcome
//! resource into the model: the rendering is a `serde_json::Value` shaped
//! the way FHIR servers exchange outcomes, one issue entry per finding.

use serde_json::{Value, json};

use crate::validation::{IssueKind, Severity, ValidationIssue};

fn severity_code(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Information => "information",
    }
}

/// FHIR issue-type code closest to each of our issue kinds.
fn issue_type_code(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::MissingRequiredField => "required",
        IssueKind::InvalidChoiceType => "structure",
        IssueKind::InvalidReferenceTarget => "value",
        IssueKind::InvalidCodeBinding => "code-invalid",
        IssueKind::EmptyElement => "invariant",
        IssueKind::InvalidFieldValue => "value",
    }
}

/// Render findings as an OperationOutcome-shaped JSON value.
///
/// An empty finding list renders as the conventional all-clear outcome with
/// a single informational issue.
pub fn to_operation_outcome(issues: &[ValidationIssue]) -> Value {
    if issues.is_empty() {
        return json!({
            "resourceType": "OperationOutcome",
            "issue": [{
                "severity": "information",
                "code": "informational",
                "details": { "text": "All OK" }
            }]
        });
    }
    let rendered: Vec<Value> = issues
        .iter()
        .map(|issue| {
            json!({
                "severity": severity_code(issue.severity),
                "code": issue_type_code(issue.kind),
                "details": { "text": issue.message },
                "diagnostics": issue.to_string(),
                "expression": [issue.path],
            })
        })
        .collect();
    json!({
        "resourceType": "OperationOutcome",
        "issue": rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_findings_render_all_ok() {
        let outcome = to_operation_outcome(&[]);
        assert_eq!(outcome["resourceType"], "OperationOutcome");
        assert_eq!(outcome["issue"][0]["severity"], "information");
        assert_eq!(outcome["issue"][0]["details"]["text"], "All OK");
    }

    #[test]
    fn findings_map_to_fhir_issue_codes() {
        let issues = vec![
            ValidationIssue::error(
                IssueKind::MissingRequiredField,
                "Endpoint.address",
                "required field is absent",
            ),
            ValidationIssue::warning(
                IssueKind::InvalidFieldValue,
                "Endpoint.id",
                "id does not match [A-Za-z0-9\\-\\.]{1,64}",
            ),
        ];
        let outcome = to_operation_outcome(&issues);
        assert_eq!(outcome["issue"][0]["code"], "required");
        assert_eq!(outcome["issue"][0]["expression"][0], "Endpoint.address");
        assert_eq!(outcome["issue"][1]["severity"], "warning");
    }
}
