//! The validation engine.
//!
//! Builders validate the *constructed* node: `build()` assembles the frozen
//! value, runs a pass over it and either returns it or rejects it with the
//! complete issue list. A pass walks one entity and its nested nodes,
//! pushing path segments so issues read like FHIR element paths
//! (`CareTeam.participant[2].member`). Every rule records its violation and
//! moves on — nothing short-circuits.
//!
//! The rules are:
//! required scalars and non-empty required lists, choice-shape membership,
//! reference-target membership, REQUIRED-strength value-set bindings, and
//! value-or-children on nested elements. Primitive format problems (id and
//! code spellings) are recorded as warnings and never fail a build.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::binding::CodeBinding;
use crate::choice::{self, ChoiceValue, FhirType};
use crate::reference;
use crate::types::{CodeableConcept, Reference};
use crate::visitor::Visitable;

/// Resource ids: letters, digits, hyphen, dot, at most 64 characters.
static ID_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-\.]{1,64}$").expect("id pattern compiles"));

/// Codes: no leading/trailing whitespace, single spaces inside.
static CODE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s]+( [^\s]+)*$").expect("code pattern compiles"));

/// How bad a finding is. Only errors reject a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// Classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    MissingRequiredField,
    InvalidChoiceType,
    InvalidReferenceTarget,
    InvalidCodeBinding,
    EmptyElement,
    InvalidFieldValue,
}

impl IssueKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing-required-field",
            Self::InvalidChoiceType => "invalid-choice-type",
            Self::InvalidReferenceTarget => "invalid-reference-target",
            Self::InvalidCodeBinding => "invalid-code-binding",
            Self::EmptyElement => "empty-element",
            Self::InvalidFieldValue => "invalid-field-value",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One finding of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ValidationIssue {
    pub fn error(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn warning(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, path, message)
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.code(), self.path, self.message)
    }
}

/// Accumulator for one validation pass.
///
/// Rooted at the type name of the entity under validation; nested walks
/// push and pop path segments around each child node.
#[derive(Debug)]
pub struct ValidationContext {
    root: &'static str,
    segments: Vec<String>,
    issues: Vec<ValidationIssue>,
}

impl ValidationContext {
    pub fn new(root: &'static str) -> Self {
        Self {
            root,
            segments: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn push_path(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn push_indexed(&mut self, field: &str, index: usize) {
        self.segments.push(format!("{field}[{index}]"));
    }

    pub fn pop_path(&mut self) {
        self.segments.pop();
    }

    /// Dotted path of the node currently under validation.
    pub fn current_path(&self) -> String {
        let mut path = String::from(self.root);
        for segment in &self.segments {
            path.push('.');
            path.push_str(segment);
        }
        path
    }

    fn path_for(&self, field: &str) -> String {
        let mut path = self.current_path();
        if !field.is_empty() {
            path.push('.');
            path.push_str(field);
        }
        path
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Close the pass and hand back every finding.
    pub fn finish(self) -> Vec<ValidationIssue> {
        let errors = self.error_count();
        if errors > 0 {
            tracing::debug!(
                root = self.root,
                errors,
                total = self.issues.len(),
                "validation pass recorded failures"
            );
        }
        self.issues
    }

    // ---- rules -----------------------------------------------------------

    /// Rule: a required scalar must be present.
    pub fn require<T>(&mut self, value: &Option<T>, field: &str) {
        if value.is_none() {
            self.add_issue(ValidationIssue::error(
                IssueKind::MissingRequiredField,
                self.path_for(field),
                "required field is absent",
            ));
        }
    }

    /// Rule: a required list must have at least one element.
    pub fn require_non_empty<T>(&mut self, list: &[T], field: &str) {
        if list.is_empty() {
            self.add_issue(ValidationIssue::error(
                IssueKind::MissingRequiredField,
                self.path_for(field),
                "required list is empty",
            ));
        }
    }

    /// Rule: a populated choice slot must hold one of the declared shapes.
    pub fn check_choice(
        &mut self,
        value: &Option<ChoiceValue>,
        field: &str,
        allowed: &'static [FhirType],
    ) {
        if let Some(value) = value
            && let Err(mismatch) = choice::check_choice(value, allowed)
        {
            let expected = mismatch
                .allowed
                .iter()
                .map(FhirType::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            self.add_issue(
                ValidationIssue::error(
                    IssueKind::InvalidChoiceType,
                    self.path_for(field),
                    mismatch.to_string(),
                )
                .with_expected(expected)
                .with_actual(mismatch.actual.as_str()),
            );
        }
    }

    /// Rules: choice slot both present and within its declared shapes.
    pub fn require_choice(
        &mut self,
        value: &Option<ChoiceValue>,
        field: &str,
        allowed: &'static [FhirType],
    ) {
        self.require(value, field);
        self.check_choice(value, field, allowed);
    }

    /// Rule: a reference with a derivable target kind must name a permitted
    /// kind.
    pub fn check_reference(
        &mut self,
        value: Option<&Reference>,
        field: &str,
        targets: &'static [&'static str],
    ) {
        if let Some(value) = value
            && let Err(violation) = reference::check_reference_target(value, targets)
        {
            self.add_issue(
                ValidationIssue::error(
                    IssueKind::InvalidReferenceTarget,
                    self.path_for(field),
                    violation.to_string(),
                )
                .with_expected(violation.allowed.join(", "))
                .with_actual(violation.actual),
            );
        }
    }

    /// [`Self::check_reference`] over a list, with indexed paths.
    pub fn check_references(
        &mut self,
        values: &[Reference],
        field: &str,
        targets: &'static [&'static str],
    ) {
        for (index, value) in values.iter().enumerate() {
            if let Err(violation) = reference::check_reference_target(value, targets) {
                self.add_issue(
                    ValidationIssue::error(
                        IssueKind::InvalidReferenceTarget,
                        format!("{}[{index}]", self.path_for(field)),
                        violation.to_string(),
                    )
                    .with_expected(violation.allowed.join(", "))
                    .with_actual(violation.actual),
                );
            }
        }
    }

    /// Reference-target rule applied to a choice slot holding a reference.
    pub fn check_choice_reference(
        &mut self,
        value: &Option<ChoiceValue>,
        field: &str,
        targets: &'static [&'static str],
    ) {
        if let Some(value) = value {
            self.check_reference(value.as_reference(), field, targets);
        }
    }

    /// Rule: REQUIRED-strength binding on a plain code.
    pub fn check_binding_code(
        &mut self,
        code: Option<&str>,
        field: &str,
        binding: &CodeBinding,
    ) {
        if let Some(code) = code
            && let Err(violation) = binding.check_code(code)
        {
            self.add_issue(
                ValidationIssue::error(
                    IssueKind::InvalidCodeBinding,
                    self.path_for(field),
                    violation.to_string(),
                )
                .with_expected(binding.value_set)
                .with_actual(violation.found.join(", ")),
            );
        }
    }

    /// Rule: REQUIRED-strength binding on a concept.
    pub fn check_binding_concept(
        &mut self,
        concept: Option<&CodeableConcept>,
        field: &str,
        binding: &CodeBinding,
    ) {
        if let Some(concept) = concept
            && let Err(violation) = binding.check_concept(concept)
        {
            self.add_issue(
                ValidationIssue::error(
                    IssueKind::InvalidCodeBinding,
                    self.path_for(field),
                    violation.to_string(),
                )
                .with_expected(binding.value_set)
                .with_actual(violation.found.join(", ")),
            );
        }
    }

    /// [`Self::check_binding_concept`] over a list, with indexed paths.
    pub fn check_binding_concepts(
        &mut self,
        concepts: &[CodeableConcept],
        field: &str,
        binding: &CodeBinding,
    ) {
        for (index, concept) in concepts.iter().enumerate() {
            if let Err(violation) = binding.check_concept(concept) {
                self.add_issue(
                    ValidationIssue::error(
                        IssueKind::InvalidCodeBinding,
                        format!("{}[{index}]", self.path_for(field)),
                        violation.to_string(),
                    )
                    .with_expected(binding.value_set)
                    .with_actual(violation.found.join(", ")),
                );
            }
        }
    }

    /// Rule: a nested element must have at least one populated field.
    /// Never applied to top-level resources.
    pub fn require_value_or_children(&mut self, node: &dyn Visitable) {
        if !node.has_children() {
            self.add_issue(ValidationIssue::error(
                IssueKind::EmptyElement,
                self.current_path(),
                format!("{} element has no value or children", node.type_name()),
            ));
        }
    }

    // ---- primitive format warnings --------------------------------------

    pub fn warn_id_format(&mut self, id: Option<&str>) {
        if let Some(id) = id
            && !ID_FORMAT.is_match(id)
        {
            self.add_issue(
                ValidationIssue::warning(
                    IssueKind::InvalidFieldValue,
                    self.path_for("id"),
                    "id does not match [A-Za-z0-9\\-\\.]{1,64}",
                )
                .with_actual(id),
            );
        }
    }

    pub fn warn_code_format(&mut self, code: Option<&str>, field: &str) {
        if let Some(code) = code
            && !CODE_FORMAT.is_match(code)
        {
            self.add_issue(
                ValidationIssue::warning(
                    IssueKind::InvalidFieldValue,
                    self.path_for(field),
                    "code has leading, trailing or doubled whitespace",
                )
                .with_actual(code),
            );
        }
    }

    pub fn warn_code_formats(&mut self, codes: &[String], field: &str) {
        for (index, code) in codes.iter().enumerate() {
            if !CODE_FORMAT.is_match(code) {
                self.add_issue(
                    ValidationIssue::warning(
                        IssueKind::InvalidFieldValue,
                        format!("{}[{index}]", self.path_for(field)),
                        "code has leading, trailing or doubled whitespace",
                    )
                    .with_actual(code.as_str()),
                );
            }
        }
    }

    // ---- nested walks ----------------------------------------------------

    /// Validate an optional child node under `field`.
    pub fn validate_child<T: Validate>(&mut self, node: Option<&T>, field: &str) {
        if let Some(node) = node {
            self.push_path(field);
            node.validate_node(self);
            self.pop_path();
        }
    }

    /// Validate each element of a child list under `field[index]`.
    pub fn validate_children<T: Validate>(&mut self, nodes: &[T], field: &str) {
        for (index, node) in nodes.iter().enumerate() {
            self.push_indexed(field, index);
            node.validate_node(self);
            self.pop_path();
        }
    }

    /// Descend into a choice slot when it holds a complex node.
    pub fn validate_choice_child(&mut self, value: &Option<ChoiceValue>, field: &str) {
        let Some(value) = value else { return };
        match value {
            ChoiceValue::Quantity(v) | ChoiceValue::Duration(v) => {
                self.validate_child(Some(v), field)
            }
            ChoiceValue::Period(v) => self.validate_child(Some(v), field),
            ChoiceValue::Timing(v) => self.validate_child(Some(v), field),
            ChoiceValue::Range(v) => self.validate_child(Some(v), field),
            ChoiceValue::Ratio(v) => self.validate_child(Some(v), field),
            ChoiceValue::Coding(v) => self.validate_child(Some(v), field),
            ChoiceValue::CodeableConcept(v) => self.validate_child(Some(v), field),
            ChoiceValue::Reference(v) => self.validate_child(Some(v), field),
            ChoiceValue::Identifier(v) => self.validate_child(Some(v), field),
            ChoiceValue::Annotation(v) => self.validate_child(Some(&**v), field),
            ChoiceValue::Attachment(v) => self.validate_child(Some(v), field),
            ChoiceValue::ContactPoint(v) => self.validate_child(Some(v), field),
            ChoiceValue::HumanName(v) => self.validate_child(Some(v), field),
            ChoiceValue::Address(v) => self.validate_child(Some(v), field),
            ChoiceValue::ExtendedContactDetail(v) => self.validate_child(Some(v), field),
            _ => {}
        }
    }
}

/// Shared tail of every `build()`: run a pass over the assembled value and
/// reject it when the pass recorded errors. Warnings alone never reject.
pub(crate) fn finalize<T: Validate>(value: T) -> Result<T, crate::error::BuildError> {
    let mut ctx = ValidationContext::new(value.type_name());
    value.validate_node(&mut ctx);
    if ctx.has_errors() {
        Err(crate::error::BuildError::new(value.type_name(), ctx.finish()))
    } else {
        tracing::trace!(type_name = value.type_name(), "entity built");
        Ok(value)
    }
}

/// A node that knows its own validation rules.
pub trait Validate: Visitable {
    /// Record this node's violations, and its children's, into `ctx`.
    fn validate_node(&self, ctx: &mut ValidationContext);

    /// Run a full pass rooted at this node and return every finding.
    fn validate(&self) -> Vec<ValidationIssue>
    where
        Self: Sized,
    {
        let mut ctx = ValidationContext::new(self.type_name());
        self.validate_node(&mut ctx);
        ctx.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted_and_indexed() {
        let mut ctx = ValidationContext::new("CareTeam");
        ctx.push_indexed("participant", 2);
        assert_eq!(ctx.path_for("member"), "CareTeam.participant[2].member");
        ctx.pop_path();
        assert_eq!(ctx.path_for("status"), "CareTeam.status");
    }

    #[test]
    fn require_records_and_continues() {
        let mut ctx = ValidationContext::new("Endpoint");
        let missing: Option<String> = None;
        ctx.require(&missing, "status");
        ctx.require(&missing, "address");
        let issues = ctx.finish();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.kind == IssueKind::MissingRequiredField));
        assert_eq!(issues[1].path, "Endpoint.address");
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut ctx = ValidationContext::new("Specimen");
        ctx.warn_id_format(Some("white space"));
        assert!(!ctx.has_errors());
        let issues = ctx.finish();
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].kind, IssueKind::InvalidFieldValue);
    }

    #[test]
    fn id_format_accepts_fhir_ids() {
        let mut ctx = ValidationContext::new("Group");
        ctx.warn_id_format(Some("example-id.v2"));
        assert!(ctx.finish().is_empty());
    }

    #[test]
    fn issue_display_reads_like_a_diagnostic() {
        let issue = ValidationIssue::error(
            IssueKind::MissingRequiredField,
            "DeviceAssociation.status",
            "required field is absent",
        );
        assert_eq!(
            issue.to_string(),
            "[missing-required-field] DeviceAssociation.status: required field is absent"
        );
    }
}
