//! Error types for the object model.
//!
//! A validating build either returns the frozen entity or a [`BuildError`]
//! carrying every violation found during the pass. Individual findings are
//! [`ValidationIssue`]s; see [`crate::validation`] for the rule set.

use std::fmt;

use thiserror::Error;

use crate::validation::{Severity, ValidationIssue};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FhirModelError>;

/// Umbrella error for the model crate.
#[derive(Debug, Clone, Error)]
pub enum FhirModelError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    UnknownCode(#[from] UnknownCodeError),
}

/// Rejection of a validating `build()`.
///
/// Aggregates the full issue list of the failed pass; error-severity issues
/// caused the rejection, warnings ride along for diagnostics.
#[derive(Debug, Clone)]
pub struct BuildError {
    type_name: &'static str,
    issues: Vec<ValidationIssue>,
}

impl BuildError {
    pub(crate) fn new(type_name: &'static str, issues: Vec<ValidationIssue>) -> Self {
        Self { type_name, issues }
    }

    /// Type of the entity that failed to build.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Every issue recorded by the failed pass, in evaluation order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} build rejected: {} validation error(s)",
            self.type_name,
            self.error_count()
        )?;
        for issue in self.issues.iter().filter(|i| i.severity == Severity::Error) {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

/// A string failed to parse as a closed FHIR code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {code_type} code")]
pub struct UnknownCodeError {
    code_type: &'static str,
    value: String,
}

impl UnknownCodeError {
    pub(crate) fn new(code_type: &'static str, value: impl Into<String>) -> Self {
        Self {
            code_type,
            value: value.into(),
        }
    }

    /// FHIR code type that rejected the value.
    pub fn code_type(&self) -> &'static str {
        self.code_type
    }

    /// The rejected string.
    pub fn value(&self) -> &str {
        &self.value
    }
}
