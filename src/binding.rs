//! Value-set bindings.
//!
//! Coded fields declare a [`CodeBinding`] descriptor: the value set, the
//! code system and (for closed sets) the permitted codes, baked in at
//! compile time. Only REQUIRED-strength bindings are enforced; the other
//! strengths are carried as documentation and skipped by the evaluator.
//! Terminology-server resolution is deliberately out of scope.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CodeableConcept, Coding};

/// How strongly a value set binds its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingStrength {
    Required,
    Extensible,
    Preferred,
    Example,
}

/// Compile-time binding descriptor for one coded field.
///
/// An empty `codes` slice means the set is open but the bound system must
/// appear (used for system-only checks such as BCP-47 languages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBinding {
    pub name: &'static str,
    pub strength: BindingStrength,
    pub value_set: &'static str,
    pub system: &'static str,
    pub codes: &'static [&'static str],
}

impl CodeBinding {
    pub const fn required(
        name: &'static str,
        value_set: &'static str,
        system: &'static str,
        codes: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            strength: BindingStrength::Required,
            value_set,
            system,
            codes,
        }
    }

    pub const fn example(
        name: &'static str,
        value_set: &'static str,
        system: &'static str,
    ) -> Self {
        Self {
            name,
            strength: BindingStrength::Example,
            value_set,
            system,
            codes: &[],
        }
    }

    pub const fn extensible(
        name: &'static str,
        value_set: &'static str,
        system: &'static str,
    ) -> Self {
        Self {
            name,
            strength: BindingStrength::Extensible,
            value_set,
            system,
            codes: &[],
        }
    }

    pub const fn preferred(
        name: &'static str,
        value_set: &'static str,
        system: &'static str,
    ) -> Self {
        Self {
            name,
            strength: BindingStrength::Preferred,
            value_set,
            system,
            codes: &[],
        }
    }

    /// Only REQUIRED bindings fail validation.
    pub fn is_enforced(&self) -> bool {
        self.strength == BindingStrength::Required
    }

    fn coding_satisfies(&self, system: Option<&str>, code: &str) -> bool {
        if self.codes.is_empty() {
            // System-only binding: the bound system must be named.
            return system == Some(self.system);
        }
        let system_ok = match system {
            Some(s) => s == self.system,
            None => true,
        };
        system_ok && self.codes.contains(&code)
    }

    /// Check a plain code value.
    pub fn check_code(&self, code: &str) -> Result<(), BindingViolation> {
        if !self.is_enforced() || self.codes.is_empty() || self.codes.contains(&code) {
            return Ok(());
        }
        Err(self.violation(vec![code.to_owned()]))
    }

    /// Check one coding. A coding without a code carries nothing to judge.
    pub fn check_coding(&self, coding: &Coding) -> Result<(), BindingViolation> {
        if !self.is_enforced() {
            return Ok(());
        }
        match coding.code() {
            Some(code) if !self.coding_satisfies(coding.system(), code) => {
                Err(self.violation(vec![code.to_owned()]))
            }
            _ => Ok(()),
        }
    }

    /// Check a concept: at least one of its coded codings must satisfy the
    /// binding. A concept with no coded codings (text only) passes — this
    /// layer is structural.
    pub fn check_concept(&self, concept: &CodeableConcept) -> Result<(), BindingViolation> {
        if !self.is_enforced() {
            return Ok(());
        }
        let mut found = Vec::new();
        for coding in concept.coding() {
            let Some(code) = coding.code() else { continue };
            if self.coding_satisfies(coding.system(), code) {
                return Ok(());
            }
            found.push(code.to_owned());
        }
        if found.is_empty() {
            Ok(())
        } else {
            Err(self.violation(found))
        }
    }

    fn violation(&self, found: Vec<String>) -> BindingViolation {
        BindingViolation {
            value_set: self.value_set,
            found,
        }
    }
}

/// A coded value fell outside a REQUIRED binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingViolation {
    pub value_set: &'static str,
    pub found: Vec<String>,
}

impl fmt::Display for BindingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code '{}' is not a member of value set {}",
            self.found.join("', '"),
            self.value_set
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: CodeBinding = CodeBinding::required(
        "DeviceAssociationStatus",
        "http://hl7.org/fhir/ValueSet/deviceassociation-status",
        "http://hl7.org/fhir/deviceassociation-status",
        &["implanted", "explanted", "entered-in-error", "attached", "unknown"],
    );

    const LANGUAGE: CodeBinding = CodeBinding::required(
        "AllLanguages",
        "http://hl7.org/fhir/ValueSet/all-languages",
        "urn:ietf:bcp:47",
        &[],
    );

    fn concept(system: Option<&str>, code: &str) -> CodeableConcept {
        let mut coding = Coding::builder().with_code(code);
        if let Some(system) = system {
            coding = coding.with_system(system);
        }
        CodeableConcept::builder()
            .add_coding(coding.build_unvalidated())
            .build_unvalidated()
    }

    #[test]
    fn member_code_passes() {
        let c = concept(Some("http://hl7.org/fhir/deviceassociation-status"), "implanted");
        assert!(STATUS.check_concept(&c).is_ok());
    }

    #[test]
    fn systemless_member_code_passes() {
        assert!(STATUS.check_concept(&concept(None, "attached")).is_ok());
    }

    #[test]
    fn non_member_code_fails() {
        let err = STATUS.check_concept(&concept(None, "bogus")).unwrap_err();
        assert_eq!(err.found, vec!["bogus".to_owned()]);
        assert!(err.to_string().contains("deviceassociation-status"));
    }

    #[test]
    fn foreign_system_member_is_ignored() {
        // A translation coding under another system satisfies nothing, so
        // the concept as a whole is rejected.
        let c = concept(Some("http://example.org/other"), "implanted");
        assert!(STATUS.check_concept(&c).is_err());
    }

    #[test]
    fn text_only_concept_passes() {
        let c = CodeableConcept::builder().with_text("implanted").build_unvalidated();
        assert!(STATUS.check_concept(&c).is_ok());
    }

    #[test]
    fn system_only_binding_requires_the_system() {
        assert!(LANGUAGE.check_concept(&concept(Some("urn:ietf:bcp:47"), "en")).is_ok());
        assert!(LANGUAGE.check_concept(&concept(None, "en")).is_err());
    }

    #[test]
    fn non_required_strengths_never_fail() {
        let example = CodeBinding::example(
            "DeviceAssociationOperationStatus",
            "http://hl7.org/fhir/ValueSet/deviceassociation-operationstatus",
            "http://hl7.org/fhir/deviceassociation-operationstatus",
        );
        assert!(example.check_concept(&concept(None, "anything")).is_ok());
    }
}
