//! # FHIR Model R5
//!
//! An immutable object model for a subset of FHIR R5 resources, with
//! validating builders, structural visitors, and memoized value hashing.
//!
//! ## Features
//!
//! - **Immutable entities**: resources and datatypes freeze at `build()`;
//!   edits go through `to_builder()` copies
//! - **Collecting validation**: a build reports every violation in one pass
//!   instead of stopping at the first
//! - **Shape rules**: polymorphic `value[x]` choices, reference target kinds,
//!   and required terminology bindings are checked per element
//! - **Visitors**: walk any entity tree in declaration order without knowing
//!   its concrete type
//! - **Memoized hashing**: deep value hashes computed once per entity
//!
//! ## Quick Start
//!
//! ```rust
//! use fhir_model_r5::resources::{CareTeam, CareTeamParticipant};
//! use fhir_model_r5::types::Reference;
//! use fhir_model_r5::types::codes::CareTeamStatus;
//!
//! # fn main() -> fhir_model_r5::Result<()> {
//! let team = CareTeam::builder()
//!     .with_status(CareTeamStatus::Active)
//!     .with_name("Home care team")
//!     .add_participant(
//!         CareTeamParticipant::builder()
//!             .with_member(Reference::builder().with_reference("Practitioner/p1").build()?)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! assert_eq!(team.name(), Some("Home care team"));
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod choice;
pub mod error;
pub mod outcome;
pub mod reference;
pub mod resources;
pub mod types;
pub mod validation;
pub mod visitor;

pub use binding::{BindingStrength, BindingViolation, CodeBinding};
pub use choice::{ChoiceValue, FhirType};
pub use error::Result; // Our Result type takes precedence
pub use error::{BuildError, FhirModelError, UnknownCodeError};
pub use outcome::to_operation_outcome;
pub use reference::{derive_target_kind, is_resource_kind};
pub use resources::*;
pub use types::*;
pub use validation::{IssueKind, Severity, Validate, ValidationContext, ValidationIssue};
pub use visitor::{Visitable, Visitor};
