//! Base element contract shared by every node in the model.
//!
//! The Java-style `Element`/`BackboneElement` inheritance chain is rendered
//! as embedded field groups plus small traits. Concrete node types embed
//! [`Element`] (datatypes) or [`BackboneElement`] (resource components) and
//! pick up accessors, builder methods and the memoized value hash through
//! the macros at the bottom of this module.

use std::sync::OnceLock;

use crate::types::Extension;
use crate::validation::ValidationContext;
use crate::visitor::{self, Visitor};

/// Content every element carries: an optional element id plus ordered
/// extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Element {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Extension>,
}

impl Element {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// True when neither id nor extensions are populated.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_empty()
    }

    /// Visit the shared children: id first, then extensions.
    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        visitor::accept_str(self.id(), "id", visitor);
        visitor::accept_nodes(&self.extension, "extension", visitor);
    }

    /// Validate the shared content: id format plus nested extensions.
    pub(crate) fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.warn_id_format(self.id());
        ctx.validate_children(&self.extension, "extension");
    }
}

/// Content of backbone elements: element content plus modifier extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BackboneElement {
    pub(crate) element: Element,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl BackboneElement {
    pub fn id(&self) -> Option<&str> {
        self.element.id()
    }

    pub fn extension(&self) -> &[Extension] {
        self.element.extension()
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn is_empty(&self) -> bool {
        self.element.is_empty() && self.modifier_extension.is_empty()
    }

    /// Visit the shared children: id, extensions, then modifier extensions.
    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        visitor::accept_nodes(&self.modifier_extension, "modifierExtension", visitor);
    }

    pub(crate) fn validate_into(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_children(&self.modifier_extension, "modifierExtension");
    }
}

/// Identity of a node: its id string, when assigned.
pub trait HasIdentity {
    fn id(&self) -> Option<&str>;
}

/// Extension content of a node.
pub trait HasExtensions {
    fn extension(&self) -> &[Extension];

    /// Modifier extensions; empty for plain elements.
    fn modifier_extension(&self) -> &[Extension] {
        &[]
    }
}

/// Memo slot for the lazily computed value hash of a frozen node.
///
/// Not part of the node's value: equality ignores it and hashing through it
/// is a no-op, so containing types can derive `PartialEq`/`Eq`. Racing
/// first computations publish the same deterministic result.
#[derive(Debug, Clone, Default)]
pub struct HashCell(OnceLock<u64>);

impl HashCell {
    pub fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        *self.0.get_or_init(compute)
    }
}

impl PartialEq for HashCell {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HashCell {}

impl std::hash::Hash for HashCell {
    fn hash<H: std::hash::Hasher>(&self, _state: &mut H) {}
}

/// Implements the memoized value hash for a node type.
///
/// The listed fields feed a deterministic hasher once; the result is cached
/// in the node's `hash_cell` and replayed on every subsequent `Hash` call.
macro_rules! memoized_value_hash {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $ty {
            fn compute_hash(&self) -> u64 {
                use std::hash::{Hash, Hasher};
                let mut hasher = std::hash::DefaultHasher::new();
                $( self.$field.hash(&mut hasher); )+
                hasher.finish()
            }

            /// Memoized 64-bit value hash. Equal values hash equal; the
            /// first computation wins under concurrent access.
            pub fn value_hash(&self) -> u64 {
                self.hash_cell.get_or_compute(|| self.compute_hash())
            }
        }

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.value_hash());
            }
        }
    };
}
pub(crate) use memoized_value_hash;

/// Inherent getters plus `HasIdentity`/`HasExtensions` for a datatype that
/// embeds an `element` field group.
macro_rules! element_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Element id, if assigned.
            pub fn id(&self) -> Option<&str> {
                self.element.id()
            }

            /// Extensions attached to this element.
            pub fn extension(&self) -> &[$crate::types::Extension] {
                self.element.extension()
            }
        }

        impl $crate::types::HasIdentity for $ty {
            fn id(&self) -> Option<&str> {
                self.element.id()
            }
        }

        impl $crate::types::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::types::Extension] {
                self.element.extension()
            }
        }
    };
}
pub(crate) use element_accessors;

/// Same as [`element_accessors`] for backbone components embedding a
/// `backbone` field group.
macro_rules! backbone_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Element id, if assigned.
            pub fn id(&self) -> Option<&str> {
                self.backbone.id()
            }

            /// Extensions attached to this component.
            pub fn extension(&self) -> &[$crate::types::Extension] {
                self.backbone.extension()
            }

            /// Modifier extensions attached to this component.
            pub fn modifier_extension(&self) -> &[$crate::types::Extension] {
                self.backbone.modifier_extension()
            }
        }

        impl $crate::types::HasIdentity for $ty {
            fn id(&self) -> Option<&str> {
                self.backbone.id()
            }
        }

        impl $crate::types::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::types::Extension] {
                self.backbone.extension()
            }

            fn modifier_extension(&self) -> &[$crate::types::Extension] {
                self.backbone.modifier_extension()
            }
        }
    };
}
pub(crate) use backbone_accessors;

/// Fluent builder methods for the shared element content of a datatype
/// builder (field `element`).
macro_rules! element_builder_accessors {
    ($builder:ty) => {
        impl $builder {
            /// Set the element id.
            pub fn with_id(mut self, id: impl Into<String>) -> Self {
                self.element.id = Some(id.into());
                self
            }

            /// Append one extension.
            pub fn add_extension(mut self, extension: $crate::types::Extension) -> Self {
                self.element.extension.push(extension);
                self
            }

            /// Replace the staged extension list.
            pub fn with_extension(mut self, extension: Vec<$crate::types::Extension>) -> Self {
                self.element.extension = extension;
                self
            }
        }
    };
}
pub(crate) use element_builder_accessors;

/// Fluent builder methods for the shared content of a backbone component
/// builder (field `backbone`).
macro_rules! backbone_builder_accessors {
    ($builder:ty) => {
        impl $builder {
            /// Set the element id.
            pub fn with_id(mut self, id: impl Into<String>) -> Self {
                self.backbone.element.id = Some(id.into());
                self
            }

            /// Append one extension.
            pub fn add_extension(mut self, extension: $crate::types::Extension) -> Self {
                self.backbone.element.extension.push(extension);
                self
            }

            /// Replace the staged extension list.
            pub fn with_extension(mut self, extension: Vec<$crate::types::Extension>) -> Self {
                self.backbone.element.extension = extension;
                self
            }

            /// Append one modifier extension.
            pub fn add_modifier_extension(mut self, extension: $crate::types::Extension) -> Self {
                self.backbone.modifier_extension.push(extension);
                self
            }

            /// Replace the staged modifier extension list.
            pub fn with_modifier_extension(
                mut self,
                extension: Vec<$crate::types::Extension>,
            ) -> Self {
                self.backbone.modifier_extension = extension;
                self
            }
        }
    };
}
pub(crate) use backbone_builder_accessors;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_cell_is_transparent_to_equality() {
        let a = HashCell::new();
        let b = HashCell::new();
        a.get_or_compute(|| 42);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_cell_memoizes_first_value() {
        let cell = HashCell::new();
        assert_eq!(cell.get_or_compute(|| 7), 7);
        assert_eq!(cell.get_or_compute(|| 9), 7);
    }

    #[test]
    fn empty_element_reports_empty() {
        let element = Element::default();
        assert!(element.is_empty());
        assert!(BackboneElement::default().is_empty());
    }
}
