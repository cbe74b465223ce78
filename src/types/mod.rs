//! Datatypes shared across resources, plus the closed code enums.

pub mod codes;
pub(crate) mod element;

mod annotation;
mod attachment;
mod availability;
mod coding;
mod contact;
mod extension;
mod identifier;
mod meta;
mod period;
mod quantity;

pub use annotation::{Annotation, AnnotationBuilder};
pub use attachment::{Attachment, AttachmentBuilder};
pub use availability::{
    Availability, AvailabilityBuilder, AvailableTime, AvailableTimeBuilder, NotAvailableTime,
    NotAvailableTimeBuilder, VirtualServiceDetail, VirtualServiceDetailBuilder,
};
pub use codes::*;
pub use coding::{
    CodeableConcept, CodeableConceptBuilder, CodeableReference, CodeableReferenceBuilder, Coding,
    CodingBuilder,
};
pub use contact::{
    Address, AddressBuilder, ContactPoint, ContactPointBuilder, ExtendedContactDetail,
    ExtendedContactDetailBuilder, HumanName, HumanNameBuilder,
};
pub use element::{BackboneElement, Element, HasExtensions, HasIdentity};
pub use extension::{Extension, ExtensionBuilder};
pub use identifier::{Identifier, IdentifierBuilder, Reference, ReferenceBuilder};
pub use meta::{Meta, MetaBuilder, Narrative, NarrativeBuilder};
pub use period::{
    Period, PeriodBuilder, Timing, TimingBuilder, TimingRepeat, TimingRepeatBuilder,
};
pub use quantity::{
    Duration, Quantity, QuantityBuilder, Range, RangeBuilder, Ratio, RatioBuilder, SimpleQuantity,
};
