//! Choice elements (`value[x]`) as a tagged union.
//!
//! A choice slot stores one [`ChoiceValue`]; which shapes a given field
//! admits is declared per field as a `&'static [FhirType]` allow-set and
//! enforced by [`check_choice`] during validation. Shape discrimination is
//! a variant match, never a downcast.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{
    Address, Annotation, Attachment, CodeableConcept, Coding, ContactPoint, ExtendedContactDetail,
    HumanName, Identifier, Period, Quantity, Range, Ratio, Reference, Timing,
};
use crate::visitor::{Visitable, Visitor};

/// Shape tags for choice slots, spelled the way FHIR spells its types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FhirType {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "uri")]
    Uri,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "instant")]
    Instant,
    Quantity,
    Duration,
    Period,
    Timing,
    Range,
    Ratio,
    Coding,
    CodeableConcept,
    Reference,
    Identifier,
    Annotation,
    Attachment,
    ContactPoint,
    HumanName,
    Address,
    ExtendedContactDetail,
}

impl FhirType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::Instant => "instant",
            Self::Quantity => "Quantity",
            Self::Duration => "Duration",
            Self::Period => "Period",
            Self::Timing => "Timing",
            Self::Range => "Range",
            Self::Ratio => "Ratio",
            Self::Coding => "Coding",
            Self::CodeableConcept => "CodeableConcept",
            Self::Reference => "Reference",
            Self::Identifier => "Identifier",
            Self::Annotation => "Annotation",
            Self::Attachment => "Attachment",
            Self::ContactPoint => "ContactPoint",
            Self::HumanName => "HumanName",
            Self::Address => "Address",
            Self::ExtendedContactDetail => "ExtendedContactDetail",
        }
    }
}

impl fmt::Display for FhirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value held by a choice slot.
///
/// `Duration` wraps a [`Quantity`] but keeps its own tag, mirroring the
/// FHIR distinction between the two types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChoiceValue {
    Boolean(bool),
    Integer(i32),
    Decimal(Decimal),
    String(String),
    Uri(String),
    Url(String),
    Code(String),
    Markdown(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Time(NaiveTime),
    Instant(DateTime<Utc>),
    Quantity(Quantity),
    Duration(Quantity),
    Period(Period),
    Timing(Timing),
    Range(Range),
    Ratio(Ratio),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Reference(Reference),
    Identifier(Identifier),
    Annotation(Box<Annotation>),
    Attachment(Attachment),
    ContactPoint(ContactPoint),
    HumanName(HumanName),
    Address(Address),
    ExtendedContactDetail(ExtendedContactDetail),
}

impl ChoiceValue {
    /// Shape tag of the stored value.
    pub fn fhir_type(&self) -> FhirType {
        match self {
            Self::Boolean(_) => FhirType::Boolean,
            Self::Integer(_) => FhirType::Integer,
            Self::Decimal(_) => FhirType::Decimal,
            Self::String(_) => FhirType::String,
            Self::Uri(_) => FhirType::Uri,
            Self::Url(_) => FhirType::Url,
            Self::Code(_) => FhirType::Code,
            Self::Markdown(_) => FhirType::Markdown,
            Self::Date(_) => FhirType::Date,
            Self::DateTime(_) => FhirType::DateTime,
            Self::Time(_) => FhirType::Time,
            Self::Instant(_) => FhirType::Instant,
            Self::Quantity(_) => FhirType::Quantity,
            Self::Duration(_) => FhirType::Duration,
            Self::Period(_) => FhirType::Period,
            Self::Timing(_) => FhirType::Timing,
            Self::Range(_) => FhirType::Range,
            Self::Ratio(_) => FhirType::Ratio,
            Self::Coding(_) => FhirType::Coding,
            Self::CodeableConcept(_) => FhirType::CodeableConcept,
            Self::Reference(_) => FhirType::Reference,
            Self::Identifier(_) => FhirType::Identifier,
            Self::Annotation(_) => FhirType::Annotation,
            Self::Attachment(_) => FhirType::Attachment,
            Self::ContactPoint(_) => FhirType::ContactPoint,
            Self::HumanName(_) => FhirType::HumanName,
            Self::Address(_) => FhirType::Address,
            Self::ExtendedContactDetail(_) => FhirType::ExtendedContactDetail,
        }
    }

    /// The wrapped reference, when this value is one.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Dispatch to the visitor under the slot's element name.
    pub(crate) fn accept_as(&self, name: &str, visitor: &mut dyn Visitor) {
        match self {
            Self::Boolean(v) => visitor.visit_bool(name, None, *v),
            Self::Integer(v) => visitor.visit_int(name, None, i64::from(*v)),
            Self::Decimal(v) => visitor.visit_decimal(name, None, *v),
            Self::String(v) | Self::Uri(v) | Self::Url(v) | Self::Code(v) | Self::Markdown(v) => {
                visitor.visit_str(name, None, v)
            }
            Self::Date(v) => visitor.visit_date(name, None, *v),
            Self::DateTime(v) => visitor.visit_date_time(name, None, *v),
            Self::Time(v) => visitor.visit_time(name, None, *v),
            Self::Instant(v) => visitor.visit_instant(name, None, *v),
            Self::Quantity(v) | Self::Duration(v) => v.accept(name, None, visitor),
            Self::Period(v) => v.accept(name, None, visitor),
            Self::Timing(v) => v.accept(name, None, visitor),
            Self::Range(v) => v.accept(name, None, visitor),
            Self::Ratio(v) => v.accept(name, None, visitor),
            Self::Coding(v) => v.accept(name, None, visitor),
            Self::CodeableConcept(v) => v.accept(name, None, visitor),
            Self::Reference(v) => v.accept(name, None, visitor),
            Self::Identifier(v) => v.accept(name, None, visitor),
            Self::Annotation(v) => v.accept(name, None, visitor),
            Self::Attachment(v) => v.accept(name, None, visitor),
            Self::ContactPoint(v) => v.accept(name, None, visitor),
            Self::HumanName(v) => v.accept(name, None, visitor),
            Self::Address(v) => v.accept(name, None, visitor),
            Self::ExtendedContactDetail(v) => v.accept(name, None, visitor),
        }
    }
}

/// A choice slot held a shape outside its declared allow-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceTypeMismatch {
    pub actual: FhirType,
    pub allowed: &'static [FhirType],
}

impl fmt::Display for ChoiceTypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value of type {} is not permitted; expected one of [", self.actual)?;
        for (i, t) in self.allowed.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{t}")?;
        }
        f.write_str("]")
    }
}

/// Membership test for a populated choice slot. Order of the allow-set is
/// irrelevant; absence is the concern of the required-field rule, not this
/// one.
pub fn check_choice(
    value: &ChoiceValue,
    allowed: &'static [FhirType],
) -> Result<(), ChoiceTypeMismatch> {
    let actual = value.fhir_type();
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(ChoiceTypeMismatch { actual, allowed })
    }
}

macro_rules! choice_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for ChoiceValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

choice_from! {
    Boolean(bool),
    Integer(i32),
    Decimal(Decimal),
    String(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Time(NaiveTime),
    Instant(DateTime<Utc>),
    Period(Period),
    Timing(Timing),
    Range(Range),
    Ratio(Ratio),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Reference(Reference),
    Identifier(Identifier),
    Attachment(Attachment),
    ContactPoint(ContactPoint),
    HumanName(HumanName),
    Address(Address),
    ExtendedContactDetail(ExtendedContactDetail),
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Quantity> for ChoiceValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<Annotation> for ChoiceValue {
    fn from(value: Annotation) -> Self {
        Self::Annotation(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCCURRENCE: &[FhirType] = &[FhirType::DateTime, FhirType::Period, FhirType::Timing];

    #[test]
    fn accepts_member_shapes_in_any_order() {
        let value = ChoiceValue::Period(Period::builder().build_unvalidated());
        assert!(check_choice(&value, OCCURRENCE).is_ok());
        assert!(check_choice(&value, &[FhirType::Period, FhirType::DateTime]).is_ok());
    }

    #[test]
    fn rejects_shapes_outside_the_set() {
        let value = ChoiceValue::from("not a date");
        let err = check_choice(&value, OCCURRENCE).unwrap_err();
        assert_eq!(err.actual, FhirType::String);
        assert!(err.to_string().contains("dateTime"));
    }

    #[test]
    fn duration_keeps_its_own_tag() {
        let quantity = Quantity::builder().build_unvalidated();
        assert_eq!(
            ChoiceValue::Duration(quantity.clone()).fhir_type(),
            FhirType::Duration
        );
        assert_eq!(ChoiceValue::from(quantity).fhir_type(), FhirType::Quantity);
    }

    #[test]
    fn type_names_use_fhir_spelling() {
        assert_eq!(FhirType::DateTime.to_string(), "dateTime");
        assert_eq!(FhirType::CodeableConcept.to_string(), "CodeableConcept");
    }
}
