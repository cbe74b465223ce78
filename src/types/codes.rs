//! Closed code types.
//!
//! Fields whose REQUIRED binding targets a small, fixed value set are typed
//! as enums, so an out-of-set code is unrepresentable. Open bindings (and
//! bindings the generator left at concept level) stay strings and are
//! checked by [`crate::binding`] descriptors instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCodeError;

macro_rules! fhir_code {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            /// FHIR code spelling of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $code => Ok(Self::$variant), )+
                    _ => Err(UnknownCodeError::new(stringify!($name), s)),
                }
            }
        }
    };
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/care-team-status
    CareTeamStatus {
        Proposed => "proposed",
        Active => "active",
        Suspended => "suspended",
        Inactive => "inactive",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/supplyrequest-status
    SupplyRequestStatus {
        Draft => "draft",
        Active => "active",
        Suspended => "suspended",
        Cancelled => "cancelled",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/request-priority
    RequestPriority {
        Routine => "routine",
        Urgent => "urgent",
        Asap => "asap",
        Stat => "stat",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/endpoint-status
    EndpointStatus {
        Active => "active",
        Suspended => "suspended",
        Error => "error",
        Off => "off",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/specimen-status
    SpecimenStatus {
        Available => "available",
        Unavailable => "unavailable",
        Unsatisfactory => "unsatisfactory",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/supplydelivery-status
    SupplyDeliveryStatus {
        InProgress => "in-progress",
        Completed => "completed",
        Abandoned => "abandoned",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/devicedispense-status
    DeviceDispenseStatus {
        Preparation => "preparation",
        InProgress => "in-progress",
        Cancelled => "cancelled",
        OnHold => "on-hold",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Stopped => "stopped",
        Declined => "declined",
        Unknown => "unknown",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/administrative-gender
    AdministrativeGender {
        Male => "male",
        Female => "female",
        Other => "other",
        Unknown => "unknown",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/location-status
    LocationStatus {
        Active => "active",
        Suspended => "suspended",
        Inactive => "inactive",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/location-mode
    LocationMode {
        Instance => "instance",
        Kind => "kind",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/substance-status
    SubstanceStatus {
        Active => "active",
        Inactive => "inactive",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/participationstatus
    ParticipationStatus {
        Accepted => "accepted",
        Declined => "declined",
        Tentative => "tentative",
        NeedsAction => "needs-action",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/metric-operational-status
    DeviceMetricOperationalStatus {
        On => "on",
        Off => "off",
        Standby => "standby",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/metric-category
    DeviceMetricCategory {
        Measurement => "measurement",
        Setting => "setting",
        Calculation => "calculation",
        Unspecified => "unspecified",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/metric-calibration-type
    DeviceMetricCalibrationType {
        Unspecified => "unspecified",
        Offset => "offset",
        Gain => "gain",
        TwoPoint => "two-point",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/metric-calibration-state
    DeviceMetricCalibrationState {
        NotCalibrated => "not-calibrated",
        CalibrationRequired => "calibration-required",
        Calibrated => "calibrated",
        Unspecified => "unspecified",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/episode-of-care-status
    EpisodeOfCareStatus {
        Planned => "planned",
        Waitlist => "waitlist",
        Active => "active",
        Onhold => "onhold",
        Finished => "finished",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/group-type
    GroupType {
        Person => "person",
        Animal => "animal",
        Practitioner => "practitioner",
        Device => "device",
        CareTeam => "careteam",
        HealthcareService => "healthcareservice",
        Location => "location",
        Organization => "organization",
        RelatedPerson => "relatedperson",
        Specimen => "specimen",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/identifier-use
    IdentifierUse {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Secondary => "secondary",
        Old => "old",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/name-use
    NameUse {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Nickname => "nickname",
        Anonymous => "anonymous",
        Old => "old",
        Maiden => "maiden",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/address-use
    AddressUse {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Billing => "billing",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/address-type
    AddressType {
        Postal => "postal",
        Physical => "physical",
        Both => "both",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/contact-point-system
    ContactPointSystem {
        Phone => "phone",
        Fax => "fax",
        Email => "email",
        Pager => "pager",
        Url => "url",
        Sms => "sms",
        Other => "other",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/contact-point-use
    ContactPointUse {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Mobile => "mobile",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/quantity-comparator
    QuantityComparator {
        LessThan => "<",
        LessOrEqual => "<=",
        GreaterOrEqual => ">=",
        GreaterThan => ">",
        SufficientToAchieve => "ad",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/narrative-status
    NarrativeStatus {
        Generated => "generated",
        Extensions => "extensions",
        Additional => "additional",
        Empty => "empty",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/days-of-week
    DaysOfWeek {
        Mon => "mon",
        Tue => "tue",
        Wed => "wed",
        Thu => "thu",
        Fri => "fri",
        Sat => "sat",
        Sun => "sun",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/units-of-time
    UnitsOfTime {
        Second => "s",
        Minute => "min",
        Hour => "h",
        Day => "d",
        Week => "wk",
        Month => "mo",
        Year => "a",
    }
}

fhir_code! {
    /// http://hl7.org/fhir/ValueSet/event-timing
    EventTiming {
        Morn => "MORN",
        MornEarly => "MORN.early",
        MornLate => "MORN.late",
        Noon => "NOON",
        Aft => "AFT",
        AftEarly => "AFT.early",
        AftLate => "AFT.late",
        Eve => "EVE",
        EveEarly => "EVE.early",
        EveLate => "EVE.late",
        Night => "NIGHT",
        Phs => "PHS",
        Imd => "IMD",
        Hs => "HS",
        Wake => "WAKE",
        C => "C",
        Cm => "CM",
        Cd => "CD",
        Cv => "CV",
        Ac => "AC",
        Acm => "ACM",
        Acd => "ACD",
        Acv => "ACV",
        Pc => "PC",
        Pcm => "PCM",
        Pcd => "PCD",
        Pcv => "PCV",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_code_spelling() {
        let status: CareTeamStatus = "entered-in-error".parse().unwrap();
        assert_eq!(status, CareTeamStatus::EnteredInError);
        assert_eq!(status.as_str(), "entered-in-error");
    }

    #[test]
    fn rejects_unknown_codes() {
        let err = "bogus".parse::<EndpointStatus>().unwrap_err();
        assert_eq!(err.code_type(), "EndpointStatus");
        assert_eq!(err.value(), "bogus");
    }

    #[test]
    fn serializes_with_fhir_spelling() {
        let json = serde_json::to_string(&QuantityComparator::LessOrEqual).unwrap();
        assert_eq!(json, "\"<=\"");
    }
}
