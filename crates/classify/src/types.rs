//! Core data model types for identifier classification.
//!
//! These types describe what the engine knows about a tracking identifier
//! before any payload is consulted: the transport mode it travels under, the
//! carrier likely responsible for it, and how confident the detector is in
//! that assignment. They are designed to be:
//!
//! - **Serializable**: JSON in and out via serde
//! - **Cheap to clone**: small enums and short strings
//! - **Comparable**: equality checks for testing
//!
//! # Type Hierarchy
//!
//! ```text
//! Identifier (trimmed, upper-cased)
//!        │
//!        ▼ classify()
//! Classification
//! ├── tracking_type: TrackingType
//! ├── carrier: CarrierDescriptor
//! │   ├── code: String
//! │   ├── display_name: String
//! │   ├── mode: Option<TransportMode>
//! │   └── api_family: ApiFamily
//! └── generic: bool
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A shipment tracking identifier: container number, bill of lading, air
/// waybill, or parcel code.
///
/// The identifier is opaque — no structure is required beyond being non-empty
/// after trimming. Construction upper-cases the value so that pattern matching
/// downstream never has to worry about case.
///
/// # Examples
///
/// ```rust
/// use classify::Identifier;
///
/// let id = Identifier::new(" msku1234567 ").unwrap();
/// assert_eq!(id.as_str(), "MSKU1234567");
///
/// assert!(Identifier::new("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Lower bound of the plausible-length heuristic.
    pub const MIN_PLAUSIBLE_LEN: usize = 4;
    /// Upper bound of the plausible-length heuristic.
    pub const MAX_PLAUSIBLE_LEN: usize = 30;

    /// Trims and upper-cases the raw value. Returns `None` if the input is
    /// empty after trimming — the only hard requirement an identifier has.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    /// The normalized identifier value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier length falls inside the [4, 30] range observed
    /// for real tracking numbers. Values outside the range are still
    /// classified; this feeds the `generic` flag on [`Classification`], it is
    /// never a rejection.
    pub fn plausible_length(&self) -> bool {
        (Self::MIN_PLAUSIBLE_LEN..=Self::MAX_PLAUSIBLE_LEN).contains(&self.0.len())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of shipment an identifier refers to.
///
/// Detection is total: every identifier is assigned exactly one type, with
/// `Container` as the historical fallback when no pattern family matches.
/// Callers that need to distinguish a confident match from the fallback must
/// consult [`Classification::generic`], not the type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingType {
    /// An ISO 6346-style ocean container number.
    Container,
    /// A carrier bill of lading covering one or more containers.
    BillOfLading,
    /// An IATA air waybill number.
    AirWaybill,
    /// An express/courier parcel code.
    Parcel,
}

impl fmt::Display for TrackingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrackingType::Container => "container",
            TrackingType::BillOfLading => "bill_of_lading",
            TrackingType::AirWaybill => "air_waybill",
            TrackingType::Parcel => "parcel",
        };
        f.write_str(name)
    }
}

/// Transport mode a carrier operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Maritime,
    Air,
    Express,
}

impl TransportMode {
    /// Whether a shipment of the given type can plausibly travel under this
    /// mode. Container and bill-of-lading identifiers belong to maritime
    /// carriers, air waybills to airlines, parcels to express operators.
    pub fn supports(self, tracking_type: TrackingType) -> bool {
        matches!(
            (self, tracking_type),
            (
                TransportMode::Maritime,
                TrackingType::Container | TrackingType::BillOfLading
            ) | (TransportMode::Air, TrackingType::AirWaybill)
                | (TransportMode::Express, TrackingType::Parcel)
        )
    }
}

/// Which upstream provider API family serves data for a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFamily {
    /// The flat container-mode JSON schema.
    ProviderV1,
    /// The nested air-cargo JSON schema.
    ProviderV2,
    /// No provider API covers this carrier.
    None,
}

/// An immutable description of a carrier from the static registry.
///
/// Descriptors are defined once in [`crate::registry`] and never mutated;
/// resolution hands out clones. The unknown-carrier fallback has no mode and
/// `ApiFamily::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierDescriptor {
    /// Stable carrier code, e.g. `MAERSK` or `EMIRATES`.
    pub code: String,
    /// Human-readable carrier name for the UI layer.
    pub display_name: String,
    /// Transport mode; `None` only for the unknown-carrier fallback.
    pub mode: Option<TransportMode>,
    /// Provider API family that serves this carrier's tracking data.
    pub api_family: ApiFamily,
}

impl CarrierDescriptor {
    /// Whether this carrier is compatible with the given tracking type.
    /// The unknown descriptor (no mode) is compatible with everything.
    pub fn supports(&self, tracking_type: TrackingType) -> bool {
        match self.mode {
            Some(mode) => mode.supports(tracking_type),
            None => true,
        }
    }

    /// True for the unknown-carrier fallback descriptor.
    pub fn is_unknown(&self) -> bool {
        self.mode.is_none()
    }
}

/// The full classification of one identifier.
///
/// `generic` is true when the type came from the default fallback or the
/// catch-all parcel pattern, or when the length heuristic failed — i.e. the
/// caller should treat the type as a guess rather than a confident match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub tracking_type: TrackingType,
    pub carrier: CarrierDescriptor,
    pub generic: bool,
}
