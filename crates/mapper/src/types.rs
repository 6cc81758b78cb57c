//! The unified tracking record produced by every mapper.
//!
//! Whatever shape the input took — flat v1 container JSON, nested v2 air
//! JSON, or one of the two spreadsheet export dialects — the output is one
//! [`TrackingRecord`]. Ownership passes to the caller; the storage layer may
//! merge it into a stored entity by identifier.
//!
//! Missing optional values are `None`, uniformly. The original input travels
//! along verbatim in `raw_payload` so the UI layer can still show fields the
//! unified model does not carry (vessel names, tag lists, CO₂ columns).

use chrono::{DateTime, Utc};
use classify::{CarrierDescriptor, Identifier, TrackingType};
use normalize::CanonicalStatus;
use serde::{Deserialize, Serialize};

/// A port or airport endpoint of the shipment's route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Port or airport code, e.g. `ITGOA` or `MXP`.
    pub code: Option<String>,
    /// Human-readable location name where the dialect carries one.
    pub name: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// ISO country code.
    pub country_code: Option<String>,
}

impl Location {
    /// Builds a location, collapsing to `None` when every part is absent so
    /// records never carry an all-empty endpoint.
    pub fn from_parts(
        code: Option<String>,
        name: Option<String>,
        country: Option<String>,
        country_code: Option<String>,
    ) -> Option<Self> {
        if code.is_none() && name.is_none() && country.is_none() && country_code.is_none() {
            None
        } else {
            Some(Self {
                code,
                name,
                country,
                country_code,
            })
        }
    }
}

/// The unified output record.
///
/// Serializes losslessly to JSON: every field is a primitive or a nested
/// primitive structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    /// The normalized identifier the record was built from.
    pub identifier: Identifier,
    /// Detected transport type.
    pub tracking_type: TrackingType,
    /// Resolved carrier; the unknown descriptor when no table claims the
    /// identifier or the resolution contradicted the type.
    pub carrier: CarrierDescriptor,
    /// Canonical lifecycle status. Raw provider strings are never stored.
    pub status: CanonicalStatus,
    /// Port/airport of loading or departure.
    pub origin: Option<Location>,
    /// Port/airport of discharge or arrival.
    pub destination: Option<Location>,
    /// Departure / loading instant.
    pub departed_at: Option<DateTime<Utc>>,
    /// Arrival / discharge instant.
    pub arrived_at: Option<DateTime<Utc>>,
    /// Free-form caller reference (booking number, import reference).
    pub reference: Option<String>,
    /// The original input, verbatim, for lossless round-trip to the UI.
    pub raw_payload: serde_json::Value,
}
