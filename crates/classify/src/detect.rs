//! Ordered pattern families for tracking-type detection.
//!
//! Detection walks the families in a fixed order — container, bill of lading,
//! air waybill, parcel — and the first family with a matching pattern wins.
//! The order is part of the contract: it is what keeps classification
//! reproducible when an identifier could plausibly match more than one family.
//!
//! Detection is total. When nothing matches, the historical `Container`
//! fallback is returned with the `generic` flag set, so callers can still
//! tell a confident match apart from the default.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Identifier, TrackingType};

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static detection pattern must compile"))
        .collect()
}

/// ISO 6346 container numbers: four owner letters plus seven digits, or the
/// check-digit variant with a letter in the serial tail.
static CONTAINER_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"^[A-Z]{4}\d{7}$", r"^[A-Z]{4}\d{6}[A-Z]\d$"]));

/// Bill-of-lading numbers: broader letter/digit ranges than a container
/// number, always with a multi-letter carrier prefix.
static BOL_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"^[A-Z]{3}\d{8,11}$", r"^[A-Z]{4}\d{8,12}$"]));

/// Air waybill numbers: `NNN-NNNNNNNN`, a two-letter airline prefix with nine
/// digits, or the bare eleven-digit form.
static AWB_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"^\d{3}-\d{8}$", r"^[A-Z]{2}\d{9}$", r"^\d{11}$"]));

/// Carrier-specific express formats. The generic alphanumeric catch-all is
/// handled separately so it can set the `generic` flag.
static PARCEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"^1Z[A-Z0-9]{16}$",      // UPS
        r"^\d{12}$",              // FedEx / BRT
        r"^\d{15}$",              // FedEx
        r"^\d{10}$",              // DHL Express
        r"^\d{9}$",               // TNT
        r"^[A-Z]{2}\d{9}[A-Z]{2}$", // UPU S10 (SDA, Poste-handled parcels)
    ])
});

/// Last-resort parcel shape: any 10–30 run of letters and digits.
static PARCEL_CATCH_ALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{10,30}$").expect("static detection pattern must compile"));

fn any_match(patterns: &[Regex], value: &str) -> bool {
    patterns.iter().any(|p| p.is_match(value))
}

/// Classifies the identifier into a [`TrackingType`]. Total — always returns
/// a value, falling back to `Container` when no family matches.
pub fn detect(identifier: &Identifier) -> TrackingType {
    detect_with_confidence(identifier).0
}

/// Like [`detect`], but also reports whether the result came from a
/// confident carrier-specific pattern (`false`) or from the catch-all /
/// default fallback (`true`).
pub fn detect_with_confidence(identifier: &Identifier) -> (TrackingType, bool) {
    let value = identifier.as_str();

    if any_match(&CONTAINER_PATTERNS, value) {
        return (TrackingType::Container, false);
    }
    if any_match(&BOL_PATTERNS, value) {
        return (TrackingType::BillOfLading, false);
    }
    if any_match(&AWB_PATTERNS, value) {
        return (TrackingType::AirWaybill, false);
    }
    if any_match(&PARCEL_PATTERNS, value) {
        return (TrackingType::Parcel, false);
    }
    if PARCEL_CATCH_ALL.is_match(value) {
        return (TrackingType::Parcel, true);
    }

    // Nothing matched. The original engine silently defaulted to Container
    // here; the flag lets callers tell the fallback apart from a real match.
    (TrackingType::Container, true)
}
