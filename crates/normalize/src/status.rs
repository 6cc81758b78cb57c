//! Canonical status vocabulary and normalization.
//!
//! Providers report shipment state as free text — English terminal events,
//! IATA cargo codes, Italian courier sentences — and the same lifecycle step
//! arrives under a dozen spellings. This module holds one authoritative
//! vocabulary table per domain and collapses any raw string into the closed
//! [`CanonicalStatus`] set. Raw provider strings are never persisted as
//! status; everything downstream sees only canonical values.
//!
//! Resolution order (first hit wins):
//!
//! 1. Exact match against the domain table.
//! 2. Case-insensitive exact match.
//! 3. Case-insensitive substring match in either direction — providers
//!    append trailing punctuation and wrap statuses in boilerplate.
//! 4. `Registered` as the final fallback, including for empty input. An
//!    unrecognized status must never silently become `Delivered` or
//!    `Exception`, so the fallback is the most conservative state.
//!
//! Tables are data, not logic: adding a carrier vocabulary means adding rows
//! here, never a new code path. Within a table, longer phrases come before
//! short codes so the substring step prefers the most specific entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of lifecycle states a tracking record can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Registered,
    InTransit,
    Arrived,
    CustomsCleared,
    OutForDelivery,
    Delivered,
    Delayed,
    Exception,
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanonicalStatus::Registered => "registered",
            CanonicalStatus::InTransit => "in_transit",
            CanonicalStatus::Arrived => "arrived",
            CanonicalStatus::CustomsCleared => "customs_cleared",
            CanonicalStatus::OutForDelivery => "out_for_delivery",
            CanonicalStatus::Delivered => "delivered",
            CanonicalStatus::Delayed => "delayed",
            CanonicalStatus::Exception => "exception",
        };
        f.write_str(name)
    }
}

/// Which vocabulary table to normalize against. Callers that cannot tell
/// should use `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusDomain {
    Container,
    AirWaybill,
    Express,
    #[default]
    Generic,
}

type Vocabulary = [(&'static str, CanonicalStatus)];

/// Ocean-terminal and vessel event vocabulary (provider v1 + sea export).
const CONTAINER_VOCABULARY: &Vocabulary = &[
    ("Booking Confirmed", CanonicalStatus::Registered),
    ("Booked", CanonicalStatus::Registered),
    ("Empty to Shipper", CanonicalStatus::Registered),
    ("Gate In", CanonicalStatus::Registered),
    ("Loaded on Vessel", CanonicalStatus::InTransit),
    ("Vessel Departed", CanonicalStatus::InTransit),
    ("Vessel Departure", CanonicalStatus::InTransit),
    ("Sailing", CanonicalStatus::InTransit),
    ("In Transshipment", CanonicalStatus::InTransit),
    ("Transhipment", CanonicalStatus::InTransit),
    ("On Rail", CanonicalStatus::InTransit),
    ("In Transit", CanonicalStatus::InTransit),
    ("Vessel Arrived", CanonicalStatus::Arrived),
    ("Vessel Arrival", CanonicalStatus::Arrived),
    ("Discharged", CanonicalStatus::Arrived),
    ("Unloaded", CanonicalStatus::Arrived),
    ("Arrived", CanonicalStatus::Arrived),
    // "Loaded" after the discharge entries: "Unloaded" must not fall through
    // to it via the substring step.
    ("Loaded", CanonicalStatus::InTransit),
    ("Customs Cleared", CanonicalStatus::CustomsCleared),
    ("Customs Released", CanonicalStatus::CustomsCleared),
    ("Gate Out", CanonicalStatus::OutForDelivery),
    ("Empty Returned", CanonicalStatus::Delivered),
    ("Delivered", CanonicalStatus::Delivered),
    ("Rolled", CanonicalStatus::Delayed),
    ("Rollover", CanonicalStatus::Delayed),
    ("Vessel Delayed", CanonicalStatus::Delayed),
    ("Delayed", CanonicalStatus::Delayed),
    ("Held by Customs", CanonicalStatus::Exception),
    ("On Hold", CanonicalStatus::Exception),
    ("Damaged", CanonicalStatus::Exception),
];

/// Air-cargo vocabulary: spelled-out milestones first, IATA CIMP codes last
/// so the substring step prefers the specific phrases.
const AIR_WAYBILL_VOCABULARY: &Vocabulary = &[
    ("Received From Shipper", CanonicalStatus::Registered),
    ("Booked", CanonicalStatus::Registered),
    ("Manifested", CanonicalStatus::InTransit),
    ("Departed", CanonicalStatus::InTransit),
    ("In Flight", CanonicalStatus::InTransit),
    ("In Transit", CanonicalStatus::InTransit),
    ("Received From Flight", CanonicalStatus::Arrived),
    ("Arrived", CanonicalStatus::Arrived),
    ("Customs Cleared", CanonicalStatus::CustomsCleared),
    ("Consignee Notified", CanonicalStatus::OutForDelivery),
    ("Delivered", CanonicalStatus::Delivered),
    ("Proof of Delivery", CanonicalStatus::Delivered),
    ("Flight Delayed", CanonicalStatus::Delayed),
    ("Offloaded", CanonicalStatus::Delayed),
    ("Delayed", CanonicalStatus::Delayed),
    ("Discrepancy", CanonicalStatus::Exception),
    ("RCS", CanonicalStatus::Registered),
    ("MAN", CanonicalStatus::InTransit),
    ("DEP", CanonicalStatus::InTransit),
    ("ARR", CanonicalStatus::Arrived),
    ("RCF", CanonicalStatus::Arrived),
    ("CCD", CanonicalStatus::CustomsCleared),
    ("NFD", CanonicalStatus::OutForDelivery),
    ("DLV", CanonicalStatus::Delivered),
    ("POD", CanonicalStatus::Delivered),
    ("DIS", CanonicalStatus::Exception),
];

/// Courier vocabulary, English plus the Italian phrasing observed in
/// production carrier responses (BRT, SDA, GLS, DHL).
const EXPRESS_VOCABULARY: &Vocabulary = &[
    ("Shipment Information Received", CanonicalStatus::Registered),
    ("Label Created", CanonicalStatus::Registered),
    ("Presa in carico", CanonicalStatus::Registered),
    ("Picked Up", CanonicalStatus::InTransit),
    ("Ritirata", CanonicalStatus::InTransit),
    ("In Transit", CanonicalStatus::InTransit),
    ("In transito", CanonicalStatus::InTransit),
    ("Partita", CanonicalStatus::InTransit),
    ("Arrived at Facility", CanonicalStatus::Arrived),
    ("Arrivata in sede", CanonicalStatus::Arrived),
    ("Customs Cleared", CanonicalStatus::CustomsCleared),
    ("Sdoganata", CanonicalStatus::CustomsCleared),
    ("Svincolata", CanonicalStatus::CustomsCleared),
    ("Out for Delivery", CanonicalStatus::OutForDelivery),
    ("In consegna", CanonicalStatus::OutForDelivery),
    ("Mancata consegna", CanonicalStatus::Exception),
    ("Destinatario assente", CanonicalStatus::Exception),
    ("In giacenza", CanonicalStatus::Exception),
    ("Giacenza", CanonicalStatus::Exception),
    ("Exception", CanonicalStatus::Exception),
    ("Eccezione", CanonicalStatus::Exception),
    ("Delivered", CanonicalStatus::Delivered),
    ("Consegnata", CanonicalStatus::Delivered),
    ("Consegnato", CanonicalStatus::Delivered),
    ("In ritardo", CanonicalStatus::Delayed),
    ("Ritardo", CanonicalStatus::Delayed),
    ("Delayed", CanonicalStatus::Delayed),
];

/// Mode-agnostic vocabulary for callers that cannot name a domain.
const GENERIC_VOCABULARY: &Vocabulary = &[
    ("Registered", CanonicalStatus::Registered),
    ("Pending", CanonicalStatus::Registered),
    ("Shipped", CanonicalStatus::InTransit),
    ("In Transit", CanonicalStatus::InTransit),
    ("In transito", CanonicalStatus::InTransit),
    ("Arrived", CanonicalStatus::Arrived),
    ("Customs Cleared", CanonicalStatus::CustomsCleared),
    ("Out for Delivery", CanonicalStatus::OutForDelivery),
    ("In consegna", CanonicalStatus::OutForDelivery),
    ("Delivered", CanonicalStatus::Delivered),
    ("Consegnata", CanonicalStatus::Delivered),
    ("Delayed", CanonicalStatus::Delayed),
    ("Exception", CanonicalStatus::Exception),
];

impl StatusDomain {
    /// The authoritative vocabulary table for this domain.
    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            StatusDomain::Container => CONTAINER_VOCABULARY,
            StatusDomain::AirWaybill => AIR_WAYBILL_VOCABULARY,
            StatusDomain::Express => EXPRESS_VOCABULARY,
            StatusDomain::Generic => GENERIC_VOCABULARY,
        }
    }
}

/// Collapses an arbitrary free-text status into one canonical value.
///
/// See the module docs for the resolution order. Empty, absent, and
/// unrecognized input all resolve to `Registered`.
///
/// ```
/// use normalize::{normalize_status, CanonicalStatus, StatusDomain};
///
/// assert_eq!(
///     normalize_status(Some("Sailing"), StatusDomain::Container),
///     CanonicalStatus::InTransit,
/// );
/// assert_eq!(
///     normalize_status(Some("Consegnata."), StatusDomain::Express),
///     CanonicalStatus::Delivered,
/// );
/// assert_eq!(
///     normalize_status(Some("totally-unknown-value"), StatusDomain::Generic),
///     CanonicalStatus::Registered,
/// );
/// ```
pub fn normalize_status(raw: Option<&str>, domain: StatusDomain) -> CanonicalStatus {
    let Some(raw) = raw else {
        return CanonicalStatus::Registered;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return CanonicalStatus::Registered;
    }

    let table = domain.vocabulary();

    // 1. Exact.
    for (key, status) in table {
        if *key == raw {
            return *status;
        }
    }

    // 2. Case-insensitive exact.
    let lowered = raw.to_lowercase();
    for (key, status) in table {
        if key.to_lowercase() == lowered {
            return *status;
        }
    }

    // 3. Case-insensitive substring, either direction.
    for (key, status) in table {
        let key_lowered = key.to_lowercase();
        if lowered.contains(&key_lowered) || key_lowered.contains(&lowered) {
            return *status;
        }
    }

    // 4. Conservative fallback.
    CanonicalStatus::Registered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert_eq!(
            normalize_status(Some("Sailing"), StatusDomain::Container),
            CanonicalStatus::InTransit
        );
        assert_eq!(
            normalize_status(Some("Discharged"), StatusDomain::Container),
            CanonicalStatus::Arrived
        );
    }

    #[test]
    fn case_insensitive_match() {
        assert_eq!(
            normalize_status(Some("SAILING"), StatusDomain::Container),
            CanonicalStatus::InTransit
        );
        assert_eq!(
            normalize_status(Some("delivered"), StatusDomain::Express),
            CanonicalStatus::Delivered
        );
    }

    #[test]
    fn substring_tolerates_trailing_punctuation() {
        assert_eq!(
            normalize_status(Some("Consegnata."), StatusDomain::Express),
            CanonicalStatus::Delivered
        );
        assert_eq!(
            normalize_status(Some("La spedizione è in consegna"), StatusDomain::Express),
            CanonicalStatus::OutForDelivery
        );
    }

    #[test]
    fn substring_matches_table_key_containing_raw() {
        // Raw value shorter than the table key still resolves.
        assert_eq!(
            normalize_status(Some("assente"), StatusDomain::Express),
            CanonicalStatus::Exception
        );
    }

    #[test]
    fn iata_codes_resolve() {
        assert_eq!(
            normalize_status(Some("RCF"), StatusDomain::AirWaybill),
            CanonicalStatus::Arrived
        );
        assert_eq!(
            normalize_status(Some("DLV"), StatusDomain::AirWaybill),
            CanonicalStatus::Delivered
        );
    }

    #[test]
    fn spelled_out_air_milestones_beat_codes() {
        assert_eq!(
            normalize_status(Some("Departed Milan Malpensa"), StatusDomain::AirWaybill),
            CanonicalStatus::InTransit
        );
    }

    #[test]
    fn unrecognized_falls_back_to_registered() {
        assert_eq!(
            normalize_status(Some("totally-unknown-value"), StatusDomain::Generic),
            CanonicalStatus::Registered
        );
    }

    #[test]
    fn empty_and_none_fall_back_to_registered() {
        assert_eq!(
            normalize_status(None, StatusDomain::Container),
            CanonicalStatus::Registered
        );
        assert_eq!(
            normalize_status(Some("  "), StatusDomain::Express),
            CanonicalStatus::Registered
        );
    }

    #[test]
    fn unrecognized_never_terminal() {
        // The fallback must be conservative: junk can never read as a
        // completed or failed delivery.
        for domain in [
            StatusDomain::Container,
            StatusDomain::AirWaybill,
            StatusDomain::Express,
            StatusDomain::Generic,
        ] {
            let status = normalize_status(Some("zz-unmapped-zz"), domain);
            assert_eq!(status, CanonicalStatus::Registered);
        }
    }

    #[test]
    fn discharge_events_do_not_read_as_loading() {
        assert_eq!(
            normalize_status(Some("Unloaded at terminal"), StatusDomain::Container),
            CanonicalStatus::Arrived
        );
    }

    #[test]
    fn every_domain_table_is_nonempty() {
        for domain in [
            StatusDomain::Container,
            StatusDomain::AirWaybill,
            StatusDomain::Express,
            StatusDomain::Generic,
        ] {
            assert!(!domain.vocabulary().is_empty());
        }
    }
}
