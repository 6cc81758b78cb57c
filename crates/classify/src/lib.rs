//! Tracking-identifier classification.
//!
//! This is where a raw shipment identifier enters the engine. We trim and
//! upper-case it, classify it into a transport type against ordered pattern
//! families, and resolve the likely carrier from the static registry.
//!
//! ## What we do here
//!
//! - **Type detection** - container / bill of lading / air waybill / parcel,
//!   first matching family wins, total function
//! - **Carrier resolution** - maritime → air → express table scan, explicit
//!   unknown fallback, never `None`
//! - **Confidence flagging** - the historical fallback-to-`Container` quirk
//!   is preserved, but [`Classification::generic`] tells callers when the
//!   type is a guess rather than a pattern match
//! - **Pairing reconciliation** - a carrier whose transport mode cannot carry
//!   the detected type degrades to the unknown descriptor, so a record never
//!   claims an airline for a container
//!
//! Everything is a pure synchronous function over static tables; the tables
//! are built once on first use and are safe to share across any number of
//! threads.
//!
//! ## Example
//!
//! ```
//! use classify::{classify, Identifier, TrackingType};
//!
//! let id = Identifier::new("MSKU1234567").unwrap();
//! let classification = classify(&id);
//!
//! assert_eq!(classification.tracking_type, TrackingType::Container);
//! assert_eq!(classification.carrier.code, "MAERSK");
//! assert!(!classification.generic);
//! ```

mod detect;
mod registry;
mod types;

pub use crate::detect::{detect, detect_with_confidence};
pub use crate::registry::{by_code_or_name, descriptors, resolve, unknown_carrier};
pub use crate::types::{
    ApiFamily, CarrierDescriptor, Classification, Identifier, TrackingType, TransportMode,
};

/// Classifies an identifier end to end: type detection, carrier resolution,
/// and pairing reconciliation.
///
/// The returned carrier always supports the returned type — an incompatible
/// resolution (for example an express operator claiming an eleven-digit air
/// waybill's shape) is replaced by the unknown descriptor rather than
/// emitting a contradictory pairing.
pub fn classify(identifier: &Identifier) -> Classification {
    let (tracking_type, pattern_generic) = detect_with_confidence(identifier);
    let resolved = resolve(identifier);
    let carrier = reconcile_carrier(tracking_type, resolved);

    Classification {
        tracking_type,
        carrier,
        generic: pattern_generic || !identifier.plausible_length(),
    }
}

/// Enforces the carrier/type pairing invariant: a descriptor whose mode
/// cannot carry the tracking type degrades to [`unknown_carrier`].
pub fn reconcile_carrier(
    tracking_type: TrackingType,
    carrier: CarrierDescriptor,
) -> CarrierDescriptor {
    if carrier.supports(tracking_type) {
        carrier
    } else {
        unknown_carrier()
    }
}
