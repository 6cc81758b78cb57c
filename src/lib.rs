//! Workspace umbrella crate for the tracking-identifier engine.
//!
//! This crate stitches together identifier classification, field
//! normalization, and schema mapping so callers can turn any supported raw
//! payload into a unified [`TrackingRecord`] with a single API entry point.
//!
//! The flow runs one direction:
//!
//! ```text
//! raw identifier / payload
//!        │
//!        ▼
//! classify   — tracking type + carrier (static pattern tables)
//!        │
//!        ▼
//! normalize  — canonical status + UTC instants
//!        │
//!        ▼
//! mapper     — one TrackingRecord per payload, raw input passed through
//! ```
//!
//! Everything is pure and stateless beyond lazily-built static lookup
//! tables, so the entry points can be called from any number of concurrent
//! workers with no locking discipline.

pub use classify::{
    classify, detect, detect_with_confidence, reconcile_carrier, resolve, unknown_carrier,
    ApiFamily, CarrierDescriptor, Classification, Identifier, TrackingType, TransportMode,
};
pub use mapper::{
    detect_dialect, infer_status_from_instants, map_air_export_row, map_air_v2, map_container_v1,
    map_payload, map_sea_export_row, status_domain_for, ExportDialect, Location, MapError,
    TrackingRecord,
};
pub use normalize::{normalize_status, parse_instant, CanonicalStatus, StatusDomain};

use chrono::Utc;
use serde_json::Value;

/// Classifies a raw identifier string end to end. Returns `None` only when
/// the input is empty after trimming.
pub fn classify_identifier(raw: &str) -> Option<Classification> {
    Identifier::new(raw).map(|identifier| classify(&identifier))
}

/// Maps any supported payload shape against the current wall clock. Batch
/// and test callers that need reproducible status inference should call
/// [`map_payload`] with an explicit reference instant instead.
pub fn process_payload(payload: &Value) -> Result<TrackingRecord, MapError> {
    map_payload(payload, Utc::now())
}
