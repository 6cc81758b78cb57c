//! Schema unification: one tracking record out of four payload shapes.
//!
//! This is where raw provider data enters the engine. We take a payload in
//! any of the supported shapes — provider API v1 container JSON, provider
//! API v2 air JSON, or one of the two spreadsheet export dialects — and
//! produce a single unified [`TrackingRecord`] for the storage/UI layer.
//!
//! ## What we do here
//!
//! - **Identifier extraction** - explicit per-schema alias lists; a missing
//!   identifier is the one hard error ([`MapError::MissingIdentifier`])
//! - **Carrier derivation** - explicit payload field when present, pattern
//!   resolution on the identifier when absent, and the carrier/type pairing
//!   reconciled either way
//! - **Status collapse** - raw status strings go through the per-domain
//!   vocabulary tables; rows without a status get the date-inference
//!   heuristic instead
//! - **Date folding** - every dialect's date form lands in UTC instants
//! - **Lossless pass-through** - the original payload rides along verbatim
//!   in `raw_payload`
//! - **Log everything** - structured logs via tracing at the entry points
//!
//! Every mapper is a pure synchronous function of its inputs plus the
//! caller-supplied reference instant `now` (used only by the date-inference
//! heuristic). Mapping the same payload with the same `now` twice produces
//! structurally equal records.
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use mapper::map_payload;
//! use normalize::CanonicalStatus;
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let payload = serde_json::json!({
//!     "ContainerNumber": "MSKU1234567",
//!     "Status": "Sailing",
//! });
//!
//! let record = map_payload(&payload, now).unwrap();
//! assert_eq!(record.carrier.code, "MAERSK");
//! assert_eq!(record.status, CanonicalStatus::InTransit);
//! ```

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use classify::{CarrierDescriptor, Identifier, TrackingType};
use normalize::{CanonicalStatus, StatusDomain};
use serde_json::Value;
use tracing::{info, warn, Level};

mod error;
mod fields;
mod provider;
mod rows;
mod types;

pub use crate::error::MapError;
pub use crate::rows::{detect_dialect, ExportDialect};
pub use crate::types::{Location, TrackingRecord};

/// The vocabulary domain a tracking type normalizes its statuses under.
pub fn status_domain_for(tracking_type: TrackingType) -> StatusDomain {
    match tracking_type {
        TrackingType::Container | TrackingType::BillOfLading => StatusDomain::Container,
        TrackingType::AirWaybill => StatusDomain::AirWaybill,
        TrackingType::Parcel => StatusDomain::Express,
    }
}

/// Status inference for dialects that omit an explicit status: an arrival
/// instant in the past means the shipment completed, a departure in the past
/// means it is underway, anything else is merely registered.
pub fn infer_status_from_instants(
    departed_at: Option<DateTime<Utc>>,
    arrived_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> CanonicalStatus {
    let arrived = arrived_at.is_some_and(|at| at <= now);
    let departed = departed_at.is_some_and(|at| at <= now);
    if arrived {
        CanonicalStatus::Delivered
    } else if departed {
        CanonicalStatus::InTransit
    } else {
        CanonicalStatus::Registered
    }
}

/// Derives the record's carrier: explicit payload value first, pattern
/// resolution second, and the carrier/type pairing reconciled either way.
pub(crate) fn record_carrier(
    explicit: Option<String>,
    identifier: &Identifier,
    tracking_type: TrackingType,
) -> CarrierDescriptor {
    let carrier = explicit
        .and_then(|value| classify::by_code_or_name(&value))
        .unwrap_or_else(|| classify::resolve(identifier));
    classify::reconcile_carrier(tracking_type, carrier)
}

fn traced(
    schema: &'static str,
    map: impl FnOnce() -> Result<TrackingRecord, MapError>,
) -> Result<TrackingRecord, MapError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "mapper.map", schema);
    let _guard = span.enter();

    match map() {
        Ok(record) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                identifier = %record.identifier,
                tracking_type = %record.tracking_type,
                status = %record.status,
                carrier = %record.carrier.code,
                elapsed_micros,
                "map_success"
            );
            Ok(record)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "map_failure");
            Err(err)
        }
    }
}

/// Maps a provider API v1 container payload (flat object, PascalCase with
/// camelCase tolerated).
pub fn map_container_v1(payload: &Value, now: DateTime<Utc>) -> Result<TrackingRecord, MapError> {
    traced("container_v1", || provider::container_v1(payload, now))
}

/// Maps a provider API v2 air payload (nested `shipment` envelope).
pub fn map_air_v2(payload: &Value, now: DateTime<Utc>) -> Result<TrackingRecord, MapError> {
    traced("air_v2", || provider::air_v2(payload, now))
}

/// Maps one sea-export spreadsheet row.
pub fn map_sea_export_row(
    row: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<TrackingRecord, MapError> {
    traced("sea_export_row", || rows::sea_export_row(row, now))
}

/// Maps one air-export spreadsheet row.
pub fn map_air_export_row(
    row: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<TrackingRecord, MapError> {
    traced("air_export_row", || rows::air_export_row(row, now))
}

/// Auto-selects a mapper from the payload shape: the v2 `shipment` envelope,
/// the flat v1 container object, or an export row whose decisive header
/// subset is present. Anything else is [`MapError::UnrecognizedSchema`].
pub fn map_payload(payload: &Value, now: DateTime<Utc>) -> Result<TrackingRecord, MapError> {
    if payload.get("shipment").is_some_and(Value::is_object) {
        return map_air_v2(payload, now);
    }
    if payload
        .as_object()
        .is_some_and(|map| map.contains_key("ContainerNumber") || map.contains_key("containerNumber"))
    {
        return map_container_v1(payload, now);
    }
    if let Some(row) = fields::row_from_json(payload) {
        match rows::detect_dialect(&row) {
            Some(ExportDialect::Sea) => return map_sea_export_row(&row, now),
            Some(ExportDialect::Air) => return map_air_export_row(&row, now),
            None => {}
        }
    }
    Err(MapError::UnrecognizedSchema)
}
