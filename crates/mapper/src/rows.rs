//! Mappers for the two spreadsheet export dialects.
//!
//! The provider's UI export feature produces two fixed-column layouts:
//!
//! - **Sea export**: `Status, Carrier, CO₂ Emission (Tons), Reference,
//!   Booking, Container, Container Count, Port Of Loading, Date Of Loading,
//!   POL Country, POL Country Code, Port Of Discharge, Date Of Discharge,
//!   POD Country, POD Country Code, Tags, Created At`
//! - **Air export**: `AWB Number, Origin, Origin Name, Date Of Departure,
//!   Origin Country, Origin Country Code, Destination, Destination Name,
//!   Date Of Arrival, Destination Country, Destination Country Code,
//!   T5 Count, Transit Time, Tags, Created At`
//!
//! Dialect detection requires a decisive subset of these exact column names
//! before a mapper is selected — a random flat object must never be read as
//! an export row.
//!
//! The air dialect has no status column at all, and sea rows frequently
//! leave theirs blank. For those rows the status is inferred from the
//! departure/arrival instants relative to the caller-supplied `now`; see
//! [`crate::infer_status_from_instants`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use classify::Identifier;
use normalize::{normalize_status, parse_instant};
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::fields::{cell, row_to_value};
use crate::types::{Location, TrackingRecord};
use crate::{infer_status_from_instants, record_carrier, status_domain_for};

/// Which export layout a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportDialect {
    Sea,
    Air,
}

/// Columns that must all be present before a row is read as a sea export.
const SEA_DECISIVE_COLUMNS: &[&str] =
    &["Container", "Port Of Loading", "Port Of Discharge", "Date Of Loading"];

/// Columns that must all be present before a row is read as an air export.
const AIR_DECISIVE_COLUMNS: &[&str] =
    &["AWB Number", "Origin", "Destination", "Date Of Departure"];

/// Selects the export dialect from the row's header set, or `None` when
/// neither decisive subset is fully present.
pub fn detect_dialect(row: &HashMap<String, String>) -> Option<ExportDialect> {
    if SEA_DECISIVE_COLUMNS.iter().all(|c| row.contains_key(*c)) {
        return Some(ExportDialect::Sea);
    }
    if AIR_DECISIVE_COLUMNS.iter().all(|c| row.contains_key(*c)) {
        return Some(ExportDialect::Air);
    }
    None
}

/// Maps one sea-export row.
pub(crate) fn sea_export_row(
    row: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<TrackingRecord, MapError> {
    let raw_id = cell(row, "Container").ok_or(MapError::MissingIdentifier)?;
    let identifier = Identifier::new(&raw_id).ok_or(MapError::MissingIdentifier)?;

    let tracking_type = classify::detect(&identifier);
    let domain = status_domain_for(tracking_type);
    let carrier = record_carrier(cell(row, "Carrier"), &identifier, tracking_type);

    let departed_at = parse_instant(cell(row, "Date Of Loading").as_deref());
    let arrived_at = parse_instant(cell(row, "Date Of Discharge").as_deref());

    // Sea rows carry a status column but frequently leave it blank; blank
    // rows fall back to the date heuristic instead of pinning Registered.
    let status = match cell(row, "Status") {
        Some(raw) => normalize_status(Some(&raw), domain),
        None => infer_status_from_instants(departed_at, arrived_at, now),
    };

    Ok(TrackingRecord {
        identifier,
        tracking_type,
        carrier,
        status,
        origin: Location::from_parts(
            cell(row, "Port Of Loading"),
            None,
            cell(row, "POL Country"),
            cell(row, "POL Country Code"),
        ),
        destination: Location::from_parts(
            cell(row, "Port Of Discharge"),
            None,
            cell(row, "POD Country"),
            cell(row, "POD Country Code"),
        ),
        departed_at,
        arrived_at,
        reference: cell(row, "Reference").or_else(|| cell(row, "Booking")),
        raw_payload: row_to_value(row),
    })
}

/// Maps one air-export row. The dialect omits status entirely, so it is
/// always inferred from the dates.
pub(crate) fn air_export_row(
    row: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<TrackingRecord, MapError> {
    let raw_id = cell(row, "AWB Number").ok_or(MapError::MissingIdentifier)?;
    let identifier = Identifier::new(&raw_id).ok_or(MapError::MissingIdentifier)?;

    let tracking_type = classify::detect(&identifier);
    let carrier = record_carrier(None, &identifier, tracking_type);

    let departed_at = parse_instant(cell(row, "Date Of Departure").as_deref());
    let arrived_at = parse_instant(cell(row, "Date Of Arrival").as_deref());
    let status = infer_status_from_instants(departed_at, arrived_at, now);

    Ok(TrackingRecord {
        identifier,
        tracking_type,
        carrier,
        status,
        origin: Location::from_parts(
            cell(row, "Origin"),
            cell(row, "Origin Name"),
            cell(row, "Origin Country"),
            cell(row, "Origin Country Code"),
        ),
        destination: Location::from_parts(
            cell(row, "Destination"),
            cell(row, "Destination Name"),
            cell(row, "Destination Country"),
            cell(row, "Destination Country Code"),
        ),
        departed_at,
        arrived_at,
        reference: None,
        raw_payload: row_to_value(row),
    })
}
