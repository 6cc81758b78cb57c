//! Mappers for the two provider API schema versions.
//!
//! The upstream tracking data provider exposes two incompatible JSON shapes:
//!
//! - **Container v1** — a flat object with PascalCase fields
//!   (`ContainerNumber`, `Status`, `VesselName`, `Movements[]`), with newer
//!   deployments emitting the same fields camelCased.
//! - **Air v2** — a nested object under `shipment`, with
//!   `containers[].movements[]` timelines and a `route` object holding
//!   `port_of_loading` / `port_of_discharge`.
//!
//! Both mappers produce the same [`TrackingRecord`]. Explicit fields win;
//! where the payload omits a departure or arrival instant, the movement
//! timeline is scanned for the first loading-like and arrival-like milestone
//! instead.

use chrono::{DateTime, Utc};
use classify::Identifier;
use normalize::{normalize_status, parse_instant, CanonicalStatus, StatusDomain};
use serde_json::Value;

use crate::error::MapError;
use crate::fields::{array_field, str_field, value_field};
use crate::types::{Location, TrackingRecord};
use crate::{record_carrier, status_domain_for};

/// Departure/arrival instants recovered from a movement timeline: the first
/// movement normalizing to an in-transit status and the first normalizing to
/// an arrival or delivery.
fn milestones(movements: &[Value], domain: StatusDomain) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let mut departed = None;
    let mut arrived = None;
    for movement in movements {
        let date = parse_instant(
            str_field(movement, &["Date", "date", "Timestamp", "timestamp"]).as_deref(),
        );
        let Some(date) = date else { continue };
        let status = str_field(movement, &["Status", "status", "Event", "event"]);
        match normalize_status(status.as_deref(), domain) {
            CanonicalStatus::InTransit if departed.is_none() => departed = Some(date),
            CanonicalStatus::Arrived | CanonicalStatus::Delivered if arrived.is_none() => {
                arrived = Some(date);
            }
            _ => {}
        }
    }
    (departed, arrived)
}

/// A route endpoint in v2 is either a bare code string or an object with
/// code/name/country parts.
fn location_value(value: &Value) -> Option<Location> {
    match value {
        Value::String(code) => {
            let trimmed = code.trim();
            if trimmed.is_empty() {
                None
            } else {
                Location::from_parts(Some(trimmed.to_string()), None, None, None)
            }
        }
        Value::Object(_) => Location::from_parts(
            str_field(value, &["code", "port_code", "iata"]),
            str_field(value, &["name", "port_name"]),
            str_field(value, &["country"]),
            str_field(value, &["country_code", "countryCode"]),
        ),
        _ => None,
    }
}

/// Maps a provider v1 container payload. The reference instant is unused —
/// v1 carries an explicit status, so no date inference applies — but the
/// signature stays uniform across the four mappers for the dispatch layer.
pub(crate) fn container_v1(payload: &Value, _now: DateTime<Utc>) -> Result<TrackingRecord, MapError> {
    let raw_id =
        str_field(payload, &["ContainerNumber", "containerNumber"]).ok_or(MapError::MissingIdentifier)?;
    let identifier = Identifier::new(&raw_id).ok_or(MapError::MissingIdentifier)?;

    let tracking_type = classify::detect(&identifier);
    let domain = status_domain_for(tracking_type);
    let carrier = record_carrier(
        str_field(payload, &["Carrier", "carrier", "CarrierCode", "carrierCode"]),
        &identifier,
        tracking_type,
    );

    let (moved_departed, moved_arrived) = array_field(payload, &["Movements", "movements"])
        .map(|movements| milestones(movements, domain))
        .unwrap_or((None, None));

    let departed_at = parse_instant(
        str_field(payload, &["DateOfLoading", "dateOfLoading", "DepartureDate", "departureDate"])
            .as_deref(),
    )
    .or(moved_departed);
    let arrived_at = parse_instant(
        str_field(payload, &["DateOfDischarge", "dateOfDischarge", "ArrivalDate", "arrivalDate"])
            .as_deref(),
    )
    .or(moved_arrived);

    let status = normalize_status(str_field(payload, &["Status", "status"]).as_deref(), domain);

    let origin = Location::from_parts(
        str_field(payload, &["PortOfLoading", "portOfLoading", "Pol", "pol"]),
        None,
        str_field(payload, &["PolCountry", "polCountry"]),
        str_field(payload, &["PolCountryCode", "polCountryCode"]),
    );
    let destination = Location::from_parts(
        str_field(payload, &["PortOfDischarge", "portOfDischarge", "Pod", "pod"]),
        None,
        str_field(payload, &["PodCountry", "podCountry"]),
        str_field(payload, &["PodCountryCode", "podCountryCode"]),
    );

    Ok(TrackingRecord {
        identifier,
        tracking_type,
        carrier,
        status,
        origin,
        destination,
        departed_at,
        arrived_at,
        reference: str_field(payload, &["Reference", "reference", "BookingNumber", "bookingNumber"]),
        raw_payload: payload.clone(),
    })
}

/// Maps a provider v2 air payload. Accepts either the full envelope or the
/// bare `shipment` object. Like v1, the reference instant is unused because
/// the schema carries an explicit status.
pub(crate) fn air_v2(payload: &Value, _now: DateTime<Utc>) -> Result<TrackingRecord, MapError> {
    let shipment = match payload.get("shipment") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    };

    let raw_id =
        str_field(shipment, &["awb_number", "awbNumber", "awb"]).ok_or(MapError::MissingIdentifier)?;
    let identifier = Identifier::new(&raw_id).ok_or(MapError::MissingIdentifier)?;

    let tracking_type = classify::detect(&identifier);
    let domain = status_domain_for(tracking_type);
    let carrier = record_carrier(
        str_field(shipment, &["airline", "carrier"]),
        &identifier,
        tracking_type,
    );

    // Flatten containers[].movements[] into one timeline for fallbacks.
    let movements: Vec<Value> = shipment
        .get("containers")
        .and_then(Value::as_array)
        .map(|containers| {
            containers
                .iter()
                .filter_map(|container| array_field(container, &["movements", "Movements"]))
                .flatten()
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    let (moved_departed, moved_arrived) = milestones(&movements, domain);

    let departed_at = parse_instant(
        str_field(shipment, &["departure_date", "departureDate", "etd"]).as_deref(),
    )
    .or(moved_departed);
    let arrived_at =
        parse_instant(str_field(shipment, &["arrival_date", "arrivalDate", "eta"]).as_deref())
            .or(moved_arrived);

    let status = normalize_status(str_field(shipment, &["status", "state"]).as_deref(), domain);

    let route = shipment.get("route");
    let origin = route
        .and_then(|r| value_field(r, &["port_of_loading", "portOfLoading", "origin"]))
        .and_then(location_value);
    let destination = route
        .and_then(|r| value_field(r, &["port_of_discharge", "portOfDischarge", "destination"]))
        .and_then(location_value);

    Ok(TrackingRecord {
        identifier,
        tracking_type,
        carrier,
        status,
        origin,
        destination,
        departed_at,
        arrived_at,
        reference: str_field(shipment, &["reference", "booking_reference", "bookingReference"]),
        raw_payload: payload.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use classify::TrackingType;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date components");
        let naive = date.and_hms_opt(12, 0, 0).expect("valid time components");
        DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
    }

    #[test]
    fn v1_pascal_case_payload() {
        let payload = json!({
            "ContainerNumber": "MSKU1234567",
            "Status": "Sailing",
            "VesselName": "MAERSK ESSEX",
            "PortOfLoading": "ITGOA",
            "PolCountry": "Italy",
            "PolCountryCode": "IT",
            "PortOfDischarge": "CNSHA",
            "DateOfLoading": "2025-05-19T00:00:00Z",
            "Reference": "PO-8841",
        });

        let record = container_v1(&payload, fixed_now()).unwrap();
        assert_eq!(record.identifier.as_str(), "MSKU1234567");
        assert_eq!(record.tracking_type, TrackingType::Container);
        assert_eq!(record.carrier.code, "MAERSK");
        assert_eq!(record.status, CanonicalStatus::InTransit);
        assert_eq!(record.origin.as_ref().unwrap().code.as_deref(), Some("ITGOA"));
        assert_eq!(record.reference.as_deref(), Some("PO-8841"));
        assert!(record.departed_at.is_some());
        assert!(record.arrived_at.is_none());
        assert_eq!(record.raw_payload, payload);
    }

    #[test]
    fn v1_camel_case_payload() {
        let payload = json!({
            "containerNumber": "MSCU7654321",
            "status": "Discharged",
            "portOfDischarge": "ITGOA",
        });

        let record = container_v1(&payload, fixed_now()).unwrap();
        assert_eq!(record.carrier.code, "MSC");
        assert_eq!(record.status, CanonicalStatus::Arrived);
        assert_eq!(
            record.destination.as_ref().unwrap().code.as_deref(),
            Some("ITGOA")
        );
    }

    #[test]
    fn v1_movement_timeline_fills_missing_dates() {
        let payload = json!({
            "ContainerNumber": "CMAU0000001",
            "Status": "Discharged",
            "Movements": [
                {"Status": "Gate In", "Date": "2025-05-01"},
                {"Status": "Vessel Departed", "Date": "2025-05-03"},
                {"Status": "Discharged", "Date": "2025-05-28"},
            ],
        });

        let record = container_v1(&payload, fixed_now()).unwrap();
        let departed = record.departed_at.unwrap();
        let arrived = record.arrived_at.unwrap();
        assert_eq!(departed.date_naive(), NaiveDate::from_ymd_opt(2025, 5, 3).unwrap());
        assert_eq!(arrived.date_naive(), NaiveDate::from_ymd_opt(2025, 5, 28).unwrap());
    }

    #[test]
    fn v1_missing_identifier_is_hard_error() {
        let payload = json!({"Status": "Sailing"});
        assert_eq!(
            container_v1(&payload, fixed_now()),
            Err(MapError::MissingIdentifier)
        );
        // Blank counts as missing too.
        let payload = json!({"ContainerNumber": "   "});
        assert_eq!(
            container_v1(&payload, fixed_now()),
            Err(MapError::MissingIdentifier)
        );
    }

    #[test]
    fn v2_nested_shipment_payload() {
        let payload = json!({
            "shipment": {
                "awb_number": "176-12345678",
                "status": "RCF",
                "route": {
                    "port_of_loading": {"code": "DXB", "country": "United Arab Emirates", "country_code": "AE"},
                    "port_of_discharge": {"code": "MXP", "country": "Italy", "country_code": "IT"},
                },
                "containers": [
                    {"movements": [
                        {"status": "DEP", "date": "2025-05-20T08:00:00Z"},
                        {"status": "ARR", "date": "2025-05-21T05:30:00Z"},
                    ]}
                ],
            }
        });

        let record = air_v2(&payload, fixed_now()).unwrap();
        assert_eq!(record.identifier.as_str(), "176-12345678");
        assert_eq!(record.tracking_type, TrackingType::AirWaybill);
        assert_eq!(record.carrier.code, "EMIRATES");
        assert_eq!(record.status, CanonicalStatus::Arrived);
        assert_eq!(record.origin.as_ref().unwrap().code.as_deref(), Some("DXB"));
        assert_eq!(
            record.destination.as_ref().unwrap().country_code.as_deref(),
            Some("IT")
        );
        assert!(record.departed_at.is_some());
        assert!(record.arrived_at.is_some());
        assert_eq!(record.raw_payload, payload);
    }

    #[test]
    fn v2_route_endpoints_as_bare_codes() {
        let payload = json!({
            "shipment": {
                "awb_number": "020-11111111",
                "status": "DEP",
                "route": {"port_of_loading": "FRA", "port_of_discharge": "MXP"},
            }
        });

        let record = air_v2(&payload, fixed_now()).unwrap();
        assert_eq!(record.carrier.code, "LUFTHANSA");
        assert_eq!(record.origin.as_ref().unwrap().code.as_deref(), Some("FRA"));
        assert!(record.origin.as_ref().unwrap().country.is_none());
    }

    #[test]
    fn v2_missing_identifier_is_hard_error() {
        let payload = json!({"shipment": {"status": "DEP"}});
        assert_eq!(air_v2(&payload, fixed_now()), Err(MapError::MissingIdentifier));
    }

    #[test]
    fn v2_explicit_airline_field_wins_over_resolution() {
        let payload = json!({
            "shipment": {
                "awb_number": "999-00000000",
                "airline": "Qatar Airways Cargo",
                "status": "MAN",
            }
        });

        let record = air_v2(&payload, fixed_now()).unwrap();
        assert_eq!(record.carrier.code, "QATAR");
    }
}
