//! Static carrier registry and resolution.
//!
//! Three tables — maritime, air, express — scanned in that fixed priority
//! order. Each entry carries one or more identifier patterns; the first
//! descriptor whose any pattern matches wins. Table order is part of the
//! contract: an identifier that could match both a maritime prefix and an
//! express numeric shape must resolve to the maritime entry, so results stay
//! reproducible run over run.
//!
//! Prefix collisions (IATA numeric prefixes reused across carriers, express
//! operators sharing all-digit formats) are a known source of ambiguity in
//! the upstream data; the registry resolves them deterministically by scan
//! order rather than attempting disambiguation.
//!
//! Adding a carrier means adding a table row here — never a new code path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ApiFamily, CarrierDescriptor, Identifier, TransportMode};

/// One registry row: a descriptor plus the patterns that select it.
struct CarrierSpec {
    code: &'static str,
    display_name: &'static str,
    mode: TransportMode,
    api_family: ApiFamily,
    patterns: Vec<Regex>,
}

impl CarrierSpec {
    fn new(
        code: &'static str,
        display_name: &'static str,
        mode: TransportMode,
        api_family: ApiFamily,
        patterns: &[&str],
    ) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).expect("static carrier pattern must compile"))
            .collect();
        Self {
            code,
            display_name,
            mode,
            api_family,
            patterns,
        }
    }

    fn descriptor(&self) -> CarrierDescriptor {
        CarrierDescriptor {
            code: self.code.to_string(),
            display_name: self.display_name.to_string(),
            mode: Some(self.mode),
            api_family: self.api_family,
        }
    }
}

fn maritime(code: &'static str, name: &'static str, patterns: &[&str]) -> CarrierSpec {
    CarrierSpec::new(code, name, TransportMode::Maritime, ApiFamily::ProviderV1, patterns)
}

fn air(code: &'static str, name: &'static str, patterns: &[&str]) -> CarrierSpec {
    CarrierSpec::new(code, name, TransportMode::Air, ApiFamily::ProviderV2, patterns)
}

fn express(code: &'static str, name: &'static str, patterns: &[&str]) -> CarrierSpec {
    CarrierSpec::new(code, name, TransportMode::Express, ApiFamily::None, patterns)
}

/// The registry, built once on first use and immutable afterwards. Scan
/// order inside the vector is the priority order.
static REGISTRY: Lazy<Vec<CarrierSpec>> = Lazy::new(|| {
    vec![
        // ── Maritime (container prefixes per BIC owner codes, BL prefixes) ──
        maritime("MAERSK", "Maersk Line", &[r"^(MSKU|MRKU|MRSU|MAEU)\d{7}$", r"^MAE[US]\d{8,10}$"]),
        maritime("MSC", "Mediterranean Shipping Company", &[r"^(MSCU|MEDU|MSDU)\d{7}$"]),
        maritime("CMACGM", "CMA CGM", &[r"^(CMAU|CGMU|ECMU)\d{7}$"]),
        maritime("HAPAG", "Hapag-Lloyd", &[r"^(HLXU|HLCU|HPLU)\d{7}$"]),
        maritime("COSCO", "COSCO Shipping", &[r"^(COSU|CSNU|CBHU)\d{7}$"]),
        maritime("EVERGREEN", "Evergreen Line", &[r"^(EGHU|EGSU|EISU|EMCU)\d{7}$"]),
        maritime("ONE", "Ocean Network Express", &[r"^ONEU\d{7}$", r"^ONEY[A-Z0-9]{8,12}$"]),
        maritime("OOCL", "Orient Overseas Container Line", &[r"^(OOLU|OOCU)\d{7}$"]),
        maritime("YANGMING", "Yang Ming Marine Transport", &[r"^YMLU\d{7}$"]),
        maritime("ZIM", "ZIM Integrated Shipping", &[r"^(ZIMU|ZCSU)\d{7}$"]),
        maritime("HMM", "HMM", &[r"^HMMU\d{7}$"]),
        // ── Air (IATA three-digit airline prefixes, dashed or bare) ─────────
        air("LUFTHANSA", "Lufthansa Cargo", &[r"^020-?\d{8}$"]),
        air("AIRFRANCE", "Air France Cargo", &[r"^057-?\d{8}$"]),
        air("KLM", "KLM Cargo", &[r"^074-?\d{8}$"]),
        air("BRITISH", "British Airways World Cargo", &[r"^125-?\d{8}$"]),
        air("QATAR", "Qatar Airways Cargo", &[r"^157-?\d{8}$"]),
        air("CARGOLUX", "Cargolux", &[r"^172-?\d{8}$"]),
        air("EMIRATES", "Emirates SkyCargo", &[r"^176-?\d{8}$"]),
        air("TURKISH", "Turkish Cargo", &[r"^235-?\d{8}$"]),
        air("ETIHAD", "Etihad Cargo", &[r"^607-?\d{8}$"]),
        air("SINGAPORE", "Singapore Airlines Cargo", &[r"^618-?\d{8}$"]),
        // ── Express (courier formats seen in production traffic) ────────────
        express("UPS", "UPS", &[r"^1Z[A-Z0-9]{16}$"]),
        express("DHL", "DHL Express", &[r"^\d{10}$", r"^JD\d{18}$"]),
        express("TNT", "TNT", &[r"^\d{9}$", r"^GD\d{9}$"]),
        express("SDA", "SDA Express Courier", &[r"^[A-Z]{2}\d{9}IT$"]),
        // BRT's leading-zero form must come before the broader FedEx and GLS
        // numerics or it can never win.
        express("BRT", "BRT Corriere Espresso", &[r"^0\d{11}$"]),
        express("FEDEX", "FedEx", &[r"^\d{12}$", r"^\d{15}$"]),
        express("GLS", "GLS Italy", &[r"^[A-Z]{2}\d{9}[A-Z]{2}$", r"^\d{11}$"]),
    ]
});

/// The explicit fallback descriptor. Resolution never returns `None`; an
/// identifier no table claims gets this.
pub fn unknown_carrier() -> CarrierDescriptor {
    CarrierDescriptor {
        code: "UNKNOWN".to_string(),
        display_name: "Unknown carrier".to_string(),
        mode: None,
        api_family: ApiFamily::None,
    }
}

/// Resolves the identifier to a carrier descriptor by scanning the tables in
/// priority order. Falls back to [`unknown_carrier`], never `None`.
pub fn resolve(identifier: &Identifier) -> CarrierDescriptor {
    let value = identifier.as_str();
    for spec in REGISTRY.iter() {
        if spec.patterns.iter().any(|p| p.is_match(value)) {
            return spec.descriptor();
        }
    }
    unknown_carrier()
}

/// Looks a carrier up by its registry code or display name, ignoring case.
/// Used when a payload names the carrier explicitly instead of leaving it to
/// pattern resolution.
pub fn by_code_or_name(value: &str) -> Option<CarrierDescriptor> {
    let needle = value.trim();
    if needle.is_empty() {
        return None;
    }
    REGISTRY
        .iter()
        .find(|spec| {
            spec.code.eq_ignore_ascii_case(needle) || spec.display_name.eq_ignore_ascii_case(needle)
        })
        .map(CarrierSpec::descriptor)
}

/// All registered descriptors in scan order. Exposed for diagnostics and
/// exhaustiveness tests.
pub fn descriptors() -> Vec<CarrierDescriptor> {
    REGISTRY.iter().map(CarrierSpec::descriptor).collect()
}
