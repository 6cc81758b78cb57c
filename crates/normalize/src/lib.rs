//! Field-level normalization for tracking payloads.
//!
//! Two concerns live here, both pure functions over static data:
//!
//! - **Status normalization** - collapse the dozens of carrier- and
//!   locale-specific free-text status strings into the closed
//!   [`CanonicalStatus`] set, one authoritative vocabulary table per domain.
//! - **Date parsing** - fold the four payload dialects' incompatible date
//!   forms into a single UTC instant, day-first when ambiguous.
//!
//! Neither operation can fail: unrecognized statuses resolve to the
//! conservative `Registered` fallback and unparseable dates to `None`. The
//! tables are immutable after first use and safe to share across threads.

mod date;
mod status;

pub use crate::date::parse_instant;
pub use crate::status::{normalize_status, CanonicalStatus, StatusDomain};
