//! Error types produced by the mapper crate.
//!
//! The error surface is deliberately tiny. Unknown carriers, unrecognized
//! statuses, and unparseable dates are soft fallbacks handled inline — the
//! engine favors always producing *some* record over raising. The only
//! per-record hard failure is a payload with no identifier, plus a dispatch
//! failure when the auto-selecting entry point cannot recognize the schema
//! at all. Both are fatal for that single record only; batch callers collect
//! them into a per-row report and keep going.

use thiserror::Error;

/// Errors that can occur while mapping a raw payload to a tracking record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapError {
    /// The payload carries no usable tracking identifier. Nothing else about
    /// the record can be trusted without one, so this aborts the record (and
    /// only the record).
    #[error("payload carries no tracking identifier")]
    MissingIdentifier,

    /// The auto-dispatch entry point matched the payload against every known
    /// provider schema and export dialect without success.
    #[error("payload matches no known provider schema or export dialect")]
    UnrecognizedSchema,
}
