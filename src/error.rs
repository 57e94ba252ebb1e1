use crate::validation::tld::TldTable;
use thiserror::Error;

/// Errors raised while building validators or maintaining the TLD registry.
///
/// Validation outcomes are never errors: every `is_valid*` predicate answers
/// with a plain `bool`. Only construction and registry state problems end up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    /// Pattern list is empty, contains an empty entry, or does not compile.
    #[error("invalid pattern specification: {0}")]
    InvalidPatternSpec(String),

    /// Overrides can only be changed before the first shared validator is handed out.
    #[error("TLD overrides are locked: a shared validator instance is already in use")]
    LockedRegistry,

    /// Compiled-in tables cannot be modified.
    #[error("cannot update the read-only table {0}")]
    ReadOnlyCategory(TldTable),

    /// An explicit domain validator disagrees with the requested `allow_local` flag.
    #[error("domain validator must agree with allow_local setting (expected {expected}, got {actual})")]
    ConfigMismatch { expected: bool, actual: bool },

    #[error("unknown TLD table: {0}")]
    UnknownTable(String),
}
