//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Result alias for operations on quantities, cuboids and aggregates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or measuring physical objects.
///
/// Every error is local to the call that produced it; nothing in the crate
/// retries or swallows one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The unit name is not registered for any kind.
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    /// The unit name is registered, but for a different kind of quantity.
    #[error("unit `{unit}` measures {found}, expected {expected}")]
    IncompatibleKind {
        unit: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A property-bag lookup for a key that is not present.
    #[error("no such property `{0}`")]
    UnknownProperty(String),

    /// More than three dimensions were passed to a cuboid constructor.
    #[error("a cuboid has at most 3 dimensions, got {0}")]
    MalformedDimensions(usize),

    /// A unit table could not be read or parsed.
    #[error("unit table: {0}")]
    UnitTable(String),
}
