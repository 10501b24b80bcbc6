use thiserror::Error;

/// Reasons a [`TableConfig`](crate::TableConfig) is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The requested initial capacity is zero, or rounding it up to a power
    /// of two overflows `usize`.
    #[error("illegal capacity: {0}")]
    Capacity(usize),
    /// The load factor is not a finite, strictly positive number.
    #[error("illegal load factor: {0}")]
    LoadFactor(f64),
}

/// Errors reported by [`ProbingTable`](crate::ProbingTable) and its cursors.
///
/// Every error is raised before the table's visible state changes.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TableError {
    /// The table could not be built from the supplied configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A missing key was passed to one of the `try_*` entry points.
    #[error("missing key")]
    InvalidArgument,

    /// The table was structurally modified after the cursor was created.
    #[error("table was modified during iteration")]
    ConcurrentModification,

    /// The operation is not supported by this view of the table.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T, E = TableError> = core::result::Result<T, E>;
