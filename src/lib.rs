#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Table construction parameters and their validation.
pub mod config;

/// Error types shared by the table, the set and their cursors.
pub mod error;

pub mod probing_table;

/// A hash set backed by the probing table.
///
/// This module provides a `ProbingSet` that wraps the `ProbingTable` with unit
/// values and exposes a standard set interface.
pub mod probing_set;

pub use config::TableConfig;
pub use error::ConfigError;
pub use error::Result;
pub use error::TableError;
pub use probing_set::ProbingSet;
#[cfg(feature = "stats")]
pub use probing_table::DebugStats;
pub use probing_table::KeyCursor;
pub use probing_table::ProbingTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used by [`ProbingTable::new`] and friends when no
        /// other is named: `foldhash`'s fast, randomly seeded state.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used by [`ProbingTable::new`] and friends when no
        /// other is named: the standard library's SipHash state.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    }
}
