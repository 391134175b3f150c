//! # Storage Module
//!
//! Handles all data persistence for the station backend.
//!
//! The domain layer only sees the repository traits in [`traits`]. The
//! bundled implementation in [`csv`] keeps one CSV file per collection and the
//! price configuration as a YAML document inside a data directory, so the
//! records stay readable in a spreadsheet.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: one repository per collection
//! - **Atomic Writes**: every write goes to a temp file that is renamed into place,
//!   so a failed write never leaves a partial record behind
//! - **Dependency Inversion**: services are generic over [`traits::Connection`]

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::*;
