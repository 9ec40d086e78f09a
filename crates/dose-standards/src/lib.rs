#![deny(unsafe_code)]

//! Regulatory reference table for the dose worksheet.
//!
//! Maps a nuclide key to its display name and inhalation DAC. The table is
//! read-only; the worksheet consults it when a nuclide is selected.

pub mod error;
pub mod hash;
pub mod paths;
pub mod table;

pub use crate::error::StandardsError;
pub use crate::paths::{NUCLIDE_TABLE_ENV_VAR, nuclide_table_override};
pub use crate::table::NuclideTable;
