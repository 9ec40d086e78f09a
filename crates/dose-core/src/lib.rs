#![deny(unsafe_code)]

//! Calculation layer of the effective dose worksheet.
//!
//! [`recompute`] derives every computed field of a task from its inputs;
//! [`apply_edit`] is the only way to change an input and always recomputes.
//! [`Worksheet`] holds the tasks of one job and their combined dose.

pub mod constants;
pub mod edit;
pub mod engine;
pub mod scenario;
pub mod summary;
pub mod worksheet;

pub use edit::{EditError, EditOutcome, apply_edit, coerce_numeric_input, current_value};
pub use engine::{airborne_concentration, dose_conversion_factor, recompute, recompute_in_place};
pub use scenario::ProtectionFactors;
pub use summary::{DacPosting, dac_engineering_factor, summarize};
pub use worksheet::{ReferenceCheck, Worksheet, WorksheetError};
