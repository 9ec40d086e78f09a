//! CLI library components for the effective dose worksheet.

pub mod cli;
pub mod commands;
pub mod document;
pub mod logging;
pub mod summary;
