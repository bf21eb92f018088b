//! Output formatting for planned topologies.
//!
//! - [`csv`] - subnet table for operators
//! - [`json`] - full plan for the materialization layer
//! - [`terminal`] - field formatting and colors

mod csv;
mod json;
mod terminal;

pub use csv::{format_csv_row, plan_rows, subnet_print, PlanPrintRow};
pub use json::{plan_to_json, write_plan};
pub use terminal::{colored_role, format_field};
