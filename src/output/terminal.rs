//! Terminal output helpers.

use crate::models::SubnetRole;
use colored::{ColoredString, Colorize};

/// Format a value as a quoted, right-aligned field of at least `width` chars.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Role label colored by reachability: public green, egress yellow, isolated blue.
pub fn colored_role(role: SubnetRole) -> ColoredString {
    match role {
        SubnetRole::Public => role.type_label().green(),
        SubnetRole::PrivateEgress => role.type_label().yellow(),
        SubnetRole::Isolated => role.type_label().blue(),
    }
}
