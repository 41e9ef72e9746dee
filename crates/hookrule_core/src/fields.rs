//! Lenient parsing of CSV cells.
//!
//! Import files written by earlier versions of the tool, or edited by hand, may contain
//! cells that are not valid booleans or counts. These are read as `false` and `0` so that
//! existing files keep loading.

use tracing::debug;

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;

/// Parses a boolean cell.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true` and `True` as true and `0`, `f`, `F`, `FALSE`,
/// `false` and `False` as false. Every other value, including surrounding whitespace,
/// is read as false.
pub fn parse_bool_lenient(cell: &str) -> bool {
    match cell {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        other => {
            debug!(value = other, "Unrecognized boolean cell, reading it as false");
            false
        }
    }
}

/// Parses a non-negative decimal count.
///
/// The cell is taken as written, like [`parse_bool_lenient`]: anything that is not a bare
/// unsigned integer, including a value with surrounding whitespace, is read as 0.
pub fn parse_count_lenient(cell: &str) -> u32 {
    cell.parse::<u32>().unwrap_or_else(|_| {
        debug!(value = cell, "Unrecognized count cell, reading it as 0");
        0
    })
}

/// Formats a boolean the way the reports write it.
pub(crate) fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
