//! Calendar date parsing at the transport boundary.

use chrono::NaiveDate;

use super::{PersonnelError, PersonnelResult};

/// ISO-8601 calendar date, e.g. `2005-10-10`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses exactly `YYYY-MM-DD`, rejecting impossible dates such as `2020-13-40`.
///
/// chrono alone accepts single-digit fields, a signed year and surrounding
/// whitespace, so the shape is checked first.
pub fn parse_date(input: &str) -> PersonnelResult<NaiveDate> {
    if !has_iso_shape(input) {
        return Err(PersonnelError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| PersonnelError::InvalidDate(input.to_string()))
}

fn has_iso_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
