use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Identifier of an address object within one registry load.
pub type ObjectId = i64;

/// A single address object (street, district, settlement, ...) read from the
/// address registry.
///
/// Records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    /// The registry identifier of the object.
    pub object_id: ObjectId,
    /// The free-text name, e.g. `Main`.
    pub name: String,
    /// The category label, e.g. `street` or `city`.
    ///
    /// Used as the display prefix and as the selection key for hierarchy
    /// queries.
    pub type_name: String,
    /// First day (inclusive) on which the record is valid.
    pub valid_from: NaiveDate,
    /// Last day (inclusive) on which the record is valid.
    pub valid_to: NaiveDate,
    /// Whether the object is in force.
    pub is_active: bool,
    /// Whether this is the up-to-date revision of the object.
    pub is_current: bool,
}

impl AddressRecord {
    /// Returns `true` if `date` falls within `[valid_from, valid_to]`.
    #[must_use]
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_to
    }

    /// Returns `true` if the record is both active and current.
    ///
    /// Only such records take part in hierarchy resolution.
    #[must_use]
    pub const fn is_current_and_active(&self) -> bool {
        self.is_active && self.is_current
    }

    /// The `"<type> <name>"` rendering used as one segment of a full address.
    #[must_use]
    pub fn short_form(&self) -> String {
        format!("{} {}", self.type_name, self.name)
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.object_id, self.type_name, self.name)
    }
}


#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::fixtures::{date, record};

    #[test]
    fn display_includes_id_type_and_name() {
        let springfield = record(100, "city", "Springfield");
        assert_eq!(springfield.to_string(), "100: city Springfield");
    }

    #[test]
    fn short_form_has_no_separator() {
        let main = record(5, "street", "Main");
        assert_eq!(main.short_form(), "street Main");
    }

    #[test]
    fn short_form_of_empty_name_keeps_type() {
        let unnamed = record(5, "street", "");
        assert_eq!(unnamed.short_form(), "street ");
    }

    #[test_case("1999-12-31", false; "day before start")]
    #[test_case("2000-01-01", true; "start is inclusive")]
    #[test_case("2050-06-15", true; "inside interval")]
    #[test_case("2099-12-31", true; "end is inclusive")]
    #[test_case("2100-01-01", false; "day after end")]
    fn validity_interval_is_closed(on: &str, expected: bool) {
        let springfield = record(100, "city", "Springfield");
        assert_eq!(springfield.is_valid_on(date(on)), expected);
    }

    #[test_case(true, true, true; "active and current")]
    #[test_case(false, true, false; "inactive")]
    #[test_case(true, false, false; "not current")]
    #[test_case(false, false, false; "neither")]
    fn both_flags_required(is_active: bool, is_current: bool, expected: bool) {
        let mut main = record(5, "street", "Main");
        main.is_active = is_active;
        main.is_current = is_current;
        assert_eq!(main.is_current_and_active(), expected);
    }
}
