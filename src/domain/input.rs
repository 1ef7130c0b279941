//! Decoding of user-supplied query arguments.

use chrono::NaiveDate;
use nonempty::NonEmpty;
use thiserror::Error;

use crate::domain::ObjectId;

/// The accepted date format, `yyyy-MM-dd`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised when a query argument cannot be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The date is not a valid `yyyy-MM-dd` calendar date.
    #[error("invalid date '{0}', expected yyyy-MM-dd")]
    InvalidDate(String),

    /// An element of the id list is not an integer.
    #[error("invalid object id '{0}'")]
    InvalidObjectId(String),

    /// The id list contains no ids.
    #[error("no object ids given")]
    NoObjectIds,
}

/// Parses a `yyyy-MM-dd` date.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDate`] for malformed or impossible dates
/// (e.g. `2010-13-40`).
pub fn parse_target_date(s: &str) -> Result<NaiveDate, FormatError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| FormatError::InvalidDate(s.to_string()))
}

/// Parses a comma-separated list of object ids, e.g. `1422396, 1450759`.
///
/// # Errors
///
/// Returns [`FormatError::InvalidObjectId`] if any element is not an
/// integer, and [`FormatError::NoObjectIds`] if the list is empty.
pub fn parse_object_ids(s: &str) -> Result<NonEmpty<ObjectId>, FormatError> {
    if s.trim().is_empty() {
        return Err(FormatError::NoObjectIds);
    }

    let ids = s
        .split(',')
        .map(str::trim)
        .map(|id| {
            id.parse()
                .map_err(|_| FormatError::InvalidObjectId(id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    NonEmpty::from_vec(ids).ok_or(FormatError::NoObjectIds)
}
