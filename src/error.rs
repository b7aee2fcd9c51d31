//! Errors raised while decoding a `.dly` row.

use thiserror::Error;

use crate::reading::layout::FieldName;

/// A row that does not match the GHCN-Daily fixed-width layout.
///
/// Unknown element codes and missing values are not errors: the former fall
/// back to the default conversion and the latter decode to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("line contains non-ASCII characters")]
    NonAscii,

    #[error("line has {actual} characters, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("field `{field}` is not an integer: {text:?}")]
    InvalidInteger { field: FieldName, text: String },

    #[error("month {month} is out of range 1-12")]
    InvalidMonth { month: i32 },

    #[error("no calendar month {year}-{month:02}")]
    InvalidDate { year: i32, month: u32 },

    #[error("day {day} is out of range 1-31")]
    DayOutOfRange { day: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
