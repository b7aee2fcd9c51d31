//! Decoding of GHCN-Daily `.dly` rows.
//!
//! Everything in this module is pure: no I/O, no logging and no shared
//! mutable state, so rows can be decoded from any number of threads.

pub mod daily;
pub mod element;
pub mod layout;

pub use daily::{
    decode, decode_day, decode_header, days_in_month, DailyReading, DaySlot, Header, Observation,
    Observations, MISSING,
};
pub use element::{conversion_for, is_known, Conversion, PARAMETERS};
pub use layout::{FieldKind, FieldName, FieldSpec, FieldValue, LINE_LENGTH};
