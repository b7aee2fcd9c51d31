//! Parser for Global Historical Climatology Network daily (`.dly`) files.
//!
//! Each `.dly` row holds one station, month and element with 31 fixed-width
//! day blocks. [`decode`] turns a row into one [`Observation`] per calendar
//! day of that month, with values converted to their reported units and the
//! `-9999` sentinel and blank flags mapped to `None`.
//!
//! ```
//! let line = format!("{:<11}{}{}{}", "USC00011084", "2014", "02", "TMAX")
//!     + &"  125   ".repeat(31);
//! let observations: Vec<_> = ghcnd::decode(&line).unwrap().collect();
//!
//! assert_eq!(observations.len(), 28);
//! assert_eq!(observations[0].value, Some(12.5));
//! ```

pub mod cli;
pub mod deserialise;
pub mod error;
pub mod logging;
pub mod parquet;
pub mod reading;

pub use error::DecodeError;
pub use reading::{decode, decode_day, decode_header, Conversion, Observation, Observations};
