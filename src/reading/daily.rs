//! Daily reading data structure and parsing logic.
//!
//! A row is decoded in full before any observation is produced, so a
//! malformed row fails as a whole and never yields part of a month.

use std::{array, iter::FusedIterator, iter::Take};

use chrono::{naive::NaiveDateDaysIterator, NaiveDate};

use super::{
    element::{conversion_for, Conversion},
    layout::{self, DayBlock, FieldSpec, FieldValue, DAYS_PER_ROW, LINE_LENGTH},
};
use crate::error::{DecodeError, Result};

/// Raw value GHCN uses for a day without an observation.
pub const MISSING: i32 = -9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: String,
    pub year: i32,
    pub month: u32,
    pub element: String,
}

/// One day block as stored, before unit conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySlot {
    pub value: Option<i32>,
    pub mflag: Option<char>,
    pub qflag: Option<char>,
    pub sflag: Option<char>,
}

/// A single station/element/day observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: String,
    pub date: NaiveDate,
    pub element: String,
    pub value: Option<f64>,
    pub sflag: Option<char>,
    pub mflag: Option<char>,
    pub qflag: Option<char>,
}

/// A decoded row: the header and all 31 day blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReading {
    pub header: Header,
    pub days: [DaySlot; DAYS_PER_ROW],
    days_in_month: u32,
}

impl DailyReading {
    pub fn from_line(line: &str) -> Result<Self> {
        let line = check_line(line)?;
        let header = parse_header(line)?;
        let days_in_month = days_in_month(header.year, header.month)?;

        let mut days = [DaySlot::default(); DAYS_PER_ROW];
        for (slot, block) in days.iter_mut().zip(layout::day_blocks()) {
            *slot = parse_day(line, block)?;
        }

        Ok(DailyReading {
            header,
            days,
            days_in_month,
        })
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    pub fn conversion(&self) -> Conversion {
        conversion_for(&self.header.element)
    }

    /// One observation per calendar day of the month, in day order.
    pub fn observations(self) -> Observations {
        let conversion = self.conversion();
        let count = self.days_in_month as usize;
        // from_line checked that day 1 of this month exists
        let first = NaiveDate::from_ymd_opt(self.header.year, self.header.month, 1)
            .unwrap_or(NaiveDate::MIN);

        Observations {
            header: self.header,
            conversion,
            dates: first.iter_days(),
            days: self.days.into_iter().take(count),
        }
    }
}

/// Decodes a row into its daily observations.
pub fn decode(line: &str) -> Result<Observations> {
    DailyReading::from_line(line).map(DailyReading::observations)
}

/// Decodes the station, year, month and element of a row.
pub fn decode_header(line: &str) -> Result<Header> {
    let line = check_line(line)?;
    parse_header(line)
}

/// Decodes the raw day block for `day` (1-indexed) of a row.
pub fn decode_day(line: &str, day: usize) -> Result<DaySlot> {
    let block = layout::day(day).ok_or(DecodeError::DayOutOfRange { day })?;
    let line = check_line(line)?;
    parse_day(line, block)
}

/// Number of days in `month` of `year` in the Gregorian calendar.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        year.checked_add(1).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => Ok((next - first).num_days() as u32),
        _ => Err(DecodeError::InvalidDate { year, month }),
    }
}

/// Observations of one row. Single pass; decode the line again to restart.
#[derive(Debug)]
pub struct Observations {
    header: Header,
    conversion: Conversion,
    dates: NaiveDateDaysIterator,
    days: Take<array::IntoIter<DaySlot, DAYS_PER_ROW>>,
}

impl Observations {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }
}

impl Iterator for Observations {
    type Item = Observation;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.days.next()?;
        let date = self.dates.next()?;
        let conversion = self.conversion;

        Some(Observation {
            id: self.header.id.clone(),
            date,
            element: self.header.element.clone(),
            value: slot.value.map(|raw| conversion.apply(raw)),
            sflag: slot.sflag,
            mflag: slot.mflag,
            qflag: slot.qflag,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.days.size_hint()
    }
}

impl ExactSizeIterator for Observations {}

impl FusedIterator for Observations {}

fn check_line(line: &str) -> Result<&str> {
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);

    if !line.is_ascii() {
        return Err(DecodeError::NonAscii);
    }
    if line.len() != LINE_LENGTH {
        return Err(DecodeError::WrongLength {
            expected: LINE_LENGTH,
            actual: line.len(),
        });
    }

    Ok(line)
}

fn parse_header(line: &str) -> Result<Header> {
    let id = layout::ID.text(line).to_string();
    let year = parse_integer(line, &layout::YEAR)?;
    let month = parse_integer(line, &layout::MONTH)?;
    let element = layout::ELEMENT.text(line).to_string();

    if !(1..=12).contains(&month) {
        return Err(DecodeError::InvalidMonth { month });
    }

    Ok(Header {
        id,
        year,
        month: month as u32,
        element,
    })
}

fn parse_day(line: &str, block: &DayBlock) -> Result<DaySlot> {
    let value = match parse_integer(line, &block.value)? {
        MISSING => None,
        v => Some(v),
    };

    Ok(DaySlot {
        value,
        mflag: parse_flag(line, &block.mflag),
        qflag: parse_flag(line, &block.qflag),
        sflag: parse_flag(line, &block.sflag),
    })
}

fn parse_integer(line: &str, field: &FieldSpec) -> Result<i32> {
    match field.read(line)? {
        FieldValue::Integer(value) => Ok(value),
        FieldValue::Text(text) => Err(DecodeError::InvalidInteger {
            field: field.name,
            text: text.to_string(),
        }),
    }
}

fn parse_flag(line: &str, field: &FieldSpec) -> Option<char> {
    field.text(line).chars().next()
}

// -- Tests ----------------------------------------------------------------------------
