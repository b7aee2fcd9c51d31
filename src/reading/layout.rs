//! Column layout of a GHCN-Daily `.dly` row.
//!
//! Spans are 1-indexed and end-inclusive, exactly as printed in the GHCN-Daily
//! readme, so the table can be checked against the published documentation by
//! eye. Each row is a 21 column header followed by 31 day blocks of 8 columns.

use std::{fmt, sync::LazyLock};

use crate::error::{DecodeError, Result};

/// Length of a well-formed row, excluding the line terminator.
pub const LINE_LENGTH: usize = 269;
/// Number of day blocks in every row, whatever the length of the month.
pub const DAYS_PER_ROW: usize = 31;
/// Width of one day block.
pub const DAY_STRIDE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// Name of a field, with the day number for the repeated day fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Id,
    Year,
    Month,
    Element,
    Value(u8),
    MFlag(u8),
    QFlag(u8),
    SFlag(u8),
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Id => write!(f, "id"),
            FieldName::Year => write!(f, "year"),
            FieldName::Month => write!(f, "month"),
            FieldName::Element => write!(f, "element"),
            FieldName::Value(day) => write!(f, "value{}", day),
            FieldName::MFlag(day) => write!(f, "mflag{}", day),
            FieldName::QFlag(day) => write!(f, "qflag{}", day),
            FieldName::SFlag(day) => write!(f, "sflag{}", day),
        }
    }
}

/// A field read according to its [`FieldKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub start: usize,
    pub end: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(name: FieldName, start: usize, end: usize, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            start,
            end,
            kind,
        }
    }

    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// The columns of `line` covered by this field.
    ///
    /// `line` must be ASCII and at least `self.end` characters long; the
    /// decoder checks both before slicing.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start - 1..self.end]
    }

    /// The field with surrounding blanks removed.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        self.slice(line).trim()
    }

    /// Reads the field as its `kind`: trimmed text, or a parsed integer.
    pub fn read<'a>(&self, line: &'a str) -> Result<FieldValue<'a>> {
        let text = self.text(line);
        match self.kind {
            FieldKind::Text => Ok(FieldValue::Text(text)),
            FieldKind::Integer => {
                text.parse()
                    .map(FieldValue::Integer)
                    .map_err(|_| DecodeError::InvalidInteger {
                        field: self.name,
                        text: text.to_string(),
                    })
            }
        }
    }

    fn for_day(self, name: FieldName, day: usize) -> Self {
        let offset = (day - 1) * DAY_STRIDE;
        FieldSpec::new(name, self.start + offset, self.end + offset, self.kind)
    }
}

pub const ID: FieldSpec = FieldSpec::new(FieldName::Id, 1, 11, FieldKind::Text);
pub const YEAR: FieldSpec = FieldSpec::new(FieldName::Year, 12, 15, FieldKind::Integer);
pub const MONTH: FieldSpec = FieldSpec::new(FieldName::Month, 16, 17, FieldKind::Integer);
pub const ELEMENT: FieldSpec = FieldSpec::new(FieldName::Element, 18, 21, FieldKind::Text);

// Day 1 offsets; later days are shifted by DAY_STRIDE.
const VALUE: FieldSpec = FieldSpec::new(FieldName::Value(1), 22, 26, FieldKind::Integer);
const MFLAG: FieldSpec = FieldSpec::new(FieldName::MFlag(1), 27, 27, FieldKind::Text);
const QFLAG: FieldSpec = FieldSpec::new(FieldName::QFlag(1), 28, 28, FieldKind::Text);
const SFLAG: FieldSpec = FieldSpec::new(FieldName::SFlag(1), 29, 29, FieldKind::Text);

/// The four fields of one day block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBlock {
    pub value: FieldSpec,
    pub mflag: FieldSpec,
    pub qflag: FieldSpec,
    pub sflag: FieldSpec,
}

impl DayBlock {
    fn new(day: usize) -> Self {
        let d = day as u8;
        DayBlock {
            value: VALUE.for_day(FieldName::Value(d), day),
            mflag: MFLAG.for_day(FieldName::MFlag(d), day),
            qflag: QFLAG.for_day(FieldName::QFlag(d), day),
            sflag: SFLAG.for_day(FieldName::SFlag(d), day),
        }
    }

    pub fn fields(&self) -> [FieldSpec; 4] {
        [self.value, self.mflag, self.qflag, self.sflag]
    }
}

static DAY_BLOCKS: LazyLock<[DayBlock; DAYS_PER_ROW]> =
    LazyLock::new(|| std::array::from_fn(|i| DayBlock::new(i + 1)));

static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
    let mut fields = vec![ID, YEAR, MONTH, ELEMENT];
    fields.extend(DAY_BLOCKS.iter().flat_map(DayBlock::fields));
    fields
});

/// The complete layout: header fields, then value/mflag/qflag/sflag for days
/// 1 to 31.
pub fn fields() -> &'static [FieldSpec] {
    &FIELDS
}

/// Day blocks for days 1 to 31, in order.
pub fn day_blocks() -> &'static [DayBlock; DAYS_PER_ROW] {
    &DAY_BLOCKS
}

/// The day block for `day` (1-indexed), or `None` outside 1..=31.
pub fn day(day: usize) -> Option<&'static DayBlock> {
    day.checked_sub(1).and_then(|i| DAY_BLOCKS.get(i))
}

// -- Tests ----------------------------------------------------------------------------
