//! Element codes and the unit conversion applied to each.
//!
//! See the [GHCN-Daily readme](https://www.ncei.noaa.gov/pub/data/ghcn/daily/readme.txt)
//! for the meaning of each element.

use std::fmt;

/// Every element code listed in the GHCN-Daily v3.11 readme.
pub const PARAMETERS: &[&str] = &[
    "ACMC", "ACMH", "ACSC", "ACSH", "AWDR", "AWND", "DAEV", "DAPR", "DASF", "DATN", "DATX",
    "DAWM", "DWPR", "EVAP", "FMTM", "FRGB", "FRGT", "FRTH", "GAHT", "MDEV", "MDPR", "MDSF",
    "MDTN", "MDTX", "MDWM", "MNPN", "MXPN", "PGTM", "PRCP", "PSUN", "SN01", "SN02", "SN03",
    "SN04", "SN05", "SN06", "SN07", "SN11", "SN12", "SN13", "SN14", "SN15", "SN16", "SN17",
    "SN21", "SN22", "SN23", "SN24", "SN25", "SN26", "SN27", "SN31", "SN32", "SN33", "SN34",
    "SN35", "SN36", "SN37", "SN41", "SN42", "SN43", "SN44", "SN45", "SN46", "SN47", "SN51",
    "SN52", "SN53", "SN54", "SN55", "SN56", "SN57", "SN61", "SN62", "SN63", "SN64", "SN65",
    "SN66", "SN67", "SN71", "SN72", "SN73", "SN74", "SN75", "SN76", "SN77", "SN81", "SN82",
    "SN83", "SN84", "SN85", "SN86", "SN87", "SNOW", "SNWD", "SX01", "SX02", "SX03", "SX04",
    "SX05", "SX06", "SX07", "SX11", "SX12", "SX13", "SX14", "SX15", "SX16", "SX17", "SX21",
    "SX22", "SX23", "SX24", "SX25", "SX26", "SX27", "SX31", "SX32", "SX33", "SX34", "SX35",
    "SX36", "SX37", "SX41", "SX42", "SX43", "SX44", "SX45", "SX46", "SX47", "SX51", "SX52",
    "SX53", "SX54", "SX55", "SX56", "SX57", "SX61", "SX62", "SX63", "SX64", "SX65", "SX66",
    "SX67", "SX71", "SX72", "SX73", "SX74", "SX75", "SX76", "SX77", "SX81", "SX82", "SX83",
    "SX84", "SX85", "SX86", "SX87", "TAVG", "THIC", "TMAX", "TMIN", "TOBS", "TSUN", "WDF1",
    "WDF2", "WDF5", "WDFG", "WDFI", "WDFM", "WDMV", "WESD", "WESF", "WSF1", "WSF2", "WSF5",
    "WSFG", "WSFI", "WSFM", "WT01", "WT02", "WT03", "WT04", "WT05", "WT06", "WT07", "WT08",
    "WT09", "WT10", "WT11", "WT12", "WT13", "WT14", "WT15", "WT16", "WT17", "WT18", "WT19",
    "WT21", "WT22", "WV01", "WV03", "WV07", "WV18", "WV20",
];

/// How a raw integer value is turned into the reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// Counts, durations, directions and weather-type flags, already in the
    /// reported unit.
    Raw,
    /// Tenths of a unit (temperatures, precipitation, wind speed, ...).
    Tenths,
    /// Percentages stored in hundredths (cloudiness, sunshine).
    Percent,
    /// HHMM times of day. Passed through unchanged; the value is not split
    /// into hours and minutes.
    Time,
}

impl Conversion {
    pub fn apply(self, raw: i32) -> f64 {
        let raw = f64::from(raw);
        match self {
            Conversion::Raw | Conversion::Time => raw,
            Conversion::Tenths => raw / 10.0,
            Conversion::Percent => raw / 100.0,
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Conversion::Raw => "raw",
            Conversion::Tenths => "tenths",
            Conversion::Percent => "percent",
            Conversion::Time => "time",
        };
        f.write_str(name)
    }
}

/// The conversion for `element`.
///
/// Total over all inputs: codes outside [`PARAMETERS`] are treated as tenths,
/// so new elements added to GHCN still decode.
pub fn conversion_for(element: &str) -> Conversion {
    match element {
        "DAEV" | "DAPR" | "DASF" | "DATN" | "DATX" | "DAWM" | "DWPR" | "FRGB" | "FRGT"
        | "FRTH" | "GAHT" | "MDWM" | "SNOW" | "SNWD" | "WDF1" | "WDF2" | "WDF5" | "WDFG"
        | "WDFI" | "WDFM" | "WDMV" | "WT01" | "WT02" | "WT03" | "WT04" | "WT05" | "WT06"
        | "WT07" | "WT08" | "WT09" | "WT10" | "WT11" | "WT12" | "WT13" | "WT14" | "WT15"
        | "WT16" | "WT17" | "WT18" | "WT19" | "WT21" | "WT22" | "WV01" | "WV03" | "WV07"
        | "WV18" | "WV20" => Conversion::Raw,
        "ACMC" | "ACMH" | "ACSC" | "ACSH" | "PSUN" => Conversion::Percent,
        "FMTM" | "PGTM" => Conversion::Time,
        _ => Conversion::Tenths,
    }
}

/// Whether `element` is one of the documented [`PARAMETERS`].
pub fn is_known(element: &str) -> bool {
    PARAMETERS.contains(&element)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_apply_conversions() {
        assert_eq!(Conversion::Raw.apply(46), 46.0);
        assert_eq!(Conversion::Tenths.apply(8), 0.8);
        assert_eq!(Conversion::Tenths.apply(-156), -15.6);
        assert_eq!(Conversion::Percent.apply(8), 0.08);
        assert_eq!(Conversion::Time.apply(1435), 1435.0);
    }

    #[test]
    fn should_get_conversion_for_element() {
        assert_eq!(conversion_for("PRCP"), Conversion::Tenths);
        assert_eq!(conversion_for("TMAX"), Conversion::Tenths);
        assert_eq!(conversion_for("SNOW"), Conversion::Raw);
        assert_eq!(conversion_for("WT22"), Conversion::Raw);
        assert_eq!(conversion_for("ACMH"), Conversion::Percent);
        assert_eq!(conversion_for("PSUN"), Conversion::Percent);
        assert_eq!(conversion_for("PGTM"), Conversion::Time);
    }

    #[test]
    fn should_fall_back_to_tenths_for_unknown_element() {
        assert!(!is_known("ZZZZ"));
        assert_eq!(conversion_for("ZZZZ"), Conversion::Tenths);
        assert_eq!(conversion_for(""), Conversion::Tenths);
    }

    #[test]
    fn should_only_override_known_elements() {
        let raw = PARAMETERS
            .iter()
            .filter(|p| conversion_for(p) == Conversion::Raw)
            .count();
        let percent = PARAMETERS
            .iter()
            .filter(|p| conversion_for(p) == Conversion::Percent)
            .count();

        assert_eq!(raw, 47);
        assert_eq!(percent, 5);
        assert!(is_known("WV20"));
    }
}
