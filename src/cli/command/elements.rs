use crate::reading::element::{conversion_for, PARAMETERS};

/// One line per documented element: code and conversion.
pub fn elements() -> Vec<String> {
    PARAMETERS
        .iter()
        .map(|element| format!("{}  {}", element, conversion_for(element)))
        .collect()
}
