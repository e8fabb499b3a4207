//! Infers the type of a single field
//!
//! Every cell is typed once, at parse time, into a `[FieldValue]`. The rules are:
//! - an empty cell carries no value and becomes `Absent` rather than a numeric zero
//! - text that parses as a finite number becomes `Number`
//! - anything else (including `NaN` and `inf` spellings) is kept as `Text`

use log::trace;

use crate::dataset::FieldValue;

/// Infers a `[FieldValue]` from an already trimmed cell. `None` means the row was too short.
pub fn infer_field(cell: Option<&str>) -> FieldValue {
    let Some(cell) = cell else {
        return FieldValue::Absent;
    };
    if cell.is_empty() {
        return FieldValue::Absent;
    }
    match cell.parse::<f64>() {
        Ok(num) if num.is_finite() => FieldValue::Number(num),
        _ => {
            trace!("Keeping {:?} as text", cell);
            FieldValue::Text(cell.to_string())
        }
    }
}
