//! Derived metrics for one tracked series: latest value and change from the prior record

use crate::dataset::{Dataset, FieldValue};

/// Shown wherever a derived value does not exist or is not finite
pub const NOT_AVAILABLE: &str = "N/A";

/// Direction of the latest change. A change of exactly zero counts as `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn arrow_symbol(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
        }
    }
}

/// Metrics derived on demand from a `[Dataset]` for one column. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub latest: FieldValue,
    pub previous: FieldValue,
    /// `latest - previous`, NaN unless both are numbers
    pub absolute_change: f64,
    /// `absolute_change / previous * 100`, non-finite when `previous` is zero or missing
    pub percent_change: f64,
}

/// Summarizes `key` over the last two records of `dataset`
pub fn summarize(dataset: &Dataset, key: &str) -> Summary {
    let latest = dataset
        .last()
        .map(|r| r.get(key).clone())
        .unwrap_or(FieldValue::Absent);
    let previous = dataset
        .second_to_last()
        .map(|r| r.get(key).clone())
        .unwrap_or(FieldValue::Absent);

    let (absolute_change, percent_change) = match (latest.as_number(), previous.as_number()) {
        (Some(latest), Some(previous)) => {
            let change = latest - previous;
            (change, change / previous * 100.0)
        }
        _ => (f64::NAN, f64::NAN),
    };

    Summary {
        latest,
        previous,
        absolute_change,
        percent_change,
    }
}

impl Summary {
    /// `None` when the change could not be computed
    pub fn direction(&self) -> Option<Direction> {
        if self.absolute_change.is_nan() {
            None
        } else if self.absolute_change >= 0.0 {
            Some(Direction::Up)
        } else {
            Some(Direction::Down)
        }
    }

    /// Latest value with two decimals
    pub fn latest_display(&self) -> String {
        format_value(&self.latest)
    }

    pub fn previous_display(&self) -> String {
        format_value(&self.previous)
    }

    /// Magnitude of the percent change with one decimal, the arrow carries the sign
    pub fn percent_display(&self) -> String {
        if self.percent_change.is_finite() {
            format!("{:.1}%", self.percent_change.abs())
        } else {
            NOT_AVAILABLE.to_string()
        }
    }

    /// Arrow and percent, e.g. `↑ 35.9%`
    pub fn change_display(&self) -> String {
        match self.direction() {
            Some(direction) => format!("{} {}", direction.arrow_symbol(), self.percent_display()),
            None => self.percent_display(),
        }
    }
}

/// Numbers with two decimals, text verbatim
fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => format!("{:.2}", n),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Absent => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{SAMPLE_DATA, parse_dataset};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_summarize_sample_bas() {
        let data = parse_dataset(SAMPLE_DATA).unwrap();
        let summary = summarize(&data, "BAS");
        assert_eq!(summary.latest, FieldValue::Number(35.55));
        assert_eq!(summary.previous, FieldValue::Number(26.16));
        assert!((summary.absolute_change - 9.39).abs() < EPSILON);
        assert!((summary.percent_change - 35.894495).abs() < 1e-4);
        assert_eq!(summary.direction(), Some(Direction::Up));
        assert_eq!(summary.latest_display(), "35.55");
        assert_eq!(summary.previous_display(), "26.16");
        assert_eq!(summary.percent_display(), "35.9%");
        assert_eq!(summary.change_display(), "↑ 35.9%");
    }

    #[test]
    fn test_summarize_sample_decline() {
        let data = parse_dataset(SAMPLE_DATA).unwrap();
        // CNS: 10.90 -> 10.48 is a decline in Q3, but Q4 rises again
        let summary = summarize(&data, "CNS");
        assert_eq!(summary.direction(), Some(Direction::Up));

        let data = parse_dataset("Quarter,CNS\nQ1,12.00\nQ2,9.00").unwrap();
        let summary = summarize(&data, "CNS");
        assert_eq!(summary.direction(), Some(Direction::Down));
        assert_eq!(summary.change_display(), "↓ 25.0%");
    }

    #[test]
    fn test_zero_change_is_up() {
        let data = parse_dataset("Quarter,BAS\nQ1,5\nQ2,5").unwrap();
        let summary = summarize(&data, "BAS");
        assert_eq!(summary.absolute_change, 0.0);
        assert_eq!(summary.direction(), Some(Direction::Up));
        assert_eq!(summary.percent_display(), "0.0%");
    }

    #[test]
    fn test_single_record() {
        let data = parse_dataset("Quarter,BAS\nQ1,16.59").unwrap();
        let summary = summarize(&data, "BAS");
        assert_eq!(summary.latest, FieldValue::Number(16.59));
        assert_eq!(summary.previous, FieldValue::Absent);
        assert_eq!(summary.previous_display(), NOT_AVAILABLE);
        assert!(summary.absolute_change.is_nan());
        assert!(!summary.percent_change.is_finite());
        assert_eq!(summary.direction(), None);
        assert_eq!(summary.percent_display(), NOT_AVAILABLE);
        assert_eq!(summary.change_display(), NOT_AVAILABLE);
    }

    #[test]
    fn test_empty_dataset() {
        let data = parse_dataset("Quarter,BAS").unwrap();
        let summary = summarize(&data, "BAS");
        assert_eq!(summary.latest, FieldValue::Absent);
        assert_eq!(summary.previous, FieldValue::Absent);
        assert_eq!(summary.latest_display(), NOT_AVAILABLE);
    }

    #[test]
    fn test_previous_zero_is_infinite() {
        let data = parse_dataset("Quarter,BAS\nQ1,0\nQ2,4").unwrap();
        let summary = summarize(&data, "BAS");
        assert_eq!(summary.absolute_change, 4.0);
        assert!(summary.percent_change.is_infinite());
        assert_eq!(summary.direction(), Some(Direction::Up));
        assert_eq!(summary.change_display(), "↑ N/A");

        // 0 / 0
        let data = parse_dataset("Quarter,BAS\nQ1,0\nQ2,0").unwrap();
        let summary = summarize(&data, "BAS");
        assert!(summary.percent_change.is_nan());
    }

    #[test]
    fn test_untracked_column() {
        let data = parse_dataset(SAMPLE_DATA).unwrap();
        let summary = summarize(&data, "XYZ");
        assert_eq!(summary.latest, FieldValue::Absent);
        assert!(summary.absolute_change.is_nan());
    }

    #[test]
    fn test_text_values_propagate_nan() {
        let data = parse_dataset("Quarter,BAS\nQ1,10\nQ2,pending").unwrap();
        let summary = summarize(&data, "BAS");
        assert_eq!(summary.latest_display(), "pending");
        assert!(summary.absolute_change.is_nan());
        assert_eq!(summary.direction(), None);
    }
}
