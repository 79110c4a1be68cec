// File: query.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::ingest::normalize_code;
use crate::storage::ScanEvent;

/// Value accepted in place of a filter to mean "everything".
pub const ALL_SENTINEL: &str = "all";

const DATE_PREFIX_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub code: Option<String>,
    pub date: Option<String>,
}

impl HistoryFilter {
    pub fn new(code: Option<&str>, date: Option<&str>) -> Self {
        Self {
            code: code
                .filter(|c| is_active(c))
                .map(normalize_code)
                .filter(|c| !c.is_empty()),
            date: date.filter(|d| is_active(d)).map(|d| d.trim().to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.date.is_none()
    }

    pub fn matches(&self, event: &ScanEvent) -> bool {
        if let Some(ref code) = self.code {
            if event.code != *code {
                return false;
            }
        }

        if let Some(ref date) = self.date {
            if date_of(&event.datetime) != date {
                return false;
            }
        }

        true
    }
}

fn is_active(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case(ALL_SENTINEL)
}

/// Date portion (`dd/mm/yyyy`) of a recorded timestamp.
pub fn date_of(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(DATE_PREFIX_LEN) {
        Some((idx, _)) => &timestamp[..idx],
        None => timestamp,
    }
}

pub fn filter(history: &[ScanEvent], filter: &HistoryFilter) -> Vec<ScanEvent> {
    history
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn sample_history() -> Vec<ScanEvent> {
        vec![
            ScanEvent::new("A1", "01/02/2025 à 09:00:00"),
            ScanEvent::new("B2", "01/02/2025 à 09:30:00"),
            ScanEvent::new("A1", "02/02/2025 à 10:00:00"),
            ScanEvent::new("C3", "02/02/2025 à 11:00:00"),
            ScanEvent::new("A1", "03/02/2025 à 08:00:00"),
        ]
    }

    #[test]
    fn test_no_filter_is_identity() {
        let history = sample_history();
        let result = filter(&history, &HistoryFilter::default());
        assert_eq!(result, history);
    }

    #[test]
    fn test_code_filter_keeps_order() {
        let history = sample_history();
        let result = filter(&history, &HistoryFilter::new(Some("A1"), None));

        let datetimes: Vec<&str> = result.iter().map(|e| e.datetime.as_str()).collect();
        assert_eq!(
            datetimes,
            vec![
                "01/02/2025 à 09:00:00",
                "02/02/2025 à 10:00:00",
                "03/02/2025 à 08:00:00"
            ]
        );
        assert!(result.iter().all(|e| e.code == "A1"));
    }

    #[test]
    fn test_date_filter() {
        let history = sample_history();
        let result = filter(&history, &HistoryFilter::new(None, Some("02/02/2025")));
        let codes: Vec<&str> = result.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "C3"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let history = sample_history();
        let result = filter(
            &history,
            &HistoryFilter::new(Some("A1"), Some("02/02/2025")),
        );
        assert_eq!(result, vec![ScanEvent::new("A1", "02/02/2025 à 10:00:00")]);
    }

    #[test]
    fn test_filter_does_not_mutate_history() {
        let history = sample_history();
        let before = history.clone();
        let _ = filter(&history, &HistoryFilter::new(Some("B2"), None));
        assert_eq!(history, before);
    }

    #[rstest]
    #[case(Some("all"), None, true)]
    #[case(Some("ALL"), Some("All"), true)]
    #[case(Some("  "), Some(""), true)]
    #[case(Some("a1"), None, false)]
    #[case(None, Some("01/02/2025"), false)]
    fn test_sentinel_handling(
        #[case] code: Option<&str>,
        #[case] date: Option<&str>,
        #[case] empty: bool,
    ) {
        assert_eq!(HistoryFilter::new(code, date).is_empty(), empty);
    }

    #[test]
    fn test_code_filter_is_normalized() {
        let f = HistoryFilter::new(Some(" a1 "), None);
        assert_eq!(f.code.as_deref(), Some("A1"));
    }

    #[rstest]
    #[case("01/02/2025 à 09:00:00", "01/02/2025")]
    #[case("01/02/2025", "01/02/2025")]
    #[case("1/2/25", "1/2/25")]
    #[case("", "")]
    fn test_date_of(#[case] timestamp: &str, #[case] expected: &str) {
        assert_eq!(date_of(timestamp), expected);
    }
}
