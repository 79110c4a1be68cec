// File: aggregate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::ingest::DATE_FORMAT;
use crate::storage::ScanEvent;

/// How per-day buckets are ordered.
///
/// `Lexicographic` sorts the `dd/mm/yyyy` strings as text, which is how the
/// history has always been charted. It does not follow the calendar across
/// month or year boundaries (`01/03/2025` sorts before `15/02/2025`);
/// `Chronological` parses the dates instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    #[default]
    Lexicographic,
    Chronological,
}

pub fn daily_counts(history: &[ScanEvent], order: DateOrder) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in history {
        *counts.entry(event.date()).or_insert(0) += 1;
    }

    let mut days: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(day, count)| (day.to_string(), count))
        .collect();

    match order {
        DateOrder::Lexicographic => days.sort_by(|a, b| a.0.cmp(&b.0)),
        DateOrder::Chronological => days.sort_by(|a, b| compare_calendar(&a.0, &b.0)),
    }

    days
}

fn compare_calendar(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| NaiveDate::parse_from_str(s, DATE_FORMAT).ok();

    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Day with the most scans. Ties go to the earliest entry of `counts`.
pub fn busiest_day(counts: &[(String, usize)]) -> Option<(&str, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<(&str, usize)>, (day, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((day.as_str(), *count)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: &str, datetime: &str) -> ScanEvent {
        ScanEvent::new(code, datetime)
    }

    #[test]
    fn test_counts_per_day() {
        let history = vec![
            event("A1", "03/01/2025 à 09:00:00"),
            event("B2", "01/01/2025 à 09:00:00"),
            event("A1", "03/01/2025 à 10:00:00"),
            event("C3", "02/01/2025 à 09:00:00"),
            event("C3", "01/01/2025 à 18:00:00"),
            event("A1", "03/01/2025 à 11:00:00"),
        ];

        let counts = daily_counts(&history, DateOrder::Lexicographic);
        assert_eq!(
            counts,
            vec![
                ("01/01/2025".to_string(), 2),
                ("02/01/2025".to_string(), 1),
                ("03/01/2025".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_empty_history() {
        assert!(daily_counts(&[], DateOrder::Chronological).is_empty());
    }

    #[test]
    fn test_lexicographic_order_crosses_months_as_text() {
        let history = vec![
            event("A1", "15/02/2025 à 09:00:00"),
            event("A1", "01/03/2025 à 09:00:00"),
        ];

        let days: Vec<String> = daily_counts(&history, DateOrder::Lexicographic)
            .into_iter()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(days, vec!["01/03/2025", "15/02/2025"]);
    }

    #[test]
    fn test_chronological_order() {
        let history = vec![
            event("A1", "01/01/2026 à 09:00:00"),
            event("A1", "01/03/2025 à 09:00:00"),
            event("A1", "garbage"),
            event("A1", "15/02/2025 à 09:00:00"),
        ];

        let days: Vec<String> = daily_counts(&history, DateOrder::Chronological)
            .into_iter()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(
            days,
            vec!["15/02/2025", "01/03/2025", "01/01/2026", "garbage"]
        );
    }

    #[test]
    fn test_busiest_day() {
        let counts = vec![
            ("01/01/2025".to_string(), 2),
            ("02/01/2025".to_string(), 3),
            ("03/01/2025".to_string(), 3),
        ];
        assert_eq!(busiest_day(&counts), Some(("02/01/2025", 3)));
        assert_eq!(busiest_day(&[]), None);
    }
}
