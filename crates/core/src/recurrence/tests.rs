//! Property and table tests for recurrence expansion.

use chrono::NaiveDate;
use pennywise_shared::types::{AccountId, CategoryId, RecurringTransactionId, UserId};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal_macros::dec;

use super::{Frequency, OccurrenceSource, RecurrenceError, RecurrenceRule, expand};
use crate::records::{RecurringTransaction, Transaction, TransactionType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rule(anchor: NaiveDate, frequency: Frequency, end: Option<NaiveDate>) -> RecurringTransaction {
    let template = Transaction::new(
        UserId::new(),
        AccountId::new(),
        CategoryId::new(),
        dec!(50),
        TransactionType::Expense,
        anchor,
    );
    let mut recurrence = RecurrenceRule::new(frequency);
    recurrence.end_date = end;
    RecurringTransaction::new(template, recurrence).unwrap()
}

fn dates(rt: &RecurringTransaction, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    expand(rt, start, end).unwrap().map(|o| o.date).collect()
}

/// Walks every index from the anchor; slow but obviously correct.
fn brute_force(rt: &RecurringTransaction, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let last = rt.rule.end_date.map_or(end, |e| e.min(end));
    (0u32..)
        .map_while(|n| rt.rule.frequency.nth(rt.anchor(), n).filter(|d| *d <= last))
        .filter(|d| *d >= start)
        .collect()
}

#[test]
fn test_month_end_anchor_clamps_without_drift() {
    let rt = rule(date(2024, 1, 31), Frequency::Monthly, None);

    assert_eq!(
        dates(&rt, date(2024, 1, 1), date(2024, 5, 1)),
        vec![
            date(2024, 1, 31),
            date(2024, 2, 29),
            date(2024, 3, 31),
            date(2024, 4, 30),
        ]
    );
}

#[test]
fn test_month_end_clamps_in_non_leap_year() {
    let rt = rule(date(2023, 1, 31), Frequency::Monthly, None);

    assert_eq!(
        dates(&rt, date(2023, 2, 1), date(2023, 3, 31)),
        vec![date(2023, 2, 28), date(2023, 3, 31)]
    );
}

#[test]
fn test_leap_day_yearly() {
    let rt = rule(date(2024, 2, 29), Frequency::Yearly, None);

    assert_eq!(
        dates(&rt, date(2024, 1, 1), date(2028, 12, 31)),
        vec![
            date(2024, 2, 29),
            date(2025, 2, 28),
            date(2026, 2, 28),
            date(2027, 2, 28),
            date(2028, 2, 29),
        ]
    );
}

#[rstest]
#[case::daily(Frequency::Daily, vec![
    date(2024, 3, 10),
    date(2024, 3, 11),
    date(2024, 3, 12),
    date(2024, 3, 13),
    date(2024, 3, 14),
    date(2024, 3, 15),
    date(2024, 3, 16),
])]
#[case::weekly(Frequency::Weekly, vec![date(2024, 3, 15)])]
#[case::monthly(Frequency::Monthly, vec![])]
#[case::yearly(Frequency::Yearly, vec![])]
fn test_window_after_anchor(#[case] frequency: Frequency, #[case] expected: Vec<NaiveDate>) {
    let rt = rule(date(2024, 3, 1), frequency, None);
    assert_eq!(dates(&rt, date(2024, 3, 10), date(2024, 3, 16)), expected);
}

#[test]
fn test_weekly_first_occurrence_inside_window() {
    let rt = rule(date(2024, 3, 1), Frequency::Weekly, None);

    assert_eq!(
        dates(&rt, date(2024, 3, 2), date(2024, 3, 31)),
        vec![
            date(2024, 3, 8),
            date(2024, 3, 15),
            date(2024, 3, 22),
            date(2024, 3, 29),
        ]
    );
}

#[test]
fn test_window_before_anchor_is_empty() {
    let rt = rule(date(2024, 6, 1), Frequency::Daily, None);
    assert!(dates(&rt, date(2024, 1, 1), date(2024, 5, 31)).is_empty());
}

#[test]
fn test_rule_ended_before_window_is_empty() {
    let rt = rule(date(2024, 1, 1), Frequency::Weekly, Some(date(2024, 1, 31)));
    assert!(dates(&rt, date(2024, 2, 1), date(2024, 2, 29)).is_empty());
}

#[test]
fn test_end_date_is_inclusive() {
    let rt = rule(date(2024, 1, 1), Frequency::Weekly, Some(date(2024, 1, 15)));

    assert_eq!(
        dates(&rt, date(2024, 1, 1), date(2024, 12, 31)),
        vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]
    );
}

#[test]
fn test_single_day_window_on_anchor() {
    let day = date(2024, 7, 4);
    let rt = rule(day, Frequency::Daily, None);

    assert_eq!(dates(&rt, day, day), vec![day]);
}

#[test]
fn test_single_day_window_between_occurrences() {
    let rt = rule(date(2024, 7, 1), Frequency::Weekly, None);
    assert!(dates(&rt, date(2024, 7, 3), date(2024, 7, 3)).is_empty());
}

#[test]
fn test_inverted_window_rejected() {
    let rt = rule(date(2024, 1, 1), Frequency::Daily, None);

    let err = expand(&rt, date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        RecurrenceError::InvalidWindow {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        }
    );
}

#[test]
fn test_end_before_anchor_rejected_at_construction() {
    let template = Transaction::new(
        UserId::new(),
        AccountId::new(),
        CategoryId::new(),
        dec!(10),
        TransactionType::Income,
        date(2024, 5, 1),
    );
    let result = RecurringTransaction::new(
        template,
        RecurrenceRule::new(Frequency::Monthly).until(date(2024, 4, 30)),
    );

    assert!(matches!(
        result,
        Err(RecurrenceError::EndBeforeAnchor { .. })
    ));
}

#[test]
fn test_unknown_frequency() {
    assert_eq!(
        "fortnightly".parse::<Frequency>(),
        Err(RecurrenceError::UnknownFrequency("fortnightly".to_string()))
    );
    assert_eq!("Monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
}

#[test]
fn test_occurrence_copies_template() {
    let id = RecurringTransactionId::new();
    let rt = rule(date(2024, 1, 1), Frequency::Monthly, None).with_id(id);

    let first = expand(&rt, date(2024, 1, 1), date(2024, 1, 31))
        .unwrap()
        .next()
        .unwrap();

    assert_eq!(first.amount, rt.template.amount);
    assert_eq!(first.category_id, rt.template.category_id);
    assert_eq!(first.account_id, rt.template.account_id);
    assert_eq!(first.transaction_type, TransactionType::Expense);
    assert_eq!(first.source, OccurrenceSource::Recurring(Some(id)));
}

#[test]
fn test_clone_resumes_at_same_position() {
    let rt = rule(date(2024, 1, 1), Frequency::Daily, None);
    let mut occurrences = expand(&rt, date(2024, 1, 1), date(2024, 1, 10)).unwrap();
    occurrences.next();
    occurrences.next();

    let rest: Vec<_> = occurrences.clone().collect();
    assert_eq!(rest, occurrences.collect::<Vec<_>>());
    assert_eq!(rest.len(), 8);
}

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
        Just(Frequency::Yearly),
    ]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    // 2020-01-01 plus up to ~8 years, so leap days and month ends show up.
    (0u64..3000).prop_map(|offset| date(2020, 1, 1) + chrono::Days::new(offset))
}

proptest! {
    /// Expansion matches a naive walk from the anchor.
    #[test]
    fn prop_expand_matches_brute_force(
        frequency in frequency_strategy(),
        anchor in date_strategy(),
        start in date_strategy(),
        len in 0u64..400,
        end_offset in proptest::option::of(0u64..1500),
    ) {
        let end = start + chrono::Days::new(len);
        let rule_end = end_offset.map(|o| anchor + chrono::Days::new(o));
        let rt = rule(anchor, frequency, rule_end);

        prop_assert_eq!(dates(&rt, start, end), brute_force(&rt, start, end));
    }

    /// Every occurrence lies inside the window and the rule's lifetime, strictly increasing.
    #[test]
    fn prop_occurrences_bounded_and_ordered(
        frequency in frequency_strategy(),
        anchor in date_strategy(),
        start in date_strategy(),
        len in 0u64..400,
    ) {
        let end = start + chrono::Days::new(len);
        let rt = rule(anchor, frequency, None);
        let found = dates(&rt, start, end);

        for d in &found {
            prop_assert!(*d >= start && *d <= end && *d >= anchor);
        }
        for pair in found.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Expanding the same inputs twice gives the same sequence.
    #[test]
    fn prop_expand_is_restartable(
        frequency in frequency_strategy(),
        anchor in date_strategy(),
        start in date_strategy(),
        len in 0u64..400,
    ) {
        let end = start + chrono::Days::new(len);
        let rt = rule(anchor, frequency, None);

        let first: Vec<_> = expand(&rt, start, end).unwrap().collect();
        let second: Vec<_> = expand(&rt, start, end).unwrap().collect();
        prop_assert_eq!(first, second);
    }

    /// A single-day window yields at most one occurrence.
    #[test]
    fn prop_single_day_window_at_most_one(
        frequency in frequency_strategy(),
        anchor in date_strategy(),
        day in date_strategy(),
    ) {
        let rt = rule(anchor, frequency, None);
        prop_assert!(dates(&rt, day, day).len() <= 1);
    }
}
