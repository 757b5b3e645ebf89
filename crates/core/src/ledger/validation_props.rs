//! Property-based tests for journal entry validation and ordering.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use tillbook_shared::types::EPSILON;

use super::entry::{create_journal_entry, create_journal_entry_at, sort_journal_entries};
use super::error::LedgerError;
use super::types::{JournalEntry, JournalLineInput, NewJournalEntry};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Gaps between the credit and debit sides around the tolerance boundary.
fn gap_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::new(5, 3)),
        Just(EPSILON),
        Just(Decimal::new(2, 2)),
        (1i64..10).prop_map(|mills| Decimal::new(mills, 3)),
    ]
}

/// Splits `total` into debit lines of the given weights, then credits
/// `total + gap` once. Shares round down so the last line stays positive.
fn entry_input(total: Decimal, splits: &[u8], gap: Decimal) -> NewJournalEntry {
    let weight_sum: Decimal = splits.iter().map(|w| Decimal::from(*w)).sum();
    let mut input = NewJournalEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "prop");
    let mut allocated = Decimal::ZERO;

    for (i, weight) in splits.iter().enumerate() {
        let amount = if i + 1 == splits.len() {
            total - allocated
        } else {
            (total * Decimal::from(*weight) / weight_sum)
                .round_dp_with_strategy(2, RoundingStrategy::ToZero)
        };
        allocated += amount;
        input = input.line(JournalLineInput::debit(format!("6{i:03}"), amount));
    }

    input.line(JournalLineInput::credit("1110", total + gap))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Accepted entries balance strictly within the tolerance and carry
    /// cents only; everything else is rejected as unbalanced.
    #[test]
    fn prop_created_entries_balance(
        total in positive_amount(),
        splits in prop::collection::vec(1u8..10, 1..6),
        gap in gap_amount(),
    ) {
        match create_journal_entry(entry_input(total, &splits, gap)) {
            Ok(entry) => {
                prop_assert!(gap < EPSILON, "gap {} should be rejected", gap);
                prop_assert!((entry.total_debit() - entry.total_credit()).abs() < EPSILON);
                for line in &entry.lines {
                    prop_assert_eq!(line.debit, line.debit.round_dp(2));
                    prop_assert_eq!(line.credit, line.credit.round_dp(2));
                }
            }
            Err(err) => {
                prop_assert!(!gap.is_zero(), "balanced entry rejected: {:?}", err);
                prop_assert!(
                    matches!(err, LedgerError::Unbalanced { .. }),
                    "expected Unbalanced, got: {:?}",
                    err
                );
            }
        }
    }

    /// Sides a cent or more apart are rejected.
    #[test]
    fn prop_unbalanced_rejected(
        debit in positive_amount(),
        gap_cents in 1i64..1_000_000,
    ) {
        let credit = debit + Decimal::new(gap_cents, 2);
        let input = NewJournalEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "gap")
            .line(JournalLineInput::debit("1110", debit))
            .line(JournalLineInput::credit("4110", credit));

        let result = create_journal_entry(input);
        prop_assert!(
            matches!(result, Err(LedgerError::Unbalanced { .. })),
            "Unbalanced entry should be rejected, got: {:?}",
            result
        );
    }

    /// Negative amounts are rejected on either side.
    #[test]
    fn prop_negative_amount_rejected(
        amount in negative_amount(),
        as_credit in any::<bool>(),
    ) {
        let line = if as_credit {
            JournalLineInput::credit("1110", amount)
        } else {
            JournalLineInput::debit("1110", amount)
        };
        let input = NewJournalEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "neg")
            .line(line)
            .line(JournalLineInput::debit("4110", amount));

        let result = create_journal_entry(input);
        prop_assert!(
            matches!(result, Err(LedgerError::NegativeAmount { .. })),
            "Negative amount should be rejected, got: {:?}",
            result
        );
    }

    /// Sorting is idempotent and yields a non-decreasing (date, createdAt, id) sequence.
    #[test]
    fn prop_sort_is_total_and_idempotent(
        keys in prop::collection::vec((0i64..30, 0i64..5, 0u8..5), 0..25),
    ) {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let base_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let journal: Vec<JournalEntry> = keys
            .iter()
            .map(|(day, minute, id)| {
                let input = NewJournalEntry::new(base_date + Duration::days(*day), "sorted")
                    .id(format!("id-{id}"))
                    .line(JournalLineInput::debit("1110", Decimal::ONE))
                    .line(JournalLineInput::credit("4110", Decimal::ONE));
                create_journal_entry_at(input, base_time + Duration::minutes(*minute)).unwrap()
            })
            .collect();

        let sorted = sort_journal_entries(&journal);
        prop_assert_eq!(sorted.len(), journal.len());
        prop_assert_eq!(sort_journal_entries(&sorted), sorted.clone());

        for pair in sorted.windows(2) {
            let a = (pair[0].date, pair[0].created_at, pair[0].id.as_str());
            let b = (pair[1].date, pair[1].created_at, pair[1].id.as_str());
            prop_assert!(a <= b);
        }
    }
}

#[test]
fn test_single_line_entry_is_unbalanced() {
    let input = NewJournalEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "one")
        .line(JournalLineInput::debit("1110", Decimal::ONE_HUNDRED));
    assert!(matches!(
        create_journal_entry(input),
        Err(LedgerError::Unbalanced { .. })
    ));
}
