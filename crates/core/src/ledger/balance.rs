//! Account balance calculations.
//!
//! Balances follow the account's normal side:
//! - Debit-normal: balance = debit - credit
//! - Credit-normal: balance = credit - debit
//!
//! Lines posted to codes missing from the chart are ignored. Legacy or
//! malformed data therefore never fails a report; it simply does not count.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::snap_to_zero;

use super::chart::ChartOfAccounts;
use super::entry::sort_journal_entries;
use super::types::{Account, AccountType, JournalEntry, NormalBalance};

/// Accumulated totals for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Sign convention.
    pub normal_balance: NormalBalance,
    /// Total debits.
    pub debit: Decimal,
    /// Total credits.
    pub credit: Decimal,
    /// Net balance on the normal side, snapped to zero within the tolerance.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Creates an empty accumulator for an account.
    #[must_use]
    pub fn new(account: &Account) -> Self {
        Self {
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            normal_balance: account.normal_balance,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Adds a debit/credit pair and refreshes the balance.
    pub fn post(&mut self, debit: Decimal, credit: Decimal) {
        self.debit += debit;
        self.credit += credit;
        self.balance = snap_to_zero(self.normal_balance.balance_change(self.debit, self.credit));
    }

    /// Returns true if the balance is exactly zero after snapping.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.balance.is_zero()
    }
}

/// Per-account balances keyed by account code, iterated in code order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalanceIndex {
    balances: BTreeMap<String, AccountBalance>,
}

impl AccountBalanceIndex {
    /// Balance for a code, if the code is in the chart.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AccountBalance> {
        self.balances.get(code)
    }

    /// Iterates over balances in account-code order.
    pub fn iter(&self) -> impl Iterator<Item = &AccountBalance> {
        self.balances.values()
    }

    /// Number of accounts tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns true if no accounts are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

/// Builds per-account balances from an arbitrary journal.
///
/// One accumulator is created per chart row, so accounts without activity
/// appear with zero balances.
#[must_use]
pub fn build_account_balance_index(
    journal: &[JournalEntry],
    chart: &ChartOfAccounts,
) -> AccountBalanceIndex {
    let mut balances: BTreeMap<String, AccountBalance> = chart
        .iter()
        .map(|account| (account.code.clone(), AccountBalance::new(account)))
        .collect();

    for line in journal.iter().flat_map(|entry| &entry.lines) {
        if let Some(balance) = balances.get_mut(&line.account_code) {
            balance.post(line.debit, line.credit);
        }
    }

    AccountBalanceIndex { balances }
}

/// One line of an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    /// Id of the journal entry.
    pub entry_id: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Entry reference, if any.
    pub reference: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this line.
    pub balance: Decimal,
}

/// Chronological detail for a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccount {
    /// The account.
    pub account: Account,
    /// Every line posted to the account, in chronological order.
    pub transactions: Vec<LedgerTransaction>,
    /// Total debits.
    pub total_debit: Decimal,
    /// Total credits.
    pub total_credit: Decimal,
    /// Final running balance on the normal side.
    pub ending_balance: Decimal,
    /// Side the ending balance sits on; the opposite of the normal side
    /// when the ending balance is negative.
    pub balance_type: NormalBalance,
}

/// Walks the journal chronologically and records every line for an account.
///
/// Returns `None` if the code is not in the chart.
#[must_use]
pub fn calculate_ledger_account(
    journal: &[JournalEntry],
    chart: &ChartOfAccounts,
    account_code: &str,
) -> Option<LedgerAccount> {
    let account = chart.get(account_code)?;
    let normal = account.normal_balance;

    let mut transactions = Vec::new();
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut running = Decimal::ZERO;

    for entry in sort_journal_entries(journal) {
        for line in entry.lines.iter().filter(|line| line.account_code == account_code) {
            total_debit += line.debit;
            total_credit += line.credit;
            running = snap_to_zero(running + normal.balance_change(line.debit, line.credit));

            transactions.push(LedgerTransaction {
                entry_id: entry.id.clone(),
                date: entry.date,
                description: entry.description.clone(),
                reference: entry.reference.clone(),
                debit: line.debit,
                credit: line.credit,
                balance: running,
            });
        }
    }

    let balance_type = if running < Decimal::ZERO {
        normal.opposite()
    } else {
        normal
    };

    Some(LedgerAccount {
        account: account.clone(),
        transactions,
        total_debit,
        total_credit,
        ending_balance: running,
        balance_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::create_journal_entry_at;
    use crate::ledger::types::{JournalLineInput, NewJournalEntry};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::new(vec![
            Account::new("1110", "Cash", AccountType::Asset),
            Account::new("2110", "Accounts Payable", AccountType::Liability),
            Account::new("4110", "Sales Revenue", AccountType::Revenue),
        ])
        .unwrap()
    }

    fn entry(id: &str, day: u32, lines: Vec<JournalLineInput>) -> JournalEntry {
        let mut input =
            NewJournalEntry::new(NaiveDate::from_ymd_opt(2024, 3, day).unwrap(), id).id(id);
        input.entries = lines;
        create_journal_entry_at(input, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    /// Strategy for generating positive amounts in cents.
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Ending balance equals the sum of signed changes, and the last
        /// running balance equals the ending balance.
        #[test]
        fn prop_running_balance_ends_at_total(
            sales in prop::collection::vec(amount_strategy(), 1..20),
        ) {
            let journal: Vec<JournalEntry> = sales
                .iter()
                .enumerate()
                .map(|(i, amount)| entry(
                    &format!("e{i:03}"),
                    1,
                    vec![
                        JournalLineInput::debit("1110", *amount),
                        JournalLineInput::credit("4110", *amount),
                    ],
                ))
                .collect();

            let ledger = calculate_ledger_account(&journal, &chart(), "4110").unwrap();
            let expected: Decimal = sales.iter().copied().sum();

            prop_assert_eq!(ledger.transactions.len(), sales.len());
            prop_assert_eq!(ledger.ending_balance, expected);
            prop_assert_eq!(ledger.total_credit, expected);
            prop_assert_eq!(
                ledger.transactions.last().map(|t| t.balance),
                Some(ledger.ending_balance)
            );
        }

        /// The index agrees with the ledger detail for every account.
        #[test]
        fn prop_index_matches_ledger_detail(
            amounts in prop::collection::vec(amount_strategy(), 1..20),
        ) {
            let journal: Vec<JournalEntry> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| {
                    let (debit, credit) = if i % 2 == 0 { ("1110", "2110") } else { ("2110", "1110") };
                    entry(
                        &format!("e{i:03}"),
                        1,
                        vec![
                            JournalLineInput::debit(debit, *amount),
                            JournalLineInput::credit(credit, *amount),
                        ],
                    )
                })
                .collect();

            let chart = chart();
            let index = build_account_balance_index(&journal, &chart);
            for code in ["1110", "2110", "4110"] {
                let ledger = calculate_ledger_account(&journal, &chart, code).unwrap();
                let balance = index.get(code).unwrap();
                prop_assert_eq!(balance.balance, ledger.ending_balance);
                prop_assert_eq!(balance.debit, ledger.total_debit);
                prop_assert_eq!(balance.credit, ledger.total_credit);
            }
        }
    }

    #[test]
    fn test_index_applies_normal_side() {
        let journal = vec![entry(
            "e1",
            1,
            vec![
                JournalLineInput::debit("1110", dec!(250)),
                JournalLineInput::credit("4110", dec!(250)),
            ],
        )];

        let index = build_account_balance_index(&journal, &chart());
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("1110").unwrap().balance, dec!(250));
        assert_eq!(index.get("4110").unwrap().balance, dec!(250));
        assert!(index.get("2110").unwrap().is_zero());
    }

    #[test]
    fn test_index_ignores_unknown_codes() {
        let journal = vec![entry(
            "e1",
            1,
            vec![
                JournalLineInput::debit("9999", dec!(80)),
                JournalLineInput::credit("1110", dec!(80)),
            ],
        )];

        let index = build_account_balance_index(&journal, &chart());
        assert!(index.get("9999").is_none());
        assert_eq!(index.get("1110").unwrap().balance, dec!(-80));
    }

    #[test]
    fn test_index_snaps_drift_to_zero() {
        let mut journal = vec![
            entry(
                "e1",
                1,
                vec![
                    JournalLineInput::debit("1110", dec!(100)),
                    JournalLineInput::credit("4110", dec!(100)),
                ],
            ),
            entry(
                "e2",
                2,
                vec![
                    JournalLineInput::debit("4110", dec!(100)),
                    JournalLineInput::credit("1110", dec!(100)),
                ],
            ),
        ];

        // Stored entries are not re-normalized and may carry sub-cent drift.
        journal[0].lines[0].debit = dec!(100.005);

        let index = build_account_balance_index(&journal, &chart());
        assert_eq!(index.get("1110").unwrap().debit, dec!(200.005));
        assert_eq!(index.get("1110").unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_ledger_unknown_account() {
        assert!(calculate_ledger_account(&[], &chart(), "9999").is_none());
    }

    #[test]
    fn test_ledger_empty_journal() {
        let ledger = calculate_ledger_account(&[], &chart(), "1110").unwrap();
        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.total_debit, Decimal::ZERO);
        assert_eq!(ledger.total_credit, Decimal::ZERO);
        assert_eq!(ledger.ending_balance, Decimal::ZERO);
        assert_eq!(ledger.balance_type, NormalBalance::Debit);
    }

    #[test]
    fn test_ledger_running_balance_in_date_order() {
        // Supplied out of order; the ledger walks by date.
        let journal = vec![
            entry(
                "later",
                9,
                vec![
                    JournalLineInput::debit("2110", dec!(30)),
                    JournalLineInput::credit("1110", dec!(30)),
                ],
            ),
            entry(
                "earlier",
                2,
                vec![
                    JournalLineInput::debit("1110", dec!(100)),
                    JournalLineInput::credit("4110", dec!(100)),
                ],
            ),
        ];

        let ledger = calculate_ledger_account(&journal, &chart(), "1110").unwrap();
        let balances: Vec<Decimal> = ledger.transactions.iter().map(|t| t.balance).collect();

        assert_eq!(balances, vec![dec!(100), dec!(70)]);
        assert_eq!(ledger.transactions[0].entry_id, "earlier");
        assert_eq!(ledger.total_debit, dec!(100));
        assert_eq!(ledger.total_credit, dec!(30));
        assert_eq!(ledger.balance_type, NormalBalance::Debit);
    }

    #[test]
    fn test_ledger_balance_type_flips_when_negative() {
        let journal = vec![entry(
            "overdrawn",
            1,
            vec![
                JournalLineInput::debit("2110", dec!(40)),
                JournalLineInput::credit("1110", dec!(40)),
            ],
        )];

        let ledger = calculate_ledger_account(&journal, &chart(), "1110").unwrap();
        assert_eq!(ledger.ending_balance, dec!(-40));
        assert_eq!(ledger.balance_type, NormalBalance::Credit);
    }
}
