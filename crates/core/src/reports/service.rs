//! Report generation service.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tillbook_shared::types::{is_negligible, snap_to_zero};

use super::error::ReportError;
use super::types::{
    BalanceSheet, BalanceSheetLine, BalanceSheetTotals, DateRange, ProfitAndLoss, TrialBalance,
    TrialBalanceRow,
};
use crate::ledger::{
    AccountBalance, AccountType, ChartOfAccounts, JournalEntry, LedgerAccount, NormalBalance,
    build_account_balance_index, calculate_ledger_account,
};

const RETAINED_EARNINGS_NAME: &str = "Retained Earnings";

/// Running totals of the income statement accounts.
#[derive(Debug, Default)]
struct IncomeTotals {
    revenue: Decimal,
    discounts: Decimal,
    cogs: Decimal,
    operating_expenses: BTreeMap<String, Decimal>,
}

impl IncomeTotals {
    /// Accumulates every income statement line of the given entries.
    ///
    /// Each side is netted: revenue counts `credit - debit`, the other
    /// types `debit - credit`.
    fn collect<'a>(
        entries: impl IntoIterator<Item = &'a JournalEntry>,
        chart: &ChartOfAccounts,
    ) -> Self {
        let mut totals = Self::default();

        for line in entries.into_iter().flat_map(|entry| &entry.lines) {
            let Some(account) = chart.get(&line.account_code) else {
                continue;
            };
            let debit_side = line.debit - line.credit;

            match account.account_type {
                AccountType::Revenue => totals.revenue -= debit_side,
                AccountType::ContraRevenue => totals.discounts += debit_side,
                AccountType::Cogs => totals.cogs += debit_side,
                AccountType::Expense => {
                    *totals
                        .operating_expenses
                        .entry(account.name.clone())
                        .or_default() += debit_side;
                }
                AccountType::Asset | AccountType::Liability | AccountType::Equity => {}
            }
        }

        totals
    }

    fn total_operating_expenses(&self) -> Decimal {
        self.operating_expenses.values().copied().sum()
    }

    fn net_income(&self) -> Decimal {
        self.revenue - self.discounts - self.cogs - self.total_operating_expenses()
    }

    fn into_statement(self, period: DateRange) -> ProfitAndLoss {
        let net_revenue = self.revenue - self.discounts;
        let gross_profit = net_revenue - self.cogs;
        let total_operating_expenses = self.total_operating_expenses();

        let mut operating_expenses = self.operating_expenses;
        operating_expenses.retain(|_, amount| !is_negligible(*amount));

        ProfitAndLoss {
            period,
            total_revenue: self.revenue,
            total_discounts: self.discounts,
            net_revenue,
            total_cogs: self.cogs,
            gross_profit,
            operating_expenses,
            total_operating_expenses,
            net_income: gross_profit - total_operating_expenses,
        }
    }
}

/// Service for generating financial statements from a journal.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance.
    ///
    /// Each account with a nonzero balance lands in its normal column, or
    /// in the opposite column when its balance has flipped sign. Rows are
    /// ordered by account code.
    #[must_use]
    pub fn calculate_trial_balance(
        journal: &[JournalEntry],
        chart: &ChartOfAccounts,
    ) -> TrialBalance {
        let index = build_account_balance_index(journal, chart);

        let rows: Vec<TrialBalanceRow> = index
            .iter()
            .filter(|balance| !balance.is_zero())
            .map(Self::trial_balance_row)
            .collect();

        let total_debit: Decimal = rows.iter().map(|row| row.debit).sum();
        let total_credit: Decimal = rows.iter().map(|row| row.credit).sum();

        TrialBalance {
            rows,
            total_debit,
            total_credit,
            is_balanced: is_negligible(total_debit - total_credit),
        }
    }

    fn trial_balance_row(balance: &AccountBalance) -> TrialBalanceRow {
        let amount = balance.balance.abs();
        let debit_column = match balance.normal_balance {
            NormalBalance::Debit => balance.balance > Decimal::ZERO,
            NormalBalance::Credit => balance.balance < Decimal::ZERO,
        };
        let (debit, credit) = if debit_column {
            (amount, Decimal::ZERO)
        } else {
            (Decimal::ZERO, amount)
        };

        TrialBalanceRow {
            code: balance.code.clone(),
            name: balance.name.clone(),
            account_type: balance.account_type,
            debit,
            credit,
        }
    }

    /// Generates a profit and loss statement for `[start_date, end_date]`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if the start is after the end.
    pub fn calculate_profit_and_loss(
        journal: &[JournalEntry],
        chart: &ChartOfAccounts,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ProfitAndLoss, ReportError> {
        let period = DateRange::new(start_date, end_date)?;
        let in_period = journal.iter().filter(|entry| period.contains(entry.date));
        Ok(IncomeTotals::collect(in_period, chart).into_statement(period))
    }

    /// Generates a balance sheet as of today.
    #[must_use]
    pub fn calculate_balance_sheet(
        journal: &[JournalEntry],
        chart: &ChartOfAccounts,
    ) -> BalanceSheet {
        Self::calculate_balance_sheet_as_of(journal, chart, Utc::now().date_naive())
    }

    /// Generates a balance sheet from entries dated on or before `as_of`.
    ///
    /// Net income of the same entries is folded into the retained earnings
    /// account in memory only; no closing entry is posted. A synthetic
    /// retained earnings line is added when the chart lacks that account.
    #[must_use]
    pub fn calculate_balance_sheet_as_of(
        journal: &[JournalEntry],
        chart: &ChartOfAccounts,
        as_of: NaiveDate,
    ) -> BalanceSheet {
        let included: Vec<JournalEntry> = journal
            .iter()
            .filter(|entry| entry.date <= as_of)
            .cloned()
            .collect();

        let index = build_account_balance_index(&included, chart);
        let net_income = IncomeTotals::collect(&included, chart).net_income();

        let retained_earnings_code = chart.retained_earnings_code();
        let fold_into_chart = chart
            .get(retained_earnings_code)
            .is_some_and(|account| account.account_type == AccountType::Equity);

        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();

        for balance in index.iter() {
            let credit_side = balance.credit - balance.debit;
            let (section, mut amount) = match balance.account_type {
                AccountType::Asset => (&mut assets, -credit_side),
                AccountType::Liability => (&mut liabilities, credit_side),
                AccountType::Equity => (&mut equity, credit_side),
                _ => continue,
            };
            if fold_into_chart && balance.code == retained_earnings_code {
                amount += net_income;
            }

            let amount = snap_to_zero(amount);
            if !amount.is_zero() {
                section.push(BalanceSheetLine {
                    code: balance.code.clone(),
                    name: balance.name.clone(),
                    amount,
                });
            }
        }

        if !fold_into_chart && !is_negligible(net_income) {
            equity.push(BalanceSheetLine {
                code: retained_earnings_code.to_string(),
                name: RETAINED_EARNINGS_NAME.to_string(),
                amount: net_income,
            });
        }

        let total_assets = Self::section_total(&assets);
        let total_liabilities = Self::section_total(&liabilities);
        let total_equity = Self::section_total(&equity);
        let liabilities_and_equity = total_liabilities + total_equity;

        BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            net_income,
            totals: BalanceSheetTotals {
                assets: total_assets,
                liabilities: total_liabilities,
                equity: total_equity,
                liabilities_and_equity,
                is_balanced: is_negligible(total_assets - liabilities_and_equity),
            },
        }
    }

    /// Returns the ledger detail of one account.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AccountNotFound`] if the code is not in the chart.
    pub fn account_ledger(
        journal: &[JournalEntry],
        chart: &ChartOfAccounts,
        account_code: &str,
    ) -> Result<LedgerAccount, ReportError> {
        calculate_ledger_account(journal, chart, account_code)
            .ok_or_else(|| ReportError::AccountNotFound(account_code.to_string()))
    }

    fn section_total(lines: &[BalanceSheetLine]) -> Decimal {
        lines.iter().map(|line| line.amount).sum()
    }
}
