//! Report data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::ledger::AccountType;

/// Inclusive date range for period reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day included.
    pub start_date: NaiveDate,
    /// Last day included.
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting a start after the end.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `start > end`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ReportError> {
        if start_date > end_date {
            return Err(ReportError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns true if the date falls within the range, both ends included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// One account row of a trial balance.
///
/// Exactly one of `debit` and `credit` is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalance {
    /// Accounts with a nonzero balance, by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns agree within the tolerance.
    pub is_balanced: bool,
}

/// Profit and loss statement for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    /// Period covered.
    pub period: DateRange,
    /// Gross sales revenue.
    pub total_revenue: Decimal,
    /// Sales discounts and other contra-revenue.
    pub total_discounts: Decimal,
    /// Revenue less discounts.
    pub net_revenue: Decimal,
    /// Cost of goods sold.
    #[serde(rename = "totalCOGS")]
    pub total_cogs: Decimal,
    /// Net revenue less COGS.
    pub gross_profit: Decimal,
    /// Operating expenses by account name.
    pub operating_expenses: BTreeMap<String, Decimal>,
    /// Sum of operating expenses.
    pub total_operating_expenses: Decimal,
    /// Gross profit less operating expenses.
    pub net_income: Decimal,
}

/// One account on the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetLine {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Amount on the section's natural side.
    pub amount: Decimal,
}

/// Balance sheet section totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetTotals {
    /// Total assets.
    pub assets: Decimal,
    /// Total liabilities.
    pub liabilities: Decimal,
    /// Total equity, including folded net income.
    pub equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity within the tolerance.
    pub is_balanced: bool,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Date the balances are taken at.
    pub as_of: NaiveDate,
    /// Asset accounts.
    pub assets: Vec<BalanceSheetLine>,
    /// Liability accounts.
    pub liabilities: Vec<BalanceSheetLine>,
    /// Equity accounts.
    pub equity: Vec<BalanceSheetLine>,
    /// Unclosed net income folded into retained earnings.
    pub net_income: Decimal,
    /// Section totals.
    pub totals: BalanceSheetTotals,
}
