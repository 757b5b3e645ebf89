//! Chart of accounts.

use std::collections::HashMap;

use tillbook_shared::AccountCodes;

use super::error::LedgerError;
use super::types::{Account, AccountType};

/// The static catalog of accounts a ledger run posts against.
///
/// Rows keep their supplied order; lookups go through a code index.
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
    retained_earnings_code: String,
}

impl ChartOfAccounts {
    /// Builds a chart from rows.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccountCode`] if two rows share a code.
    pub fn new(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            if index.insert(account.code.clone(), position).is_some() {
                return Err(LedgerError::DuplicateAccountCode(account.code.clone()));
            }
        }

        Ok(Self {
            accounts,
            index,
            retained_earnings_code: AccountCodes::default().retained_earnings,
        })
    }

    /// Sets the account that absorbs net income on the balance sheet.
    #[must_use]
    pub fn with_retained_earnings_code(mut self, code: impl Into<String>) -> Self {
        self.retained_earnings_code = code.into();
        self
    }

    /// A small-business chart covering every default posting account.
    ///
    /// # Panics
    ///
    /// Never in practice: the default account codes are distinct.
    #[must_use]
    pub fn standard() -> Self {
        let codes = AccountCodes::default();
        let accounts = vec![
            Account::new(codes.cash.as_str(), "Cash on Hand", AccountType::Asset),
            Account::new("1120", "Cash in Bank", AccountType::Asset),
            Account::new(
                codes.accounts_receivable.as_str(),
                "Accounts Receivable",
                AccountType::Asset,
            ),
            Account::new(codes.inventory.as_str(), "Merchandise Inventory", AccountType::Asset),
            Account::new(
                codes.accounts_payable.as_str(),
                "Accounts Payable",
                AccountType::Liability,
            ),
            Account::new(codes.vat_payable.as_str(), "Output VAT Payable", AccountType::Liability),
            Account::new("3100", "Owner's Capital", AccountType::Equity),
            Account::new(
                codes.retained_earnings.as_str(),
                "Retained Earnings",
                AccountType::Equity,
            ),
            Account::new(codes.sales_revenue.as_str(), "Sales Revenue", AccountType::Revenue),
            Account::new(
                codes.sales_discounts.as_str(),
                "Sales Discounts",
                AccountType::ContraRevenue,
            ),
            Account::new(
                codes.cost_of_goods_sold.as_str(),
                "Cost of Goods Sold",
                AccountType::Cogs,
            ),
            Account::new("6100", "Rent Expense", AccountType::Expense),
            Account::new("6200", "Office Supplies Expense", AccountType::Expense),
            Account::new("6300", "Salaries Expense", AccountType::Expense),
            Account::new("6400", "Utilities Expense", AccountType::Expense),
            Account::new(
                codes.default_expense.as_str(),
                "Miscellaneous Expense",
                AccountType::Expense,
            ),
        ];

        Self::new(accounts).expect("default account codes are distinct")
    }

    /// Looks up an account by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Account> {
        self.index.get(code).map(|&position| &self.accounts[position])
    }

    /// Returns true if the code is in the chart.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Rows in their supplied order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Iterates over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Code of the account that absorbs net income on the balance sheet.
    #[must_use]
    pub fn retained_earnings_code(&self) -> &str {
        &self.retained_earnings_code
    }
}

impl<'a> IntoIterator for &'a ChartOfAccounts {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}
