//! Ledger domain types: accounts, journal lines, and journal entries.
//!
//! Records use camelCase field names on the wire so they can be exchanged
//! with the surrounding application unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::amount::{deserialize_lenient_amount, deserialize_lenient_code};

/// The side on which an account customarily shows a positive balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalBalance {
    /// Debits increase the balance (assets, expenses).
    Debit,
    /// Credits increase the balance (liabilities, equity, revenue).
    Credit,
}

impl NormalBalance {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// Calculates the balance change for a debit/credit pair.
    ///
    /// - Debit-normal: `debit - credit`
    /// - Credit-normal: `credit - debit`
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Account classification within the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, taxes).
    Liability,
    /// Owner's interest (capital, retained earnings).
    Equity,
    /// Income from sales.
    Revenue,
    /// Reductions of revenue (sales discounts, returns).
    #[serde(rename = "Contra-Revenue", alias = "ContraRevenue")]
    ContraRevenue,
    /// Cost of goods sold.
    #[serde(rename = "COGS", alias = "Cogs")]
    Cogs,
    /// Operating expenses.
    Expense,
}

impl AccountType {
    /// Returns the conventional normal balance for this type.
    #[must_use]
    pub const fn default_normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::ContraRevenue | Self::Cogs | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true for the types reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

/// A chart-of-accounts row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account code.
    #[serde(deserialize_with = "deserialize_lenient_code")]
    pub code: String,
    /// Display label.
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Sign convention for positive balances.
    pub normal_balance: NormalBalance,
}

impl Account {
    /// Creates an account with the conventional normal balance for its type.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            normal_balance: account_type.default_normal_balance(),
        }
    }

    /// Overrides the normal balance (for contra accounts).
    #[must_use]
    pub fn with_normal_balance(mut self, normal_balance: NormalBalance) -> Self {
        self.normal_balance = normal_balance;
        self
    }
}

/// Debit and credit amounts of a line, normalized or not.
pub trait LineAmounts {
    /// Debit amount.
    fn debit_amount(&self) -> Decimal;
    /// Credit amount.
    fn credit_amount(&self) -> Decimal;
}

/// A raw line as submitted by a manual entry form or an adapter.
///
/// Deserialization is lenient: numeric account codes become strings and
/// non-numeric or missing amounts become zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLineInput {
    /// Account to post to (trimmed during normalization).
    #[serde(default, deserialize_with = "deserialize_lenient_code")]
    pub account_code: String,
    /// Debit amount.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub credit: Decimal,
}

impl JournalLineInput {
    /// A debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

impl LineAmounts for JournalLineInput {
    fn debit_amount(&self) -> Decimal {
        self.debit
    }

    fn credit_amount(&self) -> Decimal {
        self.credit
    }
}

/// A normalized journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    /// Account code.
    pub account_code: String,
    /// Debit amount (never negative).
    pub debit: Decimal,
    /// Credit amount (never negative).
    pub credit: Decimal,
}

impl LineAmounts for JournalLine {
    fn debit_amount(&self) -> Decimal {
        self.debit
    }

    fn credit_amount(&self) -> Decimal {
        self.credit
    }
}

/// The kind of business event an entry was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySource {
    /// Entered by hand.
    Manual,
    /// A sale (revenue or COGS half).
    Sale,
    /// An expense.
    Expense,
    /// Receipt of a purchase order.
    PurchaseOrder,
    /// Payment of a purchase order.
    PurchaseOrderPayment,
}

/// Weak back-reference to the originating event.
///
/// A correlation identifier only; the engine never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    /// Kind of originating event.
    pub source: EntrySource,
    /// Identifier of the originating event.
    pub source_id: String,
    /// Finer classification, e.g. `revenue` or `cogs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl EntryMetadata {
    /// Creates metadata without a subtype.
    #[must_use]
    pub fn new(source: EntrySource, source_id: impl Into<String>) -> Self {
        Self {
            source,
            source_id: source_id.into(),
            subtype: None,
        }
    }

    /// Sets the subtype.
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    /// Accounting date.
    pub date: NaiveDate,
    /// Free text.
    #[serde(default)]
    pub description: String,
    /// Raw lines.
    #[serde(default)]
    pub entries: Vec<JournalLineInput>,
    /// Correlation key for idempotent replacement.
    #[serde(default)]
    pub reference: Option<String>,
    /// Back-reference to the originating event.
    #[serde(default)]
    pub metadata: Option<EntryMetadata>,
    /// Explicit id; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
}

impl NewJournalEntry {
    /// Creates an input with no lines.
    #[must_use]
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
            entries: Vec::new(),
            reference: None,
            metadata: None,
            id: None,
        }
    }

    /// Appends a line.
    #[must_use]
    pub fn line(mut self, line: JournalLineInput) -> Self {
        self.entries.push(line);
        self
    }

    /// Sets the reference key.
    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: EntryMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets an explicit id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A validated, balanced journal entry.
///
/// Entries are never mutated after construction; edits produce a new entry
/// that supersedes the old one by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Free text.
    pub description: String,
    /// Normalized lines.
    pub lines: Vec<JournalLine>,
    /// Correlation key for idempotent replacement.
    #[serde(default)]
    pub reference: Option<String>,
    /// Back-reference to the originating event.
    #[serde(default)]
    pub metadata: Option<EntryMetadata>,
    /// Construction time; orders same-dated entries.
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Sum of line debits.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of line credits.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit).sum()
    }

    /// Returns true if the entry carries the given reference.
    #[must_use]
    pub fn has_reference(&self, reference: &str) -> bool {
        self.reference.as_deref() == Some(reference)
    }
}
