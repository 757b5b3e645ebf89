//! Posting service: translates business events into journal entries.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tillbook_shared::types::generate_entry_id;
use tillbook_shared::{AccountCodes, LedgerConfig};
use tracing::{debug, info, warn};

use super::error::PostingError;
use super::reference::{
    expense_reference, purchase_order_payment_reference, purchase_order_reference,
    sale_cogs_reference, sale_revenue_reference,
};
use super::types::{Expense, InitialRecords, PurchaseOrder, Sale, SaleContext, SaleType};
use crate::ledger::{
    EntryMetadata, EntrySource, JournalEntry, JournalLineInput, NewJournalEntry,
    create_journal_entry, sort_journal_entries,
};

const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// Result of posting one sale: the entries that validated and the halves
/// that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePosting {
    /// Revenue and/or COGS entries, in that order.
    pub entries: Vec<JournalEntry>,
    /// Halves that failed validation.
    pub failures: Vec<PostingError>,
}

/// Result of seeding a journal from historical records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedOutcome {
    /// Posted entries in canonical order.
    pub journal: Vec<JournalEntry>,
    /// Records that could not be posted.
    pub failures: Vec<PostingError>,
}

/// Service for posting business events to the journal.
///
/// Every `try_` method reports validation failures as [`PostingError`]. The
/// plain methods log the failure and drop the entry, so one malformed
/// record never aborts a batch.
#[derive(Debug, Clone)]
pub struct PostingService {
    accounts: AccountCodes,
    entry_id_prefix: String,
}

impl Default for PostingService {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}

impl PostingService {
    /// Creates a service posting to the configured accounts.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            accounts: config.accounts.clone(),
            entry_id_prefix: config.entry_id_prefix.clone(),
        }
    }

    /// Accounts this service posts to.
    #[must_use]
    pub const fn accounts(&self) -> &AccountCodes {
        &self.accounts
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Builds the entry for an expense: debit the category, credit cash.
    ///
    /// Returns `Ok(None)` when the amount is not positive.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError`] if the generated entry fails validation.
    pub fn try_build_expense_journal_entry(
        &self,
        expense: &Expense,
    ) -> Result<Option<JournalEntry>, PostingError> {
        if expense.amount <= Decimal::ZERO {
            debug!(expense_id = %expense.id, "Expense has no amount to post");
            return Ok(None);
        }

        let account = expense
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(&self.accounts.default_expense);

        let description = if expense.description.trim().is_empty() {
            format!("Expense #{}", expense.id)
        } else {
            expense.description.clone()
        };

        let input = NewJournalEntry::new(expense.date, description)
            .line(JournalLineInput::debit(account, expense.amount))
            .line(JournalLineInput::credit(&self.accounts.cash, expense.amount))
            .reference(expense_reference(&expense.id))
            .metadata(EntryMetadata::new(EntrySource::Expense, &expense.id));

        self.post(input).map(Some)
    }

    /// Lenient form of [`Self::try_build_expense_journal_entry`].
    #[must_use]
    pub fn build_expense_journal_entry(&self, expense: &Expense) -> Option<JournalEntry> {
        log_failure(self.try_build_expense_journal_entry(expense))
    }

    // ========================================================================
    // Purchase orders
    // ========================================================================

    /// Builds the receipt entry for a purchase order: debit inventory,
    /// credit accounts payable.
    ///
    /// Dated on receipt, else the expected date, else the order date, else
    /// today. Returns `Ok(None)` when the total cost is not positive.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError`] if the generated entry fails validation.
    pub fn try_build_purchase_order_journal_entry(
        &self,
        purchase_order: &PurchaseOrder,
    ) -> Result<Option<JournalEntry>, PostingError> {
        let total = purchase_order.total_cost();
        if total <= Decimal::ZERO {
            debug!(purchase_order_id = %purchase_order.id, "Purchase order has no cost to post");
            return Ok(None);
        }

        let date = purchase_order
            .posting_date()
            .unwrap_or_else(|| Utc::now().date_naive());
        let supplier = purchase_order
            .supplier_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Supplier");

        let input = NewJournalEntry::new(
            date,
            format!("Purchase Order #{} - {supplier}", purchase_order.id),
        )
        .line(JournalLineInput::debit(&self.accounts.inventory, total))
        .line(JournalLineInput::credit(&self.accounts.accounts_payable, total))
        .reference(purchase_order_reference(&purchase_order.id))
        .metadata(
            EntryMetadata::new(EntrySource::PurchaseOrder, &purchase_order.id)
                .with_subtype("receipt"),
        );

        self.post(input).map(Some)
    }

    /// Lenient form of [`Self::try_build_purchase_order_journal_entry`].
    #[must_use]
    pub fn build_purchase_order_journal_entry(
        &self,
        purchase_order: &PurchaseOrder,
    ) -> Option<JournalEntry> {
        log_failure(self.try_build_purchase_order_journal_entry(purchase_order))
    }

    /// Builds the payment entry for a purchase order: debit accounts
    /// payable, credit the payment account (cash when not given).
    ///
    /// Returns `Ok(None)` when the total cost is not positive.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError`] if the generated entry fails validation.
    pub fn try_build_purchase_order_payment_journal_entry(
        &self,
        purchase_order: &PurchaseOrder,
        payment_date: NaiveDate,
        payment_account: Option<&str>,
    ) -> Result<Option<JournalEntry>, PostingError> {
        let total = purchase_order.total_cost();
        if total <= Decimal::ZERO {
            debug!(purchase_order_id = %purchase_order.id, "Purchase order has no cost to pay");
            return Ok(None);
        }

        let payment_account = payment_account
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(&self.accounts.cash);

        let input = NewJournalEntry::new(
            payment_date,
            format!("Payment for Purchase Order #{}", purchase_order.id),
        )
        .line(JournalLineInput::debit(&self.accounts.accounts_payable, total))
        .line(JournalLineInput::credit(payment_account, total))
        .reference(purchase_order_payment_reference(&purchase_order.id))
        .metadata(
            EntryMetadata::new(EntrySource::PurchaseOrderPayment, &purchase_order.id)
                .with_subtype("payment"),
        );

        self.post(input).map(Some)
    }

    /// Lenient form of [`Self::try_build_purchase_order_payment_journal_entry`].
    #[must_use]
    pub fn build_purchase_order_payment_journal_entry(
        &self,
        purchase_order: &PurchaseOrder,
        payment_date: NaiveDate,
        payment_account: Option<&str>,
    ) -> Option<JournalEntry> {
        log_failure(self.try_build_purchase_order_payment_journal_entry(
            purchase_order,
            payment_date,
            payment_account,
        ))
    }

    // ========================================================================
    // Sales
    // ========================================================================

    /// Builds the revenue and COGS entries for a sale.
    ///
    /// The two halves are independent: a failure in one does not prevent
    /// the other from posting.
    #[must_use]
    pub fn try_build_sale_entries(&self, sale: &Sale, context: &SaleContext<'_>) -> SalePosting {
        let mut posting = SalePosting::default();

        for half in [
            self.try_build_sale_revenue_entry(sale, context),
            self.try_build_sale_cogs_entry(sale, context),
        ] {
            match half {
                Ok(Some(entry)) => posting.entries.push(entry),
                Ok(None) => {}
                Err(err) => posting.failures.push(err),
            }
        }

        posting
    }

    /// Lenient form of [`Self::try_build_sale_entries`].
    #[must_use]
    pub fn build_sale_journal_entries(
        &self,
        sale: &Sale,
        context: &SaleContext<'_>,
    ) -> Vec<JournalEntry> {
        let posting = self.try_build_sale_entries(sale, context);
        for err in &posting.failures {
            warn_failure(err);
        }
        posting.entries
    }

    /// Builds the revenue half of a sale.
    ///
    /// Debits receivables (credit sales) or cash for the amount due and
    /// sales discounts for any discount, then credits sales revenue for the
    /// subtotal and output VAT for any tax.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError`] if the generated entry fails validation.
    pub fn try_build_sale_revenue_entry(
        &self,
        sale: &Sale,
        context: &SaleContext<'_>,
    ) -> Result<Option<JournalEntry>, PostingError> {
        let amount_due = sale.amount_due();
        if [amount_due, sale.subtotal, sale.discount, sale.tax_amount]
            .iter()
            .all(Decimal::is_zero)
        {
            debug!(sale_id = %sale.id, "Sale has no revenue to post");
            return Ok(None);
        }

        let receivable = match sale.sale_type {
            SaleType::Credit => &self.accounts.accounts_receivable,
            SaleType::Cash | SaleType::Other => &self.accounts.cash,
        };

        let mut input = NewJournalEntry::new(
            sale.date,
            format!("Sale #{} - {}", sale.id, customer_label(sale, context)),
        )
        .line(JournalLineInput::debit(receivable, amount_due));

        if sale.discount > Decimal::ZERO {
            input = input.line(JournalLineInput::debit(
                &self.accounts.sales_discounts,
                sale.discount,
            ));
        }

        input = input.line(JournalLineInput::credit(
            &self.accounts.sales_revenue,
            sale.subtotal,
        ));

        if sale.tax_amount > Decimal::ZERO {
            input = input.line(JournalLineInput::credit(
                &self.accounts.vat_payable,
                sale.tax_amount,
            ));
        }

        let input = input
            .reference(sale_revenue_reference(&sale.id))
            .metadata(EntryMetadata::new(EntrySource::Sale, &sale.id).with_subtype("revenue"));

        self.post(input).map(Some)
    }

    /// Builds the COGS half of a sale: debit COGS, credit inventory for the
    /// cost of the base units sold.
    ///
    /// Lines whose product is unknown contribute nothing. Returns `Ok(None)`
    /// when the cost is not positive.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError`] if the generated entry fails validation.
    pub fn try_build_sale_cogs_entry(
        &self,
        sale: &Sale,
        context: &SaleContext<'_>,
    ) -> Result<Option<JournalEntry>, PostingError> {
        let cogs: Decimal = sale
            .items
            .iter()
            .map(|item| match context.unit_cost(&item.product_id) {
                Some(cost) => cost * item.base_units(),
                None => {
                    debug!(
                        sale_id = %sale.id,
                        product_id = %item.product_id,
                        "Unknown product, no cost recognized"
                    );
                    Decimal::ZERO
                }
            })
            .sum();

        if cogs <= Decimal::ZERO {
            return Ok(None);
        }

        let input = NewJournalEntry::new(sale.date, format!("COGS for Sale #{}", sale.id))
            .line(JournalLineInput::debit(&self.accounts.cost_of_goods_sold, cogs))
            .line(JournalLineInput::credit(&self.accounts.inventory, cogs))
            .reference(sale_cogs_reference(&sale.id))
            .metadata(EntryMetadata::new(EntrySource::Sale, &sale.id).with_subtype("cogs"));

        self.post(input).map(Some)
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Posts historical sales and expenses, collecting failures.
    #[must_use]
    pub fn seed_journal(&self, records: InitialRecords<'_>) -> SeedOutcome {
        let context = SaleContext::new(records.products, records.customers);
        let mut entries = Vec::new();
        let mut failures = Vec::new();

        for sale in records.sales {
            let posting = self.try_build_sale_entries(sale, &context);
            entries.extend(posting.entries);
            failures.extend(posting.failures);
        }

        for expense in records.expenses {
            match self.try_build_expense_journal_entry(expense) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(err) => failures.push(err),
            }
        }

        let journal = sort_journal_entries(&entries);
        info!(
            entries = journal.len(),
            skipped = failures.len(),
            "Seeded journal from initial records"
        );

        SeedOutcome { journal, failures }
    }

    /// Lenient form of [`Self::seed_journal`]; returns the sorted journal.
    #[must_use]
    pub fn build_initial_journal(&self, records: InitialRecords<'_>) -> Vec<JournalEntry> {
        let outcome = self.seed_journal(records);
        for err in &outcome.failures {
            warn_failure(err);
        }
        outcome.journal
    }

    fn post(&self, input: NewJournalEntry) -> Result<JournalEntry, PostingError> {
        let reference = input.reference.clone().unwrap_or_default();
        create_journal_entry(input.id(generate_entry_id(&self.entry_id_prefix)))
            .map_err(|source| PostingError::InvalidEntry { reference, source })
    }
}

fn customer_label<'a>(sale: &Sale, context: &SaleContext<'a>) -> &'a str {
    sale.customer_id
        .as_deref()
        .and_then(|id| context.customer_name(id))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(WALK_IN_CUSTOMER)
}

fn log_failure(result: Result<Option<JournalEntry>, PostingError>) -> Option<JournalEntry> {
    result.unwrap_or_else(|err| {
        warn_failure(&err);
        None
    })
}

fn warn_failure(err: &PostingError) {
    warn!(reference = err.reference(), error = %err, "Skipping journal posting");
}
