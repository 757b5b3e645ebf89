//! Business event records consumed by the posting adapters.
//!
//! These mirror the records kept by the surrounding application. Field
//! parsing is lenient so that historical data with numeric ids, string
//! amounts, or timestamp dates can still be posted.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::amount::{
    deserialize_lenient_amount, deserialize_lenient_code, deserialize_optional_amount,
    deserialize_optional_code,
};
use tillbook_shared::types::date::{deserialize_date, deserialize_optional_date};

/// How a sale was settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleType {
    /// Paid immediately.
    #[default]
    Cash,
    /// Sold on account; the customer owes the total.
    Credit,
    /// Any other settlement; posted like cash.
    #[serde(other)]
    Other,
}

/// One line of a sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    /// Product sold.
    #[serde(default, deserialize_with = "deserialize_lenient_code")]
    pub product_id: String,
    /// Quantity in the selling unit.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub quantity: Decimal,
    /// Price per selling unit.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub unit_price: Decimal,
    /// Base units per selling unit.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub conversion: Option<Decimal>,
    /// Total base units, when recorded explicitly.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub base_quantity: Option<Decimal>,
}

impl SaleItem {
    /// Total base units sold.
    ///
    /// Uses the explicit base quantity when present, otherwise
    /// `quantity * conversion` with a missing or zero conversion read as one.
    #[must_use]
    pub fn base_units(&self) -> Decimal {
        self.base_quantity.unwrap_or_else(|| {
            let conversion = self
                .conversion
                .filter(|conversion| !conversion.is_zero())
                .unwrap_or(Decimal::ONE);
            self.quantity * conversion
        })
    }
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Sale identifier.
    #[serde(deserialize_with = "deserialize_lenient_code")]
    pub id: String,
    /// Sale date.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Lines sold.
    #[serde(default)]
    pub items: Vec<SaleItem>,
    /// Gross sales amount before discount and tax.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub subtotal: Decimal,
    /// Discount granted.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub discount: Decimal,
    /// Output tax charged.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub tax_amount: Decimal,
    /// Amount collected or receivable, when recorded.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub total: Option<Decimal>,
    /// Settlement kind.
    #[serde(default)]
    pub sale_type: SaleType,
    /// Customer, if known.
    #[serde(default, deserialize_with = "deserialize_optional_code")]
    pub customer_id: Option<String>,
}

impl Sale {
    /// Amount collected or receivable.
    ///
    /// The recorded total when present, otherwise
    /// `subtotal - discount + tax`.
    #[must_use]
    pub fn amount_due(&self) -> Decimal {
        self.total
            .unwrap_or(self.subtotal - self.discount + self.tax_amount)
    }
}

/// An operating expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense identifier.
    #[serde(deserialize_with = "deserialize_lenient_code")]
    pub id: String,
    /// Expense date.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Free text.
    #[serde(default)]
    pub description: String,
    /// Amount paid.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub amount: Decimal,
    /// Expense account code.
    #[serde(default, deserialize_with = "deserialize_optional_code")]
    pub category: Option<String>,
}

/// One line of a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    /// Quantity ordered.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub quantity: Decimal,
    /// Unit cost.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub cost: Decimal,
}

/// A purchase order for inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Purchase order identifier.
    #[serde(deserialize_with = "deserialize_lenient_code")]
    pub id: String,
    /// Lines ordered.
    #[serde(default)]
    pub items: Vec<PurchaseOrderItem>,
    /// Supplier name.
    #[serde(default)]
    pub supplier_name: Option<String>,
    /// When the goods arrived.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub received_at: Option<NaiveDate>,
    /// When the goods are expected.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub expected_date: Option<NaiveDate>,
    /// When the order was placed.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub order_date: Option<NaiveDate>,
}

impl PurchaseOrder {
    /// Sum of `quantity * cost` over the lines.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.items.iter().map(|item| item.quantity * item.cost).sum()
    }

    /// Accounting date: received, else expected, else ordered.
    #[must_use]
    pub fn posting_date(&self) -> Option<NaiveDate> {
        self.received_at.or(self.expected_date).or(self.order_date)
    }
}

/// A product with its unit cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    #[serde(deserialize_with = "deserialize_lenient_code")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Cost per base unit.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub cost: Decimal,
}

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    #[serde(deserialize_with = "deserialize_lenient_code")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Lookups a sale needs: product costs and customer names.
#[derive(Debug, Clone, Default)]
pub struct SaleContext<'a> {
    products: HashMap<&'a str, &'a Product>,
    customers: HashMap<&'a str, &'a Customer>,
}

impl<'a> SaleContext<'a> {
    /// Indexes products and customers by id.
    #[must_use]
    pub fn new(products: &'a [Product], customers: &'a [Customer]) -> Self {
        Self {
            products: products.iter().map(|p| (p.id.as_str(), p)).collect(),
            customers: customers.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    /// Unit cost of a product, if known.
    #[must_use]
    pub fn unit_cost(&self, product_id: &str) -> Option<Decimal> {
        self.products.get(product_id).map(|product| product.cost)
    }

    /// Customer name, if known.
    #[must_use]
    pub fn customer_name(&self, customer_id: &str) -> Option<&'a str> {
        self.customers
            .get(customer_id)
            .map(|customer| customer.name.as_str())
    }
}

/// Pre-existing business records to seed a journal from.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitialRecords<'a> {
    /// Historical sales.
    pub sales: &'a [Sale],
    /// Historical expenses.
    pub expenses: &'a [Expense],
    /// Products, for sale costing.
    pub products: &'a [Product],
    /// Customers, for sale descriptions.
    pub customers: &'a [Customer],
}
