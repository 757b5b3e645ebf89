//! Event-posting adapters.
//!
//! Translates sales, expenses, and purchase orders into validated journal
//! entries. Each generated entry carries a reference key so that re-posting
//! an edited event supersedes its earlier postings.

pub mod error;
pub mod reference;
pub mod service;
pub mod types;


pub use error::PostingError;
pub use reference::{
    expense_reference, purchase_order_payment_reference, purchase_order_reference,
    sale_cogs_reference, sale_references, sale_revenue_reference,
};
pub use service::{PostingService, SalePosting, SeedOutcome};
pub use types::{
    Customer, Expense, InitialRecords, Product, PurchaseOrder, PurchaseOrderItem, Sale,
    SaleContext, SaleItem, SaleType,
};
