//! Integration tests for financial statements over a seeded journal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use tillbook_core::ledger::{ChartOfAccounts, JournalEntry};
use tillbook_core::posting::{
    Customer, Expense, InitialRecords, PostingService, Product, PurchaseOrder, Sale,
};
use tillbook_core::reports::ReportService;
use tillbook_shared::telemetry::init_test_tracing;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    products: Vec<Product>,
    customers: Vec<Customer>,
}

fn fixture() -> Fixture {
    Fixture {
        sales: serde_json::from_value(json!([
            {
                "id": 1, "date": "2024-03-05", "saleType": "Cash",
                "subtotal": 100, "discount": 0, "taxAmount": 5, "total": 105,
                "items": [{"productId": 7, "quantity": 2, "baseQuantity": 2}]
            },
            {
                "id": 2, "date": "2024-03-06", "saleType": "Credit", "customerId": "c-1",
                "subtotal": 240, "discount": 20, "taxAmount": 0,
                "items": [{"productId": 7, "quantity": 1, "conversion": 3}]
            },
            {
                // Recorded total does not match; the revenue half is skipped.
                "id": 3, "date": "2024-03-07",
                "subtotal": 50, "taxAmount": 0, "total": 45,
                "items": [{"productId": 7, "quantity": 1}]
            }
        ]))
        .unwrap(),
        expenses: serde_json::from_value(json!([
            {
                "id": 9, "date": "2024-03-01", "amount": 150,
                "category": "6200", "description": "Office supplies"
            },
            {"id": 10, "date": "2024-03-31", "amount": "300", "category": 6100, "description": "Rent"},
            {"id": 11, "date": "2024-03-31", "amount": 0}
        ]))
        .unwrap(),
        products: serde_json::from_value(json!([{"id": 7, "name": "Widget", "cost": 40}])).unwrap(),
        customers: serde_json::from_value(json!([{"id": "c-1", "name": "Corner Store"}])).unwrap(),
    }
}

fn seeded_journal(fixture: &Fixture) -> Vec<JournalEntry> {
    let service = PostingService::default();
    let mut journal = service.build_initial_journal(InitialRecords {
        sales: &fixture.sales,
        expenses: &fixture.expenses,
        products: &fixture.products,
        customers: &fixture.customers,
    });

    let purchase_order: PurchaseOrder = serde_json::from_value(json!({
        "id": 5,
        "items": [{"quantity": 10, "cost": 40}],
        "supplierName": "Widget Co",
        "receivedAt": "2024-02-20T09:30:00Z"
    }))
    .unwrap();
    journal.extend(service.build_purchase_order_journal_entry(&purchase_order));
    journal.extend(service.build_purchase_order_payment_journal_entry(
        &purchase_order,
        date(2024, 3, 15),
        Some("1120"),
    ));
    journal
}

#[test]
fn test_seeding_skips_invalid_halves() {
    init_test_tracing("info");
    let fixture = fixture();
    let outcome = PostingService::default().seed_journal(InitialRecords {
        sales: &fixture.sales,
        expenses: &fixture.expenses,
        products: &fixture.products,
        customers: &fixture.customers,
    });

    // Sales 1 and 2 post both halves, sale 3 only COGS, two expenses.
    assert_eq!(outcome.journal.len(), 7);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].reference(), "sale:3:revenue");

    let credit_sale = outcome
        .journal
        .iter()
        .find(|entry| entry.has_reference("sale:2:revenue"))
        .unwrap();
    assert_eq!(credit_sale.description, "Sale #2 - Corner Store");
    assert_eq!(credit_sale.total_debit(), dec!(240));
}

#[test]
fn test_trial_balance_of_seeded_journal_is_balanced() {
    let fixture = fixture();
    let journal = seeded_journal(&fixture);
    let report = ReportService::calculate_trial_balance(&journal, &ChartOfAccounts::standard());

    assert!(report.is_balanced);
    assert_eq!(report.total_debit, report.total_credit);
    let codes: Vec<_> = report.rows.iter().map(|row| row.code.as_str()).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(codes, sorted);
}

#[test]
fn test_profit_and_loss_of_seeded_journal() {
    let fixture = fixture();
    let pnl = ReportService::calculate_profit_and_loss(
        &seeded_journal(&fixture),
        &ChartOfAccounts::standard(),
        date(2024, 3, 1),
        date(2024, 3, 31),
    )
    .unwrap();

    assert_eq!(pnl.total_revenue, dec!(340));
    assert_eq!(pnl.total_discounts, dec!(20));
    assert_eq!(pnl.net_revenue, dec!(320));
    // (2 + 3 + 1) units at 40.
    assert_eq!(pnl.total_cogs, dec!(240));
    assert_eq!(pnl.gross_profit, dec!(80));
    assert_eq!(pnl.total_operating_expenses, dec!(450));
    assert_eq!(pnl.net_income, dec!(-370));
}

#[test]
fn test_balance_sheet_of_seeded_journal_closes() {
    let fixture = fixture();
    let journal = seeded_journal(&fixture);
    let chart = ChartOfAccounts::standard();

    let sheet = ReportService::calculate_balance_sheet_as_of(&journal, &chart, date(2024, 3, 31));
    assert_eq!(sheet.net_income, dec!(-370));
    assert!(sheet.totals.is_balanced);

    let today = ReportService::calculate_balance_sheet(&journal, &chart);
    assert!(today.totals.is_balanced);
    assert_eq!(today.totals.assets, sheet.totals.assets);

    let before_purchase =
        ReportService::calculate_balance_sheet_as_of(&journal, &chart, date(2024, 2, 1));
    assert_eq!(before_purchase.totals.assets, Decimal::ZERO);
    assert!(before_purchase.totals.is_balanced);
}

#[test]
fn test_statements_serialize_with_camel_case_fields() {
    let fixture = fixture();
    let journal = seeded_journal(&fixture);
    let report = ReportService::calculate_trial_balance(&journal, &ChartOfAccounts::standard());

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["isBalanced"], json!(true));
    assert!(value["rows"][0].get("accountType").is_some());

    let pnl = ReportService::calculate_profit_and_loss(
        &journal,
        &ChartOfAccounts::standard(),
        date(2024, 1, 1),
        date(2024, 12, 31),
    )
    .unwrap();
    let value = serde_json::to_value(&pnl).unwrap();
    assert!(value.get("totalCOGS").is_some());
    assert!(value.get("operatingExpenses").is_some());
}
