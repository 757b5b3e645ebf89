//! Reference keys correlating journal entries to their source events.

/// Reference of a sale's revenue entry.
#[must_use]
pub fn sale_revenue_reference(sale_id: &str) -> String {
    format!("sale:{sale_id}:revenue")
}

/// Reference of a sale's COGS entry.
#[must_use]
pub fn sale_cogs_reference(sale_id: &str) -> String {
    format!("sale:{sale_id}:cogs")
}

/// Both references a sale can produce, for removing a deleted sale.
#[must_use]
pub fn sale_references(sale_id: &str) -> [String; 2] {
    [sale_revenue_reference(sale_id), sale_cogs_reference(sale_id)]
}

/// Reference of an expense entry.
#[must_use]
pub fn expense_reference(expense_id: &str) -> String {
    format!("expense:{expense_id}")
}

/// Reference of a purchase order receipt entry.
#[must_use]
pub fn purchase_order_reference(purchase_order_id: &str) -> String {
    format!("po:{purchase_order_id}")
}

/// Reference of a purchase order payment entry.
#[must_use]
pub fn purchase_order_payment_reference(purchase_order_id: &str) -> String {
    format!("po-payment:{purchase_order_id}")
}
