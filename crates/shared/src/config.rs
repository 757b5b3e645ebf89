//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger engine configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Ledger engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Posting accounts used by the event adapters and statements.
    #[serde(default)]
    pub accounts: AccountCodes,
    /// Prefix for generated journal entry ids.
    #[serde(default = "default_entry_id_prefix")]
    pub entry_id_prefix: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            accounts: AccountCodes::default(),
            entry_id_prefix: default_entry_id_prefix(),
        }
    }
}

fn default_entry_id_prefix() -> String {
    crate::types::DEFAULT_ENTRY_PREFIX.to_string()
}

/// Chart-of-accounts codes the engine posts to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountCodes {
    /// Cash on hand.
    pub cash: String,
    /// Accounts receivable (credit sales).
    pub accounts_receivable: String,
    /// Merchandise inventory.
    pub inventory: String,
    /// Accounts payable (received purchase orders).
    pub accounts_payable: String,
    /// Output VAT payable.
    pub vat_payable: String,
    /// Retained earnings (net income is folded here on the balance sheet).
    pub retained_earnings: String,
    /// Net sales revenue.
    pub sales_revenue: String,
    /// Sales discounts (contra-revenue).
    pub sales_discounts: String,
    /// Cost of goods sold.
    pub cost_of_goods_sold: String,
    /// Expense account used when an expense has no category.
    pub default_expense: String,
}

impl Default for AccountCodes {
    fn default() -> Self {
        Self {
            cash: "1110".to_string(),
            accounts_receivable: "1130".to_string(),
            inventory: "1210".to_string(),
            accounts_payable: "2110".to_string(),
            vat_payable: "2210".to_string(),
            retained_earnings: "3200".to_string(),
            sales_revenue: "4110".to_string(),
            sales_discounts: "4120".to_string(),
            cost_of_goods_sold: "5110".to_string(),
            default_expense: "6900".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files, and the environment.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default.toml`, `config/{RUN_MODE}.toml`, then variables such as
    /// `TILLBOOK__LEDGER__ACCOUNTS__CASH`. Missing files are fine; every field
    /// has a default.
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TILLBOOK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
