use std::sync::Arc;

use dotenvy::dotenv;
use finance_tracker::{
    app::{FinanceApp, today},
    config::{self, database},
    core::{category::CategoryLookup, format, report},
    db,
    errors::Result,
    persistence::{FileStorage, PersistedState},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG from it is honored
    dotenv().ok(); // Make it non-fatal, env vars can be set externally

    // 2. Load the application configuration
    let app_config = config::load_app_configuration();
    let log_filter = app_config
        .as_ref()
        .map_or_else(|_| "info".to_string(), |c| c.log_filter.clone());

    // 3. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .init();
    let app_config = app_config.inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Rehydrate the store before anything reads it
    let storage = Arc::new(FileStorage::new(&app_config.data_dir));
    let app = FinanceApp::init(storage, &app_config).await;

    // 5. Print the dashboard for the current month
    let state = app.state();
    let settings = &state.settings;
    let transactions = state.transactions.all();
    let summary = report::dashboard_summary(transactions, today());
    let money = |amount| format::format_currency(amount, settings.currency, settings.language);

    println!("Balance:  {}", money(summary.total_balance));
    println!("Income:   {}", money(summary.monthly_income));
    println!("Expenses: {}", money(summary.monthly_expenses));
    let lookup = CategoryLookup::new(state.categories.all());
    for tx in &summary.recent {
        println!(
            "  {}  {:<24} {:<16} {}",
            tx.date,
            format::row_title(tx, &lookup),
            format::row_category(tx, &lookup, settings.language),
            format::format_signed_amount(tx, settings.currency, settings.language),
        );
    }

    // 6. Export to the relational database when one is configured
    if let Some(url) = &app_config.database_url {
        let db_conn = database::open(url)
            .await
            .inspect_err(|e| error!("Failed to open export database: {e}"))?;
        db::export_state(&db_conn, &PersistedState::from(state))
            .await
            .inspect(|_| info!("Exported state to {url}"))
            .inspect_err(|e| error!("Export failed: {e}"))?;
    }

    // 7. Persist the final state and stop the writer
    app.shutdown().await?;
    Ok(())
}
