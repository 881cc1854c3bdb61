use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::Database;

/// Apply pending migrations against `DATABASE_URL`.
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::database_from_env().context("failed to load database configuration")?;
    let db = Database::connect_lazy(&config)?;

    db.run_migrations().await.context("migration failed")?;
    db.close().await;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "success": true, "migrated": true })),
        OutputFormat::Text => println!("Migrations applied"),
    }
    Ok(())
}
