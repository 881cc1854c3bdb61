use anyhow::Context;
use serde_json::json;

use crate::auth::{Claims, JwtKeys};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Mint an admin token signed with `JWT_SECRET`.
pub async fn handle(
    email: String,
    role: String,
    hours: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let security = AppConfig::security_from_env().context("failed to load security configuration")?;
    let hours = hours.unwrap_or(security.jwt_expiry_hours);

    let claims = Claims::new(email, role, hours);
    let token = JwtKeys::new(&security.jwt_secret)?.issue(&claims)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "token": token, "expires_at": claims.exp, "email": claims.email })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
