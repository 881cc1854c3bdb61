use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::auth::hash_password;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::repositories::AdminRepository;
use crate::database::Database;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create an admin account")]
    Create {
        #[arg(help = "Login email")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", help = "Password (falls back to ADMIN_PASSWORD)")]
        password: String,
        #[arg(long, default_value = "admin", help = "Role stored in issued tokens")]
        role: String,
    },

    #[command(about = "Print the argon2 hash of a password")]
    HashPassword {
        #[arg(help = "Password to hash")]
        password: String,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Create {
            email,
            password,
            role,
        } => {
            if password.len() < 8 {
                anyhow::bail!("password must be at least 8 characters");
            }
            let hash = hash_password(&password)?;

            let config =
                AppConfig::database_from_env().context("failed to load database configuration")?;
            let db = Database::connect_lazy(&config)?;
            let admin = AdminRepository::new(db.pool())
                .create(email.trim(), &hash, &role)
                .await
                .context("failed to create admin")?;
            db.close().await;

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&admin)?),
                OutputFormat::Text => println!("Created {} admin {}", admin.role, admin.email),
            }
            Ok(())
        }
        AdminCommands::HashPassword { password } => {
            let hash = hash_password(&password)?;
            match output_format {
                OutputFormat::Json => println!("{}", json!({ "hash": hash })),
                OutputFormat::Text => println!("{}", hash),
            }
            Ok(())
        }
    }
}
