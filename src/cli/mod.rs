pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "School portal admin CLI - migrations, admin accounts and tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "Admin account management")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Mint an admin JWT for scripting")]
    Token {
        #[arg(help = "Email claim")]
        email: String,
        #[arg(long, default_value = "admin")]
        role: String,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, output_format).await,
        Commands::Token { email, role, hours } => {
            commands::token::handle(email, role, hours, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_admin_create() {
        let cli = Cli::try_parse_from([
            "portal", "--json", "admin", "create", "head@school.edu", "--password", "s3cretpass",
        ])
        .unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Admin {
                cmd: commands::admin::AdminCommands::Create { email, role, .. },
            } => {
                assert_eq!(email, "head@school.edu");
                assert_eq!(role, "admin");
            }
            _ => panic!("expected admin create"),
        }
    }

    #[test]
    fn parses_token_with_hours() {
        let cli = Cli::try_parse_from(["portal", "token", "a@b.c", "--hours", "6"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Token { hours: Some(6), .. }
        ));
    }
}
