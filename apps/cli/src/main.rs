mod config;
mod main_lib;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;

use config::Config;
use main_lib::{build_state, init_tracing};

#[derive(Parser)]
#[command(name = "certifolio")]
#[command(about = "Generate and link investment certificates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate (or reuse) the certificate of a transaction
    Transaction {
        /// Transaction id
        transaction_id: String,

        /// Investment to mirror the certificate path onto
        #[arg(short, long)]
        investment: Option<String>,
    },

    /// Generate the portfolio summary of a user in a property
    Portfolio {
        user_id: String,

        /// Property id or display code
        property: String,
    },

    /// Print a signed link to a transaction certificate, generating it if needed
    Link {
        /// Transaction id or display code
        transaction: String,
    },

    /// Print a signed link to a property's legal document
    Legal {
        /// Property id or display code
        property: String,
    },

    /// Check a signed link issued by the local store
    Verify { signed_url: String },

    /// List rendering backends in attempt order
    Backends,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();
    let config = Config::from_env()?;
    let state = build_state(&config)?;
    let service = &state.certificate_service;

    let output = match cli.command {
        Commands::Transaction {
            transaction_id,
            investment,
        } => {
            let links = service
                .generate_transaction_certificate(&transaction_id, investment.as_deref())
                .await?;
            for warning in &links.warnings {
                tracing::warn!("{}", warning);
            }
            serde_json::to_value(links)?
        }
        Commands::Portfolio { user_id, property } => {
            let links = service
                .generate_portfolio_summary(&user_id, &property)
                .await?;
            for warning in &links.warnings {
                tracing::warn!("{}", warning);
            }
            serde_json::to_value(links)?
        }
        Commands::Link { transaction } => {
            let signed_url = service.get_transaction_certificate(&transaction).await?;
            json!({ "signedUrl": signed_url })
        }
        Commands::Legal { property } => {
            let signed_url = service.get_property_legal_document(&property).await?;
            if signed_url.is_none() {
                tracing::info!("Property {} has no legal document", property);
            }
            json!({ "signedUrl": signed_url })
        }
        Commands::Verify { signed_url } => {
            let path = state.object_store.verify_signed_url(&signed_url, Utc::now())?;
            json!({ "path": path, "valid": true })
        }
        Commands::Backends => json!({ "backends": state.backends }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
