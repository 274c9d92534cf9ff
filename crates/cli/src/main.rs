//! Portfolio CLI - Send and preview contact messages.
//!
//! # Usage
//!
//! ```bash
//! # Submit a message to a running site
//! portfolio-cli send --url http://127.0.0.1:3000 -n "Ada" -e ada@example.com -m "Hello"
//!
//! # Render the email the server would send, without sending it
//! portfolio-cli preview -n "Ada" -e ada@example.com -m "Hello" --subject "Project"
//! ```
//!
//! # Commands
//!
//! - `send` - Submit through the contact form client
//! - `preview` - Render the subject and HTML body locally

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::SubmissionArgs;

#[derive(Parser)]
#[command(name = "portfolio-cli")]
#[command(author, version, about = "Portfolio site CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a contact message to a running site
    Send {
        /// Site base URL
        #[arg(long, env = "PORTFOLIO_SITE_URL", default_value = "http://127.0.0.1:3000")]
        url: String,

        #[command(flatten)]
        submission: SubmissionArgs,

        /// Send even if a required field is empty
        #[arg(long)]
        skip_local_check: bool,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
    /// Render the email for a message without sending it
    Preview {
        #[command(flatten)]
        submission: SubmissionArgs,

        /// Sender address (defaults to `CONTACT_FROM_EMAIL`)
        #[arg(long, env = "CONTACT_FROM_EMAIL", default_value = "contact@localhost")]
        from: String,

        /// Destination address (defaults to `CONTACT_TO_EMAIL`)
        #[arg(long, env = "CONTACT_TO_EMAIL", default_value = "owner@localhost")]
        to: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Send {
            url,
            submission,
            skip_local_check,
            timeout_secs,
        } => {
            commands::send::run(&url, submission, skip_local_check, timeout_secs).await?;
        }
        Commands::Preview {
            submission,
            from,
            to,
        } => {
            commands::preview::run(submission, from, to)?;
        }
    }
    Ok(())
}
