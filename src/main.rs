use anyhow::Result;
use clap::{Parser, Subcommand};

use nli::{cli, web};

#[derive(Debug, Parser)]
#[command(name = "nli")]
#[command(about = "Natural Language Insights — ask questions, get analytics answers")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Answer a single question and print the result
    Ask {
        /// The question to answer
        #[arg(trailing_var_arg = true, required = true)]
        question: Vec<String>,
        /// Viewer role: Analyst, "Sales Manager", Executive, Finance
        #[arg(long, short)]
        role: Option<String>,
        /// Data domain for SQL generation (default: from config)
        #[arg(long, short)]
        domain: Option<String>,
        /// Output format: text (default), json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Interactive chat session
    Chat {
        /// Viewer role for the session (prompted when omitted)
        #[arg(long, short)]
        role: Option<String>,
    },
    /// Print a domain schema
    Schema {
        /// Data domain (default: from config)
        #[arg(long, short)]
        domain: Option<String>,
    },
    /// Show question statistics from the query log
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Check system health: config, SQL generator, query log
    Health,
    /// Serve the embedded web chat demo
    Web {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:9174")]
        addr: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Write the annotated default config to ~/.nli/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a single value, e.g. `nli config set generator.enabled true`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Ask {
            question,
            role,
            domain,
            format,
        } => {
            let question = question.join(" ");
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_ask(&question, role.as_deref(), domain.as_deref(), fmt)
        }
        Commands::Chat { role } => cli::run_chat(role.as_deref()),
        Commands::Schema { domain } => cli::run_schema(domain.as_deref()),
        Commands::Stats { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt, days)
        }
        Commands::Health => cli::run_health(),
        Commands::Web { addr } => web::serve(&addr),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
