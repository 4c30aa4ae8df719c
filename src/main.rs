use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folioview::app;
use folioview::config::{default_config_path, Config};
use folioview::dashboard::DashboardService;
use folioview::session::SessionStore;
use folioview::valuation::HoldingFilter;

#[derive(Parser)]
#[command(name = "folioview")]
#[command(about = "Portfolio valuation and expense tracking client")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current configuration
    Config,
    /// Log in and cache the session
    Login {
        #[arg(short, long)]
        username: String,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the cached session
    Logout,
    /// List holdings with live valuation
    Holdings {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Portfolio totals
    Summary,
    /// Value and share of each asset class
    Allocation,
    /// Expenses and asset purchases, newest first
    Transactions {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Manage expenses
    Expenses {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    /// Manage expense categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },
}

#[derive(Subcommand)]
enum ExpenseCommand {
    /// List all expenses
    List,
    /// Record an expense
    Add {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        category: i64,
    },
    /// Delete an expense by its external id
    Delete { id: String },
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories
    List,
    /// Create a category
    Add {
        name: String,
        #[arg(long)]
        parent: Option<i64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Gainers,
    Losers,
}

impl From<FilterArg> for HoldingFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => HoldingFilter::All,
            FilterArg::Gainers => HoldingFilter::Gainers,
            FilterArg::Losers => HoldingFilter::Losers,
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn emit_value(json: bool, value: &serde_json::Value) -> Result<()> {
    emit(json, value, |v| format!("{v:#}\n"))
}

fn dashboard(config: &Config, store: &SessionStore) -> Result<DashboardService> {
    let session = store
        .load()?
        .context("Not logged in; run `folioview login --username <name>` first")?;
    DashboardService::from_config(config, Some(session))
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let store = app::session_store(&config, &cli.config)?;
    let display = &config.display;
    let json = cli.json;

    match cli.command {
        Command::Config => {
            emit_value(json, &app::config_output(&cli.config, &config, store.path()))?;
        }
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .context("Failed to read password")?,
            };
            emit_value(json, &app::login(&config, &store, &username, &password).await?)?;
        }
        Command::Logout => {
            emit_value(json, &app::logout(&store)?)?;
        }
        Command::Holdings { filter } => {
            let valuation = dashboard(&config, &store)?.valuation().await?;
            let output = app::holdings_output(&valuation, filter.into(), display);
            emit(json, &output, app::holdings_text)?;
        }
        Command::Summary => {
            let valuation = dashboard(&config, &store)?.valuation().await?;
            emit(json, &app::summary_output(&valuation, display), app::summary_text)?;
        }
        Command::Allocation => {
            let valuation = dashboard(&config, &store)?.valuation().await?;
            emit(json, &app::allocation_output(&valuation, display), |rows| {
                app::allocation_text(rows)
            })?;
        }
        Command::Transactions { limit } => {
            let feed = dashboard(&config, &store)?.transactions(limit).await?;
            emit(json, &app::transactions_output(&feed, display), |rows| {
                app::transactions_text(rows)
            })?;
        }
        Command::Expenses { command } => {
            let service = dashboard(&config, &store)?;
            let client = service.expenses();
            match command {
                ExpenseCommand::List => {
                    let expenses = client.list_expenses().await.context("Failed to list expenses")?;
                    emit(json, &app::expenses_output(&expenses, display), |rows| {
                        app::expenses_text(rows)
                    })?;
                }
                ExpenseCommand::Add {
                    amount,
                    description,
                    date,
                    category,
                } => {
                    let today = chrono::Local::now().date_naive();
                    let request = app::parse_expense_request(
                        &amount,
                        &description,
                        date.as_deref(),
                        category,
                        today,
                    )?;
                    let created = app::add_expense(client, &request, display).await?;
                    emit(json, &created, |row| {
                        app::expenses_text(std::slice::from_ref(row))
                    })?;
                }
                ExpenseCommand::Delete { id } => {
                    emit_value(json, &app::delete_expense(client, &id).await?)?;
                }
            }
        }
        Command::Categories { command } => {
            let service = dashboard(&config, &store)?;
            let client = service.expenses();
            match command {
                CategoryCommand::List => {
                    let categories = client
                        .list_categories()
                        .await
                        .context("Failed to list categories")?;
                    emit(json, &app::categories_output(&categories), |rows| {
                        app::categories_text(rows)
                    })?;
                }
                CategoryCommand::Add { name, parent } => {
                    let created = app::add_category(client, &name, parent).await?;
                    emit(json, &created, |row| {
                        app::categories_text(std::slice::from_ref(row))
                    })?;
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    tokio::select! {
        result = run(cli, config) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            std::process::exit(130);
        }
    }
}
