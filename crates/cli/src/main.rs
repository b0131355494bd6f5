mod commands;
mod config;
mod counter;
mod forms;
mod logging;

use clap::{Parser, Subcommand};
use commands::Context;
use config::{AppConfig, StoreKind};
use forms::FormKind;
use logging::LoggingConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "formkit")]
#[command(about = "Bounded counter and sign-up form backed by declarative validation")]
#[command(version)]
struct Cli {
    /// Path of the JSON store (overrides FORMKIT_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Keep data in memory for this run only
    #[arg(long, global = true, conflicts_with = "store")]
    memory: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Increment the counter (stays below 10)
    Count,

    /// Print the current count
    Show,

    /// Forget the stored count
    Reset,

    /// Submit the sign-up form
    Signup {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,
    },

    /// Validate a JSON record against one of the form schemas
    Validate {
        /// Which schema to apply
        #[arg(long, value_enum)]
        form: FormKind,

        /// The record, as a JSON object
        #[arg(long)]
        data: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if cli.memory {
        config.store = StoreKind::Memory;
    } else if let Some(path) = cli.store.clone() {
        config.store = StoreKind::File(path);
    }

    let mut logging = LoggingConfig::for_environment(config.environment, &config.log_level);
    if cli.json {
        logging = logging.json(true);
    }
    if let Err(e) = logging::init_logging(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    tracing::debug!(environment = %config.environment, store = ?config.store, "Configuration loaded");

    let ctx = Context::new(commands::open_storage(&config)?, cli.json);
    let mut out = std::io::stdout().lock();

    let ok = match cli.command {
        Commands::Count => commands::count::count(&ctx, &mut out)?,
        Commands::Show => commands::count::show(&ctx, &mut out)?,
        Commands::Reset => commands::count::reset(&ctx, &mut out)?,
        Commands::Signup { username, email } => {
            commands::signup::signup(&ctx, &username, &email, &mut out)?
        }
        Commands::Validate { form, data } => {
            commands::validate::validate(&ctx, form, &data, &mut out)?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
