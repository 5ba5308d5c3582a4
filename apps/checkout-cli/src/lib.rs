//! # Checkout CLI Library
//!
//! Loads a product catalog, applies the quantity changes given on the
//! command line and prints the checkout table.
//!
//! ## Module Organization
//! ```text
//! checkout_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap arguments, +ID / -ID actions
//! ├── config.rs       ◄─── AppConfig from CHECKOUT_* variables
//! ├── render.rs       ◄─── Text table and summary lines
//! └── error.rs        ◄─── AppError and exit codes
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;

use std::io::Write;
use std::process::ExitCode;

use checkout_loader::{CatalogLoader, CheckoutSession, JsonFileProvider};
use clap::Parser;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use cli::{Action, Args};
use config::AppConfig;
use error::{AppError, AppResult};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,checkout=debug";

/// Runs one checkout from the process arguments and environment.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  1. Initialize Logging     tracing-subscriber on stderr, RUST_LOG       │
/// │  2. Parse Arguments        clap; --help / --version exit here           │
/// │  3. Read Configuration     CHECKOUT_* variables, --products override    │
/// │  4. Parse Actions          every +ID / -ID before anything loads        │
/// │  5. Load Catalog           one attempt, optional timeout                │
/// │  6. Apply Actions          in command line order                        │
/// │  7. Print                  table (or JSON with --json) on stdout        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let session_id = Uuid::new_v4();

    let result = async {
        let mut config = AppConfig::from_env()?;
        if let Some(path) = &args.products {
            config = config.with_products_path(path);
        }
        let actions = args.parsed_actions()?;

        let output = checkout(&config, &actions, args.json).await?;
        std::io::stdout().lock().write_all(output.as_bytes())?;
        Ok::<_, AppError>(())
    }
    .instrument(info_span!("checkout", %session_id))
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%session_id, error = %e, "Checkout failed");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Loads the catalog named by `config`, applies `actions` and renders
/// the result.
pub async fn checkout(config: &AppConfig, actions: &[Action], json: bool) -> AppResult<String> {
    info!(
        store = %config.store_name,
        products = %config.products_path.display(),
        actions = actions.len(),
        "Starting checkout"
    );

    let loader = CatalogLoader::new().with_timeout(config.load_timeout);
    let mut session = CheckoutSession::with_policy(loader, config.discount);
    session
        .start(&JsonFileProvider::new(&config.products_path))
        .await?;

    for action in actions {
        match action {
            Action::Increment(id) => session.increment(id),
            Action::Decrement(id) => session.decrement(id),
        };
    }

    let view = session.view();
    if json {
        let mut out = serde_json::to_string_pretty(&view)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(render::render_table(&config.store_name, &view, &config.currency_symbol))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so the table on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout_loader=trace` - Trace the loader only
/// - Default: INFO, DEBUG for the checkout crates
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` when set and valid, otherwise [`DEFAULT_LOG_FILTER`].
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
