//! # Comptoir Application Library
//!
//! Settings, the order session and the commands every order surface calls.
//! All pricing is delegated to `comptoir-core`.
//!
//! ## Module Organization
//! ```text
//! comptoir_app/
//! ├── lib.rs          ◄─── You are here (logging, order-file runner)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Order session (the cart) behind a Mutex
//! │   └── config.rs   ◄─── Settings and the VAT rate table
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── order.rs    ◄─── Order editing, summary, checkout
//! │   ├── report.rs   ◄─── Margin report
//! │   └── config.rs   ◄─── Settings retrieval
//! └── error.rs        ◄─── ApiError for commands, ConfigError, RunError
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use comptoir_core::types::{Catalog, CatalogItem, DocumentKind, OrderLine};

use commands::order::{summarize, summarize_without_catalog, OrderSummary};
use error::RunError;
use state::{AppConfig, OrderSession};

/// Default `tracing` filter when neither `RUST_LOG` nor a configured filter
/// is set.
pub const DEFAULT_LOG_FILTER: &str = "info,comptoir=debug";

/// An order as read from a JSON file.
///
/// ```json
/// { "kind": "quote", "deposit": 10, "lines": [ ... ], "catalog": [ ... ] }
/// ```
///
/// With a `catalog`, lines whose item is missing from it are listed but not
/// priced.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFile {
    #[serde(default)]
    pub kind: Option<DocumentKind>,

    #[serde(default)]
    pub deposit: f64,

    pub lines: Vec<OrderLine>,

    #[serde(default)]
    pub catalog: Option<Vec<CatalogItem>>,
}

/// Runs the `comptoir` binary: prices the order file named by the first
/// argument and prints its summary as JSON.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       comptoir <order.json>                             │
/// │                                                                         │
/// │  1. Load Settings ────────────────────────────────────────────────────► │
/// │     • $COMPTOIR_CONFIG or the platform config file, else defaults       │
/// │     • COMPTOIR_* environment overrides                                  │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else the configured filter, else info,comptoir=debug    │
/// │     • Logs go to stderr; stdout carries only the summary               │
/// │     • Then log where the settings came from (file or defaults)         │
/// │                                                                         │
/// │  3. Read & Validate the Order ────────────────────────────────────────► │
/// │                                                                         │
/// │  4. Print the Summary (pretty JSON) ──────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run<I>(args: I) -> Result<(), RunError>
where
    I: IntoIterator<Item = String>,
{
    let path = args.into_iter().nth(1).map(PathBuf::from).ok_or(RunError::Usage)?;

    let (config, source) = AppConfig::load()?;
    init_tracing(config.log_filter.as_deref());
    info!(
        store = %config.store_name,
        rates = config.tax_rates.len(),
        config = %source,
        "Starting Comptoir"
    );

    let summary = price_order_file(&path, &config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Reads an order file and builds its summary.
pub fn price_order_file(path: &Path, config: &AppConfig) -> Result<OrderSummary, RunError> {
    let content = std::fs::read_to_string(path).map_err(|source| RunError::ReadOrder {
        path: path.to_path_buf(),
        source,
    })?;
    let order: OrderFile = serde_json::from_str(&content)?;
    debug!(?path, lines = order.lines.len(), "Order file read");

    let kind = order.kind.unwrap_or(config.document_kind);
    let session = OrderSession::from_lines(kind, order.lines, order.deposit)
        .map_err(error::ApiError::from)?;
    let summary = match order.catalog {
        Some(items) => summarize(&session, config, &Catalog::new(items))?,
        None => summarize_without_catalog(&session, config)?,
    };
    Ok(summary)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `COMPTOIR_LOG` or `log_filter` in the settings file - used when
///   `RUST_LOG` is unset
/// - Default: `info,comptoir=debug`
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
