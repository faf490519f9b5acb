//! # State Module
//!
//! Application state handed to the commands.
//!
//! Each command takes only the state it needs, so settings (read-only) never
//! contend with the order session (locked per edit).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────────┬──────────────────────┐           │
//! │          ▼                          ▼                      ▼           │
//! │  ┌──────────────────┐   ┌──────────────────────┐   ┌──────────────┐   │
//! │  │   AppConfig      │   │   SessionState       │   │   Catalog    │   │
//! │  │                  │   │                      │   │  (caller's)  │   │
//! │  │  store_name      │   │  Arc<Mutex<          │   │              │   │
//! │  │  tax_rates       │   │    OrderSession      │   │ CatalogLookup│   │
//! │  │  currency        │   │  >>                  │   │              │   │
//! │  └──────────────────┘   └──────────────────────┘   └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: read-only after load                                     │
//! │  • SessionState: Arc<Mutex<T>>, one edit at a time                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{default_config_path, AppConfig, ConfigSource, CONFIG_PATH_ENV};
pub use session::{OrderSession, SessionState};
