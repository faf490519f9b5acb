//! # Commands Module
//!
//! The functions the order surfaces call (POS summary, order form, supplier
//! order, invoice print). Every surface goes through these, so every surface
//! shows the same totals.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── order.rs    ◄─── Order editing, summary, checkout
//! ├── report.rs   ◄─── Margin report over finalized sales
//! └── config.rs   ◄─── Settings retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Surface                                                                │
//! │  ───────                                                                │
//! │  update_quantity(&session, &config, &catalog, "line-1", 3)              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Lock the session, validate, mutate                         │    │
//! │  │  2. Recompute totals through comptoir-core, skipping items     │    │
//! │  │     that left the catalog                                      │    │
//! │  │  3. Round to Money for display (NaN → PRICING_ERROR)           │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<OrderSummary, ApiError>  (JSON, camelCase)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs settings
//! fn get_config(config: &AppConfig)
//!
//! // Needs the session, the rate table and the catalog to price against
//! fn get_order_summary(session: &SessionState, config: &AppConfig, catalog: &C)
//!
//! // Plus the edit itself
//! fn add_item(session: &SessionState, config: &AppConfig, catalog: &C, item_id: &str)
//! ```

pub mod config;
pub mod order;
pub mod report;
