//! # Comptoir Entry Point
//!
//! Prices an order file with the configured VAT rates.
//!
//! ```text
//! $ comptoir order.json
//! {
//!   "kind": "invoice",
//!   "lines": [ ... ],
//!   "totals": { "subtotalHT": 2700, "totalTVA": 540, "totalTTC": 3240, ... }
//! }
//! ```
//!
//! Amounts are printed in cents. Errors go to stderr with exit code 1.

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual work is in lib.rs for testability
    match comptoir_app::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("comptoir: {}", err);
            ExitCode::FAILURE
        }
    }
}
