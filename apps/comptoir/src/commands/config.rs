//! # Config Commands
//!
//! Settings retrieval for the surfaces.

use tracing::debug;

use crate::state::AppConfig;

/// Gets the current settings.
///
/// ## When Used
/// - Startup (store name, currency symbol)
/// - Rate pickers (the tax rate table)
/// - Document headers
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_rates_as_percentages() {
        let config = get_config(&AppConfig::default());
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["currency_symbol"], "€");
        assert_eq!(json["tax_rates"][2]["id"], "tva-5.5");
        assert_eq!(json["tax_rates"][2]["rate"], 5.5);
    }
}
