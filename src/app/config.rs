use std::path::Path;

use crate::config::Config;

pub fn config_output(config_path: &Path, config: &Config, session_path: &Path) -> serde_json::Value {
    serde_json::json!({
        "config_file": config_path.display().to_string(),
        "session_file": session_path.display().to_string(),
        "services": {
            "auth_url": config.services.auth_url,
            "portfolio_url": config.services.portfolio_url,
            "market_data_url": config.services.market_data_url,
            "expense_url": config.services.expense_url
        },
        "http": {
            "request_timeout": crate::duration::format_duration(config.http.request_timeout),
            "user_agent": config.http.user_agent
        },
        "display": {
            "currency_decimals": config.display.currency_decimals,
            "currency_grouping": config.display.currency_grouping,
            "currency_symbol": config.display.currency_symbol
        }
    })
}
