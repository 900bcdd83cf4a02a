// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::report;

/// Validate configuration and print the values that matter at run time.
pub fn run_validate(config: &Config) -> Result<()> {
    report::header("Validating configuration");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {e}");
        return Err(e);
    }

    report::success("Config OK");
    report::sub_item(&format!("Archive: {}", config.archive.url));
    report::sub_item(&format!("WebDriver: {}", config.archive.webdriver_url));
    report::sub_item(&format!(
        "Wait timeout: {}s",
        config.archive.wait_timeout_secs
    ));
    report::sub_item(&format!(
        "Certificate checks: {}",
        if config.download.accept_invalid_certs {
            "disabled"
        } else {
            "enabled"
        }
    ));
    report::sub_item(&format!(
        "Decks: {} built-in, {} configured",
        config.all_decks().len() - config.decks.len(),
        config.decks.len()
    ));
    Ok(())
}
