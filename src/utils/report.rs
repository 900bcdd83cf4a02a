// src/utils/report.rs

//! Console report helpers layered on the `log` facade.
//!
//! Gives pipeline output a consistent shape: a header per run, numbered
//! steps, indented detail lines and a closing summary.

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(60);
    log::info!("{border}");
    log::info!("  {title}");
    log::info!("{border}");
}

/// Log a step in a process
pub fn step(step_num: usize, total: usize, message: &str) {
    log::info!("[STEP {step_num}/{total}] {message}");
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    log::info!("    {message}");
}

/// Log a success message
pub fn success(message: &str) {
    log::info!("✓ {message}");
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    log::info!("[SUMMARY] {title}");
    for (key, value) in items {
        log::info!("    {key}: {value}");
    }
}
