//! Pipeline entry points.
//!
//! - `run_download`: Search, filter and download one deck
//! - `run_search`: Search the archive and list/export the raw rows
//! - `run_validate`: Check the configuration file

pub mod download;
pub mod search;
pub mod validate;

pub use download::run_download;
pub use search::run_search;
pub use validate::run_validate;
