//! Search result data structure.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::period::parse_month;

/// One result card scraped from the archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Display title of the published item
    pub name: String,

    /// Reference month, `mm/yyyy`
    pub reference_date: String,

    /// Short description/category label
    pub info: String,

    /// Absolute download URL
    pub link: String,

    /// Publication date as shown on the card
    pub publish_date: String,

    /// Integrity hash shown on the card
    pub content_hash: String,

    /// Human-readable file size
    pub size: String,

    /// Full text of the card
    pub description: String,
}

impl SearchResult {
    /// Local file name for this result: `"<name> - MM-YYYY.zip"`.
    pub fn file_name(&self) -> Result<String> {
        let month = parse_month(&self.reference_date)?;
        Ok(format!("{} - {}.zip", self.name, month.format("%m-%Y")))
    }
}
