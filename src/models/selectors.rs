// src/models/selectors.rs

//! Locators for the archive's search form and result cards.

use serde::{Deserialize, Serialize};

const PORTLET: &str = "//*[@id=\"portlet_org_ccee_acervo_portlet_CCEEAcervoPortlet_INSTANCE_tixm\"]/div/div[2]/div/div[1]";

/// Element ids and XPaths used while filling the search form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSelectors {
    /// Id of the keyword input
    #[serde(default = "defaults::keyword_id")]
    pub keyword_id: String,

    /// XPath of the arrow that opens the date-filter dropdown
    #[serde(default = "defaults::date_filter_toggle")]
    pub date_filter_toggle: String,

    /// XPath of the "Data de publicação" option
    #[serde(default = "defaults::publication_date_option")]
    pub publication_date_option: String,

    /// Id of the start date input
    #[serde(default = "defaults::start_date_id")]
    pub start_date_id: String,

    /// Id of the end date input
    #[serde(default = "defaults::end_date_id")]
    pub end_date_id: String,

    /// Id of the "Filtrar" button
    #[serde(default = "defaults::filter_button_id")]
    pub filter_button_id: String,

    /// XPath of the arrow that opens the results-per-page dropdown
    #[serde(default = "defaults::page_size_toggle")]
    pub page_size_toggle: String,

    /// XPath of the largest results-per-page option
    #[serde(default = "defaults::page_size_option")]
    pub page_size_option: String,
}

impl Default for FormSelectors {
    fn default() -> Self {
        Self {
            keyword_id: defaults::keyword_id(),
            date_filter_toggle: defaults::date_filter_toggle(),
            publication_date_option: defaults::publication_date_option(),
            start_date_id: defaults::start_date_id(),
            end_date_id: defaults::end_date_id(),
            filter_button_id: defaults::filter_button_id(),
            page_size_toggle: defaults::page_size_toggle(),
            page_size_option: defaults::page_size_option(),
        }
    }
}

/// CSS selectors for scraping result cards out of the page source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSelectors {
    /// Selector for each result card
    #[serde(default = "defaults::card")]
    pub card: String,

    /// Selector for the download link within a card
    #[serde(default = "defaults::link")]
    pub link: String,

    /// Selector for the "Referência: mm/yyyy" element
    #[serde(default = "defaults::reference")]
    pub reference: String,

    /// Selector for the info text
    #[serde(default = "defaults::info")]
    pub info: String,

    /// Selector for the "Publicado em: dd/mm/yyyy" element
    #[serde(default = "defaults::published")]
    pub published: String,

    /// Selector for the hash element
    #[serde(default = "defaults::hash")]
    pub hash: String,

    /// Selector for the file size element
    #[serde(default = "defaults::size")]
    pub size: String,

    /// HTML attribute holding the download URL
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: defaults::card(),
            link: defaults::link(),
            reference: defaults::reference(),
            info: defaults::info(),
            published: defaults::published(),
            hash: defaults::hash(),
            size: defaults::size(),
            attr_name: defaults::attr_name(),
        }
    }
}

/// All archive locators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArchiveSelectors {
    #[serde(default)]
    pub form: FormSelectors,

    #[serde(default)]
    pub card: CardSelectors,
}

impl CardSelectors {
    /// Every selector paired with its config field name.
    pub fn named(&self) -> [(&'static str, &str); 7] {
        [
            ("selectors.card.card", self.card.as_str()),
            ("selectors.card.link", self.link.as_str()),
            ("selectors.card.reference", self.reference.as_str()),
            ("selectors.card.info", self.info.as_str()),
            ("selectors.card.published", self.published.as_str()),
            ("selectors.card.hash", self.hash.as_str()),
            ("selectors.card.size", self.size.as_str()),
        ]
    }
}

mod defaults {
    use super::PORTLET;

    pub fn keyword_id() -> String {
        "keyword".into()
    }
    pub fn date_filter_toggle() -> String {
        format!("{PORTLET}/div[1]/div[1]/div/button[2]")
    }
    pub fn publication_date_option() -> String {
        format!("{PORTLET}/div[1]/div[1]/div/ul/li[5]/span")
    }
    pub fn start_date_id() -> String {
        "initialDateAcervo".into()
    }
    pub fn end_date_id() -> String {
        "finalDateAcervo".into()
    }
    pub fn filter_button_id() -> String {
        "filtrar".into()
    }
    pub fn page_size_toggle() -> String {
        format!("{PORTLET}/div[2]/div[2]/div[1]/div[2]/button")
    }
    pub fn page_size_option() -> String {
        format!("{PORTLET}/div[2]/div[2]/div[1]/div[2]/ul/li[3]/span")
    }

    pub fn card() -> String {
        ".col".into()
    }
    pub fn link() -> String {
        "a".into()
    }
    pub fn reference() -> String {
        ".refer".into()
    }
    pub fn info() -> String {
        ".card-text".into()
    }
    pub fn published() -> String {
        ".card-published".into()
    }
    pub fn hash() -> String {
        ".bold-light.card-hash".into()
    }
    pub fn size() -> String {
        ".bold-light.card-pdf-size".into()
    }
    pub fn attr_name() -> String {
        "href".into()
    }
}
