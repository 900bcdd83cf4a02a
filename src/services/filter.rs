// src/services/filter.rs

//! Deck matching rules.
//!
//! Which predicate applies depends on which criteria are present. The table
//! is not symmetric: with no `match_info`, `match_name` is compared against
//! the *info* column, and with no month the info check becomes a substring
//! test. Shadow decks rely on the former.

use chrono::NaiveDate;

use crate::models::period::format_month;
use crate::models::{DeckSpec, SearchResult};

/// Predicate applied to each search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// `reference == month && name == name && info == info`
    MonthNameInfo {
        month: String,
        name: String,
        info: String,
    },
    /// `reference == month && info == name`
    MonthInfoIsName { month: String, name: String },
    /// `reference == month && info == info`
    MonthInfo { month: String, info: String },
    /// `name == name && info contains info`
    NameInfoContains { name: String, info: String },
    /// `reference == month`
    Month(String),
    /// `info == name`
    InfoIsName(String),
    /// `info == info`
    Info(String),
    /// Every row matches
    Any,
}

impl MatchRule {
    /// Pick the rule for a deck and optional reference month.
    pub fn for_deck(deck: &DeckSpec, month: Option<NaiveDate>) -> Self {
        let month = month.map(format_month);
        let name = deck.match_name.clone();
        let info = deck.match_info.clone();

        match (month, name, info) {
            (Some(month), Some(name), Some(info)) => Self::MonthNameInfo { month, name, info },
            (Some(month), Some(name), None) => Self::MonthInfoIsName { month, name },
            (Some(month), None, Some(info)) => Self::MonthInfo { month, info },
            (None, Some(name), Some(info)) => Self::NameInfoContains { name, info },
            (Some(month), None, None) => Self::Month(month),
            (None, Some(name), None) => Self::InfoIsName(name),
            (None, None, Some(info)) => Self::Info(info),
            (None, None, None) => Self::Any,
        }
    }

    pub fn matches(&self, row: &SearchResult) -> bool {
        match self {
            Self::MonthNameInfo { month, name, info } => {
                row.reference_date == *month && row.name == *name && row.info == *info
            }
            Self::MonthInfoIsName { month, name } => {
                row.reference_date == *month && row.info == *name
            }
            Self::MonthInfo { month, info } => row.reference_date == *month && row.info == *info,
            Self::NameInfoContains { name, info } => {
                row.name == *name && row.info.contains(info.as_str())
            }
            Self::Month(month) => row.reference_date == *month,
            Self::InfoIsName(name) => row.info == *name,
            Self::Info(info) => row.info == *info,
            Self::Any => true,
        }
    }

    /// Keep matching rows, preserving their order.
    pub fn apply(&self, rows: Vec<SearchResult>) -> Vec<SearchResult> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deck;

    fn row(name: &str, reference: &str, info: &str) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            reference_date: reference.to_string(),
            info: info.to_string(),
            link: format!("https://example.com/{}.zip", name.len()),
            publish_date: String::new(),
            content_hash: String::new(),
            size: String::new(),
            description: String::new(),
        }
    }

    fn deck(name: Option<&str>, info: Option<&str>) -> DeckSpec {
        DeckSpec {
            key: "test".to_string(),
            search_text: "test".to_string(),
            match_name: name.map(str::to_string),
            match_info: info.map(str::to_string),
        }
    }

    fn june() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2023, 6, 1)
    }

    #[test]
    fn test_rule_selection_table() {
        let cases = [
            (june(), Some("N"), Some("I"), "MonthNameInfo"),
            (june(), Some("N"), None, "MonthInfoIsName"),
            (june(), None, Some("I"), "MonthInfo"),
            (None, Some("N"), Some("I"), "NameInfoContains"),
            (june(), None, None, "Month"),
            (None, Some("N"), None, "InfoIsName"),
            (None, None, Some("I"), "Info"),
            (None, None, None, "Any"),
        ];
        for (month, name, info, expected) in cases {
            let rule = MatchRule::for_deck(&deck(name, info), month);
            let debug = format!("{rule:?}");
            let variant = debug.split(['(', ' ']).next().unwrap();
            assert_eq!(variant, expected);
        }
    }

    #[test]
    fn test_name_and_info_without_month_uses_substring_info() {
        let rows = vec![row("A", "01/2023", "X"), row("B", "01/2023", "Y contains X")];
        let rule = MatchRule::for_deck(&deck(Some("A"), Some("X")), None);

        let selected = rule.apply(rows);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "A");
    }

    #[test]
    fn test_substring_info_match() {
        let rule = MatchRule::for_deck(&deck(Some("A"), Some("X")), None);
        assert!(rule.matches(&row("A", "01/2023", "prefix X suffix")));
        assert!(!rule.matches(&row("A", "01/2023", "Y")));
    }

    #[test]
    fn test_shadow_deck_compares_name_against_info() {
        let rule = MatchRule::for_deck(&Deck::DecompSombra.spec(), june());
        assert!(rule.matches(&row("Anything", "06/2023", "Deck de Preços - Decomp")));
        assert!(!rule.matches(&row("Deck de Preços - Decomp", "06/2023", "Sombra")));
        assert!(!rule.matches(&row("Anything", "07/2023", "Deck de Preços - Decomp")));
    }

    #[test]
    fn test_month_name_info_is_exact() {
        let rule = MatchRule::for_deck(&Deck::Decomp.spec(), june());
        let info = "Conjunto de arquivos para cálculo do Decomp.";
        assert!(rule.matches(&row("Deck de Preços - Decomp", "06/2023", info)));
        assert!(!rule.matches(&row("Deck de Preços - Decomp", "05/2023", info)));
        assert!(!rule.matches(&row("Deck de Preços - Decomp Preliminar", "06/2023", info)));
        assert!(!rule.matches(&row("Deck de Preços - Decomp", "06/2023", "Conjunto")));
    }

    #[test]
    fn test_any_keeps_order() {
        let rows = vec![row("B", "", ""), row("A", "", ""), row("C", "", "")];
        let selected = MatchRule::Any.apply(rows.clone());
        assert_eq!(selected, rows);
    }
}
