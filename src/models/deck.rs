// src/models/deck.rs

//! Deck presets and the search/match criteria that identify a deck.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const NEWAVE_SEARCH: &str = "Deck de Preços - Newave";
const NEWAVE_INFO: &str = "Conjunto de arquivos para cálculo do Newave.";
const DECOMP_SEARCH: &str = "Deck de Preços - Decomp";
const DECOMP_INFO: &str = "Conjunto de arquivos para cálculo do Decomp.";
const NEWAVE_RESULT: &str = "Processo de Dados do Resultado do Newave";

/// Criteria identifying a deck on the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    /// Identifier used on the command line
    pub key: String,

    /// Text typed into the archive's search box
    pub search_text: String,

    /// Expected result name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_name: Option<String>,

    /// Expected result info text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_info: Option<String>,
}

/// Built-in deck presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deck {
    /// Newave input deck
    NewaveEntrada,
    /// Newave complete deck (input and output)
    NewaveCompleto,
    /// Newave preliminary input deck
    NewavePreliminar,
    /// Newave "shadow" deck
    NewaveSombra,
    /// Decomp input deck
    Decomp,
    /// Decomp "shadow" deck
    DecompSombra,
}

/// Static description of a preset.
#[derive(Debug)]
pub struct DeckPreset {
    pub key: &'static str,
    pub id: &'static str,
    pub description: &'static str,
    pub search_text: &'static str,
    pub match_name: Option<&'static str>,
    pub match_info: Option<&'static str>,
}

static PRESETS: [DeckPreset; 6] = [
    DeckPreset {
        key: "DeckNWEntrada",
        id: "nw-entrada",
        description: "Newave input deck",
        search_text: NEWAVE_SEARCH,
        match_name: Some(NEWAVE_SEARCH),
        match_info: Some(NEWAVE_INFO),
    },
    DeckPreset {
        key: "DeckNWCompleto",
        id: "nw-completo",
        description: "Newave complete deck (input and output)",
        search_text: NEWAVE_RESULT,
        match_name: Some(NEWAVE_RESULT),
        match_info: Some("Todos os dados resultantes do processamento do modelo."),
    },
    DeckPreset {
        key: "DeckNWPreliminar",
        id: "nw-preliminar",
        description: "Newave preliminary input deck",
        search_text: NEWAVE_SEARCH,
        match_name: Some("Deck de Preços - Newave Preliminar"),
        match_info: Some(NEWAVE_INFO),
    },
    DeckPreset {
        key: "DeckNWSombra",
        id: "nw-sombra",
        description: "Newave shadow deck",
        search_text: NEWAVE_SEARCH,
        match_name: Some(NEWAVE_SEARCH),
        match_info: None,
    },
    DeckPreset {
        key: "DeckDecomp",
        id: "decomp",
        description: "Decomp input deck",
        search_text: DECOMP_SEARCH,
        match_name: Some(DECOMP_SEARCH),
        match_info: Some(DECOMP_INFO),
    },
    DeckPreset {
        key: "DeckDecompSombra",
        id: "decomp-sombra",
        description: "Decomp shadow deck",
        search_text: DECOMP_SEARCH,
        match_name: Some(DECOMP_SEARCH),
        match_info: None,
    },
];

impl Deck {
    pub const ALL: [Deck; 6] = [
        Deck::NewaveEntrada,
        Deck::NewaveCompleto,
        Deck::NewavePreliminar,
        Deck::NewaveSombra,
        Deck::Decomp,
        Deck::DecompSombra,
    ];

    /// Static preset data for this deck.
    pub fn preset(self) -> &'static DeckPreset {
        &PRESETS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.preset().key
    }

    /// Owned criteria for this deck.
    pub fn spec(self) -> DeckSpec {
        let preset = self.preset();
        DeckSpec {
            key: preset.key.to_string(),
            search_text: preset.search_text.to_string(),
            match_name: preset.match_name.map(str::to_string),
            match_info: preset.match_info.map(str::to_string),
        }
    }

    /// Look up a preset by key (`DeckDecomp`) or id (`decomp`), ignoring case.
    pub fn find(name: &str) -> Option<Deck> {
        let name = name.trim();
        Self::ALL.into_iter().find(|deck| {
            let preset = deck.preset();
            preset.key.eq_ignore_ascii_case(name) || preset.id.eq_ignore_ascii_case(name)
        })
    }
}

impl FromStr for Deck {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s).ok_or_else(|| AppError::UnknownDeck(s.to_string()))
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<Deck> for DeckSpec {
    fn from(deck: Deck) -> Self {
        deck.spec()
    }
}
