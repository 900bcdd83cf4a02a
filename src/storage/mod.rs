//! Storage for downloaded deck files.
//!
//! ```text
//! decks/
//! ├── Deck de Preços - Decomp - 06-2023.zip
//! └── Deck de Preços - Newave - 11-2022.zip
//! ```

pub mod local;

// Re-export for convenience
pub use local::LocalStorage;
