// Library interface for guess-the-word
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod logging;
pub mod provider;
pub mod tui;
pub mod wordbank;

// Re-export commonly used types for easier testing
pub use engine::{GameEngine, GuessOutcome, RoundResult};
pub use provider::{
    FileWordProvider, HttpWordProvider, ProviderError, WordFetcher, WordProvider,
};
pub use wordbank::{load_words_from_file, load_words_from_str};
