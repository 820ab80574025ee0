//! Word sources for the start of each round.
//!
//! A round needs exactly one word. The usual source is a remote random-word
//! HTTP API ([`HttpWordProvider`]); [`FileWordProvider`] serves offline play
//! from a word file or the embedded bank. [`WordFetcher`] runs the request on
//! a background thread so the interface stays responsive, tagging every
//! request with a round token so a slow response from a superseded round can
//! never overwrite a newer one.

use crate::debug_log;
use crate::wordbank;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use thiserror::Error;

/// Endpoint returning a JSON array with one random lowercase word.
pub const DEFAULT_API_URL: &str = "https://random-word-api.herokuapp.com/word";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("word request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("word service returned an unusable payload")]
    MalformedPayload,
    #[error("failed to read word file: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list is empty")]
    EmptyWordList,
}

pub trait WordProvider: Send + Sync {
    /// Produce one lowercase alphabetic word for a new round.
    fn fetch_word(&self) -> Result<String, ProviderError>;
}

/// Extract and normalize the word from the API payload: a JSON array whose
/// first element is the word. Anything else is treated as malformed, as is a
/// word that is empty or non-alphabetic after lowercasing.
pub fn word_from_payload(payload: &serde_json::Value) -> Result<String, ProviderError> {
    let word = payload
        .as_array()
        .and_then(|items| items.first())
        .and_then(|item| item.as_str())
        .ok_or(ProviderError::MalformedPayload)?;

    let word = word.to_lowercase();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ProviderError::MalformedPayload);
    }
    Ok(word)
}

pub struct HttpWordProvider {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpWordProvider {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }
}

impl WordProvider for HttpWordProvider {
    fn fetch_word(&self) -> Result<String, ProviderError> {
        let payload: serde_json::Value = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json()?;
        word_from_payload(&payload)
    }
}

/// Offline word source: picks a random word from a fixed list.
pub struct FileWordProvider {
    words: Vec<String>,
}

impl FileWordProvider {
    pub fn from_file(path: &str) -> Result<Self, ProviderError> {
        let words = wordbank::load_words_from_file(path)?;
        if words.is_empty() {
            return Err(ProviderError::EmptyWordList);
        }
        Ok(Self { words })
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self {
            words: wordbank::load_words_from_str(wordbank::EMBEDDED_WORDBANK),
        }
    }
}

impl WordProvider for FileWordProvider {
    fn fetch_word(&self) -> Result<String, ProviderError> {
        wordbank::random_word(&self.words)
            .cloned()
            .ok_or(ProviderError::EmptyWordList)
    }
}

struct FetchResult {
    round: u64,
    word: Result<String, ProviderError>,
}

/// Runs word requests off the event loop, one outstanding request per round.
pub struct WordFetcher {
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
}

impl WordFetcher {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Start fetching a word for the round identified by `round`.
    pub fn request(&self, provider: Arc<dyn WordProvider>, round: u64) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let word = provider.fetch_word();
            // The receiver may be gone if the game already exited.
            let _ = tx.send(FetchResult { round, word });
        });
    }

    /// Non-blocking check for a finished fetch. Results carrying a round
    /// token other than `current_round` belong to a superseded round and are
    /// discarded.
    pub fn poll(&self, current_round: u64) -> Option<Result<String, ProviderError>> {
        while let Ok(result) = self.rx.try_recv() {
            if result.round == current_round {
                return Some(result.word);
            }
            debug_log!(
                "poll() - discarding stale fetch result for round {}",
                result.round
            );
        }
        None
    }
}

impl Default for WordFetcher {
    fn default() -> Self {
        Self::new()
    }
}
