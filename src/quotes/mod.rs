use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Maximum number of quotes shown for a single search
pub const MAX_RESULTS: usize = 3;

/// A single quotation record from the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub topic: String,
    pub text: String,
    pub author: String,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed dataset '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The quote collection plus its derived topic index.
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
    topics: Vec<String>,
}

impl QuoteBook {
    pub fn new(quotes: Vec<Quote>) -> Self {
        // Unique topics in first-seen order (suggestion display order)
        let mut topics: Vec<String> = Vec::new();
        for quote in &quotes {
            if !topics.iter().any(|t| t == &quote.topic) {
                topics.push(quote.topic.clone());
            }
        }
        Self { quotes, topics }
    }

    /// Load the dataset bundled into the binary
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(include_str!("quotes.json")).map_err(|source| DatasetError::Parse {
            path: "<bundled>".to_string(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let quotes: Vec<Quote> = serde_json::from_str(content)?;
        Ok(Self::new(quotes))
    }

    /// Load a dataset from a JSON file (the --dataset flag)
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| DatasetError::Parse {
            path: display,
            source,
        })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Filter quotes whose topic contains the query as a substring.
    ///
    /// The query is trimmed and case-folded first; an empty or
    /// whitespace-only query matches nothing. Collection order is
    /// preserved and the result is capped at [`MAX_RESULTS`].
    pub fn filter_by_topic(&self, query: &str) -> Vec<&Quote> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.quotes
            .iter()
            .filter(|q| q.topic.to_lowercase().contains(&needle))
            .take(MAX_RESULTS)
            .collect()
    }

    /// Filter by exact topic equality (no trimming, no case folding).
    /// Used when a suggestion is selected and the canonical topic
    /// string is already in hand.
    pub fn filter_by_exact_topic(&self, topic: &str) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| q.topic == topic)
            .take(MAX_RESULTS)
            .collect()
    }

    /// Topics whose case-folded form contains the case-folded partial
    /// query. The partial query is deliberately not trimmed. An empty
    /// partial query yields no suggestions.
    pub fn suggest_topics(&self, partial: &str) -> Vec<&str> {
        if partial.is_empty() {
            return Vec::new();
        }
        let needle = partial.to_lowercase();
        self.topics
            .iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .map(|t| t.as_str())
            .collect()
    }
}
