use crate::book::{BookId, TextLink};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a single download call produced.
///
/// `NoPlainText` is a normal outcome, not an error: the catalog page exists
/// but links no plain-text rendition, and nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    Saved {
        id: BookId,
        url: TextLink,
        path: PathBuf,
        bytes: u64,
        /// RFC 3339 UTC timestamp of when the download finished.
        fetched_at: String,
    },
    NoPlainText { id: BookId },
}

impl FetchOutcome {
    pub fn saved(id: BookId, url: TextLink, path: PathBuf, bytes: u64) -> Self {
        Self::Saved {
            id,
            url,
            path,
            bytes,
            fetched_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn id(&self) -> BookId {
        match self {
            Self::Saved { id, .. } | Self::NoPlainText { id } => *id,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_plain_text_json() {
        let outcome = FetchOutcome::NoPlainText { id: BookId(999999) };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "no_plain_text", "id": 999999 }));
        assert!(!outcome.is_saved());
    }

    #[test]
    fn test_saved_json() {
        let outcome = FetchOutcome::saved(
            BookId(1342),
            TextLink::resolve("https://www.gutenberg.org", "/ebooks/1342.txt.utf-8"),
            PathBuf::from("books/1342.txt"),
            16,
        );
        assert_eq!(outcome.id(), BookId(1342));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "saved");
        assert_eq!(json["url"], "https://www.gutenberg.org/ebooks/1342.txt.utf-8");
        assert_eq!(json["path"], "books/1342.txt");
        assert_eq!(json["bytes"], 16);
        assert!(chrono::DateTime::parse_from_rfc3339(json["fetched_at"].as_str().unwrap()).is_ok());
    }
}
