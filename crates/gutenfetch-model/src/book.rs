use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Numeric identifier of a work in the Gutenberg catalog (e.g., 1342).
///
/// Any integer is accepted and passed through to the catalog URL as is;
/// ids the catalog doesn't know surface as a page error, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid book id '{0}': expected an integer")]
pub struct ParseBookIdError(String);

impl BookId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for BookId {
    type Err = ParseBookIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(BookId)
            .map_err(|_| ParseBookIdError(s.to_string()))
    }
}

/// Absolute URL of a work's plain-text rendition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextLink(String);

impl TextLink {
    /// Resolve an anchor's `href` against the catalog base URL.
    ///
    /// Host-relative hrefs (`/ebooks/1342.txt.utf-8`) are prefixed with the
    /// base; hrefs that are already absolute are kept as they are.
    pub fn resolve(base_url: &str, href: &str) -> Self {
        let href = href.trim();
        if href.starts_with("http://") || href.starts_with("https://") {
            return Self(href.to_string());
        }
        let base = base_url.trim_end_matches('/');
        if href.starts_with('/') {
            Self(format!("{base}{href}"))
        } else {
            Self(format!("{base}/{href}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path the plain text of `id` is saved to: `{save_dir}/{id}.txt`.
pub fn output_path(save_dir: impl AsRef<Path>, id: BookId) -> PathBuf {
    save_dir.as_ref().join(format!("{id}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_id() {
        assert_eq!("1342".parse::<BookId>(), Ok(BookId(1342)));
        assert_eq!(" 84 ".parse::<BookId>(), Ok(BookId(84)));
        assert_eq!("-1".parse::<BookId>(), Ok(BookId(-1)));
        assert!("pride".parse::<BookId>().is_err());
    }

    #[test]
    fn test_resolve_host_relative_link() {
        let link = TextLink::resolve("https://www.gutenberg.org", "/ebooks/1342.txt.utf-8");
        assert_eq!(link.as_str(), "https://www.gutenberg.org/ebooks/1342.txt.utf-8");

        // Trailing slash on the base doesn't double up
        let link = TextLink::resolve("https://www.gutenberg.org/", "/ebooks/1342.txt.utf-8");
        assert_eq!(link.as_str(), "https://www.gutenberg.org/ebooks/1342.txt.utf-8");
    }

    #[test]
    fn test_resolve_absolute_link() {
        let link = TextLink::resolve(
            "https://www.gutenberg.org",
            "https://www.gutenberg.org/cache/epub/84/pg84.txt",
        );
        assert_eq!(link.as_str(), "https://www.gutenberg.org/cache/epub/84/pg84.txt");
    }

    #[test]
    fn test_output_path() {
        let path = output_path("books/classics", BookId(1342));
        assert_eq!(path, PathBuf::from("books/classics/1342.txt"));

        let path = output_path("books", BookId(-1));
        assert_eq!(path, PathBuf::from("books/-1.txt"));
    }
}
