use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch catalog page {url}: {source}")]
    Page {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for catalog page {url}")]
    PageStatus { url: String, status: StatusCode },

    #[error("failed to request {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}: could not download the book")]
    Download { url: String, status: StatusCode },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// HTTP status carried by the error, if the remote answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::PageStatus { status, .. } | Self::Download { status, .. } => Some(*status),
            Self::Page { source, .. } | Self::Request { source, .. } | Self::Client(source) => {
                source.status()
            }
            _ => None,
        }
    }

    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
