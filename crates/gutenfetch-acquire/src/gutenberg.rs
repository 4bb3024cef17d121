use crate::catalog::{Catalog, PLAIN_TEXT_LABEL};
use crate::error::FetchError;
use crate::output;
use crate::BookDownloader;
use futures::TryStreamExt;
use gutenfetch_model::{output_path, BookId, FetchOutcome, TextLink};
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use tokio_util::io::StreamReader;

/// Download the plain-text rendition of a Gutenberg work.
///
/// Fetches the work's catalog page, looks for the "Plain Text UTF-8" link,
/// and streams the linked file to `{save_dir}/{id}.txt`, overwriting any
/// previous copy.
///
/// A page without that link is not an error: nothing is written and
/// `FetchOutcome::NoPlainText` is returned.
pub async fn fetch_and_save(
    catalog: &Catalog,
    id: BookId,
    save_dir: &Path,
) -> Result<FetchOutcome, FetchError> {
    let page_url = catalog.book_url(id);
    tracing::info!(id = %id, url = %page_url, "Fetching catalog page");
    let html = fetch_page(catalog, &page_url).await?;
    tracing::debug!(bytes = html.len(), "Received HTML");

    let Some(link) = find_text_link(&html, &catalog.base_url) else {
        tracing::info!(id = %id, "Book has no plain-text rendition available");
        return Ok(FetchOutcome::NoPlainText { id });
    };
    tracing::debug!(id = %id, url = %link, "Found plain-text link");

    output::ensure_dir(save_dir).await?;
    let path = output_path(save_dir, id);
    let bytes = download(catalog, &link, &path).await?;
    tracing::info!(id = %id, path = %path.display(), bytes, "Book downloaded");

    Ok(FetchOutcome::saved(id, link, path, bytes))
}

async fn fetch_page(catalog: &Catalog, url: &str) -> Result<String, FetchError> {
    let client = catalog.page_client()?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Page {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::PageStatus {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Page {
        url: url.to_string(),
        source,
    })
}

/// Stream the body at `link` into `path`. The file is only opened once the
/// server has answered 200.
async fn download(catalog: &Catalog, link: &TextLink, path: &Path) -> Result<u64, FetchError> {
    let client = catalog.download_client()?;
    let url = link.as_str();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Download {
            url: url.to_string(),
            status,
        });
    }
    tracing::debug!(url = %url, length = ?response.content_length(), "Streaming body");

    let stream = response.bytes_stream().map_err(std::io::Error::other);
    let mut reader = StreamReader::new(stream);

    output::write_chunked(&mut reader, path, url).await
}

/// Find the plain-text rendition link on a catalog page.
///
/// Returns the first `a[href]` (document order) whose visible text is
/// exactly "Plain Text UTF-8", resolved against `base_url`.
pub fn find_text_link(html: &str, base_url: &str) -> Option<TextLink> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&anchor_sel)
        .find(|anchor| rendered_text(anchor) == PLAIN_TEXT_LABEL)
        .and_then(|anchor| anchor.value().attr("href"))
        .map(|href| TextLink::resolve(base_url, href))
}

/// Text of an element as a browser would show it: descendant text joined,
/// whitespace runs collapsed, ends trimmed.
fn rendered_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Downloads Gutenberg books into a fixed save directory.
#[derive(Debug, Clone)]
pub struct GutenbergDownloader {
    catalog: Catalog,
    save_dir: PathBuf,
}

impl GutenbergDownloader {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self::with_catalog(Catalog::default(), save_dir)
    }

    pub fn with_catalog(catalog: Catalog, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            save_dir: save_dir.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }
}

impl BookDownloader for GutenbergDownloader {
    async fn download_book(&self, id: BookId) -> Result<FetchOutcome, FetchError> {
        fetch_and_save(&self.catalog, id, &self.save_dir).await
    }
}
