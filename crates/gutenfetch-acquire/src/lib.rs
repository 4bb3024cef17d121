use gutenfetch_model::{BookId, FetchOutcome};

pub mod catalog;
pub mod error;
pub mod gutenberg;
pub mod output;

pub use catalog::Catalog;
pub use error::FetchError;
pub use gutenberg::{fetch_and_save, find_text_link, GutenbergDownloader};

/// Something that can fetch a book by id and save it locally.
#[allow(async_fn_in_trait)]
pub trait BookDownloader {
    async fn download_book(&self, id: BookId) -> Result<FetchOutcome, FetchError>;
}
