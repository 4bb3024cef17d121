use crate::error::FetchError;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

/// Size of each read/write step when copying a body to disk.
pub const CHUNK_SIZE: usize = 4096;

/// Create the save directory and any missing parents.
///
/// An existing directory is left as it is.
pub async fn ensure_dir(dir: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(dir).await.map_err(FetchError::io(dir))?;
    tracing::debug!(path = %dir.display(), "Save directory ready");
    Ok(())
}

/// Copy `reader` into a fresh file at `path`, `CHUNK_SIZE` bytes at a time.
///
/// An existing file is truncated. Read failures are reported against
/// `source_url`, write failures against `path`. Returns the number of bytes
/// written.
pub async fn write_chunked<R>(reader: &mut R, path: &Path, source_url: &str) -> Result<u64, FetchError>
where
    R: AsyncRead + Unpin,
{
    let mut file = fs::File::create(path).await.map_err(FetchError::io(path))?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = reader.read(&mut buf).await.map_err(|source| FetchError::Body {
            url: source_url.to_string(),
            source,
        })?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).await.map_err(FetchError::io(path))?;
        written += n as u64;
    }

    // tokio buffers writes internally; push them out before the handle drops
    file.flush().await.map_err(FetchError::io(path))?;
    tracing::debug!(path = %path.display(), bytes = written, "Wrote body to disk");

    Ok(written)
}
