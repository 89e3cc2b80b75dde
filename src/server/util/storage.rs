use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{
    fs,
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
};
use uuid::Uuid;

use crate::server::error::{domain::DomainError, Error};

pub static DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

const CHUNK_SIZE: usize = 8 * 1024;

/// A file written by [`FileStore::save`]
#[derive(Debug)]
pub struct StoredFile {
    pub path: String,
    pub size: u64,
}

/// Upload directory with a per-file size limit.
///
/// Files are named `<prefix>_<uuid>_<original name>` so that repeated uploads of the same name
/// never overwrite each other.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
    max_size: u64,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            dir: dir.into(),
            max_size,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Streams `reader` into a new file in the upload directory.
    ///
    /// If reading or writing fails, or the content grows past the size limit, whatever was
    /// written so far is removed before the error is returned.
    ///
    /// # Returns
    /// - `Ok(StoredFile)` - Path and size of the written file
    /// - `Err(DomainError::InvalidArgument)` - Content exceeds the size limit
    /// - `Err(Error::IoError)` - The directory, file, or reader failed
    pub async fn save<R>(&self, prefix: &str, file_name: &str, reader: R) -> Result<StoredFile, Error>
    where
        R: AsyncRead + Unpin,
    {
        fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(format!(
            "{}_{}_{}",
            prefix,
            Uuid::new_v4().simple(),
            sanitize_file_name(file_name)
        ));

        match self.write(&path, reader).await {
            Ok(size) => {
                tracing::debug!("Stored {} bytes at {}", size, path.display());

                Ok(StoredFile {
                    path: path.to_string_lossy().into_owned(),
                    size,
                })
            }
            Err(e) => {
                discard(&path).await;

                Err(e)
            }
        }
    }

    async fn write<R>(&self, path: &Path, mut reader: R) -> Result<u64, Error>
    where
        R: AsyncRead + Unpin,
    {
        let mut file = fs::File::create(path).await?;
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut size = 0u64;

        loop {
            let read = reader.read(&mut buffer).await?;
            if read == 0 {
                break;
            }

            size += read as u64;
            if size > self.max_size {
                return Err(DomainError::invalid_argument(format!(
                    "file exceeds the upload limit of {} bytes",
                    self.max_size
                ))
                .into());
            }

            file.write_all(&buffer[..read]).await?;
        }

        file.flush().await?;

        Ok(size)
    }
}

/// Removes a stored file.
///
/// Failures are logged at warn and swallowed; a file that is already gone is not a failure.
/// Returns whether a file was removed.
pub async fn discard(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();

    match fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!("Failed to remove stored file {}: {}", path.display(), e);

            false
        }
    }
}

/// Removes each stored file, see [`discard`]
pub async fn discard_all(paths: Vec<String>) {
    for path in paths {
        discard(&path).await;
    }
}

/// Original file name of a stored file, without the `<prefix>_<uuid>_` added by [`FileStore`]
pub fn original_file_name(path: &str) -> String {
    let stored = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let parts: Vec<&str> = stored.split('_').collect();
    let uuid_at = parts
        .iter()
        .position(|part| part.len() == 32 && part.chars().all(|c| c.is_ascii_hexdigit()));

    match uuid_at {
        Some(index) if index + 1 < parts.len() => parts[index + 1..].join("_"),
        _ => stored.to_string(),
    }
}

/// Classifies a file by its extension, e.g. `notes.PDF` is `pdf`
pub fn file_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "pdf",
        "doc" | "docx" => "document",
        "ppt" | "pptx" => "presentation",
        "xls" | "xlsx" => "spreadsheet",
        "mp4" | "avi" | "mov" => "video",
        "mp3" | "wav" => "audio",
        "jpg" | "jpeg" | "png" | "gif" => "image",
        "zip" | "rar" => "archive",
        _ => "other",
    }
}

/// Keeps the last path component and replaces anything outside `[A-Za-z0-9._-]`
fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}
