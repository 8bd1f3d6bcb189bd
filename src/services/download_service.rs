//! Download-to-disk capability
//!
//! Fetches the binary content of a document file version and saves it under
//! the state directory as `{sanitized title}_v{version}.pdf`. Downloads are
//! an authenticated-only feature; the stats-logging call is fire-and-forget.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{info, warn};

use crate::clients::DocumentClient;
use crate::error::{AppError, AppResult, BusinessError};
use crate::models::{DocumentFile, DocumentInfo};
use crate::session::SessionHandle;

pub struct DownloadService {
    client: Arc<DocumentClient>,
    session: SessionHandle,
    download_dir: PathBuf,
}

impl DownloadService {
    pub fn new(
        client: Arc<DocumentClient>,
        session: SessionHandle,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            session,
            download_dir: download_dir.into(),
        }
    }

    /// Download the newest file version of `document` and save it locally.
    /// Returns the path written.
    pub async fn download_latest(&self, document: &DocumentInfo) -> AppResult<PathBuf> {
        if !self.session.is_authenticated() {
            return Err(AppError::login_required("download a document"));
        }
        let files = self.client.files(&document.id).await?;
        let latest = files.first().ok_or_else(|| BusinessError::NoFile {
            document_id: document.id.clone(),
        })?;
        self.download_file(document, latest).await
    }

    /// Download one specific file version.
    pub async fn download_file(
        &self,
        document: &DocumentInfo,
        file: &DocumentFile,
    ) -> AppResult<PathBuf> {
        if !self.session.is_authenticated() {
            return Err(AppError::login_required("download a document"));
        }
        let bytes = self.client.download_file(&file.id).await?;

        let filename = download_filename(&document.title, file.version);
        let path = self.download_dir.join(&filename);
        write_bytes(&path, &bytes).await?;
        info!("✓ saved {} ({} bytes)", path.display(), bytes.len());

        // Stats logging never blocks or fails the download.
        let client = self.client.clone();
        let document_id = document.id.clone();
        tokio::spawn(async move {
            if let Err(e) = client.log_download(&document_id).await {
                warn!("download log for {document_id} failed: {e}");
            }
        });

        Ok(path)
    }
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());

/// `{sanitized title}_v{version}.pdf`: whitespace runs become `_`, anything
/// that is not alphanumeric/`_`/`-` is dropped.
pub fn download_filename(title: &str, version: u32) -> String {
    let spaced = WHITESPACE.replace_all(title.trim(), "_");
    let sanitized = INVALID_CHARS.replace_all(&spaced, "");
    let base = if sanitized.is_empty() {
        "document"
    } else {
        sanitized.as_ref()
    };
    format!("{base}_v{version}.pdf")
}

async fn write_bytes(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
