//! Document API client
//!
//! Wraps the `/Documents` endpoints: metadata, file versions, reviews,
//! search, downloads.

use std::sync::Arc;

use serde_json::json;

use crate::error::AppResult;
use crate::models::{DocumentFile, DocumentInfo, Review};

pub struct DocumentClient {
    api: Arc<crate::clients::ApiClient>,
}

impl DocumentClient {
    pub fn new(api: Arc<crate::clients::ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get(&self, document_id: &str) -> AppResult<DocumentInfo> {
        self.api.get_json(&format!("Documents/{document_id}")).await
    }

    /// File versions of a document, newest version first.
    pub async fn files(&self, document_id: &str) -> AppResult<Vec<DocumentFile>> {
        let mut files: Vec<DocumentFile> = self
            .api
            .get_json(&format!("Documents/{document_id}/files"))
            .await?;
        files.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(files)
    }

    pub async fn reviews(&self, document_id: &str) -> AppResult<Vec<Review>> {
        self.api
            .get_json(&format!("Documents/{document_id}/reviews"))
            .await
    }

    pub async fn add_review(
        &self,
        document_id: &str,
        rating: u8,
        content: &str,
    ) -> AppResult<()> {
        self.api
            .post_unit(
                &format!("Documents/{document_id}/reviews"),
                &json!({ "rating": rating, "content": content }),
            )
            .await
    }

    pub async fn search(&self, keyword: &str) -> AppResult<Vec<DocumentInfo>> {
        self.api
            .get_json_with_query("Documents/search", &[("keyword", keyword)])
            .await
    }

    /// Raw bytes of a specific file version
    pub async fn download_file(&self, file_id: &str) -> AppResult<Vec<u8>> {
        self.api
            .get_bytes(&format!("Documents/files/{file_id}/download"))
            .await
    }

    /// Record a download in the backend stats. Failures are the caller's to
    /// swallow; the download itself already succeeded.
    pub async fn log_download(&self, document_id: &str) -> AppResult<()> {
        self.api
            .post_unit("Downloads", &json!({ "documentId": document_id }))
            .await
    }
}
