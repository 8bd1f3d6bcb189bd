//! Document reader API client
//!
//! Wraps the `/DocumentReader` endpoints: per-viewer access facts and
//! reading-progress reporting.

use std::sync::Arc;

use serde_json::json;

use crate::error::AppResult;
use crate::models::AccessInfo;

pub struct ReaderClient {
    api: Arc<crate::clients::ApiClient>,
}

impl ReaderClient {
    pub fn new(api: Arc<crate::clients::ApiClient>) -> Self {
        Self { api }
    }

    /// Access facts for (document, current viewer)
    pub async fn access_info(&self, document_id: &str) -> AppResult<AccessInfo> {
        self.api
            .get_json(&format!("DocumentReader/{document_id}/access-info"))
            .await
    }

    /// Report the page the viewer is on (0-indexed)
    pub async fn update_progress(&self, document_id: &str, current_page: usize) -> AppResult<()> {
        self.api
            .post_unit(
                &format!("DocumentReader/{document_id}/update-progress"),
                &json!({ "currentPage": current_page }),
            )
            .await
    }
}
