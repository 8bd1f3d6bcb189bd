//! Document detail view loader
//!
//! Loads everything a detail page needs (metadata, file versions, reviews,
//! per-viewer access facts) concurrently. Each view gets its own
//! cancellation token: navigating away cancels the in-flight loads so a
//! late response can never mutate a discarded screen's state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clients::{DocumentClient, ReaderClient};
use crate::error::{AppError, AppResult};
use crate::models::{AccessInfo, DocumentFile, DocumentInfo, Review};

/// Everything the detail page shows
#[derive(Debug)]
pub struct DocumentView {
    pub document: DocumentInfo,
    /// Newest version first
    pub files: Vec<DocumentFile>,
    pub reviews: Vec<Review>,
    pub access: AccessInfo,
}

pub struct DocumentViewLoader {
    documents: Arc<DocumentClient>,
    reader: Arc<ReaderClient>,
}

impl DocumentViewLoader {
    pub fn new(documents: Arc<DocumentClient>, reader: Arc<ReaderClient>) -> Self {
        Self { documents, reader }
    }

    /// Load the full detail view. The four requests run concurrently; if
    /// `cancel` fires first, the whole load is abandoned.
    pub async fn load(
        &self,
        document_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<DocumentView> {
        let loads = async {
            let (document, files, reviews, access) = futures::join!(
                self.documents.get(document_id),
                self.documents.files(document_id),
                self.documents.reviews(document_id),
                self.reader.access_info(document_id),
            );
            Ok(DocumentView {
                document: document?,
                files: files?,
                // Reviews are decoration; a failed reviews call does not sink
                // the whole page.
                reviews: reviews.unwrap_or_default(),
                access: access?,
            })
        };

        tokio::select! {
            result = loads => result,
            _ = cancel.cancelled() => {
                debug!("detail view load for {document_id} cancelled");
                Err(AppError::Other(format!(
                    "view for document {document_id} was discarded"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiClient;
    use crate::config::Config;
    use crate::session::SessionHandle;

    #[tokio::test]
    async fn test_cancelled_view_abandons_inflight_loads() {
        // Point at a black-hole address; cancellation must win before any
        // request resolves, and the error must not be a network error.
        let config = Config {
            api_base_url: "http://192.0.2.1:9/api".to_string(),
            request_timeout_secs: 60,
            ..Config::default()
        };
        let api = Arc::new(ApiClient::new(&config, SessionHandle::in_memory()).unwrap());
        let loader = DocumentViewLoader::new(
            Arc::new(DocumentClient::new(api.clone())),
            Arc::new(ReaderClient::new(api)),
        );

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = loader.load("doc-1", &cancel).await.unwrap_err();
        assert!(matches!(err, AppError::Other(_)), "got {err:?}");
    }
}
