//! Submission API client
//!
//! Thin wrappers over the `/Submission` endpoints. No permission logic here;
//! that lives in the workflow layer.

use std::sync::Arc;

use serde_json::json;

use crate::error::AppResult;
use crate::models::{HistoryEntry, SubmissionInfo};

pub struct SubmissionClient {
    api: Arc<crate::clients::ApiClient>,
}

impl SubmissionClient {
    pub fn new(api: Arc<crate::clients::ApiClient>) -> Self {
        Self { api }
    }

    /// Create a submission for an already-uploaded document. Returns the new
    /// submission id.
    pub async fn create(&self, document_id: &str, collection_id: &str) -> AppResult<String> {
        self.api
            .post_json(
                "Submission/create",
                &json!({
                    "documentId": document_id,
                    "collectionId": collection_id,
                }),
            )
            .await
    }

    pub async fn info(&self, submission_id: &str) -> AppResult<SubmissionInfo> {
        self.api
            .get_json(&format!("Submission/info/{submission_id}"))
            .await
    }

    /// Ordered, append-only action history
    pub async fn history(&self, submission_id: &str) -> AppResult<Vec<HistoryEntry>> {
        self.api
            .get_json(&format!("Submission/{submission_id}/history"))
            .await
    }

    /// Assign a reviewer (query-string style endpoint)
    pub async fn assign_reviewer(&self, submission_id: &str, reviewer_id: &str) -> AppResult<()> {
        self.api
            .post_with_query(
                "Submission/assign-reviewer",
                &[("submissionId", submission_id), ("reviewerId", reviewer_id)],
            )
            .await
    }

    /// Claim the review slot before opening the review form
    pub async fn prereview(&self, submission_id: &str, reviewer_id: &str) -> AppResult<()> {
        self.api
            .post_with_query(
                "Submission/prereview",
                &[("submissionId", submission_id), ("reviewerId", reviewer_id)],
            )
            .await
    }

    /// Record a review verdict comment
    pub async fn review(&self, submission_id: &str, comment: &str) -> AppResult<()> {
        self.api
            .post_unit(
                "Submission/review",
                &json!({
                    "submissionId": submission_id,
                    "comment": comment,
                }),
            )
            .await
    }

    /// Librarian's final accept/reject pass
    pub async fn final_review(&self, submission_id: &str) -> AppResult<()> {
        self.api
            .post_with_query("Submission/finalreview", &[("id", submission_id)])
            .await
    }
}
