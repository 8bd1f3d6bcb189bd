//! Submission workflow orchestration
//!
//! Submit → AssignReviewer → Review → FinalReview, as driven from the
//! client side. Every operation here is:
//!   1. validated locally (missing input blocks the call entirely),
//!   2. permission-gated against the last reported status,
//!   3. a single network round-trip; on failure nothing local mutates and
//!      the server message is surfaced verbatim; retry is the user's call.
//! After a confirmed mutation the caller refreshes history instead of
//! patching it optimistically.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::clients::SubmissionClient;
use crate::error::{AppError, AppResult, BusinessError, ValidationError};
use crate::models::{HistoryEntry, SubmissionDraft, SubmissionInfo};
use crate::session::SessionHandle;
use crate::workflow::actions;

/// Fields a submitter may change when revising. The revision comment is
/// mandatory and becomes part of the document's change history.
#[derive(Debug, Clone, Default)]
pub struct ReviseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub collection_id: Option<String>,
    pub revision_comment: String,
}

pub struct SubmissionWorkflow {
    client: Arc<SubmissionClient>,
    api: Arc<crate::clients::ApiClient>,
    session: SessionHandle,
}

impl SubmissionWorkflow {
    pub fn new(
        client: Arc<SubmissionClient>,
        api: Arc<crate::clients::ApiClient>,
        session: SessionHandle,
    ) -> Self {
        Self {
            client,
            api,
            session,
        }
    }

    /// Create a submission for a draft. The mandatory PDF file is checked
    /// here, before any network traffic.
    pub async fn submit(&self, draft: &SubmissionDraft) -> AppResult<String> {
        if draft.file_path.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingFile.into());
        }
        if draft.collection_id.is_empty() {
            return Err(ValidationError::MissingField {
                field: "collection_id",
            }
            .into());
        }
        let submission_id = self
            .client
            .create(&draft.document_id, &draft.collection_id)
            .await?;
        info!("✓ submission {submission_id} created for document {}", draft.document_id);
        Ok(submission_id)
    }

    /// Revise the submitted document. Allowed only for the original
    /// submitter while the submission is not terminal, and only with a
    /// non-empty revision comment.
    pub async fn revise(
        &self,
        submission: &SubmissionInfo,
        request: &ReviseRequest,
    ) -> AppResult<()> {
        if request.revision_comment.trim().is_empty() {
            return Err(ValidationError::MissingRevisionComment.into());
        }
        let actor_id = self.actor_id("revise a submission")?;
        if submission.status.is_final() {
            return Err(BusinessError::SubmissionFinalized {
                submission_id: submission.id.clone(),
                status: submission.status.to_string(),
            }
            .into());
        }
        if !actions::can_revise(&submission.status, &submission.submitter_id, &actor_id) {
            return Err(BusinessError::NotSubmitter {
                submission_id: submission.id.clone(),
            }
            .into());
        }

        let body = json!({
            "title": request.title,
            "description": request.description,
            "collectionId": request.collection_id,
            "revisionComment": request.revision_comment,
        });
        self.api
            .put_unit(&format!("Documents/update/{}", submission.id), &body)
            .await?;
        info!("✓ submission {} revised", submission.id);
        Ok(())
    }

    /// Assign a reviewer (admin/librarian). No optimistic update: the caller
    /// refreshes the history after the server confirms.
    pub async fn assign_reviewer(&self, submission_id: &str, reviewer_id: &str) -> AppResult<()> {
        if reviewer_id.is_empty() {
            return Err(ValidationError::MissingReviewer.into());
        }
        self.client.assign_reviewer(submission_id, reviewer_id).await?;
        info!("✓ reviewer {reviewer_id} assigned to submission {submission_id}");
        Ok(())
    }

    /// Claim the review slot before opening the review form.
    pub async fn prereview(&self, submission_id: &str) -> AppResult<()> {
        let reviewer_id = self.actor_id("claim a review")?;
        self.client.prereview(submission_id, &reviewer_id).await
    }

    /// File a review verdict. The history comment is `"decision: note"`,
    /// or just the decision when the note is empty.
    pub async fn review(&self, submission_id: &str, decision: &str, note: &str) -> AppResult<()> {
        if decision.trim().is_empty() {
            return Err(ValidationError::MissingDecision.into());
        }
        let comment = actions::compose_review_comment(decision, note);
        self.client.review(submission_id, &comment).await?;
        info!("✓ review recorded for submission {submission_id}");
        Ok(())
    }

    /// Librarian's final accept/reject pass; refused locally once the
    /// submission is terminal.
    pub async fn final_review(&self, submission: &SubmissionInfo) -> AppResult<()> {
        if !actions::can_approve(&submission.status) {
            return Err(BusinessError::SubmissionFinalized {
                submission_id: submission.id.clone(),
                status: submission.status.to_string(),
            }
            .into());
        }
        self.client.final_review(&submission.id).await?;
        info!("✓ final review sent for submission {}", submission.id);
        Ok(())
    }

    /// Re-fetch the reported state; the only way local views ever change.
    pub async fn refresh(
        &self,
        submission_id: &str,
    ) -> AppResult<(SubmissionInfo, Vec<HistoryEntry>)> {
        let (info, history) = futures::join!(
            self.client.info(submission_id),
            self.client.history(submission_id)
        );
        Ok((info?, history?))
    }

    fn actor_id(&self, action: &str) -> AppResult<String> {
        self.session
            .current_user()
            .map(|u| u.id)
            .ok_or_else(|| AppError::login_required(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Role, SubmissionStatus, User};
    use crate::session::Session;
    use tokio_test::block_on;

    // All tests here hit the local validation layer, which rejects before
    // any request is built, so no backend is needed.

    fn workflow_with_session(session: SessionHandle) -> SubmissionWorkflow {
        let api = Arc::new(
            crate::clients::ApiClient::new(&Config::default(), session.clone()).unwrap(),
        );
        let client = Arc::new(SubmissionClient::new(api.clone()));
        SubmissionWorkflow::new(client, api, session)
    }

    fn logged_in_as(user_id: &str) -> SessionHandle {
        let session = SessionHandle::in_memory();
        session.set(Session {
            token: "tok".to_string(),
            user: User {
                id: user_id.to_string(),
                name: "Tran Thi B".to_string(),
                email: "b@uni.edu.vn".to_string(),
                phone_number: String::new(),
                class_name: String::new(),
                role: Role::Member,
            },
        });
        session
    }

    fn submission(status: SubmissionStatus, submitter_id: &str) -> SubmissionInfo {
        SubmissionInfo {
            id: "sub-1".to_string(),
            document_id: "doc-1".to_string(),
            collection_id: None,
            status,
            submitter_id: submitter_id.to_string(),
            current_step: None,
        }
    }

    #[test]
    fn test_submit_requires_file() {
        let workflow = workflow_with_session(logged_in_as("6"));
        let draft = SubmissionDraft {
            document_id: "doc-1".to_string(),
            collection_id: "col-1".to_string(),
            file_path: None,
        };
        let err = block_on(workflow.submit(&draft)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingFile)
        ));
    }

    #[test]
    fn test_revise_requires_comment() {
        let workflow = workflow_with_session(logged_in_as("6"));
        let info = submission(SubmissionStatus::Submitted, "6");
        let request = ReviseRequest {
            revision_comment: "   ".to_string(),
            ..Default::default()
        };
        let err = block_on(workflow.revise(&info, &request)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingRevisionComment)
        ));
    }

    #[test]
    fn test_revise_rejected_for_non_submitter() {
        let workflow = workflow_with_session(logged_in_as("other-user"));
        let info = submission(SubmissionStatus::Submitted, "6");
        let request = ReviseRequest {
            revision_comment: "fixed chapter 2".to_string(),
            ..Default::default()
        };
        let err = block_on(workflow.revise(&info, &request)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::NotSubmitter { .. })
        ));
    }

    #[test]
    fn test_revise_rejected_once_terminal() {
        let workflow = workflow_with_session(logged_in_as("6"));
        let info = submission(SubmissionStatus::Accept, "6");
        let request = ReviseRequest {
            revision_comment: "too late".to_string(),
            ..Default::default()
        };
        let err = block_on(workflow.revise(&info, &request)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::SubmissionFinalized { .. })
        ));
    }

    #[test]
    fn test_review_requires_decision() {
        let workflow = workflow_with_session(logged_in_as("6"));
        let err = block_on(workflow.review("sub-1", "", "note")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingDecision)
        ));
    }

    #[test]
    fn test_final_review_rejected_once_terminal() {
        let workflow = workflow_with_session(logged_in_as("6"));
        let info = submission(SubmissionStatus::Reject, "6");
        let err = block_on(workflow.final_review(&info)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::SubmissionFinalized { .. })
        ));
    }

    #[test]
    fn test_prereview_requires_login() {
        let workflow = workflow_with_session(SessionHandle::in_memory());
        let err = block_on(workflow.prereview("sub-1")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Auth(crate::error::AuthError::LoginRequired { .. })
        ));
    }
}
