pub mod actions;
pub mod submission_flow;

pub use actions::{
    allowed_actions, can_approve, can_revise, compose_review_comment, review_status_text, Action,
};
pub use submission_flow::{ReviseRequest, SubmissionWorkflow};
