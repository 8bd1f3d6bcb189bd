pub mod document;
pub mod submission;
pub mod user;

pub use document::{AccessInfo, Author, DocumentFile, DocumentInfo, Review};
pub use submission::{
    HistoryAction, HistoryEntry, SubmissionDraft, SubmissionInfo, SubmissionStatus,
};
pub use user::{ApiEnvelope, AuthPayload, LoginRequest, RegisterRequest, Role, User};
