use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Submission lifecycle status, as reported by the backend.
///
/// The backend owns the state machine; the client only parses the reported
/// string and restricts actions based on it. Unknown strings are preserved
/// rather than rejected so a newer backend cannot break the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Accept,
    Reject,
    Other(String),
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Submitted => "Submitted",
            SubmissionStatus::UnderReview => "UnderReview",
            SubmissionStatus::Accept => "Accept",
            SubmissionStatus::Reject => "Reject",
            SubmissionStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "Submitted" => SubmissionStatus::Submitted,
            "UnderReview" => SubmissionStatus::UnderReview,
            "Accept" => SubmissionStatus::Accept,
            "Reject" => SubmissionStatus::Reject,
            other => SubmissionStatus::Other(other.to_string()),
        }
    }

    /// Accept and Reject are terminal; nothing may act on the submission after.
    pub fn is_final(&self) -> bool {
        matches!(self, SubmissionStatus::Accept | SubmissionStatus::Reject)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SubmissionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SubmissionStatus::parse(&s))
    }
}

/// Action recorded in a submission history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    Submit,
    AssignReviewer,
    Review,
    FinalReview,
    Revise,
    Other(String),
}

impl HistoryAction {
    pub fn as_str(&self) -> &str {
        match self {
            HistoryAction::Submit => "Submit",
            HistoryAction::AssignReviewer => "AssignReviewer",
            HistoryAction::Review => "Review",
            HistoryAction::FinalReview => "FinalReview",
            HistoryAction::Revise => "Revise",
            HistoryAction::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "Submit" => HistoryAction::Submit,
            "AssignReviewer" => HistoryAction::AssignReviewer,
            "Review" => HistoryAction::Review,
            "FinalReview" => HistoryAction::FinalReview,
            "Revise" => HistoryAction::Revise,
            other => HistoryAction::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for HistoryAction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HistoryAction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(HistoryAction::parse(&s))
    }
}

/// One append-only record from `GET /Submission/{id}/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub actor_id: String,
    #[serde(default)]
    pub actor_name: String,
    pub action: HistoryAction,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Submission record from `GET /Submission/info/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInfo {
    pub id: String,
    pub document_id: String,
    #[serde(default)]
    pub collection_id: Option<String>,
    pub status: SubmissionStatus,
    pub submitter_id: String,
    #[serde(default)]
    pub current_step: Option<String>,
}

/// Client-side draft of a new submission.
///
/// `file_path` is the mandatory PDF; its absence is rejected before any
/// network call is made.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub document_id: String,
    pub collection_id: String,
    pub file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["Submitted", "UnderReview", "Accept", "Reject"] {
            assert_eq!(SubmissionStatus::parse(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status = SubmissionStatus::parse("Withdrawn");
        assert_eq!(status, SubmissionStatus::Other("Withdrawn".to_string()));
        assert_eq!(status.as_str(), "Withdrawn");
        assert!(!status.is_final());
    }

    #[test]
    fn test_final_statuses() {
        assert!(SubmissionStatus::Accept.is_final());
        assert!(SubmissionStatus::Reject.is_final());
        assert!(!SubmissionStatus::Submitted.is_final());
        assert!(!SubmissionStatus::UnderReview.is_final());
    }

    #[test]
    fn test_history_entry_wire_shape() {
        let json = r#"{
            "actorId": "3",
            "actorName": "TS. Tran B",
            "action": "AssignReviewer",
            "comment": "",
            "createdAt": "2024-11-02T08:30:00Z"
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.action, HistoryAction::AssignReviewer);
        assert!(entry.created_at.is_some());
    }
}
