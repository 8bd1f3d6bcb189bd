//! Pure projections over reported submission state
//!
//! The backend owns the submission state machine; the client only projects
//! the reported status + history into "what may this actor do right now".
//! Keeping these as pure functions means the client can never drift out of
//! sync with backend truth: re-fetch, re-project, done.

use crate::models::{HistoryAction, HistoryEntry, Role, SubmissionInfo, SubmissionStatus};

/// Actions the client can offer on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Revise,
    AssignReviewer,
    Review,
    FinalReview,
}

/// May the actor revise? Only the original submitter, and only while the
/// submission has not reached a terminal status.
pub fn can_revise(status: &SubmissionStatus, submitter_id: &str, actor_id: &str) -> bool {
    !status.is_final() && submitter_id == actor_id
}

/// May a librarian run the final review? Terminal statuses are closed.
pub fn can_approve(status: &SubmissionStatus) -> bool {
    !status.is_final()
}

/// Progress line for the assignment dashboard:
/// `"{reviewed} / {assigned} Reviewer đã hoàn thành"`.
pub fn review_status_text(history: &[HistoryEntry]) -> String {
    let assigned = history
        .iter()
        .filter(|h| h.action == HistoryAction::AssignReviewer)
        .count();
    let reviewed = history
        .iter()
        .filter(|h| h.action == HistoryAction::Review)
        .count();
    format!("{reviewed} / {assigned} Reviewer đã hoàn thành")
}

/// Full projection: which actions does `actor` get on this submission?
pub fn allowed_actions(
    info: &SubmissionInfo,
    history: &[HistoryEntry],
    actor_id: &str,
    actor_role: Role,
) -> Vec<Action> {
    let mut actions = Vec::new();
    if info.status.is_final() {
        return actions;
    }
    if can_revise(&info.status, &info.submitter_id, actor_id) {
        actions.push(Action::Revise);
    }
    match actor_role {
        Role::Admin | Role::Librarian => {
            actions.push(Action::AssignReviewer);
            actions.push(Action::FinalReview);
        }
        Role::Reviewer => {
            // A reviewer may file a review while assigned ones are outstanding
            let assigned = history
                .iter()
                .filter(|h| h.action == HistoryAction::AssignReviewer)
                .count();
            let reviewed = history
                .iter()
                .filter(|h| h.action == HistoryAction::Review)
                .count();
            if reviewed < assigned || assigned == 0 {
                actions.push(Action::Review);
            }
        }
        Role::Member => {}
    }
    actions
}

/// Compose the history comment for a review verdict: `"decision: note"`, or
/// just the decision when the note is empty.
pub fn compose_review_comment(decision: &str, note: &str) -> String {
    if note.trim().is_empty() {
        decision.to_string()
    } else {
        format!("{decision}: {note}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: HistoryAction) -> HistoryEntry {
        HistoryEntry {
            actor_id: "3".to_string(),
            actor_name: String::new(),
            action,
            comment: String::new(),
            created_at: None,
        }
    }

    fn info_with_status(status: SubmissionStatus) -> SubmissionInfo {
        serde_json::from_value(serde_json::json!({
            "id": "sub-1",
            "documentId": "doc-1",
            "collectionId": "col-1",
            "status": status.as_str(),
            "submitterId": "6",
            "currentStep": null
        }))
        .unwrap()
    }

    #[test]
    fn test_terminal_status_blocks_revise_and_approve_for_everyone() {
        for status in [SubmissionStatus::Accept, SubmissionStatus::Reject] {
            assert!(!can_approve(&status));
            assert!(!can_revise(&status, "6", "6"), "even the submitter");
            assert!(allowed_actions(&info_with_status(status.clone()), &[], "6", Role::Admin)
                .is_empty());
        }
    }

    #[test]
    fn test_only_submitter_can_revise() {
        let status = SubmissionStatus::UnderReview;
        assert!(can_revise(&status, "6", "6"));
        assert!(!can_revise(&status, "6", "7"));
    }

    #[test]
    fn test_review_status_text_counts_assignments_vs_reviews() {
        let history = vec![
            entry(HistoryAction::Submit),
            entry(HistoryAction::AssignReviewer),
            entry(HistoryAction::AssignReviewer),
            entry(HistoryAction::AssignReviewer),
            entry(HistoryAction::Review),
        ];
        assert_eq!(review_status_text(&history), "1 / 3 Reviewer đã hoàn thành");
    }

    #[test]
    fn test_review_status_text_empty_history() {
        assert_eq!(review_status_text(&[]), "0 / 0 Reviewer đã hoàn thành");
    }

    #[test]
    fn test_librarian_gets_assign_and_final_review() {
        let info = info_with_status(SubmissionStatus::UnderReview);
        let actions = allowed_actions(&info, &[], "99", Role::Librarian);
        assert!(actions.contains(&Action::AssignReviewer));
        assert!(actions.contains(&Action::FinalReview));
        assert!(!actions.contains(&Action::Revise));
    }

    #[test]
    fn test_submitter_member_gets_only_revise() {
        let info = info_with_status(SubmissionStatus::Submitted);
        let actions = allowed_actions(&info, &[], "6", Role::Member);
        assert_eq!(actions, vec![Action::Revise]);
    }

    #[test]
    fn test_compose_review_comment() {
        assert_eq!(compose_review_comment("Đạt", "cần sửa mục 2"), "Đạt: cần sửa mục 2");
        assert_eq!(compose_review_comment("Đạt", ""), "Đạt");
        assert_eq!(compose_review_comment("Đạt", "   "), "Đạt");
    }
}
