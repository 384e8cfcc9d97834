//! Verdict texts shown to the operator for each review status.
use crate::error::WatchError;
use crate::model::ReviewStatus;

pub const NOTHING_HAPPENED: &str = "Nothing happened today.";

pub fn verdict(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
        ReviewStatus::Reviewing => "The work has been taken for review by reviewer.",
        ReviewStatus::Rejected => "The work has been reviewed: the reviewer has remarks.",
    }
}

/// Look up the verdict for a raw status code straight from the API.
pub fn verdict_for(raw: &str) -> Result<(ReviewStatus, &'static str), WatchError> {
    let status =
        ReviewStatus::parse(raw).ok_or_else(|| WatchError::UnknownStatus(raw.to_string()))?;
    Ok((status, verdict(status)))
}

pub fn status_changed_message(name: &str, verdict: &str) -> String {
    format!("Changed status of review \"{}\". {}", name, verdict)
}

pub fn failure_message(err: &WatchError) -> String {
    format!("Failure in program operation: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_verdicts() {
        let (status, text) = verdict_for("reviewing").unwrap();
        assert_eq!(status, ReviewStatus::Reviewing);
        assert!(text.contains("taken for review by reviewer"));
        assert!(verdict_for("approved").is_ok());
        assert!(verdict_for("rejected").is_ok());
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = verdict_for("pending").unwrap_err();
        assert!(matches!(err, WatchError::UnknownStatus(ref s) if s == "pending"));
    }

    #[test]
    fn messages_are_formatted() {
        assert_eq!(
            status_changed_message("Project X", "ok"),
            "Changed status of review \"Project X\". ok"
        );
        let err = WatchError::MalformedResponse("no homeworks".into());
        assert_eq!(
            failure_message(&err),
            "Failure in program operation: malformed response: no homeworks"
        );
    }
}
