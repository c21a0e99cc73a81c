//! Core data type definitions

use serde::{Deserialize, Serialize};

/// User record - the identity payload persisted in the session store and
/// exchanged with the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// The authenticated identity held for the lifetime of the process
///
/// A `Session` only exists inside [`SessionState::Authenticated`], so a
/// bearer token without user data (or the reverse) is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    /// Opaque bearer credential issued by the auth service
    pub token: String,
}

impl Session {
    /// Build a session from a stored or service-provided user record
    pub fn from_profile(profile: &UserProfile, token: &str) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email.clone(),
            display_name: profile.name.clone(),
            token: token.to_string(),
        }
    }

    /// The persistable user record for this session
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            email: self.email.clone(),
            name: self.display_name.clone(),
        }
    }
}

/// Session lifecycle as observed by the view layer
///
/// `Restoring` only exists between process start and the first completed
/// restore, so route decisions can wait instead of flashing the wrong screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Restoring,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Result of a mutating session operation, shaped for inline rendering by
/// the view layer - failures carry a user-displayable message, never a panic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Review state of a submitted AlimTalk template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Approved,
    InReview,
    Rejected,
}

impl ApprovalStatus {
    /// User-facing label as shown in the template list
    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "승인됨",
            ApprovalStatus::InReview => "심사중",
            ApprovalStatus::Rejected => "반려됨",
        }
    }

    /// Parse a filter argument; accepts both the English keyword and the
    /// Korean label
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "approved" | "승인됨" => Some(ApprovalStatus::Approved),
            "in-review" | "review" | "심사중" => Some(ApprovalStatus::InReview),
            "rejected" | "반려됨" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Compliance assessment attached to a drafted template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Score out of 100
    pub score: u8,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// An AlimTalk messaging template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub title: String,
    /// Message body with `{{변수}}` placeholders
    pub content: String,
    /// Placeholder names referenced by the content
    pub variables: Vec<String>,
    pub status: ApprovalStatus,
    pub category: String,
    /// Creation date (display form, e.g. "2025-01-15")
    pub created_at: String,
    pub compliance: Option<ComplianceReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_default_is_restoring() {
        assert_eq!(SessionState::default(), SessionState::Restoring);
        assert!(!SessionState::default().is_authenticated());
    }

    #[test]
    fn test_session_profile_round_trip() {
        let profile = UserProfile {
            id: 1,
            email: "user@example.com".to_string(),
            name: "사용자".to_string(),
        };
        let session = Session::from_profile(&profile, "abc123");

        assert_eq!(session.user_id, 1);
        assert_eq!(session.token, "abc123");
        assert_eq!(session.profile(), profile);
    }

    #[test]
    fn test_approval_status_labels() {
        assert_eq!(ApprovalStatus::Approved.label(), "승인됨");
        assert_eq!(ApprovalStatus::InReview.label(), "심사중");
        assert_eq!(ApprovalStatus::Rejected.label(), "반려됨");
    }

    #[test]
    fn test_approval_status_parse_accepts_both_forms() {
        assert_eq!(
            ApprovalStatus::parse("approved"),
            Some(ApprovalStatus::Approved)
        );
        assert_eq!(
            ApprovalStatus::parse("심사중"),
            Some(ApprovalStatus::InReview)
        );
        assert_eq!(ApprovalStatus::parse("bogus"), None);
    }

    #[test]
    fn test_auth_outcome_shapes() {
        assert_eq!(
            AuthOutcome::ok(),
            AuthOutcome {
                success: true,
                error: None
            }
        );
        let failed = AuthOutcome::fail("잘못된 비밀번호입니다.");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("잘못된 비밀번호입니다."));
    }
}
