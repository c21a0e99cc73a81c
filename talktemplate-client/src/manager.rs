//! Session manager
//!
//! Single source of truth for "is a user currently authenticated, and who
//! are they". Owns the in-memory [`SessionState`], keeps it in sync with the
//! persistent store, and exposes the mutating operations to the view layer.
//!
//! Mutating operations are expected to be invoked one at a time (the view
//! disables the submitting control while a call is pending); concurrent
//! `login`/`register`/`logout` calls have undefined relative ordering and
//! are not queued.

use std::sync::{Arc, RwLock};

use talktemplate_core::{
    session_keys, AuthOutcome, Session, SessionState, SessionStore, TalkError, TalkResult,
    UserProfile,
};
use tracing::{debug, info, warn};

use crate::api::AuthApiClient;

/// Localized messages shown when the service provides no detail of its own
pub mod messages {
    pub const LOGIN_FAILED: &str = "로그인에 실패했습니다.";
    pub const SIGNUP_FAILED: &str = "회원가입에 실패했습니다.";
    pub const OTP_SEND_FAILED: &str = "인증번호 전송에 실패했습니다.";
    pub const OTP_VERIFY_FAILED: &str = "인증번호 확인에 실패했습니다.";
    pub const CONNECTIVITY: &str = "서버에 연결할 수 없습니다.";
    pub const EMAIL_REQUIRED: &str = "이메일을 입력해주세요.";
    pub const PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요.";
    pub const NAME_REQUIRED: &str = "이름을 입력해주세요.";
    pub const OTP_REQUIRED: &str = "인증번호를 입력해주세요.";
}

/// Owns the session and the two external collaborators: the auth service
/// client and the persistent session store
pub struct SessionManager {
    client: AuthApiClient,
    store: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Create a manager in the `Restoring` state; call [`restore`] before
    /// the first routing decision
    ///
    /// [`restore`]: SessionManager::restore
    pub fn new(client: AuthApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            state: RwLock::new(SessionState::Restoring),
        }
    }

    /// Current session state snapshot
    pub fn state(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().is_authenticated()
    }

    /// The current session, if authenticated
    pub fn session(&self) -> Option<Session> {
        self.state.read().unwrap().session().cloned()
    }

    /// Rehydrate the session from the persistent store
    ///
    /// Both entries present and the user record valid → `Authenticated`.
    /// Anything else - missing entries, a lone token, a lone user record, or
    /// an unparseable record - clears both entries and lands in
    /// `Unauthenticated`. Never fails: corrupt stored state is absence, not
    /// an error to surface.
    pub fn restore(&self) {
        let token = self.read_entry(session_keys::TOKEN);
        let user = self.read_entry(session_keys::USER);

        let next = match (token, user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => {
                    debug!("Restored session for {}", profile.email);
                    SessionState::Authenticated(Session::from_profile(&profile, &token))
                }
                Err(e) => {
                    warn!("Stored user record is corrupt, discarding session: {}", e);
                    self.clear_entries();
                    SessionState::Unauthenticated
                }
            },
            (None, None) => SessionState::Unauthenticated,
            _ => {
                warn!("Partial stored session, discarding");
                self.clear_entries();
                SessionState::Unauthenticated
            }
        };

        *self.state.write().unwrap() = next;
    }

    /// Authenticate with email and password
    ///
    /// A success fully replaces any previous session. Failures leave both
    /// the in-memory state and the store untouched.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        if email.trim().is_empty() {
            return AuthOutcome::fail(messages::EMAIL_REQUIRED);
        }
        if password.is_empty() {
            return AuthOutcome::fail(messages::PASSWORD_REQUIRED);
        }

        match self.client.login(email, password).await {
            Ok(success) => {
                self.install_session(success.user, success.token);
                AuthOutcome::ok()
            }
            Err(err) => failure_outcome(err, messages::LOGIN_FAILED),
        }
    }

    /// Ask the service to mail a one-time passcode to the address
    pub async fn request_otp(&self, email: &str) -> AuthOutcome {
        if email.trim().is_empty() {
            return AuthOutcome::fail(messages::EMAIL_REQUIRED);
        }

        match self.client.request_otp(email).await {
            Ok(()) => AuthOutcome::ok(),
            Err(err) => failure_outcome(err, messages::OTP_SEND_FAILED),
        }
    }

    /// Register a new account
    ///
    /// Verifies the passcode first and short-circuits on its failure, so the
    /// signup endpoint is never reached without a verification token for
    /// this email. On success the session is built from the signup response,
    /// falling back to the locally supplied email and name where the service
    /// omits them. A token-less signup success leaves the session
    /// unauthenticated; the account exists and an explicit login follows.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        otp_code: &str,
    ) -> AuthOutcome {
        if email.trim().is_empty() {
            return AuthOutcome::fail(messages::EMAIL_REQUIRED);
        }
        if password.is_empty() {
            return AuthOutcome::fail(messages::PASSWORD_REQUIRED);
        }
        if name.trim().is_empty() {
            return AuthOutcome::fail(messages::NAME_REQUIRED);
        }
        if otp_code.trim().is_empty() {
            return AuthOutcome::fail(messages::OTP_REQUIRED);
        }

        let verification_token = match self.client.verify_otp(email, otp_code).await {
            Ok(token) => token,
            Err(err) => return failure_outcome(err, messages::OTP_VERIFY_FAILED),
        };

        match self
            .client
            .signup(email, password, name, &verification_token)
            .await
        {
            Ok(signup) => {
                match signup.token {
                    Some(token) => {
                        let profile = UserProfile {
                            id: signup.id,
                            email: signup.email.unwrap_or_else(|| email.to_string()),
                            name: signup.name.unwrap_or_else(|| name.to_string()),
                        };
                        self.install_session(profile, token);
                    }
                    None => {
                        info!("Signup succeeded without a token; explicit login required");
                    }
                }
                AuthOutcome::ok()
            }
            Err(err) => failure_outcome(err, messages::SIGNUP_FAILED),
        }
    }

    /// Clear the stored session and reset to `Unauthenticated`
    ///
    /// Cannot fail and is idempotent; store errors are logged and swallowed.
    pub fn logout(&self) {
        self.clear_entries();
        *self.state.write().unwrap() = SessionState::Unauthenticated;
        info!("Session cleared");
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{}' entry: {}", key, e);
                None
            }
        }
    }

    /// Persist and adopt a fresh session. A store write failure degrades to
    /// memory-only state: authenticated for this process, lost on restart.
    fn install_session(&self, profile: UserProfile, token: String) {
        if let Err(e) = self.persist_session(&profile, &token) {
            warn!(
                "Failed to persist session, continuing with in-memory state: {}",
                e
            );
        }

        info!("Session established for {}", profile.email);
        *self.state.write().unwrap() =
            SessionState::Authenticated(Session::from_profile(&profile, &token));
    }

    fn persist_session(&self, profile: &UserProfile, token: &str) -> TalkResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.store.set(session_keys::TOKEN, token)?;
        self.store.set(session_keys::USER, &raw)?;
        Ok(())
    }

    fn clear_entries(&self) {
        for key in [session_keys::TOKEN, session_keys::USER] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to clear '{}' entry: {}", key, e);
            }
        }
    }
}

/// Map an API failure onto the outcome shape the view layer renders inline
fn failure_outcome(err: TalkError, fallback: &str) -> AuthOutcome {
    match &err {
        TalkError::Service { .. } => match err.service_message() {
            Some(message) => AuthOutcome::fail(message),
            None => AuthOutcome::fail(fallback),
        },
        TalkError::Network { .. } => AuthOutcome::fail(messages::CONNECTIVITY),
        other => {
            warn!("Session operation failed: {}", other);
            AuthOutcome::fail(fallback)
        }
    }
}
