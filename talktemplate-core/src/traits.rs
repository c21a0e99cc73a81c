//! Core trait definitions

use crate::error::TalkResult;

/// Keys used in the persistent session store
pub mod session_keys {
    /// Raw bearer token string
    pub const TOKEN: &str = "token";
    /// JSON-serialized [`crate::UserProfile`](crate::types::UserProfile)
    pub const USER: &str = "user";
    /// UI theme preference ("light" / "dark")
    pub const THEME: &str = "theme";
}

/// Origin-scoped durable key-value storage for the session token and user
/// record
///
/// Modeled on synchronous browser-local storage, so all operations are sync.
/// Implementations must tolerate concurrent readers; the session manager is
/// the only writer of the session entries.
pub trait SessionStore: Send + Sync {
    /// Read a stored entry; `Ok(None)` means the key is absent
    fn get(&self, key: &str) -> TalkResult<Option<String>>;

    /// Write an entry, replacing any previous value
    fn set(&self, key: &str, value: &str) -> TalkResult<()>;

    /// Remove an entry; removing an absent key is not an error
    fn remove(&self, key: &str) -> TalkResult<()>;
}
