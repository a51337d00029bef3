use std::fmt;

use crate::model::ids::UserId;

/// Username in its normalized form: trimmed and lowercased.
///
/// The normalized form is the uniqueness key for accounts, so every lookup
/// and insert goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username/password pair after input normalization.
///
/// Passwords are only trimmed; comparison is exact.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn normalize(username: &str, password: &str) -> Self {
        Self {
            username: Username::normalize(username),
            password: password.trim().to_owned(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keeps passwords out of log lines and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A registered account. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    credentials: Credentials,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, credentials: Credentials) -> Self {
        Self { id, credentials }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        self.credentials.username()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    /// Exact match against already-normalized credentials.
    #[must_use]
    pub fn matches(&self, credentials: &Credentials) -> bool {
        &self.credentials == credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed_and_lowercased() {
        assert_eq!(Username::normalize("  Alice \n").as_str(), "alice");
        assert_eq!(Username::normalize("BOB"), Username::normalize("bob"));
    }

    #[test]
    fn password_is_trimmed_but_keeps_case() {
        let creds = Credentials::normalize("Alice", "  S3cret ");
        assert_eq!(creds.password(), "S3cret");
    }

    #[test]
    fn user_matches_only_exact_credentials() {
        let user = User::new(UserId::new(1), Credentials::normalize("alice", "pw"));
        assert!(user.matches(&Credentials::normalize(" ALICE", "pw ")));
        assert!(!user.matches(&Credentials::normalize("alice", "PW")));
        assert!(!user.matches(&Credentials::normalize("alicia", "pw")));
    }

    #[test]
    fn debug_output_redacts_password() {
        let creds = Credentials::normalize("alice", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
