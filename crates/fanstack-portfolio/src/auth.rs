#![forbid(unsafe_code)]

//! Admin gate for content editing.
//!
//! A single admin account is configured through the environment. There is
//! no remote identity provider; the gate only tracks whether the current
//! session signed in.

use std::fmt;

use crate::content::Section;

const ENV_ADMIN_USERNAME: &str = "FANSTACK_ADMIN_USERNAME";
const ENV_ADMIN_PASSWORD: &str = "FANSTACK_ADMIN_PASSWORD";

/// Authentication failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password did not match.
    InvalidCredentials,
    /// An admin-only action was attempted without signing in.
    NotSignedIn,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => f.write_str("Invalid username or password"),
            AuthError::NotSignedIn => f.write_str("Admin sign-in required"),
        }
    }
}

impl std::error::Error for AuthError {}

/// The configured admin account.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read the account from the process environment.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read the account using a custom environment lookup (for tests).
    ///
    /// Both variables must be set and non-empty.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = get_env(ENV_ADMIN_USERNAME).filter(|v| !v.is_empty())?;
        let password = get_env(ENV_ADMIN_PASSWORD).filter(|v| !v.is_empty())?;
        Some(Self { username, password })
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An editable area of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    About,
    Skills,
    Projects,
    Certifications,
    Resume,
    Contact,
}

impl AdminSection {
    pub const ALL: [AdminSection; 6] = [
        AdminSection::About,
        AdminSection::Skills,
        AdminSection::Projects,
        AdminSection::Certifications,
        AdminSection::Resume,
        AdminSection::Contact,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AdminSection::About => "About",
            AdminSection::Skills => "Skills",
            AdminSection::Projects => "Projects",
            AdminSection::Certifications => "Certifications",
            AdminSection::Resume => "Resume",
            AdminSection::Contact => "Contact",
        }
    }

    /// Dashboard blurb, e.g. `"Edit skills section content"`.
    #[must_use]
    pub fn description(self) -> String {
        format!("Edit {} section content", self.label().to_lowercase())
    }

    /// Stored section holding this area's content. Skills live in the resume.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            AdminSection::About => Section::About,
            AdminSection::Skills | AdminSection::Resume => Section::Resume,
            AdminSection::Projects => Section::Projects,
            AdminSection::Certifications => Section::Certifications,
            AdminSection::Contact => Section::Contact,
        }
    }
}

/// Session-scoped admin sign-in.
#[derive(Debug, Clone, Default)]
pub struct AdminGate {
    credentials: Option<AdminCredentials>,
    signed_in: bool,
}

impl AdminGate {
    /// Gate for one configured account.
    #[must_use]
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials: Some(credentials),
            signed_in: false,
        }
    }

    /// Gate configured from the environment. Without an account every
    /// sign-in is rejected.
    #[must_use]
    pub fn from_env() -> Self {
        let credentials = AdminCredentials::from_env();
        if credentials.is_none() {
            tracing::info!("no admin account configured, admin sign-in disabled");
        }
        Self {
            credentials,
            signed_in: false,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Sign in when both fields match the configured account exactly.
    pub fn sign_in(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let accepted = self
            .credentials
            .as_ref()
            .is_some_and(|c| c.username == username && c.password == password);
        if !accepted {
            tracing::warn!(username, "admin sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }
        self.signed_in = true;
        tracing::info!(username, "admin signed in");
        Ok(())
    }

    pub fn sign_out(&mut self) {
        if self.signed_in {
            tracing::info!("admin signed out");
        }
        self.signed_in = false;
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.signed_in
    }

    /// Fail unless signed in.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.signed_in {
            Ok(())
        } else {
            Err(AuthError::NotSignedIn)
        }
    }

    /// Editable sections, in dashboard order.
    #[must_use]
    pub fn sections(&self) -> &'static [AdminSection] {
        &AdminSection::ALL
    }
}
