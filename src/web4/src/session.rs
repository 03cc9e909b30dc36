use serde::Serialize;

use crate::endpoints::{LOGIN_PATH, LOGOUT_PATH};

/// Cookie set by the gateway after a successful login.
pub const ACCOUNT_COOKIE: &str = "web4_account_id";

/// Read-through view of the gateway's login cookie. Nothing is validated or
/// refreshed; the gateway owns the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    account_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(account_id: impl Into<String>) -> Self {
        let account_id = account_id.into();
        Self {
            account_id: (!account_id.is_empty()).then_some(account_id),
        }
    }

    /// Reads `web4_account_id` from a `Cookie` request header value.
    pub fn from_cookie_header(header: &str) -> Self {
        let account_id = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| name.trim() == ACCOUNT_COOKIE)
            .map(|(_, value)| value.trim().trim_matches('"'))
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self { account_id }
    }

    pub fn is_signed_in(&self) -> bool {
        self.account_id.is_some()
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Navigation the UI offers: logout when signed in, login otherwise.
    pub fn action(&self) -> SessionAction {
        if self.is_signed_in() {
            SessionAction::Logout
        } else {
            SessionAction::Login
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Login,
    Logout,
}

impl SessionAction {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Logout => LOGOUT_PATH,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Logout => "Logout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_account_cookie() {
        let session = Session::from_cookie_header("theme=dark; web4_account_id=alice.near; x=1");
        assert!(session.is_signed_in());
        assert_eq!(session.account_id(), Some("alice.near"));
        assert_eq!(session.action(), SessionAction::Logout);
        assert_eq!(session.action().path(), "/web4/logout");
    }

    #[test]
    fn test_missing_or_empty_cookie_is_anonymous() {
        for header in ["", "theme=dark", "web4_account_id=", "web4_account_id_old=bob.near"] {
            let session = Session::from_cookie_header(header);
            assert!(!session.is_signed_in(), "header {header:?} should not sign in");
            assert_eq!(session.action(), SessionAction::Login);
        }
    }

    #[test]
    fn test_quoted_cookie_value() {
        let session = Session::from_cookie_header("web4_account_id=\"bob.testnet\"");
        assert_eq!(session.account_id(), Some("bob.testnet"));
    }

    #[test]
    fn test_signed_in_constructor() {
        assert_eq!(Session::signed_in("carol.near").account_id(), Some("carol.near"));
        assert_eq!(Session::signed_in(""), Session::anonymous());
    }
}
