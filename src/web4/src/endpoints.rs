//! Gateway paths used by the sandbox.

pub const CONTRACT_PATH: &str = "/web4/contract";
pub const SIGN_PATH: &str = "/web4/sign";
pub const LOGIN_PATH: &str = "/web4/login";
pub const LOGOUT_PATH: &str = "/web4/logout";

/// Joins a gateway base URL and a root-relative path.
pub fn absolute(gateway_url: &str, path: &str) -> String {
    format!("{}{}", gateway_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_trims_trailing_slash() {
        assert_eq!(
            absolute("http://localhost:3000/", LOGIN_PATH),
            "http://localhost:3000/web4/login"
        );
        assert_eq!(
            absolute("https://app.near.page", "/web4/sign?web4_gas=1"),
            "https://app.near.page/web4/sign?web4_gas=1"
        );
    }
}
