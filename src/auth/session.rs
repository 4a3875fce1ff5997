//! Session cookie helpers

use axum::http::{header, HeaderMap};

pub const AUTH_COOKIE: &str = "auth_token";

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    build_cookie(token, max_age, secure)
}

/// `Set-Cookie` value that expires the session immediately
pub fn clear_cookie(secure: bool) -> String {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
        AUTH_COOKIE, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract the session token from the request's `Cookie` headers
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Compare a login attempt with the configured password; no password means no login
pub fn password_matches(expected: Option<&str>, candidate: &str) -> bool {
    match expected {
        Some(expected) if !expected.is_empty() => {
            // constant-time over the candidate
            expected.len() == candidate.len()
                && expected
                    .bytes()
                    .zip(candidate.bytes())
                    .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                    == 0
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc", 3600, false);
        assert_eq!(
            cookie,
            "auth_token=abc; Path=/; Max-Age=3600; HttpOnly; SameSite=Strict"
        );
        assert!(session_cookie("abc", 3600, true).ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        assert_eq!(
            clear_cookie(false),
            "auth_token=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict"
        );
    }

    #[test]
    fn test_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=tok.en.value; other=1"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("tok.en.value"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn test_password_matches() {
        assert!(password_matches(Some("hunter2"), "hunter2"));
        assert!(!password_matches(Some("hunter2"), "hunter3"));
        assert!(!password_matches(Some("hunter2"), "hunter"));
        assert!(!password_matches(None, ""));
        assert!(!password_matches(Some(""), ""));
    }
}
