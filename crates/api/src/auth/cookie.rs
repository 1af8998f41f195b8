//! `Set-Cookie` values for the auth token cookie.

use axum::http::HeaderValue;

/// Name of the cookie carrying the token.
pub const AUTH_COOKIE_NAME: &str = "__Host-refresh_token";

/// Cookie holding `token` for `max_age_secs`.
///
/// `HttpOnly; Secure; SameSite=Lax; Path=/`, plus `Domain` when configured.
pub fn auth_cookie(
    token: &str,
    max_age_secs: i64,
    domain: Option<&str>,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    build(token, max_age_secs, "Lax", domain)
}

/// Cookie that makes the browser drop the token immediately.
pub fn expired_cookie(
    domain: Option<&str>,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    build("", 0, "Strict", domain)
}

fn build(
    value: &str,
    max_age_secs: i64,
    same_site: &str,
    domain: Option<&str>,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let mut cookie = format!(
        "{AUTH_COOKIE_NAME}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; Secure; SameSite={same_site}"
    );
    if let Some(domain) = domain {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    HeaderValue::from_str(&cookie)
}

/// Value of the auth cookie in a `Cookie` request header, if present and non-empty.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE_NAME)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_carries_attributes() {
        let value = auth_cookie("abc", 900, None).unwrap();
        let s = value.to_str().unwrap();
        assert!(s.starts_with("__Host-refresh_token=abc;"));
        assert!(s.contains("Max-Age=900"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("Secure"));
        assert!(s.contains("SameSite=Lax"));
        assert!(!s.contains("Domain="));
    }

    #[test]
    fn expired_cookie_has_zero_max_age_and_domain() {
        let value = expired_cookie(Some("example.com")).unwrap();
        let s = value.to_str().unwrap();
        assert!(s.starts_with("__Host-refresh_token=;"));
        assert!(s.contains("Max-Age=0"));
        assert!(s.ends_with("; Domain=example.com"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        assert_eq!(
            token_from_cookie_header("theme=dark; __Host-refresh_token=tok; lang=en"),
            Some("tok")
        );
        assert_eq!(token_from_cookie_header("__Host-refresh_token="), None);
        assert_eq!(token_from_cookie_header("theme=dark"), None);
    }
}
