/**
 * Session Cookie Transport
 *
 * Carries the session token between browser and server in the `jwt` cookie.
 *
 * # Attributes
 *
 * - `HttpOnly` always
 * - `Path=/`
 * - `SameSite` from configuration (default `None`, cross-origin client)
 * - `Secure` only in production mode
 *
 * Browsers drop `SameSite=None` cookies that aren't `Secure`, so outside
 * production a `None` policy leaves the attribute off entirely.
 *
 * Setting and clearing share `attributes()`, so a clear always matches the
 * cookie it is meant to remove.
 */

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};

use crate::backend::server::config::{AuthConfig, SameSitePolicy};

/// Session cookie name
pub const SESSION_COOKIE: &str = "jwt";

const EXPIRED_AT: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Session cookie writer and reader
#[derive(Debug, Clone)]
pub struct SessionCookie {
    secure: bool,
    same_site: SameSitePolicy,
}

impl SessionCookie {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secure: config.mode.is_production(),
            same_site: config.same_site,
        }
    }

    /// Attributes shared by set and clear
    fn attributes(&self) -> String {
        let mut attrs = String::from("Path=/; HttpOnly");
        if self.secure || self.same_site != SameSitePolicy::None {
            attrs.push_str("; SameSite=");
            attrs.push_str(self.same_site.as_str());
        }
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }

    /// `Set-Cookie` value carrying a token
    pub fn set_value(&self, token: &str) -> String {
        format!("{}={}; {}", SESSION_COOKIE, token, self.attributes())
    }

    /// `Set-Cookie` value that removes the cookie
    pub fn clear_value(&self) -> String {
        format!(
            "{}=; Max-Age=0; Expires={}; {}",
            SESSION_COOKIE,
            EXPIRED_AT,
            self.attributes()
        )
    }

    /// Attach a token to a response
    ///
    /// Returns `false` if the token isn't a valid header value.
    pub fn attach(&self, headers: &mut HeaderMap, token: &str) -> bool {
        match HeaderValue::from_str(&self.set_value(token)) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
                true
            }
            Err(e) => {
                tracing::error!("Session token is not a valid cookie value: {}", e);
                false
            }
        }
    }

    /// Extract the token from a request, if one was sent
    ///
    /// An empty `jwt=` counts as absent.
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Tell the browser to drop the session cookie
    pub fn clear(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.clear_value()) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to build session clear cookie: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::RuntimeMode;
    use pretty_assertions::assert_eq;

    fn development() -> SessionCookie {
        SessionCookie::new(&AuthConfig::development())
    }

    fn production() -> SessionCookie {
        SessionCookie::new(&AuthConfig {
            mode: RuntimeMode::Production,
            ..AuthConfig::development()
        })
    }

    /// Attribute list of a `Set-Cookie` value, minus name/value and expiry
    fn attribute_set(value: &str) -> Vec<String> {
        let mut attrs: Vec<String> = value
            .split(';')
            .skip(1)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.starts_with("Max-Age") && !a.starts_with("Expires"))
            .collect();
        attrs.sort();
        attrs
    }

    #[test]
    fn test_development_attributes() {
        assert_eq!(development().set_value("abc"), "jwt=abc; Path=/; HttpOnly");
        assert_eq!(
            development().clear_value(),
            "jwt=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; HttpOnly"
        );
    }

    #[test]
    fn test_same_site_none_never_sent_without_secure() {
        for cookie in [development(), production()] {
            for value in [cookie.set_value("abc"), cookie.clear_value()] {
                if value.contains("SameSite=None") {
                    assert!(value.ends_with("; Secure"), "{}", value);
                }
            }
        }
    }

    #[test]
    fn test_production_is_secure() {
        assert_eq!(
            production().set_value("abc"),
            "jwt=abc; Path=/; HttpOnly; SameSite=None; Secure"
        );
    }

    #[test]
    fn test_same_site_from_config() {
        let cookie = SessionCookie::new(&AuthConfig {
            same_site: SameSitePolicy::Strict,
            ..AuthConfig::development()
        });
        assert!(cookie.set_value("abc").contains("SameSite=Strict"));
        assert!(cookie.clear_value().contains("SameSite=Strict"));
    }

    #[test]
    fn test_clear_matches_set_attributes() {
        for cookie in [development(), production()] {
            let set = cookie.set_value("abc");
            let clear = cookie.clear_value();
            assert_eq!(attribute_set(&set), attribute_set(&clear));
            assert!(clear.starts_with("jwt=;"));
            assert!(clear.contains("Max-Age=0"));
        }
    }

    #[test]
    fn test_attach_and_extract_round_trip() {
        let cookie = development();
        let mut response_headers = HeaderMap::new();
        assert!(cookie.attach(&mut response_headers, "header.payload.signature"));

        let set_cookie = response_headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        let pair = set_cookie.split(';').next().unwrap();

        let mut request_headers = HeaderMap::new();
        request_headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(
            cookie.extract(&request_headers),
            Some("header.payload.signature".to_string())
        );
    }

    #[test]
    fn test_extract_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; jwt=tok; lang=en"));
        assert_eq!(development().extract(&headers), Some("tok".to_string()));
    }

    #[test]
    fn test_extract_absent() {
        let mut headers = HeaderMap::new();
        assert_eq!(development().extract(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("jwtx=tok; xjwt=tok"));
        assert_eq!(development().extract(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("jwt="));
        assert_eq!(development().extract(&headers), None);
    }

    #[test]
    fn test_attach_rejects_invalid_header_value() {
        let mut headers = HeaderMap::new();
        assert!(!development().attach(&mut headers, "bad\ntoken"));
        assert!(headers.get(SET_COOKIE).is_none());
    }
}
