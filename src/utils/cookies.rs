//! httpOnly session cookies carrying the access and refresh tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use campus_auth::{TokenKind, TokenPair, ttl_for};
use campus_config::{JwtConfig, ServerConfig};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

fn session_cookie(name: &str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

pub fn access_cookie(token: &str, jwt_config: &JwtConfig, server: &ServerConfig) -> Cookie<'static> {
    session_cookie(
        ACCESS_COOKIE,
        token.to_string(),
        Duration::seconds(ttl_for(TokenKind::Access, jwt_config)),
        server.secure_cookies(),
    )
}

pub fn refresh_cookie(
    token: &str,
    jwt_config: &JwtConfig,
    server: &ServerConfig,
) -> Cookie<'static> {
    session_cookie(
        REFRESH_COOKIE,
        token.to_string(),
        Duration::seconds(ttl_for(TokenKind::Refresh, jwt_config)),
        server.secure_cookies(),
    )
}

/// Adds both session cookies for a freshly issued pair.
pub fn set_session_cookies(
    jar: CookieJar,
    pair: &TokenPair,
    jwt_config: &JwtConfig,
    server: &ServerConfig,
) -> CookieJar {
    jar.add(access_cookie(&pair.access_token, jwt_config, server))
        .add(refresh_cookie(&pair.refresh_token, jwt_config, server))
}

/// Overwrites both session cookies with expired blanks.
///
/// Expired cookies are added rather than removed so the `Set-Cookie` headers are
/// emitted even when the request carried no cookies.
pub fn clear_session_cookies(jar: CookieJar, server: &ServerConfig) -> CookieJar {
    let secure = server.secure_cookies();
    jar.add(session_cookie(
        ACCESS_COOKIE,
        String::new(),
        Duration::ZERO,
        secure,
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        String::new(),
        Duration::ZERO,
        secure,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            access_secret: "a".repeat(32),
            refresh_secret: "r".repeat(32),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = access_cookie("tok", &jwt_config(), &ServerConfig::default());
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(900)));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_refresh_cookie_secure_in_production() {
        let server = ServerConfig {
            environment: "production".to_string(),
            ..ServerConfig::default()
        };
        let cookie = refresh_cookie("tok", &jwt_config(), &server);
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604800)));
    }

    #[test]
    fn test_clear_emits_expired_cookies() {
        let jar = clear_session_cookies(CookieJar::new(), &ServerConfig::default());
        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "");
        assert_eq!(access.max_age(), Some(Duration::ZERO));
        assert!(jar.get(REFRESH_COOKIE).is_some());
    }
}
