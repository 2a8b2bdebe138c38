//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SOCIAL_CONNECTED_*` environment variables,
//! and configuration files, in that order of precedence. Every field is
//! optional; accessors apply the defaults.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com/";
const DEFAULT_TWITTER_API_BASE_URL: &str = "https://api.twitter.com/1.1/";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime settings for the connectivity service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOCIAL_CONNECTED")]
pub struct ServiceSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL for the connection history; in-memory when unset.
    pub database_url: Option<String>,
    /// Base URL of the organisation platform API.
    pub github_api_base_url: Option<String>,
    /// Base URL of the follow platform API.
    pub twitter_api_base_url: Option<String>,
    /// Value sent verbatim in the follow platform `Authorization` header.
    pub twitter_api_token: Option<String>,
    /// Per-request timeout for outbound platform calls.
    pub http_timeout_seconds: Option<u64>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

fn invalid_input(field: &str, value: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid {field} {value:?}: {err}"),
    )
}

fn parse_base_url(field: &str, value: &str) -> io::Result<Url> {
    let url = Url::parse(value).map_err(|err| invalid_input(field, value, err))?;
    if url.cannot_be_a_base() {
        return Err(invalid_input(field, value, "URL cannot be a base"));
    }
    Ok(url)
}

impl ServiceSettings {
    /// Address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err| invalid_input("bind address", raw, err))
    }

    /// Database URL, when persistence is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Organisation platform base URL.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for malformed URLs.
    pub fn github_api_base_url(&self) -> io::Result<Url> {
        parse_base_url(
            "GitHub API base URL",
            self.github_api_base_url
                .as_deref()
                .unwrap_or(DEFAULT_GITHUB_API_BASE_URL),
        )
    }

    /// Follow platform base URL.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for malformed URLs.
    pub fn twitter_api_base_url(&self) -> io::Result<Url> {
        parse_base_url(
            "Twitter API base URL",
            self.twitter_api_base_url
                .as_deref()
                .unwrap_or(DEFAULT_TWITTER_API_BASE_URL),
        )
    }

    /// Authorization header value; empty when unset.
    pub fn twitter_api_token(&self) -> &str {
        self.twitter_api_token.as_deref().unwrap_or_default()
    }

    /// Outbound timeout. Unset or zero means no timeout.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    /// Maximum pooled database connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "SOCIAL_CONNECTED_BIND_ADDR",
        "SOCIAL_CONNECTED_DATABASE_URL",
        "SOCIAL_CONNECTED_GITHUB_API_BASE_URL",
        "SOCIAL_CONNECTED_TWITTER_API_BASE_URL",
        "SOCIAL_CONNECTED_TWITTER_API_TOKEN",
        "SOCIAL_CONNECTED_HTTP_TIMEOUT_SECONDS",
        "SOCIAL_CONNECTED_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("social-connected")])
            .expect("config should load")
    }

    fn cleared_except(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(cleared_except(&[]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.github_api_base_url().expect("default url").as_str(),
            DEFAULT_GITHUB_API_BASE_URL
        );
        assert_eq!(
            settings.twitter_api_base_url().expect("default url").as_str(),
            DEFAULT_TWITTER_API_BASE_URL
        );
        assert_eq!(settings.twitter_api_token(), "");
        assert!(settings.http_timeout().is_none());
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_except(&[
            ("SOCIAL_CONNECTED_BIND_ADDR", "127.0.0.1:9000"),
            ("SOCIAL_CONNECTED_DATABASE_URL", "postgres://localhost/social"),
            ("SOCIAL_CONNECTED_GITHUB_API_BASE_URL", "http://127.0.0.1:7000/"),
            ("SOCIAL_CONNECTED_TWITTER_API_TOKEN", "Bearer abc"),
            ("SOCIAL_CONNECTED_HTTP_TIMEOUT_SECONDS", "5"),
            ("SOCIAL_CONNECTED_POOL_MAX_SIZE", "3"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("bind address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/social"));
        assert_eq!(
            settings.github_api_base_url().expect("url").as_str(),
            "http://127.0.0.1:7000/"
        );
        assert_eq!(settings.twitter_api_token(), "Bearer abc");
        assert_eq!(settings.http_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.pool_max_size(), 3);
    }

    #[rstest]
    #[case::blank_database(ServiceSettings {
        database_url: Some("  ".to_owned()),
        ..ServiceSettings::default()
    })]
    fn blank_database_url_means_in_memory(#[case] settings: ServiceSettings) {
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn zero_timeout_disables_the_timeout() {
        let settings = ServiceSettings {
            http_timeout_seconds: Some(0),
            ..ServiceSettings::default()
        };
        assert!(settings.http_timeout().is_none());
    }

    #[rstest]
    #[case::bind_addr(ServiceSettings {
        bind_addr: Some("not-an-address".to_owned()),
        ..ServiceSettings::default()
    })]
    fn invalid_bind_address_is_rejected(#[case] settings: ServiceSettings) {
        let err = settings.bind_addr().expect_err("invalid address");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[rstest]
    #[case::not_a_url("not a url")]
    #[case::mailto("mailto:dev@example.com")]
    fn invalid_base_urls_are_rejected(#[case] raw: &str) {
        let settings = ServiceSettings {
            github_api_base_url: Some(raw.to_owned()),
            twitter_api_base_url: Some(raw.to_owned()),
            ..ServiceSettings::default()
        };
        assert!(settings.github_api_base_url().is_err());
        assert!(settings.twitter_api_base_url().is_err());
    }
}
