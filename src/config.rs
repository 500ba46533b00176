//! Portal configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Everything the portal needs to reach the backend, set cookies and build
//! payment return URLs is read once at start-up into a typed `Config`.
//! `main` loads `.env` first, so local development needs no exported vars.

use time::UtcOffset;
use time::macros::format_description;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UTC_OFFSET: &str = "+05:45";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_ESEWA_PRODUCT_CODE: &str = "EPAYTEST";
pub const DEFAULT_REGISTRATION_FEE: u64 = 1000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required env var {var}")]
    Missing { var: String },

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsewaConfig {
    /// Gateway form action. Defaults to the portal's own mock gateway.
    pub form_url: String,
    pub product_code: String,
    /// Team registration fee in whole rupees.
    pub registration_fee: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    /// Scheme, host and port of `backend_url`.
    pub backend_origin: String,
    pub port: u16,
    pub public_base_url: String,
    pub timeouts: BackendTimeouts,
    pub cookie_secure: bool,
    pub utc_offset: UtcOffset,
    pub static_dir: String,
    /// Request body cap for multipart routes.
    pub max_upload_bytes: usize,
    pub esewa: EsewaConfig,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `BACKEND_API_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_BASE_URL`: default `http://localhost:{PORT}`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS` / `BACKEND_CONNECT_TIMEOUT_SECS`
    /// - `COOKIE_SECURE`: default true for an https public URL
    /// - `TOURNAMENT_UTC_OFFSET`: default `+05:45`
    /// - `STATIC_DIR`: default `static`
    /// - `MAX_UPLOAD_BYTES`: default 20 MiB
    /// - `ESEWA_FORM_URL`, `ESEWA_PRODUCT_CODE`, `REGISTRATION_FEE`
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable that is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Used by `from_env` and tests.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable that is missing or malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = lookup("BACKEND_API_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| ConfigError::Missing { var: "BACKEND_API_URL".into() })?;
        let backend_origin = http_url(&backend_url)
            .map(|url| url.origin().ascii_serialization())
            .ok_or_else(|| ConfigError::Invalid { var: "BACKEND_API_URL".into(), value: backend_url.clone() })?;

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        if http_url(&public_base_url).is_none() {
            return Err(ConfigError::Invalid { var: "PUBLIC_BASE_URL".into(), value: public_base_url });
        }

        let timeouts = BackendTimeouts {
            request_secs: parse_or(
                "BACKEND_REQUEST_TIMEOUT_SECS",
                lookup("BACKEND_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_or(
                "BACKEND_CONNECT_TIMEOUT_SECS",
                lookup("BACKEND_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE".into(), value: raw })?,
            None => public_base_url.starts_with("https://"),
        };

        let offset_raw = lookup("TOURNAMENT_UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_owned());
        let utc_offset = parse_offset(&offset_raw)
            .ok_or(ConfigError::Invalid { var: "TOURNAMENT_UTC_OFFSET".into(), value: offset_raw })?;

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned());
        let max_upload_bytes = parse_or("MAX_UPLOAD_BYTES", lookup("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)?;

        let esewa = EsewaConfig {
            form_url: lookup("ESEWA_FORM_URL")
                .filter(|raw| !raw.trim().is_empty())
                .unwrap_or_else(|| format!("{public_base_url}/payment/esewa/mock")),
            product_code: lookup("ESEWA_PRODUCT_CODE").unwrap_or_else(|| DEFAULT_ESEWA_PRODUCT_CODE.to_owned()),
            registration_fee: parse_or("REGISTRATION_FEE", lookup("REGISTRATION_FEE"), DEFAULT_REGISTRATION_FEE)?,
        };

        Ok(Self {
            backend_url,
            backend_origin,
            port,
            public_base_url,
            timeouts,
            cookie_secure,
            utc_offset,
            static_dir,
            max_upload_bytes,
            esewa,
        })
    }

    /// Absolute URL on this portal for `path` (which must start with `/`).
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!("{}{path}", self.public_base_url)
    }

    /// Parse `raw` if it is an absolute URL on this portal's origin.
    #[must_use]
    pub fn portal_url(&self, raw: &str) -> Option<Url> {
        let portal = http_url(&self.public_base_url)?;
        http_url(raw.trim()).filter(|candidate| candidate.origin() == portal.origin())
    }

    /// Absolute URL for an uploaded file. The backend stores uploads as
    /// paths relative to its own origin.
    #[must_use]
    pub fn media_url(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("data:") || raw.starts_with("//") {
            return raw.to_owned();
        }
        format!("{}/{}", self.backend_origin, raw.trim_start_matches('/'))
    }
}

/// Parse an absolute `http`/`https` URL that can carry path segments.
fn http_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_offset(raw: &str) -> Option<UtcOffset> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Some(UtcOffset::UTC);
    }
    UtcOffset::parse(trimmed, format_description!("[offset_hour sign:mandatory]:[offset_minute]")).ok()
}

fn parse_or<T: std::str::FromStr>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var: var.to_owned(), value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
