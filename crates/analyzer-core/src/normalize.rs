//! Canonicalization of user-submitted website addresses.
//!
//! A site name is `scheme://host[:port]`: lowercase, no credentials, path,
//! query or fragment. Default ports are dropped by the `url` parser.

use thiserror::Error;
use url::Url;

/// Widest canonical name the `urls.name` column accepts.
pub const MAX_NAME_LENGTH: usize = 255;

/// Why an address was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidUrl {
    #[error("'{0}' is not a valid absolute URL")]
    Unparseable(String),

    #[error("scheme '{0}' is not supported (only http/https)")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("site name exceeds {} characters", MAX_NAME_LENGTH)]
    TooLong,
}

/// Normalize raw user input into a canonical site name.
///
/// `normalize_url(&normalize_url(x)?)` always equals `normalize_url(x)`.
pub fn normalize_url(raw: &str) -> Result<String, InvalidUrl> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).map_err(|e| match e {
        url::ParseError::EmptyHost => InvalidUrl::MissingHost,
        _ => InvalidUrl::Unparseable(raw.to_string()),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(InvalidUrl::UnsupportedScheme(scheme.to_string()));
    }
    if !has_authority(raw) {
        return Err(InvalidUrl::MissingHost);
    }

    let host = parsed
        .host_str()
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .ok_or(InvalidUrl::MissingHost)?;
    if host.contains(' ') {
        return Err(InvalidUrl::Unparseable(raw.to_string()));
    }

    let name = match parsed.port() {
        Some(port) => format!("{scheme}://{host}:{port}"),
        None => format!("{scheme}://{host}"),
    };

    if name.len() > MAX_NAME_LENGTH {
        return Err(InvalidUrl::TooLong);
    }
    Ok(name)
}

/// Whether `raw` spells out a non-empty `//authority` right after the scheme.
///
/// The WHATWG parser fills in a host for `http:example.com`, `http:/example.com`
/// and `https:///example.com`, so the raw text is checked as well.
fn has_authority(raw: &str) -> bool {
    raw.split_once(':')
        .and_then(|(_, rest)| rest.strip_prefix("//"))
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .is_some_and(|authority| !authority.is_empty())
}
