//! Validated API base address.

use std::fmt;
use std::str::FromStr;

use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// Root every request path is appended to, e.g.
/// `https://api.ticketera.cl/api/v1`.
///
/// Must be absolute and use HTTPS, except on loopback hosts where plain HTTP
/// is accepted for local development. Stored without a trailing slash.
///
/// ```
/// use ticketera_core::ApiUrl;
///
/// let api: ApiUrl = "https://api.example.cl/api/v1/".parse().unwrap();
/// assert_eq!(api.endpoint("/events/42"), "https://api.example.cl/api/v1/events/42");
/// assert!(ApiUrl::new("http://api.example.cl").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(String);

impl ApiUrl {
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let raw = s.as_ref().trim();
        let invalid = |reason: &str| -> Error {
            InvalidInputError::ApiUrl {
                value: raw.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

        let loopback = match url.host() {
            Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
            Some(Host::Ipv4(ip)) => ip.is_loopback(),
            Some(Host::Ipv6(ip)) => ip.is_loopback(),
            None => return Err(invalid("must be an absolute URL with a host")),
        };
        match url.scheme() {
            "https" => {}
            "http" if loopback => {}
            _ => return Err(invalid("must use HTTPS (HTTP allowed only for localhost)")),
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not have a query or fragment"));
        }

        Ok(Self(url.as_str().trim_end_matches('/').to_string()))
    }

    /// Full URL for a path under this base. A leading slash is optional.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
