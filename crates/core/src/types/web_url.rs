//! Web URL type for map links and cafe photos.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Errors that can occur when parsing a [`WebUrl`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The input string is empty.
    #[error("URL cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("URL must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not an absolute URL.
    #[error("invalid URL: {0}")]
    Malformed(String),
    /// The scheme is not `http` or `https`.
    #[error("URL must use http or https, not {0}")]
    UnsupportedScheme(String),
    /// The URL has no host.
    #[error("URL must have a host")]
    MissingHost,
}

/// An absolute `http`/`https` URL.
///
/// The trimmed input is kept as submitted rather than in `url`'s normalised
/// form.
///
/// ## Constraints
///
/// - Length: 1-500 characters
/// - Must parse as an absolute URL
/// - Scheme must be `http` or `https`
/// - Must have a host
///
/// ## Examples
///
/// ```
/// use cafe_directory_core::WebUrl;
///
/// assert!(WebUrl::parse("https://maps.example/1").is_ok());
/// assert!(WebUrl::parse("not-a-url").is_err());
/// assert!(WebUrl::parse("ftp://files.example/1").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WebUrl(String);

impl WebUrl {
    /// Maximum length of a stored URL.
    pub const MAX_LENGTH: usize = 500;

    /// Parse a `WebUrl` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 500 characters
    /// - Is not an absolute URL
    /// - Uses a scheme other than `http`/`https`
    /// - Has no host
    pub fn parse(s: &str) -> Result<Self, UrlError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UrlError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UrlError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let url = Url::parse(s).map_err(|e| UrlError::Malformed(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(UrlError::UnsupportedScheme(url.scheme().to_owned()));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(UrlError::MissingHost);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `WebUrl` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WebUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for WebUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_urls() {
        assert!(WebUrl::parse("https://maps.example/1").is_ok());
        assert!(WebUrl::parse("http://img.example/cafe.jpg").is_ok());
        assert!(WebUrl::parse("https://goo.gl/maps/abc?x=1#frag").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(WebUrl::parse(""), Err(UrlError::Empty)));
        assert!(matches!(WebUrl::parse("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_parse_relative() {
        assert!(matches!(
            WebUrl::parse("not-a-url"),
            Err(UrlError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        assert!(matches!(
            WebUrl::parse("mailto:owner@cafe.example"),
            Err(UrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("https://example.com/{}", "a".repeat(500));
        assert!(matches!(
            WebUrl::parse(&long),
            Err(UrlError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let url = WebUrl::parse("  https://maps.example/1 ").unwrap();
        assert_eq!(url.as_str(), "https://maps.example/1");
    }

    #[test]
    fn test_display() {
        let url = WebUrl::parse("https://maps.example/1").unwrap();
        assert_eq!(format!("{url}"), "https://maps.example/1");
    }
}
