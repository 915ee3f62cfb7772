use std::env;

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.alamthal.org/api";
pub const DEFAULT_MEDIA_BASE_URL: &str = "https://quiz.alamthal.org/quiz/images";

pub const API_BASE_URL_ENV: &str = "QUIZ_API_BASE_URL";
pub const MEDIA_BASE_URL_ENV: &str = "QUIZ_MEDIA_BASE_URL";

/// Where the backend and its question media live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    media_base_url: Url,
}

impl ApiConfig {
    /// Parse and validate both base URLs.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` for unparsable input and `ApiError::InvalidBaseUrl`
    /// for URLs that cannot carry path segments (e.g. `mailto:`).
    pub fn new(base_url: &str, media_base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            media_base_url: parse_base(media_base_url)?,
        })
    }

    /// Read `QUIZ_API_BASE_URL` / `QUIZ_MEDIA_BASE_URL`, falling back to the
    /// production hosts.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        let base = env::var(API_BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        let media =
            env::var(MEDIA_BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_MEDIA_BASE_URL.into());
        Self::new(&base, &media)
    }

    /// Production hosts.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::new`].
    pub fn production() -> Result<Self, ApiError> {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_MEDIA_BASE_URL)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn media_base_url(&self) -> &Url {
        &self.media_base_url
    }

    /// Media base without a trailing slash, ready for string joining.
    #[must_use]
    pub fn media_base(&self) -> &str {
        self.media_base_url.as_str().trim_end_matches('/')
    }

    /// Append path segments to the API base. Each segment is percent-encoded,
    /// so category names with spaces or slashes stay a single segment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_encoded_segments() {
        let config = ApiConfig::new("https://api.example.test/api/", DEFAULT_MEDIA_BASE_URL).unwrap();
        let url = config
            .endpoint(&["student-progress", "7", "التناظر اللفظي"])
            .unwrap();
        assert!(url
            .as_str()
            .starts_with("https://api.example.test/api/student-progress/7/"));
        assert!(!url.as_str().contains(' '));

        let url = config.endpoint(&["question-categories"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.test/api/question-categories");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(matches!(
            ApiConfig::new("mailto:admin@example.test", DEFAULT_MEDIA_BASE_URL),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiConfig::new("not a url", DEFAULT_MEDIA_BASE_URL),
            Err(ApiError::Url(_))
        ));
    }

    #[test]
    fn media_base_has_no_trailing_slash() {
        let config = ApiConfig::new(DEFAULT_API_BASE_URL, "https://cdn.example.test/images/").unwrap();
        assert_eq!(config.media_base(), "https://cdn.example.test/images");
    }
}
