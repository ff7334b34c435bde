use std::time::Duration;

use futures_util::StreamExt;
use gallery_logging::{gallery_debug, gallery_warn};
use url::Url;

use crate::{CatImage, FailureKind, FetchError, PageIndex};

const SEARCH_PATH: &str = "v1/images/search";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub page_size: u32,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.thecatapi.com".to_string(),
            page_size: 10,
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Remote source of gallery pages.
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_page(&self, page: PageIndex) -> Result<Vec<CatImage>, FetchError>;
}

/// Random image search against a Cat API compatible endpoint.
#[derive(Debug, Clone)]
pub struct CatApiSource {
    settings: FetchSettings,
}

impl CatApiSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Full request url for `page`.
    pub fn page_url(&self, page: PageIndex) -> Result<Url, FetchError> {
        let base = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), SEARCH_PATH);
        let page = page.to_string();
        let limit = self.settings.page_size.to_string();
        Url::parse_with_params(
            &base,
            &[
                ("size", "med"),
                ("mime_types", "jpg"),
                ("format", "json"),
                ("has_breeds", "true"),
                ("order", "RANDOM"),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
            ],
        )
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl FeedSource for CatApiSource {
    async fn fetch_page(&self, page: PageIndex) -> Result<Vec<CatImage>, FetchError> {
        let url = self.page_url(page)?;
        let client = self.build_client()?;
        gallery_debug!("Requesting page {} from {}", page, url);

        let mut request = client.get(url);
        if let Some(key) = self.settings.api_key.as_deref() {
            request = request.header("x-api-key", key);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            gallery_warn!("Page {} returned {}", page, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        let images: Vec<CatImage> = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Malformed, err.to_string()))?;
        gallery_debug!("Page {} returned {} images", page, images.len());
        Ok(images)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_carries_search_parameters() {
        let source = CatApiSource::new(FetchSettings {
            base_url: "https://example.test/".to_string(),
            ..FetchSettings::default()
        });
        let url = source.page_url(3).unwrap();

        assert_eq!(url.path(), "/v1/images/search");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("page".to_string(), "3".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(pairs.contains(&("order".to_string(), "RANDOM".to_string())));
        assert!(pairs.contains(&("has_breeds".to_string(), "true".to_string())));
    }

    #[test]
    fn page_url_rejects_garbage_base() {
        let source = CatApiSource::new(FetchSettings {
            base_url: "not a url".to_string(),
            ..FetchSettings::default()
        });
        let err = source.page_url(0).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
