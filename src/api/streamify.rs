use once_cell::sync::Lazy;
use thiserror::Error;

use crate::api::models::*;
use crate::diagnostics::PerfTimer;
use crate::utils::{get_cookie, CSRF_COOKIE};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const CONTENT_ENDPOINT: &str = "/api/v1/content/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no API origin configured")]
    NoOrigin,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}")]
    Status { status: u16 },
}

/// Read-only client for the Streamify content catalog.
pub struct StreamifyClient {
    pub base_url: String,
}

impl StreamifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
        }
    }

    fn origin(&self) -> Result<String, ApiError> {
        if !self.base_url.is_empty() {
            return Ok(self.base_url.clone());
        }
        page_origin().ok_or(ApiError::NoOrigin)
    }

    pub fn content_url(&self, query: &ContentQuery) -> Result<String, ApiError> {
        let origin = self.origin()?;
        let params = query.query_string();
        if params.is_empty() {
            Ok(format!("{origin}{CONTENT_ENDPOINT}"))
        } else {
            Ok(format!("{origin}{CONTENT_ENDPOINT}?{params}"))
        }
    }

    pub async fn list_content(&self, query: &ContentQuery) -> Result<Vec<Content>, ApiError> {
        let url = self.content_url(query)?;
        let timer = PerfTimer::start("catalog.list_content");

        let mut request = HTTP_CLIENT.get(&url).header("Accept", "application/json");
        if let Some(token) = get_cookie(CSRF_COOKIE) {
            request = request.header("X-CSRFToken", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalog request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let body: ContentListResponse = response.json().await?;
        let items: Vec<Content> = body
            .into_items()
            .into_iter()
            .filter(|item| item.content_type == query.content_type)
            .collect();
        timer.finish(&format!("{} items", items.len()));
        Ok(items)
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_content_url_from_configured_origin() {
        let client = StreamifyClient::new("https://streamify.example/ ");
        let url = client
            .content_url(&ContentQuery::audio().with_genre("jazz"))
            .unwrap();
        assert_eq!(
            url,
            "https://streamify.example/api/v1/content/?type=audio&genre=jazz"
        );
    }

    #[test]
    fn empty_origin_off_page_is_an_error() {
        let client = StreamifyClient::new("");
        assert!(matches!(
            client.content_url(&ContentQuery::audio()),
            Err(ApiError::NoOrigin)
        ));
    }
}
