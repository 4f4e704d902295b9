//! HTTP implementation of [`CounterClient`]
//!
//! Django protects handler endpoints with a CSRF cookie/header pair: the
//! value of the `csrftoken` cookie has to be echoed in `X-CSRFToken`.

use crate::client::CounterClient;
use crate::types::{CountResponse, IncrementRequest};
use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};

/// Name of the CSRF cookie
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the CSRF token is echoed in
pub const CSRF_HEADER_NAME: &str = "X-CSRFTOKEN";

/// Client posting to the LMS over HTTP
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    csrf_token: Option<String>,
}

impl HttpClient {
    pub fn new(csrf_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            csrf_token,
        }
    }

    fn request(&self, url: &str, body: String) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        match &self.csrf_token {
            Some(token) => builder
                .header(COOKIE, format!("{}={}", CSRF_COOKIE_NAME, token))
                .header(CSRF_HEADER_NAME, token.as_str()),
            None => builder,
        }
    }
}

#[async_trait]
impl CounterClient for HttpClient {
    async fn increment_count(
        &self,
        url: &str,
        request: &IncrementRequest,
    ) -> anyhow::Result<CountResponse> {
        let body = serde_json::to_string(request)?;
        log::debug!("POST {} {}", url, body);

        let resp = self
            .request(url, body)
            .send()
            .await
            .with_context(|| format!("Failed to reach handler {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Handler {} answered {}: {}", url, status.as_u16(), body);
        }

        resp.json::<CountResponse>()
            .await
            .with_context(|| format!("Handler {} returned no count", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_csrf_pair() {
        let client = HttpClient::new(Some("s3cret".to_string()));
        let request = client
            .request("http://localhost/handler/increment_count/", "{}".to_string())
            .build()
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers[COOKIE], "csrftoken=s3cret");
        assert_eq!(headers[CSRF_HEADER_NAME], "s3cret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.method(), &reqwest::Method::POST);
    }

    #[test]
    fn test_request_without_token_has_no_csrf_headers() {
        let client = HttpClient::new(None);
        let request = client
            .request("http://localhost/handler/increment_count/", "{}".to_string())
            .build()
            .unwrap();

        assert!(request.headers().get(COOKIE).is_none());
        assert!(request.headers().get(CSRF_HEADER_NAME).is_none());
    }
}
