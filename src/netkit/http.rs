use crate::config::{self, HttpSettings};
use crate::utils::error::Result;
use reqwest::{header::CONTENT_TYPE, Client, Proxy};
use std::collections::HashMap;
use std::time::Duration;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Thin wrapper over a reqwest client configured from [`HttpSettings`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(settings.timeout_seconds));
        if let Some(agent) = &settings.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(proxy) = &settings.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Client built from the process-wide settings.
    pub fn from_global() -> Result<Self> {
        Self::new(&config::http_settings())
    }

    /// GET `url` with `params` appended as a query string and return the body.
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        tracing::debug!("GET {} ({} params)", url, params.len());
        let response = self.client.get(url).query(params).send().await?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response.text().await?)
    }

    /// POST an already encoded JSON body.
    pub async fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>> {
        tracing::debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.to_vec())
            .send()
            .await?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response.bytes().await?.to_vec())
    }

    /// POST `data` as a JSON object with extra request headers.
    pub async fn post(
        &self,
        url: &str,
        data: &HashMap<String, String>,
        headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>> {
        let body = serde_json::to_vec(data)?;
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }

        tracing::debug!("POST {} with {} extra headers", url, headers.len());
        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response.bytes().await?.to_vec())
    }

    /// GET `url` through `proxy` (e.g. `http://proxy.example.com:8080`), keeping the
    /// other process-wide settings.
    pub async fn get_with_proxy(proxy: &str, url: &str) -> Result<String> {
        let settings = HttpSettings {
            proxy: Some(proxy.to_string()),
            ..config::http_settings()
        };
        Self::new(&settings)?.get(url, &[]).await
    }
}

pub async fn http_get(url: &str, params: &[(&str, &str)]) -> Result<String> {
    HttpClient::from_global()?.get(url, params).await
}

pub async fn http_post_json(url: &str, body: &[u8]) -> Result<Vec<u8>> {
    HttpClient::from_global()?.post_json(url, body).await
}

pub async fn post(
    url: &str,
    data: &HashMap<String, String>,
    headers: &HashMap<String, String>,
) -> Result<Vec<u8>> {
    HttpClient::from_global()?.post(url, data, headers).await
}

pub async fn http_get_with_proxy(proxy: &str, url: &str) -> Result<String> {
    HttpClient::get_with_proxy(proxy, url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_settings() {
        let settings = HttpSettings {
            timeout_seconds: 2,
            user_agent: Some("cvkit-test".to_string()),
            proxy: Some("http://127.0.0.1:3128".to_string()),
        };
        assert!(HttpClient::new(&settings).is_ok());
        assert!(HttpClient::from_global().is_ok());
    }

    #[test]
    fn test_bad_proxy_is_error() {
        let settings = HttpSettings {
            proxy: Some("http://[::1".to_string()),
            ..HttpSettings::default()
        };
        assert!(HttpClient::new(&settings).is_err());
    }

    #[tokio::test]
    async fn test_get_with_bad_proxy_fails_before_sending() {
        let result = HttpClient::get_with_proxy("http://[::1", "http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }
}
