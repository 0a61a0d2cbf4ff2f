use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Proxy};
use url::Url;

use crate::config::FormConfig;
use crate::{Error, Result};

/// Status and raw body of the endpoint's reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers a form-encoded body to an endpoint
#[async_trait::async_trait]
pub trait FormTransport: Send + Sync {
    /// Any reply, including a non-2xx one, is `Ok`. `Err` means the request
    /// never produced a response.
    async fn post(&self, endpoint: &str, fields: &[(String, String)]) -> Result<TransportResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &FormConfig) -> Result<Self> {
        let client = Self::build_client(config.request_timeout_secs, &config.proxy_url)?;
        Ok(Self { client })
    }

    /// Build HTTP client with optional timeout and proxy
    fn build_client(timeout_secs: Option<u64>, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        // No timeout unless configured; a hung endpoint keeps the form busy
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for form submission");
        }

        builder.build().map_err(Error::Http)
    }
}

#[async_trait::async_trait]
impl FormTransport for HttpTransport {
    async fn post(&self, endpoint: &str, fields: &[(String, String)]) -> Result<TransportResponse> {
        let url = Url::parse(endpoint)?;
        tracing::debug!(%url, fields = fields.len(), "Posting form");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .form(fields)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "Form endpoint replied");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fields() -> Vec<(String, String)> {
        vec![
            ("name".to_string(), "Ada Lovelace".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_posts_form_encoded_with_json_accept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/f/contact"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("name=Ada+Lovelace"))
            .and(body_string_contains("email=ada%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&FormConfig::default()).unwrap();
        let response = transport
            .post(&format!("{}/f/contact", server.uri()), &fields())
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_error_status_is_still_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("{}"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&FormConfig::default()).unwrap();
        let response = transport.post(&server.uri(), &fields()).await.unwrap();
        assert_eq!(response.status, 422);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_an_error() {
        let transport = HttpTransport::new(&FormConfig::default()).unwrap();
        let err = transport.post("not a url", &fields()).await.unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = FormConfig {
            proxy_url: Some("::not a proxy::".to_string()),
            ..Default::default()
        };
        assert!(matches!(HttpTransport::new(&config), Err(Error::Config(_))));
    }
}
