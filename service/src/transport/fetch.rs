use async_trait::async_trait;

use super::*;

/// The default transport, backed by [`reqwest`].
///
/// In the browser reqwest goes through `fetch`, and the request's [`Credentials`] mode is applied.
/// Natively the credentials mode has no counterpart and is ignored.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that sends through an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError> {
        let GatewayRequest {
            url,
            method,
            headers,
            credentials,
            body,
        } = request;

        let mut builder = self.client.request(method, url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(bytes) = body.to_bytes()? {
            builder = builder.body(bytes);
        }
        builder = apply_credentials(builder, credentials);

        let request = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        // An unreadable body is reported as absent rather than as a transport failure.
        let body = response.text().await.ok();

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

fn apply_credentials(
    builder: reqwest::RequestBuilder,
    credentials: Credentials,
) -> reqwest::RequestBuilder {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            match credentials {
                Credentials::SameOrigin => builder.fetch_credentials_same_origin(),
                Credentials::Include => builder.fetch_credentials_include(),
                Credentials::Omit => builder.fetch_credentials_omit(),
            }
        } else {
            let _ = credentials;
            builder
        }
    }
}
