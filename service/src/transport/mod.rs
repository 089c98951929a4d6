use async_trait::async_trait;
use serde::Serialize;

use crate::{Credentials, Method};

/// Performs the HTTP exchange for a [`RequestGateway`](crate::RequestGateway).
///
/// Implementations issue exactly one request and read the whole response body.
/// They never retry and never interpret the status code.
#[async_trait(?Send)]
pub trait Transport {
    /// Sends the request and waits for the full response.
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError>;
}

/// A request as handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    /// Target url.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Headers, in order.
    pub headers: Vec<(String, String)>,
    /// Credentials mode.
    pub credentials: Credentials,
    /// Body.
    pub body: RequestBody,
}

/// The body of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Text, sent as is.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Form fields, sent url-encoded.
    Form(Vec<(String, String)>),
    /// A JSON document.
    Json(serde_json::Value),
}

impl RequestBody {
    /// Serializes a value as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(RequestBody::Json)
    }

    /// The bytes to put on the wire, if any.
    pub fn to_bytes(&self) -> Result<Option<Vec<u8>>, TransportError> {
        let bytes = match self {
            RequestBody::Empty => return Ok(None),
            RequestBody::Text(text) => text.as_bytes().to_vec(),
            RequestBody::Bytes(bytes) => bytes.clone(),
            RequestBody::Form(fields) => serde_urlencoded::to_string(fields)
                .map_err(|e| TransportError::Body(e.to_string()))?
                .into_bytes(),
            RequestBody::Json(value) => {
                serde_json::to_vec(value).map_err(|e| TransportError::Body(e.to_string()))?
            }
        };
        Ok(Some(bytes))
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl<T: Into<RequestBody>> From<Option<T>> for RequestBody {
    fn from(body: Option<T>) -> Self {
        body.map(Into::into).unwrap_or_default()
    }
}

/// A response as returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// The body, or `None` if it could not be read.
    pub body: Option<String>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that produced no response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Body(String),
    /// The request could not be built, e.g. an invalid url.
    #[error("invalid request: {0}")]
    Request(String),
    /// Network failure.
    #[error("network error: {0}")]
    Network(String),
}

#[async_trait(?Send)]
impl<T> Transport for std::rc::Rc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(feature = "reqwest")]
mod fetch;
#[cfg(feature = "reqwest")]
pub use fetch::HttpTransport;

#[cfg(test)]
pub(crate) mod mock;
