use leptos::*;
use serde::de::DeserializeOwned;
use std::{cell::RefCell, rc::Rc};

use crate::{
    transport::Transport, ErrorSink, GatewayError, GatewayOptions, GatewayRequest, LoadingState,
    Method, RequestBody, TransportResponse,
};

/// Provides a Request Gateway backed by [`HttpTransport`](crate::transport::HttpTransport) to the current scope.
#[cfg(feature = "reqwest")]
pub fn provide_request_gateway() {
    provide_request_gateway_with_options(GatewayOptions::default());
}

/// Provides a Request Gateway backed by [`HttpTransport`](crate::transport::HttpTransport) to the current scope with custom options.
#[cfg(feature = "reqwest")]
pub fn provide_request_gateway_with_options(options: GatewayOptions) {
    provide_request_gateway_with_transport(crate::transport::HttpTransport::new(), options);
}

/// Provides a Request Gateway with a custom transport to the current scope.
pub fn provide_request_gateway_with_transport(
    transport: impl Transport + 'static,
    options: GatewayOptions,
) {
    provide_context(RequestGateway::new(transport, options));
}

/// Retrieves the Request Gateway from the current scope.
pub fn use_request_gateway() -> RequestGateway {
    use_context::<RequestGateway>().expect("Request Gateway Missing.")
}

/// Issues requests to a JSON backend.
///
/// Every request:
/// - counts as [loading](Self::loading) from just before it is sent until its response arrives
/// - is sent once, with the configured headers and credentials mode
/// - on a status outside 200..300 or a transport failure, is classified into a [`GatewayError`],
///   reported to the [error sink](Self::set_error_sink), and returned as `Err`
///
/// Clones share the transport, the loading state, and the error sink.
#[derive(Clone)]
pub struct RequestGateway {
    transport: Rc<dyn Transport>,
    options: Rc<GatewayOptions>,
    loading: LoadingState,
    error_sink: Rc<RefCell<ErrorSink>>,
}

impl RequestGateway {
    /// Creates a gateway with its own loading state and the console error sink.
    pub fn new(transport: impl Transport + 'static, options: GatewayOptions) -> Self {
        Self {
            transport: Rc::new(transport),
            options: Rc::new(options),
            loading: LoadingState::new(),
            error_sink: Rc::new(RefCell::new(ErrorSink::default())),
        }
    }

    /// Counts this gateway's requests in an existing loading state.
    /// Use it to drive one spinner from several gateways.
    pub fn with_loading_state(self, loading: LoadingState) -> Self {
        Self { loading, ..self }
    }

    /// Reports failures to the given sink.
    /// Unlike [`set_error_sink`](Self::set_error_sink), previous clones keep their sink.
    pub fn with_error_sink(self, error_sink: ErrorSink) -> Self {
        Self {
            error_sink: Rc::new(RefCell::new(error_sink)),
            ..self
        }
    }

    /// Replaces the error sink for this gateway and all of its clones.
    pub fn set_error_sink(&self, error_sink: ErrorSink) {
        *self.error_sink.borrow_mut() = error_sink;
    }

    /// True while any request of this gateway, or of gateways sharing its loading state, is in flight.
    pub fn loading(&self) -> Signal<bool> {
        self.loading.loading()
    }

    /// The number of requests in flight.
    pub fn in_flight(&self) -> Signal<usize> {
        self.loading.in_flight()
    }

    /// The loading state, for sharing with [`with_loading_state`](Self::with_loading_state).
    pub fn loading_state(&self) -> LoadingState {
        self.loading
    }

    /// The options of this gateway.
    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// Sends a request and returns the successful response as is.
    pub async fn request(
        &self,
        url: &str,
        method: Method,
        body: impl Into<RequestBody>,
    ) -> Result<TransportResponse, GatewayError> {
        let request = GatewayRequest {
            url: url.to_string(),
            method,
            headers: self.options.headers.clone(),
            credentials: self.options.credentials,
            body: body.into(),
        };

        let loading = self.loading.start();
        let result = self.transport.send(request).await;
        drop(loading);

        let error = match result {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => GatewayError::from_response(response),
            Err(error) => GatewayError::from(error),
        };

        logging::debug_warn!("Request to {url} failed: {error}");
        self.report(&error);
        Err(error)
    }

    /// Sends a request and discards the body of the successful response.
    pub async fn request_no_content(
        &self,
        url: &str,
        method: Method,
        body: impl Into<RequestBody>,
    ) -> Result<(), GatewayError> {
        self.request(url, method, body).await.map(|_| ())
    }

    /// Sends a request and decodes the JSON body of the successful response.
    ///
    /// Example:
    /// ```
    /// use leptos_service_helpers::*;
    ///
    /// #[derive(Debug, Clone, serde::Deserialize)]
    /// struct Monkey {
    ///     name: String,
    /// }
    ///
    /// async fn get_monkey(id: u32) -> Result<Monkey, GatewayError> {
    ///     use_request_gateway()
    ///         .request_one(&format!("/api/monkeys/{id}"), Method::GET, RequestBody::Empty)
    ///         .await
    /// }
    /// ```
    pub async fn request_one<T>(
        &self,
        url: &str,
        method: Method,
        body: impl Into<RequestBody>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let response = self.request(url, method, body).await?;
        decode(&response)
    }

    /// Sends a request and decodes the JSON array body of the successful response.
    pub async fn request_many<T>(
        &self,
        url: &str,
        method: Method,
        body: impl Into<RequestBody>,
    ) -> Result<Vec<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        self.request_one::<Vec<T>>(url, method, body).await
    }

    /// Like [`request_one`](Self::request_one), then applies `map` to the decoded value.
    pub async fn request_one_mapped<T, R>(
        &self,
        url: &str,
        method: Method,
        body: impl Into<RequestBody>,
        map: impl FnOnce(T) -> R,
    ) -> Result<R, GatewayError>
    where
        T: DeserializeOwned,
    {
        self.request_one(url, method, body).await.map(map)
    }

    /// Like [`request_many`](Self::request_many), then applies `map` to every element.
    pub async fn request_many_mapped<T, R>(
        &self,
        url: &str,
        method: Method,
        body: impl Into<RequestBody>,
        map: impl FnMut(T) -> R,
    ) -> Result<Vec<R>, GatewayError>
    where
        T: DeserializeOwned,
    {
        let items = self.request_many::<T>(url, method, body).await?;
        Ok(items.into_iter().map(map).collect())
    }

    fn report(&self, error: &GatewayError) {
        // Cloned so the sink itself may replace the sink.
        let sink = self.error_sink.borrow().clone();
        sink.report_all(&error.reports(&self.options.error_messages));
    }
}

impl std::fmt::Debug for RequestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGateway")
            .field("options", &self.options)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(response: &TransportResponse) -> Result<T, GatewayError> {
    let body = response
        .body
        .as_deref()
        .ok_or_else(|| GatewayError::Decode("response body could not be read".to_string()))?;
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}
