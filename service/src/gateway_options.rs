/// User-facing messages for the failures that carry no message of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    /// Shown for a 401 response.
    pub unauthorized: String,
    /// Shown for a 500 response.
    pub internal_server_error: String,
    /// Shown for a 404 response.
    pub not_found: String,
    /// Shown for transport failures and unrecognized error bodies.
    pub unknown_error: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            unauthorized: "Unauthorized access".to_string(),
            internal_server_error: "Internal server error".to_string(),
            not_found: "Resource not found".to_string(),
            unknown_error: "Unknown error".to_string(),
        }
    }
}

/// Whether the browser sends cookies and auth headers with a request.
///
/// Only honored by transports running in the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Send credentials to the same origin only.
    #[default]
    SameOrigin,
    /// Always send credentials, including cross-origin.
    Include,
    /// Never send credentials.
    Omit,
}

/// Options for a [`RequestGateway`](crate::RequestGateway).
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Headers sent with every request.
    /// Defaults to JSON `Accept` and `Content-Type`.
    pub headers: Vec<(String, String)>,
    /// Credentials mode for every request.
    pub credentials: Credentials,
    /// Messages reported for failures without a body message.
    pub error_messages: ErrorMessages,
}

impl GatewayOptions {
    /// Set the headers.
    pub fn set_headers(self, headers: Vec<(String, String)>) -> Self {
        GatewayOptions { headers, ..self }
    }

    /// Add a header to the defaults.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the credentials mode.
    pub fn set_credentials(self, credentials: Credentials) -> Self {
        GatewayOptions {
            credentials,
            ..self
        }
    }

    /// Set the error messages.
    pub fn set_error_messages(self, error_messages: ErrorMessages) -> Self {
        GatewayOptions {
            error_messages,
            ..self
        }
    }
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            headers: vec![
                ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
                ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
            ],
            credentials: Credentials::default(),
            error_messages: ErrorMessages::default(),
        }
    }
}

const JSON_CONTENT_TYPE: &str = "application/json";
