use crate::{transport::TransportError, ErrorBody, ErrorMessages, ErrorReport, TransportResponse};

/// A failed gateway request.
///
/// Every variant except [`Decode`](GatewayError::Decode) has already been reported to the
/// gateway's [`ErrorSink`](crate::ErrorSink) by the time the caller sees it.
/// Variants built from a response keep it, so callers can inspect the status or body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Status 401.
    #[error("{}", .0.status_text)]
    Unauthorized(TransportResponse),
    /// Status 404.
    #[error("{}", .0.status_text)]
    NotFound(TransportResponse),
    /// Status 500.
    #[error("{}", .0.status_text)]
    InternalServerError(TransportResponse),
    /// Any other non-2xx status whose body carried messages.
    #[error("{}", .response.status_text)]
    Validation {
        /// The response.
        response: TransportResponse,
        /// The messages decoded from the body.
        reports: Vec<ErrorReport>,
    },
    /// Any other non-2xx status whose body could not be read or had an unknown shape.
    #[error("{}", .0.status_text)]
    UnrecognizedResponse(TransportResponse),
    /// No response at all.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A 2xx response whose body did not decode into the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// The category of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Status 401.
    Unauthorized,
    /// Status 404.
    NotFound,
    /// Status 500.
    InternalServerError,
    /// Transport failure or an unrecognized error body.
    UnknownError,
    /// The server rejected the request with its own messages.
    FieldValidationError,
    /// A successful response with an unexpected body.
    Decode,
}

impl GatewayError {
    /// Classifies a response outside the 2xx range.
    pub fn from_response(response: TransportResponse) -> Self {
        match response.status {
            401 => GatewayError::Unauthorized(response),
            404 => GatewayError::NotFound(response),
            500 => GatewayError::InternalServerError(response),
            _ => {
                let reports = response
                    .body
                    .as_deref()
                    .and_then(ErrorBody::decode)
                    .map(|body| body.reports())
                    .unwrap_or_default();
                if reports.is_empty() {
                    GatewayError::UnrecognizedResponse(response)
                } else {
                    GatewayError::Validation { response, reports }
                }
            }
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Unauthorized(_) => ErrorKind::Unauthorized,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::InternalServerError(_) => ErrorKind::InternalServerError,
            GatewayError::Validation { .. } => ErrorKind::FieldValidationError,
            GatewayError::UnrecognizedResponse(_) | GatewayError::Transport(_) => {
                ErrorKind::UnknownError
            }
            GatewayError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// The response that caused this error, if there was one.
    pub fn response(&self) -> Option<&TransportResponse> {
        match self {
            GatewayError::Unauthorized(response)
            | GatewayError::NotFound(response)
            | GatewayError::InternalServerError(response)
            | GatewayError::UnrecognizedResponse(response)
            | GatewayError::Validation { response, .. } => Some(response),
            GatewayError::Transport(_) | GatewayError::Decode(_) => None,
        }
    }

    /// The user-facing messages for this error.
    ///
    /// [`Decode`](GatewayError::Decode) errors have none.
    pub fn reports(&self, messages: &ErrorMessages) -> Vec<ErrorReport> {
        let fixed = match self.kind() {
            ErrorKind::Unauthorized => &messages.unauthorized,
            ErrorKind::NotFound => &messages.not_found,
            ErrorKind::InternalServerError => &messages.internal_server_error,
            ErrorKind::UnknownError => &messages.unknown_error,
            ErrorKind::FieldValidationError => {
                return match self {
                    GatewayError::Validation { reports, .. } => reports.clone(),
                    _ => Vec::new(),
                }
            }
            ErrorKind::Decode => return Vec::new(),
        };
        vec![ErrorReport::message(fixed.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: Option<&str>) -> TransportResponse {
        TransportResponse {
            status,
            status_text: "Status".to_string(),
            body: body.map(str::to_string),
        }
    }

    fn reports(error: &GatewayError) -> Vec<ErrorReport> {
        error.reports(&ErrorMessages::default())
    }

    #[test]
    fn fixed_statuses() {
        let unauthorized = GatewayError::from_response(response(401, Some(r#""ignored""#)));
        let not_found = GatewayError::from_response(response(404, None));
        let internal = GatewayError::from_response(response(500, None));

        assert_eq!(ErrorKind::Unauthorized, unauthorized.kind());
        assert_eq!(ErrorKind::NotFound, not_found.kind());
        assert_eq!(ErrorKind::InternalServerError, internal.kind());

        assert_eq!(
            vec![ErrorReport::message("Unauthorized access")],
            reports(&unauthorized)
        );
        assert_eq!(
            vec![ErrorReport::message("Resource not found")],
            reports(&not_found)
        );
        assert_eq!(
            vec![ErrorReport::message("Internal server error")],
            reports(&internal)
        );
    }

    #[test]
    fn other_statuses_read_the_body() {
        let error = GatewayError::from_response(response(400, Some(r#"{"name":["required"]}"#)));

        assert_eq!(ErrorKind::FieldValidationError, error.kind());
        assert_eq!(vec![ErrorReport::field("name", "required")], reports(&error));
        assert_eq!(Some(400), error.response().map(|r| r.status));

        let error = GatewayError::from_response(response(409, Some(r#""Name already taken""#)));
        assert_eq!(vec![ErrorReport::message("Name already taken")], reports(&error));
    }

    #[test]
    fn unreadable_or_unknown_bodies_are_unknown_errors() {
        for body in [None, Some("<html></html>"), Some("{}"), Some("[1]")] {
            let error = GatewayError::from_response(response(422, body));
            assert_eq!(ErrorKind::UnknownError, error.kind(), "body: {body:?}");
            assert_eq!(vec![ErrorReport::message("Unknown error")], reports(&error));
        }
    }

    #[test]
    fn redirects_are_failures() {
        let error = GatewayError::from_response(response(302, None));
        assert_eq!(ErrorKind::UnknownError, error.kind());
    }

    #[test]
    fn transport_failures_are_unknown_errors() {
        let error: GatewayError = TransportError::Network("connection refused".into()).into();

        assert_eq!(ErrorKind::UnknownError, error.kind());
        assert_eq!(None, error.response());
        assert_eq!("network error: connection refused", error.to_string());
    }

    #[test]
    fn decode_errors_have_no_reports() {
        let error = GatewayError::Decode("expected value".into());

        assert!(reports(&error).is_empty());
    }

    #[test]
    fn custom_messages() {
        let messages = ErrorMessages {
            not_found: "Nothing here".to_string(),
            ..ErrorMessages::default()
        };
        let error = GatewayError::from_response(response(404, None));

        assert_eq!(
            vec![ErrorReport::message("Nothing here")],
            error.reports(&messages)
        );
        assert_eq!("Status", error.to_string());
    }
}
