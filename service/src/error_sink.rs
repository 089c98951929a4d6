use std::rc::Rc;

use crate::ErrorReport;

/// Receives every failure classified by a [`RequestGateway`](crate::RequestGateway).
///
/// The callback gets the user-facing message and, for field validation errors, the
/// name of the offending field. Replace the default with a function that shows the
/// message in your UI.
///
/// Example:
/// ```
/// use leptos::*;
/// use leptos_service_helpers::*;
///
/// fn toasts() -> ErrorSink {
///     let (messages, set_messages) = create_signal(Vec::<String>::new());
///     let _ = messages;
///     ErrorSink::new(move |message, field| {
///         let text = match field {
///             Some(field) => format!("{field}: {message}"),
///             None => message.to_string(),
///         };
///         set_messages.update(|m| m.push(text));
///     })
/// }
/// ```
#[derive(Clone)]
pub struct ErrorSink(Rc<dyn Fn(&str, Option<&str>)>);

impl ErrorSink {
    /// Creates a sink from a callback.
    pub fn new(sink: impl Fn(&str, Option<&str>) + 'static) -> Self {
        Self(Rc::new(sink))
    }

    /// The sink used when none is configured. Writes to the console.
    pub fn console() -> Self {
        Self::new(|message, field| match field {
            Some(field) => leptos::logging::error!("{field}: {message}"),
            None => leptos::logging::error!("{message}"),
        })
    }

    /// Hands one message to the callback.
    pub fn report(&self, message: &str, field: Option<&str>) {
        (self.0)(message, field)
    }

    pub(crate) fn report_all(&self, reports: &[ErrorReport]) {
        for report in reports {
            self.report(&report.message, report.field.as_deref());
        }
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        Self::console()
    }
}

impl std::fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErrorSink").finish()
    }
}
