use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// A resolved, user-facing error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// The message to show.
    pub message: String,
    /// The field the message belongs to, for validation errors.
    pub field: Option<String>,
}

impl ErrorReport {
    /// A message that belongs to no particular field.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// A validation message for one field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// The body of a rejected response, decoded by shape.
///
/// Recognized shapes:
/// - a bare JSON string: `"Name already taken"`
/// - a map of field names to messages: `{"name": ["required"]}`
/// - the older nested model-state shape: `{"": {"errors": [{"errorMessage": "..."}]}}`
///
/// A map that mixes the nested shape with field lists decodes as [`ErrorBody::Fields`], so
/// no message is lost.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// The body is the message.
    Message(String),
    /// Messages nested under the empty key.
    Legacy(LegacyErrorBody),
    /// Messages per field.
    Fields(FieldErrors),
}

/// Field entries in the order the server wrote them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<(String, FieldMessages)>);

/// The value of one [`FieldErrors`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldMessages {
    /// `["required", "too short"]`
    List(Vec<String>),
    /// `{"errors": [{"errorMessage": "..."}]}`
    Nested(LegacyModelErrors),
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldErrorsVisitor;

        impl<'de> Visitor<'de> for FieldErrorsVisitor {
            type Value = FieldErrors;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to messages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FieldErrors, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, FieldMessages>()? {
                    entries.push(entry);
                }
                Ok(FieldErrors(entries))
            }
        }

        deserializer.deserialize_map(FieldErrorsVisitor)
    }
}

/// `{"": {"errors": [{"errorMessage": "..."}]}}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyErrorBody {
    /// Errors that belong to the model as a whole.
    #[serde(rename = "")]
    pub model: LegacyModelErrors,
}

/// The errors array of a [`LegacyErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyModelErrors {
    /// The errors.
    pub errors: Vec<LegacyError>,
}

/// One entry of [`LegacyModelErrors`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyError {
    /// The message.
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl ErrorBody {
    /// Decodes a response body. Returns `None` if the text is not JSON or has another shape.
    pub fn decode(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// One report per message, in body order.
    pub fn reports(&self) -> Vec<ErrorReport> {
        match self {
            ErrorBody::Message(message) => vec![ErrorReport::message(message.clone())],
            ErrorBody::Legacy(body) => body.model.reports(None),
            ErrorBody::Fields(FieldErrors(fields)) => fields
                .iter()
                .flat_map(|(field, messages)| match messages {
                    FieldMessages::List(messages) => messages
                        .iter()
                        .map(|message| ErrorReport::field(field.clone(), message.clone()))
                        .collect(),
                    FieldMessages::Nested(model) => {
                        model.reports(Some(field).filter(|f| !f.is_empty()))
                    }
                })
                .collect(),
        }
    }
}

impl LegacyModelErrors {
    fn reports(&self, field: Option<&String>) -> Vec<ErrorReport> {
        self.errors
            .iter()
            .map(|e| ErrorReport {
                message: e.error_message.clone(),
                field: field.cloned(),
            })
            .collect()
    }
}
