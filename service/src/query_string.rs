use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::dates::to_iso_string;

/// Characters escaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A value that can appear in a query string.
///
/// `None` values are left out of the query string entirely.
pub trait ToQueryValue {
    /// The unencoded text of the value, or `None` to skip the parameter.
    fn to_query_value(&self) -> Option<String>;
}

macro_rules! display_query_value {
    ($($ty:ty),*) => {
        $(
            impl ToQueryValue for $ty {
                fn to_query_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_query_value!(
    str, String, char, bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
    f32, f64
);

impl ToQueryValue for DateTime<Utc> {
    fn to_query_value(&self) -> Option<String> {
        Some(to_iso_string(self))
    }
}

impl<T: ToQueryValue> ToQueryValue for Option<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_ref().and_then(ToQueryValue::to_query_value)
    }
}

impl<T: ToQueryValue + ?Sized> ToQueryValue for &T {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

/// Builds a query string, keeping parameters in insertion order.
///
/// Example:
/// ```
/// use leptos_service_helpers::QueryString;
///
/// let query = QueryString::new()
///     .param("page", 2)
///     .param("search", "monkey & co")
///     .param("zoo", None::<u32>)
///     .build();
///
/// assert_eq!("?page=2&search=monkey%20%26%20co", query);
/// assert_eq!("", QueryString::new().build());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// An empty query string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, unless the value is absent.
    pub fn param(mut self, key: impl Into<String>, value: impl ToQueryValue) -> Self {
        self.push(key, value);
        self
    }

    /// Adds a parameter in place, unless the value is absent.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToQueryValue) {
        if let Some(value) = value.to_query_value() {
            self.pairs.push((key.into(), value));
        }
    }

    /// Whether no parameter was added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `?key=value&...` with values percent-encoded, or `""` if there are no parameters.
    /// Keys are written as given.
    pub fn build(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for QueryString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(f, "{separator}{key}={}", utf8_percent_encode(value, COMPONENT))?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: ToQueryValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = QueryString::new();
        for (key, value) in iter {
            query.push(key, value);
        }
        query
    }
}

/// Builds a query string from key/value pairs. See [`QueryString`].
pub fn build_query<K, V>(parameters: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Into<String>,
    V: ToQueryValue,
{
    parameters.into_iter().collect::<QueryString>().build()
}

/// A value that cannot be turned into query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryStringError {
    /// Serialization failed.
    #[error("failed to serialize query parameters: {0}")]
    Serialize(String),
    /// The value is not a struct or map.
    #[error("query parameters must be a struct or map")]
    NotAMap,
    /// A parameter holds a nested struct or map.
    #[error("query parameter {0:?} is a nested object")]
    Nested(String),
}

/// Builds a query string from the fields of a struct or the entries of a map.
///
/// Fields are written in name order. `None` fields are skipped, sequences are joined with `,`.
///
/// Example:
/// ```
/// use leptos_service_helpers::query_string_from;
///
/// #[derive(serde::Serialize)]
/// struct Filter {
///     tags: Vec<&'static str>,
///     page: u32,
///     search: Option<String>,
/// }
///
/// let filter = Filter { tags: vec!["a", "b"], page: 1, search: None };
/// assert_eq!(Ok("?page=1&tags=a%2Cb".to_string()), query_string_from(&filter));
/// ```
pub fn query_string_from<T: Serialize + ?Sized>(parameters: &T) -> Result<String, QueryStringError> {
    use serde_json::Value;

    let value =
        serde_json::to_value(parameters).map_err(|e| QueryStringError::Serialize(e.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(String::new()),
        _ => return Err(QueryStringError::NotAMap),
    };

    let mut entries: Vec<_> = map.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut query = QueryString::new();
    for (key, value) in entries {
        let text = match value {
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| scalar_text(item).ok_or_else(|| QueryStringError::Nested(key.clone())))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(","),
            ),
            Value::Object(_) => return Err(QueryStringError::Nested(key)),
            Value::Null => None,
            scalar => scalar_text(&scalar),
        };
        query.push(key, text);
    }
    Ok(query.build())
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
