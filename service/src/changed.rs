use chrono::{DateTime, Utc};
use leptos::*;
use std::rc::Rc;

use crate::dates::to_date;

/// A value that can tell whether it differs from the value it started with.
///
/// Reactive implementations read their signal tracked, so predicates built on them can be
/// used inside [`create_memo`](leptos::create_memo) and re-run when the value changes.
pub trait Changeable {
    /// Whether the value changed.
    fn has_changed(&self) -> bool;
}

impl Changeable for bool {
    fn has_changed(&self) -> bool {
        *self
    }
}

impl Changeable for Signal<bool> {
    fn has_changed(&self) -> bool {
        self.get()
    }
}

impl Changeable for Memo<bool> {
    fn has_changed(&self) -> bool {
        self.get()
    }
}

impl Changeable for ReadSignal<bool> {
    fn has_changed(&self) -> bool {
        self.get()
    }
}

impl Changeable for RwSignal<bool> {
    fn has_changed(&self) -> bool {
        self.get()
    }
}

impl<T: Changeable + ?Sized> Changeable for &T {
    fn has_changed(&self) -> bool {
        (**self).has_changed()
    }
}

impl<T: Changeable + ?Sized> Changeable for Rc<T> {
    fn has_changed(&self) -> bool {
        (**self).has_changed()
    }
}

/// An editable value paired with the snapshot it started from.
///
/// Example:
/// ```
/// use leptos::*;
/// use leptos_service_helpers::changed::Tracked;
/// use leptos_service_helpers::Changeable;
///
/// # let _ = create_runtime();
/// let name = Tracked::new("George".to_string());
/// assert!(!name.has_changed());
///
/// name.value().set("Luffy".to_string());
/// assert!(name.has_changed());
///
/// // Saved. The current value becomes the new original.
/// name.reset();
/// assert!(!name.has_changed());
/// ```
pub struct Tracked<T: 'static> {
    value: RwSignal<T>,
    original: StoredValue<T>,
}

impl<T: 'static> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Tracked<T> {}

impl<T> Tracked<T>
where
    T: Clone + PartialEq + 'static,
{
    /// Starts tracking from `original`.
    pub fn new(original: T) -> Self {
        Self {
            value: RwSignal::new(original.clone()),
            original: store_value(original),
        }
    }

    /// The editable value.
    pub fn value(&self) -> RwSignal<T> {
        self.value
    }

    /// The value tracking started from.
    pub fn original(&self) -> T {
        self.original.get_value()
    }

    /// Accepts the current value as the new original.
    pub fn reset(&self) {
        self.original.set_value(self.value.get_untracked());
    }

    /// Restores the original value.
    pub fn revert(&self) {
        self.value.set(self.original.get_value());
    }
}

impl<T> Changeable for Tracked<T>
where
    T: Clone + PartialEq + 'static,
{
    fn has_changed(&self) -> bool {
        let original = self.original;
        self.value.with(|value| original.with_value(|o| value != o))
    }
}

/// Whether a date differs from its original textual form.
///
/// Dates are compared to the millisecond, the precision [`from_date`](crate::dates::from_date)
/// writes, so a date never differs from its own text.
///
/// - `None` matches only a `None` original.
/// - A date never matches a `None` original.
/// - An original that is not a valid date never matches a date.
pub fn date_changed(current: Option<&DateTime<Utc>>, original: Option<&str>) -> bool {
    match (current, original) {
        (None, original) => original.is_some(),
        (Some(_), None) => true,
        (Some(current), original) => match to_date(original) {
            Ok(Some(original)) => current.timestamp_millis() != original.timestamp_millis(),
            Ok(None) | Err(_) => true,
        },
    }
}

/// Whether an object changed, or went from absent to present or back.
///
/// When both are present, the object's own [`Changeable`] answer is used. The original is only
/// checked for presence.
pub fn object_changed<T, V>(current: Option<&T>, original: Option<&V>) -> bool
where
    T: Changeable + ?Sized,
{
    match (current, original) {
        (None, original) => original.is_some(),
        (Some(_), None) => true,
        (Some(current), Some(_)) => current.has_changed(),
    }
}

/// Whether an array of [`Changeable`]s changed: a different length or any element that changed.
pub fn array_of_objects_changed<T, V>(current: Option<&[T]>, original: Option<&[V]>) -> bool
where
    T: Changeable,
{
    match (current, original) {
        (None, original) => original.is_some(),
        (Some(_), None) => true,
        (Some(current), Some(original)) => {
            current.len() != original.len() || current.iter().any(Changeable::has_changed)
        }
    }
}

/// Whether an array of values changed: a different length or any element that differs from
/// the original at the same position.
pub fn array_changed<T>(current: Option<&[T]>, original: Option<&[T]>) -> bool
where
    T: PartialEq,
{
    match (current, original) {
        (None, original) => original.is_some(),
        (Some(_), None) => true,
        (Some(current), Some(original)) => current != original,
    }
}
