use leptos::*;

/// Reactive count of the requests currently in flight.
///
/// Cloning a `LoadingState` shares the count, so every gateway holding a clone
/// contributes to the same [`loading`](Self::loading) signal.
/// Gateways that were given separate `LoadingState`s never affect each other.
#[derive(Clone, Copy)]
pub struct LoadingState {
    in_flight: RwSignal<usize>,
}

impl LoadingState {
    /// Creates an idle loading state.
    pub fn new() -> Self {
        Self {
            in_flight: RwSignal::new(0),
        }
    }

    /// True while at least one request is awaiting its response.
    pub fn loading(&self) -> Signal<bool> {
        let in_flight = self.in_flight;
        Signal::derive(move || in_flight.with(|count| *count > 0))
    }

    /// The number of requests awaiting their response.
    pub fn in_flight(&self) -> Signal<usize> {
        self.in_flight.into()
    }

    /// Marks one request as started. The request counts as in flight until the guard is dropped.
    pub fn start(&self) -> LoadingGuard {
        self.in_flight.update(|count| *count += 1);
        LoadingGuard {
            in_flight: self.in_flight,
        }
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoadingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingState")
            .field("in_flight", &self.in_flight.try_get_untracked())
            .finish()
    }
}

/// Holds one request in the in-flight count.
#[must_use = "the request stops counting as in flight as soon as the guard is dropped"]
pub struct LoadingGuard {
    in_flight: RwSignal<usize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        // The owning runtime may already be gone.
        let _ = self
            .in_flight
            .try_update(|count| *count = count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_by_default() {
        let _ = create_runtime();

        let state = LoadingState::new();

        assert!(!state.loading().get_untracked());
        assert_eq!(0, state.in_flight().get_untracked());
    }

    #[test]
    fn loading_until_guard_dropped() {
        let _ = create_runtime();

        let state = LoadingState::new();
        let guard = state.start();

        assert!(state.loading().get_untracked());

        drop(guard);

        assert!(!state.loading().get_untracked());
    }

    #[test]
    fn overlapping_requests_keep_loading() {
        let _ = create_runtime();

        let state = LoadingState::new();
        let first = state.start();
        let second = state.start();

        assert_eq!(2, state.in_flight().get_untracked());

        // First started, first settled. The second is still outstanding.
        drop(first);
        assert!(state.loading().get_untracked());

        drop(second);
        assert!(!state.loading().get_untracked());
    }

    #[test]
    fn clones_share_the_count() {
        let _ = create_runtime();

        let state = LoadingState::new();
        let shared = state;
        let other = LoadingState::new();

        let _guard = shared.start();

        assert!(state.loading().get_untracked());
        assert!(!other.loading().get_untracked());
    }

    #[test]
    fn loading_signal_is_reactive() {
        let _ = create_runtime();

        let state = LoadingState::new();
        let loading = state.loading();
        let seen = RwSignal::new(Vec::new());

        create_isomorphic_effect(move |_| {
            let value = loading.get();
            seen.update(|s| s.push(value));
        });

        let guard = state.start();
        drop(guard);

        assert_eq!(vec![false, true, false], seen.get_untracked());
    }
}
