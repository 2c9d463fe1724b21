//! Single-shot loading state machine.
//!
//! `Idle --load()--> Loading --success--> Loaded(value)` and
//! `Loading --failure--> Error(err)`. `Loaded` and `Error` are terminal;
//! retrying means constructing a fresh instance. `load()` is a no-op unless
//! the current state is `Idle`, so a repeated call while an operation is in
//! flight neither cancels nor restarts it.

use std::future::Future;

/// State of one asynchronous value.
///
/// Equality compares payloads structurally, which is why error types used
/// here should be enums with structured fields rather than rendered strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState<T, E> {
    /// No load has been requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The load finished with a value.
    Loaded(T),
    /// The load failed.
    Error(E),
}

impl<T, E> LoadingState<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadingState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    /// True once the machine reached `Loaded` or `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadingState::Loaded(_) | LoadingState::Error(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            LoadingState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Transitions `Idle -> Loading`. Returns whether the transition
    /// happened; callers that share the machine use this under a lock to
    /// make check-then-load atomic.
    pub fn try_begin(&mut self) -> bool {
        if self.is_idle() {
            *self = LoadingState::Loading;
            true
        } else {
            false
        }
    }

    /// Applies an operation outcome. Only a `Loading` machine settles;
    /// anything else keeps its state.
    pub fn settle(&mut self, outcome: Result<T, E>) {
        if self.is_loading() {
            *self = match outcome {
                Ok(value) => LoadingState::Loaded(value),
                Err(err) => LoadingState::Error(err),
            };
        }
    }

    /// Runs one load to completion: transitions to `Loading`, awaits the
    /// operation, and settles. Returns immediately without invoking the
    /// operation unless the current state is `Idle`.
    pub async fn load<F, Fut>(&mut self, op: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.try_begin() {
            return;
        }
        let outcome = op().await;
        self.settle(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn load_drives_idle_to_loaded() {
        let mut state: LoadingState<u32, &str> = LoadingState::Idle;
        state.load(|| async { Ok(7) }).await;
        assert_eq!(state, LoadingState::Loaded(7));
        assert!(state.is_terminal());
        assert_eq!(state.value(), Some(&7));
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn load_drives_idle_to_error() {
        let mut state: LoadingState<u32, &str> = LoadingState::Idle;
        state.load(|| async { Err("boom") }).await;
        assert_eq!(state, LoadingState::Error("boom"));
        assert_eq!(state.error(), Some(&"boom"));
    }

    #[tokio::test]
    async fn load_is_noop_unless_idle() {
        let calls = Cell::new(0u32);
        let op = || {
            calls.set(calls.get() + 1);
            async { Ok::<u32, &str>(1) }
        };

        let mut state: LoadingState<u32, &str> = LoadingState::Loading;
        state.load(op).await;
        assert_eq!(calls.get(), 0);
        assert!(state.is_loading());

        let mut state: LoadingState<u32, &str> = LoadingState::Loaded(9);
        state.load(op).await;
        assert_eq!(calls.get(), 0);
        assert_eq!(state, LoadingState::Loaded(9));

        let mut state: LoadingState<u32, &str> = LoadingState::Error("old");
        state.load(op).await;
        assert_eq!(calls.get(), 0);
        assert_eq!(state, LoadingState::Error("old"));
    }

    #[tokio::test]
    async fn two_loads_yield_exactly_one_operation() {
        let calls = Cell::new(0u32);
        let mut state: LoadingState<u32, &str> = LoadingState::Idle;
        for _ in 0..2 {
            state
                .load(|| {
                    calls.set(calls.get() + 1);
                    async { Ok(42) }
                })
                .await;
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(state, LoadingState::Loaded(42));
    }

    #[test]
    fn settle_only_applies_when_loading() {
        let mut state: LoadingState<u32, &str> = LoadingState::Loaded(1);
        state.settle(Ok(2));
        assert_eq!(state, LoadingState::Loaded(1));

        let mut state: LoadingState<u32, &str> = LoadingState::Loading;
        state.settle(Err("late"));
        assert_eq!(state, LoadingState::Error("late"));
    }

    #[test]
    fn equality_is_structural_over_payloads() {
        #[derive(Debug, Clone, PartialEq, Eq)]
        enum Kind {
            NotFound { term: String },
        }

        let a: LoadingState<u32, Kind> = LoadingState::Error(Kind::NotFound {
            term: "x".to_string(),
        });
        let b: LoadingState<u32, Kind> = LoadingState::Error(Kind::NotFound {
            term: "x".to_string(),
        });
        let c: LoadingState<u32, Kind> = LoadingState::Error(Kind::NotFound {
            term: "y".to_string(),
        });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
