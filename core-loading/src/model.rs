//! Stateful holder binding a value slot to an injectable loader.
//!
//! `LoadingModel` is the minimal unit the rest of the system composes into
//! per-entity caches: one generic async unit of work plus slots for its
//! outcome. `load()` ALWAYS invokes the loader — any "only load once" or
//! "only load if absent" policy is the caller's responsibility, enforced by
//! checking a cache map before calling (the single-flight contract lives in
//! the owner).

use crate::state::LoadingState;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Injectable loader: one async unit of work keyed by an optional context.
pub type BoxLoader<C, T, E> =
    Arc<dyn Fn(Option<C>) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Holder of `{value, error, loader}` for one asynchronous value.
pub struct LoadingModel<C, T, E> {
    value: Option<T>,
    error: Option<E>,
    loader: BoxLoader<C, T, E>,
}

impl<C, T, E> LoadingModel<C, T, E> {
    pub fn new(loader: BoxLoader<C, T, E>) -> Self {
        Self {
            value: None,
            error: None,
            loader,
        }
    }

    /// Invokes the loader with the given context and records the outcome.
    /// A successful load clears any previous error; a failed load keeps any
    /// previously loaded value untouched.
    pub async fn load(&mut self, context: Option<C>) {
        match (self.loader)(context).await {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    pub fn has_loaded(&self) -> bool {
        self.value.is_some()
    }
}

impl<C, T: Clone, E: Clone> LoadingModel<C, T, E> {
    /// Snapshot of the model as a loading state: a value wins over an error,
    /// and a model with neither reads as `Idle`.
    pub fn snapshot(&self) -> LoadingState<T, E> {
        match (&self.value, &self.error) {
            (Some(value), _) => LoadingState::Loaded(value.clone()),
            (None, Some(err)) => LoadingState::Error(err.clone()),
            (None, None) => LoadingState::Idle,
        }
    }
}

impl<C, T: fmt::Debug, E: fmt::Debug> fmt::Debug for LoadingModel<C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingModel")
            .field("value", &self.value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_loader(
        calls: Arc<AtomicU32>,
    ) -> BoxLoader<String, String, &'static str> {
        Arc::new(move |context: Option<String>| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match context {
                    Some(term) => Ok(format!("result for {}", term)),
                    None => Err("no context"),
                }
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn load_invokes_loader_every_time() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut model = LoadingModel::new(counting_loader(calls.clone()));

        model.load(Some("a".to_string())).await;
        model.load(Some("b".to_string())).await;

        // No internal memoization: two calls, two invocations.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(model.value(), Some(&"result for b".to_string()));
    }

    #[tokio::test]
    async fn failed_load_records_error_and_keeps_value() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut model = LoadingModel::new(counting_loader(calls));

        model.load(Some("a".to_string())).await;
        assert!(model.has_loaded());
        assert!(model.error().is_none());

        model.load(None).await;
        assert_eq!(model.error(), Some(&"no context"));
        assert_eq!(model.value(), Some(&"result for a".to_string()));
    }

    #[tokio::test]
    async fn successful_load_clears_previous_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut model = LoadingModel::new(counting_loader(calls));

        model.load(None).await;
        assert!(model.error().is_some());

        model.load(Some("retry".to_string())).await;
        assert!(model.error().is_none());
        assert_eq!(model.value(), Some(&"result for retry".to_string()));
    }

    #[tokio::test]
    async fn snapshot_reflects_slots() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut model = LoadingModel::new(counting_loader(calls));

        assert_eq!(model.snapshot(), LoadingState::Idle);

        model.load(None).await;
        assert_eq!(model.snapshot(), LoadingState::Error("no context"));

        model.load(Some("x".to_string())).await;
        assert_eq!(
            model.snapshot(),
            LoadingState::Loaded("result for x".to_string())
        );
    }
}
