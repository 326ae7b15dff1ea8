//! Fetch and mutation state.
//!
//! The UI-free rendition of the dashboard's data-fetching hooks: a
//! [`Resource`] holds `{data, loading, error}` for one fetched collection,
//! a [`Mutation`] holds `{loading, error}` for one write operation.
//!
//! Overlapping loads of the same resource are resolved last-request-wins:
//! every load takes a fresh generation number, and a load that finds a
//! newer generation when it resolves discards its result instead of
//! overwriting newer data. A stale, slower response can therefore never
//! clobber the state a faster, later request already produced.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;

/// Snapshot of a resource's fetch state.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// State holder for one fetched collection.
pub struct Resource<T> {
    state: Arc<Mutex<ResourceState<T>>>,
    generation: Arc<AtomicU64>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resource<T> {
    /// An empty, idle resource.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ResourceState::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T: Clone> Resource<T> {
    /// Current `{data, loading, error}` snapshot.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the state lock panicked.
    #[must_use]
    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.lock().expect("resource state poisoned").clone()
    }

    /// Run `operation` and store its outcome, unless a newer load has
    /// started in the meantime.
    ///
    /// The result is returned to the caller either way; only the shared
    /// state is protected from stale overwrites.
    ///
    /// # Errors
    ///
    /// Propagates the operation's error after recording it (when current).
    pub async fn load<F, Fut>(&self, operation: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().expect("resource state poisoned");
            state.loading = true;
            state.error = None;
        }

        let result = operation().await;

        // A newer load superseded this one while it was in flight.
        if self.generation.load(Ordering::SeqCst) != generation {
            return result;
        }

        let mut state = self.state.lock().expect("resource state poisoned");
        state.loading = false;
        match &result {
            Ok(value) => {
                state.data = Some(value.clone());
                state.error = None;
            }
            Err(err) => {
                state.error = Some(err.clone());
            }
        }

        result
    }
}

/// Snapshot of a mutation's state.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// State holder for one write operation.
#[derive(Clone, Default)]
pub struct Mutation {
    state: Arc<Mutex<MutationState>>,
}

impl Mutation {
    /// An idle mutation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `{loading, error}` snapshot.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the state lock panicked.
    #[must_use]
    pub fn snapshot(&self) -> MutationState {
        self.state.lock().expect("mutation state poisoned").clone()
    }

    /// Run `operation`, capturing a failure in the mutation state.
    ///
    /// The error is both stored and returned - never swallowed.
    ///
    /// # Errors
    ///
    /// Propagates the operation's error after recording it.
    pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        {
            let mut state = self.state.lock().expect("mutation state poisoned");
            state.loading = true;
            state.error = None;
        }

        let result = operation().await;

        let mut state = self.state.lock().expect("mutation state poisoned");
        state.loading = false;
        if let Err(err) = &result {
            state.error = Some(err.clone());
        }

        result
    }

    /// Clear a captured error (e.g. when the form is edited again).
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the state lock panicked.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mutation state poisoned");
        state.error = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_stores_data() {
        let resource = Resource::new();
        let value = resource.load(|| async { Ok(vec![1, 2, 3]) }).await.unwrap();
        assert_eq!(value, vec![1, 2, 3]);

        let snapshot = resource.snapshot();
        assert_eq!(snapshot.data, Some(vec![1, 2, 3]));
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_load_stores_error_and_returns_it() {
        let resource: Resource<Vec<i32>> = Resource::new();
        let result = resource
            .load(|| async { Err(ApiError::network()) })
            .await;
        assert!(result.is_err());

        let snapshot = resource.snapshot();
        assert_eq!(snapshot.error, Some(ApiError::network()));
        assert!(snapshot.data.is_none());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_overwrite_newer_data() {
        let resource: Resource<i32> = Resource::new();
        let (release_slow, slow_gate) = tokio::sync::oneshot::channel::<()>();

        // First load hangs until released.
        let slow = {
            let resource = resource.clone();
            tokio::spawn(async move {
                resource
                    .load(|| async move {
                        slow_gate.await.ok();
                        Ok(1)
                    })
                    .await
            })
        };

        // Give the slow load time to claim its generation.
        tokio::task::yield_now().await;

        // Second load resolves immediately.
        resource.load(|| async { Ok(2) }).await.unwrap();
        assert_eq!(resource.snapshot().data, Some(2));

        // Now the slow load resolves - and must be discarded.
        release_slow.send(()).unwrap();
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale, 1);
        assert_eq!(resource.snapshot().data, Some(2));
    }

    #[tokio::test]
    async fn test_refetch_overwrites_older_data() {
        let resource: Resource<i32> = Resource::new();
        resource.load(|| async { Ok(1) }).await.unwrap();
        resource.load(|| async { Ok(2) }).await.unwrap();
        assert_eq!(resource.snapshot().data, Some(2));
    }

    #[tokio::test]
    async fn test_error_after_data_keeps_data() {
        let resource: Resource<i32> = Resource::new();
        resource.load(|| async { Ok(1) }).await.unwrap();
        let _ = resource.load(|| async { Err(ApiError::network()) }).await;

        let snapshot = resource.snapshot();
        assert_eq!(snapshot.data, Some(1));
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_mutation_captures_and_resets_error() {
        let mutation = Mutation::new();
        let result: Result<(), _> = mutation
            .run(|| async { Err(ApiError::network()) })
            .await;
        assert!(result.is_err());
        assert!(mutation.snapshot().error.is_some());

        mutation.reset();
        assert!(mutation.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_mutation_success_clears_state() {
        let mutation = Mutation::new();
        mutation.run(|| async { Ok(7) }).await.unwrap();
        let snapshot = mutation.snapshot();
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
    }
}
