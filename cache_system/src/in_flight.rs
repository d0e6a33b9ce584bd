//! In-flight request tracking
//!
//! Concurrent reads for the same key share one underlying future, so only a
//! single remote call is issued until it settles.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

type SharedRequest<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;
type PendingMap<T, E> = HashMap<String, SharedRequest<T, E>>;

enum Slot<T, E> {
    Created(SharedRequest<T, E>),
    Joined(SharedRequest<T, E>),
}

/// De-duplicates concurrent identical requests
pub struct InFlightTracker<T, E> {
    pending: Mutex<PendingMap<T, E>>,
}

impl<T, E> Debug for InFlightTracker<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.pending.lock().map(|p| p.len()).unwrap_or(0);
        f.debug_struct("InFlightTracker")
            .field("pending", &pending)
            .finish()
    }
}

impl<T, E> InFlightTracker<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn pending(&self) -> MutexGuard<'_, PendingMap<T, E>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Await the pending request for `key`, or start one with `factory`
    ///
    /// Every caller that joins an existing request receives a clone of the same
    /// result. The entry is removed as soon as the creating call returns, whether
    /// the request succeeded, failed or the caller was dropped.
    pub async fn get_or_create<F, Fut>(&self, key: &str, factory: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let slot = {
            let mut pending = self.pending();
            match pending.get(key) {
                Some(existing) => Slot::Joined(existing.clone()),
                None => {
                    let request = factory().boxed().shared();
                    pending.insert(key.to_string(), request.clone());
                    Slot::Created(request)
                }
            }
        };

        match slot {
            Slot::Joined(request) => {
                tracing::debug!(key, "joining in-flight request");
                request.await
            }
            Slot::Created(request) => {
                let _guard = PendingGuard {
                    tracker: self,
                    key: key.to_string(),
                    request: request.clone(),
                };
                request.await
            }
        }
    }

    /// Number of requests currently awaiting settlement
    pub fn pending_count(&self) -> usize {
        self.pending().len()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending().contains_key(key)
    }
}

impl<T, E> Default for InFlightTracker<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Removes the registered request when the creating call exits
struct PendingGuard<'a, T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    tracker: &'a InFlightTracker<T, E>,
    key: String,
    request: SharedRequest<T, E>,
}

impl<T, E> Drop for PendingGuard<'_, T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let mut pending = self.tracker.pending();
        // Only remove our own registration, never a newer request for the key
        if pending
            .get(&self.key)
            .is_some_and(|current| current.ptr_eq(&self.request))
        {
            pending.remove(&self.key);
        }
    }
}
