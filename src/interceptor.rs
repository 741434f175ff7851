//! Interceptor registration and chain semantics.
//!
//! A client owns two managers: one over effective configs (request side) and
//! one over responses. Entries are appended to an indexed registry; removal
//! tombstones the slot instead of shifting indices, so ids stay stable and
//! chains materialized by in-flight requests are never corrupted by
//! concurrent registration or ejection.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::BoxFuture;

use crate::config::EffectiveConfig;
use crate::error::Error;

/// Success handler: receives the in-flight value, returns the next one (or
/// fails the chain).
pub type FulfilledHandler<T> =
    Arc<dyn Fn(T) -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// Failure handler: receives the in-flight error and may recover by
/// returning `Ok`.
pub type RejectedHandler<T> =
    Arc<dyn Fn(Error) -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// Predicate over the request's initial effective config deciding whether an
/// entry participates in that request's chain.
pub type RunWhen = Arc<dyn Fn(&EffectiveConfig) -> bool + Send + Sync>;

/// A paired success/failure handler registered with a manager.
///
/// Either handler may be absent: a missing success handler passes the value
/// through, a missing failure handler propagates the error.
pub struct Interceptor<T> {
    on_fulfilled: Option<FulfilledHandler<T>>,
    on_rejected: Option<RejectedHandler<T>>,
    run_when: Option<RunWhen>,
}

impl<T> Default for Interceptor<T> {
    fn default() -> Self {
        Interceptor {
            on_fulfilled: None,
            on_rejected: None,
            run_when: None,
        }
    }
}

impl<T> Clone for Interceptor<T> {
    fn clone(&self) -> Self {
        Interceptor {
            on_fulfilled: self.on_fulfilled.clone(),
            on_rejected: self.on_rejected.clone(),
            run_when: self.run_when.clone(),
        }
    }
}

impl<T: Send + 'static> Interceptor<T> {
    /// An entry with no handlers; attach them with the builder methods.
    pub fn new() -> Self {
        Interceptor::default()
    }

    /// Sets the success handler.
    pub fn on_fulfilled<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        self.on_fulfilled = Some(Arc::new(move |value| Box::pin(handler(value))));
        self
    }

    /// Sets the failure handler.
    pub fn on_rejected<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Error) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        self.on_rejected = Some(Arc::new(move |error| Box::pin(handler(error))));
        self
    }

    /// Restricts this entry to requests whose initial effective config
    /// matches the predicate.
    pub fn run_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&EffectiveConfig) -> bool + Send + Sync + 'static,
    {
        self.run_when = Some(Arc::new(predicate));
        self
    }
}

/// Stable handle for ejecting a registered entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterceptorId(usize);

/// An ordered, shareable registry of interceptor entries.
pub struct InterceptorManager<T> {
    entries: Arc<Mutex<Vec<Option<Interceptor<T>>>>>,
}

impl<T> Clone for InterceptorManager<T> {
    fn clone(&self) -> Self {
        InterceptorManager {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for InterceptorManager<T> {
    fn default() -> Self {
        InterceptorManager {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> InterceptorManager<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        InterceptorManager::default()
    }

    /// Appends an entry and returns its handle. Handles stay valid across
    /// ejections of other entries.
    pub fn add(&self, interceptor: Interceptor<T>) -> InterceptorId {
        let mut entries = self.lock();
        entries.push(Some(interceptor));
        InterceptorId(entries.len() - 1)
    }

    /// Tombstones the entry behind `id`. Other entries keep their positions
    /// and handles; ejecting twice (or an unknown id) is a no-op.
    pub fn eject(&self, id: InterceptorId) {
        let mut entries = self.lock();
        if let Some(slot) = entries.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Tombstones every live entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        for slot in entries.iter_mut() {
            *slot = None;
        }
    }

    /// Number of live (non-ejected) entries.
    pub fn len(&self) -> usize {
        self.lock().iter().flatten().count()
    }

    /// Whether no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every live entry in insertion order.
    ///
    /// Restartable: each call reflects the registry as it is now, observing
    /// registrations and ejections made since the last one.
    pub fn for_each(&self, mut visitor: impl FnMut(&Interceptor<T>)) {
        let entries: Vec<Interceptor<T>> = self.lock().iter().flatten().cloned().collect();
        for entry in &entries {
            visitor(entry);
        }
    }

    /// Materializes this registry for one request: live entries in insertion
    /// order, filtered by `run_when` against the request's initial config.
    ///
    /// The snapshot is taken once per request; later registration or
    /// ejection does not affect a chain already in flight.
    pub(crate) fn snapshot(&self, config: &EffectiveConfig) -> Vec<Interceptor<T>> {
        self.lock()
            .iter()
            .flatten()
            .filter(|entry| match &entry.run_when {
                Some(predicate) => predicate(config),
                None => true,
            })
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Option<Interceptor<T>>>> {
        // A panicked registrant cannot leave the registry in a bad state;
        // recover the guard rather than poisoning every later request.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// One fold step of the chain: `Ok` runs the success handler, `Err` runs the
/// failure handler, absent handlers pass through/propagate.
pub(crate) async fn run_chain_step<T>(
    entry: &Interceptor<T>,
    state: Result<T, Error>,
) -> Result<T, Error> {
    match state {
        Ok(value) => match &entry.on_fulfilled {
            Some(handler) => handler(value).await,
            None => Ok(value),
        },
        Err(error) => match &entry.on_rejected {
            Some(handler) => handler(error).await,
            None => Err(error),
        },
    }
}
