//! Dispatch table keyed by the first argument of a call

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use super::errors::{DispatchError, DispatchResult};

/// An argument pack whose first argument selects the handler.
///
/// Returns `None` when the pack is empty.
pub trait DispatchArgs {
    /// Lookup key type, compared by equality
    type Key: Eq + Hash + Clone;

    /// The first argument of the pack, if any.
    fn dispatch_key(&self) -> Option<&Self::Key>;
}

impl<T: Eq + Hash + Clone> DispatchArgs for [T] {
    type Key = T;

    fn dispatch_key(&self) -> Option<&T> {
        self.first()
    }
}

impl<T: Eq + Hash + Clone> DispatchArgs for Vec<T> {
    type Key = T;

    fn dispatch_key(&self) -> Option<&T> {
        self.first()
    }
}

/// A shared handler. It receives the whole argument pack.
pub type Handler<A, R> = Arc<dyn Fn(&A) -> R + Send + Sync>;

type HandlerMap<A, R> = HashMap<<A as DispatchArgs>::Key, Handler<A, R>>;

/// Routes calls to a registered handler or to the default one.
///
/// Registrations are guarded by a single `RwLock`. Handlers run outside
/// the lock, so a handler may itself register into the table.
pub struct DispatchTable<A: ?Sized + DispatchArgs, R> {
    default: Handler<A, R>,
    registry: Arc<RwLock<HandlerMap<A, R>>>,
    name: Option<String>,
    doc: Option<String>,
}

impl<A: ?Sized + DispatchArgs, R> DispatchTable<A, R> {
    /// Creates a table whose unmatched calls go to `default`.
    pub fn new<F>(default: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        Self::with_default(Arc::new(default))
    }

    /// Creates a table that takes its name and doc from the default handler.
    pub fn named<F>(name: impl Into<String>, doc: impl Into<String>, default: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        Self::new(default).with_name(name).with_doc(doc)
    }

    /// Creates a table from an already shared default handler.
    pub fn with_default(default: Handler<A, R>) -> Self {
        Self {
            default,
            registry: Arc::new(RwLock::new(HashMap::new())),
            name: None,
            doc: None,
        }
    }

    /// Sets the table's display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the table's doc string.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Records `handler` under `key` and hands it back unchanged.
    ///
    /// A later registration for the same key replaces the earlier one.
    pub fn register(&self, key: A::Key, handler: Handler<A, R>) -> Handler<A, R> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry.insert(key, Arc::clone(&handler));
        handler
    }

    /// Wraps a closure and registers it under `key`.
    pub fn register_fn<F>(&self, key: A::Key, handler: F) -> Handler<A, R>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        self.register(key, Arc::new(handler))
    }

    /// Invokes the handler selected by the first argument of `args`.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::NoArguments` if `args` is empty.
    pub fn call(&self, args: &A) -> DispatchResult<R> {
        let key = args.dispatch_key().ok_or(DispatchError::NoArguments)?;
        let handler = self.get_function(key);
        Ok(handler(args))
    }

    /// Returns the handler that `call` would use for `key`, without invoking it.
    pub fn get_function(&self, key: &A::Key) -> Handler<A, R> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry
            .get(key)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::clone(&self.default))
    }

    /// The default handler.
    pub fn default_function(&self) -> Handler<A, R> {
        Arc::clone(&self.default)
    }

    /// Returns a read-only view over the registrations.
    ///
    /// The view shares the table's storage and reflects later registrations.
    pub fn get_registry(&self) -> RegistryView<A, R> {
        RegistryView {
            inner: Arc::clone(&self.registry),
        }
    }
}

impl<A, R> fmt::Debug for DispatchTable<A, R>
where
    A: ?Sized + DispatchArgs,
    A::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("name", &self.name)
            .field("keys", &self.get_registry().keys())
            .finish_non_exhaustive()
    }
}

/// Live, read-only view over a table's registrations.
pub struct RegistryView<A: ?Sized + DispatchArgs, R> {
    inner: Arc<RwLock<HandlerMap<A, R>>>,
}

impl<A: ?Sized + DispatchArgs, R> RegistryView<A, R> {
    fn read(&self) -> RwLockReadGuard<'_, HandlerMap<A, R>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains_key(&self, key: &A::Key) -> bool {
        self.read().contains_key(key)
    }

    /// The handler registered under `key`, without the default fallback.
    pub fn get(&self, key: &A::Key) -> Option<Handler<A, R>> {
        self.read().get(key).map(Arc::clone)
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> Vec<A::Key> {
        self.read().keys().cloned().collect()
    }
}

impl<A: ?Sized + DispatchArgs, R> Clone for RegistryView<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
