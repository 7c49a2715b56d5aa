use crate::error::EventBusError;
use crate::event::Event;
use crate::handler::Handler;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// A synchronous, string-keyed publish/subscribe bus.
///
/// The bus owns a registry from type key (an opaque, non-empty string such as
/// `"change:name"`) to the ordered sequence of handlers subscribed to it.
/// Firing a type invokes every handler registered for it, in subscription
/// order, on the caller's thread, before the fire call returns.
///
/// Cloning the bus is cheap and yields a handle to the same registry.
///
/// ### Rules
/// * A `(type, handler)` pair is registered at most once; handler identity is
///   reference equality, so the caller keeps a clone of the [`Handler`] it
///   wants to unsubscribe later.
/// * Handlers run without the registry lock held: they may subscribe,
///   unsubscribe, or publish again from inside a dispatch. The running pass
///   iterates a snapshot taken when the fire call began, so mid-pass
///   mutations take effect on the next dispatch only.
/// * No delivery is deferred or queued; a handler that never returns blocks
///   the whole dispatch chain.
///
/// # Examples
/// ```rust
/// use herald_event_bus::{EventBus, Handler};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let bus = EventBus::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// let handler = Handler::new(move |event| {
///     assert_eq!(event.event_type(), "change:name");
///     assert_eq!(event.data::<&str>(), Some(&"bill"));
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// assert!(bus.subscribe("change:name", handler.clone()));
/// assert!(!bus.subscribe("change:name", handler.clone()));
///
/// assert_eq!(bus.publish_with("change:name", "bill"), 1);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
///
/// bus.unsubscribe("change:name", &handler);
/// assert!(!bus.has("change:name"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    registry: Arc<RwLock<FxHashMap<String, Vec<Handler>>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to `event_type`, reporting rejections as errors.
    ///
    /// This is the fallible twin of [`EventBus::subscribe`] for callers that
    /// need to tell an invalid type key apart from a duplicate registration
    /// without probing [`EventBus::has_handler`] first.
    ///
    /// # Errors
    /// * [`EventBusError::InvalidEventType`] if `event_type` is empty.
    /// * [`EventBusError::DuplicateHandler`] if the exact `(type, handler)`
    ///   pair is already registered.
    pub fn try_subscribe(&self, event_type: &str, handler: Handler) -> Result<(), EventBusError> {
        if event_type.is_empty() {
            return Err(EventBusError::InvalidEventType {
                message: "Event type must be a non-empty string".into(),
                context: None,
            });
        }

        let mut registry = self.registry.write();
        let handlers = registry.entry(event_type.to_owned()).or_default();
        if handlers.iter().any(|existing| existing.ptr_eq(&handler)) {
            return Err(EventBusError::DuplicateHandler {
                message: "Handler is already subscribed".into(),
                context: Some(event_type.to_owned().into()),
            });
        }

        handlers.push(handler);
        trace!(event_type, count = handlers.len(), "Handler subscribed");
        Ok(())
    }

    /// Subscribes `handler` to `event_type`.
    ///
    /// Returns `true` when the handler was appended to the type's sequence.
    /// Returns `false`, leaving the registry untouched, when `event_type` is
    /// empty or when the exact `(type, handler)` pair is already registered.
    /// Registration failures never panic.
    pub fn subscribe(&self, event_type: &str, handler: Handler) -> bool {
        match self.try_subscribe(event_type, handler) {
            Ok(()) => true,
            Err(err) => {
                trace!(event_type, %err, "Subscription rejected");
                false
            },
        }
    }

    /// Subscribes `handler` to `event_type` for at most one invocation.
    ///
    /// The registered entry is a wrapper that removes itself from the
    /// registry and only then invokes `handler`, so the handler fires at most
    /// once per subscription even when the type is published repeatedly or
    /// re-entered from inside another handler of the same pass.
    ///
    /// The return value follows [`EventBus::subscribe`] for the wrapper:
    /// dedup applies to the wrapper, not to `handler`, so subscribing the
    /// same handler once-wise twice yields two one-shot registrations.
    ///
    /// # Examples
    /// ```rust
    /// use herald_event_bus::{EventBus, Handler};
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let bus = EventBus::new();
    /// let count = Arc::new(AtomicUsize::new(0));
    ///
    /// let counter = Arc::clone(&count);
    /// bus.subscribe_once(
    ///     "change:name",
    ///     Handler::new(move |_event| {
    ///         counter.fetch_add(1, Ordering::SeqCst);
    ///     }),
    /// );
    ///
    /// bus.publish_with("change:name", "name1");
    /// bus.publish_with("change:name", "name2");
    /// assert_eq!(count.load(Ordering::SeqCst), 1);
    /// assert!(!bus.has("change:name"));
    /// ```
    pub fn subscribe_once(&self, event_type: &str, handler: Handler) -> bool {
        let bus = self.clone();
        let fired = AtomicBool::new(false);
        let slot = Arc::new(OnceLock::new());

        // The wrapper needs its own registered identity to remove itself, so
        // the Handler is fed back through the slot after construction.
        let registration = Arc::clone(&slot);
        let wrapper = Handler::new(move |event: &Event| {
            if fired.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Some(me) = registration.get() {
                bus.unsubscribe(event.event_type(), me);
            }
            handler.call(event);
        });
        let _ = slot.set(wrapper.clone());

        self.subscribe(event_type, wrapper)
    }

    /// Removes the exact `(event_type, handler)` pair, if registered.
    ///
    /// Other handlers for the same type keep their relative order. Unknown
    /// types and unregistered handlers are a no-op; the call is always safe
    /// to make speculatively.
    pub fn unsubscribe(&self, event_type: &str, handler: &Handler) {
        let mut registry = self.registry.write();
        if let Some(handlers) = registry.get_mut(event_type) {
            let before = handlers.len();
            handlers.retain(|existing| !existing.ptr_eq(handler));
            if handlers.len() < before {
                trace!(event_type, "Handler unsubscribed");
            }
            if handlers.is_empty() {
                registry.remove(event_type);
            }
        }
    }

    /// Removes every handler registered for `event_type`.
    ///
    /// Other types are unaffected; an unknown type is a no-op.
    pub fn unsubscribe_all(&self, event_type: &str) {
        let removed = self.registry.write().remove(event_type);
        if let Some(handlers) = removed {
            trace!(event_type, count = handlers.len(), "All handlers unsubscribed");
        }
    }

    /// Clears the entire registry: every type, every handler.
    pub fn clear(&self) {
        let mut registry = self.registry.write();
        let types = registry.len();
        registry.clear();
        drop(registry);
        trace!(types, "Registry cleared");
    }

    /// Fires `event_type` with no payload.
    ///
    /// Returns the number of handlers invoked; an unknown or empty type is a
    /// no-op returning 0.
    pub fn publish(&self, event_type: &str) -> usize {
        self.dispatch(event_type, None)
    }

    /// Fires `event_type` with a payload.
    ///
    /// The payload is wrapped in an [`Arc`] and shared with every handler of
    /// the pass; handlers recover it with [`Event::data`]. Returns the number
    /// of handlers invoked.
    ///
    /// # Examples
    /// ```rust
    /// use herald_event_bus::{EventBus, Handler};
    ///
    /// let bus = EventBus::new();
    /// bus.subscribe(
    ///     "change:age",
    ///     Handler::new(|event| {
    ///         assert_eq!(event.data::<u32>(), Some(&32));
    ///     }),
    /// );
    ///
    /// assert_eq!(bus.publish_with("change:age", 32u32), 1);
    /// assert_eq!(bus.publish_with("unlistened", 0u32), 0);
    /// ```
    pub fn publish_with<D>(&self, event_type: &str, data: D) -> usize
    where
        D: Any + Send + Sync,
    {
        self.dispatch(event_type, Some(Arc::new(data)))
    }

    /// Fires `event_type` with an already-shared payload, without re-wrapping.
    pub fn publish_arc(&self, event_type: &str, data: Arc<dyn Any + Send + Sync>) -> usize {
        self.dispatch(event_type, Some(data))
    }

    fn dispatch(&self, event_type: &str, data: Option<Arc<dyn Any + Send + Sync>>) -> usize {
        // Snapshot under the read lock, then release it before any handler
        // runs: handlers may mutate the registry or publish again, and the
        // running pass must stay on the sequence as it was at dispatch start.
        let snapshot = self.registry.read().get(event_type).cloned();
        let Some(snapshot) = snapshot else {
            trace!(event_type, "Event dropped: no subscribers");
            return 0;
        };

        let event = Event::new(event_type, data);
        for handler in &snapshot {
            handler.call(&event);
        }

        trace!(event_type, count = snapshot.len(), "Event dispatched");
        snapshot.len()
    }

    /// Returns a copy of the handlers registered for `event_type`, in
    /// subscription order.
    ///
    /// The returned sequence is fresh per call: mutating it never affects the
    /// registry. Unknown or empty types yield an empty sequence.
    #[must_use]
    pub fn handlers(&self, event_type: &str) -> Vec<Handler> {
        self.registry.read().get(event_type).cloned().unwrap_or_default()
    }

    /// Returns `true` when at least one handler is registered for `event_type`.
    #[must_use]
    pub fn has(&self, event_type: &str) -> bool {
        self.registry.read().get(event_type).is_some_and(|handlers| !handlers.is_empty())
    }

    /// Returns `true` when the exact `(event_type, handler)` pair is registered.
    #[must_use]
    pub fn has_handler(&self, event_type: &str, handler: &Handler) -> bool {
        self.registry
            .read()
            .get(event_type)
            .is_some_and(|handlers| handlers.iter().any(|existing| existing.ptr_eq(handler)))
    }
}
