use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The value delivered to every handler of a single dispatch pass.
///
/// An `Event` is constructed fresh for each fire call and shared by reference
/// with every handler invoked in that pass; it is never stored in the
/// registry. Handlers must not assume the value stays identical across
/// separate dispatches of the same type.
///
/// The payload is type-erased, following the bus-wide rule that a type key is
/// an opaque string rather than a Rust type. Handlers recover the concrete
/// payload with [`Event::data`]:
///
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
/// bus.publish_with("change:age", 32u32);
/// ```
#[derive(Clone)]
pub struct Event {
    event_type: Arc<str>,
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl Event {
    pub(crate) fn new(event_type: &str, data: Option<Arc<dyn Any + Send + Sync>>) -> Self {
        Self { event_type: Arc::from(event_type), data }
    }

    /// The type key this dispatch was fired under.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Typed view of the payload.
    ///
    /// Returns `None` when the fire call supplied no payload or when the
    /// payload is of a different concrete type.
    #[must_use]
    pub fn data<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|data| data.downcast_ref::<T>())
    }

    /// The shared payload exactly as the fire call supplied it.
    #[must_use]
    pub fn data_arc(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.data.clone()
    }

    /// Returns `true` when the fire call supplied a payload.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_payload_access() {
        let event = Event::new("change:name", Some(Arc::new("bill".to_owned())));

        assert_eq!(event.event_type(), "change:name");
        assert!(event.has_data());
        assert_eq!(event.data::<String>().map(String::as_str), Some("bill"));
    }

    #[test]
    fn test_wrong_type_downcast_is_none() {
        let event = Event::new("change:age", Some(Arc::new(32u32)));

        assert_eq!(event.data::<String>(), None);
        assert_eq!(event.data::<u32>(), Some(&32));
    }

    #[test]
    fn test_absent_payload() {
        let event = Event::new("change:name", None);

        assert!(!event.has_data());
        assert_eq!(event.data::<u32>(), None);
        assert!(event.data_arc().is_none());
    }
}
