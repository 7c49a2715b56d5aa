use crate::bus::EventBus;
use std::sync::OnceLock;

static GLOBAL: OnceLock<EventBus> = OnceLock::new();

/// The process-wide default bus.
///
/// Constructed lazily, exactly once, and shared by reference across every
/// caller; all users of this accessor see one registry. The instance is
/// functionally identical to any other [`EventBus`] and exists purely for
/// convenience; prefer an owned bus where the subscriber set has a narrower
/// lifetime than the process.
pub fn global() -> &'static EventBus {
    GLOBAL.get_or_init(EventBus::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_a_single_instance() {
        assert!(std::ptr::eq(global(), global()));
    }
}
