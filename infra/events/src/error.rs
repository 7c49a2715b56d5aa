use std::borrow::Cow;

/// Errors that can occur during event bus registration.
///
/// Only [`EventBus::try_subscribe`](crate::EventBus::try_subscribe) surfaces
/// these; every other bus operation is total and resolves invalid input to a
/// no-op or an empty result.
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    /// The type key is empty. Type keys are opaque, non-empty strings.
    #[error("Invalid event type{}: {message}", format_context(.context))]
    InvalidEventType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The exact `(type, handler)` pair is already registered.
    #[error("Duplicate handler{}: {message}", format_context(.context))]
    DuplicateHandler { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_context() {
        let err = EventBusError::InvalidEventType {
            message: "Event type must be a non-empty string".into(),
            context: None,
        };

        assert_eq!(err.to_string(), "Invalid event type: Event type must be a non-empty string");
    }

    #[test]
    fn test_display_with_context() {
        let err = EventBusError::DuplicateHandler {
            message: "Handler is already subscribed".into(),
            context: Some("change:name".into()),
        };

        assert_eq!(
            err.to_string(),
            "Duplicate handler (change:name): Handler is already subscribed"
        );
    }
}
