//! Event fan-out to registered subscribers

use serde::{Deserialize, Serialize};

use crate::error::SubscriberError;
use crate::zones::GeofenceEventType;

/// Fired event handed to every subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackContext {
    /// Index of the zone that fired
    pub index: usize,
    /// Event kind that fired
    pub event_type: GeofenceEventType,
}

/// Subscriber callback signature
pub type GeofenceCallback =
    Box<dyn FnMut(&CallbackContext) -> Result<(), SubscriberError> + Send>;

/// Ordered, append-only list of subscribers
#[derive(Default)]
pub struct EventDispatcher {
    callbacks: Vec<GeofenceCallback>,
}

impl EventDispatcher {
    /// Create a dispatcher with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber; it will be called after all earlier ones
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(&CallbackContext) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Call every subscriber in registration order.
    ///
    /// Stops at the first subscriber that fails; later subscribers are not
    /// called for this event.
    pub fn dispatch(&mut self, context: &CallbackContext) -> Result<(), SubscriberError> {
        for callback in self.callbacks.iter_mut() {
            callback(context)?;
        }
        Ok(())
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no subscriber is registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn context(index: usize, event_type: GeofenceEventType) -> CallbackContext {
        CallbackContext { index, event_type }
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();

        for id in 0..3 {
            let calls = calls.clone();
            dispatcher.register(move |ctx: &CallbackContext| {
                calls.lock().unwrap().push((id, ctx.index, ctx.event_type));
                Ok(())
            });
        }
        assert_eq!(dispatcher.len(), 3);

        dispatcher
            .dispatch(&context(2, GeofenceEventType::Enter))
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                (0, 2, GeofenceEventType::Enter),
                (1, 2, GeofenceEventType::Enter),
                (2, 2, GeofenceEventType::Enter),
            ]
        );
    }

    #[test]
    fn test_dispatch_without_subscribers() {
        let mut dispatcher = EventDispatcher::new();
        assert!(dispatcher.is_empty());
        assert!(dispatcher.dispatch(&context(0, GeofenceEventType::Inside)).is_ok());
    }

    #[test]
    fn test_failing_subscriber_stops_dispatch() {
        let calls = Arc::new(Mutex::new(0));
        let mut dispatcher = EventDispatcher::new();

        dispatcher.register(|_: &CallbackContext| Err("radio offline".into()));
        let later = calls.clone();
        dispatcher.register(move |_: &CallbackContext| {
            *later.lock().unwrap() += 1;
            Ok(())
        });

        let err = dispatcher
            .dispatch(&context(0, GeofenceEventType::Exit))
            .unwrap_err();
        assert_eq!(err.to_string(), "radio offline");
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
