use crate::event::DatabaseEvent;
use crate::types::EventCallback;

/// Signal manager for write notifications
pub struct SignalManager {
    callbacks: std::sync::RwLock<Vec<EventCallback>>,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self {
            callbacks: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Add event callback
    pub fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&DatabaseEvent) + Send + Sync + 'static,
    {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.push(Box::new(callback));
        }
    }

    /// Add a callback that only sees events for `table`
    pub fn subscribe_table<F>(&self, table: &str, callback: F)
    where
        F: Fn(&DatabaseEvent) + Send + Sync + 'static,
    {
        let table = table.to_string();
        self.add_callback(move |event| {
            if event.affects(&table) {
                callback(event);
            }
        });
    }

    /// Emit event to all subscribers
    pub fn emit(&self, event: &DatabaseEvent) {
        tracing::trace!(
            table = %event.table_name,
            event_type = ?event.event_type,
            "emitting write event"
        );
        if let Ok(callbacks) = self.callbacks.read() {
            for callback in callbacks.iter() {
                callback(event);
            }
        }
    }

    /// Clear all callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_reaches_every_callback() {
        let manager = SignalManager::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let hits = hits.clone();
            manager.add_callback(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        manager.emit(&DatabaseEvent::new(EventType::Create, "players"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(manager.callback_count(), 2);
    }

    #[test]
    fn test_callback_sees_table_name() {
        let manager = SignalManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        manager.add_callback(move |event| {
            sink.lock().unwrap().push(event.table_name.clone());
        });

        manager.emit(&DatabaseEvent::new(EventType::Delete, "bans"));
        manager.emit(&DatabaseEvent::new(EventType::Update, "matches"));

        assert_eq!(*seen.lock().unwrap(), vec!["bans", "matches"]);
    }

    #[test]
    fn test_table_subscription_filters_events() {
        let manager = SignalManager::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        manager.subscribe_table("players", move |event| {
            assert_eq!(event.table_name, "players");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(&DatabaseEvent::new(EventType::Create, "players"));
        manager.emit(&DatabaseEvent::new(EventType::Create, "matches"));
        manager.emit(&DatabaseEvent::new(EventType::Upsert, "players"));

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear_callbacks() {
        let manager = SignalManager::default();
        manager.add_callback(|_| {});
        manager.clear_callbacks();
        assert_eq!(manager.callback_count(), 0);
    }
}
