//! Type definitions for signal system

use crate::event::DatabaseEvent;

/// Event callback invoked synchronously for every emitted event
pub type EventCallback = Box<dyn Fn(&DatabaseEvent) + Send + Sync>;
