//! Signal system for write notifications
//!
//! This crate lets UI code subscribe to successful writes performed
//! through the data manager, so views can refresh the affected table.

pub mod event;
pub mod manager;
pub mod prelude;
pub mod types;

pub use event::{DatabaseEvent, EventType};
pub use manager::SignalManager;
pub use types::EventCallback;
