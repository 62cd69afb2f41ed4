//! Commit store notifications.
//!
//! The store announces commitments, reveals, and its own lifecycle on
//! separate topics so that a chain submitter can listen to commits only while
//! a UI listens to everything.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CommitEvent, LifecycleEvent, RevealEvent};
