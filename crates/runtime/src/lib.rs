//! Commit/reveal bookkeeping for the local duelist.
//!
//! This crate keeps the player's secret commitments between the moment moves
//! are locked in and the moment they are revealed on-chain. Consumers embed a
//! [`CommitStore`] and subscribe to its [`EventBus`] to react to new
//! commitments.
//!
//! Modules are organized by responsibility:
//! - [`store`] hosts the commit/reveal service and its builder
//! - [`repository`] persists commit records per duel (in memory or on disk)
//! - [`events`] provides the topic-based event bus
pub mod error;
pub mod events;
pub mod repository;
pub mod store;

pub use error::{Result, StoreError};
pub use events::{CommitEvent, Event, EventBus, LifecycleEvent, RevealEvent, Topic};
pub use repository::{
    CommitRecord, CommitRepository, FileCommitRepository, InMemoryCommitRepo, RepositoryError,
};
pub use store::{CommitStore, CommitStoreBuilder, RevealPayload};
