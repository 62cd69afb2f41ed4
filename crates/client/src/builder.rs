//! Client builder with dependency injection pattern.

use std::sync::Arc;

use anyhow::{Context, Result};

use client_blockchain_core::DuelContract;
use duel_core::Felt;
use duel_runtime::{CommitRepository, CommitStore, FileCommitRepository, InMemoryCommitRepo};

use crate::PistolsClient;
use crate::config::ClientConfig;

/// Builder for constructing a [`PistolsClient`].
///
/// A store may be injected directly; otherwise one is assembled from the
/// configuration (file-backed unless `in_memory` is set). The duelist address
/// is required, either explicitly or through the configuration.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    store: Option<Arc<CommitStore>>,
    contract: Option<Arc<dyn DuelContract>>,
    duelist: Option<Felt>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing store instead of building one from the configuration.
    pub fn store(mut self, store: Arc<CommitStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the duel contract (optional).
    ///
    /// Without a contract the client only keeps local commitments.
    pub fn contract(mut self, contract: Arc<dyn DuelContract>) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Set the local duelist address, overriding the configuration.
    pub fn duelist(mut self, duelist: Felt) -> Self {
        self.duelist = Some(duelist);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no duelist address is known or the commit
    /// directory cannot be created.
    pub fn build(self) -> Result<PistolsClient> {
        let duelist = self
            .duelist
            .or(self.config.duelist)
            .context("duelist address is required (set PISTOLS_DUELIST or --duelist)")?;

        let store = match self.store {
            Some(store) => store,
            None => Arc::new(build_store(&self.config)?),
        };

        Ok(PistolsClient {
            store,
            contract: self.contract,
            duelist,
            event_loggers: Vec::new(),
        })
    }
}

pub(crate) fn build_store(config: &ClientConfig) -> Result<CommitStore> {
    let repository: Arc<dyn CommitRepository> = if config.in_memory {
        tracing::info!("Using in-memory commit store");
        Arc::new(InMemoryCommitRepo::new())
    } else {
        let dir = config.resolved_data_dir();
        tracing::info!("Using commit store at {}", dir.display());
        Arc::new(
            FileCommitRepository::new(&dir)
                .with_context(|| format!("opening commit store at {}", dir.display()))?,
        )
    };

    Ok(CommitStore::builder()
        .repository(repository)
        .event_capacity(config.event_capacity)
        .build())
}
