//! In-memory duel contract for local play and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use duel_core::{DuelId, Felt, Moves, MovesHash, Salt, make_pact_pair, verify_moves_hash};

use crate::traits::{ContractError, DuelContract};
use crate::types::{OnChainRound, RoundState, TransactionId};

#[derive(Default)]
struct ChainState {
    rounds: HashMap<DuelId, OnChainRound>,
    pacts: HashMap<u128, DuelId>,
    transaction_counter: u64,
}

impl ChainState {
    fn next_tx_id(&mut self) -> TransactionId {
        self.transaction_counter += 1;
        TransactionId::from_bytes(self.transaction_counter.to_be_bytes().to_vec())
    }

    fn round_mut(&mut self, duel_id: &DuelId) -> Result<&mut OnChainRound, ContractError> {
        self.rounds
            .get_mut(duel_id)
            .ok_or_else(|| ContractError::DuelNotFound(duel_id.to_hex_string()))
    }
}

/// Simulates the duel contract in memory.
///
/// Reveals are checked with [`verify_moves_hash`], the same computation the
/// deployed contract performs.
#[derive(Clone, Default)]
pub struct InMemoryDuelContract {
    state: Arc<Mutex<ChainState>>,
}

impl InMemoryDuelContract {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ChainState>, ContractError> {
        self.state
            .lock()
            .map_err(|_| ContractError::BackendError("chain state lock poisoned".into()))
    }

    /// Open a duel between two addresses and record their pact.
    pub fn create_duel(
        &self,
        duel_id: DuelId,
        duelist_a: Felt,
        duelist_b: Felt,
    ) -> Result<(), ContractError> {
        let mut state = self.lock()?;
        if state.rounds.contains_key(&duel_id) {
            return Err(ContractError::DuelExists(duel_id.to_hex_string()));
        }

        let pair = make_pact_pair(&duelist_a, &duelist_b);
        if pair != 0 {
            state.pacts.insert(pair, duel_id);
        }
        state
            .rounds
            .insert(duel_id, OnChainRound::new(duel_id, duelist_a, duelist_b));

        tracing::debug!("Created duel {}", duel_id.to_hex_string());
        Ok(())
    }
}

#[async_trait]
impl DuelContract for InMemoryDuelContract {
    async fn commit_moves(
        &self,
        duelist: &Felt,
        duel_id: &DuelId,
        hash: MovesHash,
    ) -> Result<TransactionId, ContractError> {
        let mut state = self.lock()?;
        let round = state.round_mut(duel_id)?;

        if !round.is_duelist(duelist) {
            return Err(ContractError::NotADuelist(duelist.to_hex_string()));
        }
        if round.state != RoundState::Commit {
            return Err(ContractError::WrongState {
                expected: RoundState::Commit,
                actual: round.state,
            });
        }
        if round.commits.contains_key(duelist) {
            return Err(ContractError::AlreadyCommitted);
        }

        round.commits.insert(*duelist, hash);
        if round.commits.len() == 2 {
            round.state = RoundState::Reveal;
        }

        Ok(state.next_tx_id())
    }

    async fn reveal_moves(
        &self,
        duelist: &Felt,
        duel_id: &DuelId,
        salt: Salt,
        moves: &Moves,
    ) -> Result<TransactionId, ContractError> {
        let mut state = self.lock()?;
        let round = state.round_mut(duel_id)?;

        if !round.is_duelist(duelist) {
            return Err(ContractError::NotADuelist(duelist.to_hex_string()));
        }
        if round.state != RoundState::Reveal {
            return Err(ContractError::WrongState {
                expected: RoundState::Reveal,
                actual: round.state,
            });
        }
        if round.reveals.contains_key(duelist) {
            return Err(ContractError::AlreadyRevealed);
        }

        let committed = round
            .commits
            .get(duelist)
            .copied()
            .ok_or(ContractError::HashMismatch)?;
        if !verify_moves_hash(&salt, moves.as_slice(), committed) {
            tracing::warn!(
                "Reveal mismatch for duel {}: committed {}",
                duel_id.to_hex_string(),
                committed
            );
            return Err(ContractError::HashMismatch);
        }

        round.reveals.insert(*duelist, moves.clone());
        if round.reveals.len() == 2 {
            round.state = RoundState::Finished;
        }

        Ok(state.next_tx_id())
    }

    async fn get_round(&self, duel_id: &DuelId) -> Result<OnChainRound, ContractError> {
        let state = self.lock()?;
        state
            .rounds
            .get(duel_id)
            .cloned()
            .ok_or_else(|| ContractError::DuelNotFound(duel_id.to_hex_string()))
    }

    async fn get_pact(
        &self,
        address_a: &Felt,
        address_b: &Felt,
    ) -> Result<Option<DuelId>, ContractError> {
        let pair = make_pact_pair(address_a, address_b);
        if pair == 0 {
            return Ok(None);
        }
        let state = self.lock()?;
        Ok(state.pacts.get(&pair).copied())
    }
}
