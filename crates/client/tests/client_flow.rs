use std::sync::Arc;

use client_blockchain_core::{DuelContract, InMemoryDuelContract, RoundState};
use duel_core::{Felt, RandomSalt, make_pact_pair, verify_moves_hash};
use duel_runtime::{CommitStore, Event, LifecycleEvent, RevealEvent, Topic};
use pistols_client::{ClientConfig, PistolsClient};

const DUEL: u64 = 0xD0E1;
const ALICE: u64 = 0xA11CE;
const BOB: u64 = 0xB0B;

fn client(contract: &Arc<InMemoryDuelContract>, duelist: u64, seed: u64) -> PistolsClient {
    let store = CommitStore::builder()
        .salt_source(RandomSalt::seeded(seed))
        .build();
    PistolsClient::builder()
        .store(Arc::new(store))
        .contract(Arc::clone(contract) as Arc<dyn DuelContract>)
        .duelist(Felt::from(duelist))
        .build()
        .unwrap()
}

fn setup() -> (Arc<InMemoryDuelContract>, PistolsClient, PistolsClient) {
    let contract = Arc::new(InMemoryDuelContract::new());
    contract
        .create_duel(Felt::from(DUEL), Felt::from(ALICE), Felt::from(BOB))
        .unwrap();
    let alice = client(&contract, ALICE, 1);
    let bob = client(&contract, BOB, 2);
    (contract, alice, bob)
}

#[tokio::test]
async fn test_full_round_against_contract() {
    let (contract, alice, bob) = setup();
    let duel = Felt::from(DUEL);

    let a = alice.commit(&duel, 1, &[5, 7, 2, 1]).await.unwrap().unwrap();
    let b = bob.commit(&duel, 1, &[6, 4, 3, 2]).await.unwrap().unwrap();

    let round = contract.get_round(&duel).await.unwrap();
    assert_eq!(round.state, RoundState::Reveal);
    assert_eq!(round.commits.get(&Felt::from(ALICE)), Some(&a.hash));
    assert_eq!(round.commits.get(&Felt::from(BOB)), Some(&b.hash));

    let (payload, tx) = alice.reveal(&duel, 1).await.unwrap().unwrap();
    assert!(tx.is_some());
    assert!(verify_moves_hash(&payload.salt, payload.moves.as_slice(), a.hash));
    bob.reveal(&duel, 1).await.unwrap().unwrap();

    let round = contract.get_round(&duel).await.unwrap();
    assert_eq!(round.state, RoundState::Finished);
    assert_eq!(round.reveals.get(&Felt::from(BOB)).unwrap().as_slice(), &[6, 4, 3, 2]);

    assert!(alice.store().commit_move(&duel, 1).unwrap().unwrap().revealed);
}

#[tokio::test]
async fn test_recommit_same_hand_is_not_resubmitted() {
    let (_contract, alice, _bob) = setup();
    let duel = Felt::from(DUEL);

    let first = alice.commit(&duel, 1, &[3]).await.unwrap().unwrap();
    // Contract would reject a second commit; the client must skip it
    let second = alice.commit(&duel, 1, &[3]).await.unwrap().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_changed_selection_after_onchain_commit_is_refused() {
    let (contract, alice, bob) = setup();
    let duel = Felt::from(DUEL);

    let first = alice.commit(&duel, 1, &[3]).await.unwrap().unwrap();
    assert!(first.submitted);
    assert!(alice.commit(&duel, 1, &[4]).await.is_err());

    // Local secret still opens the on-chain hash
    let kept = alice.store().commit_move(&duel, 1).unwrap().unwrap();
    assert_eq!(kept, first);
    let onchain = contract.get_round(&duel).await.unwrap().commits[&Felt::from(ALICE)];
    assert!(verify_moves_hash(&kept.salt, kept.moves.as_slice(), onchain));

    bob.commit(&duel, 1, &[6]).await.unwrap().unwrap();
    alice.reveal(&duel, 1).await.unwrap().unwrap();
    bob.reveal(&duel, 1).await.unwrap().unwrap();
    assert_eq!(
        contract.get_round(&duel).await.unwrap().state,
        RoundState::Finished
    );
}

#[tokio::test]
async fn test_onchain_commit_without_local_record_is_refused() {
    let (contract, alice, _bob) = setup();
    let duel = Felt::from(DUEL);

    alice.commit(&duel, 1, &[3]).await.unwrap().unwrap();

    // Same duelist on a fresh store, e.g. after losing local data
    let fresh = client(&contract, ALICE, 9);
    assert!(fresh.commit(&duel, 1, &[3]).await.is_err());
    assert_eq!(fresh.store().commit_move(&duel, 1).unwrap(), None);
}

#[tokio::test]
async fn test_start_announces_lifecycle() {
    let (_contract, mut alice, _bob) = setup();
    let mut lifecycle = alice.store().events().subscribe(Topic::Lifecycle);

    alice.start();
    assert_eq!(
        lifecycle.recv().await.unwrap(),
        Event::Lifecycle(LifecycleEvent::Started)
    );

    // Second start does nothing
    alice.start();
    alice.shutdown().await;
    assert_eq!(
        lifecycle.recv().await.unwrap(),
        Event::Lifecycle(LifecycleEvent::ShuttingDown)
    );
}

#[tokio::test]
async fn test_reveal_before_opponent_commits_fails() {
    let (_contract, alice, _bob) = setup();
    let duel = Felt::from(DUEL);

    alice.commit(&duel, 1, &[3]).await.unwrap().unwrap();
    assert!(alice.reveal(&duel, 1).await.is_err());
    // Rejected reveal leaves the local record unrevealed
    assert!(!alice.store().commit_move(&duel, 1).unwrap().unwrap().revealed);
}

#[tokio::test]
async fn test_blank_and_missing_rounds() {
    let (contract, alice, _bob) = setup();
    let duel = Felt::from(DUEL);

    assert_eq!(alice.commit(&duel, 1, &[0]).await.unwrap(), None);
    assert!(!contract.has_committed(&Felt::from(ALICE), &duel).await.unwrap());
    assert!(alice.reveal(&duel, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_pact_and_duel_lookup() {
    let (_contract, alice, bob) = setup();

    assert_eq!(alice.pact(&Felt::from(BOB)), bob.pact(&Felt::from(ALICE)));
    assert_eq!(
        alice.pact(&Felt::from(BOB)),
        make_pact_pair(&Felt::from(ALICE), &Felt::from(BOB))
    );
    assert_eq!(
        alice.find_duel(&Felt::from(BOB)).await.unwrap(),
        Some(Felt::from(DUEL))
    );
}

#[tokio::test]
async fn test_local_only_reveal_marks_record() {
    let config = ClientConfig {
        in_memory: true,
        duelist: Some(Felt::from(ALICE)),
        ..ClientConfig::default()
    };
    let mut client = PistolsClient::builder().config(config).build().unwrap();
    client.start();

    let duel = Felt::from(DUEL);
    let mut reveals = client.store().events().subscribe(Topic::Reveal);
    let mut lifecycle = client.store().events().subscribe(Topic::Lifecycle);

    client.commit(&duel, 2, &[4, 4]).await.unwrap().unwrap();
    let (payload, tx) = client.reveal(&duel, 2).await.unwrap().unwrap();
    assert!(tx.is_none());

    assert_eq!(
        reveals.recv().await.unwrap(),
        Event::Reveal(RevealEvent::Revealed {
            duel_id: duel,
            round: 2,
            moves: payload.moves,
        })
    );

    client.shutdown().await;
    assert_eq!(
        lifecycle.recv().await.unwrap(),
        Event::Lifecycle(LifecycleEvent::ShuttingDown)
    );
}
