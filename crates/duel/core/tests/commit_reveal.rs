use duel_core::{
    BladesCard, DuelistHand, Felt, MAX_U32, MoveHasher, Moves, PacesCard, PoseidonHasher,
    RandomSalt, Salt, SaltSource, TacticsCard, make_moves_hash, make_moves_hash_with,
    make_pact_pair, restore_moves_from_hash, verify_moves_hash,
};

/// Lane hasher that only looks at the move, to check masking and OR-combining
/// without depending on Poseidon output.
struct EchoHasher;

impl MoveHasher for EchoHasher {
    fn hash_move(&self, _salt: &Salt, value: u8) -> Felt {
        // Repeat the move byte across all 16 low bytes
        let byte = u128::from(value);
        let pattern = (0..16).fold(0u128, |acc, i| acc | (byte << (8 * i)));
        Felt::from(pattern)
    }
}

#[test]
fn test_lanes_are_masked_and_combined() {
    let salt = Salt::from(1u64);
    let hash = make_moves_hash_with(&EchoHasher, &salt, &[0x11, 0, 0x33, 0x44]).unwrap();
    assert_eq!(hash.value() & MAX_U32, 0x1111_1111);
    assert_eq!((hash.value() >> 32) & MAX_U32, 0);
    assert_eq!((hash.value() >> 64) & MAX_U32, 0x3333_3333);
    assert_eq!((hash.value() >> 96) & MAX_U32, 0x4444_4444);
}

#[test]
fn test_commit_then_reveal_full_hand() {
    let hand = DuelistHand {
        card_fire: PacesCard::Paces8,
        card_dodge: PacesCard::Paces4,
        card_tactics: TacticsCard::ThickCoat,
        card_blades: BladesCard::Behead,
    };
    let moves = hand.to_moves();

    let salt = RandomSalt::seeded(2024).next_salt();
    let hash = make_moves_hash(&salt, moves.as_slice()).expect("salt is set");

    // The verifier recomputes from the revealed pair
    assert!(verify_moves_hash(&salt, moves.as_slice(), hash));

    // A player who lost the record can still recover the hand from the salt
    let restored = restore_moves_from_hash(&salt, hash, &DuelistHand::full_decks())
        .into_complete()
        .expect("all slots restore");
    assert_eq!(restored, moves);
    assert_eq!(DuelistHand::from_moves(&restored).unwrap(), hand);
}

#[test]
fn test_signature_salt_commitment_is_stable() {
    let signature = [Felt::from(0x1111u64), Felt::from(0x2222u64)];
    let salt = Salt::from_signature(&signature);
    let first = make_moves_hash(&salt, &[2, 9]).unwrap();
    let second = make_moves_hash(&Salt::from_signature(&signature), &[2, 9]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_poseidon_hasher_matches_builder() {
    let salt = Salt::from(555u64);
    let lane = PoseidonHasher.hash_move_low(&salt, 6) & MAX_U32;
    assert_eq!(make_moves_hash(&salt, &[6]).unwrap().value(), lane);
    assert_eq!(Moves::single(6).as_slice(), &[6]);
}

#[test]
fn test_pact_pair_symmetry() {
    let a = Felt::from_hex("0x0523a1f7b8d0c1e6ea9a2df1a9b0c0ffee").unwrap();
    let b = Felt::from_hex("0x0444cafe").unwrap();
    assert_eq!(make_pact_pair(&a, &b), make_pact_pair(&b, &a));
    assert_eq!(make_pact_pair(&a, &Felt::ZERO), 0);
}
