//! Command line interface for the `pistols` binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use client_blockchain_core::{DuelContract, InMemoryDuelContract};
use duel_core::{
    DuelError, DuelId, DuelistHand, Felt, Moves, MovesHash, RoundNumber, Salt, make_moves_hash,
    make_pact_pair, parse_felt, restore_moves_from_hash,
};
use duel_runtime::{CommitRecord, CommitStore, InMemoryCommitRepo};

use crate::PistolsClient;
use crate::builder::build_store;
use crate::config::ClientConfig;

#[derive(Debug, Parser)]
#[command(name = "pistols", version, about = "Commit/reveal moves for Pistols duels")]
pub struct Cli {
    /// Directory holding commit files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep commitments in memory only
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Directory for log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Local duelist address (hex or decimal)
    #[arg(long, global = true, value_parser = parse_felt)]
    pub duelist: Option<Felt>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Overlay command line flags on top of the environment configuration.
    pub fn merge_into(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if self.in_memory {
            config.in_memory = true;
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(duelist) = self.duelist {
            config.duelist = Some(duelist);
        }
        config
    }
}

#[derive(Debug, Args)]
pub struct RoundArgs {
    /// Duel id (hex or decimal)
    #[arg(long, value_parser = parse_felt)]
    pub duel: DuelId,

    /// Round number
    #[arg(long, default_value_t = 1)]
    pub round: RoundNumber,
}

#[derive(Debug, Args)]
pub struct SaltArgs {
    /// Salt value (hex or decimal)
    #[arg(long, value_parser = parse_felt, conflicts_with = "signature")]
    pub salt: Option<Felt>,

    /// Signature elements to derive the salt from, comma separated
    #[arg(long, value_parser = parse_felt, value_delimiter = ',')]
    pub signature: Vec<Felt>,
}

/// Parse a published moves hash, which must fit in 128 bits.
fn parse_moves_hash(input: &str) -> Result<MovesHash, DuelError> {
    MovesHash::try_from(parse_felt(input)?)
}

impl SaltArgs {
    fn resolve(&self) -> Result<Salt> {
        let salt = match self.salt {
            Some(value) => Salt::new(value),
            None => Salt::from_signature(&self.signature),
        };
        if !salt.is_set() {
            bail!("a non-zero --salt or a 2 element --signature is required");
        }
        Ok(salt)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Commit moves for a round and print the hash to publish
    Commit {
        #[command(flatten)]
        round: RoundArgs,
        /// Moves in slot order: fire, dodge, tactics, blades
        #[arg(required = true)]
        moves: Vec<u8>,
    },
    /// Show the stored commitment of a round
    Show {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// Print the reveal payload and mark the round revealed
    Reveal {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// Drop the stored commitment of a round
    Clear {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// List stored duels, or the rounds of one duel
    List {
        #[arg(long, value_parser = parse_felt)]
        duel: Option<DuelId>,
    },
    /// Compute a moves hash without storing anything
    Hash {
        #[command(flatten)]
        salt: SaltArgs,
        #[arg(required = true)]
        moves: Vec<u8>,
    },
    /// Recover moves from a hash using every known card
    Restore {
        #[command(flatten)]
        salt: SaltArgs,
        /// Moves hash (hex or decimal, below 2^128)
        #[arg(long, value_parser = parse_moves_hash)]
        hash: MovesHash,
    },
    /// Compute the pact id of two addresses
    Pact {
        #[arg(value_parser = parse_felt)]
        address_a: Felt,
        /// Second address, defaults to the local duelist
        #[arg(value_parser = parse_felt)]
        address_b: Option<Felt>,
    },
    /// Play one round between two local duelists on an in-memory contract
    Demo,
}

/// Execute a parsed command.
pub async fn run(command: Command, config: ClientConfig) -> Result<()> {
    match command {
        Command::Hash { salt, moves } => {
            let salt = salt.resolve()?;
            let hash = make_moves_hash(&salt, &moves).context("salt is not set")?;
            println!("salt: {salt}");
            println!("hash: {hash}");
            Ok(())
        }
        Command::Restore { salt, hash } => {
            let salt = salt.resolve()?;
            let restored = restore_moves_from_hash(&salt, hash, &DuelistHand::full_decks());
            if !restored.is_complete() {
                println!("partial: {:?}", restored.moves().as_slice());
                bail!("no hand matches {hash}");
            }
            print_moves(restored.moves());
            Ok(())
        }
        Command::Pact {
            address_a,
            address_b,
        } => {
            let address_b = address_b
                .or(config.duelist)
                .context("a second address or --duelist is required")?;
            println!("0x{:032x}", make_pact_pair(&address_a, &address_b));
            Ok(())
        }
        Command::Demo => run_demo().await,
        Command::Commit { round, moves } => {
            with_store(config, |store| {
                match store.make_commit_moves(&round.duel, round.round, &moves)? {
                    Some(record) => print_record(&record),
                    None => println!("nothing committed"),
                }
                Ok(())
            })
        }
        Command::Show { round } => {
            with_store(config, |store| {
                match store.commit_move(&round.duel, round.round)? {
                    Some(record) => print_record(&record),
                    None => println!("no commitment for round {}", round.round),
                }
                Ok(())
            })
        }
        Command::Reveal { round } => {
            with_store(config, |store| {
                match store.reveal(&round.duel, round.round)? {
                    Some(payload) => {
                        println!("salt: {}", payload.salt);
                        print_moves(&payload.moves);
                        store.mark_revealed(&round.duel, round.round)?;
                    }
                    None => println!("nothing to reveal for round {}", round.round),
                }
                Ok(())
            })
        }
        Command::Clear { round } => {
            with_store(config, |store| {
                if store.clear_round(&round.duel, round.round)? {
                    println!("cleared round {}", round.round);
                } else {
                    println!("no commitment for round {}", round.round);
                }
                Ok(())
            })
        }
        Command::List { duel } => {
            with_store(config, |store| {
                match duel {
                    Some(duel) => {
                        for round in store.rounds(&duel)? {
                            println!("{round}");
                        }
                    }
                    None => {
                        for duel in store.duels()? {
                            println!("{}", duel.to_hex_string());
                        }
                    }
                }
                Ok(())
            })
        }
    }
}

/// Open the configured store, run a local command, then shut down.
///
/// Local commands only touch the duelist's own records, so no duelist
/// address is needed.
fn with_store<F>(config: ClientConfig, f: F) -> Result<()>
where
    F: FnOnce(&CommitStore) -> Result<()>,
{
    let store = build_store(&config)?;
    let result = f(&store);
    store.shutdown();
    result
}

async fn run_demo() -> Result<()> {
    let contract = Arc::new(InMemoryDuelContract::new());
    let duel = Felt::from(1u64);
    let alice = Felt::from(0xA11CEu64);
    let bob = Felt::from(0xB0Bu64);
    contract.create_duel(duel, alice, bob)?;

    let mut players = Vec::new();
    for (duelist, hand) in [(alice, [5u8, 7, 2, 1]), (bob, [6u8, 4, 3, 2])] {
        let store = CommitStore::builder()
            .repository(Arc::new(InMemoryCommitRepo::new()))
            .build();
        let mut client = PistolsClient::builder()
            .store(Arc::new(store))
            .contract(Arc::clone(&contract) as Arc<dyn DuelContract>)
            .duelist(duelist)
            .build()?;
        client.start();
        players.push((client, hand));
    }

    for (client, hand) in &players {
        let record = client
            .commit(&duel, 1, hand)
            .await?
            .context("commitment not ready")?;
        println!("{} committed {}", client.duelist().to_hex_string(), record.hash);
    }

    println!(
        "round state: {}",
        contract.get_round(&duel).await?.state
    );

    for (client, _) in &players {
        if let Some((payload, tx)) = client.reveal(&duel, 1).await? {
            let hand = DuelistHand::from_moves(&payload.moves)?;
            println!("{} revealed {:?}", client.duelist().to_hex_string(), hand);
            if let Some(tx) = tx {
                println!("  tx {tx}");
            }
        }
    }

    let round = contract.get_round(&duel).await?;
    println!("round state: {}", round.state);
    println!(
        "pact: {:?}",
        players[0].0.find_duel(&bob).await?.map(|id| id.to_hex_string())
    );

    for (client, _) in players {
        client.shutdown().await;
    }
    Ok(())
}

fn print_record(record: &CommitRecord) {
    println!("hash: {}", record.hash);
    println!("salt: {}", record.salt);
    print_moves(&record.moves);
    println!("submitted: {}", record.submitted);
    println!("revealed: {}", record.revealed);
}

fn print_moves(moves: &Moves) {
    println!("moves: {:?}", moves.as_slice());
    match DuelistHand::from_moves(moves) {
        Ok(hand) => println!("hand: {hand:?}"),
        Err(e) => tracing::debug!("moves do not decode into a hand: {}", e),
    }
}
