//! SymMerkle CLI
//!
//! Command-line driver for building roots, generating proofs and checking
//! proofs over the commutative-pair Merkle tree.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use symmerkle_core::{hash_leaf, HashAlgorithm, LeafValue, MerkleProof, SentinelPolicy, TreeConfig};
use symmerkle_logging::init_logging;
use symmerkle_prover::{MerkleTree, Prover, SymmetricProver};
use symmerkle_settings::Settings;

/// SymMerkle - symmetric-pair Merkle commitments
#[derive(Parser)]
#[command(name = "symmerkle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.symmerkle/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Hash primitive (keccak256 | sha256), overrides settings
    #[arg(long, global = true)]
    hash: Option<HashAlgorithm>,

    /// Accept leaves equal to the padding sentinel (zero)
    #[arg(long, global = true)]
    allow_sentinel: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the root of a leaf list
    Root {
        /// JSON array of leaves, or "-" for stdin
        leaves: PathBuf,

        /// Treat each entry as a raw string and hash it into a leaf
        #[arg(long)]
        hash_leaves: bool,
    },

    /// Generate a membership proof for one leaf
    Prove {
        /// JSON array of leaves, or "-" for stdin
        leaves: PathBuf,

        /// Index of the leaf to prove
        #[arg(short, long)]
        index: usize,

        /// Treat each entry as a raw string and hash it into a leaf
        #[arg(long)]
        hash_leaves: bool,
    },

    /// Check a proof against a root (exit code 1 when invalid)
    Verify {
        /// Published root
        #[arg(long)]
        root: LeafValue,

        /// Claimed leaf value
        #[arg(long)]
        leaf: LeafValue,

        /// Proof file written by `prove`, or a bare JSON array of siblings
        #[arg(long, conflicts_with = "sibling")]
        proof: Option<PathBuf>,

        /// Sibling values in order, leaf layer first
        #[arg(long)]
        sibling: Vec<LeafValue>,
    },

    /// Build a five-leaf tree and show a good and a bad verification
    Demo,
}

/// Output of `prove`, accepted back by `verify --proof`.
#[derive(Debug, Serialize, Deserialize)]
struct ProofReport {
    hash_algorithm: HashAlgorithm,
    index: usize,
    leaf: LeafValue,
    root: LeafValue,
    proof: Vec<LeafValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProofFile {
    Report { proof: Vec<LeafValue> },
    Bare(Vec<LeafValue>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load_or_default(),
    }
    .context("failed to load settings")?;

    init_logging(
        cli.verbose || settings.logging.verbose,
        settings.logging.filter.as_deref(),
    );

    let config = tree_config(&cli, &settings);
    debug!("Using {:?}", config);
    let pretty = settings.output.pretty_json;

    match cli.command {
        Commands::Root { leaves, hash_leaves } => {
            let leaves = load_leaves(&leaves, hash_leaves, config.hash_algorithm)?;
            root(config, &leaves)?;
        }
        Commands::Prove {
            leaves,
            index,
            hash_leaves,
        } => {
            let leaves = load_leaves(&leaves, hash_leaves, config.hash_algorithm)?;
            prove(config, &leaves, index, pretty)?;
        }
        Commands::Verify {
            root,
            leaf,
            proof,
            sibling,
        } => {
            let proof = match proof {
                Some(path) => load_proof(&path)?,
                None => MerkleProof::new(sibling),
            };
            if !verify(config, &root, &leaf, &proof) {
                std::process::exit(1);
            }
        }
        Commands::Demo => {
            demo(config)?;
        }
    }

    Ok(())
}

/// CLI flags win over the settings file.
fn tree_config(cli: &Cli, settings: &Settings) -> TreeConfig {
    let mut config = settings.tree;
    if let Some(hash) = cli.hash {
        config.hash_algorithm = hash;
    }
    if cli.allow_sentinel {
        config.sentinel_policy = SentinelPolicy::Allow;
    }
    config
}

// ============================================================================
// Commands
// ============================================================================

fn root(config: TreeConfig, leaves: &[LeafValue]) -> Result<()> {
    let prover = SymmetricProver::new(config);
    let root = prover.commit(leaves)?;
    info!("Root over {} leaves", leaves.len());
    println!("{}", root);
    Ok(())
}

fn prove(config: TreeConfig, leaves: &[LeafValue], index: usize, pretty: bool) -> Result<()> {
    let tree = MerkleTree::with_config(config, leaves)?;
    let proof = tree.proof(index)?;

    let report = ProofReport {
        hash_algorithm: config.hash_algorithm,
        index,
        leaf: leaves[index],
        root: tree.root(),
        proof: proof.siblings,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}

fn verify(config: TreeConfig, root: &LeafValue, leaf: &LeafValue, proof: &MerkleProof) -> bool {
    let prover = SymmetricProver::new(config);
    let valid = prover.verify(root, leaf, proof);
    info!("Verified {} siblings against {}: {}", proof.len(), root, valid);
    println!("{}", if valid { "valid" } else { "invalid" });
    valid
}

fn demo(config: TreeConfig) -> Result<()> {
    let leaves: Vec<LeafValue> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|s| hash_leaf(&config.hash_algorithm, s.as_bytes()))
        .collect();

    let tree = MerkleTree::with_config(config, &leaves)?;
    println!("Hash: {}", config.hash_algorithm);
    println!("Root: {}", tree.root());

    let proof = tree.proof(4)?;
    println!("Proof for leaf 4 ({} siblings):", proof.len());
    for sibling in &proof {
        println!("  {}", sibling);
    }

    let good = tree.verify(&leaves[4], &proof);
    let bad = tree.verify(&leaves[0], &proof);
    println!("verify(leaf 4) = {}", good);
    println!("verify(leaf 0 with leaf 4's proof) = {}", bad);

    ensure!(good && !bad, "demo verification produced unexpected results");
    Ok(())
}

// ============================================================================
// Input
// ============================================================================

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))
    }
}

fn parse_leaves(content: &str, hash_leaves: bool, hash: HashAlgorithm) -> Result<Vec<LeafValue>> {
    if hash_leaves {
        let records: Vec<String> =
            serde_json::from_str(content).context("leaves must be a JSON array of strings")?;
        Ok(records
            .iter()
            .map(|r| hash_leaf(&hash, r.as_bytes()))
            .collect())
    } else {
        serde_json::from_str(content).context("leaves must be a JSON array of hex values")
    }
}

fn load_leaves(path: &Path, hash_leaves: bool, hash: HashAlgorithm) -> Result<Vec<LeafValue>> {
    parse_leaves(&read_input(path)?, hash_leaves, hash)
}

fn parse_proof(content: &str) -> Result<MerkleProof> {
    let file: ProofFile = serde_json::from_str(content)
        .context("proof must be a `prove` report or a JSON array of hex values")?;
    let siblings = match file {
        ProofFile::Report { proof } => proof,
        ProofFile::Bare(siblings) => siblings,
    };
    Ok(MerkleProof::new(siblings))
}

fn load_proof(path: &Path) -> Result<MerkleProof> {
    parse_proof(&read_input(path)?)
}
