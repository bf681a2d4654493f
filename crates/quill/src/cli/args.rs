//! # CLI Argument Definitions
//!
//! The command-line structure, declared with clap derive macros.
//!
//! - `quill init [--force]`
//! - `quill rlp encode <JSON>` / `quill rlp decode <HEX>`
//! - `quill ethereum address` / `quill ethereum sign <TX_HEX> [--format hex|json]`
//! - `quill identity address` / `quill identity sign <MESSAGE> [--hex]`
//! - `quill address normalize <RAW>`
//! - `quill mnemonic generate` / `quill mnemonic validate <WORDS>...`
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level
//! - `-c, --config <PATH>` - Path to configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Wallet core: RLP tooling and Ethereum transaction signing.
#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(author, version, about = "RLP tooling and Ethereum transaction signing")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    ///
    /// `-v` shows info messages, `-vv` debug and `-vvv` trace. `RUST_LOG`
    /// takes precedence over both this flag and the config file.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    ///
    /// Defaults to `~/.quill/config.toml`.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Encode and decode RLP
    Rlp {
        /// RLP command to execute
        #[command(subcommand)]
        command: RlpCommands,
    },

    /// Payment key commands
    ///
    /// The payment key is derived at the configured `payment_path` and signs
    /// Ethereum transactions.
    Ethereum {
        /// Ethereum command to execute
        #[command(subcommand)]
        command: EthereumCommands,
    },

    /// Identity key commands
    ///
    /// The identity key is derived at the configured `identity_path` and signs
    /// messages.
    Identity {
        /// Identity command to execute
        #[command(subcommand)]
        command: IdentityCommands,
    },

    /// Ethereum address utilities
    Address {
        /// Address command to execute
        #[command(subcommand)]
        command: AddressCommands,
    },

    /// BIP-39 mnemonic utilities
    Mnemonic {
        /// Mnemonic command to execute
        #[command(subcommand)]
        command: MnemonicCommands,
    },
}

/// RLP commands.
#[derive(Debug, Subcommand)]
pub enum RlpCommands {
    /// Encode a JSON value as RLP hex
    ///
    /// Strings starting with `0x` are byte strings given in hex, other
    /// strings are UTF-8, non-negative integers are big-endian and arrays
    /// are lists.
    Encode {
        /// JSON value, e.g. `["0x01", "dog", 1024]`
        #[arg(value_name = "JSON")]
        json: String,
    },

    /// Decode RLP hex into JSON
    Decode {
        /// RLP bytes as hex (with or without 0x prefix)
        #[arg(value_name = "HEX")]
        hex: String,
    },
}

/// Ethereum commands.
#[derive(Debug, Subcommand)]
pub enum EthereumCommands {
    /// Display the payment address
    Address,

    /// Sign an unsigned legacy or EIP-155 transaction
    Sign {
        /// RLP-encoded unsigned transaction hex (with or without 0x prefix)
        #[arg(value_name = "TX_HEX")]
        transaction: String,

        /// Output format
        ///
        /// - `hex` - The signed transaction as `0x` hex (default)
        /// - `json` - Hash, chain id and signature values as well
        #[arg(short, long, default_value = "hex", value_name = "FORMAT")]
        format: OutputFormat,
    },
}

/// Identity commands.
#[derive(Debug, Subcommand)]
pub enum IdentityCommands {
    /// Display the identity address
    Address,

    /// Sign a message with the identity key
    ///
    /// Prints the 65-byte `r || s || recovery_id` signature as hex.
    Sign {
        /// Message to sign
        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Treat MESSAGE as hex-encoded bytes instead of UTF-8 text
        #[arg(long)]
        hex: bool,
    },
}

/// Address commands.
#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// Normalize an address to lowercase `0x` hex
    ///
    /// Accepts `0x` hex, bare hex, `ethereum:` links and ICAP `iban:XE`
    /// addresses.
    Normalize {
        /// Address as pasted or scanned
        #[arg(value_name = "RAW")]
        raw: String,
    },
}

/// Mnemonic commands.
#[derive(Debug, Subcommand)]
pub enum MnemonicCommands {
    /// Generate a new 12-word mnemonic
    Generate,

    /// Check a mnemonic's words and checksum
    Validate {
        /// Mnemonic words
        #[arg(value_name = "WORDS", required = true, num_args = 1..)]
        words: Vec<String>,
    },
}

/// Output format for signed transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `0x`-prefixed hex
    #[default]
    Hex,
    /// Pretty-printed JSON
    Json,
}
