//! # CLI Module
//!
//! Command-line interface for `quill`.
//!
//! - [`args`] - Argument parsing and CLI structure definitions
//! - [`commands`] - Command handler implementations
//! - [`phrase`] - Reading the wallet mnemonic
//!
//! ```no_run
//! use clap::Parser;
//! use quill::cli::{Cli, Commands};
//!
//! let cli = Cli::parse();
//! if let Commands::Init { force } = cli.command {
//!     println!("force: {force}");
//! }
//! ```

pub mod args;
pub mod commands;
pub mod phrase;

pub use args::{
    AddressCommands, Cli, Commands, EthereumCommands, IdentityCommands, MnemonicCommands,
    OutputFormat, RlpCommands,
};
