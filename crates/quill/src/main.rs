//! # quill
//!
//! RLP tooling and Ethereum transaction signing from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Write ~/.quill/config.toml
//! quill init
//!
//! # Encode and decode RLP
//! quill rlp encode '["cat", "dog"]'
//! quill rlp decode 0xc88363617483646f67
//!
//! # Sign with the payment key (mnemonic from QUILL_MNEMONIC or a prompt)
//! quill ethereum address
//! quill ethereum sign 0xe5... --format json
//!
//! # Sign a message with the identity key
//! quill identity sign "hello"
//!
//! # Normalize a pasted or scanned address
//! quill address normalize iban:XE420ENF06QHAD2B0729XZJ1OU26UVM0TSN
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use clap::Parser;
use quill::cli::commands::exit_codes::EXIT_ERROR;
use quill::cli::commands::{
    AddressCommand, DecodeCommand, EncodeCommand, GenerateCommand, IdentityAddressCommand,
    IdentitySignCommand, InitCommand, NormalizeCommand, SignCommand, ValidateCommand,
};
use quill::cli::{
    AddressCommands, Cli, Commands, EthereumCommands, IdentityCommands, MnemonicCommands,
    RlpCommands,
};
use quill::logging::{init_logging, LogConfig, LogError, LogGuard};
use quill_core::config::LoggingConfig;
use quill_core::config_loader::ConfigLoader;
use quill_core::Config;

/// A failed command: the exit code and the message shown on stderr.
type Failure = (i32, String);

/// Set up logging from the `[logging]` section and the `-v` count.
fn setup_logging(settings: &LoggingConfig, verbose: u8) -> Result<LogGuard, LogError> {
    init_logging(&LogConfig::from_settings(settings, verbose)?)
}

/// Main entry point for the `quill` binary.
fn main() {
    let cli = Cli::parse();

    let loader = match cli.config.as_deref() {
        Some(path) => ConfigLoader::for_file(path),
        None => ConfigLoader::new().unwrap_or_else(|e| exit_with(EXIT_ERROR, &e)),
    };

    // A broken config file must not stop `init --force` from replacing it.
    let config = match (&cli.command, loader.load()) {
        (_, Ok(config)) => config,
        (Commands::Init { force: true }, Err(_)) => Config::default(),
        (_, Err(e)) => exit_with(EXIT_ERROR, &e),
    };

    let _guard = setup_logging(&config.logging, cli.verbose)
        .unwrap_or_else(|e| exit_with(EXIT_ERROR, &e));

    tracing::debug!(config = %loader.config_path().display(), "configuration loaded");

    if let Err((code, message)) = dispatch(cli.command, &loader, &config) {
        eprintln!("Error: {message}");
        std::process::exit(code);
    }
}

/// Run the selected command.
fn dispatch(command: Commands, loader: &ConfigLoader, config: &Config) -> Result<(), Failure> {
    match command {
        Commands::Init { force } => InitCommand::new(force)
            .run(loader)
            .map_err(|e| (e.exit_code(), e.to_string())),
        Commands::Rlp { command } => match command {
            RlpCommands::Encode { json } => EncodeCommand::new(json).run(),
            RlpCommands::Decode { hex } => DecodeCommand::new(hex).run(),
        }
        .map_err(|e| (e.exit_code(), e.to_string())),
        Commands::Ethereum { command } => handle_ethereum(command, config),
        Commands::Identity { command } => match command {
            IdentityCommands::Address => IdentityAddressCommand.run(config),
            IdentityCommands::Sign { message, hex } => {
                IdentitySignCommand::new(message, hex).run(config)
            }
        }
        .map_err(|e| (e.exit_code(), e.to_string())),
        Commands::Address {
            command: AddressCommands::Normalize { raw },
        } => NormalizeCommand::new(raw)
            .run()
            .map_err(|e| (e.exit_code(), e.to_string())),
        Commands::Mnemonic { command } => match command {
            MnemonicCommands::Generate => GenerateCommand.run(config),
            MnemonicCommands::Validate { words } => ValidateCommand::new(&words).run(),
        }
        .map_err(|e| (e.exit_code(), e.to_string())),
    }
}

/// Handle Ethereum subcommands.
///
/// # Exit Codes
///
/// - 1: the transaction was refused or the mnemonic is invalid
/// - 2: any other error
fn handle_ethereum(command: EthereumCommands, config: &Config) -> Result<(), Failure> {
    match command {
        EthereumCommands::Address => AddressCommand
            .run(config)
            .map_err(|e| (e.exit_code(), e.to_string())),
        EthereumCommands::Sign {
            transaction,
            format,
        } => SignCommand::new(transaction, format)
            .run(config)
            .map_err(|e| (e.exit_code(), e.to_string())),
    }
}

/// Print an error and exit.
fn exit_with(code: i32, error: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {error}");
    std::process::exit(code);
}
