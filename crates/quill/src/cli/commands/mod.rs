//! # Command Handlers
//!
//! One handler per subcommand. Each has a `run` method that prints to
//! stdout and an error type with an `exit_code` from [`exit_codes`].
//! Handlers that need keys read the mnemonic through
//! [`crate::cli::phrase`].

pub mod address;
pub mod ethereum;
pub mod exit_codes;
pub mod identity;
pub mod init;
pub mod mnemonic;
pub mod rlp;

pub use address::{NormalizeCommand, NormalizeError};
pub use ethereum::{AddressCommand, AddressError, SignCommand, SignCommandError, SignOutput};
pub use identity::{IdentityAddressCommand, IdentityError, IdentitySignCommand};
pub use init::{InitCommand, InitError};
pub use mnemonic::{GenerateCommand, MnemonicError, ValidateCommand};
pub use rlp::{DecodeCommand, EncodeCommand, RlpCommandError};
