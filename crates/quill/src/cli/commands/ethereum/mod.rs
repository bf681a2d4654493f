//! # Ethereum Commands
//!
//! Commands that use the payment key.
//!
//! - [`AddressCommand`] - Display the payment address
//! - [`SignCommand`] - Sign an unsigned legacy or EIP-155 transaction
//!
//! ```no_run
//! use quill::cli::args::OutputFormat;
//! use quill::cli::commands::ethereum::SignCommand;
//! use quill_core::Config;
//!
//! let cmd = SignCommand::new("0xc6808080808080", OutputFormat::Json);
//! cmd.run(&Config::default()).expect("signing failed");
//! ```

pub mod address;
pub mod sign;

pub use address::{AddressCommand, AddressError};
pub use sign::{SignCommand, SignCommandError, SignOutput};
