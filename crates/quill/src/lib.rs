//! # quill
//!
//! Library side of the `quill` binary: argument definitions, command
//! handlers and logging setup. The binary in `main.rs` only parses
//! arguments, loads configuration and dispatches.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and handlers
//! - [`logging`] - `tracing` subscriber setup
//!
//! ```no_run
//! use clap::Parser;
//! use quill::cli::Cli;
//!
//! let cli = Cli::parse();
//! println!("Verbose level: {}", cli.verbose);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod logging;

pub use logging::{init_logging, verbosity_to_level, LogConfig, LogError, LogFormat, LogGuard, LogLevel};
