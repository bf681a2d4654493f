//! Unit tests for the `quill` library: error types and exit codes.

pub mod error_handling_test;
