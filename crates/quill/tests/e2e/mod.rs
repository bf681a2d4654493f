//! End-to-end tests that run the compiled `quill` binary.

pub mod cli_test;
pub mod sign_flow_test;
