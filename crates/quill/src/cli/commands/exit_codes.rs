//! Exit code constants shared by all commands.

/// Successful operation.
pub const EXIT_SUCCESS: i32 = 0;

/// The request was refused.
///
/// The transaction could not be signed (wrong shape, already signed, bad
/// chain id) or the mnemonic was rejected.
pub const EXIT_REFUSED: i32 = 1;

/// General error (configuration, I/O, malformed arguments, etc.).
pub const EXIT_ERROR: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(EXIT_SUCCESS, 0);
        assert_ne!(EXIT_SUCCESS, EXIT_REFUSED);
        assert_ne!(EXIT_SUCCESS, EXIT_ERROR);
        assert_ne!(EXIT_REFUSED, EXIT_ERROR);
    }
}
