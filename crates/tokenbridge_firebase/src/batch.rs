//! Batch size contract of the import endpoint.

use crate::error::ImportError;

/// Most tokens the provider accepts in one batch import call
pub const MAX_BATCH_SIZE: usize = 100;

/// Outcome of a successful batch check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCheck {
    /// Nothing to import; the call succeeds with no results and no I/O
    Empty,
    /// The batch can be sent; carries the token count
    Ready(usize),
}

/// Checks a token batch before any credential lookup or network call.
///
/// The size limit takes priority over the empty short-circuit.
pub fn validate_batch(tokens: &[String]) -> Result<BatchCheck, ImportError> {
    if tokens.len() > MAX_BATCH_SIZE {
        return Err(ImportError::batch_too_large(tokens.len()));
    }
    if tokens.is_empty() {
        return Ok(BatchCheck::Empty);
    }
    Ok(BatchCheck::Ready(tokens.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("token-{i}")).collect()
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(validate_batch(&[]).unwrap(), BatchCheck::Empty);
    }

    #[test]
    fn test_batch_bounds() {
        assert_eq!(validate_batch(&tokens(1)).unwrap(), BatchCheck::Ready(1));
        assert_eq!(
            validate_batch(&tokens(MAX_BATCH_SIZE)).unwrap(),
            BatchCheck::Ready(MAX_BATCH_SIZE)
        );
    }

    #[test]
    fn test_batch_too_large() {
        match validate_batch(&tokens(MAX_BATCH_SIZE + 1)) {
            Err(ImportError::BatchTooLarge { count, max }) => {
                assert_eq!(count, 101);
                assert_eq!(max, 100);
            }
            other => panic!("expected BatchTooLarge, got {other:?}"),
        }
    }
}
