/// Errors that can occur while calling a method in the verifier API.
///
/// Pre-condition violations (malformed dimensions, out-of-range indices) are
/// programmer errors and panic rather than appearing here; this enum is reserved for
/// cryptographic rejection of an otherwise well-formed proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierError {
    InvalidProof,
}

impl std::fmt::Display for VerifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifierError::InvalidProof => write!(f, "KZG multi-proof failed verification"),
        }
    }
}

impl std::error::Error for VerifierError {}
