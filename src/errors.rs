use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EdsError {
    #[error("malformed signature: {0}")]
    MalformedSignature(&'static str),

    #[error("invalid length: expected {expected} got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    /// A modular inverse was requested for an operand sharing a factor with
    /// the modulus. Only reachable with corrupted domain parameters.
    #[error("arithmetic precondition violated: operand is not invertible")]
    ArithmeticPrecondition,

    #[error("nonce produced a degenerate signature component")]
    DegenerateNonce,

    #[error("nonce rejection loop gave up after {attempts} attempts")]
    NonceRetriesExhausted { attempts: u32 },
}
