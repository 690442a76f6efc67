use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymMerkleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Index out of range: {index} not in [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SymMerkleError>;
