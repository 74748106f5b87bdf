use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("out of domain: {0}")]
    OutOfDomain(String),
    #[error("unsupported integrator: {0}")]
    Unsupported(String),
    #[error("dimension mismatch: {0}")]
    Mismatch(String),
    #[error("invalid input: {0}")]
    Invalid(String),
}

pub type SimResult<T> = Result<T, SimError>;
