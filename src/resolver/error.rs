use thiserror::Error;

/// Resolver-boundary error taxonomy. Network and decoding failures are
/// collapsed into `FetchFailed`; nothing below the resolver reaches callers
/// as a raw error.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid airdrop id `{0}`")]
    InvalidIdentifier(String),

    #[error("Airdrop `{0}` not found")]
    NotFound(String),

    #[error("Failed to fetch airdrop details: {0}")]
    FetchFailed(eyre::Report),
}
