pub mod details;
pub mod error;
pub mod gateway;
pub mod list;

pub use details::{AirdropDetails, AirdropDetailsResolver, AirdropKind, ClaimStatus};
pub use error::ResolveError;
pub use gateway::{ClaimantApi, DistributorGateway, ProofSource, RpcGateway};
pub use list::{AirdropListResolver, SimplifiedAirdrop};
