use std::time::Duration;

use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_program::program_pack::Pack;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{
    config::Config,
    onchain::{
        constants::DISTRIBUTOR_PROGRAM_ID,
        derive::derive_claim_status,
        state::{AccountState, ClaimRecord, MerkleDistributor},
    },
    streamflow::{api::get_claimant, schemas::ClaimantProof},
};

/// Chain-side reads the resolvers depend on. Seam for tests.
#[allow(async_fn_in_trait)]
pub trait DistributorGateway {
    async fn get_distributor(&self, id: &Pubkey) -> eyre::Result<Option<MerkleDistributor>>;

    async fn get_claim_record(
        &self,
        distributor: &Pubkey,
        claimant: &Pubkey,
    ) -> eyre::Result<Option<ClaimRecord>>;

    async fn get_token_decimals(&self, mint: &Pubkey) -> eyre::Result<u8>;

    async fn search_distributors(&self) -> eyre::Result<Vec<(Pubkey, MerkleDistributor)>>;
}

/// Off-chain eligibility lookups. Seam for tests.
#[allow(async_fn_in_trait)]
pub trait ProofSource {
    async fn get_claimant_proof(
        &self,
        distributor: &Pubkey,
        wallet: &Pubkey,
    ) -> eyre::Result<Option<ClaimantProof>>;
}

pub struct RpcGateway {
    pub provider: RpcClient,
}

impl RpcGateway {
    pub fn new(rpc_url: &str) -> Self {
        let provider = RpcClient::new_with_timeout_and_commitment(
            rpc_url.to_string(),
            Duration::from_secs(60),
            CommitmentConfig::processed(),
        );

        Self { provider }
    }

    async fn get_account_data(&self, address: &Pubkey) -> eyre::Result<Option<Vec<u8>>> {
        let response = self
            .provider
            .get_account_with_commitment(address, CommitmentConfig::processed())
            .await?;

        Ok(response.value.map(|account| account.data))
    }
}

impl DistributorGateway for RpcGateway {
    async fn get_distributor(&self, id: &Pubkey) -> eyre::Result<Option<MerkleDistributor>> {
        match self.get_account_data(id).await? {
            Some(data) => Ok(Some(MerkleDistributor::decode(&data)?)),
            None => Ok(None),
        }
    }

    async fn get_claim_record(
        &self,
        distributor: &Pubkey,
        claimant: &Pubkey,
    ) -> eyre::Result<Option<ClaimRecord>> {
        let (claim_status_pubkey, _) = derive_claim_status(claimant, distributor);

        match self.get_account_data(&claim_status_pubkey).await? {
            Some(data) => Ok(Some(ClaimRecord::decode(&data)?)),
            None => Ok(None),
        }
    }

    async fn get_token_decimals(&self, mint: &Pubkey) -> eyre::Result<u8> {
        let data = self
            .get_account_data(mint)
            .await?
            .ok_or_else(|| eyre::eyre!("Token mint `{}` not found", mint))?;

        let mint_state = spl_token::state::Mint::unpack(&data)
            .map_err(|e| eyre::eyre!("Invalid token mint data for `{}`: {e}", mint))?;

        Ok(mint_state.decimals)
    }

    async fn search_distributors(&self) -> eyre::Result<Vec<(Pubkey, MerkleDistributor)>> {
        let filters = vec![RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
            0,
            MerkleDistributor::discriminator().to_vec(),
        ))];

        let config = RpcProgramAccountsConfig {
            filters: Some(filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .provider
            .get_program_accounts_with_config(&DISTRIBUTOR_PROGRAM_ID, config)
            .await?;

        let distributors = accounts
            .into_iter()
            .filter_map(|(pubkey, account)| match MerkleDistributor::decode(&account.data) {
                Ok(distributor) => Some((pubkey, distributor)),
                Err(e) => {
                    tracing::warn!("Skipping undecodable distributor `{}`: {}", pubkey, e);
                    None
                }
            })
            .collect();

        Ok(distributors)
    }
}

pub struct ClaimantApi {
    api_base: String,
    chain: String,
    cluster: String,
}

impl ClaimantApi {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base: config.streamflow_api_base.clone(),
            chain: config.streamflow_chain.clone(),
            cluster: config.streamflow_cluster.clone(),
        }
    }
}

impl ProofSource for ClaimantApi {
    async fn get_claimant_proof(
        &self,
        distributor: &Pubkey,
        wallet: &Pubkey,
    ) -> eyre::Result<Option<ClaimantProof>> {
        get_claimant(
            &self.api_base,
            &distributor.to_string(),
            &wallet.to_string(),
            &self.chain,
            &self.cluster,
        )
        .await
    }
}
