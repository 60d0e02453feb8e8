use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Mutex,
    },
};

use solana_sdk::pubkey::Pubkey;

use crate::{
    onchain::state::MerkleDistributor,
    streamflow::schemas::ClaimantProof,
    utils::format::{format_token_amount, parse_display_amount},
};

use super::{
    error::ResolveError,
    gateway::{DistributorGateway, ProofSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirdropKind {
    Vested,
    Instant,
}

impl AirdropKind {
    /// Pure function of the campaign schedule; never stored independently.
    pub fn infer(start_ts: i64, end_ts: i64, unlock_period: u64) -> Self {
        if end_ts > start_ts && unlock_period > 0 {
            AirdropKind::Vested
        } else {
            AirdropKind::Instant
        }
    }
}

impl std::fmt::Display for AirdropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            AirdropKind::Vested => "Vested",
            AirdropKind::Instant => "Instant",
        };
        write!(f, "{}", s)
    }
}

/// Normalized view of one distributor account, amounts decimal-scaled for
/// display.
#[derive(Debug, Clone)]
pub struct AirdropDetails {
    pub id: String,
    pub token_mint: String,
    pub token_decimals: u8,
    pub kind: AirdropKind,
    pub recipients_claimed: u64,
    pub recipients_total: u64,
    pub amount_claimed: String,
    pub amount_total: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub claims_closable_by_claimant: bool,
}

impl AirdropDetails {
    pub fn from_account(id: &str, account: &MerkleDistributor, decimals: u8) -> Self {
        Self {
            id: id.to_string(),
            token_mint: account.mint.to_string(),
            token_decimals: decimals,
            kind: AirdropKind::infer(account.start_ts, account.end_ts, account.unlock_period),
            recipients_claimed: account.num_nodes_claimed,
            recipients_total: account.max_num_nodes,
            amount_claimed: format_token_amount(account.total_amount_claimed as u128, decimals),
            amount_total: format_token_amount(account.max_total_claim as u128, decimals),
            start_ts: account.start_ts,
            end_ts: account.end_ts,
            claims_closable_by_claimant: account.claims_closable_by_claimant,
        }
    }
}

/// The wallet's entitlement for one campaign. `proof` is only present when
/// the entitlement came from the off-chain fallback; `claimable_amount` is
/// the authoritative total either way.
#[derive(Debug, Clone)]
pub struct ClaimStatus {
    pub proof: Option<Vec<[u8; 32]>>,
    pub amount_unlocked: u64,
    pub amount_locked: u64,
    pub claimable_amount: u128,
}

struct ResolverState {
    details: Option<AirdropDetails>,
    claim_status: Option<ClaimStatus>,
    claimable_display: String,
    last_fetched: Option<(String, Option<Pubkey>)>,
    proof_cache: HashMap<String, Option<ClaimantProof>>,
}

impl Default for ResolverState {
    fn default() -> Self {
        Self {
            details: None,
            claim_status: None,
            claimable_display: "0".to_string(),
            last_fetched: None,
            proof_cache: HashMap::new(),
        }
    }
}

/// Resolves one campaign's details and the wallet's claim entitlement.
///
/// On-chain first: an existing claim record with a positive claimable amount
/// is authoritative. Before any claim exists (or when the record has nothing
/// left) eligibility is only knowable through the off-chain claimant lookup,
/// which is cached per `(campaign, wallet)` for the resolver's lifetime,
/// negative answers included.
///
/// Overlapping `resolve` calls are fenced by a generation counter: a call
/// commits its result only while it is still the newest one, so a stale
/// in-flight response cannot overwrite fresher state.
pub struct AirdropDetailsResolver<G, P> {
    gateway: G,
    proofs: P,
    wallet: Option<Pubkey>,
    generation: AtomicU64,
    loading: AtomicBool,
    state: Mutex<ResolverState>,
}

impl<G: DistributorGateway, P: ProofSource> AirdropDetailsResolver<G, P> {
    pub fn new(gateway: G, proofs: P, wallet: Option<Pubkey>) -> Self {
        Self {
            gateway,
            proofs,
            wallet,
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
            state: Mutex::new(ResolverState::default()),
        }
    }

    pub fn details(&self) -> Option<AirdropDetails> {
        self.state.lock().unwrap().details.clone()
    }

    pub fn claim_status(&self) -> Option<ClaimStatus> {
        self.state.lock().unwrap().claim_status.clone()
    }

    pub fn claimable_display(&self) -> String {
        self.state.lock().unwrap().claimable_display.clone()
    }

    /// Plain numeric value of the display string, for enablement checks
    /// only. Claim transactions always use the raw integer amounts.
    pub fn numeric_claimable(&self) -> f64 {
        parse_display_amount(&self.claimable_display())
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn resolve(&self, id: &str) -> Result<AirdropDetails, ResolveError> {
        let distributor_id = Pubkey::from_str(id)
            .map_err(|_| ResolveError::InvalidIdentifier(id.to_string()))?;

        // Re-selecting the same campaign with an unchanged wallet and fully
        // populated state needs no network at all.
        {
            let state = self.state.lock().unwrap();
            if let (Some((last_id, last_wallet)), Some(details), Some(_)) =
                (&state.last_fetched, &state.details, &state.claim_status)
            {
                if last_id == id && *last_wallet == self.wallet {
                    return Ok(details.clone());
                }
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);

        let result = self.resolve_inner(id, &distributor_id).await;

        let outcome = match result {
            Ok((details, claim_status)) => {
                if self.is_latest(generation) {
                    let mut state = self.state.lock().unwrap();
                    state.details = Some(details.clone());
                    state.claimable_display =
                        claimable_display(&claim_status, details.token_decimals);
                    state.claim_status = claim_status;
                    state.last_fetched = Some((id.to_string(), self.wallet));
                }
                Ok(details)
            }
            Err(err) => {
                if self.is_latest(generation) {
                    let mut state = self.state.lock().unwrap();
                    state.details = None;
                    state.claim_status = None;
                    state.claimable_display = "0".to_string();
                }
                Err(err)
            }
        };

        // A fenced-out call must not clear the flag under a newer in-flight
        // call either.
        if self.is_latest(generation) {
            self.loading.store(false, Ordering::SeqCst);
        }

        outcome
    }

    /// Re-resolves only the claim entitlement for the currently loaded
    /// campaign, e.g. after a claim lands.
    pub async fn refresh(&self) {
        let details = self.state.lock().unwrap().details.clone();

        let Some(details) = details else {
            return;
        };

        let (claim_status, display) = match self.resolve_claim_status(&details).await {
            Ok(claim_status) => {
                let display = claimable_display(&claim_status, details.token_decimals);
                (claim_status, display)
            }
            Err(e) => {
                tracing::error!("Failed to refresh claim status: {}", e);
                (None, "0".to_string())
            }
        };

        let mut state = self.state.lock().unwrap();
        state.claim_status = claim_status;
        state.claimable_display = display;
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn resolve_inner(
        &self,
        id: &str,
        distributor_id: &Pubkey,
    ) -> Result<(AirdropDetails, Option<ClaimStatus>), ResolveError> {
        let distributor = self
            .gateway
            .get_distributor(distributor_id)
            .await
            .map_err(ResolveError::FetchFailed)?
            .ok_or_else(|| ResolveError::NotFound(id.to_string()))?;

        let decimals = self
            .gateway
            .get_token_decimals(&distributor.mint)
            .await
            .map_err(ResolveError::FetchFailed)?;

        let details = AirdropDetails::from_account(id, &distributor, decimals);

        let claim_status = self
            .resolve_claim_status(&details)
            .await
            .map_err(ResolveError::FetchFailed)?;

        Ok((details, claim_status))
    }

    async fn resolve_claim_status(
        &self,
        details: &AirdropDetails,
    ) -> eyre::Result<Option<ClaimStatus>> {
        // Not connected is a valid read-only state, not a failure.
        let Some(wallet) = self.wallet else {
            return Ok(None);
        };

        let distributor = Pubkey::from_str(&details.id)?;

        if let Some(record) = self.gateway.get_claim_record(&distributor, &wallet).await? {
            let claimable = record.claimable_amount();

            if claimable > 0 {
                return Ok(Some(ClaimStatus {
                    proof: None,
                    amount_unlocked: record
                        .unlocked_amount
                        .saturating_sub(record.unlocked_amount_claimed),
                    amount_locked: record
                        .locked_amount
                        .saturating_sub(record.locked_amount_withdrawn),
                    claimable_amount: claimable,
                }));
            }

            // A record with nothing claimable may be a pre-claim placeholder;
            // the off-chain source decides.
            tracing::debug!(
                "Claim record for `{}` exposes no claimable amount, checking off-chain",
                wallet
            );
        }

        let proof = self.lookup_proof(&distributor, &wallet).await?;

        Ok(proof.map(|p| ClaimStatus {
            claimable_amount: p.amount_unlocked as u128 + p.amount_locked as u128,
            proof: Some(p.proof),
            amount_unlocked: p.amount_unlocked,
            amount_locked: p.amount_locked,
        }))
    }

    async fn lookup_proof(
        &self,
        distributor: &Pubkey,
        wallet: &Pubkey,
    ) -> eyre::Result<Option<ClaimantProof>> {
        let cache_key = format!("{distributor}:{wallet}");

        {
            let state = self.state.lock().unwrap();
            if let Some(cached) = state.proof_cache.get(&cache_key) {
                return Ok(cached.clone());
            }
        }

        let fetched = self.proofs.get_claimant_proof(distributor, wallet).await?;

        let mut state = self.state.lock().unwrap();
        state
            .proof_cache
            .insert(cache_key, fetched.clone());

        Ok(fetched)
    }
}

fn claimable_display(claim_status: &Option<ClaimStatus>, decimals: u8) -> String {
    match claim_status {
        Some(status) => format_token_amount(status.claimable_amount, decimals),
        None => "0".to_string(),
    }
}
