use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use solana_sdk::pubkey::Pubkey;

use crate::onchain::state::MerkleDistributor;

use super::{details::AirdropKind, gateway::DistributorGateway};

const INITIAL_LOAD: usize = 10;
const LOAD_MORE_INCREMENT: usize = 10;

/// Lightweight list-row projection of a distributor account.
#[derive(Debug, Clone)]
pub struct SimplifiedAirdrop {
    pub id: String,
    pub token_mint: String,
    pub recipients_claimed: u64,
    pub recipients_total: u64,
    pub start_ts: i64,
    pub end_ts: i64,
    pub kind: AirdropKind,
}

#[derive(Default)]
struct ListState {
    all: Vec<SimplifiedAirdrop>,
    displayed_count: usize,
    loaded: bool,
}

/// Fetches the discoverable campaign set once and pages over it client-side;
/// `load_more` never re-fetches.
pub struct AirdropListResolver<G> {
    gateway: G,
    loading: AtomicBool,
    state: Mutex<ListState>,
}

impl<G: DistributorGateway> AirdropListResolver<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            loading: AtomicBool::new(false),
            state: Mutex::new(ListState::default()),
        }
    }

    /// One fetch per resolver instance. A failed scan logs and leaves the
    /// list empty; browsing is a convenience path and manual ID entry stays
    /// available.
    pub async fn load(&self) {
        if self.state.lock().unwrap().loaded {
            return;
        }

        self.loading.store(true, Ordering::SeqCst);

        match self.gateway.search_distributors().await {
            Ok(raw) => {
                let mapped = map_distributors(&raw);

                let mut state = self.state.lock().unwrap();
                state.all = mapped;
                state.displayed_count = INITIAL_LOAD;
                state.loaded = true;
            }
            Err(e) => {
                tracing::error!("Failed to load airdrop list: {}", e);
                self.state.lock().unwrap().loaded = true;
            }
        }

        self.loading.store(false, Ordering::SeqCst);
    }

    pub async fn reload(&self) {
        self.state.lock().unwrap().loaded = false;
        self.load().await;
    }

    /// The currently displayed page slice.
    pub fn airdrops(&self) -> Vec<SimplifiedAirdrop> {
        let state = self.state.lock().unwrap();
        let count = state.displayed_count.min(state.all.len());
        state.all[..count].to_vec()
    }

    pub fn displayed_count(&self) -> usize {
        self.state.lock().unwrap().displayed_count
    }

    pub fn total_count(&self) -> usize {
        self.state.lock().unwrap().all.len()
    }

    pub fn has_more(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.displayed_count < state.all.len()
    }

    pub fn load_more(&self) {
        let mut state = self.state.lock().unwrap();
        state.displayed_count = (state.displayed_count + LOAD_MORE_INCREMENT).min(state.all.len());
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

/// Drops records that decoded to a zeroed id or mint.
fn map_distributors(raw: &[(Pubkey, MerkleDistributor)]) -> Vec<SimplifiedAirdrop> {
    raw.iter()
        .filter_map(|(id, account)| {
            if *id == Pubkey::default() || account.mint == Pubkey::default() {
                return None;
            }

            Some(SimplifiedAirdrop {
                id: id.to_string(),
                token_mint: account.mint.to_string(),
                recipients_claimed: account.num_nodes_claimed,
                recipients_total: account.max_num_nodes,
                start_ts: account.start_ts,
                end_ts: account.end_ts,
                kind: AirdropKind::infer(account.start_ts, account.end_ts, account.unlock_period),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::onchain::state::ClaimRecord;

    use super::*;

    fn distributor(mint: Pubkey, start_ts: i64, end_ts: i64, unlock_period: u64) -> MerkleDistributor {
        MerkleDistributor {
            bump: 255,
            version: 1,
            root: [0u8; 32],
            mint,
            token_vault: Pubkey::new_unique(),
            max_total_claim: 1_000,
            max_num_nodes: 10,
            unlock_period,
            total_amount_claimed: 0,
            num_nodes_claimed: 0,
            start_ts,
            end_ts,
            clawback_start_ts: 0,
            clawback_receiver: Pubkey::new_unique(),
            admin: Pubkey::new_unique(),
            clawed_back: false,
            claims_closable_by_claimant: false,
        }
    }

    struct MockGateway {
        distributors: Vec<(Pubkey, MerkleDistributor)>,
        search_calls: Arc<AtomicUsize>,
    }

    impl MockGateway {
        fn new(distributors: Vec<(Pubkey, MerkleDistributor)>) -> Self {
            Self {
                distributors,
                search_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl DistributorGateway for MockGateway {
        async fn get_distributor(&self, _id: &Pubkey) -> eyre::Result<Option<MerkleDistributor>> {
            Ok(None)
        }

        async fn get_claim_record(
            &self,
            _distributor: &Pubkey,
            _claimant: &Pubkey,
        ) -> eyre::Result<Option<ClaimRecord>> {
            Ok(None)
        }

        async fn get_token_decimals(&self, _mint: &Pubkey) -> eyre::Result<u8> {
            Ok(0)
        }

        async fn search_distributors(&self) -> eyre::Result<Vec<(Pubkey, MerkleDistributor)>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.distributors.clone())
        }
    }

    fn well_formed(n: usize) -> Vec<(Pubkey, MerkleDistributor)> {
        (0..n)
            .map(|_| (Pubkey::new_unique(), distributor(Pubkey::new_unique(), 0, 0, 0)))
            .collect()
    }

    #[tokio::test]
    async fn pagination_advances_and_clamps() {
        let resolver = AirdropListResolver::new(MockGateway::new(well_formed(25)));
        resolver.load().await;

        assert_eq!(resolver.displayed_count(), 10);
        assert_eq!(resolver.airdrops().len(), 10);
        assert!(resolver.has_more());

        resolver.load_more();
        assert_eq!(resolver.displayed_count(), 20);
        assert!(resolver.has_more());

        resolver.load_more();
        assert_eq!(resolver.displayed_count(), 25);
        assert_eq!(resolver.airdrops().len(), 25);
        assert!(!resolver.has_more());
    }

    #[tokio::test]
    async fn load_is_once_per_instance() {
        let gateway = MockGateway::new(well_formed(3));
        let search_calls = gateway.search_calls.clone();

        let resolver = AirdropListResolver::new(gateway);
        resolver.load().await;
        resolver.load().await;

        assert_eq!(search_calls.load(Ordering::SeqCst), 1);

        resolver.reload().await;
        assert_eq!(search_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn malformed_records_are_dropped() {
        let mut raw = well_formed(2);
        raw.push((Pubkey::new_unique(), distributor(Pubkey::default(), 0, 0, 0)));

        let resolver = AirdropListResolver::new(MockGateway::new(raw));
        resolver.load().await;

        assert_eq!(resolver.total_count(), 2);
    }

    #[tokio::test]
    async fn rows_carry_the_kind_inference() {
        let raw = vec![
            (Pubkey::new_unique(), distributor(Pubkey::new_unique(), 1000, 5000, 100)),
            (Pubkey::new_unique(), distributor(Pubkey::new_unique(), 1000, 1000, 0)),
        ];

        let resolver = AirdropListResolver::new(MockGateway::new(raw));
        resolver.load().await;

        let rows = resolver.airdrops();
        assert_eq!(rows[0].kind, AirdropKind::Vested);
        assert_eq!(rows[1].kind, AirdropKind::Instant);
    }
}
