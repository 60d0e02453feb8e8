use borsh::BorshDeserialize;
use solana_program::hash::hash;
use solana_sdk::pubkey::Pubkey;

use super::constants::{ACCOUNT_NAMESPACE, ANCHOR_DISCRIMINATOR_LEN};

pub trait AccountState: BorshDeserialize {
    const ACCOUNT_NAME: &'static str;

    fn discriminator() -> [u8; 8] {
        let preimage = format!("{}:{}", ACCOUNT_NAMESPACE, Self::ACCOUNT_NAME);
        let digest = hash(preimage.as_bytes()).to_bytes();
        let mut output = [0u8; 8];
        output.copy_from_slice(&digest[..8]);
        output
    }

    /// Decodes the account payload past the anchor discriminator. Fails on
    /// short data or a discriminator mismatch rather than defaulting fields.
    fn decode(data: &[u8]) -> eyre::Result<Self> {
        if data.len() < ANCHOR_DISCRIMINATOR_LEN {
            eyre::bail!(
                "{} account data too short: {} bytes",
                Self::ACCOUNT_NAME,
                data.len()
            );
        }

        if data[..ANCHOR_DISCRIMINATOR_LEN] != Self::discriminator() {
            eyre::bail!("Account discriminator mismatch for {}", Self::ACCOUNT_NAME);
        }

        Self::deserialize(&mut &data[ANCHOR_DISCRIMINATOR_LEN..])
            .map_err(|e| eyre::eyre!("Failed to decode {}: {e}", Self::ACCOUNT_NAME))
    }
}

/// One airdrop campaign account.
#[derive(BorshDeserialize, Debug, Clone)]
pub struct MerkleDistributor {
    pub bump: u8,
    pub version: u64,
    pub root: [u8; 32],
    pub mint: Pubkey,
    pub token_vault: Pubkey,
    pub max_total_claim: u64,
    pub max_num_nodes: u64,
    pub unlock_period: u64,
    pub total_amount_claimed: u64,
    pub num_nodes_claimed: u64,
    pub start_ts: i64,
    pub end_ts: i64,
    pub clawback_start_ts: i64,
    pub clawback_receiver: Pubkey,
    pub admin: Pubkey,
    pub clawed_back: bool,
    pub claims_closable_by_claimant: bool,
}

impl AccountState for MerkleDistributor {
    const ACCOUNT_NAME: &'static str = "MerkleDistributor";
}

/// Per-wallet claim tracking account, created by the first claim.
#[derive(BorshDeserialize, Debug, Clone)]
pub struct ClaimRecord {
    pub claimant: Pubkey,
    pub locked_amount: u64,
    pub locked_amount_withdrawn: u64,
    pub unlocked_amount: u64,
    pub unlocked_amount_claimed: u64,
    pub last_claim_ts: i64,
    pub last_amount_per_unlock: u64,
    pub closable: bool,
}

impl AccountState for ClaimRecord {
    const ACCOUNT_NAME: &'static str = "ClaimStatus";
}

impl ClaimRecord {
    /// Remaining entitlement across the locked and unlocked tranches.
    pub fn claimable_amount(&self) -> u128 {
        let unlocked = self.unlocked_amount.saturating_sub(self.unlocked_amount_claimed);
        let locked = self.locked_amount.saturating_sub(self.locked_amount_withdrawn);
        unlocked as u128 + locked as u128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(unlocked: u64, unlocked_claimed: u64, locked: u64, withdrawn: u64) -> ClaimRecord {
        ClaimRecord {
            claimant: Pubkey::new_unique(),
            locked_amount: locked,
            locked_amount_withdrawn: withdrawn,
            unlocked_amount: unlocked,
            unlocked_amount_claimed: unlocked_claimed,
            last_claim_ts: 0,
            last_amount_per_unlock: 0,
            closable: false,
        }
    }

    #[test]
    fn claimable_sums_remaining_tranches() {
        assert_eq!(record(500, 0, 250, 0).claimable_amount(), 750);
        assert_eq!(record(500, 500, 250, 100).claimable_amount(), 150);
    }

    #[test]
    fn claimable_sum_exceeds_u64() {
        let r = record(u64::MAX, 0, u64::MAX, 0);
        assert_eq!(r.claimable_amount(), 2 * (u64::MAX as u128));
    }

    #[test]
    fn fully_claimed_record_is_zero() {
        assert_eq!(record(500, 500, 0, 0).claimable_amount(), 0);
    }

    #[test]
    fn decode_rejects_short_data() {
        assert!(ClaimRecord::decode(&[0u8; 4]).is_err());
    }

    #[test]
    fn decode_rejects_wrong_discriminator() {
        let data = vec![0u8; 256];
        assert!(MerkleDistributor::decode(&data).is_err());
    }
}
