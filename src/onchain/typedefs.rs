use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

#[derive(Debug)]
pub struct ClaimAccounts {
    pub program_id: Pubkey,
    pub distributor: Pubkey,
    pub claim_status: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub claimant: Pubkey,
    pub mint: Pubkey,
    pub token_program: Pubkey,
    pub system_program: Pubkey,
}

#[derive(Debug, BorshSerialize, BorshDeserialize)]
pub struct NewClaimInput {
    amount_unlocked: u64,
    amount_locked: u64,
    proof: Vec<[u8; 32]>,
}

impl NewClaimInput {
    pub fn new(amount_unlocked: u64, amount_locked: u64, proof: Vec<[u8; 32]>) -> Self {
        Self {
            amount_unlocked,
            amount_locked,
            proof,
        }
    }
}

#[derive(Debug, BorshSerialize, BorshDeserialize)]
pub struct ClaimLockedInput {}

#[derive(Debug, BorshSerialize, BorshDeserialize)]
pub struct CloseClaimInput {}

pub struct CreateAtaArgs {
    pub funding_address: Pubkey,
    pub associated_account_address: Pubkey,
    pub wallet_address: Pubkey,
    pub token_mint_address: Pubkey,
    pub token_program_id: Pubkey,
    pub instruction: u8,
}
