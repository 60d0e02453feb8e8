use solana_program::pubkey;
use solana_sdk::pubkey::Pubkey;

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

pub const DISTRIBUTOR_PROGRAM_ID: Pubkey = pubkey!("MErKy6nZVoVAkryxAejJz2juifQ4ArgLgHmaJCQkU7N");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

pub const INSTRUCTION_NAMESPACE: &str = "global";

pub const ACCOUNT_NAMESPACE: &str = "account";

pub const ANCHOR_DISCRIMINATOR_LEN: usize = 8;
