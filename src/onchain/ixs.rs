use borsh::BorshSerialize;
use solana_program::hash::hash;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use super::constants::{ASSOCIATED_TOKEN_PROGRAM_ID, INSTRUCTION_NAMESPACE, SYSTEM_PROGRAM_ID};
use super::typedefs::{
    ClaimAccounts, ClaimLockedInput, CloseClaimInput, CreateAtaArgs, NewClaimInput,
};

trait InstructionData: BorshSerialize {
    const INSTRUCTION_NAME: &'static str;

    fn get_function_hash() -> [u8; 8] {
        let preimage: String = format!("{}:{}", INSTRUCTION_NAMESPACE, Self::INSTRUCTION_NAME);
        let sighash: [u8; 32] = hash(preimage.as_bytes()).to_bytes();
        let mut output: [u8; 8] = [0u8; 8];
        output.copy_from_slice(&sighash[..8]);
        output
    }

    fn get_data(&self) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        buf.extend_from_slice(&Self::get_function_hash());
        self.serialize(&mut buf).expect("Failed to serialize data");
        buf
    }
}

impl InstructionData for NewClaimInput {
    const INSTRUCTION_NAME: &'static str = "new_claim";
}

impl InstructionData for ClaimLockedInput {
    const INSTRUCTION_NAME: &'static str = "claim_locked";
}

impl InstructionData for CloseClaimInput {
    const INSTRUCTION_NAME: &'static str = "close_claim";
}

pub struct Instructions {}

impl Instructions {
    fn create_instruction<T: InstructionData + BorshSerialize>(
        program_id: Pubkey,
        accounts: Vec<AccountMeta>,
        data: T,
    ) -> Instruction {
        Instruction {
            program_id,
            accounts,
            data: data.get_data(),
        }
    }

    fn claim_accounts(accounts: &ClaimAccounts) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(accounts.distributor, false),
            AccountMeta::new(accounts.claim_status, false),
            AccountMeta::new(accounts.from, false),
            AccountMeta::new(accounts.to, false),
            AccountMeta::new(accounts.claimant, true),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(accounts.system_program, false),
        ]
    }

    /// First claim against a campaign: proves membership and creates the
    /// claim status account.
    pub fn new_claim(
        accounts: ClaimAccounts,
        amount_unlocked: u64,
        amount_locked: u64,
        proof: Vec<[u8; 32]>,
    ) -> Instruction {
        let data = NewClaimInput::new(amount_unlocked, amount_locked, proof);
        let metas = Self::claim_accounts(&accounts);

        Self::create_instruction(accounts.program_id, metas, data)
    }

    /// Follow-up claim of newly unlocked tranches; the claim status account
    /// already holds the verified amounts, so no proof travels.
    pub fn claim_locked(accounts: ClaimAccounts) -> Instruction {
        let metas = Self::claim_accounts(&accounts);

        Self::create_instruction(accounts.program_id, metas, ClaimLockedInput {})
    }

    pub fn close_claim(
        program_id: Pubkey,
        distributor: &Pubkey,
        claim_status: &Pubkey,
        claimant: &Pubkey,
    ) -> Instruction {
        let accounts = vec![
            AccountMeta::new(*distributor, false),
            AccountMeta::new(*claim_status, false),
            AccountMeta::new(*claimant, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ];

        Self::create_instruction(program_id, accounts, CloseClaimInput {})
    }

    pub fn create_ata(args: CreateAtaArgs) -> Instruction {
        Instruction {
            program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(args.funding_address, true),
                AccountMeta::new(args.associated_account_address, false),
                AccountMeta::new_readonly(args.wallet_address, false),
                AccountMeta::new_readonly(args.token_mint_address, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(args.token_program_id, false),
            ],
            data: vec![args.instruction],
        }
    }
}
