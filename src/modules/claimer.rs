use std::{str::FromStr, time::Duration};

use dialoguer::{theme::ColorfulTheme, Input};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig, instruction::Instruction, pubkey::Pubkey,
    signature::Keypair, signer::Signer, transaction::Transaction,
};

use crate::{
    config::Config,
    onchain::{
        constants::{DISTRIBUTOR_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID},
        derive::{derive_ata, derive_claim_status},
        ixs::Instructions,
        tx::send_and_confirm_tx,
        typedefs::{ClaimAccounts, CreateAtaArgs},
    },
    price::api::{format_usd, usd_value_for_amount, FetchPricesOptions, PriceClient},
    resolver::{
        AirdropDetails, AirdropDetailsResolver, ClaimStatus, ClaimantApi, ResolveError, RpcGateway,
    },
    streamflow::typedefs::Cluster,
};

pub async fn claim_airdrop(
    config: &Config,
    price_client: &PriceClient,
    preset_id: Option<String>,
) -> eyre::Result<()> {
    let wallet = config.wallet_keypair();
    let wallet_pubkey = wallet.as_ref().map(|kp| kp.pubkey());

    let resolver = AirdropDetailsResolver::new(
        RpcGateway::new(&config.solana_rpc_url),
        ClaimantApi::new(config),
        wallet_pubkey,
    );

    let airdrop_id = match preset_id {
        Some(id) => id,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Airdrop ID:")
            .interact_text()
            .unwrap(),
    };

    let details = match resolver.resolve(&airdrop_id).await {
        Ok(details) => details,
        Err(e @ (ResolveError::InvalidIdentifier(_) | ResolveError::NotFound(_))) => {
            tracing::error!("{}. Please check the ID.", e);
            return Ok(());
        }
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(());
        }
    };

    print_details(price_client, &resolver, &details).await;

    let Some(wallet) = wallet else {
        tracing::warn!("No wallet configured, running in read-only mode");
        return Ok(());
    };

    if resolver.numeric_claimable() <= 0.0 {
        tracing::info!("Nothing to claim for `{}`", wallet.pubkey());
        return Ok(());
    }

    let Some(claim_status) = resolver.claim_status() else {
        return Ok(());
    };

    process_claim(config, &wallet, &details, &claim_status).await?;

    resolver.refresh().await;
    tracing::info!("Remaining claimable: {}", resolver.claimable_display());

    Ok(())
}

async fn print_details(
    price_client: &PriceClient,
    resolver: &AirdropDetailsResolver<RpcGateway, ClaimantApi>,
    details: &AirdropDetails,
) {
    let prices = price_client
        .fetch_prices(
            std::slice::from_ref(&details.token_mint),
            FetchPricesOptions::default(),
        )
        .await
        .unwrap_or_default();

    let claimable = resolver.claimable_display();
    let claimable_usd = format_usd(usd_value_for_amount(
        &claimable,
        &details.token_mint,
        &prices,
    ));

    tracing::info!("Airdrop `{}` [{}]", details.id, details.kind);
    tracing::info!("Token mint: `{}`", details.token_mint);
    tracing::info!(
        "Recipients: {}/{} claimed",
        details.recipients_claimed,
        details.recipients_total
    );
    tracing::info!(
        "Distributed: {} of {}",
        details.amount_claimed,
        details.amount_total
    );
    tracing::info!("Claimable: {} ({})", claimable, claimable_usd);
}

fn get_ixs(
    ata_exists: bool,
    details: &AirdropDetails,
    claim_status: &ClaimStatus,
    wallet_pubkey: &Pubkey,
) -> eyre::Result<Vec<Instruction>> {
    let distributor_pubkey = Pubkey::from_str(&details.id)?;
    let mint_pubkey = Pubkey::from_str(&details.token_mint)?;

    let (claim_status_pubkey, _) = derive_claim_status(wallet_pubkey, &distributor_pubkey);
    let (token_vault, _) = derive_ata(&distributor_pubkey, &mint_pubkey, &TOKEN_PROGRAM_ID);
    let (wallet_token_ata, _) = derive_ata(wallet_pubkey, &mint_pubkey, &TOKEN_PROGRAM_ID);

    let mut ixs = vec![];

    if !ata_exists {
        let create_ata_args = CreateAtaArgs {
            funding_address: *wallet_pubkey,
            associated_account_address: wallet_token_ata,
            wallet_address: *wallet_pubkey,
            token_mint_address: mint_pubkey,
            token_program_id: TOKEN_PROGRAM_ID,
            instruction: 0,
        };

        ixs.push(Instructions::create_ata(create_ata_args));
    }

    let accounts = ClaimAccounts {
        program_id: DISTRIBUTOR_PROGRAM_ID,
        distributor: distributor_pubkey,
        claim_status: claim_status_pubkey,
        from: token_vault,
        to: wallet_token_ata,
        claimant: *wallet_pubkey,
        mint: mint_pubkey,
        token_program: TOKEN_PROGRAM_ID,
        system_program: SYSTEM_PROGRAM_ID,
    };

    let claim_ix = match &claim_status.proof {
        Some(proof) => Instructions::new_claim(
            accounts,
            claim_status.amount_unlocked,
            claim_status.amount_locked,
            proof.clone(),
        ),
        None => Instructions::claim_locked(accounts),
    };

    ixs.push(claim_ix);

    Ok(ixs)
}

async fn process_claim(
    config: &Config,
    wallet: &Keypair,
    details: &AirdropDetails,
    claim_status: &ClaimStatus,
) -> eyre::Result<()> {
    let provider = RpcClient::new_with_timeout_and_commitment(
        config.solana_rpc_url.clone(),
        Duration::from_secs(60),
        CommitmentConfig::processed(),
    );

    let cluster = Cluster::from_config(&config.streamflow_cluster);
    let wallet_pubkey = wallet.pubkey();
    let mint_pubkey = Pubkey::from_str(&details.token_mint)?;

    let (wallet_token_ata, _) = derive_ata(&wallet_pubkey, &mint_pubkey, &TOKEN_PROGRAM_ID);
    let ata_exists = provider.get_account_data(&wallet_token_ata).await.is_ok();

    let instructions = get_ixs(ata_exists, details, claim_status, &wallet_pubkey)?;

    let (recent_blockhash, _) = provider
        .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
        .await?;

    let tx = Transaction::new_signed_with_payer(
        &instructions,
        Some(&wallet_pubkey),
        &[wallet],
        recent_blockhash,
    );

    let signature = send_and_confirm_tx(&provider, tx).await?;

    tracing::info!(
        "Claim successful: https://explorer.solana.com/tx/{}{}",
        signature,
        cluster.explorer_suffix()
    );

    if details.claims_closable_by_claimant {
        // Best effort, rent reclaim only. A failure here must not fail the
        // claim flow.
        if let Err(e) = close_claim(&provider, wallet, details).await {
            tracing::warn!("Could not close claim to reclaim rent: {}", e);
        } else {
            tracing::info!("Claim closed, rent reclaimed");
        }
    }

    Ok(())
}

async fn close_claim(
    provider: &RpcClient,
    wallet: &Keypair,
    details: &AirdropDetails,
) -> eyre::Result<()> {
    let distributor_pubkey = Pubkey::from_str(&details.id)?;
    let wallet_pubkey = wallet.pubkey();
    let (claim_status_pubkey, _) = derive_claim_status(&wallet_pubkey, &distributor_pubkey);

    let close_ix = Instructions::close_claim(
        DISTRIBUTOR_PROGRAM_ID,
        &distributor_pubkey,
        &claim_status_pubkey,
        &wallet_pubkey,
    );

    let (recent_blockhash, _) = provider
        .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
        .await?;

    let tx = Transaction::new_signed_with_payer(
        &[close_ix],
        Some(&wallet_pubkey),
        &[wallet],
        recent_blockhash,
    );

    send_and_confirm_tx(provider, tx).await?;

    Ok(())
}
