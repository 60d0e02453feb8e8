use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{signature::Signature, transaction::Transaction};
use solana_transaction_status::TransactionConfirmationStatus;
use tokio::time;

const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(90);
const POLL_INTERVAL: Duration = Duration::from_secs(3);

pub async fn send_and_confirm_tx(
    provider: &RpcClient,
    tx: Transaction,
) -> eyre::Result<Signature> {
    let signature = provider.send_transaction(&tx).await?;

    tracing::info!("Transaction sent: `{}`", signature);

    match time::timeout(CONFIRMATION_TIMEOUT, confirm_signature(provider, &signature)).await {
        Ok(result) => result.map(|_| signature),
        Err(_) => eyre::bail!("Timeout exceeded while confirming `{}`", signature),
    }
}

async fn confirm_signature(provider: &RpcClient, signature: &Signature) -> eyre::Result<()> {
    loop {
        let statuses = provider.get_signature_statuses(&[*signature]).await?;

        if let Some(Some(status)) = statuses.value.first() {
            if let Some(err) = &status.err {
                eyre::bail!("Transaction `{}` failed: {}", signature, err);
            }

            if matches!(
                status.confirmation_status,
                Some(TransactionConfirmationStatus::Confirmed)
                    | Some(TransactionConfirmationStatus::Finalized)
            ) {
                return Ok(());
            }
        }

        time::sleep(POLL_INTERVAL).await;
    }
}
