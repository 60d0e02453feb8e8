use reqwest::Method;

use crate::utils::fetch::{send_request, RequestParams};

use super::schemas::{ClaimantProof, ClaimantResponse};

/// Off-chain eligibility lookup for a `(distributor, wallet)` pair. Any
/// non-success status means "no eligibility data", not a hard error.
pub async fn get_claimant(
    api_base: &str,
    distributor_id: &str,
    wallet_address: &str,
    chain: &str,
    cluster: &str,
) -> eyre::Result<Option<ClaimantProof>> {
    let url = format!("{api_base}/v2/api/airdrops/{distributor_id}/claimants/{wallet_address}");

    let query_args = [("chain", chain), ("cluster", cluster)]
        .into_iter()
        .collect();

    let request_params = RequestParams {
        url: &url,
        method: Method::GET,
        body: None::<serde_json::Value>,
        query_args: Some(query_args),
        headers: None,
    };

    let response = send_request(request_params).await?;

    if !response.status().is_success() {
        tracing::debug!(
            "Claimant lookup for `{}` returned {}",
            wallet_address,
            response.status()
        );
        return Ok(None);
    }

    let body = response.json::<ClaimantResponse>().await?;

    Ok(Some(ClaimantProof::try_from(body)?))
}
