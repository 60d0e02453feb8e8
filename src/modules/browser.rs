use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    config::Config,
    price::api::PriceClient,
    resolver::{AirdropListResolver, RpcGateway},
};

use super::claimer::claim_airdrop;

pub async fn browse_airdrops(config: &Config, price_client: &PriceClient) -> eyre::Result<()> {
    let resolver = AirdropListResolver::new(RpcGateway::new(&config.solana_rpc_url));

    tracing::info!("Loading recent airdrops");
    resolver.load().await;

    loop {
        let rows = resolver.airdrops();

        if rows.is_empty() {
            tracing::warn!("No airdrops discovered, enter an ID manually instead");
            return Ok(());
        }

        let mut options: Vec<String> = rows
            .iter()
            .map(|a| {
                format!(
                    "{} | {} | {}/{} claimed",
                    a.id, a.kind, a.recipients_claimed, a.recipients_total
                )
            })
            .collect();

        let load_more_index = resolver.has_more().then(|| {
            options.push(format!(
                "Load more ({}/{} shown)",
                rows.len(),
                resolver.total_count()
            ));
            options.len() - 1
        });
        options.push("Back".to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Airdrop:")
            .items(&options)
            .default(0)
            .interact()
            .unwrap();

        if selection < rows.len() {
            claim_airdrop(config, price_client, Some(rows[selection].id.clone())).await?;
        } else if load_more_index == Some(selection) {
            resolver.load_more();
        } else {
            return Ok(());
        }
    }
}
