mod browser;
mod claimer;

use dialoguer::{theme::ColorfulTheme, Select};

use crate::{config::Config, price::api::PriceClient};

use browser::browse_airdrops;
use claimer::claim_airdrop;

const LOGO: &str = r#"
       _          _                       _       _
   ___| |_ _ __ _| |_ __ _ _ __ ___   __| |_ __ ___  _ __
  / __| __| '__/ _ \/ _` | '_ ` _ \ / _` | '__/ _ \| '_ \
  \__ \ |_| | |  __/ (_| | | | | | | (_| | | | (_) | |_) |
  |___/\__|_|  \___|\__,_|_| |_| |_|\__,_|_|  \___/| .__/
                                                   |_|
                    c l a i m e r
"#;

pub async fn menu() -> eyre::Result<()> {
    let config = Config::read_default().await;

    // One client for the whole session so the price cache and in-flight
    // de-duplication actually get to work across flows.
    let price_client = PriceClient::new(&config.price_api_base);

    println!("{LOGO}");

    loop {
        let options = vec![
            "Browse recent airdrops",
            "Claim airdrop by ID",
            "Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choice:")
            .items(&options)
            .default(0)
            .interact()
            .unwrap();

        match selection {
            0 => browse_airdrops(&config, &price_client).await?,
            1 => claim_airdrop(&config, &price_client, None).await?,
            2 => {
                return Ok(());
            }
            _ => tracing::error!("Invalid selection"),
        }
    }
}
