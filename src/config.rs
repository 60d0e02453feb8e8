use serde::Deserialize;
use solana_sdk::signature::Keypair;

const CONFIG_PATH: &str = "data/config.toml";

#[derive(Deserialize, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub solana_rpc_url: String,
    pub streamflow_api_base: String,
    pub streamflow_chain: String,
    pub streamflow_cluster: String,
    pub price_api_base: String,
    pub wallet_private_key: String,
}

impl Config {
    pub async fn read_default() -> Self {
        let cfg_str = tokio::fs::read_to_string(CONFIG_PATH)
            .await
            .expect("Default config to be present");
        toml::from_str(&cfg_str).expect("Default config to be valid")
    }

    /// Wallet keypair from the config. An empty or malformed key degrades
    /// to read-only mode, it never errors.
    pub fn wallet_keypair(&self) -> Option<Keypair> {
        let key = self.wallet_private_key.trim();

        if key.is_empty() {
            return None;
        }

        let bytes = match solana_sdk::bs58::decode(key).into_vec() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Invalid WALLET_PRIVATE_KEY, running read-only: {}", e);
                return None;
            }
        };

        match Keypair::from_bytes(&bytes) {
            Ok(keypair) => Some(keypair),
            Err(e) => {
                tracing::warn!("Invalid WALLET_PRIVATE_KEY, running read-only: {}", e);
                None
            }
        }
    }
}
