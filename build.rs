use std::{fs, io::Write, path::Path};

fn main() {
    let data_path = Path::new("./data");
    let config_path = data_path.join("config.toml");

    if !data_path.exists() {
        fs::create_dir_all(data_path).unwrap();
    }

    if !config_path.exists() {
        let mut config_file = fs::File::create(&config_path).unwrap();
        let config_content = r#"SOLANA_RPC_URL = "https://api.devnet.solana.com"              # rpc url
STREAMFLOW_API_BASE = "https://api-public.streamflow.finance" # off-chain claimant api
STREAMFLOW_CHAIN = "solana"                                   # chain name for the claimant api
STREAMFLOW_CLUSTER = "devnet"                                 # devnet | mainnet
PRICE_API_BASE = "https://lite-api.jup.ag/price/v3"           # jupiter price api
WALLET_PRIVATE_KEY = ""                                       # base58 keypair, empty = read-only mode
"#;
        config_file.write_all(config_content.as_bytes()).unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
}
