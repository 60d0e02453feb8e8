mod config;
mod modules;
mod onchain;
mod price;
mod resolver;
mod streamflow;
mod utils;

use modules::menu;
use utils::logger::init_logging;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_logging();

    menu().await
}
