use std::collections::HashMap;

use serde::Deserialize;

pub type TokenPriceMap = HashMap<String, f64>;

#[derive(Deserialize)]
pub struct PriceResponse {
    pub data: HashMap<String, serde_json::Value>,
    #[serde(rename = "timeTaken", default)]
    pub time_taken: f64,
}

impl PriceResponse {
    /// Picks the numeric price for each requested mint. Missing or
    /// non-numeric entries are omitted from the result.
    pub fn extract_prices(&self, mints: &[String]) -> TokenPriceMap {
        mints
            .iter()
            .filter_map(|mint| {
                let price = self.data.get(mint)?.get("price")?.as_f64()?;
                Some((mint.clone(), price))
            })
            .collect()
    }
}
