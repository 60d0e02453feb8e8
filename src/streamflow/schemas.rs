use serde::Deserialize;

/// Raw body of the claimant endpoint. Amounts arrive as either JSON strings
/// or numbers depending on their magnitude.
#[derive(Deserialize, Debug)]
pub struct ClaimantResponse {
    #[serde(rename = "amountUnlocked")]
    pub amount_unlocked: RawAmount,
    #[serde(rename = "amountLocked")]
    pub amount_locked: RawAmount,
    pub proof: Vec<Vec<u8>>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RawAmount {
    Number(u64),
    Text(String),
}

impl RawAmount {
    pub fn value(&self) -> eyre::Result<u64> {
        match self {
            RawAmount::Number(n) => Ok(*n),
            RawAmount::Text(s) => s
                .parse::<u64>()
                .map_err(|e| eyre::eyre!("Invalid amount `{s}`: {e}")),
        }
    }
}

/// Validated claimant eligibility data: raw amounts plus the Merkle
/// inclusion proof, each node exactly 32 bytes.
#[derive(Debug, Clone)]
pub struct ClaimantProof {
    pub amount_unlocked: u64,
    pub amount_locked: u64,
    pub proof: Vec<[u8; 32]>,
}

impl TryFrom<ClaimantResponse> for ClaimantProof {
    type Error = eyre::Report;

    fn try_from(response: ClaimantResponse) -> eyre::Result<Self> {
        let proof = response
            .proof
            .into_iter()
            .map(|node| {
                <[u8; 32]>::try_from(node.as_slice())
                    .map_err(|_| eyre::eyre!("Proof node is {} bytes, expected 32", node.len()))
            })
            .collect::<eyre::Result<Vec<_>>>()?;

        Ok(Self {
            amount_unlocked: response.amount_unlocked.value()?,
            amount_locked: response.amount_locked.value()?,
            proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_parse_from_string_or_number() {
        let body = r#"{"amountUnlocked":"500","amountLocked":250,"proof":[]}"#;
        let response: ClaimantResponse = serde_json::from_str(body).unwrap();
        let proof = ClaimantProof::try_from(response).unwrap();

        assert_eq!(proof.amount_unlocked, 500);
        assert_eq!(proof.amount_locked, 250);
        assert!(proof.proof.is_empty());
    }

    #[test]
    fn short_proof_node_is_rejected() {
        let body = r#"{"amountUnlocked":"1","amountLocked":"0","proof":[[1,2,3]]}"#;
        let response: ClaimantResponse = serde_json::from_str(body).unwrap();

        assert!(ClaimantProof::try_from(response).is_err());
    }

    #[test]
    fn full_size_proof_nodes_convert() {
        let node: Vec<u8> = (0..32).collect();
        let body = format!(
            r#"{{"amountUnlocked":1,"amountLocked":0,"proof":[{}]}}"#,
            serde_json::to_string(&node).unwrap()
        );
        let response: ClaimantResponse = serde_json::from_str(&body).unwrap();
        let proof = ClaimantProof::try_from(response).unwrap();

        assert_eq!(proof.proof.len(), 1);
        assert_eq!(proof.proof[0][31], 31);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let body = r#"{"amountUnlocked":"lots","amountLocked":"0","proof":[]}"#;
        let response: ClaimantResponse = serde_json::from_str(body).unwrap();

        assert!(ClaimantProof::try_from(response).is_err());
    }
}
