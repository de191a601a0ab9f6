use serde::{Deserialize, Serialize};

/// `/api/v1/ws` serves projected blocks as `mempool-blocks`, the legacy `/ws`
/// endpoint as `projected-blocks`.
pub const SUBSCRIPTION_TOPICS: [&str; 4] = ["stats", "blocks", "projected-blocks", "mempool-blocks"];

/// Outgoing websocket request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MempoolMessage {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(rename = "txId", skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
}

impl MempoolMessage {
    pub fn init() -> Self {
        Self {
            action: "init".to_owned(),
            data: None,
            tx_id: None,
        }
    }

    pub fn want<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action: "want".to_owned(),
            data: Some(topics.into_iter().map(Into::into).collect()),
            tx_id: None,
        }
    }

    pub fn track_tx(tx_id: impl Into<String>) -> Self {
        Self {
            action: "track-tx".to_owned(),
            data: None,
            tx_id: Some(tx_id.into()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
