use serde::Deserialize;
use std::fmt::Debug;
use tokio_tungstenite::tungstenite;

use super::{
    ConfirmedBlock, MempoolInfo, MempoolStats, ProjectedBlock, TrackTx, TrackedTxStatus,
    UpdateEvent,
};
use crate::error_fmt::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum DecodeError {
    #[error("mempool update is not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("mempool update is not a valid update object")]
    Json(#[from] serde_json::Error),
}

impl Debug for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A websocket update as sent by the server. Every field is optional: a
/// message only carries what changed since the previous one.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MempoolRaw {
    pub mempool_info: Option<MempoolInfo>,
    pub tx_per_second: Option<f64>,
    pub v_bytes_per_second: Option<f64>,
    pub block: Option<ConfirmedBlock>,
    pub blocks: Option<Vec<ConfirmedBlock>>,
    pub projected_blocks: Option<Vec<ProjectedBlock>>,
    /// `/api/v1/ws` name for the projected blocks.
    #[serde(rename = "mempool-blocks")]
    pub mempool_blocks: Option<Vec<ProjectedBlock>>,
    #[serde(rename = "track-tx")]
    pub track_tx: Option<TrackTx>,
    pub tx_confirmed: Option<bool>,
}

impl MempoolRaw {
    pub fn from_text(data: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Splits the message into update events, in the order they must be
    /// merged. Absent fields produce no event.
    pub fn into_events(self) -> Vec<UpdateEvent> {
        let mut events = vec![];
        let tip_height = self.block.as_ref().map(|block| block.height);

        if let Some(blocks) = self.blocks {
            events.push(UpdateEvent::ConfirmedBlocks(blocks));
        }
        if let Some(block) = self.block {
            events.push(UpdateEvent::SingleBlock(block));
        }
        if let Some(projected) = self.projected_blocks.or(self.mempool_blocks) {
            events.push(UpdateEvent::ProjectedBlocks(projected));
        }
        if let Some(info) = self.mempool_info {
            events.push(UpdateEvent::Stats(MempoolStats {
                size: info.size,
                bytes: info.bytes,
                tx_per_second: self.tx_per_second,
                vbytes_per_second: self.v_bytes_per_second,
            }));
        }

        let confirmed = self.tx_confirmed.unwrap_or(false);
        match self.track_tx {
            Some(track) if !track.tracking && !confirmed => {
                events.push(UpdateEvent::TrackedTx(None));
            }
            Some(track) => events.push(UpdateEvent::TrackedTx(Some(TrackedTxStatus {
                tracking: true,
                block_height: if confirmed {
                    tip_height.or(track.block_height)
                } else {
                    track.block_height
                },
                confirmed,
            }))),
            None if confirmed => events.push(UpdateEvent::TrackedTx(Some(TrackedTxStatus {
                tracking: true,
                block_height: tip_height,
                confirmed: true,
            }))),
            None => {}
        }

        events
    }
}

impl TryFrom<tungstenite::Message> for MempoolRaw {
    type Error = DecodeError;

    fn try_from(raw_message: tungstenite::Message) -> Result<Self, Self::Error> {
        let data = String::from_utf8(raw_message.into_data())?;
        Self::from_text(&data)
    }
}
