//! Events delivered from the bridge worker to the UI thread.

use shared::protocol::RawMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIcon {
    pub source: String,
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

#[derive(Debug)]
pub enum UiEvent {
    Inbound(RawMessage),
    IconLoaded(DecodedIcon),
    IconFailed { source: String, reason: String },
    BridgeFailed(String),
}
