use alloy::rpc::types::Log;
use chain::event::{self, DecodedEvent};

use crate::error::IndexerError;

/// Decodes one log. Unknown and malformed logs are logged and dropped, so one bad
/// log never holds back the ones around it.
pub fn decode_or_skip(log: &Log) -> Option<DecodedEvent> {
    match event::decode(log) {
        Ok(Some(decoded)) => Some(decoded),
        Ok(None) => {
            tracing::debug!(
                "Skip: unknown event topic {:?} in tx {:?}",
                log.topic0(),
                log.transaction_hash
            );
            None
        }
        Err(e) => {
            let e = IndexerError::from(e);
            tracing::warn!(
                "Skip: {e} (block {:?}, tx {:?}, log index {:?})",
                log.block_number,
                log.transaction_hash,
                log.log_index
            );
            None
        }
    }
}

pub fn decode_logs(logs: &[Log]) -> Vec<DecodedEvent> {
    logs.iter().filter_map(decode_or_skip).collect()
}
