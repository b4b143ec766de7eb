//! Typed BlockMed events decoded from raw logs.

use alloy::primitives::{Address, B256, BlockNumber, TxHash, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use serde_json::json;

use crate::abi;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("log has no block number (pending transaction)")]
    Pending,

    #[error("malformed {event} log: {source}")]
    Abi {
        event: &'static str,
        #[source]
        source: alloy::sol_types::Error,
    },

    #[error("{event}.{field} does not fit in a signed 64-bit integer")]
    Overflow { event: &'static str, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionCreated {
    pub id: i64,
    pub doctor: Address,
    pub patient_hash: String,
    pub expires_at: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionUpdated {
    pub id: i64,
    pub reason: String,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDispensed {
    pub id: i64,
    pub pharmacist: Address,
    pub dispensed_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCreated {
    pub id: i64,
    pub batch_number: String,
    pub medicine_name: String,
    pub manufacturer: Address,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecalled {
    pub id: i64,
    pub recalled_by: Address,
    pub reason: String,
    pub recalled_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFlagged {
    pub id: i64,
    pub flagged_by: Address,
    pub reason: String,
    pub flagged_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMedEvent {
    PrescriptionCreated(PrescriptionCreated),
    PrescriptionUpdated(PrescriptionUpdated),
    PrescriptionDispensed(PrescriptionDispensed),
    BatchCreated(BatchCreated),
    BatchRecalled(BatchRecalled),
    BatchFlagged(BatchFlagged),
}

impl BlockMedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BlockMedEvent::PrescriptionCreated(_) => "PrescriptionCreated",
            BlockMedEvent::PrescriptionUpdated(_) => "PrescriptionUpdated",
            BlockMedEvent::PrescriptionDispensed(_) => "PrescriptionDispensed",
            BlockMedEvent::BatchCreated(_) => "BatchCreated",
            BlockMedEvent::BatchRecalled(_) => "BatchRecalled",
            BlockMedEvent::BatchFlagged(_) => "BatchFlagged",
        }
    }
}

/// A recognized event together with the position of the log that carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub block_number: BlockNumber,
    pub transaction_hash: Option<TxHash>,
    pub log_index: Option<u64>,
    pub event: BlockMedEvent,
}

impl DecodedEvent {
    /// Audit metadata stored alongside the projected row.
    pub fn raw_meta(&self) -> String {
        json!({
            "event": self.event.name(),
            "blockNumber": self.block_number,
            "transactionHash": self.transaction_hash,
            "logIndex": self.log_index,
        })
        .to_string()
    }
}

/// Decodes a raw log into a BlockMed event.
///
/// Returns `Ok(None)` for logs whose topic0 is not one of the indexed events, and an error
/// when the topic is known but the payload cannot be decoded.
pub fn decode(log: &Log) -> Result<Option<DecodedEvent>, DecodeError> {
    let Some(topic0) = log.topic0().copied() else {
        return Ok(None);
    };

    let Some(event) = decode_known(topic0, log)? else {
        return Ok(None);
    };

    let block_number = log.block_number.ok_or(DecodeError::Pending)?;

    Ok(Some(DecodedEvent {
        block_number,
        transaction_hash: log.transaction_hash,
        log_index: log.log_index,
        event,
    }))
}

fn decode_known(topic0: B256, log: &Log) -> Result<Option<BlockMedEvent>, DecodeError> {
    let event = if topic0 == abi::PrescriptionCreated::SIGNATURE_HASH {
        BlockMedEvent::PrescriptionCreated(decode_as::<abi::PrescriptionCreated>(log)?.try_into()?)
    } else if topic0 == abi::PrescriptionUpdated::SIGNATURE_HASH {
        BlockMedEvent::PrescriptionUpdated(decode_as::<abi::PrescriptionUpdated>(log)?.try_into()?)
    } else if topic0 == abi::PrescriptionDispensed::SIGNATURE_HASH {
        BlockMedEvent::PrescriptionDispensed(
            decode_as::<abi::PrescriptionDispensed>(log)?.try_into()?,
        )
    } else if topic0 == abi::BatchCreated::SIGNATURE_HASH {
        BlockMedEvent::BatchCreated(decode_as::<abi::BatchCreated>(log)?.try_into()?)
    } else if topic0 == abi::BatchRecalled::SIGNATURE_HASH {
        BlockMedEvent::BatchRecalled(decode_as::<abi::BatchRecalled>(log)?.try_into()?)
    } else if topic0 == abi::BatchFlagged::SIGNATURE_HASH {
        BlockMedEvent::BatchFlagged(decode_as::<abi::BatchFlagged>(log)?.try_into()?)
    } else {
        return Ok(None);
    };
    Ok(Some(event))
}

fn decode_as<E: SolEvent>(log: &Log) -> Result<E, DecodeError> {
    E::decode_log_data(log.data()).map_err(|source| DecodeError::Abi { event: event_name::<E>(), source })
}

// "Name(type,...)" -> "Name"
fn event_name<E: SolEvent>() -> &'static str {
    E::SIGNATURE.split('(').next().unwrap_or(E::SIGNATURE)
}

fn to_i64(event: &'static str, field: &'static str, value: U256) -> Result<i64, DecodeError> {
    u64::try_from(value)
        .ok()
        .and_then(|value| i64::try_from(value).ok())
        .ok_or(DecodeError::Overflow { event, field })
}

impl TryFrom<abi::PrescriptionCreated> for PrescriptionCreated {
    type Error = DecodeError;

    fn try_from(e: abi::PrescriptionCreated) -> Result<Self, Self::Error> {
        const EVENT: &str = "PrescriptionCreated";
        Ok(Self {
            id: to_i64(EVENT, "id", e.id)?,
            doctor: e.doctor,
            patient_hash: e.patientHash,
            expires_at: to_i64(EVENT, "expiresAt", e.expiresAt)?,
            created_at: to_i64(EVENT, "timestamp", e.timestamp)?,
        })
    }
}

impl TryFrom<abi::PrescriptionUpdated> for PrescriptionUpdated {
    type Error = DecodeError;

    fn try_from(e: abi::PrescriptionUpdated) -> Result<Self, Self::Error> {
        const EVENT: &str = "PrescriptionUpdated";
        Ok(Self {
            id: to_i64(EVENT, "id", e.id)?,
            reason: e.reason,
            updated_at: to_i64(EVENT, "timestamp", e.timestamp)?,
        })
    }
}

impl TryFrom<abi::PrescriptionDispensed> for PrescriptionDispensed {
    type Error = DecodeError;

    fn try_from(e: abi::PrescriptionDispensed) -> Result<Self, Self::Error> {
        const EVENT: &str = "PrescriptionDispensed";
        Ok(Self {
            id: to_i64(EVENT, "id", e.id)?,
            pharmacist: e.pharmacist,
            dispensed_at: to_i64(EVENT, "timestamp", e.timestamp)?,
        })
    }
}

impl TryFrom<abi::BatchCreated> for BatchCreated {
    type Error = DecodeError;

    fn try_from(e: abi::BatchCreated) -> Result<Self, Self::Error> {
        const EVENT: &str = "BatchCreated";
        Ok(Self {
            id: to_i64(EVENT, "id", e.id)?,
            batch_number: e.batchNumber,
            medicine_name: e.medicineName,
            manufacturer: e.manufacturer,
            created_at: to_i64(EVENT, "timestamp", e.timestamp)?,
        })
    }
}

impl TryFrom<abi::BatchRecalled> for BatchRecalled {
    type Error = DecodeError;

    fn try_from(e: abi::BatchRecalled) -> Result<Self, Self::Error> {
        const EVENT: &str = "BatchRecalled";
        Ok(Self {
            id: to_i64(EVENT, "id", e.id)?,
            recalled_by: e.recalledBy,
            reason: e.reason,
            recalled_at: to_i64(EVENT, "timestamp", e.timestamp)?,
        })
    }
}

impl TryFrom<abi::BatchFlagged> for BatchFlagged {
    type Error = DecodeError;

    fn try_from(e: abi::BatchFlagged) -> Result<Self, Self::Error> {
        const EVENT: &str = "BatchFlagged";
        Ok(Self {
            id: to_i64(EVENT, "id", e.id)?,
            flagged_by: e.flaggedBy,
            reason: e.reason,
            flagged_at: to_i64(EVENT, "timestamp", e.timestamp)?,
        })
    }
}
