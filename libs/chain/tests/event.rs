use alloy::primitives::{Address, B256, Bytes, LogData, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use chain::abi;
use chain::event::{self, BlockMedEvent, DecodeError};
use eyre::Result;

const CONTRACT: Address = Address::repeat_byte(0x5F);

fn log_at(block_number: Option<u64>, log_index: u64, data: LogData) -> Log {
    Log {
        inner: alloy::primitives::Log { address: CONTRACT, data },
        block_number,
        log_index: Some(log_index),
        transaction_hash: Some(B256::repeat_byte(0x11)),
        ..Default::default()
    }
}

#[test]
fn test_decode_prescription_created() -> Result<()> {
    let doctor = Address::repeat_byte(0xAA);
    let data = abi::PrescriptionCreated {
        id: U256::from(1),
        doctor,
        patientHash: "h1".to_string(),
        expiresAt: U256::from(100),
        timestamp: U256::from(50),
    }
    .encode_log_data();

    let decoded = event::decode(&log_at(Some(5), 0, data))?.expect("known event");

    assert_eq!(decoded.block_number, 5);
    assert_eq!(decoded.log_index, Some(0));
    match decoded.event {
        BlockMedEvent::PrescriptionCreated(created) => {
            assert_eq!(created.id, 1);
            assert_eq!(created.doctor, doctor);
            assert_eq!(created.patient_hash, "h1");
            assert_eq!(created.expires_at, 100);
            assert_eq!(created.created_at, 50);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_decode_batch_lifecycle() -> Result<()> {
    let manufacturer = Address::repeat_byte(0x01);
    let inspector = Address::repeat_byte(0x02);

    let created = abi::BatchCreated {
        id: U256::from(7),
        batchNumber: "B-007".to_string(),
        medicineName: "Amoxicillin".to_string(),
        manufacturer,
        timestamp: U256::from(1_000),
    }
    .encode_log_data();
    let recalled = abi::BatchRecalled {
        id: U256::from(7),
        recalledBy: manufacturer,
        reason: "contamination".to_string(),
        timestamp: U256::from(2_000),
    }
    .encode_log_data();
    let flagged = abi::BatchFlagged {
        id: U256::from(7),
        flaggedBy: inspector,
        reason: "label mismatch".to_string(),
        timestamp: U256::from(3_000),
    }
    .encode_log_data();

    let names: Vec<_> = [created, recalled, flagged]
        .into_iter()
        .enumerate()
        .map(|(i, data)| event::decode(&log_at(Some(9), i as u64, data)))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .map(|decoded| decoded.event.name())
        .collect();

    assert_eq!(names, vec!["BatchCreated", "BatchRecalled", "BatchFlagged"]);
    Ok(())
}

#[test]
fn test_unknown_topic_is_skipped() -> Result<()> {
    let data = LogData::new_unchecked(vec![B256::repeat_byte(0xEE)], Bytes::new());
    assert!(event::decode(&log_at(Some(1), 0, data))?.is_none());

    let anonymous = LogData::new_unchecked(vec![], Bytes::new());
    assert!(event::decode(&log_at(Some(1), 1, anonymous))?.is_none());
    Ok(())
}

#[test]
fn test_malformed_known_event_is_an_error() {
    // Right topic0, but the indexed id topic and the data payload are missing.
    let data =
        LogData::new_unchecked(vec![abi::PrescriptionUpdated::SIGNATURE_HASH], Bytes::new());

    let result = event::decode(&log_at(Some(3), 0, data));
    assert!(matches!(result, Err(DecodeError::Abi { event: "PrescriptionUpdated", .. })));
}

#[test]
fn test_oversized_id_is_an_error() {
    let data = abi::PrescriptionDispensed {
        id: U256::MAX,
        pharmacist: Address::repeat_byte(0x03),
        timestamp: U256::from(1),
    }
    .encode_log_data();

    let result = event::decode(&log_at(Some(3), 0, data));
    assert!(matches!(result, Err(DecodeError::Overflow { field: "id", .. })));
}

#[test]
fn test_pending_log_is_an_error() {
    let data = abi::PrescriptionUpdated {
        id: U256::from(1),
        reason: "dosage".to_string(),
        timestamp: U256::from(60),
    }
    .encode_log_data();

    assert!(matches!(event::decode(&log_at(None, 0, data)), Err(DecodeError::Pending)));
}

#[test]
fn test_raw_meta_describes_the_log() -> Result<()> {
    let data = abi::PrescriptionUpdated {
        id: U256::from(1),
        reason: "dosage".to_string(),
        timestamp: U256::from(60),
    }
    .encode_log_data();
    let decoded = event::decode(&log_at(Some(12), 4, data))?.expect("known event");

    let meta: serde_json::Value = serde_json::from_str(&decoded.raw_meta())?;
    assert_eq!(meta["event"], "PrescriptionUpdated");
    assert_eq!(meta["blockNumber"], 12);
    assert_eq!(meta["logIndex"], 4);
    Ok(())
}
