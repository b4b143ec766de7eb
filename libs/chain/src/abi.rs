//! Event ABI of the `BlockMedV2` contract.
//!
//! Only the events mirrored by the indexer are declared here.

use alloy::primitives::B256;
use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    event PrescriptionCreated(
        uint256 indexed id,
        address indexed doctor,
        string patientHash,
        uint256 expiresAt,
        uint256 timestamp
    );

    #[derive(Debug, PartialEq, Eq)]
    event PrescriptionUpdated(uint256 indexed id, string reason, uint256 timestamp);

    #[derive(Debug, PartialEq, Eq)]
    event PrescriptionDispensed(uint256 indexed id, address indexed pharmacist, uint256 timestamp);

    #[derive(Debug, PartialEq, Eq)]
    event BatchCreated(
        uint256 indexed id,
        string batchNumber,
        string medicineName,
        address indexed manufacturer,
        uint256 timestamp
    );

    #[derive(Debug, PartialEq, Eq)]
    event BatchRecalled(uint256 indexed id, address indexed recalledBy, string reason, uint256 timestamp);

    #[derive(Debug, PartialEq, Eq)]
    event BatchFlagged(uint256 indexed id, address indexed flaggedBy, string reason, uint256 timestamp);
}

/// Topic0 values of every indexed event, used to narrow log filters.
pub fn event_signatures() -> Vec<B256> {
    vec![
        PrescriptionCreated::SIGNATURE_HASH,
        PrescriptionUpdated::SIGNATURE_HASH,
        PrescriptionDispensed::SIGNATURE_HASH,
        BatchCreated::SIGNATURE_HASH,
        BatchRecalled::SIGNATURE_HASH,
        BatchFlagged::SIGNATURE_HASH,
    ]
}
