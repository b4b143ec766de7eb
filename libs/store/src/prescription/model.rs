use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Prescription {
    pub id: i64,
    pub patient_hash: String,
    pub doctor: String,
    pub expires_at: i64,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub version: i64,
    pub reason: Option<String>,
    pub dispensed_by: Option<String>,
    pub dispensed_at: Option<i64>,
    pub raw_event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrescription {
    pub id: i64,
    pub patient_hash: String,
    pub doctor: String,
    pub expires_at: i64,
    pub created_at: i64,
    pub raw_event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionUpdate {
    pub id: i64,
    pub updated_at: i64,
    pub reason: String,
    pub raw_event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDispense {
    pub id: i64,
    pub dispensed_by: String,
    pub dispensed_at: i64,
    pub raw_event: String,
}

#[derive(Debug, Clone, Default)]
pub struct PrescriptionFilter {
    pub doctor: Option<String>,
    pub patient_hash: Option<String>,
    pub limit: Option<i64>,
}
