use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Batch {
    pub id: i64,
    pub batch_number: String,
    pub medicine_name: String,
    pub manufacturer: String,
    pub created_at: i64,
    pub recalled_at: Option<i64>,
    pub recall_reason: Option<String>,
    pub recalled_by: Option<String>,
    pub flagged_at: Option<i64>,
    pub flag_reason: Option<String>,
    pub flagged_by: Option<String>,
    pub raw_event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBatch {
    pub id: i64,
    pub batch_number: String,
    pub medicine_name: String,
    pub manufacturer: String,
    pub created_at: i64,
    pub raw_event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecall {
    pub id: i64,
    pub recalled_at: i64,
    pub reason: String,
    pub recalled_by: String,
    pub raw_event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFlag {
    pub id: i64,
    pub flagged_at: i64,
    pub reason: String,
    pub flagged_by: String,
    pub raw_event: String,
}
