use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub block_number: i64,
    pub updated_at: i64,
}
