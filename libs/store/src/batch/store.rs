use crate::batch::model::{Batch, BatchFlag, BatchRecall, NewBatch};
use crate::client::Client;
use crate::utils::clamp_limit;
use sqlx::{Error, SqliteConnection};

#[derive(Clone)]
pub struct Store {
    client: Client,
}

impl Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // ---------------------------
    // WRITES (event application)
    // ---------------------------

    pub async fn apply_created(conn: &mut SqliteConnection, b: &NewBatch) -> Result<(), Error> {
        let query = r#"
            INSERT OR REPLACE INTO batches (
                id, batch_number, medicine_name, manufacturer, created_at,
                recalled_at, recall_reason, recalled_by,
                flagged_at, flag_reason, flagged_by, raw_event
            )
            VALUES (?, ?, ?, ?, ?, NULL, NULL, NULL, NULL, NULL, NULL, ?)
            "#;

        sqlx::query(query)
            .bind(b.id)
            .bind(&b.batch_number)
            .bind(&b.medicine_name)
            .bind(&b.manufacturer)
            .bind(b.created_at)
            .bind(&b.raw_event)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn apply_recalled(conn: &mut SqliteConnection, r: &BatchRecall) -> Result<(), Error> {
        let query = r#"
            UPDATE batches
            SET recalled_at = ?, recall_reason = ?, recalled_by = ?, raw_event = ?
            WHERE id = ?
            "#;

        sqlx::query(query)
            .bind(r.recalled_at)
            .bind(&r.reason)
            .bind(&r.recalled_by)
            .bind(&r.raw_event)
            .bind(r.id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn apply_flagged(conn: &mut SqliteConnection, f: &BatchFlag) -> Result<(), Error> {
        let query = r#"
            UPDATE batches
            SET flagged_at = ?, flag_reason = ?, flagged_by = ?, raw_event = ?
            WHERE id = ?
            "#;

        sqlx::query(query)
            .bind(f.flagged_at)
            .bind(&f.reason)
            .bind(&f.flagged_by)
            .bind(&f.raw_event)
            .bind(f.id)
            .execute(conn)
            .await?;
        Ok(())
    }

    // ---------------------------
    // READS
    // ---------------------------

    pub async fn get_batch(&self, id: i64) -> Result<Option<Batch>, Error> {
        let query = r#"
            SELECT
                id, batch_number, medicine_name, manufacturer, created_at,
                recalled_at, recall_reason, recalled_by,
                flagged_at, flag_reason, flagged_by, raw_event
            FROM batches
            WHERE id = ?
            "#;
        let batch = sqlx::query_as(query).bind(id).fetch_optional(self.client.pool()).await?;

        Ok(batch)
    }

    pub async fn query_batches(&self, limit: Option<i64>) -> Result<Vec<Batch>, Error> {
        let query = r#"
            SELECT
                id, batch_number, medicine_name, manufacturer, created_at,
                recalled_at, recall_reason, recalled_by,
                flagged_at, flag_reason, flagged_by, raw_event
            FROM batches
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#;
        let batches = sqlx::query_as(query)
            .bind(clamp_limit(limit))
            .fetch_all(self.client.pool())
            .await?;

        Ok(batches)
    }
}
