use crate::checkpoint::model::Checkpoint;
use crate::client::Client;
use alloy::primitives::BlockNumber;
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
    // CHECKPOINTS
    // ---------------------------

    /// Moves the checkpoint forward to `block_number`. Lower values are ignored,
    /// so the checkpoint never goes backward.
    pub async fn advance(conn: &mut SqliteConnection, block_number: BlockNumber) -> Result<(), Error> {
        let query = r#"
            INSERT INTO checkpoints (id, block_number, updated_at)
            VALUES (1, ?, strftime('%s', 'now'))
            ON CONFLICT (id) DO UPDATE SET
                block_number = MAX(block_number, excluded.block_number),
                updated_at = excluded.updated_at
            "#;
        sqlx::query(query).bind(block_number as i64).execute(conn).await?;
        Ok(())
    }

    pub async fn get_last_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        let query = r#"
            SELECT block_number, updated_at
            FROM checkpoints
            WHERE id = 1
            "#;
        let checkpoint = sqlx::query_as(query).fetch_optional(self.client.pool()).await?;

        Ok(checkpoint)
    }

    /// Last fully applied block, `0` before the first checkpoint.
    pub async fn get(&self) -> Result<BlockNumber, Error> {
        let checkpoint = self.get_last_checkpoint().await?;
        Ok(checkpoint.map_or(0, |checkpoint| checkpoint.block_number as BlockNumber))
    }

    pub async fn set(&self, block_number: BlockNumber) -> Result<(), Error> {
        let mut conn = self.client.pool().acquire().await?;
        Store::advance(&mut *conn, block_number).await
    }
}
