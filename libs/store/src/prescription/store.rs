use crate::client::Client;
use crate::prescription::model::{
    NewPrescription, Prescription, PrescriptionDispense, PrescriptionFilter, PrescriptionUpdate,
};
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

    /// Insert-or-replace keyed by id: replaying the same creation leaves an identical row.
    pub async fn apply_created(conn: &mut SqliteConnection, p: &NewPrescription) -> Result<(), Error> {
        let query = r#"
            INSERT OR REPLACE INTO prescriptions (
                id, patient_hash, doctor, expires_at, created_at,
                updated_at, version, reason, dispensed_by, dispensed_at, raw_event
            )
            VALUES (?, ?, ?, ?, ?, NULL, 1, NULL, NULL, NULL, ?)
            "#;

        sqlx::query(query)
            .bind(p.id)
            .bind(&p.patient_hash)
            .bind(&p.doctor)
            .bind(p.expires_at)
            .bind(p.created_at)
            .bind(&p.raw_event)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Bumps the version on every call. Re-delivered updates are not deduplicated.
    pub async fn apply_updated(
        conn: &mut SqliteConnection,
        u: &PrescriptionUpdate,
    ) -> Result<(), Error> {
        let current: Option<i64> = sqlx::query_scalar("SELECT version FROM prescriptions WHERE id = ?")
            .bind(u.id)
            .fetch_optional(&mut *conn)
            .await?;
        let version = current.unwrap_or(1) + 1;

        let query = r#"
            UPDATE prescriptions
            SET updated_at = ?, version = ?, reason = ?, raw_event = ?
            WHERE id = ?
            "#;

        sqlx::query(query)
            .bind(u.updated_at)
            .bind(version)
            .bind(&u.reason)
            .bind(&u.raw_event)
            .bind(u.id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn apply_dispensed(
        conn: &mut SqliteConnection,
        d: &PrescriptionDispense,
    ) -> Result<(), Error> {
        let query = r#"
            UPDATE prescriptions
            SET dispensed_by = ?, dispensed_at = ?, raw_event = ?
            WHERE id = ?
            "#;

        sqlx::query(query)
            .bind(&d.dispensed_by)
            .bind(d.dispensed_at)
            .bind(&d.raw_event)
            .bind(d.id)
            .execute(conn)
            .await?;
        Ok(())
    }

    // ---------------------------
    // READS
    // ---------------------------

    pub async fn get_prescription(&self, id: i64) -> Result<Option<Prescription>, Error> {
        let query = r#"
            SELECT
                id, patient_hash, doctor, expires_at, created_at,
                updated_at, version, reason, dispensed_by, dispensed_at, raw_event
            FROM prescriptions
            WHERE id = ?
            "#;
        let prescription =
            sqlx::query_as(query).bind(id).fetch_optional(self.client.pool()).await?;

        Ok(prescription)
    }

    /// Newest first. Doctor addresses match case-insensitively.
    pub async fn query_prescriptions(
        &self,
        filter: &PrescriptionFilter,
    ) -> Result<Vec<Prescription>, Error> {
        let query = r#"
            SELECT
                id, patient_hash, doctor, expires_at, created_at,
                updated_at, version, reason, dispensed_by, dispensed_at, raw_event
            FROM prescriptions
            WHERE (?1 IS NULL OR doctor = ?1 COLLATE NOCASE)
              AND (?2 IS NULL OR patient_hash = ?2)
            ORDER BY created_at DESC, id DESC
            LIMIT ?3
            "#;
        let prescriptions = sqlx::query_as(query)
            .bind(filter.doctor.as_deref())
            .bind(filter.patient_hash.as_deref())
            .bind(clamp_limit(filter.limit))
            .fetch_all(self.client.pool())
            .await?;

        Ok(prescriptions)
    }
}
