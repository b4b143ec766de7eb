use axum::Json;
use axum::extract::{Path, Query, State};
use engine::context::Context;
use serde::{Deserialize, Serialize};
use store::batch::model::Batch;
use store::prescription::model::{Prescription, PrescriptionFilter};
use store::utils::address_to_string;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub ok: bool,
    pub last_block: u64,
    pub contract: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionQuery {
    pub doctor: Option<String>,
    pub patient_hash: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    pub limit: Option<String>,
}

// Anything that is not a whole number falls back to the default limit.
fn parse_limit(limit: Option<&str>) -> Option<i64> {
    limit.and_then(|limit| limit.trim().parse().ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

// Ids that do not parse cannot match a row.
fn parse_id(id: &str) -> Result<i64, ApiError> {
    id.parse().map_err(|_| ApiError::NotFound)
}

pub async fn health(State(context): State<Context>) -> Result<Json<Health>, ApiError> {
    let last_block = context.checkpoints.get().await?;
    Ok(Json(Health { ok: true, last_block, contract: address_to_string(&context.contract) }))
}

pub async fn list_prescriptions(
    State(context): State<Context>,
    Query(query): Query<PrescriptionQuery>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let filter = PrescriptionFilter {
        doctor: non_empty(query.doctor),
        patient_hash: non_empty(query.patient_hash),
        limit: parse_limit(query.limit.as_deref()),
    };
    let prescriptions = context.projection.prescriptions().query_prescriptions(&filter).await?;
    Ok(Json(prescriptions))
}

pub async fn get_prescription(
    State(context): State<Context>,
    Path(id): Path<String>,
) -> Result<Json<Prescription>, ApiError> {
    let id = parse_id(&id)?;
    let prescription = context.projection.prescriptions().get_prescription(id).await?;
    prescription.map(Json).ok_or(ApiError::NotFound)
}

pub async fn list_batches(
    State(context): State<Context>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<Vec<Batch>>, ApiError> {
    let batches =
        context.projection.batches().query_batches(parse_limit(query.limit.as_deref())).await?;
    Ok(Json(batches))
}

pub async fn get_batch(
    State(context): State<Context>,
    Path(id): Path<String>,
) -> Result<Json<Batch>, ApiError> {
    let id = parse_id(&id)?;
    context.projection.batches().get_batch(id).await?.map(Json).ok_or(ApiError::NotFound)
}
