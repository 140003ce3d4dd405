use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use avisgate_core::AppError;
use tracing::{info, instrument};

use super::store::{Record, RecordStore};
use crate::middleware::auth::RequestIdentity;
use crate::validator::{JsonBody, PathParam};

pub type SharedRecords = Arc<dyn RecordStore>;

fn submitter(identity: &RequestIdentity) -> &str {
    identity
        .principal()
        .map(|p| p.identifier.as_str())
        .unwrap_or("anonymous")
}

#[instrument(skip(store, identity, record))]
pub async fn create_record(
    State(store): State<SharedRecords>,
    identity: RequestIdentity,
    JsonBody(record): JsonBody<Record>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let created = store.create(record).await?;
    info!(submitted_by = %submitter(&identity), id = ?created.get("id"), "Review recorded");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(store, identity, records))]
pub async fn create_records(
    State(store): State<SharedRecords>,
    identity: RequestIdentity,
    JsonBody(records): JsonBody<Vec<Record>>,
) -> Result<(StatusCode, Json<Vec<Record>>), AppError> {
    let created = store.create_many(records).await?;
    info!(submitted_by = %submitter(&identity), count = created.len(), "Reviews recorded");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(store))]
pub async fn list_records(
    State(store): State<SharedRecords>,
) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(store.list().await?))
}

#[instrument(skip(store))]
pub async fn get_record(
    State(store): State<SharedRecords>,
    PathParam(id): PathParam<i64>,
) -> Result<Response, AppError> {
    Ok(match store.get(id).await? {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

#[instrument(skip(store, record))]
pub async fn replace_record(
    State(store): State<SharedRecords>,
    PathParam(id): PathParam<i64>,
    JsonBody(record): JsonBody<Record>,
) -> Result<Response, AppError> {
    Ok(match store.replace(id, record).await? {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

#[instrument(skip(store))]
pub async fn delete_record(
    State(store): State<SharedRecords>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    if store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
