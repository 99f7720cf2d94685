//! CRUD handlers. Each request is stateless: extract, one adapter call,
//! respond. The resource's storage handle is the axum state.

use crate::error::AppError;
use crate::response;
use crate::store::Resource;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn create(
    State(store): State<Resource>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = body_to_map(body)?;
    let id = store.create(&data).await?;
    Ok(response::created(id))
}

pub async fn list(State(store): State<Resource>) -> Result<impl IntoResponse, AppError> {
    let records = store.list().await?;
    Ok((StatusCode::OK, Json(records)))
}

pub async fn update(
    State(store): State<Resource>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = body_to_map(body)?;
    store.update(&id, &data).await?;
    Ok(response::updated())
}

pub async fn remove(
    State(store): State<Resource>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.delete(&id).await?;
    Ok(response::deleted())
}
