//! Fixed response payloads shared by both back-ends.

use crate::store::RecordId;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: RecordId,
}

#[derive(Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

pub fn created(id: RecordId) -> (StatusCode, Json<Created>) {
    (
        StatusCode::CREATED,
        Json(Created {
            message: "Record added successfully",
            id,
        }),
    )
}

pub fn updated() -> (StatusCode, Json<StatusMessage>) {
    (
        StatusCode::OK,
        Json(StatusMessage {
            message: "Record updated successfully",
        }),
    )
}

pub fn deleted() -> (StatusCode, Json<StatusMessage>) {
    (
        StatusCode::OK,
        Json(StatusMessage {
            message: "Record deleted successfully",
        }),
    )
}
