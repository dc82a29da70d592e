//! Serves the OpenAPI document.

use crate::error::AppError;
use axum::Json;
use serde_json::Value;

pub async fn openapi_json() -> Result<Json<Value>, AppError> {
    let doc = crate::docs::openapi()
        .map_err(|e| AppError::Internal(format!("openapi document: {}", e)))?;
    Ok(Json(doc))
}
