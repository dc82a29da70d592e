//! Response helpers for the person resource: bare JSON bodies, no envelope.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 with `Location` pointing at the new resource.
pub fn created<T: Serialize>(location: &str, data: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(data)).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `{collection path}/{id}` for a request made against the collection.
pub fn member_location(collection_path: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", collection_path.trim_end_matches('/'), id)
}
