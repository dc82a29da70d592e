//! Person CRUD handlers: list, get, create, update, delete.

use crate::error::AppError;
use crate::model::PersonBody;
use crate::response::{created, member_location, no_content, ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest(format!("invalid uuid: {}", id_str)))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("person with id: {} does not exist", id))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let people = state.people.list().await?;
    Ok(ok(people))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let person = state.people.get(id).await?.ok_or_else(|| not_found(id))?;
    Ok(ok(person))
}

pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<PersonBody>,
) -> Result<impl IntoResponse, AppError> {
    let person = state.people.create(body).await?;
    let location = member_location(uri.path(), person.id);
    Ok(created(&location, person))
}

/// Unknown ids answer 404 before the body is looked at.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<PersonBody>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            if !state.people.exists(id).await? {
                return Err(not_found(id));
            }
            return Err(rejection.into());
        }
    };
    let person = state.people.update(id, body).await?.ok_or_else(|| not_found(id))?;
    Ok(ok(person))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.people.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("42"), Err(AppError::BadRequest(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
