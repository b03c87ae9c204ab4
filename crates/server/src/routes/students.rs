use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use models::{NewStudent, SimplifiedStudent, Student, StudentFilter, StudentPatch};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact match on `address.country`. Not applied when absent or empty.
    pub country: Option<String>,
    /// Only students with age greater than or equal to this value. Not applied when absent.
    pub age: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentList {
    pub data: Vec<SimplifiedStudent>,
}

/// Create a student. All fields are mandatory.
#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CreatedIdDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedId>), JsonApiError> {
    let Json(input) = payload?;
    let id = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id: id.to_string() })))
}

/// List students, optionally filtered by country and minimum age.
#[utoipa::path(
    get, path = "/students", tag = "students",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = crate::openapi::StudentListDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<StudentList>, JsonApiError> {
    let Query(q) = query?;
    let data = state.students.list(StudentFilter::from_query(q.country, q.age)).await?;
    info!(count = data.len(), "list students");
    Ok(Json(StudentList { data }))
}

/// Fetch a specific student by id.
#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Student>, JsonApiError> {
    Ok(Json(state.students.get(&id).await?))
}

/// Update only the submitted fields of a student.
#[utoipa::path(
    patch, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id")),
    request_body = crate::openapi::StudentPatchDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not Found, or nothing changed", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Json(patch) = payload?;
    state.students.update(&id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a student by id.
#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    state.students.delete(&id).await?;
    Ok(Json(serde_json::json!({})))
}
