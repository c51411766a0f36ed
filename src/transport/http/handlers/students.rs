use crate::app::AppError;
use crate::domain::model::{Student, StudentPatch};
use crate::transport::http::handlers::common::{json_rejection, path_rejection};
use crate::transport::http::types::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

const CREATE_SHAPE: &str = r#"{"id": int, "name": str, "email": str}"#;
const UPDATE_SHAPE: &str = r#"{"name"?: str, "email"?: str}"#;

#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = Student,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 409, description = "Id or email already in use", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn create_student_handler(
    State(state): State<AppState>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let Json(student) = payload.map_err(|e| json_rejection(e, CREATE_SHAPE))?;
    let created = state.students.create(student).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All students ordered by id", body = [Student])
    )
)]
pub async fn list_students_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.students.list().await?))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn get_student_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Student>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    Ok(Json(state.students.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentPatch,
    responses(
        (status = 200, description = "Merged student", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Another student already uses this email", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn update_student_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<Student>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(patch) = payload.map_err(|e| json_rejection(e, UPDATE_SHAPE))?;
    Ok(Json(state.students.update(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn delete_student_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
