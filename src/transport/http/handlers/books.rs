use crate::app::AppError;
use crate::domain::model::{Book, BookPatch};
use crate::transport::http::handlers::common::{json_rejection, path_rejection};
use crate::transport::http::types::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

const CREATE_SHAPE: &str = r#"{"id": int, "title": str, "author": str, "year"?: int}"#;
const UPDATE_SHAPE: &str = r#"{"title"?: str, "author"?: str, "year"?: int | null}"#;

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 409, description = "A book with this id already exists", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(book) = payload.map_err(|e| json_rejection(e, CREATE_SHAPE))?;
    let created = state.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books ordered by id", body = [Book])
    )
)]
pub async fn list_books_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(state.books.list().await?))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    Ok(Json(state.books.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Merged book", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(patch) = payload.map_err(|e| json_rejection(e, UPDATE_SHAPE))?;
    Ok(Json(state.books.update(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    state.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
