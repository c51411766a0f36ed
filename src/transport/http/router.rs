use crate::domain::model::{Book, BookPatch, Student, StudentPatch};
use crate::transport::http::handlers::{books, health, students};
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse, RootResponse};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        health::healthcheck_handler,
        books::create_book_handler,
        books::list_books_handler,
        books::get_book_handler,
        books::update_book_handler,
        books::delete_book_handler,
        students::create_student_handler,
        students::list_students_handler,
        students::get_student_handler,
        students::update_student_handler,
        students::delete_student_handler
    ),
    components(schemas(
        Book,
        BookPatch,
        Student,
        StudentPatch,
        ErrorResponse,
        RootResponse,
        HealthResponse
    )),
    tags(
        (name = "books", description = "Book CRUD"),
        (name = "students", description = "Student CRUD")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/books",
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            "/books/:id",
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .route(
            "/students",
            get(students::list_students_handler).post(students::create_student_handler),
        )
        .route(
            "/students/:id",
            get(students::get_student_handler)
                .put(students::update_student_handler)
                .delete(students::delete_student_handler),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn error_ref(doc: &Value, path: &str, method: &str, status: &str) -> Value {
        doc["paths"][path][method]["responses"][status]["content"]["application/json"]["schema"]
            ["$ref"]
            .clone()
    }

    #[test]
    fn error_responses_reference_the_error_schema() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let expected = Value::from("#/components/schemas/ErrorResponse");

        assert_eq!(error_ref(&doc, "/books", "post", "409"), expected);
        assert_eq!(error_ref(&doc, "/books/{id}", "get", "404"), expected);
        assert_eq!(error_ref(&doc, "/students", "post", "409"), expected);
        assert_eq!(error_ref(&doc, "/students/{id}", "put", "409"), expected);
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
