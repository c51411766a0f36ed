//! Book resource handler.

use crate::app::error::AppError;
use crate::domain::model::book::BOOK_COLUMNS;
use crate::domain::model::{Book, BookPatch};
use crate::storage::{SharedDatabase, Statement};

const RESOURCE: &str = "Book";

#[derive(Clone)]
pub struct BookService {
    db: SharedDatabase,
}

impl BookService {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    /// Inserts the book as given. A taken id is reported by the primary key, not by a
    /// pre-check, so concurrent creates cannot both succeed.
    pub async fn create(&self, book: Book) -> Result<Book, AppError> {
        book.validate()?;
        self.db
            .execute(
                Statement::new("INSERT INTO books (id, title, author, year) VALUES (?, ?, ?, ?)")
                    .bind(book.id)
                    .bind(book.title.as_str())
                    .bind(book.author.as_str())
                    .bind(book.year),
            )
            .await
            .map_err(|e| AppError::from_write(RESOURCE, e))?;
        tracing::info!(id = book.id, "book created");
        Ok(book)
    }

    pub async fn list(&self) -> Result<Vec<Book>, AppError> {
        let rows = self
            .db
            .query(Statement::new(format!(
                "SELECT {} FROM books ORDER BY id",
                BOOK_COLUMNS
            )))
            .await?;
        Ok(rows
            .iter()
            .map(Book::from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn get(&self, id: i64) -> Result<Book, AppError> {
        let row = self
            .db
            .query_one(
                Statement::new(format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
                    .bind(id),
            )
            .await?
            .ok_or(AppError::NotFound {
                resource: RESOURCE,
                id,
            })?;
        Ok(Book::from_row(&row)?)
    }

    /// Reads the current row, merges the patch over it and writes the full row back.
    /// Last writer wins.
    pub async fn update(&self, id: i64, patch: BookPatch) -> Result<Book, AppError> {
        let current = self.get(id).await?;
        let merged = current.merge(patch)?;

        let affected = self
            .db
            .execute(
                Statement::new("UPDATE books SET title = ?, author = ?, year = ? WHERE id = ?")
                    .bind(merged.title.as_str())
                    .bind(merged.author.as_str())
                    .bind(merged.year)
                    .bind(id),
            )
            .await
            .map_err(|e| AppError::from_write(RESOURCE, e))?;
        if affected == 0 {
            // Deleted between the read and the write.
            return Err(AppError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        tracing::info!(id, "book updated");
        Ok(merged)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let affected = self
            .db
            .execute(Statement::new("DELETE FROM books WHERE id = ?").bind(id))
            .await?;
        if affected == 0 {
            return Err(AppError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        tracing::info!(id, "book deleted");
        Ok(())
    }
}
