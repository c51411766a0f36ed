//! Student resource handler.

use crate::app::error::AppError;
use crate::domain::model::student::STUDENT_COLUMNS;
use crate::domain::model::{Student, StudentPatch};
use crate::storage::{SharedDatabase, Statement};

const RESOURCE: &str = "Student";

#[derive(Clone)]
pub struct StudentService {
    db: SharedDatabase,
}

impl StudentService {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    /// Both the id and the email must be unused; the table constraints decide, and the
    /// violated column tells the two conflicts apart.
    pub async fn create(&self, student: Student) -> Result<Student, AppError> {
        student.validate()?;
        self.db
            .execute(
                Statement::new("INSERT INTO students (id, name, email) VALUES (?, ?, ?)")
                    .bind(student.id)
                    .bind(student.name.as_str())
                    .bind(student.email.as_str()),
            )
            .await
            .map_err(|e| AppError::from_write(RESOURCE, e))?;
        tracing::info!(id = student.id, "student created");
        Ok(student)
    }

    pub async fn list(&self) -> Result<Vec<Student>, AppError> {
        let rows = self
            .db
            .query(Statement::new(format!(
                "SELECT {} FROM students ORDER BY id",
                STUDENT_COLUMNS
            )))
            .await?;
        Ok(rows
            .iter()
            .map(Student::from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn get(&self, id: i64) -> Result<Student, AppError> {
        let row = self
            .db
            .query_one(
                Statement::new(format!(
                    "SELECT {} FROM students WHERE id = ?",
                    STUDENT_COLUMNS
                ))
                .bind(id),
            )
            .await?
            .ok_or(AppError::NotFound {
                resource: RESOURCE,
                id,
            })?;
        Ok(Student::from_row(&row)?)
    }

    /// Keeping one's own email never conflicts: the row cannot collide with itself.
    pub async fn update(&self, id: i64, patch: StudentPatch) -> Result<Student, AppError> {
        let current = self.get(id).await?;
        let merged = current.merge(patch)?;

        let affected = self
            .db
            .execute(
                Statement::new("UPDATE students SET name = ?, email = ? WHERE id = ?")
                    .bind(merged.name.as_str())
                    .bind(merged.email.as_str())
                    .bind(id),
            )
            .await
            .map_err(|e| AppError::from_write(RESOURCE, e))?;
        if affected == 0 {
            return Err(AppError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        tracing::info!(id, "student updated");
        Ok(merged)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let affected = self
            .db
            .execute(Statement::new("DELETE FROM students WHERE id = ?").bind(id))
            .await?;
        if affected == 0 {
            return Err(AppError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        tracing::info!(id, "student deleted");
        Ok(())
    }
}
