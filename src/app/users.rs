//! Playground operations over the `users` table.

use crate::app::error::AppError;
use crate::domain::model::user::USER_COLUMNS;
use crate::domain::model::{TableModel, User, UserModel};
use crate::storage::{SharedDatabase, Statement};

const RESOURCE: &str = "User";
const INSERT_USER: &str = "INSERT INTO users (id, name, email) VALUES (?, ?, ?)";

#[derive(Clone)]
pub struct UserService {
    db: SharedDatabase,
}

impl UserService {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    pub async fn create_table(&self) -> Result<(), AppError> {
        self.db
            .execute(Statement::new(UserModel.get_create_table_sql()))
            .await?;
        Ok(())
    }

    pub async fn insert(&self, user: &User) -> Result<(), AppError> {
        self.db
            .execute(insert_statement(user))
            .await
            .map_err(|e| AppError::from_write(RESOURCE, e))?;
        tracing::debug!(id = user.id, "user inserted");
        Ok(())
    }

    /// Inserts all users or none of them.
    pub async fn insert_many(&self, users: &[User]) -> Result<u64, AppError> {
        if users.is_empty() {
            return Ok(0);
        }
        let inserted = self
            .db
            .execute_batch(users.iter().map(insert_statement).collect())
            .await
            .map_err(|e| AppError::from_write(RESOURCE, e))?;
        tracing::debug!(count = inserted, "users inserted");
        Ok(inserted)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = self
            .db
            .query(Statement::new(format!(
                "SELECT {} FROM users ORDER BY id",
                USER_COLUMNS
            )))
            .await?;
        Ok(rows
            .iter()
            .map(User::from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = self
            .db
            .query_one(
                Statement::new(format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
                    .bind(id),
            )
            .await?;
        Ok(row.as_ref().map(User::from_row).transpose()?)
    }

    /// First match by exact name, lowest id first.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let row = self
            .db
            .query_one(
                Statement::new(format!(
                    "SELECT {} FROM users WHERE name = ? ORDER BY id LIMIT 1",
                    USER_COLUMNS
                ))
                .bind(name),
            )
            .await?;
        Ok(row.as_ref().map(User::from_row).transpose()?)
    }

    pub async fn update_email(&self, id: i64, email: &str) -> Result<(), AppError> {
        let affected = self
            .db
            .execute(
                Statement::new("UPDATE users SET email = ? WHERE id = ?")
                    .bind(email)
                    .bind(id),
            )
            .await?;
        if affected == 0 {
            return Err(AppError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let affected = self
            .db
            .execute(Statement::new("DELETE FROM users WHERE id = ?").bind(id))
            .await?;
        if affected == 0 {
            return Err(AppError::NotFound {
                resource: RESOURCE,
                id,
            });
        }
        Ok(())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let row = self
            .db
            .query_one(Statement::new("SELECT id FROM users WHERE id = ?").bind(id))
            .await?;
        Ok(row.is_some())
    }
}

fn insert_statement(user: &User) -> Statement {
    Statement::new(INSERT_USER)
        .bind(user.id)
        .bind(user.name.clone())
        .bind(user.email.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::SqliteDatabase;
    use std::sync::Arc;

    async fn service() -> UserService {
        let db = SqliteDatabase::connect("sqlite::memory:").await.unwrap();
        let users = UserService::new(Arc::new(db));
        users.create_table().await.unwrap();
        users
    }

    #[tokio::test]
    async fn insert_many_is_all_or_nothing() {
        let users = service().await;
        users
            .insert(&User::new(1, "Alice", "alice@example.com"))
            .await
            .unwrap();

        let batch = vec![
            User::new(2, "Bob", "bob@example.com"),
            User::new(1, "Dup", "dup@example.com"),
        ];
        assert!(users.insert_many(&batch).await.is_err());
        assert_eq!(users.list().await.unwrap().len(), 1);

        let batch = vec![
            User::new(2, "Bob", "bob@example.com"),
            User::new(3, "Charlie", "charlie@example.com"),
        ];
        assert_eq!(users.insert_many(&batch).await.unwrap(), 2);
        assert_eq!(users.insert_many(&[]).await.unwrap(), 0);

        let ids: Vec<i64> = users.list().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn lookups_updates_and_deletes() {
        let users = service().await;
        users
            .insert(&User::new(1, "Alice", "alice@example.com"))
            .await
            .unwrap();

        assert_eq!(
            users.find_by_name("Alice").await.unwrap().map(|u| u.id),
            Some(1)
        );
        assert!(users.find_by_name("Hero").await.unwrap().is_none());

        users
            .update_email(1, "alice.new@example.com")
            .await
            .unwrap();
        let alice = users.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(alice.email.as_deref(), Some("alice.new@example.com"));
        assert!(matches!(
            users.update_email(5, "x@y.z").await,
            Err(AppError::NotFound { id: 5, .. })
        ));

        users.delete(1).await.unwrap();
        assert!(!users.exists(1).await.unwrap());
        assert!(users.delete(1).await.is_err());
    }

    #[test]
    fn display_matches_console_listing() {
        let user = User {
            id: 4,
            name: Some("Diana".into()),
            email: None,
        };
        assert_eq!(user.to_string(), "id=4 | name=Diana | email=None");
    }
}
