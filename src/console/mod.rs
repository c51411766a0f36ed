//! Interactive menu over the playground `users` table.
//!
//! The driver is generic over its line source and sink, so it runs on stdin/stdout in the
//! `playground` binary and on in-memory buffers in tests. Every action validates its own
//! input and reports failures as a line; nothing ends the loop except `0` or end of input.

use crate::app::{AppError, UserService};
use crate::domain::model::User;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CreateTable,
    InsertOne,
    InsertMany,
    QueryAll,
    QueryOne,
    UpdateEmail,
    Delete,
    VerifyDeleted,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::CreateTable,
        MenuAction::InsertOne,
        MenuAction::InsertMany,
        MenuAction::QueryAll,
        MenuAction::QueryOne,
        MenuAction::UpdateEmail,
        MenuAction::Delete,
        MenuAction::VerifyDeleted,
        MenuAction::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuAction::CreateTable => "1",
            MenuAction::InsertOne => "2",
            MenuAction::InsertMany => "3",
            MenuAction::QueryAll => "4",
            MenuAction::QueryOne => "5",
            MenuAction::UpdateEmail => "6",
            MenuAction::Delete => "7",
            MenuAction::VerifyDeleted => "8",
            MenuAction::Exit => "0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::CreateTable => "Create table",
            MenuAction::InsertOne => "Insert one user",
            MenuAction::InsertMany => "Insert many users",
            MenuAction::QueryAll => "Query all users",
            MenuAction::QueryOne => "Query one user (filter)",
            MenuAction::UpdateEmail => "Update user email",
            MenuAction::Delete => "Delete user",
            MenuAction::VerifyDeleted => "Verify deletion",
            MenuAction::Exit => "Exit",
        }
    }

    pub fn from_choice(choice: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == choice.trim())
    }
}

/// Outcome of reading one operator answer.
enum Input {
    Line(String),
    Eof,
}

/// Outcome of asking for an integer id.
enum IdAnswer {
    Id(i64),
    /// Not an integer; already reported to the operator.
    Invalid,
    Eof,
}

pub struct Console<R, W> {
    users: UserService,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(users: UserService, input: R, output: W) -> Self {
        Self {
            users,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the operator picks `0` or input ends. Only I/O errors on the console
    /// itself are returned.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.say("\n=== Turso (libsql) Menu ===").await?;
            for action in MenuAction::ALL {
                self.say(&format!("{}. {}", action.key(), action.label()))
                    .await?;
            }
            let choice = match self.ask("Choose an option: ").await? {
                Input::Line(line) => line,
                Input::Eof => return Ok(()),
            };

            let Some(action) = MenuAction::from_choice(&choice) else {
                self.say("⚠️ Invalid choice. Try again.").await?;
                continue;
            };
            if action == MenuAction::Exit {
                self.say("👋 Bye!").await?;
                return Ok(());
            }

            tracing::debug!(?action, "menu action");
            if !self.dispatch(action).await? {
                return Ok(());
            }
        }
    }

    /// Returns `false` when input ran out mid-action.
    async fn dispatch(&mut self, action: MenuAction) -> io::Result<bool> {
        match action {
            MenuAction::CreateTable => self.create_table().await,
            MenuAction::InsertOne => self.insert_one().await,
            MenuAction::InsertMany => self.insert_many().await,
            MenuAction::QueryAll => self.query_all().await,
            MenuAction::QueryOne => self.query_one().await,
            MenuAction::UpdateEmail => self.update_email().await,
            MenuAction::Delete => self.delete_user().await,
            MenuAction::VerifyDeleted => self.verify_deleted().await,
            MenuAction::Exit => Ok(false),
        }
    }

    async fn create_table(&mut self) -> io::Result<bool> {
        match self.users.create_table().await {
            Ok(()) => self.say("✅ Table 'users' created (if not already).").await?,
            Err(e) => self.say(&format!("❌ Create table failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn insert_one(&mut self) -> io::Result<bool> {
        let id = match self.ask_id("Enter id (integer): ").await? {
            IdAnswer::Id(id) => id,
            IdAnswer::Invalid => return Ok(true),
            IdAnswer::Eof => return Ok(false),
        };
        let Input::Line(name) = self.ask("Enter name: ").await? else {
            return Ok(false);
        };
        let Input::Line(email) = self.ask("Enter email: ").await? else {
            return Ok(false);
        };

        let user = User::new(id, name, email);
        match self.users.insert(&user).await {
            Ok(()) => self.say(&format!("✅ Inserted: {}", user)).await?,
            Err(e) => self.say(&format!("❌ Insert failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn insert_many(&mut self) -> io::Result<bool> {
        self.say("Enter multiple users. Leave name empty to finish.")
            .await?;
        let mut rows = Vec::new();
        loop {
            let name = match self.ask("Name: ").await? {
                Input::Line(name) if !name.is_empty() => name,
                Input::Line(_) => break,
                Input::Eof => return Ok(false),
            };
            let raw_id = match self.ask("  ID (integer): ").await? {
                Input::Line(raw) => raw,
                Input::Eof => return Ok(false),
            };
            let Ok(id) = raw_id.parse::<i64>() else {
                self.say("  ⚠️ ID must be an integer. Try again.").await?;
                continue;
            };
            let Input::Line(email) = self.ask("  Email: ").await? else {
                return Ok(false);
            };
            rows.push(User::new(id, name, email));
        }

        if rows.is_empty() {
            self.say("ℹ️ No rows to insert.").await?;
            return Ok(true);
        }
        match self.users.insert_many(&rows).await {
            Ok(n) => self.say(&format!("✅ Inserted {} users.", n)).await?,
            Err(e) => self.say(&format!("❌ Bulk insert failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn query_all(&mut self) -> io::Result<bool> {
        match self.users.list().await {
            Ok(users) if users.is_empty() => self.say("ℹ️ No users found.").await?,
            Ok(users) => {
                self.say("✅ Users:").await?;
                for user in users {
                    self.say(&format!("- {}", user)).await?;
                }
            }
            Err(e) => self.say(&format!("❌ Query failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn query_one(&mut self) -> io::Result<bool> {
        self.say("Search by: 1) id  2) name").await?;
        let Input::Line(choice) = self.ask("Choose 1 or 2: ").await? else {
            return Ok(false);
        };
        let found = match choice.as_str() {
            "1" => {
                let id = match self.ask_id("Enter id: ").await? {
                    IdAnswer::Id(id) => id,
                    IdAnswer::Invalid => return Ok(true),
                    IdAnswer::Eof => return Ok(false),
                };
                self.users.find_by_id(id).await
            }
            "2" => {
                let Input::Line(name) = self.ask("Enter name: ").await? else {
                    return Ok(false);
                };
                self.users.find_by_name(&name).await
            }
            _ => {
                self.say("⚠️ Invalid choice.").await?;
                return Ok(true);
            }
        };

        match found {
            Ok(Some(user)) => self.say(&format!("✅ Found: {}", user)).await?,
            Ok(None) => self.say("❌ No matching user found.").await?,
            Err(e) => self.say(&format!("❌ Query failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn update_email(&mut self) -> io::Result<bool> {
        let id = match self.ask_id("Enter user id to update: ").await? {
            IdAnswer::Id(id) => id,
            IdAnswer::Invalid => return Ok(true),
            IdAnswer::Eof => return Ok(false),
        };
        let Input::Line(email) = self.ask("Enter new email: ").await? else {
            return Ok(false);
        };
        match self.users.update_email(id, &email).await {
            Ok(()) => {
                self.say(&format!("✅ Updated id={} to email={}", id, email))
                    .await?
            }
            Err(AppError::NotFound { .. }) => {
                self.say("❌ No user updated (check id).").await?
            }
            Err(e) => self.say(&format!("❌ Update failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn delete_user(&mut self) -> io::Result<bool> {
        let id = match self.ask_id("Enter user id to delete: ").await? {
            IdAnswer::Id(id) => id,
            IdAnswer::Invalid => return Ok(true),
            IdAnswer::Eof => return Ok(false),
        };
        match self.users.delete(id).await {
            Ok(()) => self.say(&format!("✅ Deleted user with id={}", id)).await?,
            Err(AppError::NotFound { .. }) => {
                self.say("❌ No user deleted (check id).").await?
            }
            Err(e) => self.say(&format!("❌ Delete failed: {}", e)).await?,
        }
        Ok(true)
    }

    async fn verify_deleted(&mut self) -> io::Result<bool> {
        let id = match self.ask_id("Enter user id to verify deletion: ").await? {
            IdAnswer::Id(id) => id,
            IdAnswer::Invalid => return Ok(true),
            IdAnswer::Eof => return Ok(false),
        };
        match self.users.exists(id).await {
            Ok(true) => self.say(&format!("❌ User still exists: id={}", id)).await?,
            Ok(false) => {
                self.say(&format!("✅ User with id={} was deleted.", id))
                    .await?
            }
            Err(e) => self.say(&format!("❌ Verification failed: {}", e)).await?,
        }
        Ok(true)
    }

    // --- I/O helpers ---

    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    async fn ask(&mut self, prompt: &str) -> io::Result<Input> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(Input::Eof);
        }
        Ok(Input::Line(line.trim().to_string()))
    }

    async fn ask_id(&mut self, prompt: &str) -> io::Result<IdAnswer> {
        match self.ask(prompt).await? {
            Input::Line(raw) => match raw.parse::<i64>() {
                Ok(id) => Ok(IdAnswer::Id(id)),
                Err(_) => {
                    self.say("⚠️ ID must be an integer.").await?;
                    Ok(IdAnswer::Invalid)
                }
            },
            Input::Eof => Ok(IdAnswer::Eof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::SqliteDatabase;
    use std::sync::Arc;

    async fn users() -> UserService {
        let db = SqliteDatabase::connect("sqlite::memory:").await.unwrap();
        UserService::new(Arc::new(db))
    }

    async fn run_script(users: UserService, script: &str) -> String {
        let mut console = Console::new(users, script.as_bytes(), Vec::new());
        console.run().await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn menu_keys_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_choice(action.key()), Some(action));
        }
        assert_eq!(MenuAction::from_choice(" 4 "), Some(MenuAction::QueryAll));
        assert_eq!(MenuAction::from_choice("9"), None);
    }

    #[tokio::test]
    async fn full_session_against_users_table() {
        let users = users().await;
        let script = "1\n\
                      2\n1\nAlice\nalice@example.com\n\
                      3\nBob\n2\nbob@example.com\nCharlie\nabc\nCharlie\n3\ncharlie@example.com\n\n\
                      4\n\
                      5\n2\nBob\n\
                      6\n1\nalice.new@example.com\n\
                      7\n2\n\
                      8\n2\n\
                      0\n";
        let out = run_script(users.clone(), script).await;

        assert!(out.contains("✅ Table 'users' created"));
        assert!(out.contains("✅ Inserted: id=1 | name=Alice | email=alice@example.com"));
        assert!(out.contains("  ⚠️ ID must be an integer. Try again."));
        assert!(out.contains("✅ Inserted 2 users."));
        assert!(out.contains("- id=3 | name=Charlie | email=charlie@example.com"));
        assert!(out.contains("✅ Found: id=2 | name=Bob | email=bob@example.com"));
        assert!(out.contains("✅ Updated id=1 to email=alice.new@example.com"));
        assert!(out.contains("✅ Deleted user with id=2"));
        assert!(out.contains("✅ User with id=2 was deleted."));
        assert!(out.trim_end().ends_with("👋 Bye!"));

        let remaining: Vec<i64> = users.list().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[tokio::test]
    async fn failures_are_reported_and_the_loop_continues() {
        let users = users().await;
        // No table yet: the insert fails, then a bad id, a bad choice, and a missing row.
        let script = "2\n1\nAlice\na@x.com\n\
                      7\nseven\n\
                      42\n\
                      1\n\
                      7\n5\n\
                      4\n";
        let out = run_script(users.clone(), script).await;

        assert!(out.contains("❌ Insert failed:"));
        assert!(out.contains("⚠️ ID must be an integer."));
        assert!(out.contains("⚠️ Invalid choice. Try again."));
        assert!(out.contains("❌ No user deleted (check id)."));
        assert!(out.contains("ℹ️ No users found."));
        // Input ran out without `0`: the loop ends quietly.
        assert!(!out.contains("Bye"));
    }

    #[tokio::test]
    async fn duplicate_id_in_insert_many_inserts_nothing() {
        let users = users().await;
        users.create_table().await.unwrap();
        let script = "3\nBob\n2\nb@x.com\nBob2\n2\nb2@x.com\n\n4\n0\n";
        let out = run_script(users.clone(), script).await;
        assert!(out.contains("❌ Bulk insert failed:"));
        assert!(out.contains("ℹ️ No users found."));
    }

    #[tokio::test]
    async fn invalid_id_returns_to_the_menu_and_eof_at_a_prompt_ends_the_session() {
        let users = users().await;
        users.create_table().await.unwrap();

        let out = run_script(users.clone(), "8\nx\n0\n").await;
        let after_invalid = out.split("⚠️ ID must be an integer.").nth(1).unwrap();
        assert!(after_invalid.contains("=== Turso (libsql) Menu ==="));
        assert!(out.trim_end().ends_with("👋 Bye!"));

        let out = run_script(users, "6\n").await;
        assert!(out.ends_with("Enter user id to update: "));
    }
}
