use super::TableModel;

/// `books`: caller-assigned integer id, required title/author, optional year.
pub struct BookModel;

impl TableModel for BookModel {
    fn table_name(&self) -> &str {
        "books"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year INTEGER
        )"
    }
}

/// `students`: email is unique across all rows.
pub struct StudentModel;

impl TableModel for StudentModel {
    fn table_name(&self) -> &str {
        "students"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE
        )"
    }
}

/// Playground `users` table; nothing is enforced beyond the primary key.
pub struct UserModel;

impl TableModel for UserModel {
    fn table_name(&self) -> &str {
        "users"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            name TEXT,
            email TEXT
        )"
    }
}
