use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::AppError;
use crate::models::{BookDraft, SavedBook};

/// Owns the single database connection for the process. Opened once at
/// startup, handed to the handlers through shared state, dropped (and with
/// it the connection closed) at shutdown. Every operation is one
/// parameterized statement; user input never reaches the SQL text.
pub struct BookStore {
    conn: Mutex<Connection>,
}

impl BookStore {
    /// Opens (or creates) the database at `path` and ensures the schema
    /// exists. `":memory:"` works for tests.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author TEXT NOT NULL,
                title TEXT NOT NULL,
                isbn TEXT NOT NULL,
                image_url TEXT,
                description TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn.lock().map_err(|_| AppError::StoreUnavailable)
    }

    /// All saved books, oldest first.
    pub fn list_all(&self) -> Result<Vec<SavedBook>, AppError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, author, title, isbn, image_url, description FROM books ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_book)?;

        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    /// Inserts a new row and returns its generated id.
    pub fn create(&self, draft: &BookDraft) -> Result<i64, AppError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO books (author, title, isbn, image_url, description) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.author,
                draft.title,
                draft.isbn,
                draft.image_url,
                draft.description
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> Result<SavedBook, AppError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, author, title, isbn, image_url, description FROM books WHERE id = ?1",
            params![id],
            row_to_book,
        )
        .optional()?
        .ok_or(AppError::NotFound(id))
    }

    /// Replaces all five mutable fields of the row with the given id.
    /// A missing row is an error for the caller, not a silent no-op.
    pub fn update(&self, id: i64, draft: &BookDraft) -> Result<(), AppError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE books SET author = ?1, title = ?2, isbn = ?3, image_url = ?4, \
             description = ?5 WHERE id = ?6",
            params![
                draft.author,
                draft.title,
                draft.isbn,
                draft.image_url,
                draft.description,
                id
            ],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }

    /// Removes the row with the given id; a missing row is an error for
    /// the caller, not a silent no-op.
    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }
}

fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<SavedBook> {
    Ok(SavedBook {
        id: row.get(0)?,
        author: row.get(1)?,
        title: row.get(2)?,
        isbn: row.get(3)?,
        image_url: row.get(4)?,
        description: row.get(5)?,
    })
}
