use anyhow::Result;
use libsql::Connection;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// A submitted book form, exactly as the user typed it. Kept as raw strings
/// so a failed submission can be re-rendered with the entered values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
}

/// A draft that passed validation and is ready for the store.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i64>,
}

impl BookDraft {
    /// Pure validation: collects every field-level problem instead of
    /// stopping at the first. The store never sees an invalid draft.
    pub fn validate(&self) -> Result<NewBook, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "\"Title\" is required"));
        }

        let author = self.author.trim();
        if author.is_empty() {
            errors.push(FieldError::new("author", "\"Author\" is required"));
        }

        let genre = self.genre.trim();
        let year_raw = self.year.trim();
        let year = if year_raw.is_empty() {
            None
        } else {
            match year_raw.parse::<i64>() {
                Ok(y) => Some(y),
                Err(_) => {
                    errors.push(FieldError::new("year", "\"Year\" must be a whole number"));
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            genre: if genre.is_empty() { None } else { Some(genre.to_string()) },
            year,
        })
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        BookDraft {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }
}

pub struct Catalog<'a> {
    conn: &'a Connection,
}

impl<'a> Catalog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create_book(&self, input: &NewBook) -> Result<Book> {
        let query = r#"
            INSERT INTO books (title, author, genre, year)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, author, genre, year, created_at, updated_at
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![
                    input.title.clone(),
                    input.author.clone(),
                    input.genre.clone(),
                    input.year
                ],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(self.row_to_book(&row)?)
        } else {
            anyhow::bail!("Failed to create book")
        }
    }

    pub async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let query = r#"
            SELECT id, title, author, genre, year, created_at, updated_at
            FROM books WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_book(&row)?))
        } else {
            Ok(None)
        }
    }

    /// One page of the catalog, in id order. With a term, only rows where
    /// the title, author, genre, or year (compared as text) contains the
    /// term. An empty term matches every row.
    pub async fn list_books(&self, limit: u64, offset: u64, term: Option<&str>) -> Result<Vec<Book>> {
        let page_of_books = r#"
            SELECT id, title, author, genre, year, created_at, updated_at
            FROM books
            ORDER BY id
            LIMIT ? OFFSET ?
        "#;

        let search_books = r#"
            SELECT id, title, author, genre, year, created_at, updated_at
            FROM books
            WHERE title LIKE ? OR author LIKE ? OR genre LIKE ? OR CAST(year AS TEXT) LIKE ?
            ORDER BY id
            LIMIT ? OFFSET ?
        "#;

        let mut rows = if let Some(term) = term {
            let pattern = format!("%{}%", term);
            self.conn
                .query(
                    search_books,
                    (
                        pattern.clone(),
                        pattern.clone(),
                        pattern.clone(),
                        pattern,
                        limit as i64,
                        offset as i64,
                    ),
                )
                .await?
        } else {
            self.conn
                .query(page_of_books, (limit as i64, offset as i64))
                .await?
        };

        let mut books = Vec::new();
        while let Some(row) = rows.next().await? {
            books.push(self.row_to_book(&row)?);
        }

        Ok(books)
    }

    /// Total number of rows the given term matches (all rows without one).
    pub async fn count_books(&self, term: Option<&str>) -> Result<u64> {
        let mut rows = if let Some(term) = term {
            let query = r#"
                SELECT COUNT(*)
                FROM books
                WHERE title LIKE ? OR author LIKE ? OR genre LIKE ? OR CAST(year AS TEXT) LIKE ?
            "#;
            let pattern = format!("%{}%", term);
            self.conn
                .query(query, (pattern.clone(), pattern.clone(), pattern.clone(), pattern))
                .await?
        } else {
            self.conn.query("SELECT COUNT(*) FROM books", ()).await?
        };

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0)?;
            Ok(count as u64)
        } else {
            anyhow::bail!("Failed to count books")
        }
    }

    pub async fn update_book(&self, id: i64, input: &NewBook) -> Result<Option<Book>> {
        if self.get_book(id).await?.is_none() {
            return Ok(None);
        }

        let query = r#"
            UPDATE books
            SET title = ?, author = ?, genre = ?, year = ?,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = ?
        "#;

        self.conn
            .execute(
                query,
                libsql::params![
                    input.title.clone(),
                    input.author.clone(),
                    input.genre.clone(),
                    input.year,
                    id
                ],
            )
            .await?;

        self.get_book(id).await
    }

    /// Removes the book and returns it, so callers can name what was
    /// deleted. None when the id was already gone.
    pub async fn delete_book(&self, id: i64) -> Result<Option<Book>> {
        let book = match self.get_book(id).await? {
            Some(book) => book,
            None => return Ok(None),
        };

        self.conn
            .execute("DELETE FROM books WHERE id = ?", libsql::params![id])
            .await?;

        Ok(Some(book))
    }

    fn row_to_book(&self, row: &libsql::Row) -> Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            genre: row.get(3)?,
            year: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}
