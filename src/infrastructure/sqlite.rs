// src/infrastructure/sqlite.rs
use crate::application::DataApi;
use crate::domain::{CreateNoteInput, DomainError, Note, NoteId, UpdateNoteInput};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id          TEXT PRIMARY KEY NOT NULL,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    image       TEXT
);
";

/// Data API backed by a local SQLite file, standing in for the managed
/// service during development
pub struct SqliteDataApi {
    conn: Connection,
}

impl SqliteDataApi {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        let api = Self::with_connection(conn)?;
        info!(?path, "Opened local notes database");
        Ok(api)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to create notes schema")?;
        Ok(Self { conn })
    }

    fn get(&self, id: &NoteId) -> Result<Option<Note>, DomainError> {
        self.conn
            .query_row(
                "SELECT id, name, description, image FROM notes WHERE id = ?1",
                params![id.as_str()],
                row_to_note,
            )
            .optional()
            .map_err(db_error)
    }
}

fn row_to_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: NoteId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        image: row.get(3)?,
    })
}

fn db_error(e: rusqlite::Error) -> DomainError {
    DomainError::Api(format!("Local database error: {}", e))
}

impl DataApi for SqliteDataApi {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description, image FROM notes ORDER BY rowid")
            .map_err(db_error)?;
        let notes = stmt
            .query_map([], row_to_note)
            .map_err(db_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_error)?;
        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    fn create_note(&self, input: &CreateNoteInput) -> Result<Note, DomainError> {
        let id = NoteId::new(Uuid::new_v4().to_string());
        self.conn
            .execute(
                "INSERT INTO notes (id, name, description, image) VALUES (?1, ?2, ?3, ?4)",
                params![id.as_str(), input.name, input.description, input.image],
            )
            .map_err(db_error)?;
        Ok(Note {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn update_note(&self, input: &UpdateNoteInput) -> Result<Note, DomainError> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes SET name = ?2, description = ?3, image = ?4 WHERE id = ?1",
                params![input.id.as_str(), input.name, input.description, input.image],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return Err(DomainError::NotFound(input.id.to_string()));
        }
        self.get(&input.id)?
            .ok_or_else(|| DomainError::NotFound(input.id.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id.as_str()])
            .map_err(db_error)?;
        if changed == 0 {
            debug!(note_id = %id, "Note not found for deletion");
            return Err(DomainError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
