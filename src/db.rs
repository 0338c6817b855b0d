use camino::Utf8Path;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, params};
use serde::Serialize;
use serde_json::Value;

use crate::domain::ArtifactCollections;
use crate::error::HarvardError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS artifact_metadata (
    id INTEGER PRIMARY KEY,
    title TEXT,
    culture TEXT,
    period TEXT,
    century TEXT,
    medium TEXT,
    dimensions TEXT,
    description TEXT,
    department TEXT,
    classification TEXT,
    accessionyear INTEGER,
    accessionmethod TEXT
);
CREATE TABLE IF NOT EXISTS artifact_media (
    objectid INTEGER,
    imagecount INTEGER,
    mediacount INTEGER,
    colorcount INTEGER,
    rank INTEGER,
    datebegin INTEGER,
    dateend INTEGER,
    FOREIGN KEY (objectid) REFERENCES artifact_metadata(id)
);
CREATE TABLE IF NOT EXISTS artifact_colors (
    objectid INTEGER,
    color TEXT,
    spectrum TEXT,
    hue TEXT,
    percent REAL,
    css3 TEXT,
    FOREIGN KEY (objectid) REFERENCES artifact_metadata(id)
);
";

#[derive(Debug, Clone, Serialize)]
pub struct InsertResult {
    pub metadata_rows: usize,
    pub media_rows: usize,
    pub color_rows: usize,
}

/// Tabular result of one catalog query, returned verbatim to the
/// presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the snapshot database and make sure the three
    /// relations exist. Existing schema is left untouched.
    pub fn open(path: &Utf8Path) -> Result<Self, HarvardError> {
        let conn = Connection::open(path.as_std_path())?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, HarvardError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Replace the contents of all three relations with the given collections.
    /// Destructive overwrite, not an append: a single transaction deletes the
    /// prior snapshot and inserts the new one, so an error leaves the prior
    /// state intact.
    pub fn replace_collections(
        &mut self,
        collections: &ArtifactCollections,
    ) -> Result<InsertResult, HarvardError> {
        let tx = self.conn.transaction()?;
        {
            tx.execute("DELETE FROM artifact_metadata", [])?;
            tx.execute("DELETE FROM artifact_media", [])?;
            tx.execute("DELETE FROM artifact_colors", [])?;

            let mut insert_metadata = tx.prepare(
                "INSERT INTO artifact_metadata (id, title, culture, period, century, medium, \
                 dimensions, description, department, classification, accessionyear, accessionmethod) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in &collections.metadata {
                insert_metadata.execute(params![
                    row.id,
                    row.title,
                    row.culture,
                    row.period,
                    row.century,
                    row.medium,
                    row.dimensions,
                    row.description,
                    row.department,
                    row.classification,
                    row.accessionyear,
                    row.accessionmethod,
                ])?;
            }

            let mut insert_media = tx.prepare(
                "INSERT INTO artifact_media (objectid, imagecount, mediacount, colorcount, rank, \
                 datebegin, dateend) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in &collections.media {
                insert_media.execute(params![
                    row.objectid,
                    row.imagecount,
                    row.mediacount,
                    row.colorcount,
                    row.rank,
                    row.datebegin,
                    row.dateend,
                ])?;
            }

            let mut insert_color = tx.prepare(
                "INSERT INTO artifact_colors (objectid, color, spectrum, hue, percent, css3) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in &collections.colors {
                insert_color.execute(params![
                    row.objectid,
                    row.color,
                    row.spectrum,
                    row.hue,
                    row.percent,
                    row.css3,
                ])?;
            }
        }
        tx.commit()?;

        Ok(InsertResult {
            metadata_rows: collections.metadata.len(),
            media_rows: collections.media.len(),
            color_rows: collections.colors.len(),
        })
    }

    /// Run one read-only statement, optionally bound to an artifact id, and
    /// collect the full result set.
    pub fn run_query(
        &self,
        sql: &str,
        artifact_id: Option<i64>,
    ) -> Result<QueryResult, HarvardError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let mut collect = |mut rows: rusqlite::Rows<'_>| -> Result<Vec<Vec<Value>>, HarvardError> {
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(columns.len());
                for index in 0..columns.len() {
                    values.push(json_value(row.get_ref(index)?));
                }
                out.push(values);
            }
            Ok(out)
        };

        let rows = match artifact_id {
            Some(id) => collect(stmt.query(params![id])?)?,
            None => collect(stmt.query([])?)?,
        };

        Ok(QueryResult { columns, rows })
    }
}

fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(value) => Value::from(value),
        ValueRef::Real(value) => Value::from(value),
        ValueRef::Text(bytes) => Value::from(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::from(format!("<blob {} bytes>", bytes.len())),
    }
}
