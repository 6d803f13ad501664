use rusqlite::Connection;
use std::path::Path;

use crate::error::{LottoError, Result};
use crate::models::{CandidateCombination, PredictionBatch};
use crate::store::PredictionStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS batches (
    batch_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS combinations (
    batch_id    INTEGER NOT NULL REFERENCES batches(batch_id),
    position    INTEGER NOT NULL,
    front_1     INTEGER NOT NULL,
    front_2     INTEGER NOT NULL,
    front_3     INTEGER NOT NULL,
    front_4     INTEGER NOT NULL,
    front_5     INTEGER NOT NULL,
    back_1      INTEGER NOT NULL,
    back_2      INTEGER NOT NULL,
    PRIMARY KEY (batch_id, position)
);
";

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| LottoError::PersistenceWrite(format!("impossible de créer le répertoire {:?} : {}", parent, e)))?;
    }
    let conn = Connection::open(path)?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn insert_batch(conn: &mut Connection, batch: &PredictionBatch) -> Result<i64> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO batches (created_at) VALUES (?1)",
        [batch.timestamp_line()],
    )?;
    let batch_id = tx.last_insert_rowid();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO combinations (batch_id, position, front_1, front_2, front_3, front_4, front_5, back_1, back_2)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for (position, combo) in batch.candidates.iter().enumerate() {
            stmt.execute(rusqlite::params![
                batch_id,
                position as i64,
                combo.front[0],
                combo.front[1],
                combo.front[2],
                combo.front[3],
                combo.front[4],
                combo.back[0],
                combo.back[1],
            ])?;
        }
    }
    tx.commit()?;
    Ok(batch_id)
}

pub fn fetch_batch(conn: &Connection, batch_id: i64) -> Result<Vec<CandidateCombination>> {
    let mut stmt = conn.prepare(
        "SELECT front_1, front_2, front_3, front_4, front_5, back_1, back_2
         FROM combinations WHERE batch_id = ?1 ORDER BY position",
    )?;
    let combos = stmt
        .query_map([batch_id], |row| {
            Ok(CandidateCombination {
                front: [
                    row.get::<_, u8>(0)?,
                    row.get::<_, u8>(1)?,
                    row.get::<_, u8>(2)?,
                    row.get::<_, u8>(3)?,
                    row.get::<_, u8>(4)?,
                ],
                back: [row.get::<_, u8>(5)?, row.get::<_, u8>(6)?],
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(combos)
}

pub fn count_batches(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM batches", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_combinations(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM combinations", [], |row| row.get(0))?;
    Ok(count)
}

/// Stockage équivalent au fichier texte, dans une base SQLite.
pub struct SqliteStore {
    conn: Connection,
    label: String,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_db(path)?;
        migrate(&conn)?;
        Ok(Self {
            conn,
            label: path.display().to_string(),
        })
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        migrate(&conn)?;
        Ok(Self {
            conn,
            label: ":memory:".to_string(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl PredictionStore for SqliteStore {
    fn append(&mut self, batch: &PredictionBatch) -> Result<()> {
        let batch_id = insert_batch(&mut self.conn, batch)
            .map_err(|e| LottoError::PersistenceWrite(e.to_string()))?;
        log::debug!("lot {} enregistré ({} combinaisons)", batch_id, batch.candidates.len());
        Ok(())
    }

    fn name(&self) -> String {
        self.label.clone()
    }
}
