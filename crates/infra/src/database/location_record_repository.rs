//! SQLite-backed location record repository.
//!
//! Implements the async `LocationRecordRepository` port. All queries operate
//! on the shared connection pool provided by `DbManager`; blocking SQLite
//! work hops through `spawn_blocking` so callers never stall the runtime.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use proxima_core::tracking::ports::LocationRecordRepository;
use proxima_domain::{LocationRecord, Position, ProximaError, Result, UserId};
use rusqlite::{params, Connection, Row};
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

const INSERT_RECORD_SQL: &str = "INSERT INTO location_records (
        id, owner_id, latitude, longitude, comment, captured_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const RECORDS_FOR_OWNER_SQL: &str = "SELECT id, owner_id, latitude, longitude, comment, captured_at
    FROM location_records
    WHERE owner_id = ?1";

// Descending capture order is contractual: bounded consumers must see the
// newest records first.
const RECORDS_SINCE_SQL: &str = "SELECT id, owner_id, latitude, longitude, comment, captured_at
    FROM location_records
    WHERE captured_at > ?1
    ORDER BY captured_at DESC";

const DELETE_BEFORE_SQL: &str = "DELETE FROM location_records WHERE captured_at < ?1";

/// Async location record repository backed by SQLite.
pub struct SqliteLocationRecordRepository {
    db: Arc<DbManager>,
}

impl SqliteLocationRecordRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocationRecordRepository for SqliteLocationRecordRepository {
    async fn records_for_owner(&self, owner: &UserId) -> Result<Vec<LocationRecord>> {
        let db = Arc::clone(&self.db);
        let owner = owner.clone();
        task::spawn_blocking(move || -> Result<Vec<LocationRecord>> {
            let conn = db.get_connection()?;
            query_records(&conn, RECORDS_FOR_OWNER_SQL, params![owner.as_str()])
        })
        .await
        .map_err(map_join_error)?
    }

    async fn records_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<LocationRecord>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Vec<LocationRecord>> {
            let conn = db.get_connection()?;
            query_records(&conn, RECORDS_SINCE_SQL, params![cutoff.timestamp()])
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_record(&self, record: LocationRecord) -> Result<()> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_RECORD_SQL,
                params![
                    record.id,
                    record.owner.as_str(),
                    record.position.latitude,
                    record.position.longitude,
                    record.comment,
                    record.captured_at.timestamp(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_records_before(&self, before: DateTime<Utc>) -> Result<usize> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<usize> {
            let conn = db.get_connection()?;
            conn.execute(DELETE_BEFORE_SQL, params![before.timestamp()]).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn query_records<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<LocationRecord>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let rows = stmt.query_map(params, map_record_row).map_err(map_sql_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
}

fn map_record_row(row: &Row<'_>) -> rusqlite::Result<LocationRecord> {
    let captured_ts: i64 = row.get(5)?;
    let captured_at = DateTime::<Utc>::from_timestamp(captured_ts, 0)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(5, captured_ts))?;

    Ok(LocationRecord {
        id: row.get(0)?,
        owner: UserId::from(row.get::<_, String>(1)?),
        position: Position::new(row.get(2)?, row.get(3)?),
        comment: row.get(4)?,
        captured_at,
    })
}

fn map_sql_error(err: rusqlite::Error) -> ProximaError {
    ProximaError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> ProximaError {
    if err.is_cancelled() {
        ProximaError::Internal("blocking record repository task cancelled".into())
    } else {
        ProximaError::Internal(format!("blocking record repository task failed: {err}"))
    }
}
