//! # cr-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite `complaints`
//! table and the `cr-core` persistence record.

use std::str::FromStr;

use async_trait::async_trait;
use cr_core::error::{AppError, Result};
use cr_core::models::ComplaintRecord;
use cr_core::traits::ReportRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS complaints (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id           TEXT NOT NULL UNIQUE,
    issue_type          TEXT NOT NULL,
    category            TEXT NOT NULL,
    confidence          REAL NOT NULL,
    severity            TEXT NOT NULL,
    priority            TEXT NOT NULL,
    latitude            REAL,
    longitude           REAL,
    address             TEXT,
    resolution_timeline TEXT NOT NULL,
    department          TEXT NOT NULL,
    complaint_text      TEXT NOT NULL
)";

const COLUMNS: &str = "report_id, issue_type, category, confidence, severity, priority, \
    latitude, longitude, address, resolution_timeline, department, complaint_text";

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    /// Connects (creating the database file if needed) and ensures the schema exists.
    ///
    /// An in-memory URL is pinned to a single connection, otherwise every
    /// pooled connection would see its own empty database.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(db_error)?
            .create_if_missing(true);
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        sqlx::query(SCHEMA).execute(&pool).await.map_err(db_error)?;
        log::info!("complaints store ready at {}", database_url);
        Ok(Self { pool })
    }
}

fn db_error(err: sqlx::Error) -> AppError {
    AppError::Internal(format!("database: {err}"))
}

fn row_to_record(row: &SqliteRow) -> std::result::Result<ComplaintRecord, sqlx::Error> {
    Ok(ComplaintRecord {
        report_id: row.try_get("report_id")?,
        issue_type: row.try_get("issue_type")?,
        category: row.try_get("category")?,
        confidence: row.try_get("confidence")?,
        severity: row.try_get("severity")?,
        priority: row.try_get("priority")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        address: row.try_get("address")?,
        resolution_timeline: row.try_get("resolution_timeline")?,
        department: row.try_get("department")?,
        complaint_text: row.try_get("complaint_text")?,
    })
}

#[async_trait]
impl ReportRepo for SqliteReportRepo {
    async fn save(&self, record: &ComplaintRecord) -> Result<i64> {
        let sql = format!(
            "INSERT INTO complaints ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        let result = sqlx::query(&sql)
            .bind(&record.report_id)
            .bind(&record.issue_type)
            .bind(&record.category)
            .bind(record.confidence)
            .bind(&record.severity)
            .bind(&record.priority)
            .bind(record.latitude)
            .bind(record.longitude)
            .bind(&record.address)
            .bind(&record.resolution_timeline)
            .bind(&record.department)
            .bind(&record.complaint_text)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                log::warn!("duplicate report id {}", record.report_id);
                Err(AppError::Conflict(format!(
                    "report {} already exists",
                    record.report_id
                )))
            }
            Err(err) => Err(db_error(err)),
        }
    }

    async fn get(&self, report_id: &str) -> Result<Option<ComplaintRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM complaints WHERE report_id = ?");
        let row = sqlx::query(&sql)
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(row_to_record).transpose().map_err(db_error)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ComplaintRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM complaints ORDER BY id DESC LIMIT ?");
        let rows = sqlx::query(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter()
            .map(row_to_record)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(report_id: &str) -> ComplaintRecord {
        ComplaintRecord {
            report_id: report_id.into(),
            issue_type: "Pothole".into(),
            category: "road_infrastructure".into(),
            confidence: 92.0,
            severity: "High".into(),
            priority: "Critical".into(),
            latitude: Some(17.385),
            longitude: Some(78.4867),
            address: None,
            resolution_timeline: "24 hours".into(),
            department: "Roads & Highways Department".into(),
            complaint_text: "complaint body".into(),
        }
    }

    #[tokio::test]
    async fn test_save_and_get_complaint() {
        let repo = SqliteReportRepo::new("sqlite::memory:").await.unwrap();

        let id = repo.save(&record("CIV20260305210742")).await.expect("Failed to save");
        assert!(id > 0);

        let fetched = repo.get("CIV20260305210742").await.unwrap();
        assert_eq!(fetched, Some(record("CIV20260305210742")));
        assert!(repo.get("CIV19990101000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_report_id_is_conflict() {
        let repo = SqliteReportRepo::new("sqlite::memory:").await.unwrap();
        repo.save(&record("CIV20260305210742")).await.unwrap();

        let err = repo.save(&record("CIV20260305210742")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let repo = SqliteReportRepo::new("sqlite::memory:").await.unwrap();
        for second in 0..3 {
            repo.save(&record(&format!("CIV2026030521074{second}"))).await.unwrap();
        }

        let recent = repo.list_recent(2).await.unwrap();
        let ids: Vec<_> = recent.iter().map(|r| r.report_id.as_str()).collect();
        assert_eq!(ids, ["CIV20260305210742", "CIV20260305210741"]);
    }
}
