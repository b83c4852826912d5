//! # Core Traits (Ports)
//!
//! The pipeline only ever sees `Clock`. Persistence and media storage are
//! owned by the boundary layer; any plugin must implement these traits to be
//! used by the binary.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::ComplaintRecord;

/// Single source of wall-clock time for timestamps and report IDs.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Data persistence contract for generated complaints.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ReportRepo: Send + Sync {
    /// Inserts one row and returns its row ID.
    /// A duplicate `report_id` fails with `AppError::Conflict`.
    async fn save(&self, record: &ComplaintRecord) -> Result<i64>;
    async fn get(&self, report_id: &str) -> Result<Option<ComplaintRecord>>;
    /// Newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<ComplaintRecord>>;
}

/// Media storage contract for uploaded evidence images.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Saves raw bytes and returns a media_id.
    async fn save_upload(&self, data: Vec<u8>, content_type: &str) -> Result<String>;
    /// Returns the URL or path to the original media.
    async fn get_url(&self, media_id: &str) -> String;
    /// Returns the URL or path to the thumbnail.
    async fn get_thumbnail_url(&self, media_id: &str) -> String;
}
