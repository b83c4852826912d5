//! # cr-storage-local
//!
//! Local filesystem implementation of `MediaStore` for uploaded evidence.
//! Features: Content-addressable storage, directory sharding, and thumbnailing.

use async_trait::async_trait;
use cr_core::error::{AppError, Result};
use cr_core::traits::MediaStore;
use image::ImageReader;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::fs;

const THUMBNAIL_EDGE: u32 = 250;

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g., "./data/uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/static/uploads")
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        let url_prefix = url_prefix.trim_end_matches('/').to_string();
        Self { root_path: root, url_prefix }
    }

    /// Generates a sharded path: "ab/cd/abcd...hash"
    fn get_sharded_path(&self, hash: &str) -> PathBuf {
        let mut path = self.root_path.clone();
        path.push(&hash[0..2]);
        path.push(&hash[2..4]);
        path.push(hash);
        path
    }

    /// "ab/cd/thumb_abcd...hash.webp", next to the original
    fn get_thumbnail_path(&self, hash: &str) -> PathBuf {
        let mut path = self.root_path.clone();
        path.push(&hash[0..2]);
        path.push(&hash[2..4]);
        path.push(format!("thumb_{}.webp", hash));
        path
    }

    /// Generates a 250px WebP thumbnail next to the original.
    /// Runs on the blocking pool; decoding is CPU-bound.
    async fn generate_thumbnail(&self, data: Vec<u8>, hash: &str) -> Result<()> {
        let thumb_path = self.get_thumbnail_path(hash);
        tokio::task::spawn_blocking(move || -> std::result::Result<(), image::ImageError> {
            let img = ImageReader::new(Cursor::new(data))
                .with_guessed_format()?
                .decode()?;
            img.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE)
                .save_with_format(thumb_path, image::ImageFormat::WebP)
        })
        .await
        .map_err(|e| AppError::Internal(format!("thumbnail task: {e}")))?
        .map_err(|e| AppError::Internal(format!("thumbnail: {e}")))
    }
}

/// Media IDs are lowercase hex SHA-256 digests; anything else would escape
/// the sharded layout.
fn is_media_id(media_id: &str) -> bool {
    media_id.len() == 64 && media_id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    /// Saves an upload using its SHA-256 hash as the filename.
    /// This automatically deduplicates files. A thumbnail is attempted for
    /// every new file; uploads that are not decodable images are kept without one.
    async fn save_upload(&self, data: Vec<u8>, content_type: &str) -> Result<String> {
        let hash = format!("{:x}", Sha256::digest(&data));

        let target_path = self.get_sharded_path(&hash);
        let parent = target_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| AppError::Internal("upload path has no parent".into()))?;

        fs::create_dir_all(&parent).await?;

        if fs::try_exists(&target_path).await? {
            log::debug!("upload {} already stored", hash);
            return Ok(hash);
        }

        fs::write(&target_path, &data).await?;
        log::info!("stored upload {} ({} bytes, {})", hash, data.len(), content_type);

        if let Err(err) = self.generate_thumbnail(data, &hash).await {
            log::warn!("no thumbnail for {}: {}", hash, err);
        }

        Ok(hash)
    }

    async fn get_url(&self, media_id: &str) -> String {
        if !is_media_id(media_id) {
            return String::new();
        }
        let rel_path = format!("{}/{}/{}", &media_id[0..2], &media_id[2..4], media_id);
        format!("{}/{}", self.url_prefix, rel_path)
    }

    /// Empty when no thumbnail was generated (the upload was not a decodable image).
    async fn get_thumbnail_url(&self, media_id: &str) -> String {
        if !is_media_id(media_id) {
            return String::new();
        }
        if !fs::try_exists(self.get_thumbnail_path(media_id)).await.unwrap_or(false) {
            return String::new();
        }
        let rel_path = format!("{}/{}/thumb_{}.webp", &media_id[0..2], &media_id[2..4], media_id);
        format!("{}/{}", self.url_prefix, rel_path)
    }
}
