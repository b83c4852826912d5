//! Multipart form parsing and boundary validation.
//!
//! Everything the pipeline receives has been checked here: the label is a
//! bare, non-empty filename and coordinates are finite and in range.

use actix_multipart::{Field, Multipart};
use cr_core::error::{AppError, Result};
use cr_core::models::Location;
use futures_util::TryStreamExt;

const MAX_TEXT_FIELD_BYTES: usize = 1024;
const MAX_ADDRESS_CHARS: usize = 200;

pub const DEFAULT_UPLOAD_ADDRESS: &str = "Location captured";
pub const DEFAULT_UPLOAD_WARD: &str = "Auto-detected";
pub const DEFAULT_UPLOAD_ACCURACY: &str = "±10 meters";

/// A parsed report submission.
#[derive(Debug)]
pub struct UploadForm {
    /// Bare filename, used as the classification label
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl UploadForm {
    pub async fn from_multipart(mut payload: Multipart, max_upload_bytes: usize) -> Result<Self> {
        let mut file: Option<(String, String, Vec<u8>)> = None;
        let mut latitude = None;
        let mut longitude = None;
        let mut address = None;

        while let Some(mut field) = payload.try_next().await.map_err(invalid)? {
            let name = field
                .content_disposition()
                .get_name()
                .unwrap_or_default()
                .to_string();

            match name.as_str() {
                "file" => {
                    let filename = field
                        .content_disposition()
                        .get_filename()
                        .map(bare_filename)
                        .unwrap_or_default();
                    let content_type = field
                        .content_type()
                        .map(|mime| mime.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    let data = read_field(&mut field, max_upload_bytes, "file").await?;
                    file = Some((filename, content_type, data));
                }
                "latitude" => {
                    let raw = read_text(&mut field, "latitude").await?;
                    latitude = parse_coordinate("latitude", &raw, 90.0)?;
                }
                "longitude" => {
                    let raw = read_text(&mut field, "longitude").await?;
                    longitude = parse_coordinate("longitude", &raw, 180.0)?;
                }
                "address" => {
                    let raw = read_text(&mut field, "address").await?;
                    address = sanitize_address(&raw);
                }
                other => {
                    log::debug!("ignoring form field {:?}", other);
                    while field.try_next().await.map_err(invalid)?.is_some() {}
                }
            }
        }

        let (filename, content_type, data) =
            file.ok_or_else(|| AppError::ValidationError("file is required".into()))?;
        if filename.is_empty() {
            return Err(AppError::ValidationError("uploaded file has no name".into()));
        }
        if data.is_empty() {
            return Err(AppError::ValidationError("uploaded file is empty".into()));
        }

        Ok(Self {
            filename,
            content_type,
            data,
            latitude,
            longitude,
            address,
        })
    }

    /// A location exists only when both coordinates were submitted.
    pub fn location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Location {
                latitude: Some(lat),
                longitude: Some(lng),
                address: Some(
                    self.address
                        .clone()
                        .unwrap_or_else(|| DEFAULT_UPLOAD_ADDRESS.to_string()),
                ),
                ward: Some(DEFAULT_UPLOAD_WARD.to_string()),
                accuracy: Some(DEFAULT_UPLOAD_ACCURACY.to_string()),
            }),
            _ => None,
        }
    }
}

fn invalid(err: actix_multipart::MultipartError) -> AppError {
    AppError::ValidationError(format!("malformed multipart body: {err}"))
}

async fn read_field(field: &mut Field, limit: usize, name: &str) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(invalid)? {
        if data.len() + chunk.len() > limit {
            return Err(AppError::ValidationError(format!(
                "{name} exceeds {limit} bytes"
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String> {
    let data = read_field(field, MAX_TEXT_FIELD_BYTES, name).await?;
    String::from_utf8(data)
        .map_err(|_| AppError::ValidationError(format!("{name} is not valid UTF-8")))
}

/// Browsers on some platforms send the full client path.
pub fn bare_filename(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Empty input means "not supplied".
pub fn parse_coordinate(name: &str, raw: &str, bound: f64) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::ValidationError(format!("{name} must be a number")))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(AppError::ValidationError(format!(
            "{name} must be between -{bound} and {bound}"
        )));
    }
    Ok(Some(value))
}

pub fn sanitize_address(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_ADDRESS_CHARS)
        .collect();
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_client_paths() {
        assert_eq!(bare_filename("C:\\fakepath\\pothole.jpg"), "pothole.jpg");
        assert_eq!(bare_filename("photos/2026/trash.png"), "trash.png");
        assert_eq!(bare_filename("lamp.jpg"), "lamp.jpg");
        assert_eq!(bare_filename("dir/"), "");
    }

    #[test]
    fn coordinates() {
        assert_eq!(parse_coordinate("latitude", " 17.385 ", 90.0).unwrap(), Some(17.385));
        assert_eq!(parse_coordinate("latitude", "", 90.0).unwrap(), None);
        assert!(parse_coordinate("latitude", "91", 90.0).is_err());
        assert!(parse_coordinate("longitude", "-180.5", 180.0).is_err());
        assert!(parse_coordinate("longitude", "NaN", 180.0).is_err());
        assert!(parse_coordinate("longitude", "east", 180.0).is_err());
    }

    #[test]
    fn addresses() {
        assert_eq!(sanitize_address("  MG Road\r\n"), Some("MG Road".to_string()));
        assert_eq!(sanitize_address(" \t "), None);
        assert_eq!(sanitize_address(&"x".repeat(500)).unwrap().len(), MAX_ADDRESS_CHARS);
    }

    fn form(latitude: Option<f64>, longitude: Option<f64>, address: Option<&str>) -> UploadForm {
        UploadForm {
            filename: "pothole.jpg".into(),
            content_type: "image/jpeg".into(),
            data: vec![1],
            latitude,
            longitude,
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn location_requires_both_coordinates() {
        assert!(form(Some(1.0), None, None).location().is_none());
        assert!(form(None, Some(1.0), Some("x")).location().is_none());

        let location = form(Some(12.0), Some(77.0), None).location().unwrap();
        assert_eq!(location.address.as_deref(), Some("Location captured"));
        assert_eq!(location.ward.as_deref(), Some("Auto-detected"));
        assert_eq!(location.accuracy.as_deref(), Some("±10 meters"));

        let location = form(Some(0.0), Some(0.0), Some("Null Island")).location().unwrap();
        assert_eq!(location.latitude, Some(0.0));
        assert_eq!(location.address.as_deref(), Some("Null Island"));
    }
}
