//! File service for persisting uploaded bootcamp photos.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use actix_web::web::Bytes;
use futures::{Stream, StreamExt};
use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::constants::{
    CODE_FILE_UPLOAD_FAILED, CODE_INTERNAL_ERROR, ERR_FAILED_PROCESS_UPLOAD, ERR_FAILED_READ_FILE,
    ERR_FAILED_SAVE_FILE, ERR_NO_PHOTO_FILE,
};
use crate::errors::ApiError;
use crate::validators::{photo_extension, validate_photo_content_type, validate_photo_size};

/// Multipart field carrying the photo.
pub const PHOTO_FIELD: &str = "file";

/// Service for file operations on the upload directory.
pub struct FileService {
    config: UploadConfig,
}

impl FileService {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_path
    }

    /// Save a bootcamp photo from a multipart upload.
    ///
    /// Reads the `file` field, checks its content type and size, and writes it as
    /// `photo_<bootcamp id><ext>`. Returns the stored file name.
    pub async fn save_photo(
        &self,
        bootcamp_id: &ObjectId,
        payload: &mut Multipart,
    ) -> Result<String, ApiError> {
        while let Some(item) = payload.next().await {
            let field = item.map_err(|e| {
                warn!("Failed to process multipart field: {}", e);
                ApiError::bad_request(CODE_FILE_UPLOAD_FAILED, ERR_FAILED_PROCESS_UPLOAD)
            })?;

            let content_disposition = field.content_disposition();
            let field_name = content_disposition.and_then(|cd| cd.get_name()).unwrap_or("");
            if field_name != PHOTO_FIELD {
                continue;
            }

            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);
            let content_type = field.content_type().map(|ct| ct.to_string());
            validate_photo_content_type(content_type.as_deref())?;

            let file_name = format!(
                "photo_{}{}",
                bootcamp_id.to_hex(),
                photo_extension(original_name.as_deref(), content_type.as_deref())
            );

            self.persist_stream(field, &file_name).await?;
            info!("Stored photo {} for bootcamp {}", file_name, bootcamp_id);
            return Ok(file_name);
        }

        Err(ApiError::bad_request(CODE_FILE_UPLOAD_FAILED, ERR_NO_PHOTO_FILE))
    }

    /// Write a byte stream to `file_name` inside the upload directory.
    ///
    /// Bytes go to a temporary file that is renamed into place once the whole
    /// stream was accepted, so an existing photo is replaced only by a complete one.
    pub async fn persist_stream<S, E>(&self, mut stream: S, file_name: &str) -> Result<PathBuf, ApiError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: fmt::Display,
    {
        let upload_dir = self.upload_dir();
        if !upload_dir.exists() {
            fs::create_dir_all(upload_dir).map_err(|e| {
                warn!("Failed to create upload directory: {}", e);
                save_failed()
            })?;
        }

        let final_path = upload_dir.join(file_name);
        let temp_path = upload_dir.join(format!(".{}.part", Uuid::new_v4()));

        let mut file = fs::File::create(&temp_path).map_err(|e| {
            warn!("Failed to create file: {}", e);
            save_failed()
        })?;

        let mut total_size: usize = 0;
        while let Some(chunk) = stream.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    warn!("Failed to read chunk: {}", e);
                    discard(&temp_path);
                    return Err(ApiError::bad_request(CODE_FILE_UPLOAD_FAILED, ERR_FAILED_READ_FILE));
                }
            };

            total_size += data.len();
            if let Err(e) = validate_photo_size(total_size, self.config.max_file_size) {
                discard(&temp_path);
                return Err(e);
            }

            if let Err(e) = file.write_all(&data) {
                warn!("Failed to write file: {}", e);
                discard(&temp_path);
                return Err(save_failed());
            }
        }
        drop(file);

        fs::rename(&temp_path, &final_path).map_err(|e| {
            warn!("Failed to move upload into place: {}", e);
            discard(&temp_path);
            save_failed()
        })?;

        Ok(final_path)
    }
}

fn save_failed() -> ApiError {
    ApiError::internal(CODE_INTERNAL_ERROR, ERR_FAILED_SAVE_FILE)
}

fn discard(path: &Path) {
    let _ = fs::remove_file(path);
}
