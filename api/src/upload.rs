use crate::error::ApiError;
use axum::extract::Multipart;

/// The single file of an upload form, with its declared media type.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Reads the `file` field of a multipart upload; other fields are drained and ignored.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::Multipart {
        status: e.status(),
        message: format!("Failed to read form field: {}", e.body_text()),
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" && file.is_none() {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let media_type = field.content_type().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Multipart {
                    status: e.status(),
                    message: format!("Failed to read file data: {}", e.body_text()),
                })?
                .to_vec();

            file = Some(UploadedFile {
                filename,
                media_type,
                data,
            });
        } else {
            field.bytes().await.map_err(|e| ApiError::Multipart {
                status: e.status(),
                message: format!("Failed to read form field: {}", e.body_text()),
            })?;
        }
    }

    file.ok_or(ApiError::MissingFile)
}
