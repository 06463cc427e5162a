use std::io::Read;

use tiny_http::Request;

use crate::util::filename::{allowed_file, secure_filename};
use crate::util::multipart::{extract_boundary, file_part, parse_parts, text_field};

/// Color counts the form offers; anything else falls back to `DEFAULT_COLORS`.
pub const MIN_COLORS: usize = 2;
pub const MAX_COLORS: usize = 10;
pub const DEFAULT_COLORS: usize = 3;

/// A validated image upload.
#[derive(Debug)]
pub struct Upload {
    /// Sanitized client filename.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub n_colors: usize,
}

/// Why an upload was turned away before any image work started.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadError {
    NotMultipart,
    TooLarge { limit_mb: usize },
    NoFile,
    UnsupportedType,
    /// The body could not be read to the end, e.g. the client went away.
    ReadFailed,
}

impl UploadError {
    pub fn status(&self) -> u16 {
        match self {
            UploadError::TooLarge { .. } => 413,
            _ => 400,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UploadError::NotMultipart => "Invalid upload request.".to_owned(),
            UploadError::TooLarge { limit_mb } => format!("File exceeds the {limit_mb} MB limit."),
            UploadError::NoFile => "No file selected.".to_owned(),
            UploadError::UnsupportedType => {
                "Unsupported file type. Please upload a PNG, JPG, JPEG, GIF or BMP file.".to_owned()
            }
            UploadError::ReadFailed => "The upload could not be read completely.".to_owned(),
        }
    }
}

/// Reads the request body (at most `max_bytes`) and validates it as an upload.
pub fn read_upload(request: &mut Request, max_bytes: usize) -> Result<Upload, UploadError> {
    let limit_mb = max_bytes / (1024 * 1024);

    if request.body_length().is_some_and(|len| len > max_bytes) {
        return Err(UploadError::TooLarge { limit_mb });
    }

    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let body = read_body(request.as_reader(), max_bytes)?;
    parse_upload(&content_type, &body)
}

/// Reads at most `max_bytes` from `reader`; one byte more means the body is
/// too large.
pub fn read_body<R: Read + ?Sized>(reader: &mut R, max_bytes: usize) -> Result<Vec<u8>, UploadError> {
    let mut body: Vec<u8> = Vec::new();
    reader
        .take(max_bytes as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| {
            log::warn!("failed to read upload body: {e}");
            UploadError::ReadFailed
        })?;
    if body.len() > max_bytes {
        return Err(UploadError::TooLarge { limit_mb: max_bytes / (1024 * 1024) });
    }
    Ok(body)
}

/// Validates a multipart body: a non-empty `file` part with an allowed
/// extension, plus an optional `n_colors` field.
pub fn parse_upload(content_type: &str, body: &[u8]) -> Result<Upload, UploadError> {
    if !content_type.starts_with("multipart/form-data") {
        return Err(UploadError::NotMultipart);
    }
    let boundary = extract_boundary(content_type).ok_or(UploadError::NotMultipart)?;
    let parts = parse_parts(body, &boundary);

    let file = file_part(&parts, "file").ok_or(UploadError::NoFile)?;
    let raw_name = file.filename.as_deref().unwrap_or("");
    if raw_name.is_empty() {
        return Err(UploadError::NoFile);
    }
    if !allowed_file(raw_name) {
        return Err(UploadError::UnsupportedType);
    }
    if file.data.is_empty() {
        return Err(UploadError::NoFile);
    }

    Ok(Upload {
        file_name: secure_filename(raw_name),
        bytes: file.data.to_vec(),
        n_colors: parse_color_count(text_field(&parts, "n_colors").as_deref()),
    })
}

/// `n_colors` within `MIN_COLORS..=MAX_COLORS`, or `DEFAULT_COLORS`.
pub fn parse_color_count(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| (MIN_COLORS..=MAX_COLORS).contains(n))
        .unwrap_or(DEFAULT_COLORS)
}
