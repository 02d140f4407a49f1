//! Blob key layout and filename helpers.

use uuid::Uuid;

/// Prefix under which every uploaded blob is stored.
pub const BLOB_PREFIX: &str = "files";

/// Longest filename kept in a blob key.
const MAX_FILENAME_LEN: usize = 200;

/// Storage key for a blob: `files/<uuid>/<sanitized name>`.
///
/// A fresh `blob_id` per upload keeps replaced blobs from colliding with
/// the ones they replace.
pub fn blob_path(blob_id: Uuid, filename: &str) -> String {
    format!("{BLOB_PREFIX}/{blob_id}/{}", sanitize_filename(filename))
}

/// Reduce a client-supplied filename to a single safe path segment.
pub fn sanitize_filename(filename: &str) -> String {
    // Browsers on Windows may send the full client path.
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        return "upload".to_string();
    }
    cleaned.chars().take(MAX_FILENAME_LEN).collect()
}

/// Guess MIME type from a file name's extension.
pub fn mime_from_filename(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let mime = match ext.to_lowercase().as_str() {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime.to_string())
}
