//! Content-type labeling from the key's file-extension suffix
//!
//! Purely a response label; the extension plays no part in key identity.

/// Map a filename to the content type served with its blob.
pub fn from_filename(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or_default();
    match ext {
        "jpg" | "jpe" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "img" => "application/x-img",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "zip" => "application/zip",
        "pbf" => "application/pdf",
        "word" => "application/msword",
        _ => "application/octet-stream",
    }
}
