//! MIME type detection from file extensions.

const DEFAULT_MIME: &str = "application/octet-stream";

/// Maps a file name to a MIME type via a fixed extension table.
///
/// Unknown extensions, and names without one, fall back to
/// `application/octet-stream`.
pub fn from_name(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return DEFAULT_MIME;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "png" => "image/png",
        "css" => "text/css",
        "js" => "application/javascript",
        "txt" => "text/plain",
        _ => DEFAULT_MIME,
    }
}
