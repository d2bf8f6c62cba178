//! Naive `multipart/form-data` parsing for image uploads.
//!
//! The body is split on the literal `--<boundary>` delimiter. This is not
//! robust to the boundary value appearing inside binary payload bytes; the
//! algorithm is kept behind this module so a stricter streaming parser
//! could replace it without touching the connection handler.

/// File extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "gif", "png"];

/// One file entry extracted from a multipart body.
///
/// Entries are consumed immediately after parsing: accepted ones are
/// written to the uploads directory, rejected ones are dropped. A rejected
/// entry carries an empty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    /// Filename taken verbatim from the Content-Disposition parameter
    pub file_name: String,
    /// Raw payload bytes, preserved exactly as received
    pub payload: Vec<u8>,
    /// Whether the filename passed the extension allow-list
    pub accepted: bool,
}

/// Extracts the boundary token from a multipart Content-Type header value.
/// Everything after the first `boundary=` is taken as the token.
pub fn boundary(content_type: &str) -> Option<&str> {
    let (_, token) = content_type.split_once("boundary=")?;
    if token.is_empty() { None } else { Some(token) }
}

/// Splits a multipart body on `--<boundary>` and extracts one entry per
/// segment that names a file. Segments without a header/body separator or
/// with an empty content region are skipped, not fatal.
pub fn parse(body: &[u8], boundary: &str) -> Vec<UploadEntry> {
    let delimiter = format!("--{}", boundary).into_bytes();

    split_on(body, &delimiter)
        .into_iter()
        .filter_map(parse_segment)
        .collect()
}

/// Tests a filename against the image-extension allow-list.
pub fn has_image_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

fn parse_segment(segment: &[u8]) -> Option<UploadEntry> {
    let marker = b"filename=\"";
    let name_start = find(segment, marker)? + marker.len();
    let name_len = segment[name_start..].iter().position(|&b| b == b'"')?;
    let file_name =
        String::from_utf8_lossy(&segment[name_start..name_start + name_len]).into_owned();

    if !has_image_extension(&file_name) {
        return Some(UploadEntry {
            file_name,
            payload: Vec::new(),
            accepted: false,
        });
    }

    // Content spans from after the first blank line to the segment's last
    // line terminator (the one preceding the next boundary marker).
    let header_end = find(segment, b"\r\n\r\n")?;
    let content_start = header_end + 4;
    let content_end = rfind(segment, b"\r\n")?;
    if content_end <= content_start {
        return None;
    }

    Some(UploadEntry {
        file_name,
        payload: segment[content_start..content_end].to_vec(),
        accepted: true,
    })
}

fn split_on<'a>(haystack: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut rest = haystack;

    while let Some(idx) = find(rest, delimiter) {
        segments.push(&rest[..idx]);
        rest = &rest[idx + delimiter.len()..];
    }
    segments.push(rest);

    segments
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_image_part() {
        let body = b"--XX\r\n\
                     Content-Disposition: form-data; name=\"file\"; filename=\"cat.png\"\r\n\
                     Content-Type: image/png\r\n\
                     \r\n\
                     PNGDATA\r\n\
                     --XX--\r\n";

        let entries = parse(body, "XX");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "cat.png");
        assert_eq!(entries[0].payload, b"PNGDATA");
        assert!(entries[0].accepted);
    }
}
