use std::path::Path;

use tokio::fs;

use crate::http::mime;

const INDEX_FILE: &str = "index.html";

/// Outcome of resolving a request target against the base directory.
///
/// `Escape` and `NotFound` both map to a 404 response so that traversal
/// attempts cannot probe for file existence; they are distinguished here
/// only so the handler can log escapes.
#[derive(Debug)]
pub enum Resolution {
    File { body: Vec<u8>, mime: &'static str },
    NotFound,
    Escape,
}

/// Maps a raw request target to a file under `base_dir`.
///
/// A single leading `/` is stripped; an empty target resolves to the index
/// document. The candidate path and the base directory are canonicalized
/// independently, and containment is checked segment-wise so a base of
/// `/srv` can never match `/srv-evil`.
pub async fn resolve(base_dir: &Path, target: &str) -> Resolution {
    let name = target.strip_prefix('/').unwrap_or(target);
    let name = if name.is_empty() || name == "/" {
        INDEX_FILE
    } else {
        name
    };

    let canonical_base = match fs::canonicalize(base_dir).await {
        Ok(path) => path,
        Err(_) => return Resolution::NotFound,
    };
    let canonical = match fs::canonicalize(base_dir.join(name)).await {
        Ok(path) => path,
        Err(_) => return Resolution::NotFound,
    };

    if !canonical.starts_with(&canonical_base) {
        return Resolution::Escape;
    }

    match fs::metadata(&canonical).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Resolution::NotFound,
    }

    match fs::read(&canonical).await {
        Ok(body) => Resolution::File {
            body,
            mime: mime::from_name(name),
        },
        Err(_) => Resolution::NotFound,
    }
}
