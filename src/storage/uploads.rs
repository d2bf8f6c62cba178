use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use crate::http::multipart::{self, UploadEntry};

/// Writes an accepted upload into the uploads directory, creating the
/// directory if absent and overwriting any existing file of the same name.
///
/// The filename is used as given; it is not sanitized. Concurrent writers
/// of the same name race, last write wins.
pub async fn save(dir: &Path, entry: &UploadEntry) -> std::io::Result<()> {
    fs::create_dir_all(dir).await?;
    fs::write(dir.join(&entry.file_name), &entry.payload).await
}

/// Lists stored image filenames in directory order, filtered by the image
/// extension allow-list. A missing directory yields an empty list.
pub async fn list_images(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if multipart::has_image_extension(&name) {
            names.push(name);
        }
    }

    Ok(names)
}
