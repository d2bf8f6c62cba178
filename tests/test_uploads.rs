use std::fs;

use snapserve::http::multipart::UploadEntry;
use snapserve::storage::uploads::{list_images, save};
use tempfile::TempDir;

fn entry(name: &str, payload: &[u8]) -> UploadEntry {
    UploadEntry {
        file_name: name.to_string(),
        payload: payload.to_vec(),
        accepted: true,
    }
}

#[tokio::test]
async fn test_save_creates_directory_and_writes_exact_bytes() {
    let dir = TempDir::new().unwrap();
    let uploads = dir.path().join("uploads");

    save(&uploads, &entry("cat.png", b"\x89PNG\x00data")).await.unwrap();

    let written = fs::read(uploads.join("cat.png")).unwrap();
    assert_eq!(written, b"\x89PNG\x00data");
}

#[tokio::test]
async fn test_save_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let uploads = dir.path().to_path_buf();

    save(&uploads, &entry("dog.jpg", b"first")).await.unwrap();
    save(&uploads, &entry("dog.jpg", b"second")).await.unwrap();

    let written = fs::read(uploads.join("dog.jpg")).unwrap();
    assert_eq!(written, b"second");
}

#[tokio::test]
async fn test_list_images_on_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("uploads");

    let names = list_images(&missing).await.unwrap();

    assert!(names.is_empty());
}

#[tokio::test]
async fn test_list_images_filters_by_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.png"), b"png").unwrap();
    fs::write(dir.path().join("b.jpeg"), b"jpeg").unwrap();
    fs::write(dir.path().join("notes.txt"), b"text").unwrap();

    let mut names = list_images(dir.path()).await.unwrap();
    names.sort();

    assert_eq!(names, vec!["a.png".to_string(), "b.jpeg".to_string()]);
}
