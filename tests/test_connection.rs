use std::fs;
use std::path::Path;

use snapserve::config::Config;
use snapserve::http::connection::Connection;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn test_config(dir: &Path) -> Config {
    Config {
        port: 8080,
        base_dir: dir.to_path_buf(),
        uploads_dir: dir.join("uploads"),
    }
}

/// Drives a full request/response exchange through an in-memory duplex
/// stream, the same way the listener drives a TcpStream.
async fn exchange(config: Config, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(1 << 16);

    let handle = tokio::spawn(async move {
        let mut conn = Connection::new(server, config);
        let _ = conn.run().await;
    });

    client.write_all(request).await.unwrap();
    client.shutdown().await.unwrap();

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    handle.await.unwrap();

    response
}

fn status_line(response: &[u8]) -> String {
    let text = String::from_utf8_lossy(response);
    text.lines().next().unwrap_or_default().to_string()
}

fn body_of(response: &[u8]) -> Vec<u8> {
    let sep = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header/body separator");
    response[sep + 4..].to_vec()
}

fn header_of(response: &[u8], name: &str) -> Option<String> {
    let text = String::from_utf8_lossy(response);
    for line in text.lines().skip(1) {
        if line.is_empty() {
            break;
        }
        if let Some((n, v)) = line.split_once(':') {
            if n.eq_ignore_ascii_case(name) {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn multipart_post(target: &str, file_name: &str, payload: &[u8]) -> Vec<u8> {
    let boundary = "BOUNDARY123";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let mut request = Vec::new();
    request.extend_from_slice(
        format!(
            "POST {} HTTP/1.1\r\nContent-Type: multipart/form-data; boundary={}\r\nContent-Length: {}\r\n\r\n",
            target,
            boundary,
            body.len()
        )
        .as_bytes(),
    );
    request.extend_from_slice(&body);
    request
}

#[tokio::test]
async fn test_get_existing_file_returns_exact_bytes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hello.txt"), b"hello world").unwrap();

    let response = exchange(
        test_config(dir.path()),
        b"GET /hello.txt HTTP/1.1\r\nHost: localhost\r\n\r\n",
    )
    .await;

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(header_of(&response, "Content-Type").unwrap(), "text/plain");
    assert_eq!(header_of(&response, "Content-Length").unwrap(), "11");
    assert_eq!(header_of(&response, "Connection").unwrap(), "close");
    assert_eq!(body_of(&response), b"hello world");
}

#[tokio::test]
async fn test_repeated_get_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("page.html"), b"<p>stable</p>").unwrap();
    let request: &[u8] = b"GET /page.html HTTP/1.1\r\n\r\n";

    let first = exchange(test_config(dir.path()), request).await;
    let second = exchange(test_config(dir.path()), request).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_missing_file_returns_404() {
    let dir = TempDir::new().unwrap();

    let response = exchange(test_config(dir.path()), b"GET /nope.html HTTP/1.1\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 404 Not Found");
}

#[tokio::test]
async fn test_traversal_target_returns_404_not_contents() {
    let outer = TempDir::new().unwrap();
    let base = outer.path().join("base");
    fs::create_dir(&base).unwrap();
    fs::write(outer.path().join("secret.txt"), b"top secret").unwrap();

    let response = exchange(test_config(&base), b"GET /../secret.txt HTTP/1.1\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 404 Not Found");
    assert!(!body_of(&response).windows(10).any(|w| w == b"top secret"));
}

#[tokio::test]
async fn test_short_request_line_returns_400() {
    let dir = TempDir::new().unwrap();

    let response = exchange(test_config(dir.path()), b"GET\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 400 Bad Request");
}

#[tokio::test]
async fn test_empty_request_returns_400() {
    let dir = TempDir::new().unwrap();

    let response = exchange(test_config(dir.path()), b"").await;

    assert_eq!(status_line(&response), "HTTP/1.1 400 Bad Request");
}

#[tokio::test]
async fn test_non_utf8_target_is_answered_not_dropped() {
    let dir = TempDir::new().unwrap();

    let response = exchange(
        test_config(dir.path()),
        b"GET /caf\xE9.html HTTP/1.1\r\n\r\n",
    )
    .await;

    assert!(!response.is_empty());
    assert_eq!(status_line(&response), "HTTP/1.1 404 Not Found");
}

#[tokio::test]
async fn test_unsupported_version_returns_505() {
    let dir = TempDir::new().unwrap();

    let response = exchange(test_config(dir.path()), b"GET / HTTP/2.0\r\n\r\n").await;

    assert_eq!(
        status_line(&response),
        "HTTP/1.1 505 HTTP Version Not Supported"
    );
}

#[tokio::test]
async fn test_unsupported_method_returns_501() {
    let dir = TempDir::new().unwrap();

    let response = exchange(test_config(dir.path()), b"PUT / HTTP/1.1\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 501 Not Implemented");
}

#[tokio::test]
async fn test_post_without_multipart_content_type_returns_400() {
    let dir = TempDir::new().unwrap();

    let response = exchange(
        test_config(dir.path()),
        b"POST /upload HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\r\n{}",
    )
    .await;

    assert_eq!(status_line(&response), "HTTP/1.1 400 Bad Request");
}

#[tokio::test]
async fn test_post_image_upload_stores_file_and_reports_success() {
    let dir = TempDir::new().unwrap();
    let payload = b"\x89PNG\r\n\x1a\nfakeimagedata";

    let response = exchange(
        test_config(dir.path()),
        &multipart_post("/upload", "cat.png", payload),
    )
    .await;

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(header_of(&response, "Content-Type").unwrap(), "text/html");

    let stored = fs::read(dir.path().join("uploads").join("cat.png")).unwrap();
    assert_eq!(stored, payload);
}

#[tokio::test]
async fn test_post_disallowed_extension_writes_nothing_but_succeeds() {
    let dir = TempDir::new().unwrap();

    let response = exchange(
        test_config(dir.path()),
        &multipart_post("/upload", "script.exe", b"MZ\x00\x01"),
    )
    .await;

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert!(!dir.path().join("uploads").join("script.exe").exists());
}

#[tokio::test]
async fn test_api_images_lists_stored_uploads() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    exchange(config.clone(), &multipart_post("/upload", "cat.png", b"png")).await;
    exchange(config.clone(), &multipart_post("/upload", "script.exe", b"MZ")).await;

    let response = exchange(config, b"GET /api/images HTTP/1.1\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(
        header_of(&response, "Content-Type").unwrap(),
        "application/json"
    );

    let names: Vec<String> = serde_json::from_slice(&body_of(&response)).unwrap();
    assert!(names.contains(&"cat.png".to_string()));
    assert!(!names.contains(&"script.exe".to_string()));
}

#[tokio::test]
async fn test_api_images_empty_without_uploads_directory() {
    let dir = TempDir::new().unwrap();

    let response = exchange(test_config(dir.path()), b"GET /api/images HTTP/1.1\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(body_of(&response), b"[]");
}

#[tokio::test]
async fn test_http_10_request_is_served() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("old.txt"), b"legacy").unwrap();

    let response = exchange(test_config(dir.path()), b"GET /old.txt HTTP/1.0\r\n\r\n").await;

    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(header_of(&response, "Connection").unwrap(), "close");
}
