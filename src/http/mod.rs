//! HTTP protocol implementation.
//!
//! This module implements a hand-rolled HTTP/1.0 and HTTP/1.1 server core:
//! every connection carries exactly one request and is closed after the
//! response (`Connection: close` on every reply).
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Reads and parses an HTTP request from a buffered stream
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`multipart`**: Naive `multipart/form-data` body splitting for image uploads
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read request line, headers, and declared body
//!        └──────┬──────┘
//!               │ Request parsed (or rejected with 400/501/505)
//!               ▼
//!        ┌──────────────────┐
//!        │    Dispatch      │ ← Route to static file / upload / listing
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Flush and shut the stream down
//!        └──────────────────┘
//! ```
//!
//! `Closed` is reached on every path, including parse failures and IO
//! errors; shutdown failures are logged and never propagated.
//!
//! # Example
//!
//! ```ignore
//! use snapserve::config::Config;
//! use snapserve::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::load();
//!     let listener = TcpListener::bind(("0.0.0.0", cfg.port)).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let cfg = cfg.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, cfg);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod multipart;
pub mod mime;
