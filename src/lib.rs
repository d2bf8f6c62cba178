//! Snapserve - Minimal HTTP file server with image uploads
//!
//! Core library for HTTP parsing, static file serving, and multipart upload handling.

pub mod config;
pub mod http;
pub mod server;
pub mod storage;
