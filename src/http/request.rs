use std::collections::HashMap;

/// HTTP request methods.
///
/// Only GET and POST are served. Any other method token parses but is
/// rejected by the connection handler with 501 Not Implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a static resource or the upload listing
    Get,
    /// POST - Submit a multipart/form-data image upload
    Post,
}

impl Method {
    /// Parses an HTTP method from an already-uppercased token.
    ///
    /// # Example
    ///
    /// ```
    /// # use snapserve::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::Get));
    /// assert_eq!(Method::from_token("PUT"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            _ => None,
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Contains all information extracted from the request line, headers, and
/// (when a Content-Length header is present) the request body. Immutable
/// once parsed; owned by a single connection and discarded when it closes.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET or POST)
    pub method: Method,
    /// The raw request target (e.g., "/index.html"), never decoded or normalized
    pub target: String,
    /// HTTP version, uppercased ("HTTP/1.0" or "HTTP/1.1")
    pub version: String,
    /// Request headers, keyed by lowercased name; the last occurrence wins
    pub headers: HashMap<String, String>,
    /// Request body, present only when Content-Length parsed successfully
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ct = req.header("Content-Type").unwrap_or("");
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }
}
