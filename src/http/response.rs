/// HTTP status codes used by the server.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed or empty request
/// - `NotFound` (404): Resource not found (also covers path-escape attempts)
/// - `NotImplemented` (501): Method other than GET or POST
/// - `HttpVersionNotSupported` (505): Version other than HTTP/1.0 or HTTP/1.1
/// - `InternalServerError` (500): Server-side failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use snapserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use snapserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers are kept in insertion order so responses serialize
/// deterministically. Every built response carries `Connection: close` and
/// a `Content-Length` equal to the exact byte length of the body.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"[]".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing any previous value under the same name
    /// (case-insensitive) while keeping its position.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Fills in `Content-Length` (exact body byte count) and
    /// `Connection: close` if not already present.
    pub fn build(mut self) -> Response {
        if !self.has_header("Content-Length") {
            let len = self.body.len().to_string();
            self.headers.push(("Content-Length".to_string(), len));
        }
        if !self.has_header("Connection") {
            self.headers
                .push(("Connection".to_string(), "close".to_string()));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl Response {
    /// Creates a 200 OK response carrying a static file's bytes.
    pub fn file(mime: &str, body: Vec<u8>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime)
            .body(body)
            .build()
    }

    /// Creates a 200 OK response carrying a JSON body.
    pub fn json(body: Vec<u8>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/json")
            .body(body)
            .build()
    }

    /// Creates the HTML success page returned after a multipart upload.
    pub fn upload_success() -> Self {
        let body = "<html><head><title>Upload Success</title></head>\
                    <body><h2>Image uploaded successfully</h2>\
                    <p><a href='/'>Back</a></p></body></html>";
        Self::html_page(StatusCode::Ok, body)
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        let body = "<html><head><title>400 Bad Request</title></head>\
                    <body><h1>400 Bad Request</h1>\
                    <p>The request could not be understood by the server.</p></body></html>";
        Self::html_page(StatusCode::BadRequest, body)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        let body = "<html><head><title>404 Not Found</title></head>\
                    <body><h1>404 - Not Found</h1>\
                    <p>The requested resource does not exist on this server.</p></body></html>";
        Self::html_page(StatusCode::NotFound, body)
    }

    /// Creates a 501 Not Implemented response.
    pub fn not_implemented() -> Self {
        let body = "<html><head><title>501 Not Implemented</title></head>\
                    <body><h1>501 - Not Implemented</h1>\
                    <p>Only GET and POST are supported.</p></body></html>";
        Self::html_page(StatusCode::NotImplemented, body)
    }

    /// Creates a 505 HTTP Version Not Supported response.
    pub fn version_not_supported() -> Self {
        let body = "<html><head><title>505 HTTP Version Not Supported</title></head>\
                    <body><h1>505 - HTTP Version Not Supported</h1>\
                    <p>Only HTTP/1.0 and HTTP/1.1 are supported.</p></body></html>";
        Self::html_page(StatusCode::HttpVersionNotSupported, body)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        let body = "<html><head><title>500 Internal Server Error</title></head>\
                    <body><h1>500 - Internal Server Error</h1></body></html>";
        Self::html_page(StatusCode::InternalServerError, body)
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn html_page(status: StatusCode, body: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/html")
            .body(body.as_bytes().to_vec())
            .build()
    }
}
