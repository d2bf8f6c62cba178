use std::collections::HashMap;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::request::{Method, Request};

#[derive(Debug)]
pub enum RequestError {
    /// The stream yielded nothing, or the request line was blank
    Empty,
    /// Fewer than 3 request-line tokens, or an unparseable Content-Length
    Malformed,
    /// A version other than HTTP/1.0 or HTTP/1.1
    UnsupportedVersion(String),
    /// A method other than GET or POST
    UnsupportedMethod(String),
    /// Transport failure; the connection is torn down without a response
    Io(std::io::Error),
}

impl From<std::io::Error> for RequestError {
    fn from(e: std::io::Error) -> Self {
        RequestError::Io(e)
    }
}

/// Reads one HTTP request from the stream: request line, headers, and the
/// declared body when a Content-Length header is present.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let request_line = match read_line(reader).await? {
        Some(line) => line,
        None => return Err(RequestError::Empty),
    };
    if request_line.trim().is_empty() {
        return Err(RequestError::Empty);
    }

    let (method, target, version) = parse_request_line(&request_line)?;

    // Headers until a blank line or end of stream. Lines without a colon
    // are tolerated by being skipped.
    let mut headers = HashMap::new();
    while let Some(line) = read_line(reader).await? {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    // Body is read only when Content-Length is declared. A non-numeric
    // value is a client framing error; a short read keeps what arrived.
    let body = match headers.get("content-length") {
        Some(raw) => {
            let declared = raw.parse::<usize>().map_err(|_| RequestError::Malformed)?;
            Some(read_body(reader, declared).await?)
        }
        None => None,
    };

    Ok(Request {
        method,
        target,
        version,
        headers,
        body,
    })
}

/// Splits the request line on runs of whitespace and validates version and
/// method tokens, in that order. The target is preserved unmodified.
pub fn parse_request_line(line: &str) -> Result<(Method, String, String), RequestError> {
    let mut parts = line.split_whitespace();

    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestError::Malformed);
    };

    let version = version.to_ascii_uppercase();
    if version != "HTTP/1.0" && version != "HTTP/1.1" {
        return Err(RequestError::UnsupportedVersion(version));
    }

    let method_token = method.to_ascii_uppercase();
    let method =
        Method::from_token(&method_token).ok_or(RequestError::UnsupportedMethod(method_token))?;

    Ok((method, target.to_string(), version))
}

/// Reads one `\r\n`-terminated line as raw bytes, replacement-decoding
/// anything that is not UTF-8. Returns `None` at end of stream. At most one
/// trailing `\n` and one `\r` are stripped; any other bytes belong to the
/// line.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Reads up to `declared` body bytes, stopping early at end of stream.
async fn read_body<R>(reader: &mut R, declared: usize) -> Result<Vec<u8>, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = vec![0u8; declared];
    let mut filled = 0;

    while filled < declared {
        let n = reader.read(&mut body[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    body.truncate(filled);
    Ok(body)
}
