//! Minimal HTTP/1.1 framing
//!
//! One request per connection: read the head and a `Content-Length` body,
//! write a single response, close.

use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::server::error::RequestError;

pub const MAX_BODY_BYTES: usize = 16 * 1024;
const MAX_HEAD_BYTES: usize = 8 * 1024;
pub const READ_TIMEOUT: Duration = Duration::from_secs(2);

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub origin: Option<String>,
    /// Declared body length, which may exceed what was actually read
    pub content_length: usize,
    pub body: Vec<u8>,
    /// Set when the body framing headers cannot be honoured
    pub framing_error: Option<RequestError>,
}

impl HttpRequest {
    /// Request path without the query string
    pub fn route_path(&self) -> &str {
        self.path.split('?').next().unwrap_or("/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: &'static str,
    pub content_type: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: &'static str, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            headers: Vec::new(),
            body,
        }
    }

    pub fn json<T: Serialize>(status: &'static str, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::new(status, JSON_CONTENT_TYPE, body),
            Err(e) => {
                log::error!("Failed to serialize response: {}", e);
                Self::new(
                    "500 Internal Server Error",
                    "text/plain; charset=utf-8",
                    b"Internal server error.".to_vec(),
                )
            }
        }
    }

    pub fn empty(status: &'static str) -> Self {
        Self::new(status, "text/plain; charset=utf-8", Vec::new())
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn find_head_end(data: &[u8]) -> Option<usize> {
    data.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// Read one request; `None` when the peer sent nothing
pub async fn read_request<R>(stream: &mut R) -> std::io::Result<Option<HttpRequest>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4096];
    let mut data = Vec::<u8>::new();
    loop {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buf[..read]);
        if find_head_end(&data).is_some() || data.len() > MAX_HEAD_BYTES {
            break;
        }
    }
    if data.is_empty() {
        return Ok(None);
    }

    let head_end = find_head_end(&data).unwrap_or(data.len());
    let head = String::from_utf8_lossy(&data[..head_end]).into_owned();
    let mut body = data[head_end..].to_vec();

    let mut lines = head.split("\r\n");
    let Some(request_line) = lines.next() else {
        return Ok(None);
    };
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("/").to_string();

    let mut content_length: Option<usize> = None;
    let mut origin = None;
    let mut framing_error = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            match value.parse::<usize>() {
                Ok(len) => content_length = Some(len),
                Err(_) => {
                    framing_error = Some(RequestError::InvalidContentLength(value.to_string()));
                }
            }
        } else if name.eq_ignore_ascii_case("transfer-encoding")
            && !value.eq_ignore_ascii_case("identity")
        {
            framing_error = Some(RequestError::UnsupportedTransferEncoding(
                value.to_string(),
            ));
        } else if name.eq_ignore_ascii_case("origin") {
            origin = Some(value.to_string());
        }
    }

    // Bytes after the head with no declared length cannot be delimited
    if framing_error.is_none() && content_length.is_none() && !body.is_empty() {
        framing_error = Some(RequestError::MissingContentLength);
    }
    if framing_error.is_some() {
        return Ok(Some(HttpRequest {
            method,
            path,
            origin,
            content_length: 0,
            body: Vec::new(),
            framing_error,
        }));
    }
    let content_length = content_length.unwrap_or(0);

    let wanted = content_length.min(MAX_BODY_BYTES);
    while body.len() < wanted {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&buf[..read]);
    }
    body.truncate(wanted);

    Ok(Some(HttpRequest {
        method,
        path,
        origin,
        content_length,
        body,
        framing_error: None,
    }))
}

pub async fn write_response<W>(
    stream: &mut W,
    response: &HttpResponse,
    head_only: bool,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut head = String::new();
    head.push_str("HTTP/1.1 ");
    head.push_str(response.status);
    head.push_str("\r\n");
    head.push_str("Content-Type: ");
    head.push_str(response.content_type);
    head.push_str("\r\n");
    head.push_str("Cache-Control: no-store\r\n");
    head.push_str("Connection: close\r\n");
    for (name, value) in &response.headers {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str("Content-Length: ");
    head.push_str(&response.body.len().to_string());
    head.push_str("\r\n\r\n");

    stream.write_all(head.as_bytes()).await?;
    if !head_only {
        stream.write_all(&response.body).await?;
    }
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_request_with_body() {
        let raw = concat!(
            "POST /api/validate?x=1 HTTP/1.1\r\n",
            "Host: localhost\r\n",
            "Origin: http://localhost:5173\r\n",
            "Content-Length: 4\r\n",
            "\r\n",
            "{}  "
        )
        .as_bytes();
        let mut reader = &raw[..];

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/validate?x=1");
        assert_eq!(request.route_path(), "/api/validate");
        assert_eq!(request.origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(request.content_length, 4);
        assert_eq!(request.body, b"{}  ");
        assert_eq!(request.framing_error, None);
    }

    #[tokio::test]
    async fn test_unparseable_content_length_is_a_framing_error() {
        let raw = concat!(
            "POST /api/validate HTTP/1.1\r\n",
            "Content-Length: abc\r\n",
            "\r\n",
            "{\"gridText\":1}"
        )
        .as_bytes();
        let mut reader = &raw[..];

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(
            request.framing_error,
            Some(RequestError::InvalidContentLength("abc".to_string()))
        );
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_chunked_body_is_a_framing_error() {
        let raw = concat!(
            "POST /api/validate HTTP/1.1\r\n",
            "Transfer-Encoding: chunked\r\n",
            "\r\n",
            "2\r\n{}\r\n0\r\n\r\n"
        )
        .as_bytes();
        let mut reader = &raw[..];

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(
            request.framing_error,
            Some(RequestError::UnsupportedTransferEncoding("chunked".to_string()))
        );
    }

    #[tokio::test]
    async fn test_body_without_length_is_a_framing_error() {
        let mut reader = &b"POST /api/validate HTTP/1.1\r\n\r\n{}"[..];
        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.framing_error, Some(RequestError::MissingContentLength));
    }

    #[tokio::test]
    async fn test_no_body_and_no_length_is_fine() {
        let mut reader = &b"GET /api/health HTTP/1.1\r\nHost: localhost\r\n\r\n"[..];
        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.framing_error, None);
        assert_eq!(request.content_length, 0);
    }

    #[tokio::test]
    async fn test_empty_stream_is_no_request() {
        let mut reader = &b""[..];
        assert!(read_request(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_body_is_capped() {
        let mut raw = format!(
            "POST /api/validate HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_BODY_BYTES + 10
        )
        .into_bytes();
        raw.extend(std::iter::repeat_n(b'a', MAX_BODY_BYTES + 10));
        let mut reader = &raw[..];

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.content_length, MAX_BODY_BYTES + 10);
        assert_eq!(request.body.len(), MAX_BODY_BYTES);
    }

    #[tokio::test]
    async fn test_writes_status_headers_and_body() {
        let response = HttpResponse::new("200 OK", JSON_CONTENT_TYPE, b"{}".to_vec())
            .with_header("Vary", "Origin");
        let mut out = Vec::new();
        write_response(&mut out, &response, false).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Vary: Origin\r\n"));
        assert!(text.contains("Content-Length: 2\r\n"));
        assert!(text.ends_with("\r\n\r\n{}"));
    }

    #[tokio::test]
    async fn test_head_only_omits_body() {
        let response = HttpResponse::new("200 OK", JSON_CONTENT_TYPE, b"{}".to_vec());
        let mut out = Vec::new();
        write_response(&mut out, &response, true).await.unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("Content-Length: 2\r\n\r\n"));
    }
}
