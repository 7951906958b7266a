const BAD_REQUEST: &[u8] =
    b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\nContent-Length: 0\r\n\r\n";
const NOT_FOUND: &[u8] =
    b"HTTP/1.1 404 Not Found\r\nConnection: close\r\nContent-Length: 0\r\n\r\n";
const METHOD_NOT_ALLOWED: &[u8] =
    b"HTTP/1.1 405 Method Not Allowed\r\nAllow: GET, HEAD\r\nConnection: close\r\nContent-Length: 0\r\n\r\n";

/// HTTP status codes emitted by the server.
///
/// - `Ok` (200): File found, headers (and for GET the body) follow
/// - `BadRequest` (400): Oversized header block or unsafe target
/// - `NotFound` (404): Target could not be opened
/// - `MethodNotAllowed` (405): Anything but GET and HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }

    /// The complete, bodiless response for an error status.
    ///
    /// Every canned response closes the connection and declares
    /// `Content-Length: 0`. 405 also advertises the served methods. `Ok` has
    /// none: a 200 always carries the file's length, see [`ok_head`].
    pub const fn canned(&self) -> Option<&'static [u8]> {
        match self {
            StatusCode::Ok => None,
            StatusCode::BadRequest => Some(BAD_REQUEST),
            StatusCode::NotFound => Some(NOT_FOUND),
            StatusCode::MethodNotAllowed => Some(METHOD_NOT_ALLOWED),
        }
    }
}

/// Header block of a successful file response.
///
/// HEAD and GET share it; `len` is the file size observed at open time.
pub fn ok_head(len: u64) -> Vec<u8> {
    format!(
        "HTTP/1.1 {} {}\r\nConnection: close\r\nContent-Length: {}\r\n\r\n",
        StatusCode::Ok.as_u16(),
        StatusCode::Ok.reason_phrase(),
        len
    )
    .into_bytes()
}
