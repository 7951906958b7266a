/// The HTTP methods this server answers.
///
/// Any other method token, registered or not, has no `Method` and is
/// answered with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

/// The request line of a client request.
///
/// Headers that follow the request line are framed but never interpreted,
/// so they are not kept. Tokens missing from the request line are empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The method token exactly as sent (e.g. "GET")
    pub method: String,
    /// The raw request-target (e.g. "/index.html")
    pub target: String,
    /// HTTP version token (typically "HTTP/1.1"); parsed but unused
    pub version: String,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` for "GET" or "HEAD", `None` for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("POST"), None);
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        target: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version: version.into(),
        }
    }

    /// Classifies the method token. `None` for anything this server does not
    /// serve, including an empty token.
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }

    /// True for GET, false for HEAD and everything else.
    pub fn wants_body(&self) -> bool {
        self.method() == Some(Method::GET)
    }
}
