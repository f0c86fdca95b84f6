use enums::{Status, Version};


/// An HTTP response built by a handler
///
/// The `Content-Length` header is always computed from the body when the
/// response is serialized, so it must not be added here (it's dropped with
/// a warning if it is).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    version: Version,
    code: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Create an `HTTP/1.1 200 OK` response with no headers and no body
    pub fn new() -> Response {
        Response::for_version(Version::Http11)
    }
    /// Create a `200 OK` response, usually with the version of the request
    pub fn for_version(version: Version) -> Response {
        Response {
            version: version,
            code: 200,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
    pub fn status(&mut self, status: Status) -> &mut Self {
        self.code = status.code();
        self
    }
    /// Set a numeric status code
    ///
    /// Codes that are not in `Status` get a generic reason phrase of
    /// their class.
    pub fn code(&mut self, code: u16) -> &mut Self {
        self.code = code;
        self
    }
    /// Add a header, repeated names are sent as multiple lines
    pub fn add_header<N, V>(&mut self, name: N, value: V) -> &mut Self
        where N: Into<String>, V: Into<String>,
    {
        self.headers.push((name.into(), value.into()));
        self
    }
    pub fn set_body<B: Into<Vec<u8>>>(&mut self, body: B) -> &mut Self {
        self.body = body.into();
        self
    }
    pub fn get_version(&self) -> Version {
        self.version
    }
    pub fn get_code(&self) -> u16 {
        self.code
    }
    /// First value of the header (name is case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|&&(ref n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, ref v)| &v[..])
    }
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Default for Response {
    fn default() -> Response {
        Response::new()
    }
}
