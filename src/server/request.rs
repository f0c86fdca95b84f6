use std::collections::HashMap;
use std::str::from_utf8;

use httparse;
use netbuf::Buf;
use url::form_urlencoded;

use enums::{Method, Version};
use headers::{bytes_trim, is_content_length, is_transfer_encoding};
use headers::is_keep_alive;
use super::Error;
use super::request_target::RequestTarget;


/// Number of headers to allocate on a stack
const MIN_HEADERS: usize = 16;
/// A hard limit on the number of headers
const MAX_HEADERS: usize = 1024;


/// A fully received HTTP request
///
/// Header names are lowercased, and repeated headers (as well as
/// repeated query parameters) are kept as multiple values in the order
/// they were received.
#[derive(Debug, Clone)]
pub struct Request {
    version: Version,
    method: Method,
    path: String,
    fragment: String,
    headers: HashMap<String, Vec<String>>,
    query: HashMap<String, Vec<String>>,
    body: Vec<u8>,
}

struct Head {
    version: Version,
    method: Method,
    path: String,
    fragment: String,
    headers: HashMap<String, Vec<String>>,
    query: HashMap<String, Vec<String>>,
    body_len: usize,
}

/// Rejects overlong lines before the head is complete
///
/// Only the head of the request is checked (up to the blank line), this
/// includes a line that is still incomplete. Empty lines before the request
/// line count towards the request line limit.
fn check_lines(data: &[u8], max_line: usize) -> Result<(), Error> {
    let mut start = 0;
    let mut request_line = true;
    loop {
        let (error, prefix) = if request_line {
            (Error::RequestLineTooLong, start)
        } else {
            (Error::HeaderTooLong, 0)
        };
        match data[start..].iter().position(|&x| x == b'\n') {
            Some(end) => {
                let line = &data[start..start+end];
                let line = if line.ends_with(b"\r") {
                    &line[..line.len()-1]
                } else {
                    line
                };
                if prefix + line.len() > max_line {
                    return Err(error);
                }
                start += end + 1;
                if line.len() == 0 && !request_line {
                    return Ok(());
                }
                // empty lines before request line are skipped by httparse
                if line.len() > 0 {
                    request_line = false;
                }
            }
            None => {
                if prefix + data.len() - start > max_line {
                    return Err(error);
                }
                return Ok(());
            }
        }
    }
}

fn split_target(target: &str) -> (&str, &str, &str) {
    let (rest, fragment) = match target.find('#') {
        Some(idx) => (&target[..idx], &target[idx+1..]),
        None => (target, ""),
    };
    match rest.find('?') {
        Some(idx) => (&rest[..idx], &rest[idx+1..], fragment),
        None => (rest, "", fragment),
    }
}

fn parse_query(query: &str) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        result.entry(key.into_owned())
            .or_insert_with(Vec::new)
            .push(value.into_owned());
    }
    return result;
}

fn scan_head(raw: &httparse::Request, max_body: usize)
    -> Result<Head, Error>
{
    use super::Error::*;

    let method = raw.method.unwrap_or("");
    let method = Method::from_name(method)
        .ok_or_else(|| UnsupportedMethod(method.to_string()))?;
    let target = raw.path.and_then(RequestTarget::parse)
        .ok_or(BadRequestTarget)?;
    let (path, query, fragment) = split_target(target.path());

    let mut content_length = None;
    let mut headers = HashMap::new();
    for header in raw.headers.iter() {
        let name = header.name.to_ascii_lowercase();
        let value = from_utf8(bytes_trim(header.value))
            .map_err(|_| HeaderInvalid(name.clone()))?;
        if is_content_length(&name) {
            if content_length.is_some() {
                return Err(DuplicateContentLength);
            }
            content_length = Some(value.parse::<u64>()
                .map_err(|_| ContentLengthInvalid)?);
        } else if is_transfer_encoding(&name) {
            return Err(UnsupportedBody);
        }
        headers.entry(name)
            .or_insert_with(Vec::new)
            .push(value.to_string());
    }
    let body_len = content_length.unwrap_or(0);
    if body_len > max_body as u64 {
        return Err(RequestTooLong);
    }
    Ok(Head {
        version: Version::from_httparse(raw.version.unwrap_or(1)),
        method: method,
        path: path.to_string(),
        fragment: fragment.to_string(),
        headers: headers,
        query: parse_query(query),
        body_len: body_len as usize,
    })
}

impl Request {
    /// Parse a request from the start of the buffer
    ///
    /// Returns `Ok(None)` when the request is not fully received yet. On
    /// success bytes of the request (including body) are consumed from the
    /// buffer. Limits are checked as soon as the offending part is seen, so
    /// we never wait for a body that is going to be rejected.
    pub fn parse_from(buf: &mut Buf, max_line: usize, max_body: usize)
        -> Result<Option<Request>, Error>
    {
        check_lines(&buf[..], max_line)?;
        let (head, bytes) = {
            let mut vec;
            let mut headers = [httparse::EMPTY_HEADER; MIN_HEADERS];
            let mut raw = httparse::Request::new(&mut headers);
            let mut result = raw.parse(&buf[..]);
            if matches!(result, Err(httparse::Error::TooManyHeaders)) {
                vec = vec![httparse::EMPTY_HEADER; MAX_HEADERS];
                raw = httparse::Request::new(&mut vec);
                result = raw.parse(&buf[..]);
            }
            match result? {
                httparse::Status::Complete(bytes) => {
                    (scan_head(&raw, max_body)?, bytes)
                }
                httparse::Status::Partial => return Ok(None),
            }
        };
        let end = bytes + head.body_len;
        if buf.len() < end {
            return Ok(None);
        }
        let body = buf[bytes..end].to_vec();
        buf.consume(end);
        Ok(Some(Request {
            version: head.version,
            method: head.method,
            path: head.path,
            fragment: head.fragment,
            headers: head.headers,
            query: head.query,
            body: body,
        }))
    }
    pub fn version(&self) -> Version {
        self.version
    }
    pub fn method(&self) -> Method {
        self.method
    }
    /// Path part of the request target, without query and fragment
    ///
    /// Path is not percent-decoded.
    pub fn path(&self) -> &str {
        &self.path
    }
    /// Fragment of the request target (empty string if absent)
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
    /// Get the single value of the header
    ///
    /// Name is case-insensitive. Returns `Error::DuplicateHeader` if the
    /// header is sent multiple times, the error is a "bad request" one.
    pub fn header(&self, name: &str) -> Result<Option<&str>, Error> {
        let name = name.to_ascii_lowercase();
        single(self.headers.get(&name), name)
    }
    /// All values of the header, in the order they were received
    pub fn all_headers(&self, name: &str) -> &[String] {
        self.headers.get(&name.to_ascii_lowercase())
            .map(|v| &v[..])
            .unwrap_or(&[])
    }
    /// All headers, keys are lowercase
    pub fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }
    /// Get the single value of the (decoded) query parameter
    pub fn query_param(&self, name: &str) -> Result<Option<&str>, Error> {
        single(self.query.get(name), name.to_string())
    }
    /// All query parameters
    pub fn query_params(&self) -> &HashMap<String, Vec<String>> {
        &self.query
    }
    pub fn body(&self) -> &[u8] {
        &self.body
    }
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
    /// Whether client asked to keep connection open
    ///
    /// True only for exactly one `Connection: keep-alive` header.
    pub fn keep_alive(&self) -> bool {
        match self.header("connection") {
            Ok(Some(value)) => is_keep_alive(value),
            _ => false,
        }
    }
}

/// Version from the request line at the start of the buffer
///
/// Used to reply to a malformed request with the same version. Returns
/// `None` if request line is not received (or can't be parsed) yet.
pub fn sniff_version(data: &[u8]) -> Option<Version> {
    let mut headers: [httparse::Header; 0] = [];
    let mut raw = httparse::Request::new(&mut headers);
    // version is filled in before headers are parsed, so the error
    // (e.g. `TooManyHeaders`) doesn't matter here
    raw.parse(data).ok();
    raw.version.map(Version::from_httparse)
}

fn single(values: Option<&Vec<String>>, name: String)
    -> Result<Option<&str>, Error>
{
    match values {
        None => Ok(None),
        Some(v) if v.len() == 1 => Ok(Some(&v[0])),
        Some(v) if v.len() == 0 => Ok(None),
        Some(_) => Err(Error::DuplicateHeader(name)),
    }
}
