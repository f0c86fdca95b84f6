#[derive(Debug)]
pub enum RequestTarget<'a> {
    /// Usual form of `/hello?name=world`
    Origin(&'a str),
    /// Full url: `http://example.com:8080/hello`
    ///
    /// Note in this case (unlike in Origin) path may not start with a slash
    Absolute { scheme: &'a str, authority: &'a str, path: &'a str },
    /// Only hostname `example.com:8080`, only useful for `CONNECT` method
    Authority(&'a str),
    /// Asterisk `*`
    Asterisk,
}


// Authority can't contain `/` or `?` or `#`, user and password
// is not supported in HTTP either (so no `@` but otherwise we accept
// anything as rules are quite complex)
fn authority_end_char(&x: &u8) -> bool {
    x == b'/' || x == b'?' || x == b'#' || x == b'@'
}

fn absolute<'a>(scheme: &'a str, rest: &'a str) -> RequestTarget<'a> {
    let auth_end = rest.as_bytes().iter()
        .position(authority_end_char)
        .unwrap_or(rest.len());
    RequestTarget::Absolute {
        scheme: scheme,
        authority: &rest[..auth_end],
        path: &rest[auth_end..],
    }
}

impl<'a> RequestTarget<'a> {
    pub fn parse(s: &'a str) -> Option<RequestTarget<'a>> {
        use self::RequestTarget::*;

        if s.len() == 0 {
            return None;
        }
        if s.starts_with("/") {
            return Some(Origin(s));
        }
        if s.starts_with("http://") {
            return Some(absolute("http", &s[7..]));
        }
        if s.starts_with("https://") {
            return Some(absolute("https", &s[8..]));
        }
        if s == "*" {
            return Some(Asterisk);
        }
        if s.as_bytes().iter().position(authority_end_char).is_none() {
            return Some(Authority(s));
        }

        return None;
    }
    /// The part of the target that is used as a request path
    ///
    /// Includes query and fragment, if any. Absolute url without a path
    /// yields `/`.
    pub fn path(&self) -> &'a str {
        use self::RequestTarget::*;
        match *self {
            Origin(path) => path,
            Absolute { path: "", .. } => "/",
            Absolute { path, .. } => path,
            Authority(auth) => auth,
            Asterisk => "*",
        }
    }
}

#[cfg(test)]
mod test {
    use super::RequestTarget;
    use super::RequestTarget::*;

    #[test]
    fn test_empty() {
        assert_matches!(RequestTarget::parse(""), None);
    }

    #[test]
    fn test_path() {
        assert_matches!(RequestTarget::parse("/hello"),
                        Some(Origin("/hello")));
    }

    #[test]
    fn test_path_query() {
        assert_matches!(RequestTarget::parse("/hello?xxx"),
                        Some(Origin("/hello?xxx")));
    }

    #[test]
    fn test_star() {
        assert_matches!(RequestTarget::parse("*"), Some(Asterisk));
    }

    #[test]
    fn test_strange_path() {
        assert_matches!(RequestTarget::parse("/http://x"),
                        Some(Origin("/http://x")));
    }

    #[test]
    fn test_plain_authority_uri() {
        assert_matches!(RequestTarget::parse("http://x"),
                        Some(Absolute { scheme: "http", authority: "x",
                                        path: "" }));
    }

    #[test]
    fn test_bigger_uri() {
        assert_matches!(RequestTarget::parse("https://x:932/hello?world"),
                        Some(Absolute { scheme: "https", authority: "x:932",
                                        path: "/hello?world" }));
    }

    #[test]
    fn test_authority() {
        assert_matches!(RequestTarget::parse("example.com:443"),
                        Some(Authority("example.com:443")));
        assert_matches!(RequestTarget::parse("a@b"), None);
    }

    #[test]
    fn test_request_path() {
        fn path(s: &str) -> &str {
            RequestTarget::parse(s).unwrap().path()
        }
        assert_eq!(path("/x?y"), "/x?y");
        assert_eq!(path("http://x"), "/");
        assert_eq!(path("http://x/a/b#c"), "/a/b#c");
        assert_eq!(path("example.com:443"), "example.com:443");
        assert_eq!(path("*"), "*");
    }
}
