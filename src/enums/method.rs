use std::fmt;


/// Request method
///
/// Only the methods listed here are accepted, requests with any other
/// method are answered with `501 Not Implemented`.
///
/// `Update` is not a standard method, but some game clients send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
    Head,
    Patch,
    Put,
    Update,
    Options,
    Connect,
    Trace,
}

impl Method {
    /// Parse the method token of the request line (case-sensitive)
    pub fn from_name(name: &str) -> Option<Method> {
        use self::Method::*;
        let m = match name {
            "GET"       => Get,
            "POST"      => Post,
            "DELETE"    => Delete,
            "HEAD"      => Head,
            "PATCH"     => Patch,
            "PUT"       => Put,
            "UPDATE"    => Update,
            "OPTIONS"   => Options,
            "CONNECT"   => Connect,
            "TRACE"     => Trace,
            _ => return None,
        };
        Some(m)
    }

    pub fn as_str(&self) -> &'static str {
        use self::Method::*;
        match *self {
            Get     => "GET",
            Post    => "POST",
            Delete  => "DELETE",
            Head    => "HEAD",
            Patch   => "PATCH",
            Put     => "PUT",
            Update  => "UPDATE",
            Options => "OPTIONS",
            Connect => "CONNECT",
            Trace   => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
