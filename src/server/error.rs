use std::io;
use std::convert::From;

use httparse;

use websocket;
use enums::Status;


quick_error! {
    /// HTTP server error
    #[derive(Debug)]
    pub enum Error {
        /// Socket IO error
        Io(err: io::Error) {
            description("I/O error")
            display("I/O error: {}", err)
            from()
        }
        /// Error parsing http headers
        ParseError(err: httparse::Error) {
            description("parse error")
            display("parse error: {:?}", err)
            from()
        }
        /// Connection closed in the middle of the request or message
        ConnectionReset {
            description("connection reset")
        }
        /// Request line is longer than configured limit
        RequestLineTooLong {
            description("request line is too long")
        }
        /// Some header line is longer than configured limit
        HeaderTooLong {
            description("header line is too long")
        }
        /// Bad request target (middle line of the request line)
        BadRequestTarget {
            description("error parsing request target")
        }
        /// Method is not one of the known ones
        UnsupportedMethod(method: String) {
            description("unsupported method")
            display("unsupported method {:?}", method)
        }
        /// Header value is not valid utf-8
        HeaderInvalid(name: String) {
            description("invalid header value")
            display("invalid value of the header {:?}", name)
        }
        /// Content length header is invalid (non-integer, or > 64bit)
        ContentLengthInvalid {
            description("invalid content-length header")
        }
        /// Duplicate content-length header, this is prohibited due to security
        DuplicateContentLength {
            description("duplicate content length header")
        }
        /// Unsupported kind of request body (transfer-encoding)
        UnsupportedBody {
            description("this kind of request body is not supported")
        }
        /// Request body is larger than `Config::max_body_size`
        RequestTooLong {
            description("request body is too big")
        }
        /// Single value was requested, but multiple values are present
        ///
        /// Returned by `Request::header` and `Request::query_param`
        DuplicateHeader(name: String) {
            description("duplicate value")
            display("duplicate value of {:?}", name)
        }
        /// Websocket framing error
        WebSocket(err: websocket::Error) {
            description("websocket error")
            display("websocket error: {}", err)
            from()
        }
    }
}

quick_error! {
    /// Error registering a listening socket
    #[derive(Debug)]
    pub enum ListenError {
        /// Port zero was passed
        ZeroPort {
            description("port must be non-zero")
        }
        /// Address is neither empty nor an IP literal
        InvalidAddress(addr: String) {
            description("invalid listening address")
            display("invalid listening address {:?}", addr)
        }
        /// Can't bind a socket
        Bind(err: io::Error) {
            description("can't bind a socket")
            display("can't bind a socket: {}", err)
        }
    }
}

impl Error {
    /// HTTP status that should be sent to the peer for this error
    ///
    /// `None` means that there is nothing sensible to reply with and
    /// the connection should just be closed.
    pub fn status(&self) -> Option<Status> {
        use self::Error::*;
        match *self {
            ParseError(..) | BadRequestTarget | HeaderInvalid(..)
            | ContentLengthInvalid | DuplicateContentLength
            | DuplicateHeader(..)
            => Some(Status::BadRequest),
            RequestLineTooLong => Some(Status::RequestURITooLong),
            HeaderTooLong => Some(Status::RequestHeaderFieldsTooLarge),
            RequestTooLong => Some(Status::PayloadTooLarge),
            UnsupportedMethod(..) | UnsupportedBody
            => Some(Status::NotImplemented),
            Io(..) | WebSocket(..) | ConnectionReset => None,
        }
    }
}
