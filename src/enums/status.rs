/// Enum with HTTP status codes used by the server and its handlers
///
/// `Response` stores a plain numeric code, so any other code can be sent
/// too, this enum only gives names and reason phrases to the common ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    //  1xx status codes
    Continue,                       // 100
    SwitchingProtocol,              // 101
    //  2xx status codes
    Ok,                             // 200
    Created,                        // 201
    Accepted,                       // 202
    NoContent,                      // 204
    PartialContent,                 // 206
    //  3xx status codes
    MovedPermanently,               // 301
    Found,                          // 302
    SeeOther,                       // 303
    NotModified,                    // 304
    TemporaryRedirect,              // 307
    PermanentRedirect,              // 308
    //  4xx status codes
    BadRequest,                     // 400
    Unauthorized,                   // 401
    Forbidden,                      // 403
    NotFound,                       // 404
    MethodNotAllowed,               // 405
    RequestTimeout,                 // 408
    Conflict,                       // 409
    Gone,                           // 410
    LengthRequired,                 // 411
    PayloadTooLarge,                // 413
    RequestURITooLong,              // 414
    UnsupportedMediaType,           // 415
    UpgradeRequired,                // 426
    TooManyRequests,                // 429
    RequestHeaderFieldsTooLarge,    // 431
    //  5xx status codes
    InternalServerError,            // 500
    NotImplemented,                 // 501
    BadGateway,                     // 502
    ServiceUnavailable,             // 503
    GatewayTimeout,                 // 504
    VersionNotSupported,            // 505
}

const ALL: &'static [Status] = &[
    Status::Continue, Status::SwitchingProtocol,
    Status::Ok, Status::Created, Status::Accepted, Status::NoContent,
    Status::PartialContent,
    Status::MovedPermanently, Status::Found, Status::SeeOther,
    Status::NotModified, Status::TemporaryRedirect, Status::PermanentRedirect,
    Status::BadRequest, Status::Unauthorized, Status::Forbidden,
    Status::NotFound, Status::MethodNotAllowed, Status::RequestTimeout,
    Status::Conflict, Status::Gone, Status::LengthRequired,
    Status::PayloadTooLarge, Status::RequestURITooLong,
    Status::UnsupportedMediaType, Status::UpgradeRequired,
    Status::TooManyRequests, Status::RequestHeaderFieldsTooLarge,
    Status::InternalServerError, Status::NotImplemented, Status::BadGateway,
    Status::ServiceUnavailable, Status::GatewayTimeout,
    Status::VersionNotSupported,
];

impl Status {
    pub fn code(&self) -> u16 {
        use self::Status::*;
        match *self {
            Continue                        => 100,
            SwitchingProtocol               => 101,
            Ok                              => 200,
            Created                         => 201,
            Accepted                        => 202,
            NoContent                       => 204,
            PartialContent                  => 206,
            MovedPermanently                => 301,
            Found                           => 302,
            SeeOther                        => 303,
            NotModified                     => 304,
            TemporaryRedirect               => 307,
            PermanentRedirect               => 308,
            BadRequest                      => 400,
            Unauthorized                    => 401,
            Forbidden                       => 403,
            NotFound                        => 404,
            MethodNotAllowed                => 405,
            RequestTimeout                  => 408,
            Conflict                        => 409,
            Gone                            => 410,
            LengthRequired                  => 411,
            PayloadTooLarge                 => 413,
            RequestURITooLong               => 414,
            UnsupportedMediaType            => 415,
            UpgradeRequired                 => 426,
            TooManyRequests                 => 429,
            RequestHeaderFieldsTooLarge     => 431,
            InternalServerError             => 500,
            NotImplemented                  => 501,
            BadGateway                      => 502,
            ServiceUnavailable              => 503,
            GatewayTimeout                  => 504,
            VersionNotSupported             => 505,
        }
    }

    pub fn reason(&self) -> &'static str {
        use self::Status::*;
        match *self {
            Continue                        => "Continue",
            SwitchingProtocol               => "Switching Protocols",
            Ok                              => "OK",
            Created                         => "Created",
            Accepted                        => "Accepted",
            NoContent                       => "No Content",
            PartialContent                  => "Partial Content",
            MovedPermanently                => "Moved Permanently",
            Found                           => "Found",
            SeeOther                        => "See Other",
            NotModified                     => "Not Modified",
            TemporaryRedirect               => "Temporary Redirect",
            PermanentRedirect               => "Permanent Redirect",
            BadRequest                      => "Bad Request",
            Unauthorized                    => "Unauthorized",
            Forbidden                       => "Forbidden",
            NotFound                        => "Not Found",
            MethodNotAllowed                => "Method Not Allowed",
            RequestTimeout                  => "Request Timeout",
            Conflict                        => "Conflict",
            Gone                            => "Gone",
            LengthRequired                  => "Length Required",
            PayloadTooLarge                 => "Payload Too Large",
            RequestURITooLong               => "Request-URI Too Long",
            UnsupportedMediaType            => "Unsupported Media Type",
            UpgradeRequired                 => "Upgrade Required",
            TooManyRequests                 => "Too Many Requests",
            RequestHeaderFieldsTooLarge     => "Request Header Fields Too Large",
            InternalServerError             => "Internal Server Error",
            NotImplemented                  => "Not Implemented",
            BadGateway                      => "Bad Gateway",
            ServiceUnavailable              => "Service Unavailable",
            GatewayTimeout                  => "Gateway Timeout",
            VersionNotSupported             => "HTTP Version Not Supported",
        }
    }

    /// Find a named status for a numeric code
    pub fn from_code(code: u16) -> Option<Status> {
        ALL.iter().find(|s| s.code() == code).map(|&s| s)
    }

    /// Returns false for statuses that never carry a response body
    /// (1xx, 204 and 304)
    pub fn code_allows_body(code: u16) -> bool {
        !(code < 200 || code == 204 || code == 304)
    }
}

/// Reason phrase for the status line of arbitrary code
pub fn reason_phrase(code: u16) -> &'static str {
    match Status::from_code(code) {
        Some(status) => status.reason(),
        None => match code / 100 {
            1 => "Informational",
            2 => "Success",
            3 => "Redirection",
            4 => "Client Error",
            _ => "Server Error",
        },
    }
}
