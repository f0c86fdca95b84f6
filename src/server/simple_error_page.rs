use enums::{Status, Version};
use super::Response;

const PART1: &'static str = "\
    <!DOCTYPE html>
    <html>\
        <head>\
            <title>\
    ";
const PART2: &'static str = "\
            </title>\
        </head>\
        <body>\
            <h1>\
    ";
const PART3: &'static str = concat!("\
            </h1>\
            <hr>\
            <p>Yours faithfully,<br>\
                tk-frontdoor/", env!("CARGO_PKG_VERSION"), "\
            </p>
        </body>
    </html>
    ");

/// Generates a response with the default error page
///
/// Error pages are only sent right before closing the connection, so
/// `Connection: close` is always there.
pub fn error_page(version: Version, status: Status) -> Response {
    let body = format!("{p1}{code:03} {status}{p2}{code:03} {status}{p3}",
        code=status.code(), status=status.reason(),
        p1=PART1, p2=PART2, p3=PART3);
    let mut resp = Response::for_version(version);
    resp.status(status)
        .add_header("Content-Type", "text/html")
        .add_header("Connection", "close")
        .set_body(body);
    resp
}
