use std::io::Write;

use netbuf::Buf;

use enums::{Status, reason_phrase};
use headers::{is_content_length, is_date, is_valid_name, is_valid_value};
use super::Response;


#[cfg(feature="date_header")]
fn add_date(buf: &mut Buf) {
    use httpdate::HttpDate;
    use std::time::SystemTime;
    write!(buf, "Date: {}\r\n", HttpDate::from(SystemTime::now()))
        .expect("writing to a buffer always succeeds");
}

#[cfg(not(feature="date_header"))]
fn add_date(_buf: &mut Buf) {
}

/// Serialize the response into the output buffer
///
/// The `Content-Length` is always computed from the body. It's omitted
/// only for an empty body of a status that can't have one (1xx, 204, 304).
/// Headers that can't be serialized safely are skipped with a warning.
pub fn write_response(buf: &mut Buf, resp: &Response) {
    let code = resp.get_code();
    write!(buf, "{} {:03} {}\r\n",
        resp.get_version(), code, reason_phrase(code))
        .expect("writing to a buffer always succeeds");
    let mut has_date = false;
    for &(ref name, ref value) in resp.headers() {
        if is_content_length(name) {
            warn!("Content-Length is set by the server, \
                   header {:?} ignored", value);
            continue;
        }
        if !is_valid_name(name) || !is_valid_value(value) {
            warn!("Invalid header {:?}: {:?} ignored", name, value);
            continue;
        }
        if is_date(name) {
            has_date = true;
        }
        write!(buf, "{}: {}\r\n", name, value)
            .expect("writing to a buffer always succeeds");
    }
    if !has_date {
        add_date(buf);
    }
    if resp.body().len() > 0 || Status::code_allows_body(code) {
        write!(buf, "Content-Length: {}\r\n", resp.body().len())
            .expect("writing to a buffer always succeeds");
    }
    buf.extend(b"\r\n");
    buf.extend(resp.body());
}

#[cfg(test)]
mod test {
    use std::str::from_utf8;
    use netbuf::Buf;
    use enums::{Status, Version};
    use server::Response;
    use super::write_response;

    fn serialize(resp: &Response) -> String {
        let mut buf = Buf::new();
        write_response(&mut buf, resp);
        let text = from_utf8(&buf[..]).unwrap().to_string();
        // strip date so output is predictable
        text.split("\r\n")
            .filter(|line| !line.starts_with("Date: "))
            .collect::<Vec<_>>()
            .join("\r\n")
    }

    #[test]
    fn simple() {
        let mut resp = Response::new();
        resp.add_header("Content-Type", "text/plain").set_body("hello");
        assert_eq!(serialize(&resp),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: 5\r\n\
             \r\n\
             hello");
    }

    #[test]
    fn empty_body_keeps_framing() {
        let mut resp = Response::for_version(Version::Http10);
        resp.status(Status::NotFound);
        assert_eq!(serialize(&resp),
            "HTTP/1.0 404 Not Found\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn no_length_without_body() {
        let mut resp = Response::new();
        resp.status(Status::NoContent);
        assert_eq!(serialize(&resp), "HTTP/1.1 204 No Content\r\n\r\n");
        let mut resp = Response::new();
        resp.status(Status::SwitchingProtocol)
            .add_header("Upgrade", "websocket");
        assert_eq!(serialize(&resp),
            "HTTP/1.1 101 Switching Protocols\r\n\
             Upgrade: websocket\r\n\r\n");
    }

    #[test]
    fn custom_code() {
        let mut resp = Response::new();
        resp.code(299);
        assert_eq!(serialize(&resp),
            "HTTP/1.1 299 Success\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn bad_headers_dropped() {
        let mut resp = Response::new();
        resp.add_header("Content-Length", "100")
            .add_header("Bad Name", "x")
            .add_header("X-Inject", "a\r\nSet-Cookie: x")
            .add_header("X-Good", "yes")
            .set_body("ok");
        assert_eq!(serialize(&resp),
            "HTTP/1.1 200 OK\r\nX-Good: yes\r\nContent-Length: 2\r\n\r\nok");
    }

    #[cfg(feature="date_header")]
    #[test]
    fn date_added_once() {
        let mut buf = Buf::new();
        write_response(&mut buf, &Response::new());
        let text = from_utf8(&buf[..]).unwrap().to_string();
        assert_eq!(text.matches("Date: ").count(), 1);

        let mut resp = Response::new();
        resp.add_header("Date", "Thu, 01 Jan 1970 00:00:00 GMT");
        let mut buf = Buf::new();
        write_response(&mut buf, &resp);
        let text = from_utf8(&buf[..]).unwrap().to_string();
        assert_eq!(text.matches("Date: ").count(), 1);
        assert!(text.contains("Date: Thu, 01 Jan 1970 00:00:00 GMT\r\n"));
    }
}
