use enums::{Method, Status};
use websocket::Accept;
use super::{Request, Response};


/// Returns the accept value if request is a valid websocket handshake
///
/// A request with duplicate `Connection`, `Upgrade` or `Sec-WebSocket-Key`
/// headers is not considered a handshake.
pub fn get_handshake(req: &Request) -> Option<Accept> {
    if req.method() != Method::Get {
        return None;
    }
    match req.header("Connection") {
        Ok(Some(val)) if val.eq_ignore_ascii_case("upgrade") => {}
        _ => {
            debug!("No `Connection: upgrade` for a websocket");
            return None;
        }
    }
    match req.header("Upgrade") {
        Ok(Some(val)) if val.eq_ignore_ascii_case("websocket") => {}
        _ => {
            debug!("No `Upgrade: websocket` for a websocket");
            return None;
        }
    }
    match req.header("Sec-WebSocket-Key") {
        Ok(Some(key)) => Some(Accept::from_key_bytes(key.as_bytes())),
        _ => {
            debug!("No valid Sec-WebSocket-Key for a websocket");
            None
        }
    }
}

/// The `101 Switching Protocols` response to the handshake
pub fn handshake_response(req: &Request, accept: &Accept) -> Response {
    let mut resp = Response::for_version(req.version());
    resp.status(Status::SwitchingProtocol)
        .add_header("Upgrade", "websocket")
        .add_header("Connection", "upgrade")
        .add_header("Sec-WebSocket-Accept", accept.to_string());
    resp
}

#[cfg(test)]
mod test {
    use netbuf::Buf;
    use server::Request;
    use super::{get_handshake, handshake_response};

    fn request(data: &[u8]) -> Request {
        let mut buf = Buf::new();
        buf.extend(data);
        Request::parse_from(&mut buf, 4096, 0).unwrap().unwrap()
    }

    #[test]
    fn valid() {
        let req = request(b"GET /chat HTTP/1.1\r\n\
            Host: server.example.com\r\n\
            Upgrade: WebSocket\r\n\
            Connection: Upgrade\r\n\
            Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
            Sec-WebSocket-Version: 13\r\n\r\n");
        let accept = get_handshake(&req).unwrap();
        assert_eq!(accept.to_string(), "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
        let resp = handshake_response(&req, &accept);
        assert_eq!(resp.get_code(), 101);
        assert_eq!(resp.header("Upgrade"), Some("websocket"));
        assert_eq!(resp.header("Connection"), Some("upgrade"));
        assert_eq!(resp.header("Sec-WebSocket-Accept"),
                   Some("s3pPLMBiTxaQ9kYGzzhZRbK+xOo="));
    }

    #[test]
    fn not_eligible() {
        // wrong method
        assert!(get_handshake(&request(b"POST / HTTP/1.1\r\n\
            Upgrade: websocket\r\nConnection: upgrade\r\n\
            Sec-WebSocket-Key: x\r\n\r\n")).is_none());
        // no key
        assert!(get_handshake(&request(b"GET / HTTP/1.1\r\n\
            Upgrade: websocket\r\nConnection: upgrade\r\n\r\n")).is_none());
        // token list is not an exact match
        assert!(get_handshake(&request(b"GET / HTTP/1.1\r\n\
            Upgrade: websocket\r\nConnection: keep-alive, Upgrade\r\n\
            Sec-WebSocket-Key: x\r\n\r\n")).is_none());
        // other protocol
        assert!(get_handshake(&request(b"GET / HTTP/1.1\r\n\
            Upgrade: h2c\r\nConnection: upgrade\r\n\
            Sec-WebSocket-Key: x\r\n\r\n")).is_none());
        // ambiguous key
        assert!(get_handshake(&request(b"GET / HTTP/1.1\r\n\
            Upgrade: websocket\r\nConnection: upgrade\r\n\
            Sec-WebSocket-Key: x\r\nSec-WebSocket-Key: y\r\n\r\n"))
            .is_none());
    }
}
