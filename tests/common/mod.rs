#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use futures::sync::oneshot;
use httparse;
use rand::{self, Rng};
use tokio_core::net;
use tokio_core::reactor::Core;

use tk_frontdoor::server::{Config, Handler, Server};


/// Runs the server on this thread and the `client` in another one
///
/// Returns whatever client returns, panics if client panics.
pub fn serve<H, F, T>(handler: H, config: Arc<Config>, client: F) -> T
    where H: Handler<net::TcpStream> + Clone + 'static,
          F: FnOnce(SocketAddr) -> T + Send + 'static,
          T: Send + 'static,
{
    let mut core = Core::new().unwrap();
    let handle = core.handle();
    let listener = net::TcpListener::bind(
        &"127.0.0.1:0".parse().unwrap(), &handle).unwrap();
    let server = Server::new(handler, &config, &handle);
    let addr = server.accept(listener).unwrap();
    let (tx, rx) = oneshot::channel();
    thread::spawn(move || {
        tx.send(client(addr)).ok();
    });
    core.run(rx).expect("client thread failed")
}

pub fn connect(addr: SocketAddr) -> TcpStream {
    let sock = TcpStream::connect(addr).unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    sock
}

#[derive(Debug)]
pub struct Reply {
    pub minor_version: u8,
    pub code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|&&(ref n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, ref v)| &v[..])
    }
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn parse_reply(buf: &[u8]) -> Option<Reply> {
    let mut headers = [httparse::EMPTY_HEADER; 32];
    let mut resp = httparse::Response::new(&mut headers);
    let head = match resp.parse(buf).expect("valid response") {
        httparse::Status::Complete(n) => n,
        httparse::Status::Partial => return None,
    };
    let headers = resp.headers.iter()
        .map(|h| (h.name.to_string(),
                  String::from_utf8_lossy(h.value).into_owned()))
        .collect::<Vec<_>>();
    let length = headers.iter()
        .find(|&&(ref n, _)| n.eq_ignore_ascii_case("Content-Length"))
        .map(|&(_, ref v)| v.parse::<usize>().unwrap())
        .unwrap_or(0);
    if buf.len() < head + length {
        return None;
    }
    Some(Reply {
        minor_version: resp.version.unwrap(),
        code: resp.code.unwrap(),
        headers: headers,
        body: buf[head..head+length].to_vec(),
    })
}

/// Reads a single response, `None` if connection closed before that
pub fn read_response(sock: &mut TcpStream) -> Option<Reply> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(reply) = parse_reply(&buf) {
            return Some(reply);
        }
        match sock.read(&mut chunk) {
            Ok(0) => return None,
            Ok(n) => buf.extend(&chunk[..n]),
            Err(ref e) if e.kind() == io::ErrorKind::ConnectionReset
            => return None,
            Err(e) => panic!("read error: {}", e),
        }
    }
}

pub fn request(sock: &mut TcpStream, data: &str) -> Option<Reply> {
    sock.write_all(data.as_bytes()).unwrap();
    read_response(sock)
}

/// Returns true if the peer closes connection without sending anything
pub fn is_closed(sock: &mut TcpStream) -> bool {
    let mut buf = [0u8; 1];
    match sock.read(&mut buf) {
        Ok(0) => true,
        Ok(_) => false,
        Err(ref e) if e.kind() == io::ErrorKind::ConnectionReset => true,
        Err(_) => false,
    }
}

/// Writes a masked client frame with fin bit set
pub fn write_frame(sock: &mut TcpStream, opcode: u8, data: &[u8]) {
    let mut mask = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut mask);
    let mut frame = vec![0x80 | opcode];
    let len = data.len();
    if len < 126 {
        frame.push(0x80 | len as u8);
    } else if len < 65536 {
        frame.push(0x80 | 126);
        frame.extend(&[(len >> 8) as u8, len as u8]);
    } else {
        frame.push(0x80 | 127);
        for shift in (0..8).rev() {
            frame.push((len as u64 >> (shift * 8)) as u8);
        }
    }
    frame.extend(&mask);
    frame.extend(data.iter().enumerate().map(|(i, b)| b ^ mask[i % 4]));
    sock.write_all(&frame).unwrap();
}

/// Reads an unmasked server frame, `None` if connection is closed
pub fn read_frame(sock: &mut TcpStream) -> Option<(u8, Vec<u8>)> {
    let mut head = [0u8; 2];
    if sock.read_exact(&mut head).is_err() {
        return None;
    }
    assert_eq!(head[0] & 0x80, 0x80, "fin bit is set");
    assert_eq!(head[1] & 0x80, 0, "server frames are not masked");
    let len = match head[1] & 0x7F {
        126 => {
            let mut ext = [0u8; 2];
            sock.read_exact(&mut ext).unwrap();
            ((ext[0] as usize) << 8) | ext[1] as usize
        }
        127 => {
            let mut ext = [0u8; 8];
            sock.read_exact(&mut ext).unwrap();
            ext.iter().fold(0, |acc, &b| (acc << 8) | b as usize)
        }
        len => len as usize,
    };
    let mut data = vec![0u8; len];
    sock.read_exact(&mut data).unwrap();
    Some((head[0] & 0x0F, data))
}

pub const HANDSHAKE: &'static str = "\
    GET /ws HTTP/1.1\r\n\
    Host: localhost\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    Sec-WebSocket-Version: 13\r\n\
    \r\n";
