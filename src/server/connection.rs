use std::net::SocketAddr;
use std::time::Instant;

use futures::{Async, Poll};
use tk_bufstream::IoBuf;
use tokio_io::{AsyncRead, AsyncWrite};

use enums::Version;
use websocket::{Message, Opcode, parse_frame, write_frame};
use super::{Error, Request, Response};
use super::encoder::write_response;
use super::request::sniff_version;
use super::websocket::{get_handshake, handshake_response};


/// A single client connection
///
/// This is the thing that handlers receive along with every request or
/// message. It owns the socket with its input and output buffers, and an
/// arbitrary per-connection `data` created by `Handler::connection_data`.
///
/// Everything written to the connection is buffered and flushed by the
/// protocol loop.
pub struct Connection<S, D> {
    io: IoBuf<S>,
    peer_addr: SocketAddr,
    last_communication: Instant,
    websocket: bool,
    data: D,
}

impl<S: AsyncRead + AsyncWrite, D> Connection<S, D> {
    pub fn new(socket: S, peer_addr: SocketAddr, data: D)
        -> Connection<S, D>
    {
        Connection {
            io: IoBuf::new(socket),
            peer_addr: peer_addr,
            last_communication: Instant::now(),
            websocket: false,
            data: data,
        }
    }
    /// Receive the next request
    ///
    /// `Ready(None)` means peer closed the connection cleanly, i.e. not in
    /// the middle of the request.
    pub fn poll_request(&mut self, max_line: usize, max_body: usize)
        -> Poll<Option<Request>, Error>
    {
        loop {
            let req = Request::parse_from(&mut self.io.in_buf,
                                          max_line, max_body)?;
            if let Some(req) = req {
                self.last_communication = Instant::now();
                return Ok(Async::Ready(Some(req)));
            }
            if self.io.read()? == 0 {
                return self.read_stopped();
            }
        }
    }
    /// Receive the next websocket message
    ///
    /// `Ready(None)` means peer closed the connection cleanly.
    pub fn poll_message(&mut self, max_size: usize)
        -> Poll<Option<Message>, Error>
    {
        loop {
            let parsed = match parse_frame(&mut self.io.in_buf, max_size)? {
                Some((frame, bytes)) => Some((Message::from(frame), bytes)),
                None => None,
            };
            if let Some((msg, bytes)) = parsed {
                self.io.in_buf.consume(bytes);
                self.last_communication = Instant::now();
                return Ok(Async::Ready(Some(msg)));
            }
            if self.io.read()? == 0 {
                return self.read_stopped();
            }
        }
    }
    fn read_stopped<T>(&self) -> Poll<Option<T>, Error> {
        if !self.io.done() {
            Ok(Async::NotReady)
        } else if self.io.in_buf.len() == 0 {
            Ok(Async::Ready(None))
        } else {
            Err(Error::ConnectionReset)
        }
    }
    /// Write as much of the output buffer as the socket accepts
    pub fn flush(&mut self) -> Result<(), Error> {
        self.io.flush()?;
        Ok(())
    }
}

impl<S, D> Connection<S, D> {
    /// Serialize response into the output buffer
    pub fn send_response(&mut self, resp: &Response) {
        write_response(&mut self.io.out_buf, resp);
    }
    /// Send a single websocket frame with the specified payload
    pub fn send_message(&mut self, data: &[u8], opcode: Opcode) {
        write_frame(&mut self.io.out_buf, opcode, data);
    }
    /// Switch connection to the websocket protocol if request allows
    ///
    /// Sends `101 Switching Protocols` and returns true when request is
    /// a valid handshake. Otherwise nothing is sent and the handler is
    /// expected to return a usual response. Once upgraded, connection never
    /// goes back to HTTP.
    pub fn upgrade(&mut self, req: &Request) -> bool {
        if self.websocket {
            return false;
        }
        let accept = match get_handshake(req) {
            Some(accept) => accept,
            None => return false,
        };
        debug!("Upgrading {} to websocket", self.peer_addr);
        write_response(&mut self.io.out_buf,
            &handshake_response(req, &accept));
        self.websocket = true;
        return true;
    }
    pub fn is_websocket(&self) -> bool {
        self.websocket
    }
    /// Time when the last full request or message was received
    pub fn last_communication(&self) -> Instant {
        self.last_communication
    }
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
    pub fn data(&self) -> &D {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }
    /// HTTP version of the request that is in the input buffer, if known
    pub(super) fn pending_version(&self) -> Option<Version> {
        sniff_version(&self.io.in_buf[..])
    }
    /// Number of bytes not yet written to the socket
    pub fn bytes_buffered(&self) -> usize {
        self.io.out_buf.len()
    }
}
