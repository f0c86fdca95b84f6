use std::fmt::Display;
use std::mem;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::{Future, Poll, Async};
use tokio_core::reactor::{Handle, Timeout};
use tokio_io::{AsyncRead, AsyncWrite};

use enums::{Status, Version};
use headers::is_connection;
use websocket::{Message, Opcode};
use super::{Config, Connection, Error, Handler, Request, Response};
use super::config::timeout_limit;
use super::simple_error_page::error_page;


enum State {
    Receiving,
    /// Flushing the output buffer, then resolving the future
    Closing(Option<Error>),
    Closed,
}

/// A future that serves a single connection until it's closed
///
/// Requests (and after the upgrade, websocket messages) are processed one
/// at a time: the next one is not read until the response to the previous
/// one is fully flushed to the network.
///
/// Future resolves successfully when connection is closed in a normal way
/// (by peer, by the idle timeout, or when request did not ask to keep
/// connection alive). Protocol errors resolve the future with an error,
/// handler errors never do.
pub struct Proto<S, H: Handler<S>> {
    conn: Connection<S, H::Data>,
    handler: H,
    config: Arc<Config>,
    handle: Handle,
    idle: Option<Timeout>,
    state: State,
}

fn internal_error<E: Display>(version: Version, err: E, expose: bool)
    -> Response
{
    let body = if expose {
        format!("Internal server error:\n{}", err)
    } else {
        String::from("Internal server error")
    };
    let mut resp = Response::for_version(version);
    resp.status(Status::InternalServerError)
        .add_header("Content-Type", "text/plain")
        .set_body(body);
    resp
}

impl<S: AsyncRead + AsyncWrite, H: Handler<S>> Proto<S, H> {
    /// Create a connection state machine for an accepted socket
    pub fn new(socket: S, peer_addr: SocketAddr, handler: H,
               config: &Arc<Config>, handle: &Handle)
        -> Proto<S, H>
    {
        let data = handler.connection_data(peer_addr);
        let mut proto = Proto {
            conn: Connection::new(socket, peer_addr, data),
            handler: handler,
            config: config.clone(),
            handle: handle.clone(),
            idle: None,
            state: State::Receiving,
        };
        proto.arm_watchdog();
        return proto;
    }

    fn arm_watchdog(&mut self) {
        let limit = if self.conn.is_websocket() {
            self.config.websocket_idle_timeout
        } else {
            self.config.keep_alive_timeout
        };
        self.idle = match timeout_limit(limit) {
            Some(dur) => match Timeout::new(dur, &self.handle) {
                Ok(timeout) => Some(timeout),
                Err(e) => {
                    error!("Can't create idle timer for {}: {}",
                        self.conn.peer_addr(), e);
                    None
                }
            },
            None => None,
        };
    }

    fn watchdog_fired(&mut self) -> Result<bool, Error> {
        match self.idle {
            Some(ref mut timeout) => Ok(timeout.poll()?.is_ready()),
            None => Ok(false),
        }
    }

    /// Receives and dispatches a single request or message
    ///
    /// Returns `Ready(None)` when peer closed the connection.
    fn receive(&mut self) -> Poll<Option<()>, Error> {
        if self.conn.is_websocket() {
            let max = self.config.max_message_size;
            match self.conn.poll_message(max)? {
                Async::Ready(Some(msg)) => {
                    self.idle = None;
                    self.dispatch_message(msg);
                }
                Async::Ready(None) => return Ok(Async::Ready(None)),
                Async::NotReady => return Ok(Async::NotReady),
            }
        } else {
            let max_line = self.config.max_request_line_size;
            let max_body = self.config.max_body_size;
            match self.conn.poll_request(max_line, max_body)? {
                Async::Ready(Some(req)) => {
                    self.idle = None;
                    self.dispatch_request(req);
                }
                Async::Ready(None) => return Ok(Async::Ready(None)),
                Async::NotReady => return Ok(Async::NotReady),
            }
        }
        if let State::Receiving = self.state {
            self.arm_watchdog();
        }
        Ok(Async::Ready(Some(())))
    }

    fn dispatch_request(&mut self, req: Request) {
        let keep_alive = req.keep_alive();
        let version = req.version();
        debug!("{} {} {}", self.conn.peer_addr(), req.method(), req.path());
        let result = self.handler.request(&mut self.conn, req);
        let upgraded = self.conn.is_websocket();
        let expose = self.config.expose_handler_errors;
        let mut resp = match result {
            Ok(Some(_)) if upgraded => {
                warn!("Response returned after websocket upgrade \
                    of {}, ignored", self.conn.peer_addr());
                return;
            }
            Ok(Some(resp)) => resp,
            Ok(None) if upgraded => return,
            Ok(None) => {
                warn!("Handler returned no response for {} \
                    without websocket upgrade", self.conn.peer_addr());
                internal_error(version,
                    "request handler returned no response", expose)
            }
            Err(ref e) if upgraded => {
                error!("Error handling request from {}: {}",
                    self.conn.peer_addr(), e);
                // handshake is already sent, so just flush and close
                self.state = State::Closing(None);
                return;
            }
            Err(e) => {
                let status = e.downcast_ref::<Error>()
                    .and_then(|e| e.status());
                if let Some(status) = status {
                    debug!("Bad request from {}: {}",
                        self.conn.peer_addr(), e);
                    self.conn.send_response(&error_page(version, status));
                    self.state = State::Closing(None);
                    return;
                }
                error!("Error handling request from {}: {}",
                    self.conn.peer_addr(), e);
                internal_error(version, e, expose)
            }
        };
        if !keep_alive {
            if !resp.headers().iter().any(|&(ref n, _)| is_connection(n)) {
                resp.add_header("Connection", "close");
            }
            self.state = State::Closing(None);
        }
        self.conn.send_response(&resp);
    }

    fn dispatch_message(&mut self, msg: Message) {
        match msg.opcode {
            Opcode::Ping => {
                self.conn.send_message(&msg.data, Opcode::Pong);
            }
            Opcode::Pong => {}
            Opcode::Close => {
                debug!("Websocket {} closed by peer", self.conn.peer_addr());
                self.conn.send_message(&msg.data, Opcode::Close);
                self.state = State::Closing(None);
            }
            Opcode::Text | Opcode::Binary | Opcode::Continuation => {
                if let Err(e) = self.handler.message(&mut self.conn, msg) {
                    error!("Error handling message from {}: {}",
                        self.conn.peer_addr(), e);
                    self.state = State::Closed;
                }
            }
        }
    }

    /// Reply with an error page if it makes sense for this error
    ///
    /// Returns the error back if connection should be dropped right away.
    fn protocol_error(&mut self, e: Error) -> Result<(), Error> {
        debug!("Protocol error on {}: {}", self.conn.peer_addr(), e);
        if !self.conn.is_websocket() {
            if let Some(status) = e.status() {
                let version = self.conn.pending_version()
                    .unwrap_or(Version::Http11);
                self.conn.send_response(&error_page(version, status));
                self.idle = None;
                self.state = State::Closing(Some(e));
                return Ok(());
            }
        }
        self.state = State::Closed;
        Err(e)
    }

    /// Returns the connection of this protocol
    pub fn connection(&self) -> &Connection<S, H::Data> {
        &self.conn
    }
}

impl<S: AsyncRead + AsyncWrite, H: Handler<S>> Future for Proto<S, H> {
    type Item = ();
    type Error = Error;

    fn poll(&mut self) -> Poll<(), Error> {
        loop {
            if let State::Closed = self.state {
                return Ok(Async::Ready(()));
            }
            if let Err(e) = self.conn.flush() {
                self.state = State::Closed;
                return Err(e);
            }
            if let State::Closing(_) = self.state {
                if self.conn.bytes_buffered() > 0 {
                    return Ok(Async::NotReady);
                }
                match mem::replace(&mut self.state, State::Closed) {
                    State::Closing(Some(e)) => return Err(e),
                    _ => return Ok(Async::Ready(())),
                }
            }
            if self.conn.bytes_buffered() == 0 {
                match self.receive() {
                    Ok(Async::Ready(Some(()))) => continue,
                    Ok(Async::Ready(None)) => {
                        debug!("Connection {} closed by peer",
                            self.conn.peer_addr());
                        self.state = State::Closed;
                        return Ok(Async::Ready(()));
                    }
                    Ok(Async::NotReady) => {}
                    Err(e) => {
                        self.protocol_error(e)?;
                        continue;
                    }
                }
            }
            if self.watchdog_fired()? {
                debug!("Connection {} is idle, closing",
                    self.conn.peer_addr());
                self.state = State::Closed;
                return Ok(Async::Ready(()));
            }
            return Ok(Async::NotReady);
        }
    }
}
