use std::net::SocketAddr;
use std::rc::Rc;
use std::sync::Arc;

use websocket::Message;
use super::{Connection, Request, Response, HandlerError};


/// Application logic of the server
///
/// A handler is shared by all connections of the server (wrap it into
/// an `Rc` or `Arc`), per-connection state lives in `Self::Data`.
pub trait Handler<S> {
    /// Arbitrary data attached to every connection
    type Data: Default;

    /// Create data for the new connection
    fn connection_data(&self, _peer_addr: SocketAddr) -> Self::Data {
        Default::default()
    }

    /// Handle a request
    ///
    /// Return `Ok(Some(response))` to send a response. Return `Ok(None)`
    /// only after a successful `conn.upgrade(&req)`, in which case the
    /// connection switches to the websocket protocol. Errors are replied
    /// with `500 Internal Server Error`.
    fn request(&self, conn: &mut Connection<S, Self::Data>, req: Request)
        -> Result<Option<Response>, HandlerError>;

    /// Handle a websocket message (text or binary)
    ///
    /// Reply with `conn.send_message()`. Returning an error closes the
    /// connection immediately.
    fn message(&self, _conn: &mut Connection<S, Self::Data>, _msg: Message)
        -> Result<(), HandlerError>
    {
        Ok(())
    }
}

impl<S, H: Handler<S>> Handler<S> for Rc<H> {
    type Data = H::Data;
    fn connection_data(&self, peer_addr: SocketAddr) -> Self::Data {
        (**self).connection_data(peer_addr)
    }
    fn request(&self, conn: &mut Connection<S, Self::Data>, req: Request)
        -> Result<Option<Response>, HandlerError>
    {
        (**self).request(conn, req)
    }
    fn message(&self, conn: &mut Connection<S, Self::Data>, msg: Message)
        -> Result<(), HandlerError>
    {
        (**self).message(conn, msg)
    }
}

impl<S, H: Handler<S>> Handler<S> for Arc<H> {
    type Data = H::Data;
    fn connection_data(&self, peer_addr: SocketAddr) -> Self::Data {
        (**self).connection_data(peer_addr)
    }
    fn request(&self, conn: &mut Connection<S, Self::Data>, req: Request)
        -> Result<Option<Response>, HandlerError>
    {
        (**self).request(conn, req)
    }
    fn message(&self, conn: &mut Connection<S, Self::Data>, msg: Message)
        -> Result<(), HandlerError>
    {
        (**self).message(conn, msg)
    }
}
