use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use futures::{Future, Stream};
use tk_listen::ListenExt;
use tokio_core::net::{TcpListener, TcpStream};
use tokio_core::reactor::Handle;

use super::{Config, Handler, Proto, ListenError};


/// Resolves the address passed to `Server::listen`
///
/// Empty address means all interfaces, otherwise an IP literal is
/// expected. Zero port is not allowed.
pub fn bind_address(addr: &str, port: u16)
    -> Result<SocketAddr, ListenError>
{
    if port == 0 {
        return Err(ListenError::ZeroPort);
    }
    let ip = if addr.len() == 0 {
        IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
    } else {
        addr.parse()
            .map_err(|_| ListenError::InvalidAddress(addr.to_string()))?
    };
    Ok(SocketAddr::new(ip, port))
}

/// A listening server
///
/// Spawns the accept loop and a `Proto` per connection on the event loop
/// of the `handle`. Handler is cloned for every connection, so it's
/// usually an `Rc` or an `Arc`.
pub struct Server<H> {
    handler: H,
    config: Arc<Config>,
    handle: Handle,
}

impl<H> Server<H>
    where H: Handler<TcpStream> + Clone + 'static,
{
    pub fn new(handler: H, config: &Arc<Config>, handle: &Handle)
        -> Server<H>
    {
        Server {
            handler: handler,
            config: config.clone(),
            handle: handle.clone(),
        }
    }
    /// Bind the address and start accepting connections
    ///
    /// Returns the address actually bound.
    pub fn listen(&self, addr: &str, port: u16)
        -> Result<SocketAddr, ListenError>
    {
        let addr = bind_address(addr, port)?;
        let listener = TcpListener::bind(&addr, &self.handle)
            .map_err(ListenError::Bind)?;
        self.accept(listener)
    }
    /// Start accepting connections on the already bound listener
    pub fn accept(&self, listener: TcpListener)
        -> Result<SocketAddr, ListenError>
    {
        let addr = listener.local_addr().map_err(ListenError::Bind)?;
        info!("Listening on {}", addr);
        let handler = self.handler.clone();
        let config = self.config.clone();
        let handle = self.handle.clone();
        self.handle.spawn(listener.incoming()
            .sleep_on_error(Duration::from_millis(100), &self.handle)
            .map(move |(socket, peer_addr)| {
                debug!("Accepted connection from {}", peer_addr);
                Proto::new(socket, peer_addr, handler.clone(),
                           &config, &handle)
                .map_err(move |e| {
                    debug!("Connection {} error: {}", peer_addr, e);
                })
            })
            .listen(config_limit(&self.config)));
        Ok(addr)
    }
}

fn config_limit(config: &Config) -> usize {
    if config.max_connections == 0 {
        warn!("Zero max_connections is not allowed, using 1");
        1
    } else {
        config.max_connections
    }
}
