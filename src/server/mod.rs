//! HTTP server protocol implementation
//!
//! Every accepted connection is served by a `Proto` future. It reads
//! requests one by one, passes them to the `Handler` and writes responses
//! back. The handler may upgrade the connection to the websocket protocol,
//! after which it receives `websocket::Message`'s instead of requests.
//!
use std::time::Duration;


mod config;
mod connection;
mod encoder;
mod error;
mod handler;
mod listener;
mod proto;
mod request;
mod request_target;
mod response;
mod simple_error_page;
mod websocket;

pub use self::connection::Connection;
pub use self::error::{Error, ListenError};
pub use self::handler::Handler;
pub use self::listener::{Server, bind_address};
pub use self::proto::Proto;
pub use self::request::Request;
pub use self::response::Response;
pub use self::simple_error_page::error_page;


/// Error returned by a handler
///
/// Handler errors never close the server, they are replied with a
/// `500 Internal Server Error` (or close the websocket).
pub type HandlerError = Box<::std::error::Error + Send + Sync>;


/// Fine-grained configuration of the HTTP server
#[derive(Debug, Clone)]
pub struct Config {
    max_request_line_size: usize,
    max_body_size: usize,
    keep_alive_timeout: Duration,
    max_message_size: usize,
    websocket_idle_timeout: Duration,
    max_connections: usize,
    expose_handler_errors: bool,
}
