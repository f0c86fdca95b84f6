//! HTTP/1.x keep-alive server protocol with in-place websocket upgrade
//!
//! Every accepted connection is driven by a single `server::Proto` future:
//! it receives one request at a time, hands it to your `server::Handler`,
//! sends the response back and waits for the next one (or closes the
//! connection). A handler may switch a connection to websockets, after which
//! the same future delivers websocket messages instead of requests.
#![recursion_limit="100"]

extern crate futures;
extern crate url;
extern crate sha1;
extern crate httparse;
extern crate byteorder;
extern crate tokio_core;
extern crate tokio_io;
extern crate netbuf;
extern crate tk_bufstream;
extern crate tk_listen;
#[macro_use(quick_error)] extern crate quick_error;
#[macro_use] extern crate matches;
#[macro_use] extern crate log;
#[cfg(feature="date_header")] extern crate httpdate;

pub mod server;
pub mod websocket;
pub mod enums;
mod headers;

pub use enums::{Method, Status, Version};
