use std::time::Duration;
use std::sync::Arc;

use server::{Config};


impl Config {
    /// Create a config with defaults
    pub fn new() -> Config {
        Config {
            max_request_line_size: 4096,
            max_body_size: 2 << 20,
            keep_alive_timeout: Duration::new(300, 0),
            max_message_size: 2 << 20,
            websocket_idle_timeout: Duration::new(0, 0),
            max_connections: 1000,
            expose_handler_errors: true,
        }
    }
    /// Maximum size of the request line and of every header line
    ///
    /// Default is 4096 bytes. Longer request line is answered with
    /// `414 Request-URI Too Long`, longer header with `431`, and the
    /// connection is closed in both cases.
    pub fn max_request_line_size(&mut self, value: usize) -> &mut Self {
        self.max_request_line_size = value;
        self
    }
    /// Maximum size of the request body
    ///
    /// Default is 2 MiB. The `Content-Length` is checked before any byte
    /// of the body is read, request is answered with `413` and the
    /// connection is closed.
    pub fn max_body_size(&mut self, value: usize) -> &mut Self {
        self.max_body_size = value;
        self
    }
    /// Time an HTTP connection may stay idle waiting for the next request
    ///
    /// Default is 5 minutes. Zero duration means no limit.
    ///
    /// Note: the timer restarts only when a full request has been
    /// received, a slowly trickling request is not considered activity.
    pub fn keep_alive_timeout(&mut self, value: Duration) -> &mut Self {
        self.keep_alive_timeout = value;
        self
    }
    /// Maximum size of the websocket message (frame payload)
    ///
    /// Default is 2 MiB. If some frame declares size larger than this,
    /// we immediately abort the connection.
    pub fn max_message_size(&mut self, value: usize) -> &mut Self {
        self.max_message_size = value;
        self
    }
    /// Time a websocket may stay idle waiting for the next message
    ///
    /// Default is zero, which means no limit.
    pub fn websocket_idle_timeout(&mut self, value: Duration) -> &mut Self {
        self.websocket_idle_timeout = value;
        self
    }
    /// A number of connections that `Server` keeps at once
    ///
    /// When the limit is reached we stop accepting connections until some
    /// of them are closed.
    pub fn max_connections(&mut self, value: usize) -> &mut Self {
        self.max_connections = value;
        self
    }
    /// Whether to send the text of handler errors in `500` responses
    ///
    /// Default is `true`. When disabled, the body of the response is
    /// generic and the error is only logged.
    pub fn expose_handler_errors(&mut self, value: bool) -> &mut Self {
        self.expose_handler_errors = value;
        self
    }
    /// Create a Arc'd config clone to pass to the constructor
    ///
    /// This is just a convenience method.
    pub fn done(&mut self) -> Arc<Config> {
        Arc::new(self.clone())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

/// Timeout that is zero means "no timeout"
pub fn timeout_limit(dur: Duration) -> Option<Duration> {
    if dur == Duration::new(0, 0) {
        None
    } else {
        Some(dur)
    }
}
