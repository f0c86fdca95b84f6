//! Websocket support stuff
//!
//! Websockets are initiated by the server implementation (see
//! `server::Connection::upgrade`), this module only contains message types
//! and the frame codec.

mod error;
mod keys;
mod zero_copy;

pub use self::error::Error;
pub use self::keys::{Accept, GUID};
pub use self::zero_copy::{Frame, parse_frame, write_frame};


/// Websocket frame opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
}

/// A message received from the websocket
///
/// Every message is exactly one frame, fragmented messages are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub opcode: Opcode,
    pub data: Vec<u8>,
}

impl Opcode {
    pub fn from_u8(code: u8) -> Option<Opcode> {
        use self::Opcode::*;
        match code {
            0x0 => Some(Continuation),
            0x1 => Some(Text),
            0x2 => Some(Binary),
            0x8 => Some(Close),
            0x9 => Some(Ping),
            0xA => Some(Pong),
            _ => None,
        }
    }
    pub fn as_u8(&self) -> u8 {
        use self::Opcode::*;
        match *self {
            Continuation => 0x0,
            Text => 0x1,
            Binary => 0x2,
            Close => 0x8,
            Ping => 0x9,
            Pong => 0xA,
        }
    }
    /// Close, ping and pong frames
    pub fn is_control(&self) -> bool {
        self.as_u8() & 0x8 != 0
    }
}

impl Default for Opcode {
    fn default() -> Opcode {
        Opcode::Text
    }
}

impl Message {
    /// Text message
    pub fn text<S: Into<String>>(data: S) -> Message {
        Message { opcode: Opcode::Text, data: data.into().into_bytes() }
    }
    /// Binary message
    pub fn binary<D: Into<Vec<u8>>>(data: D) -> Message {
        Message { opcode: Opcode::Binary, data: data.into() }
    }
    /// Payload as a string if it's a text message with valid utf-8
    pub fn as_text(&self) -> Option<&str> {
        if self.opcode == Opcode::Text {
            ::std::str::from_utf8(&self.data).ok()
        } else {
            None
        }
    }
}

impl Default for Message {
    fn default() -> Message {
        Message { opcode: Opcode::Text, data: Vec::new() }
    }
}

impl<'a> From<Frame<'a>> for Message {
    fn from(frame: Frame<'a>) -> Message {
        Message { opcode: frame.opcode, data: frame.data.to_vec() }
    }
}
