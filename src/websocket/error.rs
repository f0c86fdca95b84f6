quick_error! {
    /// Websocket framing error
    ///
    /// Any of these errors closes the connection, as the position in the
    /// input stream can't be recovered after a broken frame.
    #[derive(Debug)]
    pub enum Error {
        /// Got websocket frame with unknown opcode
        InvalidOpcode(code: u8) {
            description("opcode of the frame is invalid")
            display("opcode of the frame is invalid: {}", code)
        }
        /// Reserved bits are set (we support no extensions)
        ReservedBits {
            description("reserved bits are set in frame header")
        }
        /// Got fragmented frame (fragmented frames are not supported)
        Fragmented {
            description("received fragmented frame")
        }
        /// Control frame is larger than 125 bytes
        ControlTooLong {
            description("control frame is too long")
        }
        /// Received frame that is longer than configured limit
        TooLong(size: u64, limit: usize) {
            description("received frame that is too long")
            display("received frame of {} bytes, limit is {}", size, limit)
        }
    }
}

#[test]
fn send_sync() {
    fn send_sync<T: Send+Sync>(_: T) {}
    send_sync(Error::Fragmented);
}
