use netbuf::Buf;
use byteorder::{BigEndian, ByteOrder};

use websocket::{Error, Opcode};


/// A borrowed frame of websocket data
///
/// Payload is already unmasked.
#[derive(Debug)]
pub struct Frame<'a> {
    pub opcode: Opcode,
    pub data: &'a [u8],
}


/// Parse a single frame from the start of the buffer
///
/// Returns the frame and number of bytes to consume, or `None` if the frame
/// is not fully received yet. The payload size is checked against `limit`
/// as soon as the length field is in the buffer, so we never wait for (and
/// never buffer) the payload of a frame that is going to be rejected.
///
/// Masked payloads are unmasked in place.
pub fn parse_frame<'x>(buf: &'x mut Buf, limit: usize)
    -> Result<Option<(Frame<'x>, usize)>, Error>
{
    if buf.len() < 2 {
        return Ok(None);
    }
    if buf[0] & 0x70 != 0 {
        return Err(Error::ReservedBits);
    }
    let fin = buf[0] & 0x80 != 0;
    let opcode = match Opcode::from_u8(buf[0] & 0x0F) {
        Some(op) => op,
        None => return Err(Error::InvalidOpcode(buf[0] & 0x0F)),
    };
    if !fin || opcode == Opcode::Continuation {
        return Err(Error::Fragmented);
    }
    let masked = buf[1] & 0x80 != 0;
    let (size, fsize) = {
        match buf[1] & 0x7F {
            126 => {
                if buf.len() < 4 {
                    return Ok(None);
                }
                (BigEndian::read_u16(&buf[2..4]) as u64, 4)
            }
            127 => {
                if buf.len() < 10 {
                    return Ok(None);
                }
                (BigEndian::read_u64(&buf[2..10]), 10)
            }
            size => (size as u64, 2),
        }
    };
    if opcode.is_control() && size > 125 {
        return Err(Error::ControlTooLong);
    }
    if size > limit as u64 {
        return Err(Error::TooLong(size, limit));
    }
    let size = size as usize;
    let start = if masked { fsize + 4 } else { fsize };
    if buf.len() < start + size {
        return Ok(None);
    }
    if masked {
        let mask = [buf[start-4], buf[start-3], buf[start-2], buf[start-1]];
        for idx in 0..size {
            buf[start + idx] ^= mask[idx % 4];
        }
    }
    let frame = Frame {
        opcode: opcode,
        data: &buf[start..(start + size)],
    };
    return Ok(Some((frame, start + size)));
}

/// Write a single unmasked frame with fin bit set
pub fn write_frame(buf: &mut Buf, opcode: Opcode, data: &[u8]) {
    let mut header = [0u8; 10];
    header[0] = opcode.as_u8() | 0x80;  // always fin
    let header_len = match data.len() {
        len @ 0..=125 => {
            header[1] = len as u8;
            2
        }
        len @ 126..=65535 => {
            header[1] = 126;
            BigEndian::write_u16(&mut header[2..4], len as u16);
            4
        }
        len => {
            header[1] = 127;
            BigEndian::write_u64(&mut header[2..10], len as u64);
            10
        }
    };
    buf.extend(&header[..header_len]);
    buf.extend(data);
}

#[cfg(test)]
mod test {
    use netbuf::Buf;
    use websocket::{Error, Opcode};
    use super::{parse_frame, write_frame};

    fn parse_owned(buf: &mut Buf, limit: usize)
        -> Result<Option<(Opcode, Vec<u8>, usize)>, Error>
    {
        parse_frame(buf, limit)
            .map(|r| r.map(|(f, n)| (f.opcode, f.data.to_vec(), n)))
    }

    #[test]
    fn masked_text() {
        // "Hello" from RFC 6455 section 5.7
        let mut buf = Buf::new();
        buf.extend(&[0x81, 0x85, 0x37, 0xfa, 0x21, 0x3d,
                     0x7f, 0x9f, 0x4d, 0x51, 0x58]);
        let (op, data, n) = parse_owned(&mut buf, 100).unwrap().unwrap();
        assert_eq!(op, Opcode::Text);
        assert_eq!(&data[..], b"Hello");
        assert_eq!(n, 11);
    }

    #[test]
    fn unmasked_text() {
        let mut buf = Buf::new();
        buf.extend(&[0x81, 0x05, 0x48, 0x65, 0x6c, 0x6c, 0x6f]);
        let (op, data, n) = parse_owned(&mut buf, 100).unwrap().unwrap();
        assert_eq!(op, Opcode::Text);
        assert_eq!(&data[..], b"Hello");
        assert_eq!(n, 7);
    }

    #[test]
    fn partial() {
        let mut buf = Buf::new();
        buf.extend(&[0x82]);
        assert_matches!(parse_owned(&mut buf, 100), Ok(None));
        buf.extend(&[0x7E, 0x01]);
        assert_matches!(parse_owned(&mut buf, 1000), Ok(None));
        buf.extend(&[0x00]);
        // 256 bytes declared, nothing of payload yet
        assert_matches!(parse_owned(&mut buf, 1000), Ok(None));
        buf.extend(&[7u8; 256][..]);
        let (op, data, n) = parse_owned(&mut buf, 1000).unwrap().unwrap();
        assert_eq!(op, Opcode::Binary);
        assert_eq!(data.len(), 256);
        assert_eq!(n, 260);
    }

    #[test]
    fn too_long_before_payload() {
        let mut buf = Buf::new();
        // 64-bit length of 1 MiB, masked, no payload at all
        buf.extend(&[0x82, 0xFF, 0, 0, 0, 0, 0, 0x10, 0, 0]);
        assert_matches!(parse_owned(&mut buf, 65536),
                        Err(Error::TooLong(1048576, 65536)));
    }

    #[test]
    fn fragmented() {
        let mut buf = Buf::new();
        buf.extend(&[0x01, 0x01, b'x']);
        assert_matches!(parse_owned(&mut buf, 100), Err(Error::Fragmented));
        let mut buf = Buf::new();
        buf.extend(&[0x80, 0x01, b'x']);
        assert_matches!(parse_owned(&mut buf, 100), Err(Error::Fragmented));
    }

    #[test]
    fn bad_header_bits() {
        let mut buf = Buf::new();
        buf.extend(&[0xC1, 0x00]);
        assert_matches!(parse_owned(&mut buf, 100), Err(Error::ReservedBits));
        let mut buf = Buf::new();
        buf.extend(&[0x83, 0x00]);
        assert_matches!(parse_owned(&mut buf, 100),
                        Err(Error::InvalidOpcode(3)));
        let mut buf = Buf::new();
        buf.extend(&[0x89, 0x7E, 0x00, 0x7E]);
        assert_matches!(parse_owned(&mut buf, 1000),
                        Err(Error::ControlTooLong));
    }

    #[test]
    fn length_tiers() {
        let mut buf = Buf::new();
        write_frame(&mut buf, Opcode::Text, &[b'a'; 125]);
        assert_eq!(&buf[0..2], &[0x81, 125]);
        assert_eq!(buf.len(), 127);

        let mut buf = Buf::new();
        write_frame(&mut buf, Opcode::Binary, &[0; 126]);
        assert_eq!(&buf[0..4], &[0x82, 126, 0, 126]);
        assert_eq!(buf.len(), 130);

        let mut buf = Buf::new();
        write_frame(&mut buf, Opcode::Binary, &vec![0; 65535]);
        assert_eq!(&buf[0..4], &[0x82, 126, 0xFF, 0xFF]);

        let mut buf = Buf::new();
        write_frame(&mut buf, Opcode::Binary, &vec![0; 65536]);
        assert_eq!(&buf[0..10], &[0x82, 127, 0, 0, 0, 0, 0, 1, 0, 0]);
        assert_eq!(buf.len(), 65546);
    }

    #[test]
    fn written_frame_parses_back() {
        for &size in &[0, 1, 125, 126, 1000, 65535, 65536, 70000] {
            let payload: Vec<u8> = (0..size).map(|x| (x % 251) as u8)
                .collect();
            let mut buf = Buf::new();
            write_frame(&mut buf, Opcode::Binary, &payload);
            let (op, data, n) = parse_owned(&mut buf, 1 << 20)
                .unwrap().unwrap();
            assert_eq!(op, Opcode::Binary);
            assert_eq!(data, payload);
            assert_eq!(n, buf.len());
        }
    }
}
