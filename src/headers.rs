// Header names are compared case-insensitively, values are compared
// after stripping surrounding whitespace

pub fn is_transfer_encoding(val: &str) -> bool {
    val.eq_ignore_ascii_case("Transfer-Encoding")
}

pub fn is_content_length(val: &str) -> bool {
    val.eq_ignore_ascii_case("Content-Length")
}

pub fn is_connection(val: &str) -> bool {
    val.eq_ignore_ascii_case("Connection")
}

pub fn is_date(val: &str) -> bool {
    val.eq_ignore_ascii_case("Date")
}

fn is_space(ch: u8) -> bool {
    matches!(ch, b'\r' | b'\n' | b' ' | b'\t')
}

pub fn bytes_trim(mut x: &[u8]) -> &[u8] {
    while x.len() > 0 && is_space(x[0]) {
        x = &x[1..];
    }
    while x.len() > 0 && is_space(x[x.len()-1]) {
        x = &x[..x.len()-1];
    }
    return x;
}

/// Only `Connection: keep-alive` keeps connection open
///
/// Note: the comparison is exact (after trimming), `Keep-Alive` or
/// `keep-alive, Upgrade` close the connection.
pub fn is_keep_alive(val: &str) -> bool {
    val.trim() == "keep-alive"
}

/// Checks that header name is a valid token
pub fn is_valid_name(name: &str) -> bool {
    name.len() > 0 && name.bytes().all(|ch| matches!(ch,
        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' |
        b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'))
}

/// Header value may not contain line breaks (no header injection)
pub fn is_valid_value(value: &str) -> bool {
    !value.bytes().any(|ch| ch == b'\r' || ch == b'\n')
}
