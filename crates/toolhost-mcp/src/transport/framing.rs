//! Message framing for newline-delimited JSON.

/// Append the frame delimiter to an encoded message.
pub fn frame(mut encoded: Vec<u8>) -> Vec<u8> {
    encoded.push(b'\n');
    encoded
}

/// Strip surrounding ASCII whitespace from a received frame; `None` if
/// nothing is left. Bytes are not required to be UTF-8.
pub fn unframe(line: &[u8]) -> Option<&[u8]> {
    let start = line.iter().position(|b| !b.is_ascii_whitespace())?;
    let end = line.iter().rposition(|b| !b.is_ascii_whitespace())?;
    Some(&line[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_appends_newline() {
        assert_eq!(frame(b"{}".to_vec()), b"{}\n".to_vec());
    }

    #[test]
    fn test_unframe() {
        assert_eq!(unframe(b"  {\"a\":1}\r\n"), Some(&b"{\"a\":1}"[..]));
        assert_eq!(unframe(b" \n"), None);
        assert_eq!(unframe(b""), None);
    }

    #[test]
    fn test_unframe_keeps_non_utf8_bytes() {
        assert_eq!(unframe(b"\t\xff\xfe\n"), Some(&b"\xff\xfe"[..]));
    }
}
