//! Value rendering for failure reports
//!
//! Comparators hand raw subjects to these helpers so every report renders
//! a value the same way: strings quoted and kept on one line, wide strings
//! decoded code-unit-wise, byte buffers as a bounded hex window around the
//! first differing offset.

/// How many bytes of context a hex window shows around a mismatch.
const HEX_WINDOW: usize = 16;

/// Render an optional narrow string, quoted, control bytes escaped so the
/// value stays on one line.
pub fn render_str(v: Option<&str>) -> String {
    match v {
        None => "(null)".to_string(),
        Some(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    c if (c as u32) < 0x20 => {
                        out.push_str(&format!("\\x{:02x}", c as u32));
                    }
                    c => out.push(c),
                }
            }
            out.push('"');
            out
        }
    }
}

/// Render an optional wide string (UTF-16-style code units).
///
/// Valid sequences decode to readable text; unpaired surrogates render as
/// the replacement character, with the raw code-unit count appended so a
/// mismatch in malformed data is still diagnosable.
pub fn render_wstr(v: Option<&[u16]>) -> String {
    match v {
        None => "(null)".to_string(),
        Some(units) => {
            let decoded: String = char::decode_utf16(units.iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect();
            format!("{} ({} code units)", render_str(Some(&decoded)), units.len())
        }
    }
}

/// First offset at which the two buffers differ within `len` bytes, or
/// `None` if they agree. A buffer shorter than `len` differs at its end.
pub fn first_mismatch(v1: &[u8], v2: &[u8], len: usize) -> Option<usize> {
    let n1 = v1.len().min(len);
    let n2 = v2.len().min(len);
    let common = n1.min(n2);
    for i in 0..common {
        if v1[i] != v2[i] {
            return Some(i);
        }
    }
    if n1 != n2 {
        return Some(common);
    }
    None
}

/// A bounded hex preview of `buf` around `offset`, with the byte at the
/// mismatch offset bracketed.
pub fn hex_window(buf: &[u8], offset: usize) -> String {
    if buf.is_empty() {
        return "(empty)".to_string();
    }
    let start = offset.saturating_sub(HEX_WINDOW / 2);
    let end = (start + HEX_WINDOW).min(buf.len());
    let start = start.min(buf.len());

    let mut out = format!("{:04x} ", start);
    for (i, byte) in buf[start..end].iter().enumerate() {
        let pos = start + i;
        if pos == offset {
            out.push_str(&format!(" [{}]", hex::encode([*byte])));
        } else {
            out.push_str(&format!(" {}", hex::encode([*byte])));
        }
    }
    if offset >= buf.len() {
        out.push_str(" (ends)");
    }
    if end < buf.len() {
        out.push_str(" ..");
    }
    out
}
